//! Display-rule table: how each employee field is labelled, sized, filtered, sorted and
//! rendered.

mod cell;
pub mod format;
mod rule;

pub use cell::{export_text, render_cell, Cell};
pub use rule::{BadgeState, BarThreshold, BarTier, CellRule, RATING_THRESHOLDS};

use crate::roster::{Employee, EmployeeField};
use serde::Serialize;

pub const DEFAULT_MIN_WIDTH: u16 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ColumnWidth {
    Fixed { px: u16 },
    Flex { grow: u8, min_px: u16 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Pin {
    Left,
    Right,
}

/// Which filter a column accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    Text,
    Number,
    Date,
    /// Pick from the distinct values present in the column.
    Set,
    Disabled,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnRule {
    pub field: EmployeeField,
    pub header: &'static str,
    pub width: ColumnWidth,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pinned: Option<Pin>,
    pub sortable: bool,
    pub filter: FilterKind,
    pub resizable: bool,
    pub floating_filter: bool,
    pub cell: CellRule,
}

impl ColumnRule {
    /// A column with the table-wide defaults: flexible width with a 100px floor,
    /// sortable, text-filterable, resizable, with a filter row under the header.
    pub fn new(field: EmployeeField, header: &'static str) -> Self {
        Self {
            field,
            header,
            width: ColumnWidth::Flex {
                grow: 1,
                min_px: DEFAULT_MIN_WIDTH,
            },
            pinned: None,
            sortable: true,
            filter: FilterKind::Text,
            resizable: true,
            floating_filter: true,
            cell: CellRule::PlainText,
        }
    }

    pub fn fixed(mut self, px: u16) -> Self {
        self.width = ColumnWidth::Fixed { px };
        self
    }

    pub fn pinned(mut self, pin: Pin) -> Self {
        self.pinned = Some(pin);
        self
    }

    pub fn filter(mut self, filter: FilterKind) -> Self {
        self.filter = filter;
        self.floating_filter = filter != FilterKind::Disabled;
        self
    }

    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    pub fn cell(mut self, cell: CellRule) -> Self {
        self.cell = cell;
        self
    }

    pub fn is_filterable(&self) -> bool {
        self.filter != FilterKind::Disabled
    }

    pub fn render(&self, employee: &Employee) -> Cell {
        render_cell(&self.cell, employee.value(self.field))
    }

    pub fn export(&self, employee: &Employee) -> String {
        export_text(&self.cell, employee.value(self.field))
    }
}

/// Ordered columns of the employee table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ColumnSet {
    columns: Vec<ColumnRule>,
}

impl ColumnSet {
    pub fn new(columns: Vec<ColumnRule>) -> Self {
        Self { columns }
    }

    pub fn employee_directory() -> Self {
        use EmployeeField as F;

        Self::new(vec![
            ColumnRule::new(F::Id, "Id")
                .fixed(70)
                .pinned(Pin::Left)
                .filter(FilterKind::Number),
            ColumnRule::new(F::FirstName, "First Name"),
            ColumnRule::new(F::LastName, "Last Name"),
            ColumnRule::new(F::Email, "Email")
                .fixed(220)
                .cell(CellRule::LinkText { scheme: "mailto:" }),
            ColumnRule::new(F::Department, "Department").filter(FilterKind::Set),
            ColumnRule::new(F::Position, "Position").fixed(180),
            ColumnRule::new(F::Salary, "Salary")
                .fixed(110)
                .filter(FilterKind::Number)
                .cell(CellRule::Currency {
                    symbol: format::CURRENCY_SYMBOL,
                }),
            ColumnRule::new(F::Location, "Location").filter(FilterKind::Set),
            ColumnRule::new(F::PerformanceRating, "Rating")
                .fixed(150)
                .filter(FilterKind::Number)
                .cell(CellRule::ProportionalBar {
                    scale_max: crate::roster::MAX_RATING,
                    thresholds: RATING_THRESHOLDS,
                }),
            ColumnRule::new(F::ProjectsCompleted, "Projects")
                .fixed(100)
                .filter(FilterKind::Number),
            ColumnRule::new(F::Age, "Age")
                .fixed(80)
                .filter(FilterKind::Number),
            ColumnRule::new(F::HireDate, "Hire Date")
                .filter(FilterKind::Date)
                .cell(CellRule::DateFormat {
                    pattern: format::DATE_PATTERN,
                }),
            ColumnRule::new(F::IsActive, "Status")
                .fixed(100)
                .cell(CellRule::Badge {
                    on: "Active",
                    off: "Inactive",
                }),
            ColumnRule::new(F::Skills, "Skills")
                .fixed(250)
                .unsortable()
                .filter(FilterKind::Disabled)
                .cell(CellRule::TagList),
            ColumnRule::new(F::Manager, "Manager").cell(CellRule::FallbackText {
                placeholder: format::PLACEHOLDER,
            }),
        ])
    }

    /// Columns in display order, pinned-left first.
    pub fn iter(&self) -> impl Iterator<Item = &ColumnRule> {
        let pinned = self
            .columns
            .iter()
            .filter(|column| column.pinned == Some(Pin::Left));
        let middle = self.columns.iter().filter(|column| column.pinned.is_none());
        let trailing = self
            .columns
            .iter()
            .filter(|column| column.pinned == Some(Pin::Right));
        pinned.chain(middle).chain(trailing)
    }

    pub fn get(&self, field: EmployeeField) -> Option<&ColumnRule> {
        self.columns.iter().find(|column| column.field == field)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn headers(&self) -> Vec<&'static str> {
        self.iter().map(|column| column.header).collect()
    }

    pub fn render_row(&self, employee: &Employee) -> Vec<Cell> {
        self.iter().map(|column| column.render(employee)).collect()
    }

    pub fn export_row(&self, employee: &Employee) -> Vec<String> {
        self.iter().map(|column| column.export(employee)).collect()
    }

    /// Lower-cased export text of every column, one per line. Columns without a
    /// filter of their own, such as skills, are still searched.
    pub fn search_text(&self, employee: &Employee) -> String {
        self.iter()
            .map(|column| column.export(employee).to_lowercase())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for ColumnSet {
    fn default() -> Self {
        Self::employee_directory()
    }
}
