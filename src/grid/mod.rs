//! Grid engine: quick filter, column filters, sorting, paging and CSV export over an
//! immutable roster.

mod export;
mod filter;
mod page;
mod sort;

pub use export::{write_csv, ExportError, EXPORT_FILE_NAME};
pub use filter::{ColumnFilter, DateOp, NumberOp, TextOp};
pub use page::Page;
pub use sort::{SortDirection, SortSpec};

use crate::columns::{ColumnSet, FilterKind};
use crate::roster::{Employee, EmployeeField};
use std::collections::BTreeMap;

#[derive(Debug, thiserror::Error)]
pub enum GridError {
    #[error("unknown column '{0}'")]
    UnknownField(String),
    #[error("column '{0}' cannot be filtered")]
    NotFilterable(EmployeeField),
    #[error("column '{0}' cannot be sorted")]
    NotSortable(EmployeeField),
    #[error("column '{field}' takes a {expected:?} filter, not {found:?}")]
    FilterKindMismatch {
        field: EmployeeField,
        expected: FilterKind,
        found: FilterKind,
    },
    #[error("invalid filter for '{field}': {reason}")]
    InvalidFilter { field: EmployeeField, reason: String },
    #[error("invalid sort '{0}', expected <column>[:asc|:desc]")]
    InvalidSort(String),
    #[error("invalid page '{0}', expected a positive integer")]
    InvalidPage(String),
}

/// Which rows are visible and in what order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridQuery {
    /// Free text; every whitespace-separated token must appear somewhere in the row.
    pub search: String,
    pub filters: BTreeMap<EmployeeField, ColumnFilter>,
    pub sort: Option<SortSpec>,
}

impl GridQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_filter(mut self, field: EmployeeField, filter: ColumnFilter) -> Self {
        self.filters.insert(field, filter);
        self
    }

    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Parses `raw` against the column's declared filter kind and installs it.
    pub fn set_filter_expr(
        &mut self,
        columns: &ColumnSet,
        field: EmployeeField,
        raw: &str,
    ) -> Result<(), GridError> {
        let column = columns
            .get(field)
            .ok_or_else(|| GridError::UnknownField(field.to_string()))?;
        let filter = ColumnFilter::parse(field, column.filter, raw)?;
        self.filters.insert(field, filter);
        Ok(())
    }

    /// Rejects filters and sorts the column set does not allow.
    pub fn validate(&self, columns: &ColumnSet) -> Result<(), GridError> {
        for (field, filter) in &self.filters {
            let column = columns
                .get(*field)
                .ok_or_else(|| GridError::UnknownField(field.to_string()))?;
            if !column.is_filterable() {
                return Err(GridError::NotFilterable(*field));
            }
            if column.filter != filter.kind() {
                return Err(GridError::FilterKindMismatch {
                    field: *field,
                    expected: column.filter,
                    found: filter.kind(),
                });
            }
        }

        if let Some(sort) = &self.sort {
            let column = columns
                .get(sort.field)
                .ok_or_else(|| GridError::UnknownField(sort.field.to_string()))?;
            if !column.sortable {
                return Err(GridError::NotSortable(sort.field));
            }
        }

        Ok(())
    }

    /// Filters then sorts. Equal rows keep their roster order.
    pub fn apply<'a>(
        &self,
        records: &'a [Employee],
        columns: &ColumnSet,
    ) -> Result<Vec<&'a Employee>, GridError> {
        self.validate(columns)?;

        let tokens = search_tokens(&self.search);
        let mut rows: Vec<&Employee> = records
            .iter()
            .filter(|employee| matches_search(&tokens, columns, employee))
            .filter(|employee| self.matches_filters(columns, employee))
            .collect();

        if let Some(sort) = &self.sort {
            rows.sort_by(|left, right| sort.compare(left, right));
        }

        Ok(rows)
    }

    fn matches_filters(&self, columns: &ColumnSet, employee: &Employee) -> bool {
        self.filters.iter().all(|(field, filter)| {
            columns
                .get(*field)
                .map(|column| filter.matches(column, employee))
                .unwrap_or(false)
        })
    }
}

fn search_tokens(search: &str) -> Vec<String> {
    search.split_whitespace().map(str::to_lowercase).collect()
}

fn matches_search(tokens: &[String], columns: &ColumnSet, employee: &Employee) -> bool {
    if tokens.is_empty() {
        return true;
    }
    let text = columns.search_text(employee);
    tokens.iter().all(|token| text.contains(token.as_str()))
}

/// A grid query plus the requested page, as parsed from `key=value` parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct GridRequest {
    pub query: GridQuery,
    pub page: usize,
}

impl Default for GridRequest {
    fn default() -> Self {
        Self {
            query: GridQuery::default(),
            page: 1,
        }
    }
}

impl GridRequest {
    pub const FILTER_PREFIX: &'static str = "filter.";

    /// Understands `search`, `sort`, `page` and `filter.<column>`; other keys are ignored.
    pub fn from_params<'p, I>(params: I, columns: &ColumnSet) -> Result<Self, GridError>
    where
        I: IntoIterator<Item = (&'p str, &'p str)>,
    {
        let mut request = Self::default();

        for (key, value) in params {
            match key {
                "search" => request.query.search = value.to_string(),
                "sort" if value.trim().is_empty() => request.query.sort = None,
                "sort" => request.query.sort = Some(SortSpec::parse(value)?),
                "page" => {
                    request.page = value
                        .trim()
                        .parse::<usize>()
                        .ok()
                        .filter(|page| *page > 0)
                        .ok_or_else(|| GridError::InvalidPage(value.to_string()))?;
                }
                _ => {
                    let Some(column_key) = key.strip_prefix(Self::FILTER_PREFIX) else {
                        continue;
                    };
                    if value.trim().is_empty() {
                        continue;
                    }
                    let field = EmployeeField::from_key(column_key)
                        .ok_or_else(|| GridError::UnknownField(column_key.to_string()))?;
                    request.query.set_filter_expr(columns, field, value)?;
                }
            }
        }

        request.query.validate(columns)?;
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::fixtures::small_roster;
    use crate::roster::EmployeeId;

    fn ids(rows: &[&Employee]) -> Vec<u32> {
        rows.iter().map(|employee| employee.id.0).collect()
    }

    #[test]
    fn empty_query_keeps_roster_order() {
        let roster = small_roster();
        let columns = ColumnSet::employee_directory();
        let rows = GridQuery::new()
            .apply(roster.records(), &columns)
            .expect("query applies");
        assert_eq!(ids(&rows), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn search_matches_a_single_record_then_clears() {
        let roster = small_roster();
        let columns = ColumnSet::employee_directory();

        let rows = GridQuery::new()
            .with_search("LISKOV")
            .apply(roster.records(), &columns)
            .expect("query applies");
        assert_eq!(ids(&rows), vec![5]);

        let rows = GridQuery::new()
            .with_search("")
            .apply(roster.records(), &columns)
            .expect("query applies");
        assert_eq!(rows.len(), roster.len());
    }

    #[test]
    fn every_search_token_must_match() {
        let roster = small_roster();
        let columns = ColumnSet::employee_directory();
        let rows = GridQuery::new()
            .with_search("chicago  thompson")
            .apply(roster.records(), &columns)
            .expect("query applies");
        assert_eq!(ids(&rows), vec![4]);
    }

    #[test]
    fn search_finds_people_by_skill() {
        let roster = small_roster();
        let columns = ColumnSet::employee_directory();
        let rows = GridQuery::new()
            .with_search("Compilers")
            .apply(roster.records(), &columns)
            .expect("query applies");
        assert_eq!(ids(&rows), vec![1]);
    }

    #[test]
    fn filters_combine_with_sort() {
        let roster = small_roster();
        let columns = ColumnSet::employee_directory();
        let rows = GridQuery::new()
            .with_filter(
                EmployeeField::Department,
                ColumnFilter::one_of(["Engineering", "Sales"]),
            )
            .with_sort(SortSpec::desc(EmployeeField::Salary))
            .apply(roster.records(), &columns)
            .expect("query applies");
        assert_eq!(ids(&rows), vec![1, 2, 5, 3]);
    }

    #[test]
    fn rejects_filter_of_the_wrong_kind() {
        let roster = small_roster();
        let columns = ColumnSet::employee_directory();
        let err = GridQuery::new()
            .with_filter(EmployeeField::Salary, ColumnFilter::contains("120"))
            .apply(roster.records(), &columns)
            .expect_err("kind mismatch");
        assert!(matches!(err, GridError::FilterKindMismatch { .. }));
    }

    #[test]
    fn rejects_sorting_skills() {
        let columns = ColumnSet::employee_directory();
        let err = GridQuery::new()
            .with_sort(SortSpec::asc(EmployeeField::Skills))
            .validate(&columns)
            .expect_err("skills unsortable");
        assert!(matches!(err, GridError::NotSortable(EmployeeField::Skills)));
    }

    #[test]
    fn parses_request_parameters() {
        let columns = ColumnSet::employee_directory();
        let request = GridRequest::from_params(
            [
                ("search", "london"),
                ("sort", "performanceRating:desc"),
                ("page", "2"),
                ("filter.department", "in:Engineering|Sales"),
                ("filter.age", ""),
                ("utm_source", "mail"),
            ],
            &columns,
        )
        .expect("request parses");

        assert_eq!(request.page, 2);
        assert_eq!(request.query.search, "london");
        assert_eq!(
            request.query.sort,
            Some(SortSpec::desc(EmployeeField::PerformanceRating))
        );
        assert_eq!(request.query.filters.len(), 1);

        let roster = small_roster();
        let rows = request
            .query
            .apply(roster.records(), &columns)
            .expect("query applies");
        assert_eq!(ids(&rows), vec![5, 2]);
        assert!(rows.iter().all(|row| row.id != EmployeeId(4)));
    }

    #[test]
    fn rejects_bad_request_parameters() {
        let columns = ColumnSet::employee_directory();
        assert!(matches!(
            GridRequest::from_params([("page", "zero")], &columns),
            Err(GridError::InvalidPage(_))
        ));
        assert!(matches!(
            GridRequest::from_params([("filter.shoeSize", "42")], &columns),
            Err(GridError::UnknownField(_))
        ));
        assert!(matches!(
            GridRequest::from_params([("filter.skills", "Rust")], &columns),
            Err(GridError::NotFilterable(EmployeeField::Skills))
        ));
    }
}
