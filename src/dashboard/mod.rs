//! One dashboard view: header, stat cards and the employee grid with its search box.

use crate::columns::{Cell, ColumnSet};
use crate::error::AppError;
use crate::grid::{self, ColumnFilter, GridError, GridQuery, Page, SortSpec};
use crate::roster::{Employee, EmployeeField, EmployeeRoster};
use crate::stats::{StatsCache, StatsSummary, WorkforceStats};
use serde::Serialize;
use std::io::Write;
use std::sync::{Arc, Mutex};
use tracing::debug;

pub const TITLE: &str = "Employee Dashboard";
pub const SUBTITLE: &str = "Workforce overview and management";

/// View state for a single dashboard. Search, filters and sort live here and die with
/// the view; only the roster and the stats cache may be shared.
#[derive(Debug)]
pub struct Dashboard {
    roster: EmployeeRoster,
    columns: ColumnSet,
    stats: Arc<Mutex<StatsCache>>,
    query: GridQuery,
    page_size: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub stats: StatsSummary,
    pub columns: ColumnSet,
    pub search: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    pub page: Page<Vec<Cell>>,
}

impl Dashboard {
    pub fn new(roster: EmployeeRoster, columns: ColumnSet, page_size: usize) -> Self {
        Self {
            roster,
            columns,
            stats: Arc::new(Mutex::new(StatsCache::new())),
            query: GridQuery::default(),
            page_size: page_size.max(1),
        }
    }

    /// Shares an existing stats cache, e.g. one owned by a long-running server.
    pub fn with_stats_cache(mut self, stats: Arc<Mutex<StatsCache>>) -> Self {
        self.stats = stats;
        self
    }

    /// Replaces search, filters and sort in one go after checking them against the
    /// column set.
    pub fn with_query(mut self, query: GridQuery) -> Result<Self, GridError> {
        query.validate(&self.columns)?;
        self.query = query;
        Ok(self)
    }

    pub fn roster(&self) -> &EmployeeRoster {
        &self.roster
    }

    pub fn columns(&self) -> &ColumnSet {
        &self.columns
    }

    pub fn query(&self) -> &GridQuery {
        &self.query
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn search_text(&self) -> &str {
        &self.query.search
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.query.search = text.into();
        debug!(search = %self.query.search, "search text updated");
    }

    pub fn clear_search(&mut self) {
        self.query.search.clear();
    }

    pub fn set_sort(&mut self, sort: Option<SortSpec>) -> Result<(), GridError> {
        if let Some(spec) = sort {
            GridQuery::new().with_sort(spec).validate(&self.columns)?;
        }
        self.query.sort = sort;
        Ok(())
    }

    pub fn set_filter(&mut self, field: EmployeeField, filter: ColumnFilter) -> Result<(), GridError> {
        GridQuery::new()
            .with_filter(field, filter.clone())
            .validate(&self.columns)?;
        self.query.filters.insert(field, filter);
        Ok(())
    }

    /// Parses a filter expression such as `gt:90000` or `in:Engineering|Sales`.
    pub fn set_filter_expr(&mut self, field: EmployeeField, raw: &str) -> Result<(), GridError> {
        self.query.set_filter_expr(&self.columns, field, raw)
    }

    pub fn clear_filter(&mut self, field: EmployeeField) {
        self.query.filters.remove(&field);
    }

    pub fn clear_filters(&mut self) {
        self.query.filters.clear();
    }

    /// Stats over the whole roster, independent of search and filters.
    pub fn stats(&self) -> WorkforceStats {
        self.stats
            .lock()
            .expect("stats cache mutex poisoned")
            .get(&self.roster)
            .clone()
    }

    /// Every row passing search and filters, in sort order.
    pub fn visible_rows(&self) -> Result<Vec<&Employee>, GridError> {
        self.query.apply(self.roster.records(), &self.columns)
    }

    pub fn visible_count(&self) -> Result<usize, GridError> {
        self.visible_rows().map(|rows| rows.len())
    }

    pub fn page(&self, requested: usize) -> Result<Page<&Employee>, GridError> {
        Ok(Page::slice(self.visible_rows()?, requested, self.page_size))
    }

    /// Writes every visible row, across all pages, as CSV.
    pub fn export_csv<W: Write>(&self, writer: W) -> Result<usize, AppError> {
        let rows = self.visible_rows()?;
        Ok(grid::write_csv(writer, &self.columns, &rows)?)
    }

    pub fn snapshot(&self, requested: usize) -> Result<DashboardSnapshot, GridError> {
        let page = self
            .page(requested)?
            .map(|employee| self.columns.render_row(employee));

        Ok(DashboardSnapshot {
            title: TITLE,
            subtitle: SUBTITLE,
            stats: self.stats().summary(),
            columns: self.columns.clone(),
            search: self.query.search.clone(),
            sort: self.query.sort.map(|sort| sort.to_string()),
            page,
        })
    }
}
