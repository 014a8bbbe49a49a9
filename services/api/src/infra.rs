use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use workforce_dashboard::grid::{GridError, GridQuery};
use workforce_dashboard::{ColumnSet, Dashboard, EmployeeRoster, StatsCache};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) dashboard: DashboardState,
}

/// The parts of a dashboard every request shares. Search, filter and sort state is
/// per request and never stored here.
#[derive(Clone)]
pub(crate) struct DashboardState {
    roster: EmployeeRoster,
    columns: Arc<ColumnSet>,
    stats: Arc<Mutex<StatsCache>>,
    page_size: usize,
}

impl DashboardState {
    pub(crate) fn new(roster: EmployeeRoster, page_size: usize) -> Self {
        Self {
            roster,
            columns: Arc::new(ColumnSet::employee_directory()),
            stats: Arc::new(Mutex::new(StatsCache::new())),
            page_size,
        }
    }

    pub(crate) fn columns(&self) -> &ColumnSet {
        &self.columns
    }

    /// A fresh view over the shared roster and stats cache.
    pub(crate) fn dashboard(&self, query: GridQuery) -> Result<Dashboard, GridError> {
        Dashboard::new(
            self.roster.clone(),
            ColumnSet::clone(&self.columns),
            self.page_size,
        )
        .with_stats_cache(Arc::clone(&self.stats))
        .with_query(query)
    }

    #[cfg(test)]
    pub(crate) fn stats_computations(&self) -> usize {
        self.stats
            .lock()
            .expect("stats cache mutex poisoned")
            .computations()
    }
}
