//! Employee dashboard: workforce statistics, a declarative display-rule table and a
//! grid engine (quick filter, column filters, sorting, pagination, CSV export) over a
//! static roster.

pub mod columns;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod grid;
pub mod roster;
pub mod stats;
pub mod telemetry;

pub use columns::{Cell, CellRule, ColumnRule, ColumnSet};
pub use dashboard::{Dashboard, DashboardSnapshot};
pub use grid::{GridQuery, EXPORT_FILE_NAME};
pub use roster::{Employee, EmployeeField, EmployeeId, EmployeeRoster};
pub use stats::{StatsCache, WorkforceStats};
