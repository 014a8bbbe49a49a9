//! Summary figures shown above the employee table.

mod views;

pub use views::{StatCard, StatKind, StatsSummary};

use crate::columns::format::currency;
use crate::roster::{Employee, EmployeeRoster};
use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

/// Derived workforce figures.
///
/// An empty roster produces all zeros rather than dividing by zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkforceStats {
    pub total: usize,
    pub active: usize,
    /// Mean salary rounded to the nearest whole unit, halves rounding up.
    pub avg_salary: u64,
    /// Unrounded mean rating; see [`WorkforceStats::avg_rating_label`].
    pub avg_rating: f64,
    pub total_projects: u64,
    pub departments: usize,
}

impl WorkforceStats {
    pub fn compute(records: &[Employee]) -> Self {
        let total = records.len();
        if total == 0 {
            return Self::empty();
        }

        let active = records.iter().filter(|employee| employee.is_active).count();
        let salary_sum: u128 = records
            .iter()
            .map(|employee| u128::from(employee.salary))
            .sum();
        let rating_sum: f64 = records
            .iter()
            .map(|employee| employee.performance_rating)
            .sum();
        let total_projects = records
            .iter()
            .map(|employee| u64::from(employee.projects_completed))
            .sum();
        let departments = records
            .iter()
            .map(|employee| employee.department.as_str())
            .collect::<HashSet<_>>()
            .len();

        Self {
            total,
            active,
            avg_salary: rounded_mean(salary_sum, total),
            avg_rating: rating_sum / total as f64,
            total_projects,
            departments,
        }
    }

    pub const fn empty() -> Self {
        Self {
            total: 0,
            active: 0,
            avg_salary: 0,
            avg_rating: 0.0,
            total_projects: 0,
            departments: 0,
        }
    }

    /// Mean rating with exactly one decimal digit, e.g. `4.0`.
    pub fn avg_rating_label(&self) -> String {
        format!("{:.1}", self.avg_rating)
    }

    /// The six dashboard cards, in display order.
    pub fn cards(&self) -> Vec<StatCard> {
        vec![
            StatCard::new(StatKind::Employees, self.total.to_string()),
            StatCard::new(StatKind::Active, self.active.to_string()),
            StatCard::new(StatKind::AvgSalary, currency(self.avg_salary)),
            StatCard::new(StatKind::AvgRating, self.avg_rating_label()),
            StatCard::new(StatKind::Projects, self.total_projects.to_string()),
            StatCard::new(StatKind::Departments, self.departments.to_string()),
        ]
    }

    pub fn summary(&self) -> StatsSummary {
        StatsSummary {
            stats: self.clone(),
            avg_rating_label: self.avg_rating_label(),
            cards: self.cards(),
        }
    }
}

// Integer rounding keeps repeated recomputation free of float drift.
fn rounded_mean(sum: u128, count: usize) -> u64 {
    let count = count as u128;
    let mean = (2 * sum + count) / (2 * count);
    u64::try_from(mean).unwrap_or(u64::MAX)
}

/// Remembers the stats of the last roster it saw.
///
/// Holding a clone of the roster keeps its allocation alive, so identity comparison
/// cannot be fooled by a freed and reused address.
#[derive(Debug, Default)]
pub struct StatsCache {
    cached: Option<(EmployeeRoster, WorkforceStats)>,
    computations: usize,
}

impl StatsCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns cached stats when `roster` is the same collection as last time.
    pub fn get(&mut self, roster: &EmployeeRoster) -> &WorkforceStats {
        let hit = matches!(&self.cached, Some((seen, _)) if seen.same_collection(roster));
        if !hit {
            self.cached = None;
        }

        let computations = &mut self.computations;
        let (_, stats) = self.cached.get_or_insert_with(|| {
            let stats = WorkforceStats::compute(roster.records());
            *computations += 1;
            debug!(
                total = stats.total,
                computations = *computations,
                "workforce stats recomputed"
            );
            (roster.clone(), stats)
        });
        stats
    }

    /// How many times stats were actually computed.
    pub fn computations(&self) -> usize {
        self.computations
    }
}
