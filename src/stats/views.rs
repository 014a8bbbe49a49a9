use super::WorkforceStats;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatKind {
    Employees,
    Active,
    AvgSalary,
    AvgRating,
    Projects,
    Departments,
}

impl StatKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Employees => "Employees",
            Self::Active => "Active",
            Self::AvgSalary => "Avg Salary",
            Self::AvgRating => "Avg Rating",
            Self::Projects => "Projects",
            Self::Departments => "Departments",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StatCard {
    pub kind: StatKind,
    pub label: &'static str,
    pub value: String,
}

impl StatCard {
    pub(crate) fn new(kind: StatKind, value: String) -> Self {
        Self {
            kind,
            label: kind.label(),
            value,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StatsSummary {
    #[serde(flatten)]
    pub stats: WorkforceStats,
    pub avg_rating_label: String,
    pub cards: Vec<StatCard>,
}
