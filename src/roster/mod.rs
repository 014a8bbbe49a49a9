//! The immutable employee collection a dashboard session is bound to.

#[cfg(test)]
pub(crate) mod fixtures;
mod parser;
mod record;

pub use parser::SKILL_SEPARATOR;
pub use record::{Employee, EmployeeField, EmployeeId, FieldValue};

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

pub(crate) use parser::parse_date;

const SAMPLE_DATASET: &str = include_str!("../../data/employees.json");

pub const MAX_RATING: f64 = 5.0;

#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("failed to read roster: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid roster JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid roster CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("unsupported roster format '{0}', expected .json or .csv")]
    UnsupportedFormat(String),
    #[error("employee id {0} appears more than once")]
    DuplicateId(EmployeeId),
    #[error("employee {id} has rating {rating}, expected a value between 0 and 5")]
    RatingOutOfRange { id: EmployeeId, rating: f64 },
}

/// Shared, read-only employee records.
///
/// Cloning is cheap and keeps the same allocation, so clones compare equal under
/// [`EmployeeRoster::same_collection`].
#[derive(Debug, Clone)]
pub struct EmployeeRoster {
    records: Arc<[Employee]>,
}

impl EmployeeRoster {
    pub fn from_records(records: Vec<Employee>) -> Result<Self, RosterError> {
        let mut seen = HashSet::with_capacity(records.len());
        for employee in &records {
            if !seen.insert(employee.id) {
                return Err(RosterError::DuplicateId(employee.id));
            }

            let rating = employee.performance_rating;
            if !rating.is_finite() || !(0.0..=MAX_RATING).contains(&rating) {
                return Err(RosterError::RatingOutOfRange {
                    id: employee.id,
                    rating,
                });
            }
        }

        debug!(records = records.len(), "roster validated");
        Ok(Self {
            records: records.into(),
        })
    }

    /// The bundled demo roster.
    pub fn sample() -> Result<Self, RosterError> {
        Self::from_json_reader(SAMPLE_DATASET.as_bytes())
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, RosterError> {
        Self::from_records(parser::parse_json_records(reader)?)
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, RosterError> {
        Self::from_records(parser::parse_csv_records(reader)?)
    }

    /// Picks the parser from the file extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, RosterError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let roster = match extension.as_str() {
            "json" => Self::from_json_reader(std::fs::File::open(path)?)?,
            "csv" => Self::from_csv_reader(std::fs::File::open(path)?)?,
            _ => return Err(RosterError::UnsupportedFormat(path.display().to_string())),
        };

        info!(path = %path.display(), records = roster.len(), "roster loaded");
        Ok(roster)
    }

    /// Loads `path` when given, otherwise the bundled sample.
    pub fn load(path: Option<&Path>) -> Result<Self, RosterError> {
        match path {
            Some(path) => Self::from_path(path),
            None => Self::sample(),
        }
    }

    pub fn records(&self) -> &[Employee] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: EmployeeId) -> Option<&Employee> {
        self.records.iter().find(|employee| employee.id == id)
    }

    /// True when both handles point at the same underlying collection.
    pub fn same_collection(&self, other: &EmployeeRoster) -> bool {
        Arc::ptr_eq(&self.records, &other.records)
    }
}
