use super::GridError;
use crate::roster::{Employee, EmployeeField, FieldValue};
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SortSpec {
    pub field: EmployeeField,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(field: EmployeeField) -> Self {
        Self {
            field,
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: EmployeeField) -> Self {
        Self {
            field,
            direction: SortDirection::Desc,
        }
    }

    /// `salary`, `salary:asc` or `salary:desc`.
    pub fn parse(raw: &str) -> Result<Self, GridError> {
        let (key, direction) = match raw.trim().split_once(':') {
            Some((key, direction)) => (key, direction.trim().to_ascii_lowercase()),
            None => (raw.trim(), "asc".to_string()),
        };

        let field = EmployeeField::from_key(key)
            .ok_or_else(|| GridError::UnknownField(key.trim().to_string()))?;
        let direction = match direction.as_str() {
            "asc" => SortDirection::Asc,
            "desc" => SortDirection::Desc,
            _ => return Err(GridError::InvalidSort(raw.to_string())),
        };

        Ok(Self { field, direction })
    }

    pub fn compare(&self, left: &Employee, right: &Employee) -> Ordering {
        let ordering = compare_values(left.value(self.field), right.value(self.field));
        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let direction = match self.direction {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        };
        write!(f, "{}:{}", self.field, direction)
    }
}

// Absent values sort first.
fn compare_values(left: FieldValue<'_>, right: FieldValue<'_>) -> Ordering {
    match (left, right) {
        (FieldValue::Text(a), FieldValue::Text(b)) => a.cmp(b),
        (FieldValue::OptionalText(a), FieldValue::OptionalText(b)) => a.cmp(&b),
        (FieldValue::Integer(a), FieldValue::Integer(b)) => a.cmp(&b),
        (FieldValue::Decimal(a), FieldValue::Decimal(b)) => a.total_cmp(&b),
        (FieldValue::Date(a), FieldValue::Date(b)) => a.cmp(&b),
        (FieldValue::Flag(a), FieldValue::Flag(b)) => a.cmp(&b),
        _ => Ordering::Equal,
    }
}
