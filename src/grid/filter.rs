use super::GridError;
use crate::columns::{ColumnRule, FilterKind};
use crate::roster::{parse_date, Employee, EmployeeField, FieldValue};
use chrono::NaiveDate;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextOp {
    Contains,
    Equals,
    StartsWith,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumberOp {
    Equals(f64),
    LessThan(f64),
    GreaterThan(f64),
    /// Inclusive on both ends.
    Between(f64, f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateOp {
    On(NaiveDate),
    Before(NaiveDate),
    After(NaiveDate),
}

/// A per-column condition, matched against the column's export text or typed value.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnFilter {
    Text { op: TextOp, needle: String },
    Number(NumberOp),
    Date(DateOp),
    /// Lower-cased accepted values.
    Set(BTreeSet<String>),
}

impl ColumnFilter {
    pub fn contains(needle: &str) -> Self {
        Self::Text {
            op: TextOp::Contains,
            needle: needle.to_lowercase(),
        }
    }

    pub fn one_of<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::Set(
            values
                .into_iter()
                .map(|value| value.as_ref().trim().to_lowercase())
                .filter(|value| !value.is_empty())
                .collect(),
        )
    }

    pub fn kind(&self) -> FilterKind {
        match self {
            Self::Text { .. } => FilterKind::Text,
            Self::Number(_) => FilterKind::Number,
            Self::Date(_) => FilterKind::Date,
            Self::Set(_) => FilterKind::Set,
        }
    }

    /// Parses `op:value` for a column of the given kind. A bare value uses the kind's
    /// default operator (`contains`, `eq`, `on`, `in`).
    pub fn parse(field: EmployeeField, kind: FilterKind, raw: &str) -> Result<Self, GridError> {
        let raw = raw.trim();
        let (op, operand) = match raw.split_once(':') {
            Some((op, operand)) if is_operator(kind, op) => (Some(op.trim()), operand.trim()),
            _ => (None, raw),
        };
        let invalid = |reason: String| GridError::InvalidFilter { field, reason };

        match kind {
            FilterKind::Text => {
                let op = match op.map(str::to_ascii_lowercase).as_deref() {
                    None | Some("contains") => TextOp::Contains,
                    Some("equals") => TextOp::Equals,
                    Some(_) => TextOp::StartsWith,
                };
                Ok(Self::Text {
                    op,
                    needle: operand.to_lowercase(),
                })
            }
            FilterKind::Number => {
                let number = |value: &str| {
                    value
                        .trim()
                        .parse::<f64>()
                        .ok()
                        .filter(|number| number.is_finite())
                        .ok_or_else(|| invalid(format!("'{value}' is not a number")))
                };
                let op = match op.map(str::to_ascii_lowercase).as_deref() {
                    None | Some("eq") => NumberOp::Equals(number(operand)?),
                    Some("lt") => NumberOp::LessThan(number(operand)?),
                    Some("gt") => NumberOp::GreaterThan(number(operand)?),
                    Some(_) => {
                        let (low, high) = operand
                            .split_once("..")
                            .ok_or_else(|| invalid(format!("range '{operand}' must be a..b")))?;
                        let (low, high) = (number(low)?, number(high)?);
                        if low > high {
                            return Err(invalid(format!("range {low}..{high} is reversed")));
                        }
                        NumberOp::Between(low, high)
                    }
                };
                Ok(Self::Number(op))
            }
            FilterKind::Date => {
                let date = parse_date(operand)
                    .ok_or_else(|| invalid(format!("'{operand}' is not a YYYY-MM-DD date")))?;
                let op = match op.map(str::to_ascii_lowercase).as_deref() {
                    None | Some("on") => DateOp::On(date),
                    Some("before") => DateOp::Before(date),
                    Some(_) => DateOp::After(date),
                };
                Ok(Self::Date(op))
            }
            FilterKind::Set => {
                let filter = Self::one_of(operand.split(['|', ',']));
                match &filter {
                    Self::Set(values) if values.is_empty() => {
                        Err(invalid("set filter needs at least one value".to_string()))
                    }
                    _ => Ok(filter),
                }
            }
            FilterKind::Disabled => Err(GridError::NotFilterable(field)),
        }
    }

    pub fn matches(&self, column: &ColumnRule, employee: &Employee) -> bool {
        match self {
            Self::Text { op, needle } => {
                let haystack = column.export(employee).to_lowercase();
                match op {
                    TextOp::Contains => haystack.contains(needle.as_str()),
                    TextOp::Equals => haystack == *needle,
                    TextOp::StartsWith => haystack.starts_with(needle.as_str()),
                }
            }
            Self::Number(op) => match employee.value(column.field).as_number() {
                Some(value) => match *op {
                    NumberOp::Equals(target) => value == target,
                    NumberOp::LessThan(target) => value < target,
                    NumberOp::GreaterThan(target) => value > target,
                    NumberOp::Between(low, high) => value >= low && value <= high,
                },
                None => false,
            },
            Self::Date(op) => match employee.value(column.field) {
                FieldValue::Date(Some(value)) => match *op {
                    DateOp::On(target) => value == target,
                    DateOp::Before(target) => value < target,
                    DateOp::After(target) => value > target,
                },
                _ => false,
            },
            Self::Set(values) => values.contains(&column.export(employee).to_lowercase()),
        }
    }
}

fn is_operator(kind: FilterKind, op: &str) -> bool {
    let op = op.trim().to_ascii_lowercase();
    let known: &[&str] = match kind {
        FilterKind::Text => &["contains", "equals", "starts"],
        FilterKind::Number => &["eq", "lt", "gt", "range"],
        FilterKind::Date => &["on", "before", "after"],
        FilterKind::Set => &["in"],
        FilterKind::Disabled => &[],
    };
    known.contains(&op.as_str())
}
