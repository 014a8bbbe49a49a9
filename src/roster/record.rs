use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::parser::{empty_string_as_none, lenient_date};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(pub u32);

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One employee's attribute set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department: String,
    pub position: String,
    pub salary: u64,
    pub location: String,
    pub performance_rating: f64,
    pub projects_completed: u32,
    pub age: u32,
    /// `None` when the source date could not be read.
    #[serde(default, deserialize_with = "lenient_date")]
    pub hire_date: Option<NaiveDate>,
    pub is_active: bool,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub manager: Option<String>,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn value(&self, field: EmployeeField) -> FieldValue<'_> {
        match field {
            EmployeeField::Id => FieldValue::Integer(u64::from(self.id.0)),
            EmployeeField::FirstName => FieldValue::Text(&self.first_name),
            EmployeeField::LastName => FieldValue::Text(&self.last_name),
            EmployeeField::Email => FieldValue::Text(&self.email),
            EmployeeField::Department => FieldValue::Text(&self.department),
            EmployeeField::Position => FieldValue::Text(&self.position),
            EmployeeField::Salary => FieldValue::Integer(self.salary),
            EmployeeField::Location => FieldValue::Text(&self.location),
            EmployeeField::PerformanceRating => FieldValue::Decimal(self.performance_rating),
            EmployeeField::ProjectsCompleted => {
                FieldValue::Integer(u64::from(self.projects_completed))
            }
            EmployeeField::Age => FieldValue::Integer(u64::from(self.age)),
            EmployeeField::HireDate => FieldValue::Date(self.hire_date),
            EmployeeField::IsActive => FieldValue::Flag(self.is_active),
            EmployeeField::Skills => FieldValue::Tags(&self.skills),
            EmployeeField::Manager => FieldValue::OptionalText(self.manager.as_deref()),
        }
    }
}

/// Every attribute of [`Employee`], in table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EmployeeField {
    Id,
    FirstName,
    LastName,
    Email,
    Department,
    Position,
    Salary,
    Location,
    PerformanceRating,
    ProjectsCompleted,
    Age,
    HireDate,
    IsActive,
    Skills,
    Manager,
}

impl EmployeeField {
    pub const fn ordered() -> [Self; 15] {
        [
            Self::Id,
            Self::FirstName,
            Self::LastName,
            Self::Email,
            Self::Department,
            Self::Position,
            Self::Salary,
            Self::Location,
            Self::PerformanceRating,
            Self::ProjectsCompleted,
            Self::Age,
            Self::HireDate,
            Self::IsActive,
            Self::Skills,
            Self::Manager,
        ]
    }

    /// Stable key used in query strings and CLI flags.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Email => "email",
            Self::Department => "department",
            Self::Position => "position",
            Self::Salary => "salary",
            Self::Location => "location",
            Self::PerformanceRating => "performanceRating",
            Self::ProjectsCompleted => "projectsCompleted",
            Self::Age => "age",
            Self::HireDate => "hireDate",
            Self::IsActive => "isActive",
            Self::Skills => "skills",
            Self::Manager => "manager",
        }
    }

    /// Accepts the camelCase key, case-insensitively.
    pub fn from_key(raw: &str) -> Option<Self> {
        let wanted = raw.trim();
        Self::ordered()
            .into_iter()
            .find(|field| field.key().eq_ignore_ascii_case(wanted))
    }
}

impl fmt::Display for EmployeeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Borrowed view of one attribute, typed by the kind of data it carries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    OptionalText(Option<&'a str>),
    Integer(u64),
    Decimal(f64),
    Date(Option<NaiveDate>),
    Flag(bool),
    Tags(&'a [String]),
}

impl FieldValue<'_> {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Integer(value) => Some(*value as f64),
            FieldValue::Decimal(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(value) => Some(value),
            FieldValue::OptionalText(value) => *value,
            _ => None,
        }
    }
}
