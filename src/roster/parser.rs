use super::record::{Employee, EmployeeId};
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};
use std::io::Read;

/// Separator between tags inside the CSV `skills` column.
pub const SKILL_SEPARATOR: char = ';';

pub(crate) fn parse_json_records<R: Read>(reader: R) -> Result<Vec<Employee>, serde_json::Error> {
    serde_json::from_reader(reader)
}

pub(crate) fn parse_csv_records<R: Read>(reader: R) -> Result<Vec<Employee>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for record in csv_reader.deserialize::<EmployeeRow>() {
        records.push(record?.into_employee());
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EmployeeRow {
    id: u32,
    first_name: String,
    last_name: String,
    email: String,
    department: String,
    position: String,
    salary: u64,
    location: String,
    performance_rating: f64,
    projects_completed: u32,
    age: u32,
    #[serde(default, deserialize_with = "lenient_date")]
    hire_date: Option<NaiveDate>,
    #[serde(deserialize_with = "flexible_bool")]
    is_active: bool,
    #[serde(default)]
    skills: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    manager: Option<String>,
}

impl EmployeeRow {
    fn into_employee(self) -> Employee {
        let skills = self
            .skills
            .split(SKILL_SEPARATOR)
            .map(str::trim)
            .filter(|skill| !skill.is_empty())
            .map(str::to_string)
            .collect();

        Employee {
            id: EmployeeId(self.id),
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            department: self.department,
            position: self.position,
            salary: self.salary,
            location: self.location,
            performance_rating: self.performance_rating,
            projects_completed: self.projects_completed,
            age: self.age,
            hire_date: self.hire_date,
            is_active: self.is_active,
            skills,
            manager: self.manager,
        }
    }
}

pub(crate) fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

/// Unreadable dates become `None` instead of failing the whole roster.
pub(crate) fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.as_deref().and_then(parse_date))
}

fn flexible_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" | "active" => Ok(true),
        "false" | "no" | "0" | "inactive" | "" => Ok(false),
        other => Err(serde::de::Error::custom(format!(
            "'{other}' is not a recognised active flag"
        ))),
    }
}

pub(crate) fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive());
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_date_and_timestamp_forms() {
        let expected = NaiveDate::from_ymd_opt(2021, 3, 15).expect("valid date");
        assert_eq!(parse_date("2021-03-15"), Some(expected));
        assert_eq!(parse_date(" 2021-03-15T09:30:00Z "), Some(expected));
        assert_eq!(parse_date("15/03/2021"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn csv_rows_split_skills_and_blank_manager() {
        let csv = "id,firstName,lastName,email,department,position,salary,location,performanceRating,projectsCompleted,age,hireDate,isActive,skills,manager\n\
3,Lin,Park,lin.park@example.com,Design,Product Designer,98000,Seattle,4.1,12,29,2022-06-01,yes,Figma; Research;,\n";

        let records = parse_csv_records(csv.as_bytes()).expect("csv parses");
        assert_eq!(records.len(), 1);
        let lin = &records[0];
        assert_eq!(lin.skills, vec!["Figma".to_string(), "Research".to_string()]);
        assert!(lin.manager.is_none());
        assert!(lin.is_active);
    }

    #[test]
    fn csv_rejects_unknown_active_flag() {
        let csv = "id,firstName,lastName,email,department,position,salary,location,performanceRating,projectsCompleted,age,hireDate,isActive,skills,manager\n\
3,Lin,Park,lin.park@example.com,Design,Designer,98000,Seattle,4.1,12,29,2022-06-01,maybe,,\n";

        assert!(parse_csv_records(csv.as_bytes()).is_err());
    }
}
