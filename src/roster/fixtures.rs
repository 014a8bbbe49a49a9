use super::{Employee, EmployeeId, EmployeeRoster};
use chrono::NaiveDate;

pub(crate) fn employee(id: u32, department: &str, rating: f64) -> Employee {
    Employee {
        id: EmployeeId(id),
        first_name: format!("First{id}"),
        last_name: format!("Last{id}"),
        email: format!("person{id}@example.com"),
        department: department.to_string(),
        position: "Analyst".to_string(),
        salary: 50_000,
        location: "Remote".to_string(),
        performance_rating: rating,
        projects_completed: 1,
        age: 30,
        hire_date: None,
        is_active: true,
        skills: Vec::new(),
        manager: None,
    }
}

/// Five people across three departments, one inactive, one without a manager.
pub(crate) fn small_roster() -> EmployeeRoster {
    let mut grace = employee(1, "Engineering", 4.7);
    grace.first_name = "Grace".to_string();
    grace.last_name = "Hopper".to_string();
    grace.email = "grace.hopper@example.com".to_string();
    grace.salary = 120_000;
    grace.location = "New York".to_string();
    grace.projects_completed = 14;
    grace.hire_date = NaiveDate::from_ymd_opt(2019, 3, 15);
    grace.skills = vec!["Rust".to_string(), "Compilers".to_string()];

    let mut alan = employee(2, "Engineering", 4.2);
    alan.first_name = "Alan".to_string();
    alan.last_name = "Turing".to_string();
    alan.email = "alan.turing@example.com".to_string();
    alan.salary = 110_000;
    alan.location = "London".to_string();
    alan.projects_completed = 9;
    alan.manager = Some("Grace Hopper".to_string());

    let mut mary = employee(3, "Sales", 3.6);
    mary.first_name = "Mary".to_string();
    mary.last_name = "Jackson".to_string();
    mary.email = "mary.jackson@example.com".to_string();
    mary.salary = 70_001;
    mary.location = "Chicago".to_string();
    mary.projects_completed = 4;
    mary.is_active = false;
    mary.manager = Some("Alan Turing".to_string());

    let mut ken = employee(4, "Finance", 3.4);
    ken.first_name = "Ken".to_string();
    ken.last_name = "Thompson".to_string();
    ken.email = "ken.thompson@example.com".to_string();
    ken.salary = 65_000;
    ken.location = "Chicago".to_string();
    ken.projects_completed = 2;
    ken.manager = Some("Alan Turing".to_string());

    let mut barbara = employee(5, "Sales", 4.5);
    barbara.first_name = "Barbara".to_string();
    barbara.last_name = "Liskov".to_string();
    barbara.email = "barbara.liskov@example.com".to_string();
    barbara.salary = 95_000;
    barbara.location = "London".to_string();
    barbara.projects_completed = 11;
    barbara.manager = Some("Grace Hopper".to_string());

    EmployeeRoster::from_records(vec![grace, alan, mary, ken, barbara]).expect("fixture is valid")
}
