use std::io::Cursor;
use workforce_dashboard::columns::{BarTier, Cell};
use workforce_dashboard::grid::{ColumnFilter, GridQuery, SortSpec};
use workforce_dashboard::{
    ColumnSet, Dashboard, EmployeeField, EmployeeRoster, StatsCache, WorkforceStats,
};

fn sample_dashboard() -> Dashboard {
    let roster = EmployeeRoster::sample().expect("sample roster parses");
    Dashboard::new(roster, ColumnSet::employee_directory(), 10)
}

#[test]
fn sample_stats_match_the_bundled_roster() {
    let stats = sample_dashboard().stats();

    assert_eq!(stats.total, 30);
    assert_eq!(stats.active, 26);
    assert_eq!(stats.avg_salary, 106_000);
    assert_eq!(stats.avg_rating_label(), "3.8");
    assert_eq!(stats.total_projects, 560);
    assert_eq!(stats.departments, 7);
    assert!(stats.active <= stats.total);
    assert!(stats.departments <= stats.total);
    assert!((0.0..=5.0).contains(&stats.avg_rating));
}

#[test]
fn repeated_computation_does_not_drift() {
    let roster = EmployeeRoster::sample().expect("sample roster parses");
    let first = WorkforceStats::compute(roster.records());
    for _ in 0..100 {
        assert_eq!(WorkforceStats::compute(roster.records()), first);
    }

    let mut cache = StatsCache::new();
    let cached = cache.get(&roster).clone();
    assert_eq!(cached, first);
    cache.get(&roster.clone());
    assert_eq!(cache.computations(), 1);
}

#[test]
fn empty_roster_yields_zero_stats() {
    let roster = EmployeeRoster::from_records(Vec::new()).expect("empty roster is valid");
    let dashboard = Dashboard::new(roster, ColumnSet::employee_directory(), 10);

    assert_eq!(dashboard.stats(), WorkforceStats::empty());
    assert_eq!(dashboard.stats().avg_rating_label(), "0.0");

    let snapshot = dashboard.snapshot(3).expect("snapshot");
    assert_eq!(snapshot.page.page, 1);
    assert_eq!(snapshot.page.total_pages, 0);
    assert!(snapshot.page.rows.is_empty());
}

#[test]
fn search_for_a_unique_name_then_clear() {
    let mut dashboard = sample_dashboard();
    dashboard.set_search_text("Okafor");
    let rows = dashboard.visible_rows().expect("rows");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].last_name, "Okafor");

    dashboard.clear_search();
    assert_eq!(dashboard.visible_count().expect("count"), 30);
}

#[test]
fn search_by_skill_shows_every_holder() {
    let mut dashboard = sample_dashboard();
    let holders: Vec<u32> = dashboard
        .roster()
        .records()
        .iter()
        .filter(|employee| employee.skills.iter().any(|skill| skill == "Figma"))
        .map(|employee| employee.id.0)
        .collect();
    assert!(!holders.is_empty());

    dashboard.set_search_text("figma");
    let visible: Vec<u32> = dashboard
        .visible_rows()
        .expect("rows")
        .iter()
        .map(|employee| employee.id.0)
        .collect();
    assert_eq!(visible, holders);
}

#[test]
fn engineering_export_matches_the_filtered_view() {
    let mut dashboard = sample_dashboard();
    dashboard
        .set_filter(EmployeeField::Department, ColumnFilter::one_of(["Engineering"]))
        .expect("department filter");
    let visible = dashboard.visible_count().expect("count");

    let mut buffer = Vec::new();
    let written = dashboard.export_csv(&mut buffer).expect("export");
    assert_eq!(written, visible);
    assert_eq!(written, 5);

    let mut reader = csv::Reader::from_reader(Cursor::new(buffer));
    let headers = reader.headers().expect("header row").clone();
    let department = headers
        .iter()
        .position(|header| header == "Department")
        .expect("department column");

    let records: Vec<csv::StringRecord> = reader
        .records()
        .collect::<Result<_, _>>()
        .expect("rows parse");
    assert_eq!(records.len(), visible);
    assert!(records.iter().all(|record| &record[department] == "Engineering"));
}

#[test]
fn export_spans_every_page() {
    let mut dashboard = sample_dashboard();
    dashboard
        .set_filter_expr(EmployeeField::Salary, "gt:90000")
        .expect("salary filter");
    let visible = dashboard.visible_count().expect("count");
    assert!(visible > dashboard.page_size());

    let mut buffer = Vec::new();
    assert_eq!(dashboard.export_csv(&mut buffer).expect("export"), visible);
}

#[test]
fn rating_bars_use_inclusive_tier_boundaries() {
    let dashboard = sample_dashboard()
        .with_query(GridQuery::new().with_sort(SortSpec::desc(EmployeeField::PerformanceRating)))
        .expect("rating sortable");
    let snapshot = dashboard.snapshot(1).expect("snapshot");
    let rating_index = snapshot
        .columns
        .iter()
        .position(|column| column.field == EmployeeField::PerformanceRating)
        .expect("rating column");

    let rows = dashboard.visible_rows().expect("rows");
    for (row, employee) in snapshot.page.rows.iter().zip(rows) {
        let Cell::Bar { tier, .. } = &row[rating_index] else {
            panic!("rating renders as a bar");
        };
        let rating = employee.performance_rating;
        let expected = if rating >= 4.5 {
            BarTier::Top
        } else if rating >= 4.0 {
            BarTier::Upper
        } else if rating >= 3.5 {
            BarTier::Middle
        } else {
            BarTier::Lowest
        };
        assert_eq!(*tier, expected, "rating {rating}");
    }
}

#[test]
fn loads_a_csv_roster() {
    let csv = "\
id,firstName,lastName,email,department,position,salary,location,performanceRating,projectsCompleted,age,hireDate,isActive,skills,manager
1,Ada,Lovelace,ada@example.com,Engineering,Engineer,99000,London,4.5,3,36,2021-04-01,yes,Math;Poetry,
2,Charles,Babbage,charles@example.com,Engineering,Lead,120000,London,3.9,7,50,,no,,Ada Lovelace
";
    let roster = EmployeeRoster::from_csv_reader(csv.as_bytes()).expect("csv parses");
    let dashboard = Dashboard::new(roster, ColumnSet::employee_directory(), 10);

    let stats = dashboard.stats();
    assert_eq!(stats.total, 2);
    assert_eq!(stats.active, 1);
    assert_eq!(stats.avg_salary, 109_500);
    assert_eq!(stats.avg_rating_label(), "4.2");

    let snapshot = dashboard.snapshot(1).expect("snapshot");
    let babbage: Vec<String> = snapshot.page.rows[1].iter().map(Cell::plain_text).collect();
    assert_eq!(babbage[11], "—");
    assert_eq!(babbage[12], "Inactive");
    assert_eq!(babbage[14], "Ada Lovelace");
}
