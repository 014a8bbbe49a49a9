use workforce_dashboard::columns::{CellRule, ColumnWidth};
use workforce_dashboard::dashboard::{SUBTITLE, TITLE};
use workforce_dashboard::{ColumnSet, DashboardSnapshot, WorkforceStats};

const MAX_CELL_WIDTH: usize = 28;

pub(crate) fn render_summary(stats: &WorkforceStats) {
    println!("{TITLE}");
    println!("{SUBTITLE}\n");
    for card in stats.cards() {
        println!("- {}: {}", card.label, card.value);
    }
}

pub(crate) fn render_table(snapshot: &DashboardSnapshot) {
    println!("{}", snapshot.title);
    if !snapshot.search.is_empty() {
        println!("Search: {}", snapshot.search);
    }
    if let Some(sort) = &snapshot.sort {
        println!("Sorted by {sort}");
    }
    println!();
    print!("{}", format_table(snapshot));

    let page = &snapshot.page;
    println!(
        "\nPage {} of {} ({} matching employees)",
        page.page,
        page.total_pages.max(1),
        page.total_rows
    );
}

pub(crate) fn render_columns(columns: &ColumnSet) {
    println!("Table columns");
    for column in columns.iter() {
        let width = match column.width {
            ColumnWidth::Fixed { px } => format!("{px}px"),
            ColumnWidth::Flex { min_px, .. } => format!("flex, min {min_px}px"),
        };
        let pinned = if column.pinned.is_some() { ", pinned" } else { "" };
        let sortable = if column.sortable { "sortable" } else { "unsorted" };
        println!(
            "- {} ({}): {}, {}, filter {:?}, {}{}",
            column.header,
            column.field,
            describe_rule(&column.cell),
            width,
            column.filter,
            sortable,
            pinned
        );
    }
}

fn describe_rule(rule: &CellRule) -> String {
    match rule {
        CellRule::PlainText => "plain text".to_string(),
        CellRule::LinkText { scheme } => format!("{scheme} link"),
        CellRule::Currency { symbol } => format!("currency ({symbol})"),
        CellRule::ProportionalBar { scale_max, .. } => format!("bar out of {scale_max}"),
        CellRule::Badge { on, off } => format!("badge {on}/{off}"),
        CellRule::DateFormat { pattern } => format!("date {pattern}"),
        CellRule::TagList => "tags".to_string(),
        CellRule::FallbackText { placeholder } => format!("text or {placeholder}"),
    }
}

fn truncate(text: &str) -> String {
    if text.chars().count() <= MAX_CELL_WIDTH {
        return text.to_string();
    }
    let kept: String = text.chars().take(MAX_CELL_WIDTH - 1).collect();
    format!("{kept}…")
}

/// Left-aligned columns separated by two spaces, header underlined.
fn format_table(snapshot: &DashboardSnapshot) -> String {
    let headers: Vec<String> = snapshot
        .columns
        .iter()
        .map(|column| column.header.to_string())
        .collect();
    let rows: Vec<Vec<String>> = snapshot
        .page
        .rows
        .iter()
        .map(|cells| cells.iter().map(|cell| truncate(&cell.plain_text())).collect())
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|header| header.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &headers, &widths);
    let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    push_line(&mut out, &rule, &widths);
    for row in &rows {
        push_line(&mut out, row, &widths);
    }
    out
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}
