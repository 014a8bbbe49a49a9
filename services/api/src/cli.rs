use crate::report::{render_columns, render_summary, render_table};
use crate::server;
use clap::{Args, Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::info;
use workforce_dashboard::config::AppConfig;
use workforce_dashboard::error::AppError;
use workforce_dashboard::grid::{GridError, GridQuery, SortSpec};
use workforce_dashboard::{telemetry, ColumnSet, Dashboard, EmployeeField, EmployeeRoster};

#[derive(Parser, Debug)]
#[command(
    name = "Employee Dashboard",
    about = "Serve or inspect the workforce overview and employee table",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Print the six workforce stat cards
    Summary(SummaryArgs),
    /// Print one page of the employee table
    Table(TableArgs),
    /// Write the filtered, sorted table as CSV
    Export(ExportArgs),
    /// Describe every table column and how it renders
    Columns(ColumnsArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct DatasetArgs {
    /// JSON or CSV roster to load instead of the configured or bundled one
    #[arg(long)]
    pub(crate) dataset: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    #[command(flatten)]
    pub(crate) source: DatasetArgs,
}

#[derive(Args, Debug)]
pub(crate) struct SummaryArgs {
    #[command(flatten)]
    source: DatasetArgs,
    /// Emit JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct GridArgs {
    /// Quick filter; every word must appear in the row
    #[arg(long)]
    search: Option<String>,
    /// Sort column with optional direction, e.g. `salary:desc`
    #[arg(long)]
    sort: Option<String>,
    /// Column filter as `<column>=<expr>`, e.g. `department=in:Engineering|Sales` (repeatable)
    #[arg(long = "filter", value_name = "COLUMN=EXPR")]
    filters: Vec<String>,
}

#[derive(Args, Debug)]
pub(crate) struct TableArgs {
    #[command(flatten)]
    source: DatasetArgs,
    #[command(flatten)]
    grid: GridArgs,
    /// 1-based page; pages past the end show the last page
    #[arg(long, default_value_t = 1, value_parser = parse_positive)]
    page: usize,
    /// Override the configured page size
    #[arg(long, value_parser = parse_positive)]
    page_size: Option<usize>,
    /// Emit the dashboard snapshot as JSON instead of a text table
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ExportArgs {
    #[command(flatten)]
    source: DatasetArgs,
    #[command(flatten)]
    grid: GridArgs,
    /// File to write; defaults to stdout
    #[arg(long, short)]
    output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct ColumnsArgs {
    /// Emit JSON instead of text
    #[arg(long)]
    json: bool,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Summary(args) => run_summary(args),
        Command::Table(args) => run_table(args),
        Command::Export(args) => run_export(args),
        Command::Columns(args) => run_columns(args),
    }
}

fn parse_positive(raw: &str) -> Result<usize, String> {
    match raw.trim().parse::<usize>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(format!("'{raw}' is not a positive integer")),
    }
}

fn bootstrap(source: &DatasetArgs) -> Result<(AppConfig, EmployeeRoster), AppError> {
    let mut config = AppConfig::load()?;
    if let Some(dataset) = source.dataset.clone() {
        config.dashboard.dataset = Some(dataset);
    }
    telemetry::init(&config.telemetry)?;

    let roster = EmployeeRoster::load(config.dashboard.dataset.as_deref())?;
    Ok((config, roster))
}

impl GridArgs {
    fn query(&self, columns: &ColumnSet) -> Result<GridQuery, GridError> {
        let mut query = GridQuery::new().with_search(self.search.clone().unwrap_or_default());

        if let Some(sort) = self.sort.as_deref() {
            query = query.with_sort(SortSpec::parse(sort)?);
        }

        for raw in &self.filters {
            let (key, expr) = raw.split_once('=').ok_or_else(|| GridError::UnknownField(raw.clone()))?;
            let field = EmployeeField::from_key(key)
                .ok_or_else(|| GridError::UnknownField(key.trim().to_string()))?;
            query.set_filter_expr(columns, field, expr)?;
        }

        query.validate(columns)?;
        Ok(query)
    }
}

fn run_summary(args: SummaryArgs) -> Result<(), AppError> {
    let (config, roster) = bootstrap(&args.source)?;
    let dashboard = Dashboard::new(roster, ColumnSet::employee_directory(), config.dashboard.page_size);
    let stats = dashboard.stats();

    if args.json {
        print_json(&stats.summary())
    } else {
        render_summary(&stats);
        Ok(())
    }
}

fn run_table(args: TableArgs) -> Result<(), AppError> {
    let (config, roster) = bootstrap(&args.source)?;
    let columns = ColumnSet::employee_directory();
    let query = args.grid.query(&columns)?;
    let page_size = args.page_size.unwrap_or(config.dashboard.page_size);

    let dashboard = Dashboard::new(roster, columns, page_size).with_query(query)?;
    let snapshot = dashboard.snapshot(args.page)?;

    if args.json {
        print_json(&snapshot)
    } else {
        render_table(&snapshot);
        Ok(())
    }
}

fn run_export(args: ExportArgs) -> Result<(), AppError> {
    let (config, roster) = bootstrap(&args.source)?;
    let columns = ColumnSet::employee_directory();
    let query = args.grid.query(&columns)?;
    let dashboard = Dashboard::new(roster, columns, config.dashboard.page_size).with_query(query)?;

    let rows = match &args.output {
        Some(path) => {
            let rows = dashboard.export_csv(BufWriter::new(File::create(path)?))?;
            info!(path = %path.display(), rows, "export written");
            rows
        }
        None => dashboard.export_csv(io::stdout().lock())?,
    };

    if args.output.is_some() {
        println!("Exported {rows} rows");
    }
    Ok(())
}

fn run_columns(args: ColumnsArgs) -> Result<(), AppError> {
    let columns = ColumnSet::employee_directory();
    if args.json {
        print_json(&columns)
    } else {
        render_columns(&columns);
        Ok(())
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), AppError> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value).map_err(io::Error::from)?;
    writeln!(stdout)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_table_flags() {
        let cli = Cli::try_parse_from([
            "dashboard",
            "table",
            "--search",
            "austin",
            "--sort",
            "salary:desc",
            "--filter",
            "department=Engineering",
            "--filter",
            "age=lt:40",
            "--page",
            "2",
        ])
        .expect("flags parse");

        let Some(Command::Table(args)) = cli.command else {
            panic!("expected table command");
        };
        assert_eq!(args.page, 2);
        assert_eq!(args.grid.filters.len(), 2);

        let query = args
            .grid
            .query(&ColumnSet::employee_directory())
            .expect("query builds");
        assert_eq!(query.search, "austin");
        assert_eq!(query.filters.len(), 2);
        assert_eq!(query.sort, Some(SortSpec::desc(EmployeeField::Salary)));
    }

    #[test]
    fn rejects_page_zero_like_the_http_api() {
        for flag in ["--page", "--page-size"] {
            let parsed = Cli::try_parse_from(["dashboard", "table", flag, "0"]);
            assert!(parsed.is_err(), "{flag} 0 accepted");
        }
        assert!(Cli::try_parse_from(["dashboard", "table", "--page", "3"]).is_ok());
    }

    #[test]
    fn rejects_filter_without_column() {
        let grid = GridArgs {
            filters: vec!["Engineering".to_string()],
            ..GridArgs::default()
        };
        assert!(grid.query(&ColumnSet::employee_directory()).is_err());
    }
}
