use crate::columns::ColumnSet;
use crate::roster::Employee;
use std::io::Write;
use tracing::info;

/// Name offered for every CSV download.
pub const EXPORT_FILE_NAME: &str = "employees.csv";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write CSV export: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush CSV export: {0}")]
    Io(#[from] std::io::Error),
}

/// Writes a header row of column labels followed by one record per row, in the given
/// order. Returns the number of data rows written.
pub fn write_csv<W: Write>(
    writer: W,
    columns: &ColumnSet,
    rows: &[&Employee],
) -> Result<usize, ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(columns.headers())?;

    for employee in rows {
        csv_writer.write_record(columns.export_row(employee))?;
    }
    csv_writer.flush()?;

    info!(rows = rows.len(), file = EXPORT_FILE_NAME, "roster exported");
    Ok(rows.len())
}
