//! CSV export
//!
//! Writes the same grid the PDF renderer draws: header labels, one line per
//! record, and the summary line when a summary field is set.

use std::io::Write;

use super::ByteExporter;
use crate::config::ReportOptions;
use crate::error::{ReportError, ReportResult};
use crate::models::{Grid, Reportable, Schema};
use crate::report::build_report;

/// Renders records of one type into CSV
pub struct CsvRenderer<T> {
    schema: Schema<T>,
    options: ReportOptions,
}

impl<T: Reportable> CsvRenderer<T> {
    pub fn new(options: ReportOptions) -> Self {
        Self::with_schema(T::schema(), options)
    }
}

impl<T> CsvRenderer<T> {
    pub fn with_schema(schema: Schema<T>, options: ReportOptions) -> Self {
        Self { schema, options }
    }

    /// Render `records` as CSV into `writer`
    pub fn render_to_writer<W: Write>(&self, records: &[T], writer: W) -> ReportResult<()> {
        let report = build_report(&self.schema, &self.options, records)?;
        write_grid(&report.grid, writer)
    }
}

impl<T> ByteExporter<T> for CsvRenderer<T> {
    fn export_to_bytes(&self, records: &[T]) -> ReportResult<Vec<u8>> {
        let mut output = Vec::new();
        self.render_to_writer(records, &mut output)?;
        Ok(output)
    }
}

fn write_grid<W: Write>(grid: &Grid, writer: W) -> ReportResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for row in grid.rows() {
        csv_writer
            .write_record(row.cells.iter().map(|c| c.text()))
            .map_err(|e| ReportError::Backend(format!("Failed to write CSV row: {}", e)))?;
    }

    csv_writer
        .flush()
        .map_err(|e| ReportError::Backend(format!("Failed to flush CSV: {}", e)))
}
