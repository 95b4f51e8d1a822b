//! Report building
//!
//! Schema filtering, the per-call descriptor, and the table builder that
//! produces the styled grid.

pub mod descriptor;
pub mod table;
pub mod type_filter;

pub use descriptor::{describe_headers, Column, ReportDescriptor};
pub use table::{font_size_for, TableBuilder};
pub use type_filter::is_exportable;

use crate::config::ReportOptions;
use crate::error::ReportResult;
use crate::models::{Grid, Schema};

/// A built grid plus the document metadata it is rendered with
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub grid: Grid,
    pub title: String,
    pub logo_path: String,
}

/// Describe the schema and build the grid for `records`
pub fn build_report<T>(
    schema: &Schema<T>,
    options: &ReportOptions,
    records: &[T],
) -> ReportResult<Report> {
    let mut descriptor = ReportDescriptor::new(schema, options)?;
    let builder = TableBuilder::new(descriptor.column_count());
    let grid = builder.build(&mut descriptor, records);

    Ok(Report {
        grid,
        title: descriptor.title().to_string(),
        logo_path: descriptor.logo_path().to_string(),
    })
}
