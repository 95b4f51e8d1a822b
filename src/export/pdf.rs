//! PDF export
//!
//! [`PdfRenderer`] runs the whole pipeline for one call: describe the schema,
//! build the grid, lay out and serialize the document.

use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::NaiveDateTime;
use std::io::Write;

use super::ByteExporter;
use crate::config::ReportOptions;
use crate::error::{ReportError, ReportResult};
use crate::models::{Reportable, Schema};
use crate::render::DocumentRenderer;
use crate::report::build_report;

/// Renders records of one type into PDF documents
pub struct PdfRenderer<T> {
    schema: Schema<T>,
    options: ReportOptions,
    timestamp: Option<NaiveDateTime>,
}

impl<T: Reportable> PdfRenderer<T> {
    /// Renderer for a [`Reportable`] record type
    pub fn new(options: ReportOptions) -> Self {
        Self::with_schema(T::schema(), options)
    }
}

impl<T> PdfRenderer<T> {
    /// Renderer for a schema built at runtime
    pub fn with_schema(schema: Schema<T>, options: ReportOptions) -> Self {
        Self {
            schema,
            options,
            timestamp: None,
        }
    }

    /// Print this time instead of the local clock at render time
    pub fn stamped_at(mut self, timestamp: NaiveDateTime) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn options(&self) -> &ReportOptions {
        &self.options
    }

    pub fn schema(&self) -> &Schema<T> {
        &self.schema
    }

    /// Render `records` into PDF bytes
    pub fn render(&self, records: &[T]) -> ReportResult<Vec<u8>> {
        let report = build_report(&self.schema, &self.options, records)?;
        let renderer = match self.timestamp {
            Some(at) => DocumentRenderer::at(at),
            None => DocumentRenderer::new(),
        };
        renderer.render(&report.grid, &report.title, &report.logo_path)
    }

    /// Render and write the finished document to `writer`
    ///
    /// Nothing is written if rendering fails.
    pub fn render_to_writer<W: Write>(&self, records: &[T], writer: &mut W) -> ReportResult<()> {
        let bytes = self.render(records)?;
        writer
            .write_all(&bytes)
            .and_then(|_| writer.flush())
            .map_err(|e| ReportError::Io(format!("Failed to write document: {}", e)))
    }
}

impl<T> ByteExporter<T> for PdfRenderer<T> {
    fn export_to_bytes(&self, records: &[T]) -> ReportResult<Vec<u8>> {
        self.render(records)
    }
}

/// Render a [`Reportable`] slice into PDF bytes
pub fn export_to_bytes<T: Reportable>(
    records: &[T],
    options: &ReportOptions,
) -> ReportResult<Vec<u8>> {
    PdfRenderer::<T>::new(options.clone()).render(records)
}

/// Render a [`Reportable`] slice into base64 PDF text
pub fn export_to_text<T: Reportable>(records: &[T], options: &ReportOptions) -> ReportResult<String> {
    export_to_bytes(records, options).map(|bytes| STANDARD.encode(bytes))
}
