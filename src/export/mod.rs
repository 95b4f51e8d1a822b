//! Export module for Reportity
//!
//! Output adapters over the shared report pipeline:
//! - PDF: the paginated table document
//! - CSV: the same grid as comma-separated text
//!
//! Every exporter produces bytes; the text form of any exporter is the
//! base64 encoding of those same bytes.

pub mod csv;
pub mod pdf;

pub use self::csv::CsvRenderer;
pub use self::pdf::{export_to_bytes, export_to_text, PdfRenderer};

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::error::ReportResult;

/// Renders records into a finished byte stream
pub trait ByteExporter<T> {
    fn export_to_bytes(&self, records: &[T]) -> ReportResult<Vec<u8>>;
}

/// Renders records into text suitable for JSON or XML payloads
pub trait StringExporter<T> {
    fn export_to_text(&self, records: &[T]) -> ReportResult<String>;
}

impl<T, E> StringExporter<T> for E
where
    E: ByteExporter<T>,
{
    fn export_to_text(&self, records: &[T]) -> ReportResult<String> {
        self.export_to_bytes(records).map(|bytes| STANDARD.encode(bytes))
    }
}
