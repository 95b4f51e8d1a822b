//! Reportity - tabular PDF reports from typed records
//!
//! Given a slice of records and a description of their fields, Reportity
//! renders a paginated table document: title, generation timestamp, optional
//! logo, a styled header repeated on every page, alternating row colors and an
//! optional total row for one numeric field.
//!
//! # Architecture
//!
//! - `models`: field schema, values, exact decimals and the styled cell grid
//! - `config`: report options (title, logo, summary field, header labels)
//! - `report`: descriptor construction and grid building
//! - `render`: page layout and the PDF backend
//! - `export`: byte and base64 exporters (PDF, CSV)
//! - `input`: untyped records loaded from CSV or JSON
//! - `cli`: command handlers for the `reportity` binary
//!
//! # Example
//!
//! ```rust
//! use reportity::config::ReportOptions;
//! use reportity::export::export_to_bytes;
//! use reportity::models::{FieldKind, Reportable, Schema};
//!
//! struct Order {
//!     customer: String,
//!     total: f64,
//! }
//!
//! impl Reportable for Order {
//!     fn schema() -> Schema<Self> {
//!         Schema::new()
//!             .field("customer", FieldKind::Text, |o: &Order| o.customer.as_str().into())
//!             .field("total", FieldKind::Decimal, |o: &Order| o.total.into())
//!     }
//! }
//!
//! let orders = vec![Order { customer: "Ada".into(), total: 12.5 }];
//! let options = ReportOptions::new("Orders").with_summary("total");
//! let pdf = export_to_bytes(&orders, &options).unwrap();
//! assert!(pdf.starts_with(b"%PDF-"));
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod input;
pub mod models;
pub mod render;
pub mod report;

pub use error::{ReportError, ReportResult};
