//! Core data models for Reportity
//!
//! Record schemas, the exact decimal used for totals, and the styled cell
//! grid that sits between the table builder and the document backend.

pub mod cell;
pub mod decimal;
pub mod field;

pub use cell::{Alignment, Cell, CellHeight, FontStyle, Grid, Rgb, Row, RowKind};
pub use decimal::{Decimal, DecimalParseError};
pub use field::{Accessor, FieldDef, FieldKind, FieldValue, Reportable, Schema};
