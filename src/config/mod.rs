//! Configuration module for Reportity
//!
//! Report options: title, logo, summary field and header labels.

pub mod options;

pub use options::ReportOptions;
