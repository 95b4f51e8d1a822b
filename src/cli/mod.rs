//! CLI command handlers
//!
//! Bridges the clap argument structs with the report pipeline.

pub mod columns;
pub mod render;

pub use columns::{handle_columns_command, ColumnsArgs};
pub use render::{handle_render_command, OutputFormat, RenderArgs};
