//! `reportity columns`: show how a data file maps to table columns

use clap::Args;
use std::path::PathBuf;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::config::ReportOptions;
use crate::error::ReportResult;
use crate::input::{load_file, DynamicRecord};
use crate::models::Schema;
use crate::report::{is_exportable, ReportDescriptor};

/// Arguments of the columns command
#[derive(Args, Debug, Clone)]
pub struct ColumnsArgs {
    /// Input data file (.csv or .json)
    pub input: PathBuf,

    /// Field to mark as the summary column
    #[arg(short, long)]
    pub summary: Option<String>,
}

/// One line of the columns table
#[derive(Debug, Clone, PartialEq, Eq, Tabled)]
pub struct ColumnRow {
    #[tabled(rename = "Field")]
    pub name: String,
    #[tabled(rename = "Header")]
    pub label: String,
    #[tabled(rename = "Kind")]
    pub kind: String,
    #[tabled(rename = "Exported")]
    pub exported: String,
    #[tabled(rename = "Summary")]
    pub summary: String,
}

/// One row per schema field, composite fields included
pub fn column_rows(
    schema: &Schema<DynamicRecord>,
    options: &ReportOptions,
) -> ReportResult<Vec<ColumnRow>> {
    // Fails on an unknown summary field or a schema with nothing to show
    ReportDescriptor::new(schema, options)?;

    Ok(schema
        .fields()
        .iter()
        .map(|field| {
            let exported = is_exportable(field.kind());
            let is_summary = options.summary_field.as_deref() == Some(field.name());
            ColumnRow {
                name: field.name().to_string(),
                label: if exported {
                    options.header_for(field.name()).to_string()
                } else {
                    String::new()
                },
                kind: field.kind().to_string(),
                exported: if exported { "yes" } else { "no" }.to_string(),
                summary: if is_summary { "yes" } else { "" }.to_string(),
            }
        })
        .collect())
}

/// Handle the columns command
pub fn handle_columns_command(args: ColumnsArgs) -> ReportResult<()> {
    let (schema, records) = load_file(&args.input)?;
    let mut options = ReportOptions::default();
    options.summary_field = args.summary;

    let rows = column_rows(&schema, &options)?;
    let mut table = Table::new(&rows);
    table.with(Style::rounded());

    println!("{}", table);
    println!("{} record(s)", records.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReportError;
    use crate::input::load_json;

    #[test]
    fn test_column_rows_mark_filtered_fields() {
        let data = r#"[{"name": "a", "qty": 2, "tags": ["x"]}]"#;
        let (schema, _) = load_json(data.as_bytes()).unwrap();
        let options = ReportOptions::default()
            .with_summary("qty")
            .with_header("qty", "Quantity");

        let rows = column_rows(&schema, &options).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].label, "Quantity");
        assert_eq!(rows[1].summary, "yes");
        assert_eq!(rows[2].exported, "no");
        assert_eq!(rows[2].kind, "collection");
    }

    #[test]
    fn test_unknown_summary_is_config_error() {
        let (schema, _) = load_json(r#"[{"name": "a"}]"#.as_bytes()).unwrap();
        let options = ReportOptions::default().with_summary("missing");
        assert!(matches!(
            column_rows(&schema, &options),
            Err(ReportError::Config(_))
        ));
    }
}
