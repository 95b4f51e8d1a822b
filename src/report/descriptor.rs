//! Report descriptor
//!
//! Built fresh for every render call from a record schema and the report
//! options. Holds the exportable columns with their header labels, the
//! running summary total, and the document metadata. It is mutated while the
//! records are walked and dropped once the grid exists.

use tracing::debug;

use super::type_filter::is_exportable;
use crate::config::ReportOptions;
use crate::error::{ReportError, ReportResult};
use crate::models::{Decimal, FieldDef, FieldValue, Schema};

/// One exportable column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Index of the field in the schema
    pub field_index: usize,
    /// Field name as declared
    pub name: String,
    /// Header label shown in the table
    pub label: String,
}

#[derive(Debug, Clone)]
struct SummaryState {
    /// Position of the summary field among the columns
    column: usize,
    name: String,
    total: Decimal,
}

/// Per-render description of a record type
pub struct ReportDescriptor<'s, T> {
    schema: &'s Schema<T>,
    columns: Vec<Column>,
    summary: Option<SummaryState>,
    total_label_prefix: String,
    title: String,
    logo_path: String,
}

impl<'s, T> ReportDescriptor<'s, T> {
    /// Describe a schema under the given options
    ///
    /// Fails with [`ReportError::Schema`] when no field is exportable, and
    /// with [`ReportError::Config`] when the summary field is not one of the
    /// exportable fields.
    pub fn new(schema: &'s Schema<T>, options: &ReportOptions) -> ReportResult<Self> {
        let columns = describe_headers(schema, options);

        if columns.is_empty() {
            return Err(ReportError::Schema(format!(
                "record type has no exportable fields ({} declared)",
                schema.len()
            )));
        }

        let summary = match &options.summary_field {
            Some(field) => {
                let column = columns.iter().position(|c| &c.name == field).ok_or_else(|| {
                    ReportError::Config(format!(
                        "summary field '{}' is not an exportable field",
                        field
                    ))
                })?;
                let name = options
                    .summary_label
                    .clone()
                    .unwrap_or_else(|| columns[column].label.clone());
                Some(SummaryState {
                    column,
                    name,
                    total: Decimal::zero(),
                })
            }
            None => None,
        };

        debug!(
            columns = columns.len(),
            declared = schema.len(),
            summary = options.summary_field.as_deref().unwrap_or("-"),
            "described record schema"
        );

        Ok(Self {
            schema,
            columns,
            summary,
            total_label_prefix: options.total_label_prefix.clone(),
            title: options.title.clone(),
            logo_path: options.logo_path.clone(),
        })
    }

    /// Exportable columns in declaration order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Header labels in column order
    pub fn headers(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.label.clone()).collect()
    }

    /// Schema field behind a column
    pub fn field(&self, column: usize) -> &FieldDef<T> {
        &self.schema.fields()[self.columns[column].field_index]
    }

    /// Read every exportable field of a record, in column order
    pub fn read_row(&self, record: &T) -> Vec<FieldValue> {
        self.columns
            .iter()
            .map(|c| self.schema.fields()[c.field_index].read(record))
            .collect()
    }

    /// Feed one column's value into the summary
    ///
    /// Adds the value to the running total when `column` is the summary
    /// column; null or non-numeric values count as zero. No-op otherwise.
    pub fn accumulate(&mut self, column: usize, value: &FieldValue) {
        if let Some(summary) = self.summary.as_mut() {
            if summary.column == column {
                summary.total += value.as_decimal().unwrap_or_default();
            }
        }
    }

    /// The total label and accumulated total, if a summary field is set
    pub fn finalize_summary(&self) -> Option<(String, Decimal)> {
        self.summary.as_ref().map(|s| {
            (
                format!("{} {}", self.total_label_prefix, s.name),
                s.total,
            )
        })
    }

    pub fn has_summary(&self) -> bool {
        self.summary.is_some()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn logo_path(&self) -> &str {
        &self.logo_path
    }
}

/// Exportable columns of a schema with their header labels
pub fn describe_headers<T>(schema: &Schema<T>, options: &ReportOptions) -> Vec<Column> {
    schema
        .fields()
        .iter()
        .enumerate()
        .filter(|(_, f)| is_exportable(f.kind()))
        .map(|(i, f)| Column {
            field_index: i,
            name: f.name().to_string(),
            label: options.header_for(f.name()).to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FieldKind;

    struct Line {
        sku: &'static str,
        amount: FieldValue,
        tags: Vec<&'static str>,
    }

    fn schema() -> Schema<Line> {
        Schema::new()
            .field("sku", FieldKind::Text, |l: &Line| l.sku.into())
            .field("tags", FieldKind::Collection, |l: &Line| {
                l.tags.join(",").into()
            })
            .field("amount", FieldKind::Decimal, |l: &Line| l.amount.clone())
    }

    fn line(sku: &'static str, amount: FieldValue) -> Line {
        Line {
            sku,
            amount,
            tags: vec!["a"],
        }
    }

    #[test]
    fn test_headers_skip_composites() {
        let schema = schema();
        let options = ReportOptions::default().with_header("amount", "Amount");
        let descriptor = ReportDescriptor::new(&schema, &options).unwrap();

        assert_eq!(descriptor.headers(), vec!["sku", "Amount"]);
        assert_eq!(descriptor.columns()[1].field_index, 2);
        assert_eq!(descriptor.field(1).name(), "amount");
    }

    #[test]
    fn test_read_row_follows_columns() {
        let schema = schema();
        let descriptor = ReportDescriptor::new(&schema, &ReportOptions::default()).unwrap();

        let values = descriptor.read_row(&line("A-1", FieldValue::from(3)));
        assert_eq!(values, vec![FieldValue::from("A-1"), FieldValue::from(3)]);
    }

    #[test]
    fn test_summary_accumulates_only_its_column() {
        let schema = schema();
        let options = ReportOptions::default()
            .with_summary("amount")
            .with_header("amount", "Amount");
        let mut descriptor = ReportDescriptor::new(&schema, &options).unwrap();

        let records = [
            line("A", FieldValue::from(2.5)),
            line("B", FieldValue::Null),
            line("C", FieldValue::from("not a number")),
            line("D", FieldValue::from(10)),
        ];
        for record in &records {
            for (column, value) in descriptor.read_row(record).iter().enumerate() {
                descriptor.accumulate(column, value);
            }
        }
        descriptor.accumulate(0, &FieldValue::from(1000));

        let (label, total) = descriptor.finalize_summary().unwrap();
        assert_eq!(label, "Total Amount");
        assert_eq!(total.to_string(), "12.5");
    }

    #[test]
    fn test_summary_label_override() {
        let schema = schema();
        let options = ReportOptions::default()
            .with_summary("amount")
            .with_summary_label("Revenue");
        let descriptor = ReportDescriptor::new(&schema, &options).unwrap();

        let (label, total) = descriptor.finalize_summary().unwrap();
        assert_eq!(label, "Total Revenue");
        assert!(total.is_zero());
    }

    #[test]
    fn test_no_summary_is_absent() {
        let schema = schema();
        let descriptor = ReportDescriptor::new(&schema, &ReportOptions::default()).unwrap();
        assert!(descriptor.finalize_summary().is_none());
        assert!(!descriptor.has_summary());
    }

    #[test]
    fn test_unknown_summary_field_is_rejected() {
        let schema = schema();
        let options = ReportOptions::default().with_summary("tags");
        let err = ReportDescriptor::new(&schema, &options).err().unwrap();
        assert!(matches!(err, ReportError::Config(_)));
    }

    #[test]
    fn test_zero_exportable_fields_is_schema_error() {
        let schema: Schema<Line> =
            Schema::new().field("tags", FieldKind::Collection, |_: &Line| FieldValue::Null);
        let err = ReportDescriptor::new(&schema, &ReportOptions::default())
            .err()
            .unwrap();
        assert!(err.is_schema());
    }
}
