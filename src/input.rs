//! Loading untyped records from CSV and JSON
//!
//! The command-line tool has no Rust types for its input, so each file is
//! turned into a runtime [`Schema`] over [`DynamicRecord`]s. Column kinds are
//! inferred from every value in the column.

use chrono::NaiveDate;
use serde_json::Value;
use std::io::Read;
use std::path::Path;
use tracing::debug;

use crate::error::{ReportError, ReportResult};
use crate::models::{Decimal, FieldKind, FieldValue, Schema};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// One loaded row, cells in column order
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicRecord {
    values: Vec<FieldValue>,
}

impl DynamicRecord {
    pub fn new(values: Vec<FieldValue>) -> Self {
        Self { values }
    }

    /// Cell at `index`, `Null` past the end
    pub fn get(&self, index: usize) -> FieldValue {
        self.values.get(index).cloned().unwrap_or(FieldValue::Null)
    }

    pub fn values(&self) -> &[FieldValue] {
        &self.values
    }
}

/// A loaded file: its inferred schema and its rows
pub type Dataset = (Schema<DynamicRecord>, Vec<DynamicRecord>);

/// A cell before its column kind is known
#[derive(Debug, Clone)]
enum RawValue {
    Missing,
    Scalar(String),
    Nested(FieldKind, String),
}

/// Load a `.csv` or `.json` file, chosen by extension
pub fn load_file(path: impl AsRef<Path>) -> ReportResult<Dataset> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    let file = std::fs::File::open(path)
        .map_err(|e| ReportError::Input(format!("Failed to open {}: {}", path.display(), e)))?;

    match extension.as_deref() {
        Some("csv") => load_csv(file),
        Some("json") => load_json(file),
        _ => Err(ReportError::Input(format!(
            "Unsupported input file '{}'. Use .csv or .json",
            path.display()
        ))),
    }
}

/// Load rows from CSV with a header line
pub fn load_csv<R: Read>(reader: R) -> ReportResult<Dataset> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let names: Vec<String> = csv_reader.headers()?.iter().map(String::from).collect();

    let mut rows = Vec::new();
    for result in csv_reader.records() {
        let record = result?;
        let row = (0..names.len())
            .map(|i| match record.get(i) {
                Some(text) if !text.is_empty() => RawValue::Scalar(text.to_string()),
                _ => RawValue::Missing,
            })
            .collect();
        rows.push(row);
    }

    Ok(assemble(names, rows))
}

/// Load rows from a JSON array of flat objects
pub fn load_json<R: Read>(reader: R) -> ReportResult<Dataset> {
    let document: Value = serde_json::from_reader(reader)?;
    let Value::Array(items) = document else {
        return Err(ReportError::Input(
            "JSON input must be an array of objects".into(),
        ));
    };

    let mut names: Vec<String> = Vec::new();
    let mut objects = Vec::with_capacity(items.len());
    for (position, item) in items.into_iter().enumerate() {
        let Value::Object(object) = item else {
            return Err(ReportError::Input(format!(
                "JSON element {} is not an object",
                position
            )));
        };
        for key in object.keys() {
            if !names.iter().any(|n| n == key) {
                names.push(key.clone());
            }
        }
        objects.push(object);
    }

    let rows = objects
        .iter()
        .map(|object| {
            names
                .iter()
                .map(|name| match object.get(name) {
                    None | Some(Value::Null) => RawValue::Missing,
                    Some(Value::String(s)) if s.is_empty() => RawValue::Missing,
                    Some(Value::String(s)) => RawValue::Scalar(s.clone()),
                    Some(v @ Value::Object(_)) => RawValue::Nested(FieldKind::Object, v.to_string()),
                    Some(v @ Value::Array(_)) => {
                        RawValue::Nested(FieldKind::Collection, v.to_string())
                    }
                    Some(v) => RawValue::Scalar(v.to_string()),
                })
                .collect()
        })
        .collect();

    Ok(assemble(names, rows))
}

fn assemble(names: Vec<String>, rows: Vec<Vec<RawValue>>) -> Dataset {
    let kinds: Vec<FieldKind> = (0..names.len())
        .map(|i| infer_kind(rows.iter().map(|row| &row[i])))
        .collect();

    let mut schema = Schema::new();
    for (index, (name, kind)) in names.iter().zip(&kinds).enumerate() {
        schema.push(name.clone(), *kind, move |record: &DynamicRecord| {
            record.get(index)
        });
    }

    let records: Vec<DynamicRecord> = rows
        .into_iter()
        .map(|row| {
            DynamicRecord::new(
                row.into_iter()
                    .zip(&kinds)
                    .map(|(raw, kind)| convert(raw, *kind))
                    .collect(),
            )
        })
        .collect();

    debug!(columns = names.len(), rows = records.len(), "loaded input");
    (schema, records)
}

/// Narrowest kind every present value in a column fits
fn infer_kind<'a>(values: impl Iterator<Item = &'a RawValue>) -> FieldKind {
    let mut scalars = Vec::new();
    for value in values {
        match value {
            RawValue::Missing => {}
            RawValue::Nested(kind, _) => return *kind,
            RawValue::Scalar(text) => scalars.push(text.as_str()),
        }
    }

    if scalars.is_empty() {
        return FieldKind::Text;
    }

    let all = |check: fn(&str) -> bool| scalars.iter().all(|s| check(s));
    if all(|s| s.parse::<i64>().is_ok()) {
        FieldKind::Integer
    } else if all(|s| Decimal::parse(s).is_ok()) {
        FieldKind::Decimal
    } else if all(|s| parse_bool(s).is_some()) {
        FieldKind::Boolean
    } else if all(|s| NaiveDate::parse_from_str(s, DATE_FORMAT).is_ok()) {
        FieldKind::Date
    } else {
        FieldKind::Text
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    if s.eq_ignore_ascii_case("true") {
        Some(true)
    } else if s.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

fn convert(raw: RawValue, kind: FieldKind) -> FieldValue {
    let text = match raw {
        RawValue::Missing => return FieldValue::Null,
        RawValue::Nested(_, json) => return FieldValue::Text(json),
        RawValue::Scalar(text) => text,
    };

    let converted = match kind {
        FieldKind::Integer => text.parse::<i64>().ok().map(FieldValue::Integer),
        FieldKind::Decimal => Decimal::parse(&text).ok().map(FieldValue::Decimal),
        FieldKind::Boolean => parse_bool(&text).map(FieldValue::Boolean),
        FieldKind::Date => NaiveDate::parse_from_str(&text, DATE_FORMAT)
            .ok()
            .map(FieldValue::Date),
        _ => None,
    };
    converted.unwrap_or(FieldValue::Text(text))
}
