//! Record schemas
//!
//! A record type describes its fields once through [`Reportable::schema`]:
//! a name, a declared [`FieldKind`], and an accessor that reads a
//! [`FieldValue`] out of a record. The rest of the pipeline only ever sees
//! this description, never the record type itself.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use std::fmt;

use super::decimal::Decimal;

/// Declared type of a record field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Text,
    Integer,
    Decimal,
    Boolean,
    Date,
    DateTime,
    Enum,
    /// A nested record or other composite value
    Object,
    /// A list, map or set
    Collection,
    /// Raw bytes
    Binary,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::Text => "text",
            FieldKind::Integer => "integer",
            FieldKind::Decimal => "decimal",
            FieldKind::Boolean => "boolean",
            FieldKind::Date => "date",
            FieldKind::DateTime => "datetime",
            FieldKind::Enum => "enum",
            FieldKind::Object => "object",
            FieldKind::Collection => "collection",
            FieldKind::Binary => "binary",
        };
        write!(f, "{}", name)
    }
}

/// A single value read from a record
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Text(String),
    Integer(i64),
    Decimal(Decimal),
    Boolean(bool),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Enum(String),
    /// The accessor could not read the value
    Unreadable,
}

impl FieldValue {
    /// Build an enum value from anything displayable (usually a unit variant)
    pub fn variant(value: impl fmt::Display) -> Self {
        Self::Enum(value.to_string())
    }

    /// Check if the value is null or unreadable
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Null | Self::Unreadable)
    }

    /// The value's natural display text
    pub fn display_text(&self) -> String {
        match self {
            FieldValue::Null | FieldValue::Unreadable => String::new(),
            FieldValue::Text(s) | FieldValue::Enum(s) => s.clone(),
            FieldValue::Integer(n) => n.to_string(),
            FieldValue::Decimal(d) => d.to_string(),
            FieldValue::Boolean(b) => b.to_string(),
            FieldValue::Date(d) => d.format("%Y-%m-%d").to_string(),
            FieldValue::DateTime(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }

    /// Numeric reading of the value, if it has one
    ///
    /// Text is parsed as a decimal; booleans, dates and enums have no
    /// numeric reading.
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            FieldValue::Integer(n) => Some(Decimal::from(*n)),
            FieldValue::Decimal(d) => Some(*d),
            FieldValue::Text(s) => Decimal::parse(s).ok(),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_text())
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for FieldValue {
                fn from(value: $ty) -> Self {
                    FieldValue::Integer(i64::from(value))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(n) => FieldValue::Integer(n),
            Err(_) => FieldValue::Decimal(Decimal::new(i128::from(value), 0)),
        }
    }
}

impl From<usize> for FieldValue {
    fn from(value: usize) -> Self {
        FieldValue::from(value as u64)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        if !value.is_finite() {
            return FieldValue::Null;
        }
        // Out-of-range magnitudes keep their natural text form
        Decimal::from_f64(value)
            .map_or_else(|| FieldValue::Text(value.to_string()), FieldValue::Decimal)
    }
}

impl From<f32> for FieldValue {
    fn from(value: f32) -> Self {
        // Through the f32's own shortest representation, not the widened f64's
        if !value.is_finite() {
            return FieldValue::Null;
        }
        let text = value.to_string();
        match Decimal::parse(&text) {
            Ok(d) => FieldValue::Decimal(d),
            Err(_) => FieldValue::Text(text),
        }
    }
}

impl From<Decimal> for FieldValue {
    fn from(value: Decimal) -> Self {
        FieldValue::Decimal(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<&String> for FieldValue {
    fn from(value: &String) -> Self {
        FieldValue::Text(value.clone())
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        FieldValue::Date(value)
    }
}

impl From<NaiveDateTime> for FieldValue {
    fn from(value: NaiveDateTime) -> Self {
        FieldValue::DateTime(value)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for FieldValue {
    fn from(value: DateTime<Tz>) -> Self {
        FieldValue::DateTime(value.naive_local())
    }
}

impl<V: Into<FieldValue>> From<Option<V>> for FieldValue {
    fn from(value: Option<V>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

/// Reads one field's value out of a record
pub type Accessor<T> = Box<dyn Fn(&T) -> FieldValue + Send + Sync>;

/// One declared field of a record type
pub struct FieldDef<T> {
    name: String,
    kind: FieldKind,
    accessor: Accessor<T>,
}

impl<T> FieldDef<T> {
    /// Field name as declared
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared kind
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Read this field from a record
    pub fn read(&self, record: &T) -> FieldValue {
        (self.accessor)(record)
    }
}

impl<T> fmt::Debug for FieldDef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDef")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// Ordered field list of a record type
///
/// ```
/// use reportity::models::{FieldKind, Schema};
///
/// struct Order {
///     id: u32,
///     customer: String,
/// }
///
/// let schema = Schema::new()
///     .field("Id", FieldKind::Integer, |o: &Order| o.id.into())
///     .field("Customer", FieldKind::Text, |o: &Order| o.customer.as_str().into());
/// assert_eq!(schema.len(), 2);
/// ```
pub struct Schema<T> {
    fields: Vec<FieldDef<T>>,
}

impl<T> Schema<T> {
    /// Create an empty schema
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Append a field; declaration order is column order
    pub fn field<F>(mut self, name: impl Into<String>, kind: FieldKind, accessor: F) -> Self
    where
        F: Fn(&T) -> FieldValue + Send + Sync + 'static,
    {
        self.push(name, kind, accessor);
        self
    }

    /// Append a field in place
    pub fn push<F>(&mut self, name: impl Into<String>, kind: FieldKind, accessor: F)
    where
        F: Fn(&T) -> FieldValue + Send + Sync + 'static,
    {
        self.fields.push(FieldDef {
            name: name.into(),
            kind,
            accessor: Box::new(accessor),
        });
    }

    /// All declared fields, in declaration order
    pub fn fields(&self) -> &[FieldDef<T>] {
        &self.fields
    }

    /// Look up a field by name
    pub fn get(&self, name: &str) -> Option<&FieldDef<T>> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<T> Default for Schema<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Schema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.fields).finish()
    }
}

/// A record type that can describe its own fields
pub trait Reportable: Sized {
    /// The record type's fields, in declaration order
    fn schema() -> Schema<Self>;
}
