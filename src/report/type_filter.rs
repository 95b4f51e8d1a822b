//! Decides which field kinds become table columns

use crate::models::FieldKind;

/// Check whether fields of this kind are rendered as columns
///
/// Only printable scalars qualify. Composite kinds are skipped silently.
pub fn is_exportable(kind: FieldKind) -> bool {
    match kind {
        FieldKind::Text
        | FieldKind::Integer
        | FieldKind::Decimal
        | FieldKind::Boolean
        | FieldKind::Date
        | FieldKind::DateTime
        | FieldKind::Enum => true,
        FieldKind::Object | FieldKind::Collection | FieldKind::Binary => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalars_are_exportable() {
        for kind in [
            FieldKind::Text,
            FieldKind::Integer,
            FieldKind::Decimal,
            FieldKind::Boolean,
            FieldKind::Date,
            FieldKind::DateTime,
            FieldKind::Enum,
        ] {
            assert!(is_exportable(kind), "{} should be exportable", kind);
        }
    }

    #[test]
    fn test_composites_are_skipped() {
        assert!(!is_exportable(FieldKind::Object));
        assert!(!is_exportable(FieldKind::Collection));
        assert!(!is_exportable(FieldKind::Binary));
    }
}
