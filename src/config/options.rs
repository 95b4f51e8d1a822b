//! Report options
//!
//! Everything a render call needs besides the records themselves: document
//! title, logo, the optional summary field and per-field header labels.
//! Options can be built in code or loaded from a JSON or YAML file.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{ReportError, ReportResult};

/// Options for one report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportOptions {
    /// Title printed centered above the table
    #[serde(default)]
    pub title: String,

    /// Path to a PNG or JPG logo (empty = no logo)
    #[serde(default)]
    pub logo_path: String,

    /// Name of the field summed into the trailing total row
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary_field: Option<String>,

    /// Name shown in the total label; defaults to the summary column's header
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary_label: Option<String>,

    /// Field name to header label
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub header_overrides: BTreeMap<String, String>,

    /// Word placed before the summary name in the total label
    #[serde(default = "default_total_label_prefix")]
    pub total_label_prefix: String,
}

fn default_total_label_prefix() -> String {
    "Total".to_string()
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            title: String::new(),
            logo_path: String::new(),
            summary_field: None,
            summary_label: None,
            header_overrides: BTreeMap::new(),
            total_label_prefix: default_total_label_prefix(),
        }
    }
}

impl ReportOptions {
    /// Create default options with a title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_logo(mut self, path: impl Into<String>) -> Self {
        self.logo_path = path.into();
        self
    }

    /// Designate the summary field
    pub fn with_summary(mut self, field: impl Into<String>) -> Self {
        self.summary_field = Some(field.into());
        self
    }

    pub fn with_summary_label(mut self, label: impl Into<String>) -> Self {
        self.summary_label = Some(label.into());
        self
    }

    /// Override the header label of one field
    pub fn with_header(mut self, field: impl Into<String>, label: impl Into<String>) -> Self {
        self.header_overrides.insert(field.into(), label.into());
        self
    }

    /// Header label for a field, falling back to the field name
    pub fn header_for<'a>(&'a self, field: &'a str) -> &'a str {
        self.header_overrides
            .get(field)
            .map(String::as_str)
            .unwrap_or(field)
    }

    /// Load options from a `.json`, `.yaml` or `.yml` file
    pub fn load(path: impl AsRef<Path>) -> ReportResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ReportError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&contents).map_err(|e| {
                ReportError::Config(format!("Failed to parse {}: {}", path.display(), e))
            }),
            Some("json") => serde_json::from_str(&contents).map_err(|e| {
                ReportError::Config(format!("Failed to parse {}: {}", path.display(), e))
            }),
            _ => Err(ReportError::Config(format!(
                "Unsupported options file '{}' (expected .json, .yaml or .yml)",
                path.display()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_options() {
        let options = ReportOptions::default();
        assert!(options.title.is_empty());
        assert!(options.logo_path.is_empty());
        assert!(options.summary_field.is_none());
        assert_eq!(options.total_label_prefix, "Total");
    }

    #[test]
    fn test_header_for() {
        let options = ReportOptions::default().with_header("unit_price", "Unit Price");
        assert_eq!(options.header_for("unit_price"), "Unit Price");
        assert_eq!(options.header_for("quantity"), "quantity");
    }

    #[test]
    fn test_load_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("report.json");
        std::fs::write(
            &path,
            r#"{"title": "Sales", "summary_field": "amount", "header_overrides": {"amount": "Amount"}}"#,
        )
        .unwrap();

        let options = ReportOptions::load(&path).unwrap();
        assert_eq!(options.title, "Sales");
        assert_eq!(options.summary_field.as_deref(), Some("amount"));
        assert_eq!(options.header_for("amount"), "Amount");
        assert_eq!(options.total_label_prefix, "Total");
    }

    #[test]
    fn test_load_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("report.YML");
        std::fs::write(&path, "title: Inventory\nlogo_path: logo.png\n").unwrap();

        let options = ReportOptions::load(&path).unwrap();
        assert_eq!(options.title, "Inventory");
        assert_eq!(options.logo_path, "logo.png");
    }

    #[test]
    fn test_load_rejects_unknown_extension() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("report.toml");
        std::fs::write(&path, "title = 'x'").unwrap();

        let err = ReportOptions::load(&path).unwrap_err();
        assert!(matches!(err, ReportError::Config(_)));
    }

    #[test]
    fn test_serde_round_trip() {
        let options = ReportOptions::new("Q1").with_summary("total");
        let json = serde_json::to_string(&options).unwrap();
        let back: ReportOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(options, back);
    }
}
