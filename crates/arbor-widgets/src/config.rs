#![forbid(unsafe_code)]

//! Tree-select configuration as data.
//!
//! [`TreeSelectConfig`] mirrors the builder surface of
//! [`TreeSelect`](crate::tree_select::TreeSelect) so a widget can be
//! described in a file and built at startup.
//!
//! # Loading
//!
//! ```toml
//! mode = "multi"
//! placeholder = "Pick categories"
//! show_apply_button = true
//!
//! [[options]]
//! id = "fruit"
//! label = "Fruit"
//!
//! [[options.children]]
//! id = "apple"
//! label = "Apple"
//! ```
//!
//! ```rust,ignore
//! let config = TreeSelectConfig::from_toml_file("categories.toml")?;
//! let select = TreeSelect::from_config(config);
//! ```
//!
//! # Defaults
//!
//! Every field defaults to what [`TreeSelect::new`] uses, so a partial file
//! only overrides the keys it names.
//!
//! [`TreeSelect::new`]: crate::tree_select::TreeSelect::new

#[cfg(feature = "config")]
use std::path::Path;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use crate::selection::{SelectionMode, SelectionValue};
use crate::tree_index::HierarchicalOption;
use crate::tree_select::{TreeSelect, TriggerSize};
use ahash::AHashSet;

/// Declarative description of a tree-select.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct TreeSelectConfig {
    /// Selection cardinality.
    pub mode: SelectionMode,
    /// Show the search field and filter on it.
    pub searchable: bool,
    /// Suppress opening.
    pub disabled: bool,
    /// Trigger size preset.
    pub size: TriggerSize,
    /// Field label.
    pub label: Option<String>,
    /// Trigger text while nothing is selected.
    pub placeholder: String,
    /// Search field text while the query is empty.
    pub search_placeholder: String,
    /// Show the "Apply" footer action in multi mode.
    pub show_apply_button: bool,
    /// Message shown when nothing matches the query.
    pub empty_message: String,
    /// Tree rows shown at once.
    pub max_visible_rows: usize,
    /// Initial uncontrolled selection. Single mode keeps the first id.
    pub default_value: Vec<String>,
    /// Initially expanded node ids.
    pub expanded: Vec<String>,
    /// The option forest.
    pub options: Vec<HierarchicalOption>,
}

impl Default for TreeSelectConfig {
    fn default() -> Self {
        Self {
            mode: SelectionMode::Single,
            searchable: true,
            disabled: false,
            size: TriggerSize::Md,
            label: None,
            placeholder: "Select...".to_owned(),
            search_placeholder: "Search...".to_owned(),
            show_apply_button: false,
            empty_message: "No results found".to_owned(),
            max_visible_rows: 8,
            default_value: Vec::new(),
            expanded: Vec::new(),
            options: Vec::new(),
        }
    }
}

impl TreeSelectConfig {
    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(ConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(ConfigError::Json)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Check the configuration for problems.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid. Duplicate ids are reported here even though the widget
    /// itself tolerates them (last definition wins).
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.max_visible_rows == 0 {
            errors.push("max_visible_rows must be > 0".into());
        }

        let mut seen: AHashSet<&str> = AHashSet::new();
        let mut reported: AHashSet<&str> = AHashSet::new();
        let mut stack: Vec<&HierarchicalOption> = self.options.iter().rev().collect();
        while let Some(option) = stack.pop() {
            if option.id.is_empty() {
                errors.push(format!("option labelled {:?} has an empty id", option.label));
            } else if !seen.insert(option.id.as_str()) && reported.insert(option.id.as_str()) {
                errors.push(format!("duplicate option id {:?}", option.id));
            }
            stack.extend(option.children.iter().rev());
        }

        errors
    }

    /// Like [`validate`](Self::validate), but as a `Result`.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

impl TreeSelect {
    /// Build an uncontrolled widget from a configuration.
    #[must_use]
    pub fn from_config(config: TreeSelectConfig) -> Self {
        let TreeSelectConfig {
            mode,
            searchable,
            disabled,
            size,
            label,
            placeholder,
            search_placeholder,
            show_apply_button,
            empty_message,
            max_visible_rows,
            default_value,
            expanded,
            options,
        } = config;

        let mut select = Self::new(options)
            .with_mode(mode)
            .with_default_value(SelectionValue::from(default_value))
            .with_expanded(expanded)
            .searchable(searchable)
            .disabled(disabled)
            .size(size)
            .placeholder(placeholder)
            .search_placeholder(search_placeholder)
            .show_apply_button(show_apply_button)
            .empty_message(empty_message)
            .max_visible_rows(max_visible_rows);
        if let Some(label) = label {
            select = select.label(label);
        }
        select
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors that can occur when loading a tree-select configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "config")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    fn forest() -> Vec<HierarchicalOption> {
        vec![
            HierarchicalOption::new("fruit", "Fruit")
                .child(HierarchicalOption::new("apple", "Apple"))
                .child(HierarchicalOption::new("pear", "Pear")),
            HierarchicalOption::new("veg", "Vegetables"),
        ]
    }

    #[test]
    fn default_validates_clean() {
        let errors = TreeSelectConfig::default().validate();
        assert!(errors.is_empty(), "default should validate: {errors:?}");
    }

    #[test]
    fn default_matches_widget_defaults() {
        let select = TreeSelect::from_config(TreeSelectConfig::default());
        assert_eq!(select.mode(), SelectionMode::Single);
        assert!(select.is_searchable());
        assert!(!select.is_disabled());
        assert_eq!(select.field_label(), None);
        assert!(select.index().is_empty());
    }

    #[test]
    fn validate_catches_zero_rows() {
        let config = TreeSelectConfig {
            max_visible_rows: 0,
            ..TreeSelectConfig::default()
        };
        let errors = config.validate();
        assert!(errors.iter().any(|e| e.contains("max_visible_rows")));
    }

    #[test]
    fn validate_reports_each_duplicate_once() {
        let mut options = forest();
        options.push(HierarchicalOption::new("apple", "Apple again"));
        options.push(HierarchicalOption::new("apple", "Apple thrice"));
        let config = TreeSelectConfig {
            options,
            ..TreeSelectConfig::default()
        };
        let errors = config.validate();
        assert_eq!(errors.len(), 1, "{errors:?}");
        assert!(errors[0].contains("\"apple\""));
    }

    #[test]
    fn validate_catches_empty_ids() {
        let config = TreeSelectConfig {
            options: vec![HierarchicalOption::new("a", "A").child(HierarchicalOption::new("", "Blank"))],
            ..TreeSelectConfig::default()
        };
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("Blank"));
    }

    #[test]
    fn validated_wraps_errors() {
        let config = TreeSelectConfig {
            max_visible_rows: 0,
            ..TreeSelectConfig::default()
        };
        let err = config.validated().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref e) if e.len() == 1));
        assert!(err.to_string().starts_with("validation errors:"));
        assert!(err.source().is_none());
    }

    #[test]
    fn from_config_applies_every_field() {
        let config = TreeSelectConfig {
            mode: SelectionMode::Multi,
            searchable: false,
            label: Some("Produce".into()),
            placeholder: "Pick".into(),
            show_apply_button: true,
            default_value: vec!["apple".into(), "veg".into()],
            expanded: vec!["fruit".into()],
            options: forest(),
            ..TreeSelectConfig::default()
        };
        let mut select = TreeSelect::from_config(config);
        assert_eq!(select.mode(), SelectionMode::Multi);
        assert!(!select.is_searchable());
        assert_eq!(select.field_label(), Some("Produce"));
        assert_eq!(select.value().ids(), ["apple", "veg"]);
        assert!(select.expansion().contains("fruit"));
        select.open();
        assert!(select.can_apply());
        assert_eq!(select.rendered_ids(), ["fruit", "apple", "pear", "veg"]);
    }

    #[test]
    fn single_mode_default_value_keeps_first_id() {
        let config = TreeSelectConfig {
            default_value: vec!["pear".into(), "veg".into()],
            options: forest(),
            ..TreeSelectConfig::default()
        };
        let select = TreeSelect::from_config(config);
        assert_eq!(select.value().single(), Some("pear"));
    }

    #[test]
    fn io_error_has_source() {
        let err = ConfigError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(err.to_string().contains("gone"));
        assert!(err.source().is_some());
    }

    #[cfg(feature = "config")]
    mod loading {
        use super::*;
        use std::io::Write as _;

        const TOML: &str = r#"
mode = "multi"
size = "lg"
show_apply_button = true

[[options]]
id = "fruit"
label = "Fruit"

[[options.children]]
id = "apple"
label = "Apple"

[[options]]
id = "veg"
label = "Vegetables"
"#;

        #[test]
        fn partial_toml_overrides_only_named_keys() {
            let config = TreeSelectConfig::from_toml_str(TOML).unwrap();
            assert_eq!(config.mode, SelectionMode::Multi);
            assert_eq!(config.size, TriggerSize::Lg);
            assert!(config.show_apply_button);
            assert_eq!(config.placeholder, "Select...");
            assert_eq!(config.max_visible_rows, 8);
            assert_eq!(config.options.len(), 2);
            assert_eq!(config.options[0].children[0].id, "apple");
            assert!(config.options[1].children.is_empty());
        }

        #[test]
        fn json_round_trips_through_serde() {
            let config = TreeSelectConfig {
                options: forest(),
                ..TreeSelectConfig::default()
            };
            let json = serde_json::to_string(&config).unwrap();
            let back = TreeSelectConfig::from_json_str(&json).unwrap();
            assert_eq!(back, config);
        }

        #[test]
        fn empty_json_object_is_default() {
            let config = TreeSelectConfig::from_json_str("{}").unwrap();
            assert_eq!(config, TreeSelectConfig::default());
        }

        #[test]
        fn bad_mode_is_a_toml_error() {
            let err = TreeSelectConfig::from_toml_str("mode = \"several\"").unwrap_err();
            assert!(matches!(err, ConfigError::Toml(_)));
            assert!(err.to_string().starts_with("TOML parse error"));
            assert!(err.source().is_some());
        }

        #[test]
        fn bad_json_is_a_json_error() {
            let err = TreeSelectConfig::from_json_str("{ mode: ").unwrap_err();
            assert!(matches!(err, ConfigError::Json(_)));
        }

        #[test]
        fn loads_from_files() {
            let mut toml_file = tempfile::NamedTempFile::new().unwrap();
            toml_file.write_all(TOML.as_bytes()).unwrap();
            let config = TreeSelectConfig::from_toml_file(toml_file.path()).unwrap();
            assert_eq!(config.options.len(), 2);

            let mut json_file = tempfile::NamedTempFile::new().unwrap();
            json_file
                .write_all(br#"{"searchable": false, "empty_message": "Nothing"}"#)
                .unwrap();
            let config = TreeSelectConfig::from_json_file(json_file.path()).unwrap();
            assert!(!config.searchable);
            assert_eq!(config.empty_message, "Nothing");
        }

        #[test]
        fn missing_file_is_io_error() {
            let dir = tempfile::tempdir().unwrap();
            let err = TreeSelectConfig::from_toml_file(dir.path().join("absent.toml")).unwrap_err();
            assert!(matches!(err, ConfigError::Io(_)));
        }
    }
}
