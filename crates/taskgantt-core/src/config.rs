//! Optional TOML configuration
//!
//! Every key is optional. Values given on the command line take precedence
//! over the file, and the file over built-in defaults.
//!
//! ```toml
//! title = "Project Gantt Chart"
//! year = 2026
//! palette = ["#1F77B4", "#FF7F0E"]
//!
//! [columns]
//! resource = ["Resource", "Resources", "Owner"]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{ConfigError, Palette};

/// Run configuration loaded from a TOML file
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GanttConfig {
    /// Chart / workbook title
    pub title: Option<String>,
    /// Calendar year used for hover dates
    pub year: Option<i32>,
    /// Bar colors as `#RRGGBB`, overriding the renderer's palette
    pub palette: Option<Vec<String>>,
    /// Accepted header names per input column
    pub columns: ColumnAliases,
}

impl GanttConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// The configured palette, validated
    pub fn palette(&self) -> Result<Option<Palette>, ConfigError> {
        self.palette.as_deref().map(Palette::parse).transpose()
    }
}

/// Header names accepted for each logical column.
///
/// Matching trims whitespace and ignores ASCII case.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnAliases {
    pub task: Vec<String>,
    pub sub_category: Vec<String>,
    pub driver: Vec<String>,
    pub resource: Vec<String>,
    pub group: Vec<String>,
    pub data: Vec<String>,
    pub location: Vec<String>,
}

impl Default for ColumnAliases {
    fn default() -> Self {
        fn names(list: &[&str]) -> Vec<String> {
            list.iter().map(|s| (*s).to_string()).collect()
        }
        Self {
            task: names(&["Task"]),
            sub_category: names(&["Task 1", "Task1", "Sub Category"]),
            driver: names(&["Business Driver", "Driver"]),
            resource: names(&["Resource", "Resources"]),
            group: names(&["Group"]),
            data: names(&["Data"]),
            location: names(&["Location"]),
        }
    }
}

impl ColumnAliases {
    /// Whether `header` is one of `aliases`
    pub fn matches(aliases: &[String], header: &str) -> bool {
        let header = header.trim();
        aliases.iter().any(|alias| alias.trim().eq_ignore_ascii_case(header))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rgb;

    #[test]
    fn empty_file_is_all_defaults() {
        let config = GanttConfig::from_toml_str("").unwrap();
        assert_eq!(config, GanttConfig::default());
        assert!(config.palette().unwrap().is_none());
    }

    #[test]
    fn full_config() {
        let config = GanttConfig::from_toml_str(
            r##"
            title = "Roadmap 2026"
            year = 2026
            palette = ["#112233", "445566"]

            [columns]
            resource = ["Owner"]
            "##,
        )
        .unwrap();

        assert_eq!(config.title.as_deref(), Some("Roadmap 2026"));
        assert_eq!(config.year, Some(2026));
        let palette = config.palette().unwrap().unwrap();
        assert_eq!(palette.colors(), &[Rgb::new(0x112233), Rgb::new(0x445566)]);
        assert_eq!(config.columns.resource, vec!["Owner".to_string()]);
        // Unspecified column lists keep their defaults
        assert_eq!(config.columns.task, vec!["Task".to_string()]);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = GanttConfig::from_toml_str("colour = 'red'").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn invalid_palette_is_reported() {
        let config = GanttConfig::from_toml_str(r#"palette = ["nope"]"#).unwrap();
        assert!(matches!(config.palette(), Err(ConfigError::InvalidColor(_))));
    }

    #[test]
    fn alias_matching_ignores_case_and_padding() {
        let aliases = ColumnAliases::default();
        assert!(ColumnAliases::matches(&aliases.resource, " resources "));
        assert!(ColumnAliases::matches(&aliases.driver, "BUSINESS DRIVER"));
        assert!(!ColumnAliases::matches(&aliases.location, "Site"));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gantt.toml");
        std::fs::write(&path, "title = \"From disk\"\n").unwrap();

        let config = GanttConfig::load(&path).unwrap();
        assert_eq!(config.title.as_deref(), Some("From disk"));

        let missing = GanttConfig::load(&dir.path().join("missing.toml"));
        assert!(matches!(missing, Err(ConfigError::Io(_))));
    }
}
