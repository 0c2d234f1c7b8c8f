//! Configuration structures for the career classifier trainer.
//!
//! Loaded from `config.toml`. Every section and field has a default, so a
//! file only needs to name what it changes.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

use crate::errors::{CareerError, Result};
use crate::expansion::{
    default_rules, ExpansionMap, PerturbationRule, SyntheticCatalog, SyntheticRole, INDUSTRY_ROWS_PER_LABEL,
};
use crate::forest::ForestParams;

/// Tree depth used when training on the industry catalog.
pub const INDUSTRY_MAX_DEPTH: usize = 20;

/// Main configuration structure loaded from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Survey data and split
    pub data: DataConfig,
    /// Label-space expansion
    pub expansion: ExpansionConfig,
    /// Random forest hyperparameters
    pub forest: ForestParams,
    /// Artifact output
    pub output: OutputConfig,
}

/// Data loading configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Path to the labeled survey CSV
    pub csv_path: String,
    /// Share of each label held out for evaluation
    pub test_fraction: f64,
}

impl Default for DataConfig {
    fn default() -> Self {
        DataConfig {
            csv_path: "data/mldata.csv".to_string(),
            test_fraction: 0.2,
        }
    }
}

/// Label-space expansion configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpansionConfig {
    /// Replaces the built-in related-role map when present
    pub map: Option<ExpansionMap>,
    /// Replaces the default perturbation rules when present
    pub rules: Option<Vec<PerturbationRule>>,
    /// Synthesize the built-in business, creative and emerging roles
    pub builtin_roles: bool,
    /// Extra roles to synthesize
    pub new_roles: Vec<SyntheticRole>,
    /// Inclusive range of rows per synthetic role
    pub rows_per_label: (usize, usize),
    /// Also synthesize the few hundred roles of the industry catalog
    pub industry_roles: bool,
    /// Inclusive range of rows per industry role
    pub industry_rows_per_label: (usize, usize),
}

impl Default for ExpansionConfig {
    fn default() -> Self {
        ExpansionConfig {
            map: None,
            rules: None,
            builtin_roles: true,
            new_roles: Vec::new(),
            rows_per_label: (10, 20),
            industry_roles: false,
            industry_rows_per_label: INDUSTRY_ROWS_PER_LABEL,
        }
    }
}

impl ExpansionConfig {
    pub fn expansion_map(&self) -> ExpansionMap {
        self.map.clone().unwrap_or_else(ExpansionMap::builtin)
    }

    pub fn perturbation_rules(&self) -> Vec<PerturbationRule> {
        self.rules.clone().unwrap_or_else(default_rules)
    }

    /// Built-in roles, then configured roles, then industry roles. A label
    /// already in the catalog is not added twice.
    pub fn synthetic_catalog(&self) -> SyntheticCatalog {
        let mut catalog = if self.builtin_roles {
            SyntheticCatalog::builtin()
        } else {
            SyntheticCatalog::empty()
        };
        catalog.extend_unique(self.new_roles.iter().cloned());
        if self.industry_roles {
            catalog.extend_unique(SyntheticCatalog::industry(self.industry_rows_per_label).roles);
        }
        catalog.rows_per_label = self.rows_per_label;
        catalog
    }
}

/// Output paths configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory holding the `enhanced/` and `basic/` artifact sets
    pub model_dir: String,
    /// Where to write the expanded dataset, if anywhere
    pub expanded_csv: Option<String>,
    /// Number of feature importances kept in the training report
    pub top_importances: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            model_dir: "models".to_string(),
            expanded_csv: None,
            top_importances: 10,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path`, falling back to defaults when the file is missing or
    /// unreadable.
    pub fn load_or_default(path: &str) -> Self {
        if !Path::new(path).exists() {
            info!(path, "no config file, using defaults");
            return Config::default();
        }
        match Config::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(path, error = %e, "could not load config, using defaults");
                Config::default()
            }
        }
    }

    /// Switch on the industry catalog and deepen the trees to match.
    pub fn use_industry_catalog(&mut self) {
        self.expansion.industry_roles = true;
        self.forest.max_depth = Some(INDUSTRY_MAX_DEPTH);
    }

    pub fn validate(&self) -> Result<()> {
        let fraction = self.data.test_fraction;
        if !(fraction > 0.0 && fraction < 1.0) {
            return Err(CareerError::Configuration(format!(
                "test_fraction must be in (0, 1), got {}",
                fraction
            )));
        }
        self.forest.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [data]
            csv_path = "survey.csv"

            [forest]
            n_trees = 10
            "#,
        )
        .unwrap();
        assert_eq!(config.data.csv_path, "survey.csv");
        assert_eq!(config.data.test_fraction, 0.2);
        assert_eq!(config.forest.n_trees, 10);
        assert_eq!(config.forest.min_samples_leaf, 2);
        assert_eq!(config.output.model_dir, "models");
    }

    #[test]
    fn test_inline_expansion_and_roles() {
        let config: Config = toml::from_str(
            r#"
            [expansion]
            builtin_roles = false
            rows_per_label = [3, 4]

            [expansion.map]
            "Software Developer" = ["DevOps Engineer"]

            [[expansion.new_roles]]
            label = "Quantum Engineer"
            family = "emerging"
            "#,
        )
        .unwrap();

        let map = config.expansion.expansion_map();
        assert_eq!(map.related("Software Developer"), &["DevOps Engineer".to_string()]);
        let catalog = config.expansion.synthetic_catalog();
        assert_eq!(catalog.roles.len(), 1);
        assert_eq!(catalog.rows_per_label, (3, 4));
    }

    #[test]
    fn test_shipped_config_parses() {
        let config: Config = toml::from_str(include_str!("../../config.toml")).unwrap();
        config.validate().unwrap();
        assert_eq!(config.forest, ForestParams::default());

        let catalog = config.expansion.synthetic_catalog();
        catalog.validate(&crate::Questionnaire::standard()).unwrap();
        assert!(catalog.roles.iter().any(|r| r.label == "Robotics Engineer"));
        assert!(catalog.roles.len() > SyntheticCatalog::builtin().roles.len());
    }

    #[test]
    fn test_bad_fraction_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[data]\ntest_fraction = 1.5\n").unwrap();
        let err = Config::load(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, CareerError::Configuration(_)));

        // falls back instead of failing
        let config = Config::load_or_default(path.to_str().unwrap());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(matches!(Config::load(path.to_str().unwrap()), Err(CareerError::Io(_))));
        assert_eq!(Config::load_or_default(path.to_str().unwrap()), Config::default());
    }

    #[test]
    fn test_industry_catalog_option() {
        let config: Config = toml::from_str(
            r#"
            [expansion]
            builtin_roles = false
            industry_roles = true
            industry_rows_per_label = [60, 80]

            [[expansion.new_roles]]
            label = "Penetration Tester"
            family = "custom"
            "#,
        )
        .unwrap();
        let catalog = config.expansion.synthetic_catalog();
        let testers: Vec<_> = catalog.roles.iter().filter(|r| r.label == "Penetration Tester").collect();
        assert_eq!(testers.len(), 1);
        assert_eq!(testers[0].family, crate::expansion::RoleFamily::Custom);
        assert_eq!(catalog.rows_per_label, (10, 20));
        assert!(catalog
            .roles
            .iter()
            .filter(|r| r.label != "Penetration Tester")
            .all(|r| r.rows == Some((60, 80))));

        let mut preset = Config::default();
        preset.use_industry_catalog();
        assert!(preset.expansion.industry_roles);
        assert_eq!(preset.forest.max_depth, Some(INDUSTRY_MAX_DEPTH));
        preset.validate().unwrap();
    }
}
