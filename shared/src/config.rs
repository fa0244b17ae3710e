use serde::{Deserialize, Serialize};

use crate::facet::FacetId;

// ===== CONFIG TYPES =====

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ViewConfig {
    #[serde(default)]
    pub app: AppSection,
    #[serde(default)]
    pub view: ViewSection,
}

// AppSection carries the config format version so older files can be migrated
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AppSection {
    pub version: String,
}

impl AppSection {
    /// Current configuration format version
    pub const CURRENT_VERSION: &'static str = "1.0.0";

    pub fn is_supported_version(&self) -> bool {
        matches!(self.version.as_str(), "1.0.0")
    }

    pub fn needs_migration(&self) -> bool {
        self.version != Self::CURRENT_VERSION
    }

    pub fn migration_strategy(&self) -> MigrationStrategy {
        match self.version.as_str() {
            "1.0.0" => MigrationStrategy::None,
            _ => MigrationStrategy::Recreate,
        }
    }
}

impl Default for AppSection {
    fn default() -> Self {
        Self {
            version: Self::CURRENT_VERSION.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MigrationStrategy {
    None,     // Already current
    Recreate, // Unknown version, fall back to defaults
}

/// Which facets the shell shows, in tab order.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ViewSection {
    pub facets: Vec<FacetId>,
    pub active_facet: FacetId,
    #[serde(default = "default_true")]
    pub show_state_badge: bool,
}

impl Default for ViewSection {
    fn default() -> Self {
        Self {
            facets: FacetId::ALL.to_vec(),
            active_facet: FacetId::Statements,
            show_state_badge: true,
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse view config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("unsupported config version '{0}'")]
    UnsupportedVersion(String),
    #[error("view config lists no facets")]
    NoFacets,
    #[error("active facet '{0}' is not among the configured facets")]
    ActiveFacetMissing(FacetId),
}

impl ViewConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: ViewConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.app.migration_strategy() == MigrationStrategy::Recreate {
            return Err(ConfigError::UnsupportedVersion(self.app.version.clone()));
        }
        if self.view.facets.is_empty() {
            return Err(ConfigError::NoFacets);
        }
        if !self.view.facets.contains(&self.view.active_facet) {
            return Err(ConfigError::ActiveFacetMissing(self.view.active_facet));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = ViewConfig::from_toml_str(
            r#"
            [app]
            version = "1.0.0"

            [view]
            facets = ["exports.statements", "exports.assetcharts"]
            active_facet = "exports.assetcharts"
            show_state_badge = false
            "#,
        )
        .unwrap();

        assert_eq!(config.view.facets, vec![FacetId::Statements, FacetId::AssetCharts]);
        assert_eq!(config.view.active_facet, FacetId::AssetCharts);
        assert!(!config.view.show_state_badge);
        assert!(!config.app.needs_migration());
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = ViewConfig::from_toml_str("").unwrap();
        assert_eq!(config, ViewConfig::default());
        assert_eq!(config.view.facets.len(), FacetId::COUNT);
    }

    #[test]
    fn test_rejects_unknown_facet_key() {
        let result = ViewConfig::from_toml_str(
            r#"
            [view]
            facets = ["exports.nothing"]
            active_facet = "exports.nothing"
            "#,
        );
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_rejects_active_facet_outside_list() {
        let result = ViewConfig::from_toml_str(
            r#"
            [view]
            facets = ["exports.statements"]
            active_facet = "exports.transfers"
            "#,
        );
        assert!(matches!(
            result,
            Err(ConfigError::ActiveFacetMissing(FacetId::Transfers))
        ));
    }

    #[test]
    fn test_rejects_empty_facets_and_unknown_version() {
        let empty = ViewConfig::from_toml_str(
            r#"
            [view]
            facets = []
            active_facet = "exports.statements"
            "#,
        );
        assert!(matches!(empty, Err(ConfigError::NoFacets)));

        let old = ViewConfig::from_toml_str("[app]\nversion = \"0.9.0\"\n");
        assert!(matches!(old, Err(ConfigError::UnsupportedVersion(version)) if version == "0.9.0"));
    }

    #[test]
    fn test_toml_round_trip_keeps_facet_keys() {
        let text = ViewConfig::default().to_toml_string().unwrap();
        assert!(text.contains("exports.openapprovals"));
        assert_eq!(ViewConfig::from_toml_str(&text).unwrap(), ViewConfig::default());
    }
}
