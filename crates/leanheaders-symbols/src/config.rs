//! Configuration for analysis, resolution and auditing

use leanheaders_ast::Severity;
use leanheaders_parser::ParseOptions;
use serde::{Deserialize, Serialize};

/// Resolution behavior
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveOptions {
    /// Treat a reference nothing in the set supplies as unsatisfied
    /// instead of as an external (system or framework) symbol
    pub strict_references: bool,
}

/// How each audit finding is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditSeverities {
    pub missing_import: Severity,
    pub missing_forward: Severity,
    pub redundant_import: Severity,
    pub redundant_forward: Severity,
}

impl Default for AuditSeverities {
    fn default() -> Self {
        Self {
            missing_import: Severity::Error,
            missing_forward: Severity::Error,
            redundant_import: Severity::Error,
            redundant_forward: Severity::Error,
        }
    }
}

/// Complete configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub parse: ParseOptions,
    pub resolve: ResolveOptions,
    pub audit: AuditSeverities,
}

impl Config {
    /// Parse a JSON configuration; absent fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        let config = Config::from_json("{}").expect("config");
        assert_eq!(config, Config::default());
        assert!(!config.resolve.strict_references);
        assert_eq!(config.audit.redundant_import, Severity::Error);
    }

    #[test]
    fn test_partial_config() {
        let config = Config::from_json(
            r#"{ "resolve": { "strict_references": true }, "audit": { "redundant_forward": "warn" } }"#,
        )
        .expect("config");
        assert!(config.resolve.strict_references);
        assert_eq!(config.audit.redundant_forward, Severity::Warning);
        assert_eq!(config.audit.missing_import, Severity::Error);
    }
}
