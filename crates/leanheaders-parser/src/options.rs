//! Parser configuration

use leanheaders_ast::{LintKind, Severity};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Only accept `#pragma ca.brach.LeanHeaders`, not the short namespace
    pub unique_pragma: bool,
    pub lints: LintSeverities,
}

/// Severity assigned to each lint; `ignored` turns a lint off
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LintSeverities {
    pub root_class: Severity,
    pub root_protocol: Severity,
    pub plain_enum: Severity,
    pub typedef_enum: Severity,
    pub enum_name: Severity,
    pub typedef_struct: Severity,
    pub struct_name: Severity,
    pub include_directive: Severity,
    /// Grammar and pragma dialect mismatches
    pub parsing: Severity,
}

impl Default for LintSeverities {
    fn default() -> Self {
        Self {
            root_class: Severity::Error,
            root_protocol: Severity::Error,
            plain_enum: Severity::Warning,
            typedef_enum: Severity::Ignored,
            enum_name: Severity::Error,
            typedef_struct: Severity::Ignored,
            struct_name: Severity::Error,
            include_directive: Severity::Warning,
            parsing: Severity::Warning,
        }
    }
}

impl LintSeverities {
    pub fn severity(&self, kind: LintKind) -> Severity {
        match kind {
            LintKind::RootClass => self.root_class,
            LintKind::RootProtocol => self.root_protocol,
            LintKind::PlainEnum => self.plain_enum,
            LintKind::TypedefEnum => self.typedef_enum,
            LintKind::EnumName => self.enum_name,
            LintKind::TypedefStruct => self.typedef_struct,
            LintKind::StructName => self.struct_name,
            LintKind::IncludeDirective => self.include_directive,
        }
    }

    /// Every lint at the same severity
    pub fn all(severity: Severity) -> Self {
        Self {
            root_class: severity,
            root_protocol: severity,
            plain_enum: severity,
            typedef_enum: severity,
            enum_name: severity,
            typedef_struct: severity,
            struct_name: severity,
            include_directive: severity,
            parsing: severity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let options: ParseOptions =
            serde_json::from_str(r#"{ "lints": { "plain_enum": "e", "root_class": "ignore" } }"#)
                .expect("valid options");
        assert!(!options.unique_pragma);
        assert_eq!(options.lints.plain_enum, Severity::Error);
        assert_eq!(options.lints.root_class, Severity::Ignored);
        assert_eq!(options.lints.enum_name, Severity::Error);
    }

    #[test]
    fn test_severity_aliases() {
        for (text, expected) in [
            ("\"warn\"", Severity::Warning),
            ("\"w\"", Severity::Warning),
            ("\"n\"", Severity::Note),
            ("\"x\"", Severity::Ignored),
            ("\"error\"", Severity::Error),
        ] {
            let severity: Severity = serde_json::from_str(text).expect("valid severity");
            assert_eq!(severity, expected, "{}", text);
        }
    }
}
