//! shade_options: Options for the no-shadow analysis.
//!
//! Parses the rule's JSON options object and provides [`NoShadowOptions`]
//! with the documented defaults for every omitted field.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Which declarations count as visible before their textual position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HoistMode {
    /// An inner declaration that textually precedes the outer one is not a shadow.
    All,
    #[default]
    #[serde(alias = "functionsOnly")]
    Functions,
    Never,
}

impl std::str::FromStr for HoistMode {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(HoistMode::All),
            "functions" | "functionsOnly" => Ok(HoistMode::Functions),
            "never" => Ok(HoistMode::Never),
            other => Err(OptionsError::UnknownHoistMode(other.to_string())),
        }
    }
}

/// Options of the no-shadow analysis, matching the rule's options object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct NoShadowOptions {
    /// Names never reported as shadowing.
    pub allow: Vec<String>,
    /// Also report shadowing of built-in globals.
    pub builtin_globals: bool,
    pub hoist: HoistMode,
    /// Ignore a type shadowing a value and vice versa.
    #[serde(alias = "ignoreNamespaceCrossing")]
    pub ignore_type_value_shadow: bool,
    /// Ignore parameter names of function types shadowing values.
    #[serde(alias = "ignoreFunctionTypeParamNameCrossing")]
    pub ignore_function_type_parameter_name_value_shadow: bool,
    /// Ignore a shadow inside a callback that is part of the outer
    /// declaration's own initializer, e.g. `const x = xs.find(x => x)`.
    pub ignore_on_initialization: bool,
}

impl Default for NoShadowOptions {
    fn default() -> Self {
        Self {
            allow: Vec::new(),
            builtin_globals: false,
            hoist: HoistMode::Functions,
            ignore_type_value_shadow: true,
            ignore_function_type_parameter_name_value_shadow: true,
            ignore_on_initialization: false,
        }
    }
}

#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("failed to read options file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid no-shadow options: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown hoist mode '{0}', expected one of: all, functions, never")]
    UnknownHoistMode(String),
}

/// Parse options from a JSON object.
pub fn parse_options(content: &str) -> Result<NoShadowOptions, OptionsError> {
    Ok(serde_json::from_str(content)?)
}

/// Parse options from a JSON file.
pub fn parse_options_file(path: impl AsRef<Path>) -> Result<NoShadowOptions, OptionsError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| OptionsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_options(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = NoShadowOptions::default();
        assert!(options.allow.is_empty());
        assert!(!options.builtin_globals);
        assert_eq!(options.hoist, HoistMode::Functions);
        assert!(options.ignore_type_value_shadow);
        assert!(options.ignore_function_type_parameter_name_value_shadow);
        assert!(!options.ignore_on_initialization);
    }

    #[test]
    fn test_empty_object_uses_defaults() {
        assert_eq!(parse_options("{}").unwrap(), NoShadowOptions::default());
    }

    #[test]
    fn test_parse_all_fields() {
        let options = parse_options(
            r#"{
                "allow": ["done", "resolve"],
                "builtinGlobals": true,
                "hoist": "all",
                "ignoreTypeValueShadow": false,
                "ignoreFunctionTypeParameterNameValueShadow": false,
                "ignoreOnInitialization": true
            }"#,
        )
        .unwrap();
        assert_eq!(options.allow, vec!["done".to_string(), "resolve".to_string()]);
        assert!(options.builtin_globals);
        assert_eq!(options.hoist, HoistMode::All);
        assert!(!options.ignore_type_value_shadow);
        assert!(!options.ignore_function_type_parameter_name_value_shadow);
        assert!(options.ignore_on_initialization);
    }

    #[test]
    fn test_aliases() {
        let options = parse_options(
            r#"{ "hoist": "functionsOnly", "ignoreNamespaceCrossing": false, "ignoreFunctionTypeParamNameCrossing": false }"#,
        )
        .unwrap();
        assert_eq!(options.hoist, HoistMode::Functions);
        assert!(!options.ignore_type_value_shadow);
        assert!(!options.ignore_function_type_parameter_name_value_shadow);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = parse_options(r#"{ "hoisting": "all" }"#).unwrap_err();
        assert!(matches!(err, OptionsError::Json(_)));
    }

    #[test]
    fn test_bad_hoist_value_rejected() {
        assert!(parse_options(r#"{ "hoist": "sometimes" }"#).is_err());
        assert!(matches!("sometimes".parse::<HoistMode>(), Err(OptionsError::UnknownHoistMode(_))));
        assert_eq!("never".parse::<HoistMode>().unwrap(), HoistMode::Never);
    }

    #[test]
    fn test_missing_file() {
        let err = parse_options_file("/nonexistent/no-shadow.json").unwrap_err();
        assert!(err.to_string().starts_with("failed to read options file /nonexistent/no-shadow.json"));
    }
}
