//! Runtime configuration.
//!
//! Settings come from an optional YAML file and are then overridden by
//! command-line flags. Every key is optional:
//!
//! ```yaml
//! max_line_length: 1024   # bytes per CSV line, terminator excluded
//! color: auto             # auto | always | never
//! format: text            # text | json
//! ```

use std::{fs, path::Path};

use serde::Deserialize;
use termcolor::ColorChoice;

use crate::{csv::DEFAULT_MAX_LINE_LENGTH, diagnostics::CalcError};

/// When to emit colored terminal output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Resolves `Auto` against whether stdout is a terminal.
    pub fn color_choice(&self) -> ColorChoice {
        match self {
            ColorMode::Auto if atty::is(atty::Stream::Stdout) => ColorChoice::Auto,
            ColorMode::Auto => ColorChoice::Never,
            ColorMode::Always => ColorChoice::Always,
            ColorMode::Never => ColorChoice::Never,
        }
    }
}

/// How test reports are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub max_line_length: usize,
    pub color: ColorMode,
    pub format: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            color: ColorMode::default(),
            format: OutputFormat::default(),
        }
    }
}

impl Config {
    /// Loads and validates a YAML configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CalcError> {
        let path = path.as_ref();
        let name = path.display().to_string();
        let content = fs::read_to_string(path).map_err(|e| CalcError::Config {
            path: name.clone(),
            message: e.to_string(),
        })?;
        Self::from_yaml(&name, &content)
    }

    /// Returns the defaults when no file is given.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, CalcError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_yaml(name: &str, content: &str) -> Result<Self, CalcError> {
        // An empty document means "all defaults".
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(content).map_err(|e| CalcError::Config {
            path: name.to_string(),
            message: e.to_string(),
        })?;
        config.validate(name)?;
        Ok(config)
    }

    fn validate(&self, name: &str) -> Result<(), CalcError> {
        if self.max_line_length == 0 {
            return Err(CalcError::Config {
                path: name.to_string(),
                message: "max_line_length must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = Config::default();
        assert_eq!(config.max_line_length, 1024);
        assert_eq!(config.color, ColorMode::Auto);
        assert_eq!(config.format, OutputFormat::Text);
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let config = Config::from_yaml("vecalc.yaml", "format: json\n").unwrap();
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.max_line_length, 1024);
    }

    #[test]
    fn empty_document_is_default() {
        assert_eq!(Config::from_yaml("vecalc.yaml", "\n").unwrap(), Config::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = Config::from_yaml("vecalc.yaml", "tolerance: 0.5\n").unwrap_err();
        assert!(matches!(err, CalcError::Config { .. }));
    }

    #[test]
    fn zero_line_length_is_rejected() {
        let err = Config::from_yaml("vecalc.yaml", "max_line_length: 0\n").unwrap_err();
        assert!(err.to_string().contains("greater than zero"));
    }

    #[test]
    fn explicit_color_modes_ignore_the_terminal() {
        assert_eq!(ColorMode::Always.color_choice(), ColorChoice::Always);
        assert_eq!(ColorMode::Never.color_choice(), ColorChoice::Never);
    }
}
