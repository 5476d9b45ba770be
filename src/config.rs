//! Runtime configuration
//!
//! Read once at startup from environment variables, falling back to the
//! conventional file layout next to the working directory.

use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{LabelError, LabelResult};

pub const ENV_DATA: &str = "LABELGEN_DATA";
pub const ENV_OUTPUT_DIR: &str = "LABELGEN_OUTPUT_DIR";
pub const ENV_TEMPLATE: &str = "LABELGEN_TEMPLATE";
pub const ENV_ASSET_DIR: &str = "LABELGEN_ASSET_DIR";
pub const ENV_FORMAT: &str = "LABELGEN_FORMAT";

pub const DEFAULT_DATA: &str = "data.json";
pub const DEFAULT_OUTPUT_DIR: &str = "output_labels";
pub const DEFAULT_TEMPLATE: &str = "templates/label.tpl";

/// Artifact type written per label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Pdf,
    Png,
}

impl OutputFormat {
    /// File extension without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Pdf => "pdf",
            OutputFormat::Png => "png",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pdf" => Ok(OutputFormat::Pdf),
            "png" => Ok(OutputFormat::Png),
            other => Err(LabelError::Config(format!(
                "unsupported output format '{}' (expected pdf or png)",
                other
            ))),
        }
    }
}

/// Paths and options for one run
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_path: PathBuf,
    pub output_dir: PathBuf,
    pub template_path: PathBuf,
    pub asset_dir: PathBuf,
    pub format: OutputFormat,
}

impl Config {
    /// Build from the process environment
    pub fn from_env() -> LabelResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> LabelResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path_or = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(default))
        };

        let asset_dir = match lookup(ENV_ASSET_DIR).filter(|v| !v.trim().is_empty()) {
            Some(dir) => PathBuf::from(dir),
            None => std::env::current_dir()?,
        };

        let format = match lookup(ENV_FORMAT) {
            Some(value) => value.parse()?,
            None => OutputFormat::default(),
        };

        Ok(Self {
            data_path: path_or(ENV_DATA, DEFAULT_DATA),
            output_dir: path_or(ENV_OUTPUT_DIR, DEFAULT_OUTPUT_DIR),
            template_path: path_or(ENV_TEMPLATE, DEFAULT_TEMPLATE),
            asset_dir,
            format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[(ENV_ASSET_DIR, "/assets")])).unwrap();
        assert_eq!(config.data_path, PathBuf::from("data.json"));
        assert_eq!(config.output_dir, PathBuf::from("output_labels"));
        assert_eq!(config.template_path, PathBuf::from("templates/label.tpl"));
        assert_eq!(config.asset_dir, PathBuf::from("/assets"));
        assert_eq!(config.format, OutputFormat::Pdf);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            (ENV_DATA, "recipes.json"),
            (ENV_OUTPUT_DIR, "out"),
            (ENV_FORMAT, "PNG"),
        ]))
        .unwrap();
        assert_eq!(config.data_path, PathBuf::from("recipes.json"));
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.format, OutputFormat::Png);
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let result = Config::from_lookup(lookup(&[(ENV_FORMAT, "svg")]));
        assert!(matches!(result, Err(LabelError::Config(_))));
    }

    #[test]
    fn test_format_extension() {
        assert_eq!(OutputFormat::Pdf.extension(), "pdf");
        assert_eq!("png".parse::<OutputFormat>().unwrap().extension(), "png");
    }
}
