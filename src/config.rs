//! Dashboard Configuration Module
//! Defaults, optional JSON config file, environment and command-line overrides.

use crate::data::mapping::{self, Language};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "review_dashboard.json";

/// Environment variable overriding the review data path.
pub const DATA_PATH_ENV: &str = "REVIEW_DASHBOARD_DATA";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Unknown default category: {0}")]
    UnknownCategory(String),
    #[error("Missing value for {0}")]
    MissingValue(&'static str),
    #[error("Unknown argument: {0}")]
    UnknownArgument(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub default_category: String,
    pub default_language: Language,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("Translated_Negative_Reviews.xlsx"),
            default_category: "User Interface Issues".to_string(),
            default_language: Language::Turkish,
            window_width: 1400.0,
            window_height: 900.0,
        }
    }
}

impl DashboardConfig {
    /// Read a JSON config file. Missing fields keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if mapping::find_category(&self.default_category).is_none() {
            return Err(ConfigError::UnknownCategory(self.default_category.clone()));
        }
        Ok(())
    }
}

/// Query given on the command line for headless report mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportArgs {
    pub category: Option<String>,
    pub language: Option<String>,
    pub keyword: Option<String>,
    pub show: bool,
}

/// Parsed command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub data_path: Option<PathBuf>,
    pub config_path: Option<PathBuf>,
    /// `Some` when `--report` was given.
    pub report: Option<ReportArgs>,
}

impl CliArgs {
    /// Parse arguments, excluding the program name.
    pub fn parse<I, S>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut cli = CliArgs::default();
        let mut report = ReportArgs::default();
        let mut report_mode = false;
        let mut args = args.into_iter().map(Into::into);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => {
                    let value = args.next().ok_or(ConfigError::MissingValue("--config"))?;
                    cli.config_path = Some(PathBuf::from(value));
                }
                "--report" => report_mode = true,
                "--show" => report.show = true,
                "--category" => {
                    report.category =
                        Some(args.next().ok_or(ConfigError::MissingValue("--category"))?);
                }
                "--language" => {
                    report.language =
                        Some(args.next().ok_or(ConfigError::MissingValue("--language"))?);
                }
                "--keyword" => {
                    report.keyword =
                        Some(args.next().ok_or(ConfigError::MissingValue("--keyword"))?);
                }
                flag if flag.starts_with("--") => {
                    return Err(ConfigError::UnknownArgument(flag.to_string()));
                }
                _ if cli.data_path.is_none() => cli.data_path = Some(PathBuf::from(arg)),
                _ => return Err(ConfigError::UnknownArgument(arg)),
            }
        }

        if report_mode {
            cli.report = Some(report);
        }
        Ok(cli)
    }
}

/// Resolve the effective config: defaults, config file, environment, then CLI.
pub fn resolve(cli: &CliArgs, env_data_path: Option<String>) -> Result<DashboardConfig, ConfigError> {
    let mut config = match &cli.config_path {
        Some(path) => DashboardConfig::from_file(path)?,
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            if default_path.is_file() {
                DashboardConfig::from_file(default_path)?
            } else {
                DashboardConfig::default()
            }
        }
    };

    if let Some(path) = env_data_path.filter(|p| !p.is_empty()) {
        config.data_path = PathBuf::from(path);
    }
    if let Some(path) = &cli.data_path {
        config.data_path = path.clone();
    }

    Ok(config)
}
