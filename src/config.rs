//! File locations and thresholds for the pipelines and the query service
//!
//! Nothing in the core hard-codes a path: pipelines take a [`PipelineConfig`]
//! and the query service takes the path of the normalized table. This module
//! supplies defaults and loads overrides from a TOML file.

use crate::error::{GlobefinError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// World Bank indicator code: official exchange rate (LCU per US$, period average)
pub const EXCHANGE_RATE_INDICATOR: &str = "PA.NUS.FCRF";

/// World Bank indicator code: inflation, consumer prices (annual %)
pub const INFLATION_INDICATOR: &str = "FP.CPI.TOTL.ZG";

/// First year kept by the aligner; Singapore's series begins here
pub const DEFAULT_MIN_YEAR: i32 = 1991;

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobefinConfig {
    #[serde(default = "default_input_dir")]
    pub input_dir: PathBuf,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_exchange_rate_input")]
    pub exchange_rate_input: PathBuf,
    #[serde(default = "default_inflation_input")]
    pub inflation_input: PathBuf,
    #[serde(default = "default_exchange_rate_output")]
    pub exchange_rate_output: PathBuf,
    #[serde(default = "default_inflation_output")]
    pub inflation_output: PathBuf,
    #[serde(default = "default_min_year")]
    pub min_year: i32,
}

fn default_input_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

fn default_exchange_rate_input() -> PathBuf {
    PathBuf::from("API_PA.NUS.FCRF_DS2_en_csv_v2_123253.csv")
}

fn default_inflation_input() -> PathBuf {
    PathBuf::from("API_FP.CPI.TOTL.ZG_DS2_en_csv_v2_127296.csv")
}

fn default_exchange_rate_output() -> PathBuf {
    PathBuf::from("output-exchange-rate-history-INR-SGD-USD.csv")
}

fn default_inflation_output() -> PathBuf {
    PathBuf::from("output-inflation-rate-history-INR-SGD-USD.csv")
}

fn default_min_year() -> i32 {
    DEFAULT_MIN_YEAR
}

impl Default for GlobefinConfig {
    fn default() -> Self {
        Self {
            input_dir: default_input_dir(),
            output_dir: default_output_dir(),
            exchange_rate_input: default_exchange_rate_input(),
            inflation_input: default_inflation_input(),
            exchange_rate_output: default_exchange_rate_output(),
            inflation_output: default_inflation_output(),
            min_year: default_min_year(),
        }
    }
}

impl GlobefinConfig {
    /// Default config location: `~/.globefin/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".globefin").join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist and parse. Without one, the file at
    /// [`GlobefinConfig::default_path`] is used when present; a broken default
    /// file is logged and ignored.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(config_path) = path {
            if !config_path.exists() {
                return Err(GlobefinError::ConfigError(format!(
                    "Config file not found: {}",
                    config_path.display()
                )));
            }
            return Self::from_file(config_path);
        }

        if let Some(default_config) = Self::default_path() {
            if default_config.exists() {
                match Self::from_file(&default_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => log::warn!("Ignoring {}: {}", default_config.display(), e),
                }
            }
        }

        Ok(Self::default())
    }

    /// Parse a TOML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse TOML text; missing keys fall back to defaults
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| GlobefinError::ConfigError(e.to_string()))
    }

    /// Path of the normalized exchange rate table
    pub fn exchange_rate_table(&self) -> PathBuf {
        self.output_dir.join(&self.exchange_rate_output)
    }

    /// Path of the normalized inflation table
    pub fn inflation_table(&self) -> PathBuf {
        self.output_dir.join(&self.inflation_output)
    }

    /// Pipeline settings for the exchange rate table
    pub fn exchange_rate_pipeline(&self) -> PipelineConfig {
        PipelineConfig {
            input: self.input_dir.join(&self.exchange_rate_input),
            output: self.exchange_rate_table(),
            indicator: EXCHANGE_RATE_INDICATOR.to_string(),
            min_year: self.min_year,
        }
    }

    /// Pipeline settings for the inflation table
    pub fn inflation_pipeline(&self) -> PipelineConfig {
        PipelineConfig {
            input: self.input_dir.join(&self.inflation_input),
            output: self.inflation_table(),
            indicator: INFLATION_INDICATOR.to_string(),
            min_year: self.min_year,
        }
    }
}

/// Settings for one pipeline run
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Raw World Bank export
    pub input: PathBuf,
    /// Normalized table to (re)create
    pub output: PathBuf,
    /// Indicator code rows must match exactly
    pub indicator: String,
    /// Earliest year kept
    pub min_year: i32,
}

impl PipelineConfig {
    pub fn new(
        input: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
        indicator: impl Into<String>,
    ) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            indicator: indicator.into(),
            min_year: DEFAULT_MIN_YEAR,
        }
    }

    pub fn with_min_year(mut self, min_year: i32) -> Self {
        self.min_year = min_year;
        self
    }
}
