//! Normalization pipelines
//!
//! Each pipeline turns one raw World Bank export into one normalized table:
//!
//! - **extract**: wide CSV to per-country yearly values ([`IndicatorTable`])
//! - **align**: years complete for SGP, IND and USA from a minimum year on
//! - **derive**: cross exchange rates or inflation pass-through per year
//! - **write**: fixed-header CSV, replaced atomically
//!
//! # Example
//!
//! ```rust
//! use globefin::normalize::{build_rows, ExchangeRateRow};
//!
//! let raw = "meta\n\nmeta\n\n\
//! Country Name,Country Code,Indicator Name,Indicator Code,2010\n\
//! Singapore,SGP,Official exchange rate,PA.NUS.FCRF,1.35\n\
//! India,IND,Official exchange rate,PA.NUS.FCRF,70\n\
//! United States,USA,Official exchange rate,PA.NUS.FCRF,1\n";
//!
//! let rows: Vec<ExchangeRateRow> = build_rows(raw, "PA.NUS.FCRF", 1991).unwrap();
//! assert_eq!(rows[0].sgd_to_inr.map(|r| format!("{:.4}", r)).as_deref(), Some("51.8519"));
//! ```

pub mod align;
pub mod derive;
pub mod extract;
pub mod write;

pub use align::{align_years, AlignedYear, AlignedYearSet, CountryValues};
pub use derive::{
    derive_rows, format_value, inflation_column, DerivedRow, ExchangeRateRow, InflationRow,
    EXCHANGE_RATE_HEADER, INFLATION_HEADER,
};
pub use extract::IndicatorTable;
pub use write::{write_rows, write_table};

use crate::config::{GlobefinConfig, PipelineConfig};
use crate::error::{GlobefinError, Result};
use std::fmt;
use std::path::PathBuf;

/// The two tables this crate produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineKind {
    ExchangeRate,
    Inflation,
}

impl PipelineKind {
    pub const ALL: [PipelineKind; 2] = [PipelineKind::ExchangeRate, PipelineKind::Inflation];

    pub fn name(&self) -> &'static str {
        match self {
            PipelineKind::ExchangeRate => "exchange-rate",
            PipelineKind::Inflation => "inflation",
        }
    }

    /// Pipeline settings for this table
    pub fn config(&self, config: &GlobefinConfig) -> PipelineConfig {
        match self {
            PipelineKind::ExchangeRate => config.exchange_rate_pipeline(),
            PipelineKind::Inflation => config.inflation_pipeline(),
        }
    }

    pub fn run(&self, config: &PipelineConfig) -> Result<PipelineReport> {
        match self {
            PipelineKind::ExchangeRate => run_exchange_rate_pipeline(config),
            PipelineKind::Inflation => run_inflation_pipeline(config),
        }
    }
}

impl fmt::Display for PipelineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Outcome of a successful pipeline run
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineReport {
    pub indicator: String,
    pub output: PathBuf,
    pub rows: usize,
    pub first_year: i32,
    pub last_year: i32,
}

/// Extract, align and derive rows from raw export text without touching disk.
///
/// Fails with [`GlobefinError::NoAlignedData`] when no year is complete.
pub fn build_rows<R: DerivedRow>(raw: &str, indicator: &str, min_year: i32) -> Result<Vec<R>> {
    let table = IndicatorTable::parse(raw, indicator)?;
    rows_from_table(&table, min_year)
}

/// Align and derive rows from an already extracted table
pub fn rows_from_table<R: DerivedRow>(table: &IndicatorTable, min_year: i32) -> Result<Vec<R>> {
    let aligned = align_years(table, min_year);
    if aligned.is_empty() {
        return Err(GlobefinError::NoAlignedData {
            indicator: R::NAME.to_string(),
            min_year,
        });
    }
    Ok(derive_rows(&aligned))
}

/// In-memory exchange rate rows
pub fn build_exchange_rate_rows(
    raw: &str,
    indicator: &str,
    min_year: i32,
) -> Result<Vec<ExchangeRateRow>> {
    build_rows(raw, indicator, min_year)
}

/// In-memory inflation rows
pub fn build_inflation_rows(raw: &str, indicator: &str, min_year: i32) -> Result<Vec<InflationRow>> {
    build_rows(raw, indicator, min_year)
}

/// Run one pipeline from source file to normalized table.
///
/// On any failure nothing is written and an existing table is left as it was.
pub fn run_pipeline<R: DerivedRow>(config: &PipelineConfig) -> Result<PipelineReport> {
    log::info!(
        "Building {} table from {}",
        R::NAME,
        config.input.display()
    );

    let table = IndicatorTable::from_path(&config.input, &config.indicator)?;
    let rows: Vec<R> = match rows_from_table(&table, config.min_year) {
        Ok(rows) => rows,
        Err(e) => {
            log::warn!("{}", e);
            return Err(e);
        }
    };

    write_table(&config.output, &rows)?;

    let report = PipelineReport {
        indicator: config.indicator.clone(),
        output: config.output.clone(),
        rows: rows.len(),
        first_year: rows.first().map(|r| r.year()).unwrap_or_default(),
        last_year: rows.last().map(|r| r.year()).unwrap_or_default(),
    };

    log::info!(
        "Successfully generated {} ({} years, {}-{})",
        report.output.display(),
        report.rows,
        report.first_year,
        report.last_year
    );

    Ok(report)
}

/// Build the exchange rate table (`Year,SGD-to-INR,USD-to-SGD,USD-to-INR`)
pub fn run_exchange_rate_pipeline(config: &PipelineConfig) -> Result<PipelineReport> {
    run_pipeline::<ExchangeRateRow>(config)
}

/// Build the inflation table (`Year,SGD Inflation (%),INR Inflation (%),USD Inflation (%)`)
pub fn run_inflation_pipeline(config: &PipelineConfig) -> Result<PipelineReport> {
    run_pipeline::<InflationRow>(config)
}

/// Run both pipelines; a failure in one does not stop the other
pub fn run_all(config: &GlobefinConfig) -> Vec<(PipelineKind, Result<PipelineReport>)> {
    PipelineKind::ALL
        .iter()
        .map(|kind| (*kind, kind.run(&kind.config(config))))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAW: &str = "meta\n\nmeta\n\n\
Country Name,Country Code,Indicator Name,Indicator Code,1990,1991,1992\n\
Singapore,SGP,Inflation,FP.CPI.TOTL.ZG,3.5,3.4,2.3\n\
India,IND,Inflation,FP.CPI.TOTL.ZG,9.0,13.9,11.8\n\
United States,USA,Inflation,FP.CPI.TOTL.ZG,5.4,4.2,\n";

    #[test]
    fn test_build_inflation_rows() {
        let rows = build_inflation_rows(RAW, "FP.CPI.TOTL.ZG", 1991).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].year, 1991);
        assert_eq!(rows[0].inr, 13.9);
    }

    #[test]
    fn test_no_aligned_data() {
        let err = build_exchange_rate_rows(RAW, "FP.CPI.TOTL.ZG", 1992).unwrap_err();
        match err {
            GlobefinError::NoAlignedData { indicator, min_year } => {
                assert_eq!(indicator, "exchange rate");
                assert_eq!(min_year, 1992);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_pipeline_kind_names() {
        assert_eq!(PipelineKind::ExchangeRate.to_string(), "exchange-rate");
        assert_eq!(PipelineKind::Inflation.name(), "inflation");
    }
}
