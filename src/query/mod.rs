//! History queries over the normalized tables
//!
//! Both queries read their table fresh on every call and hold no state between
//! calls, so concurrent callers never interfere.
//!
//! # Example
//!
//! ```rust
//! use globefin::query::{InMemoryTableSource, QueryService};
//!
//! let service = QueryService::new(
//!     InMemoryTableSource::new("Year,SGD-to-INR,USD-to-SGD,USD-to-INR\n2010,51.8519,1.3500,70.0000\n"),
//!     InMemoryTableSource::new("Year,SGD Inflation (%),INR Inflation (%),USD Inflation (%)\n"),
//! );
//!
//! let history = service.exchange_rate_history("SGD", "USD").unwrap();
//! assert_eq!(history[0].year, 2010);
//! assert!((history[0].rate - 1.0 / 1.35).abs() < 1e-9);
//! ```

pub mod source;

pub use source::{FileTableSource, InMemoryTableSource, NormalizedTable, TableRow, TableSource};

use crate::config::GlobefinConfig;
use crate::currency::{Currency, CurrencyPair};
use crate::error::{GlobefinError, Result};
use crate::normalize::derive::{columns, inflation_column};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::path::Path;

/// Exchange rate for one year: one unit of `pair.from` buys `rate` units of `pair.to`.
///
/// Serializes as `{"Year": 2010, "SGD-to-INR": 51.8519}`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurrencyPairRate {
    pub year: i32,
    pub pair: CurrencyPair,
    pub rate: f64,
}

impl Serialize for CurrencyPairRate {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(columns::YEAR, &self.year)?;
        map.serialize_entry(&self.pair.label(), &self.rate)?;
        map.end()
    }
}

/// Inflation percentage for one year.
///
/// Serializes as `{"Year": 2010, "Inflation-Rate-SGD": 2.8}`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InflationRate {
    pub year: i32,
    pub currency: Currency,
    pub rate: f64,
}

impl InflationRate {
    pub fn label(&self) -> String {
        format!("Inflation-Rate-{}", self.currency)
    }
}

impl Serialize for InflationRate {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(columns::YEAR, &self.year)?;
        map.serialize_entry(&self.label(), &self.rate)?;
        map.end()
    }
}

/// How a pair's rate is obtained from the exchange rate table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateColumn {
    /// Stored as-is
    Direct(&'static str),
    /// Reciprocal of a stored column
    Inverse(&'static str),
}

impl RateColumn {
    /// Resolve a pair to its stored column
    pub fn for_pair(pair: CurrencyPair) -> Result<Self> {
        use Currency::*;
        match (pair.from, pair.to) {
            (USD, SGD) => Ok(RateColumn::Direct(columns::USD_TO_SGD)),
            (USD, INR) => Ok(RateColumn::Direct(columns::USD_TO_INR)),
            (SGD, INR) => Ok(RateColumn::Direct(columns::SGD_TO_INR)),
            (SGD, USD) => Ok(RateColumn::Inverse(columns::USD_TO_SGD)),
            (INR, USD) => Ok(RateColumn::Inverse(columns::USD_TO_INR)),
            (INR, SGD) => Ok(RateColumn::Inverse(columns::SGD_TO_INR)),
            (USD, USD) | (SGD, SGD) | (INR, INR) => Err(GlobefinError::InvalidArgument(
                "From and To currencies cannot be the same.".to_string(),
            )),
        }
    }
}

/// Answers exchange rate and inflation history queries
pub struct QueryService {
    exchange_rates: Box<dyn TableSource>,
    inflation: Box<dyn TableSource>,
}

impl QueryService {
    pub fn new(
        exchange_rates: impl TableSource + 'static,
        inflation: impl TableSource + 'static,
    ) -> Self {
        Self {
            exchange_rates: Box::new(exchange_rates),
            inflation: Box::new(inflation),
        }
    }

    /// Service over two CSV files on disk
    pub fn from_paths(exchange_rates: &Path, inflation: &Path) -> Self {
        Self::new(
            FileTableSource::new(exchange_rates),
            FileTableSource::new(inflation),
        )
    }

    /// Service over the tables the configured pipelines write
    pub fn from_config(config: &GlobefinConfig) -> Self {
        Self::from_paths(&config.exchange_rate_table(), &config.inflation_table())
    }

    /// Yearly rate converting one unit of `from` into `to`.
    ///
    /// Codes must be exactly `USD`, `SGD` or `INR` and differ from each other.
    /// Years whose needed value is empty, or zero for an inverse pair, are omitted.
    pub fn exchange_rate_history(&self, from: &str, to: &str) -> Result<Vec<CurrencyPairRate>> {
        let pair = CurrencyPair::from_codes(from, to)?;
        self.pair_history(pair)
    }

    /// [`QueryService::exchange_rate_history`] for an already validated pair
    pub fn pair_history(&self, pair: CurrencyPair) -> Result<Vec<CurrencyPairRate>> {
        let column = RateColumn::for_pair(pair)?;
        let table = self.exchange_rates.load()?;
        log::debug!(
            "Resolving {} over {} rows from {}",
            pair,
            table.len(),
            self.exchange_rates.describe()
        );

        let rates = match column {
            RateColumn::Direct(column) => table.column(column)?,
            RateColumn::Inverse(column) => table
                .column(column)?
                .into_iter()
                .filter_map(|(year, rate)| CurrencyPair::invert_rate(rate).map(|r| (year, r)))
                .collect(),
        };

        Ok(rates
            .into_iter()
            .map(|(year, rate)| CurrencyPairRate { year, pair, rate })
            .collect())
    }

    /// Yearly inflation percentage for a currency (`USD`, `SGD` or `INR`)
    pub fn inflation_rate_history(&self, currency: &str) -> Result<Vec<InflationRate>> {
        let currency = Currency::from_code(currency)?;
        self.currency_inflation(currency)
    }

    /// [`QueryService::inflation_rate_history`] for an already validated currency
    pub fn currency_inflation(&self, currency: Currency) -> Result<Vec<InflationRate>> {
        let table = self.inflation.load()?;
        log::debug!(
            "Reading {} inflation over {} rows from {}",
            currency,
            table.len(),
            self.inflation.describe()
        );

        Ok(table
            .column(inflation_column(currency))?
            .into_iter()
            .map(|(year, rate)| InflationRate {
                year,
                currency,
                rate,
            })
            .collect())
    }
}
