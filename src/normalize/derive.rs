//! Output rows derived from aligned years
//!
//! Exchange rates use USD as numeraire: the source series give local currency
//! units per US dollar, so USD-to-SGD and USD-to-INR are read straight off and
//! SGD-to-INR is their quotient.

use super::align::{AlignedYear, AlignedYearSet};
use crate::currency::{Country, Currency};

/// Column names shared by the writer and the query service
pub mod columns {
    pub const YEAR: &str = "Year";
    pub const SGD_TO_INR: &str = "SGD-to-INR";
    pub const USD_TO_SGD: &str = "USD-to-SGD";
    pub const USD_TO_INR: &str = "USD-to-INR";
    pub const SGD_INFLATION: &str = "SGD Inflation (%)";
    pub const INR_INFLATION: &str = "INR Inflation (%)";
    pub const USD_INFLATION: &str = "USD Inflation (%)";
}

/// Header of the normalized exchange rate table
pub const EXCHANGE_RATE_HEADER: [&str; 4] = [
    columns::YEAR,
    columns::SGD_TO_INR,
    columns::USD_TO_SGD,
    columns::USD_TO_INR,
];

/// Header of the normalized inflation table
pub const INFLATION_HEADER: [&str; 4] = [
    columns::YEAR,
    columns::SGD_INFLATION,
    columns::INR_INFLATION,
    columns::USD_INFLATION,
];

/// Inflation column for a currency
pub fn inflation_column(currency: Currency) -> &'static str {
    match currency {
        Currency::SGD => columns::SGD_INFLATION,
        Currency::INR => columns::INR_INFLATION,
        Currency::USD => columns::USD_INFLATION,
    }
}

/// A row of a normalized table: the year followed by fixed numeric fields
pub trait DerivedRow: Sized {
    /// Fixed header, `Year` first
    const HEADER: [&'static str; 4];

    /// Short name used in logs and errors
    const NAME: &'static str;

    fn from_aligned(aligned: &AlignedYear) -> Self;

    fn year(&self) -> i32;

    /// Numeric fields in header order, after `Year`
    fn fields(&self) -> [Option<f64>; 3];

    /// CSV record: integer year, 4-decimal values, empty for undefined
    fn to_record(&self) -> [String; 4] {
        let [a, b, c] = self.fields();
        [
            self.year().to_string(),
            format_value(a),
            format_value(b),
            format_value(c),
        ]
    }
}

/// Fixed 4-decimal rendering; undefined values render empty
pub fn format_value(value: Option<f64>) -> String {
    value.map(|v| format!("{:.4}", v)).unwrap_or_default()
}

/// Cross rates for one year
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExchangeRateRow {
    pub year: i32,
    /// `None` when the SGD rate is zero
    pub sgd_to_inr: Option<f64>,
    pub usd_to_sgd: f64,
    pub usd_to_inr: f64,
}

impl ExchangeRateRow {
    pub fn new(year: i32, usd_to_sgd: f64, usd_to_inr: f64) -> Self {
        let sgd_to_inr = if usd_to_sgd != 0.0 {
            Some(usd_to_inr / usd_to_sgd)
        } else {
            None
        };

        Self {
            year,
            sgd_to_inr,
            usd_to_sgd,
            usd_to_inr,
        }
    }
}

impl DerivedRow for ExchangeRateRow {
    const HEADER: [&'static str; 4] = EXCHANGE_RATE_HEADER;
    const NAME: &'static str = "exchange rate";

    fn from_aligned(aligned: &AlignedYear) -> Self {
        Self::new(
            aligned.year,
            aligned.values.get(Country::SGP),
            aligned.values.get(Country::IND),
        )
    }

    fn year(&self) -> i32 {
        self.year
    }

    fn fields(&self) -> [Option<f64>; 3] {
        [self.sgd_to_inr, Some(self.usd_to_sgd), Some(self.usd_to_inr)]
    }
}

/// Inflation percentages for one year, passed through per currency
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InflationRow {
    pub year: i32,
    pub sgd: f64,
    pub inr: f64,
    pub usd: f64,
}

impl InflationRow {
    pub fn rate(&self, currency: Currency) -> f64 {
        match currency {
            Currency::SGD => self.sgd,
            Currency::INR => self.inr,
            Currency::USD => self.usd,
        }
    }
}

impl DerivedRow for InflationRow {
    const HEADER: [&'static str; 4] = INFLATION_HEADER;
    const NAME: &'static str = "inflation rate";

    fn from_aligned(aligned: &AlignedYear) -> Self {
        Self {
            year: aligned.year,
            sgd: aligned.values.get(Currency::SGD.country()),
            inr: aligned.values.get(Currency::INR.country()),
            usd: aligned.values.get(Currency::USD.country()),
        }
    }

    fn year(&self) -> i32 {
        self.year
    }

    fn fields(&self) -> [Option<f64>; 3] {
        [Some(self.sgd), Some(self.inr), Some(self.usd)]
    }
}

/// Derive one output row per aligned year, preserving order
pub fn derive_rows<R: DerivedRow>(aligned: &AlignedYearSet) -> Vec<R> {
    aligned.iter().map(R::from_aligned).collect()
}
