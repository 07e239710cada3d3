//! Tracked currencies, their source countries, and currency pairs

use crate::error::{GlobefinError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Currency enumeration (ISO 4217 codes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Currency {
    /// US Dollar
    USD,
    /// Singapore Dollar
    SGD,
    /// Indian Rupee
    INR,
}

impl Currency {
    /// All tracked currencies
    pub const ALL: [Currency; 3] = [Currency::USD, Currency::SGD, Currency::INR];

    /// Get ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::SGD => "SGD",
            Currency::INR => "INR",
        }
    }

    /// Parse from ISO code; only the exact upper-case codes are accepted
    pub fn from_code(code: &str) -> Result<Self> {
        match code {
            "USD" => Ok(Currency::USD),
            "SGD" => Ok(Currency::SGD),
            "INR" => Ok(Currency::INR),
            _ => Err(GlobefinError::InvalidArgument(format!(
                "Invalid currency '{}'. Must be SGD, INR, or USD.",
                code
            ))),
        }
    }

    /// Country whose World Bank series prices this currency
    pub fn country(&self) -> Country {
        COUNTRY_CURRENCIES
            .iter()
            .find(|(_, currency)| currency == self)
            .map(|(country, _)| *country)
            .unwrap_or(Country::USA)
    }
}

impl FromStr for Currency {
    type Err = GlobefinError;

    fn from_str(s: &str) -> Result<Self> {
        Currency::from_code(s)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Countries tracked in the source indicator files (ISO 3166 alpha-3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Country {
    /// Singapore
    SGP,
    /// India
    IND,
    /// United States
    USA,
}

impl Country {
    /// All tracked countries, in output column order
    pub const ALL: [Country; 3] = [Country::SGP, Country::IND, Country::USA];

    pub fn code(&self) -> &'static str {
        match self {
            Country::SGP => "SGP",
            Country::IND => "IND",
            Country::USA => "USA",
        }
    }

    /// Match a country code column exactly; untracked codes yield `None`
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "SGP" => Some(Country::SGP),
            "IND" => Some(Country::IND),
            "USA" => Some(Country::USA),
            _ => None,
        }
    }

    /// Currency issued by this country
    pub fn currency(&self) -> Currency {
        COUNTRY_CURRENCIES
            .iter()
            .find(|(country, _)| country == self)
            .map(|(_, currency)| *currency)
            .unwrap_or(Currency::USD)
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Country to currency mapping for every tracked series
pub const COUNTRY_CURRENCIES: [(Country, Currency); 3] = [
    (Country::SGP, Currency::SGD),
    (Country::IND, Currency::INR),
    (Country::USA, Currency::USD),
];

/// Currency pair for exchange rates: one unit of `from` buys `rate` units of `to`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CurrencyPair {
    pub from: Currency,
    pub to: Currency,
}

impl CurrencyPair {
    /// Create new currency pair; both sides must differ
    pub fn new(from: Currency, to: Currency) -> Result<Self> {
        if from == to {
            return Err(GlobefinError::InvalidArgument(
                "From and To currencies cannot be the same.".to_string(),
            ));
        }
        Ok(Self { from, to })
    }

    /// Parse both sides from ISO codes
    pub fn from_codes(from: &str, to: &str) -> Result<Self> {
        Self::new(Currency::from_code(from)?, Currency::from_code(to)?)
    }

    /// Get the inverse pair
    pub fn inverse(&self) -> Self {
        Self {
            from: self.to,
            to: self.from,
        }
    }

    /// Field name used in query results, e.g. `SGD-to-INR`
    pub fn label(&self) -> String {
        format!("{}-to-{}", self.from, self.to)
    }

    /// Convert rate to inverse rate; zero has no inverse
    pub fn invert_rate(rate: f64) -> Option<f64> {
        if rate != 0.0 && rate.is_finite() {
            Some(1.0 / rate)
        } else {
            None
        }
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
