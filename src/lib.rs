//! # globefin
//!
//! Normalizes World Bank indicator exports into currency-pair tables for the
//! US Dollar, Singapore Dollar and Indian Rupee, and answers history queries
//! over those tables.
//!
//! Two pipelines share one shape: extract the tracked countries from a wide
//! CSV, align the years all three report, derive the output columns, and write
//! a normalized CSV. The [`query::QueryService`] reads those tables back.
//!
//! ## Example
//!
//! ```rust,no_run
//! use globefin::prelude::*;
//!
//! let config = GlobefinConfig::load(None)?;
//! run_exchange_rate_pipeline(&config.exchange_rate_pipeline())?;
//! run_inflation_pipeline(&config.inflation_pipeline())?;
//!
//! let service = QueryService::from_config(&config);
//! for entry in service.exchange_rate_history("SGD", "INR")? {
//!     println!("{}: {:.4}", entry.year, entry.rate);
//! }
//! # Ok::<(), GlobefinError>(())
//! ```

pub mod config;
pub mod currency;
pub mod error;
pub mod normalize;
pub mod query;
pub mod tools;

pub mod prelude {
    //! Commonly used types and functions
    pub use crate::config::{GlobefinConfig, PipelineConfig};
    pub use crate::currency::{Country, Currency, CurrencyPair};
    pub use crate::error::{GlobefinError, Result};
    pub use crate::normalize::{
        run_all, run_exchange_rate_pipeline, run_inflation_pipeline, PipelineKind, PipelineReport,
    };
    pub use crate::query::{CurrencyPairRate, InflationRate, QueryService};
}
