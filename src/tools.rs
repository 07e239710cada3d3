//! Tool definitions and dispatch for agent callers
//!
//! An agent runtime lists [`definitions`] to the model and routes each tool
//! call through [`call`]. Transport is left to the host.

use crate::error::{GlobefinError, Result};
use crate::query::QueryService;
use serde_json::{json, Value};

pub const EXCHANGE_RATE_TOOL: &str = "get_exchange_rate_history";
pub const INFLATION_TOOL: &str = "get_inflation_rate_history";

/// Name, description and JSON-schema parameters for each tool
pub fn definitions() -> Value {
    json!([
        {
            "name": EXCHANGE_RATE_TOOL,
            "description": "Returns historical currency exchange rates from 1991 onwards for the specified currencies. \
                            Each entry holds the Year and the rate for the pair, keyed '<FROM>-to-<TO>'.",
            "parameters": {
                "type": "object",
                "properties": {
                    "from_currency": {
                        "type": "string",
                        "enum": ["USD", "SGD", "INR"],
                        "description": "The currency to convert from"
                    },
                    "to_currency": {
                        "type": "string",
                        "enum": ["USD", "SGD", "INR"],
                        "description": "The currency to convert to; must differ from from_currency"
                    }
                },
                "required": ["from_currency", "to_currency"]
            }
        },
        {
            "name": INFLATION_TOOL,
            "description": "Returns historical inflation rates from 1991 onwards for the specified currency. \
                            Each entry holds the Year and the rate keyed 'Inflation-Rate-<CODE>'.",
            "parameters": {
                "type": "object",
                "properties": {
                    "for_currency": {
                        "type": "string",
                        "enum": ["USD", "SGD", "INR"],
                        "description": "The currency whose inflation rate is requested"
                    }
                },
                "required": ["for_currency"]
            }
        }
    ])
}

fn string_arg<'a>(args: &'a Value, name: &str) -> Result<&'a str> {
    args.get(name)
        .and_then(Value::as_str)
        .ok_or_else(|| GlobefinError::InvalidArgument(format!("Missing string argument '{}'", name)))
}

/// Dispatch a tool call by name with JSON object arguments
pub fn call(service: &QueryService, name: &str, args: &Value) -> Result<Value> {
    match name {
        EXCHANGE_RATE_TOOL => {
            let from = string_arg(args, "from_currency")?;
            let to = string_arg(args, "to_currency")?;
            Ok(serde_json::to_value(service.exchange_rate_history(from, to)?)?)
        }
        INFLATION_TOOL => {
            let currency = string_arg(args, "for_currency")?;
            Ok(serde_json::to_value(service.inflation_rate_history(currency)?)?)
        }
        _ => Err(GlobefinError::InvalidArgument(format!("Unknown tool: {}", name))),
    }
}
