use std::env;
use std::str::FromStr;

use crate::app::report_config::{
    DEFAULT_CURRENCY_DECIMALS, DEFAULT_MAX_REPORT_BYTES, DEFAULT_UPLOAD_BURST,
    DEFAULT_UPLOAD_RATE_PER_SECOND, MAX_CURRENCY_DECIMALS,
};

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    /// Base URL of the fundraiser ledger gateway
    pub ledger_url: String,
    /// Bearer token for the ledger gateway, if it requires one
    pub ledger_api_token: Option<String>,
    /// Flat directory holding one report file per fundraiser
    pub reports_dir: String,
    pub max_report_bytes: usize,
    /// Decimals between the ledger's smallest unit and display units
    pub currency_decimals: u32,
    pub upload_rate_per_second: u64,
    pub upload_burst: u32,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let currency_decimals = parse_or("CURRENCY_DECIMALS", DEFAULT_CURRENCY_DECIMALS);
        let currency_decimals = if currency_decimals > MAX_CURRENCY_DECIMALS {
            tracing::warn!(
                currency_decimals,
                max = MAX_CURRENCY_DECIMALS,
                "CURRENCY_DECIMALS too large, using default"
            );
            DEFAULT_CURRENCY_DECIMALS
        } else {
            currency_decimals
        };

        Self {
            port: parse_or("PORT", 5000),
            ledger_url: env::var("LEDGER_URL")
                .unwrap_or_else(|_| "http://localhost:8545".to_string()),
            ledger_api_token: env::var("LEDGER_API_TOKEN").ok().filter(|t| !t.is_empty()),
            reports_dir: env::var("REPORTS_DIR").unwrap_or_else(|_| "uploads".to_string()),
            max_report_bytes: parse_or("MAX_REPORT_BYTES", DEFAULT_MAX_REPORT_BYTES),
            currency_decimals,
            upload_rate_per_second: parse_or(
                "UPLOAD_RATE_PER_SECOND",
                DEFAULT_UPLOAD_RATE_PER_SECOND,
            )
            .max(1),
            upload_burst: parse_or("UPLOAD_BURST", DEFAULT_UPLOAD_BURST).max(1),
        }
    }
}

/// Read and parse an environment variable, falling back to `default`
fn parse_or<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "Invalid value, using default");
            default
        }),
        Err(_) => default,
    }
}
