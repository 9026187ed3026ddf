//! Fundraiser domain entity
//!
//! A campaign record whose authoritative copy lives on the ledger.
//! The service only ever reads fundraisers.

use std::sync::OnceLock;

use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

fn fundraiser_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]{1,128}$").expect("valid regex"))
}

fn address_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^0x[0-9a-fA-F]{40}$").expect("valid regex"))
}

/// Unique identifier for a fundraiser
///
/// Restricted to a filename-safe alphabet because report files are named after it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FundraiserId(String);

impl FundraiserId {
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        if fundraiser_id_pattern().is_match(trimmed) {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(DomainError::Validation(format!(
                "Invalid fundraiser id: {:?}",
                raw
            )))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FundraiserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An account address on the ledger, stored lowercase
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Address(String);

impl Address {
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        if address_pattern().is_match(trimmed) {
            Ok(Self(trimmed.to_ascii_lowercase()))
        } else {
            Err(DomainError::Validation(format!(
                "Invalid address format: {:?}",
                raw
            )))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether a fundraiser is listed publicly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Visibility::Public => write!(f, "public"),
            Visibility::Private => write!(f, "private"),
        }
    }
}

/// A fundraiser as reported by the ledger
#[derive(Debug, Clone, Serialize)]
pub struct Fundraiser {
    pub id: FundraiserId,
    pub name: String,
    pub description: String,
    /// Funding goal in the ledger's smallest currency unit
    pub goal: u128,
    /// Amount raised so far in the ledger's smallest currency unit
    pub amount_raised: u128,
    pub owner: Address,
    pub visibility: Visibility,
    pub category: Option<String>,
    pub people_affected: Option<u64>,
}

impl Fundraiser {
    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }

    pub fn is_owned_by(&self, address: &Address) -> bool {
        &self.owner == address
    }

    /// Amount raised in display units, or `None` if it cannot be represented
    pub fn raised_in_display_units(&self, decimals: u32) -> Option<Decimal> {
        to_display_units(self.amount_raised, decimals)
    }
}

/// Scale an integer amount in the smallest unit down by `decimals` places
pub fn to_display_units(amount: u128, decimals: u32) -> Option<Decimal> {
    let amount = i128::try_from(amount).ok()?;
    Decimal::try_from_i128_with_scale(amount, decimals)
        .ok()
        .map(|d| d.normalize())
}
