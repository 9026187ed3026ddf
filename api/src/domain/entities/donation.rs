//! Donation domain entity

use serde::Serialize;

use super::{Address, FundraiserId};

/// A donation event recorded on the ledger
#[derive(Debug, Clone, Serialize)]
pub struct Donation {
    pub tx_hash: String,
    pub donor: Address,
    pub fundraiser_id: FundraiserId,
    /// Amount in the ledger's smallest currency unit
    pub amount: u128,
    pub block_number: u64,
}
