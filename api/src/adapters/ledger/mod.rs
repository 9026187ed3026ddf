//! Ledger adapter
//!
//! Reads fundraisers and donations from the ledger gateway's JSON API.

pub mod client;

pub use client::LedgerClient;
