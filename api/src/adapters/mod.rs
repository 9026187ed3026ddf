//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod filesystem;
pub mod ledger;

pub use filesystem::FsReportStore;
pub use ledger::LedgerClient;
