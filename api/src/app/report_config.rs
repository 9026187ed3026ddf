//! Report ingestion and ranking configuration constants
//!
//! Defaults used when the corresponding environment variables are unset.

/// Default upload size limit for expense reports (5 MB)
pub const DEFAULT_MAX_REPORT_BYTES: usize = 5 * 1024 * 1024;

/// Slack on top of the report limit for multipart boundaries and form fields
pub const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Decimals between the ledger's smallest unit and the display unit (wei to ether)
pub const DEFAULT_CURRENCY_DECIMALS: u32 = 18;

/// Largest scale a `Decimal` can carry
pub const MAX_CURRENCY_DECIMALS: u32 = 28;

/// Sustained uploads per second per peer
pub const DEFAULT_UPLOAD_RATE_PER_SECOND: u64 = 2;

/// Upload burst size per peer
pub const DEFAULT_UPLOAD_BURST: u32 = 5;
