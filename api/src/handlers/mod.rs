//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod fundraisers;
pub mod rankings;
pub mod reports;

pub use fundraisers::{get_ngo_profile, get_transactions, list_fundraisers};
pub use rankings::{get_creator_rankings, get_public_rankings};
pub use reports::upload_expense_report;
