//! Domain entities
//!
//! Pure domain models representing core business concepts.

pub mod donation;
pub mod expense_report;
pub mod fundraiser;
pub mod ranking;

pub use donation::Donation;
pub use expense_report::{missing_columns, ExpenseReport, EXPECTED_COLUMNS};
pub use fundraiser::{to_display_units, Address, Fundraiser, FundraiserId, Visibility};
pub use ranking::{
    aggregate_by_creator, compute_efficiency, rank_by_efficiency, CreatorRanking, RankingEntry,
};
