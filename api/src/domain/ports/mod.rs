//! Domain ports (traits)
//!
//! Port traits define interfaces that the domain layer requires.
//! Adapters provide concrete implementations of these traits.

pub mod fundraiser_source;
pub mod report_store;

pub use fundraiser_source::FundraiserSource;
pub use report_store::ReportStore;
