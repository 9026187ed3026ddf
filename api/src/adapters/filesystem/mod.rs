//! Filesystem adapter
//!
//! Stores expense reports as files in a flat directory.

pub mod report_store;

pub use report_store::FsReportStore;
