//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities and ports.

pub mod fundraiser_service;
pub mod ranking_service;
pub mod report_config;
pub mod report_service;

pub use fundraiser_service::{DonationRecord, FundraiserService};
pub use ranking_service::RankingService;
pub use report_service::{ReportService, ReportSubmission, UploadReceipt};
