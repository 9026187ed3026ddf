//! Report store port trait
//!
//! Holds at most one expense report per fundraiser.

use async_trait::async_trait;

use crate::domain::entities::FundraiserId;
use crate::error::ReportError;

/// Persistence for raw expense report files
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Store a report, replacing any previous one for the same fundraiser.
    ///
    /// Not atomic: a concurrent reader may observe a partially written report.
    async fn save(&self, id: &FundraiserId, contents: &[u8]) -> Result<(), ReportError>;

    /// Load the current report, or `None` if none was ever uploaded
    async fn load(&self, id: &FundraiserId) -> Result<Option<Vec<u8>>, ReportError>;
}
