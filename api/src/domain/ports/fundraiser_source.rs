//! Fundraiser source port trait
//!
//! The ledger holds the authoritative fundraiser and donation records.

use async_trait::async_trait;

use crate::domain::entities::{Address, Donation, Fundraiser, FundraiserId};
use crate::error::LedgerError;

/// Read-only access to fundraisers and donations on the ledger
#[async_trait]
pub trait FundraiserSource: Send + Sync {
    /// List every fundraiser in ledger order (one atomic read)
    async fn list_fundraisers(&self) -> Result<Vec<Fundraiser>, LedgerError>;

    /// Find a single fundraiser by ID
    async fn find_fundraiser(&self, id: &FundraiserId) -> Result<Option<Fundraiser>, LedgerError>;

    /// List fundraisers created by an owner
    async fn list_by_owner(&self, owner: &Address) -> Result<Vec<Fundraiser>, LedgerError>;

    /// List donations made by a donor
    async fn donations_by_donor(&self, donor: &Address) -> Result<Vec<Donation>, LedgerError>;
}
