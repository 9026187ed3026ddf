//! Mock implementations of port traits
//!
//! These are in-memory implementations that can be configured for testing.
//! They store data in memory and allow tests to verify behavior.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::domain::entities::{Address, Donation, Fundraiser, FundraiserId};
use crate::domain::ports::{FundraiserSource, ReportStore};
use crate::error::{LedgerError, ReportError};

// ============================================================================
// In-Memory Fundraiser Source
// ============================================================================

#[derive(Default)]
pub struct InMemoryFundraiserSource {
    fundraisers: Arc<RwLock<Vec<Fundraiser>>>,
    donations: Arc<RwLock<Vec<Donation>>>,
    should_fail: bool,
}

impl InMemoryFundraiserSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// A source whose every call fails as if the ledger were unreachable
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    /// Pre-populate with a fundraiser for testing (ledger order = insertion order)
    pub fn with_fundraiser(self, fundraiser: Fundraiser) -> Self {
        self.fundraisers.write().unwrap().push(fundraiser);
        self
    }

    pub fn with_donation(self, donation: Donation) -> Self {
        self.donations.write().unwrap().push(donation);
        self
    }

    fn check(&self) -> Result<(), LedgerError> {
        if self.should_fail {
            Err(LedgerError::Api {
                status: 503,
                message: "ledger unavailable".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl FundraiserSource for InMemoryFundraiserSource {
    async fn list_fundraisers(&self) -> Result<Vec<Fundraiser>, LedgerError> {
        self.check()?;
        Ok(self.fundraisers.read().unwrap().clone())
    }

    async fn find_fundraiser(&self, id: &FundraiserId) -> Result<Option<Fundraiser>, LedgerError> {
        self.check()?;
        Ok(self
            .fundraisers
            .read()
            .unwrap()
            .iter()
            .find(|f| &f.id == id)
            .cloned())
    }

    async fn list_by_owner(&self, owner: &Address) -> Result<Vec<Fundraiser>, LedgerError> {
        self.check()?;
        Ok(self
            .fundraisers
            .read()
            .unwrap()
            .iter()
            .filter(|f| f.is_owned_by(owner))
            .cloned()
            .collect())
    }

    async fn donations_by_donor(&self, donor: &Address) -> Result<Vec<Donation>, LedgerError> {
        self.check()?;
        Ok(self
            .donations
            .read()
            .unwrap()
            .iter()
            .filter(|d| &d.donor == donor)
            .cloned()
            .collect())
    }
}

// ============================================================================
// In-Memory Report Store
// ============================================================================

#[derive(Default)]
pub struct InMemoryReportStore {
    reports: Arc<RwLock<HashMap<FundraiserId, Vec<u8>>>>,
    failing: Arc<RwLock<HashSet<FundraiserId>>>,
}

impl InMemoryReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a report for testing
    pub fn with_report(self, id: &str, contents: &str) -> Self {
        self.with_raw_report(id, contents.as_bytes().to_vec())
    }

    pub fn with_raw_report(self, id: &str, contents: Vec<u8>) -> Self {
        self.reports
            .write()
            .unwrap()
            .insert(FundraiserId::parse(id).unwrap(), contents);
        self
    }

    /// Make every load and save for `id` fail with an I/O error
    pub fn failing_for(self, id: &str) -> Self {
        self.failing
            .write()
            .unwrap()
            .insert(FundraiserId::parse(id).unwrap());
        self
    }

    fn check(&self, id: &FundraiserId) -> Result<(), ReportError> {
        if self.failing.read().unwrap().contains(id) {
            Err(ReportError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                format!("report {} is not accessible", id),
            )))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ReportStore for InMemoryReportStore {
    async fn save(&self, id: &FundraiserId, contents: &[u8]) -> Result<(), ReportError> {
        self.check(id)?;
        self.reports
            .write()
            .unwrap()
            .insert(id.clone(), contents.to_vec());
        Ok(())
    }

    async fn load(&self, id: &FundraiserId) -> Result<Option<Vec<u8>>, ReportError> {
        self.check(id)?;
        Ok(self.reports.read().unwrap().get(id).cloned())
    }
}
