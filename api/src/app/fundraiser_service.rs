//! Fundraiser service
//!
//! Read-only views over the ledger: fundraiser listings, an owner's
//! fundraisers, and a donor's transaction history.

use std::collections::HashMap;
use std::sync::Arc;

use rust_decimal::Decimal;

use crate::domain::entities::{to_display_units, Address, Donation, Fundraiser, FundraiserId};
use crate::domain::ports::FundraiserSource;
use crate::error::AppError;

/// A donation joined with the fundraiser it went to
#[derive(Debug, Clone)]
pub struct DonationRecord {
    pub donation: Donation,
    /// Amount in display units; `None` if not representable
    pub amount: Option<Decimal>,
    /// `None` if the ledger no longer lists the fundraiser
    pub fundraiser: Option<Fundraiser>,
}

/// Service for browsing fundraisers and donations
pub struct FundraiserService<FS>
where
    FS: FundraiserSource + ?Sized,
{
    fundraisers: Arc<FS>,
    currency_decimals: u32,
}

impl<FS> FundraiserService<FS>
where
    FS: FundraiserSource + ?Sized,
{
    pub fn new(fundraisers: Arc<FS>, currency_decimals: u32) -> Self {
        Self {
            fundraisers,
            currency_decimals,
        }
    }

    /// All fundraisers, in ledger order
    pub async fn list_all(&self) -> Result<Vec<Fundraiser>, AppError> {
        Ok(self.fundraisers.list_fundraisers().await?)
    }

    /// Fundraisers created by `owner`
    pub async fn list_by_owner(&self, owner: &str) -> Result<Vec<Fundraiser>, AppError> {
        let owner = Address::parse(owner)?;
        Ok(self.fundraisers.list_by_owner(&owner).await?)
    }

    /// Donations made by `donor`, each joined with its fundraiser
    pub async fn transactions_for(&self, donor: &str) -> Result<Vec<DonationRecord>, AppError> {
        let donor = Address::parse(donor)?;
        let donations = self.fundraisers.donations_by_donor(&donor).await?;
        if donations.is_empty() {
            return Ok(Vec::new());
        }

        let by_id: HashMap<FundraiserId, Fundraiser> = self
            .fundraisers
            .list_fundraisers()
            .await?
            .into_iter()
            .map(|f| (f.id.clone(), f))
            .collect();

        Ok(donations
            .into_iter()
            .map(|donation| {
                let amount = to_display_units(donation.amount, self.currency_decimals);
                let fundraiser = by_id.get(&donation.fundraiser_id).cloned();
                if fundraiser.is_none() {
                    tracing::debug!(
                        fundraiser_id = %donation.fundraiser_id,
                        tx_hash = %donation.tx_hash,
                        "Donation references unlisted fundraiser"
                    );
                }
                DonationRecord {
                    donation,
                    amount,
                    fundraiser,
                }
            })
            .collect())
    }
}
