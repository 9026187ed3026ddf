//! Fundraiser handlers
//!
//! Read-only views of ledger data: listings, an NGO's own fundraisers,
//! and a donor's transaction history.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::app::DonationRecord;
use crate::domain::entities::Fundraiser;
use crate::error::AppError;
use crate::AppState;

/// Fundraiser as shown to clients. Amounts are in the ledger's smallest unit.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FundraiserResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub goal: String,
    pub amount_raised: String,
    pub owner: String,
    pub fundraiser_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub people_affected: Option<u64>,
}

impl From<Fundraiser> for FundraiserResponse {
    fn from(f: Fundraiser) -> Self {
        Self {
            id: f.id.to_string(),
            name: f.name,
            description: f.description,
            goal: f.goal.to_string(),
            amount_raised: f.amount_raised.to_string(),
            owner: f.owner.to_string(),
            fundraiser_type: f.visibility.to_string(),
            category: f.category,
            people_affected: f.people_affected,
        }
    }
}

/// Response for an NGO's profile page
#[derive(Debug, Serialize)]
pub struct NgoProfileResponse {
    pub fundraisers: Vec<FundraiserResponse>,
}

/// Fundraiser summary attached to a transaction
#[derive(Debug, Serialize)]
pub struct TransactionFundraiser {
    pub id: String,
    pub name: String,
    pub owner: String,
}

/// A donation in a donor's history. `amount` is in display units.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    pub tx_hash: String,
    pub amount: Option<String>,
    pub block_number: u64,
    pub fundraiser: Option<TransactionFundraiser>,
}

impl From<DonationRecord> for TransactionResponse {
    fn from(record: DonationRecord) -> Self {
        Self {
            tx_hash: record.donation.tx_hash,
            amount: record.amount.map(|a| a.normalize().to_string()),
            block_number: record.donation.block_number,
            fundraiser: record.fundraiser.map(|f| TransactionFundraiser {
                id: f.id.to_string(),
                name: f.name,
                owner: f.owner.to_string(),
            }),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TransactionsResponse {
    pub transactions: Vec<TransactionResponse>,
}

/// GET /fundraisers
pub async fn list_fundraisers(
    State(state): State<AppState>,
) -> Result<Json<Vec<FundraiserResponse>>, AppError> {
    let fundraisers = state.fundraiser_service.list_all().await?;
    Ok(Json(
        fundraisers
            .into_iter()
            .map(FundraiserResponse::from)
            .collect(),
    ))
}

/// GET /api/ngo-profile/:address
///
/// Fundraisers created by the given address.
pub async fn get_ngo_profile(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<NgoProfileResponse>, AppError> {
    let fundraisers = state.fundraiser_service.list_by_owner(&address).await?;
    Ok(Json(NgoProfileResponse {
        fundraisers: fundraisers
            .into_iter()
            .map(FundraiserResponse::from)
            .collect(),
    }))
}

/// GET /api/transactions/:address
///
/// Donations made by the given address.
pub async fn get_transactions(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<TransactionsResponse>, AppError> {
    let records = state.fundraiser_service.transactions_for(&address).await?;
    Ok(Json(TransactionsResponse {
        transactions: records
            .into_iter()
            .map(TransactionResponse::from)
            .collect(),
    }))
}
