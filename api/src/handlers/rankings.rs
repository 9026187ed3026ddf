//! Ranking handlers
//!
//! Efficiency rankings per fundraiser and per creator (organization).

use axum::{extract::State, Json};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::domain::entities::{CreatorRanking, RankingEntry};
use crate::error::AppError;
use crate::AppState;

/// One row of the per-fundraiser ranking
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FundraiserRankingResponse {
    pub name: String,
    pub total_received: String,
    pub total_spent: String,
    pub efficiency: String,
}

impl From<RankingEntry> for FundraiserRankingResponse {
    fn from(entry: RankingEntry) -> Self {
        Self {
            name: entry.name,
            total_received: two_places(entry.total_received),
            total_spent: two_places(entry.total_spent),
            efficiency: two_places(entry.efficiency),
        }
    }
}

/// One row of the per-creator ranking
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatorRankingResponse {
    pub creator: String,
    pub average_efficiency: f64,
    pub fundraiser_count: usize,
}

impl From<CreatorRanking> for CreatorRankingResponse {
    fn from(ranking: CreatorRanking) -> Self {
        Self {
            creator: ranking.creator.to_string(),
            average_efficiency: ranking.average_efficiency.to_f64().unwrap_or_default(),
            fundraiser_count: ranking.fundraiser_count,
        }
    }
}

/// Fixed two-place decimal string, rounding half up
fn two_places(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

/// GET /api/public-rankings
///
/// Public fundraisers with an expense report, most efficient first.
pub async fn get_public_rankings(
    State(state): State<AppState>,
) -> Result<Json<Vec<FundraiserRankingResponse>>, AppError> {
    let ranking = state.ranking_service.rank_fundraisers().await?;
    Ok(Json(
        ranking
            .into_iter()
            .map(FundraiserRankingResponse::from)
            .collect(),
    ))
}

/// GET /api/rankings
///
/// Creators ranked by the average efficiency of their fundraisers.
pub async fn get_creator_rankings(
    State(state): State<AppState>,
) -> Result<Json<Vec<CreatorRankingResponse>>, AppError> {
    let rankings = state.ranking_service.rank_creators().await?;
    Ok(Json(
        rankings
            .into_iter()
            .map(CreatorRankingResponse::from)
            .collect(),
    ))
}
