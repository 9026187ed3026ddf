//! Ranking service
//!
//! Ranks public fundraisers (and their creators) by how much of the raised
//! amount their expense reports account for.

use std::sync::Arc;

use futures::future::join_all;

use crate::domain::entities::{
    aggregate_by_creator, compute_efficiency, rank_by_efficiency, CreatorRanking, ExpenseReport,
    Fundraiser, RankingEntry,
};
use crate::domain::ports::{FundraiserSource, ReportStore};
use crate::error::AppError;

/// Service for computing efficiency rankings
pub struct RankingService<FS, RS>
where
    FS: FundraiserSource + ?Sized,
    RS: ReportStore + ?Sized,
{
    fundraisers: Arc<FS>,
    reports: Arc<RS>,
    currency_decimals: u32,
}

impl<FS, RS> RankingService<FS, RS>
where
    FS: FundraiserSource + ?Sized,
    RS: ReportStore + ?Sized,
{
    pub fn new(fundraisers: Arc<FS>, reports: Arc<RS>, currency_decimals: u32) -> Self {
        Self {
            fundraisers,
            reports,
            currency_decimals,
        }
    }

    /// Rank qualifying fundraisers by descending efficiency
    ///
    /// A fundraiser qualifies when it is public, has raised a positive amount,
    /// and has a readable expense report. An empty result is not an error.
    pub async fn rank_fundraisers(&self) -> Result<Vec<RankingEntry>, AppError> {
        let fundraisers = self.fundraisers.list_fundraisers().await?;
        let ranked = rank_by_efficiency(self.qualifying_entries(&fundraisers).await);

        if ranked.is_empty() {
            tracing::info!(
                fundraisers = fundraisers.len(),
                "No qualifying fundraisers to rank"
            );
        }

        Ok(ranked)
    }

    /// Rank creators by the average efficiency of their qualifying fundraisers
    pub async fn rank_creators(&self) -> Result<Vec<CreatorRanking>, AppError> {
        let fundraisers = self.fundraisers.list_fundraisers().await?;
        let entries = self.qualifying_entries(&fundraisers).await;
        let rankings = aggregate_by_creator(&entries);

        if rankings.is_empty() {
            tracing::info!(
                fundraisers = fundraisers.len(),
                "No qualifying creators to rank"
            );
        }

        Ok(rankings)
    }

    /// Evaluate candidates concurrently. Output keeps ledger order.
    async fn qualifying_entries(&self, fundraisers: &[Fundraiser]) -> Vec<RankingEntry> {
        let candidates = fundraisers
            .iter()
            .filter(|f| f.is_public() && f.amount_raised > 0);

        join_all(candidates.map(|f| self.evaluate(f)))
            .await
            .into_iter()
            .flatten()
            .collect()
    }

    /// Per-fundraiser failures are logged and skipped, never propagated
    async fn evaluate(&self, fundraiser: &Fundraiser) -> Option<RankingEntry> {
        let Some(received) = fundraiser.raised_in_display_units(self.currency_decimals) else {
            tracing::warn!(
                fundraiser_id = %fundraiser.id,
                amount_raised = %fundraiser.amount_raised,
                "Amount raised not representable, skipping"
            );
            return None;
        };

        let contents = match self.reports.load(&fundraiser.id).await {
            Ok(Some(contents)) => contents,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(fundraiser_id = %fundraiser.id, error = %e, "Failed to load expense report, skipping");
                return None;
            }
        };

        let report = match ExpenseReport::parse(&contents) {
            Ok(report) => report,
            Err(e) => {
                tracing::warn!(fundraiser_id = %fundraiser.id, error = %e, "Expense report unreadable, skipping");
                return None;
            }
        };

        if report.invalid_fields > 0 {
            tracing::debug!(
                fundraiser_id = %fundraiser.id,
                invalid_fields = report.invalid_fields,
                "Non-numeric expense fields counted as zero"
            );
        }

        let Some(total_spent) = report.total_spent() else {
            tracing::warn!(fundraiser_id = %fundraiser.id, "Expense report total overflows, skipping");
            return None;
        };
        let efficiency = compute_efficiency(total_spent, received)?;

        Some(RankingEntry {
            fundraiser_id: fundraiser.id.clone(),
            name: fundraiser.name.clone(),
            creator: fundraiser.owner.clone(),
            total_received: received,
            total_spent,
            efficiency,
        })
    }
}
