//! Ranking domain entities
//!
//! Rankings are derived on every request and never persisted.

use std::collections::HashMap;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use super::{Address, FundraiserId};

/// Decimal places kept on efficiency ratios
pub const EFFICIENCY_DECIMAL_PLACES: u32 = 2;

/// Per-fundraiser efficiency ranking entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingEntry {
    pub fundraiser_id: FundraiserId,
    pub name: String,
    pub creator: Address,
    pub total_received: Decimal,
    pub total_spent: Decimal,
    pub efficiency: Decimal,
}

/// Per-creator (organization) ranking entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatorRanking {
    pub creator: Address,
    pub average_efficiency: Decimal,
    pub fundraiser_count: usize,
}

/// Spent as a percentage of received, rounded to two places.
///
/// `None` when nothing was received.
pub fn compute_efficiency(total_spent: Decimal, total_received: Decimal) -> Option<Decimal> {
    if total_received <= Decimal::ZERO {
        return None;
    }
    let ratio = total_spent.checked_div(total_received)?;
    let percent = ratio.checked_mul(Decimal::ONE_HUNDRED)?;
    Some(round_efficiency(percent))
}

/// Half-up rounding to the published precision
pub fn round_efficiency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(
        EFFICIENCY_DECIMAL_PLACES,
        RoundingStrategy::MidpointAwayFromZero,
    )
}

/// Sort descending by efficiency. Ties keep their input order.
pub fn rank_by_efficiency(mut entries: Vec<RankingEntry>) -> Vec<RankingEntry> {
    entries.sort_by(|a, b| b.efficiency.cmp(&a.efficiency));
    entries
}

/// Average efficiency per creator, sorted descending.
///
/// Creators tie-break on the order their first fundraiser appears in `entries`.
pub fn aggregate_by_creator(entries: &[RankingEntry]) -> Vec<CreatorRanking> {
    let mut order: Vec<Address> = Vec::new();
    let mut efficiencies: HashMap<Address, Vec<Decimal>> = HashMap::new();

    for entry in entries {
        efficiencies
            .entry(entry.creator.clone())
            .or_insert_with(|| {
                order.push(entry.creator.clone());
                Vec::new()
            })
            .push(entry.efficiency);
    }

    let mut rankings: Vec<CreatorRanking> = order
        .into_iter()
        .filter_map(|creator| {
            let values = efficiencies.remove(&creator)?;
            let Some(average) = mean(&values) else {
                tracing::warn!(creator = %creator, "Average efficiency not representable, skipping");
                return None;
            };
            Some(CreatorRanking {
                creator,
                average_efficiency: round_efficiency(average),
                fundraiser_count: values.len(),
            })
        })
        .collect();

    rankings.sort_by(|a, b| b.average_efficiency.cmp(&a.average_efficiency));
    rankings
}

/// Arithmetic mean, `None` for no values or when it cannot be represented.
///
/// Sums directly when that fits, otherwise sums the pre-divided values.
fn mean(values: &[Decimal]) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }
    let count = Decimal::from(values.len());

    let direct = values
        .iter()
        .try_fold(Decimal::ZERO, |sum, value| sum.checked_add(*value))
        .and_then(|sum| sum.checked_div(count));
    if direct.is_some() {
        return direct;
    }

    values.iter().try_fold(Decimal::ZERO, |sum, value| {
        sum.checked_add(value.checked_div(count)?)
    })
}
