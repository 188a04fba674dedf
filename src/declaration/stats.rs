//! Dashboard figures derived from the invoice and purchase collections.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Period;
use crate::core::{Invoice, Purchase};

/// Revenue, expenses, and profit for one calendar month.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyStats {
    /// Σ invoice totals (TTC) issued in the month.
    pub revenue: Decimal,
    /// Σ purchase totals (TTC) dated in the month.
    pub expenses: Decimal,
    /// `revenue - expenses`.
    pub profit: Decimal,
}

/// Monthly revenue/expense/profit figures. Invalid year/month yields the
/// all-zero result, matching an empty period.
pub fn monthly_stats(
    invoices: &[Invoice],
    purchases: &[Purchase],
    year: i32,
    month: u32,
) -> MonthlyStats {
    let Some(period) = Period::month(year, month) else {
        return MonthlyStats::default();
    };

    let revenue: Decimal = invoices
        .iter()
        .filter(|inv| period.contains(inv.date))
        .map(|inv| inv.total_ttc)
        .sum();
    let expenses: Decimal = purchases
        .iter()
        .filter(|p| period.contains(p.date))
        .map(|p| p.total_ttc)
        .sum();

    MonthlyStats {
        revenue,
        expenses,
        profit: revenue - expenses,
    }
}

/// Total invoiced amount (TTC) per client, highest first.
/// Ties break alphabetically so the ordering is deterministic.
pub fn revenue_by_client(invoices: &[Invoice]) -> Vec<(String, Decimal)> {
    let mut by_client: BTreeMap<&str, Decimal> = BTreeMap::new();
    for inv in invoices {
        *by_client.entry(inv.client.as_str()).or_insert(Decimal::ZERO) += inv.total_ttc;
    }

    let mut ranked: Vec<(String, Decimal)> = by_client
        .into_iter()
        .map(|(name, total)| (name.to_owned(), total))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked
}
