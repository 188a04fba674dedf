//! Déclaration fiscale: TVA collected vs deductible, and period filtering.
//!
//! The declaration is a computed view over the invoice and purchase
//! collections; it has no lifecycle of its own and is never stored.

mod stats;

pub use stats::*;

use std::borrow::Borrow;

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{Invoice, Purchase};

/// Periodic TVA filing summary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxDeclaration {
    /// Σ TVA on sales invoices.
    pub tva_collected: Decimal,
    /// Σ TVA on purchases.
    pub tva_deductible: Decimal,
    /// `max(0, collected - deductible)`, never negative; an excess of
    /// deductible TVA is a carried credit, not a refund line.
    pub tva_payable: Decimal,
    /// Σ invoice totals, tax inclusive.
    pub total_revenue: Decimal,
    /// Σ purchase totals, tax inclusive.
    pub total_purchases: Decimal,
    /// `total_revenue - total_purchases`.
    pub net_profit: Decimal,
}

/// Reduce invoice and purchase collections into a declaration.
///
/// Pure: inputs are borrowed and never mutated; empty inputs yield the
/// all-zero declaration. Period restriction is a caller-side pre-step;
/// see [`invoices_in_period`] / [`purchases_in_period`].
pub fn compute_declaration<I, P>(invoices: &[I], purchases: &[P]) -> TaxDeclaration
where
    I: Borrow<Invoice>,
    P: Borrow<Purchase>,
{
    let tva_collected: Decimal = invoices.iter().map(|i| i.borrow().tva_amount).sum();
    let tva_deductible: Decimal = purchases.iter().map(|p| p.borrow().tva_amount).sum();
    let total_revenue: Decimal = invoices.iter().map(|i| i.borrow().total_ttc).sum();
    let total_purchases: Decimal = purchases.iter().map(|p| p.borrow().total_ttc).sum();

    TaxDeclaration {
        tva_collected,
        tva_deductible,
        tva_payable: (tva_collected - tva_deductible).max(Decimal::ZERO),
        total_revenue,
        total_purchases,
        net_profit: total_revenue - total_purchases,
    }
}

/// An inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Period {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// The calendar month containing `date`.
    pub fn month_of(date: NaiveDate) -> Self {
        let start = date - chrono::Duration::days(i64::from(date.day()) - 1);
        let end = start + Months::new(1) - chrono::Duration::days(1);
        Self { start, end }
    }

    /// A calendar month. Returns `None` for an invalid year/month.
    pub fn month(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self::month_of)
    }

    /// A calendar year.
    pub fn year(year: i32) -> Option<Self> {
        let start = NaiveDate::from_ymd_opt(year, 1, 1)?;
        let end = NaiveDate::from_ymd_opt(year, 12, 31)?;
        Some(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Invoices issued within the period.
pub fn invoices_in_period(invoices: &[Invoice], period: Period) -> Vec<&Invoice> {
    invoices
        .iter()
        .filter(|inv| period.contains(inv.date))
        .collect()
}

/// Purchases dated within the period.
pub fn purchases_in_period(purchases: &[Purchase], period: Period) -> Vec<&Purchase> {
    purchases
        .iter()
        .filter(|p| period.contains(p.date))
        .collect()
}

/// Declaration restricted to one period.
pub fn declaration_for_period(
    invoices: &[Invoice],
    purchases: &[Purchase],
    period: Period,
) -> TaxDeclaration {
    compute_declaration(
        &invoices_in_period(invoices, period),
        &purchases_in_period(purchases, period),
    )
}
