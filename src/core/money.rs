//! TVA arithmetic and dinar rounding.
//!
//! The Tunisian dinar subdivides into 1000 millimes, so every persisted
//! amount carries three decimal places. One rounding rule applies at every
//! call site: half-up to 3 decimals ([`round_dt`]).

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// TVA rates in common use: exonéré, réduit (7%), intermédiaire (13%),
/// standard (19%). Advisory only; any non-negative rate is accepted.
pub const STANDARD_RATES: [Decimal; 4] = [dec!(0), dec!(7), dec!(13), dec!(19)];

/// Round a Decimal to 3 decimal places using half-up (commercial rounding).
pub fn round_dt(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero)
}

/// TVA due on a pre-tax amount: `round_dt(amount_ht * rate / 100)`.
///
/// Both arguments must be non-negative; callers validate before invoking
/// (negative monetary input is rejected at construction, never clamped here).
pub fn vat_amount(amount_ht: Decimal, rate: Decimal) -> Decimal {
    round_dt(amount_ht * rate / dec!(100))
}

/// Tax-inclusive total: `amount_ht + vat_amount(amount_ht, rate)`.
///
/// Defined as the sum rather than an independently rounded
/// `amount_ht * (1 + rate/100)` so that `ttc == ht + tva` holds exactly.
pub fn total_ttc(amount_ht: Decimal, rate: Decimal) -> Decimal {
    amount_ht + vat_amount(amount_ht, rate)
}

/// Whether a rate is one of the standard Tunisian TVA rates.
pub fn is_standard_rate(rate: Decimal) -> bool {
    STANDARD_RATES.contains(&rate)
}

/// Format an amount for display: `"1 234,500 DT"`.
///
/// Space digit grouping, comma decimal separator, always three decimals.
/// A printed figure is always the persisted figure.
pub fn format_dt(value: Decimal) -> String {
    let rounded = round_dt(value);
    let negative = rounded.is_sign_negative();
    // Integer millimes; round_dt guarantees the scale fits.
    let millimes = (rounded.abs() * dec!(1000))
        .round()
        .to_i128()
        .unwrap_or(0);
    let whole = millimes / 1000;
    let frac = millimes % 1000;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}{grouped},{frac:03} DT")
}
