//! Core record types, TVA arithmetic, validation, and numbering.
//!
//! This module provides the foundational types for Tunisian sales
//! invoicing: factures, achats, clients, and the business profile,
//! with checked construction and fail-fast validation.

mod builder;
mod error;
pub mod money;
mod numbering;
mod status;
mod types;
mod validation;

pub use builder::*;
pub use error::*;
pub use money::{format_dt, is_standard_rate, round_dt, total_ttc, vat_amount};
pub use numbering::*;
pub use status::*;
pub use types::*;
pub use validation::*;
