//! # facture-tn
//!
//! Invoicing and bookkeeping core for Tunisian small businesses: clients,
//! factures de vente, achats/dépenses, TVA figures, déclaration fiscale,
//! and a printable invoice document.
//!
//! All monetary values use [`rust_decimal::Decimal`], never floating point.
//! Amounts carry three decimal places (the dinar subdivides into 1000
//! millimes) and are rounded half-up at every site that persists money.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use facture_tn::core::*;
//! use rust_decimal_macros::dec;
//!
//! let invoice = InvoiceBuilder::new("FACT-202406-0001", NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
//!     .client("Société Industrielle du Sahel")
//!     .client_matricule("1234567/A/M/000")
//!     .due_date(NaiveDate::from_ymd_opt(2024, 7, 15).unwrap())
//!     .add_item("Transport marchandises Tunis-Sfax", 2, dec!(100), dec!(19))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(invoice.total_ht, dec!(200.000));
//! assert_eq!(invoice.tva_amount, dec!(38.000));
//! assert_eq!(invoice.total_ttc, dec!(238.000));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Record types, TVA arithmetic, invoice builder + validation, numbering |
//! | `declaration` | Déclaration fiscale aggregation, period filters, dashboard stats |
//! | `export` | CSV export of invoices and purchases |
//! | `pdf` | Printable invoice document (printpdf) |
//! | `store` | JSON persistence gateway |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "declaration")]
pub mod declaration;

#[cfg(feature = "export")]
pub mod export;

#[cfg(feature = "pdf")]
pub mod pdf;

#[cfg(feature = "store")]
pub mod store;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
