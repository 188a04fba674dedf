//! Deterministic layout model for the printable invoice.
//!
//! [`InvoiceLayout::compose`] turns an invoice + business profile into a
//! typed page/block model with pagination already decided. The painter in
//! the parent module only walks this model, so identical input always
//! yields the identical structure (same rows, same totals text, same page
//! count) regardless of the binary PDF encoding.

use crate::core::{BusinessProfile, Invoice, money};

/// Items-table rows that fit on the first page (header blocks above).
pub(crate) const ROWS_FIRST_PAGE: usize = 30;
/// Items-table rows that fit on a continuation page.
pub(crate) const ROWS_CONT_PAGE: usize = 40;
/// Row-units the totals/payment/notes trailer needs below the table.
pub(crate) const TRAILER_ROWS: usize = 9;

/// Descriptions are clipped to the column, as on the original document.
const MAX_DESC_CHARS: usize = 50;

/// Fixed column headers of the items table.
pub const TABLE_COLUMNS: [&str; 5] = ["Description", "Qté", "Prix unitaire", "TVA %", "Total HT"];

/// One row of the items table, formatted for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub description: String,
    pub quantity: String,
    pub unit_price: String,
    pub tva_rate: String,
    pub total_ht: String,
    /// Alternating band flag (first row unshaded).
    pub shaded: bool,
}

/// The emphasized totals block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TotalsBlock {
    pub total_ht: String,
    pub tva_amount: String,
    pub total_ttc: String,
}

/// One page: its slice of the items table and its footer line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub rows: Vec<TableRow>,
    /// `"Page n/m"`.
    pub footer: String,
}

/// The complete composed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceLayout {
    /// Document title.
    pub title: String,
    /// `"N° {numero}"`.
    pub numero: String,
    /// Issuing company block, line by line.
    pub company: Vec<String>,
    /// Client block, line by line.
    pub client: Vec<String>,
    /// Issue/due date line pair.
    pub dates: (String, String),
    pub pages: Vec<Page>,
    pub totals: TotalsBlock,
    /// Payment information block (RIB).
    pub payment: Vec<String>,
    pub notes: Option<String>,
}

impl InvoiceLayout {
    /// Compose the document. Pure: no clock, no I/O.
    pub fn compose(invoice: &Invoice, profile: &BusinessProfile) -> Self {
        let mut company = vec![
            profile.name.clone(),
            format!("Matricule Fiscal: {}", profile.matricule_fiscal),
            profile.address.clone(),
        ];
        if !profile.phone.is_empty() || !profile.email.is_empty() {
            company.push(format!("Tél: {} | Email: {}", profile.phone, profile.email));
        }

        let mut client = vec![
            format!("Nom: {}", invoice.client),
            format!("Matricule: {}", invoice.client_matricule),
        ];
        if let Some(address) = &invoice.client_address {
            client.push(format!("Adresse: {address}"));
        }

        let dates = (
            format!("Date de facturation: {}", invoice.date.format("%d/%m/%Y")),
            format!("Date d'échéance: {}", invoice.due_date.format("%d/%m/%Y")),
        );

        let rows: Vec<TableRow> = invoice
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| TableRow {
                description: clip(&item.description, MAX_DESC_CHARS),
                quantity: item.quantity.to_string(),
                unit_price: money::format_dt(item.unit_price),
                tva_rate: format!("{}%", item.tva_rate),
                total_ht: money::format_dt(item.total_ht),
                shaded: i % 2 == 1,
            })
            .collect();

        let totals = TotalsBlock {
            total_ht: money::format_dt(invoice.total_ht),
            tva_amount: money::format_dt(invoice.tva_amount),
            total_ttc: money::format_dt(invoice.total_ttc),
        };

        let payment = vec![
            "INFORMATIONS DE PAIEMENT:".to_owned(),
            format!("RIB: {}", profile.rib),
        ];

        let notes = invoice
            .notes
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .map(|n| format!("Notes: {n}"));

        Self {
            title: "FACTURE".to_owned(),
            numero: format!("N° {}", invoice.numero),
            company,
            client,
            dates,
            pages: paginate(rows),
            totals,
            payment,
            notes,
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// Split rows over pages and stamp the footers. The trailer blocks must
/// fit below the table on the last page, otherwise a further page opens.
fn paginate(rows: Vec<TableRow>) -> Vec<Page> {
    let mut pages: Vec<Vec<TableRow>> = Vec::new();
    let mut rest = rows;

    loop {
        let capacity = if pages.is_empty() {
            ROWS_FIRST_PAGE
        } else {
            ROWS_CONT_PAGE
        };
        if rest.len() <= capacity {
            pages.push(rest);
            break;
        }
        let tail = rest.split_off(capacity);
        pages.push(rest);
        rest = tail;
    }

    let last_capacity = if pages.len() == 1 {
        ROWS_FIRST_PAGE
    } else {
        ROWS_CONT_PAGE
    };
    let last_len = pages.last().map(Vec::len).unwrap_or(0);
    if last_capacity - last_len < TRAILER_ROWS {
        pages.push(Vec::new());
    }

    let total = pages.len();
    pages
        .into_iter()
        .enumerate()
        .map(|(i, rows)| Page {
            rows,
            footer: format!("Page {}/{}", i + 1, total),
        })
        .collect()
}

fn clip(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
