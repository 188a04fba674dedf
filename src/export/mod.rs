//! CSV export of the invoice and purchase registers.
//!
//! Semicolon separators with comma decimal marks (the convention French
//! locale spreadsheets expect), one header line, one row per record.

use rust_decimal::Decimal;

use crate::core::{Invoice, Purchase, money};

/// Render the invoice register as CSV.
///
/// Columns: Numéro;Client;Matricule;Date;Échéance;Total HT;TVA;Total TTC;Statut
pub fn invoices_csv(invoices: &[Invoice]) -> String {
    let mut out =
        String::from("Numéro;Client;Matricule;Date;Échéance;Total HT;TVA;Total TTC;Statut\r\n");
    for inv in invoices {
        csv_field(&mut out, &inv.numero);
        out.push(';');
        csv_field(&mut out, &inv.client);
        out.push(';');
        csv_field(&mut out, &inv.client_matricule);
        out.push(';');
        out.push_str(&inv.date.format("%d/%m/%Y").to_string());
        out.push(';');
        out.push_str(&inv.due_date.format("%d/%m/%Y").to_string());
        out.push(';');
        out.push_str(&csv_amount(inv.total_ht));
        out.push(';');
        out.push_str(&csv_amount(inv.tva_amount));
        out.push(';');
        out.push_str(&csv_amount(inv.total_ttc));
        out.push(';');
        csv_field(&mut out, inv.status.as_str());
        out.push_str("\r\n");
    }
    out
}

/// Render the purchase register as CSV.
///
/// Columns: Fournisseur;N° facture;Date;Catégorie;Montant HT;TVA;Montant TTC;Statut
pub fn purchases_csv(purchases: &[Purchase]) -> String {
    let mut out =
        String::from("Fournisseur;N° facture;Date;Catégorie;Montant HT;TVA;Montant TTC;Statut\r\n");
    for p in purchases {
        csv_field(&mut out, &p.supplier);
        out.push(';');
        csv_field(&mut out, p.invoice_number.as_deref().unwrap_or(""));
        out.push(';');
        out.push_str(&p.date.format("%d/%m/%Y").to_string());
        out.push(';');
        csv_field(&mut out, p.category.as_str());
        out.push(';');
        out.push_str(&csv_amount(p.amount_ht));
        out.push(';');
        out.push_str(&csv_amount(p.tva_amount));
        out.push(';');
        out.push_str(&csv_amount(p.total_ttc));
        out.push(';');
        csv_field(&mut out, p.status.as_str());
        out.push_str("\r\n");
    }
    out
}

/// Append a text field, quoting when it contains a separator, quote, or
/// line break. Embedded quotes double per RFC 4180.
fn csv_field(out: &mut String, value: &str) {
    if value.contains([';', '"', '\n', '\r']) {
        out.push('"');
        for c in value.chars() {
            if c == '"' {
                out.push('"');
            }
            out.push(c);
        }
        out.push('"');
    } else {
        out.push_str(value);
    }
}

/// Three-decimal amount with comma decimal mark, no grouping.
fn csv_amount(value: Decimal) -> String {
    format!("{:.3}", money::round_dt(value)).replace('.', ",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{InvoiceBuilder, PurchaseBuilder, PurchaseCategory};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn invoice_rows() {
        let invoice = InvoiceBuilder::new("FACT-202406-0001", date(2024, 6, 15))
            .client("Transports; Fils & Co \"Express\"")
            .client_matricule("1234567/A/M/000")
            .due_date(date(2024, 7, 15))
            .add_item("Transport", 2, dec!(100), dec!(19))
            .build()
            .unwrap();

        let csv = invoices_csv(&[invoice]);
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Numéro;Client;Matricule;Date;Échéance;Total HT;TVA;Total TTC;Statut"
        );
        assert_eq!(
            lines.next().unwrap(),
            "FACT-202406-0001;\"Transports; Fils & Co \"\"Express\"\"\";1234567/A/M/000;15/06/2024;15/07/2024;200,000;38,000;238,000;brouillon"
        );
    }

    #[test]
    fn purchase_rows() {
        let purchase = PurchaseBuilder::new(
            "Station Agil Rades",
            date(2024, 6, 3),
            PurchaseCategory::Fuel,
            dec!(850),
            dec!(19),
        )
        .invoice_number("AG-4471")
        .build()
        .unwrap();

        let csv = purchases_csv(&[purchase]);
        assert!(csv.contains(
            "Station Agil Rades;AG-4471;03/06/2024;Carburant;850,000;161,500;1011,500;non payé"
        ));
    }

    #[test]
    fn empty_register_is_header_only() {
        assert_eq!(invoices_csv(&[]).lines().count(), 1);
        assert_eq!(purchases_csv(&[]).lines().count(), 1);
    }
}
