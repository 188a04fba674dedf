use rust_decimal::Decimal;

use super::error::ValidationError;
use super::types::*;

/// Validate a constructed invoice: identity fields, per-line figures, and
/// the reproducibility of the stored aggregates.
/// Returns all validation errors found (not just the first).
///
/// Every stored total is re-derived from its inputs; an aggregate that
/// cannot be reproduced by re-summing the lines is reported, which keeps
/// hand-edited or migrated records honest.
pub fn validate_invoice(invoice: &Invoice) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if invoice.numero.trim().is_empty() {
        errors.push(ValidationError::new("numero", "numero must not be empty"));
    }
    if invoice.client.trim().is_empty() {
        errors.push(ValidationError::new("client", "client name is required"));
    }
    if invoice.client_matricule.trim().is_empty() {
        errors.push(ValidationError::new(
            "client_matricule",
            "client matricule fiscal is required",
        ));
    }
    if invoice.items.is_empty() {
        errors.push(ValidationError::new(
            "items",
            "invoice must have at least one line item",
        ));
    }
    if invoice.due_date < invoice.date {
        errors.push(ValidationError::new(
            "due_date",
            "due date cannot precede the issue date",
        ));
    }

    for (i, line) in invoice.items.iter().enumerate() {
        validate_line(line, i, &mut errors);
    }

    // Aggregates must equal the sum of the line totals.
    let expected_ht: Decimal = invoice.items.iter().map(|l| l.total_ht).sum();
    let expected_tva: Decimal = invoice.items.iter().map(|l| l.tva_amount).sum();
    let expected_ttc: Decimal = invoice.items.iter().map(|l| l.total_ttc).sum();

    if invoice.total_ht != expected_ht {
        errors.push(ValidationError::new(
            "total_ht",
            format!(
                "total HT {} does not match sum of line totals {}",
                invoice.total_ht, expected_ht
            ),
        ));
    }
    if invoice.tva_amount != expected_tva {
        errors.push(ValidationError::new(
            "tva_amount",
            format!(
                "TVA amount {} does not match sum of line TVA {}",
                invoice.tva_amount, expected_tva
            ),
        ));
    }
    if invoice.total_ttc != expected_ttc {
        errors.push(ValidationError::new(
            "total_ttc",
            format!(
                "total TTC {} does not match sum of line TTC {}",
                invoice.total_ttc, expected_ttc
            ),
        ));
    }

    if invoice.status == InvoiceStatus::Paid && invoice.payment_date.is_none() {
        errors.push(ValidationError::new(
            "payment_date",
            "a paid invoice must have a payment date",
        ));
    }

    errors
}

fn validate_line(line: &LineItem, index: usize, errors: &mut Vec<ValidationError>) {
    let prefix = format!("items[{index}]");

    if line.description.trim().is_empty() {
        errors.push(ValidationError::new(
            format!("{prefix}.description"),
            "description must not be empty",
        ));
    }
    if line.quantity == 0 {
        errors.push(ValidationError::new(
            format!("{prefix}.quantity"),
            "quantity must be at least 1",
        ));
    }
    if line.unit_price.is_sign_negative() {
        errors.push(ValidationError::new(
            format!("{prefix}.unit_price"),
            "unit price must not be negative",
        ));
    }
    if line.tva_rate.is_sign_negative() {
        errors.push(ValidationError::new(
            format!("{prefix}.tva_rate"),
            "TVA rate must not be negative",
        ));
    }

    // Stored derived figures must match a recomputation from the inputs.
    let expected = LineItem::compute(
        line.description.clone(),
        line.quantity,
        line.unit_price,
        line.tva_rate,
    );
    if line.total_ht != expected.total_ht {
        errors.push(ValidationError::new(
            format!("{prefix}.total_ht"),
            format!(
                "total HT {} does not match {} × {}",
                line.total_ht, line.quantity, line.unit_price
            ),
        ));
    }
    if line.tva_amount != expected.tva_amount {
        errors.push(ValidationError::new(
            format!("{prefix}.tva_amount"),
            format!(
                "TVA amount {} does not match {}% of {}",
                line.tva_amount, line.tva_rate, line.total_ht
            ),
        ));
    }
    if line.total_ttc != line.total_ht + line.tva_amount {
        errors.push(ValidationError::new(
            format!("{prefix}.total_ttc"),
            format!(
                "total TTC {} does not equal HT {} + TVA {}",
                line.total_ttc, line.total_ht, line.tva_amount
            ),
        ));
    }
}

/// Validate the format of a Tunisian matricule fiscal,
/// e.g. `1234567/A/M/000`: registration digits, control letter,
/// category letter, establishment digits, separated by `/`.
///
/// Advisory: builders only require the field to be non-blank; strict
/// format checking is the caller's choice.
pub fn validate_matricule_fiscal(matricule: &str) -> Result<(), ValidationError> {
    let value = matricule.trim();
    let invalid = |reason: &str| {
        Err(ValidationError::new(
            "matricule_fiscal",
            format!("'{value}' is not a valid matricule fiscal: {reason}"),
        ))
    };

    let segments: Vec<&str> = value.split('/').collect();
    if segments.len() != 4 {
        return invalid("expected 4 segments separated by '/'");
    }

    let registration = segments[0];
    if !(6..=8).contains(&registration.len())
        || !registration.chars().all(|c| c.is_ascii_digit())
    {
        return invalid("registration number must be 6 to 8 digits");
    }

    for (i, name) in [(1usize, "control letter"), (2, "category letter")] {
        let seg = segments[i];
        if seg.len() != 1 || !seg.chars().all(|c| c.is_ascii_uppercase()) {
            return invalid(&format!("{name} must be a single uppercase letter"));
        }
    }

    let establishment = segments[3];
    if establishment.len() != 3 || !establishment.chars().all(|c| c.is_ascii_digit()) {
        return invalid("establishment number must be 3 digits");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::builder::InvoiceBuilder;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn test_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn test_invoice() -> Invoice {
        InvoiceBuilder::new("FACT-202406-0001", test_date())
            .client("Société Industrielle du Sahel")
            .client_matricule("1234567/A/M/000")
            .add_item("Transport marchandises Tunis-Sfax", 2, dec!(100), dec!(19))
            .add_item("Supplément carburant", 1, dec!(20), dec!(7))
            .build()
            .unwrap()
    }

    #[test]
    fn built_invoice_passes_validation() {
        assert!(validate_invoice(&test_invoice()).is_empty());
    }

    #[test]
    fn tampered_aggregate_detected() {
        let mut inv = test_invoice();
        inv.total_ttc += dec!(1);
        let errors = validate_invoice(&inv);
        assert!(errors.iter().any(|e| e.field == "total_ttc"));
    }

    #[test]
    fn tampered_line_detected() {
        let mut inv = test_invoice();
        inv.items[0].tva_amount = dec!(0);
        let errors = validate_invoice(&inv);
        assert!(errors.iter().any(|e| e.field == "items[0].tva_amount"));
        // The aggregate no longer matches either
        assert!(errors.iter().any(|e| e.field == "tva_amount"));
    }

    #[test]
    fn paid_without_date_detected() {
        let mut inv = test_invoice();
        inv.status = InvoiceStatus::Paid;
        let errors = validate_invoice(&inv);
        assert!(errors.iter().any(|e| e.field == "payment_date"));
    }

    #[test]
    fn builder_rejects_empty_items() {
        let result = InvoiceBuilder::new("FACT-202406-0002", test_date())
            .client("Client X")
            .client_matricule("1234567/A/M/000")
            .build();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("line item"));
    }

    #[test]
    fn builder_rejects_missing_client_identity() {
        let result = InvoiceBuilder::new("FACT-202406-0003", test_date())
            .add_item("Transport", 1, dec!(100), dec!(19))
            .build();
        let msg = result.unwrap_err().to_string();
        assert!(msg.contains("client name"));
        assert!(msg.contains("matricule fiscal"));
    }

    #[test]
    fn builder_rejects_negative_price() {
        let result = InvoiceBuilder::new("FACT-202406-0004", test_date())
            .client("Client X")
            .client_matricule("1234567/A/M/000")
            .add_item("Remise sauvage", 1, dec!(-50), dec!(19))
            .build();
        assert!(result.unwrap_err().to_string().contains("negative"));
    }

    #[test]
    fn matricule_format() {
        assert!(validate_matricule_fiscal("1234567/A/M/000").is_ok());
        assert!(validate_matricule_fiscal("123456/B/C/001").is_ok());
        assert!(validate_matricule_fiscal("1234567AM000").is_err());
        assert!(validate_matricule_fiscal("1234567/a/M/000").is_err());
        assert!(validate_matricule_fiscal("1234567/A/M/00").is_err());
        assert!(validate_matricule_fiscal("12345/A/M/000").is_err());
    }
}
