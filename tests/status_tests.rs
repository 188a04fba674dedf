use chrono::NaiveDate;
use facture_tn::core::*;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn invoice(due: NaiveDate) -> Invoice {
    InvoiceBuilder::new("FACT-202406-0001", date(2024, 6, 1))
        .client("Comptoir du Cap Bon")
        .client_matricule("7654321/B/A/000")
        .due_date(due)
        .add_item("Transport frigorifique", 1, dec!(500), dec!(19))
        .build()
        .unwrap()
}

#[test]
fn past_due_without_payment_derives_overdue() {
    let status = derive_status(date(2024, 6, 15), None, date(2024, 7, 1), InvoiceStatus::Sent);
    assert_eq!(status, InvoiceStatus::Overdue);
}

#[test]
fn payment_date_always_wins() {
    // Paid even though long past due
    let status = derive_status(
        date(2024, 6, 15),
        Some(date(2024, 9, 1)),
        date(2024, 12, 1),
        InvoiceStatus::Sent,
    );
    assert_eq!(status, InvoiceStatus::Paid);
}

#[test]
fn initial_state_is_kept_before_due_date() {
    for initial in [InvoiceStatus::Draft, InvoiceStatus::Sent] {
        let status = derive_status(date(2024, 6, 15), None, date(2024, 6, 10), initial);
        assert_eq!(status, initial);
    }
}

#[test]
fn full_lifecycle_draft_sent_overdue_paid() {
    let mut inv = invoice(date(2024, 6, 30));
    assert_eq!(inv.status, InvoiceStatus::Draft);

    inv.mark_sent().unwrap();
    assert_eq!(inv.status, InvoiceStatus::Sent);

    inv.refresh_status(date(2024, 7, 10));
    assert_eq!(inv.status, InvoiceStatus::Overdue);

    // An overdue invoice can still transition to paid
    inv.mark_paid(date(2024, 7, 12));
    assert_eq!(inv.status, InvoiceStatus::Paid);
    assert_eq!(inv.payment_date, Some(date(2024, 7, 12)));
}

#[test]
fn refresh_is_idempotent() {
    let mut inv = invoice(date(2024, 6, 30));
    inv.mark_sent().unwrap();
    inv.refresh_status(date(2024, 7, 10));
    let after_first = inv.status;
    inv.refresh_status(date(2024, 7, 10));
    assert_eq!(inv.status, after_first);

    inv.mark_paid(date(2024, 7, 12));
    inv.refresh_status(date(2025, 1, 1));
    assert_eq!(inv.status, InvoiceStatus::Paid);
    assert_eq!(inv.payment_date, Some(date(2024, 7, 12)));
}

#[test]
fn paid_invoice_passes_validation() {
    let mut inv = invoice(date(2024, 6, 30));
    inv.mark_sent().unwrap();
    inv.mark_paid(date(2024, 7, 2));
    assert!(validate_invoice(&inv).is_empty());
}
