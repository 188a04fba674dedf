use chrono::NaiveDate;

use super::error::FactureError;
use super::types::{Invoice, InvoiceStatus};

/// Derive a payment status from the due date and an optional payment date.
///
/// A recorded payment wins regardless of the due date; otherwise the
/// invoice is overdue strictly after `due_date`, else it keeps the
/// caller-selected `initial` state (Draft or Sent).
pub fn derive_status(
    due_date: NaiveDate,
    payment_date: Option<NaiveDate>,
    today: NaiveDate,
    initial: InvoiceStatus,
) -> InvoiceStatus {
    if payment_date.is_some() {
        InvoiceStatus::Paid
    } else if today > due_date {
        InvoiceStatus::Overdue
    } else {
        initial
    }
}

impl Invoice {
    /// Issue a draft invoice to the client.
    ///
    /// Transitions: Draft → Sent. Any other starting state is an error.
    pub fn mark_sent(&mut self) -> Result<(), FactureError> {
        match self.status {
            InvoiceStatus::Draft => {
                self.status = InvoiceStatus::Sent;
                Ok(())
            }
            other => Err(FactureError::Validation(format!(
                "cannot send an invoice with status '{}'",
                other.as_str()
            ))),
        }
    }

    /// Record payment. Allowed from any state, including Overdue.
    ///
    /// The first recorded payment date sticks: marking an already-paid
    /// invoice again is a no-op and never rewrites the date.
    pub fn mark_paid(&mut self, payment_date: NaiveDate) {
        if self.payment_date.is_none() {
            self.payment_date = Some(payment_date);
        }
        self.status = InvoiceStatus::Paid;
    }

    /// Re-derive the status against `today`. Idempotent: Paid is never
    /// downgraded, a payment date is never cleared, and a Draft stays a
    /// Draft until it is sent.
    pub fn refresh_status(&mut self, today: NaiveDate) {
        if self.status == InvoiceStatus::Paid {
            return;
        }
        let initial = match self.status {
            // Overdue re-derives from its base issued state, so an invoice
            // whose due date moved forward can return to Sent.
            InvoiceStatus::Overdue => InvoiceStatus::Sent,
            other => other,
        };
        let derived = derive_status(self.due_date, self.payment_date, today, initial);
        // A draft past its due date is stale input, not an overdue claim.
        self.status = if initial == InvoiceStatus::Draft && derived == InvoiceStatus::Overdue {
            InvoiceStatus::Draft
        } else {
            derived
        };
    }
}

/// Why an invoice appears in the due-date alert list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueAlertKind {
    /// Past due, no payment recorded.
    Overdue,
    /// Due within the lookahead window.
    DueSoon,
}

/// An unpaid invoice needing attention.
#[derive(Debug, Clone, PartialEq)]
pub struct DueAlert {
    pub numero: String,
    pub client: String,
    pub due_date: NaiveDate,
    /// Days until the due date; negative when already past.
    pub days_left: i64,
    pub kind: DueAlertKind,
}

/// Scan issued, unpaid invoices for overdue and soon-due entries.
/// Results are sorted by due date (most urgent first).
pub fn due_alerts(invoices: &[Invoice], today: NaiveDate, window_days: i64) -> Vec<DueAlert> {
    let mut alerts: Vec<DueAlert> = invoices
        .iter()
        .filter(|inv| {
            inv.payment_date.is_none()
                && matches!(inv.status, InvoiceStatus::Sent | InvoiceStatus::Overdue)
        })
        .filter_map(|inv| {
            let days_left = (inv.due_date - today).num_days();
            let kind = if days_left < 0 {
                DueAlertKind::Overdue
            } else if days_left <= window_days {
                DueAlertKind::DueSoon
            } else {
                return None;
            };
            Some(DueAlert {
                numero: inv.numero.clone(),
                client: inv.client.clone(),
                due_date: inv.due_date,
                days_left,
                kind,
            })
        })
        .collect();
    alerts.sort_by(|a, b| a.due_date.cmp(&b.due_date).then(a.numero.cmp(&b.numero)));
    alerts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::builder::InvoiceBuilder;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn invoice(numero: &str, due: NaiveDate) -> Invoice {
        InvoiceBuilder::new(numero, date(2024, 6, 1))
            .client("Comptoir du Cap Bon")
            .client_matricule("7654321/B/A/000")
            .due_date(due)
            .add_item("Transport frigorifique", 1, dec!(500), dec!(19))
            .build()
            .unwrap()
    }

    #[test]
    fn payment_date_wins_over_due_date() {
        let status = derive_status(
            date(2024, 1, 1),
            Some(date(2024, 3, 1)),
            date(2024, 6, 1),
            InvoiceStatus::Sent,
        );
        assert_eq!(status, InvoiceStatus::Paid);
    }

    #[test]
    fn past_due_without_payment_is_overdue() {
        let status = derive_status(date(2024, 5, 1), None, date(2024, 6, 1), InvoiceStatus::Sent);
        assert_eq!(status, InvoiceStatus::Overdue);
    }

    #[test]
    fn due_date_boundary_is_not_overdue() {
        let status = derive_status(date(2024, 6, 1), None, date(2024, 6, 1), InvoiceStatus::Sent);
        assert_eq!(status, InvoiceStatus::Sent);
    }

    #[test]
    fn overdue_invoice_can_still_be_paid() {
        let mut inv = invoice("FACT-202406-0001", date(2024, 6, 15));
        inv.mark_sent().unwrap();
        inv.refresh_status(date(2024, 7, 1));
        assert_eq!(inv.status, InvoiceStatus::Overdue);

        inv.mark_paid(date(2024, 7, 5));
        assert_eq!(inv.status, InvoiceStatus::Paid);
        assert_eq!(inv.payment_date, Some(date(2024, 7, 5)));

        // Refreshing later never downgrades
        inv.refresh_status(date(2024, 8, 1));
        assert_eq!(inv.status, InvoiceStatus::Paid);
    }

    #[test]
    fn mark_paid_keeps_first_date() {
        let mut inv = invoice("FACT-202406-0002", date(2024, 6, 15));
        inv.mark_paid(date(2024, 6, 10));
        inv.mark_paid(date(2024, 6, 20));
        assert_eq!(inv.payment_date, Some(date(2024, 6, 10)));
    }

    #[test]
    fn sent_twice_is_an_error() {
        let mut inv = invoice("FACT-202406-0003", date(2024, 6, 15));
        inv.mark_sent().unwrap();
        assert!(inv.mark_sent().is_err());
    }

    #[test]
    fn draft_past_due_stays_draft() {
        let mut inv = invoice("FACT-202406-0004", date(2024, 6, 15));
        inv.refresh_status(date(2024, 7, 1));
        assert_eq!(inv.status, InvoiceStatus::Draft);
    }

    #[test]
    fn alerts_window() {
        let mut overdue = invoice("FACT-202406-0005", date(2024, 6, 10));
        overdue.mark_sent().unwrap();
        let mut soon = invoice("FACT-202406-0006", date(2024, 6, 22));
        soon.mark_sent().unwrap();
        let mut far = invoice("FACT-202406-0007", date(2024, 9, 1));
        far.mark_sent().unwrap();
        let draft = invoice("FACT-202406-0008", date(2024, 6, 10));

        let alerts = due_alerts(&[far, soon, overdue, draft], date(2024, 6, 18), 7);
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].numero, "FACT-202406-0005");
        assert_eq!(alerts[0].kind, DueAlertKind::Overdue);
        assert_eq!(alerts[0].days_left, -8);
        assert_eq!(alerts[1].numero, "FACT-202406-0006");
        assert_eq!(alerts[1].kind, DueAlertKind::DueSoon);
        assert_eq!(alerts[1].days_left, 4);
    }
}
