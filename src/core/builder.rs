use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;

use super::error::{FactureError, ValidationError, validation_failure};
use super::types::*;

/// Builder for constructing valid invoices.
///
/// Validation runs before anything is constructed: a failing `build`
/// produces no partial invoice.
///
/// ```
/// use facture_tn::core::*;
/// use rust_decimal_macros::dec;
/// use chrono::NaiveDate;
///
/// let invoice = InvoiceBuilder::new("FACT-202406-0001", NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
///     .client("Société Industrielle du Sahel")
///     .client_matricule("1234567/A/M/000")
///     .add_item("Transport marchandises Tunis-Sfax", 2, dec!(100), dec!(19))
///     .add_item("Supplément carburant", 1, dec!(20), dec!(7))
///     .build()
///     .unwrap();
///
/// assert_eq!(invoice.total_ht, dec!(220.000));
/// ```
pub struct InvoiceBuilder {
    id: Option<String>,
    numero: String,
    date: NaiveDate,
    due_date: Option<NaiveDate>,
    client: Option<String>,
    client_matricule: Option<String>,
    client_address: Option<String>,
    items: Vec<LineInput>,
    status: InvoiceStatus,
    notes: Option<String>,
    created_at: Option<NaiveDateTime>,
}

struct LineInput {
    description: String,
    quantity: u32,
    unit_price: Decimal,
    tva_rate: Decimal,
}

/// Default payment terms when no due date is given.
const DEFAULT_TERMS_DAYS: i64 = 30;

/// Input limits, checked before construction.
const MAX_ITEMS: usize = 500;
const MAX_NUMERO_LEN: usize = 64;

impl InvoiceBuilder {
    pub fn new(numero: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: None,
            numero: numero.into(),
            date,
            due_date: None,
            client: None,
            client_matricule: None,
            client_address: None,
            items: Vec::new(),
            status: InvoiceStatus::Draft,
            notes: None,
            created_at: None,
        }
    }

    /// Record identifier. Defaults to the numero, which is already unique
    /// and sortable by creation time.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn client(mut self, name: impl Into<String>) -> Self {
        self.client = Some(name.into());
        self
    }

    pub fn client_matricule(mut self, matricule: impl Into<String>) -> Self {
        self.client_matricule = Some(matricule.into());
        self
    }

    pub fn client_address(mut self, address: impl Into<String>) -> Self {
        self.client_address = Some(address.into());
        self
    }

    /// Defaults to the issue date plus 30 days.
    pub fn due_date(mut self, date: NaiveDate) -> Self {
        self.due_date = Some(date);
        self
    }

    /// Append a line item. Totals are computed at build time.
    pub fn add_item(
        mut self,
        description: impl Into<String>,
        quantity: u32,
        unit_price: Decimal,
        tva_rate: Decimal,
    ) -> Self {
        self.items.push(LineInput {
            description: description.into(),
            quantity,
            unit_price,
            tva_rate,
        });
        self
    }

    /// Initial status (Draft by default; Sent for invoices issued directly).
    pub fn status(mut self, status: InvoiceStatus) -> Self {
        self.status = status;
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Creation timestamp. Defaults to the issue date at midnight.
    pub fn created_at(mut self, at: NaiveDateTime) -> Self {
        self.created_at = Some(at);
        self
    }

    /// Build the invoice: validate inputs, compute line totals, sum the
    /// aggregates. Returns all validation errors, not just the first.
    pub fn build(self) -> Result<Invoice, FactureError> {
        let mut errors = Vec::new();

        if self.numero.trim().is_empty() {
            errors.push(ValidationError::new("numero", "numero must not be empty"));
        }
        if self.numero.len() > MAX_NUMERO_LEN {
            errors.push(ValidationError::new(
                "numero",
                format!("numero cannot exceed {MAX_NUMERO_LEN} characters"),
            ));
        }

        match &self.client {
            None => errors.push(ValidationError::new("client", "client name is required")),
            Some(name) if name.trim().is_empty() => {
                errors.push(ValidationError::new("client", "client name is required"));
            }
            _ => {}
        }
        match &self.client_matricule {
            None => errors.push(ValidationError::new(
                "client_matricule",
                "client matricule fiscal is required",
            )),
            Some(mf) if mf.trim().is_empty() => errors.push(ValidationError::new(
                "client_matricule",
                "client matricule fiscal is required",
            )),
            _ => {}
        }

        if self.items.is_empty() {
            errors.push(ValidationError::new(
                "items",
                "at least one line item is required",
            ));
        }
        if self.items.len() > MAX_ITEMS {
            errors.push(ValidationError::new(
                "items",
                format!("invoice cannot have more than {MAX_ITEMS} line items"),
            ));
        }

        for (i, item) in self.items.iter().enumerate() {
            if item.description.trim().is_empty() {
                errors.push(ValidationError::new(
                    format!("items[{i}].description"),
                    "description must not be empty",
                ));
            }
            if item.quantity == 0 {
                errors.push(ValidationError::new(
                    format!("items[{i}].quantity"),
                    "quantity must be at least 1",
                ));
            }
            if item.unit_price.is_sign_negative() {
                errors.push(ValidationError::new(
                    format!("items[{i}].unit_price"),
                    "unit price must not be negative",
                ));
            }
            if item.tva_rate.is_sign_negative() {
                errors.push(ValidationError::new(
                    format!("items[{i}].tva_rate"),
                    "TVA rate must not be negative",
                ));
            }
        }

        let due_date = self
            .due_date
            .unwrap_or(self.date + Duration::days(DEFAULT_TERMS_DAYS));
        if due_date < self.date {
            errors.push(ValidationError::new(
                "due_date",
                "due date cannot precede the issue date",
            ));
        }

        if self.status == InvoiceStatus::Paid {
            errors.push(ValidationError::new(
                "status",
                "an invoice cannot be created already paid; record payment via mark_paid",
            ));
        }

        if !errors.is_empty() {
            return Err(validation_failure(&errors));
        }

        let items: Vec<LineItem> = self
            .items
            .iter()
            .map(|l| LineItem::compute(l.description.clone(), l.quantity, l.unit_price, l.tva_rate))
            .collect();

        let total_ht: Decimal = items.iter().map(|l| l.total_ht).sum();
        let tva_amount: Decimal = items.iter().map(|l| l.tva_amount).sum();
        let total_ttc: Decimal = items.iter().map(|l| l.total_ttc).sum();

        Ok(Invoice {
            id: self.id.unwrap_or_else(|| self.numero.clone()),
            numero: self.numero,
            client: self.client.unwrap_or_default(),
            client_matricule: self.client_matricule.unwrap_or_default(),
            client_address: self.client_address,
            date: self.date,
            due_date,
            items,
            total_ht,
            tva_amount,
            total_ttc,
            status: self.status,
            notes: self.notes,
            payment_date: None,
            created_at: self
                .created_at
                .unwrap_or_else(|| self.date.and_time(NaiveTime::MIN)),
        })
    }
}

/// Builder for purchases/expenses.
///
/// ```
/// use facture_tn::core::*;
/// use rust_decimal_macros::dec;
/// use chrono::NaiveDate;
///
/// let purchase = PurchaseBuilder::new(
///     "Station Agil Rades",
///     NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
///     PurchaseCategory::Fuel,
///     dec!(850),
///     dec!(19),
/// )
/// .build()
/// .unwrap();
///
/// assert_eq!(purchase.tva_amount, dec!(161.500));
/// assert_eq!(purchase.total_ttc, dec!(1011.500));
/// ```
pub struct PurchaseBuilder {
    id: Option<String>,
    supplier: String,
    invoice_number: Option<String>,
    date: NaiveDate,
    category: PurchaseCategory,
    amount_ht: Decimal,
    tva_rate: Decimal,
    description: Option<String>,
}

impl PurchaseBuilder {
    pub fn new(
        supplier: impl Into<String>,
        date: NaiveDate,
        category: PurchaseCategory,
        amount_ht: Decimal,
        tva_rate: Decimal,
    ) -> Self {
        Self {
            id: None,
            supplier: supplier.into(),
            invoice_number: None,
            date,
            category,
            amount_ht,
            tva_rate,
            description: None,
        }
    }

    /// Record identifier. Defaults to `ACH-{date}-{supplier}`.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Supplier's own invoice number.
    pub fn invoice_number(mut self, number: impl Into<String>) -> Self {
        self.invoice_number = Some(number.into());
        self
    }

    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    /// Build the purchase: validate inputs, derive TVA and TTC amounts.
    /// New purchases start unpaid.
    pub fn build(self) -> Result<Purchase, FactureError> {
        let mut errors = Vec::new();

        if self.supplier.trim().is_empty() {
            errors.push(ValidationError::new(
                "fournisseur",
                "supplier name is required",
            ));
        }
        if self.amount_ht.is_sign_negative() {
            errors.push(ValidationError::new(
                "montant_ht",
                "amount must not be negative",
            ));
        }
        if self.tva_rate.is_sign_negative() {
            errors.push(ValidationError::new(
                "tva_rate",
                "TVA rate must not be negative",
            ));
        }

        if !errors.is_empty() {
            return Err(validation_failure(&errors));
        }

        let amount_ht = super::money::round_dt(self.amount_ht);
        let tva_amount = super::money::vat_amount(amount_ht, self.tva_rate);

        Ok(Purchase {
            id: self.id.unwrap_or_else(|| {
                format!("ACH-{}-{}", self.date.format("%Y%m%d"), self.supplier)
            }),
            supplier: self.supplier,
            invoice_number: self.invoice_number,
            date: self.date,
            category: self.category,
            amount_ht,
            tva_rate: self.tva_rate,
            tva_amount,
            total_ttc: amount_ht + tva_amount,
            description: self.description,
            status: PaymentState::Unpaid,
        })
    }
}

impl Purchase {
    /// Record the purchase as settled. The only mutation a purchase allows.
    pub fn mark_paid(&mut self) {
        self.status = PaymentState::Paid;
    }
}
