use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::money;

/// One line of a sales invoice.
///
/// Derived figures are computed once by [`LineItem::compute`] and stored;
/// they are always reproducible from the inputs (see
/// [`validate_invoice`](super::validate_invoice)).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Free-text description of the service or goods.
    pub description: String,
    /// Invoiced quantity (at least 1).
    pub quantity: u32,
    /// Pre-tax unit price in dinars.
    pub unit_price: Decimal,
    /// TVA rate percentage (typically 0, 7, 13 or 19).
    pub tva_rate: Decimal,
    /// `quantity × unit_price`, rounded to millimes.
    pub total_ht: Decimal,
    /// TVA due on `total_ht`.
    pub tva_amount: Decimal,
    /// `total_ht + tva_amount`, exactly.
    pub total_ttc: Decimal,
}

impl LineItem {
    /// Compute a line from its inputs.
    pub fn compute(
        description: impl Into<String>,
        quantity: u32,
        unit_price: Decimal,
        tva_rate: Decimal,
    ) -> Self {
        let total_ht = money::round_dt(Decimal::from(quantity) * unit_price);
        let tva_amount = money::vat_amount(total_ht, tva_rate);
        Self {
            description: description.into(),
            quantity,
            unit_price,
            tva_rate,
            total_ht,
            tva_amount,
            total_ttc: total_ht + tva_amount,
        }
    }
}

/// Invoice lifecycle status. Wire values use the French labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvoiceStatus {
    /// Created but not yet issued to the client.
    #[serde(rename = "brouillon")]
    Draft,
    /// Issued, awaiting payment.
    #[serde(rename = "envoyée")]
    Sent,
    /// Payment recorded; requires a `payment_date`.
    #[serde(rename = "payée")]
    Paid,
    /// Past due date with no payment recorded.
    #[serde(rename = "en retard")]
    Overdue,
}

impl InvoiceStatus {
    /// Wire label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "brouillon",
            Self::Sent => "envoyée",
            Self::Paid => "payée",
            Self::Overdue => "en retard",
        }
    }

    /// Parse from the wire label.
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "brouillon" => Some(Self::Draft),
            "envoyée" => Some(Self::Sent),
            "payée" => Some(Self::Paid),
            "en retard" => Some(Self::Overdue),
            _ => None,
        }
    }
}

/// A sales invoice (facture de vente).
///
/// Aggregate totals equal the sum of the line totals at all times; line
/// items are set at build time and not mutated afterwards. `Paid` status
/// implies `payment_date` is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    /// Record identifier (unique, sortable by creation time).
    pub id: String,
    /// Human-readable invoice number, e.g. `FACT-202406-0001`.
    pub numero: String,
    /// Client display name (weak reference, no ownership of the client record).
    pub client: String,
    /// Client matricule fiscal.
    pub client_matricule: String,
    /// Client address as printed on the document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_address: Option<String>,
    /// Issue date.
    pub date: NaiveDate,
    /// Payment due date.
    pub due_date: NaiveDate,
    /// Line items, in entry order.
    pub items: Vec<LineItem>,
    /// Σ line `total_ht`.
    pub total_ht: Decimal,
    /// Σ line `tva_amount`.
    pub tva_amount: Decimal,
    /// Σ line `total_ttc`.
    pub total_ttc: Decimal,
    pub status: InvoiceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Set when payment is recorded; never cleared afterwards.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
}

/// Expense categories for purchases. Wire values use the French labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PurchaseCategory {
    #[serde(rename = "Carburant")]
    Fuel,
    #[serde(rename = "Maintenance")]
    Maintenance,
    #[serde(rename = "Péages")]
    Tolls,
    #[serde(rename = "Salaires")]
    Salaries,
    #[serde(rename = "Loyer")]
    Rent,
    #[serde(rename = "Fournitures")]
    Supplies,
    #[serde(rename = "Autre")]
    Other,
}

impl PurchaseCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fuel => "Carburant",
            Self::Maintenance => "Maintenance",
            Self::Tolls => "Péages",
            Self::Salaries => "Salaires",
            Self::Rent => "Loyer",
            Self::Supplies => "Fournitures",
            Self::Other => "Autre",
        }
    }

    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "Carburant" => Some(Self::Fuel),
            "Maintenance" => Some(Self::Maintenance),
            "Péages" => Some(Self::Tolls),
            "Salaires" => Some(Self::Salaries),
            "Loyer" => Some(Self::Rent),
            "Fournitures" => Some(Self::Supplies),
            "Autre" => Some(Self::Other),
            _ => None,
        }
    }
}

/// Settlement state of a purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentState {
    #[serde(rename = "non payé")]
    Unpaid,
    #[serde(rename = "payé")]
    Paid,
}

impl PaymentState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unpaid => "non payé",
            Self::Paid => "payé",
        }
    }
}

/// A recorded purchase or expense (achat/dépense).
///
/// Immutable after creation except for `status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Purchase {
    pub id: String,
    #[serde(rename = "fournisseur")]
    pub supplier: String,
    /// Supplier's own invoice number, when known.
    #[serde(
        default,
        rename = "num_facture",
        skip_serializing_if = "Option::is_none"
    )]
    pub invoice_number: Option<String>,
    pub date: NaiveDate,
    #[serde(rename = "categorie")]
    pub category: PurchaseCategory,
    #[serde(rename = "montant_ht")]
    pub amount_ht: Decimal,
    pub tva_rate: Decimal,
    #[serde(rename = "tva_montant")]
    pub tva_amount: Decimal,
    #[serde(rename = "montant_ttc")]
    pub total_ttc: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: PaymentState,
}

/// A client record. Invoices reference clients by name/matricule only;
/// deleting a client never cascades to its invoices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub id: String,
    #[serde(rename = "nom")]
    pub name: String,
    pub matricule_fiscal: String,
    #[serde(rename = "telephone")]
    pub phone: String,
    pub email: String,
    #[serde(rename = "ville")]
    pub city: String,
    #[serde(rename = "adresse")]
    pub address: String,
    /// Authorized outstanding balance, in dinars.
    #[serde(default)]
    pub credit_limit: Decimal,
    /// Payment terms in days (default 30).
    #[serde(default = "default_payment_terms")]
    pub payment_terms_days: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(rename = "date_creation")]
    pub created_at: NaiveDateTime,
}

fn default_payment_terms() -> u32 {
    30
}

/// The issuing company's profile. Singleton: editing replaces it wholesale.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BusinessProfile {
    pub name: String,
    pub matricule_fiscal: String,
    pub address: String,
    /// Bank account reference printed in the payment block.
    pub rib: String,
    pub industry: String,
    pub phone: String,
    pub email: String,
    /// Capital social, in dinars.
    #[serde(default)]
    pub capital: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn line_item_totals() {
        let line = LineItem::compute("Transport marchandises", 2, dec!(100), dec!(19));
        assert_eq!(line.total_ht, dec!(200.000));
        assert_eq!(line.tva_amount, dec!(38.000));
        assert_eq!(line.total_ttc, dec!(238.000));
    }

    #[test]
    fn line_item_ttc_identity() {
        let line = LineItem::compute("Péage autoroute", 3, dec!(7.333), dec!(7));
        assert_eq!(line.total_ttc, line.total_ht + line.tva_amount);
    }

    #[test]
    fn status_labels_round_trip() {
        for status in [
            InvoiceStatus::Draft,
            InvoiceStatus::Sent,
            InvoiceStatus::Paid,
            InvoiceStatus::Overdue,
        ] {
            assert_eq!(InvoiceStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(InvoiceStatus::parse("inconnue"), None);
    }

    #[test]
    fn category_labels_round_trip() {
        for cat in [
            PurchaseCategory::Fuel,
            PurchaseCategory::Maintenance,
            PurchaseCategory::Tolls,
            PurchaseCategory::Salaries,
            PurchaseCategory::Rent,
            PurchaseCategory::Supplies,
            PurchaseCategory::Other,
        ] {
            assert_eq!(PurchaseCategory::parse(cat.as_str()), Some(cat));
        }
    }
}
