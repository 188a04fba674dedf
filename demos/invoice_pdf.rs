use chrono::NaiveDate;
use facture_tn::core::*;
use facture_tn::pdf;
use rust_decimal_macros::dec;

fn main() {
    let profile = BusinessProfile {
        name: "TunisieTrans SARL".into(),
        matricule_fiscal: "1234567/A/M/000".into(),
        address: "Zone Industrielle, Tunis".into(),
        rib: "01 234 5678901234567 89".into(),
        industry: "Transport et Logistique".into(),
        phone: "+216 71 234 567".into(),
        email: "contact@tunisietrans.tn".into(),
        capital: dec!(100000),
    };

    let invoice = InvoiceBuilder::new(
        "FACT-202406-0001",
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
    )
    .client("Société Industrielle du Sahel")
    .client_matricule("7654321/B/A/000")
    .client_address("Route de Gabès km 3, Sfax")
    .due_date(NaiveDate::from_ymd_opt(2024, 7, 15).unwrap())
    .add_item("Transport marchandises Tunis-Sfax", 2, dec!(100), dec!(19))
    .add_item("Transport retour Sfax-Tunis", 1, dec!(50), dec!(19))
    .add_item("Supplément carburant", 1, dec!(20), dec!(7))
    .notes("Paiement par virement sous 30 jours")
    .build()
    .expect("valid invoice");

    let layout = pdf::InvoiceLayout::compose(&invoice, &profile);
    println!(
        "Composed {} page(s), {} table row(s)",
        layout.page_count(),
        layout.pages.iter().map(|p| p.rows.len()).sum::<usize>()
    );

    let path = pdf::render_to_file(&invoice, &profile, None).expect("PDF written");
    println!("Wrote {}", path.display());
}
