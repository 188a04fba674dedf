use chrono::NaiveDate;
use facture_tn::core::*;
use facture_tn::declaration::{Period, declaration_for_period};
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn main() {
    let invoices = vec![
        InvoiceBuilder::new("FACT-202406-0001", date(2024, 6, 5))
            .client("Société Industrielle du Sahel")
            .client_matricule("7654321/B/A/000")
            .add_item("Transport marchandises", 1, dec!(1000), dec!(19))
            .build()
            .expect("valid invoice"),
        InvoiceBuilder::new("FACT-202406-0002", date(2024, 6, 18))
            .client("Comptoir du Cap Bon")
            .client_matricule("1234567/A/M/000")
            .add_item("Transport A", 2, dec!(100), dec!(19))
            .add_item("Transport B", 1, dec!(50), dec!(19))
            .add_item("Supplément carburant", 1, dec!(20), dec!(7))
            .build()
            .expect("valid invoice"),
    ];

    let purchases = vec![
        PurchaseBuilder::new(
            "Station Agil Rades",
            date(2024, 6, 3),
            PurchaseCategory::Fuel,
            dec!(850),
            dec!(19),
        )
        .build()
        .expect("valid purchase"),
    ];

    let june = Period::month(2024, 6).expect("valid month");
    let declaration = declaration_for_period(&invoices, &purchases, june);

    println!("Déclaration TVA — juin 2024");
    println!("TVA collectée:  {}", format_dt(declaration.tva_collected));
    println!("TVA déductible: {}", format_dt(declaration.tva_deductible));
    println!("TVA à payer:    {}", format_dt(declaration.tva_payable));
    println!("Chiffre d'affaires: {}", format_dt(declaration.total_revenue));
    println!("Achats:             {}", format_dt(declaration.total_purchases));
    println!("Bénéfice net:       {}", format_dt(declaration.net_profit));
}
