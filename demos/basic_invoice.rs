use chrono::NaiveDate;
use facture_tn::core::*;
use rust_decimal_macros::dec;

fn main() {
    // Number the invoice from the June 2024 sequence
    let mut sequence = InvoiceNumberSequence::new("FACT", 2024, 6);

    let invoice = InvoiceBuilder::new(
        sequence.next_numero(),
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

    println!("Facture {}", invoice.numero);
    println!("Client: {} ({})", invoice.client, invoice.client_matricule);
    for item in &invoice.items {
        println!(
            "  {:<40} {:>3} × {:>12} = {:>12}",
            item.description,
            item.quantity,
            format_dt(item.unit_price),
            format_dt(item.total_ht),
        );
    }
    println!("Total HT:  {}", format_dt(invoice.total_ht));
    println!("TVA:       {}", format_dt(invoice.tva_amount));
    println!("Total TTC: {}", format_dt(invoice.total_ttc));
}
