//! Dinner bill walkthrough: create a bill, record expenses, print balances

use bigdecimal::BigDecimal;
use splitbill_core::utils::{parse_participants, MemoryStorage};
use splitbill_core::{BalanceStatus, EngineConfig, ExpenseDraft, SettlementEngine};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = EngineConfig::from_env();
    let mut engine = SettlementEngine::with_config(MemoryStorage::new(), config);

    println!("🧾 Split Bill - Dinner Example\n");

    let participants = parse_participants("Dinnar, Nasywa, Farhan");
    let bill = engine.create_bill("Makan Malam", &participants).await?;
    println!("  ✓ Created bill '{}' for {}", bill.name, bill.participants.join(", "));

    let expenses = [
        ("Sate Ayam", 3, "150000", "Dinnar", vec!["Dinnar", "Nasywa", "Farhan"]),
        ("Es Teh", 2, "20000", "Nasywa", vec!["Dinnar", "Nasywa"]),
        ("Parkir", 1, "5000", "Farhan", vec!["Farhan"]),
        ("Martabak", 1, "100000", "Farhan", vec!["Dinnar", "Nasywa", "Farhan"]),
    ];

    for (description, quantity, amount, paid_by, split) in expenses {
        let split: Vec<String> = split.into_iter().map(String::from).collect();
        let expense = engine
            .add_expense(
                &bill.id,
                ExpenseDraft::new(description, amount.parse::<BigDecimal>()?, paid_by, split)
                    .quantity(quantity),
            )
            .await?;
        println!(
            "  ✓ {} x{} paid by {}: {}",
            expense.description,
            expense.quantity,
            expense.paid_by,
            engine.currency().format(&expense.total_amount)
        );
    }

    let summary = engine.compute_summary(&bill.id).await?;
    let rp = engine.currency();

    println!("\n📊 Summary (total {})", rp.format(&summary.total_spent));
    for entry in &summary.balances {
        let note = match entry.status() {
            BalanceStatus::Creditor => "gets money back",
            BalanceStatus::Debtor => "owes the group",
            BalanceStatus::Settled => "settled",
        };
        println!(
            "  {:<8} paid {:>12}  owes {:>12}  balance {:>12}  ({})",
            entry.participant,
            rp.format(&entry.total_paid),
            rp.format(&entry.total_owed),
            rp.format_signed(&entry.balance),
            note
        );
    }

    println!("\n  Balanced: {}", summary.is_balanced());
    Ok(())
}
