//! Basic ledger usage example

use account_ledger::{Ledger, LedgerError, RequestQueue};
use bigdecimal::BigDecimal;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    println!("Account Ledger - Basic Example\n");

    let ledger = Ledger::new();

    // 1. Open a couple of accounts
    println!("Opening accounts...");
    let alice = ledger.create("Alice", "01234567890", "alice-pw")?;
    let bob = ledger.create("Bob", "01987654321", "bob-pw")?;
    for account in ledger.list_all()? {
        println!("  Created account: {} - {}", account.id(), account.holder_name());
    }
    println!();

    // Invalid input is reported, not fatal
    match ledger.create("Mallory", "123", "pw") {
        Err(LedgerError::InvalidPhone(phone)) => println!("  Rejected phone number: {phone}\n"),
        other => println!("  Unexpected result: {other:?}\n"),
    }

    // 2. Move some money around
    println!("Recording transactions...");
    alice.deposit(&BigDecimal::from_str("100.00")?)?;
    if let Err(e) = alice.withdraw(&BigDecimal::from_str("150.00")?) {
        println!("  Withdrawal refused: {e}");
    }
    alice.transfer(&bob, &BigDecimal::from_str("50.00")?)?;
    ledger.apply_interest_to_all()?;
    println!();

    // 3. Provision an account through the request workflow
    println!("Processing account requests...");
    let queue = RequestQueue::for_ledger(&ledger);
    let request = queue.submit(alice.id(), "Carol", "01555555555", "carol-pw")?;
    let typo = queue.submit(alice.id(), "Dave", "0155", "dave-pw")?;

    for pending in queue.list_pending()? {
        println!(
            "  Pending: {} for {} (requested by {})",
            pending.target_id(),
            pending.holder_name(),
            pending.requester_id()
        );
    }

    let carol = queue.approve(&request, &ledger)?;
    println!("  Approved: {} is now open", carol.id());
    if let Err(e) = queue.approve(&typo, &ledger) {
        println!("  Could not approve {}: {e}", typo.target_id());
        queue.deny(&typo)?;
        println!("  Denied: {}", typo.target_id());
    }
    println!();

    // 4. Statements
    for account in ledger.list_all()? {
        println!(
            "Statement for {} ({}), balance {}",
            account.id(),
            account.holder_name(),
            account.balance()?.round(2)
        );
        for line in account.statement()?.lines() {
            println!("  {line}");
        }
        println!();
    }

    println!("Total held by the ledger: {}", ledger.total_balance()?.round(2));

    Ok(())
}
