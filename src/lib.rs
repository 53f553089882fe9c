//! # Account Ledger
//!
//! An in-memory account ledger: monetary accounts with an immutable
//! transaction history, atomic transfers, periodic interest, and an approval
//! workflow for opening accounts on someone else's behalf.
//!
//! ## Features
//!
//! - **Accounts**: deposits, withdrawals and interest, each paired with exactly one history record
//! - **Transfers**: two-account moves applied atomically under identifier-ordered locks
//! - **Registry**: identifier generation, lookup, deletion and ledger-wide interest sweeps
//! - **Account requests**: reserve an identifier now, approve or deny it later
//! - **Storage abstraction**: the registry sits behind the `AccountStore` trait
//!
//! ## Quick Start
//!
//! ```rust
//! use account_ledger::{Ledger, RequestQueue, RequestStatus};
//! use bigdecimal::BigDecimal;
//!
//! let ledger = Ledger::new();
//! let alice = ledger.create("Alice", "01234567890", "s3cret").unwrap();
//! let bob = ledger.create("Bob", "01987654321", "hunter2").unwrap();
//!
//! alice.deposit(&BigDecimal::from(100)).unwrap();
//! alice.transfer(&bob, &BigDecimal::from(40)).unwrap();
//! assert_eq!(bob.balance().unwrap(), BigDecimal::from(40));
//!
//! let queue = RequestQueue::for_ledger(&ledger);
//! let request = queue.submit(alice.id(), "Carol", "01555555555", "pw").unwrap();
//! let carol = queue.approve(&request, &ledger).unwrap();
//! assert_eq!(carol.id(), request.target_id());
//! assert_eq!(request.status().unwrap(), RequestStatus::Approved);
//! ```

pub mod config;
pub mod ledger;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use config::*;
pub use ledger::*;
pub use traits::*;
pub use types::*;
