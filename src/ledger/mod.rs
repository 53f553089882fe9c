//! Ledger module containing accounts, the registry and the request workflow

pub mod account;
pub mod core;
pub mod ids;
pub mod request;
pub mod transaction;

pub use account::*;
pub use self::core::*;
pub use ids::*;
pub use request::*;
pub use transaction::Statement;
