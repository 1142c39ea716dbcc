//! # Split-Bill Core
//!
//! Settlement engine for splitting shared expenses within a group.
//!
//! ## Features
//!
//! - **Bills and expenses**: create bills with a fixed participant list, then
//!   add, edit, and delete the expenses charged against them
//! - **Validation**: every field is checked before anything is written, with
//!   field-level errors
//! - **Settlement summary**: per-participant paid, owed, and net balance,
//!   always derived from the stored expenses
//! - **Exact money**: `BigDecimal` amounts split in currency minor units, so
//!   balances always sum to zero
//! - **Storage abstraction**: database-agnostic design with trait-based storage
//!
//! ## Quick Start
//!
//! ```rust
//! use splitbill_core::{utils::MemoryStorage, ExpenseDraft, SettlementEngine};
//! use bigdecimal::BigDecimal;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), splitbill_core::SettlementError> {
//! let mut engine = SettlementEngine::new(MemoryStorage::new());
//! let bill = engine.create_bill("Dinner", &["A", "B", "C"]).await?;
//!
//! let everyone = vec!["A".to_string(), "B".to_string(), "C".to_string()];
//! engine
//!     .add_expense(&bill.id, ExpenseDraft::new("Food", BigDecimal::from(90), "A", everyone))
//!     .await?;
//!
//! let summary = engine.compute_summary(&bill.id).await?;
//! assert_eq!(summary.get("A").unwrap().balance, BigDecimal::from(60));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod engine;
pub mod settlement;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use config::*;
pub use engine::*;
pub use settlement::*;
pub use traits::*;
pub use types::*;
