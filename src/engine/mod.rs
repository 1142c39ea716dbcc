//! Engine module containing bill management and expense processing

pub mod bill;
pub mod core;
pub mod expense;

pub use bill::*;
pub use self::core::*;
pub use expense::*;
