//! Settlement computation and amount formatting

pub mod format;
pub mod summary;

pub use format::*;
pub use summary::*;
