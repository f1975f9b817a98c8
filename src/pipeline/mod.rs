//! Pipeline module - table loading and the two harmonization transforms

pub mod columns;
pub mod error;
pub mod join;
pub mod loader;
pub mod threshold;
pub mod top_values;

pub use columns::*;
pub use error::*;
pub use join::*;
pub use loader::*;
pub use threshold::*;
pub use top_values::*;
