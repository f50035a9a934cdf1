//! Statement builder: identifiers from config only, values as `?` parameters.

mod builder;
pub mod filter;
pub mod params;
pub use builder::*;
pub use filter::{CompareOp, FilterError, Predicate};
pub use params::*;
