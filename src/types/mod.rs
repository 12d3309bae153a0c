//! Core types for turnplan.

pub mod outcome;
pub mod part;
pub mod tool;
pub mod unit;

pub use outcome::*;
pub use part::*;
pub use tool::*;
pub use unit::*;
