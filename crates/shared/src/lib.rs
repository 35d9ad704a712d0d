//! Tokoku Shared Types
//!
//! Wire types for the Tokoku backend API and the errors shared by the
//! storefront crates.

pub mod error;
pub mod types;

pub use error::*;
pub use types::*;
