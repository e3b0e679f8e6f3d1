pub mod error;
pub mod filter;
pub mod serde_utils;
pub mod validation;
