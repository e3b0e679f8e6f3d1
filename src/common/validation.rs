// src/common/validation.rs

use std::borrow::Cow;

use rust_decimal::Decimal;
use validator::{ValidateUrl, ValidationError};

fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

// Tetos de valor e quantidade: produtos e somas ficam longe do limite do Decimal.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);
pub const MAX_QUANTITY: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

pub fn bounded_amount(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(error("non_negative", "Must be 0 or greater"));
    }
    if *value > MAX_AMOUNT {
        return Err(error("max_amount", "Must be at most 1,000,000,000"));
    }
    Ok(())
}

pub fn min_quantity(value: &Decimal) -> Result<(), ValidationError> {
    if *value < Decimal::new(1, 2) {
        return Err(error("min_quantity", "Quantity must be greater than 0"));
    }
    if *value > MAX_QUANTITY {
        return Err(error("max_quantity", "Quantity must be at most 1,000,000"));
    }
    Ok(())
}

// Campo de URL opcional: aceita string vazia.
pub fn optional_url(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || value.validate_url() {
        return Ok(());
    }
    Err(error("url", "Please enter a valid URL"))
}
