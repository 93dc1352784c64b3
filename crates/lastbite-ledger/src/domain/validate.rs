//! Centralized input validation.
//!
//! The transport layer checks request shape only; every domain constraint
//! is enforced here so there is exactly one authoritative rule set.

use super::errors::{MarketError, MarketResult};

/// Maximum length for user and listing names.
pub const MAX_NAME_LEN: usize = 100;

/// A name must be non-empty (after trimming) and at most 100 characters.
pub fn validate_name(name: &str) -> MarketResult<()> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(MarketError::Validation("name must not be empty".into()));
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(MarketError::Validation(format!(
            "name exceeds {} characters",
            MAX_NAME_LEN
        )));
    }
    Ok(())
}

/// Minimal structural email check: one `@` with non-empty local part and
/// a domain containing a dot.
pub fn validate_email(email: &str) -> MarketResult<()> {
    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = parts.next().unwrap_or("");
    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err(MarketError::Validation(format!(
            "invalid email address: {}",
            email
        )));
    }
    Ok(())
}

/// Price must be finite and non-negative.
pub fn validate_price(price: f64) -> MarketResult<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(MarketError::Validation(format!(
            "price must be a non-negative number, got {}",
            price
        )));
    }
    Ok(())
}

/// Purchase quantity must be at least 1.
pub fn validate_quantity(quantity: u32) -> MarketResult<()> {
    if quantity < 1 {
        return Err(MarketError::Validation(
            "quantity must be at least 1".into(),
        ));
    }
    Ok(())
}
