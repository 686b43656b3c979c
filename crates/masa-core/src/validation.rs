//! # Validation Module
//!
//! Input rules for the invoice form.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Terminal prompt (apps/cli)                                   │
//! │  └── Re-asks until THIS MODULE accepts the answer                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: NewInvoice::new                                              │
//! │  └── Runs THIS MODULE again for scripted input                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── UNIQUE company_name                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use regex::Regex;
use std::sync::OnceLock;

use crate::error::ValidationError;
use crate::{MAX_QUANTITY, MIN_QUANTITY, QUANTITY_STEP};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// UK mobile, national `07…` or international `447…` form.
const UK_MOBILE_PATTERN: &str = r"^(07[0-9]{8,12}|447[0-9]{7,11})$";

fn uk_mobile() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(UK_MOBILE_PATTERN).expect("UK mobile pattern is valid"))
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a company name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most 200 characters
///
/// ## Example
/// ```rust
/// use masa_core::validation::validate_company_name;
///
/// assert!(validate_company_name("Acme Ltd").is_ok());
/// assert!(validate_company_name("   ").is_err());
/// ```
pub fn validate_company_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "company_name".to_string(),
        });
    }

    if name.chars().count() > 200 {
        return Err(ValidationError::TooLong {
            field: "company_name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a company phone number.
///
/// ## Rules
/// - `07` followed by 8-12 digits, or
/// - `447` followed by 7-11 digits
/// - Digits only, no spaces or `+`
///
/// ## Example
/// ```rust
/// use masa_core::validation::validate_company_number;
///
/// assert!(validate_company_number("07123456789").is_ok());
/// assert!(validate_company_number("447123456789").is_ok());
/// assert!(validate_company_number("+447123456789").is_err());
/// ```
pub fn validate_company_number(number: &str) -> ValidationResult<()> {
    if number.is_empty() {
        return Err(ValidationError::Required {
            field: "company_num".to_string(),
        });
    }

    if !uk_mobile().is_match(number) {
        return Err(ValidationError::InvalidFormat {
            field: "company_num".to_string(),
            reason: "must be a UK mobile number (07XXXXXXXXX or 447XXXXXXXXX)".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates an order quantity.
///
/// ## Rules
/// - Between MIN_QUANTITY (5) and MAX_QUANTITY (100)
/// - Whole boxes of QUANTITY_STEP (5)
///
/// ## User Workflow
/// ```text
/// Operator enters quantity: 12
///      │
///      ▼
/// validate_quantity(12) ← THIS FUNCTION
///      │
///      ├── < 5 or > 100? → "quantity must be between 5 and 100"
///      │
///      ├── 12 % 5 != 0?  → "quantity must be in intervals of 5"
///      │
///      └── OK → price the order
/// ```
pub fn validate_quantity(qty: u32) -> ValidationResult<()> {
    if !(MIN_QUANTITY..=MAX_QUANTITY).contains(&qty) {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: MIN_QUANTITY as i64,
            max: MAX_QUANTITY as i64,
        });
    }

    if qty % QUANTITY_STEP != 0 {
        return Err(ValidationError::NotMultipleOf {
            field: "quantity".to_string(),
            step: QUANTITY_STEP as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
