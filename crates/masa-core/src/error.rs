//! # Error Types
//!
//! Domain-specific error types for masa-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  masa-core errors (this file)                                          │
//! │  ├── CoreError        - Pricing / domain failures                      │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  masa-db errors (separate crate)                                       │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── CliError         - What the operator sees                         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError ─┐                                  │
//! │                           DbError ──┴──► CliError → terminal           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::types::PhoneOption;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// Raised before anything touches the database, so a failed calculation
/// never leaves a partial invoice behind.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product name has no entry in the price table.
    #[error("Invalid phone type selected: {0}")]
    InvalidProductType(String),

    /// Option code outside the closed set {1, 2, 3}.
    #[error("Invalid phone option code: {0}")]
    InvalidOption(u8),

    /// The price table has no surcharge for a known option.
    ///
    /// ## When This Occurs
    /// Only with a hand-built [`PriceTable`](crate::pricing::PriceTable) that
    /// left an option out. The standard table covers every option.
    #[error("Price table has no surcharge for {0:?}")]
    MissingSurcharge(PhoneOption),

    /// An order total does not fit in `i64` pence.
    #[error("Order of {quantity} x {product} is too large to price")]
    AmountOverflow { product: String, quantity: u32 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Used for early validation before any pricing or persistence runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Numeric value is not a whole multiple of the step.
    #[error("{field} must be in intervals of {step}")]
    NotMultipleOf { field: String, step: i64 },

    /// Invalid format (e.g. a phone number that isn't a UK mobile).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g. a company that already has an invoice).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
