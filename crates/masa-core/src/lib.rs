//! # masa-core: Pure Business Logic for MASA POS
//!
//! Everything the invoicing counter needs to know about money, phones and
//! prices, with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        MASA POS Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/cli (`masa`)                            │   │
//! │  │    Menu ──► Company prompts ──► Phone/Option ──► Quantity       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ masa-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  pricing  │  │ validation│  │   │
//! │  │   │ PhoneType │  │   Money   │  │PriceTable │  │  company  │  │   │
//! │  │   │ NewInvoice│  │  TaxRate  │  │ calculate │  │  quantity │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO TERMINAL • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    masa-db (Database Layer)                     │   │
//! │  │            SQLite access layer, invoice repository              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (PhoneType, PhoneOption, NewInvoice, Invoice)
//! - [`money`] - Money in integer pence, TaxRate in basis points
//! - [`pricing`] - Price table and the cost calculator
//! - [`error`] - Domain error types
//! - [`validation`] - Input rules for company, phone number and quantity
//!
//! ## Example Usage
//!
//! ```rust
//! use masa_core::pricing::{calculate_cost, PriceTable};
//! use masa_core::PhoneOption;
//!
//! let table = PriceTable::standard();
//! let cost = calculate_cost(&table, "Superior", 5, PhoneOption::OptionA).unwrap();
//!
//! // (950 + 30) × 5 = £4900.00, VAT £980.00
//! assert_eq!(cost.subtotal.pence(), 490_000);
//! assert_eq!(cost.vat.pence(), 98_000);
//! assert_eq!(cost.total.pence(), 588_000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{Money, TaxRate};
pub use pricing::{calculate_cost, CostBreakdown, PriceTable};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// UK standard VAT rate (20%).
pub const VAT_RATE: TaxRate = TaxRate::from_bps(2000);

/// Smallest order the counter accepts.
pub const MIN_QUANTITY: u32 = 5;

/// Largest order the counter accepts.
pub const MAX_QUANTITY: u32 = 100;

/// Phones are sold in boxes of this many.
pub const QUANTITY_STEP: u32 = 5;
