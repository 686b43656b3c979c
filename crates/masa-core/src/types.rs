//! # Domain Types
//!
//! Core domain types used throughout MASA POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   PhoneType     │   │  PhoneOption    │   │   NewInvoice    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  Basic          │   │  OptionA = 1    │   │  company_name   │       │
//! │  │  Standard       │   │  OptionB = 2    │   │  phone_type     │       │
//! │  │  Superior       │   │  None    = 3    │   │  quantity, vat  │       │
//! │  └─────────────────┘   └─────────────────┘   └────────┬────────┘       │
//! │                                                       │ persisted      │
//! │                                              ┌────────▼────────┐       │
//! │                                              │     Invoice     │       │
//! │                                              │  id + details   │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::pricing::{calculate_cost, CostBreakdown, PriceTable};
use crate::validation::{validate_company_name, validate_company_number, validate_quantity};

// =============================================================================
// Phone Type
// =============================================================================

/// The handset models on the counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PhoneType {
    Basic,
    Standard,
    Superior,
}

impl PhoneType {
    /// Every model, in menu order.
    pub const ALL: [PhoneType; 3] = [PhoneType::Basic, PhoneType::Standard, PhoneType::Superior];

    /// Name as stored in the `phone_type` column and used as the price key.
    pub const fn as_str(&self) -> &'static str {
        match self {
            PhoneType::Basic => "Basic",
            PhoneType::Standard => "Standard",
            PhoneType::Superior => "Superior",
        }
    }
}

impl fmt::Display for PhoneType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PhoneType {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        PhoneType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| CoreError::InvalidProductType(s.to_string()))
    }
}

// =============================================================================
// Phone Option
// =============================================================================

/// Pre-installed app bundle chosen with the phones.
///
/// Stored in the `phone_opt` column, and serialized, as its integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum PhoneOption {
    /// 5 apps.
    OptionA,
    /// 10 apps.
    OptionB,
    /// No bundle.
    None,
}

impl PhoneOption {
    /// Every option, in menu order.
    pub const ALL: [PhoneOption; 3] = [PhoneOption::OptionA, PhoneOption::OptionB, PhoneOption::None];

    /// Integer code persisted in `phone_opt`.
    pub const fn code(&self) -> u8 {
        match self {
            PhoneOption::OptionA => 1,
            PhoneOption::OptionB => 2,
            PhoneOption::None => 3,
        }
    }

    /// Maps a persisted or typed-in code back to the option.
    ///
    /// ## Example
    /// ```rust
    /// use masa_core::PhoneOption;
    ///
    /// assert_eq!(PhoneOption::from_code(2).unwrap(), PhoneOption::OptionB);
    /// assert!(PhoneOption::from_code(4).is_err());
    /// ```
    pub fn from_code(code: u8) -> CoreResult<Self> {
        match code {
            1 => Ok(PhoneOption::OptionA),
            2 => Ok(PhoneOption::OptionB),
            3 => Ok(PhoneOption::None),
            other => Err(CoreError::InvalidOption(other)),
        }
    }

    /// Menu label.
    pub const fn label(&self) -> &'static str {
        match self {
            PhoneOption::OptionA => "Option A (5 apps)",
            PhoneOption::OptionB => "Option B (10 apps)",
            PhoneOption::None => "None",
        }
    }
}

impl From<PhoneOption> for u8 {
    fn from(option: PhoneOption) -> u8 {
        option.code()
    }
}

impl TryFrom<u8> for PhoneOption {
    type Error = CoreError;

    fn try_from(code: u8) -> CoreResult<Self> {
        PhoneOption::from_code(code)
    }
}

// =============================================================================
// Invoice
// =============================================================================

/// A validated, fully costed invoice that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewInvoice {
    pub company_name: String,
    /// Company phone number (UK mobile).
    pub company_num: String,
    pub phone_type: PhoneType,
    pub phone_opt: PhoneOption,
    pub quantity: u32,
    pub vat: Money,
    /// Pre-VAT subtotal.
    pub total_cost: Money,
    /// Subtotal plus VAT.
    pub total_cost_vat: Money,
}

impl NewInvoice {
    /// Validates the operator's input and prices the order.
    ///
    /// ## Flow
    /// ```text
    /// company_name ─► validate_company_name ─┐
    /// company_num  ─► validate_company_number┤
    /// quantity     ─► validate_quantity ─────┼─► calculate_cost ─► NewInvoice
    /// phone_type, phone_opt ─────────────────┘
    /// ```
    ///
    /// Any failure returns before a record exists, so nothing half-built can
    /// reach the database.
    pub fn new(
        table: &PriceTable,
        company_name: &str,
        company_num: &str,
        phone_type: PhoneType,
        phone_opt: PhoneOption,
        quantity: u32,
    ) -> CoreResult<Self> {
        validate_company_name(company_name)?;
        validate_company_number(company_num)?;
        validate_quantity(quantity)?;

        let cost = calculate_cost(table, phone_type.as_str(), quantity, phone_opt)?;

        Ok(NewInvoice {
            company_name: company_name.trim().to_string(),
            company_num: company_num.to_string(),
            phone_type,
            phone_opt,
            quantity,
            vat: cost.vat,
            total_cost: cost.subtotal,
            total_cost_vat: cost.total,
        })
    }

    /// The three derived amounts as a breakdown.
    pub fn cost(&self) -> CostBreakdown {
        CostBreakdown {
            subtotal: self.total_cost,
            vat: self.vat,
            total: self.total_cost_vat,
        }
    }
}

/// An invoice as stored, with its row id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: i64,
    #[serde(flatten)]
    pub details: NewInvoice,
}

// =============================================================================
// Unit Tests
// =============================================================================
