//! # Pricing Module
//!
//! The price table and the cost calculator.
//!
//! ## Calculation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  calculate_cost("Superior", 5, OptionA)                                 │
//! │                                                                         │
//! │  base price     Superior ──► £950      (missing? InvalidProductType)    │
//! │  surcharge      OptionA  ──► £30       (missing? MissingSurcharge)      │
//! │                                                                         │
//! │  subtotal = (950 + 30) × 5       = £4900.00                             │
//! │  vat      = 4900.00 × 20%        = £980.00                              │
//! │  total    = subtotal + vat       = £5880.00                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Amounts are integer pence, so the subtotal is exact and VAT is the only
//! value that gets rounded.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::{CoreError, CoreResult};
use crate::money::{Money, TaxRate};
use crate::types::{PhoneOption, PhoneType};
use crate::VAT_RATE;

// =============================================================================
// Price Table
// =============================================================================

/// Immutable unit prices, per-unit option surcharges and the VAT rate.
///
/// ## Usage
/// ```rust
/// use masa_core::{Money, PhoneOption, PriceTable, TaxRate};
///
/// let standard = PriceTable::standard();
/// assert_eq!(standard.base_price("Standard"), Some(Money::from_pounds(450)));
///
/// // Tests can price against a different table
/// let promo = PriceTable::builder()
///     .base_price("Basic", Money::from_pounds(200))
///     .surcharge(PhoneOption::None, Money::zero())
///     .vat_rate(TaxRate::from_bps(0))
///     .build();
/// assert_eq!(promo.base_price("Superior"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceTable {
    base_prices: BTreeMap<String, Money>,
    surcharges: BTreeMap<PhoneOption, Money>,
    vat_rate: TaxRate,
}

impl PriceTable {
    /// The counter's price list.
    ///
    /// | Model    | Unit  |   | Option  | Surcharge |
    /// |----------|-------|---|---------|-----------|
    /// | Basic    | £250  |   | OptionA | £30       |
    /// | Standard | £450  |   | OptionB | £50       |
    /// | Superior | £950  |   | None    | £0        |
    pub fn standard() -> Self {
        PriceTable::builder()
            .base_price(PhoneType::Basic.as_str(), Money::from_pounds(250))
            .base_price(PhoneType::Standard.as_str(), Money::from_pounds(450))
            .base_price(PhoneType::Superior.as_str(), Money::from_pounds(950))
            .surcharge(PhoneOption::OptionA, Money::from_pounds(30))
            .surcharge(PhoneOption::OptionB, Money::from_pounds(50))
            .surcharge(PhoneOption::None, Money::zero())
            .vat_rate(VAT_RATE)
            .build()
    }

    /// Starts an empty table (VAT defaults to the UK rate).
    pub fn builder() -> PriceTableBuilder {
        PriceTableBuilder {
            table: PriceTable {
                base_prices: BTreeMap::new(),
                surcharges: BTreeMap::new(),
                vat_rate: VAT_RATE,
            },
        }
    }

    /// Unit price for a product name.
    pub fn base_price(&self, product: &str) -> Option<Money> {
        self.base_prices.get(product).copied()
    }

    /// Per-unit surcharge for an option.
    pub fn surcharge(&self, option: PhoneOption) -> Option<Money> {
        self.surcharges.get(&option).copied()
    }

    pub fn vat_rate(&self) -> TaxRate {
        self.vat_rate
    }
}

impl Default for PriceTable {
    fn default() -> Self {
        PriceTable::standard()
    }
}

/// Builder for [`PriceTable`].
#[derive(Debug, Clone)]
pub struct PriceTableBuilder {
    table: PriceTable,
}

impl PriceTableBuilder {
    /// Sets the unit price of a product.
    pub fn base_price(mut self, product: impl Into<String>, price: Money) -> Self {
        self.table.base_prices.insert(product.into(), price);
        self
    }

    /// Sets the per-unit surcharge of an option.
    pub fn surcharge(mut self, option: PhoneOption, price: Money) -> Self {
        self.table.surcharges.insert(option, price);
        self
    }

    /// Sets the VAT rate.
    pub fn vat_rate(mut self, rate: TaxRate) -> Self {
        self.table.vat_rate = rate;
        self
    }

    pub fn build(self) -> PriceTable {
        self.table
    }
}

// =============================================================================
// Cost Calculator
// =============================================================================

/// Subtotal, VAT and total of one order, each rounded to the penny.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CostBreakdown {
    /// Pre-VAT amount.
    pub subtotal: Money,
    pub vat: Money,
    /// Subtotal plus VAT.
    pub total: Money,
}

/// Prices an order against a table.
///
/// ## Errors
/// - [`CoreError::InvalidProductType`] when `phone_type` has no base price
/// - [`CoreError::MissingSurcharge`] when the table has no entry for `option`
/// - [`CoreError::AmountOverflow`] when a substituted table's prices are too
///   large to total in pence
///
/// No partial result is ever returned.
///
/// ## Example
/// ```rust
/// use masa_core::{calculate_cost, Money, PhoneOption, PriceTable};
///
/// let cost = calculate_cost(&PriceTable::standard(), "Basic", 10, PhoneOption::None).unwrap();
/// assert_eq!(cost.subtotal, Money::from_pounds(2500));
/// assert_eq!(cost.vat, Money::from_pounds(500));
/// assert_eq!(cost.total, Money::from_pounds(3000));
/// ```
pub fn calculate_cost(
    table: &PriceTable,
    phone_type: &str,
    quantity: u32,
    option: PhoneOption,
) -> CoreResult<CostBreakdown> {
    let base = table
        .base_price(phone_type)
        .ok_or_else(|| CoreError::InvalidProductType(phone_type.to_string()))?;

    let surcharge = table
        .surcharge(option)
        .ok_or(CoreError::MissingSurcharge(option))?;

    let overflow = || CoreError::AmountOverflow {
        product: phone_type.to_string(),
        quantity,
    };

    let subtotal = base
        .checked_add(surcharge)
        .and_then(|unit| unit.multiply_quantity(quantity))
        .ok_or_else(overflow)?;
    let vat = subtotal
        .calculate_tax(table.vat_rate())
        .ok_or_else(overflow)?;
    let total = subtotal.checked_add(vat).ok_or_else(overflow)?;

    Ok(CostBreakdown {
        subtotal,
        vat,
        total,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MAX_QUANTITY, MIN_QUANTITY, QUANTITY_STEP};

    #[test]
    fn test_basic_ten_no_option() {
        let cost = calculate_cost(&PriceTable::standard(), "Basic", 10, PhoneOption::None).unwrap();

        assert_eq!(cost.subtotal.to_string(), "£2500.00");
        assert_eq!(cost.vat.to_string(), "£500.00");
        assert_eq!(cost.total.to_string(), "£3000.00");
    }

    #[test]
    fn test_superior_five_option_a() {
        let cost =
            calculate_cost(&PriceTable::standard(), "Superior", 5, PhoneOption::OptionA).unwrap();

        assert_eq!(cost.subtotal, Money::from_pounds(4900));
        assert_eq!(cost.vat, Money::from_pounds(980));
        assert_eq!(cost.total, Money::from_pounds(5880));
    }

    #[test]
    fn test_standard_option_b() {
        let cost =
            calculate_cost(&PriceTable::standard(), "Standard", 20, PhoneOption::OptionB).unwrap();

        // (450 + 50) × 20 = 10000
        assert_eq!(cost.subtotal, Money::from_pounds(10_000));
        assert_eq!(cost.vat, Money::from_pounds(2_000));
        assert_eq!(cost.total, Money::from_pounds(12_000));
    }

    #[test]
    fn test_unknown_product_fails() {
        let err = calculate_cost(&PriceTable::standard(), "Unknown", 5, PhoneOption::None)
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidProductType(name) if name == "Unknown"));
    }

    #[test]
    fn test_product_lookup_is_case_sensitive() {
        assert!(calculate_cost(&PriceTable::standard(), "basic", 5, PhoneOption::None).is_err());
    }

    #[test]
    fn test_missing_surcharge_fails_instead_of_defaulting() {
        let table = PriceTable::builder()
            .base_price("Basic", Money::from_pounds(250))
            .surcharge(PhoneOption::None, Money::zero())
            .build();

        let err = calculate_cost(&table, "Basic", 5, PhoneOption::OptionB).unwrap_err();
        assert!(matches!(err, CoreError::MissingSurcharge(PhoneOption::OptionB)));
    }

    #[test]
    fn test_overflowing_table_fails_instead_of_panicking() {
        let table = PriceTable::builder()
            .base_price("Basic", Money::from_pence(i64::MAX / 50))
            .surcharge(PhoneOption::None, Money::zero())
            .build();

        let err = calculate_cost(&table, "Basic", 100, PhoneOption::None).unwrap_err();
        assert!(matches!(
            err,
            CoreError::AmountOverflow { ref product, quantity: 100 } if product == "Basic"
        ));

        // Fits as a subtotal, but not once VAT is added
        let table = PriceTable::builder()
            .base_price("Basic", Money::from_pence(i64::MAX / 5))
            .surcharge(PhoneOption::None, Money::zero())
            .build();
        assert!(matches!(
            calculate_cost(&table, "Basic", 5, PhoneOption::None),
            Err(CoreError::AmountOverflow { .. })
        ));
    }

    #[test]
    fn test_substituted_table() {
        let table = PriceTable::builder()
            .base_price("Basic", Money::from_pence(333))
            .surcharge(PhoneOption::None, Money::zero())
            .vat_rate(TaxRate::from_bps(1750))
            .build();

        let cost = calculate_cost(&table, "Basic", 5, PhoneOption::None).unwrap();
        // 1665p × 17.5% = 291.375p → 291p
        assert_eq!(cost.subtotal.pence(), 1665);
        assert_eq!(cost.vat.pence(), 291);
        assert_eq!(cost.total.pence(), 1956);
    }

    #[test]
    fn test_totals_invariant_for_every_valid_order() {
        let table = PriceTable::standard();

        for phone_type in PhoneType::ALL {
            for option in PhoneOption::ALL {
                for quantity in (MIN_QUANTITY..=MAX_QUANTITY).step_by(QUANTITY_STEP as usize) {
                    let cost = calculate_cost(&table, phone_type.as_str(), quantity, option)
                        .unwrap();
                    let exact_vat = cost.subtotal.pence() as f64 * 0.20;

                    assert_eq!(cost.total, cost.subtotal + cost.vat);
                    assert_eq!(cost.vat.pence(), exact_vat.round() as i64);
                }
            }
        }
    }

    #[test]
    fn test_calculation_is_deterministic() {
        let table = PriceTable::standard();
        let first = calculate_cost(&table, "Standard", 35, PhoneOption::OptionA).unwrap();
        let second = calculate_cost(&table, "Standard", 35, PhoneOption::OptionA).unwrap();
        assert_eq!(first, second);
    }
}
