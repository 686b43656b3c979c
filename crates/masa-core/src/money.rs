//! # Money Module
//!
//! Provides the `Money` and `TaxRate` types for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Pence                                            │
//! │    £980.00 × 5 = 98000p × 5 = 490000p  (exact)                          │
//! │    VAT 20% of 490000p = 98000p          (rounded once, to the penny)    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The invoice table stores pounds in REAL columns, and JSON output carries
//! the same pounds figure. [`Money::to_pounds_f64`] and
//! [`Money::from_pounds_f64`] exist only for those boundaries.
//!
//! ## Usage
//! ```rust
//! use masa_core::money::Money;
//!
//! let unit = Money::from_pounds(250);
//! let line = unit.multiply_quantity(10).unwrap();
//! assert_eq!(line.pence(), 250_000);
//! assert_eq!(line.to_string(), "£2500.00");
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign, Sub};

// =============================================================================
// Money Type
// =============================================================================

/// A GBP amount in pence.
///
/// ## Design Decisions
/// - **i64 (signed)**: leaves room for credit notes
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Serialized as pounds**: `588000p` is written as `5880.0`, matching the
///   REAL columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from pence.
    ///
    /// ## Example
    /// ```rust
    /// use masa_core::money::Money;
    ///
    /// let price = Money::from_pence(1099); // £10.99
    /// assert_eq!(price.pence(), 1099);
    /// ```
    #[inline]
    pub const fn from_pence(pence: i64) -> Self {
        Money(pence)
    }

    /// Creates a Money value from whole pounds.
    #[inline]
    pub const fn from_pounds(pounds: i64) -> Self {
        Money(pounds * 100)
    }

    /// Converts a stored REAL pounds value back to pence, rounding to the
    /// nearest penny.
    ///
    /// ## Example
    /// ```rust
    /// use masa_core::money::Money;
    ///
    /// assert_eq!(Money::from_pounds_f64(5880.0).pence(), 588_000);
    /// assert_eq!(Money::from_pounds_f64(0.1 + 0.2).pence(), 30);
    /// ```
    pub fn from_pounds_f64(pounds: f64) -> Self {
        Money((pounds * 100.0).round() as i64)
    }

    /// Returns the value as pounds, for storage in a REAL column.
    pub fn to_pounds_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns the value in pence.
    #[inline]
    pub const fn pence(&self) -> i64 {
        self.0
    }

    /// Returns the whole-pounds portion.
    #[inline]
    pub const fn pounds(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the pence portion (always 0-99).
    #[inline]
    pub const fn pence_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Adds two amounts, `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Money> {
        match self.0.checked_add(other.0) {
            Some(pence) => Some(Money(pence)),
            None => None,
        }
    }

    /// Calculates tax, rounding half up to the penny.
    ///
    /// `None` when the tax does not fit in an `i64` of pence.
    ///
    /// ## Implementation
    /// Integer math: `(amount * bps + 5000) / 10000`.
    /// The +5000 provides rounding (5000/10000 = 0.5).
    ///
    /// ## Example
    /// ```rust
    /// use masa_core::money::{Money, TaxRate};
    ///
    /// let subtotal = Money::from_pence(1003); // £10.03
    /// let vat = subtotal.calculate_tax(TaxRate::from_bps(2000)).unwrap();
    /// // £10.03 × 20% = £2.006 → £2.01
    /// assert_eq!(vat.pence(), 201);
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Option<Money> {
        // i128 so large orders cannot overflow mid-calculation
        let tax_pence = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        i64::try_from(tax_pence).ok().map(Money::from_pence)
    }

    /// Multiplies money by a quantity, `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use masa_core::money::Money;
    ///
    /// let unit_price = Money::from_pounds(980);
    /// assert_eq!(unit_price.multiply_quantity(5).unwrap().pence(), 490_000);
    /// assert!(Money::from_pence(i64::MAX).multiply_quantity(2).is_none());
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Option<Self> {
        match self.0.checked_mul(qty as i64) {
            Some(pence) => Some(Money(pence)),
            None => None,
        }
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_pounds_f64())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        f64::deserialize(deserializer).map(Money::from_pounds_f64)
    }
}

/// Shows money as pounds, e.g. `£5880.00`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}£{}.{:02}", sign, self.pounds().abs(), self.pence_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 2000 bps = 20% (UK standard VAT)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pence() {
        let money = Money::from_pence(1099);
        assert_eq!(money.pence(), 1099);
        assert_eq!(money.pounds(), 10);
        assert_eq!(money.pence_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_pence(1099)), "£10.99");
        assert_eq!(format!("{}", Money::from_pounds(5880)), "£5880.00");
        assert_eq!(format!("{}", Money::from_pence(-550)), "-£5.50");
        assert_eq!(format!("{}", Money::zero()), "£0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_pence(1000);
        let b = Money::from_pence(500);

        assert_eq!((a + b).pence(), 1500);
        assert_eq!((a - b).pence(), 500);

        let mut c = a;
        c += b;
        assert_eq!(c.pence(), 1500);
    }

    #[test]
    fn test_vat_whole_pounds() {
        let subtotal = Money::from_pounds(2500);
        let vat = subtotal.calculate_tax(TaxRate::from_bps(2000)).unwrap();
        assert_eq!(vat, Money::from_pounds(500));
    }

    #[test]
    fn test_vat_rounds_half_up() {
        // 2.5p of VAT on 12.5p → 3p
        let vat = Money::from_pence(1250).calculate_tax(TaxRate::from_bps(20)).unwrap();
        assert_eq!(vat.pence(), 3);
    }

    #[test]
    fn test_pounds_f64_boundary() {
        let amount = Money::from_pence(98_000);
        assert_eq!(amount.to_pounds_f64(), 980.0);
        assert_eq!(Money::from_pounds_f64(amount.to_pounds_f64()), amount);
        assert_eq!(Money::from_pounds_f64(12.345_000_1).pence(), 1235);
    }

    #[test]
    fn test_overflow_is_reported() {
        let huge = Money::from_pence(i64::MAX / 2 + 1);

        assert_eq!(Money::from_pounds(950).multiply_quantity(100), Some(Money::from_pounds(95_000)));
        assert_eq!(huge.multiply_quantity(2), None);
        assert_eq!(huge.checked_add(huge), None);
        assert_eq!(Money::from_pence(i64::MAX).calculate_tax(TaxRate::from_bps(20_000)), None);
    }

    #[test]
    fn test_serializes_as_pounds() {
        assert_eq!(serde_json::to_string(&Money::from_pence(588_000)).unwrap(), "5880.0");
        assert_eq!(serde_json::to_string(&Money::from_pence(1099)).unwrap(), "10.99");

        let parsed: Money = serde_json::from_str("2.01").unwrap();
        assert_eq!(parsed.pence(), 201);
    }
}
