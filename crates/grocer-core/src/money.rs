//! # Money
//!
//! Integer money arithmetic. All monetary values are cents (`i64`); floating
//! point never touches money. `1099` means 10.99 in the store currency.
//!
//! Shelf prices are tax-inclusive, so the only tax math in the system is the
//! display-time breakdown on the invoice: `net = total / (1 + rate)`,
//! `tax = total - net`. That lives here as [`Money::inclusive_tax_breakdown`]
//! because it is pure arithmetic, even though only the presentation layer
//! consumes it.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// 1 basis point = 0.01% = 1/10000. 1400 bps = 14%, the rate baked into
/// shelf prices.
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

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

// =============================================================================
// Money
// =============================================================================

/// A monetary amount in cents.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents. Never construct from floats.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the amount in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Zero amount.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks whether the amount is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks whether the amount is negative.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies a unit price by a quantity, producing a line total.
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Splits a tax-inclusive total into net and tax parts.
    ///
    /// `net = total / (1 + rate)` rounded to the nearest cent;
    /// `tax = total - net` so the parts always re-sum to the total.
    pub fn inclusive_tax_breakdown(&self, rate: TaxRate) -> TaxBreakdown {
        let divisor = 10_000_i64 + rate.bps() as i64;
        // Round half up in i128 to dodge overflow on large totals.
        let net = ((self.0 as i128 * 10_000 + (divisor as i128) / 2) / divisor as i128) as i64;
        TaxBreakdown {
            net: Money(net),
            tax: Money(self.0 - net),
        }
    }
}

/// The net/tax split of a tax-inclusive amount. Display-only, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaxBreakdown {
    pub net: Money,
    pub tax: Money,
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), Add::add)
    }
}

impl fmt::Display for Money {
    /// Formats as a plain decimal amount, e.g. `12.34` or `-0.05`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
