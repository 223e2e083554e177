//! # Money Module
//!
//! Provides the `Money` type for rupee amounts.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Paise (1 rupee = 100 paise)                      │
//! │    Summing order totals for the "payments due" card never drifts        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Indian Digit Grouping
//! Order totals are shown the way the marketplace shows them:
//! the last three digits form one group, every group before that has two.
//! ```text
//!   52500    → ₹52,500
//!   110000   → ₹1,10,000
//!   6000000  → ₹60,00,000
//! ```
//!
//! ## Usage
//! ```rust
//! use mandi_core::money::Money;
//!
//! let total = Money::from_rupees(110_000);
//! assert_eq!(total.to_string(), "₹1,10,000");
//!
//! let parsed: Money = "₹52,500".parse().unwrap();
//! assert_eq!(parsed.rupees(), 52_500);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;

use crate::error::CoreError;

/// Rupee sign used in formatted amounts.
pub const RUPEE_SIGN: char = '₹';

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in paise (the smallest rupee unit).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for refunds and adjustments
/// - **Single field tuple struct**: Zero-cost abstraction over i64
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paise.
    #[inline]
    pub const fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    /// Creates a Money value from whole rupees.
    ///
    /// ## Example
    /// ```rust
    /// use mandi_core::money::Money;
    ///
    /// assert_eq!(Money::from_rupees(35).paise(), 3500);
    /// ```
    #[inline]
    pub const fn from_rupees(rupees: i64) -> Self {
        Money(rupees * 100)
    }

    /// Returns the value in paise.
    #[inline]
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Returns the whole-rupee portion (truncated toward zero).
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the paise portion (always 0-99).
    #[inline]
    pub const fn paise_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

}

/// Groups a non-negative integer with Indian separators (`12,34,567`).
fn group_indian(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);

    // Walk the head from the right in pairs.
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Formats as `₹1,10,000` (whole rupees) or `₹52,500.50` (with paise).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let whole = group_indian(self.rupees().unsigned_abs());

        if self.paise_part() == 0 {
            write!(f, "{}{}{}", sign, RUPEE_SIGN, whole)
        } else {
            write!(f, "{}{}{}.{:02}", sign, RUPEE_SIGN, whole, self.paise_part())
        }
    }
}

/// Parses the formatted representation back into paise.
///
/// Accepts an optional leading `-`, an optional `₹`, digit separators and
/// at most two decimal places.
impl FromStr for Money {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        let (negative, rest) = match input.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, input),
        };
        let rest = rest.strip_prefix(RUPEE_SIGN).unwrap_or(rest).trim();
        let cleaned: String = rest.chars().filter(|c| *c != ',').collect();

        let (whole, fraction) = match cleaned.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (cleaned.as_str(), ""),
        };

        if whole.is_empty() && fraction.is_empty() {
            return Err(CoreError::invalid_amount(s, "no digits"));
        }

        if !whole.chars().all(|c| c.is_ascii_digit())
            || !fraction.chars().all(|c| c.is_ascii_digit())
        {
            return Err(CoreError::invalid_amount(s, "not a number"));
        }
        if fraction.len() > 2 {
            return Err(CoreError::invalid_amount(s, "more than two decimal places"));
        }

        let rupees: i64 = if whole.is_empty() {
            0
        } else {
            whole
                .parse()
                .map_err(|_| CoreError::invalid_amount(s, "amount too large"))?
        };
        let paise: i64 = match fraction.len() {
            0 => 0,
            1 => fraction
                .parse::<i64>()
                .map_err(|_| CoreError::invalid_amount(s, "not a number"))?
                * 10,
            _ => fraction
                .parse()
                .map_err(|_| CoreError::invalid_amount(s, "not a number"))?,
        };

        let total = rupees
            .checked_mul(100)
            .and_then(|p| p.checked_add(paise))
            .ok_or_else(|| CoreError::invalid_amount(s, "amount too large"))?;

        Ok(Money(if negative { -total } else { total }))
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Saturates at the i64 bounds instead of overflowing.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rupees() {
        let money = Money::from_rupees(220);
        assert_eq!(money.paise(), 22_000);
        assert_eq!(money.rupees(), 220);
        assert_eq!(money.paise_part(), 0);
    }

    #[test]
    fn test_display_indian_grouping() {
        assert_eq!(Money::from_rupees(0).to_string(), "₹0");
        assert_eq!(Money::from_rupees(999).to_string(), "₹999");
        assert_eq!(Money::from_rupees(7_000).to_string(), "₹7,000");
        assert_eq!(Money::from_rupees(52_500).to_string(), "₹52,500");
        assert_eq!(Money::from_rupees(110_000).to_string(), "₹1,10,000");
        assert_eq!(Money::from_rupees(6_000_000).to_string(), "₹60,00,000");
        assert_eq!(Money::from_rupees(12_345_678).to_string(), "₹1,23,45,678");
    }

    #[test]
    fn test_display_with_paise_and_sign() {
        assert_eq!(Money::from_paise(5_250_050).to_string(), "₹52,500.50");
        assert_eq!(Money::from_paise(-705).to_string(), "-₹7.05");
    }

    #[test]
    fn test_parse_formatted_totals() {
        assert_eq!("₹52,500".parse::<Money>().unwrap(), Money::from_rupees(52_500));
        assert_eq!("₹1,10,000".parse::<Money>().unwrap(), Money::from_rupees(110_000));
        assert_eq!("4400".parse::<Money>().unwrap(), Money::from_rupees(4_400));
        assert_eq!("₹12.5".parse::<Money>().unwrap(), Money::from_paise(1_250));
        assert_eq!("-₹7.05".parse::<Money>().unwrap(), Money::from_paise(-705));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("".parse::<Money>().is_err());
        assert!("₹".parse::<Money>().is_err());
        assert!("₹.".parse::<Money>().is_err());
        assert!(".".parse::<Money>().is_err());
        assert!("-,".parse::<Money>().is_err());
        assert!("₹1,2x,000".parse::<Money>().is_err());
        assert!("₹10.505".parse::<Money>().is_err());
    }

    #[test]
    fn test_sum() {
        let total: Money = [Money::from_rupees(52_500), Money::from_rupees(110_000)]
            .into_iter()
            .sum();
        assert_eq!(total.to_string(), "₹1,62,500");
    }

    #[test]
    fn test_parse_fraction_only() {
        assert_eq!("₹.5".parse::<Money>().unwrap(), Money::from_paise(50));
    }

    #[test]
    fn test_sum_saturates() {
        let huge: Money = "₹90,000,000,000,000,000".parse().unwrap();
        let total: Money = [huge, huge, Money::from_rupees(1)].into_iter().sum();
        assert_eq!(total, Money::from_paise(i64::MAX));

        let debt = Money::from_paise(i64::MIN);
        assert_eq!(debt + Money::from_paise(-1), debt);
    }
}
