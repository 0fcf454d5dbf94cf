//! Money amounts as integer cents.

use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::error::BudgetError;

/// Signed amount in **integer cents**.
///
/// Every amount in the store and in the aggregates uses this type, so totals
/// and balances add up exactly (`6500 - 2603.26` is `3896.74`, not
/// `3896.7400000000002`).
///
/// Zero and negative amounts are valid. Parsed amounts are bounded by
/// [`Money::MAX`] in absolute value, so sums of realistic record counts stay
/// exact; arithmetic past `i64` saturates instead of wrapping.
///
/// Parsing accepts `.` or `,` as decimal separator:
///
/// ```rust
/// use budget_core::Money;
///
/// assert_eq!("620,50".parse::<Money>().unwrap().cents(), 62050);
/// assert_eq!("1852.76".parse::<Money>().unwrap().cents(), 185276);
/// assert!("abc".parse::<Money>().is_err());
/// ```
///
/// Serialized as a plain number in currency units (`620.5`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "f64", try_from = "f64")]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Largest amount accepted from input: one trillion units.
    pub const MAX: Money = Money(1_000_000_000_000 * 100);

    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Whole currency units, e.g. `Money::units(4000)`.
    pub const fn units(units: i64) -> Self {
        Self(units * 100)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    pub fn as_f64(self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Converts a float amount, rounding to the nearest cent.
    ///
    /// NaN and infinities are rejected.
    pub fn from_f64(value: f64) -> Result<Self, BudgetError> {
        if !value.is_finite() {
            return Err(BudgetError::validation("amount must be a finite number"));
        }
        let cents = (value * 100.0).round();
        if cents.abs() > Self::MAX.0 as f64 {
            return Err(BudgetError::validation("amount too large"));
        }
        Ok(Self(cents as i64))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Self::Output {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Self::Output {
        Money(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 = self.0.saturating_sub(rhs.0);
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Self::Output {
        Money(self.0.saturating_neg())
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl From<Money> for f64 {
    fn from(value: Money) -> Self {
        value.as_f64()
    }
}

impl TryFrom<f64> for Money {
    type Error = BudgetError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Money::from_f64(value)
    }
}

impl FromStr for Money {
    type Err = BudgetError;

    /// Parses user input such as `"800"`, `"620,50"`, `"-30.5"` or `".5"`.
    ///
    /// At most one decimal separator. Digits past the second decimal are
    /// rounded half away from zero.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || BudgetError::validation(format!("\"{}\" is not a number", s.trim()));
        let overflow = || BudgetError::validation("amount too large");

        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(BudgetError::validation("amount is required"));
        }

        let (negative, rest) = match trimmed.strip_prefix('-') {
            Some(stripped) => (true, stripped.trim_start()),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed).trim_start()),
        };

        let rest = rest.replace(',', ".");
        let mut parts = rest.split('.');
        let units_str = parts.next().unwrap_or_default();
        let frac_str = parts.next().unwrap_or_default();
        if parts.next().is_some() {
            return Err(invalid());
        }
        if units_str.is_empty() && frac_str.is_empty() {
            return Err(invalid());
        }
        let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if !all_digits(units_str) || !all_digits(frac_str) {
            return Err(invalid());
        }

        let units: i64 = if units_str.is_empty() {
            0
        } else {
            units_str.parse().map_err(|_| overflow())?
        };

        let mut digits = frac_str.bytes().map(|b| i64::from(b - b'0'));
        let tenths = digits.next().unwrap_or(0);
        let hundredths = digits.next().unwrap_or(0);
        let round_up = digits.next().is_some_and(|d| d >= 5);
        let cents = tenths * 10 + hundredths + i64::from(round_up);

        let total = units
            .checked_mul(100)
            .and_then(|v| v.checked_add(cents))
            .filter(|v| *v <= Self::MAX.0)
            .ok_or_else(overflow)?;

        Ok(Money(if negative { -total } else { total }))
    }
}
