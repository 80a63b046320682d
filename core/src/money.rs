// Copyright the savingfunds contributors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

//! Exact decimal money arithmetic.
//!
//! Backed by [`BigDecimal`] rather than a float: the distribution algorithms
//! divide by saving rates repeatedly, and floating point drift would break
//! the conservation property (`allocated + remainder == input`, to the last
//! cent) that every caller of this crate relies on.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::str::FromStr;

use bigdecimal::{BigDecimal, RoundingMode, Zero};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Working precision for intermediate division results, matching the
/// `getcontext().prec = 100` set once at process startup by the tool this
/// crate reimplements. Never changed after startup.
pub const WORKING_SCALE: i64 = 100;

/// An exact decimal amount of money.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Money(BigDecimal);

impl Money {
    pub fn zero() -> Self {
        Money(BigDecimal::zero())
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0 < BigDecimal::zero()
    }

    pub fn is_positive(&self) -> bool {
        self.0 > BigDecimal::zero()
    }

    /// `max(0, self)`.
    pub fn clamp_non_negative(self) -> Self {
        if self.is_negative() {
            Money::zero()
        } else {
            self
        }
    }

    pub fn max(a: Money, b: Money) -> Money {
        if a >= b {
            a
        } else {
            b
        }
    }

    pub fn min(a: Money, b: Money) -> Money {
        if a <= b {
            a
        } else {
            b
        }
    }

    /// Divide by an integer day count, at working precision.
    pub fn div_days(&self, days: i64) -> Money {
        Money((&self.0 / BigDecimal::from(days)).with_scale_round(WORKING_SCALE, RoundingMode::HalfUp))
    }

    pub fn mul_i64(&self, n: i64) -> Money {
        Money(&self.0 * BigDecimal::from(n))
    }

    /// Round half-up to `places` fractional digits.
    pub fn round(&self, places: i64) -> Money {
        Money(self.0.with_scale_round(places, RoundingMode::HalfUp))
    }

    /// Render rounded to `places` fractional digits, e.g. for display or
    /// serialization. Always includes a decimal point and exactly `places`
    /// digits after it.
    pub fn to_fixed(&self, places: i64) -> String {
        self.round(places).0.to_string()
    }

    pub fn parse(s: &str) -> Result<Money, ParseMoneyError> {
        BigDecimal::from_str(s.trim())
            .map(Money)
            .map_err(|_| ParseMoneyError(s.to_owned()))
    }
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("'{0}' is not a valid decimal amount")]
pub struct ParseMoneyError(pub String);

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fixed(2))
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl From<i64> for Money {
    fn from(v: i64) -> Self {
        Money(BigDecimal::from(v))
    }
}

impl Add for Money {
    type Output = Money;
    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl<'a> Add<&'a Money> for Money {
    type Output = Money;
    fn add(self, rhs: &'a Money) -> Money {
        Money(self.0 + &rhs.0)
    }
}

impl Sub for Money {
    type Output = Money;
    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl Mul for Money {
    type Output = Money;
    fn mul(self, rhs: Money) -> Money {
        Money(self.0 * rhs.0)
    }
}

impl Div for Money {
    type Output = Money;
    fn div(self, rhs: Money) -> Money {
        Money((self.0 / rhs.0).with_scale_round(WORKING_SCALE, RoundingMode::HalfUp))
    }
}

impl Neg for Money {
    type Output = Money;
    fn neg(self) -> Money {
        Money(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), |acc, m| acc + m.clone())
    }
}

/// Serialized as a decimal string rounded half-up to 2 places, never a YAML
/// float: a float cannot round-trip 2-decimal-place money exactly.
impl Serialize for Money {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_fixed(2))
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D>(deserializer: D) -> Result<Money, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Money::parse(&s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(s: &str) -> Money {
        Money::parse(s).unwrap()
    }

    #[test]
    fn half_up_rounding() {
        assert_eq!(m("1.005").round(2).to_fixed(2), "1.01");
        assert_eq!(m("1.004").round(2).to_fixed(2), "1.00");
        assert_eq!(m("-1.005").round(2).to_fixed(2), "-1.00");
    }

    #[test]
    fn clamp_non_negative() {
        assert_eq!(m("-5.00").clamp_non_negative(), Money::zero());
        assert_eq!(m("5.00").clamp_non_negative(), m("5.00"));
    }

    #[test]
    fn division_preserves_working_precision() {
        // 10 / 3 at 100 digits should not round to a lossy value when summed
        // back up across three shares.
        let third = m("10").div_days(3);
        let total = third.clone() + third.clone() + third;
        assert_eq!(total.round(2).to_fixed(2), "10.00");
    }

    #[test]
    fn serializes_as_a_quoted_two_place_string() {
        let yaml = serde_yaml::to_string(&m("3")).unwrap();
        assert_eq!(yaml.trim(), "'3.00'");
    }

    #[test]
    fn rejects_garbage_input() {
        assert!(Money::parse("not a number").is_err());
    }
}
