//
// Copyright 2025-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! Leveled bonus amounts.

use serde::{Deserialize, Serialize};

/// A numeric bonus that may scale with the level of whatever grants it.
///
/// When `integer_only` is set the stored amount is always a whole number;
/// every mutation path rounds to the nearest integer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "LeveledAmountData")]
pub struct LeveledAmount {
    per_level: bool,
    level: i32,
    amount: f64,
    integer_only: bool,
}

#[derive(Deserialize)]
struct LeveledAmountData {
    #[serde(default)]
    per_level: bool,
    #[serde(default)]
    level: i32,
    #[serde(default = "default_amount")]
    amount: f64,
    #[serde(default)]
    integer_only: bool,
}

fn default_amount() -> f64 {
    1.0
}

impl From<LeveledAmountData> for LeveledAmount {
    fn from(data: LeveledAmountData) -> Self {
        let mut amount = LeveledAmount {
            per_level: data.per_level,
            level: data.level,
            amount: 0.0,
            integer_only: data.integer_only,
        };
        amount.set_amount(data.amount);
        amount
    }
}

impl Default for LeveledAmount {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl LeveledAmount {
    /// Flat, non-leveled amount that accepts fractions.
    pub fn new(amount: f64) -> Self {
        Self {
            per_level: false,
            level: 0,
            amount,
            integer_only: false,
        }
    }

    /// Whole-number amount.
    pub fn integer(amount: i32) -> Self {
        Self {
            per_level: false,
            level: 0,
            amount: f64::from(amount),
            integer_only: true,
        }
    }

    /// Builder form of [`LeveledAmount::set_per_level`].
    pub fn per_level(mut self, per_level: bool) -> Self {
        self.per_level = per_level;
        self
    }

    pub fn is_per_level(&self) -> bool {
        self.per_level
    }

    pub fn set_per_level(&mut self, per_level: bool) {
        self.per_level = per_level;
    }

    pub fn level(&self) -> i32 {
        self.level
    }

    pub fn set_level(&mut self, level: i32) {
        self.level = level;
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// Stores the amount, rounding to the nearest integer when integer-only.
    pub fn set_amount(&mut self, amount: f64) {
        self.amount = if self.integer_only {
            amount.round()
        } else {
            amount
        };
    }

    pub fn is_integer_only(&self) -> bool {
        self.integer_only
    }

    /// Switching to integer-only rounds the current amount immediately.
    /// Switching back does not restore the lost fraction.
    pub fn set_integer_only(&mut self, integer_only: bool) {
        self.integer_only = integer_only;
        if integer_only {
            self.amount = self.amount.round();
        }
    }

    /// Amount scaled by the stored level.
    pub fn adjusted_amount(&self) -> f64 {
        self.adjusted_amount_at(self.level)
    }

    /// Amount scaled by `level` when per-level, otherwise the flat amount.
    pub fn adjusted_amount_at(&self, level: i32) -> f64 {
        if self.per_level {
            self.amount * f64::from(level)
        } else {
            self.amount
        }
    }

    /// Rounded amount scaled by `level` when per-level.
    pub fn integer_adjusted_amount_at(&self, level: i32) -> i32 {
        let amount = self.amount.round() as i32;
        if self.per_level { amount * level } else { amount }
    }

    /// Signed display form, e.g. `+2` or `-1 per level`.
    pub fn display(&self) -> String {
        let sign = if self.amount < 0.0 { "" } else { "+" };
        let value = if self.integer_only || self.amount.fract() == 0.0 {
            format!("{}{}", sign, self.amount.round() as i64)
        } else {
            format!("{}{}", sign, self.amount)
        };
        if self.per_level {
            format!("{} per level", value)
        } else {
            value
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_only_rounds_on_set() {
        let mut amount = LeveledAmount::integer(0);
        amount.set_amount(2.7);
        assert_eq!(amount.amount(), 3.0);
        amount.set_amount(-1.6);
        assert_eq!(amount.amount(), -2.0);
    }

    #[test]
    fn test_fractional_amount_kept() {
        let mut amount = LeveledAmount::new(0.0);
        amount.set_amount(0.25);
        assert_eq!(amount.amount(), 0.25);
    }

    #[test]
    fn test_set_integer_only_is_lossy() {
        let mut amount = LeveledAmount::new(1.4);
        amount.set_integer_only(true);
        assert_eq!(amount.amount(), 1.0);
        amount.set_integer_only(false);
        assert_eq!(amount.amount(), 1.0);
    }

    #[test]
    fn test_adjusted_amount_flat_ignores_level() {
        let mut amount = LeveledAmount::integer(2);
        amount.set_level(5);
        assert_eq!(amount.adjusted_amount(), 2.0);
        assert_eq!(amount.adjusted_amount_at(0), 2.0);
    }

    #[test]
    fn test_adjusted_amount_per_level() {
        let amount = LeveledAmount::integer(2).per_level(true);
        assert_eq!(amount.adjusted_amount_at(3), 6.0);
        assert_eq!(amount.adjusted_amount_at(0), 0.0);
        assert_eq!(amount.adjusted_amount_at(-1), -2.0);
        assert_eq!(amount.integer_adjusted_amount_at(4), 8);
    }

    #[test]
    fn test_structural_equality() {
        let a = LeveledAmount::integer(1).per_level(true);
        let mut b = LeveledAmount::integer(1).per_level(true);
        assert_eq!(a, b);
        b.set_level(2);
        assert_ne!(a, b);
    }

    #[test]
    fn test_deserialize_rounds_integer_only() {
        let amount: LeveledAmount =
            serde_yaml::from_str("amount: 2.5\ninteger_only: true\nper_level: true").unwrap();
        assert_eq!(amount.amount(), 3.0);
        assert!(amount.is_per_level());
    }

    #[test]
    fn test_display() {
        assert_eq!(LeveledAmount::integer(2).display(), "+2");
        assert_eq!(LeveledAmount::integer(-1).per_level(true).display(), "-1 per level");
        assert_eq!(LeveledAmount::new(0.25).display(), "+0.25");
    }
}
