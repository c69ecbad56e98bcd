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

//! Purchased attribute scores.
//!
//! ST, DX, IQ and HT are stored as scores. Everything derived from them
//! (Will, Perception, HP, FP, Basic Speed, Basic Move) is stored as the
//! amount bought up or down from its calculated value.

use charsheet_common::character::{Attribute, PrimaryAttribute, points_for_attribute};
use serde::{Deserialize, Serialize};

/// Score every attribute starts from.
pub const BASE_SCORE: i32 = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Attributes {
    pub st: i32,
    pub dx: i32,
    pub iq: i32,
    pub ht: i32,
    pub will_adjustment: i32,
    pub per_adjustment: i32,
    pub hp_adjustment: i32,
    pub fp_adjustment: i32,
    pub speed_adjustment: f64,
    pub move_adjustment: i32,
}

impl Default for Attributes {
    fn default() -> Self {
        Self {
            st: BASE_SCORE,
            dx: BASE_SCORE,
            iq: BASE_SCORE,
            ht: BASE_SCORE,
            will_adjustment: 0,
            per_adjustment: 0,
            hp_adjustment: 0,
            fp_adjustment: 0,
            speed_adjustment: 0.0,
            move_adjustment: 0,
        }
    }
}

impl Attributes {
    pub fn score(&self, attribute: PrimaryAttribute) -> i32 {
        match attribute {
            PrimaryAttribute::St => self.st,
            PrimaryAttribute::Dx => self.dx,
            PrimaryAttribute::Iq => self.iq,
            PrimaryAttribute::Ht => self.ht,
        }
    }

    pub fn set_score(&mut self, attribute: PrimaryAttribute, score: i32) {
        match attribute {
            PrimaryAttribute::St => self.st = score,
            PrimaryAttribute::Dx => self.dx = score,
            PrimaryAttribute::Iq => self.iq = score,
            PrimaryAttribute::Ht => self.ht = score,
        }
    }

    /// Levels bought above (or sold below) the starting value.
    pub fn purchased_levels(&self, attribute: Attribute) -> i32 {
        match PrimaryAttribute::try_from(attribute) {
            Ok(primary) => self.score(primary) - BASE_SCORE,
            Err(Attribute::Will) => self.will_adjustment,
            Err(_) => self.per_adjustment,
        }
    }

    /// Points spent on one attribute after applying `reduction` percent off.
    pub fn points_for(&self, attribute: Attribute, reduction: i32) -> i32 {
        points_for_attribute(
            self.purchased_levels(attribute),
            attribute.points_per_level(),
            reduction,
        )
    }

    /// Points spent on every attribute and secondary characteristic.
    pub fn total_points(&self, reduction_for: impl Fn(PrimaryAttribute) -> i32) -> i32 {
        let primary: i32 = PrimaryAttribute::all()
            .into_iter()
            .map(|attribute| self.points_for(attribute.into(), reduction_for(attribute)))
            .sum();
        primary
            + self.points_for(Attribute::Will, 0)
            + self.points_for(Attribute::Per, 0)
            + self.hp_adjustment * 2
            + self.fp_adjustment * 3
            + (self.speed_adjustment * 20.0) as i32
            + self.move_adjustment * 5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_costs_nothing() {
        assert_eq!(Attributes::default().total_points(|_| 0), 0);
    }

    #[test]
    fn test_total_points() {
        let attributes = Attributes {
            st: 12,
            dx: 11,
            iq: 9,
            will_adjustment: 2,
            hp_adjustment: 1,
            speed_adjustment: 0.25,
            ..Attributes::default()
        };
        // 20 + 20 - 20 + 10 + 2 + 5
        assert_eq!(attributes.total_points(|_| 0), 37);
    }

    #[test]
    fn test_cost_reduction_applies_to_primary_only() {
        let attributes = Attributes {
            st: 13,
            will_adjustment: 1,
            ..Attributes::default()
        };
        let reduced = attributes.total_points(|attribute| match attribute {
            PrimaryAttribute::St => 40,
            _ => 0,
        });
        assert_eq!(reduced, 18 + 5);
    }

    #[test]
    fn test_purchased_levels() {
        let attributes = Attributes {
            iq: 12,
            per_adjustment: -1,
            ..Attributes::default()
        };
        assert_eq!(attributes.purchased_levels(Attribute::Iq), 2);
        assert_eq!(attributes.purchased_levels(Attribute::Per), -1);
        assert_eq!(attributes.purchased_levels(Attribute::Will), 0);
    }
}
