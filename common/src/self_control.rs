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

//! Self-control rolls on disadvantages and the adjustments they carry.

use crate::amount::LeveledAmount;
use crate::criteria::StringCriteria;
use crate::feature::{Feature, SkillBonus};
use serde::{Deserialize, Serialize};

/// How often a character resists the urge of a disadvantage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SelfControlRoll {
    #[serde(rename = "6")]
    Cr6,
    #[serde(rename = "9")]
    Cr9,
    #[serde(rename = "12")]
    Cr12,
    #[serde(rename = "15")]
    Cr15,
    #[default]
    #[serde(rename = "none")]
    NoneRequired,
}

impl SelfControlRoll {
    pub fn ordinal(&self) -> i32 {
        match self {
            SelfControlRoll::Cr6 => 0,
            SelfControlRoll::Cr9 => 1,
            SelfControlRoll::Cr12 => 2,
            SelfControlRoll::Cr15 => 3,
            SelfControlRoll::NoneRequired => 4,
        }
    }

    /// Roll needed to resist. `None` when no roll is allowed.
    pub fn threshold(&self) -> Option<i32> {
        match self {
            SelfControlRoll::Cr6 => Some(6),
            SelfControlRoll::Cr9 => Some(9),
            SelfControlRoll::Cr12 => Some(12),
            SelfControlRoll::Cr15 => Some(15),
            SelfControlRoll::NoneRequired => None,
        }
    }

    /// Multiplier applied to the cost of the disadvantage.
    pub fn multiplier(&self) -> f64 {
        match self {
            SelfControlRoll::Cr6 => 2.0,
            SelfControlRoll::Cr9 => 1.5,
            SelfControlRoll::Cr12 => 1.0,
            SelfControlRoll::Cr15 => 0.5,
            SelfControlRoll::NoneRequired => 1.0,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            SelfControlRoll::Cr6 => "Resist rarely",
            SelfControlRoll::Cr9 => "Resist fairly often",
            SelfControlRoll::Cr12 => "Resist quite often",
            SelfControlRoll::Cr15 => "Resist almost all the time",
            SelfControlRoll::NoneRequired => "None Required",
        }
    }

    pub fn all() -> [SelfControlRoll; 5] {
        [
            SelfControlRoll::Cr6,
            SelfControlRoll::Cr9,
            SelfControlRoll::Cr12,
            SelfControlRoll::Cr15,
            SelfControlRoll::NoneRequired,
        ]
    }
}

impl std::fmt::Display for SelfControlRoll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.threshold() {
            Some(threshold) => write!(f, "CR: {} ({})", threshold, self.description()),
            None => write!(f, "{}", self.description()),
        }
    }
}

/// Extra consequence attached to failing a self-control roll.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelfControlRollAdjustment {
    #[default]
    None,
    ActionPenalty,
    ReactionPenalty,
    FrightCheckPenalty,
    FrightCheckBonus,
    MinorCostOfLivingIncrease,
    MajorCostOfLivingIncrease,
}

impl SelfControlRollAdjustment {
    pub fn title(&self) -> &'static str {
        match self {
            SelfControlRollAdjustment::None => "None",
            SelfControlRollAdjustment::ActionPenalty => "Includes an Action Penalty for Failure",
            SelfControlRollAdjustment::ReactionPenalty => "Includes a Reaction Penalty for Failure",
            SelfControlRollAdjustment::FrightCheckPenalty => "Includes Fright Check Penalty",
            SelfControlRollAdjustment::FrightCheckBonus => "Includes Fright Check Bonus",
            SelfControlRollAdjustment::MinorCostOfLivingIncrease => {
                "Includes a Minor Cost of Living Increase"
            }
            SelfControlRollAdjustment::MajorCostOfLivingIncrease => {
                "Includes a Major Cost of Living Increase and Merchant Skill Penalty"
            }
        }
    }

    /// Numeric adjustment for `cr`. Zero whenever no roll is required.
    pub fn adjustment(&self, cr: SelfControlRoll) -> i32 {
        if cr == SelfControlRoll::NoneRequired {
            return 0;
        }
        let ordinal = cr.ordinal();
        match self {
            SelfControlRollAdjustment::None => 0,
            SelfControlRollAdjustment::ActionPenalty
            | SelfControlRollAdjustment::ReactionPenalty
            | SelfControlRollAdjustment::FrightCheckPenalty => ordinal - 4,
            SelfControlRollAdjustment::FrightCheckBonus => 4 - ordinal,
            SelfControlRollAdjustment::MinorCostOfLivingIncrease => 5 * (4 - ordinal),
            SelfControlRollAdjustment::MajorCostOfLivingIncrease => match cr {
                SelfControlRoll::Cr6 => 80,
                SelfControlRoll::Cr9 => 40,
                SelfControlRoll::Cr12 => 20,
                SelfControlRoll::Cr15 => 10,
                SelfControlRoll::NoneRequired => 0,
            },
        }
    }

    /// Short description such as `-3 Action Penalty`, empty when not applicable.
    pub fn description(&self, cr: SelfControlRoll) -> String {
        if cr == SelfControlRoll::NoneRequired {
            return String::new();
        }
        let value = format!("{:+}", self.adjustment(cr));
        match self {
            SelfControlRollAdjustment::None => String::new(),
            SelfControlRollAdjustment::ActionPenalty => format!("{} Action Penalty", value),
            SelfControlRollAdjustment::ReactionPenalty => format!("{} Reaction Penalty", value),
            SelfControlRollAdjustment::FrightCheckPenalty => {
                format!("{} Fright Check Penalty", value)
            }
            SelfControlRollAdjustment::FrightCheckBonus => format!("{} Fright Check Bonus", value),
            SelfControlRollAdjustment::MinorCostOfLivingIncrease
            | SelfControlRollAdjustment::MajorCostOfLivingIncrease => {
                format!("{}% Cost of Living Increase", value)
            }
        }
    }

    /// Features implied by the adjustment. Only a major cost of living
    /// increase has one: a penalty to the Merchant skill.
    pub fn bonuses(&self, cr: SelfControlRoll) -> Vec<Feature> {
        if *self != SelfControlRollAdjustment::MajorCostOfLivingIncrease
            || cr == SelfControlRoll::NoneRequired
        {
            return Vec::new();
        }
        let bonus = SkillBonus {
            name_criteria: StringCriteria::is("Merchant"),
            specialization_criteria: StringCriteria::anything(),
            amount: LeveledAmount::integer(cr.ordinal() - 4),
        };
        vec![Feature::SkillBonus(bonus)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADJUSTMENTS: [SelfControlRollAdjustment; 7] = [
        SelfControlRollAdjustment::None,
        SelfControlRollAdjustment::ActionPenalty,
        SelfControlRollAdjustment::ReactionPenalty,
        SelfControlRollAdjustment::FrightCheckPenalty,
        SelfControlRollAdjustment::FrightCheckBonus,
        SelfControlRollAdjustment::MinorCostOfLivingIncrease,
        SelfControlRollAdjustment::MajorCostOfLivingIncrease,
    ];

    #[test]
    fn test_multipliers() {
        assert_eq!(SelfControlRoll::Cr6.multiplier(), 2.0);
        assert_eq!(SelfControlRoll::Cr9.multiplier(), 1.5);
        assert_eq!(SelfControlRoll::Cr12.multiplier(), 1.0);
        assert_eq!(SelfControlRoll::Cr15.multiplier(), 0.5);
        assert_eq!(SelfControlRoll::NoneRequired.multiplier(), 1.0);
    }

    #[test]
    fn test_none_adjustment_is_always_zero() {
        for cr in SelfControlRoll::all() {
            assert_eq!(SelfControlRollAdjustment::None.adjustment(cr), 0);
        }
    }

    #[test]
    fn test_no_roll_means_no_adjustment() {
        for adjustment in ADJUSTMENTS {
            assert_eq!(adjustment.adjustment(SelfControlRoll::NoneRequired), 0);
            assert!(adjustment.bonuses(SelfControlRoll::NoneRequired).is_empty());
            assert!(adjustment.description(SelfControlRoll::NoneRequired).is_empty());
        }
    }

    #[test]
    fn test_penalties() {
        assert_eq!(SelfControlRollAdjustment::ActionPenalty.adjustment(SelfControlRoll::Cr6), -4);
        assert_eq!(SelfControlRollAdjustment::ReactionPenalty.adjustment(SelfControlRoll::Cr15), -1);
        assert_eq!(SelfControlRollAdjustment::FrightCheckBonus.adjustment(SelfControlRoll::Cr9), 3);
        assert_eq!(
            SelfControlRollAdjustment::MinorCostOfLivingIncrease.adjustment(SelfControlRoll::Cr12),
            10
        );
    }

    #[test]
    fn test_major_cost_of_living_table() {
        let major = SelfControlRollAdjustment::MajorCostOfLivingIncrease;
        let table: Vec<i32> = SelfControlRoll::all().iter().map(|cr| major.adjustment(*cr)).collect();
        assert_eq!(table, vec![80, 40, 20, 10, 0]);
    }

    #[test]
    fn test_major_cost_of_living_merchant_penalty() {
        let bonuses = SelfControlRollAdjustment::MajorCostOfLivingIncrease.bonuses(SelfControlRoll::Cr9);
        assert_eq!(bonuses.len(), 1);
        assert_eq!(bonuses[0].key().as_deref(), Some("skill.name/merchant"));
        assert_eq!(bonuses[0].adjusted_amount(0), -3.0);
        assert!(SelfControlRollAdjustment::ActionPenalty.bonuses(SelfControlRoll::Cr9).is_empty());
    }

    #[test]
    fn test_descriptions() {
        assert_eq!(
            SelfControlRollAdjustment::ActionPenalty.description(SelfControlRoll::Cr12),
            "-2 Action Penalty"
        );
        assert_eq!(
            SelfControlRollAdjustment::MajorCostOfLivingIncrease.description(SelfControlRoll::Cr6),
            "+80% Cost of Living Increase"
        );
        assert_eq!(SelfControlRoll::Cr12.to_string(), "CR: 12 (Resist quite often)");
    }
}
