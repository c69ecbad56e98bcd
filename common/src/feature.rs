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

//! Bonus features granted by traits and the keys they aggregate under.
//!
//! Every feature except [`CostReduction`] files itself under a key made of a
//! namespace prefix followed by either `/<name>` for an exact name test or a
//! single `*` for anything broader. A `*` key is only a coarse bucket: callers
//! must re-test each entry's criteria before applying it.

use crate::amount::LeveledAmount;
use crate::character::{
    AttributeLimitation, BonusAttribute, HitLocation, MAX_COST_REDUCTION, PrimaryAttribute,
};
use crate::criteria::{IntegerCriteria, StringCompare, StringCriteria};
use serde::{Deserialize, Serialize};

pub const ATTRIBUTE_PREFIX: &str = "attr.";
pub const DR_PREFIX: &str = "dr.";
pub const SKILL_NAME: &str = "skill.name";
pub const SPELL_NAME: &str = "spell.name";
pub const SPELL_COLLEGE: &str = "spell.college";
pub const WEAPON_NAME: &str = "weapon.name";
pub const WILDCARD: &str = "*";

/// Key of an exact-name bucket, e.g. `skill.name/broadsword`.
pub fn exact_key(prefix: &str, name: &str) -> String {
    format!("{}/{}", prefix, name.to_lowercase())
}

/// Key of the broad-match bucket for a namespace, e.g. `skill.name*`.
pub fn wildcard_key(prefix: &str) -> String {
    format!("{}{}", prefix, WILDCARD)
}

/// Key of an attribute bonus.
pub fn attribute_key(attribute: BonusAttribute, limitation: AttributeLimitation) -> String {
    match limitation.id() {
        Some(limit) if attribute == BonusAttribute::St => {
            format!("{}{}.{}", ATTRIBUTE_PREFIX, attribute.id(), limit)
        }
        _ => format!("{}{}", ATTRIBUTE_PREFIX, attribute.id()),
    }
}

pub fn dr_key(location: HitLocation) -> String {
    format!("{}{}", DR_PREFIX, location.id())
}

fn criteria_key(prefix: &str, name: &StringCriteria, specialization: Option<&StringCriteria>) -> String {
    let any_specialization = specialization.is_none_or(|s| s.compare == StringCompare::IsAnything);
    if name.is_exact() && any_specialization {
        exact_key(prefix, &name.qualifier)
    } else {
        wildcard_key(prefix)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeBonus {
    pub attribute: BonusAttribute,
    #[serde(default)]
    pub limitation: AttributeLimitation,
    #[serde(default)]
    pub amount: LeveledAmount,
}

impl AttributeBonus {
    pub fn new(attribute: BonusAttribute, amount: f64) -> Self {
        let mut leveled = LeveledAmount::new(0.0);
        leveled.set_integer_only(attribute.is_integer_only());
        leveled.set_amount(amount);
        Self {
            attribute,
            limitation: AttributeLimitation::None,
            amount: leveled,
        }
    }

    pub fn key(&self) -> String {
        attribute_key(self.attribute, self.limitation)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrBonus {
    pub location: HitLocation,
    #[serde(default)]
    pub amount: LeveledAmount,
}

impl DrBonus {
    pub fn new(location: HitLocation, amount: i32) -> Self {
        Self {
            location,
            amount: LeveledAmount::integer(amount),
        }
    }

    pub fn key(&self) -> String {
        dr_key(self.location)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillBonus {
    pub name_criteria: StringCriteria,
    #[serde(default)]
    pub specialization_criteria: StringCriteria,
    #[serde(default)]
    pub amount: LeveledAmount,
}

impl SkillBonus {
    pub fn new(name_criteria: StringCriteria, amount: i32) -> Self {
        Self {
            name_criteria,
            specialization_criteria: StringCriteria::anything(),
            amount: LeveledAmount::integer(amount),
        }
    }

    pub fn key(&self) -> String {
        criteria_key(SKILL_NAME, &self.name_criteria, Some(&self.specialization_criteria))
    }

    pub fn matches(&self, name: &str, specialization: &str) -> bool {
        self.name_criteria.matches(name) && self.specialization_criteria.matches(specialization)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpellBonus {
    #[serde(default)]
    pub all_colleges: bool,
    #[serde(default)]
    pub match_college: bool,
    #[serde(default)]
    pub name_criteria: StringCriteria,
    #[serde(default)]
    pub amount: LeveledAmount,
}

impl SpellBonus {
    pub fn key(&self) -> String {
        if self.all_colleges {
            return SPELL_COLLEGE.to_string();
        }
        let prefix = if self.match_college { SPELL_COLLEGE } else { SPELL_NAME };
        criteria_key(prefix, &self.name_criteria, None)
    }

    pub fn matches(&self, value: &str) -> bool {
        self.all_colleges || self.name_criteria.matches(value)
    }
}

/// Bonus to weapon damage. A per-level amount scales with the number of
/// damage dice rather than with the granting trait's levels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponBonus {
    pub name_criteria: StringCriteria,
    #[serde(default)]
    pub specialization_criteria: StringCriteria,
    #[serde(default)]
    pub level_criteria: IntegerCriteria,
    #[serde(default)]
    pub amount: LeveledAmount,
}

impl WeaponBonus {
    pub fn new(name_criteria: StringCriteria, amount: i32) -> Self {
        Self {
            name_criteria,
            specialization_criteria: StringCriteria::anything(),
            level_criteria: IntegerCriteria::default(),
            amount: LeveledAmount::integer(amount),
        }
    }

    pub fn key(&self) -> String {
        criteria_key(WEAPON_NAME, &self.name_criteria, Some(&self.specialization_criteria))
    }

    pub fn matches(&self, name: &str, specialization: &str, relative_level: i32) -> bool {
        self.name_criteria.matches(name)
            && self.specialization_criteria.matches(specialization)
            && self.level_criteria.matches(relative_level)
    }
}

/// Percentage discount on the point cost of a primary attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "CostReductionData")]
pub struct CostReduction {
    attribute: PrimaryAttribute,
    percentage: i32,
}

#[derive(Deserialize)]
struct CostReductionData {
    attribute: PrimaryAttribute,
    #[serde(default)]
    percentage: i32,
}

impl From<CostReductionData> for CostReduction {
    fn from(data: CostReductionData) -> Self {
        CostReduction::new(data.attribute, data.percentage)
    }
}

impl CostReduction {
    pub fn new(attribute: PrimaryAttribute, percentage: i32) -> Self {
        Self {
            attribute,
            percentage: percentage.clamp(0, MAX_COST_REDUCTION),
        }
    }

    pub fn attribute(&self) -> PrimaryAttribute {
        self.attribute
    }

    pub fn set_attribute(&mut self, attribute: PrimaryAttribute) {
        self.attribute = attribute;
    }

    pub fn percentage(&self) -> i32 {
        self.percentage
    }

    pub fn set_percentage(&mut self, percentage: i32) {
        self.percentage = percentage.clamp(0, MAX_COST_REDUCTION);
    }
}

/// A bonus a trait contributes while enabled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Feature {
    AttributeBonus(AttributeBonus),
    DrBonus(DrBonus),
    SkillBonus(SkillBonus),
    SpellBonus(SpellBonus),
    WeaponBonus(WeaponBonus),
    CostReduction(CostReduction),
}

impl Feature {
    /// Aggregation key. Cost reductions are tallied per attribute instead.
    pub fn key(&self) -> Option<String> {
        match self {
            Feature::AttributeBonus(bonus) => Some(bonus.key()),
            Feature::DrBonus(bonus) => Some(bonus.key()),
            Feature::SkillBonus(bonus) => Some(bonus.key()),
            Feature::SpellBonus(bonus) => Some(bonus.key()),
            Feature::WeaponBonus(bonus) => Some(bonus.key()),
            Feature::CostReduction(_) => None,
        }
    }

    pub fn amount(&self) -> Option<&LeveledAmount> {
        match self {
            Feature::AttributeBonus(bonus) => Some(&bonus.amount),
            Feature::DrBonus(bonus) => Some(&bonus.amount),
            Feature::SkillBonus(bonus) => Some(&bonus.amount),
            Feature::SpellBonus(bonus) => Some(&bonus.amount),
            Feature::WeaponBonus(bonus) => Some(&bonus.amount),
            Feature::CostReduction(_) => None,
        }
    }

    /// Amount contributed at `level`, zero for cost reductions.
    pub fn adjusted_amount(&self, level: i32) -> f64 {
        self.amount()
            .map(|amount| amount.adjusted_amount_at(level))
            .unwrap_or(0.0)
    }

    pub fn is_weapon_bonus(&self) -> bool {
        matches!(self, Feature::WeaponBonus(_))
    }
}
