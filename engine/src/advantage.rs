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

//! Advantages, disadvantages and the modifiers that adjust their cost.

use crate::features::FeatureSource;
use crate::identity::TraitId;
use crate::rules::Rules;
use charsheet_common::feature::Feature;
use charsheet_common::self_control::{SelfControlRoll, SelfControlRollAdjustment};
use serde::{Deserialize, Serialize};

/// Net enhancements and limitations can never take more than this much off.
pub const MIN_PERCENTAGE_MODIFIER: i32 = -80;

fn enabled() -> bool {
    true
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifierCostType {
    #[default]
    Percentage,
    Points,
    Multiplier,
}

/// Which part of a leveled advantage a percentage modifier applies to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Affects {
    #[default]
    Total,
    BaseOnly,
    LevelsOnly,
}

/// An enhancement or limitation attached to an advantage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Modifier {
    #[serde(default)]
    pub id: TraitId,
    pub name: String,
    #[serde(default = "enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub cost_type: ModifierCostType,
    #[serde(default)]
    pub cost: f64,
    /// Levels of the modifier itself; zero means unleveled.
    #[serde(default)]
    pub levels: i32,
    #[serde(default)]
    pub affects: Affects,
    #[serde(default)]
    pub features: Vec<Feature>,
}

impl Modifier {
    pub fn new(name: impl Into<String>, cost_type: ModifierCostType, cost: f64) -> Self {
        Self {
            id: TraitId::new(),
            name: name.into(),
            enabled: true,
            cost_type,
            cost,
            levels: 0,
            affects: Affects::Total,
            features: Vec::new(),
        }
    }

    pub fn percentage(name: impl Into<String>, percent: i32) -> Self {
        Self::new(name, ModifierCostType::Percentage, f64::from(percent))
    }

    pub fn points(name: impl Into<String>, points: i32) -> Self {
        Self::new(name, ModifierCostType::Points, f64::from(points))
    }

    pub fn multiplier(name: impl Into<String>, factor: f64) -> Self {
        Self::new(name, ModifierCostType::Multiplier, factor)
    }

    pub fn affecting(mut self, affects: Affects) -> Self {
        self.affects = affects;
        self
    }

    pub fn with_feature(mut self, feature: Feature) -> Self {
        self.features.push(feature);
        self
    }

    /// Cost after applying the modifier's own levels.
    pub fn cost_modifier(&self) -> f64 {
        if self.levels > 0 && self.cost_type != ModifierCostType::Multiplier {
            self.cost * f64::from(self.levels)
        } else {
            self.cost
        }
    }
}

/// Final point cost of an advantage.
///
/// Percentage modifiers adjust the base and leveled portions first. The
/// result is scaled by the self-control multiplier and any multiplier
/// modifiers, rounded up (or down under the round-down rule), and then
/// flat point modifiers are added.
pub fn adjusted_advantage_cost(
    base_points: i32,
    levels: i32,
    points_per_level: i32,
    cr: SelfControlRoll,
    modifiers: &[Modifier],
    rules: &Rules,
) -> i32 {
    let mut base_percent = 0;
    let mut level_percent = 0;
    let mut multiplier = cr.multiplier();
    let mut flat_points = 0;

    for modifier in modifiers.iter().filter(|modifier| modifier.enabled) {
        let value = modifier.cost_modifier();
        match modifier.cost_type {
            ModifierCostType::Percentage => {
                let percent = value.round() as i32;
                match modifier.affects {
                    Affects::Total => {
                        base_percent += percent;
                        level_percent += percent;
                    }
                    Affects::BaseOnly => base_percent += percent,
                    Affects::LevelsOnly => level_percent += percent,
                }
            }
            ModifierCostType::Points => flat_points += value.round() as i32,
            ModifierCostType::Multiplier => multiplier *= value,
        }
    }

    let base_percent = base_percent.max(MIN_PERCENTAGE_MODIFIER);
    let level_percent = level_percent.max(MIN_PERCENTAGE_MODIFIER);
    let leveled = f64::from(points_per_level * levels.max(0));
    let modified = f64::from(base_points) * f64::from(100 + base_percent) / 100.0
        + leveled * f64::from(100 + level_percent) / 100.0;

    rules.round_cost(modified * multiplier) + flat_points
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvantageKind {
    #[default]
    Trait,
    Group,
    Race,
    /// Children are alternatives; only the best is paid for in full.
    AlternativeAbilities,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advantage {
    #[serde(default)]
    pub id: TraitId,
    pub name: String,
    #[serde(default = "enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub kind: AdvantageKind,
    #[serde(default)]
    pub base_points: i32,
    #[serde(default)]
    pub points_per_level: i32,
    /// `None` for advantages that are not leveled.
    #[serde(default)]
    pub levels: Option<i32>,
    #[serde(default)]
    pub cr: SelfControlRoll,
    #[serde(default)]
    pub cr_adjustment: SelfControlRollAdjustment,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    #[serde(default)]
    pub features: Vec<Feature>,
    #[serde(default)]
    pub children: Vec<Advantage>,
}

impl Advantage {
    pub fn new(name: impl Into<String>, base_points: i32) -> Self {
        Self {
            id: TraitId::new(),
            name: name.into(),
            enabled: true,
            kind: AdvantageKind::Trait,
            base_points,
            points_per_level: 0,
            levels: None,
            cr: SelfControlRoll::NoneRequired,
            cr_adjustment: SelfControlRollAdjustment::None,
            modifiers: Vec::new(),
            features: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn container(name: impl Into<String>, kind: AdvantageKind, children: Vec<Advantage>) -> Self {
        Self {
            kind,
            children,
            ..Self::new(name, 0)
        }
    }

    pub fn leveled(mut self, points_per_level: i32, levels: i32) -> Self {
        self.points_per_level = points_per_level;
        self.levels = Some(levels);
        self
    }

    pub fn with_cr(mut self, cr: SelfControlRoll, adjustment: SelfControlRollAdjustment) -> Self {
        self.cr = cr;
        self.cr_adjustment = adjustment;
        self
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.push(modifier);
        self
    }

    pub fn with_feature(mut self, feature: Feature) -> Self {
        self.features.push(feature);
        self
    }

    pub fn is_container(&self) -> bool {
        self.kind != AdvantageKind::Trait
    }

    pub fn current_levels(&self) -> i32 {
        self.levels.unwrap_or(0)
    }

    /// Point cost after modifiers. Disabled advantages cost nothing, and a
    /// container's cost comes entirely from its children.
    pub fn adjusted_points(&self, rules: &Rules) -> i32 {
        if !self.enabled {
            return 0;
        }
        match self.kind {
            AdvantageKind::Trait => adjusted_advantage_cost(
                self.base_points,
                self.current_levels(),
                self.points_per_level,
                self.cr,
                &self.modifiers,
                rules,
            ),
            AdvantageKind::Group | AdvantageKind::Race => self
                .children
                .iter()
                .map(|child| child.adjusted_points(rules))
                .sum(),
            AdvantageKind::AlternativeAbilities => {
                let mut costs: Vec<i32> = self
                    .children
                    .iter()
                    .map(|child| child.adjusted_points(rules))
                    .collect();
                costs.sort_unstable_by(|a, b| b.cmp(a));
                match costs.split_first() {
                    Some((best, rest)) => {
                        best + rest
                            .iter()
                            .map(|cost| rules.round_cost(f64::from(*cost) / 5.0))
                            .sum::<i32>()
                    }
                    None => 0,
                }
            }
        }
    }

    /// Human readable self-control summary, e.g. `CR: 9 (Resist fairly often); -3 Action Penalty`.
    pub fn cr_description(&self) -> Option<String> {
        if self.cr == SelfControlRoll::NoneRequired {
            return None;
        }
        let adjustment = self.cr_adjustment.description(self.cr);
        if adjustment.is_empty() {
            Some(self.cr.to_string())
        } else {
            Some(format!("{}; {}", self.cr, adjustment))
        }
    }
}

impl FeatureSource for Advantage {
    fn is_self_enabled(&self) -> bool {
        self.enabled
    }

    fn children(&self) -> &[Self] {
        &self.children
    }

    fn granted_features(&self) -> Vec<(Feature, i32)> {
        let levels = self.current_levels();
        let own = self.features.iter().cloned().map(|feature| (feature, levels));
        let from_modifiers = self
            .modifiers
            .iter()
            .filter(|modifier| modifier.enabled)
            .flat_map(|modifier| modifier.features.iter().cloned())
            .map(|feature| (feature, levels));
        let from_cr = self
            .cr_adjustment
            .bonuses(self.cr)
            .into_iter()
            .map(|feature| (feature, 0));
        own.chain(from_modifiers).chain(from_cr).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use charsheet_common::character::BonusAttribute;
    use charsheet_common::feature::AttributeBonus;

    #[test]
    fn test_cr_and_point_modifier() {
        let modifiers = vec![Modifier::points("Extra", 5)];
        let cost = adjusted_advantage_cost(
            10,
            0,
            0,
            SelfControlRoll::Cr9,
            &modifiers,
            &Rules::default(),
        );
        assert_eq!(cost, 20);
    }

    #[test]
    fn test_disabled_modifier_ignored() {
        let mut modifier = Modifier::points("Extra", 5);
        modifier.enabled = false;
        let cost = adjusted_advantage_cost(
            10,
            0,
            0,
            SelfControlRoll::NoneRequired,
            &[modifier],
            &Rules::default(),
        );
        assert_eq!(cost, 10);
    }

    #[test]
    fn test_percentage_modifiers_by_affects() {
        let rules = Rules::default();
        let enhancement = Modifier::percentage("Enhancement", 50).affecting(Affects::LevelsOnly);
        // 10 base + 4 levels at 5 points, levels raised by half
        assert_eq!(
            adjusted_advantage_cost(10, 4, 5, SelfControlRoll::NoneRequired, &[enhancement], &rules),
            40
        );
        let limitation = Modifier::percentage("Limitation", -50).affecting(Affects::BaseOnly);
        assert_eq!(
            adjusted_advantage_cost(10, 4, 5, SelfControlRoll::NoneRequired, &[limitation], &rules),
            25
        );
    }

    #[test]
    fn test_limitations_capped() {
        let modifiers = vec![
            Modifier::percentage("A", -60),
            Modifier::percentage("B", -50),
        ];
        let cost = adjusted_advantage_cost(
            20,
            0,
            0,
            SelfControlRoll::NoneRequired,
            &modifiers,
            &Rules::default(),
        );
        assert_eq!(cost, 4);
    }

    #[test]
    fn test_multiplier_modifier_and_rounding() {
        let modifiers = vec![Modifier::multiplier("Half", 0.5)];
        let rules = Rules::default();
        let cost =
            adjusted_advantage_cost(-15, 0, 0, SelfControlRoll::NoneRequired, &modifiers, &rules);
        assert_eq!(cost, -7);
        let down = Rules {
            round_cost_down: true,
            ..rules
        };
        let cost =
            adjusted_advantage_cost(15, 0, 0, SelfControlRoll::NoneRequired, &modifiers, &down);
        assert_eq!(cost, 7);
    }

    #[test]
    fn test_disadvantage_with_cr() {
        let bad_temper = Advantage::new("Bad Temper", -10).with_cr(
            SelfControlRoll::Cr6,
            SelfControlRollAdjustment::ReactionPenalty,
        );
        assert_eq!(bad_temper.adjusted_points(&Rules::default()), -20);
        assert_eq!(
            bad_temper.cr_description().as_deref(),
            Some("CR: 6 (Resist rarely); -4 Reaction Penalty")
        );
    }

    #[test]
    fn test_group_and_disabled_cost() {
        let mut group = Advantage::container(
            "Group",
            AdvantageKind::Group,
            vec![Advantage::new("A", 10), Advantage::new("B", 5)],
        );
        let rules = Rules::default();
        assert_eq!(group.adjusted_points(&rules), 15);
        group.children[1].enabled = false;
        assert_eq!(group.adjusted_points(&rules), 10);
        group.enabled = false;
        assert_eq!(group.adjusted_points(&rules), 0);
    }

    #[test]
    fn test_alternative_abilities() {
        let alternatives = Advantage::container(
            "Blasts",
            AdvantageKind::AlternativeAbilities,
            vec![
                Advantage::new("Fire", 30),
                Advantage::new("Ice", 20),
                Advantage::new("Shock", 12),
            ],
        );
        // 30 + 4 + ceil(2.4)
        assert_eq!(alternatives.adjusted_points(&Rules::default()), 37);
    }

    #[test]
    fn test_negative_cost_rounds_toward_zero() {
        let cost = adjusted_advantage_cost(
            -15,
            0,
            0,
            SelfControlRoll::Cr9,
            &[],
            &Rules::default(),
        );
        assert_eq!(cost, -22);
        let down = Rules {
            round_cost_down: true,
            ..Rules::default()
        };
        assert_eq!(
            adjusted_advantage_cost(-15, 0, 0, SelfControlRoll::Cr9, &[], &down),
            -23
        );
    }

    #[test]
    fn test_granted_features_include_modifiers_and_cr() {
        let bonus = AttributeBonus::new(BonusAttribute::Hp, 1.0);
        let advantage = Advantage::new("Miser", -10)
            .leveled(2, 3)
            .with_cr(
                SelfControlRoll::Cr12,
                SelfControlRollAdjustment::MajorCostOfLivingIncrease,
            )
            .with_modifier(
                Modifier::percentage("Tough", 10).with_feature(Feature::AttributeBonus(bonus)),
            );
        let granted = advantage.granted_features();
        assert_eq!(granted.len(), 2);
        assert_eq!(granted[0].1, 3);
        assert_eq!(granted[1].0.key().as_deref(), Some("skill.name/merchant"));
    }
}
