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

//! Feature aggregation.
//!
//! A [`FeatureMap`] gathers every feature granted by the enabled parts of a
//! character's trait trees and files it under its key. It is never patched;
//! a change to any trait throws the whole map away and the next read builds
//! a fresh one.

use charsheet_common::character::{HitLocation, MAX_COST_REDUCTION, PrimaryAttribute};
use charsheet_common::feature::{
    Feature, SKILL_NAME, SPELL_COLLEGE, SPELL_NAME, WEAPON_NAME, WeaponBonus, dr_key,
    exact_key, wildcard_key,
};
use std::collections::HashMap;

/// A row in a trait tree that can grant features.
///
/// Enablement is inherited: when a row is not enabled, neither it nor any
/// of its descendants contribute.
pub trait FeatureSource: Sized {
    /// Whether this row is switched on, ignoring its ancestors.
    fn is_self_enabled(&self) -> bool;

    fn children(&self) -> &[Self];

    /// Features this row grants by itself, each with the level count its
    /// amount scales by.
    fn granted_features(&self) -> Vec<(Feature, i32)>;
}

/// A feature as filed in the map, along with the levels of its source.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureEntry {
    pub feature: Feature,
    pub levels: i32,
}

impl FeatureEntry {
    pub fn amount(&self) -> f64 {
        self.feature.adjusted_amount(self.levels)
    }

    pub fn integer_amount(&self) -> i32 {
        self.feature
            .amount()
            .map(|amount| amount.integer_adjusted_amount_at(self.levels))
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct FeatureMap {
    entries: HashMap<String, Vec<FeatureEntry>>,
    cost_reductions: HashMap<PrimaryAttribute, i32>,
}

impl FeatureMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Walks a forest of rows and adds the features of every enabled row.
    pub fn collect<T: FeatureSource>(&mut self, rows: &[T]) {
        for row in rows.iter().filter(|row| row.is_self_enabled()) {
            for (feature, levels) in row.granted_features() {
                self.add(feature, levels);
            }
            self.collect(row.children());
        }
    }

    pub fn add(&mut self, feature: Feature, levels: i32) {
        if let Feature::CostReduction(reduction) = &feature {
            let total = self.cost_reductions.entry(reduction.attribute()).or_insert(0);
            let before = *total;
            *total += reduction.percentage();
            if before <= MAX_COST_REDUCTION && *total > MAX_COST_REDUCTION {
                tracing::warn!(
                    "Cost reductions for {:?} total {}%, capping at {}%",
                    reduction.attribute(),
                    total,
                    MAX_COST_REDUCTION
                );
            }
            return;
        }
        if let Some(key) = feature.key() {
            self.entries
                .entry(key.to_lowercase())
                .or_default()
                .push(FeatureEntry { feature, levels });
        }
    }

    /// Entries filed under exactly `key`.
    pub fn get(&self, key: &str) -> &[FeatureEntry] {
        self.entries
            .get(&key.to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn key_count(&self) -> usize {
        self.entries.len()
    }

    pub fn entry_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.cost_reductions.is_empty()
    }

    /// Sum of every non-weapon bonus that applies to `key`.
    ///
    /// For a `prefix/name` key this covers the exact bucket and the
    /// namespace's wildcard bucket. Wildcard entries only count when their
    /// criteria accept `name`.
    pub fn sum_bonuses_for(&self, key: &str) -> f64 {
        self.bonus_entries(key).into_iter().map(FeatureEntry::amount).sum()
    }

    /// Whole-number form of [`FeatureMap::sum_bonuses_for`].
    pub fn integer_bonus_for(&self, key: &str) -> i32 {
        self.bonus_entries(key)
            .into_iter()
            .map(FeatureEntry::integer_amount)
            .sum()
    }

    fn bonus_entries(&self, key: &str) -> Vec<&FeatureEntry> {
        let mut entries: Vec<&FeatureEntry> = self.get(key).iter().collect();
        if let Some((prefix, name)) = key.split_once('/') {
            entries.extend(self.get(&wildcard_key(prefix)).iter().filter(|entry| {
                match &entry.feature {
                    Feature::SkillBonus(bonus) => bonus.matches(name, ""),
                    Feature::SpellBonus(bonus) => bonus.matches(name),
                    _ => false,
                }
            }));
        }
        entries.retain(|entry| !entry.feature.is_weapon_bonus());
        entries
    }

    /// Total skill bonus for the named skill. Exact-name bonuses and broad
    /// bonuses are both re-tested against the name and specialization.
    pub fn skill_bonus_for(&self, name: &str, specialization: &str) -> i32 {
        [exact_key(SKILL_NAME, name), wildcard_key(SKILL_NAME)]
            .iter()
            .flat_map(|key| self.get(key))
            .filter(|entry| match &entry.feature {
                Feature::SkillBonus(bonus) => bonus.matches(name, specialization),
                _ => false,
            })
            .map(FeatureEntry::integer_amount)
            .sum()
    }

    /// Total spell bonus for a spell and the colleges it belongs to.
    pub fn spell_bonus_for(&self, name: &str, colleges: &[String]) -> i32 {
        let mut total = self.compared_spell_bonus(SPELL_COLLEGE, "");
        for college in colleges {
            total += self.compared_spell_bonus(&exact_key(SPELL_COLLEGE, college), college);
            total += self.compared_spell_bonus(&wildcard_key(SPELL_COLLEGE), college);
        }
        total += self.compared_spell_bonus(&exact_key(SPELL_NAME, name), name);
        total += self.compared_spell_bonus(&wildcard_key(SPELL_NAME), name);
        total
    }

    fn compared_spell_bonus(&self, key: &str, value: &str) -> i32 {
        self.get(key)
            .iter()
            .filter(|entry| match &entry.feature {
                Feature::SpellBonus(bonus) => bonus.matches(value),
                _ => false,
            })
            .map(FeatureEntry::integer_amount)
            .sum()
    }

    /// Weapon bonuses that apply to a weapon used with the named skill at
    /// `relative_level` above its controlling attribute.
    pub fn weapon_bonuses_for(
        &self,
        name: &str,
        specialization: &str,
        relative_level: i32,
    ) -> Vec<&WeaponBonus> {
        [exact_key(WEAPON_NAME, name), wildcard_key(WEAPON_NAME)]
            .iter()
            .flat_map(|key| self.get(key))
            .filter_map(|entry| match &entry.feature {
                Feature::WeaponBonus(bonus)
                    if bonus.matches(name, specialization, relative_level) =>
                {
                    Some(bonus)
                }
                _ => None,
            })
            .collect()
    }

    /// Percentage off an attribute's cost, capped at 80.
    pub fn cost_reduction_for(&self, attribute: PrimaryAttribute) -> i32 {
        self.cost_reductions
            .get(&attribute)
            .copied()
            .unwrap_or(0)
            .clamp(0, MAX_COST_REDUCTION)
    }

    /// Damage resistance at a location, counting whole-body coverage.
    pub fn dr_for(&self, location: HitLocation) -> i32 {
        location
            .covered_by()
            .into_iter()
            .map(|covering| self.integer_bonus_for(&dr_key(covering)))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use charsheet_common::amount::LeveledAmount;
    use charsheet_common::character::BonusAttribute;
    use charsheet_common::criteria::{StringCompare, StringCriteria};
    use charsheet_common::feature::{
        AttributeBonus, CostReduction, DrBonus, SkillBonus, SpellBonus, attribute_key,
    };

    struct Row {
        enabled: bool,
        features: Vec<Feature>,
        levels: i32,
        children: Vec<Row>,
    }

    impl FeatureSource for Row {
        fn is_self_enabled(&self) -> bool {
            self.enabled
        }

        fn children(&self) -> &[Self] {
            &self.children
        }

        fn granted_features(&self) -> Vec<(Feature, i32)> {
            self.features.iter().cloned().map(|f| (f, self.levels)).collect()
        }
    }

    fn dx_bonus(amount: f64) -> Feature {
        Feature::AttributeBonus(AttributeBonus::new(BonusAttribute::Dx, amount))
    }

    #[test]
    fn test_collect_respects_inherited_enablement() {
        let tree = vec![Row {
            enabled: false,
            features: vec![],
            levels: 0,
            children: vec![Row {
                enabled: true,
                features: vec![dx_bonus(2.0)],
                levels: 0,
                children: vec![],
            }],
        }];
        let mut map = FeatureMap::new();
        map.collect(&tree);
        assert_eq!(map.sum_bonuses_for("attr.dx"), 0.0);
        assert!(map.is_empty());
    }

    #[test]
    fn test_leveled_bonus_scales() {
        let mut bonus = AttributeBonus::new(BonusAttribute::Hp, 2.0);
        bonus.amount.set_per_level(true);
        let mut map = FeatureMap::new();
        map.add(Feature::AttributeBonus(bonus), 3);
        map.add(dx_bonus(1.0), 3);
        assert_eq!(map.integer_bonus_for(&attribute_key(BonusAttribute::Hp, Default::default())), 6);
        assert_eq!(map.integer_bonus_for("ATTR.DX"), 1);
    }

    #[test]
    fn test_wildcard_entries_are_retested() {
        let mut map = FeatureMap::new();
        map.add(
            Feature::SkillBonus(SkillBonus::new(
                StringCriteria::new(StringCompare::StartsWith, "Guns"),
                2,
            )),
            0,
        );
        let mut specialized = SkillBonus::new(StringCriteria::is("Broadsword"), 1);
        specialized.specialization_criteria = StringCriteria::is("Sharp");
        map.add(Feature::SkillBonus(specialized), 0);
        map.add(Feature::SkillBonus(SkillBonus::new(StringCriteria::is("Broadsword"), 1)), 0);

        // Two of the three share the wildcard key
        assert_eq!(map.get("skill.name*").len(), 2);
        assert_eq!(map.skill_bonus_for("Guns", "Pistol"), 2);
        assert_eq!(map.skill_bonus_for("Broadsword", ""), 1);
        assert_eq!(map.skill_bonus_for("Broadsword", "Sharp"), 2);
        assert_eq!(map.skill_bonus_for("Stealth", ""), 0);
    }

    #[test]
    fn test_sum_bonuses_counts_matching_wildcards() {
        let mut map = FeatureMap::new();
        map.add(
            Feature::SkillBonus(SkillBonus::new(
                StringCriteria::new(StringCompare::StartsWith, "Broad"),
                2,
            )),
            0,
        );
        map.add(Feature::SkillBonus(SkillBonus::new(StringCriteria::is("Broadsword"), 1)), 0);
        map.add(
            Feature::SkillBonus(SkillBonus::new(
                StringCriteria::new(StringCompare::StartsWith, "Guns"),
                4,
            )),
            0,
        );
        assert_eq!(map.sum_bonuses_for("skill.name/broadsword"), 3.0);
        assert_eq!(map.integer_bonus_for("skill.name/Broadsword"), 3);
        assert_eq!(map.integer_bonus_for("skill.name/broadaxe"), 2);
        assert_eq!(map.integer_bonus_for("skill.name/stealth"), 0);

        map.add(
            Feature::SpellBonus(SpellBonus {
                all_colleges: false,
                match_college: false,
                name_criteria: StringCriteria::new(StringCompare::Contains, "ball"),
                amount: LeveledAmount::integer(1),
            }),
            0,
        );
        assert_eq!(map.integer_bonus_for("spell.name/fireball"), 1);
        assert_eq!(map.integer_bonus_for("spell.name/ignite fire"), 0);
    }

    #[test]
    fn test_spell_bonus_lookup() {
        let mut map = FeatureMap::new();
        let base = SpellBonus {
            all_colleges: false,
            match_college: true,
            name_criteria: StringCriteria::is("Fire"),
            amount: LeveledAmount::integer(1),
        };
        map.add(Feature::SpellBonus(base.clone()), 0);
        map.add(
            Feature::SpellBonus(SpellBonus {
                all_colleges: true,
                ..base.clone()
            }),
            0,
        );
        map.add(
            Feature::SpellBonus(SpellBonus {
                match_college: false,
                name_criteria: StringCriteria::new(StringCompare::Contains, "ball"),
                ..base
            }),
            0,
        );
        let fire = vec!["Fire".to_string()];
        assert_eq!(map.spell_bonus_for("Fireball", &fire), 3);
        assert_eq!(map.spell_bonus_for("Ignite Fire", &fire), 2);
        assert_eq!(map.spell_bonus_for("Lightning", &["Air".to_string()]), 1);
    }

    #[test]
    fn test_sum_bonuses_ignores_weapon_bonuses() {
        let mut map = FeatureMap::new();
        map.add(Feature::WeaponBonus(WeaponBonus::new(StringCriteria::is("Axe/Mace"), 2)), 0);
        assert_eq!(map.sum_bonuses_for("weapon.name/axe/mace"), 0.0);
        assert_eq!(map.weapon_bonuses_for("Axe/Mace", "", 1).len(), 1);
        assert!(map.weapon_bonuses_for("Axe/Mace", "", -1).is_empty());
    }

    #[test]
    fn test_cost_reductions_combine_and_cap() {
        let mut map = FeatureMap::new();
        map.add(Feature::CostReduction(CostReduction::new(PrimaryAttribute::St, 50)), 0);
        map.add(Feature::CostReduction(CostReduction::new(PrimaryAttribute::St, 20)), 0);
        assert_eq!(map.cost_reduction_for(PrimaryAttribute::St), 70);
        map.add(Feature::CostReduction(CostReduction::new(PrimaryAttribute::St, 40)), 0);
        assert_eq!(map.cost_reduction_for(PrimaryAttribute::St), 80);
        assert_eq!(map.cost_reduction_for(PrimaryAttribute::Iq), 0);
    }

    #[test]
    fn test_dr_includes_full_body() {
        let mut map = FeatureMap::new();
        map.add(Feature::DrBonus(DrBonus::new(HitLocation::Torso, 3)), 0);
        map.add(Feature::DrBonus(DrBonus::new(HitLocation::FullBody, 1)), 0);
        map.add(Feature::DrBonus(DrBonus::new(HitLocation::FullBodyExceptEyes, 2)), 0);
        assert_eq!(map.dr_for(HitLocation::Torso), 6);
        assert_eq!(map.dr_for(HitLocation::Eyes), 1);
        assert_eq!(map.key_count(), 3);
    }
}
