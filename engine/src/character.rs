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

//! The character aggregate.
//!
//! A [`Character`] owns its trait forests and two derived caches: the
//! [`FeatureMap`] and the table of computed skill levels. Both are built on
//! first read. Every method taking `&mut self` clears them, so the next read
//! sees a complete rebuild and never a half-updated map.

use crate::advantage::{Advantage, AdvantageKind};
use crate::attributes::Attributes;
use crate::defaults::Exclusions;
use crate::equipment::Equipment;
use crate::error::{SheetError, SheetResult};
use crate::features::{FeatureMap, FeatureSource};
use crate::identity::TraitId;
use crate::rules::Rules;
use crate::skill::{self, Skill, SkillKind, SkillLevel};
use crate::tree;
use charsheet_common::character::{
    AttributeLimitation, Attribute, BonusAttribute, Encumbrance, HitLocation, PrimaryAttribute,
};
use charsheet_common::feature::{WeaponBonus, attribute_key};
use once_cell::unsync::OnceCell;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;

/// Points spent, broken down the way a sheet displays them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointSummary {
    pub attributes: i32,
    pub advantages: i32,
    pub disadvantages: i32,
    pub quirks: i32,
    pub race: i32,
    pub skills: i32,
    pub total: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Character {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    attributes: Attributes,
    #[serde(default)]
    encumbrance: Encumbrance,
    #[serde(default)]
    advantages: Vec<Advantage>,
    #[serde(default)]
    skills: Vec<Skill>,
    #[serde(default)]
    equipment: Vec<Equipment>,
    #[serde(skip)]
    rules: Rules,
    #[serde(skip)]
    feature_map: OnceCell<FeatureMap>,
    #[serde(skip)]
    skill_levels: OnceCell<HashMap<TraitId, SkillLevel>>,
    #[serde(skip)]
    resolved_levels: RefCell<HashMap<ResolutionKey, SkillLevel>>,
}

/// A skill together with the sorted set of identifiers excluded while
/// computing it.
type ResolutionKey = (TraitId, Vec<String>);

fn resolution_key(id: TraitId, exclusions: &Exclusions<'_>) -> ResolutionKey {
    let mut excluded: Vec<String> = exclusions.iter().map(str::to_string).collect();
    excluded.sort_unstable();
    excluded.dedup();
    (id, excluded)
}

fn flatten<'a, T: FeatureSource>(rows: &'a [T], enabled_only: bool, out: &mut Vec<&'a T>) {
    for row in rows {
        if enabled_only && !row.is_self_enabled() {
            continue;
        }
        out.push(row);
        flatten(row.children(), enabled_only, out);
    }
}

impl Character {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn from_yaml(yaml: &str) -> SheetResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn load(path: impl AsRef<Path>) -> SheetResult<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        let character: Character = serde_yaml::from_reader(file)?;
        tracing::debug!(
            "Loaded character '{}' from {}",
            character.name,
            path.as_ref().display()
        );
        Ok(character)
    }

    // ---------------------------------------------------------------------
    // Mutation. Every path goes through `invalidate`.
    // ---------------------------------------------------------------------

    /// Drops the derived caches. Called by every mutator.
    pub fn invalidate(&mut self) {
        self.feature_map.take();
        self.skill_levels.take();
        self.resolved_levels.get_mut().clear();
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn set_rules(&mut self, rules: Rules) {
        self.invalidate();
        self.rules = rules;
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut Attributes {
        self.invalidate();
        &mut self.attributes
    }

    pub fn encumbrance(&self) -> Encumbrance {
        self.encumbrance
    }

    pub fn set_encumbrance(&mut self, encumbrance: Encumbrance) {
        self.invalidate();
        self.encumbrance = encumbrance;
    }

    pub fn advantages(&self) -> &[Advantage] {
        &self.advantages
    }

    /// Direct access to the advantage forest. The caches are already cleared
    /// when this returns, and cannot be read again until the borrow ends.
    pub fn advantages_mut(&mut self) -> &mut Vec<Advantage> {
        self.invalidate();
        &mut self.advantages
    }

    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    pub fn skills_mut(&mut self) -> &mut Vec<Skill> {
        self.invalidate();
        &mut self.skills
    }

    pub fn equipment(&self) -> &[Equipment] {
        &self.equipment
    }

    pub fn equipment_mut(&mut self) -> &mut Vec<Equipment> {
        self.invalidate();
        &mut self.equipment
    }

    pub fn add_advantage(&mut self, advantage: Advantage) -> TraitId {
        let id = advantage.id;
        self.advantages_mut().push(advantage);
        id
    }

    pub fn add_skill(&mut self, skill: Skill) -> TraitId {
        let id = skill.id;
        self.skills_mut().push(skill);
        id
    }

    pub fn add_equipment(&mut self, equipment: Equipment) -> TraitId {
        let id = equipment.id;
        self.equipment_mut().push(equipment);
        id
    }

    fn advantage_mut(&mut self, id: TraitId) -> SheetResult<&mut Advantage> {
        tree::find_mut(self.advantages_mut(), id).ok_or(SheetError::TraitNotFound(id))
    }

    fn skill_mut(&mut self, id: TraitId) -> SheetResult<&mut Skill> {
        tree::find_mut(self.skills_mut(), id).ok_or(SheetError::TraitNotFound(id))
    }

    pub fn set_advantage_enabled(&mut self, id: TraitId, enabled: bool) -> SheetResult<()> {
        self.advantage_mut(id)?.enabled = enabled;
        Ok(())
    }

    pub fn set_advantage_levels(&mut self, id: TraitId, levels: Option<i32>) -> SheetResult<()> {
        self.advantage_mut(id)?.levels = levels;
        Ok(())
    }

    pub fn set_modifier_enabled(
        &mut self,
        advantage_id: TraitId,
        modifier_id: TraitId,
        enabled: bool,
    ) -> SheetResult<()> {
        let modifier = self
            .advantage_mut(advantage_id)?
            .modifiers
            .iter_mut()
            .find(|modifier| modifier.id == modifier_id)
            .ok_or(SheetError::TraitNotFound(modifier_id))?;
        modifier.enabled = enabled;
        Ok(())
    }

    pub fn set_skill_points(&mut self, id: TraitId, points: i32) -> SheetResult<()> {
        self.skill_mut(id)?.points = points;
        Ok(())
    }

    pub fn set_skill_enabled(&mut self, id: TraitId, enabled: bool) -> SheetResult<()> {
        self.skill_mut(id)?.enabled = enabled;
        Ok(())
    }

    pub fn set_equipped(&mut self, id: TraitId, equipped: bool) -> SheetResult<()> {
        tree::find_mut(self.equipment_mut(), id)
            .ok_or(SheetError::TraitNotFound(id))?
            .equipped = equipped;
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Bonuses
    // ---------------------------------------------------------------------

    pub fn feature_map(&self) -> &FeatureMap {
        self.feature_map.get_or_init(|| self.build_feature_map())
    }

    fn build_feature_map(&self) -> FeatureMap {
        let mut map = FeatureMap::new();
        map.collect(&self.advantages);
        map.collect(&self.equipment);
        map.collect(&self.skills);
        tracing::debug!(
            "Rebuilt feature map for '{}': {} keys, {} entries",
            self.name,
            map.key_count(),
            map.entry_count()
        );
        map
    }

    pub fn sum_bonuses_for(&self, key: &str) -> f64 {
        self.feature_map().sum_bonuses_for(key)
    }

    pub fn integer_bonus_for(&self, key: &str) -> i32 {
        self.feature_map().integer_bonus_for(key)
    }

    fn attribute_bonus(&self, attribute: BonusAttribute) -> i32 {
        self.integer_bonus_for(&attribute_key(attribute, AttributeLimitation::None))
    }

    pub fn skill_bonus_for(&self, name: &str, specialization: &str) -> i32 {
        self.feature_map().skill_bonus_for(name, specialization)
    }

    pub fn spell_bonus_for(&self, name: &str, colleges: &[String]) -> i32 {
        self.feature_map().spell_bonus_for(name, colleges)
    }

    pub fn cost_reduction_for(&self, attribute: PrimaryAttribute) -> i32 {
        self.feature_map().cost_reduction_for(attribute)
    }

    pub fn dr_for(&self, location: HitLocation) -> i32 {
        self.feature_map().dr_for(location)
    }

    pub fn parry_bonus(&self) -> i32 {
        self.attribute_bonus(BonusAttribute::Parry)
    }

    pub fn block_bonus(&self) -> i32 {
        self.attribute_bonus(BonusAttribute::Block)
    }

    /// Weapon bonuses for a weapon used with the named skill, tested against
    /// the best relative level among the matching skills.
    pub fn weapon_bonuses_for(&self, name: &str, specialization: &str) -> Vec<&WeaponBonus> {
        let relative = self
            .skills_named(name, specialization, false, &Exclusions::new())
            .into_iter()
            .filter_map(|candidate| {
                let level = self.skill_level(candidate.id);
                level.level.map(|_| level.relative_level)
            })
            .max();
        match relative {
            Some(relative) => self
                .feature_map()
                .weapon_bonuses_for(name, specialization, relative),
            None => Vec::new(),
        }
    }

    /// Extra damage for a weapon rolling `dice` dice. Per-level weapon
    /// bonuses scale with the dice.
    pub fn weapon_damage_bonus(&self, name: &str, specialization: &str, dice: i32) -> i32 {
        self.weapon_bonuses_for(name, specialization)
            .into_iter()
            .map(|bonus| bonus.amount.integer_adjusted_amount_at(dice))
            .sum()
    }

    // ---------------------------------------------------------------------
    // Attributes
    // ---------------------------------------------------------------------

    /// Current value of an attribute, bonuses included.
    pub fn attribute_value(&self, attribute: Attribute) -> i32 {
        let bonus = self.attribute_bonus(attribute.into());
        match attribute {
            Attribute::St => self.attributes.st + bonus,
            Attribute::Dx => self.attributes.dx + bonus,
            Attribute::Iq => self.attributes.iq + bonus,
            Attribute::Ht => self.attributes.ht + bonus,
            Attribute::Will => {
                self.attribute_value(Attribute::Iq) + self.attributes.will_adjustment + bonus
            }
            Attribute::Per => {
                self.attribute_value(Attribute::Iq) + self.attributes.per_adjustment + bonus
            }
        }
    }

    pub fn hit_points(&self) -> i32 {
        self.attribute_value(Attribute::St)
            + self.attributes.hp_adjustment
            + self.attribute_bonus(BonusAttribute::Hp)
    }

    pub fn fatigue_points(&self) -> i32 {
        self.attribute_value(Attribute::Ht)
            + self.attributes.fp_adjustment
            + self.attribute_bonus(BonusAttribute::Fp)
    }

    pub fn basic_speed(&self) -> f64 {
        let raw = f64::from(self.attribute_value(Attribute::Dx) + self.attribute_value(Attribute::Ht))
            / 4.0;
        raw + self.attributes.speed_adjustment
            + self.sum_bonuses_for(&attribute_key(
                BonusAttribute::BasicSpeed,
                AttributeLimitation::None,
            ))
    }

    pub fn basic_move(&self) -> i32 {
        let basic_move = self.basic_speed().floor() as i32
            + self.attributes.move_adjustment
            + self.attribute_bonus(BonusAttribute::BasicMove);
        basic_move.max(0)
    }

    pub fn dodge(&self) -> i32 {
        let dodge = self.basic_speed().floor() as i32
            + 3
            + self.encumbrance.penalty()
            + self.attribute_bonus(BonusAttribute::Dodge);
        dodge.max(1)
    }

    // ---------------------------------------------------------------------
    // Skills
    // ---------------------------------------------------------------------

    /// Enabled skills and techniques matching a name and, when given, a
    /// specialization. Excluded identifiers are skipped, as are skills
    /// without points when `require_points` is set. Techniques count even
    /// without points.
    pub fn skills_named(
        &self,
        name: &str,
        specialization: &str,
        require_points: bool,
        exclusions: &Exclusions<'_>,
    ) -> Vec<&Skill> {
        let mut rows = Vec::new();
        flatten(&self.skills, true, &mut rows);
        rows.into_iter()
            .filter(|skill| !skill.is_container())
            .filter(|skill| skill.name.eq_ignore_ascii_case(name))
            .filter(|skill| {
                specialization.is_empty()
                    || skill.specialization.eq_ignore_ascii_case(specialization)
            })
            .filter(|skill| {
                !require_points
                    || matches!(skill.kind, SkillKind::Technique { .. })
                    || skill.points > 0
            })
            .filter(|skill| !exclusions.contains(&skill.identifier()))
            .collect()
    }

    /// Cached level of the skill with `id`; undefined for unknown ids.
    pub fn skill_level(&self, id: TraitId) -> SkillLevel {
        self.skill_levels
            .get_or_init(|| self.compute_skill_levels())
            .get(&id)
            .copied()
            .unwrap_or(SkillLevel::UNDEFINED)
    }

    /// Level of `skill` computed with `exclusions`, which must hold its own
    /// identifier. Each distinct excluded set is computed once until the
    /// next mutation.
    pub(crate) fn resolved_level(&self, skill: &Skill, exclusions: &Exclusions<'_>) -> SkillLevel {
        let key = resolution_key(skill.id, exclusions);
        let known = self.resolved_levels.borrow().get(&key).copied();
        if let Some(level) = known {
            return level;
        }
        let level = skill::calculate_level(skill, self, exclusions);
        self.resolved_levels.borrow_mut().insert(key, level);
        level
    }

    /// Already computed level of `skill` under `exclusions`, if any.
    pub(crate) fn known_level(&self, skill: &Skill, exclusions: &Exclusions<'_>) -> Option<SkillLevel> {
        self.resolved_levels
            .borrow()
            .get(&resolution_key(skill.id, exclusions))
            .copied()
    }

    fn compute_skill_levels(&self) -> HashMap<TraitId, SkillLevel> {
        let mut rows = Vec::new();
        flatten(&self.skills, false, &mut rows);
        let levels: HashMap<TraitId, SkillLevel> = rows
            .into_iter()
            .map(|skill| {
                let identifier = skill.identifier();
                let exclusions = Exclusions::new();
                let own = exclusions.with(&identifier);
                (skill.id, self.resolved_level(skill, &own))
            })
            .collect();
        tracing::debug!(
            "Recomputed {} skill levels for '{}'",
            levels.len(),
            self.name
        );
        levels
    }

    // ---------------------------------------------------------------------
    // Points
    // ---------------------------------------------------------------------

    pub fn attribute_points(&self) -> i32 {
        self.attributes
            .total_points(|attribute| self.cost_reduction_for(attribute))
    }

    pub fn point_summary(&self) -> PointSummary {
        let mut summary = PointSummary {
            attributes: self.attribute_points(),
            ..PointSummary::default()
        };
        for advantage in &self.advantages {
            self.tally_advantage(advantage, &mut summary);
        }
        let mut rows = Vec::new();
        flatten(&self.skills, true, &mut rows);
        summary.skills = rows
            .into_iter()
            .filter(|skill| !skill.is_container())
            .map(|skill| skill.points)
            .sum();
        summary.total = summary.attributes
            + summary.advantages
            + summary.disadvantages
            + summary.quirks
            + summary.race
            + summary.skills;
        summary
    }

    fn tally_advantage(&self, advantage: &Advantage, summary: &mut PointSummary) {
        if !advantage.enabled {
            return;
        }
        match advantage.kind {
            AdvantageKind::Group => {
                for child in &advantage.children {
                    self.tally_advantage(child, summary);
                }
            }
            AdvantageKind::Race => summary.race += advantage.adjusted_points(&self.rules),
            AdvantageKind::Trait | AdvantageKind::AlternativeAbilities => {
                match advantage.adjusted_points(&self.rules) {
                    points if points > 0 => summary.advantages += points,
                    -1 => summary.quirks -= 1,
                    points => summary.disadvantages += points,
                }
            }
        }
    }
}
