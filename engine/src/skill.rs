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

//! Skills, techniques and the level calculation behind them.
//!
//! A skill's level starts from its controlling attribute, shifted by its
//! difficulty and by the points spent on it. The best of its defaults acts
//! both as a floor and as a source of free points. Techniques are always
//! bought relative to a single default.

use crate::character::Character;
use crate::defaults::{Exclusions, ResolveMode, best_candidate_level, resolve_skill_default_level};
use crate::features::FeatureSource;
use crate::identity::TraitId;
use charsheet_common::feature::Feature;
use charsheet_common::skill::{
    Difficulty, SkillDefault, SkillDefaultType, SkillDifficulty, skill_identifier,
};
use serde::{Deserialize, Serialize};

fn enabled() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SkillKind {
    Skill {
        difficulty: SkillDifficulty,
    },
    /// A maneuver bought up from one default. Difficulty is Average or Hard.
    Technique {
        default: SkillDefault,
        difficulty: Difficulty,
        #[serde(default)]
        limit: Option<i32>,
    },
    Container,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    #[serde(default)]
    pub id: TraitId,
    pub name: String,
    #[serde(default)]
    pub specialization: String,
    pub kind: SkillKind,
    #[serde(default)]
    pub points: i32,
    #[serde(default)]
    pub defaults: Vec<SkillDefault>,
    #[serde(default)]
    pub encumbrance_penalty_multiplier: i32,
    #[serde(default = "enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub features: Vec<Feature>,
    #[serde(default)]
    pub children: Vec<Skill>,
}

impl Skill {
    pub fn new(name: impl Into<String>, difficulty: SkillDifficulty) -> Self {
        Self::with_kind(name, SkillKind::Skill { difficulty })
    }

    pub fn technique(
        name: impl Into<String>,
        default: SkillDefault,
        difficulty: Difficulty,
        limit: Option<i32>,
    ) -> Self {
        Self::with_kind(
            name,
            SkillKind::Technique {
                default,
                difficulty,
                limit,
            },
        )
    }

    pub fn container(name: impl Into<String>, children: Vec<Skill>) -> Self {
        Self {
            children,
            ..Self::with_kind(name, SkillKind::Container)
        }
    }

    fn with_kind(name: impl Into<String>, kind: SkillKind) -> Self {
        Self {
            id: TraitId::new(),
            name: name.into(),
            specialization: String::new(),
            kind,
            points: 0,
            defaults: Vec::new(),
            encumbrance_penalty_multiplier: 0,
            enabled: true,
            features: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn specialized(mut self, specialization: impl Into<String>) -> Self {
        self.specialization = specialization.into();
        self
    }

    pub fn with_points(mut self, points: i32) -> Self {
        self.points = points;
        self
    }

    pub fn with_default(mut self, default: SkillDefault) -> Self {
        self.defaults.push(default);
        self
    }

    pub fn with_feature(mut self, feature: Feature) -> Self {
        self.features.push(feature);
        self
    }

    pub fn is_container(&self) -> bool {
        matches!(self.kind, SkillKind::Container)
    }

    /// `Name (Specialization)`; the string used to exclude this skill from
    /// its own default chain.
    pub fn identifier(&self) -> String {
        skill_identifier(&self.name, &self.specialization)
    }
}

impl FeatureSource for Skill {
    fn is_self_enabled(&self) -> bool {
        self.enabled
    }

    fn children(&self) -> &[Self] {
        &self.children
    }

    fn granted_features(&self) -> Vec<(Feature, i32)> {
        self.features.iter().cloned().map(|feature| (feature, 0)).collect()
    }
}

/// Computed level of a skill. `level` is `None` when the skill cannot be
/// used at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillLevel {
    pub level: Option<i32>,
    pub relative_level: i32,
}

impl SkillLevel {
    pub const UNDEFINED: SkillLevel = SkillLevel {
        level: None,
        relative_level: 0,
    };

    pub fn display(&self) -> String {
        self.level
            .map(|level| level.to_string())
            .unwrap_or_else(|| "-".to_string())
    }
}

/// The default a skill is best used from, with the free points it grants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultedFrom {
    pub default: SkillDefault,
    pub level: i32,
    pub adjusted_level: i32,
    pub points: i32,
}

/// Points to relative level above the difficulty baseline.
pub fn relative_level_for_points(points: i32) -> i32 {
    match points {
        i32::MIN..=0 => 0,
        1 => 0,
        2 | 3 => 1,
        _ => 1 + points / 4,
    }
}

/// Level of `skill` with `exclusions` already holding its own identifier.
pub(crate) fn calculate_level(
    skill: &Skill,
    character: &Character,
    exclusions: &Exclusions<'_>,
) -> SkillLevel {
    match &skill.kind {
        SkillKind::Skill { difficulty } => {
            calculate_skill_level(skill, *difficulty, character, exclusions)
        }
        SkillKind::Technique {
            default,
            difficulty,
            limit,
        } => calculate_technique_level(skill, default, *difficulty, *limit, character, exclusions),
        SkillKind::Container => SkillLevel::UNDEFINED,
    }
}

fn calculate_skill_level(
    skill: &Skill,
    difficulty: SkillDifficulty,
    character: &Character,
    exclusions: &Exclusions<'_>,
) -> SkillLevel {
    let attribute = character.attribute_value(difficulty.attribute);
    let best = best_default_with_points(skill, difficulty, character, exclusions);

    let mut points = skill.points;
    if difficulty.difficulty == Difficulty::Wildcard {
        points /= 3;
    } else if let Some(best) = best.as_ref().filter(|best| best.points > 0) {
        points += best.points;
    }

    let mut relative = difficulty.difficulty.base_relative_level();
    if points > 0 {
        relative += relative_level_for_points(points);
    } else if let Some(best) = best.as_ref().filter(|best| best.points < 0) {
        relative = best.adjusted_level - attribute;
    } else {
        return SkillLevel::UNDEFINED;
    }

    let mut level = attribute + relative;
    if let Some(best) = &best {
        if level < best.adjusted_level {
            relative += best.adjusted_level - level;
            level = best.adjusted_level;
        }
    }

    let bonus = character.skill_bonus_for(&skill.name, &skill.specialization)
        + character.encumbrance().penalty() * skill.encumbrance_penalty_multiplier;
    SkillLevel {
        level: Some(level + bonus),
        relative_level: relative + bonus,
    }
}

/// Highest default of `skill`, with the skill itself excluded, priced in the
/// points it would take to reach that level by study.
pub(crate) fn best_default_with_points(
    skill: &Skill,
    difficulty: SkillDifficulty,
    character: &Character,
    exclusions: &Exclusions<'_>,
) -> Option<DefaultedFrom> {
    let mut best: Option<DefaultedFrom> = None;
    for default in &skill.defaults {
        let Some(mut level) =
            resolve_skill_default_level(default, character, exclusions, ResolveMode::Full)
        else {
            continue;
        };
        if default.default_type.is_skill_based() {
            level -= character.skill_bonus_for(&default.name, &default.specialization);
        }
        if best.as_ref().is_none_or(|current| level > current.level) {
            best = Some(DefaultedFrom {
                default: default.clone(),
                level,
                adjusted_level: level,
                points: 0,
            });
        }
    }

    best.map(|mut best| {
        let baseline =
            character.attribute_value(difficulty.attribute) + difficulty.difficulty.base_relative_level();
        best.points = if best.level == baseline {
            1
        } else if best.level == baseline + 1 {
            2
        } else if best.level > baseline + 1 {
            4 * (best.level - (baseline + 1))
        } else {
            -best.level.max(0)
        };
        best
    })
}

fn calculate_technique_level(
    technique: &Skill,
    default: &SkillDefault,
    difficulty: Difficulty,
    limit: Option<i32>,
    character: &Character,
    exclusions: &Exclusions<'_>,
) -> SkillLevel {
    let base = match default.default_type {
        SkillDefaultType::Skill => {
            best_candidate_level(default, character, exclusions, ResolveMode::Full)
        }
        // Parry and Block are derived from the skill; take the modifier back out.
        _ => resolve_skill_default_level(default, character, exclusions, ResolveMode::Full)
            .map(|level| level - default.modifier),
    };
    let Some(base) = base else {
        return SkillLevel::UNDEFINED;
    };

    let mut points = technique.points;
    if difficulty == Difficulty::Hard {
        points -= 1;
    }
    let mut relative = points.max(0);
    relative += character.skill_bonus_for(&technique.name, &technique.specialization);
    let mut level = base + default.modifier + relative;

    if let Some(limit) = limit {
        let max = base + limit;
        if level > max {
            relative -= level - max;
            level = max;
        }
    }
    SkillLevel {
        level: Some(level),
        relative_level: relative,
    }
}
