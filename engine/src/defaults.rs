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

//! Skill default resolution.
//!
//! Defaults may point at other skills which have defaults of their own, so
//! resolution is recursive. Every frame carries the chain of skill
//! identifiers already being resolved, and a skill found in the chain is
//! never used again. The chain is immutable: a frame extends it for its own
//! callees only, so sibling branches never see each other's entries.

use crate::character::Character;
use charsheet_common::skill::{SkillDefault, SkillDefaultType};

/// Where candidate skill levels come from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResolveMode {
    /// Read the character's cached skill levels.
    #[default]
    Cached,
    /// Recompute each candidate from scratch. Required while the cache
    /// itself is being built.
    Full,
}

/// Persistent list of skill identifiers excluded from resolution.
#[derive(Debug, Clone, Copy, Default)]
pub enum Exclusions<'a> {
    #[default]
    Empty,
    Link {
        identifier: &'a str,
        parent: &'a Exclusions<'a>,
    },
}

impl<'a> Exclusions<'a> {
    pub const fn new() -> Self {
        Exclusions::Empty
    }

    /// A new chain holding `identifier` in front of this one.
    pub fn with<'b>(&'b self, identifier: &'b str) -> Exclusions<'b> {
        Exclusions::Link {
            identifier,
            parent: self,
        }
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.iter().any(|excluded| excluded == identifier)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        let mut current = self;
        std::iter::from_fn(move || match current {
            Exclusions::Empty => None,
            Exclusions::Link { identifier, parent } => {
                current = *parent;
                Some(*identifier)
            }
        })
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Exclusions::Empty)
    }
}

/// Level a default provides, or `None` when nothing usable backs it.
///
/// `exclusions` must already hold the identifier of the skill whose default
/// is being resolved.
pub fn resolve_skill_default_level(
    default: &SkillDefault,
    character: &Character,
    exclusions: &Exclusions<'_>,
    mode: ResolveMode,
) -> Option<i32> {
    if let Some(attribute) = default.default_type.attribute() {
        return Some(character.attribute_value(attribute) + default.modifier);
    }
    let best = best_candidate_level(default, character, exclusions, mode)?;
    let level = match default.default_type {
        SkillDefaultType::Parry => best / 2 + 3 + character.parry_bonus(),
        SkillDefaultType::Block => best / 2 + 3 + character.block_bonus(),
        _ => best,
    };
    Some(level + default.modifier)
}

/// Highest level among the skills a skill-based default can draw on.
///
/// In `Full` mode a candidate is skipped when its level with only itself
/// excluded is already known and cannot beat the best found so far. A
/// longer exclusion list never raises a skill's level.
pub(crate) fn best_candidate_level(
    default: &SkillDefault,
    character: &Character,
    exclusions: &Exclusions<'_>,
    mode: ResolveMode,
) -> Option<i32> {
    let require_points = character.rules().defaults_require_points;
    let mut best: Option<i32> = None;
    for candidate in
        character.skills_named(&default.name, &default.specialization, require_points, exclusions)
    {
        let level = match mode {
            ResolveMode::Cached => character.skill_level(candidate.id).level,
            ResolveMode::Full => {
                let identifier = candidate.identifier();
                let ceiling = character.known_level(candidate, &Exclusions::new().with(&identifier));
                if let (Some(best), Some(ceiling)) = (best, ceiling) {
                    if ceiling.level.is_none_or(|ceiling| ceiling <= best) {
                        continue;
                    }
                }
                let chain = exclusions.with(&identifier);
                tracing::trace!(
                    "Resolving {} for default {} ({} excluded)",
                    identifier,
                    default,
                    chain.len()
                );
                character.resolved_level(candidate, &chain).level
            }
        };
        if level > best {
            best = level;
        }
    }
    if best.is_none() {
        tracing::trace!("No usable skill for default {}", default);
    }
    best
}
