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

//! Skill difficulty and skill default descriptors.

use crate::character::Attribute;
use serde::{Deserialize, Serialize};

/// What a skill default is based on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillDefaultType {
    #[serde(rename = "ST")]
    St,
    #[serde(rename = "DX")]
    Dx,
    #[serde(rename = "IQ")]
    Iq,
    #[serde(rename = "HT")]
    Ht,
    Will,
    Per,
    Skill,
    Parry,
    Block,
}

impl SkillDefaultType {
    /// Parses a type name, case-insensitively. Unknown names mean [`SkillDefaultType::Skill`].
    pub fn by_name(name: &str) -> Self {
        Self::all()
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name.trim()))
            .unwrap_or(SkillDefaultType::Skill)
    }

    pub fn name(&self) -> &'static str {
        match self {
            SkillDefaultType::St => "ST",
            SkillDefaultType::Dx => "DX",
            SkillDefaultType::Iq => "IQ",
            SkillDefaultType::Ht => "HT",
            SkillDefaultType::Will => "Will",
            SkillDefaultType::Per => "Per",
            SkillDefaultType::Skill => "Skill",
            SkillDefaultType::Parry => "Parry",
            SkillDefaultType::Block => "Block",
        }
    }

    /// True when resolving the default means looking up other skills.
    pub fn is_skill_based(&self) -> bool {
        matches!(
            self,
            SkillDefaultType::Skill | SkillDefaultType::Parry | SkillDefaultType::Block
        )
    }

    pub fn attribute(&self) -> Option<Attribute> {
        match self {
            SkillDefaultType::St => Some(Attribute::St),
            SkillDefaultType::Dx => Some(Attribute::Dx),
            SkillDefaultType::Iq => Some(Attribute::Iq),
            SkillDefaultType::Ht => Some(Attribute::Ht),
            SkillDefaultType::Will => Some(Attribute::Will),
            SkillDefaultType::Per => Some(Attribute::Per),
            _ => None,
        }
    }

    pub fn all() -> Vec<SkillDefaultType> {
        vec![
            SkillDefaultType::St,
            SkillDefaultType::Dx,
            SkillDefaultType::Iq,
            SkillDefaultType::Ht,
            SkillDefaultType::Will,
            SkillDefaultType::Per,
            SkillDefaultType::Skill,
            SkillDefaultType::Parry,
            SkillDefaultType::Block,
        ]
    }
}

impl From<Attribute> for SkillDefaultType {
    fn from(value: Attribute) -> Self {
        match value {
            Attribute::St => SkillDefaultType::St,
            Attribute::Dx => SkillDefaultType::Dx,
            Attribute::Iq => SkillDefaultType::Iq,
            Attribute::Ht => SkillDefaultType::Ht,
            Attribute::Will => SkillDefaultType::Will,
            Attribute::Per => SkillDefaultType::Per,
        }
    }
}

/// A way to use a skill without having studied it, e.g. "DX-5" or
/// "Shortsword-2". Empty name and specialization mean none.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SkillDefault {
    #[serde(rename = "type")]
    pub default_type: SkillDefaultType,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub specialization: String,
    #[serde(default)]
    pub modifier: i32,
}

impl SkillDefault {
    pub fn attribute(attribute: Attribute, modifier: i32) -> Self {
        Self {
            default_type: attribute.into(),
            name: String::new(),
            specialization: String::new(),
            modifier,
        }
    }

    pub fn skill(name: impl Into<String>, modifier: i32) -> Self {
        Self::skill_based(SkillDefaultType::Skill, name, "", modifier)
    }

    pub fn skill_based(
        default_type: SkillDefaultType,
        name: impl Into<String>,
        specialization: impl Into<String>,
        modifier: i32,
    ) -> Self {
        Self {
            default_type,
            name: name.into(),
            specialization: specialization.into(),
            modifier,
        }
    }

    /// Identifier of the skill this default points at, e.g. `Guns (Pistol)`.
    pub fn full_name(&self) -> String {
        skill_identifier(&self.name, &self.specialization)
    }
}

impl std::fmt::Display for SkillDefault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let base = if self.default_type.is_skill_based() {
            let name = self.full_name();
            match self.default_type {
                SkillDefaultType::Skill => name,
                other => format!("{} {}", name, other.name()),
            }
        } else {
            self.default_type.name().to_string()
        };
        match self.modifier {
            0 => write!(f, "{}", base),
            m if m > 0 => write!(f, "{}+{}", base, m),
            m => write!(f, "{}{}", base, m),
        }
    }
}

/// `Name (Specialization)`, or just `Name` without one.
pub fn skill_identifier(name: &str, specialization: &str) -> String {
    if specialization.is_empty() {
        name.to_string()
    } else {
        format!("{} ({})", name, specialization)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    #[serde(rename = "E")]
    Easy,
    #[serde(rename = "A")]
    Average,
    #[serde(rename = "H")]
    Hard,
    #[serde(rename = "VH")]
    VeryHard,
    #[serde(rename = "W")]
    Wildcard,
}

impl Difficulty {
    /// Relative level bought with the first point.
    pub fn base_relative_level(&self) -> i32 {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Average => -1,
            Difficulty::Hard => -2,
            Difficulty::VeryHard | Difficulty::Wildcard => -3,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Difficulty::Easy => "E",
            Difficulty::Average => "A",
            Difficulty::Hard => "H",
            Difficulty::VeryHard => "VH",
            Difficulty::Wildcard => "W",
        }
    }
}

/// Controlling attribute plus difficulty, written `DX/A`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SkillDifficulty {
    pub attribute: Attribute,
    pub difficulty: Difficulty,
}

impl SkillDifficulty {
    pub fn new(attribute: Attribute, difficulty: Difficulty) -> Self {
        Self {
            attribute,
            difficulty,
        }
    }
}

impl std::fmt::Display for SkillDifficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.attribute.name(), self.difficulty.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_skill_based() {
        let based: Vec<_> = SkillDefaultType::all()
            .into_iter()
            .filter(|kind| kind.is_skill_based())
            .collect();
        assert_eq!(
            based,
            vec![
                SkillDefaultType::Skill,
                SkillDefaultType::Parry,
                SkillDefaultType::Block
            ]
        );
    }

    #[test]
    fn test_by_name() {
        assert_eq!(SkillDefaultType::by_name("dx"), SkillDefaultType::Dx);
        assert_eq!(SkillDefaultType::by_name("Parry"), SkillDefaultType::Parry);
        assert_eq!(SkillDefaultType::by_name("nonsense"), SkillDefaultType::Skill);
    }

    #[test]
    fn test_attribute_mapping() {
        for attribute in Attribute::all() {
            let kind = SkillDefaultType::from(attribute);
            assert_eq!(kind.attribute(), Some(attribute));
            assert!(!kind.is_skill_based());
        }
        assert_eq!(SkillDefaultType::Block.attribute(), None);
    }

    #[test]
    fn test_default_display() {
        assert_eq!(SkillDefault::attribute(Attribute::Dx, -5).to_string(), "DX-5");
        assert_eq!(SkillDefault::skill("Shortsword", -2).to_string(), "Shortsword-2");
        let parry = SkillDefault::skill_based(SkillDefaultType::Parry, "Karate", "", 1);
        assert_eq!(parry.to_string(), "Karate Parry+1");
    }

    #[test]
    fn test_identifier() {
        assert_eq!(skill_identifier("Guns", "Pistol"), "Guns (Pistol)");
        assert_eq!(skill_identifier("Stealth", ""), "Stealth");
    }

    #[test]
    fn test_difficulty() {
        assert_eq!(Difficulty::Hard.base_relative_level(), -2);
        let difficulty = SkillDifficulty::new(Attribute::Iq, Difficulty::VeryHard);
        assert_eq!(difficulty.to_string(), "IQ/VH");
    }
}
