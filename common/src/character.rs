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

//! Attribute, hit location and encumbrance tags with their point arithmetic.

use serde::{Deserialize, Serialize};

/// Largest percentage a cost reduction can take off an attribute.
pub const MAX_COST_REDUCTION: i32 = 80;

/// Attributes a skill can be based on or default from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Attribute {
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
}

impl Attribute {
    pub fn name(&self) -> &'static str {
        match self {
            Attribute::St => "ST",
            Attribute::Dx => "DX",
            Attribute::Iq => "IQ",
            Attribute::Ht => "HT",
            Attribute::Will => "Will",
            Attribute::Per => "Per",
        }
    }

    /// Character points for each level above or below the base score.
    pub fn points_per_level(&self) -> i32 {
        match self {
            Attribute::St | Attribute::Ht => 10,
            Attribute::Dx | Attribute::Iq => 20,
            Attribute::Will | Attribute::Per => 5,
        }
    }

    pub fn all() -> Vec<Attribute> {
        vec![
            Attribute::St,
            Attribute::Dx,
            Attribute::Iq,
            Attribute::Ht,
            Attribute::Will,
            Attribute::Per,
        ]
    }
}

/// The four attributes a cost reduction may apply to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimaryAttribute {
    #[serde(rename = "ST")]
    St,
    #[serde(rename = "DX")]
    Dx,
    #[serde(rename = "IQ")]
    Iq,
    #[serde(rename = "HT")]
    Ht,
}

impl PrimaryAttribute {
    pub fn all() -> [PrimaryAttribute; 4] {
        [
            PrimaryAttribute::St,
            PrimaryAttribute::Dx,
            PrimaryAttribute::Iq,
            PrimaryAttribute::Ht,
        ]
    }
}

impl From<PrimaryAttribute> for Attribute {
    fn from(value: PrimaryAttribute) -> Self {
        match value {
            PrimaryAttribute::St => Attribute::St,
            PrimaryAttribute::Dx => Attribute::Dx,
            PrimaryAttribute::Iq => Attribute::Iq,
            PrimaryAttribute::Ht => Attribute::Ht,
        }
    }
}

impl TryFrom<Attribute> for PrimaryAttribute {
    type Error = Attribute;

    fn try_from(value: Attribute) -> Result<Self, Self::Error> {
        match value {
            Attribute::St => Ok(PrimaryAttribute::St),
            Attribute::Dx => Ok(PrimaryAttribute::Dx),
            Attribute::Iq => Ok(PrimaryAttribute::Iq),
            Attribute::Ht => Ok(PrimaryAttribute::Ht),
            other => Err(other),
        }
    }
}

/// Anything an attribute bonus can raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BonusAttribute {
    St,
    Dx,
    Iq,
    Ht,
    Will,
    FrightCheck,
    Per,
    Vision,
    Hearing,
    TasteSmell,
    Touch,
    Dodge,
    Parry,
    Block,
    BasicSpeed,
    BasicMove,
    Hp,
    Fp,
}

impl BonusAttribute {
    /// Stable identifier used inside feature keys.
    pub fn id(&self) -> &'static str {
        match self {
            BonusAttribute::St => "st",
            BonusAttribute::Dx => "dx",
            BonusAttribute::Iq => "iq",
            BonusAttribute::Ht => "ht",
            BonusAttribute::Will => "will",
            BonusAttribute::FrightCheck => "fright_check",
            BonusAttribute::Per => "per",
            BonusAttribute::Vision => "vision",
            BonusAttribute::Hearing => "hearing",
            BonusAttribute::TasteSmell => "taste_smell",
            BonusAttribute::Touch => "touch",
            BonusAttribute::Dodge => "dodge",
            BonusAttribute::Parry => "parry",
            BonusAttribute::Block => "block",
            BonusAttribute::BasicSpeed => "basic_speed",
            BonusAttribute::BasicMove => "basic_move",
            BonusAttribute::Hp => "hp",
            BonusAttribute::Fp => "fp",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BonusAttribute::St => "ST",
            BonusAttribute::Dx => "DX",
            BonusAttribute::Iq => "IQ",
            BonusAttribute::Ht => "HT",
            BonusAttribute::Will => "Will",
            BonusAttribute::FrightCheck => "Fright Check",
            BonusAttribute::Per => "Perception",
            BonusAttribute::Vision => "Vision",
            BonusAttribute::Hearing => "Hearing",
            BonusAttribute::TasteSmell => "Taste & Smell",
            BonusAttribute::Touch => "Touch",
            BonusAttribute::Dodge => "Dodge",
            BonusAttribute::Parry => "Parry",
            BonusAttribute::Block => "Block",
            BonusAttribute::BasicSpeed => "Basic Speed",
            BonusAttribute::BasicMove => "Basic Move",
            BonusAttribute::Hp => "HP",
            BonusAttribute::Fp => "FP",
        }
    }

    /// Basic Speed is tracked in quarters, everything else in whole points.
    pub fn is_integer_only(&self) -> bool {
        !matches!(self, BonusAttribute::BasicSpeed)
    }
}

impl From<Attribute> for BonusAttribute {
    fn from(value: Attribute) -> Self {
        match value {
            Attribute::St => BonusAttribute::St,
            Attribute::Dx => BonusAttribute::Dx,
            Attribute::Iq => BonusAttribute::Iq,
            Attribute::Ht => BonusAttribute::Ht,
            Attribute::Will => BonusAttribute::Will,
            Attribute::Per => BonusAttribute::Per,
        }
    }
}

/// Restricts a strength bonus to a subset of its uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeLimitation {
    #[default]
    None,
    StrikingOnly,
    LiftingOnly,
}

impl AttributeLimitation {
    pub fn id(&self) -> Option<&'static str> {
        match self {
            AttributeLimitation::None => None,
            AttributeLimitation::StrikingOnly => Some("striking_only"),
            AttributeLimitation::LiftingOnly => Some("lifting_only"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HitLocation {
    Eyes,
    Skull,
    Face,
    Neck,
    Torso,
    Vitals,
    Groin,
    Arms,
    Hands,
    Legs,
    Feet,
    Tail,
    Wings,
    Fins,
    Brain,
    FullBody,
    FullBodyExceptEyes,
}

impl HitLocation {
    pub fn id(&self) -> &'static str {
        match self {
            HitLocation::Eyes => "eyes",
            HitLocation::Skull => "skull",
            HitLocation::Face => "face",
            HitLocation::Neck => "neck",
            HitLocation::Torso => "torso",
            HitLocation::Vitals => "vitals",
            HitLocation::Groin => "groin",
            HitLocation::Arms => "arms",
            HitLocation::Hands => "hands",
            HitLocation::Legs => "legs",
            HitLocation::Feet => "feet",
            HitLocation::Tail => "tail",
            HitLocation::Wings => "wings",
            HitLocation::Fins => "fins",
            HitLocation::Brain => "brain",
            HitLocation::FullBody => "full_body",
            HitLocation::FullBodyExceptEyes => "full_body_except_eyes",
        }
    }

    /// Locations whose DR bonuses also protect this one, itself included.
    pub fn covered_by(&self) -> Vec<HitLocation> {
        match self {
            HitLocation::FullBody => vec![HitLocation::FullBody],
            HitLocation::FullBodyExceptEyes => {
                vec![HitLocation::FullBodyExceptEyes, HitLocation::FullBody]
            }
            HitLocation::Eyes => vec![HitLocation::Eyes, HitLocation::FullBody],
            other => vec![
                *other,
                HitLocation::FullBody,
                HitLocation::FullBodyExceptEyes,
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Encumbrance {
    #[default]
    None,
    Light,
    Medium,
    Heavy,
    ExtraHeavy,
}

impl Encumbrance {
    /// Penalty applied to Dodge and to encumbrance-sensitive skills.
    pub fn penalty(&self) -> i32 {
        match self {
            Encumbrance::None => 0,
            Encumbrance::Light => -1,
            Encumbrance::Medium => -2,
            Encumbrance::Heavy => -3,
            Encumbrance::ExtraHeavy => -4,
        }
    }
}

/// Points spent on raising (or refunded for lowering) an attribute by `delta`
/// levels. A cost reduction only discounts increases and never rounds in the
/// buyer's favour.
pub fn points_for_attribute(delta: i32, points_per_level: i32, reduction: i32) -> i32 {
    let amount = delta * points_per_level;
    if reduction > 0 && delta > 0 {
        let reduction = reduction.min(MAX_COST_REDUCTION);
        (99 + amount * (100 - reduction)) / 100
    } else {
        amount
    }
}
