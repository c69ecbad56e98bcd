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

//! Printable sheet summary.

use crate::advantage::Advantage;
use crate::character::{Character, PointSummary};
use crate::skill::{Skill, SkillKind};
use charsheet_common::character::{Attribute, HitLocation, PrimaryAttribute};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeLine {
    pub name: String,
    pub value: i32,
    pub points: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedStats {
    pub hit_points: i32,
    pub fatigue_points: i32,
    pub basic_speed: f64,
    pub basic_move: i32,
    pub dodge: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitLine {
    pub name: String,
    pub points: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub depth: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillLine {
    pub name: String,
    /// Level, or `-` when the skill cannot be used.
    pub level: String,
    pub relative_level: i32,
    pub points: i32,
    pub depth: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrLine {
    pub location: HitLocation,
    pub dr: i32,
}

/// Everything the sheet shows, computed once from a character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetReport {
    pub name: String,
    pub attributes: Vec<AttributeLine>,
    pub derived: DerivedStats,
    pub advantages: Vec<TraitLine>,
    pub skills: Vec<SkillLine>,
    pub dr: Vec<DrLine>,
    pub points: PointSummary,
}

impl SheetReport {
    pub fn from_character(character: &Character) -> Self {
        let attributes = Attribute::all()
            .into_iter()
            .map(|attribute| {
                let reduction = PrimaryAttribute::try_from(attribute)
                    .map(|primary| character.cost_reduction_for(primary))
                    .unwrap_or(0);
                AttributeLine {
                    name: attribute.name().to_string(),
                    value: character.attribute_value(attribute),
                    points: character.attributes().points_for(attribute, reduction),
                }
            })
            .collect();

        let derived = DerivedStats {
            hit_points: character.hit_points(),
            fatigue_points: character.fatigue_points(),
            basic_speed: character.basic_speed(),
            basic_move: character.basic_move(),
            dodge: character.dodge(),
        };

        let mut advantages = Vec::new();
        advantage_lines(character, character.advantages(), 0, &mut advantages);
        let mut skills = Vec::new();
        skill_lines(character, character.skills(), 0, &mut skills);

        let dr = [
            HitLocation::Skull,
            HitLocation::Eyes,
            HitLocation::Face,
            HitLocation::Neck,
            HitLocation::Torso,
            HitLocation::Vitals,
            HitLocation::Groin,
            HitLocation::Arms,
            HitLocation::Hands,
            HitLocation::Legs,
            HitLocation::Feet,
        ]
        .into_iter()
        .map(|location| DrLine {
            location,
            dr: character.dr_for(location),
        })
        .filter(|line| line.dr != 0)
        .collect();

        SheetReport {
            name: character.name.clone(),
            attributes,
            derived,
            advantages,
            skills,
            dr,
            points: character.point_summary(),
        }
    }
}

fn advantage_lines(
    character: &Character,
    rows: &[Advantage],
    depth: usize,
    out: &mut Vec<TraitLine>,
) {
    for advantage in rows {
        out.push(TraitLine {
            name: advantage.name.clone(),
            points: advantage.adjusted_points(character.rules()),
            note: advantage.cr_description(),
            depth,
        });
        advantage_lines(character, &advantage.children, depth + 1, out);
    }
}

fn skill_lines(character: &Character, rows: &[Skill], depth: usize, out: &mut Vec<SkillLine>) {
    for skill in rows {
        let level = character.skill_level(skill.id);
        let name = match &skill.kind {
            SkillKind::Technique { default, .. } => format!("{} ({})", skill.identifier(), default),
            _ => skill.identifier(),
        };
        out.push(SkillLine {
            name,
            level: if skill.is_container() {
                String::new()
            } else {
                level.display()
            },
            relative_level: level.relative_level,
            points: skill.points,
            depth,
        });
        skill_lines(character, &skill.children, depth + 1, out);
    }
}

impl Display for SheetReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "{}", "=".repeat(self.name.len().max(1)))?;
        for line in &self.attributes {
            writeln!(f, "{:<6}{:>4}  [{}]", line.name, line.value, line.points)?;
        }
        writeln!(
            f,
            "HP {}  FP {}  Speed {:.2}  Move {}  Dodge {}",
            self.derived.hit_points,
            self.derived.fatigue_points,
            self.derived.basic_speed,
            self.derived.basic_move,
            self.derived.dodge
        )?;
        if !self.dr.is_empty() {
            let dr: Vec<String> = self
                .dr
                .iter()
                .map(|line| format!("{:?} {}", line.location, line.dr))
                .collect();
            writeln!(f, "DR: {}", dr.join(", "))?;
        }

        writeln!(f)?;
        writeln!(f, "Advantages & Disadvantages")?;
        for line in &self.advantages {
            write!(f, "{}{} [{}]", "  ".repeat(line.depth), line.name, line.points)?;
            match &line.note {
                Some(note) => writeln!(f, " {}", note)?,
                None => writeln!(f)?,
            }
        }

        writeln!(f)?;
        writeln!(f, "Skills")?;
        for line in &self.skills {
            writeln!(
                f,
                "{}{:<32} {:>3}  [{}]",
                "  ".repeat(line.depth),
                line.name,
                line.level,
                line.points
            )?;
        }

        writeln!(f)?;
        let points = &self.points;
        writeln!(
            f,
            "Points: attributes {}, advantages {}, disadvantages {}, quirks {}, race {}, skills {}",
            points.attributes,
            points.advantages,
            points.disadvantages,
            points.quirks,
            points.race,
            points.skills
        )?;
        write!(f, "Total: {}", points.total)
    }
}
