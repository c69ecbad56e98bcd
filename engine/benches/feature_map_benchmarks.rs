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

//! Performance benchmarks for feature aggregation and skill levels
//!
//! Run with: cargo bench --bench feature_map_benchmarks

use charsheet_common::character::{Attribute, BonusAttribute, HitLocation};
use charsheet_common::criteria::{StringCompare, StringCriteria};
use charsheet_common::feature::{AttributeBonus, DrBonus, Feature, SkillBonus};
use charsheet_common::skill::{Difficulty, SkillDefault, SkillDifficulty};
use charsheet_engine::Character;
use charsheet_engine::advantage::{Advantage, AdvantageKind};
use charsheet_engine::skill::Skill;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::time::Duration;

/// Character with `rows` advantages, each granting a few bonuses, and a chain
/// of skills that default from each other.
fn build_character(rows: usize) -> Character {
    let mut character = Character::new("Benchmark");
    let children = (0..rows)
        .map(|i| {
            Advantage::new(format!("Advantage {}", i), 5)
                .with_feature(Feature::AttributeBonus(AttributeBonus::new(
                    BonusAttribute::Dx,
                    1.0,
                )))
                .with_feature(Feature::DrBonus(DrBonus::new(HitLocation::Torso, 1)))
                .with_feature(Feature::SkillBonus(SkillBonus::new(
                    StringCriteria::new(StringCompare::StartsWith, "Skill"),
                    1,
                )))
        })
        .collect();
    character.add_advantage(Advantage::container("Everything", AdvantageKind::Group, children));

    let difficulty = SkillDifficulty::new(Attribute::Dx, Difficulty::Average);
    for i in 0..rows.min(32) {
        let mut skill = Skill::new(format!("Skill {}", i), difficulty).with_points(i as i32 % 4);
        if i > 0 {
            skill = skill.with_default(SkillDefault::skill(format!("Skill {}", i - 1), -2));
        }
        skill = skill.with_default(SkillDefault::skill(format!("Skill {}", i + 1), -4));
        character.add_skill(skill);
    }
    character
}

/// Benchmark a full feature map rebuild
fn bench_feature_map_rebuild(c: &mut Criterion) {
    let mut group = c.benchmark_group("feature_map_rebuild");
    for rows in [10usize, 100, 1000] {
        let mut character = build_character(rows);
        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &rows, |b, _| {
            b.iter(|| {
                character.invalidate();
                std::hint::black_box(character.sum_bonuses_for("attr.dx"))
            });
        });
    }
    group.finish();
}

/// Benchmark recomputing every skill level along a default chain
fn bench_skill_levels(c: &mut Criterion) {
    let mut character = build_character(16);
    let ids: Vec<_> = character.skills().iter().map(|skill| skill.id).collect();
    c.bench_function("skill_levels", |b| {
        b.iter(|| {
            character.invalidate();
            ids.iter()
                .map(|id| character.skill_level(*id).level.unwrap_or(0))
                .sum::<i32>()
        });
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .measurement_time(Duration::from_secs(5))
        .sample_size(50);
    targets =
        bench_feature_map_rebuild,
        bench_skill_levels
}

criterion_main!(benches);
