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

//! Property tests for the shared value types

use charsheet_common::amount::LeveledAmount;
use charsheet_common::character::{MAX_COST_REDUCTION, PrimaryAttribute, points_for_attribute};
use charsheet_common::criteria::{StringCompare, StringCriteria};
use charsheet_common::feature::{CostReduction, SKILL_NAME, SkillBonus, exact_key, wildcard_key};
use proptest::prelude::*;

fn any_compare() -> impl Strategy<Value = StringCompare> {
    prop_oneof![
        Just(StringCompare::IsAnything),
        Just(StringCompare::Is),
        Just(StringCompare::IsNot),
        Just(StringCompare::Contains),
        Just(StringCompare::DoesNotContain),
        Just(StringCompare::StartsWith),
        Just(StringCompare::DoesNotStartWith),
        Just(StringCompare::EndsWith),
        Just(StringCompare::DoesNotEndWith),
    ]
}

proptest! {
    #[test]
    fn test_integer_only_amounts_stay_integral(raw in -1000.0f64..1000.0, next in -1000.0f64..1000.0) {
        let mut amount = LeveledAmount::new(raw);
        amount.set_integer_only(true);
        prop_assert_eq!(amount.amount().fract(), 0.0);
        amount.set_amount(next);
        prop_assert_eq!(amount.amount().fract(), 0.0);
    }

    #[test]
    fn test_flat_amount_ignores_level(raw in -100.0f64..100.0, level in -20i32..20) {
        let amount = LeveledAmount::new(raw);
        prop_assert_eq!(amount.adjusted_amount_at(level), raw);
        prop_assert_eq!(amount.adjusted_amount_at(0), raw);
    }

    #[test]
    fn test_per_level_amount_at_level_zero(raw in -100i32..100) {
        let amount = LeveledAmount::integer(raw).per_level(true);
        prop_assert_eq!(amount.adjusted_amount_at(0), 0.0);
        prop_assert_eq!(amount.integer_adjusted_amount_at(0), 0);
        prop_assert_eq!(amount.integer_adjusted_amount_at(3), raw * 3);
    }

    #[test]
    fn test_skill_bonus_key_shape(compare in any_compare(), name in "[A-Za-z]{1,12}") {
        let bonus = SkillBonus::new(StringCriteria::new(compare, name.clone()), 1);
        let key = bonus.key();
        if compare == StringCompare::Is {
            prop_assert_eq!(&key, &exact_key(SKILL_NAME, &name));
            prop_assert_eq!(key.clone(), key.to_lowercase());
            prop_assert!(bonus.matches(&name.to_uppercase(), ""));
        } else {
            prop_assert_eq!(key, wildcard_key(SKILL_NAME));
        }
        prop_assert_eq!(bonus.clone().key(), bonus.key());
    }

    #[test]
    fn test_cost_reduction_is_clamped(percentage in -500i32..500) {
        let reduction = CostReduction::new(PrimaryAttribute::Dx, percentage);
        prop_assert!((0..=MAX_COST_REDUCTION).contains(&reduction.percentage()));
    }

    #[test]
    fn test_reduction_never_raises_cost(delta in 1i32..20, reduction in 0i32..200) {
        let full = points_for_attribute(delta, 10, 0);
        let reduced = points_for_attribute(delta, 10, reduction);
        prop_assert!(reduced <= full);
        prop_assert!(reduced * 5 >= full);
    }
}
