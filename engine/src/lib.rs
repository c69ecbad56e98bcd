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

//! Character Sheet Rules Engine
//!
//! Computes the numbers on a character sheet from its trait forests:
//! - Feature aggregation into a keyed bonus map, rebuilt after every change
//! - Skill levels, including defaults resolved across other skills
//! - Advantage costs under self-control rolls and modifiers
//! - Attribute, derived stat and point totals

pub mod advantage;
pub mod attributes;
pub mod character;
pub mod config;
pub mod defaults;
pub mod equipment;
pub mod error;
pub mod features;
pub mod identity;
pub mod report;
pub mod rules;
pub mod skill;
pub mod tree;

pub use character::Character;
pub use error::{SheetError, SheetResult};
