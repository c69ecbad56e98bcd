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

//! Helpers for addressing rows inside trait forests.

use crate::identity::TraitId;

/// A row that can be located by id.
pub trait TraitNode: Sized {
    fn id(&self) -> TraitId;
    fn nodes_mut(&mut self) -> &mut [Self];
}

/// Depth-first search for the row with `id`.
pub fn find_mut<T: TraitNode>(rows: &mut [T], id: TraitId) -> Option<&mut T> {
    for row in rows.iter_mut() {
        if row.id() == id {
            return Some(row);
        }
        if let Some(found) = find_mut(row.nodes_mut(), id) {
            return Some(found);
        }
    }
    None
}

macro_rules! impl_trait_node {
    ($($row:ty),+) => {
        $(
            impl TraitNode for $row {
                fn id(&self) -> TraitId {
                    self.id
                }

                fn nodes_mut(&mut self) -> &mut [Self] {
                    &mut self.children
                }
            }
        )+
    };
}

impl_trait_node!(
    crate::advantage::Advantage,
    crate::equipment::Equipment,
    crate::skill::Skill
);
