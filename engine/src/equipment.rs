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

//! Carried equipment.

use crate::features::FeatureSource;
use crate::identity::TraitId;
use charsheet_common::feature::Feature;
use serde::{Deserialize, Serialize};

fn equipped() -> bool {
    true
}

/// A piece of gear. Its features only count while it is equipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    #[serde(default)]
    pub id: TraitId,
    pub name: String,
    #[serde(default = "equipped")]
    pub equipped: bool,
    #[serde(default)]
    pub features: Vec<Feature>,
    #[serde(default)]
    pub children: Vec<Equipment>,
}

impl Equipment {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: TraitId::new(),
            name: name.into(),
            equipped: true,
            features: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_feature(mut self, feature: Feature) -> Self {
        self.features.push(feature);
        self
    }

    pub fn with_children(mut self, children: Vec<Equipment>) -> Self {
        self.children = children;
        self
    }
}

impl FeatureSource for Equipment {
    fn is_self_enabled(&self) -> bool {
        self.equipped
    }

    fn children(&self) -> &[Self] {
        &self.children
    }

    fn granted_features(&self) -> Vec<(Feature, i32)> {
        self.features.iter().cloned().map(|feature| (feature, 0)).collect()
    }
}
