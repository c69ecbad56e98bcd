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

//! Trait identity.

use serde::{Deserialize, Serialize};

/// Unique identifier for a trait row (advantage, modifier, skill or equipment).
///
/// Wraps a UUID so trait ids cannot be mixed up with other UUIDs.
#[derive(Clone, Copy, Debug, Ord, PartialOrd, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TraitId(uuid::Uuid);

impl TraitId {
    /// Creates a new random trait ID.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Creates a trait ID from an existing UUID.
    pub fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID by value.
    pub fn uuid(&self) -> uuid::Uuid {
        self.0
    }
}

impl Default for TraitId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TraitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trait_ids_are_unique() {
        assert_ne!(TraitId::new(), TraitId::new());
    }

    #[test]
    fn test_trait_id_serializes_as_uuid() {
        let uuid = uuid::Uuid::new_v4();
        let id = TraitId::from_uuid(uuid);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", uuid));
        assert_eq!(id.uuid(), uuid);
    }
}
