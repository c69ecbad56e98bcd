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

//! Match criteria used by skill, spell and weapon bonuses.

use serde::{Deserialize, Serialize};

/// String comparison applied by a [`StringCriteria`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StringCompare {
    #[default]
    IsAnything,
    Is,
    IsNot,
    Contains,
    DoesNotContain,
    StartsWith,
    DoesNotStartWith,
    EndsWith,
    DoesNotEndWith,
}

impl StringCompare {
    pub fn description(&self) -> &'static str {
        match self {
            StringCompare::IsAnything => "is anything",
            StringCompare::Is => "is",
            StringCompare::IsNot => "is not",
            StringCompare::Contains => "contains",
            StringCompare::DoesNotContain => "does not contain",
            StringCompare::StartsWith => "starts with",
            StringCompare::DoesNotStartWith => "does not start with",
            StringCompare::EndsWith => "ends with",
            StringCompare::DoesNotEndWith => "does not end with",
        }
    }
}

/// Case-insensitive string test.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StringCriteria {
    #[serde(default)]
    pub compare: StringCompare,
    #[serde(default)]
    pub qualifier: String,
}

impl StringCriteria {
    pub fn new(compare: StringCompare, qualifier: impl Into<String>) -> Self {
        Self {
            compare,
            qualifier: qualifier.into(),
        }
    }

    pub fn is(qualifier: impl Into<String>) -> Self {
        Self::new(StringCompare::Is, qualifier)
    }

    pub fn anything() -> Self {
        Self::default()
    }

    pub fn is_exact(&self) -> bool {
        self.compare == StringCompare::Is
    }

    pub fn matches(&self, value: &str) -> bool {
        let value = value.to_lowercase();
        let qualifier = self.qualifier.to_lowercase();
        match self.compare {
            StringCompare::IsAnything => true,
            StringCompare::Is => value == qualifier,
            StringCompare::IsNot => value != qualifier,
            StringCompare::Contains => value.contains(&qualifier),
            StringCompare::DoesNotContain => !value.contains(&qualifier),
            StringCompare::StartsWith => value.starts_with(&qualifier),
            StringCompare::DoesNotStartWith => !value.starts_with(&qualifier),
            StringCompare::EndsWith => value.ends_with(&qualifier),
            StringCompare::DoesNotEndWith => !value.ends_with(&qualifier),
        }
    }
}

impl std::fmt::Display for StringCriteria {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.compare {
            StringCompare::IsAnything => write!(f, "{}", self.compare.description()),
            _ => write!(f, "{} \"{}\"", self.compare.description(), self.qualifier),
        }
    }
}

/// Integer comparison applied by an [`IntegerCriteria`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericCompare {
    Is,
    #[default]
    AtLeast,
    AtMost,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IntegerCriteria {
    #[serde(default)]
    pub compare: NumericCompare,
    #[serde(default)]
    pub qualifier: i32,
}

impl IntegerCriteria {
    pub fn new(compare: NumericCompare, qualifier: i32) -> Self {
        Self { compare, qualifier }
    }

    pub fn matches(&self, value: i32) -> bool {
        match self.compare {
            NumericCompare::Is => value == self.qualifier,
            NumericCompare::AtLeast => value >= self.qualifier,
            NumericCompare::AtMost => value <= self.qualifier,
        }
    }
}
