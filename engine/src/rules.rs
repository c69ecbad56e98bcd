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

//! Optional rule switches that change how the sheet is computed.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    /// Drop fractional points from adjusted costs instead of rounding them up.
    pub round_cost_down: bool,
    /// Only skills with points invested can serve as the target of a default.
    pub defaults_require_points: bool,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            round_cost_down: false,
            defaults_require_points: true,
        }
    }
}

impl Rules {
    pub fn round_cost(&self, value: f64) -> i32 {
        if self.round_cost_down {
            value.floor() as i32
        } else {
            value.ceil() as i32
        }
    }
}
