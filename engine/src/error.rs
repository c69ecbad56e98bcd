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

//! Error types for sheet operations.

use crate::identity::TraitId;
use thiserror::Error;

/// Errors raised at the edges of the engine. The calculations themselves
/// never fail; an unresolvable level is reported as `None`.
#[derive(Debug, Error)]
pub enum SheetError {
    /// No trait with the given id exists on the character.
    #[error("Trait not found: {0}")]
    TraitNotFound(TraitId),

    /// The configuration could not be used.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Reading a file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization/deserialization error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for sheet operations.
pub type SheetResult<T> = Result<T, SheetError>;
