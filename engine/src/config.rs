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

//! Command line arguments and configuration file.

use crate::error::{SheetError, SheetResult};
use crate::rules::Rules;
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use serde_env_field::EnvField;
use std::str::{FromStr, ParseBoolError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Yaml,
    Json,
}

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Arguments {
    #[arg(
        short = 'c',
        long = "config",
        help = "Path to configuration file",
        default_value = "engine/config.yaml"
    )]
    pub config_file: String,

    #[arg(
        short = 'e',
        long = "env",
        help = "Path to environment file",
        default_value = "engine/.env"
    )]
    pub env_file: Option<String>,

    #[arg(
        short = 'f',
        long = "format",
        help = "Report output format",
        value_enum,
        default_value_t = OutputFormat::Text
    )]
    pub format: OutputFormat,

    #[arg(help = "Path to the character file")]
    pub character_file: String,
}

impl Default for Arguments {
    fn default() -> Self {
        Self {
            config_file: "config.yaml".to_string(),
            env_file: Some(".env".to_string()),
            format: OutputFormat::Text,
            character_file: "character.yaml".to_string(),
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(default)]
    pub rules: RulesConfig,
}

impl Configuration {
    pub fn load(path: &str) -> SheetResult<Configuration> {
        let file = std::fs::File::open(path)?;
        let conf = serde_yaml::from_reader(file)
            .map_err(|e| SheetError::InvalidConfiguration(format!("{}: {}", path, e)))?;
        Ok(conf)
    }

    /// Loads `path`, or falls back to the default rules when it does not exist.
    pub fn load_or_default(path: &str) -> SheetResult<Configuration> {
        if std::path::Path::new(path).exists() {
            Self::load(path)
        } else {
            tracing::debug!("No configuration at {}, using defaults", path);
            Ok(Configuration::default())
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct RulesConfig {
    #[serde(default)]
    pub round_cost_down: EnvField<bool>,
    #[serde(default)]
    pub defaults_require_points: EnvField<RequirePoints>,
}

impl From<&RulesConfig> for Rules {
    fn from(config: &RulesConfig) -> Self {
        Rules {
            round_cost_down: *config.round_cost_down,
            defaults_require_points: config.defaults_require_points.enabled(),
        }
    }
}

/// Switch that is on unless configured otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirePoints(bool);

impl RequirePoints {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

impl Default for RequirePoints {
    fn default() -> Self {
        Self(true)
    }
}

impl FromStr for RequirePoints {
    type Err = ParseBoolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(bool::from_str(s.trim())?))
    }
}

impl std::fmt::Display for RequirePoints {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
