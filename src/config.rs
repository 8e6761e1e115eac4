// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fs::read_to_string;
use std::path::Path;

use flashbang_core::SessionConfig;
use serde::Deserialize;

use crate::error::Fallible;

pub const CONFIG_FILE: &str = "flashbang.toml";

/// Per-collection settings, read from `flashbang.toml`. Every key is
/// optional.
///
/// ```toml
/// [quiz]
/// mode = "review"
/// count = 20
/// direction = "mixed"
/// ```
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Defaults for `flashbang quiz` flags that are not given.
    pub quiz: SessionConfig,
}

impl Config {
    pub fn load(directory: &Path) -> Fallible<Self> {
        let path = directory.join(CONFIG_FILE);
        if !path.exists() {
            log::debug!("No {CONFIG_FILE} found, using defaults");
            return Ok(Self::default());
        }
        let text = read_to_string(&path)?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Fallible<Self> {
        Ok(toml::from_str(text)?)
    }
}
