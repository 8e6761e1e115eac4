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

use std::fmt::Display;
use std::fmt::Formatter;

use serde::Deserialize;
use serde::Serialize;

use crate::types::direction::QuestionType;
use crate::types::word::Word;

/// Name of the system category that unassigned words belong to.
pub const UNCATEGORIZED: &str = "Uncategorized";

pub const DEFAULT_SOURCE_LANGUAGE: &str = "de";
pub const DEFAULT_TARGET_LANGUAGE: &str = "en";

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub i64);

impl Display for CategoryId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A group of words sharing a language pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    /// Language tag of the words' source terms, e.g. `de`.
    pub source_language: String,
    /// Language tag of the words' translations, e.g. `en`.
    pub target_language: String,
    /// System categories cannot be deleted.
    #[serde(default)]
    pub is_system: bool,
}

impl Category {
    pub fn new(id: CategoryId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            source_language: DEFAULT_SOURCE_LANGUAGE.to_string(),
            target_language: DEFAULT_TARGET_LANGUAGE.to_string(),
            is_system: false,
        }
    }

    /// The language tag of the text shown for a question of this type.
    pub fn prompt_language(&self, kind: QuestionType) -> &str {
        match kind {
            QuestionType::SourceToTarget => &self.source_language,
            QuestionType::TargetToSource => &self.target_language,
        }
    }
}

/// Picks the speech locale for a question's prompt from the word's category.
pub fn prompt_locale<'a>(word: &Word, categories: &'a [Category], kind: QuestionType) -> &'a str {
    let category = word
        .category_id
        .and_then(|id| categories.iter().find(|c| c.id == id));
    match (category, kind) {
        (Some(category), kind) => category.prompt_language(kind),
        (None, QuestionType::SourceToTarget) => DEFAULT_SOURCE_LANGUAGE,
        (None, QuestionType::TargetToSource) => DEFAULT_TARGET_LANGUAGE,
    }
}
