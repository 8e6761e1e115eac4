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

use crate::scheduler::DEFAULT_EASE_FACTOR;
use crate::types::category::CategoryId;
use crate::types::direction::QuestionType;
use crate::types::timestamp::Timestamp;

/// Identifies a word in the caller's store.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WordId(pub i64);

impl Display for WordId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A vocabulary entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Word {
    pub id: WordId,
    /// The term in the source language.
    pub term: String,
    /// Optional pronunciation or spelling hint for `term`.
    #[serde(default)]
    pub spelling: Option<String>,
    /// The term in the target language.
    pub translation: String,
    /// `None` means the word is uncategorized.
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(flatten)]
    pub memory: MemoryState,
}

impl Word {
    /// A fresh, never-studied, uncategorized word.
    pub fn new(id: WordId, term: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            id,
            term: term.into(),
            spelling: None,
            translation: translation.into(),
            category_id: None,
            image_url: None,
            created_at: None,
            memory: MemoryState::default(),
        }
    }

    pub fn with_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_memory(mut self, memory: MemoryState) -> Self {
        self.memory = memory;
        self
    }

    /// The text shown to the learner for a question of the given type.
    pub fn prompt(&self, kind: QuestionType) -> &str {
        match kind {
            QuestionType::SourceToTarget => &self.term,
            QuestionType::TargetToSource => &self.translation,
        }
    }

    /// The text expected back for a question of the given type.
    pub fn answer(&self, kind: QuestionType) -> &str {
        match kind {
            QuestionType::SourceToTarget => &self.translation,
            QuestionType::TargetToSource => &self.term,
        }
    }
}

/// A word's spaced-repetition state. Missing fields deserialize to the
/// never-studied defaults.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryState {
    /// Days until the next review.
    pub interval: u32,
    pub ease_factor: f64,
    pub consecutive_correct: u32,
    /// `None` means the word was never scheduled, and is due now.
    pub next_review: Option<Timestamp>,
}

impl Default for MemoryState {
    fn default() -> Self {
        Self {
            interval: 0,
            ease_factor: DEFAULT_EASE_FACTOR,
            consecutive_correct: 0,
            next_review: None,
        }
    }
}

impl MemoryState {
    /// A zero, negative, or non-finite ease factor is treated as missing.
    pub fn normalized(self) -> Self {
        if self.ease_factor.is_finite() && self.ease_factor > 0.0 {
            self
        } else {
            Self {
                ease_factor: DEFAULT_EASE_FACTOR,
                ..self
            }
        }
    }

    pub fn is_new(&self) -> bool {
        self.next_review.is_none()
    }
}
