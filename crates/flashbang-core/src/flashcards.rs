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

use crate::types::category::CategoryId;
use crate::types::word::Word;

/// A flip-card review over a category's words, in the order given.
#[derive(Clone, Debug)]
pub struct FlashcardDeck {
    words: Vec<Word>,
    index: usize,
    flipped: bool,
}

impl FlashcardDeck {
    pub fn new(words: &[Word], category_filter: Option<CategoryId>) -> Self {
        let words = words
            .iter()
            .filter(|w| category_filter.is_none_or(|id| w.category_id == Some(id)))
            .cloned()
            .collect();
        Self {
            words,
            index: 0,
            flipped: false,
        }
    }

    pub fn current(&self) -> Option<&Word> {
        self.words.get(self.index)
    }

    pub fn flip(&mut self) {
        self.flipped = !self.flipped;
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    /// Returns whether the deck moved.
    pub fn next_card(&mut self) -> bool {
        if self.index + 1 < self.words.len() {
            self.index += 1;
            self.flipped = false;
            true
        } else {
            false
        }
    }

    /// Returns whether the deck moved.
    pub fn prev_card(&mut self) -> bool {
        if self.index > 0 {
            self.index -= 1;
            self.flipped = false;
            true
        } else {
            false
        }
    }

    /// The source term, with its spelling hint if it has one.
    pub fn front(&self) -> Option<String> {
        let word = self.current()?;
        Some(match &word.spelling {
            Some(spelling) => format!("{} ({spelling})", word.term),
            None => word.term.clone(),
        })
    }

    pub fn back(&self) -> Option<&str> {
        self.current().map(|w| w.translation.as_str())
    }

    pub fn position(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// (position + 1) / len.
    pub fn progress(&self) -> f64 {
        if self.words.is_empty() {
            return 0.0;
        }
        (self.index + 1) as f64 / self.words.len() as f64
    }
}
