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

//! SuperMemo-2 style scheduling over a word's [`MemoryState`].

use serde::Deserialize;
use serde::Serialize;

use crate::types::timestamp::Timestamp;
use crate::types::word::MemoryState;
use crate::types::word::Word;

pub const DEFAULT_EASE_FACTOR: f64 = 2.5;

/// The ease factor never falls below this.
pub const MIN_EASE_FACTOR: f64 = 1.3;

/// Intervals stop growing at a hundred years.
pub const MAX_INTERVAL_DAYS: u32 = 36_500;

/// Recall quality on the SM-2 scale, 0 (blackout) to 5 (perfect).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub struct Quality(u8);

impl Quality {
    pub const PERFECT: Quality = Quality(5);
    pub const WRONG: Quality = Quality(1);

    /// Values above 5 are clamped to 5.
    pub fn new(q: u8) -> Self {
        Self(q.min(5))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn is_pass(self) -> bool {
        self.0 >= 3
    }
}

impl From<bool> for Quality {
    fn from(was_correct: bool) -> Quality {
        if was_correct {
            Quality::PERFECT
        } else {
            Quality::WRONG
        }
    }
}

pub fn is_due(word: &Word, as_of: Timestamp) -> bool {
    match word.memory.next_review {
        None => true,
        Some(next_review) => next_review <= as_of,
    }
}

/// The words needing attention, in input order.
pub fn due_words(words: &[Word], as_of: Timestamp) -> Vec<&Word> {
    words.iter().filter(|w| is_due(w, as_of)).collect()
}

/// Update a word's memory state after a binary-graded answer.
pub fn record_answer(memory: &MemoryState, was_correct: bool, now: Timestamp) -> MemoryState {
    review(memory, Quality::from(was_correct), now)
}

/// The SM-2 transition. Pure: the caller persists the result.
pub fn review(memory: &MemoryState, quality: Quality, now: Timestamp) -> MemoryState {
    let MemoryState {
        interval,
        ease_factor,
        consecutive_correct,
        next_review: _,
    } = memory.normalized();

    let (interval, consecutive_correct) = if quality.is_pass() {
        let interval = match consecutive_correct {
            0 => 1,
            1 => 6,
            _ => grow_interval(interval, ease_factor),
        };
        (interval, consecutive_correct + 1)
    } else {
        (1, 0)
    };

    let ease_factor = (ease_factor + ease_delta(quality)).max(MIN_EASE_FACTOR);

    MemoryState {
        interval,
        ease_factor,
        consecutive_correct,
        next_review: Some(now.plus_days(interval)),
    }
}

/// `round(interval * ease)`, clamped to [`MAX_INTERVAL_DAYS`].
fn grow_interval(interval: u32, ease_factor: f64) -> u32 {
    let days = (f64::from(interval) * ease_factor).round();
    if days >= f64::from(MAX_INTERVAL_DAYS) {
        MAX_INTERVAL_DAYS
    } else {
        days as u32
    }
}

/// EF' = EF + (0.1 - (5 - q) * (0.08 + (5 - q) * 0.02))
fn ease_delta(quality: Quality) -> f64 {
    let miss = 5.0 - f64::from(quality.value());
    0.1 - miss * (0.08 + miss * 0.02)
}
