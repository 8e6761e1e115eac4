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

//! flashbang-core: scheduling and quiz-building core for flashbang.
//!
//! Everything here is a pure function over caller-supplied collections:
//! - SuperMemo-2 scheduling of each word's memory state
//! - Selecting, ordering, and building multiple-choice quiz sessions
//! - Caller-owned quiz progress and flip-card review state
//!
//! Randomness comes from an injected, seedable [`TinyRng`].

pub mod error;
pub mod flashcards;
pub mod quiz;
pub mod rng;
pub mod scheduler;
pub mod session;
pub mod types;

// Re-exports for convenience
pub use error::{ErrorReport, Fallible, InsufficientWordsError, fail};
pub use flashcards::FlashcardDeck;
pub use quiz::{AnswerOutcome, QuizProgress};
pub use rng::TinyRng;
pub use scheduler::{Quality, due_words, is_due, record_answer, review};
pub use session::{Count, Question, SelectionMode, SessionConfig, build_session};
pub use types::category::{
    Category, CategoryId, DEFAULT_SOURCE_LANGUAGE, DEFAULT_TARGET_LANGUAGE, UNCATEGORIZED,
    prompt_locale,
};
pub use types::direction::{Direction, QuestionType};
pub use types::timestamp::Timestamp;
pub use types::word::{MemoryState, Word, WordId};
