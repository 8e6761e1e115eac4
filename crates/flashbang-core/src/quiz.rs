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

use crate::scheduler::record_answer;
use crate::session::Question;
use crate::types::timestamp::Timestamp;
use crate::types::word::MemoryState;
use crate::types::word::WordId;

/// Progress through a quiz. Owned by the caller and advanced explicitly.
#[derive(Clone, Debug)]
pub struct QuizProgress {
    questions: Vec<Question>,
    index: usize,
    score: usize,
    answered: bool,
}

/// What happened when an answer was submitted.
#[derive(Clone, Debug, PartialEq)]
pub struct AnswerOutcome {
    pub word_id: WordId,
    pub correct: bool,
    pub correct_option: String,
    /// The answered word's new memory state, to be persisted by the caller.
    pub memory: MemoryState,
}

impl QuizProgress {
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            index: 0,
            score: 0,
            answered: false,
        }
    }

    pub fn current(&self) -> Option<&Question> {
        self.questions.get(self.index)
    }

    /// Grade `answer` against the current question. Returns `None` if the
    /// quiz is over or the current question was already answered.
    pub fn submit(&mut self, answer: &str, now: Timestamp) -> Option<AnswerOutcome> {
        if self.answered {
            return None;
        }
        let question = self.questions.get(self.index)?;
        let correct = question.is_correct(answer);
        let outcome = AnswerOutcome {
            word_id: question.word.id,
            correct,
            correct_option: question.correct_option.clone(),
            memory: record_answer(&question.word.memory, correct, now),
        };
        if correct {
            self.score += 1;
        }
        self.answered = true;
        Some(outcome)
    }

    /// Move to the next question. Returns `false` once the quiz is over.
    pub fn advance(&mut self) -> bool {
        if self.index < self.questions.len() {
            self.index += 1;
        }
        self.answered = false;
        self.index < self.questions.len()
    }

    pub fn is_answered(&self) -> bool {
        self.answered
    }

    pub fn is_finished(&self) -> bool {
        self.index >= self.questions.len()
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    /// Zero-based index of the current question.
    pub fn position(&self) -> usize {
        self.index
    }

    /// Fraction of questions already passed, in [0, 1].
    pub fn progress(&self) -> f64 {
        if self.questions.is_empty() {
            return 1.0;
        }
        self.index as f64 / self.questions.len() as f64
    }
}
