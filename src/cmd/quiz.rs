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

use std::io::BufRead;
use std::io::Lines;
use std::io::Write;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use flashbang_core::Count;
use flashbang_core::Direction;
use flashbang_core::QuestionType;
use flashbang_core::QuizProgress;
use flashbang_core::SelectionMode;
use flashbang_core::SessionConfig;
use flashbang_core::Timestamp;
use flashbang_core::TinyRng;
use flashbang_core::build_session;
use flashbang_core::prompt_locale;

use crate::collection::Collection;
use crate::error::Fallible;

/// Command-line overrides. Anything left `None` comes from the collection's
/// config file.
#[derive(Default)]
pub struct QuizOptions {
    pub mode: Option<SelectionMode>,
    pub count: Option<usize>,
    pub direction: Option<Direction>,
    pub category: Option<String>,
    pub seed: Option<u64>,
}

impl QuizOptions {
    fn session_config(&self, defaults: &SessionConfig) -> SessionConfig {
        SessionConfig {
            mode: self.mode.unwrap_or(defaults.mode),
            count: self.count.map(Count::from).unwrap_or(defaults.count),
            direction: self.direction.unwrap_or(defaults.direction),
        }
    }
}

/// Run a multiple-choice quiz, reading answers from `input` and persisting
/// each word's new memory state as soon as it is answered.
pub fn run_quiz(
    collection: &Collection,
    options: QuizOptions,
    input: impl BufRead,
    out: &mut impl Write,
) -> Fallible<()> {
    let config = options.session_config(&collection.config.quiz);
    let filter = collection.category_filter(options.category.as_deref())?;
    let words = collection.db.words()?;
    let categories = collection.db.categories()?;
    let seed = options.seed.unwrap_or_else(time_seed);
    let mut rng = TinyRng::from_seed(seed);

    let questions = build_session(&words, filter, &config, Timestamp::now(), &mut rng)?;
    log::debug!(
        "Built {} questions from {} (mode={}, direction={}, seed={seed})",
        questions.len(),
        collection.directory.display(),
        config.mode.as_str(),
        config.direction.as_str()
    );

    if questions.is_empty() {
        writeln!(
            out,
            "No questions to ask: the selected words have no distinct wrong answers to offer."
        )?;
        writeln!(out, "Add words with different translations and try again.")?;
        return Ok(());
    }

    let mut quiz = QuizProgress::new(questions);
    let mut lines = input.lines();
    while let Some(question) = quiz.current() {
        writeln!(
            out,
            "\nQuestion {} / {} [{}]",
            quiz.position() + 1,
            quiz.total(),
            prompt_locale(&question.word, &categories, question.kind)
        )?;
        writeln!(out, "{}", question.prompt())?;
        let wanted = match question.kind {
            QuestionType::SourceToTarget => "translation",
            QuestionType::TargetToSource => "source word",
        };
        writeln!(out, "Select the correct {wanted}:")?;
        for (i, option) in question.options.iter().enumerate() {
            writeln!(out, "  {}. {option}", i + 1)?;
        }
        let options = question.options.clone();

        let Some(answer) = read_answer(&mut lines, &options, out)? else {
            writeln!(out, "\nQuiz ended early.")?;
            break;
        };

        if let Some(outcome) = quiz.submit(&answer, Timestamp::now()) {
            collection.db.update_memory(outcome.word_id, &outcome.memory)?;
            log::debug!(
                "Word {} scheduled in {} days (ease {:.2})",
                outcome.word_id,
                outcome.memory.interval,
                outcome.memory.ease_factor
            );
            if outcome.correct {
                writeln!(out, "Correct!")?;
            } else {
                writeln!(out, "Incorrect! The answer was: {}", outcome.correct_option)?;
            }
        }
        quiz.advance();
    }

    writeln!(out, "Score: {} / {}", quiz.score(), quiz.total())?;
    Ok(())
}

/// Prompt until the learner picks an option, by number or by text. Returns
/// `None` on `q` or end of input.
fn read_answer<B: BufRead>(
    lines: &mut Lines<B>,
    options: &[String],
    out: &mut impl Write,
) -> Fallible<Option<String>> {
    loop {
        write!(out, "> ")?;
        out.flush()?;
        let Some(line) = lines.next() else {
            return Ok(None);
        };
        let line = line?;
        let line = line.trim();
        if line == "q" {
            return Ok(None);
        }
        if let Ok(n) = line.parse::<usize>() {
            if (1..=options.len()).contains(&n) {
                return Ok(Some(options[n - 1].clone()));
            }
        }
        if let Some(option) = options.iter().find(|o| o.as_str() == line) {
            return Ok(Some(option.clone()));
        }
        writeln!(out, "Please enter a number between 1 and {}.", options.len())?;
    }
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}
