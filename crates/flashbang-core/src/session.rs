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

//! Builds quiz sessions: which words, in what order, asked in which
//! direction, with which wrong answers.

use std::collections::HashMap;
use std::collections::HashSet;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;
use crate::error::InsufficientWordsError;
use crate::error::MIN_SESSION_WORDS;
use crate::error::fail;
use crate::rng::TinyRng;
use crate::rng::shuffle_in_place;
use crate::scheduler::is_due;
use crate::types::category::CategoryId;
use crate::types::direction::Direction;
use crate::types::direction::QuestionType;
use crate::types::timestamp::Timestamp;
use crate::types::word::Word;

/// Counts at or above this mean "take every matching word".
pub const NO_LIMIT: usize = 9999;

/// How many wrong answers a question offers at most.
const DISTRACTORS: usize = 3;

/// How the words of a session are chosen and ordered.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SelectionMode {
    /// Input order, typically newest first.
    New,
    /// Due words only, most overdue first.
    Review,
    /// Uniformly random order.
    Random,
}

impl SelectionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionMode::New => "new",
            SelectionMode::Review => "review",
            SelectionMode::Random => "random",
        }
    }
}

impl TryFrom<String> for SelectionMode {
    type Error = ErrorReport;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "new" => Ok(SelectionMode::New),
            "review" => Ok(SelectionMode::Review),
            "random" => Ok(SelectionMode::Random),
            _ => fail(format!("invalid selection mode: {value}")),
        }
    }
}

impl From<SelectionMode> for String {
    fn from(mode: SelectionMode) -> String {
        mode.as_str().to_string()
    }
}

/// The maximum number of words in a session.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(from = "usize", into = "usize")]
pub enum Count {
    Limit(usize),
    All,
}

impl From<usize> for Count {
    fn from(n: usize) -> Count {
        if n >= NO_LIMIT {
            Count::All
        } else {
            Count::Limit(n)
        }
    }
}

impl From<Count> for usize {
    fn from(count: Count) -> usize {
        match count {
            Count::Limit(n) => n,
            Count::All => NO_LIMIT,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub mode: SelectionMode,
    pub count: Count,
    pub direction: Direction,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            mode: SelectionMode::New,
            count: Count::Limit(10),
            direction: Direction::Mixed,
        }
    }
}

/// A single-choice question about one word.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub word: Word,
    /// Candidate answers in display order. Contains `correct_option` once.
    pub options: Vec<String>,
    pub correct_option: String,
    pub kind: QuestionType,
}

impl Question {
    /// The text shown to the learner.
    pub fn prompt(&self) -> &str {
        self.word.prompt(self.kind)
    }

    pub fn is_correct(&self, answer: &str) -> bool {
        answer == self.correct_option
    }
}

/// Build a session from the full word pool.
///
/// Distractors are drawn from all of `words`, not just the selected pool, so a
/// narrow category filter still gets plausible wrong answers.
pub fn build_session(
    words: &[Word],
    category_filter: Option<CategoryId>,
    config: &SessionConfig,
    as_of: Timestamp,
    rng: &mut TinyRng,
) -> Result<Vec<Question>, InsufficientWordsError> {
    let pool = select_pool(words, category_filter, config, as_of, rng)?;
    Ok(build_questions(&pool, words, config.direction, rng))
}

/// Choose and order the words a session asks about.
pub fn select_pool<'a>(
    words: &'a [Word],
    category_filter: Option<CategoryId>,
    config: &SessionConfig,
    as_of: Timestamp,
    rng: &mut TinyRng,
) -> Result<Vec<&'a Word>, InsufficientWordsError> {
    let mut seen = HashSet::new();
    let mut pool: Vec<&Word> = words
        .iter()
        .filter(|w| category_filter.is_none_or(|id| w.category_id == Some(id)))
        .filter(|w| seen.insert(w.id))
        .collect();

    match config.mode {
        SelectionMode::New => {}
        SelectionMode::Review => {
            pool.retain(|w| is_due(w, as_of));
            // `None` orders before any timestamp, so unscheduled words lead.
            pool.sort_by_key(|w| w.memory.next_review);
        }
        SelectionMode::Random => shuffle_in_place(&mut pool, rng),
    }

    if let Count::Limit(n) = config.count {
        pool.truncate(n);
    }

    if pool.len() < MIN_SESSION_WORDS {
        return Err(InsufficientWordsError { found: pool.len() });
    }
    Ok(pool)
}

/// Turn an ordered pool into questions. Never fails: a word with no usable
/// distractor in `full_pool` is left out.
pub fn build_questions(
    pool: &[&Word],
    full_pool: &[Word],
    direction: Direction,
    rng: &mut TinyRng,
) -> Vec<Question> {
    let mut forward: Option<AnswerGroups> = None;
    let mut backward: Option<AnswerGroups> = None;
    let mut questions = Vec::with_capacity(pool.len());

    for word in pool {
        let kind = resolve_direction(direction, rng);
        let correct = word.answer(kind);
        let slot = match kind {
            QuestionType::SourceToTarget => &mut forward,
            QuestionType::TargetToSource => &mut backward,
        };
        let groups = slot.get_or_insert_with(|| AnswerGroups::new(full_pool, kind));

        // The word itself answers with `correct`, so hiding that group
        // excludes it along with every duplicate value.
        let mut hidden: Vec<usize> = groups.index.get(correct).copied().into_iter().collect();
        let mut options: Vec<String> = Vec::with_capacity(DISTRACTORS + 1);
        while options.len() < DISTRACTORS {
            let Some(group) = groups.draw(&hidden, rng) else {
                break;
            };
            hidden.push(group);
            options.push(groups.values[group].to_string());
        }

        if options.is_empty() {
            continue;
        }

        options.push(correct.to_string());
        shuffle_in_place(&mut options, rng);
        questions.push(Question {
            word: (*word).clone(),
            options,
            correct_option: correct.to_string(),
            kind,
        });
    }

    questions
}

/// The distinct answers a word list gives for one question type. The words
/// are counted group by group: group `g` owns `starts[g]..starts[g + 1]`.
struct AnswerGroups<'a> {
    values: Vec<&'a str>,
    starts: Vec<usize>,
    index: HashMap<&'a str, usize>,
}

impl<'a> AnswerGroups<'a> {
    fn new(words: &'a [Word], kind: QuestionType) -> Self {
        let mut values: Vec<&str> = Vec::new();
        let mut counts: Vec<usize> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();
        for word in words {
            let value = word.answer(kind);
            let group = *index.entry(value).or_insert_with(|| {
                values.push(value);
                counts.push(0);
                values.len() - 1
            });
            counts[group] += 1;
        }
        let mut starts = Vec::with_capacity(counts.len() + 1);
        let mut total = 0;
        starts.push(total);
        for count in counts {
            total += count;
            starts.push(total);
        }
        Self {
            values,
            starts,
            index,
        }
    }

    fn size(&self, group: usize) -> usize {
        self.starts[group + 1] - self.starts[group]
    }

    /// Draws a group with probability proportional to its word count,
    /// ignoring the `hidden` groups. This is the group of whichever unhidden
    /// word comes first in a uniformly random visiting order.
    fn draw(&self, hidden: &[usize], rng: &mut TinyRng) -> Option<usize> {
        let mut hidden = hidden.to_vec();
        hidden.sort_unstable();
        let words = self.starts[self.values.len()];
        let visible = words - hidden.iter().map(|&g| self.size(g)).sum::<usize>();
        if visible == 0 {
            return None;
        }
        // Pick among the visible words, then step over the hidden ranges.
        let mut slot = rng.generate(visible as u32) as usize;
        for group in hidden {
            if slot >= self.starts[group] {
                slot += self.size(group);
            }
        }
        Some(self.starts.partition_point(|&start| start <= slot) - 1)
    }
}

fn resolve_direction(direction: Direction, rng: &mut TinyRng) -> QuestionType {
    match direction {
        Direction::SourceToTarget => QuestionType::SourceToTarget,
        Direction::TargetToSource => QuestionType::TargetToSource,
        Direction::Mixed => {
            if rng.coin() {
                QuestionType::SourceToTarget
            } else {
                QuestionType::TargetToSource
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::timestamp::ts;
    use crate::types::word::MemoryState;
    use crate::types::word::WordId;

    fn now() -> Timestamp {
        ts("2024-03-01T09:00:00.000")
    }

    fn words(n: i64) -> Vec<Word> {
        (0..n)
            .map(|i| Word::new(WordId(i), format!("wort{i}"), format!("word{i}")))
            .collect()
    }

    fn config(mode: SelectionMode, count: usize, direction: Direction) -> SessionConfig {
        SessionConfig {
            mode,
            count: Count::from(count),
            direction,
        }
    }

    fn scheduled(next_review: &str) -> MemoryState {
        MemoryState {
            next_review: Some(ts(next_review)),
            ..MemoryState::default()
        }
    }

    fn ids(pool: &[&Word]) -> Vec<i64> {
        pool.iter().map(|w| w.id.0).collect()
    }

    #[test]
    fn test_count_sentinel() {
        assert_eq!(Count::from(9999), Count::All);
        assert_eq!(Count::from(100_000), Count::All);
        assert_eq!(Count::from(10), Count::Limit(10));
        assert_eq!(usize::from(Count::All), NO_LIMIT);
    }

    #[test]
    fn test_four_words_no_limit() -> Result<(), InsufficientWordsError> {
        let words = words(4);
        let mut rng = TinyRng::from_seed(1);
        let config = config(SelectionMode::New, NO_LIMIT, Direction::Mixed);
        let questions = build_session(&words, None, &config, now(), &mut rng)?;
        assert_eq!(questions.len(), 4);
        for question in questions {
            assert_eq!(question.options.len(), 4);
            let hits = question
                .options
                .iter()
                .filter(|o| **o == question.correct_option)
                .count();
            assert_eq!(hits, 1);
            let distinct: HashSet<&String> = question.options.iter().collect();
            assert_eq!(distinct.len(), question.options.len());
            assert!(question.is_correct(&question.word.answer(question.kind).to_string()));
        }
        Ok(())
    }

    #[test]
    fn test_too_few_words() {
        let mut rng = TinyRng::from_seed(1);
        let config = config(SelectionMode::New, NO_LIMIT, Direction::SourceToTarget);
        for n in 0..4 {
            let result = build_session(&words(n), None, &config, now(), &mut rng);
            assert_eq!(result, Err(InsufficientWordsError { found: n as usize }));
        }
    }

    #[test]
    fn test_count_below_minimum() {
        let mut rng = TinyRng::from_seed(1);
        let words = words(20);
        let config = config(SelectionMode::Random, 3, Direction::SourceToTarget);
        let result = select_pool(&words, None, &config, now(), &mut rng);
        assert_eq!(result, Err(InsufficientWordsError { found: 3 }));
    }

    #[test]
    fn test_repeated_ids_count_once() {
        let mut words = words(3);
        words.push(words[0].clone());
        let mut rng = TinyRng::from_seed(1);
        let config = config(SelectionMode::New, NO_LIMIT, Direction::SourceToTarget);
        let result = select_pool(&words, None, &config, now(), &mut rng);
        assert_eq!(result, Err(InsufficientWordsError { found: 3 }));
    }

    #[test]
    fn test_category_filter() -> Result<(), InsufficientWordsError> {
        let words: Vec<Word> = words(10)
            .into_iter()
            .map(|w| {
                let category = CategoryId(w.id.0 % 2);
                w.with_category(category)
            })
            .collect();
        let mut rng = TinyRng::from_seed(1);
        let config = config(SelectionMode::New, NO_LIMIT, Direction::SourceToTarget);
        let pool = select_pool(&words, Some(CategoryId(1)), &config, now(), &mut rng)?;
        assert_eq!(ids(&pool), vec![1, 3, 5, 7, 9]);

        let result = select_pool(&words, Some(CategoryId(7)), &config, now(), &mut rng);
        assert_eq!(result, Err(InsufficientWordsError { found: 0 }));
        Ok(())
    }

    #[test]
    fn test_new_mode_keeps_order_and_truncates() -> Result<(), InsufficientWordsError> {
        let words = words(10);
        let mut rng = TinyRng::from_seed(1);
        let config = config(SelectionMode::New, 5, Direction::SourceToTarget);
        let pool = select_pool(&words, None, &config, now(), &mut rng)?;
        assert_eq!(ids(&pool), vec![0, 1, 2, 3, 4]);
        Ok(())
    }

    #[test]
    fn test_review_mode_orders_by_due_date() -> Result<(), InsufficientWordsError> {
        let words = vec![
            Word::new(WordId(0), "a", "A").with_memory(scheduled("2024-02-20T00:00:00.000")),
            Word::new(WordId(1), "b", "B").with_memory(scheduled("2024-04-01T00:00:00.000")),
            Word::new(WordId(2), "c", "C"),
            Word::new(WordId(3), "d", "D").with_memory(scheduled("2024-01-05T00:00:00.000")),
            Word::new(WordId(4), "e", "E").with_memory(scheduled("2024-03-01T09:00:00.000")),
            Word::new(WordId(5), "f", "F"),
        ];
        let mut rng = TinyRng::from_seed(1);
        let config = config(SelectionMode::Review, NO_LIMIT, Direction::SourceToTarget);
        let pool = select_pool(&words, None, &config, now(), &mut rng)?;
        // Word 1 is not due yet; word 4 is due exactly now.
        assert_eq!(ids(&pool), vec![2, 5, 3, 0, 4]);
        Ok(())
    }

    #[test]
    fn test_review_mode_counts_only_due_words() {
        let mut words = words(6);
        for word in words.iter_mut().skip(3) {
            word.memory = scheduled("2025-01-01T00:00:00.000");
        }
        let mut rng = TinyRng::from_seed(1);
        let config = config(SelectionMode::Review, NO_LIMIT, Direction::SourceToTarget);
        let result = select_pool(&words, None, &config, now(), &mut rng);
        assert_eq!(result, Err(InsufficientWordsError { found: 3 }));
    }

    /// Every word shows up in every position about equally often.
    #[test]
    fn test_random_mode_uniform() -> Result<(), InsufficientWordsError> {
        let words = words(4);
        let mut rng = TinyRng::from_seed(2718);
        let config = config(SelectionMode::Random, NO_LIMIT, Direction::SourceToTarget);
        let trials = 8_000;
        let mut counts: HashMap<(i64, usize), usize> = HashMap::new();
        for _ in 0..trials {
            let pool = select_pool(&words, None, &config, now(), &mut rng)?;
            for (pos, word) in pool.iter().enumerate() {
                *counts.entry((word.id.0, pos)).or_default() += 1;
            }
        }
        let expected = trials / 4;
        for id in 0..4 {
            for pos in 0..4 {
                let count = counts.get(&(id, pos)).copied().unwrap_or(0);
                assert!(count.abs_diff(expected) < expected / 10, "count {count}");
            }
        }
        Ok(())
    }

    #[test]
    fn test_mixed_direction_split() -> Result<(), InsufficientWordsError> {
        let words = words(1_000);
        let mut rng = TinyRng::from_seed(31);
        let config = config(SelectionMode::New, NO_LIMIT, Direction::Mixed);
        let questions = build_session(&words, None, &config, now(), &mut rng)?;
        assert_eq!(questions.len(), 1_000);
        let forward = questions
            .iter()
            .filter(|q| q.kind == QuestionType::SourceToTarget)
            .count();
        assert!(forward.abs_diff(500) < 80, "forward {forward}");
        Ok(())
    }

    #[test]
    fn test_fixed_direction() -> Result<(), InsufficientWordsError> {
        let words = words(8);
        let mut rng = TinyRng::from_seed(5);
        let config = config(SelectionMode::Random, NO_LIMIT, Direction::TargetToSource);
        let questions = build_session(&words, None, &config, now(), &mut rng)?;
        for question in questions {
            assert_eq!(question.kind, QuestionType::TargetToSource);
            assert_eq!(question.prompt(), question.word.translation);
            assert_eq!(question.correct_option, question.word.term);
            assert!(question.options.iter().all(|o| o.starts_with("wort")));
        }
        Ok(())
    }

    #[test]
    fn test_scarce_distractors() -> Result<(), InsufficientWordsError> {
        let words = vec![
            Word::new(WordId(0), "a", "x"),
            Word::new(WordId(1), "b", "x"),
            Word::new(WordId(2), "c", "x"),
            Word::new(WordId(3), "d", "y"),
        ];
        let mut rng = TinyRng::from_seed(8);
        let config = config(SelectionMode::New, NO_LIMIT, Direction::SourceToTarget);
        let questions = build_session(&words, None, &config, now(), &mut rng)?;
        assert_eq!(questions.len(), 4);
        for question in questions {
            let mut options = question.options.clone();
            options.sort();
            assert_eq!(options, vec!["x".to_string(), "y".to_string()]);
        }
        Ok(())
    }

    #[test]
    fn test_word_without_distractors_is_skipped() -> Result<(), InsufficientWordsError> {
        let words: Vec<Word> = (0..4)
            .map(|i| Word::new(WordId(i), format!("t{i}"), "same"))
            .collect();
        let mut rng = TinyRng::from_seed(8);
        let config = config(SelectionMode::New, NO_LIMIT, Direction::SourceToTarget);
        let questions = build_session(&words, None, &config, now(), &mut rng)?;
        assert!(questions.is_empty());

        // The other direction has distinct answers.
        let config = SessionConfig {
            direction: Direction::TargetToSource,
            ..config
        };
        let questions = build_session(&words, None, &config, now(), &mut rng)?;
        assert_eq!(questions.len(), 4);
        Ok(())
    }

    #[test]
    fn test_distractors_come_from_full_pool() -> Result<(), InsufficientWordsError> {
        let words: Vec<Word> = words(24)
            .into_iter()
            .map(|w| {
                let category = if w.id.0 < 4 { 1 } else { 2 };
                w.with_category(CategoryId(category))
            })
            .collect();
        let mut rng = TinyRng::from_seed(13);
        let config = config(SelectionMode::New, NO_LIMIT, Direction::SourceToTarget);
        let questions = build_session(&words, Some(CategoryId(1)), &config, now(), &mut rng)?;
        assert_eq!(questions.len(), 4);
        let outside: HashSet<String> = words[4..].iter().map(|w| w.translation.clone()).collect();
        assert!(
            questions
                .iter()
                .flat_map(|q| q.options.iter())
                .any(|o| outside.contains(o))
        );
        for question in &questions {
            assert!(question.word.id.0 < 4);
            assert_eq!(question.options.len(), 4);
        }
        Ok(())
    }

    #[test]
    fn test_distractor_odds_follow_word_counts() {
        let words = vec![
            Word::new(WordId(0), "a", "x"),
            Word::new(WordId(1), "b", "y"),
            Word::new(WordId(2), "c", "y"),
            Word::new(WordId(3), "d", "y"),
            Word::new(WordId(4), "e", "z"),
        ];
        let groups = AnswerGroups::new(&words, QuestionType::SourceToTarget);
        assert_eq!(groups.values, vec!["x", "y", "z"]);
        assert_eq!(groups.starts, vec![0, 1, 4, 5]);

        let mut rng = TinyRng::from_seed(21);
        let trials = 10_000;
        let mut counts = [0usize; 3];
        for _ in 0..trials {
            let group = groups.draw(&[0], &mut rng).unwrap();
            counts[group] += 1;
        }
        assert_eq!(counts[0], 0);
        // `y` covers three of the four visible words.
        assert!(counts[1].abs_diff(7_500) < 300, "y {}", counts[1]);
        assert!(counts[2].abs_diff(2_500) < 300, "z {}", counts[2]);

        assert_eq!(groups.draw(&[2, 0], &mut rng), Some(1));
        assert_eq!(groups.draw(&[1, 0, 2], &mut rng), None);
    }

    #[test]
    fn test_crowded_answer_value() {
        let mut words: Vec<Word> = (0..5_000)
            .map(|i| Word::new(WordId(i), format!("t{i}"), "same"))
            .collect();
        for (i, translation) in ["one", "two", "three", "four"].into_iter().enumerate() {
            words.push(Word::new(WordId(10_000 + i as i64), "u", translation));
        }
        let pool: Vec<&Word> = words[5_000..].iter().collect();
        let mut rng = TinyRng::from_seed(6);
        let questions = build_questions(&pool, &words, Direction::SourceToTarget, &mut rng);
        assert_eq!(questions.len(), 4);
        for question in &questions {
            assert_eq!(question.options.len(), 4);
            let distinct: HashSet<&String> = question.options.iter().collect();
            assert_eq!(distinct.len(), 4);
        }
    }

    #[test]
    fn test_same_seed_same_session() -> Result<(), InsufficientWordsError> {
        let words = words(12);
        let config = config(SelectionMode::Random, 6, Direction::Mixed);
        let a = build_session(&words, None, &config, now(), &mut TinyRng::from_seed(77))?;
        let b = build_session(&words, None, &config, now(), &mut TinyRng::from_seed(77))?;
        assert_eq!(a, b);
        Ok(())
    }

    #[test]
    fn test_config_serialization() -> crate::error::Fallible<()> {
        let config: SessionConfig = serde_json::from_str(
            r#"{"mode": "review", "count": 9999, "direction": "target-to-source"}"#,
        )?;
        assert_eq!(config.mode, SelectionMode::Review);
        assert_eq!(config.count, Count::All);
        assert_eq!(config.direction, Direction::TargetToSource);
        assert!(SelectionMode::try_from("linear".to_string()).is_err());
        Ok(())
    }
}
