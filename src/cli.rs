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

use std::io::stdin;
use std::io::stdout;

use clap::Parser;
use clap::Subcommand;
use flashbang_core::DEFAULT_SOURCE_LANGUAGE;
use flashbang_core::DEFAULT_TARGET_LANGUAGE;
use flashbang_core::Direction;
use flashbang_core::SelectionMode;
use flashbang_core::Timestamp;
use flashbang_core::WordId;

use crate::cmd::category::EditCategory;
use crate::cmd::category::add_category;
use crate::cmd::category::delete_category;
use crate::cmd::category::edit_category;
use crate::cmd::category::list_categories;
use crate::cmd::due::DueFormat;
use crate::cmd::due::print_due;
use crate::cmd::flashcards::run_flashcards;
use crate::cmd::quiz::QuizOptions;
use crate::cmd::quiz::run_quiz;
use crate::cmd::words::AddWord;
use crate::cmd::words::EditWord;
use crate::cmd::words::add_word;
use crate::cmd::words::edit_word;
use crate::cmd::words::list_words;
use crate::cmd::words::remove_word;
use crate::collection::Collection;
use crate::error::Fallible;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Take a multiple-choice quiz.
    Quiz {
        /// Path to the collection directory. By default, the current working directory is used.
        #[arg(long)]
        directory: Option<String>,
        /// How words are picked: new, review, or random. Default from flashbang.toml, else new.
        #[arg(long, value_parser = parse_mode)]
        mode: Option<SelectionMode>,
        /// Maximum number of words. 9999 or more means all matching words.
        #[arg(long)]
        count: Option<usize>,
        /// source-to-target, target-to-source, or mixed.
        #[arg(long, value_parser = parse_direction)]
        direction: Option<Direction>,
        /// Only quiz words from this category.
        #[arg(long)]
        category: Option<String>,
        /// Seed for shuffling. By default, the current time is used.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Flip through flashcards.
    Flashcards {
        /// Path to the collection directory. By default, the current working directory is used.
        #[arg(long)]
        directory: Option<String>,
        /// Only show words from this category.
        #[arg(long)]
        category: Option<String>,
    },
    /// Add a word.
    Add {
        /// The word in the source language.
        term: String,
        /// Its translation.
        translation: String,
        /// Pronunciation or spelling hint.
        #[arg(long)]
        spelling: Option<String>,
        /// Category name. By default, the word is uncategorized.
        #[arg(long)]
        category: Option<String>,
        /// Link to an image shown with the word.
        #[arg(long)]
        image_url: Option<String>,
        /// Path to the collection directory. By default, the current working directory is used.
        #[arg(long)]
        directory: Option<String>,
    },
    /// Edit a word. Options left out keep their current value.
    Edit {
        id: i64,
        /// The word in the source language.
        #[arg(long)]
        term: Option<String>,
        /// Its translation.
        #[arg(long)]
        translation: Option<String>,
        /// Pronunciation or spelling hint. An empty value removes it.
        #[arg(long)]
        spelling: Option<String>,
        /// Category name. An empty value makes the word uncategorized.
        #[arg(long)]
        category: Option<String>,
        /// Link to an image shown with the word. An empty value removes it.
        #[arg(long)]
        image_url: Option<String>,
        /// Path to the collection directory. By default, the current working directory is used.
        #[arg(long)]
        directory: Option<String>,
    },
    /// Remove a word by id.
    Remove {
        id: i64,
        /// Path to the collection directory. By default, the current working directory is used.
        #[arg(long)]
        directory: Option<String>,
    },
    /// List words, newest first.
    List {
        /// Only list words from this category.
        #[arg(long)]
        category: Option<String>,
        /// Path to the collection directory. By default, the current working directory is used.
        #[arg(long)]
        directory: Option<String>,
    },
    /// List the words due for review.
    Due {
        /// Which output format to use.
        #[arg(long, default_value_t = DueFormat::Text)]
        format: DueFormat,
        /// Path to the collection directory. By default, the current working directory is used.
        #[arg(long)]
        directory: Option<String>,
    },
    /// Commands relating to categories.
    Category {
        #[command(subcommand)]
        command: CategoryCommand,
    },
}

#[derive(Subcommand)]
enum CategoryCommand {
    /// Create a category.
    Add {
        name: String,
        /// Language tag of the words' source terms.
        #[arg(long, default_value = DEFAULT_SOURCE_LANGUAGE)]
        source_language: String,
        /// Language tag of the translations.
        #[arg(long, default_value = DEFAULT_TARGET_LANGUAGE)]
        target_language: String,
        /// Path to the collection directory. By default, the current working directory is used.
        #[arg(long)]
        directory: Option<String>,
    },
    /// List categories with their word counts.
    List {
        /// Path to the collection directory. By default, the current working directory is used.
        #[arg(long)]
        directory: Option<String>,
    },
    /// Rename a category or change its languages.
    Edit {
        name: String,
        /// The new name.
        #[arg(long)]
        rename: Option<String>,
        /// Language tag of the words' source terms.
        #[arg(long)]
        source_language: Option<String>,
        /// Language tag of the translations.
        #[arg(long)]
        target_language: Option<String>,
        /// Path to the collection directory. By default, the current working directory is used.
        #[arg(long)]
        directory: Option<String>,
    },
    /// Delete a category. Its words become uncategorized.
    Delete {
        name: String,
        /// Path to the collection directory. By default, the current working directory is used.
        #[arg(long)]
        directory: Option<String>,
    },
}

fn parse_mode(s: &str) -> Result<SelectionMode, String> {
    SelectionMode::try_from(s.to_string()).map_err(|e| e.to_string())
}

fn parse_direction(s: &str) -> Result<Direction, String> {
    Direction::try_from(s.to_string()).map_err(|e| e.to_string())
}

pub fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    let mut out = stdout().lock();
    match cli {
        Command::Quiz {
            directory,
            mode,
            count,
            direction,
            category,
            seed,
        } => {
            let collection = Collection::new(directory)?;
            let options = QuizOptions {
                mode,
                count,
                direction,
                category,
                seed,
            };
            run_quiz(&collection, options, stdin().lock(), &mut out)
        }
        Command::Flashcards {
            directory,
            category,
        } => {
            let collection = Collection::new(directory)?;
            run_flashcards(&collection, category.as_deref(), stdin().lock(), &mut out)
        }
        Command::Add {
            term,
            translation,
            spelling,
            category,
            image_url,
            directory,
        } => {
            let collection = Collection::new(directory)?;
            let word = AddWord {
                term,
                translation,
                spelling,
                category,
                image_url,
            };
            add_word(&collection, word, Timestamp::now(), &mut out).map(|_| ())
        }
        Command::Edit {
            id,
            term,
            translation,
            spelling,
            category,
            image_url,
            directory,
        } => {
            let collection = Collection::new(directory)?;
            let edit = EditWord {
                term,
                translation,
                spelling,
                category,
                image_url,
            };
            edit_word(&collection, WordId(id), edit, &mut out)
        }
        Command::Remove { id, directory } => {
            let collection = Collection::new(directory)?;
            remove_word(&collection, WordId(id), &mut out)
        }
        Command::List {
            category,
            directory,
        } => {
            let collection = Collection::new(directory)?;
            list_words(&collection, category.as_deref(), Timestamp::now(), &mut out)
        }
        Command::Due { format, directory } => {
            let collection = Collection::new(directory)?;
            print_due(&collection, format, Timestamp::now(), &mut out)
        }
        Command::Category { command } => match command {
            CategoryCommand::Add {
                name,
                source_language,
                target_language,
                directory,
            } => {
                let collection = Collection::new(directory)?;
                add_category(
                    &collection,
                    &name,
                    &source_language,
                    &target_language,
                    &mut out,
                )
                .map(|_| ())
            }
            CategoryCommand::List { directory } => {
                let collection = Collection::new(directory)?;
                list_categories(&collection, &mut out)
            }
            CategoryCommand::Edit {
                name,
                rename,
                source_language,
                target_language,
                directory,
            } => {
                let collection = Collection::new(directory)?;
                let edit = EditCategory {
                    rename,
                    source_language,
                    target_language,
                };
                edit_category(&collection, &name, edit, &mut out)
            }
            CategoryCommand::Delete { name, directory } => {
                let collection = Collection::new(directory)?;
                delete_category(&collection, &name, &mut out)
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Command::command().debug_assert();
    }

    #[test]
    fn test_parse_quiz_flags() {
        let cli = Command::try_parse_from([
            "flashbang",
            "quiz",
            "--mode",
            "review",
            "--direction",
            "target-to-source",
            "--count",
            "20",
        ])
        .unwrap();
        match cli {
            Command::Quiz {
                mode,
                direction,
                count,
                seed,
                ..
            } => {
                assert_eq!(mode, Some(SelectionMode::Review));
                assert_eq!(direction, Some(Direction::TargetToSource));
                assert_eq!(count, Some(20));
                assert_eq!(seed, None);
            }
            _ => panic!("expected the quiz command"),
        }
    }

    #[test]
    fn test_parse_edit_with_empty_category() {
        let cli = Command::try_parse_from(["flashbang", "edit", "7", "--category", ""]).unwrap();
        match cli {
            Command::Edit { id, category, term, .. } => {
                assert_eq!(id, 7);
                assert_eq!(category.as_deref(), Some(""));
                assert_eq!(term, None);
            }
            _ => panic!("expected the edit command"),
        }
    }

    #[test]
    fn test_reject_unknown_mode() {
        let result = Command::try_parse_from(["flashbang", "quiz", "--mode", "linear"]);
        assert!(result.is_err());
    }
}
