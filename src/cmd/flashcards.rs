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
use std::io::Write;

use flashbang_core::Category;
use flashbang_core::FlashcardDeck;
use flashbang_core::QuestionType;
use flashbang_core::prompt_locale;

use crate::collection::Collection;
use crate::error::Fallible;

const HELP: &str = "[enter] flip  [n] next  [p] previous  [q] quit";

/// Flip through a category's words. Nothing is scheduled here.
pub fn run_flashcards(
    collection: &Collection,
    category: Option<&str>,
    input: impl BufRead,
    out: &mut impl Write,
) -> Fallible<()> {
    let filter = collection.category_filter(category)?;
    let words = collection.db.words()?;
    let categories = collection.db.categories()?;
    let mut deck = FlashcardDeck::new(&words, filter);
    if deck.is_empty() {
        writeln!(out, "No words available. Add some words to start studying!")?;
        return Ok(());
    }
    log::debug!("Reviewing {} flashcards", deck.len());

    show(&deck, &categories, out)?;
    for line in input.lines() {
        let line = line?;
        match line.trim() {
            "" | "f" => deck.flip(),
            "n" => {
                if !deck.next_card() {
                    writeln!(out, "This is the last card.")?;
                    continue;
                }
            }
            "p" => {
                if !deck.prev_card() {
                    writeln!(out, "This is the first card.")?;
                    continue;
                }
            }
            "q" => break,
            _ => {
                writeln!(out, "{HELP}")?;
                continue;
            }
        }
        show(&deck, &categories, out)?;
    }
    Ok(())
}

fn show(deck: &FlashcardDeck, categories: &[Category], out: &mut impl Write) -> Fallible<()> {
    let (Some(word), Some(front)) = (deck.current(), deck.front()) else {
        return Ok(());
    };
    let locale = prompt_locale(word, categories, QuestionType::SourceToTarget);
    writeln!(out, "\nCard {} / {} [{locale}]", deck.position() + 1, deck.len())?;
    writeln!(out, "{front}")?;
    if deck.is_flipped() {
        writeln!(out, "= {}", word.translation)?;
    }
    Ok(())
}
