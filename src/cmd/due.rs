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
use std::io::Write;

use clap::ValueEnum;
use flashbang_core::Timestamp;
use flashbang_core::due_words;

use crate::collection::Collection;
use crate::error::Fallible;

#[derive(ValueEnum, Clone, Copy, PartialEq, Debug)]
pub enum DueFormat {
    /// One line per word.
    Text,
    /// The due word records as a JSON array.
    Json,
}

impl Display for DueFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DueFormat::Text => write!(f, "text"),
            DueFormat::Json => write!(f, "json"),
        }
    }
}

/// Print the words needing attention.
pub fn print_due(
    collection: &Collection,
    format: DueFormat,
    now: Timestamp,
    out: &mut impl Write,
) -> Fallible<()> {
    let words = collection.db.words()?;
    let due = due_words(&words, now);
    match format {
        DueFormat::Text => {
            writeln!(out, "{} of {} words due", due.len(), words.len())?;
            for word in due {
                writeln!(out, "{}\t{}\t{}", word.id, word.term, word.translation)?;
            }
        }
        DueFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(&due)?)?;
        }
    }
    Ok(())
}
