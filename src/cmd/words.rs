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

use std::collections::HashMap;
use std::io::Write;

use flashbang_core::CategoryId;
use flashbang_core::Timestamp;
use flashbang_core::UNCATEGORIZED;
use flashbang_core::WordId;
use flashbang_core::is_due;

use crate::collection::Collection;
use crate::db::NewWord;
use crate::error::Fallible;
use crate::error::fail;

pub struct AddWord {
    pub term: String,
    pub translation: String,
    pub spelling: Option<String>,
    /// Category name. Words without one go to the system category.
    pub category: Option<String>,
    pub image_url: Option<String>,
}

pub fn add_word(
    collection: &Collection,
    word: AddWord,
    now: Timestamp,
    out: &mut impl Write,
) -> Fallible<WordId> {
    let term = required("term", word.term)?;
    let translation = required("translation", word.translation)?;
    let category_id = resolve_category(collection, word.category.as_deref().unwrap_or(""))?;
    let summary = format!("{term} = {translation}");
    let id = collection.db.insert_word(
        NewWord {
            term,
            spelling: word.spelling.and_then(non_empty),
            translation,
            category_id: Some(category_id),
            image_url: word.image_url.and_then(non_empty),
        },
        now,
    )?;
    log::debug!("Inserted word {id} into category {category_id}");
    writeln!(out, "Added word {id}: {summary}")?;
    Ok(id)
}

/// Changes to a stored word. `None` leaves a field as it is; an empty
/// spelling or image clears it, and an empty category means uncategorized.
#[derive(Default)]
pub struct EditWord {
    pub term: Option<String>,
    pub translation: Option<String>,
    pub spelling: Option<String>,
    pub category: Option<String>,
    pub image_url: Option<String>,
}

pub fn edit_word(
    collection: &Collection,
    id: WordId,
    edit: EditWord,
    out: &mut impl Write,
) -> Fallible<()> {
    let Some(word) = collection.db.get_word(id)? else {
        return fail(format!("no word with id {id}"));
    };
    let term = match edit.term {
        Some(term) => required("term", term)?,
        None => word.term,
    };
    let translation = match edit.translation {
        Some(translation) => required("translation", translation)?,
        None => word.translation,
    };
    let category_id = match edit.category.as_deref() {
        Some(name) => Some(resolve_category(collection, name)?),
        None => word.category_id,
    };
    let spelling = match edit.spelling {
        Some(spelling) => non_empty(spelling),
        None => word.spelling,
    };
    let image_url = match edit.image_url {
        Some(image_url) => non_empty(image_url),
        None => word.image_url,
    };
    let summary = format!("{term} = {translation}");
    collection.db.update_word(
        id,
        NewWord {
            term,
            spelling,
            translation,
            category_id,
            image_url,
        },
    )?;
    log::debug!("Updated word {id}");
    writeln!(out, "Updated word {id}: {summary}")?;
    Ok(())
}

/// An empty name, or the system category's own name, files the word as
/// uncategorized.
fn resolve_category(collection: &Collection, name: &str) -> Fallible<CategoryId> {
    let name = name.trim();
    if name.is_empty() || name.eq_ignore_ascii_case(UNCATEGORIZED) {
        collection.db.ensure_uncategorized()
    } else {
        collection.category_id(name)
    }
}

fn required(field: &str, value: String) -> Fallible<String> {
    match non_empty(value) {
        Some(value) => Ok(value),
        None => fail(format!("the {field} cannot be empty")),
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Print words, newest first, with their review status.
pub fn list_words(
    collection: &Collection,
    category: Option<&str>,
    now: Timestamp,
    out: &mut impl Write,
) -> Fallible<()> {
    let filter = collection.category_filter(category)?;
    let names: HashMap<CategoryId, String> = collection
        .db
        .categories()?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect();
    for word in collection.db.words()? {
        if filter.is_some() && word.category_id != filter {
            continue;
        }
        let category = word
            .category_id
            .and_then(|id| names.get(&id))
            .map(String::as_str)
            .unwrap_or(UNCATEGORIZED);
        let status = match word.memory.next_review {
            None => "new".to_string(),
            Some(_) if is_due(&word, now) => "due".to_string(),
            Some(next_review) => format!("next review {next_review}"),
        };
        writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}",
            word.id, word.term, word.translation, category, status
        )?;
    }
    Ok(())
}

pub fn remove_word(collection: &Collection, id: WordId, out: &mut impl Write) -> Fallible<()> {
    let Some(word) = collection.db.get_word(id)? else {
        return fail(format!("no word with id {id}"));
    };
    collection.db.delete_word(id)?;
    writeln!(out, "Removed word {id}: {} = {}", word.term, word.translation)?;
    Ok(())
}
