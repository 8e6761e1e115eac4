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

use std::path::Path;

use flashbang_core::Category;
use flashbang_core::CategoryId;
use flashbang_core::DEFAULT_SOURCE_LANGUAGE;
use flashbang_core::DEFAULT_TARGET_LANGUAGE;
use flashbang_core::MemoryState;
use flashbang_core::Timestamp;
use flashbang_core::UNCATEGORIZED;
use flashbang_core::Word;
use flashbang_core::WordId;
use rusqlite::Connection;
use rusqlite::OptionalExtension;
use rusqlite::Row;
use rusqlite::params;

use crate::error::Fallible;
use crate::error::fail;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS categories (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE COLLATE NOCASE,
    source_language TEXT NOT NULL,
    target_language TEXT NOT NULL,
    is_system INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS words (
    id INTEGER PRIMARY KEY,
    term TEXT NOT NULL,
    spelling TEXT,
    translation TEXT NOT NULL,
    category_id INTEGER REFERENCES categories(id) ON DELETE SET NULL,
    image_url TEXT,
    created_at TEXT NOT NULL,
    interval_days INTEGER NOT NULL DEFAULT 0,
    ease_factor REAL NOT NULL DEFAULT 2.5,
    consecutive_correct INTEGER NOT NULL DEFAULT 0,
    next_review TEXT
);
"#;

const WORD_COLUMNS: &str = "id, term, spelling, translation, category_id, image_url, created_at, \
                            interval_days, ease_factor, consecutive_correct, next_review";

/// A word as entered by the user, before the store assigns an id.
pub struct NewWord {
    pub term: String,
    pub spelling: Option<String>,
    pub translation: String,
    pub category_id: Option<CategoryId>,
    pub image_url: Option<String>,
}

/// The SQLite-backed word and category store.
pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn new(path: &Path) -> Fallible<Self> {
        let conn = Connection::open(path)?;
        Self::setup(conn)
    }

    #[cfg(test)]
    pub fn in_memory() -> Fallible<Self> {
        Self::setup(Connection::open_in_memory()?)
    }

    fn setup(conn: Connection) -> Fallible<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// Returns the id of the system "Uncategorized" category, creating it if
    /// it is missing.
    pub fn ensure_uncategorized(&self) -> Fallible<CategoryId> {
        let existing: Option<i64> = self
            .conn
            .query_row(
                "SELECT id FROM categories WHERE is_system = 1 AND name = ?1",
                params![UNCATEGORIZED],
                |row| row.get(0),
            )
            .optional()?;
        if let Some(id) = existing {
            return Ok(CategoryId(id));
        }
        log::debug!("Creating the {UNCATEGORIZED} category");
        self.conn.execute(
            "INSERT INTO categories (name, source_language, target_language, is_system)
             VALUES (?1, ?2, ?3, 1)",
            params![UNCATEGORIZED, DEFAULT_SOURCE_LANGUAGE, DEFAULT_TARGET_LANGUAGE],
        )?;
        Ok(CategoryId(self.conn.last_insert_rowid()))
    }

    pub fn insert_category(
        &self,
        name: &str,
        source_language: &str,
        target_language: &str,
    ) -> Fallible<CategoryId> {
        if self.category_by_name(name)?.is_some() {
            return fail(format!("category already exists: {name}"));
        }
        self.conn.execute(
            "INSERT INTO categories (name, source_language, target_language) VALUES (?1, ?2, ?3)",
            params![name, source_language, target_language],
        )?;
        Ok(CategoryId(self.conn.last_insert_rowid()))
    }

    /// All categories, ordered by name.
    pub fn categories(&self) -> Fallible<Vec<Category>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, source_language, target_language, is_system
             FROM categories ORDER BY name",
        )?;
        let rows = stmt.query_map([], row_to_category)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Case-insensitive lookup.
    pub fn category_by_name(&self, name: &str) -> Fallible<Option<Category>> {
        let category = self
            .conn
            .query_row(
                "SELECT id, name, source_language, target_language, is_system
                 FROM categories WHERE name = ?1 COLLATE NOCASE",
                params![name],
                row_to_category,
            )
            .optional()?;
        Ok(category)
    }

    pub fn category_by_id(&self, id: CategoryId) -> Fallible<Option<Category>> {
        let category = self
            .conn
            .query_row(
                "SELECT id, name, source_language, target_language, is_system
                 FROM categories WHERE id = ?1",
                params![id.0],
                row_to_category,
            )
            .optional()?;
        Ok(category)
    }

    /// Renames a category or changes its languages. System categories keep
    /// their name.
    pub fn update_category(
        &self,
        id: CategoryId,
        name: &str,
        source_language: &str,
        target_language: &str,
    ) -> Fallible<()> {
        let Some(current) = self.category_by_id(id)? else {
            return fail(format!("no category with id {id}"));
        };
        if current.is_system && current.name != name {
            return fail("cannot rename a system category");
        }
        if let Some(other) = self.category_by_name(name)? {
            if other.id != id {
                return fail(format!("category already exists: {name}"));
            }
        }
        self.conn.execute(
            "UPDATE categories SET name = ?1, source_language = ?2, target_language = ?3
             WHERE id = ?4",
            params![name, source_language, target_language, id.0],
        )?;
        Ok(())
    }

    /// Deletes a category. Its words become uncategorized.
    pub fn delete_category(&self, id: CategoryId) -> Fallible<()> {
        match self.category_by_id(id)? {
            None => fail(format!("no category with id {id}")),
            Some(category) if category.is_system => fail("cannot delete a system category"),
            Some(_) => {
                self.conn
                    .execute("DELETE FROM categories WHERE id = ?1", params![id.0])?;
                Ok(())
            }
        }
    }

    pub fn insert_word(&self, word: NewWord, created_at: Timestamp) -> Fallible<WordId> {
        self.conn.execute(
            "INSERT INTO words (term, spelling, translation, category_id, image_url, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                word.term,
                word.spelling,
                word.translation,
                word.category_id.map(|id| id.0),
                word.image_url,
                created_at.to_string(),
            ],
        )?;
        Ok(WordId(self.conn.last_insert_rowid()))
    }

    /// All words, most recently created first.
    pub fn words(&self) -> Fallible<Vec<Word>> {
        let sql = format!("SELECT {WORD_COLUMNS} FROM words ORDER BY created_at DESC, id DESC");
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], WordRow::from_row)?;
        let mut words = Vec::new();
        for row in rows {
            words.push(row?.into_word()?);
        }
        Ok(words)
    }

    pub fn get_word(&self, id: WordId) -> Fallible<Option<Word>> {
        let sql = format!("SELECT {WORD_COLUMNS} FROM words WHERE id = ?1");
        let row = self
            .conn
            .query_row(&sql, params![id.0], WordRow::from_row)
            .optional()?;
        row.map(WordRow::into_word).transpose()
    }

    /// Replace a word's text, category, and image. Its memory state is kept.
    pub fn update_word(&self, id: WordId, word: NewWord) -> Fallible<()> {
        let updated = self.conn.execute(
            "UPDATE words
             SET term = ?1, spelling = ?2, translation = ?3, category_id = ?4, image_url = ?5
             WHERE id = ?6",
            params![
                word.term,
                word.spelling,
                word.translation,
                word.category_id.map(|id| id.0),
                word.image_url,
                id.0,
            ],
        )?;
        if updated == 0 {
            return fail(format!("no word with id {id}"));
        }
        Ok(())
    }

    /// Persist the scheduler's output for a word.
    pub fn update_memory(&self, id: WordId, memory: &MemoryState) -> Fallible<()> {
        let updated = self.conn.execute(
            "UPDATE words
             SET interval_days = ?1, ease_factor = ?2, consecutive_correct = ?3, next_review = ?4
             WHERE id = ?5",
            params![
                memory.interval,
                memory.ease_factor,
                memory.consecutive_correct,
                memory.next_review.map(|ts| ts.to_string()),
                id.0,
            ],
        )?;
        if updated == 0 {
            return fail(format!("no word with id {id}"));
        }
        Ok(())
    }

    pub fn delete_word(&self, id: WordId) -> Fallible<()> {
        let deleted = self
            .conn
            .execute("DELETE FROM words WHERE id = ?1", params![id.0])?;
        if deleted == 0 {
            return fail(format!("no word with id {id}"));
        }
        Ok(())
    }
}

fn row_to_category(row: &Row) -> rusqlite::Result<Category> {
    Ok(Category {
        id: CategoryId(row.get(0)?),
        name: row.get(1)?,
        source_language: row.get(2)?,
        target_language: row.get(3)?,
        is_system: row.get(4)?,
    })
}

/// A `words` row with its timestamps still in textual form.
struct WordRow {
    id: i64,
    term: String,
    spelling: Option<String>,
    translation: String,
    category_id: Option<i64>,
    image_url: Option<String>,
    created_at: String,
    interval: u32,
    ease_factor: f64,
    consecutive_correct: u32,
    next_review: Option<String>,
}

impl WordRow {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            term: row.get(1)?,
            spelling: row.get(2)?,
            translation: row.get(3)?,
            category_id: row.get(4)?,
            image_url: row.get(5)?,
            created_at: row.get(6)?,
            interval: row.get(7)?,
            ease_factor: row.get(8)?,
            consecutive_correct: row.get(9)?,
            next_review: row.get(10)?,
        })
    }

    fn into_word(self) -> Fallible<Word> {
        let next_review = self.next_review.map(Timestamp::try_from).transpose()?;
        Ok(Word {
            id: WordId(self.id),
            term: self.term,
            spelling: self.spelling,
            translation: self.translation,
            category_id: self.category_id.map(CategoryId),
            image_url: self.image_url,
            created_at: Some(Timestamp::try_from(self.created_at)?),
            memory: MemoryState {
                interval: self.interval,
                ease_factor: self.ease_factor,
                consecutive_correct: self.consecutive_correct,
                next_review,
            },
        })
    }
}
