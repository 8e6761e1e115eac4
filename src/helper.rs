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

//! Shared test fixtures.

use flashbang_core::CategoryId;
use flashbang_core::Timestamp;
use tempfile::TempDir;
use tempfile::tempdir;

use crate::db::NewWord;
use crate::error::Fallible;

pub fn timestamp(s: &str) -> Timestamp {
    Timestamp::try_from(s.to_string()).unwrap()
}

pub fn new_word(term: &str, translation: &str, category_id: Option<CategoryId>) -> NewWord {
    NewWord {
        term: term.to_string(),
        spelling: None,
        translation: translation.to_string(),
        category_id,
        image_url: None,
    }
}

/// An empty collection directory. Keep the `TempDir` alive while using it.
pub fn create_tmp_collection() -> Fallible<(TempDir, String)> {
    let dir = tempdir()?;
    let path = dir.path().display().to_string();
    Ok((dir, path))
}
