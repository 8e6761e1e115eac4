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

use std::env::current_dir;
use std::path::PathBuf;

use flashbang_core::CategoryId;

use crate::config::Config;
use crate::db::Database;
use crate::error::Fallible;
use crate::error::fail;

pub const DATABASE_FILE: &str = "flashbang.db";

/// A collection directory: the word store plus its settings.
pub struct Collection {
    pub directory: PathBuf,
    pub db: Database,
    pub config: Config,
}

impl Collection {
    pub fn new(directory: Option<String>) -> Fallible<Self> {
        let directory: PathBuf = match directory {
            Some(dir) => PathBuf::from(dir),
            None => current_dir()?,
        };
        if !directory.exists() {
            return fail("directory does not exist.");
        }
        let directory = directory.canonicalize()?;
        log::debug!("Opening collection at {}", directory.display());
        let config = Config::load(&directory)?;
        let db = Database::new(&directory.join(DATABASE_FILE))?;
        db.ensure_uncategorized()?;
        Ok(Self {
            directory,
            db,
            config,
        })
    }

    /// Resolve a category name given on the command line.
    pub fn category_id(&self, name: &str) -> Fallible<CategoryId> {
        match self.db.category_by_name(name)? {
            Some(category) => Ok(category.id),
            None => fail(format!("no such category: {name}")),
        }
    }

    pub fn category_filter(&self, name: Option<&str>) -> Fallible<Option<CategoryId>> {
        name.map(|name| self.category_id(name)).transpose()
    }
}
