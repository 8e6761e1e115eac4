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

use crate::collection::Collection;
use crate::error::Fallible;
use crate::error::fail;

pub fn add_category(
    collection: &Collection,
    name: &str,
    source_language: &str,
    target_language: &str,
    out: &mut impl Write,
) -> Fallible<CategoryId> {
    let id = collection
        .db
        .insert_category(name, source_language, target_language)?;
    writeln!(out, "Added category {name} ({source_language} -> {target_language})")?;
    Ok(id)
}

/// Print every category with its language pair and word count.
pub fn list_categories(collection: &Collection, out: &mut impl Write) -> Fallible<()> {
    let mut counts: HashMap<Option<CategoryId>, usize> = HashMap::new();
    for word in collection.db.words()? {
        *counts.entry(word.category_id).or_default() += 1;
    }
    for category in collection.db.categories()? {
        let count = counts.get(&Some(category.id)).copied().unwrap_or(0);
        writeln!(
            out,
            "{}\t{} -> {}\t{} words",
            category.name, category.source_language, category.target_language, count
        )?;
    }
    Ok(())
}

/// Changes to a category. `None` keeps the current value.
#[derive(Default)]
pub struct EditCategory {
    pub rename: Option<String>,
    pub source_language: Option<String>,
    pub target_language: Option<String>,
}

pub fn edit_category(
    collection: &Collection,
    name: &str,
    edit: EditCategory,
    out: &mut impl Write,
) -> Fallible<()> {
    let id = collection.category_id(name)?;
    let Some(category) = collection.db.category_by_id(id)? else {
        return fail(format!("no such category: {name}"));
    };
    let new_name = match edit.rename {
        Some(rename) if rename.trim().is_empty() => {
            return fail("the category name cannot be empty");
        }
        Some(rename) => rename.trim().to_string(),
        None => category.name,
    };
    let source_language = edit.source_language.unwrap_or(category.source_language);
    let target_language = edit.target_language.unwrap_or(category.target_language);
    collection
        .db
        .update_category(id, &new_name, &source_language, &target_language)?;
    log::debug!("Updated category {id}");
    writeln!(out, "Updated category {new_name} ({source_language} -> {target_language})")?;
    Ok(())
}

pub fn delete_category(collection: &Collection, name: &str, out: &mut impl Write) -> Fallible<()> {
    let id = collection.category_id(name)?;
    collection.db.delete_category(id)?;
    log::debug!("Deleted category {id}");
    writeln!(out, "Deleted category {name}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helper::create_tmp_collection;
    use crate::helper::new_word;
    use crate::helper::timestamp;

    #[test]
    fn test_edit() -> Fallible<()> {
        let (_dir, path) = create_tmp_collection()?;
        let collection = Collection::new(Some(path))?;
        add_category(&collection, "Spanish", "es", "en", &mut Vec::new())?;

        let edit = EditCategory {
            rename: Some(" Castellano ".to_string()),
            target_language: Some("de".to_string()),
            ..EditCategory::default()
        };
        let mut out = Vec::new();
        edit_category(&collection, "spanish", edit, &mut out)?;
        assert_eq!(String::from_utf8(out).unwrap(), "Updated category Castellano (es -> de)\n");
        assert!(collection.category_id("Spanish").is_err());
        let id = collection.category_id("Castellano")?;
        assert_eq!(collection.db.category_by_id(id)?.unwrap().target_language, "de");

        let edit = EditCategory {
            rename: Some(String::new()),
            ..EditCategory::default()
        };
        assert!(edit_category(&collection, "Castellano", edit, &mut Vec::new()).is_err());

        let edit = EditCategory {
            rename: Some("Misc".to_string()),
            ..EditCategory::default()
        };
        assert!(edit_category(&collection, "Uncategorized", edit, &mut Vec::new()).is_err());
        Ok(())
    }

    #[test]
    fn test_add_list_delete() -> Fallible<()> {
        let (_dir, path) = create_tmp_collection()?;
        let collection = Collection::new(Some(path))?;
        let id = add_category(&collection, "Spanish", "es", "en", &mut Vec::new())?;
        collection.db.insert_word(
            new_word("perro", "dog", Some(id)),
            timestamp("2024-01-01T10:00:00.000"),
        )?;

        let mut out = Vec::new();
        list_categories(&collection, &mut out)?;
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Spanish\tes -> en\t1 words\nUncategorized\tde -> en\t0 words\n"
        );

        assert!(delete_category(&collection, "Uncategorized", &mut Vec::new()).is_err());
        delete_category(&collection, "spanish", &mut Vec::new())?;
        assert!(collection.category_id("Spanish").is_err());
        Ok(())
    }
}
