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

use std::path::PathBuf;

use memocards_core::CardDraft;
use memocards_core::CardStatus;
use tempfile::tempdir;

use crate::db::Database;
use crate::error::Fallible;
use crate::store::CardStore;

/// A fresh directory that outlives the test.
pub fn create_tmp_directory() -> Fallible<PathBuf> {
    let dir = tempdir()?.keep();
    Ok(dir.canonicalize()?)
}

/// A store over an in-memory database.
pub fn create_test_store() -> Fallible<CardStore> {
    Ok(CardStore::new(Database::in_memory()?)?)
}

/// A store holding `cards`, inserted in order, as `(front, back, status)`.
pub async fn create_seeded_store(cards: &[(&str, &str, CardStatus)]) -> Fallible<CardStore> {
    let store = create_test_store()?;
    let drafts: Vec<CardDraft> = cards
        .iter()
        .map(|(front, back, status)| CardDraft::new(*front, *back).with_status(*status))
        .collect();
    store.insert_many(drafts).await?;
    Ok(store)
}
