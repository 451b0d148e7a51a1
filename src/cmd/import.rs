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

use memocards_core::CardDraft;
use memocards_core::parse_import;
use tokio::io::AsyncReadExt;
use tokio::io::stdin;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::store::CardStore;

/// Read import text from `file`, or from standard input when no file is
/// given.
pub async fn read_import_text(file: Option<&Path>) -> Fallible<String> {
    match file {
        Some(path) => tokio::fs::read_to_string(path).await.map_err(|e| {
            ErrorReport::new(format!("failed to read {}: {e}", path.display()))
        }),
        None => {
            let mut text = String::new();
            stdin().read_to_string(&mut text).await?;
            Ok(text)
        }
    }
}

/// Parse `text` and, unless this is a dry run, insert every well-formed
/// record in one write. Returns the importable drafts.
pub async fn import_cards(store: &CardStore, text: &str, dry_run: bool) -> Fallible<Vec<CardDraft>> {
    let drafts = parse_import(text);
    println!("Found {} importable cards.", drafts.len());
    if dry_run {
        for draft in &drafts {
            println!("  {} / {}", draft.front, draft.back);
        }
        return Ok(drafts);
    }
    if drafts.is_empty() {
        return Ok(drafts);
    }
    let ids = store.insert_many(drafts.clone()).await?;
    log::info!("Imported {} cards", ids.len());
    println!("Imported {} cards.", ids.len());
    Ok(drafts)
}
