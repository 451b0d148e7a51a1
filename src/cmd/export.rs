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

use memocards_core::Card;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::store::CardStore;

pub fn export_json(cards: &[Card]) -> Fallible<String> {
    Ok(serde_json::to_string_pretty(cards)?)
}

/// Write every card as a JSON array to `output`, or to standard output.
pub async fn export_cards(store: &CardStore, output: Option<&Path>) -> Fallible<()> {
    let cards = store.cards();
    let json = export_json(&cards)?;
    match output {
        Some(path) => {
            tokio::fs::write(path, json).await.map_err(|e| {
                ErrorReport::new(format!("failed to write {}: {e}", path.display()))
            })?;
            log::info!("Exported {} cards to {}", cards.len(), path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
