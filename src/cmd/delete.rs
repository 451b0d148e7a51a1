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

use memocards_core::CardId;

use crate::error::Fallible;
use crate::store::CardStore;

pub async fn delete_card(store: &CardStore, id: CardId) -> Fallible<()> {
    store.delete(id).await?;
    log::info!("Deleted card {id}");
    println!("Deleted card {id}.");
    Ok(())
}

pub async fn clear_cards(store: &CardStore) -> Fallible<usize> {
    let removed = store.delete_all().await?;
    log::info!("Deleted all {removed} cards");
    println!("Deleted {removed} cards.");
    Ok(removed)
}
