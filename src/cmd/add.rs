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

use memocards_core::CardDraft;
use memocards_core::CardId;

use crate::error::Fallible;
use crate::store::CardStore;

pub async fn add_card(store: &CardStore, draft: CardDraft) -> Fallible<CardId> {
    let id = store.insert(draft).await?;
    log::info!("Added card {id}");
    println!("Added card {id}.");
    Ok(id)
}

#[cfg(test)]
mod tests {
    use memocards_core::CardStatus;

    use super::*;
    use crate::helper::create_test_store;

    #[tokio::test]
    async fn test_add_card() -> Fallible<()> {
        let store = create_test_store()?;
        let draft = CardDraft::new("cat", "chat")
            .with_details("noun")
            .with_status(CardStatus::Known);
        let id = add_card(&store, draft).await?;
        let card = store.get(id);
        assert_eq!(card.as_ref().map(|c| c.details.as_str()), Some("noun"));
        assert_eq!(card.map(|c| c.status), Some(CardStatus::Known));
        Ok(())
    }

    #[tokio::test]
    async fn test_add_card_with_empty_sides() -> Fallible<()> {
        let store = create_test_store()?;
        let no_back = add_card(&store, CardDraft::new("cat", "")).await?;
        let no_front = add_card(&store, CardDraft::new("", "chien")).await?;
        assert_eq!(store.get(no_back).map(|c| c.back), Some(String::new()));
        assert_eq!(store.get(no_front).map(|c| c.front), Some(String::new()));
        assert_eq!(store.cards().len(), 2);
        Ok(())
    }
}
