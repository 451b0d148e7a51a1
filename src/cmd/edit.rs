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

use memocards_core::Card;
use memocards_core::CardId;
use memocards_core::CardStatus;

use crate::db::StoreError;
use crate::error::Fallible;
use crate::error::fail;
use crate::store::CardStore;

/// Field replacements for `memocards edit`. Unset fields keep their value.
#[derive(Default, Debug)]
pub struct CardEdit {
    pub front: Option<String>,
    pub back: Option<String>,
    pub details: Option<String>,
    pub status: Option<CardStatus>,
}

impl CardEdit {
    pub fn is_empty(&self) -> bool {
        self.front.is_none() && self.back.is_none() && self.details.is_none() && self.status.is_none()
    }

    fn apply(self, card: &Card) -> Card {
        Card {
            id: card.id,
            front: self.front.unwrap_or_else(|| card.front.clone()),
            back: self.back.unwrap_or_else(|| card.back.clone()),
            details: self.details.unwrap_or_else(|| card.details.clone()),
            status: self.status.unwrap_or(card.status),
        }
    }
}

pub async fn edit_card(store: &CardStore, id: CardId, edit: CardEdit) -> Fallible<Card> {
    if edit.is_empty() {
        return fail("nothing to change: pass --front, --back, --details or --status");
    }
    let Some(card) = store.get(id) else {
        return Err(StoreError::NotFound(id).into());
    };
    let updated = edit.apply(&card);
    store.update(updated.clone()).await?;
    println!("Updated card {id}.");
    Ok(updated)
}
