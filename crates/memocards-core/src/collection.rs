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

use std::error::Error;
use std::fmt::Display;
use std::fmt::Formatter;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;
use crate::types::card::Card;
use crate::types::card::CardDraft;
use crate::types::card::CardId;
use crate::types::counts::CardCounts;
use crate::types::status::CardStatus;

#[derive(Debug, PartialEq)]
pub enum CollectionError {
    /// No card has this id.
    NotFound(CardId),
}

impl Display for CollectionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CollectionError::NotFound(id) => write!(f, "card {id} not found"),
        }
    }
}

impl Error for CollectionError {}

impl From<CollectionError> for ErrorReport {
    fn from(value: CollectionError) -> Self {
        ErrorReport::new(value.to_string())
    }
}

/// An in-memory set of cards in insertion order. Ids are assigned from a
/// counter that survives deletions, so an id is never handed out twice.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CardCollection {
    cards: Vec<Card>,
    last_id: i64,
}

impl CardCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, draft: CardDraft) -> CardId {
        self.last_id += 1;
        let id = CardId::new(self.last_id);
        self.cards.push(Card::from_draft(id, draft));
        id
    }

    pub fn update(&mut self, card: Card) -> Result<(), CollectionError> {
        match self.cards.iter_mut().find(|c| c.id == card.id) {
            Some(slot) => {
                *slot = card;
                Ok(())
            }
            None => Err(CollectionError::NotFound(card.id)),
        }
    }

    pub fn delete(&mut self, id: CardId) -> Result<(), CollectionError> {
        let before = self.cards.len();
        self.cards.retain(|c| c.id != id);
        if self.cards.len() == before {
            return Err(CollectionError::NotFound(id));
        }
        Ok(())
    }

    /// Removes every card and returns how many there were.
    pub fn delete_all(&mut self) -> usize {
        let n = self.cards.len();
        self.cards.clear();
        n
    }

    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn count_by_status(&self, status: CardStatus) -> usize {
        self.cards.iter().filter(|c| c.status == status).count()
    }

    pub fn counts(&self) -> CardCounts {
        CardCounts::tally(&self.cards)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Fallible;

    #[test]
    fn test_ids_are_monotonic_and_never_reused() -> Fallible<()> {
        let mut collection = CardCollection::new();
        let a = collection.insert(CardDraft::new("a", "1"));
        let b = collection.insert(CardDraft::new("b", "2"));
        assert!(a < b);
        collection.delete(b)?;
        let c = collection.insert(CardDraft::new("c", "3"));
        assert!(b < c);
        Ok(())
    }

    #[test]
    fn test_duplicates_allowed() {
        let mut collection = CardCollection::new();
        collection.insert(CardDraft::new("a", "1"));
        collection.insert(CardDraft::new("a", "1"));
        assert_eq!(collection.len(), 2);
    }

    #[test]
    fn test_update_missing_card() {
        let mut collection = CardCollection::new();
        let id = collection.insert(CardDraft::new("a", "1"));
        let ghost = Card::from_draft(CardId::new(id.get() + 100), CardDraft::new("x", "y"));
        let ghost_id = ghost.id;
        assert_eq!(
            collection.update(ghost),
            Err(CollectionError::NotFound(ghost_id))
        );
        assert_eq!(
            collection.delete(CardId::new(99)),
            Err(CollectionError::NotFound(CardId::new(99)))
        );
        let report: ErrorReport = CollectionError::NotFound(CardId::new(99)).into();
        assert_eq!(report.message(), "card 99 not found");
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn test_counts_follow_updates() -> Fallible<()> {
        let mut collection = CardCollection::new();
        let id = collection.insert(CardDraft::new("a", "1"));
        collection.insert(CardDraft::new("b", "2"));
        assert_eq!(collection.counts(), CardCounts::new(2, 0, 0));
        let card = collection.get(id).cloned().unwrap();
        collection.update(card.with_status(CardStatus::Known))?;
        assert_eq!(collection.count_by_status(CardStatus::Known), 1);
        assert_eq!(collection.counts().total(), collection.len());
        assert_eq!(collection.delete_all(), 2);
        assert!(collection.is_empty());
        Ok(())
    }

    #[test]
    fn test_json_roundtrip_keeps_id_counter() -> Fallible<()> {
        let mut collection = CardCollection::new();
        let id = collection.insert(CardDraft::new("a", "1"));
        collection.delete(id)?;
        let json = serde_json::to_string(&collection)?;
        let mut restored: CardCollection = serde_json::from_str(&json)?;
        assert!(restored.insert(CardDraft::new("b", "2")) > id);
        Ok(())
    }
}
