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
use std::sync::Arc;
use std::sync::Mutex;

use memocards_core::Card;
use memocards_core::CardCounts;
use memocards_core::CardDraft;
use memocards_core::CardId;
use memocards_core::CardStatus;
use tokio::sync::watch;
use tokio::task::spawn_blocking;

use crate::db::Database;
use crate::db::StoreError;
use crate::db::StoreResult;

/// Shared handle to the card table.
///
/// Writes run on the blocking pool. After each write, still holding the
/// connection, the store re-reads the table and publishes the card list and
/// the status counts, so subscribers see writes in the order they were
/// applied. All counts come from one read, so they always sum to the card
/// count.
#[derive(Clone)]
pub struct CardStore {
    shared: Arc<Shared>,
}

struct Shared {
    db: Mutex<Database>,
    all: watch::Sender<Vec<Card>>,
    counts: watch::Sender<CardCounts>,
    to_learn: watch::Sender<usize>,
    known: watch::Sender<usize>,
    learned: watch::Sender<usize>,
}

impl Shared {
    fn count_sender(&self, status: CardStatus) -> &watch::Sender<usize> {
        match status {
            CardStatus::ToLearn => &self.to_learn,
            CardStatus::Known => &self.known,
            CardStatus::Learned => &self.learned,
        }
    }

    fn publish(&self, db: &Database) -> StoreResult<()> {
        let cards = db.all_cards()?;
        let counts = db.counts()?;
        self.all.send_replace(cards);
        self.counts.send_replace(counts);
        for status in CardStatus::ALL {
            self.count_sender(status).send_replace(counts.get(status));
        }
        Ok(())
    }
}

impl CardStore {
    pub fn new(db: Database) -> StoreResult<Self> {
        let cards = db.all_cards()?;
        let counts = db.counts()?;
        let shared = Shared {
            all: watch::Sender::new(cards),
            counts: watch::Sender::new(counts),
            to_learn: watch::Sender::new(counts.to_learn),
            known: watch::Sender::new(counts.known),
            learned: watch::Sender::new(counts.learned),
            db: Mutex::new(db),
        };
        Ok(Self {
            shared: Arc::new(shared),
        })
    }

    pub fn open(path: &Path) -> StoreResult<Self> {
        Self::new(Database::open(path)?)
    }

    /// The full card list, re-emitted after every write.
    pub fn watch_all(&self) -> watch::Receiver<Vec<Card>> {
        self.shared.all.subscribe()
    }

    /// All three status counts as one value, re-emitted after every write.
    pub fn watch_counts(&self) -> watch::Receiver<CardCounts> {
        self.shared.counts.subscribe()
    }

    /// The number of cards with `status`, re-emitted after every write.
    pub fn watch_count_by_status(&self, status: CardStatus) -> watch::Receiver<usize> {
        self.shared.count_sender(status).subscribe()
    }

    /// The most recently published card list.
    pub fn cards(&self) -> Vec<Card> {
        self.shared.all.borrow().clone()
    }

    pub fn get(&self, id: CardId) -> Option<Card> {
        self.shared.all.borrow().iter().find(|c| c.id == id).cloned()
    }

    pub async fn insert(&self, draft: CardDraft) -> StoreResult<CardId> {
        self.write(move |db| db.insert(&draft)).await
    }

    pub async fn insert_many(&self, drafts: Vec<CardDraft>) -> StoreResult<Vec<CardId>> {
        self.write(move |db| db.insert_many(&drafts)).await
    }

    pub async fn update(&self, card: Card) -> StoreResult<()> {
        self.write(move |db| db.update(&card)).await
    }

    pub async fn update_status(&self, id: CardId, status: CardStatus) -> StoreResult<()> {
        self.write(move |db| db.update_status(id, status)).await
    }

    pub async fn delete(&self, id: CardId) -> StoreResult<()> {
        self.write(move |db| db.delete(id)).await
    }

    pub async fn delete_all(&self) -> StoreResult<usize> {
        self.write(|db| db.delete_all()).await
    }

    async fn write<T, F>(&self, op: F) -> StoreResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Database) -> StoreResult<T> + Send + 'static,
    {
        let shared = self.shared.clone();
        spawn_blocking(move || -> StoreResult<T> {
            let mut db = shared
                .db
                .lock()
                .map_err(|_| StoreError::Background("database lock poisoned".to_string()))?;
            let result = op(&mut db)?;
            shared.publish(&db)?;
            Ok(result)
        })
        .await
        .map_err(|e| StoreError::Background(e.to_string()))?
    }
}
