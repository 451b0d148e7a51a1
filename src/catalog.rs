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
use memocards_core::CardCounts;
use memocards_core::filter_cards;
use tokio::select;
use tokio::spawn;
use tokio::sync::watch;

use crate::store::CardStore;

/// Live views over the store for the card listing and the status summary.
///
/// Each view is kept up to date by a background task that stops once the
/// view's receiver is dropped or the store goes away.
pub struct Catalog {
    store: CardStore,
}

impl Catalog {
    pub fn new(store: CardStore) -> Self {
        Self { store }
    }

    /// Cards matching the current query, sorted by status. Recomputed when
    /// the card list changes and when the query changes.
    pub fn filtered(&self, mut query: watch::Receiver<String>) -> watch::Receiver<Vec<Card>> {
        let mut cards = self.store.watch_all();
        let (tx, rx) = watch::channel(Vec::new());
        spawn(async move {
            let mut query_open = true;
            loop {
                let view = {
                    let cards = cards.borrow_and_update();
                    let query = query.borrow_and_update();
                    filter_cards(cards.iter(), &query)
                };
                tx.send_replace(view);
                select! {
                    changed = cards.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                    changed = query.changed(), if query_open => {
                        // The query is frozen once its sender is gone.
                        if changed.is_err() {
                            query_open = false;
                        }
                    }
                    _ = tx.closed() => break,
                }
            }
            log::debug!("Catalog filter task finished");
        });
        rx
    }

    /// The three status counts. Starts at zero and re-emits after every
    /// store write.
    pub fn counts(&self) -> watch::Receiver<CardCounts> {
        let mut upstream = self.store.watch_counts();
        let (tx, rx) = watch::channel(CardCounts::default());
        spawn(async move {
            loop {
                let counts = *upstream.borrow_and_update();
                tx.send_replace(counts);
                select! {
                    changed = upstream.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                    _ = tx.closed() => break,
                }
            }
            log::debug!("Catalog counts task finished");
        });
        rx
    }
}
