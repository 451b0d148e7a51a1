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
use tokio::sync::watch;

use crate::catalog::Catalog;
use crate::error::ErrorReport;
use crate::error::Fallible;

pub fn format_card(card: &Card) -> String {
    let mut line = format!(
        "{:>5}  {:<8}  {} / {}",
        card.id.get(),
        card.status.as_str(),
        card.front,
        card.back
    );
    if !card.details.is_empty() {
        line.push_str(&format!("  ({})", card.details));
    }
    line
}

/// The catalog view for `query`, taken once.
pub async fn list_cards(catalog: &Catalog, query: String) -> Fallible<Vec<Card>> {
    let (_query_tx, query_rx) = watch::channel(query);
    let mut view = catalog.filtered(query_rx);
    view.changed()
        .await
        .map_err(|_| ErrorReport::new("catalog view closed"))?;
    let cards = view.borrow().clone();
    Ok(cards)
}

pub fn print_cards(cards: &[Card]) {
    if cards.is_empty() {
        println!("No cards.");
        return;
    }
    for card in cards {
        println!("{}", format_card(card));
    }
}
