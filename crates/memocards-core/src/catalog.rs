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

//! Search and ordering for the card listing.

use crate::types::card::Card;

/// Case-insensitive substring match against the front, back, or details.
/// The empty query matches every card.
pub fn matches(card: &Card, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    [&card.front, &card.back, &card.details]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// The cards matching `query`, ordered by status. Cards with the same status
/// keep their relative input order.
pub fn filter_cards<'a>(cards: impl IntoIterator<Item = &'a Card>, query: &str) -> Vec<Card> {
    let mut result: Vec<Card> = cards
        .into_iter()
        .filter(|card| matches(card, query))
        .cloned()
        .collect();
    // `sort_by_key` is stable.
    result.sort_by_key(|card| card.status);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::card::CardDraft;
    use crate::types::card::CardId;
    use crate::types::status::CardStatus;

    fn card(id: i64, front: &str, back: &str, details: &str, status: CardStatus) -> Card {
        Card::from_draft(
            CardId::new(id),
            CardDraft::new(front, back)
                .with_details(details)
                .with_status(status),
        )
    }

    fn sample() -> Vec<Card> {
        vec![
            card(1, "Cat", "chat", "animal", CardStatus::Learned),
            card(2, "dog", "chien", "", CardStatus::ToLearn),
            card(3, "house", "maison", "a building", CardStatus::Known),
            card(4, "catalog", "catalogue", "", CardStatus::ToLearn),
        ]
    }

    fn ids(cards: &[Card]) -> Vec<i64> {
        cards.iter().map(|c| c.id.get()).collect()
    }

    #[test]
    fn test_empty_query_returns_everything_sorted() {
        let cards = sample();
        let result = filter_cards(&cards, "");
        assert_eq!(ids(&result), vec![2, 4, 3, 1]);
    }

    #[test]
    fn test_case_insensitive_front() {
        let cards = sample();
        let result = filter_cards(&cards, "CAT");
        assert_eq!(ids(&result), vec![4, 1]);
    }

    #[test]
    fn test_matches_back_and_details() {
        let cards = sample();
        assert_eq!(ids(&filter_cards(&cards, "chien")), vec![2]);
        assert_eq!(ids(&filter_cards(&cards, "Building")), vec![3]);
    }

    #[test]
    fn test_no_match() {
        let cards = sample();
        assert!(filter_cards(&cards, "zebra").is_empty());
    }

    #[test]
    fn test_filter_is_exactly_the_matching_subset() {
        let cards = sample();
        for query in ["a", "ch", "ANIMAL", "  ", "o"] {
            let result = filter_cards(&cards, query);
            let expected = cards.iter().filter(|c| matches(c, query)).count();
            assert_eq!(result.len(), expected, "query {query:?}");
            assert!(result.windows(2).all(|w| w[0].status <= w[1].status));
        }
    }
}
