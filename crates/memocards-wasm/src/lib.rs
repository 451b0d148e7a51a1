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

//! WASM bindings for memocards - the card list and the swipe review run in
//! the browser, with cards kept in localStorage.

use std::time::Duration;

use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::console;

use memocards_core::Card;
use memocards_core::CardCollection;
use memocards_core::CardDraft;
use memocards_core::CardId;
use memocards_core::CardStatus;
use memocards_core::CollectionError;
use memocards_core::ReviewConfig;
use memocards_core::ReviewSession;
use memocards_core::VerdictPolicy;
use memocards_core::filter_cards;
use memocards_core::parse_import;

mod storage;

use storage::Storage;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    console::log_1(&"memocards WASM initialized".into());
}

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(js_error)
}

/// Milliseconds from JavaScript as a duration. Values too large to represent
/// mean the animation is over.
fn animation_elapsed(elapsed_ms: f64, full: Duration) -> Duration {
    Duration::try_from_secs_f64(elapsed_ms.max(0.0) / 1000.0).unwrap_or(full)
}

/// Released card heading off screen. JavaScript animates it for
/// `duration_ms` and then calls `finish_animation(ticket)`.
#[derive(Serialize)]
struct SwipeOutcome {
    verdict: String,
    ticket: u64,
    duration_ms: u64,
}

#[derive(serde::Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
struct Settings {
    review: ReviewConfig,
    verdicts: VerdictPolicy,
}

/// The main application state managed from JavaScript.
#[wasm_bindgen]
pub struct MemocardsApp {
    cards: CardCollection,
    storage: Storage,
    session: Option<ReviewSession>,
    config: ReviewConfig,
    policy: VerdictPolicy,
}

#[wasm_bindgen]
impl MemocardsApp {
    /// Create the app, loading saved cards.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<MemocardsApp, JsValue> {
        let storage = Storage::new();
        let cards = storage.load_cards()?;
        Ok(Self {
            cards,
            storage,
            session: None,
            config: ReviewConfig::default(),
            policy: VerdictPolicy::default(),
        })
    }

    /// Replace the review settings from a JSON object shaped like the
    /// `[review]` and `[verdicts]` tables of `memocards.toml`.
    #[wasm_bindgen]
    pub fn configure(&mut self, json: &str) -> Result<(), JsValue> {
        let settings: Settings = serde_json::from_str(json)
            .map_err(|e| JsValue::from_str(&format!("Invalid settings: {}", e)))?;
        settings.review.validate().map_err(js_error)?;
        self.config = settings.review;
        self.policy = settings.verdicts;
        Ok(())
    }

    // Card management

    #[wasm_bindgen]
    pub fn add_card(&mut self, front: &str, back: &str, details: &str) -> Result<i64, JsValue> {
        let id = self
            .cards
            .insert(CardDraft::new(front, back).with_details(details));
        self.save()?;
        Ok(id.get())
    }

    /// Cards that `import_text` would add, as JSON.
    #[wasm_bindgen]
    pub fn preview_import(&self, text: &str) -> Result<String, JsValue> {
        to_json(&parse_import(text))
    }

    /// Add every well-formed record of `text`. Returns how many were added.
    #[wasm_bindgen]
    pub fn import_text(&mut self, text: &str) -> Result<usize, JsValue> {
        let drafts = parse_import(text);
        let count = drafts.len();
        for draft in drafts {
            self.cards.insert(draft);
        }
        if count > 0 {
            self.save()?;
        }
        Ok(count)
    }

    /// Replace a card. Returns `false` when no card has its id.
    #[wasm_bindgen]
    pub fn update_card(&mut self, card_json: &str) -> Result<bool, JsValue> {
        let card: Card = serde_json::from_str(card_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid card: {}", e)))?;
        let result = self.cards.update(card);
        self.saved(result)
    }

    /// Returns `false` when no card has this id.
    #[wasm_bindgen]
    pub fn set_status(&mut self, id: i64, status: &str) -> Result<bool, JsValue> {
        let status: CardStatus = status.parse().map_err(js_error)?;
        let Some(card) = self.cards.get(CardId::new(id)) else {
            return Ok(false);
        };
        let updated = card.with_status(status);
        let result = self.cards.update(updated);
        self.saved(result)
    }

    /// Returns `false` when no card has this id.
    #[wasm_bindgen]
    pub fn delete_card(&mut self, id: i64) -> Result<bool, JsValue> {
        let result = self.cards.delete(CardId::new(id));
        self.saved(result)
    }

    #[wasm_bindgen]
    pub fn delete_all(&mut self) -> Result<usize, JsValue> {
        let removed = self.cards.delete_all();
        self.save()?;
        Ok(removed)
    }

    /// Cards matching `query`, ordered by status, as JSON.
    #[wasm_bindgen]
    pub fn cards_json(&self, query: &str) -> Result<String, JsValue> {
        to_json(&filter_cards(self.cards.cards(), query))
    }

    #[wasm_bindgen]
    pub fn counts_json(&self) -> Result<String, JsValue> {
        to_json(&self.cards.counts())
    }

    // Review session

    /// Start reviewing every card, or only those with `status` when it is
    /// not empty. Returns the queue length.
    #[wasm_bindgen]
    pub fn start_session(&mut self, flip: bool, status: &str) -> Result<usize, JsValue> {
        let only: Option<CardStatus> = if status.is_empty() {
            None
        } else {
            Some(status.parse().map_err(js_error)?)
        };
        let queue: Vec<Card> = self
            .cards
            .cards()
            .iter()
            .filter(|card| only.is_none_or(|s| card.status == s))
            .cloned()
            .collect();
        let mut config = self.config;
        config.flip_before_swipe |= flip;
        let session = ReviewSession::start(queue, config);
        let len = session.len();
        self.session = Some(session);
        Ok(len)
    }

    fn session_mut(&mut self) -> Result<&mut ReviewSession, JsValue> {
        self.session
            .as_mut()
            .ok_or_else(|| JsValue::from_str("No review session"))
    }

    #[wasm_bindgen]
    pub fn tap(&mut self) -> Result<bool, JsValue> {
        Ok(self.session_mut()?.tap())
    }

    #[wasm_bindgen]
    pub fn drag(&mut self, dx: f32, dy: f32) -> Result<(), JsValue> {
        self.session_mut()?.handle_drag_delta(dx, dy);
        Ok(())
    }

    /// End the drag. Returns a `SwipeOutcome` as JSON, or `None` when the
    /// card snaps back.
    #[wasm_bindgen]
    pub fn release(&mut self) -> Result<Option<String>, JsValue> {
        let session = self.session_mut()?;
        let Some(verdict) = session.handle_drag_end() else {
            return Ok(None);
        };
        let ticket = session
            .pending_animation()
            .ok_or_else(|| JsValue::from_str("Swiped card is not animating"))?;
        let duration = session.config().animation();
        let card = session.current_top_card().cloned();
        if let Some(card) = card {
            if let Some(status) = self.policy.resolve(&card, verdict) {
                let result = self.cards.update(card.with_status(status));
                if !self.saved(result)? {
                    console::warn_1(&format!("Card {} was deleted during the review", card.id).into());
                }
            }
        }
        let outcome = SwipeOutcome {
            verdict: verdict.to_string(),
            ticket: ticket.id(),
            duration_ms: duration.as_millis() as u64,
        };
        to_json(&outcome).map(Some)
    }

    /// Advance past the swiped card. Stale or repeated tickets do nothing.
    #[wasm_bindgen]
    pub fn finish_animation(&mut self, ticket: u64) -> Result<bool, JsValue> {
        let session = self.session_mut()?;
        match session.pending_animation() {
            Some(pending) if pending.id() == ticket => Ok(session.finish_animation(pending)),
            _ => Ok(false),
        }
    }

    /// Position of the top card, `elapsed_ms` into its exit animation.
    #[wasm_bindgen]
    pub fn top_card_json(&self, elapsed_ms: f64) -> Result<Option<String>, JsValue> {
        let Some(session) = &self.session else {
            return Ok(None);
        };
        let elapsed = animation_elapsed(elapsed_ms, session.config().animation());
        session.top_view(elapsed).map(|view| to_json(&view)).transpose()
    }

    /// The top card and the ones stacked under it, as JSON.
    #[wasm_bindgen]
    pub fn visible_cards_json(&self) -> Result<String, JsValue> {
        match &self.session {
            Some(session) => to_json(session.visible_cards()),
            None => Ok("[]".to_string()),
        }
    }

    #[wasm_bindgen]
    pub fn is_completed(&self) -> bool {
        self.session.as_ref().is_none_or(|s| s.is_completed())
    }

    #[wasm_bindgen]
    pub fn progress(&self) -> f64 {
        self.session.as_ref().map_or(0.0, |s| s.progress())
    }

    fn save(&self) -> Result<(), JsValue> {
        self.storage.save_cards(&self.cards)
    }

    fn saved(&self, result: Result<(), CollectionError>) -> Result<bool, JsValue> {
        match result {
            Ok(()) => {
                self.save()?;
                Ok(true)
            }
            Err(CollectionError::NotFound(_)) => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_animation_elapsed() {
        let full = Duration::from_millis(600);
        assert_eq!(animation_elapsed(300.0, full), Duration::from_millis(300));
        assert_eq!(animation_elapsed(-5.0, full), Duration::ZERO);
        assert_eq!(animation_elapsed(f64::NAN, full), Duration::ZERO);
        assert_eq!(animation_elapsed(f64::INFINITY, full), full);
    }
}
