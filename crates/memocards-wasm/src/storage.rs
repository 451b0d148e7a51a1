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

//! Browser localStorage wrapper for persisting the card collection.

use memocards_core::CardCollection;
use wasm_bindgen::prelude::*;
use web_sys::Storage as WebStorage;

const CARDS_KEY: &str = "memocards_cards";

/// Falls back to keeping nothing when localStorage is unavailable.
pub struct Storage {
    inner: Option<WebStorage>,
}

impl Storage {
    pub fn new() -> Self {
        let inner = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        Self { inner }
    }

    fn get(&self, key: &str) -> Result<Option<String>, JsValue> {
        match &self.inner {
            Some(storage) => storage.get_item(key),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), JsValue> {
        match &self.inner {
            Some(storage) => storage.set_item(key, value),
            None => Ok(()),
        }
    }

    pub fn load_cards(&self) -> Result<CardCollection, JsValue> {
        match self.get(CARDS_KEY)? {
            Some(data) => serde_json::from_str(&data)
                .map_err(|e| JsValue::from_str(&format!("Failed to load cards: {}", e))),
            None => Ok(CardCollection::new()),
        }
    }

    pub fn save_cards(&self, cards: &CardCollection) -> Result<(), JsValue> {
        let data = serde_json::to_string(cards)
            .map_err(|e| JsValue::from_str(&format!("Failed to serialize cards: {}", e)))?;
        self.set(CARDS_KEY, &data)
    }
}

impl Default for Storage {
    fn default() -> Self {
        Self::new()
    }
}
