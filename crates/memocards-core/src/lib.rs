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

//! memocards-core: platform-neutral core of the memocards flashcard tool.
//!
//! This library provides WASM-compatible types and logic for:
//! - Cards, their learning status, and per-status counts
//! - Searching and ordering the card listing
//! - Bulk import of full-width-space separated text
//! - The swipe-to-review session engine

pub mod catalog;
pub mod collection;
pub mod error;
pub mod import;
pub mod review;
pub mod types;

// Re-exports for convenience
pub use catalog::filter_cards;
pub use collection::CardCollection;
pub use collection::CollectionError;
pub use error::{ErrorReport, Fallible, fail};
pub use import::parse_import;
pub use review::ReviewConfig;
pub use review::gesture::{Offset, Verdict};
pub use review::policy::{StatusChange, VerdictPolicy};
pub use review::session::{AnimationTicket, ReviewSession, SessionState};
pub use types::card::{Card, CardDraft, CardId};
pub use types::counts::CardCounts;
pub use types::status::CardStatus;
