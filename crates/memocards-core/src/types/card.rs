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

use std::fmt::Display;
use std::fmt::Formatter;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;
use crate::types::status::CardStatus;

/// Store-assigned card identifier. Never reused.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(i64);

impl CardId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl Display for CardId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CardId {
    type Err = ErrorReport;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(CardId)
            .map_err(|_| ErrorReport::new(format!("invalid card id: '{s}'")))
    }
}

/// A stored card.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub front: String,
    pub back: String,
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub status: CardStatus,
}

impl Card {
    pub fn from_draft(id: CardId, draft: CardDraft) -> Self {
        let CardDraft {
            front,
            back,
            details,
            status,
        } = draft;
        Card {
            id,
            front,
            back,
            details,
            status,
        }
    }

    /// Copy of this card with a different status.
    pub fn with_status(&self, status: CardStatus) -> Self {
        Card {
            status,
            ..self.clone()
        }
    }
}

/// A card that has not been inserted yet, and so has no id.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct CardDraft {
    pub front: String,
    pub back: String,
    pub details: String,
    pub status: CardStatus,
}

impl CardDraft {
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        CardDraft {
            front: front.into(),
            back: back.into(),
            details: String::new(),
            status: CardStatus::ToLearn,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = details.into();
        self
    }

    pub fn with_status(mut self, status: CardStatus) -> Self {
        self.status = status;
        self
    }
}
