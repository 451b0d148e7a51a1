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

use serde::Deserialize;
use serde::Serialize;

use crate::types::card::Card;
use crate::types::status::CardStatus;

/// Number of cards at each status.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct CardCounts {
    pub to_learn: usize,
    pub known: usize,
    pub learned: usize,
}

impl CardCounts {
    pub fn new(to_learn: usize, known: usize, learned: usize) -> Self {
        Self {
            to_learn,
            known,
            learned,
        }
    }

    pub fn tally<'a>(cards: impl IntoIterator<Item = &'a Card>) -> Self {
        let mut counts = Self::default();
        for card in cards {
            *counts.get_mut(card.status) += 1;
        }
        counts
    }

    pub fn get(&self, status: CardStatus) -> usize {
        match status {
            CardStatus::ToLearn => self.to_learn,
            CardStatus::Known => self.known,
            CardStatus::Learned => self.learned,
        }
    }

    pub fn get_mut(&mut self, status: CardStatus) -> &mut usize {
        match status {
            CardStatus::ToLearn => &mut self.to_learn,
            CardStatus::Known => &mut self.known,
            CardStatus::Learned => &mut self.learned,
        }
    }

    pub fn total(&self) -> usize {
        self.to_learn + self.known + self.learned
    }
}
