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
use crate::review::gesture::Verdict;
use crate::types::card::Card;
use crate::types::status::CardStatus;

/// What a verdict does to the status of the swiped card.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum StatusChange {
    Keep,
    Set(CardStatus),
    Promote,
    Demote,
}

impl StatusChange {
    pub fn apply(self, current: CardStatus) -> CardStatus {
        match self {
            StatusChange::Keep => current,
            StatusChange::Set(status) => status,
            StatusChange::Promote => current.promoted(),
            StatusChange::Demote => current.demoted(),
        }
    }
}

impl Display for StatusChange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusChange::Keep => write!(f, "keep"),
            StatusChange::Set(status) => write!(f, "{status}"),
            StatusChange::Promote => write!(f, "promote"),
            StatusChange::Demote => write!(f, "demote"),
        }
    }
}

impl FromStr for StatusChange {
    type Err = ErrorReport;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "keep" => Ok(StatusChange::Keep),
            "promote" => Ok(StatusChange::Promote),
            "demote" => Ok(StatusChange::Demote),
            other => other.parse().map(StatusChange::Set).map_err(|_| {
                ErrorReport::new(format!(
                    "invalid status change: '{other}' (expected keep, promote, demote, to_learn, known or learned)"
                ))
            }),
        }
    }
}

impl TryFrom<String> for StatusChange {
    type Error = ErrorReport;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<StatusChange> for String {
    fn from(change: StatusChange) -> String {
        change.to_string()
    }
}

/// Maps verdicts to status changes. The review engine only reports verdicts;
/// this table is how the application turns them into writes.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct VerdictPolicy {
    pub right: StatusChange,
    pub left: StatusChange,
    pub down: StatusChange,
    pub up: StatusChange,
}

impl Default for VerdictPolicy {
    fn default() -> Self {
        Self {
            right: StatusChange::Set(CardStatus::Known),
            left: StatusChange::Set(CardStatus::ToLearn),
            down: StatusChange::Keep,
            up: StatusChange::Set(CardStatus::Learned),
        }
    }
}

impl VerdictPolicy {
    pub fn change_for(&self, verdict: Verdict) -> StatusChange {
        match verdict {
            Verdict::Right => self.right,
            Verdict::Left => self.left,
            Verdict::Down => self.down,
            Verdict::Up => self.up,
        }
    }

    /// The status to write for `card`, or `None` when the status would not
    /// change.
    pub fn resolve(&self, card: &Card, verdict: Verdict) -> Option<CardStatus> {
        let next = self.change_for(verdict).apply(card.status);
        (next != card.status).then_some(next)
    }
}
