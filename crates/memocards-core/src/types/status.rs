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
use crate::error::fail;

/// How far along a card is. The declaration order is the catalog sort order.
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Debug, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CardStatus {
    #[default]
    ToLearn,
    Known,
    Learned,
}

impl CardStatus {
    pub const ALL: [CardStatus; 3] = [CardStatus::ToLearn, CardStatus::Known, CardStatus::Learned];

    pub fn as_str(&self) -> &'static str {
        match self {
            CardStatus::ToLearn => "to_learn",
            CardStatus::Known => "known",
            CardStatus::Learned => "learned",
        }
    }

    /// One step towards `Learned`, saturating.
    pub fn promoted(self) -> Self {
        match self {
            CardStatus::ToLearn => CardStatus::Known,
            CardStatus::Known | CardStatus::Learned => CardStatus::Learned,
        }
    }

    /// One step towards `ToLearn`, saturating.
    pub fn demoted(self) -> Self {
        match self {
            CardStatus::Learned => CardStatus::Known,
            CardStatus::Known | CardStatus::ToLearn => CardStatus::ToLearn,
        }
    }
}

impl Display for CardStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CardStatus {
    type Err = ErrorReport;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "to_learn" => Ok(CardStatus::ToLearn),
            "known" => Ok(CardStatus::Known),
            "learned" => Ok(CardStatus::Learned),
            _ => fail(format!("invalid card status: '{value}'")),
        }
    }
}

impl TryFrom<String> for CardStatus {
    type Error = ErrorReport;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Fallible;

    #[test]
    fn test_ordering() {
        assert!(CardStatus::ToLearn < CardStatus::Known);
        assert!(CardStatus::Known < CardStatus::Learned);
    }

    #[test]
    fn test_parse() -> Fallible<()> {
        for status in CardStatus::ALL {
            assert_eq!(status.as_str().parse::<CardStatus>()?, status);
        }
        assert!("TO_LEARN".parse::<CardStatus>().is_err());
        assert!(CardStatus::try_from("".to_string()).is_err());
        Ok(())
    }

    #[test]
    fn test_serialize() -> Fallible<()> {
        assert_eq!(serde_json::to_string(&CardStatus::ToLearn)?, "\"to_learn\"");
        let status: CardStatus = serde_json::from_str("\"learned\"")?;
        assert_eq!(status, CardStatus::Learned);
        Ok(())
    }

    #[test]
    fn test_promote_and_demote_saturate() {
        assert_eq!(CardStatus::ToLearn.promoted(), CardStatus::Known);
        assert_eq!(CardStatus::Learned.promoted(), CardStatus::Learned);
        assert_eq!(CardStatus::Learned.demoted(), CardStatus::Known);
        assert_eq!(CardStatus::ToLearn.demoted(), CardStatus::ToLearn);
    }
}
