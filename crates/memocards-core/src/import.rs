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

//! Bulk import of cards from pasted text.
//!
//! One card per line. Fields are separated by the full-width space
//! (U+3000), which is what East Asian input methods produce and what rarely
//! appears inside a field:
//!
//! ```text
//! front　back　details
//! ```
//!
//! The details field is optional. Lines with fewer than two fields are
//! skipped without a diagnostic; the caller shows how many cards were found.

use crate::types::card::CardDraft;
use crate::types::status::CardStatus;

/// The full-width space.
pub const FIELD_SEPARATOR: char = '\u{3000}';

pub fn parse_import(text: &str) -> Vec<CardDraft> {
    text.split('\n').filter_map(parse_record).collect()
}

fn parse_record(line: &str) -> Option<CardDraft> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let mut fields = line.split(FIELD_SEPARATOR);
    let front = fields.next()?;
    let back = fields.next()?;
    // Anything after the third field is ignored.
    let details = fields.next().unwrap_or("");
    Some(CardDraft {
        front: front.to_string(),
        back: back.to_string(),
        details: details.to_string(),
        status: CardStatus::ToLearn,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_line_dropped() {
        let drafts = parse_import("cat\u{3000}chat\u{3000}animal\nbadrow");
        assert_eq!(
            drafts,
            vec![CardDraft::new("cat", "chat").with_details("animal")]
        );
    }

    #[test]
    fn test_details_optional() {
        let drafts = parse_import("dog\u{3000}chien");
        assert_eq!(drafts, vec![CardDraft::new("dog", "chien")]);
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_import("").is_empty());
        assert!(parse_import("\n\n\n").is_empty());
    }

    #[test]
    fn test_ascii_space_is_not_a_separator() {
        assert!(parse_import("cat chat animal").is_empty());
    }

    #[test]
    fn test_crlf_and_extra_fields() {
        let drafts = parse_import("a\u{3000}b\u{3000}c\u{3000}d\r\ne\u{3000}f\r\n");
        assert_eq!(
            drafts,
            vec![
                CardDraft::new("a", "b").with_details("c"),
                CardDraft::new("e", "f"),
            ]
        );
    }

    #[test]
    fn test_empty_fields_are_kept() {
        let drafts = parse_import("\u{3000}");
        assert_eq!(drafts, vec![CardDraft::new("", "")]);
    }

    #[test]
    fn test_imported_cards_are_to_learn() {
        let drafts = parse_import("x\u{3000}y\nz\u{3000}w");
        assert!(drafts.iter().all(|d| d.status == CardStatus::ToLearn));
    }
}
