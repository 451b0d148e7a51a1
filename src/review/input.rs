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

use memocards_core::Verdict;

use crate::error::Fallible;
use crate::error::fail;

/// One input event for the review loop.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum ReviewEvent {
    Tap,
    Drag { dx: f32, dy: f32 },
    Release,
    /// Keyboard shortcut for a full drag in one direction plus release.
    Swipe(Verdict),
    Quit,
}

/// Parse a line typed at the review prompt.
///
/// ```text
/// tap | t                  turn the card over
/// drag DX DY | d DX DY     move the finger
/// release | r              lift the finger
/// right | left | down | up swipe all the way
/// quit | q                 end the session
/// ```
///
/// A blank line is `None`.
pub fn parse_event(line: &str) -> Fallible<Option<ReviewEvent>> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(None);
    };
    let event = match command.to_lowercase().as_str() {
        "tap" | "t" => ReviewEvent::Tap,
        "release" | "r" => ReviewEvent::Release,
        "quit" | "q" | "exit" => ReviewEvent::Quit,
        "drag" | "d" => {
            let dx = parse_number(words.next())?;
            let dy = parse_number(words.next())?;
            ReviewEvent::Drag { dx, dy }
        }
        other => match other.parse::<Verdict>() {
            Ok(verdict) => ReviewEvent::Swipe(verdict),
            Err(_) => return fail(format!("unknown command: '{other}'")),
        },
    };
    if let Some(extra) = words.next() {
        return fail(format!("unexpected argument: '{extra}'"));
    }
    Ok(Some(event))
}

fn parse_number(word: Option<&str>) -> Fallible<f32> {
    match word {
        Some(word) => match word.parse::<f32>() {
            Ok(n) if n.is_finite() => Ok(n),
            _ => fail(format!("not a number: '{word}'")),
        },
        None => fail("drag needs two numbers: drag DX DY"),
    }
}
