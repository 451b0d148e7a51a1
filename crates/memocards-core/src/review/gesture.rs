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

//! Turning a drag into a verdict, and the visual feedback while dragging.
//!
//! Offsets are in device-independent units. Rightward finger motion
//! increases `x`, downward motion increases `y`.

use std::fmt::Display;
use std::fmt::Formatter;
use std::ops::Add;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;
use crate::error::fail;

#[derive(Clone, Copy, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct Offset {
    pub x: f32,
    pub y: f32,
}

impl Offset {
    pub const ZERO: Offset = Offset { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Linear interpolation towards `to`; `t` is clamped to `[0, 1]`.
    pub fn lerp(self, to: Offset, t: f32) -> Offset {
        let t = t.clamp(0.0, 1.0);
        Offset {
            x: self.x + (to.x - self.x) * t,
            y: self.y + (to.y - self.y) * t,
        }
    }
}

impl Add for Offset {
    type Output = Offset;

    fn add(self, rhs: Offset) -> Offset {
        Offset::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// The outcome of a completed swipe.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// "Don't know".
    Left,
    /// "Know".
    Right,
    /// "Skip".
    Down,
    /// Only produced when upward swipes are enabled.
    Up,
}

impl Verdict {
    pub const ALL: [Verdict; 4] = [Verdict::Left, Verdict::Right, Verdict::Down, Verdict::Up];

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Left => "left",
            Verdict::Right => "right",
            Verdict::Down => "down",
            Verdict::Up => "up",
        }
    }

    /// The caption of the indicator shown while swiping this way.
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Left => "Don't Know",
            Verdict::Right => "Know",
            Verdict::Down => "Skip",
            Verdict::Up => "Learned",
        }
    }

    /// Where the card ends up once it has flown off screen.
    pub fn exit_target(&self, distance: f32) -> Offset {
        match self {
            Verdict::Left => Offset::new(-distance, 0.0),
            Verdict::Right => Offset::new(distance, 0.0),
            Verdict::Down => Offset::new(0.0, distance),
            Verdict::Up => Offset::new(0.0, -distance),
        }
    }
}

impl Display for Verdict {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Verdict {
    type Err = ErrorReport;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Verdict::Left),
            "right" => Ok(Verdict::Right),
            "down" => Ok(Verdict::Down),
            "up" => Ok(Verdict::Up),
            _ => fail(format!("invalid verdict: '{s}'")),
        }
    }
}

/// Classify a released drag.
///
/// A direction wins only when its axis is past the threshold and the other
/// axis is not. A release with both axes past the threshold has no verdict.
pub fn classify(offset: Offset, threshold: f32, allow_up: bool) -> Option<Verdict> {
    let Offset { x, y } = offset;
    if x < -threshold && y.abs() < threshold {
        Some(Verdict::Left)
    } else if x > threshold && y.abs() < threshold {
        Some(Verdict::Right)
    } else if y > threshold && x.abs() < threshold {
        Some(Verdict::Down)
    } else if allow_up && y < -threshold && x.abs() < threshold {
        Some(Verdict::Up)
    } else {
        None
    }
}

/// Opacity of each swipe indicator, in `[0, 1]`.
#[derive(Clone, Copy, PartialEq, Debug, Default, Serialize)]
pub struct Indicators {
    pub left: f32,
    pub right: f32,
    pub down: f32,
    pub up: f32,
}

impl Indicators {
    pub fn get(&self, verdict: Verdict) -> f32 {
        match verdict {
            Verdict::Left => self.left,
            Verdict::Right => self.right,
            Verdict::Down => self.down,
            Verdict::Up => self.up,
        }
    }
}

/// Horizontal indicators fade in with horizontal travel and fade out with
/// competing vertical travel; vertical indicators the other way round.
pub fn indicators(offset: Offset, threshold: f32, allow_up: bool) -> Indicators {
    let horizontal = (offset.x.abs() / threshold).clamp(0.0, 1.0);
    let vertical = (offset.y.abs() / threshold).clamp(0.0, 1.0);
    let sideways = horizontal * (1.0 - vertical);
    let upright = vertical * (1.0 - horizontal);
    Indicators {
        left: if offset.x < 0.0 { sideways } else { 0.0 },
        right: if offset.x > 0.0 { sideways } else { 0.0 },
        down: if offset.y > 0.0 { upright } else { 0.0 },
        up: if allow_up && offset.y < 0.0 {
            upright
        } else {
            0.0
        },
    }
}

/// Tilt in degrees, proportional to horizontal travel.
pub fn rotation(offset: Offset, factor: f32) -> f32 {
    offset.x * factor
}
