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

//! The swipe-to-review engine.
//!
//! A [`session::ReviewSession`] walks a fixed queue of cards. Only the card
//! on top of the stack reacts to input; a drag is classified on release,
//! the card flies off screen, and once the caller reports that the exit
//! animation has finished the next card is promoted. The engine never
//! touches storage: it reports verdicts and leaves the status update to the
//! caller's [`policy::VerdictPolicy`].

pub mod gesture;
pub mod policy;
pub mod session;

use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;

use crate::error::Fallible;
use crate::error::fail;

#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewConfig {
    /// Minimum travel on an axis for a swipe to count, on both axes.
    pub swipe_threshold: f32,
    /// How far off screen a swiped card is thrown.
    pub exit_distance: f32,
    /// Duration of the exit animation in milliseconds.
    pub animation_ms: u64,
    /// Degrees of tilt per unit of horizontal travel.
    pub rotation_factor: f32,
    /// Number of cards rendered in the stack, including the top card.
    pub stack_depth: usize,
    /// When set, the back of a card is hidden until it is tapped, and the
    /// card cannot be swiped before that.
    pub flip_before_swipe: bool,
    /// Whether an upward swipe is a fourth verdict.
    pub allow_up: bool,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            swipe_threshold: 50.0,
            exit_distance: 2000.0,
            animation_ms: 600,
            rotation_factor: 0.1,
            stack_depth: 3,
            flip_before_swipe: false,
            allow_up: false,
        }
    }
}

impl ReviewConfig {
    pub fn animation(&self) -> Duration {
        Duration::from_millis(self.animation_ms)
    }

    /// Reject settings under which a session could never advance or would
    /// render nothing.
    pub fn validate(&self) -> Fallible<()> {
        if !(self.swipe_threshold.is_finite() && self.swipe_threshold > 0.0) {
            return fail(format!(
                "swipe_threshold must be a positive number, got {}",
                self.swipe_threshold
            ));
        }
        if !(self.exit_distance.is_finite() && self.exit_distance > 0.0) {
            return fail(format!(
                "exit_distance must be a positive number, got {}",
                self.exit_distance
            ));
        }
        if !self.rotation_factor.is_finite() {
            return fail(format!(
                "rotation_factor must be a number, got {}",
                self.rotation_factor
            ));
        }
        if self.stack_depth == 0 {
            return fail("stack_depth must be at least 1");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() -> Fallible<()> {
        ReviewConfig::default().validate()
    }

    #[test]
    fn test_invalid_configs() {
        let bad = [
            ReviewConfig {
                swipe_threshold: 0.0,
                ..ReviewConfig::default()
            },
            ReviewConfig {
                swipe_threshold: -50.0,
                ..ReviewConfig::default()
            },
            ReviewConfig {
                swipe_threshold: f32::NAN,
                ..ReviewConfig::default()
            },
            ReviewConfig {
                exit_distance: -2000.0,
                ..ReviewConfig::default()
            },
            ReviewConfig {
                rotation_factor: f32::INFINITY,
                ..ReviewConfig::default()
            },
            ReviewConfig {
                stack_depth: 0,
                ..ReviewConfig::default()
            },
        ];
        for config in bad {
            assert!(config.validate().is_err(), "{config:?}");
        }
    }
}
