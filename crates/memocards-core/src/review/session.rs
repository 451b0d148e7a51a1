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

use std::time::Duration;

use serde::Serialize;

use crate::review::ReviewConfig;
use crate::review::gesture::Indicators;
use crate::review::gesture::Offset;
use crate::review::gesture::Verdict;
use crate::review::gesture::classify;
use crate::review::gesture::indicators;
use crate::review::gesture::rotation;
use crate::types::card::Card;
use crate::types::card::CardId;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SessionState {
    Active { cursor: usize },
    Completed,
}

/// Identifies one exit animation. Completing an animation requires the
/// ticket it was issued with, so a late or repeated completion is a no-op.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct AnimationTicket(u64);

impl AnimationTicket {
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Interaction state of the top card.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum TopCard {
    /// No finger down. `revealed` is whether the back is showing.
    Resting { revealed: bool },
    /// Finger down; `offset` is the accumulated travel.
    Dragging { offset: Offset },
    /// Flying off screen after a verdict. Input is ignored.
    Animating {
        verdict: Verdict,
        from: Offset,
        ticket: AnimationTicket,
    },
}

/// One swiped card, in the order the swipes happened.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
pub struct Swipe {
    pub card: CardId,
    pub verdict: Verdict,
}

/// What the top card looks like at a given moment.
#[derive(Clone, Copy, PartialEq, Debug, Serialize)]
pub struct CardView {
    pub offset: Offset,
    /// Degrees.
    pub rotation: f32,
    pub indicators: Indicators,
    pub revealed: bool,
    /// False while the card is animating away.
    pub interactive: bool,
}

pub struct ReviewSession {
    queue: Vec<Card>,
    cursor: usize,
    top: TopCard,
    config: ReviewConfig,
    issued_tickets: u64,
    history: Vec<Swipe>,
}

impl ReviewSession {
    /// Start reviewing `queue` from the first card. An empty queue gives a
    /// session that is already completed.
    pub fn start(queue: Vec<Card>, config: ReviewConfig) -> Self {
        Self {
            queue,
            cursor: 0,
            top: fresh_top_card(&config),
            config,
            issued_tickets: 0,
            history: Vec::new(),
        }
    }

    pub fn config(&self) -> &ReviewConfig {
        &self.config
    }

    pub fn state(&self) -> SessionState {
        if self.is_completed() {
            SessionState::Completed
        } else {
            SessionState::Active {
                cursor: self.cursor,
            }
        }
    }

    pub fn is_completed(&self) -> bool {
        self.cursor >= self.queue.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.queue.len() - self.cursor
    }

    /// Fraction of the queue already swiped away, `1.0` for an empty queue.
    pub fn progress(&self) -> f64 {
        if self.queue.is_empty() {
            1.0
        } else {
            self.cursor as f64 / self.queue.len() as f64
        }
    }

    pub fn current_top_card(&self) -> Option<&Card> {
        self.queue.get(self.cursor)
    }

    /// The stack as rendered, top card first. Only the first one is
    /// interactive.
    pub fn visible_cards(&self) -> &[Card] {
        let end = (self.cursor + self.config.stack_depth).min(self.queue.len());
        &self.queue[self.cursor.min(end)..end]
    }

    pub fn top_card_state(&self) -> TopCard {
        self.top
    }

    pub fn history(&self) -> &[Swipe] {
        &self.history
    }

    pub fn is_revealed(&self) -> bool {
        !matches!(self.top, TopCard::Resting { revealed: false })
    }

    /// A tap turns an unrevealed card over. Returns whether anything
    /// changed.
    pub fn tap(&mut self) -> bool {
        if self.is_completed() {
            return false;
        }
        match self.top {
            TopCard::Resting { revealed: false } => {
                self.top = TopCard::Resting { revealed: true };
                true
            }
            _ => false,
        }
    }

    /// Accumulate pointer travel. Ignored while the card is hidden or
    /// animating.
    pub fn handle_drag_delta(&mut self, dx: f32, dy: f32) {
        if self.is_completed() {
            return;
        }
        let delta = Offset::new(dx, dy);
        self.top = match self.top {
            TopCard::Resting { revealed: true } => TopCard::Dragging { offset: delta },
            TopCard::Dragging { offset } => TopCard::Dragging {
                offset: offset + delta,
            },
            other => other,
        };
    }

    /// The finger was lifted. On a verdict the card starts animating away
    /// and the caller should schedule [`ReviewSession::finish_animation`]
    /// after [`ReviewConfig::animation`]; otherwise the card snaps back.
    pub fn handle_drag_end(&mut self) -> Option<Verdict> {
        let TopCard::Dragging { offset } = self.top else {
            return None;
        };
        let card = self.current_top_card()?.id;
        match classify(offset, self.config.swipe_threshold, self.config.allow_up) {
            Some(verdict) => {
                self.issued_tickets += 1;
                self.top = TopCard::Animating {
                    verdict,
                    from: offset,
                    ticket: AnimationTicket(self.issued_tickets),
                };
                self.history.push(Swipe { card, verdict });
                Some(verdict)
            }
            None => {
                self.top = TopCard::Resting { revealed: true };
                None
            }
        }
    }

    /// The ticket of the running exit animation, if any.
    pub fn pending_animation(&self) -> Option<AnimationTicket> {
        match self.top {
            TopCard::Animating { ticket, .. } => Some(ticket),
            _ => None,
        }
    }

    /// The exit animation identified by `ticket` has finished: advance to
    /// the next card. Returns false, and does nothing, for any ticket that
    /// is not the running animation's.
    pub fn finish_animation(&mut self, ticket: AnimationTicket) -> bool {
        if self.pending_animation() != Some(ticket) {
            return false;
        }
        self.cursor += 1;
        // Whatever the promoted card was doing as a backdrop is discarded.
        self.top = fresh_top_card(&self.config);
        true
    }

    /// The top card's appearance, `elapsed` into the exit animation when one
    /// is running.
    pub fn top_view(&self, elapsed: Duration) -> Option<CardView> {
        self.current_top_card()?;
        let threshold = self.config.swipe_threshold;
        let allow_up = self.config.allow_up;
        let view = match self.top {
            TopCard::Resting { revealed } => CardView {
                offset: Offset::ZERO,
                rotation: 0.0,
                indicators: Indicators::default(),
                revealed,
                interactive: true,
            },
            TopCard::Dragging { offset } => CardView {
                offset,
                rotation: rotation(offset, self.config.rotation_factor),
                indicators: indicators(offset, threshold, allow_up),
                revealed: true,
                interactive: true,
            },
            TopCard::Animating { verdict, from, .. } => {
                let total = self.config.animation().as_secs_f32();
                let t = if total > 0.0 {
                    elapsed.as_secs_f32() / total
                } else {
                    1.0
                };
                let target = verdict.exit_target(self.config.exit_distance);
                CardView {
                    offset: from.lerp(target, t),
                    rotation: rotation(from, self.config.rotation_factor),
                    indicators: indicators(from, threshold, allow_up),
                    revealed: true,
                    interactive: false,
                }
            }
        };
        Some(view)
    }
}

fn fresh_top_card(config: &ReviewConfig) -> TopCard {
    TopCard::Resting {
        revealed: !config.flip_before_swipe,
    }
}
