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

use chrono::DateTime;
use chrono::Local;
use memocards_core::AnimationTicket;
use memocards_core::Card;
use memocards_core::ReviewConfig;
use memocards_core::ReviewSession;
use memocards_core::Verdict;
use memocards_core::VerdictPolicy;
use memocards_core::review::session::TopCard;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::mpsc::unbounded_channel;
use tokio::task::JoinSet;

use crate::db::StoreError;
use crate::review::input::ReviewEvent;
use crate::review::summary::ReviewSummary;
use crate::review::summary::VerdictTally;
use crate::review::timer::AnimationTimer;
use crate::store::CardStore;

/// What an input event did to the session.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Change {
    Started,
    Revealed,
    Dragged,
    SnappedBack,
    Swiped(Verdict),
    /// An exit animation finished and the next card is on top.
    Advanced,
    Ignored,
}

/// Drives one review session: feeds input into the engine, writes status
/// changes in the background, and times the exit animations.
pub struct ReviewController {
    session: ReviewSession,
    store: CardStore,
    policy: VerdictPolicy,
    timer: Option<AnimationTimer>,
    done_tx: UnboundedSender<AnimationTicket>,
    done_rx: UnboundedReceiver<AnimationTicket>,
    /// Each task yields whether its write was applied.
    writes: JoinSet<bool>,
    tally: VerdictTally,
    started_at: DateTime<Local>,
}

impl ReviewController {
    pub fn new(
        queue: Vec<Card>,
        config: ReviewConfig,
        policy: VerdictPolicy,
        store: CardStore,
    ) -> Self {
        log::debug!("Starting review session with {} cards", queue.len());
        let (done_tx, done_rx) = unbounded_channel();
        Self {
            session: ReviewSession::start(queue, config),
            store,
            policy,
            timer: None,
            done_tx,
            done_rx,
            writes: JoinSet::new(),
            tally: VerdictTally::default(),
            started_at: Local::now(),
        }
    }

    pub fn session(&self) -> &ReviewSession {
        &self.session
    }

    pub fn handle(&mut self, event: ReviewEvent) -> Change {
        match event {
            ReviewEvent::Tap => {
                if self.session.tap() {
                    Change::Revealed
                } else {
                    Change::Ignored
                }
            }
            ReviewEvent::Drag { dx, dy } => {
                self.session.handle_drag_delta(dx, dy);
                match self.session.top_card_state() {
                    TopCard::Dragging { .. } => Change::Dragged,
                    _ => Change::Ignored,
                }
            }
            ReviewEvent::Release => self.release(),
            ReviewEvent::Swipe(verdict) => {
                let reach = self.session.config().swipe_threshold * 1.2;
                let (dx, dy) = match verdict {
                    Verdict::Left => (-reach, 0.0),
                    Verdict::Right => (reach, 0.0),
                    Verdict::Down => (0.0, reach),
                    Verdict::Up => (0.0, -reach),
                };
                self.session.handle_drag_delta(dx, dy);
                self.release()
            }
            ReviewEvent::Quit => Change::Ignored,
        }
    }

    fn release(&mut self) -> Change {
        let was_dragging = matches!(self.session.top_card_state(), TopCard::Dragging { .. });
        match self.session.handle_drag_end() {
            Some(verdict) => {
                self.on_verdict(verdict);
                Change::Swiped(verdict)
            }
            None if was_dragging => Change::SnappedBack,
            None => Change::Ignored,
        }
    }

    fn on_verdict(&mut self, verdict: Verdict) {
        let Some(card) = self.session.current_top_card().cloned() else {
            return;
        };
        log::debug!("Card {} swiped {verdict}", card.id);
        self.tally.record(verdict);
        if let Some(status) = self.policy.resolve(&card, verdict) {
            let store = self.store.clone();
            // The next card does not wait for this write.
            self.writes.spawn(async move {
                match store.update_status(card.id, status).await {
                    Ok(()) => {
                        log::debug!("Card {} is now {status}", card.id);
                        true
                    }
                    Err(StoreError::NotFound(id)) => {
                        log::warn!("Card {id} was deleted during the review");
                        false
                    }
                    Err(e) => {
                        log::error!("Failed to save card {}: {e}", card.id);
                        false
                    }
                }
            });
        }
        if let Some(ticket) = self.session.pending_animation() {
            let after = self.session.config().animation();
            self.timer = Some(AnimationTimer::schedule(
                ticket,
                after,
                self.done_tx.clone(),
            ));
        }
    }

    /// Wait for the running exit animation to finish. Pending forever when
    /// nothing is animating.
    pub async fn next_completion(&mut self) -> Option<AnimationTicket> {
        self.done_rx.recv().await
    }

    /// Apply a finished animation. Returns whether the session advanced.
    pub fn complete(&mut self, ticket: AnimationTicket) -> bool {
        if !self.session.finish_animation(ticket) {
            log::debug!("Ignoring stale animation {ticket:?}");
            return false;
        }
        if self.timer.as_ref().is_some_and(|t| t.ticket() == ticket) {
            self.timer = None;
        }
        if self.session.is_completed() {
            log::debug!("Review session completed");
        }
        true
    }

    /// Tear the session down: cancel a running animation and wait for the
    /// outstanding status writes.
    pub async fn shutdown(mut self) -> ReviewSummary {
        if let Some(mut timer) = self.timer.take() {
            timer.cancel();
        }
        let mut status_writes = 0;
        while let Some(result) = self.writes.join_next().await {
            match result {
                Ok(true) => status_writes += 1,
                Ok(false) => {}
                Err(e) => log::error!("Status write task failed: {e}"),
            }
        }
        ReviewSummary {
            started_at: self.started_at,
            finished_at: Local::now(),
            total: self.session.len(),
            reviewed: self.session.cursor(),
            completed: self.session.is_completed(),
            tally: self.tally,
            status_writes,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use memocards_core::CardStatus;
    use memocards_core::SessionState;
    use tokio::time::sleep;

    use super::*;
    use crate::error::Fallible;
    use crate::helper::create_seeded_store;

    async fn controller(cards: &[(&str, &str, CardStatus)]) -> Fallible<ReviewController> {
        let store = create_seeded_store(cards).await?;
        let queue = store.cards();
        Ok(ReviewController::new(
            queue,
            ReviewConfig::default(),
            VerdictPolicy::default(),
            store,
        ))
    }

    #[tokio::test(start_paused = true)]
    async fn test_swipe_right_marks_known() -> Fallible<()> {
        let mut c = controller(&[
            ("cat", "chat", CardStatus::ToLearn),
            ("dog", "chien", CardStatus::ToLearn),
        ])
        .await?;
        let id = c.session().visible_cards()[0].id;
        assert_eq!(
            c.handle(ReviewEvent::Drag { dx: 80.0, dy: 5.0 }),
            Change::Dragged
        );
        assert_eq!(c.handle(ReviewEvent::Release), Change::Swiped(Verdict::Right));
        // Still on the first card until the animation ends.
        assert_eq!(c.session().cursor(), 0);
        let ticket = c.next_completion().await;
        assert!(ticket.is_some_and(|t| c.complete(t)));
        assert_eq!(c.session().state(), SessionState::Active { cursor: 1 });
        let store = c.store.clone();
        let summary = c.shutdown().await;
        assert_eq!(summary.status_writes, 1);
        assert_eq!(summary.tally.right, 1);
        assert_eq!(summary.reviewed, 1);
        assert!(!summary.completed);
        assert_eq!(store.get(id).map(|card| card.status), Some(CardStatus::Known));
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn test_short_drag_snaps_back() -> Fallible<()> {
        let mut c = controller(&[("cat", "chat", CardStatus::ToLearn)]).await?;
        c.handle(ReviewEvent::Drag { dx: 30.0, dy: 0.0 });
        assert_eq!(c.handle(ReviewEvent::Release), Change::SnappedBack);
        assert_eq!(c.handle(ReviewEvent::Release), Change::Ignored);
        assert_eq!(c.session().cursor(), 0);
        let summary = c.shutdown().await;
        assert_eq!(summary.tally.total(), 0);
        assert_eq!(summary.status_writes, 0);
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn test_skip_does_not_write() -> Fallible<()> {
        let mut c = controller(&[("cat", "chat", CardStatus::Known)]).await?;
        assert_eq!(
            c.handle(ReviewEvent::Swipe(Verdict::Down)),
            Change::Swiped(Verdict::Down)
        );
        if let Some(ticket) = c.next_completion().await {
            assert!(c.complete(ticket));
        }
        assert!(c.session().is_completed());
        let summary = c.shutdown().await;
        assert!(summary.completed);
        assert_eq!(summary.tally.down, 1);
        assert_eq!(summary.status_writes, 0);
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_mid_animation() -> Fallible<()> {
        let mut c = controller(&[("cat", "chat", CardStatus::ToLearn)]).await?;
        let id = c.session().visible_cards()[0].id;
        c.handle(ReviewEvent::Swipe(Verdict::Right));
        sleep(Duration::from_millis(100)).await;
        let store = c.store.clone();
        let summary = c.shutdown().await;
        // The write was already dispatched; the advance never happened.
        assert_eq!(summary.status_writes, 1);
        assert_eq!(summary.reviewed, 0);
        assert!(!summary.completed);
        assert_eq!(store.get(id).map(|card| card.status), Some(CardStatus::Known));
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn test_card_deleted_during_review() -> Fallible<()> {
        let mut c = controller(&[("cat", "chat", CardStatus::ToLearn)]).await?;
        let id = c.session().visible_cards()[0].id;
        c.store.delete(id).await?;
        c.handle(ReviewEvent::Swipe(Verdict::Right));
        if let Some(ticket) = c.next_completion().await {
            c.complete(ticket);
        }
        let summary = c.shutdown().await;
        assert!(summary.completed);
        assert_eq!(summary.status_writes, 0);
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_queue() -> Fallible<()> {
        let mut c = controller(&[]).await?;
        assert!(c.session().is_completed());
        assert_eq!(c.handle(ReviewEvent::Tap), Change::Ignored);
        let summary = c.shutdown().await;
        assert_eq!(summary.total, 0);
        assert!(summary.completed);
        Ok(())
    }
}
