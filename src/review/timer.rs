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

use memocards_core::AnimationTicket;
use tokio::spawn;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::sleep;

/// Delivers an animation's ticket on `done` once its duration has elapsed,
/// unless cancelled first. Dropping the timer cancels it silently.
pub struct AnimationTimer {
    ticket: AnimationTicket,
    handle: Option<JoinHandle<()>>,
}

impl AnimationTimer {
    pub fn schedule(
        ticket: AnimationTicket,
        after: Duration,
        done: UnboundedSender<AnimationTicket>,
    ) -> Self {
        let handle = spawn(async move {
            sleep(after).await;
            // The receiver is gone only when the session was torn down.
            let _ = done.send(ticket);
        });
        Self {
            ticket,
            handle: Some(handle),
        }
    }

    pub fn ticket(&self) -> AnimationTicket {
        self.ticket
    }

    /// Stop the timer. Safe to call any number of times, and after the
    /// timer has fired.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            if !handle.is_finished() {
                log::debug!("Cancelling exit animation {:?}", self.ticket);
            }
            handle.abort();
        }
    }
}

impl Drop for AnimationTimer {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use memocards_core::Card;
    use memocards_core::CardDraft;
    use memocards_core::CardId;
    use memocards_core::ReviewConfig;
    use memocards_core::ReviewSession;
    use tokio::sync::mpsc::error::TryRecvError;
    use tokio::sync::mpsc::unbounded_channel;

    use super::*;

    fn ticket() -> AnimationTicket {
        let card = Card::from_draft(CardId::new(1), CardDraft::new("f", "b"));
        let mut session = ReviewSession::start(vec![card], ReviewConfig::default());
        session.handle_drag_delta(100.0, 0.0);
        session.handle_drag_end();
        session.pending_animation().unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_fires_after_duration() {
        let (tx, mut rx) = unbounded_channel();
        let ticket = ticket();
        let _timer = AnimationTimer::schedule(ticket, Duration::from_millis(600), tx);
        sleep(Duration::from_millis(599)).await;
        assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));
        sleep(Duration::from_millis(2)).await;
        assert_eq!(rx.recv().await, Some(ticket));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_suppresses_delivery() {
        let (tx, mut rx) = unbounded_channel();
        let mut timer = AnimationTimer::schedule(ticket(), Duration::from_millis(600), tx);
        sleep(Duration::from_millis(100)).await;
        timer.cancel();
        timer.cancel();
        sleep(Duration::from_secs(5)).await;
        // The aborted task dropped the only sender.
        assert_eq!(rx.try_recv(), Err(TryRecvError::Disconnected));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_after_firing_is_harmless() {
        let (tx, mut rx) = unbounded_channel();
        let ticket = ticket();
        let mut timer = AnimationTimer::schedule(ticket, Duration::from_millis(10), tx);
        assert_eq!(rx.recv().await, Some(ticket));
        timer.cancel();
        assert_eq!(timer.ticket(), ticket);
        assert_eq!(rx.recv().await, None);
    }
}
