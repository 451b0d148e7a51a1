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

use std::io::BufRead;
use std::thread;
use std::time::Duration;

use memocards_core::CardStatus;
use memocards_core::ReviewConfig;
use memocards_core::ReviewSession;
use memocards_core::VerdictPolicy;
use tokio::signal::ctrl_c;
use tokio::spawn;
use tokio::sync::mpsc::Sender;
use tokio::sync::mpsc::channel;

use crate::error::Fallible;
use crate::review::controller::Change;
use crate::review::controller::ReviewController;
use crate::review::input::ReviewEvent;
use crate::review::input::parse_event;
use crate::review::run_session;
use crate::review::summary::ReviewSummary;
use crate::store::CardStore;

pub struct ReviewOptions {
    pub config: ReviewConfig,
    pub policy: VerdictPolicy,
    /// Only review cards with this status.
    pub status: Option<CardStatus>,
}

pub async fn review_cards(store: &CardStore, options: ReviewOptions) -> Fallible<ReviewSummary> {
    let queue: Vec<_> = store
        .cards()
        .into_iter()
        .filter(|card| options.status.is_none_or(|status| card.status == status))
        .collect();
    if queue.is_empty() {
        println!("No cards to review.");
    } else {
        println!("{HELP}");
    }
    let controller = ReviewController::new(queue, options.config, options.policy, store.clone());
    let (tx, rx) = channel(16);
    let input = tx.clone();
    // Blocking stdin reads stay off the runtime.
    thread::spawn(move || read_events(input));
    spawn(async move {
        if ctrl_c().await.is_ok() {
            let _ = tx.send(ReviewEvent::Quit).await;
        }
    });
    let summary = run_session(controller, rx, |session, change| {
        if let Some(text) = render(session, change) {
            println!("{text}");
        }
    })
    .await;
    println!("{summary}");
    Ok(summary)
}

const HELP: &str = "Commands: tap, drag DX DY, release, right, left, down, up, quit.";

fn read_events(tx: Sender<ReviewEvent>) {
    for line in std::io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                log::error!("Failed to read input: {e}");
                break;
            }
        };
        match parse_event(&line) {
            Ok(Some(event)) => {
                if tx.blocking_send(event).is_err() {
                    break;
                }
            }
            Ok(None) => {}
            Err(e) => eprintln!("{e}"),
        }
    }
}

/// What to print after `change`. `None` when nothing visible changed.
pub fn render(session: &ReviewSession, change: Change) -> Option<String> {
    match change {
        Change::Ignored => None,
        Change::Swiped(verdict) => Some(format!("{} ({verdict})", verdict.label())),
        Change::Dragged => {
            let view = session.top_view(Duration::ZERO)?;
            let i = view.indicators;
            Some(format!(
                "offset ({:.0}, {:.0})  rotation {:.1}  left {:.2}  right {:.2}  down {:.2}  up {:.2}",
                view.offset.x, view.offset.y, view.rotation, i.left, i.right, i.down, i.up
            ))
        }
        Change::Started | Change::Revealed | Change::SnappedBack | Change::Advanced => {
            if session.is_completed() {
                return Some("All cards reviewed.".to_string());
            }
            let card = session.current_top_card()?;
            let position = format!("[{}/{}]", session.cursor() + 1, session.len());
            if session.is_revealed() {
                let mut text = format!("{position} {} / {}", card.front, card.back);
                if !card.details.is_empty() {
                    text.push_str(&format!("\n    {}", card.details));
                }
                Some(text)
            } else {
                Some(format!("{position} {}  (tap to reveal)", card.front))
            }
        }
    }
}
