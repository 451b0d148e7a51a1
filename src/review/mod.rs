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

pub mod controller;
pub mod input;
pub mod summary;
pub mod timer;

use memocards_core::ReviewSession;
use tokio::select;
use tokio::sync::mpsc::Receiver;

use crate::review::controller::Change;
use crate::review::controller::ReviewController;
use crate::review::input::ReviewEvent;
use crate::review::summary::ReviewSummary;

/// The review event loop. Input events and animation completions are
/// handled one at a time, in arrival order, until the queue is exhausted,
/// `Quit` arrives, or the input closes.
pub async fn run_session(
    mut controller: ReviewController,
    mut events: Receiver<ReviewEvent>,
    mut observe: impl FnMut(&ReviewSession, Change),
) -> ReviewSummary {
    observe(controller.session(), Change::Started);
    while !controller.session().is_completed() {
        select! {
            event = events.recv() => match event {
                None | Some(ReviewEvent::Quit) => break,
                Some(event) => {
                    let change = controller.handle(event);
                    observe(controller.session(), change);
                }
            },
            Some(ticket) = controller.next_completion() => {
                if controller.complete(ticket) {
                    observe(controller.session(), Change::Advanced);
                }
            }
        }
    }
    controller.shutdown().await
}
