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

use chrono::DateTime;
use chrono::Local;
use memocards_core::Verdict;

/// How many swipes went each way.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct VerdictTally {
    pub left: usize,
    pub right: usize,
    pub down: usize,
    pub up: usize,
}

impl VerdictTally {
    pub fn record(&mut self, verdict: Verdict) {
        match verdict {
            Verdict::Left => self.left += 1,
            Verdict::Right => self.right += 1,
            Verdict::Down => self.down += 1,
            Verdict::Up => self.up += 1,
        }
    }

    pub fn get(&self, verdict: Verdict) -> usize {
        match verdict {
            Verdict::Left => self.left,
            Verdict::Right => self.right,
            Verdict::Down => self.down,
            Verdict::Up => self.up,
        }
    }

    pub fn total(&self) -> usize {
        self.left + self.right + self.down + self.up
    }
}

#[derive(Clone, Debug)]
pub struct ReviewSummary {
    pub started_at: DateTime<Local>,
    pub finished_at: DateTime<Local>,
    /// Cards in the queue.
    pub total: usize,
    /// Cards swiped away.
    pub reviewed: usize,
    pub completed: bool,
    pub tally: VerdictTally,
    /// Status updates that reached the database.
    pub status_writes: usize,
}

impl Display for ReviewSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let outcome = if self.completed {
            "all cards completed"
        } else {
            "session interrupted"
        };
        writeln!(
            f,
            "Reviewed {} of {} cards ({outcome}).",
            self.reviewed, self.total
        )?;
        let counts: Vec<String> = Verdict::ALL
            .iter()
            .filter(|v| **v != Verdict::Up || self.tally.up > 0)
            .map(|v| format!("{}: {}", v.label(), self.tally.get(*v)))
            .collect();
        writeln!(f, "  {}", counts.join("  "))?;
        writeln!(f, "Saved {} status changes.", self.status_writes)?;
        write!(
            f,
            "Started {}, finished {}.",
            self.started_at.format("%Y-%m-%d %H:%M:%S"),
            self.finished_at.format("%H:%M:%S")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tally() {
        let mut tally = VerdictTally::default();
        for v in [Verdict::Right, Verdict::Right, Verdict::Down] {
            tally.record(v);
        }
        assert_eq!(tally.get(Verdict::Right), 2);
        assert_eq!(tally.get(Verdict::Left), 0);
        assert_eq!(tally.total(), 3);
    }

    #[test]
    fn test_display() {
        let now = Local::now();
        let mut tally = VerdictTally::default();
        tally.record(Verdict::Left);
        let summary = ReviewSummary {
            started_at: now,
            finished_at: now,
            total: 3,
            reviewed: 1,
            completed: false,
            tally,
            status_writes: 0,
        };
        let text = summary.to_string();
        assert!(text.starts_with("Reviewed 1 of 3 cards (session interrupted)."));
        assert!(text.contains("Don't Know: 1"));
        assert!(!text.contains("Learned"));
    }
}
