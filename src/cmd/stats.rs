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

use clap::ValueEnum;
use memocards_core::CardCounts;
use memocards_core::CardStatus;

use crate::catalog::Catalog;
use crate::error::ErrorReport;
use crate::error::Fallible;

#[derive(ValueEnum, Clone, Copy, PartialEq, Debug)]
pub enum StatsFormat {
    Text,
    Json,
}

impl Display for StatsFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StatsFormat::Text => write!(f, "text"),
            StatsFormat::Json => write!(f, "json"),
        }
    }
}

/// The first published counts, past the zero placeholder.
pub async fn collection_counts(catalog: &Catalog) -> Fallible<CardCounts> {
    let mut counts = catalog.counts();
    counts
        .changed()
        .await
        .map_err(|_| ErrorReport::new("catalog counts closed"))?;
    let latest = *counts.borrow();
    Ok(latest)
}

pub fn render_stats(counts: &CardCounts, format: StatsFormat) -> Fallible<String> {
    match format {
        StatsFormat::Text => {
            let mut out = String::new();
            for status in CardStatus::ALL {
                out.push_str(&format!("{:<10}{}\n", status.as_str(), counts.get(status)));
            }
            out.push_str(&format!("{:<10}{}", "total", counts.total()));
            Ok(out)
        }
        StatsFormat::Json => Ok(serde_json::to_string_pretty(counts)?),
    }
}

pub async fn print_stats(catalog: &Catalog, format: StatsFormat) -> Fallible<()> {
    let counts = collection_counts(catalog).await?;
    println!("{}", render_stats(&counts, format)?);
    Ok(())
}
