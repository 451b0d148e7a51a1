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

use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use memocards_core::CardDraft;
use memocards_core::CardId;
use memocards_core::CardStatus;

use crate::catalog::Catalog;
use crate::cmd::add::add_card;
use crate::cmd::delete::clear_cards;
use crate::cmd::delete::delete_card;
use crate::cmd::edit::CardEdit;
use crate::cmd::edit::edit_card;
use crate::cmd::export::export_cards;
use crate::cmd::import::import_cards;
use crate::cmd::import::read_import_text;
use crate::cmd::list::list_cards;
use crate::cmd::list::print_cards;
use crate::cmd::review::ReviewOptions;
use crate::cmd::review::review_cards;
use crate::cmd::stats::StatsFormat;
use crate::cmd::stats::print_stats;
use crate::config::Config;
use crate::error::Fallible;
use crate::store::CardStore;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the config file. By default, `memocards.toml` in the current directory is used if it exists.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Path to the card database. Overrides the config file. Default is `memocards.db`.
    #[arg(long, global = true)]
    database: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Add a single card.
    Add {
        front: String,
        back: String,
        /// Extra notes shown with the answer.
        #[arg(long, default_value = "")]
        details: String,
        #[arg(long, default_value_t = CardStatus::ToLearn)]
        status: CardStatus,
    },
    /// Import cards, one per line, fields separated by an ideographic space (U+3000).
    Import {
        /// File to import. By default, the text is read from standard input.
        file: Option<PathBuf>,
        /// Only report what would be imported.
        #[arg(long)]
        dry_run: bool,
    },
    /// List cards matching a query, grouped by status.
    List {
        /// Case-insensitive text to look for in the front, back and details.
        #[arg(long, default_value = "")]
        query: String,
    },
    /// Print the number of cards in each status.
    Stats {
        /// Which output format to use.
        #[arg(long, default_value_t = StatsFormat::Text)]
        format: StatsFormat,
    },
    /// Change the fields of a card.
    Edit {
        id: CardId,
        #[arg(long)]
        front: Option<String>,
        #[arg(long)]
        back: Option<String>,
        #[arg(long)]
        details: Option<String>,
        #[arg(long)]
        status: Option<CardStatus>,
    },
    /// Delete a card.
    Delete { id: CardId },
    /// Delete every card.
    Clear,
    /// Export all cards as JSON.
    Export {
        /// Optional path to the output file. By default, the output is printed to stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Review cards by swiping.
    Review {
        /// Hide the answer until the card is tapped.
        #[arg(long)]
        flip: bool,
        /// Only review cards with this status.
        #[arg(long)]
        status: Option<CardStatus>,
    },
}

pub async fn entrypoint() -> Fallible<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    let path = config.database_path(cli.database);
    let store = CardStore::open(&path)?;
    match cli.command {
        Command::Add {
            front,
            back,
            details,
            status,
        } => {
            let draft = CardDraft::new(front, back)
                .with_details(details)
                .with_status(status);
            add_card(&store, draft).await?;
        }
        Command::Import { file, dry_run } => {
            let text = read_import_text(file.as_deref()).await?;
            import_cards(&store, &text, dry_run).await?;
        }
        Command::List { query } => {
            let cards = list_cards(&Catalog::new(store), query).await?;
            print_cards(&cards);
        }
        Command::Stats { format } => {
            print_stats(&Catalog::new(store), format).await?;
        }
        Command::Edit {
            id,
            front,
            back,
            details,
            status,
        } => {
            let edit = CardEdit {
                front,
                back,
                details,
                status,
            };
            edit_card(&store, id, edit).await?;
        }
        Command::Delete { id } => {
            delete_card(&store, id).await?;
        }
        Command::Clear => {
            clear_cards(&store).await?;
        }
        Command::Export { output } => {
            export_cards(&store, output.as_deref()).await?;
        }
        Command::Review { flip, status } => {
            let mut review = config.review;
            if flip {
                review.flip_before_swipe = true;
            }
            let options = ReviewOptions {
                config: review,
                policy: config.verdicts,
                status,
            };
            review_cards(&store, options).await?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_review() {
        let cli = Cli::try_parse_from([
            "memocards",
            "review",
            "--flip",
            "--status",
            "known",
            "--database",
            "x.db",
        ]);
        let Ok(cli) = cli else {
            panic!("review arguments should parse");
        };
        assert_eq!(cli.database, Some(PathBuf::from("x.db")));
        match cli.command {
            Command::Review { flip, status } => {
                assert!(flip);
                assert_eq!(status, Some(CardStatus::Known));
            }
            _ => panic!("expected review"),
        }
    }

    #[test]
    fn test_bad_status_rejected() {
        assert!(Cli::try_parse_from(["memocards", "add", "a", "b", "--status", "mastered"]).is_err());
    }
}
