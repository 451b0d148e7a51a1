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

use std::error::Error;
use std::fmt::Display;
use std::fmt::Formatter;
use std::path::Path;

use memocards_core::Card;
use memocards_core::CardDraft;
use memocards_core::CardCounts;
use memocards_core::CardId;
use memocards_core::CardStatus;
use memocards_core::ErrorReport;
use rusqlite::Connection;
use rusqlite::OptionalExtension;
use rusqlite::Row;
use rusqlite::params;
use rusqlite::types::Type;

const SCHEMA: &str = "
    create table if not exists cards (
        id integer primary key autoincrement,
        front text not null,
        back text not null,
        details text not null default '',
        status text not null default 'to_learn'
            check (status in ('to_learn', 'known', 'learned'))
    );
    create index if not exists cards_status on cards (status);
";

const SELECT_CARD: &str = "select id, front, back, details, status from cards";

#[derive(Debug)]
pub enum StoreError {
    /// No card has this id.
    NotFound(CardId),
    Sqlite(rusqlite::Error),
    /// The connection lock was poisoned, or a background write panicked.
    Background(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::NotFound(id) => write!(f, "card {id} not found"),
            StoreError::Sqlite(e) => write!(f, "database error: {e}"),
            StoreError::Background(msg) => write!(f, "storage failure: {msg}"),
        }
    }
}

impl Error for StoreError {}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        StoreError::Sqlite(value)
    }
}

impl From<StoreError> for ErrorReport {
    fn from(value: StoreError) -> Self {
        ErrorReport::new(value.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// The durable card table.
pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn open(path: &Path) -> StoreResult<Self> {
        log::debug!("Opening database at {}", path.display());
        Self::init(Connection::open(path)?)
    }

    pub fn in_memory() -> StoreResult<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> StoreResult<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    pub fn insert(&self, draft: &CardDraft) -> StoreResult<CardId> {
        self.conn.execute(
            "insert into cards (front, back, details, status) values (?1, ?2, ?3, ?4)",
            params![draft.front, draft.back, draft.details, draft.status.as_str()],
        )?;
        Ok(CardId::new(self.conn.last_insert_rowid()))
    }

    /// Insert all drafts in one transaction.
    pub fn insert_many(&mut self, drafts: &[CardDraft]) -> StoreResult<Vec<CardId>> {
        let tx = self.conn.transaction()?;
        let mut ids = Vec::with_capacity(drafts.len());
        {
            let mut stmt = tx.prepare(
                "insert into cards (front, back, details, status) values (?1, ?2, ?3, ?4)",
            )?;
            for draft in drafts {
                stmt.execute(params![
                    draft.front,
                    draft.back,
                    draft.details,
                    draft.status.as_str()
                ])?;
                ids.push(CardId::new(tx.last_insert_rowid()));
            }
        }
        tx.commit()?;
        Ok(ids)
    }

    pub fn update(&self, card: &Card) -> StoreResult<()> {
        let changed = self.conn.execute(
            "update cards set front = ?1, back = ?2, details = ?3, status = ?4 where id = ?5",
            params![
                card.front,
                card.back,
                card.details,
                card.status.as_str(),
                card.id.get()
            ],
        )?;
        found(changed, card.id)
    }

    pub fn update_status(&self, id: CardId, status: CardStatus) -> StoreResult<()> {
        let changed = self.conn.execute(
            "update cards set status = ?1 where id = ?2",
            params![status.as_str(), id.get()],
        )?;
        found(changed, id)
    }

    pub fn delete(&self, id: CardId) -> StoreResult<()> {
        let changed = self
            .conn
            .execute("delete from cards where id = ?1", params![id.get()])?;
        found(changed, id)
    }

    /// Delete every card, returning how many were deleted.
    pub fn delete_all(&self) -> StoreResult<usize> {
        Ok(self.conn.execute("delete from cards", [])?)
    }

    pub fn get(&self, id: CardId) -> StoreResult<Option<Card>> {
        let sql = format!("{SELECT_CARD} where id = ?1");
        Ok(self
            .conn
            .query_row(&sql, params![id.get()], read_card)
            .optional()?)
    }

    /// All cards in insertion order.
    pub fn all_cards(&self) -> StoreResult<Vec<Card>> {
        let sql = format!("{SELECT_CARD} order by id");
        let mut stmt = self.conn.prepare(&sql)?;
        let cards = stmt
            .query_map([], read_card)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(cards)
    }

    pub fn count_by_status(&self, status: CardStatus) -> StoreResult<usize> {
        let count: i64 = self.conn.query_row(
            "select count(*) from cards where status = ?1",
            params![status.as_str()],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    pub fn counts(&self) -> StoreResult<CardCounts> {
        let mut counts = CardCounts::default();
        for status in CardStatus::ALL {
            *counts.get_mut(status) = self.count_by_status(status)?;
        }
        Ok(counts)
    }
}

fn found(changed: usize, id: CardId) -> StoreResult<()> {
    if changed == 0 {
        Err(StoreError::NotFound(id))
    } else {
        Ok(())
    }
}

fn read_card(row: &Row) -> rusqlite::Result<Card> {
    let status: String = row.get(4)?;
    let status: CardStatus = status
        .parse()
        .map_err(|e: ErrorReport| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?;
    Ok(Card {
        id: CardId::new(row.get(0)?),
        front: row.get(1)?,
        back: row.get(2)?,
        details: row.get(3)?,
        status,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Fallible;
    use crate::helper::create_tmp_directory;

    #[test]
    fn test_insert_and_read_back() -> Fallible<()> {
        let db = Database::in_memory()?;
        let a = db.insert(&CardDraft::new("cat", "chat").with_details("animal"))?;
        let b = db.insert(&CardDraft::new("dog", "chien").with_status(CardStatus::Known))?;
        assert!(a < b);
        let cards = db.all_cards()?;
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].id, a);
        assert_eq!(cards[0].details, "animal");
        assert_eq!(cards[1].status, CardStatus::Known);
        assert_eq!(db.get(b)?, Some(cards[1].clone()));
        Ok(())
    }

    #[test]
    fn test_duplicates_are_allowed() -> Fallible<()> {
        let db = Database::in_memory()?;
        db.insert(&CardDraft::new("cat", "chat"))?;
        db.insert(&CardDraft::new("cat", "chat"))?;
        assert_eq!(db.all_cards()?.len(), 2);
        Ok(())
    }

    #[test]
    fn test_ids_are_not_reused() -> Fallible<()> {
        let db = Database::in_memory()?;
        let a = db.insert(&CardDraft::new("a", "1"))?;
        db.delete(a)?;
        let b = db.insert(&CardDraft::new("b", "2"))?;
        assert!(b > a);
        Ok(())
    }

    #[test]
    fn test_missing_ids() -> Fallible<()> {
        let db = Database::in_memory()?;
        let ghost = Card::from_draft(CardId::new(41), CardDraft::new("x", "y"));
        assert!(matches!(db.update(&ghost), Err(StoreError::NotFound(id)) if id == ghost.id));
        assert!(matches!(
            db.delete(CardId::new(41)),
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            db.update_status(CardId::new(41), CardStatus::Known),
            Err(StoreError::NotFound(_))
        ));
        assert_eq!(db.get(CardId::new(41))?, None);
        Ok(())
    }

    #[test]
    fn test_counts() -> Fallible<()> {
        let mut db = Database::in_memory()?;
        let ids = db.insert_many(&[
            CardDraft::new("a", "1"),
            CardDraft::new("b", "2"),
            CardDraft::new("c", "3"),
        ])?;
        db.update_status(ids[0], CardStatus::Learned)?;
        db.update_status(ids[1], CardStatus::Known)?;
        assert_eq!(db.count_by_status(CardStatus::ToLearn)?, 1);
        assert_eq!(db.count_by_status(CardStatus::Known)?, 1);
        assert_eq!(db.count_by_status(CardStatus::Learned)?, 1);
        assert_eq!(db.counts()?, CardCounts::new(1, 1, 1));
        assert_eq!(db.delete_all()?, 3);
        assert_eq!(db.count_by_status(CardStatus::Learned)?, 0);
        Ok(())
    }

    #[test]
    fn test_update_replaces_row() -> Fallible<()> {
        let db = Database::in_memory()?;
        let id = db.insert(&CardDraft::new("cat", "chat"))?;
        let mut card = db.get(id)?.unwrap();
        card.back = "le chat".to_string();
        card.details = "feline".to_string();
        db.update(&card)?;
        assert_eq!(db.get(id)?, Some(card));
        Ok(())
    }

    #[test]
    fn test_persists_across_reopen() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        let path = dir.join("memocards.db");
        {
            let db = Database::open(&path)?;
            db.insert(&CardDraft::new("cat", "chat"))?;
        }
        let db = Database::open(&path)?;
        let cards = db.all_cards()?;
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].front, "cat");
        Ok(())
    }

    #[test]
    fn test_not_found_message() {
        let err: ErrorReport = StoreError::NotFound(CardId::new(9)).into();
        assert_eq!(err.to_string(), "error: card 9 not found");
    }
}
