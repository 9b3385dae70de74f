use anyhow::Result;
use chrono::Utc;
use rusqlite::OptionalExtension;

use crate::db::error::write_error;
use crate::db::models::{CharacterRecord, NewCharacter};
use crate::db::DbPool;

pub struct CharacterRepository {
    pool: DbPool,
}

impl CharacterRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn list(&self) -> Result<Vec<CharacterRecord>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM characters ORDER BY id",
            CharacterRecord::COLUMNS
        ))?;

        let characters = stmt
            .query_map([], CharacterRecord::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(characters)
    }

    pub fn get_by_id(&self, character_id: i64) -> Result<Option<CharacterRecord>> {
        let conn = self.pool.get()?;
        let character = conn
            .query_row(
                &format!(
                    "SELECT {} FROM characters WHERE id = ?",
                    CharacterRecord::COLUMNS
                ),
                [character_id],
                CharacterRecord::from_row,
            )
            .optional()?;
        Ok(character)
    }

    /// Characters whose homeworld is the given planet
    pub fn list_by_homeworld(&self, planet_id: i64) -> Result<Vec<CharacterRecord>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM characters WHERE homeworld_id = ? ORDER BY id",
            CharacterRecord::COLUMNS
        ))?;

        let characters = stmt
            .query_map([planet_id], CharacterRecord::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(characters)
    }

    pub fn create(&self, character: &NewCharacter) -> Result<CharacterRecord> {
        let conn = self.pool.get()?;
        let created_at = Utc::now();
        conn.execute(
            "INSERT INTO characters (name, gender, homeworld_id, created_at) VALUES (?, ?, ?, ?)",
            (
                &character.name,
                &character.gender,
                character.homeworld_id,
                created_at.to_rfc3339(),
            ),
        )
        .map_err(|e| write_error(e, "create character"))?;

        Ok(CharacterRecord {
            id: conn.last_insert_rowid(),
            name: character.name.clone(),
            gender: character.gender.clone(),
            homeworld_id: character.homeworld_id,
            created_at,
        })
    }
}
