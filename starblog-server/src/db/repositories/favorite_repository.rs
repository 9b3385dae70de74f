use anyhow::Result;
use chrono::Utc;
use rusqlite::OptionalExtension;

use crate::db::error::write_error;
use crate::db::models::{FavoriteRecord, NewFavorite};
use crate::db::DbPool;

pub struct FavoriteRepository {
    pool: DbPool,
}

impl FavoriteRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn list(&self) -> Result<Vec<FavoriteRecord>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM favorites ORDER BY id",
            FavoriteRecord::COLUMNS
        ))?;

        let favorites = stmt
            .query_map([], FavoriteRecord::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(favorites)
    }

    pub fn list_by_user(&self, user_id: i64) -> Result<Vec<FavoriteRecord>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM favorites WHERE user_id = ? ORDER BY id",
            FavoriteRecord::COLUMNS
        ))?;

        let favorites = stmt
            .query_map([user_id], FavoriteRecord::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(favorites)
    }

    pub fn get_by_id(&self, favorite_id: i64) -> Result<Option<FavoriteRecord>> {
        let conn = self.pool.get()?;
        let favorite = conn
            .query_row(
                &format!(
                    "SELECT {} FROM favorites WHERE id = ?",
                    FavoriteRecord::COLUMNS
                ),
                [favorite_id],
                FavoriteRecord::from_row,
            )
            .optional()?;
        Ok(favorite)
    }

    /// Store a favorite. Identical favorites are not deduplicated; every call
    /// inserts a new row.
    pub fn create(&self, favorite: &NewFavorite) -> Result<FavoriteRecord> {
        favorite.validate()?;

        let conn = self.pool.get()?;
        let created_at = Utc::now();
        conn.execute(
            "INSERT INTO favorites (user_id, character_id, planet_id, created_at) VALUES (?, ?, ?, ?)",
            (
                favorite.user_id,
                favorite.character_id,
                favorite.planet_id,
                created_at.to_rfc3339(),
            ),
        )
        .map_err(|e| write_error(e, "create favorite"))?;

        let id = conn.last_insert_rowid();
        tracing::info!("User {} added favorite {}", favorite.user_id, id);

        Ok(FavoriteRecord {
            id,
            user_id: favorite.user_id,
            character_id: favorite.character_id,
            planet_id: favorite.planet_id,
            created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{Database, DbError, ValidationError};

    fn setup_test_db() -> (Database, FavoriteRepository) {
        let db = Database::in_memory().expect("Failed to create test database");
        db.initialize().expect("Failed to initialize schema");
        db.seed_test_data().expect("Failed to seed test data");
        let repo = FavoriteRepository::new(db.pool.clone());
        (db, repo)
    }

    #[test]
    fn test_create_character_favorite() {
        let (_db, repo) = setup_test_db();
        let favorite = repo
            .create(&NewFavorite {
                user_id: 3,
                character_id: Some(1),
                planet_id: None,
            })
            .unwrap();

        assert_eq!(favorite.user_id, 3);
        assert_eq!(favorite.character_id, Some(1));
        assert_eq!(favorite.planet_id, None);
        assert_eq!(repo.get_by_id(favorite.id).unwrap(), Some(favorite));
    }

    #[test]
    fn test_duplicates_are_allowed() {
        let (_db, repo) = setup_test_db();
        let new = NewFavorite {
            user_id: 1,
            character_id: Some(2),
            planet_id: None,
        };
        let first = repo.create(&new).unwrap();
        let second = repo.create(&new).unwrap();
        assert_ne!(first.id, second.id);

        let lukes = repo.list_by_user(1).unwrap();
        let same_target = lukes.iter().filter(|f| f.character_id == Some(2)).count();
        assert_eq!(same_target, 3);
    }

    #[test]
    fn test_missing_target_is_a_validation_error() {
        let (_db, repo) = setup_test_db();
        let err = repo
            .create(&NewFavorite {
                user_id: 1,
                character_id: None,
                planet_id: None,
            })
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<ValidationError>(),
            Some(&ValidationError::FavoriteTarget)
        );
    }

    #[test]
    fn test_unknown_user_is_a_constraint_violation() {
        let (_db, repo) = setup_test_db();
        let err = repo
            .create(&NewFavorite {
                user_id: 404,
                character_id: None,
                planet_id: Some(1),
            })
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DbError>(),
            Some(DbError::ConstraintViolation(_))
        ));
    }
}
