use anyhow::Result;
use chrono::Utc;
use rusqlite::Connection;

use crate::db::error::write_error;
use crate::db::models::LikeRecord;
use crate::db::DbPool;

pub struct LikeRepository {
    pool: DbPool,
}

pub(crate) fn count_for_post(conn: &Connection, post_id: i64) -> Result<i64> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM likes WHERE post_id = ?",
        [post_id],
        |row| row.get(0),
    )?;
    Ok(count)
}

impl LikeRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn list_by_post(&self, post_id: i64) -> Result<Vec<LikeRecord>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM likes WHERE post_id = ? ORDER BY id",
            LikeRecord::COLUMNS
        ))?;

        let likes = stmt
            .query_map([post_id], LikeRecord::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(likes)
    }

    pub fn count_for_post(&self, post_id: i64) -> Result<i64> {
        let conn = self.pool.get()?;
        count_for_post(&conn, post_id)
    }

    /// Record a like. Liking the same post twice stores two rows.
    pub fn create(&self, user_id: i64, post_id: i64) -> Result<LikeRecord> {
        let conn = self.pool.get()?;
        let created_at = Utc::now();
        conn.execute(
            "INSERT INTO likes (user_id, post_id, created_at) VALUES (?, ?, ?)",
            (user_id, post_id, created_at.to_rfc3339()),
        )
        .map_err(|e| write_error(e, "create like"))?;

        Ok(LikeRecord {
            id: conn.last_insert_rowid(),
            user_id,
            post_id,
            created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    fn setup_test_db() -> (Database, LikeRepository) {
        let db = Database::in_memory().expect("Failed to create test database");
        db.initialize().expect("Failed to initialize schema");
        db.seed_test_data().expect("Failed to seed test data");
        let repo = LikeRepository::new(db.pool.clone());
        (db, repo)
    }

    #[test]
    fn test_count_tracks_rows() {
        let (_db, repo) = setup_test_db();
        assert_eq!(repo.count_for_post(1).unwrap(), 2);
        assert_eq!(repo.count_for_post(3).unwrap(), 0);

        repo.create(1, 3).unwrap();
        assert_eq!(repo.count_for_post(3).unwrap(), 1);
        assert_eq!(repo.list_by_post(3).unwrap().len(), 1);
    }

    #[test]
    fn test_like_for_missing_post_fails() {
        let (_db, repo) = setup_test_db();
        assert!(repo.create(1, 500).is_err());
    }
}
