use anyhow::Result;
use chrono::Utc;

use crate::db::error::write_error;
use crate::db::models::FollowRecord;
use crate::db::DbPool;

pub struct FollowRepository {
    pool: DbPool,
}

impl FollowRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Follow a user. Following twice or following yourself is a constraint
    /// violation.
    pub fn follow(&self, follower_id: i64, followed_id: i64) -> Result<FollowRecord> {
        let conn = self.pool.get()?;
        let created_at = Utc::now();
        conn.execute(
            "INSERT INTO follows (follower_id, followed_id, created_at) VALUES (?, ?, ?)",
            (follower_id, followed_id, created_at.to_rfc3339()),
        )
        .map_err(|e| write_error(e, "follow user"))?;

        Ok(FollowRecord {
            id: conn.last_insert_rowid(),
            follower_id,
            followed_id,
            created_at,
        })
    }

    /// Follow edges pointing at this user
    pub fn list_followers(&self, user_id: i64) -> Result<Vec<FollowRecord>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM follows WHERE followed_id = ? ORDER BY id",
            FollowRecord::COLUMNS
        ))?;

        let followers = stmt
            .query_map([user_id], FollowRecord::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(followers)
    }

    /// Follow edges starting at this user
    pub fn list_following(&self, user_id: i64) -> Result<Vec<FollowRecord>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM follows WHERE follower_id = ? ORDER BY id",
            FollowRecord::COLUMNS
        ))?;

        let following = stmt
            .query_map([user_id], FollowRecord::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(following)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{Database, DbError};

    fn setup_test_db() -> (Database, FollowRepository) {
        let db = Database::in_memory().expect("Failed to create test database");
        db.initialize().expect("Failed to initialize schema");
        db.seed_test_data().expect("Failed to seed test data");
        let repo = FollowRepository::new(db.pool.clone());
        (db, repo)
    }

    #[test]
    fn test_follow_is_one_way() {
        let (_db, repo) = setup_test_db();
        assert!(repo.list_following(2).unwrap().iter().all(|f| f.followed_id != 3));

        let created = repo.follow(2, 3).unwrap();
        assert_eq!((created.follower_id, created.followed_id), (2, 3));

        let han_followers = repo.list_followers(3).unwrap();
        assert_eq!(han_followers.len(), 1);
        assert_eq!(han_followers[0].follower_id, 2);
    }

    #[test]
    fn test_followers_and_following() {
        let (_db, repo) = setup_test_db();
        let leia_followers: Vec<i64> = repo
            .list_followers(2)
            .unwrap()
            .iter()
            .map(|f| f.follower_id)
            .collect();
        assert_eq!(leia_followers, vec![1, 3]);

        let han_following = repo.list_following(3).unwrap();
        assert_eq!(han_following.len(), 1);
        assert_eq!(han_following[0].followed_id, 2);
    }

    #[test]
    fn test_duplicate_and_self_follow_rejected() {
        let (_db, repo) = setup_test_db();
        let duplicate = repo.follow(1, 2).unwrap_err();
        assert!(duplicate.downcast_ref::<DbError>().is_some());

        let own = repo.follow(1, 1).unwrap_err();
        assert!(own.downcast_ref::<DbError>().is_some());
    }
}
