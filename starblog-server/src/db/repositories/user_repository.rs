use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension};

use crate::db::error::write_error;
use crate::db::models::{NewUser, UserRecord};
use crate::db::DbPool;

pub struct UserRepository {
    pool: DbPool,
}

/// Look a user up on an already checked-out connection
pub(crate) fn select_by_id(conn: &Connection, user_id: i64) -> Result<Option<UserRecord>> {
    let sql = format!("SELECT {} FROM users WHERE id = ?", UserRecord::COLUMNS);
    let user = conn
        .query_row(&sql, [user_id], UserRecord::from_row)
        .optional()
        .context("Failed to load user")?;
    Ok(user)
}

impl UserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get all users
    pub fn list(&self) -> Result<Vec<UserRecord>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM users ORDER BY id",
            UserRecord::COLUMNS
        ))?;

        let users = stmt
            .query_map([], UserRecord::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(users)
    }

    /// Get user by ID
    pub fn get_by_id(&self, user_id: i64) -> Result<Option<UserRecord>> {
        let conn = self.pool.get()?;
        select_by_id(&conn, user_id)
    }

    /// Get user by username
    /// Create a new user. Username and email clashes surface as constraint
    /// violations from the unique indexes.
    pub fn create(&self, user: &NewUser) -> Result<UserRecord> {
        user.validate()?;

        let conn = self.pool.get()?;
        let created_at = Utc::now();
        conn.execute(
            "INSERT INTO users (username, email, password_hash, profile_picture, bio, is_active, created_at)
             VALUES (?, ?, ?, ?, ?, 1, ?)",
            (
                &user.username,
                &user.email,
                &user.password_hash,
                &user.profile_picture,
                &user.bio,
                created_at.to_rfc3339(),
            ),
        )
        .map_err(|e| write_error(e, "create user"))?;

        tracing::info!("Created user {}", user.username);

        Ok(UserRecord {
            id: conn.last_insert_rowid(),
            username: user.username.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            profile_picture: user.profile_picture.clone(),
            bio: user.bio.clone(),
            is_active: true,
            created_at,
        })
    }

    /// Delete a user and, through the foreign keys, everything they own.
    /// Returns false if no such user existed.
    pub fn delete(&self, user_id: i64) -> Result<bool> {
        let conn = self.pool.get()?;
        let rows_affected = conn
            .execute("DELETE FROM users WHERE id = ?", [user_id])
            .map_err(|e| write_error(e, "delete user"))?;
        Ok(rows_affected > 0)
    }
}
