use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::Connection;

use crate::db::error::write_error;
use crate::db::models::{CommentRecord, CommentWithAuthor, NewComment, UserRecord};
use crate::db::DbPool;

pub struct CommentRepository {
    pool: DbPool,
}

/// Comments on a post with their authors, oldest first
pub(crate) fn select_by_post(conn: &Connection, post_id: i64) -> Result<Vec<CommentWithAuthor>> {
    let mut stmt = conn.prepare(
        "SELECT c.id, c.user_id, c.post_id, c.content, c.created_at,
                u.id, u.username, u.email, u.password_hash, u.profile_picture, u.bio, u.is_active, u.created_at
         FROM comments c
         JOIN users u ON u.id = c.user_id
         WHERE c.post_id = ?
         ORDER BY c.id",
    )?;

    let comments = stmt
        .query_map([post_id], |row| {
            Ok(CommentWithAuthor {
                comment: CommentRecord::from_row(row)?,
                author: UserRecord::from_row_at(row, 5)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()
        .context("Failed to load comments")?;

    Ok(comments)
}

impl CommentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn list_by_post(&self, post_id: i64) -> Result<Vec<CommentWithAuthor>> {
        let conn = self.pool.get()?;
        select_by_post(&conn, post_id)
    }

    pub fn create(&self, comment: &NewComment) -> Result<CommentRecord> {
        comment.validate()?;

        let conn = self.pool.get()?;
        let created_at = Utc::now();
        conn.execute(
            "INSERT INTO comments (user_id, post_id, content, created_at) VALUES (?, ?, ?, ?)",
            (
                comment.user_id,
                comment.post_id,
                &comment.content,
                created_at.to_rfc3339(),
            ),
        )
        .map_err(|e| write_error(e, "create comment"))?;

        Ok(CommentRecord {
            id: conn.last_insert_rowid(),
            user_id: comment.user_id,
            post_id: comment.post_id,
            content: comment.content.clone(),
            created_at,
        })
    }
}
