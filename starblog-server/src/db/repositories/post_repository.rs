use anyhow::Result;
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension};

use super::{comment_repository, like_repository, user_repository};
use crate::db::error::{write_error, DbError};
use crate::db::models::{NewPost, PostGraph, PostRecord};
use crate::db::DbPool;

pub struct PostRepository {
    pool: DbPool,
}

/// Load the author, comments and like count for a post. All lookups run on
/// the caller's connection.
fn load_graph(conn: &Connection, post: PostRecord) -> Result<PostGraph> {
    let author = user_repository::select_by_id(conn, post.user_id)?.ok_or(
        DbError::MissingRelation {
            entity: "user",
            id: post.user_id,
            owner: "post",
        },
    )?;
    let comments = comment_repository::select_by_post(conn, post.id)?;
    let likes_count = like_repository::count_for_post(conn, post.id)?;

    Ok(PostGraph {
        post,
        author,
        comments,
        likes_count,
    })
}

fn select_by_id(conn: &Connection, post_id: i64) -> Result<Option<PostRecord>> {
    let post = conn
        .query_row(
            &format!("SELECT {} FROM posts WHERE id = ?", PostRecord::COLUMNS),
            [post_id],
            PostRecord::from_row,
        )
        .optional()?;
    Ok(post)
}

impl PostRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get the bare post row
    pub fn get_by_id(&self, post_id: i64) -> Result<Option<PostRecord>> {
        let conn = self.pool.get()?;
        select_by_id(&conn, post_id)
    }

    /// Get a post with its author, comments and like count
    pub fn get_graph(&self, post_id: i64) -> Result<Option<PostGraph>> {
        let conn = self.pool.get()?;
        match select_by_id(&conn, post_id)? {
            Some(post) => Ok(Some(load_graph(&conn, post)?)),
            None => Ok(None),
        }
    }

    /// Get every post as a full graph, ordered by id
    pub fn list_graphs(&self) -> Result<Vec<PostGraph>> {
        let conn = self.pool.get()?;
        let posts = {
            let mut stmt = conn.prepare(&format!(
                "SELECT {} FROM posts ORDER BY id",
                PostRecord::COLUMNS
            ))?;
            let rows = stmt
                .query_map([], PostRecord::from_row)?
                .collect::<Result<Vec<_>, _>>()?;
            rows
        };

        posts
            .into_iter()
            .map(|post| load_graph(&conn, post))
            .collect()
    }

    /// Posts owned by a user, newest first
    pub fn list_by_user(&self, user_id: i64) -> Result<Vec<PostRecord>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM posts WHERE user_id = ? ORDER BY created_at DESC, id DESC",
            PostRecord::COLUMNS
        ))?;

        let posts = stmt
            .query_map([user_id], PostRecord::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(posts)
    }

    pub fn create(&self, post: &NewPost) -> Result<PostRecord> {
        post.validate()?;

        let conn = self.pool.get()?;
        let created_at = Utc::now();
        conn.execute(
            "INSERT INTO posts (user_id, image_url, caption, created_at) VALUES (?, ?, ?, ?)",
            (
                post.user_id,
                &post.image_url,
                &post.caption,
                created_at.to_rfc3339(),
            ),
        )
        .map_err(|e| write_error(e, "create post"))?;

        let id = conn.last_insert_rowid();
        tracing::info!("User {} created post {}", post.user_id, id);

        Ok(PostRecord {
            id,
            user_id: post.user_id,
            image_url: post.image_url.clone(),
            caption: post.caption.clone(),
            created_at,
        })
    }
}
