//! Storage records, one per table, plus the insert payloads for each.
//!
//! Records mirror their table column for column. They are the only place the
//! password hash lives; the wire views in `starblog_types` have no such field.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use rusqlite::{types::Type, Row};

use super::error::ValidationError;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\w.-]+@[\w.-]+\.\w+$").expect("email pattern is valid"));

/// Parse an RFC 3339 TEXT column
pub(crate) fn timestamp(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    raw.parse::<DateTime<Utc>>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub profile_picture: Option<String>,
    pub bio: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    pub(crate) const COLUMNS: &'static str =
        "id, username, email, password_hash, profile_picture, bio, is_active, created_at";

    /// Map a row whose user columns start at `offset`
    pub(crate) fn from_row_at(row: &Row<'_>, offset: usize) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(offset)?,
            username: row.get(offset + 1)?,
            email: row.get(offset + 2)?,
            password_hash: row.get(offset + 3)?,
            profile_picture: row.get(offset + 4)?,
            bio: row.get(offset + 5)?,
            is_active: row.get(offset + 6)?,
            created_at: timestamp(row, offset + 7)?,
        })
    }

    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Self::from_row_at(row, 0)
    }
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    /// Already hashed by the caller
    pub password_hash: String,
    pub profile_picture: Option<String>,
    pub bio: Option<String>,
}

impl NewUser {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.username.trim().is_empty() {
            return Err(ValidationError::MissingField("username"));
        }
        if self.password_hash.is_empty() {
            return Err(ValidationError::MissingField("password"));
        }
        if !is_valid_email(&self.email) {
            return Err(ValidationError::InvalidEmail(self.email.clone()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlanetRecord {
    pub id: i64,
    pub name: String,
    pub climate: Option<String>,
    pub terrain: Option<String>,
    pub population: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl PlanetRecord {
    pub(crate) const COLUMNS: &'static str = "id, name, climate, terrain, population, created_at";

    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            climate: row.get(2)?,
            terrain: row.get(3)?,
            population: row.get(4)?,
            created_at: timestamp(row, 5)?,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct NewPlanet {
    pub name: String,
    pub climate: Option<String>,
    pub terrain: Option<String>,
    pub population: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CharacterRecord {
    pub id: i64,
    pub name: String,
    pub gender: Option<String>,
    pub homeworld_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl CharacterRecord {
    pub(crate) const COLUMNS: &'static str = "id, name, gender, homeworld_id, created_at";

    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            gender: row.get(2)?,
            homeworld_id: row.get(3)?,
            created_at: timestamp(row, 4)?,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct NewCharacter {
    pub name: String,
    pub gender: Option<String>,
    pub homeworld_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FavoriteRecord {
    pub id: i64,
    pub user_id: i64,
    pub character_id: Option<i64>,
    pub planet_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl FavoriteRecord {
    pub(crate) const COLUMNS: &'static str = "id, user_id, character_id, planet_id, created_at";

    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            user_id: row.get(1)?,
            character_id: row.get(2)?,
            planet_id: row.get(3)?,
            created_at: timestamp(row, 4)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewFavorite {
    pub user_id: i64,
    pub character_id: Option<i64>,
    pub planet_id: Option<i64>,
}

impl NewFavorite {
    pub fn validate(&self) -> Result<(), ValidationError> {
        match (self.character_id, self.planet_id) {
            (Some(_), None) | (None, Some(_)) => Ok(()),
            _ => Err(ValidationError::FavoriteTarget),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PostRecord {
    pub id: i64,
    pub user_id: i64,
    pub image_url: String,
    pub caption: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl PostRecord {
    pub(crate) const COLUMNS: &'static str = "id, user_id, image_url, caption, created_at";

    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            user_id: row.get(1)?,
            image_url: row.get(2)?,
            caption: row.get(3)?,
            created_at: timestamp(row, 4)?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct NewPost {
    pub user_id: i64,
    pub image_url: String,
    pub caption: Option<String>,
}

impl NewPost {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.image_url.trim().is_empty() {
            return Err(ValidationError::MissingField("image_url"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommentRecord {
    pub id: i64,
    pub user_id: i64,
    pub post_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl CommentRecord {
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            user_id: row.get(1)?,
            post_id: row.get(2)?,
            content: row.get(3)?,
            created_at: timestamp(row, 4)?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub user_id: i64,
    pub post_id: i64,
    pub content: String,
}

impl NewComment {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.content.trim().is_empty() {
            return Err(ValidationError::MissingField("content"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LikeRecord {
    pub id: i64,
    pub user_id: i64,
    pub post_id: i64,
    pub created_at: DateTime<Utc>,
}

impl LikeRecord {
    pub(crate) const COLUMNS: &'static str = "id, user_id, post_id, created_at";

    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            user_id: row.get(1)?,
            post_id: row.get(2)?,
            created_at: timestamp(row, 3)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FollowRecord {
    pub id: i64,
    pub follower_id: i64,
    pub followed_id: i64,
    pub created_at: DateTime<Utc>,
}

impl FollowRecord {
    pub(crate) const COLUMNS: &'static str = "id, follower_id, followed_id, created_at";

    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            follower_id: row.get(1)?,
            followed_id: row.get(2)?,
            created_at: timestamp(row, 3)?,
        })
    }
}

/// A comment together with its author
#[derive(Debug, Clone, PartialEq)]
pub struct CommentWithAuthor {
    pub comment: CommentRecord,
    pub author: UserRecord,
}

/// Everything needed to serialize a post in one piece
#[derive(Debug, Clone, PartialEq)]
pub struct PostGraph {
    pub post: PostRecord,
    pub author: UserRecord,
    pub comments: Vec<CommentWithAuthor>,
    pub likes_count: i64,
}
