use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    api::{parse_id, ApiError, ApiResult},
    db::repositories::CharacterRepository,
    serialize,
    state::AppState,
};
use starblog_types::Character;

/// GET /characters - List all characters
pub async fn list_characters(State(state): State<AppState>) -> ApiResult<Json<Vec<Character>>> {
    let characters = CharacterRepository::new(state.db.pool.clone()).list()?;
    tracing::debug!("Listing {} characters", characters.len());
    Ok(Json(serialize::many(&characters)))
}

/// GET /characters/:id - Get a single character
pub async fn get_character(
    State(state): State<AppState>,
    Path(character_id): Path<String>,
) -> ApiResult<Json<Character>> {
    let character_id = parse_id(&character_id, "character")?;

    let character = CharacterRepository::new(state.db.pool.clone())
        .get_by_id(character_id)?
        .ok_or_else(|| ApiError::NotFound(format!("Character {} not found", character_id)))?;

    Ok(Json(Character::from(&character)))
}
