use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};

use crate::{
    api::{ApiError, ApiResult},
    db::{repositories::FavoriteRepository, NewFavorite, ValidationError},
    serialize,
    state::AppState,
};
use serde_json::Value;
use starblog_types::{CreateFavoriteRequest, Favorite};

/// GET /favorites - List all favorites
pub async fn list_favorites(State(state): State<AppState>) -> ApiResult<Json<Vec<Favorite>>> {
    let favorites = FavoriteRepository::new(state.db.pool.clone()).list()?;
    Ok(Json(serialize::many(&favorites)))
}

/// POST /favorites - Bookmark a character or a planet for a user
///
/// No uniqueness check is made: posting the same body twice stores two
/// favorites.
pub async fn create_favorite(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Favorite>)> {
    let Json(body) = payload?;

    // Arrays would otherwise deserialize positionally into the request fields
    if !body.is_object() {
        return Err(ApiError::BadRequest(
            "Request body must be a JSON object".to_string(),
        ));
    }
    let payload: CreateFavoriteRequest = serde_json::from_value(body)
        .map_err(|e| ApiError::BadRequest(format!("Invalid favorite body: {}", e)))?;

    let user_id = payload
        .user_id
        .ok_or(ValidationError::MissingField("user_id"))?;

    let new_favorite = NewFavorite {
        user_id,
        character_id: payload.character_id,
        planet_id: payload.planet_id,
    };
    new_favorite.validate()?;

    let favorite = FavoriteRepository::new(state.db.pool.clone()).create(&new_favorite)?;

    Ok((StatusCode::CREATED, Json(Favorite::from(&favorite))))
}
