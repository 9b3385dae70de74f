use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    api::{parse_id, ApiError, ApiResult},
    db::repositories::{FavoriteRepository, FollowRepository, PostRepository, UserRepository},
    serialize,
    state::AppState,
};
use starblog_types::{Favorite, Follow, Post, User};

/// Resolve a user id from the path, or fail with 404
fn require_user(state: &AppState, raw_id: &str) -> ApiResult<i64> {
    let user_id = parse_id(raw_id, "user")?;
    UserRepository::new(state.db.pool.clone())
        .get_by_id(user_id)?
        .ok_or_else(|| ApiError::NotFound(format!("User {} not found", user_id)))?;
    Ok(user_id)
}

/// GET /users - List all users
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<User>>> {
    let users = UserRepository::new(state.db.pool.clone()).list()?;
    Ok(Json(serialize::many(&users)))
}

/// GET /users/:id - Get a single user
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<User>> {
    let user_id = parse_id(&user_id, "user")?;

    let user = UserRepository::new(state.db.pool.clone())
        .get_by_id(user_id)?
        .ok_or_else(|| ApiError::NotFound(format!("User {} not found", user_id)))?;

    Ok(Json(User::from(&user)))
}

/// DELETE /users/:id - Delete a user together with everything they own
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<StatusCode> {
    let user_id = parse_id(&user_id, "user")?;

    let deleted = UserRepository::new(state.db.pool.clone()).delete(user_id)?;
    if !deleted {
        return Err(ApiError::NotFound(format!("User {} not found", user_id)));
    }

    tracing::info!("Deleted user {} and dependent rows", user_id);
    Ok(StatusCode::NO_CONTENT)
}

/// GET /users/:id/followers - Follow edges pointing at the user
pub async fn get_followers(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<Vec<Follow>>> {
    let user_id = require_user(&state, &user_id)?;
    let follows = FollowRepository::new(state.db.pool.clone()).list_followers(user_id)?;
    Ok(Json(serialize::many(&follows)))
}

/// GET /users/:id/following - Follow edges starting at the user
pub async fn get_following(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<Vec<Follow>>> {
    let user_id = require_user(&state, &user_id)?;
    let follows = FollowRepository::new(state.db.pool.clone()).list_following(user_id)?;
    Ok(Json(serialize::many(&follows)))
}

/// GET /users/:id/favorites - Favorites owned by the user
pub async fn get_user_favorites(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<Vec<Favorite>>> {
    let user_id = require_user(&state, &user_id)?;
    let favorites = FavoriteRepository::new(state.db.pool.clone()).list_by_user(user_id)?;
    Ok(Json(serialize::many(&favorites)))
}

/// GET /users/:id/posts - Posts owned by the user, newest first
pub async fn get_user_posts(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<Vec<Post>>> {
    let user_id = require_user(&state, &user_id)?;
    let post_repo = PostRepository::new(state.db.pool.clone());

    let mut posts = Vec::new();
    for record in post_repo.list_by_user(user_id)? {
        let graph = post_repo.get_graph(record.id)?.ok_or_else(|| {
            ApiError::InternalError(format!("Post {} vanished while loading", record.id))
        })?;
        posts.push(Post::from(&graph));
    }

    Ok(Json(posts))
}
