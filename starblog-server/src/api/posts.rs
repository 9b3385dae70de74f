use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    api::{parse_id, ApiError, ApiResult},
    db::repositories::{CommentRepository, LikeRepository, PostRepository},
    serialize,
    state::AppState,
};
use starblog_types::{Comment, Like, Post};

/// Make sure the post exists before listing its children
fn require_post(post_repo: &PostRepository, post_id: i64) -> ApiResult<()> {
    post_repo
        .get_by_id(post_id)?
        .ok_or_else(|| ApiError::NotFound(format!("Post {} not found", post_id)))?;
    Ok(())
}

/// GET /posts - List every post with author, comments and like count
pub async fn list_posts(State(state): State<AppState>) -> ApiResult<Json<Vec<Post>>> {
    let graphs = PostRepository::new(state.db.pool.clone()).list_graphs()?;
    tracing::debug!("Listing {} posts", graphs.len());
    Ok(Json(serialize::many(&graphs)))
}

/// GET /posts/:id - Get a single post
pub async fn get_post(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> ApiResult<Json<Post>> {
    let post_id = parse_id(&post_id, "post")?;

    let graph = PostRepository::new(state.db.pool.clone())
        .get_graph(post_id)?
        .ok_or_else(|| ApiError::NotFound(format!("Post {} not found", post_id)))?;

    Ok(Json(Post::from(&graph)))
}

/// GET /posts/:id/comments - Comments on a post, oldest first
pub async fn get_comments(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> ApiResult<Json<Vec<Comment>>> {
    let post_id = parse_id(&post_id, "post")?;
    let pool = state.db.pool.clone();

    require_post(&PostRepository::new(pool.clone()), post_id)?;

    let comments = CommentRepository::new(pool).list_by_post(post_id)?;
    Ok(Json(serialize::many(&comments)))
}

/// GET /posts/:id/likes - Likes on a post
pub async fn get_likes(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> ApiResult<Json<Vec<Like>>> {
    let post_id = parse_id(&post_id, "post")?;
    let pool = state.db.pool.clone();

    require_post(&PostRepository::new(pool.clone()), post_id)?;

    let likes = LikeRepository::new(pool).list_by_post(post_id)?;
    Ok(Json(serialize::many(&likes)))
}
