use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{api, state::AppState};

/// Build the HTTP router with every endpoint, CORS and request tracing
pub fn router(state: AppState) -> Router {
    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(health_check))
        // User routes
        .route("/users", get(api::users::list_users))
        .route(
            "/users/:id",
            get(api::users::get_user).delete(api::users::delete_user),
        )
        .route("/users/:id/followers", get(api::users::get_followers))
        .route("/users/:id/following", get(api::users::get_following))
        .route("/users/:id/favorites", get(api::users::get_user_favorites))
        .route("/users/:id/posts", get(api::users::get_user_posts))
        // Reference data routes
        .route("/characters", get(api::characters::list_characters))
        .route("/characters/:id", get(api::characters::get_character))
        .route("/planets", get(api::planets::list_planets))
        .route("/planets/:id", get(api::planets::get_planet))
        .route("/planets/:id/residents", get(api::planets::get_residents))
        // Favorite routes
        .route(
            "/favorites",
            get(api::favorites::list_favorites).post(api::favorites::create_favorite),
        )
        // Post routes
        .route("/posts", get(api::posts::list_posts))
        .route("/posts/:id", get(api::posts::get_post))
        .route("/posts/:id/comments", get(api::posts::get_comments))
        .route("/posts/:id/likes", get(api::posts::get_likes))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

async fn health_check() -> &'static str {
    "OK"
}
