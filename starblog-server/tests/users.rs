//! User Tests
//!
//! Covers lookups, password hiding, follow lists and cascading deletion.

mod common;

use axum::http::StatusCode;
use common::app;

#[tokio::test]
async fn health_check() {
    let app = app();
    let resp = app.get("/health").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.text(), "OK");
}

#[tokio::test]
async fn list_users_in_id_order() {
    let app = app();
    assert_eq!(app.ids("/users").await, vec![1, 2, 3]);
}

#[tokio::test]
async fn get_user_matches_stored_fields() {
    let app = app();
    let resp = app.get("/users/2").await;

    assert_eq!(resp.status, StatusCode::OK);
    let body = resp.json();
    assert_eq!(body["id"], 2);
    assert_eq!(body["username"], "leia");
    assert_eq!(body["email"], "leia@alderaan.gov");
    assert_eq!(body["bio"], "Senator and general");
    assert_eq!(body["is_active"], true);
    assert_eq!(body["created_at"], "2024-01-02T00:00:00+00:00");
}

#[tokio::test]
async fn users_never_expose_passwords() {
    let app = app();
    for uri in ["/users", "/users/1", "/posts", "/posts/1", "/posts/1/comments"] {
        let resp = app.get(uri).await;
        assert_eq!(resp.status, StatusCode::OK);
        let text = resp.text();
        assert!(!text.contains("password"), "{} leaked a password field", uri);
        assert!(!text.contains("pbkdf2"), "{} leaked a password hash", uri);
    }
}

#[tokio::test]
async fn unknown_user_is_not_found() {
    let app = app();
    let resp = app.get("/users/999").await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(resp.error_message(), "Not Found");
}

#[tokio::test]
async fn non_numeric_user_id_is_bad_request() {
    let app = app();
    let resp = app.get("/users/luke").await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.json()["details"], "Invalid user ID");
}

#[tokio::test]
async fn followers_and_following() {
    let app = app();
    let followers = app.get("/users/2/followers").await.json();
    let follower_ids: Vec<i64> = followers
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["follower_id"].as_i64().unwrap())
        .collect();
    assert_eq!(follower_ids, vec![1, 3]);

    let following = app.get("/users/1/following").await.json();
    assert_eq!(following.as_array().unwrap().len(), 1);
    assert_eq!(following[0]["followed_id"], 2);

    let resp = app.get("/users/404/followers").await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn user_scoped_lists() {
    let app = app();
    assert_eq!(app.ids("/users/1/favorites").await, vec![1, 2]);

    let posts = app.get("/users/3/posts").await.json();
    assert_eq!(posts.as_array().unwrap().len(), 1);
    assert_eq!(posts[0]["id"], 3);
    assert_eq!(posts[0]["user"]["username"], "han");
}

#[tokio::test]
async fn deleting_user_cascades() {
    let app = app();

    let resp = app.delete("/users/1").await;
    assert_eq!(resp.status, StatusCode::NO_CONTENT);

    assert_eq!(app.get("/users/1").await.status, StatusCode::NOT_FOUND);
    assert_eq!(app.ids("/users").await, vec![2, 3]);

    // Luke's post 1 is gone along with its comments and likes
    assert_eq!(app.ids("/posts").await, vec![2, 3]);
    assert_eq!(app.get("/posts/1").await.status, StatusCode::NOT_FOUND);
    assert_eq!(app.get("/posts/1/comments").await.status, StatusCode::NOT_FOUND);

    // Luke's comment on post 3 and like on post 2 are gone too
    assert!(app.ids("/posts/3/comments").await.is_empty());
    assert!(app.ids("/posts/2/likes").await.is_empty());
    assert_eq!(app.get("/posts/2").await.json()["likes_count"], 0);

    // Only Leia's favorite remains
    assert_eq!(app.ids("/favorites").await, vec![3]);

    // Follow edges in both directions are dropped
    assert!(app.ids("/users/2/following").await.is_empty());
    assert_eq!(app.ids("/users/2/followers").await.len(), 1);
}

#[tokio::test]
async fn deleting_unknown_user_is_not_found() {
    let app = app();
    let resp = app.delete("/users/77").await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(app.ids("/users").await.len(), 3);
}
