//! Record to wire-view conversion.
//!
//! Conversions are infallible: they expect fully loaded records. Any missing
//! relation has already been reported by the repository that built them.

use starblog_types::{Character, Comment, Favorite, Follow, Like, Planet, Post, User};

use crate::db::{
    CharacterRecord, CommentWithAuthor, FavoriteRecord, FollowRecord, LikeRecord, PlanetRecord,
    PostGraph, UserRecord,
};

impl From<&UserRecord> for User {
    // The password hash stays behind.
    fn from(user: &UserRecord) -> Self {
        User {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            profile_picture: user.profile_picture.clone(),
            bio: user.bio.clone(),
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

impl From<&CharacterRecord> for Character {
    fn from(character: &CharacterRecord) -> Self {
        Character {
            id: character.id,
            name: character.name.clone(),
            gender: character.gender.clone(),
            homeworld_id: character.homeworld_id,
            created_at: character.created_at,
        }
    }
}

impl From<&PlanetRecord> for Planet {
    fn from(planet: &PlanetRecord) -> Self {
        Planet {
            id: planet.id,
            name: planet.name.clone(),
            climate: planet.climate.clone(),
            terrain: planet.terrain.clone(),
            population: planet.population,
            created_at: planet.created_at,
        }
    }
}

impl From<&FavoriteRecord> for Favorite {
    fn from(favorite: &FavoriteRecord) -> Self {
        Favorite {
            id: favorite.id,
            user_id: favorite.user_id,
            character_id: favorite.character_id,
            planet_id: favorite.planet_id,
            created_at: favorite.created_at,
        }
    }
}

impl From<&CommentWithAuthor> for Comment {
    fn from(entry: &CommentWithAuthor) -> Self {
        Comment {
            id: entry.comment.id,
            user_id: entry.comment.user_id,
            post_id: entry.comment.post_id,
            content: entry.comment.content.clone(),
            created_at: entry.comment.created_at,
            user: User::from(&entry.author),
        }
    }
}

impl From<&LikeRecord> for Like {
    fn from(like: &LikeRecord) -> Self {
        Like {
            id: like.id,
            user_id: like.user_id,
            post_id: like.post_id,
            created_at: like.created_at,
        }
    }
}

impl From<&FollowRecord> for Follow {
    fn from(follow: &FollowRecord) -> Self {
        Follow {
            id: follow.id,
            follower_id: follow.follower_id,
            followed_id: follow.followed_id,
            created_at: follow.created_at,
        }
    }
}

impl From<&PostGraph> for Post {
    fn from(graph: &PostGraph) -> Self {
        Post {
            id: graph.post.id,
            user_id: graph.post.user_id,
            image_url: graph.post.image_url.clone(),
            caption: graph.post.caption.clone(),
            created_at: graph.post.created_at,
            user: User::from(&graph.author),
            comments: graph.comments.iter().map(Comment::from).collect(),
            likes_count: graph.likes_count,
        }
    }
}

/// Serialize a slice of records into their views
pub fn many<'a, R, V>(records: &'a [R]) -> Vec<V>
where
    V: From<&'a R>,
{
    records.iter().map(V::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{CommentRecord, PostRecord};
    use chrono::{TimeZone, Utc};
    use proptest::prelude::*;

    fn user(id: i64, username: &str, password_hash: &str) -> UserRecord {
        UserRecord {
            id,
            username: username.to_string(),
            email: format!("{}@starblog.dev", username),
            password_hash: password_hash.to_string(),
            profile_picture: None,
            bio: None,
            is_active: true,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_user_view_has_no_password() {
        let json = serde_json::to_value(User::from(&user(1, "luke", "secret-hash"))).unwrap();
        let object = json.as_object().unwrap();

        assert!(!object.contains_key("password"));
        assert!(!object.contains_key("password_hash"));
        assert_eq!(object["username"], "luke");
        assert_eq!(object["created_at"], "2024-01-01T00:00:00+00:00");
    }

    #[test]
    fn test_post_inlines_author_comments_and_likes() {
        let created_at = Utc.with_ymd_and_hms(2024, 1, 10, 18, 0, 0).unwrap();
        let graph = PostGraph {
            post: PostRecord {
                id: 7,
                user_id: 1,
                image_url: "https://img.starblog.dev/x.jpg".to_string(),
                caption: None,
                created_at,
            },
            author: user(1, "luke", "h1"),
            comments: vec![CommentWithAuthor {
                comment: CommentRecord {
                    id: 1,
                    user_id: 2,
                    post_id: 7,
                    content: "Wow".to_string(),
                    created_at,
                },
                author: user(2, "leia", "h2"),
            }],
            likes_count: 5,
        };

        let post = Post::from(&graph);
        assert_eq!(post.user.username, "luke");
        assert_eq!(post.comments.len(), 1);
        assert_eq!(post.comments[0].user.username, "leia");
        assert_eq!(post.likes_count, 5);

        let json = serde_json::to_string(&post).unwrap();
        assert!(!json.contains("h1"));
        assert!(!json.contains("h2"));
        assert!(json.contains("\"caption\":null"));
    }

    #[test]
    fn test_many_preserves_order() {
        let users = vec![user(2, "leia", "a"), user(1, "luke", "b")];
        let views: Vec<User> = many(&users);
        assert_eq!(views[0].id, 2);
        assert_eq!(views[1].id, 1);
    }

    proptest! {
        #[test]
        fn prop_serialized_user_never_leaks_hash(
            username in "[a-z]{3,12}",
            hash in "[A-Za-z0-9$:]{24,48}"
        ) {
            let record = user(1, &username, &hash);
            let json = serde_json::to_string(&User::from(&record)).unwrap();
            prop_assert!(!json.contains(&hash));
            prop_assert!(!json.contains("password"));
        }
    }
}
