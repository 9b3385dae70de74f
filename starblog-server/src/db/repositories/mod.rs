mod user_repository;
mod character_repository;
mod planet_repository;
mod favorite_repository;
mod post_repository;
mod comment_repository;
mod like_repository;
mod follow_repository;

pub use user_repository::UserRepository;
pub use character_repository::CharacterRepository;
pub use planet_repository::PlanetRepository;
pub use favorite_repository::FavoriteRepository;
pub use post_repository::PostRepository;
pub use comment_repository::CommentRepository;
pub use like_repository::LikeRepository;
pub use follow_repository::FollowRepository;
