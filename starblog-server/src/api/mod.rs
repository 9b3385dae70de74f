pub mod characters;
pub mod error;
pub mod favorites;
pub mod planets;
pub mod posts;
pub mod users;

pub use error::{ApiError, ApiResult};

/// Parse a numeric path id, naming the entity in the error
pub(crate) fn parse_id(raw: &str, entity: &str) -> ApiResult<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ApiError::BadRequest(format!("Invalid {} ID", entity)))
}
