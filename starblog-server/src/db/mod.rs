pub mod schema;
pub mod connection;
pub mod error;
pub mod models;
pub mod repositories;

pub use connection::{Database, DbPool};
pub use error::{DbError, ValidationError};
pub use models::*;
