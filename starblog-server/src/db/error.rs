use rusqlite::ErrorCode;
use thiserror::Error;

/// Storage failures that callers are expected to tell apart from plain I/O
/// or SQL errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// Uniqueness, foreign key or CHECK constraint rejected the write
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    /// A row referenced by a loaded record no longer exists
    #[error("{entity} {id} referenced by {owner} is missing")]
    MissingRelation {
        entity: &'static str,
        id: i64,
        owner: &'static str,
    },
}

/// Input rejected before it reaches the database
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    #[error("a favorite must reference exactly one of character_id or planet_id")]
    FavoriteTarget,
}

/// Convert a failed write into an `anyhow::Error`, promoting SQLite
/// constraint failures to [`DbError::ConstraintViolation`].
pub fn write_error(err: rusqlite::Error, action: &str) -> anyhow::Error {
    match &err {
        rusqlite::Error::SqliteFailure(failure, message)
            if failure.code == ErrorCode::ConstraintViolation =>
        {
            let detail = message.clone().unwrap_or_else(|| failure.to_string());
            tracing::debug!("{} rejected by constraint: {}", action, detail);
            DbError::ConstraintViolation(detail).into()
        }
        _ => anyhow::Error::new(err).context(format!("Failed to {}", action)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_unique_violation_is_classified() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (name TEXT UNIQUE); INSERT INTO t VALUES ('a');")
            .unwrap();

        let err = conn.execute("INSERT INTO t VALUES ('a')", []).unwrap_err();
        let err = write_error(err, "insert row");

        assert!(matches!(
            err.downcast_ref::<DbError>(),
            Some(DbError::ConstraintViolation(_))
        ));
    }

    #[test]
    fn test_other_errors_keep_context() {
        let conn = Connection::open_in_memory().unwrap();
        let err = conn.execute("INSERT INTO missing VALUES (1)", []).unwrap_err();
        let err = write_error(err, "insert row");

        assert!(err.downcast_ref::<DbError>().is_none());
        assert_eq!(err.to_string(), "Failed to insert row");
    }
}
