use thiserror::Error;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Boxed engine error kept as the source of unclassified failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The outcome classes a storage engine failure can be sorted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A uniqueness constraint on the alias was violated.
    AlreadyExists,
    /// No record matched the alias.
    NotFound,
    /// Anything else the engine reported.
    Storage,
}

/// Errors returned by URL stores.
///
/// Backends classify engine failures right after the engine call; callers
/// match on the variant and never look at engine-specific codes.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{op}: {source}")]
    Initialization {
        op: &'static str,
        #[source]
        source: BoxError,
    },
    #[error("alias already exists: {0}")]
    AlreadyExists(String),
    #[error("alias not found: {0}")]
    NotFound(String),
    #[error("{op}: {source}")]
    Storage {
        op: &'static str,
        #[source]
        source: BoxError,
    },
}

impl StoreError {
    pub fn initialization(op: &'static str, source: impl Into<BoxError>) -> Self {
        Self::Initialization {
            op,
            source: source.into(),
        }
    }

    pub fn storage(op: &'static str, source: impl Into<BoxError>) -> Self {
        Self::Storage {
            op,
            source: source.into(),
        }
    }

    /// Projects the error onto its [`ErrorKind`].
    ///
    /// Initialization failures count as storage failures.
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::AlreadyExists(_) => ErrorKind::AlreadyExists,
            StoreError::NotFound(_) => ErrorKind::NotFound,
            StoreError::Initialization { .. } | StoreError::Storage { .. } => ErrorKind::Storage,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    pub fn is_already_exists(&self) -> bool {
        self.kind() == ErrorKind::AlreadyExists
    }
}

/// Error returned when building an [`Alias`](crate::Alias) from invalid input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AliasError {
    #[error("alias must not be empty")]
    Empty,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn kind_projection() {
        assert_eq!(
            StoreError::AlreadyExists("ex1".into()).kind(),
            ErrorKind::AlreadyExists
        );
        assert_eq!(StoreError::NotFound("ex1".into()).kind(), ErrorKind::NotFound);
        assert_eq!(
            StoreError::storage("storage.save_url", "disk full").kind(),
            ErrorKind::Storage
        );
        assert_eq!(
            StoreError::initialization("storage.open", "no such directory").kind(),
            ErrorKind::Storage
        );
    }

    #[test]
    fn storage_error_keeps_operation_and_source() {
        let err = StoreError::storage("storage.sqlite.get_url", "database is locked");

        assert_eq!(err.to_string(), "storage.sqlite.get_url: database is locked");
        let source = err.source().expect("source should be preserved");
        assert_eq!(source.to_string(), "database is locked");
    }

    #[test]
    fn helpers() {
        assert!(StoreError::NotFound("a".into()).is_not_found());
        assert!(!StoreError::NotFound("a".into()).is_already_exists());
        assert!(StoreError::AlreadyExists("a".into()).is_already_exists());
    }
}
