// Error types for the task store

use std::path::PathBuf;

/// Errors raised by [`TaskStore`](crate::TaskStore) operations.
///
/// `Validation` and `NotFound` abort the operation with no mutation.
/// `Persistence` and `DataIntegrity` are recovered inside the store and
/// queued as warnings, see [`TaskStore::take_warnings`](crate::TaskStore::take_warnings).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Caller-supplied data violates an invariant.
    #[error("{0}")]
    Validation(String),

    /// No task carries the given id.
    #[error("Task {0} not found")]
    NotFound(u64),

    /// The backing file could not be read, parsed or written.
    #[error("Failed to {action} {path:?}: {source}")]
    Persistence {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: PersistenceSource,
    },

    /// The backing file holds two records with the same id.
    #[error("Duplicate task id {id} in {path:?}")]
    DataIntegrity { path: PathBuf, id: u64 },

    /// No id above `max` is left to assign.
    #[error("Task id {max} is the largest possible id, no new ids can be assigned")]
    IdExhausted { max: u64 },
}

/// Underlying cause of a [`StoreError::Persistence`].
#[derive(Debug, thiserror::Error)]
pub enum PersistenceSource {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl StoreError {
    pub(crate) fn persistence(
        action: &'static str,
        path: impl Into<PathBuf>,
        source: impl Into<PersistenceSource>,
    ) -> Self {
        StoreError::Persistence {
            action,
            path: path.into(),
            source: source.into(),
        }
    }

    /// True for errors the store recovers from when raised while loading or
    /// saving, and reports as warnings.
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            StoreError::Persistence { .. } | StoreError::DataIntegrity { .. } | StoreError::IdExhausted { .. }
        )
    }
}

/// Result alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
