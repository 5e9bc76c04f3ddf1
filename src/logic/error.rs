use crate::model::Id;
use crate::store::{StoreError, StoreResult};

/// Outcome classification for field operations
#[derive(Debug, thiserror::Error)]
pub enum FieldError {
    /// The requested entity or one of its dependencies is absent
    #[error("{0}")]
    NotFound(String),

    /// Required input is missing
    #[error("{0}")]
    Validation(String),

    /// The store rejected an update and the record still exists
    #[error("Field with Id '{id}' was modified concurrently")]
    Conflict { id: Id },

    /// Anything else; `message` is safe to show, `source` is not
    #[error("{message}")]
    Internal {
        message: String,
        #[source]
        source: StoreError,
    },
}

pub(crate) trait StoreResultExt<T> {
    /// Classify any store failure as internal, naming the operation that hit it
    fn or_internal<F>(self, message: F) -> Result<T, FieldError>
    where
        F: FnOnce() -> String;
}

impl<T> StoreResultExt<T> for StoreResult<T> {
    fn or_internal<F>(self, message: F) -> Result<T, FieldError>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|source| FieldError::Internal {
            message: message(),
            source,
        })
    }
}
