//! Error types for store operations.
//!
//! These cover the two ways the storage layer itself can fail: the embedded
//! engine refusing an operation, and a value that cannot be encoded to or
//! decoded from its stored JSON form. Neither is retried.

use thiserror::Error;

/// Errors raised by [`Store`](crate::Store) and its transactions.
///
/// # Stability
///
/// - New variants may be added in minor versions (enum is `#[non_exhaustive]`)
/// - Helper methods like `is_*()` provide stable APIs
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum StoreError {
    /// The embedded engine failed to open, begin, read, write or commit.
    #[error("Storage engine failure: {source}")]
    Engine {
        /// The underlying engine error
        #[source]
        source: redb::Error,
    },

    /// A value could not be encoded before being written.
    #[error("Failed to encode value for namespace '{namespace}'")]
    Encode {
        /// Namespace the value was destined for
        namespace: &'static str,
        /// The underlying serialization error
        #[source]
        source: serde_json::Error,
    },

    /// A stored value could not be decoded.
    #[error("Failed to decode value at '{key}' in namespace '{namespace}'")]
    Decode {
        /// Namespace the value was read from
        namespace: &'static str,
        /// Key of the undecodable value, lossily rendered as UTF-8
        key: String,
        /// The underlying deserialization error
        #[source]
        source: serde_json::Error,
    },

    /// A stored key does not have the shape its namespace requires.
    #[error("Malformed key '{key}' in namespace '{namespace}'")]
    MalformedKey {
        /// Namespace the key was read from
        namespace: &'static str,
        /// The offending key, lossily rendered as UTF-8
        key: String,
    },

    /// A sequence counter would overflow `u64`.
    #[error("Sequence for namespace '{namespace}' is exhausted")]
    SequenceExhausted {
        /// Namespace whose counter overflowed
        namespace: &'static str,
    },
}

impl StoreError {
    /// Check if this error came from the embedded engine.
    pub fn is_engine_error(&self) -> bool {
        matches!(
            self,
            StoreError::Engine { .. } | StoreError::SequenceExhausted { .. }
        )
    }

    /// Check if this error is an encode or decode failure.
    pub fn is_encoding_error(&self) -> bool {
        matches!(
            self,
            StoreError::Encode { .. } | StoreError::Decode { .. } | StoreError::MalformedKey { .. }
        )
    }
}

// Conversion from StoreError to the main Error type
impl From<StoreError> for crate::Error {
    fn from(err: StoreError) -> Self {
        crate::Error::Store(err)
    }
}

// Every redb error type funnels into `StoreError::Engine` so `?` works on
// engine calls inside functions returning `crate::Result`.
macro_rules! impl_from_engine_error {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for crate::Error {
                fn from(err: $ty) -> Self {
                    StoreError::Engine {
                        source: redb::Error::from(err),
                    }
                    .into()
                }
            }
        )+
    };
}

impl_from_engine_error!(
    redb::Error,
    redb::DatabaseError,
    redb::TransactionError,
    redb::TableError,
    redb::StorageError,
    redb::CommitError,
);
