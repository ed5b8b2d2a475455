//! Definition of blockjoin's errors and results.

use std::sync::{Arc, PoisonError};
use std::{fmt, io};

use thiserror::Error;

use crate::DocId;

/// Describes a feature that is not available for a given query.
#[derive(Clone, Copy)]
pub struct UnsupportedFeature {
    query: &'static str,
    feature: &'static str,
}

impl UnsupportedFeature {
    /// Creates a new `UnsupportedFeature`.
    pub fn new(query: &'static str, feature: &'static str) -> UnsupportedFeature {
        UnsupportedFeature { query, feature }
    }

    /// Name of the query that does not support the feature.
    pub fn query(&self) -> &'static str {
        self.query
    }
}

impl fmt::Debug for UnsupportedFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} is not supported by {}", self.feature, self.query)
    }
}

/// The library's error enum
#[derive(Debug, Clone, Error)]
pub enum BlockJoinError {
    /// The parent query matched a document that the parents filter does not mark as a
    /// parent. The parent query must only ever match parent documents.
    #[error(
        "Parent query matched document {doc}, which is not marked as a parent by the parents \
         filter. The parent query must only match parent documents."
    )]
    ParentContractViolation {
        /// The offending document.
        doc: DocId,
    },
    /// The query was set up with collaborators that cannot work together.
    #[error("Invalid configuration: '{0}'")]
    InvalidConfiguration(String),
    /// The operation is not supported by the query.
    #[error("Unsupported operation: {0:?}")]
    Unsupported(UnsupportedFeature),
    /// Invalid argument was passed by the user.
    #[error("An invalid argument was passed: '{0}'")]
    InvalidArgument(String),
    /// IO Error.
    #[error("An IO error occurred: '{0}'")]
    IoError(Arc<io::Error>),
    /// A thread holding the locked panicked and poisoned the lock.
    #[error("A thread holding the lock panicked and poisoned the lock")]
    Poisoned,
}

impl From<io::Error> for BlockJoinError {
    fn from(io_err: io::Error) -> BlockJoinError {
        BlockJoinError::IoError(Arc::new(io_err))
    }
}

impl<Guard> From<PoisonError<Guard>> for BlockJoinError {
    fn from(_: PoisonError<Guard>) -> BlockJoinError {
        BlockJoinError::Poisoned
    }
}
