//! Errors reported by collaborator stores

use crate::model::{CarId, ResultId};
use thiserror::Error;

/// Failure of a car catalog, result store or settings store operation
///
/// None of these are fatal to a race: callers report them and carry on.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("car {0} not found")]
    CarNotFound(CarId),

    #[error("race result {0} not found")]
    ResultNotFound(ResultId),

    #[error("storage error: {0}")]
    Storage(String),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::CarNotFound(_) | StoreError::ResultNotFound(_))
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
