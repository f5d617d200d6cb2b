//! Service-level error type composing the domain taxonomy.

use thiserror::Error;
use venue_core::{CommentId, NotFoundError, UserId, ValidationError};

/// Every failure an orchestrator can return. Validation, not-found, and
/// authorization stay distinct categories so callers can map each to its
/// own response; storage failures are the collaborator's errors passed
/// through unchanged.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// Raised only after existence is confirmed; never conflated with
    /// not-found.
    #[error("user {user} is not the author of comment {comment}")]
    NotOwner { comment: CommentId, user: UserId },

    #[error("storage failure")]
    Storage(#[source] anyhow::Error),
}
