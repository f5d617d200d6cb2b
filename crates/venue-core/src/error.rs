//! Domain error types.

use thiserror::Error;

use crate::ids::{CommentId, EventId, TicketId};

/// A draft record broke a domain rule. Raised before any storage call;
/// a draft that fails validation is never partially persisted.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("comment must reference an event")]
    MissingEvent,

    #[error("comment must reference a user")]
    MissingUser,

    #[error("comment text must not be blank")]
    BlankText,

    #[error("comment text must not contain '<' or '>'")]
    UnsafeText,

    #[error("rating must be between 1 and 10, got {rating}")]
    RatingOutOfRange { rating: i32 },

    #[error("ticket price must be greater than zero, got {price}")]
    InvalidPrice { price: f64 },

    #[error("ticket quantity must not be negative, got {quantity}")]
    InvalidQuantity { quantity: i64 },

    #[error("ticket type must be specified")]
    MissingType,
}

/// A record the operation depends on does not exist. Kept distinct from
/// validation and authorization failures so callers can map each category
/// to its own response.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum NotFoundError {
    #[error("comment {0} not found")]
    Comment(CommentId),

    #[error("ticket {0} not found")]
    Ticket(TicketId),

    #[error("event {0} not found")]
    Event(EventId),
}
