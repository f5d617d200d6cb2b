use serde::{Deserialize, Serialize};

use crate::ids::{CommentId, EventId, TicketId, UserId};

/// Account that authors comments. Referenced by the moderation flows,
/// never mutated by them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl User {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            id: UserId::UNASSIGNED,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    /// All-default sentinel meaning "no reference supplied".
    pub fn is_placeholder(&self) -> bool {
        *self == Self::default()
    }
}

/// Scheduled event. Existence-checked by the moderation flows, never
/// mutated by them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub name: String,
    pub starts_at_unix: i64,
    pub address: String,
    pub description: String,
}

impl Event {
    pub fn new(
        name: impl Into<String>,
        starts_at_unix: i64,
        address: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: EventId::UNASSIGNED,
            name: name.into(),
            starts_at_unix,
            address: address.into(),
            description: description.into(),
        }
    }

    /// All-default sentinel meaning "no reference supplied".
    pub fn is_placeholder(&self) -> bool {
        *self == Self::default()
    }
}

/// One rated review of an event by one user. The embedded user and event
/// are back-references for authorization and filtering; deleting a comment
/// never touches them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub text: String,
    pub rating: i32,
    pub user: Option<User>,
    pub event: Option<Event>,
}

impl Comment {
    pub fn new(text: impl Into<String>, rating: i32) -> Self {
        Self {
            id: CommentId::UNASSIGNED,
            text: text.into(),
            rating,
            user: None,
            event: None,
        }
    }
}

/// One purchasable class of admission to an event.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: TicketId,
    pub event_id: EventId,
    /// Type label, e.g. "standard" or "vip". Absent until the seller names it.
    pub kind: Option<String>,
    pub price: f64,
    pub quantity_available: i64,
}

impl Ticket {
    pub fn new(event_id: EventId, kind: impl Into<String>, price: f64, quantity_available: i64) -> Self {
        Self {
            id: TicketId::UNASSIGNED,
            event_id,
            kind: Some(kind.into()),
            price,
            quantity_available,
        }
    }
}
