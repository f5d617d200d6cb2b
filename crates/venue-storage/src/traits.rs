use venue_core::{Comment, CommentId, Event, EventId, Ticket, TicketId, User, UserId};

pub trait CommentStore: Send + Sync {
    /// Persist a new comment. Identifier assignment is the store's job;
    /// the returned record carries the assigned id.
    fn save(&self, comment: Comment) -> anyhow::Result<Comment>;

    fn find_by_id(&self, id: CommentId) -> anyhow::Result<Option<Comment>>;
    fn find_by_event(&self, event_id: EventId) -> anyhow::Result<Vec<Comment>>;

    /// Rewrite the comment's text and rating. Identifier, author, and event
    /// are carried over from the stored row, never reassigned.
    fn update(&self, comment: Comment) -> anyhow::Result<Comment>;

    fn delete(&self, id: CommentId) -> anyhow::Result<()>;
}

pub trait TicketStore: Send + Sync {
    fn save(&self, ticket: Ticket) -> anyhow::Result<Ticket>;
    fn find_by_id(&self, id: TicketId) -> anyhow::Result<Option<Ticket>>;
    fn find_all(&self) -> anyhow::Result<Vec<Ticket>>;
    fn find_by_event(&self, event_id: EventId) -> anyhow::Result<Vec<Ticket>>;
    fn update(&self, ticket: Ticket) -> anyhow::Result<()>;
    fn delete(&self, id: TicketId) -> anyhow::Result<()>;
}

/// Event lookup doubles as the existence check the moderation flows need.
pub trait EventStore: Send + Sync {
    fn save(&self, event: Event) -> anyhow::Result<Event>;
    fn find_by_id(&self, id: EventId) -> anyhow::Result<Option<Event>>;
    fn find_all(&self) -> anyhow::Result<Vec<Event>>;
}

pub trait UserStore: Send + Sync {
    fn save(&self, user: User) -> anyhow::Result<User>;
    fn find_by_id(&self, id: UserId) -> anyhow::Result<Option<User>>;
}
