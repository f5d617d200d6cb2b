use std::collections::HashMap;
use std::sync::Mutex;

use venue_core::{Comment, CommentId, Event, EventId, Ticket, TicketId, User, UserId};

use crate::traits::{CommentStore, EventStore, TicketStore, UserStore};

/// In-memory storage for tests. Not durable, but good for unit/scenario
/// tests of the mutation flows.
#[derive(Default)]
pub struct InMemoryStorage {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    users: HashMap<i64, User>,
    events: HashMap<i64, Event>,
    comments: HashMap<i64, Comment>,
    tickets: HashMap<i64, Ticket>,
    next_id: i64,
}

impl Inner {
    fn assign_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CommentStore for InMemoryStorage {
    fn save(&self, mut comment: Comment) -> anyhow::Result<Comment> {
        let mut inner = self.inner.lock().unwrap();
        if comment.id.is_unassigned() {
            comment.id = CommentId::new(inner.assign_id());
        }
        inner.comments.insert(comment.id.as_i64(), comment.clone());
        Ok(comment)
    }

    fn find_by_id(&self, id: CommentId) -> anyhow::Result<Option<Comment>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.comments.get(&id.as_i64()).cloned())
    }

    fn find_by_event(&self, event_id: EventId) -> anyhow::Result<Vec<Comment>> {
        let inner = self.inner.lock().unwrap();
        let mut found: Vec<Comment> = inner
            .comments
            .values()
            .filter(|c| c.event.as_ref().map(|e| e.id) == Some(event_id))
            .cloned()
            .collect();
        found.sort_by_key(|c| c.id);
        Ok(found)
    }

    fn update(&self, comment: Comment) -> anyhow::Result<Comment> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(stored) = inner.comments.get_mut(&comment.id.as_i64()) {
            stored.text = comment.text;
            stored.rating = comment.rating;
            return Ok(stored.clone());
        }
        Ok(comment)
    }

    fn delete(&self, id: CommentId) -> anyhow::Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.comments.remove(&id.as_i64());
        Ok(())
    }
}

impl TicketStore for InMemoryStorage {
    fn save(&self, mut ticket: Ticket) -> anyhow::Result<Ticket> {
        let mut inner = self.inner.lock().unwrap();
        if ticket.id.is_unassigned() {
            ticket.id = TicketId::new(inner.assign_id());
        }
        inner.tickets.insert(ticket.id.as_i64(), ticket.clone());
        Ok(ticket)
    }

    fn find_by_id(&self, id: TicketId) -> anyhow::Result<Option<Ticket>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.tickets.get(&id.as_i64()).cloned())
    }

    fn find_all(&self) -> anyhow::Result<Vec<Ticket>> {
        let inner = self.inner.lock().unwrap();
        let mut found: Vec<Ticket> = inner.tickets.values().cloned().collect();
        found.sort_by_key(|t| t.id);
        Ok(found)
    }

    fn find_by_event(&self, event_id: EventId) -> anyhow::Result<Vec<Ticket>> {
        let inner = self.inner.lock().unwrap();
        let mut found: Vec<Ticket> = inner
            .tickets
            .values()
            .filter(|t| t.event_id == event_id)
            .cloned()
            .collect();
        found.sort_by_key(|t| t.id);
        Ok(found)
    }

    fn update(&self, ticket: Ticket) -> anyhow::Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.tickets.insert(ticket.id.as_i64(), ticket);
        Ok(())
    }

    fn delete(&self, id: TicketId) -> anyhow::Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.tickets.remove(&id.as_i64());
        Ok(())
    }
}

impl EventStore for InMemoryStorage {
    fn save(&self, mut event: Event) -> anyhow::Result<Event> {
        let mut inner = self.inner.lock().unwrap();
        if event.id.is_unassigned() {
            event.id = EventId::new(inner.assign_id());
        }
        inner.events.insert(event.id.as_i64(), event.clone());
        Ok(event)
    }

    fn find_by_id(&self, id: EventId) -> anyhow::Result<Option<Event>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.events.get(&id.as_i64()).cloned())
    }

    fn find_all(&self) -> anyhow::Result<Vec<Event>> {
        let inner = self.inner.lock().unwrap();
        let mut found: Vec<Event> = inner.events.values().cloned().collect();
        found.sort_by_key(|e| e.id);
        Ok(found)
    }
}

impl UserStore for InMemoryStorage {
    fn save(&self, mut user: User) -> anyhow::Result<User> {
        let mut inner = self.inner.lock().unwrap();
        if user.id.is_unassigned() {
            user.id = UserId::new(inner.assign_id());
        }
        inner.users.insert(user.id.as_i64(), user.clone());
        Ok(user)
    }

    fn find_by_id(&self, id: UserId) -> anyhow::Result<Option<User>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.users.get(&id.as_i64()).cloned())
    }
}
