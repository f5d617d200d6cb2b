use std::sync::Arc;

use venue_core::{EventId, NotFoundError, Ticket, TicketId};
use venue_storage::{EventStore, TicketStore};
use venue_validate::validate_ticket;

use crate::error::ServiceError;

/// Orchestrates ticket mutations. Tickets carry no owning user, so there
/// is no authorization step; existence checks still gate update and delete.
pub struct TicketService {
    tickets: Arc<dyn TicketStore>,
    events: Arc<dyn EventStore>,
}

impl TicketService {
    pub fn new(tickets: Arc<dyn TicketStore>, events: Arc<dyn EventStore>) -> Self {
        Self { tickets, events }
    }

    pub fn create(&self, draft: Ticket) -> Result<Ticket, ServiceError> {
        validate_ticket(&draft)?;
        let stored = self.tickets.save(draft).map_err(ServiceError::Storage)?;
        tracing::debug!(ticket = stored.id.as_i64(), "ticket created");
        Ok(stored)
    }

    pub fn update(&self, draft: Ticket) -> Result<(), ServiceError> {
        validate_ticket(&draft)?;
        self.tickets
            .find_by_id(draft.id)
            .map_err(ServiceError::Storage)?
            .ok_or(NotFoundError::Ticket(draft.id))?;
        self.tickets.update(draft).map_err(ServiceError::Storage)
    }

    pub fn delete(&self, id: TicketId) -> Result<(), ServiceError> {
        self.tickets
            .find_by_id(id)
            .map_err(ServiceError::Storage)?
            .ok_or(NotFoundError::Ticket(id))?;
        self.tickets.delete(id).map_err(ServiceError::Storage)
    }

    pub fn find(&self, id: TicketId) -> Result<Option<Ticket>, ServiceError> {
        self.tickets.find_by_id(id).map_err(ServiceError::Storage)
    }

    pub fn find_all(&self) -> Result<Vec<Ticket>, ServiceError> {
        self.tickets.find_all().map_err(ServiceError::Storage)
    }

    /// Tickets for one event. The event must exist; a missing event is an
    /// error, the same as the comment listing path.
    pub fn find_by_event(&self, event_id: EventId) -> Result<Vec<Ticket>, ServiceError> {
        let event = self
            .events
            .find_by_id(event_id)
            .map_err(ServiceError::Storage)?;
        if event.is_none() {
            return Err(NotFoundError::Event(event_id).into());
        }
        self.tickets
            .find_by_event(event_id)
            .map_err(ServiceError::Storage)
    }
}
