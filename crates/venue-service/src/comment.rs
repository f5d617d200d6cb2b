use std::sync::Arc;

use venue_core::{Comment, CommentId, EventId, NotFoundError, UserId, ValidationError};
use venue_storage::{CommentStore, EventStore};
use venue_validate::{authorize, validate_comment, Authored, Decision};

use crate::error::ServiceError;

/// Orchestrates comment mutations: validate, look up, authorize, persist.
/// Collaborators are injected once at construction and never swapped.
pub struct CommentService {
    comments: Arc<dyn CommentStore>,
    events: Arc<dyn EventStore>,
}

impl CommentService {
    pub fn new(comments: Arc<dyn CommentStore>, events: Arc<dyn EventStore>) -> Self {
        Self { comments, events }
    }

    /// Validate and persist a new comment. A draft that fails validation
    /// never reaches storage.
    pub fn create(&self, draft: Comment) -> Result<Comment, ServiceError> {
        validate_comment(&draft)?;
        let stored = self.comments.save(draft).map_err(ServiceError::Storage)?;
        tracing::debug!(comment = stored.id.as_i64(), "comment created");
        Ok(stored)
    }

    /// All comments for an event, in storage order. The event must exist.
    pub fn list(&self, event_id: EventId) -> Result<Vec<Comment>, ServiceError> {
        let event = self
            .events
            .find_by_id(event_id)
            .map_err(ServiceError::Storage)?;
        if event.is_none() {
            return Err(NotFoundError::Event(event_id).into());
        }
        self.comments
            .find_by_event(event_id)
            .map_err(ServiceError::Storage)
    }

    /// Rewrite an existing comment. Only the original author may do so;
    /// identifier, author, and event are carried over, not reassigned.
    pub fn update(&self, draft: Comment) -> Result<Comment, ServiceError> {
        validate_comment(&draft)?;
        let caller = draft.author_id().ok_or(ValidationError::MissingUser)?;
        let existing = self
            .comments
            .find_by_id(draft.id)
            .map_err(ServiceError::Storage)?
            .ok_or(NotFoundError::Comment(draft.id))?;
        match authorize(&existing, caller) {
            Decision::Allow => self.comments.update(draft).map_err(ServiceError::Storage),
            Decision::Deny => Err(ServiceError::NotOwner {
                comment: existing.id,
                user: caller,
            }),
        }
    }

    /// Remove an existing comment. Only the original author may do so.
    pub fn delete(&self, comment_id: CommentId, caller: UserId) -> Result<(), ServiceError> {
        let existing = self
            .comments
            .find_by_id(comment_id)
            .map_err(ServiceError::Storage)?
            .ok_or(NotFoundError::Comment(comment_id))?;
        match authorize(&existing, caller) {
            Decision::Allow => {
                self.comments
                    .delete(comment_id)
                    .map_err(ServiceError::Storage)?;
                tracing::debug!(comment = comment_id.as_i64(), "comment deleted");
                Ok(())
            }
            Decision::Deny => Err(ServiceError::NotOwner {
                comment: comment_id,
                user: caller,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use venue_core::{Event, User};
    use venue_storage::InMemoryStorage;

    /// Counts every store call so tests can assert which collaborators an
    /// operation touched, delegating the work to the in-memory store.
    #[derive(Default)]
    struct RecordingStore {
        inner: InMemoryStorage,
        saves: AtomicUsize,
        finds: AtomicUsize,
        lists: AtomicUsize,
        updates: AtomicUsize,
        deletes: AtomicUsize,
    }

    impl CommentStore for RecordingStore {
        fn save(&self, comment: Comment) -> anyhow::Result<Comment> {
            self.saves.fetch_add(1, Ordering::SeqCst);
            CommentStore::save(&self.inner, comment)
        }

        fn find_by_id(&self, id: CommentId) -> anyhow::Result<Option<Comment>> {
            self.finds.fetch_add(1, Ordering::SeqCst);
            CommentStore::find_by_id(&self.inner, id)
        }

        fn find_by_event(&self, event_id: EventId) -> anyhow::Result<Vec<Comment>> {
            self.lists.fetch_add(1, Ordering::SeqCst);
            CommentStore::find_by_event(&self.inner, event_id)
        }

        fn update(&self, comment: Comment) -> anyhow::Result<Comment> {
            self.updates.fetch_add(1, Ordering::SeqCst);
            CommentStore::update(&self.inner, comment)
        }

        fn delete(&self, id: CommentId) -> anyhow::Result<()> {
            self.deletes.fetch_add(1, Ordering::SeqCst);
            CommentStore::delete(&self.inner, id)
        }
    }

    struct Fixture {
        comments: Arc<RecordingStore>,
        service: CommentService,
        event: Event,
        author: User,
    }

    fn fixture() -> Fixture {
        let comments = Arc::new(RecordingStore::default());
        let events = Arc::new(InMemoryStorage::new());
        let event = venue_storage::EventStore::save(
            events.as_ref(),
            Event::new("open mic", 1_700_000_000, "12 Main St", "weekly session"),
        )
        .unwrap();
        let author = User {
            id: venue_core::UserId::new(1),
            ..User::new("Ana", "Reyes", "ana@example.com", "secret")
        };
        let service = CommentService::new(comments.clone(), events);
        Fixture {
            comments,
            service,
            event,
            author,
        }
    }

    fn draft(fx: &Fixture, text: &str, rating: i32) -> Comment {
        let mut draft = Comment::new(text, rating);
        draft.user = Some(fx.author.clone());
        draft.event = Some(fx.event.clone());
        draft
    }

    #[test]
    fn test_create_rejects_out_of_range_rating_without_saving() {
        let fx = fixture();
        for rating in [0, 11, -3] {
            let err = fx.service.create(draft(&fx, "text", rating)).unwrap_err();
            assert!(matches!(
                err,
                ServiceError::Validation(ValidationError::RatingOutOfRange { .. })
            ));
        }
        assert_eq!(fx.comments.saves.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_create_rejects_unsafe_text() {
        let fx = fixture();
        let err = fx.service.create(draft(&fx, "<text>", 5)).unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Validation(ValidationError::UnsafeText)
        ));
        assert_eq!(fx.comments.saves.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_create_rejects_placeholder_references() {
        let fx = fixture();

        let mut no_event = draft(&fx, "hello", 5);
        no_event.event = Some(Event::default());
        let err = fx.service.create(no_event).unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Validation(ValidationError::MissingEvent)
        ));

        let mut no_user = draft(&fx, "hello", 5);
        no_user.user = None;
        let err = fx.service.create(no_user).unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Validation(ValidationError::MissingUser)
        ));

        assert_eq!(fx.comments.saves.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_create_returns_input_with_assigned_id() {
        let fx = fixture();
        let input = draft(&fx, "hello", 5);
        let stored = fx.service.create(input.clone()).unwrap();

        assert!(!stored.id.is_unassigned());
        let mut expected = input;
        expected.id = stored.id;
        assert_eq!(stored, expected);
    }

    #[test]
    fn test_list_fails_for_unknown_event_without_listing() {
        let fx = fixture();
        let missing = EventId::new(999);
        let err = fx.service.list(missing).unwrap_err();
        assert!(matches!(
            err,
            ServiceError::NotFound(NotFoundError::Event(id)) if id == missing
        ));
        assert_eq!(fx.comments.lists.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_list_returns_event_comments() {
        let fx = fixture();
        fx.service.create(draft(&fx, "one", 5)).unwrap();
        fx.service.create(draft(&fx, "two", 3)).unwrap();

        let listed = fx.service.list(fx.event.id).unwrap();
        let texts: Vec<&str> = listed.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["one", "two"]);
    }

    #[test]
    fn test_update_missing_comment_is_not_found() {
        let fx = fixture();
        let mut edited = draft(&fx, "edited", 5);
        edited.id = CommentId::new(42);
        let err = fx.service.update(edited).unwrap_err();
        assert!(matches!(
            err,
            ServiceError::NotFound(NotFoundError::Comment(id)) if id == CommentId::new(42)
        ));
    }

    #[test]
    fn test_update_by_non_author_is_denied_without_writing() {
        let fx = fixture();
        let stored = fx.service.create(draft(&fx, "original", 5)).unwrap();

        let mut hijack = stored.clone();
        hijack.text = "hijacked".to_string();
        hijack.user = Some(User {
            id: UserId::new(2),
            ..User::new("Eve", "Mallory", "eve@example.com", "pw")
        });

        let err = fx.service.update(hijack).unwrap_err();
        assert!(matches!(err, ServiceError::NotOwner { user, .. } if user == UserId::new(2)));
        assert_eq!(fx.comments.updates.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_update_by_author_persists() {
        let fx = fixture();
        let stored = fx.service.create(draft(&fx, "original", 5)).unwrap();

        let mut edited = stored.clone();
        edited.text = "edited".to_string();
        edited.rating = 9;

        let updated = fx.service.update(edited).unwrap();
        assert_eq!(updated.text, "edited");
        assert_eq!(updated.rating, 9);
        assert_eq!(updated.id, stored.id);
        assert_eq!(fx.comments.updates.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_delete_missing_comment_is_not_found() {
        let fx = fixture();
        let err = fx
            .service
            .delete(CommentId::new(7), fx.author.id)
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::NotFound(NotFoundError::Comment(_))
        ));
        assert_eq!(fx.comments.deletes.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_delete_by_non_author_is_denied() {
        let fx = fixture();
        let stored = fx.service.create(draft(&fx, "mine", 5)).unwrap();

        let err = fx.service.delete(stored.id, UserId::new(2)).unwrap_err();
        assert!(matches!(err, ServiceError::NotOwner { .. }));
        assert_eq!(fx.comments.deletes.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_delete_by_author_looks_up_once_then_deletes_once() {
        let fx = fixture();
        let stored = fx.service.create(draft(&fx, "mine", 5)).unwrap();

        fx.comments.finds.store(0, Ordering::SeqCst);
        fx.service.delete(stored.id, fx.author.id).unwrap();

        assert_eq!(fx.comments.finds.load(Ordering::SeqCst), 1);
        assert_eq!(fx.comments.deletes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_second_delete_fails_not_found() {
        let fx = fixture();
        let stored = fx.service.create(draft(&fx, "mine", 5)).unwrap();

        fx.service.delete(stored.id, fx.author.id).unwrap();
        let err = fx.service.delete(stored.id, fx.author.id).unwrap_err();
        assert!(matches!(
            err,
            ServiceError::NotFound(NotFoundError::Comment(id)) if id == stored.id
        ));
    }
}
