use venue_core::{Comment, UserId};

/// Outcome of an ownership check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
}

/// Records that carry the identity of the user who created them.
pub trait Authored {
    fn author_id(&self) -> Option<UserId>;
}

impl Authored for Comment {
    fn author_id(&self) -> Option<UserId> {
        self.user.as_ref().map(|u| u.id)
    }
}

/// Pure equality check between the stored author and the claimed caller.
/// Only meaningful after the record's existence has been confirmed; absence
/// of an author denies rather than allows.
pub fn authorize<R: Authored>(record: &R, claimed: UserId) -> Decision {
    match record.author_id() {
        Some(owner) if owner == claimed => Decision::Allow,
        _ => Decision::Deny,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use venue_core::User;

    fn comment_by(user_id: i64) -> Comment {
        let mut comment = Comment::new("text", 5);
        comment.user = Some(User {
            id: UserId::new(user_id),
            ..User::default()
        });
        comment
    }

    #[test]
    fn test_author_is_allowed() {
        assert_eq!(authorize(&comment_by(1), UserId::new(1)), Decision::Allow);
    }

    #[test]
    fn test_other_user_is_denied() {
        assert_eq!(authorize(&comment_by(1), UserId::new(2)), Decision::Deny);
    }

    #[test]
    fn test_missing_author_is_denied() {
        let comment = Comment::new("text", 5);
        assert_eq!(authorize(&comment, UserId::new(1)), Decision::Deny);
    }
}
