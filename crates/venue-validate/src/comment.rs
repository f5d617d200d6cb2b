use venue_core::{Comment, ValidationError};

use crate::rule::{run_rules, Rule};

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 10;

/// The event reference must be supplied and must not be the all-default
/// placeholder.
pub struct EventSuppliedRule;

impl Rule<Comment> for EventSuppliedRule {
    fn id(&self) -> &str {
        "event_supplied"
    }

    fn check(&self, draft: &Comment) -> Result<(), ValidationError> {
        match &draft.event {
            Some(event) if !event.is_placeholder() => Ok(()),
            _ => Err(ValidationError::MissingEvent),
        }
    }
}

/// The owning-user reference must be supplied and must not be the
/// all-default placeholder.
pub struct UserSuppliedRule;

impl Rule<Comment> for UserSuppliedRule {
    fn id(&self) -> &str {
        "user_supplied"
    }

    fn check(&self, draft: &Comment) -> Result<(), ValidationError> {
        match &draft.user {
            Some(user) if !user.is_placeholder() => Ok(()),
            _ => Err(ValidationError::MissingUser),
        }
    }
}

pub struct TextNotBlankRule;

impl Rule<Comment> for TextNotBlankRule {
    fn id(&self) -> &str {
        "text_not_blank"
    }

    fn check(&self, draft: &Comment) -> Result<(), ValidationError> {
        if draft.text.trim().is_empty() {
            return Err(ValidationError::BlankText);
        }
        Ok(())
    }
}

/// Rejects angle brackets outright rather than attempting sanitization.
pub struct TextSafeRule;

impl Rule<Comment> for TextSafeRule {
    fn id(&self) -> &str {
        "text_safe"
    }

    fn check(&self, draft: &Comment) -> Result<(), ValidationError> {
        if draft.text.contains('<') || draft.text.contains('>') {
            return Err(ValidationError::UnsafeText);
        }
        Ok(())
    }
}

pub struct RatingInRangeRule;

impl Rule<Comment> for RatingInRangeRule {
    fn id(&self) -> &str {
        "rating_in_range"
    }

    fn check(&self, draft: &Comment) -> Result<(), ValidationError> {
        if !(MIN_RATING..=MAX_RATING).contains(&draft.rating) {
            return Err(ValidationError::RatingOutOfRange {
                rating: draft.rating,
            });
        }
        Ok(())
    }
}

/// Comment rules in contract order.
pub fn comment_rules() -> [&'static dyn Rule<Comment>; 5] {
    [
        &EventSuppliedRule,
        &UserSuppliedRule,
        &TextNotBlankRule,
        &TextSafeRule,
        &RatingInRangeRule,
    ]
}

pub fn validate_comment(draft: &Comment) -> Result<(), ValidationError> {
    run_rules(&comment_rules(), draft)
}
