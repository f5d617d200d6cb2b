use venue_core::{Ticket, ValidationError};

use crate::rule::{run_rules, Rule};

pub struct PricePositiveRule;

impl Rule<Ticket> for PricePositiveRule {
    fn id(&self) -> &str {
        "price_positive"
    }

    fn check(&self, draft: &Ticket) -> Result<(), ValidationError> {
        if draft.price <= 0.0 {
            return Err(ValidationError::InvalidPrice { price: draft.price });
        }
        Ok(())
    }
}

pub struct QuantityNonNegativeRule;

impl Rule<Ticket> for QuantityNonNegativeRule {
    fn id(&self) -> &str {
        "quantity_non_negative"
    }

    fn check(&self, draft: &Ticket) -> Result<(), ValidationError> {
        if draft.quantity_available < 0 {
            return Err(ValidationError::InvalidQuantity {
                quantity: draft.quantity_available,
            });
        }
        Ok(())
    }
}

pub struct KindSuppliedRule;

impl Rule<Ticket> for KindSuppliedRule {
    fn id(&self) -> &str {
        "kind_supplied"
    }

    fn check(&self, draft: &Ticket) -> Result<(), ValidationError> {
        if draft.kind.is_none() {
            return Err(ValidationError::MissingType);
        }
        Ok(())
    }
}

/// Ticket rules in contract order.
pub fn ticket_rules() -> [&'static dyn Rule<Ticket>; 3] {
    [&PricePositiveRule, &QuantityNonNegativeRule, &KindSuppliedRule]
}

pub fn validate_ticket(draft: &Ticket) -> Result<(), ValidationError> {
    run_rules(&ticket_rules(), draft)
}

#[cfg(test)]
mod tests {
    use super::*;
    use venue_core::EventId;

    fn valid_draft() -> Ticket {
        Ticket::new(EventId::new(1), "standard", 15.0, 100)
    }

    #[test]
    fn test_valid_ticket_passes() {
        assert_eq!(validate_ticket(&valid_draft()), Ok(()));
    }

    #[test]
    fn test_zero_price_rejected() {
        let mut draft = valid_draft();
        draft.price = 0.0;
        assert_eq!(
            validate_ticket(&draft),
            Err(ValidationError::InvalidPrice { price: 0.0 })
        );
    }

    #[test]
    fn test_negative_quantity_rejected() {
        let mut draft = valid_draft();
        draft.quantity_available = -1;
        assert_eq!(
            validate_ticket(&draft),
            Err(ValidationError::InvalidQuantity { quantity: -1 })
        );
    }

    #[test]
    fn test_missing_kind_rejected() {
        let mut draft = valid_draft();
        draft.kind = None;
        assert_eq!(validate_ticket(&draft), Err(ValidationError::MissingType));
    }

    #[test]
    fn test_first_failing_rule_wins() {
        // Bad price and bad quantity together: the price rule comes first.
        let mut draft = valid_draft();
        draft.price = -5.0;
        draft.quantity_available = -1;
        draft.kind = None;
        assert_eq!(
            validate_ticket(&draft),
            Err(ValidationError::InvalidPrice { price: -5.0 })
        );
    }

    #[test]
    fn test_zero_quantity_is_allowed() {
        let mut draft = valid_draft();
        draft.quantity_available = 0;
        assert_eq!(validate_ticket(&draft), Ok(()));
    }
}
