use venue_core::ValidationError;

/// A single domain rule over a draft record. Rules never consult storage.
pub trait Rule<T>: Send + Sync {
    fn id(&self) -> &str;
    fn check(&self, draft: &T) -> Result<(), ValidationError>;
}

/// Evaluate rules in slice order, short-circuiting on the first failure.
/// The order is part of the contract: when a draft breaks several rules,
/// the earliest rule decides which error the caller sees.
pub fn run_rules<T>(rules: &[&dyn Rule<T>], draft: &T) -> Result<(), ValidationError> {
    for rule in rules {
        rule.check(draft)?;
    }
    Ok(())
}
