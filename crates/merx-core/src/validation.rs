//! # Validation Contract
//!
//! The validator collaborator seam used by the validation aspect.
//!
//! An entity reports zero or more violation messages; the validation
//! aspect surfaces only the first one (fail-fast, same discipline as the
//! rule runner). Concrete validators live next to the entities they
//! validate, in the business crates.

/// Schema/rule-based validation of an entity instance.
pub trait Validate {
    /// Violation messages in rule-declaration order. Empty means valid.
    fn violations(&self) -> Vec<String>;
}
