//! # Transaction Contracts
//!
//! The transaction scope seam used by the transaction aspect.
//!
//! ## Semantics
//! ```text
//! begin()
//!   │
//!   ├── body returns Ok(_)      → scope.commit()
//!   │     (a business `fail` is still Ok: only faults abort the scope,
//!   │      matching ambient-transaction behavior)
//!   │
//!   └── body returns Err(fault) → scope.rollback(), fault propagates
//! ```
//!
//! One scope per outer pipeline invocation; a scope never spans concurrent
//! calls. Real managers ship with the data-access collaborator; this crate
//! only provides the no-op default.

/// An open transaction covering the collaborator calls of one method body.
pub trait TransactionScope {
    /// Makes every write inside the scope durable.
    fn commit(self: Box<Self>);

    /// Discards every write made inside the scope.
    fn rollback(self: Box<Self>);
}

/// Opens transaction scopes for the transaction aspect.
pub trait TransactionManager: Send + Sync {
    fn begin(&self) -> Box<dyn TransactionScope>;
}

/// Default manager for pipelines whose collaborators are not transactional.
pub struct NoTransaction;

struct NoScope;

impl TransactionScope for NoScope {
    fn commit(self: Box<Self>) {}

    fn rollback(self: Box<Self>) {}
}

impl TransactionManager for NoTransaction {
    fn begin(&self) -> Box<dyn TransactionScope> {
        Box::new(NoScope)
    }
}
