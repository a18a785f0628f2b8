//! # Data-Access Contract
//!
//! The repository collaborator consumed by the business services.
//!
//! Concrete implementations (ORM-backed, networked) live with the hosting
//! application; this crate only defines the seam plus the in-memory
//! reference implementation in [`crate::memory`]. Repositories signal
//! unavailability with [`Fault::DataAccess`], which the services let
//! propagate untouched.
//!
//! [`Fault::DataAccess`]: merx_core::Fault::DataAccess

use merx_core::error::OpResult;
use uuid::Uuid;

/// Entities addressable by a stable UUID key.
pub trait Keyed {
    fn key(&self) -> Uuid;
}

/// Row predicate used by lookups, mirroring an ORM filter expression.
pub type Predicate<'a, T> = &'a dyn Fn(&T) -> bool;

/// Repository collaborator contract, one per entity type.
///
/// Object safe so services can hold `Arc<dyn Repository<T>>`.
pub trait Repository<T>: Send + Sync {
    /// First entity matching `predicate`, if any.
    fn get(&self, predicate: Predicate<'_, T>) -> OpResult<Option<T>>;

    /// All entities, optionally filtered.
    fn get_list(&self, predicate: Option<Predicate<'_, T>>) -> OpResult<Vec<T>>;

    fn add(&self, entity: &T) -> OpResult<()>;

    fn update(&self, entity: &T) -> OpResult<()>;

    fn delete(&self, entity: &T) -> OpResult<()>;
}
