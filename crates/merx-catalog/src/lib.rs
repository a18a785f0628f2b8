//! # merx-catalog: Business Services for Merx
//!
//! Thin domain orchestrators over the merx-core aspect pipeline.
//!
//! ## Service Anatomy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  service method                                                     │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  aspect pipeline (per-method AspectPlan, built at construction)     │
//! │       │   validation / cache / transaction / perf / logging         │
//! │       ▼                                                             │
//! │  method body                                                        │
//! │       ├── rule runner (domain preconditions, fail-fast)             │
//! │       ├── exactly one data-access operation                         │
//! │       └── ActionResult / DataResult with a message constant         │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cross-service collaboration (ProductService consulting categories)
//! goes through the public Result-returning trait, never a repository
//! shortcut.
//!
//! ## Modules
//!
//! - [`entities`] - Category, Product, User
//! - [`validators`] - `Validate` impls surfaced by the validation aspect
//! - [`messages`] - user-facing message constants
//! - [`data_access`] - the repository collaborator contract
//! - [`memory`] - in-memory repository + transaction manager (reference)
//! - [`services`] - the three business services and their traits

pub mod data_access;
pub mod entities;
pub mod memory;
pub mod messages;
pub mod services;
pub mod validators;

pub use data_access::{Keyed, Repository};
pub use entities::{Category, Product, User};
pub use memory::{MemoryRepository, MemoryTransactionManager};
pub use services::{
    Categories, CategoryService, ProductService, ProductServiceConfig, Products, UserService,
    Users,
};
