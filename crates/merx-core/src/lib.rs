//! # merx-core: Cross-Cutting Core for Merx
//!
//! This crate is the **heart** of the Merx business layer. It holds the
//! aspect interception pipeline and the uniform result/rule model that
//! every business service is composed from.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        Merx Architecture                            │
//! │                                                                     │
//! │  ┌─────────────────────────────────────────────────────────────┐   │
//! │  │              Web Hosting Layer (external)                   │   │
//! │  │        HTTP routing, serialization, authentication          │   │
//! │  └─────────────────────────────┬───────────────────────────────┘   │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼───────────────────────────────┐   │
//! │  │                merx-catalog (services)                      │   │
//! │  │        CategoryService, ProductService, UserService         │   │
//! │  └─────────────────────────────┬───────────────────────────────┘   │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼───────────────────────────────┐   │
//! │  │              ★ merx-core (THIS CRATE) ★                     │   │
//! │  │                                                             │   │
//! │  │   ┌─────────┐  ┌─────────┐  ┌─────────┐  ┌──────────────┐  │   │
//! │  │   │ results │  │  rules  │  │ aspects │  │ cache/tx/log │  │   │
//! │  │   │ Action  │  │ fail-   │  │Pipeline │  │  contracts   │  │   │
//! │  │   │ /Data   │  │ fast    │  │ + plans │  │  + defaults  │  │   │
//! │  │   └─────────┘  └─────────┘  └─────────┘  └──────────────┘  │   │
//! │  │                                                             │   │
//! │  │          NO I/O • NO DATABASE • NO NETWORK                  │   │
//! │  └─────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`results`] - Uniform success/failure envelopes ([`ActionResult`],
//!   [`DataResult`]) and the [`Outcome`] trait the pipeline works over
//! - [`rules`] - Fail-fast business rule runner
//! - [`aspects`] - Aspect plans, invocations and the [`Pipeline`]
//! - [`cache`] - Cache store contract and in-memory implementation
//! - [`transaction`] - Transaction scope contracts
//! - [`validation`] - Entity validation contract
//! - [`logging`] - Operation logger contract and tracing setup
//! - [`error`] - The [`Fault`] channel for unanticipated errors
//!
//! ## Two Error Channels
//!
//! Expected business failures (rule violations, validation failures) are
//! values: `ActionResult::fail(..)` / `DataResult::fail(..)`. Unanticipated
//! faults (collaborator unreachable, codec errors) are `Err(Fault)` and are
//! never converted into business failures by this crate.

pub mod aspects;
pub mod cache;
pub mod error;
pub mod logging;
pub mod results;
pub mod rules;
pub mod transaction;
pub mod validation;

pub use aspects::{AspectPlan, AspectSpec, Invocation, Pipeline};
pub use cache::{CacheStore, MemoryCache};
pub use error::{Fault, OpResult};
pub use logging::{LogEvent, OperationLogger, TracingLogger};
pub use results::{ActionResult, DataResult, Outcome};
pub use transaction::{NoTransaction, TransactionManager, TransactionScope};
pub use validation::Validate;
