//! # Error Types
//!
//! The fault channel for unanticipated errors.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Two Outcome Channels                           │
//! │                                                                     │
//! │  Expected business failure                                          │
//! │  (rule violated, validation failed)                                 │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  Ok(ActionResult::fail(..))  ← callers branch on `success`          │
//! │                                                                     │
//! │  Unanticipated fault                                                │
//! │  (repository unreachable, codec error)                              │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  Err(Fault)  ← propagates with `?`, never swallowed                 │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Unanticipated faults raised by collaborators or the pipeline itself.
///
/// These are never used for expected business failures; those travel
/// in-band as `ActionResult`/`DataResult` values.
#[derive(Debug, Error)]
pub enum Fault {
    /// The data-access collaborator failed.
    ///
    /// ## When This Occurs
    /// - Repository backend unreachable
    /// - Storage-level constraint or connection error
    ///
    /// The core does not interpret the text beyond carrying it upward.
    #[error("data access failed: {0}")]
    DataAccess(String),

    /// Serializing or deserializing a pipeline value failed.
    ///
    /// ## When This Occurs
    /// - A cached outcome no longer matches the expected shape
    /// - An invocation argument cannot be serialized
    #[error("codec failed: {0}")]
    Codec(#[from] serde_json::Error),
}

/// Result alias used by every fallible operation in the workspace.
pub type OpResult<T> = std::result::Result<T, Fault>;
