//! # Business Rule Runner
//!
//! Evaluates an ordered sequence of domain precondition checks,
//! short-circuiting on the first failure.
//!
//! ## Contract
//! ```text
//! run([check1, check2, check3])
//!        │
//!        ▼
//!   check1() → None        (passed, keep going)
//!        │
//!        ▼
//!   check2() → Some(fail)  (first failure wins)
//!        │
//!        ▼
//!   return Some(fail)      check3 is NEVER invoked
//! ```
//!
//! Checks are lazy closures so that skipped checks are never evaluated —
//! a check after the failure point must not run, even if it would have
//! touched a collaborator.

use crate::error::OpResult;
use crate::results::ActionResult;

/// A single domain precondition.
///
/// Returns `Ok(None)` when the rule passes, `Ok(Some(failure))` when it is
/// violated, and `Err(fault)` when a collaborator consulted by the check
/// fails unexpectedly.
pub type Check<'a> = Box<dyn FnOnce() -> OpResult<Option<ActionResult>> + 'a>;

/// Runs checks strictly in order, fail-fast.
///
/// The first check returning `Some` decides the outcome; later checks are
/// never invoked. An empty list passes vacuously. Collaborator faults
/// propagate immediately.
pub fn run(checks: Vec<Check<'_>>) -> OpResult<Option<ActionResult>> {
    for check in checks {
        if let Some(failure) = check()? {
            return Ok(Some(failure));
        }
    }
    Ok(None)
}
