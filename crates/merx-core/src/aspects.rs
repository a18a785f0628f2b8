//! # Aspect Pipeline
//!
//! Ordered interceptors wrapping a business method invocation with
//! cross-cutting behavior the method does not hand-write inline.
//!
//! ## Stage Order (outermost → innermost)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  1. Validation        short-circuits on the first violation         │
//! │  2. Cache (read)      short-circuits on a live cache hit            │
//! │  3. CacheInvalidate   clears a key prefix after a successful body   │
//! │  4. Transaction       commit on Ok, rollback + rethrow on fault     │
//! │  5. Performance       warns when the body exceeds a threshold       │
//! │  6. Logging           records identity, args, outcome               │
//! │  ──────────────────────────────────────────────────────────────     │
//! │                         method body                                 │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Validation must run before the body and before any cache lookup, and
//! the transaction scope wraps only the body-side stages. `AspectPlan`
//! normalizes declared stages into this precedence, so a service cannot
//! declare a plan with validation inside the transaction.
//!
//! ## State Machine Per Call
//! ```text
//! Entered → {ValidationFailed | CacheHit}          (terminal, early return)
//!         → BodyExecuting
//!         → {BodyFaulted (terminal, fault propagates) | BodySucceeded}
//!         → PostProcessing(cache-invalidate, perf, log)
//!         → Returned
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::cache::CacheStore;
use crate::error::OpResult;
use crate::logging::{LogEvent, OperationLogger};
use crate::results::Outcome;
use crate::transaction::TransactionManager;
use crate::validation::Validate;

// =============================================================================
// Aspect Descriptors
// =============================================================================

/// One declared aspect with its configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AspectSpec {
    /// Validate the invocation subject; fail fast on the first violation.
    Validation,

    /// Read-through cache for non-mutating operations.
    Cache { ttl: Duration },

    /// Coarse prefix invalidation after a successful mutating operation.
    CacheInvalidate { prefix: String },

    /// All-or-nothing scope around the method body's collaborator calls.
    Transaction,

    /// Warn when the wrapped call outlives `threshold`.
    Performance { threshold: Duration },

    /// Record identity, arguments and outcome.
    Logging,
}

impl AspectSpec {
    /// Fixed stage precedence, outermost first.
    fn rank(&self) -> u8 {
        match self {
            AspectSpec::Validation => 0,
            AspectSpec::Cache { .. } => 1,
            AspectSpec::CacheInvalidate { .. } => 2,
            AspectSpec::Transaction => 3,
            AspectSpec::Performance { .. } => 4,
            AspectSpec::Logging => 5,
        }
    }
}

/// Ordered aspect chain attached to one method identity.
///
/// Declared once at service construction and immutable afterwards; every
/// invocation walks the same stages. Construction sorts the declared
/// stages into the fixed precedence (stable, so duplicates keep their
/// declared relative order).
#[derive(Debug, Clone, Default)]
pub struct AspectPlan {
    stages: Vec<AspectSpec>,
}

impl AspectPlan {
    pub fn new(stages: impl IntoIterator<Item = AspectSpec>) -> Self {
        let mut stages: Vec<AspectSpec> = stages.into_iter().collect();
        stages.sort_by_key(AspectSpec::rank);
        AspectPlan { stages }
    }

    /// Plan with no interception; the body runs bare.
    pub fn none() -> Self {
        AspectPlan::default()
    }

    pub fn stages(&self) -> &[AspectSpec] {
        &self.stages
    }
}

// =============================================================================
// Invocation
// =============================================================================

/// Identity and arguments of one intercepted call.
pub struct Invocation<'a> {
    service: &'static str,
    operation: &'static str,
    args: Vec<Value>,
    subject: Option<&'a dyn Validate>,
}

impl<'a> Invocation<'a> {
    pub fn new(service: &'static str, operation: &'static str) -> Self {
        Invocation {
            service,
            operation,
            args: Vec::new(),
            subject: None,
        }
    }

    /// Appends a serialized argument (used for cache keys and log events).
    pub fn arg<T: Serialize>(mut self, value: &T) -> OpResult<Self> {
        self.args.push(serde_json::to_value(value)?);
        Ok(self)
    }

    /// Sets the first mutating argument as the validation subject.
    pub fn subject(mut self, subject: &'a dyn Validate) -> Self {
        self.subject = Some(subject);
        self
    }

    /// `Service.operation`, the method identity.
    pub fn identity(&self) -> String {
        format!("{}.{}", self.service, self.operation)
    }

    /// Deterministic cache key: method identity plus argument values.
    pub fn cache_key(&self) -> String {
        format!(
            "{}.{}:{}",
            self.service,
            self.operation,
            Value::Array(self.args.clone())
        )
    }
}

// =============================================================================
// Pipeline
// =============================================================================

/// Executes aspect plans around method bodies.
///
/// Holds the shared collaborators; one pipeline instance is shared by all
/// services (and all concurrent requests) of a host.
pub struct Pipeline {
    cache: Arc<dyn CacheStore>,
    transactions: Arc<dyn TransactionManager>,
    logger: Arc<dyn OperationLogger>,
}

impl Pipeline {
    pub fn new(
        cache: Arc<dyn CacheStore>,
        transactions: Arc<dyn TransactionManager>,
        logger: Arc<dyn OperationLogger>,
    ) -> Self {
        Pipeline {
            cache,
            transactions,
            logger,
        }
    }

    /// Runs `body` under the stages of `plan`.
    ///
    /// The body is invoked at most once per call: not at all on a
    /// validation failure or cache hit.
    pub fn execute<T: Outcome>(
        &self,
        plan: &AspectPlan,
        invocation: &Invocation<'_>,
        body: &mut dyn FnMut() -> OpResult<T>,
    ) -> OpResult<T> {
        self.run_stage(plan.stages(), invocation, body)
    }

    fn run_stage<T: Outcome>(
        &self,
        stages: &[AspectSpec],
        invocation: &Invocation<'_>,
        body: &mut dyn FnMut() -> OpResult<T>,
    ) -> OpResult<T> {
        let Some((stage, rest)) = stages.split_first() else {
            return body();
        };

        match stage {
            AspectSpec::Validation => {
                if let Some(subject) = invocation.subject {
                    if let Some(first) = subject.violations().into_iter().next() {
                        // No deeper stage and no collaborator call may
                        // happen once the input is known to be invalid.
                        return Ok(T::fail_with(first));
                    }
                }
                self.run_stage(rest, invocation, body)
            }

            AspectSpec::Cache { ttl } => {
                let key = invocation.cache_key();
                if let Some(value) = self.cache.get(&key) {
                    return Ok(serde_json::from_value(value)?);
                }
                let outcome = self.run_stage(rest, invocation, body)?;
                self.cache.set(&key, serde_json::to_value(&outcome)?, *ttl);
                Ok(outcome)
            }

            AspectSpec::CacheInvalidate { prefix } => {
                let outcome = self.run_stage(rest, invocation, body)?;
                if outcome.is_success() {
                    self.cache.remove_by_prefix(prefix);
                }
                Ok(outcome)
            }

            AspectSpec::Transaction => {
                let scope = self.transactions.begin();
                match self.run_stage(rest, invocation, body) {
                    Ok(outcome) => {
                        scope.commit();
                        Ok(outcome)
                    }
                    Err(fault) => {
                        scope.rollback();
                        Err(fault)
                    }
                }
            }

            AspectSpec::Performance { threshold } => {
                let started = Instant::now();
                let outcome = self.run_stage(rest, invocation, body);
                let elapsed = started.elapsed();
                if elapsed > *threshold {
                    warn!(
                        identity = %invocation.identity(),
                        elapsed_ms = elapsed.as_millis() as u64,
                        threshold_ms = threshold.as_millis() as u64,
                        "operation exceeded performance threshold"
                    );
                }
                outcome
            }

            AspectSpec::Logging => {
                let outcome = self.run_stage(rest, invocation, body);
                let (success, message) = match &outcome {
                    Ok(out) => (out.is_success(), out.message().map(str::to_owned)),
                    Err(fault) => (false, Some(fault.to_string())),
                };
                self.logger.record(&LogEvent {
                    identity: invocation.identity(),
                    args: Value::Array(invocation.args.clone()),
                    success,
                    message,
                });
                outcome
            }
        }
    }
}
