//! # Operation Logging
//!
//! Logger collaborator contract for the logging aspect, the tracing-backed
//! default implementation, and subscriber setup for hosts that want it.
//!
//! Recording is fire-and-forget: a logger must never block the pipeline
//! meaningfully and never alters control flow or the returned result.

use serde::Serialize;
use serde_json::Value;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// One recorded business operation.
#[derive(Debug, Clone, Serialize)]
pub struct LogEvent {
    /// Method identity, e.g. `ProductService.get_list_by_category`.
    pub identity: String,

    /// Serialized invocation arguments.
    pub args: Value,

    /// Whether the operation returned a success outcome.
    pub success: bool,

    /// User-facing message of the outcome, or the fault text.
    pub message: Option<String>,
}

/// Logger collaborator contract.
pub trait OperationLogger: Send + Sync {
    fn record(&self, event: &LogEvent);
}

/// Default logger: emits each event as a structured tracing event.
pub struct TracingLogger;

impl OperationLogger for TracingLogger {
    fn record(&self, event: &LogEvent) {
        info!(
            identity = %event.identity,
            args = %event.args,
            success = event.success,
            message = event.message.as_deref().unwrap_or(""),
            "business operation recorded"
        );
    }
}

/// Initializes the global tracing subscriber.
///
/// Meant for the hosting layer (or tests); honors `RUST_LOG` and falls
/// back to `info`. Safe to call more than once, later calls are no-ops.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init();
}
