//! # Result Model
//!
//! Uniform success/failure envelopes returned by every business operation.
//!
//! ## Shapes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  ActionResult            DataResult<T>                              │
//! │  ─────────────           ─────────────                              │
//! │  success: bool           success: bool                              │
//! │  message: Option         message: Option                            │
//! │                          data:    Option<T>                         │
//! │                                                                     │
//! │  Add / Update / Delete   Get / GetList                              │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `success == true` does **not** guarantee `data.is_some()`: a lookup may
//! legitimately succeed with no match. Callers null-check separately.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Outcome of a payload-free business operation (Add/Update/Delete).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResult {
    pub success: bool,
    pub message: Option<String>,
}

impl ActionResult {
    /// Success with no user-facing text.
    pub fn ok() -> Self {
        ActionResult {
            success: true,
            message: None,
        }
    }

    /// Success with a user-facing message.
    pub fn ok_with(message: impl Into<String>) -> Self {
        ActionResult {
            success: true,
            message: Some(message.into()),
        }
    }

    /// Expected business failure. The only channel for anticipated errors.
    pub fn fail(message: impl Into<String>) -> Self {
        ActionResult {
            success: false,
            message: Some(message.into()),
        }
    }
}

/// Outcome of a payload-carrying business operation (Get/GetList).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataResult<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> DataResult<T> {
    /// Success carrying a payload.
    pub fn ok(data: T) -> Self {
        DataResult {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    /// Success carrying a payload and a user-facing message.
    pub fn ok_with(data: T, message: impl Into<String>) -> Self {
        DataResult {
            success: true,
            message: Some(message.into()),
            data: Some(data),
        }
    }

    /// Success with no match (e.g. lookup found nothing).
    pub fn ok_empty() -> Self {
        DataResult {
            success: true,
            message: None,
            data: None,
        }
    }

    /// Success wrapping an optional lookup result.
    pub fn ok_maybe(data: Option<T>) -> Self {
        DataResult {
            success: true,
            message: None,
            data,
        }
    }

    /// Expected business failure; never carries a payload.
    pub fn fail(message: impl Into<String>) -> Self {
        DataResult {
            success: false,
            message: Some(message.into()),
            data: None,
        }
    }
}

/// What the aspect pipeline needs from an operation outcome.
///
/// Implemented by [`ActionResult`] and [`DataResult`] so the pipeline can
/// short-circuit (validation failure, cache hit), test for success
/// (cache invalidation) and log outcomes without knowing the payload type.
/// The serde bounds let the cache aspect round-trip outcomes as JSON.
pub trait Outcome: Serialize + DeserializeOwned + Clone {
    /// Builds the failure shape of this outcome.
    fn fail_with(message: String) -> Self;

    fn is_success(&self) -> bool;

    fn message(&self) -> Option<&str>;
}

impl Outcome for ActionResult {
    fn fail_with(message: String) -> Self {
        ActionResult::fail(message)
    }

    fn is_success(&self) -> bool {
        self.success
    }

    fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl<T> Outcome for DataResult<T>
where
    T: Serialize + DeserializeOwned + Clone,
{
    fn fail_with(message: String) -> Self {
        DataResult::fail(message)
    }

    fn is_success(&self) -> bool {
        self.success
    }

    fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_result_constructors() {
        assert_eq!(
            ActionResult::ok(),
            ActionResult {
                success: true,
                message: None
            }
        );
        assert_eq!(
            ActionResult::ok_with("done"),
            ActionResult {
                success: true,
                message: Some("done".to_string())
            }
        );
        assert_eq!(
            ActionResult::fail("nope"),
            ActionResult {
                success: false,
                message: Some("nope".to_string())
            }
        );
    }

    #[test]
    fn test_data_result_success_without_payload() {
        // A lookup can succeed with no match
        let result: DataResult<i32> = DataResult::ok_empty();
        assert!(result.success);
        assert!(result.data.is_none());

        let maybe: DataResult<i32> = DataResult::ok_maybe(None);
        assert!(maybe.success);
        assert!(maybe.data.is_none());

        let found = DataResult::ok_maybe(Some(7));
        assert_eq!(found.data, Some(7));
    }

    #[test]
    fn test_data_result_failure_has_no_payload() {
        let result: DataResult<i32> = DataResult::fail("missing");
        assert!(!result.success);
        assert!(result.data.is_none());
        assert_eq!(result.message.as_deref(), Some("missing"));
    }

    #[test]
    fn test_outcome_round_trips_through_json() {
        // The cache aspect stores outcomes as serde_json::Value
        let original = DataResult::ok(vec![1, 2, 3]);
        let value = serde_json::to_value(&original).unwrap();
        let restored: DataResult<Vec<i32>> = serde_json::from_value(value).unwrap();
        assert_eq!(restored, original);
    }
}
