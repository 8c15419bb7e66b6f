//! Action requests and outcomes.

use serde::Serialize;

use crate::catalog::Catalog;
use crate::error::{HoundError, NotFoundError};
use crate::id::ActionId;
use crate::time::Timestamp;

/// A request parameter counts as set when it is present with a non-empty value.
#[must_use]
pub fn is_truthy(value: &str) -> bool {
    !value.is_empty()
}

/// The recognized actions one request asked for.
///
/// Params appear in catalog order and at most once; unrecognized or falsy
/// params never make it in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionRequest {
    params: Vec<String>,
}

impl ActionRequest {
    /// Filter raw request pairs down to the recognized, truthy params.
    #[must_use]
    pub fn from_params<'a, I>(catalog: &Catalog, pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let pairs: Vec<(&str, &str)> = pairs.into_iter().collect();
        let params = catalog
            .actions()
            .iter()
            .filter(|action| {
                pairs
                    .iter()
                    .any(|(key, value)| *key == action.param && is_truthy(value))
            })
            .map(|action| action.param.clone())
            .collect();
        Self { params }
    }

    /// A request for exactly one named action.
    ///
    /// # Errors
    ///
    /// Returns [`HoundError::NotFound`] when `param` is not a recognized action.
    pub fn single(catalog: &Catalog, param: &str) -> Result<Self, HoundError> {
        if catalog.action(param).is_none() {
            return Err(NotFoundError {
                kind: "Action",
                name: param.to_string(),
            }
            .into());
        }
        Ok(Self {
            params: vec![param.to_string()],
        })
    }

    #[must_use]
    pub fn params(&self) -> &[String] {
        &self.params
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }
}

/// How one action invocation ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ActionStatus {
    Succeeded,
    Failed { reason: String },
    TimedOut,
    /// Spawned without waiting for the result.
    Dispatched,
}

impl ActionStatus {
    /// Short stable name, also used in the dashboard redirect.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Succeeded => "succeeded",
            Self::Failed { .. } => "failed",
            Self::TimedOut => "timed_out",
            Self::Dispatched => "dispatched",
        }
    }

    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. } | Self::TimedOut)
    }
}

/// Structured result of one dispatched action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionOutcome {
    pub id: ActionId,
    pub param: String,
    /// The command line that was run, for the operator's benefit.
    pub command: String,
    #[serde(flatten)]
    pub status: ActionStatus,
    pub started_at: Timestamp,
    pub duration_ms: u64,
    pub exit_code: Option<i32>,
}
