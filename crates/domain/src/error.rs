//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`HoundError`]
//! via `#[from]`, so callers only ever match on one enum at port boundaries.

/// Top-level error for domain and application operations.
#[derive(Debug, thiserror::Error)]
pub enum HoundError {
    /// A domain invariant was violated.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A named thing (action, row, …) does not exist.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// The caller is not allowed to trigger the operation.
    #[error(transparent)]
    Forbidden(#[from] ForbiddenError),
}

/// Domain invariant violations, raised mostly while building the catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("label must not be empty")]
    EmptyLabel,

    #[error("service unit must not be empty")]
    EmptyUnit,

    #[error("action parameter must not be empty")]
    EmptyActionParam,

    #[error("probe command must not be empty")]
    EmptyCommand,

    #[error("environment name must not be empty")]
    EmptyEnvironment,

    #[error("action parameter `{0}` may only contain ASCII letters, digits, `-` and `_`")]
    InvalidActionParam(String),

    #[error("action parameter `{0}` is reserved")]
    ReservedActionParam(String),

    #[error("action parameter `{0}` is declared more than once")]
    DuplicateActionParam(String),

    #[error("row `{row}` references unknown action `{param}`")]
    UnknownRowAction { row: String, param: String },

    #[error("restart action `{0}` must have exactly one status row")]
    UnpairedRestartAction(String),
}

/// A lookup by name did not match anything.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} `{name}` not found")]
pub struct NotFoundError {
    /// What was looked up, e.g. `"Action"`.
    pub kind: &'static str,
    /// The name that was requested.
    pub name: String,
}

/// Reasons an action request is rejected before anything runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ForbiddenError {
    #[error("actions are disabled: no token configured")]
    ActionsDisabled,

    #[error("missing action token")]
    MissingToken,

    #[error("invalid action token")]
    InvalidToken,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_convert_validation_error_into_hound_error() {
        let err: HoundError = ValidationError::EmptyLabel.into();
        assert!(matches!(err, HoundError::Validation(ValidationError::EmptyLabel)));
    }

    #[test]
    fn should_format_not_found_error() {
        let err = NotFoundError {
            kind: "Action",
            name: "apache".to_string(),
        };
        assert_eq!(err.to_string(), "Action `apache` not found");
    }

    #[test]
    fn should_format_unpaired_restart_action() {
        let err = ValidationError::UnpairedRestartAction("nginx".to_string());
        assert_eq!(
            err.to_string(),
            "restart action `nginx` must have exactly one status row"
        );
    }

    #[test]
    fn should_display_inner_message() {
        let err = HoundError::from(NotFoundError {
            kind: "Action",
            name: "apache".to_string(),
        });
        assert_eq!(err.to_string(), "Action `apache` not found");

        let err = HoundError::from(ValidationError::EmptyUnit);
        assert_eq!(err.to_string(), "service unit must not be empty");
    }

    #[test]
    fn should_convert_forbidden_error_into_hound_error() {
        let err: HoundError = ForbiddenError::InvalidToken.into();
        assert!(matches!(
            err,
            HoundError::Forbidden(ForbiddenError::InvalidToken)
        ));
    }
}
