//! JSON action endpoints.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};

use hound_app::ports::CommandRunner;
use hound_domain::action::{ActionOutcome, ActionRequest};
use hound_domain::catalog::ActionDefinition;
use hound_domain::error::{HoundError, NotFoundError};

use crate::error::ApiError;
use crate::state::AppState;

/// Possible responses from the trigger endpoint.
pub enum TriggerResponse {
    /// The command succeeded or was dispatched.
    Ok(Json<ActionOutcome>),
    /// The command ran but failed or timed out.
    Failed(Json<ActionOutcome>),
}

impl IntoResponse for TriggerResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
            Self::Failed(json) => (StatusCode::BAD_GATEWAY, json).into_response(),
        }
    }
}

/// `GET /api/actions`: recognized action parameters.
pub async fn list<R>(State(state): State<AppState<R>>) -> Json<Vec<ActionDefinition>>
where
    R: CommandRunner + Send + Sync + 'static,
{
    Json(state.action_service.catalog().actions().to_vec())
}

/// `POST /api/actions/{param}`: run one action.
///
/// Requires `Authorization: Bearer <token>`. The token is checked before the
/// param is resolved, so an unauthenticated caller cannot probe which
/// actions exist.
pub async fn trigger<R>(
    State(state): State<AppState<R>>,
    Path(param): Path<String>,
    headers: HeaderMap,
) -> Result<TriggerResponse, ApiError>
where
    R: CommandRunner + Send + Sync + 'static,
{
    state.action_service.authorize(bearer_token(&headers))?;
    let request = ActionRequest::single(state.action_service.catalog(), &param)?;

    let outcome = state
        .action_service
        .dispatch(&request)
        .await
        .into_iter()
        .next()
        .ok_or_else(|| {
            HoundError::from(NotFoundError {
                kind: "Action",
                name: param,
            })
        })?;

    if outcome.status.is_failure() {
        Ok(TriggerResponse::Failed(Json(outcome)))
    } else {
        Ok(TriggerResponse::Ok(Json(outcome)))
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn should_extract_bearer_token() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer s3cret"));
        assert_eq!(bearer_token(&headers), Some("s3cret"));
    }

    #[test]
    fn should_ignore_other_schemes() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic czNjcmV0"));
        assert_eq!(bearer_token(&headers), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }
}
