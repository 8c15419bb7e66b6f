//! Dashboard action form handler.

use axum::extract::{Form, State};
use axum::response::Redirect;

use hound_app::ports::CommandRunner;
use hound_domain::action::ActionRequest;

use super::DashboardError;
use super::home::{OUTCOME_PARAM, encode_outcomes};
use crate::state::AppState;

/// `POST /actions`: run the submitted actions, then redirect to `/` (PRG).
///
/// The form carries a `token` field and the clicked button's `param=true`.
/// A refresh of the resulting page only re-renders; it never re-runs the
/// action.
pub async fn submit<R>(
    State(state): State<AppState<R>>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Result<Redirect, DashboardError>
where
    R: CommandRunner + Send + Sync + 'static,
{
    let token = fields
        .iter()
        .find(|(key, _)| key == "token")
        .map(|(_, value)| value.as_str());
    state.action_service.authorize(token)?;

    let request = ActionRequest::from_params(
        state.action_service.catalog(),
        fields
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str())),
    );
    if request.is_empty() {
        return Ok(Redirect::to("/"));
    }

    let outcomes = state.action_service.dispatch(&request).await;
    Ok(Redirect::to(&format!(
        "/?{OUTCOME_PARAM}={}",
        encode_outcomes(&outcomes)
    )))
}
