//! Server-side rendered HTML dashboard (no JavaScript).
//!
//! - `GET  /`       : status page, with an optional `?outcome=` banner
//! - `POST /actions`: token-gated form submission, redirected back to `/` (PRG)
//!
//! The page uses `<meta http-equiv="refresh">` pointing at the bare `/`, so
//! auto-reload never replays an action.

#[allow(clippy::missing_errors_doc)]
pub mod actions;
#[allow(clippy::missing_errors_doc)]
pub mod home;

use axum::Router;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};

use hound_app::ports::CommandRunner;
use hound_domain::error::HoundError;

use crate::error::status_and_message;
use crate::state::AppState;

/// Build the dashboard sub-router for SSR HTML pages.
pub fn routes<R>() -> Router<AppState<R>>
where
    R: CommandRunner + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(home::index::<R>))
        .route("/actions", post(actions::submit::<R>))
}

/// Error page for dashboard handlers, rendered as plain text.
pub struct DashboardError(HoundError);

impl From<HoundError> for DashboardError {
    fn from(err: HoundError) -> Self {
        Self(err)
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        status_and_message(&self.0).into_response()
    }
}
