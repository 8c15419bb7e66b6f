//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod actions;
pub mod status;

use axum::Router;
use axum::routing::{get, post};

use hound_app::ports::CommandRunner;

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<R>() -> Router<AppState<R>>
where
    R: CommandRunner + Send + Sync + 'static,
{
    Router::new()
        .route("/status", get(status::get::<R>))
        .route("/actions", get(actions::list::<R>))
        .route("/actions/{param}", post(actions::trigger::<R>))
}
