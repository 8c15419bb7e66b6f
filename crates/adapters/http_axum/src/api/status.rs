//! JSON status report.

use axum::Json;
use axum::extract::State;

use hound_app::ports::CommandRunner;
use hound_domain::report::StatusReport;

use crate::state::AppState;

/// `GET /api/status`: run every probe and return the report.
///
/// Always `200`: probe failures are reported per row.
pub async fn get<R>(State(state): State<AppState<R>>) -> Json<StatusReport>
where
    R: CommandRunner + Send + Sync + 'static,
{
    Json(state.status_service.collect().await)
}
