//! Shared application state for axum handlers.

use std::sync::Arc;

use hound_app::ports::CommandRunner;
use hound_app::services::action_service::ActionService;
use hound_app::services::status_service::StatusService;

/// Dashboard behaviour toggles.
#[derive(Debug, Clone)]
pub struct DashboardSettings {
    /// `<meta http-equiv="refresh">` interval; `0` disables auto-reload.
    pub refresh_seconds: u32,
    /// Honour `GET /?nginx=true&token=…` style actions.
    pub allow_query_actions: bool,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            refresh_seconds: 30,
            allow_query_actions: false,
        }
    }
}

/// Application state shared across all axum handlers.
///
/// Generic over the command runner to avoid dynamic dispatch.
/// `Clone` is implemented manually so the runner itself does not need to be
/// `Clone`. Only the `Arc` wrappers are cloned.
pub struct AppState<R> {
    /// Probe collection.
    pub status_service: Arc<StatusService<R>>,
    /// Action authorization and dispatch.
    pub action_service: Arc<ActionService<R>>,
    pub dashboard: DashboardSettings,
}

impl<R> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            status_service: Arc::clone(&self.status_service),
            action_service: Arc::clone(&self.action_service),
            dashboard: self.dashboard.clone(),
        }
    }
}

impl<R> AppState<R>
where
    R: CommandRunner + Send + Sync + 'static,
{
    /// Create a new application state from service instances.
    pub fn new(
        status_service: StatusService<R>,
        action_service: ActionService<R>,
        dashboard: DashboardSettings,
    ) -> Self {
        Self {
            status_service: Arc::new(status_service),
            action_service: Arc::new(action_service),
            dashboard,
        }
    }
}
