//! Dashboard home page: every status row plus the action controls.

use askama::Template;
use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse, Response};

use hound_app::ports::CommandRunner;
use hound_domain::action::{ActionOutcome, ActionRequest};
use hound_domain::catalog::{ActionKind, Catalog};
use hound_domain::probe::ServiceHealth;
use hound_domain::report::StatusReport;

use super::DashboardError;
use crate::state::AppState;

/// Query parameter carrying the results of the last submitted actions.
pub const OUTCOME_PARAM: &str = "outcome";

const OUTCOME_LABELS: [&str; 4] = ["succeeded", "failed", "timed_out", "dispatched"];

/// One inline table row.
pub struct RowView {
    pub label: String,
    pub text: String,
    pub class: &'static str,
    /// Restart param, empty when the row has no action.
    pub action_param: String,
}

/// One preformatted card.
pub struct BlockView {
    pub label: String,
    pub text: String,
}

/// An action button that is not attached to a row.
pub struct ToggleView {
    pub param: String,
    pub label: String,
}

/// Result line shown above the table after an action.
#[derive(Debug, PartialEq, Eq)]
pub struct Banner {
    pub action: String,
    pub status: String,
    pub failure: bool,
}

impl Banner {
    fn new(catalog: &Catalog, param: &str, status: &str) -> Option<Self> {
        let action = catalog.action(param)?;
        let status = OUTCOME_LABELS.iter().find(|label| **label == status)?;
        Some(Self {
            action: action.label.clone(),
            status: status.replace('_', " "),
            failure: matches!(*status, "failed" | "timed_out"),
        })
    }
}

/// Home page template.
#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    refresh_seconds: u32,
    environment: String,
    generated_at: String,
    banners: Vec<Banner>,
    rows: Vec<RowView>,
    blocks: Vec<BlockView>,
    toggles: Vec<ToggleView>,
}

impl HomeTemplate {
    fn new(
        report: StatusReport,
        catalog: &Catalog,
        banners: Vec<Banner>,
        refresh_seconds: u32,
    ) -> Self {
        let mut rows = Vec::new();
        let mut blocks = Vec::new();
        for row in report.rows {
            if row.is_preformatted() {
                blocks.push(BlockView {
                    label: row.label,
                    text: row.text,
                });
            } else {
                rows.push(RowView {
                    class: row.health.map_or("plain", ServiceHealth::css_class),
                    label: row.label,
                    text: row.text,
                    action_param: row.action_param.unwrap_or_default(),
                });
            }
        }
        let toggles = catalog
            .actions()
            .iter()
            .filter(|action| !matches!(action.kind, ActionKind::Restart { .. }))
            .map(|action| ToggleView {
                param: action.param.clone(),
                label: action.label.clone(),
            })
            .collect();

        Self {
            refresh_seconds,
            environment: report.environment.to_uppercase(),
            generated_at: report.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            banners,
            rows,
            blocks,
            toggles,
        }
    }
}

impl IntoResponse for HomeTemplate {
    fn into_response(self) -> Response {
        Html(self.to_string()).into_response()
    }
}

/// Encode outcomes as `param:status,param:status` for the redirect.
#[must_use]
pub fn encode_outcomes(outcomes: &[ActionOutcome]) -> String {
    outcomes
        .iter()
        .map(|outcome| format!("{}:{}", outcome.param, outcome.status.label()))
        .collect::<Vec<_>>()
        .join(",")
}

/// Decode `?outcome=` back into banners, dropping anything unrecognized.
#[must_use]
pub fn banners_from_query(catalog: &Catalog, params: &[(String, String)]) -> Vec<Banner> {
    params
        .iter()
        .filter(|(key, _)| key == OUTCOME_PARAM)
        .flat_map(|(_, value)| value.split(','))
        .filter_map(|entry| entry.split_once(':'))
        .filter_map(|(param, status)| Banner::new(catalog, param, status))
        .collect()
}

fn banners_from_outcomes(catalog: &Catalog, outcomes: &[ActionOutcome]) -> Vec<Banner> {
    outcomes
        .iter()
        .filter_map(|outcome| Banner::new(catalog, &outcome.param, outcome.status.label()))
        .collect()
}

/// `GET /`: collect every row and render the page.
///
/// When query actions are enabled, recognized truthy params (plus a valid
/// `token`) are dispatched before collecting, so the page already reflects
/// their effect.
pub async fn index<R>(
    State(state): State<AppState<R>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<HomeTemplate, DashboardError>
where
    R: CommandRunner + Send + Sync + 'static,
{
    let catalog = state.action_service.catalog();
    let mut banners = banners_from_query(catalog, &params);

    if state.dashboard.allow_query_actions {
        let request = ActionRequest::from_params(
            catalog,
            params.iter().map(|(key, value)| (key.as_str(), value.as_str())),
        );
        if !request.is_empty() {
            let token = params
                .iter()
                .find(|(key, _)| key == "token")
                .map(|(_, value)| value.as_str());
            state.action_service.authorize(token)?;
            let outcomes = state.action_service.dispatch(&request).await;
            banners.extend(banners_from_outcomes(catalog, &outcomes));
        }
    }

    let report = state.status_service.collect().await;
    Ok(HomeTemplate::new(
        report,
        catalog,
        banners,
        state.dashboard.refresh_seconds,
    ))
}

#[cfg(test)]
mod tests {
    use hound_domain::action::ActionStatus;
    use hound_domain::id::ActionId;
    use hound_domain::time::now;

    use super::*;

    fn outcome(param: &str, status: ActionStatus) -> ActionOutcome {
        ActionOutcome {
            id: ActionId::new(),
            param: param.to_string(),
            command: String::new(),
            status,
            started_at: now(),
            duration_ms: 0,
            exit_code: None,
        }
    }

    fn query(value: &str) -> Vec<(String, String)> {
        vec![(OUTCOME_PARAM.to_string(), value.to_string())]
    }

    #[test]
    fn should_encode_outcomes_in_order() {
        let encoded = encode_outcomes(&[
            outcome("nginx", ActionStatus::Succeeded),
            outcome("sshd", ActionStatus::TimedOut),
        ]);
        assert_eq!(encoded, "nginx:succeeded,sshd:timed_out");
    }

    #[test]
    fn should_decode_banners_with_action_labels() {
        let catalog = Catalog::standard().unwrap();
        let banners = banners_from_query(&catalog, &query("nginx:failed,edit:succeeded"));
        assert_eq!(
            banners,
            [
                Banner {
                    action: "restart Nginx".to_string(),
                    status: "failed".to_string(),
                    failure: true,
                },
                Banner {
                    action: "Edit Access".to_string(),
                    status: "succeeded".to_string(),
                    failure: false,
                },
            ]
        );
    }

    #[test]
    fn should_drop_unknown_params_and_statuses() {
        let catalog = Catalog::standard().unwrap();
        let banners =
            banners_from_query(&catalog, &query("apache:succeeded,nginx:exploded,garbage"));
        assert!(banners.is_empty());
    }

    #[test]
    fn should_split_inline_rows_from_blocks() {
        let catalog = Catalog::standard().unwrap();
        let rows = catalog
            .rows()
            .iter()
            .map(|row| {
                hound_domain::report::RowStatus::new(
                    row,
                    hound_domain::probe::ProbeResult::Ok("active".to_string()),
                    0,
                )
            })
            .collect();
        let report = StatusReport {
            environment: "webconsole".to_string(),
            generated_at: now(),
            rows,
        };

        let page = HomeTemplate::new(report, &catalog, Vec::new(), 30);

        assert_eq!(page.environment, "WEBCONSOLE");
        assert_eq!(page.rows.len(), 7);
        assert_eq!(page.blocks.len(), 4);
        let params: Vec<&str> = page.toggles.iter().map(|t| t.param.as_str()).collect();
        assert_eq!(params, ["readonly", "edit"]);
        assert_eq!(page.rows[0].class, "plain");
        assert_eq!(page.rows[1].class, "up");
    }
}
