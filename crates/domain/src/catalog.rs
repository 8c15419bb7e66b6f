//! Catalog: the fixed set of status rows and recognized actions.
//!
//! Built once at startup and immutable afterwards. [`CatalogBuilder::build`]
//! enforces that every restart action is paired with exactly one status row
//! and that action parameters are unique, so the rows shown on the page and
//! the parameters the dispatcher honours cannot drift apart.

use std::collections::HashSet;
use std::path::Path;

use serde::Serialize;

use crate::command::CommandSpec;
use crate::error::{HoundError, ValidationError};
use crate::probe::Layout;
use crate::service::ServiceEntry;

/// Prints the CPU temperature in degrees Celsius.
pub const CPU_TEMPERATURE_SCRIPT: &str = "cputemperature.sh";
/// `servicestatus.sh <unit>` prints a short status for one unit.
pub const SERVICE_STATUS_SCRIPT: &str = "servicestatus.sh";
/// `cycleservice.sh <unit>` restarts one unit.
pub const CYCLE_SERVICE_SCRIPT: &str = "cycleservice.sh";
/// Prints a preformatted disk report.
pub const DISK_INFO_SCRIPT: &str = "diskinfo.sh";
/// `blockedit.sh <env>` puts the environment in read-only mode.
pub const BLOCK_EDIT_SCRIPT: &str = "blockedit.sh";
/// `editable.sh <env>` makes the environment writable again.
pub const EDITABLE_SCRIPT: &str = "editable.sh";

/// Request parameters with a meaning of their own, never usable as actions.
pub const RESERVED_PARAMS: [&str; 2] = ["token", "outcome"];

/// Where a probe command comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Probe {
    /// Script under the configured script directory.
    Script { script: String, args: Vec<String> },
    /// Program resolved through `PATH`.
    System { program: String, args: Vec<String> },
}

impl Probe {
    /// Resolve to a runnable command.
    #[must_use]
    pub fn command(&self, script_dir: &Path) -> CommandSpec {
        match self {
            Self::Script { script, args } => {
                CommandSpec::script(script_dir, script).args(args.iter().cloned())
            }
            Self::System { program, args } => {
                CommandSpec::new(program.clone()).args(args.iter().cloned())
            }
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            Self::Script { script, .. } => script.trim().is_empty(),
            Self::System { program, .. } => program.trim().is_empty(),
        }
    }
}

/// One displayed row (or block) of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusRow {
    pub label: String,
    pub probe: Probe,
    pub layout: Layout,
    /// Appended to successful output, e.g. `°C`.
    pub suffix: Option<String>,
    /// Restart action shown next to the row.
    pub action_param: Option<String>,
}

impl StatusRow {
    /// Inline row backed by a script in the script directory.
    #[must_use]
    pub fn script(label: impl Into<String>, script: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            probe: Probe::Script {
                script: script.into(),
                args: Vec::new(),
            },
            layout: Layout::Inline,
            suffix: None,
            action_param: None,
        }
    }

    /// Inline row backed by a system program.
    #[must_use]
    pub fn system<I, S>(label: impl Into<String>, program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            label: label.into(),
            probe: Probe::System {
                program: program.into(),
                args: args.into_iter().map(Into::into).collect(),
            },
            layout: Layout::Inline,
            suffix: None,
            action_param: None,
        }
    }

    #[must_use]
    pub fn preformatted(mut self) -> Self {
        self.layout = Layout::Preformatted;
        self
    }

    #[must_use]
    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }
}

/// What an action does when triggered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionKind {
    /// Restart one service unit.
    Restart { unit: String },
    /// Switch the environment to read-only.
    BlockEdit,
    /// Switch the environment back to editable.
    AllowEdit,
}

impl ActionKind {
    /// Resolve to the single command this action runs.
    #[must_use]
    pub fn command(&self, script_dir: &Path, environment: &str) -> CommandSpec {
        match self {
            Self::Restart { unit } => {
                CommandSpec::script(script_dir, CYCLE_SERVICE_SCRIPT).arg(unit.clone())
            }
            Self::BlockEdit => CommandSpec::script(script_dir, BLOCK_EDIT_SCRIPT).arg(environment),
            Self::AllowEdit => CommandSpec::script(script_dir, EDITABLE_SCRIPT).arg(environment),
        }
    }
}

/// A recognized request parameter and the action it triggers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionDefinition {
    pub param: String,
    pub label: String,
    pub kind: ActionKind,
}

/// Immutable set of rows and actions.
#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    rows: Vec<StatusRow>,
    actions: Vec<ActionDefinition>,
}

impl Catalog {
    /// Create a builder for constructing a [`Catalog`].
    #[must_use]
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// The stock dashboard with the default services.
    ///
    /// # Errors
    ///
    /// Never fails for the built-in services; the signature matches
    /// [`Catalog::standard_with`].
    pub fn standard() -> Result<Self, HoundError> {
        Self::standard_with(ServiceEntry::defaults())
    }

    /// The stock dashboard layout around a custom list of services:
    /// CPU temperature, the services, firewall state, then the disk,
    /// memory and session blocks, plus the read-only/edit toggles.
    ///
    /// # Errors
    ///
    /// Returns [`HoundError::Validation`] when a service entry is invalid or
    /// two services share an action parameter.
    pub fn standard_with(services: Vec<ServiceEntry>) -> Result<Self, HoundError> {
        let mut builder = Self::builder()
            .row(StatusRow::script("CPU Temperature", CPU_TEMPERATURE_SCRIPT).suffix("°C"));
        for service in services {
            builder = builder.service(service);
        }
        builder
            .row(StatusRow::system(
                "Firewall-ufw",
                "sh",
                ["-c", "sudo ufw status | head -n 1 | awk '{print $2}'"],
            ))
            .row(StatusRow::script("Disk Info", DISK_INFO_SCRIPT).preformatted())
            .row(StatusRow::system("Disk Usage", "df", ["-Ph"]).preformatted())
            .row(StatusRow::system("Memory", "free", ["-h"]).preformatted())
            .row(StatusRow::system("Logged in users", "w", Vec::<String>::new()).preformatted())
            .action(ActionDefinition {
                param: "readonly".to_string(),
                label: "Read Only".to_string(),
                kind: ActionKind::BlockEdit,
            })
            .action(ActionDefinition {
                param: "edit".to_string(),
                label: "Edit Access".to_string(),
                kind: ActionKind::AllowEdit,
            })
            .build()
    }

    #[must_use]
    pub fn rows(&self) -> &[StatusRow] {
        &self.rows
    }

    #[must_use]
    pub fn actions(&self) -> &[ActionDefinition] {
        &self.actions
    }

    /// Look up an action by its request parameter.
    #[must_use]
    pub fn action(&self, param: &str) -> Option<&ActionDefinition> {
        self.actions.iter().find(|action| action.param == param)
    }
}

/// Step-by-step builder for [`Catalog`].
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    rows: Vec<StatusRow>,
    actions: Vec<ActionDefinition>,
    services: Vec<ServiceEntry>,
}

impl CatalogBuilder {
    /// Add a row with no restart action of its own.
    #[must_use]
    pub fn row(mut self, row: StatusRow) -> Self {
        self.rows.push(row);
        self
    }

    /// Add a restartable service: one status row plus one restart action.
    #[must_use]
    pub fn service(mut self, service: ServiceEntry) -> Self {
        self.rows.push(StatusRow {
            label: service.label.clone(),
            probe: Probe::Script {
                script: SERVICE_STATUS_SCRIPT.to_string(),
                args: vec![service.unit.clone()],
            },
            layout: Layout::Inline,
            suffix: None,
            action_param: Some(service.action_param.clone()),
        });
        self.actions.push(ActionDefinition {
            param: service.action_param.clone(),
            label: format!("restart {}", service.label),
            kind: ActionKind::Restart {
                unit: service.unit.clone(),
            },
        });
        self.services.push(service);
        self
    }

    /// Add an action that is not tied to a row.
    #[must_use]
    pub fn action(mut self, action: ActionDefinition) -> Self {
        self.actions.push(action);
        self
    }

    /// Consume the builder, validate, and return a [`Catalog`].
    ///
    /// # Errors
    ///
    /// Returns [`HoundError::Validation`] when a label or command is empty,
    /// an action parameter is malformed, reserved or repeated, a row
    /// references an undeclared action, or a restart action is not paired
    /// with exactly one row.
    pub fn build(self) -> Result<Catalog, HoundError> {
        for service in &self.services {
            service.validate()?;
        }

        let mut params = HashSet::new();
        for action in &self.actions {
            if action.param.trim().is_empty() {
                return Err(ValidationError::EmptyActionParam.into());
            }
            if !action
                .param
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
            {
                return Err(ValidationError::InvalidActionParam(action.param.clone()).into());
            }
            if RESERVED_PARAMS.contains(&action.param.as_str()) {
                return Err(ValidationError::ReservedActionParam(action.param.clone()).into());
            }
            if !params.insert(action.param.as_str()) {
                return Err(ValidationError::DuplicateActionParam(action.param.clone()).into());
            }
        }

        for row in &self.rows {
            if row.label.trim().is_empty() {
                return Err(ValidationError::EmptyLabel.into());
            }
            if row.probe.is_empty() {
                return Err(ValidationError::EmptyCommand.into());
            }
            if let Some(param) = &row.action_param {
                if !params.contains(param.as_str()) {
                    return Err(ValidationError::UnknownRowAction {
                        row: row.label.clone(),
                        param: param.clone(),
                    }
                    .into());
                }
            }
        }

        for action in &self.actions {
            if !matches!(action.kind, ActionKind::Restart { .. }) {
                continue;
            }
            let paired = self
                .rows
                .iter()
                .filter(|row| row.action_param.as_deref() == Some(action.param.as_str()))
                .count();
            if paired != 1 {
                return Err(ValidationError::UnpairedRestartAction(action.param.clone()).into());
            }
        }

        Ok(Catalog {
            rows: self.rows,
            actions: self.actions,
        })
    }
}
