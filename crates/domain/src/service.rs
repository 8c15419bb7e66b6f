//! Service entry: a restartable system service shown on the dashboard.

use serde::{Deserialize, Serialize};

use crate::error::{HoundError, ValidationError};

/// A monitored, restartable system service.
///
/// One entry always yields one status row and one restart action, which is
/// how the catalog keeps displayed rows and recognized parameters in sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceEntry {
    /// Display name, e.g. `ssh-d`.
    pub label: String,
    /// Unit name handed to the status and cycle scripts, e.g. `sshd`.
    pub unit: String,
    /// Request parameter that triggers a restart, e.g. `sshd`.
    pub action_param: String,
}

impl ServiceEntry {
    #[must_use]
    pub fn new(
        label: impl Into<String>,
        unit: impl Into<String>,
        action_param: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            unit: unit.into(),
            action_param: action_param.into(),
        }
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`HoundError::Validation`] when any field is empty.
    pub fn validate(&self) -> Result<(), HoundError> {
        if self.label.trim().is_empty() {
            return Err(ValidationError::EmptyLabel.into());
        }
        if self.unit.trim().is_empty() {
            return Err(ValidationError::EmptyUnit.into());
        }
        if self.action_param.trim().is_empty() {
            return Err(ValidationError::EmptyActionParam.into());
        }
        Ok(())
    }

    /// The services the home server ships with.
    #[must_use]
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("samba-d", "smbd", "smbd"),
            Self::new("ssh-d", "sshd", "sshd"),
            Self::new("Transmission-d", "transmission-daemon", "transmissiond"),
            Self::new(
                "Transmission-telegram-d",
                "transmission-telegram-d",
                "transmissiontelegramd",
            ),
            Self::new("Nginx", "nginx", "nginx"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_accept_complete_entry() {
        assert!(ServiceEntry::new("ssh-d", "sshd", "sshd").validate().is_ok());
    }

    #[test]
    fn should_reject_empty_unit() {
        let result = ServiceEntry::new("ssh-d", " ", "sshd").validate();
        assert!(matches!(
            result,
            Err(HoundError::Validation(ValidationError::EmptyUnit))
        ));
    }

    #[test]
    fn should_map_transmission_param_to_daemon_unit() {
        let entry = ServiceEntry::defaults()
            .into_iter()
            .find(|s| s.action_param == "transmissiond")
            .unwrap();
        assert_eq!(entry.unit, "transmission-daemon");
    }

    #[test]
    fn should_deserialize_from_json() {
        let entry: ServiceEntry = serde_json::from_str(
            r#"{"label":"Jellyfin","unit":"jellyfin","action_param":"jellyfin"}"#,
        )
        .unwrap();
        assert_eq!(entry, ServiceEntry::new("Jellyfin", "jellyfin", "jellyfin"));
    }
}
