//! Identifier attached to every dispatched action, used to correlate the
//! HTTP response, the banner and the log lines of one invocation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier for an [`ActionOutcome`](crate::action::ActionOutcome).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionId(uuid::Uuid);

impl Default for ActionId {
    fn default() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl ActionId {
    /// Generate a new random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_generate_unique_ids_when_called_twice() {
        let a = ActionId::new();
        let b = ActionId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn should_display_as_hyphenated_uuid() {
        let id = ActionId::new().to_string();
        assert_eq!(id.len(), 36);
        assert_eq!(id.matches('-').count(), 4);
    }
}
