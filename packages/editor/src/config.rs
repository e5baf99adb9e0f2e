use serde::{Deserialize, Serialize};

/// How invariant violations (unknown ids, bad parents) are surfaced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Return the error to the caller
    Strict,

    /// Log a warning and treat the edit as a no-op
    Lenient,
}

impl Default for ErrorPolicy {
    fn default() -> Self {
        if cfg!(debug_assertions) {
            ErrorPolicy::Strict
        } else {
            ErrorPolicy::Lenient
        }
    }
}

/// Editing session options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    /// Maximum number of undo levels kept (0 = unlimited)
    #[serde(default)]
    pub history_limit: usize,

    #[serde(default)]
    pub error_policy: ErrorPolicy,

    /// Seed for minted ids; derived from the document name when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_seed: Option<String>,
}

impl EditorConfig {
    pub fn strict() -> Self {
        Self {
            error_policy: ErrorPolicy::Strict,
            ..Self::default()
        }
    }

    pub fn lenient() -> Self {
        Self {
            error_policy: ErrorPolicy::Lenient,
            ..Self::default()
        }
    }

    pub fn with_id_seed(mut self, seed: impl Into<String>) -> Self {
        self.id_seed = Some(seed.into());
        self
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_limit: 0,
            error_policy: ErrorPolicy::default(),
            id_seed: None,
        }
    }
}
