use serde::{Deserialize, Serialize};
use std::fmt;

use crate::codes;

/// A weather code resolved to what a UI should display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherCondition {
    /// `None` when the input was not an integer at all.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub code: Option<i64>,
    pub icon: String,
    pub description: String,
    /// `false` when the fallback icon and description were used.
    pub known: bool,
}

impl WeatherCondition {
    pub fn resolve(code: i64) -> Self {
        Self {
            code: Some(code),
            icon: codes::icon(code).to_string(),
            description: codes::description(code).to_string(),
            known: codes::contains(code),
        }
    }

    /// The fallback condition for input that is not a weather code.
    pub fn unrecognized() -> Self {
        Self {
            code: None,
            icon: codes::FALLBACK_ICON.to_string(),
            description: codes::FALLBACK_DESCRIPTION.to_string(),
            known: false,
        }
    }

    /// Resolves every entry in the registry, in table order.
    pub fn all() -> Vec<Self> {
        codes::entries()
            .iter()
            .map(|entry| Self::resolve(entry.code))
            .collect()
    }
}

impl fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.icon, self.description)
    }
}
