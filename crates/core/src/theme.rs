//! Light/dark theme preference.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const THEME_LIGHT: &str = "light";
pub const THEME_DARK: &str = "dark";

/// A user's color scheme. Stored as lowercase text in `profiles.theme`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => THEME_LIGHT,
            Theme::Dark => THEME_DARK,
        }
    }

    /// The opposite scheme.
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            THEME_LIGHT => Ok(Theme::Light),
            THEME_DARK => Ok(Theme::Dark),
            other => Err(CoreError::Validation(format!(
                "Invalid theme '{other}'. Must be one of: {THEME_LIGHT}, {THEME_DARK}"
            ))),
        }
    }
}
