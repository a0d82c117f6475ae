use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use crate::error::ParseThemeError;
use crate::store::Reducer;

pub const DEFAULT_PRIMARY_COLOR: &str = "#007bff";
pub const DEFAULT_BACKGROUND_COLOR: &str = "#ffffff";

/// Named color scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    Custom,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::Custom => "custom",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ParseThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            "custom" => Ok(Theme::Custom),
            other => Err(ParseThemeError(other.to_string())),
        }
    }
}

/// Current theme selection and its two colors.
///
/// Colors are opaque strings; nothing checks that they parse as CSS.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeState {
    pub current_theme: Theme,
    pub primary_color: String,
    pub background_color: String,
}

impl Default for ThemeState {
    fn default() -> Self {
        Self {
            current_theme: Theme::Light,
            primary_color: DEFAULT_PRIMARY_COLOR.to_string(),
            background_color: DEFAULT_BACKGROUND_COLOR.to_string(),
        }
    }
}

/// A requested theme transition.
///
/// On the wire an action is `{"type": "SET_THEME", "payload": "dark"}`.
/// Any other `type` decodes to [`ThemeAction::Unknown`], whatever its
/// payload. A known `type` with a malformed payload is still an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ThemeAction {
    SetTheme(Theme),
    SetPrimaryColor(String),
    SetBackgroundColor(String),
    Unknown,
}

const KNOWN_ACTIONS: [&str; 3] = ["SET_THEME", "SET_PRIMARY_COLOR", "SET_BACKGROUND_COLOR"];

#[derive(Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
enum KnownAction {
    SetTheme(Theme),
    SetPrimaryColor(String),
    SetBackgroundColor(String),
}

/// An action `type` that none of the known actions claim.
struct UnknownKind;

impl<'de> Deserialize<'de> for UnknownKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let kind = String::deserialize(deserializer)?;
        if KNOWN_ACTIONS.contains(&kind.as_str()) {
            return Err(de::Error::custom(format!("malformed `{kind}` action")));
        }
        Ok(UnknownKind)
    }
}

// Fields other than `type` (a payload included) are ignored
#[derive(Deserialize)]
struct UnknownAction {
    #[serde(rename = "type")]
    _kind: UnknownKind,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireAction {
    Known(KnownAction),
    Unknown(UnknownAction),
}

impl<'de> Deserialize<'de> for ThemeAction {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        WireAction::deserialize(deserializer).map(ThemeAction::from)
    }
}

impl From<WireAction> for ThemeAction {
    fn from(wire: WireAction) -> Self {
        match wire {
            WireAction::Known(KnownAction::SetTheme(theme)) => ThemeAction::SetTheme(theme),
            WireAction::Known(KnownAction::SetPrimaryColor(color)) => {
                ThemeAction::SetPrimaryColor(color)
            }
            WireAction::Known(KnownAction::SetBackgroundColor(color)) => {
                ThemeAction::SetBackgroundColor(color)
            }
            WireAction::Unknown(_) => ThemeAction::Unknown,
        }
    }
}

impl Reducer for ThemeState {
    type Action = ThemeAction;

    fn reduce(&self, action: &ThemeAction) -> Option<Self> {
        let next = match action {
            ThemeAction::SetTheme(theme) => Self {
                current_theme: *theme,
                ..self.clone()
            },
            ThemeAction::SetPrimaryColor(color) => Self {
                primary_color: color.clone(),
                ..self.clone()
            },
            ThemeAction::SetBackgroundColor(color) => Self {
                background_color: color.clone(),
                ..self.clone()
            },
            ThemeAction::Unknown => return None,
        };
        Some(next)
    }
}
