use crate::errors::ThemeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The user's stored intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    Light,
    Dark,
    #[default]
    System,
}

/// What is actually rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolvedAppearance {
    #[default]
    Light,
    Dark,
}

impl ThemePreference {
    pub const ALL: [ThemePreference; 3] = [
        ThemePreference::Light,
        ThemePreference::Dark,
        ThemePreference::System,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
            ThemePreference::System => "system",
        }
    }

    pub fn is_system(&self) -> bool {
        matches!(self, ThemePreference::System)
    }

    /// Resolve this preference against the current OS appearance.
    pub fn resolve(&self, os: ResolvedAppearance) -> ResolvedAppearance {
        match self {
            ThemePreference::Light => ResolvedAppearance::Light,
            ThemePreference::Dark => ResolvedAppearance::Dark,
            ThemePreference::System => os,
        }
    }
}

impl ResolvedAppearance {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolvedAppearance::Light => "light",
            ResolvedAppearance::Dark => "dark",
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, ResolvedAppearance::Dark)
    }

    pub fn from_prefers_dark(prefers_dark: bool) -> Self {
        if prefers_dark {
            ResolvedAppearance::Dark
        } else {
            ResolvedAppearance::Light
        }
    }
}

impl FromStr for ThemePreference {
    type Err = ThemeError;

    /// Only the exact lowercase literals are recognized, matching what is persisted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(ThemePreference::Light),
            "dark" => Ok(ThemePreference::Dark),
            "system" => Ok(ThemePreference::System),
            other => Err(ThemeError::InvalidStoredValue {
                value: other.to_string(),
            }),
        }
    }
}

impl FromStr for ResolvedAppearance {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(ResolvedAppearance::Light),
            "dark" => Ok(ResolvedAppearance::Dark),
            other => Err(ThemeError::InvalidStoredValue {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ResolvedAppearance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of the user's intent and the appearance derived from it.
///
/// `resolved` always equals `preference.resolve(os)` for the OS appearance
/// known at the time the snapshot was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeState {
    pub preference: ThemePreference,
    pub resolved: ResolvedAppearance,
}

impl ThemeState {
    pub fn new(preference: ThemePreference, os: ResolvedAppearance) -> Self {
        Self {
            preference,
            resolved: preference.resolve(os),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::{assert_err, assert_ok_eq};

    #[test]
    fn test_parse_recognizes_only_lowercase_literals() {
        assert_ok_eq!("light".parse::<ThemePreference>(), ThemePreference::Light);
        assert_ok_eq!("dark".parse::<ThemePreference>(), ThemePreference::Dark);
        assert_ok_eq!("system".parse::<ThemePreference>(), ThemePreference::System);

        assert_err!("Dark".parse::<ThemePreference>());
        assert_err!(" light".parse::<ThemePreference>());
        assert_err!("".parse::<ThemePreference>());
    }

    #[test]
    fn test_invalid_value_is_reported_verbatim() {
        let err = "blue".parse::<ThemePreference>().unwrap_err();
        assert_eq!(
            err,
            ThemeError::InvalidStoredValue {
                value: "blue".to_string()
            }
        );
    }

    #[test]
    fn test_display_matches_parse() {
        for preference in ThemePreference::ALL {
            assert_eq!(
                preference.to_string().parse::<ThemePreference>().unwrap(),
                preference
            );
        }
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        let state = ThemeState::new(ThemePreference::System, ResolvedAppearance::Dark);
        let encoded = toml::to_string(&state).unwrap();
        assert!(encoded.contains("preference = \"system\""));
        assert!(encoded.contains("resolved = \"dark\""));
    }

    #[test]
    fn test_default_preference_is_system() {
        assert_eq!(ThemePreference::default(), ThemePreference::System);
    }
}
