use serde::{Deserialize, Serialize};
use std::fmt;

/// A preview target platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Google,
    Facebook,
    Twitter,
    Linkedin,
}

impl Platform {
    /// Every supported platform, in display order.
    pub const ALL: [Platform; 4] = [
        Platform::Google,
        Platform::Facebook,
        Platform::Twitter,
        Platform::Linkedin,
    ];

    /// Parses a platform name (case-insensitive). Unknown names yield `None`;
    /// callers render a placeholder rather than failing.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "google" => Some(Self::Google),
            "facebook" => Some(Self::Facebook),
            "twitter" => Some(Self::Twitter),
            "linkedin" => Some(Self::Linkedin),
            _ => None,
        }
    }

    /// Canonical lowercase name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::Facebook => "facebook",
            Self::Twitter => "twitter",
            Self::Linkedin => "linkedin",
        }
    }

    /// Title character budget.
    #[must_use]
    pub const fn title_budget(&self) -> usize {
        match self {
            Self::Google => 60,
            Self::Facebook | Self::Twitter | Self::Linkedin => 70,
        }
    }

    /// Description character budget.
    #[must_use]
    pub const fn description_budget(&self) -> usize {
        match self {
            Self::Google => 160,
            Self::Facebook => 200,
            Self::Twitter => 125,
            Self::Linkedin => 100,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
