//! Application-wide state shared with windows and inspectors.

/// Profile used when none is given on the command line.
pub const DEFAULT_PROFILE: &str = "Panoptes";

/// Settings passed explicitly to every window and inspector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppContext {
    /// Persistent settings are stored per profile. Profile names are case
    /// insensitive.
    pub profile: String,
    /// In debugging mode inspectors clear the plot instead of failing on
    /// missing data.
    pub debugging: bool,
}

impl AppContext {
    pub fn new(profile: impl Into<String>, debugging: bool) -> Self {
        Self {
            profile: profile.into(),
            debugging,
        }
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new(DEFAULT_PROFILE, false)
    }
}
