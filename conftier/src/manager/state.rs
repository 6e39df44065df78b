use std::fmt;

/// Which configuration files were present when a manager last loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfigState {
    /// Nothing has been loaded yet.
    #[default]
    Uninitialized,
    /// Only the user file exists.
    UserOnly,
    /// Only the project file exists.
    ProjectOnly,
    /// Both files exist.
    Both,
    /// Neither file exists; only defaults apply.
    None,
}

impl ConfigState {
    /// The state for a given combination of present files.
    ///
    /// # Examples
    ///
    /// ```
    /// use conftier::ConfigState;
    ///
    /// assert_eq!(ConfigState::from_presence(true, false), ConfigState::UserOnly);
    /// assert_eq!(ConfigState::from_presence(false, false), ConfigState::None);
    /// ```
    #[must_use]
    pub const fn from_presence(user: bool, project: bool) -> Self {
        match (user, project) {
            (true, true) => Self::Both,
            (true, false) => Self::UserOnly,
            (false, true) => Self::ProjectOnly,
            (false, false) => Self::None,
        }
    }

    /// Whether a user file was present.
    #[must_use]
    pub const fn has_user(self) -> bool {
        matches!(self, Self::UserOnly | Self::Both)
    }

    /// Whether a project file was present.
    #[must_use]
    pub const fn has_project(self) -> bool {
        matches!(self, Self::ProjectOnly | Self::Both)
    }
}

impl fmt::Display for ConfigState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uninitialized => write!(f, "uninitialized"),
            Self::UserOnly => write!(f, "user only"),
            Self::ProjectOnly => write!(f, "project only"),
            Self::Both => write!(f, "user and project"),
            Self::None => write!(f, "defaults only"),
        }
    }
}
