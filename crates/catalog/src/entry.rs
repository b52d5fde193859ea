//! Application records.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Icon reference for an application. Resolution to pixels is left to the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum AppIcon {
    /// Image file on disk.
    File(PathBuf),
    /// Icon theme name.
    Themed(String),
}

/// A launchable application as shown in the result list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppEntry {
    pub display_name: String,
    /// Platform identifier passed to the launcher (bundle id, desktop id).
    pub identifier: String,
    #[serde(default)]
    pub icon: Option<AppIcon>,
}

impl AppEntry {
    pub fn new(display_name: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            identifier: identifier.into(),
            icon: None,
        }
    }

    pub fn with_icon(mut self, icon: AppIcon) -> Self {
        self.icon = Some(icon);
        self
    }
}

/// Raw record as reported by an [`AppSource`](crate::AppSource), before
/// normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledApp {
    pub display_name: String,
    pub identifier: String,
    pub icon: Option<AppIcon>,
    /// False for background agents and entries hidden from launchers.
    pub launchable: bool,
}

impl InstalledApp {
    pub fn new(display_name: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            identifier: identifier.into(),
            icon: None,
            launchable: true,
        }
    }
}

impl From<InstalledApp> for AppEntry {
    fn from(app: InstalledApp) -> Self {
        Self {
            display_name: app.display_name,
            identifier: app.identifier,
            icon: app.icon,
        }
    }
}
