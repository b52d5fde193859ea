//! Platform implementations of the catalog collaborators.
//!
//! - macOS: `.app` bundles under `/Applications` and `~/Applications`,
//!   launched with `open -b <bundle id>`
//! - Linux: XDG `applications/*.desktop` entries, launched with
//!   `gtk-launch <desktop id>`
//! - elsewhere: empty catalog, launching unsupported

#[cfg(target_os = "macos")]
mod macos;

use crate::entry::InstalledApp;
use crate::error::{CatalogError, LaunchError};
use crate::launcher::AppLauncher;
use crate::source::AppSource;
use async_trait::async_trait;
use std::path::PathBuf;

/// Installed applications of the host OS.
#[derive(Debug, Clone, Default)]
pub struct PlatformAppSource {
    extra_dirs: Vec<PathBuf>,
}

impl PlatformAppSource {
    pub fn new(extra_dirs: Vec<PathBuf>) -> Self {
        Self { extra_dirs }
    }

    /// Directories scanned on this platform, in priority order.
    pub fn search_dirs(&self) -> Vec<PathBuf> {
        let mut paths = default_dirs();
        paths.extend(self.extra_dirs.iter().cloned());
        paths
    }
}

impl AppSource for PlatformAppSource {
    fn name(&self) -> &str {
        std::env::consts::OS
    }

    fn installed_apps(&self) -> Result<Vec<InstalledApp>, CatalogError> {
        let dirs = self.search_dirs();
        tracing::debug!(?dirs, "scanning for installed applications");
        Ok(scan(&dirs))
    }
}

#[cfg(target_os = "macos")]
fn default_dirs() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from("/Applications")];
    if let Some(home) = dirs::home_dir() {
        paths.push(home.join("Applications"));
    }
    paths
}

#[cfg(target_os = "linux")]
fn default_dirs() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(data) = dirs::data_dir() {
        paths.push(data.join("applications"));
    }

    let system = std::env::var("XDG_DATA_DIRS")
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| "/usr/local/share:/usr/share".to_string());
    paths.extend(
        system
            .split(':')
            .filter(|d| !d.is_empty())
            .map(|d| PathBuf::from(d).join("applications")),
    );
    paths
}

#[cfg(not(any(target_os = "macos", target_os = "linux")))]
fn default_dirs() -> Vec<PathBuf> {
    Vec::new()
}

#[cfg(target_os = "macos")]
fn scan(dirs: &[PathBuf]) -> Vec<InstalledApp> {
    macos::list_installed_apps(dirs)
}

#[cfg(target_os = "linux")]
fn scan(dirs: &[PathBuf]) -> Vec<InstalledApp> {
    dirs.iter()
        .flat_map(|dir| crate::desktop_entry::scan_dir(dir))
        .collect()
}

#[cfg(not(any(target_os = "macos", target_os = "linux")))]
fn scan(_dirs: &[PathBuf]) -> Vec<InstalledApp> {
    Vec::new()
}

/// Launches applications through the OS launcher command.
#[derive(Debug, Default)]
pub struct SystemLauncher;

#[async_trait]
impl AppLauncher for SystemLauncher {
    async fn launch(&self, identifier: &str) -> Result<(), LaunchError> {
        let (program, args): (&str, Vec<&str>) = if cfg!(target_os = "macos") {
            ("open", vec!["-b", identifier])
        } else if cfg!(target_os = "linux") {
            ("gtk-launch", vec![identifier])
        } else {
            return Err(LaunchError::Unsupported);
        };

        let output = tokio::process::Command::new(program)
            .args(&args)
            .output()
            .await?;

        if output.status.success() {
            tracing::info!(identifier, program, "application launched");
            Ok(())
        } else {
            Err(LaunchError::Failed {
                identifier: identifier.to_string(),
                reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}
