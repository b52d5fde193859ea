//! App-launch collaborator.

use crate::error::LaunchError;
use async_trait::async_trait;
use std::sync::Arc;

/// Asks the OS to bring an application to the foreground.
#[async_trait]
pub trait AppLauncher: Send + Sync {
    async fn launch(&self, identifier: &str) -> Result<(), LaunchError>;
}

pub type AppLauncherRef = Arc<dyn AppLauncher>;

/// Launcher that only logs. Useful for dry runs.
#[derive(Debug, Default)]
pub struct NullLauncher;

#[async_trait]
impl AppLauncher for NullLauncher {
    async fn launch(&self, identifier: &str) -> Result<(), LaunchError> {
        tracing::info!(identifier, "launch requested (dry run)");
        Ok(())
    }
}
