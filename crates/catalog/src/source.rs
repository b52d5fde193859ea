//! Installed-application source abstraction.

use crate::entry::InstalledApp;
use crate::error::CatalogError;

/// Enumerates installed applications.
///
/// Called once at startup; the result is treated as an immutable snapshot.
/// Implementations should skip entries they cannot read instead of failing
/// the whole listing.
pub trait AppSource: Send + Sync {
    fn name(&self) -> &str;

    fn installed_apps(&self) -> Result<Vec<InstalledApp>, CatalogError>;
}

/// Fixed list, for tests and for embedding callers that already know their
/// apps.
#[derive(Debug, Clone, Default)]
pub struct StaticAppSource {
    apps: Vec<InstalledApp>,
}

impl StaticAppSource {
    pub fn new(apps: Vec<InstalledApp>) -> Self {
        Self { apps }
    }
}

impl AppSource for StaticAppSource {
    fn name(&self) -> &str {
        "static"
    }

    fn installed_apps(&self) -> Result<Vec<InstalledApp>, CatalogError> {
        Ok(self.apps.clone())
    }
}
