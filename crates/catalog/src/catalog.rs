//! Normalized, immutable application list.

use crate::entry::{AppEntry, InstalledApp};
use crate::error::CatalogError;
use crate::source::AppSource;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

/// Options applied while building the catalog.
#[derive(Debug, Clone, Default)]
pub struct CatalogConfig {
    /// Identifiers starting with any of these are dropped (system/vendor apps).
    pub excluded_prefixes: Vec<String>,
    /// Additional directories for the platform source to scan.
    pub extra_dirs: Vec<PathBuf>,
}

impl CatalogConfig {
    fn is_excluded(&self, identifier: &str) -> bool {
        self.excluded_prefixes
            .iter()
            .any(|prefix| identifier.starts_with(prefix.as_str()))
    }
}

/// Launchable applications, deduplicated by identifier and sorted by
/// lowercase display name.
///
/// Cloning is cheap; the entries are shared.
#[derive(Debug, Clone, Default)]
pub struct AppCatalog {
    entries: Arc<[AppEntry]>,
}

impl AppCatalog {
    /// Read the source once and normalize the result.
    pub fn load(source: &dyn AppSource, config: &CatalogConfig) -> Result<Self, CatalogError> {
        let apps = source.installed_apps()?;
        let reported = apps.len();
        let catalog = Self::build(apps, config);

        tracing::info!(
            source = source.name(),
            reported,
            kept = catalog.len(),
            "application catalog loaded"
        );

        Ok(catalog)
    }

    /// Drop non-launchable and excluded entries, keep the first occurrence of
    /// each identifier, then sort case-insensitively by display name.
    pub fn build(apps: Vec<InstalledApp>, config: &CatalogConfig) -> Self {
        let mut seen = HashSet::new();

        let mut entries: Vec<AppEntry> = apps
            .into_iter()
            .filter(|app| app.launchable)
            .filter(|app| !app.identifier.is_empty() && !config.is_excluded(&app.identifier))
            .filter(|app| seen.insert(app.identifier.clone()))
            .map(AppEntry::from)
            .collect();

        entries.sort_by_cached_key(|entry| entry.display_name.to_lowercase());

        Self {
            entries: entries.into(),
        }
    }

    pub fn entries(&self) -> &[AppEntry] {
        &self.entries
    }

    pub fn get(&self, identifier: &str) -> Option<&AppEntry> {
        self.entries.iter().find(|e| e.identifier == identifier)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<AppEntry>> for AppCatalog {
    fn from(entries: Vec<AppEntry>) -> Self {
        let apps = entries
            .into_iter()
            .map(|e| InstalledApp {
                display_name: e.display_name,
                identifier: e.identifier,
                icon: e.icon,
                launchable: true,
            })
            .collect();
        Self::build(apps, &CatalogConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::StaticAppSource;

    fn names(catalog: &AppCatalog) -> Vec<&str> {
        catalog
            .entries()
            .iter()
            .map(|e| e.display_name.as_str())
            .collect()
    }

    #[test]
    fn test_build_sorts_case_insensitively() {
        let catalog = AppCatalog::build(
            vec![
                InstalledApp::new("calculator", "org.calc"),
                InstalledApp::new("Browser", "org.browser"),
                InstalledApp::new("alarm", "org.alarm"),
            ],
            &CatalogConfig::default(),
        );

        assert_eq!(names(&catalog), vec!["alarm", "Browser", "calculator"]);
    }

    #[test]
    fn test_build_dedupes_by_identifier_keeping_first() {
        let catalog = AppCatalog::build(
            vec![
                InstalledApp::new("Maps", "org.maps"),
                InstalledApp::new("Maps (copy)", "org.maps"),
                InstalledApp::new("Maps", "com.other.maps"),
            ],
            &CatalogConfig::default(),
        );

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("org.maps").unwrap().display_name, "Maps");
    }

    #[test]
    fn test_build_drops_excluded_and_unlaunchable() {
        let mut agent = InstalledApp::new("Updater", "org.updater");
        agent.launchable = false;

        let config = CatalogConfig {
            excluded_prefixes: vec!["com.android".to_string(), "android".to_string()],
            ..Default::default()
        };

        let catalog = AppCatalog::build(
            vec![
                InstalledApp::new("Settings", "com.android.settings"),
                InstalledApp::new("System UI", "android.systemui"),
                InstalledApp::new("Camera", "org.camera"),
                agent,
            ],
            &config,
        );

        assert_eq!(names(&catalog), vec!["Camera"]);
    }

    #[test]
    fn test_load_reads_source_once() {
        let source = StaticAppSource::new(vec![
            InstalledApp::new("Google Maps", "com.google.maps"),
            InstalledApp::new("Calculator", "org.calc"),
        ]);

        let catalog = AppCatalog::load(&source, &CatalogConfig::default()).unwrap();
        assert_eq!(names(&catalog), vec!["Calculator", "Google Maps"]);
    }

    #[test]
    fn test_clone_shares_entries() {
        let catalog = AppCatalog::from(vec![AppEntry::new("Camera", "org.camera")]);
        let clone = catalog.clone();
        assert!(std::ptr::eq(catalog.entries(), clone.entries()));
    }
}
