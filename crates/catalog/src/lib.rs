//! Installed applications for finder.
//!
//! The application list is read once at startup from an [`AppSource`],
//! normalized into an immutable [`AppCatalog`] and then only ever searched.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      Domain Layer                         │
//! │  entry.rs    - AppEntry / InstalledApp                    │
//! │  catalog.rs  - dedupe, exclusion, case-insensitive order  │
//! │  search.rs   - query merge and substring filter           │
//! └──────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Infrastructure Layer                     │
//! │  source.rs / launcher.rs - collaborator traits            │
//! │  platform/               - app bundles, desktop entries   │
//! └──────────────────────────────────────────────────────────┘
//! ```

mod catalog;
mod desktop_entry;
mod entry;
mod error;
mod launcher;
mod search;
mod source;

pub mod platform;

pub use catalog::{AppCatalog, CatalogConfig};
pub use desktop_entry::parse_desktop_entry;
pub use entry::{AppEntry, AppIcon, InstalledApp};
pub use error::{CatalogError, LaunchError};
pub use launcher::{AppLauncher, AppLauncherRef, NullLauncher};
pub use platform::{PlatformAppSource, SystemLauncher};
pub use search::{effective_query, matches, search, SearchResults, SearchStatus};
pub use source::{AppSource, StaticAppSource};
