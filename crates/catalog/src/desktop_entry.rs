//! freedesktop.org `.desktop` entry reading.
//!
//! Only the keys the catalog needs are read from the `[Desktop Entry]`
//! group. Localized keys (`Name[de]=...`) are ignored in favor of the plain
//! ones.

use crate::entry::{AppIcon, InstalledApp};
use std::path::Path;

/// Parse the contents of a desktop entry file.
///
/// `desktop_id` is the file name without the `.desktop` suffix; it becomes
/// the identifier handed to the launcher. Returns `None` when the file has
/// no usable `Name`.
pub fn parse_desktop_entry(desktop_id: &str, contents: &str) -> Option<InstalledApp> {
    let mut in_main_group = false;
    let mut name = None;
    let mut icon = None;
    let mut kind = None;
    let mut has_exec = false;
    let mut hidden = false;

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') {
            in_main_group = line == "[Desktop Entry]";
            continue;
        }

        if !in_main_group {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            continue;
        };

        match (key.trim(), value.trim()) {
            ("Name", v) => name = Some(v.to_string()),
            ("Icon", v) => icon = resolve_icon(v),
            ("Type", v) => kind = Some(v.to_string()),
            ("Exec", v) => has_exec = !v.is_empty(),
            ("NoDisplay", "true") | ("Hidden", "true") => hidden = true,
            _ => {}
        }
    }

    let display_name = name.filter(|n| !n.is_empty())?;
    let is_application = kind.as_deref().map_or(true, |k| k == "Application");

    Some(InstalledApp {
        display_name,
        identifier: desktop_id.to_string(),
        icon,
        launchable: is_application && has_exec && !hidden,
    })
}

fn resolve_icon(value: &str) -> Option<AppIcon> {
    if value.is_empty() {
        return None;
    }

    let path = Path::new(value);
    if path.is_absolute() {
        // Missing files leave the entry without an icon.
        return path.exists().then(|| AppIcon::File(path.to_path_buf()));
    }

    Some(AppIcon::Themed(value.to_string()))
}

/// Read every `*.desktop` file directly inside `dir`.
///
/// Unreadable directories and files are skipped.
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
pub(crate) fn scan_dir(dir: &Path) -> Vec<InstalledApp> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut apps = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) != Some("desktop") {
            continue;
        }

        let Some(desktop_id) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };

        let contents = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) => {
                tracing::debug!(
                    path = %path.display(),
                    error = %e,
                    "skipping unreadable desktop entry"
                );
                continue;
            }
        };

        if let Some(app) = parse_desktop_entry(desktop_id, &contents) {
            apps.push(app);
        }
    }

    apps
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const FIREFOX: &str = "\
[Desktop Entry]
Version=1.0
Name=Firefox Web Browser
Name[de]=Firefox-Webbrowser
Exec=firefox %u
Icon=firefox
Type=Application

[Desktop Action new-window]
Name=Open a New Window
Exec=firefox --new-window
";

    #[test]
    fn test_parse_reads_main_group_only() {
        let app = parse_desktop_entry("firefox", FIREFOX).unwrap();

        assert_eq!(app.display_name, "Firefox Web Browser");
        assert_eq!(app.identifier, "firefox");
        assert_eq!(app.icon, Some(AppIcon::Themed("firefox".to_string())));
        assert!(app.launchable);
    }

    #[test]
    fn test_parse_marks_hidden_entries_unlaunchable() {
        let contents = "[Desktop Entry]\nName=Helper\nExec=helper\nNoDisplay=true\n";
        let app = parse_desktop_entry("helper", contents).unwrap();
        assert!(!app.launchable);

        let link = "[Desktop Entry]\nName=Docs\nType=Link\nURL=https://example.org\n";
        assert!(!parse_desktop_entry("docs", link).unwrap().launchable);
    }

    #[test]
    fn test_parse_without_name_is_skipped() {
        assert!(parse_desktop_entry("nameless", "[Desktop Entry]\nExec=x\n").is_none());
    }

    #[test]
    fn test_missing_icon_file_leaves_icon_empty() {
        let contents = "[Desktop Entry]\nName=Tool\nExec=tool\nIcon=/nonexistent/tool.png\n";
        let app = parse_desktop_entry("tool", contents).unwrap();

        assert_eq!(app.icon, None);
        assert!(app.launchable);
    }

    #[test]
    fn test_scan_dir_reads_desktop_files() {
        let dir = tempdir().unwrap();
        let icon_path = dir.path().join("calc.png");
        std::fs::write(&icon_path, b"png").unwrap();

        std::fs::write(
            dir.path().join("org.calc.desktop"),
            format!(
                "[Desktop Entry]\nName=Calculator\nExec=calc\nIcon={}\n",
                icon_path.display()
            ),
        )
        .unwrap();
        std::fs::write(dir.path().join("notes.txt"), "not an entry").unwrap();

        let apps = scan_dir(dir.path());
        assert_eq!(apps.len(), 1);
        assert_eq!(apps[0].identifier, "org.calc");
        assert_eq!(apps[0].icon, Some(AppIcon::File(icon_path)));
    }

    #[test]
    fn test_scan_missing_dir_is_empty() {
        let dir = tempdir().unwrap();
        assert!(scan_dir(&dir.path().join("missing")).is_empty());
    }
}
