use crate::entry::{AppIcon, InstalledApp};
use std::path::{Path, PathBuf};

/// Walk the given roots for `.app` bundles. Bundles nested inside another
/// bundle are not descended into.
pub fn list_installed_apps(roots: &[PathBuf]) -> Vec<InstalledApp> {
    let mut apps = Vec::new();

    for root in roots {
        if !root.exists() {
            continue;
        }

        let mut stack = vec![root.clone()];
        while let Some(current) = stack.pop() {
            let Ok(entries) = std::fs::read_dir(&current) else {
                continue;
            };

            for entry in entries.flatten() {
                let path = entry.path();
                if !path.is_dir() {
                    continue;
                }

                if is_app_bundle(&path) {
                    if let Some(app) = read_app_info(&path) {
                        apps.push(app);
                    }
                } else {
                    stack.push(path);
                }
            }
        }
    }

    apps
}

fn is_app_bundle(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some("app")
}

fn read_app_info(app_path: &Path) -> Option<InstalledApp> {
    let plist_path = app_path.join("Contents/Info.plist");
    let plist: plist::Dictionary = plist::from_file(&plist_path).ok()?;

    let identifier = plist
        .get("CFBundleIdentifier")
        .and_then(|v| v.as_string())?
        .to_string();

    let display_name = plist
        .get("CFBundleDisplayName")
        .or_else(|| plist.get("CFBundleName"))
        .and_then(|v| v.as_string())
        .map(str::to_string)
        .or_else(|| {
            app_path
                .file_stem()
                .and_then(|s| s.to_str())
                .map(str::to_string)
        })?;

    let is_agent = ["LSUIElement", "LSBackgroundOnly"].iter().any(|key| {
        plist
            .get(key)
            .map(|v| v.as_boolean() == Some(true) || v.as_string() == Some("1"))
            .unwrap_or(false)
    });

    Some(InstalledApp {
        display_name,
        identifier,
        icon: bundle_icon(app_path, &plist),
        launchable: plist.get("CFBundleExecutable").is_some() && !is_agent,
    })
}

fn bundle_icon(app_path: &Path, plist: &plist::Dictionary) -> Option<AppIcon> {
    let name = plist.get("CFBundleIconFile").and_then(|v| v.as_string())?;
    let mut path = app_path.join("Contents/Resources").join(name);
    if path.extension().is_none() {
        path.set_extension("icns");
    }
    path.exists().then_some(AppIcon::File(path))
}
