use crate::models::settings::Settings;
use std::fs;
use std::io;
use std::path::Path;
use tracing::warn;

pub fn save_settings(settings: &Settings, path: &Path) -> io::Result<()> {
    fs::write(path, serde_json::to_string_pretty(settings)?)
}

/// Reads `path` as JSON; fields missing from the file keep their defaults.
pub fn load_settings(path: &Path) -> io::Result<Settings> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Settings from `path`, or the defaults when the file is absent or unreadable.
pub fn load_settings_or_default(path: &Path) -> Settings {
    match load_settings(path) {
        Ok(settings) => settings,
        Err(e) if e.kind() == io::ErrorKind::NotFound => Settings::default(),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring settings file");
            Settings::default()
        }
    }
}
