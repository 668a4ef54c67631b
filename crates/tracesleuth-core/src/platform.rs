/// Well-known Windows folder resolution.
///
/// The scanner itself is path-agnostic; this module only supplies the roots
/// for the standard sweep profiles. Everything resolves from environment
/// variables and returns `Option`, so a missing variable (stripped service
/// accounts, non-Windows test hosts) degrades to a skipped sweep target
/// rather than an error.
use std::env;
use std::path::PathBuf;

fn env_path(var: &str) -> Option<PathBuf> {
    env::var_os(var)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// `%APPDATA%` (AppData\Roaming).
pub fn roaming_app_data() -> Option<PathBuf> {
    env_path("APPDATA")
}

/// `%LOCALAPPDATA%` (AppData\Local).
pub fn local_app_data() -> Option<PathBuf> {
    env_path("LOCALAPPDATA")
}

/// The user profile root (`%USERPROFILE%`).
pub fn user_profile() -> Option<PathBuf> {
    env_path("USERPROFILE")
}

/// AppData\LocalLow, which has no environment variable of its own.
pub fn local_low_app_data() -> Option<PathBuf> {
    user_profile().map(|profile| profile.join("AppData").join("LocalLow"))
}

/// The Windows directory (`%windir%`, falling back to `%SystemRoot%`).
pub fn windows_dir() -> Option<PathBuf> {
    env_path("windir").or_else(|| env_path("SystemRoot"))
}

/// The Prefetch folder with its .pf execution traces.
pub fn prefetch_dir() -> Option<PathBuf> {
    windows_dir().map(|windir| windir.join("Prefetch"))
}

/// `%ProgramFiles%`.
pub fn program_files() -> Option<PathBuf> {
    env_path("ProgramFiles")
}

/// `%ProgramFiles(x86)%`.
pub fn program_files_x86() -> Option<PathBuf> {
    env_path("ProgramFiles(x86)")
}

/// The user's Downloads folder.
pub fn downloads_dir() -> Option<PathBuf> {
    user_profile().map(|profile| profile.join("Downloads"))
}

/// The OneDrive root (`%OneDrive%`, falling back to the profile default).
pub fn onedrive_dir() -> Option<PathBuf> {
    env_path("OneDrive").or_else(|| user_profile().map(|profile| profile.join("OneDrive")))
}
