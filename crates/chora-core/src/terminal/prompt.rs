//! Prompt rendering.

use std::path::Path;

/// Name used when neither `USER` nor `USERNAME` is set.
pub const FALLBACK_USER: &str = "user";

/// Picks the first non-empty of `$USER` and `$USERNAME`.
pub fn resolve_user(user: Option<String>, username: Option<String>) -> String {
    user.filter(|u| !u.is_empty())
        .or(username.filter(|u| !u.is_empty()))
        .unwrap_or_else(|| FALLBACK_USER.to_string())
}

/// The current user's login name from the environment.
pub fn user_from_env() -> String {
    resolve_user(std::env::var("USER").ok(), std::env::var("USERNAME").ok())
}

/// `cwd` with the home directory shown as `~`.
pub fn display_path(cwd: &Path, home: &Path) -> String {
    match cwd.strip_prefix(home) {
        Ok(rest) if rest.as_os_str().is_empty() => "~".to_string(),
        Ok(rest) => format!("~{}{}", std::path::MAIN_SEPARATOR, rest.display()),
        Err(_) => cwd.display().to_string(),
    }
}

/// `user@path $ `
pub fn render(user: &str, cwd: &Path, home: &Path) -> String {
    format!("{}@{} $ ", user, display_path(cwd, home))
}
