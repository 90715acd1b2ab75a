use std::sync::LazyLock;

/// Path of the JSON file backing [`crate::FileSessionStore`] when built from
/// the environment.
///
/// Default: "admin_session.json"
pub static ADMIN_SESSION_FILE: LazyLock<String> = LazyLock::new(|| {
    std::env::var("ADMIN_SESSION_FILE").unwrap_or_else(|_| "admin_session.json".to_string())
});
