//! Environment variable accessors with defaults.
//!
//! A variable counts as "set" when it exists, even if its value is empty.

/// Get an environment variable, or `default` if it is not set.
///
/// Non-UTF-8 values are decoded lossily.
pub fn get_env(key: &str, default: &str) -> String {
    match std::env::var_os(key) {
        Some(value) => value.to_string_lossy().into_owned(),
        None => default.to_string(),
    }
}

/// Get an environment variable as a boolean.
///
/// Returns `default` when the variable is unset or its value is not one of
/// `1`, `t`, `true`, `0`, `f`, `false` (case-insensitive). An empty value is
/// a parse failure, so it also yields `default`.
pub fn get_env_as_bool(key: &str, default: bool) -> bool {
    let Some(value) = std::env::var_os(key) else {
        return default;
    };
    parse_bool(&value.to_string_lossy()).unwrap_or(default)
}

/// Parse the common textual boolean forms.
pub fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "1" | "t" | "true" => Some(true),
        "0" | "f" | "false" => Some(false),
        _ => None,
    }
}
