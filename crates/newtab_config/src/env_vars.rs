//! Environment variable handling for the newtab application.
//!
//! Configuration keys map to `NEWTAB__SECTION__KEY` variables. Secrets can also
//! be supplied as `NEWTAB_SECRET_SECTION_KEY`, or through the plain legacy
//! names (`GOOGLE_CLIENT_ID`, `BASE_URL`, ...).

use serde_json::Value;
use std::env;

/// The default prefix for configuration environment variables
pub const DEFAULT_PREFIX: &str = "NEWTAB";

/// The prefix for secret environment variables
pub const SECRET_PREFIX: &str = "NEWTAB_SECRET";

/// The separator for configuration environment variables
pub const CONFIG_SEPARATOR: &str = "__";

/// The separator for secret environment variables
pub const SECRET_SEPARATOR: &str = "_";

/// Marker value in config files meaning "read this from the environment".
pub const SECRET_MARKER: &str = "secret_from_env";

/// Config paths backed by the environment, together with extra legacy aliases.
/// A set variable takes precedence over the file value.
pub const ENV_BACKED_PATHS: &[(&str, &[&str])] = &[
    ("google.client_id", &[]),
    ("google.client_secret", &[]),
    ("google.base_url", &["BASE_URL", "NEXT_PUBLIC_BASE_URL"]),
];

/// Get the prefix for configuration environment variables
pub fn get_config_prefix() -> String {
    env::var("PREFIX").unwrap_or_else(|_| DEFAULT_PREFIX.to_string())
}

/// Convert a configuration path to an environment variable name
///
/// `server.host` becomes `NEWTAB__SERVER__HOST`.
pub fn config_path_to_env_var(path: &str) -> String {
    let prefix = get_config_prefix();
    let path = path.replace('.', CONFIG_SEPARATOR);
    format!("{}{}{}", prefix, CONFIG_SEPARATOR, path).to_uppercase()
}

/// Convert a secret path to an environment variable name
///
/// `google.client_secret` becomes `NEWTAB_SECRET_GOOGLE_CLIENT_SECRET`.
pub fn secret_path_to_env_var(path: &str) -> String {
    let path = path.replace('.', SECRET_SEPARATOR);
    format!("{}{}{}", SECRET_PREFIX, SECRET_SEPARATOR, path).to_uppercase()
}

/// Convert a path to its legacy, unprefixed variable name
///
/// `google.client_id` becomes `GOOGLE_CLIENT_ID`.
pub fn legacy_path_to_env_var(path: &str) -> String {
    let parts: Vec<&str> = path.split('.').collect();
    if parts.len() < 2 {
        return path.to_uppercase();
    }

    let service = parts[0];
    let key = parts[1..].join(SECRET_SEPARATOR);
    format!("{}_{}", service, key).to_uppercase()
}

/// Resolve a path against the environment: secret name, legacy name, then aliases.
pub fn lookup_env_backed<F>(path: &str, aliases: &[&str], lookup: &F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    std::iter::once(secret_path_to_env_var(path))
        .chain(std::iter::once(legacy_path_to_env_var(path)))
        .chain(aliases.iter().map(|a| a.to_string()))
        .find_map(|name| lookup(&name).filter(|v| !v.is_empty()))
}

/// Apply env-backed paths to a serialized config.
///
/// A set variable replaces whatever the file holds. Without one, a missing,
/// empty or [`SECRET_MARKER`] value becomes null.
/// Returns `true` when any value was injected.
pub fn inject_env_vars<F>(value: &mut Value, lookup: F) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    let mut replaced = false;

    for (path, aliases) in ENV_BACKED_PATHS {
        let Some((section, key)) = path.split_once('.') else {
            continue;
        };
        let Some(section_obj) = value.get_mut(section).and_then(Value::as_object_mut) else {
            continue;
        };

        if let Some(env_val) = lookup_env_backed(path, aliases, &lookup) {
            section_obj.insert(key.to_string(), Value::String(env_val));
            replaced = true;
            continue;
        }

        let unresolved = match section_obj.get(key) {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.is_empty() || s == SECRET_MARKER,
            Some(_) => false,
        };
        if unresolved {
            // a leftover marker must not be mistaken for a real credential
            section_obj.insert(key.to_string(), Value::Null);
            tracing::debug!("no environment value for {}", path);
        }
    }

    replaced
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn test_config_path_to_env_var() {
        assert_eq!(config_path_to_env_var("server.host"), "NEWTAB__SERVER__HOST");
        assert_eq!(
            config_path_to_env_var("google.calendar_id"),
            "NEWTAB__GOOGLE__CALENDAR_ID"
        );
    }

    #[test]
    fn test_secret_and_legacy_names() {
        assert_eq!(
            secret_path_to_env_var("google.client_secret"),
            "NEWTAB_SECRET_GOOGLE_CLIENT_SECRET"
        );
        assert_eq!(legacy_path_to_env_var("google.client_id"), "GOOGLE_CLIENT_ID");
        assert_eq!(legacy_path_to_env_var("plain"), "PLAIN");
    }

    #[test]
    fn test_inject_prefers_secret_name_over_legacy() {
        let mut value = json!({ "google": { "client_secret": "secret_from_env" } });
        let lookup = env_of(&[
            ("NEWTAB_SECRET_GOOGLE_CLIENT_SECRET", "new"),
            ("GOOGLE_CLIENT_SECRET", "old"),
        ]);

        assert!(inject_env_vars(&mut value, lookup));
        assert_eq!(value["google"]["client_secret"], "new");
    }

    #[test]
    fn test_inject_uses_base_url_alias() {
        let mut value = json!({ "google": { "base_url": null } });
        let lookup = env_of(&[("NEXT_PUBLIC_BASE_URL", "tab.example.com")]);

        inject_env_vars(&mut value, lookup);
        assert_eq!(value["google"]["base_url"], "tab.example.com");
    }

    #[test]
    fn test_environment_overrides_file_values() {
        let mut value = json!({
            "google": { "client_id": "from-file", "base_url": "file.example.com" }
        });
        let lookup = env_of(&[
            ("GOOGLE_CLIENT_ID", "from-env"),
            ("BASE_URL", "env.example.com"),
        ]);

        assert!(inject_env_vars(&mut value, lookup));
        assert_eq!(value["google"]["client_id"], "from-env");
        assert_eq!(value["google"]["base_url"], "env.example.com");
    }

    #[test]
    fn test_file_value_kept_without_environment() {
        let mut value = json!({ "google": { "client_id": "from-file" } });

        assert!(!inject_env_vars(&mut value, |_| None));
        assert_eq!(value["google"]["client_id"], "from-file");
    }

    #[test]
    fn test_unresolved_marker_becomes_null() {
        let mut value = json!({ "google": { "client_secret": "secret_from_env" } });

        inject_env_vars(&mut value, |_| None);
        assert!(value["google"]["client_secret"].is_null());
    }
}
