use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use serde_json::Value;
use std::env;
use std::path::PathBuf;

pub mod env_vars;
pub mod models;
pub use models::*;

/// Loads the layered application configuration.
///
/// Sources, lowest precedence first:
/// `config/default.*`, `config/{RUN_ENV}.*`, `NEWTAB__*` environment variables.
/// Google credentials are then taken from `NEWTAB_SECRET_*` or the legacy plain
/// variable names when those are set, replacing the file values.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let prefix = env_vars::get_config_prefix();
    let config_dir = PathBuf::from(env::var("NEWTAB_CONFIG_DIR").unwrap_or_else(|_| "config".to_string()));

    let default_path = config_dir.join("default");
    let env_path = config_dir.join(&run_env);

    tracing::debug!(
        "loading config from {} and {}",
        default_path.display(),
        env_path.display()
    );

    let builder = Config::builder()
        .add_source(File::with_name(&default_path.to_string_lossy()).required(false))
        .add_source(File::with_name(&env_path.to_string_lossy()).required(false))
        .add_source(
            Environment::with_prefix(&prefix)
                .separator(env_vars::CONFIG_SEPARATOR)
                .try_parsing(true),
        )
        .set_override("run_env", run_env)?;

    let mut raw: Value = builder.build()?.try_deserialize()?;
    apply_env_overrides(&mut raw, |key| env::var(key).ok());

    serde_json::from_value(raw)
        .map_err(|err| ConfigError::Message(format!("invalid configuration: {err}")))
}

/// Injects env-backed secrets into a raw config tree, creating the `google`
/// section when the files did not mention it.
pub fn apply_env_overrides<F>(raw: &mut Value, lookup: F) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    if let Value::Object(map) = raw {
        map.entry("google")
            .or_insert_with(|| Value::Object(Default::default()));
    }
    env_vars::inject_env_vars(raw, lookup)
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Ensures that the dotenv file is loaded into the environment variables.
///
/// The file is `DOTENV_OVERRIDE` when set, otherwise the first CLI argument if
/// it starts with `.env`, otherwise `.env`. Loading happens at most once.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path_override = env::var("DOTENV_OVERRIDE").ok();
    let dotenv_path_arg = env::args().nth(1).filter(|s| s.starts_with(".env"));

    let dotenv_path = dotenv_path_override
        .or(dotenv_path_arg)
        .unwrap_or_else(|| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}
