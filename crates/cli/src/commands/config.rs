use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use catalog_core::config::{resolve_config_path, AppConfig, LoadOptions};
use toml::Value;

use crate::commands::CommandResult;

/// Each reported key with the env variables that can override it, highest
/// precedence first.
const FIELDS: [(&str, &[&str]); 9] = [
    ("database.url", &["CATALOG_DATABASE_URL"]),
    ("database.max_connections", &["CATALOG_DATABASE_MAX_CONNECTIONS"]),
    ("database.timeout_secs", &["CATALOG_DATABASE_TIMEOUT_SECS"]),
    ("server.bind_address", &["CATALOG_SERVER_BIND_ADDRESS"]),
    ("server.port", &["CATALOG_SERVER_PORT"]),
    ("server.graceful_shutdown_secs", &["CATALOG_SERVER_GRACEFUL_SHUTDOWN_SECS"]),
    ("logging.level", &["CATALOG_LOGGING_LEVEL", "CATALOG_LOG_LEVEL"]),
    ("logging.format", &["CATALOG_LOGGING_FORMAT", "CATALOG_LOG_FORMAT"]),
    ("listen_address", &[]),
];

pub fn run() -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "config",
                "config_validation",
                format!("config validation failed: {error}"),
                2,
            )
        }
    };

    let file_path = resolve_config_path(None);
    let file_doc = load_config_file_doc(file_path.as_deref());

    let mut lines = vec!["effective config (source precedence: env > file > default):".to_string()];
    for (key, env_keys) in FIELDS {
        let source = if key == "listen_address" {
            "derived".to_string()
        } else {
            field_source(key, env_keys, file_doc.as_ref(), file_path.as_deref())
        };
        lines.push(render_line(key, &effective_value(&config, key), source));
    }

    CommandResult::report(lines.join("\n"))
}

fn effective_value(config: &AppConfig, key: &str) -> String {
    match key {
        "database.url" => config.database.url.clone(),
        "database.max_connections" => config.database.max_connections.to_string(),
        "database.timeout_secs" => config.database.timeout_secs.to_string(),
        "server.bind_address" => config.server.bind_address.clone(),
        "server.port" => config.server.port.to_string(),
        "server.graceful_shutdown_secs" => config.server.graceful_shutdown_secs.to_string(),
        "logging.level" => config.logging.level.clone(),
        "logging.format" => format!("{:?}", config.logging.format).to_lowercase(),
        "listen_address" => config.listen_address(),
        _ => "<unknown>".to_string(),
    }
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let raw = fs::read_to_string(path?).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_keys: &[&str],
    file_doc: Option<&Value>,
    file_path: Option<&Path>,
) -> String {
    if let Some(env_key) = env_keys.iter().find(|key| env::var_os(key).is_some()) {
        return format!("env ({env_key})");
    }

    if let Some(doc) = file_doc {
        if contains_path(doc, key_path) {
            let file_path = file_path
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("config file"));
            return format!("file ({})", file_path.display());
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}
