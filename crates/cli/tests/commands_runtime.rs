use std::env;
use std::sync::{Mutex, OnceLock};

use catalog_cli::commands::{config, doctor, migrate, seed};
use serde_json::Value;

const MEMORY_DB: (&str, &str) = ("CATALOG_DATABASE_URL", "sqlite::memory:");
const UNSUPPORTED_DB: (&str, &str) = ("CATALOG_DATABASE_URL", "postgres://localhost/catalog");

#[test]
fn migrate_returns_success_with_valid_env() {
    with_env(&[MEMORY_DB], || {
        let result = migrate::run();
        assert_eq!(result.exit_code, 0, "expected successful migrate run");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "migrate");
        assert_eq!(payload["status"], "ok");
        assert!(payload["error_class"].is_null());
    });
}

#[test]
fn migrate_returns_config_failure_for_unsupported_database() {
    with_env(&[UNSUPPORTED_DB], || {
        let result = migrate::run();
        assert_eq!(result.exit_code, 2, "expected config validation failure code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "migrate");
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error_class"], "config_validation");
        assert!(payload["message"].as_str().unwrap_or("").contains("database.url"));
    });
}

#[test]
fn migrate_reports_invalid_numeric_env_as_config_failure() {
    with_env(&[MEMORY_DB, ("CATALOG_DATABASE_MAX_CONNECTIONS", "many")], || {
        let result = migrate::run();
        assert_eq!(result.exit_code, 2);
        assert_eq!(parse_payload(&result.output)["error_class"], "config_validation");
    });
}

#[test]
fn seed_inserts_demo_products_into_fresh_database() {
    with_env(&[MEMORY_DB], || {
        let result = seed::run();
        assert_eq!(result.exit_code, 0, "expected seed success");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "seed");
        assert_eq!(payload["status"], "ok");
        assert_eq!(payload["message"], "demo catalog loaded: 3 inserted, 0 already present");
    });
}

#[test]
fn seed_returns_config_failure_for_unsupported_database() {
    with_env(&[UNSUPPORTED_DB], || {
        let result = seed::run();
        assert_eq!(result.exit_code, 2);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "seed");
        assert_eq!(payload["error_class"], "config_validation");
    });
}

#[test]
fn config_lists_effective_values_with_sources() {
    with_env(&[MEMORY_DB, ("CATALOG_LOG_LEVEL", "debug")], || {
        let result = config::run();
        assert_eq!(result.exit_code, 0);

        let output = result.output;
        assert!(output.starts_with("effective config"));
        assert!(output
            .contains("- database.url = sqlite::memory: (source: env (CATALOG_DATABASE_URL))"));
        assert!(output.contains("- logging.level = debug (source: env (CATALOG_LOG_LEVEL))"));
        assert!(output.contains("- server.port = 8080 (source: default)"));
        assert!(output.contains("- listen_address = 127.0.0.1:8080 (source: derived)"));
    });
}

#[test]
fn config_returns_structured_failure_when_validation_fails() {
    with_env(&[UNSUPPORTED_DB], || {
        let result = config::run();
        assert_eq!(result.exit_code, 2);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "config");
        assert_eq!(payload["error_class"], "config_validation");
    });
}

#[test]
fn doctor_json_flags_unmigrated_database() {
    with_env(&[MEMORY_DB], || {
        let result = doctor::run(true);
        assert_eq!(result.exit_code, 1, "fresh in-memory database has no schema yet");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["overall_status"], "fail");

        let checks = payload["checks"].as_array().expect("checks array");
        assert_eq!(check_status(checks, "config_validation"), "pass");
        assert_eq!(check_status(checks, "database_connectivity"), "pass");
        assert_eq!(check_status(checks, "schema_migrations"), "fail");
    });
}

#[test]
fn doctor_passes_once_file_database_is_migrated() {
    let dir = tempfile::tempdir().expect("temp dir");
    let url = file_database_url(&dir);

    with_env(&[("CATALOG_DATABASE_URL", url.as_str())], || {
        assert_eq!(migrate::run().exit_code, 0, "migrate should prepare the file database");

        let result = doctor::run(true);
        assert_eq!(result.exit_code, 0, "all checks should pass: {}", result.output);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["overall_status"], "pass");
        let checks = payload["checks"].as_array().expect("checks array");
        for name in ["config_validation", "database_connectivity", "schema_migrations"] {
            assert_eq!(check_status(checks, name), "pass", "check `{name}`");
        }

        let human = doctor::run(false);
        assert_eq!(human.exit_code, 0);
        assert!(human.output.starts_with("doctor: all readiness checks passed"));
    });
}

#[test]
fn seed_skips_products_already_present_in_file_database() {
    let dir = tempfile::tempdir().expect("temp dir");
    let url = file_database_url(&dir);

    with_env(&[("CATALOG_DATABASE_URL", url.as_str())], || {
        let first = parse_payload(&seed::run().output);
        assert_eq!(first["message"], "demo catalog loaded: 3 inserted, 0 already present");

        let second = parse_payload(&seed::run().output);
        assert_eq!(second["status"], "ok");
        assert_eq!(second["message"], "demo catalog loaded: 0 inserted, 3 already present");
    });
}

#[test]
fn doctor_skips_database_checks_when_config_is_invalid() {
    with_env(&[UNSUPPORTED_DB], || {
        let result = doctor::run(false);
        assert_eq!(result.exit_code, 1);

        assert!(result.output.starts_with("doctor: one or more readiness checks failed"));
        assert!(result.output.contains("- [fail] config_validation:"));
        assert!(result.output.contains("- [skip] database_connectivity:"));
        assert!(result.output.contains("- [skip] schema_migrations:"));
    });
}

fn file_database_url(dir: &tempfile::TempDir) -> String {
    format!("sqlite://{}?mode=rwc", dir.path().join("catalog.db").display())
}

fn check_status<'a>(checks: &'a [Value], name: &str) -> &'a str {
    checks
        .iter()
        .find(|check| check["name"] == name)
        .and_then(|check| check["status"].as_str())
        .unwrap_or("missing")
}

fn with_env(vars: &[(&str, &str)], test_fn: impl FnOnce()) {
    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    let _guard =
        ENV_LOCK.get_or_init(|| Mutex::new(())).lock().expect("env mutex should not be poisoned");

    let keys = [
        "CATALOG_DATABASE_URL",
        "CATALOG_DATABASE_MAX_CONNECTIONS",
        "CATALOG_DATABASE_TIMEOUT_SECS",
        "CATALOG_SERVER_BIND_ADDRESS",
        "CATALOG_SERVER_PORT",
        "CATALOG_SERVER_GRACEFUL_SHUTDOWN_SECS",
        "CATALOG_LOGGING_LEVEL",
        "CATALOG_LOGGING_FORMAT",
        "CATALOG_LOG_LEVEL",
        "CATALOG_LOG_FORMAT",
    ];

    let previous_values: Vec<(&str, Option<String>)> =
        keys.iter().map(|key| (*key, env::var(key).ok())).collect();

    for key in &keys {
        env::remove_var(key);
    }
    for (key, value) in vars {
        env::set_var(key, value);
    }

    test_fn();

    for (key, value) in previous_values {
        if let Some(value) = value {
            env::set_var(key, value);
        } else {
            env::remove_var(key);
        }
    }
}

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output).expect("command output should be valid json")
}
