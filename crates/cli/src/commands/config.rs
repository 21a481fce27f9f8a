use std::env;
use std::fs;
use std::path::Path;

use npsdash_core::config::{resolve_config_path, AppConfig, LogFormat};
use serde::Serialize;
use toml::Value;
use tracing::info;

use super::{load_config, CommandResult};

#[derive(Debug, Serialize)]
struct ConfigEntry {
    key: &'static str,
    value: String,
    source: String,
}

pub fn run() -> CommandResult {
    let config = match load_config() {
        Ok(config) => config,
        Err(error) => return CommandResult::from_error("config", error),
    };

    let config_file_path = resolve_config_path(None);
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());
    let entries = entries(&config, config_file_doc.as_ref(), config_file_path.as_deref());

    let mut lines =
        vec!["effective config (source precedence: env > file > default):".to_string()];
    lines.extend(entries.iter().map(render_line));

    info!(
        event_name = "cli.config.completed",
        config_file = config_file_path
            .as_deref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "<none>".to_string()),
        "effective configuration rendered"
    );
    CommandResult::success("config", lines.join("\n"), &entries)
}

fn entries(
    config: &AppConfig,
    doc: Option<&Value>,
    path: Option<&Path>,
) -> Vec<ConfigEntry> {
    let entry = |key: &'static str, value: String, env_keys: &[&str]| ConfigEntry {
        key,
        value,
        source: field_source(key, env_keys, doc, path),
    };

    vec![
        entry(
            "storage.path",
            config.storage.path.display().to_string(),
            &["NPSDASH_STORAGE_PATH"],
        ),
        entry(
            "dashboard.default_period",
            config.dashboard.default_period.key().to_string(),
            &["NPSDASH_DASHBOARD_DEFAULT_PERIOD"],
        ),
        entry(
            "dashboard.reference_date",
            config
                .dashboard
                .reference_date
                .map(|date| date.to_string())
                .unwrap_or_else(|| format!("<local date: {}>", config.dashboard.today())),
            &["NPSDASH_DASHBOARD_REFERENCE_DATE"],
        ),
        entry(
            "logging.level",
            config.logging.level.clone(),
            &["NPSDASH_LOGGING_LEVEL", "NPSDASH_LOG_LEVEL"],
        ),
        entry(
            "logging.format",
            format_name(config.logging.format).to_string(),
            &["NPSDASH_LOGGING_FORMAT", "NPSDASH_LOG_FORMAT"],
        ),
    ]
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_keys: &[&str],
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    if let Some(env_key) = env_keys.iter().find(|key| env::var_os(key).is_some()) {
        return format!("env ({env_key})");
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
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

fn render_line(entry: &ConfigEntry) -> String {
    format!("- {} = {} (source: {})", entry.key, entry.value, entry.source)
}

fn format_name(format: LogFormat) -> &'static str {
    match format {
        LogFormat::Compact => "compact",
        LogFormat::Pretty => "pretty",
        LogFormat::Json => "json",
    }
}
