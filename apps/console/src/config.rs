use std::{fs, io, path::PathBuf, time::Duration};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use client_core::{SessionOptions, StalePolicy, DEFAULT_GREETING};
use serde::Deserialize;
use url::Url;

pub const DEFAULT_CONFIG_PATH: &str = "case_console.toml";

#[derive(Parser, Debug, Default)]
#[command(name = "case-console", about = "Interactive evidence board for the case retrieval backend")]
pub struct Cli {
    /// Backend base URL, e.g. http://localhost:8000
    #[arg(long)]
    pub server_url: Option<String>,
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// latest_only | arrival_order
    #[arg(long)]
    pub stale_policy: Option<StalePolicy>,
    #[arg(long)]
    pub log_filter: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub server_url: String,
    pub health_interval_secs: u64,
    pub request_timeout_secs: u64,
    pub stale_policy: StalePolicy,
    pub greeting: String,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:8000".into(),
            health_interval_secs: 10,
            request_timeout_secs: 30,
            stale_policy: StalePolicy::LatestOnly,
            greeting: DEFAULT_GREETING.into(),
            log_filter: "warn".into(),
        }
    }
}

impl Settings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn session_options(&self) -> SessionOptions {
        let health_interval = Duration::from_secs(self.health_interval_secs.max(1));
        SessionOptions {
            greeting: self.greeting.clone(),
            health_interval,
            probe_timeout: self.request_timeout().min(health_interval),
            stale_policy: self.stale_policy,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileSettings {
    server_url: Option<String>,
    health_interval_secs: Option<u64>,
    request_timeout_secs: Option<u64>,
    stale_policy: Option<StalePolicy>,
    greeting: Option<String>,
    log_filter: Option<String>,
}

/// Defaults, then the TOML file, then environment, then command-line flags.
pub fn load_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = Settings::default();

    let explicit = cli.config.is_some();
    let path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    match fs::read_to_string(&path) {
        Ok(raw) => {
            apply_file(&mut settings, &raw)
                .with_context(|| format!("invalid config file '{}'", path.display()))?;
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound && !explicit => {}
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read '{}'", path.display()));
        }
    }

    apply_env(&mut settings, |key| std::env::var(key).ok())?;

    if let Some(v) = &cli.server_url {
        settings.server_url = v.clone();
    }
    if let Some(v) = cli.stale_policy {
        settings.stale_policy = v;
    }
    if let Some(v) = &cli.log_filter {
        settings.log_filter = v.clone();
    }

    settings.server_url = normalize_server_url(&settings.server_url)?;
    Ok(settings)
}

fn apply_file(settings: &mut Settings, raw: &str) -> Result<()> {
    let file: FileSettings = toml::from_str(raw)?;
    if let Some(v) = file.server_url {
        settings.server_url = v;
    }
    if let Some(v) = file.health_interval_secs {
        settings.health_interval_secs = v;
    }
    if let Some(v) = file.request_timeout_secs {
        settings.request_timeout_secs = v;
    }
    if let Some(v) = file.stale_policy {
        settings.stale_policy = v;
    }
    if let Some(v) = file.greeting {
        settings.greeting = v;
    }
    if let Some(v) = file.log_filter {
        settings.log_filter = v;
    }
    Ok(())
}

fn apply_env(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
    if let Some(v) = lookup("CASE_SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = lookup("APP__SERVER_URL") {
        settings.server_url = v;
    }

    if let Some(v) = lookup("APP__HEALTH_INTERVAL_SECS") {
        settings.health_interval_secs = v
            .trim()
            .parse()
            .with_context(|| format!("APP__HEALTH_INTERVAL_SECS must be an integer, got '{v}'"))?;
    }
    if let Some(v) = lookup("APP__REQUEST_TIMEOUT_SECS") {
        settings.request_timeout_secs = v
            .trim()
            .parse()
            .with_context(|| format!("APP__REQUEST_TIMEOUT_SECS must be an integer, got '{v}'"))?;
    }
    if let Some(v) = lookup("APP__STALE_POLICY") {
        settings.stale_policy = v.parse().map_err(|err: String| anyhow!(err))?;
    }
    if let Some(v) = lookup("APP__LOG_FILTER") {
        settings.log_filter = v;
    }
    Ok(())
}

/// Adds `http://` when no scheme is given and strips trailing slashes.
fn normalize_server_url(raw: &str) -> Result<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(Settings::default().server_url);
    }

    let candidate = if raw.contains("://") {
        raw.to_string()
    } else {
        format!("http://{raw}")
    };
    let parsed = Url::parse(&candidate).with_context(|| format!("invalid server url '{raw}'"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(anyhow!("server url must be http or https, got '{raw}'"));
    }
    Ok(parsed.as_str().trim_end_matches('/').to_string())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
