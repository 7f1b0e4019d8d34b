use chrono::TimeDelta;
use clap::Parser;
use deck_engine::{Platform, StalenessPolicy};
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/walletdeck.toml";

/// Where wallets come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Http,
    File,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub backend: Backend,
    pub base_url: String,
    pub wallets_file: String,
    pub platform: Platform,
    pub tablet: bool,
    pub log_level: String,
    pub log_file: String,
    pub balance_refresh_secs: i64,
    pub transaction_refresh_secs: i64,
    pub pending_refresh_secs: i64,
    /// Offline mode: refreshing is never attempted.
    pub electrum_disabled: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend: Backend::File,
            base_url: "http://127.0.0.1:3000".to_string(),
            wallets_file: "wallets.json".to_string(),
            platform: Platform::Desktop,
            tablet: false,
            log_level: "info".to_string(),
            log_file: "walletdeck.log".to_string(),
            balance_refresh_secs: 300,
            transaction_refresh_secs: 300,
            pending_refresh_secs: 60,
            electrum_disabled: false,
        }
    }
}

impl AppConfig {
    pub fn staleness_policy(&self) -> StalenessPolicy {
        StalenessPolicy::new(
            TimeDelta::seconds(self.balance_refresh_secs),
            TimeDelta::seconds(self.transaction_refresh_secs),
            TimeDelta::seconds(self.pending_refresh_secs),
        )
    }
}

#[derive(Debug, Parser)]
#[command(name = "walletdeck_tui", disable_version_flag = true)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override base URL (e.g. http://127.0.0.1:3000); implies the HTTP backend.
    #[arg(long)]
    base_url: Option<String>,
    /// Read wallets from this JSON file; implies the file backend.
    #[arg(long)]
    wallets_file: Option<String>,
    /// Platform rules to apply: desktop, ios or android.
    #[arg(long, value_parser = parse_platform)]
    platform: Option<Platform>,
    /// Use the tablet layout.
    #[arg(long)]
    tablet: bool,
    /// Never refresh (offline mode).
    #[arg(long)]
    offline: bool,
    /// Override the log level (e.g. debug).
    #[arg(long)]
    log_level: Option<String>,
}

fn parse_platform(value: &str) -> std::result::Result<Platform, String> {
    match value.to_ascii_lowercase().as_str() {
        "desktop" => Ok(Platform::Desktop),
        "ios" | "mobile_ios" => Ok(Platform::Ios),
        "android" | "mobile_android" => Ok(Platform::Android),
        other => Err(format!("unknown platform `{other}`")),
    }
}

pub fn load() -> Result<AppConfig> {
    let args = Args::parse();

    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("WALLETDECK"));
    let settings: AppConfig = builder.build()?.try_deserialize()?;

    Ok(apply(settings, args))
}

fn apply(mut settings: AppConfig, args: Args) -> AppConfig {
    if let Some(base_url) = args.base_url {
        settings.base_url = base_url;
        settings.backend = Backend::Http;
    }
    if let Some(wallets_file) = args.wallets_file {
        settings.wallets_file = wallets_file;
        settings.backend = Backend::File;
    }
    if let Some(platform) = args.platform {
        settings.platform = platform;
    }
    if let Some(log_level) = args.log_level {
        settings.log_level = log_level;
    }
    settings.tablet |= args.tablet;
    settings.electrum_disabled |= args.offline;
    settings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_stock_refresh_intervals() {
        let settings = AppConfig::default();
        assert_eq!(settings.backend, Backend::File);
        assert_eq!(settings.platform, Platform::Desktop);
        assert_eq!(settings.staleness_policy(), StalenessPolicy::default());
    }

    #[test]
    fn cli_overrides_pick_the_backend() {
        let args = Args::parse_from([
            "walletdeck_tui",
            "--base-url",
            "http://node:8080",
            "--platform",
            "mobile_android",
            "--offline",
        ]);
        let settings = apply(AppConfig::default(), args);

        assert_eq!(settings.backend, Backend::Http);
        assert_eq!(settings.base_url, "http://node:8080");
        assert_eq!(settings.platform, Platform::Android);
        assert!(settings.electrum_disabled);
        assert!(!settings.tablet);
    }

    #[test]
    fn unknown_platform_is_rejected() {
        assert!(parse_platform("symbian").is_err());
        assert_eq!(parse_platform("iOS"), Ok(Platform::Ios));
    }
}
