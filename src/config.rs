use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::{
    net::{IpAddr, Ipv4Addr},
    path::PathBuf,
};

/// Application configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// HTTP server listen address (e.g., "0.0.0.0", "127.0.0.1").
    /// Env: `LISTEN_ADDR`. Default: `0.0.0.0`.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: IpAddr,

    /// HTTP server listen port.
    /// Env: `PORT`. Default: `5000`.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Database URL for the contact store.
    /// Env: `DATABASE_URL`. Default: `sqlite://portfolio.db`.
    #[serde(default)]
    pub database_url: String,

    /// Directory holding the prebuilt frontend bundle.
    /// Env: `STATIC_DIR`. Default: `.`.
    #[serde(default)]
    pub static_dir: PathBuf,

    /// Log level for tracing subscriber initialization (e.g., "error", "warn", "info", "debug", "trace").
    /// Env: `LOGLEVEL`. Default: `info`.
    #[serde(default)]
    pub loglevel: String,

    /// Destructive recovery: if opening or initializing the database fails at
    /// startup, delete the database file and retry once on a fresh one.
    /// Enabling this can discard every stored message.
    /// Env: `RECREATE_ON_INIT_FAILURE`. Default: `false`.
    #[serde(default)]
    pub recreate_on_init_failure: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            port: default_port(),
            database_url: "sqlite://portfolio.db".to_string(),
            static_dir: PathBuf::from("."),
            loglevel: "info".to_string(),
            recreate_on_init_failure: false,
        }
    }
}

const DEFAULT_CONFIG_FILE: &str = "config.toml";

impl Config {
    /// Builds a Figment that merges defaults, an optional `config.toml`, and
    /// environment variables.
    /// Uses raw env mapping, so field names map to env vars in UPPER_SNAKE_CASE.
    pub fn figment() -> Figment {
        let figment = Figment::new().merge(Serialized::defaults(Config::default()));
        let figment = if PathBuf::from(DEFAULT_CONFIG_FILE).is_file() {
            figment.merge(Toml::file(DEFAULT_CONFIG_FILE))
        } else {
            figment
        };
        figment.merge(Env::raw())
    }

    /// Loads configuration from defaults, `config.toml` if present, and the
    /// environment.
    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }

    /// Database URL with a `postgres://` scheme rewritten to `postgresql://`.
    /// Hosting platforms hand out the short scheme; drivers want the long one.
    pub fn normalized_database_url(&self) -> String {
        normalize_database_url(&self.database_url)
    }
}

/// Rewrites `postgres://` to `postgresql://`, leaving every other URL as is.
pub fn normalize_database_url(url: &str) -> String {
    match url.strip_prefix("postgres://") {
        Some(rest) => format!("postgresql://{rest}"),
        None => url.to_string(),
    }
}

/// Default IP address for the HTTP server listen address.
fn default_listen_addr() -> IpAddr {
    Ipv4Addr::new(0, 0, 0, 0).into()
}

/// Default port for the HTTP server.
fn default_port() -> u16 {
    5000
}
