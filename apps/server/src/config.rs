//! Application configuration
//!
//! Layered loading: built-in defaults, then an optional config file
//! (`CONFIG_PATH`), then environment variables (`SEARCH_API_` prefix, `__`
//! separator), then CLI flags. The resulting value is constructed once at
//! process start and handed to [`crate::state::AppState`]; no global.

use std::net::SocketAddr;

use clap::Parser;
use serde::Deserialize;

/// CLI flag overrides applied on top of file/env configuration.
#[derive(Parser, Debug)]
#[command(name = "search-server", about = "Search gateway server", version)]
pub struct CliArgs {
    /// Bind host (overrides config)
    #[arg(long)]
    pub host: Option<String>,

    /// Bind port (overrides config)
    #[arg(long)]
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub elasticsearch: ElasticsearchConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Path prefix the API is served under (e.g. `/search/api`).
    pub url_prefix: String,
    /// Externally visible base URL, used to build `@id` values.
    pub base_url: String,
    /// Allowed CORS origins; `*` allows any origin.
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ElasticsearchConfig {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
    pub file_enabled: bool,
    pub file_directory: String,
    pub file_prefix: String,
}

impl Config {
    /// Load configuration from defaults, optional file, and environment.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let mut builder = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("server.url_prefix", "/search/api")?
            .set_default("server.base_url", "http://localhost:8080/search/api")?
            .set_default("server.cors_origins", vec!["*".to_string()])?
            .set_default("elasticsearch.url", "http://localhost:9200")?
            .set_default("logging.level", "info")?
            .set_default("logging.json", false)?
            .set_default("logging.file_enabled", false)?
            .set_default("logging.file_directory", "logs")?
            .set_default("logging.file_prefix", "search-server")?;

        if let Ok(path) = std::env::var("CONFIG_PATH") {
            builder = builder.add_source(config::File::with_name(&path));
        }

        let settings = builder
            .add_source(config::Environment::with_prefix("SEARCH_API").separator("__"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Apply CLI flag overrides.
    pub fn apply_cli(&mut self, args: &CliArgs) {
        if let Some(host) = &args.host {
            self.server.host = host.clone();
        }
        if let Some(port) = args.port {
            self.server.port = port;
        }
    }

    /// Validate the configuration, returning the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        if self.server.host.is_empty() {
            return Err("server.host must not be empty".to_string());
        }
        if self.server.port == 0 {
            return Err("server.port must be non-zero".to_string());
        }
        if !self.server.url_prefix.starts_with('/') || self.server.url_prefix.ends_with('/') {
            return Err(format!(
                "server.url_prefix must start with '/' and not end with '/': '{}'",
                self.server.url_prefix
            ));
        }
        if self.server.base_url.is_empty() || self.server.base_url.ends_with('/') {
            return Err(format!(
                "server.base_url must be non-empty without a trailing '/': '{}'",
                self.server.base_url
            ));
        }
        if self.elasticsearch.url.is_empty() {
            return Err("elasticsearch.url must not be empty".to_string());
        }
        Ok(())
    }

    /// Resolve the socket address to bind.
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        Ok(addr.parse()?)
    }
}
