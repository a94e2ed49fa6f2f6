use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;

use crate::search::SearchConfig;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub enhancer: EnhancerConfig,
    #[serde(default)]
    pub pdf: PdfConfig,
    #[serde(default)]
    pub import: ImportConfig,
    #[serde(default)]
    pub frontend: FrontendConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::from([0, 0, 0, 0])
}

fn default_port() -> u16 {
    3000
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("lessons.db")
}

/// Query enhancement service configuration.
///
/// Enhancement is only attempted when both credentials are present.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EnhancerConfig {
    /// Primary AI credential (legacy env: `GEMINI_API_KEY`).
    #[serde(default)]
    pub api_key: Option<String>,
    /// Routing credential sent as bearer token (legacy env: `OPENROUTER_API_KEY`).
    #[serde(default)]
    pub routing_key: Option<String>,
    /// Endpoint receiving `{query, context}`.
    #[serde(default = "default_enhancer_url")]
    pub url: String,
    /// Request timeout in seconds (default: 10)
    #[serde(default = "default_enhancer_timeout")]
    pub timeout_secs: u32,
}

impl EnhancerConfig {
    /// True when both credentials are configured and non-blank.
    pub fn is_enabled(&self) -> bool {
        is_set(&self.api_key) && is_set(&self.routing_key)
    }
}

fn is_set(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

impl Default for EnhancerConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            routing_key: None,
            url: default_enhancer_url(),
            timeout_secs: default_enhancer_timeout(),
        }
    }
}

fn default_enhancer_url() -> String {
    "https://api.openrouter.io/v1/gemini/query".to_string()
}

fn default_enhancer_timeout() -> u32 {
    10
}

/// PDF export configuration.
///
/// Templates accept `{id}`, `{lesson_number}`, `{lesson_name}`, `{category}`,
/// `{summary}` and `{url}` placeholders.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PdfConfig {
    #[serde(default = "default_title_template")]
    pub title_template: String,
    #[serde(default = "default_body_template")]
    pub body_template: String,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            title_template: default_title_template(),
            body_template: default_body_template(),
        }
    }
}

fn default_title_template() -> String {
    "Lesson {id}".to_string()
}

fn default_body_template() -> String {
    "{lesson_name}\n\n{summary}\n\n{url}".to_string()
}

/// CSV import configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ImportConfig {
    /// Rows read and inserted per batch before reading more.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
        }
    }
}

fn default_batch_size() -> usize {
    64
}

/// Static frontend configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FrontendConfig {
    #[serde(default = "default_frontend_dir")]
    pub dir: PathBuf,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            dir: default_frontend_dir(),
        }
    }
}

fn default_frontend_dir() -> PathBuf {
    PathBuf::from("frontend")
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub search: SearchConfig,
    pub enhancer: SanitizedEnhancerConfig,
    pub pdf: PdfConfig,
    pub import: ImportConfig,
}

/// Sanitized enhancer config (credentials hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedEnhancerConfig {
    pub enabled: bool,
    pub api_key_configured: bool,
    pub routing_key_configured: bool,
    pub url: String,
    pub timeout_secs: u32,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            server: config.server.clone(),
            database: config.database.clone(),
            search: config.search.clone(),
            enhancer: SanitizedEnhancerConfig {
                enabled: config.enhancer.is_enabled(),
                api_key_configured: is_set(&config.enhancer.api_key),
                routing_key_configured: is_set(&config.enhancer.routing_key),
                url: config.enhancer.url.clone(),
                timeout_secs: config.enhancer.timeout_secs,
            },
            pdf: config.pdf.clone(),
            import: config.import.clone(),
        }
    }
}
