use serde::Deserialize;

/// Runtime configuration, sourced from an optional `config.yaml` plus
/// environment variables (e.g. `DATABASE_URL`, `PORT`, `DEBUG`).
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_database_url")]
    pub database_url: String,
    #[serde(default = "default_uploads_dir")]
    pub uploads_dir: String,
    /// Development mode: expose database error detail in responses.
    #[serde(default)]
    pub debug: bool,
}

impl ServerConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::default())
            .build()?
            .try_deserialize()
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_database_url() -> String {
    "products.db".to_string()
}

fn default_uploads_dir() -> String {
    "uploads".to_string()
}
