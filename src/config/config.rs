use figment::providers::{Format, Yaml};
use figment::Figment;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};

use super::logging::LoggingConfig;
use super::storage::StorageConfig;

/// A top-level enum for versioned configurations.
#[derive(Deserialize, Serialize, JsonSchema)]
#[serde(tag = "version")]
pub enum Config {
    #[serde(rename = "1.0.0")]
    ConfigV1(ConfigV1),
}

/// Main config for v1.0.0: backend API, session endpoints, route guard,
/// client-local storage and logging.
#[derive(Deserialize, Serialize, Debug, JsonSchema)]
pub struct ConfigV1 {
    pub api: ApiConfig,
    pub session: SessionConfig,
    #[serde(default)]
    pub guard: GuardConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

/// Load config from a YAML file named "config.yaml" in the current directory.
pub fn load_config() -> ConfigV1 {
    let figment = Figment::new().merge(Yaml::file("./config.yaml"));
    let config = match figment.extract::<Config>() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            std::process::exit(1);
        }
    };
    match config {
        Config::ConfigV1(c) => c,
    }
}

/// Print the JSON schema for the configuration to stdout.
pub fn print_schema() {
    let schema = schema_for!(Config);
    println!("{}", serde_json::to_string_pretty(&schema).unwrap());
}

/// Where the backend lives and how long we wait for it.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct ApiConfig {
    pub base_url: String,
    #[serde(default = "default_timeout_in_ms")]
    pub timeout_in_ms: u64,
}

fn default_timeout_in_ms() -> u64 {
    10_000
}

/// Session-related endpoints and the identity cache lifetime.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct SessionConfig {
    #[serde(default = "default_refresh_path")]
    pub refresh_path: String,
    #[serde(default = "default_identity_path")]
    pub identity_path: String,
    #[serde(default = "default_invite_accept_path")]
    pub invite_accept_path: String,
    #[serde(default = "default_login_path")]
    pub login_path: String,
    #[serde(default = "default_cache_ttl_seconds")]
    pub cache_ttl_seconds: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            refresh_path: default_refresh_path(),
            identity_path: default_identity_path(),
            invite_accept_path: default_invite_accept_path(),
            login_path: default_login_path(),
            cache_ttl_seconds: default_cache_ttl_seconds(),
        }
    }
}

fn default_refresh_path() -> String {
    "/auth/refresh".to_string()
}

fn default_identity_path() -> String {
    "/auth/me".to_string()
}

fn default_invite_accept_path() -> String {
    "/invites/accept".to_string()
}

fn default_login_path() -> String {
    "/login".to_string()
}

fn default_cache_ttl_seconds() -> u64 {
    60
}

/// Path prefixes the route guard refuses to serve without auth cookies.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct GuardConfig {
    #[serde(default = "default_protected_prefixes")]
    pub protected_prefixes: Vec<String>,
}

impl Default for GuardConfig {
    fn default() -> Self {
        GuardConfig {
            protected_prefixes: default_protected_prefixes(),
        }
    }
}

fn default_protected_prefixes() -> Vec<String> {
    [
        "/dashboard",
        "/consult",
        "/customers",
        "/stats",
        "/projects",
        "/notices",
        "/attendance",
        "/settings",
    ]
    .iter()
    .map(|p| p.to_string())
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test that a minimal YAML document parses into ConfigV1 with defaults applied.
    #[test]
    fn test_minimal_config_parses_with_defaults() {
        let yaml = r#"
version: "1.0.0"
api:
  base_url: "https://api.example.com"
session: {}
storage:
  type: memory
logging:
  level: info
  format: console
"#;
        let config: Config = figment::Figment::new()
            .merge(figment::providers::Yaml::string(yaml))
            .extract()
            .expect("config should parse");
        let Config::ConfigV1(config) = config;
        assert_eq!(config.api.base_url, "https://api.example.com");
        assert_eq!(config.api.timeout_in_ms, 10_000);
        assert_eq!(config.session.refresh_path, "/auth/refresh");
        assert_eq!(config.session.login_path, "/login");
        assert!(config
            .guard
            .protected_prefixes
            .contains(&"/dashboard".to_string()));
    }

    /// Test that explicit values override the defaults.
    #[test]
    fn test_explicit_values_override_defaults() {
        let yaml = r#"
version: "1.0.0"
api:
  base_url: "https://api.example.com"
  timeout_in_ms: 3000
session:
  refresh_path: "/v2/refresh"
  cache_ttl_seconds: 5
guard:
  protected_prefixes: ["/only-this"]
storage:
  type: memory
logging:
  level: debug
  format: json
"#;
        let config: Config = figment::Figment::new()
            .merge(figment::providers::Yaml::string(yaml))
            .extract()
            .expect("config should parse");
        let Config::ConfigV1(config) = config;
        assert_eq!(config.api.timeout_in_ms, 3000);
        assert_eq!(config.session.refresh_path, "/v2/refresh");
        assert_eq!(config.session.cache_ttl_seconds, 5);
        assert_eq!(config.guard.protected_prefixes, vec!["/only-this"]);
    }
}
