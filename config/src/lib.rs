#[macro_use]
extern crate tracing;

mod app_config;
mod args;
mod email;
mod error;
mod tenant;

pub use app_config::get_config_dir;
pub use args::Args;
pub use email::{
    parse_recipients,
    EmailConfig,
};
pub use error::ConfigError;
use serde::{
    Deserialize,
    Serialize,
};
use std::{
    collections::HashMap,
    path::PathBuf,
    time::Duration,
};
pub use tenant::{
    load_tenants,
    tenants_from_env,
    TenantCredential,
};
use url::Url;

/// Run settings, layered from built-in defaults, an optional YAML file, the environment and the command line.
///
/// Environment variables map onto fields by lowercasing their name, e.g. `SMTP_SERVER` → `smtp_server`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    pub output_file: PathBuf,
    pub api_base_url: Url,
    pub timeout_secs: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smtp_server: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smtp_port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smtp_username: Option<String>,
    #[serde(default, skip_serializing)]
    pub smtp_password: Option<String>,
    #[serde(default)]
    pub use_tls: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_recipients: Option<String>,
}

const DEFAULT_CONFIG: &str = include_str!("default-config.yaml");

impl Default for Config {
    fn default() -> Self {
        serde_yml::from_str(DEFAULT_CONFIG).expect("Failed to parse default config")
    }
}

impl config::Source for Config {
    fn clone_into_box(&self) -> Box<dyn config::Source + Send + Sync> {
        Box::new((*self).clone())
    }

    fn collect(&self) -> Result<config::Map<String, config::Value>, config::ConfigError> {
        let mut cache = HashMap::<String, config::Value>::new();
        cache.insert("output_file".to_string(), self.output_file.display().to_string().into());
        cache.insert("api_base_url".to_string(), self.api_base_url.to_string().into());
        cache.insert("timeout_secs".to_string(), self.timeout_secs.into());
        cache.insert("use_tls".to_string(), self.use_tls.into());
        Ok(cache)
    }
}

impl Config {
    pub fn new(args: Args) -> Result<Self, ConfigError> {
        Self::build(args, config::Environment::default())
    }

    fn build(args: Args, environment: config::Environment) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder().add_source(Config::default());

        let config_file = match &args.config {
            Some(path) => config::File::from(path.as_path()).required(true),
            None => config::File::from(get_config_dir().join("config.yaml")).required(false),
        };
        debug!(config = ?args.config, "loading configuration");
        builder = builder
            .add_source(config_file.format(config::FileFormat::Yaml))
            .add_source(environment)
            .add_source(args);

        let cfg: Self = builder.build()?.try_deserialize()?;

        if cfg.api_base_url.cannot_be_a_base() {
            return Err(ConfigError::InvalidValue {
                key: "api_base_url",
                reason: format!("{} cannot be used as a base URL", cfg.api_base_url),
            });
        }
        if cfg.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "timeout_secs",
                reason: "must be at least one second".to_string(),
            });
        }

        Ok(cfg)
    }

    /// Timeout applied to every outbound call.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
