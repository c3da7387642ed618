use clap::Parser;
use std::path::PathBuf;

/// Collects VDA machine status for every configured tenant and mails an HTML report.
#[derive(Parser, Debug, Clone, Default)]
#[command(author, version = version(), about, long_about = None)]
pub struct Args {
    /// Optional YAML configuration file. Defaults to `config.yaml` in the config directory.
    #[arg(long, value_name = "FILE", env = "VDA_REPORT_CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Where the HTML report is written. The file is overwritten on every run.
    #[arg(long, value_name = "FILE", env = "VDA_REPORT_OUTPUT_FILE")]
    pub output_file: Option<PathBuf>,

    /// Base URL of the cloud management API.
    #[arg(long, value_name = "URL", env = "VDA_REPORT_API_BASE_URL")]
    pub api_base_url: Option<String>,

    /// Timeout in seconds applied to every outbound call (token, machines and SMTP).
    #[arg(long = "timeout", value_name = "SECONDS", env = "VDA_REPORT_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Enable debug logging.
    #[arg(short, long, action)]
    pub verbose: bool,
}

mod config_ext {
    use super::*;
    use config::{
        Map,
        Source,
        Value,
    };
    use std::collections::HashMap;

    impl Source for Args {
        fn clone_into_box(&self) -> Box<dyn Source + Send + Sync> {
            Box::new((*self).clone())
        }

        fn collect(&self) -> Result<Map<String, Value>, config::ConfigError> {
            let mut cache = HashMap::<String, Value>::new();
            if let Some(output_file) = &self.output_file {
                cache.insert("output_file".to_string(), output_file.display().to_string().into());
            }
            if let Some(api_base_url) = &self.api_base_url {
                cache.insert("api_base_url".to_string(), api_base_url.clone().into());
            }
            if let Some(timeout_secs) = self.timeout_secs {
                cache.insert("timeout_secs".to_string(), timeout_secs.into());
            }
            Ok(cache)
        }
    }
}

pub fn version() -> String {
    let author = clap::crate_authors!();
    let config_dir_path = crate::get_config_dir().display().to_string();

    format!(
        "{}\n\
Authors: {author}

Config directory: {config_dir_path}",
        clap::crate_version!()
    )
}
