//! # Cloud API client
//!
//! Talks to the two endpoints of the cloud management API that the report needs:
//!
//! - **`cctrustoauth2/{tenant}/tokens/clients`**: OAuth2 client-credentials exchange, see [`CloudClient::get_token`]
//! - **`cvad/manage/Machines`**: machine inventory of one site, see [`CloudClient::get_status`]
//!
//! Every request goes through one `reqwest::Client` built with a fixed timeout. Nothing is retried.

mod machines;
mod token;

use crate::Error;
use std::time::Duration;
use url::Url;
use vda_report_config::ConfigError;

pub use token::BearerToken;

pub const DEFAULT_API_BASE_URL: &str = "https://api.cloud.com";

#[derive(Clone, Debug)]
pub struct CloudClient {
    http: reqwest::Client,
    base_url: Url,
}

impl CloudClient {
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, Error> {
        if base_url.cannot_be_a_base() {
            return Err(ConfigError::InvalidValue {
                key: "api_base_url",
                reason: format!("{base_url} cannot be used as a base URL"),
            }
            .into());
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(Error::HttpClient)?;

        Ok(Self { http, base_url })
    }

    /// Appends path segments to the base URL, percent-encoding each of them.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}
