use std::path::PathBuf;
use vda_report_config::ConfigError;

/// Errors that end a run.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Configuration(#[from] ConfigError),
    #[error("Building the HTTP client failed: {0}")]
    HttpClient(#[source] reqwest::Error),
    #[error("No VDA status data collected for any of the {attempted} configured tenants")]
    NoData { attempted: usize },
    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

/// The report was built but could not be persisted or sent.
#[derive(thiserror::Error, Debug)]
pub enum DeliveryError {
    #[error("Writing the report to {} failed: {source}", path.display())]
    Write { path: PathBuf, source: std::io::Error },
    #[error("Sending the report email failed: {0}")]
    Email(eyre::Report),
}

/// Why a single tenant is missing from the report. Never aborts the run.
#[derive(thiserror::Error, Debug)]
pub enum TenantError {
    #[error("authentication failed: {0}")]
    Authentication(#[from] AuthenticationError),
    #[error("fetching machines failed: {0}")]
    Fetch(#[from] FetchError),
}

#[derive(thiserror::Error, Debug)]
pub enum AuthenticationError {
    #[error("token request failed: {0}")]
    Request(#[source] reqwest::Error),
    #[error("token endpoint returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("invalid token response: {0}")]
    InvalidResponse(#[source] serde_json::Error),
    #[error("token response has no access_token")]
    MissingToken,
}

#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("machines request failed: {0}")]
    Request(#[source] reqwest::Error),
    #[error("machines endpoint returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed machines response: {0}")]
    Malformed(#[source] serde_json::Error),
}

/// Renders `err` followed by each source its message does not already contain, joined by `: `.
///
/// `reqwest::Error` keeps the cause (timeout, refused connection) out of its own message.
pub(crate) fn error_chain(err: &dyn std::error::Error) -> String {
    let mut rendered = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let message = cause.to_string();
        if !rendered.contains(&message) {
            rendered.push_str(": ");
            rendered.push_str(&message);
        }
        source = cause.source();
    }
    rendered
}
