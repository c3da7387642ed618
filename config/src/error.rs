/// Anything wrong with the configuration. Raised before any network activity takes place.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Loading the configuration failed: {0}")]
    Source(#[from] config::ConfigError),
    #[error("No tenants configured: expected at least CUSTOMER_ID_1, CLIENT_ID_1, CLIENT_SECRET_1 and SITE_ID_1")]
    NoTenants,
    #[error("Tenant #{index} ({tenant_id}) is missing {key}")]
    IncompleteTenant {
        index: usize,
        tenant_id: String,
        key: String,
    },
    #[error("Tenant {0} is configured more than once")]
    DuplicateTenant(String),
    #[error("Tenant {0} has no display name")]
    UnknownTenant(String),
    #[error("Missing required email configuration variables: {}", .0.join(", "))]
    MissingEmailSettings(Vec<&'static str>),
    #[error("No recipients specified for email (EMAIL_RECIPIENTS)")]
    NoRecipients,
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}
