use crate::{
    Config,
    ConfigError,
};
use std::fmt;

/// Validated SMTP settings and recipients for the report email.
#[derive(Clone, PartialEq, Eq)]
pub struct EmailConfig {
    pub smtp_server: String,
    pub smtp_port: u16,
    pub smtp_username: String,
    pub smtp_password: String,
    /// Upgrade the connection with STARTTLS. Plaintext otherwise.
    pub use_tls: bool,
    pub recipients: Vec<String>,
}

impl fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailConfig")
            .field("smtp_server", &self.smtp_server)
            .field("smtp_port", &self.smtp_port)
            .field("smtp_username", &self.smtp_username)
            .field("smtp_password", &"<redacted>")
            .field("use_tls", &self.use_tls)
            .field("recipients", &self.recipients)
            .finish()
    }
}

/// Splits a comma separated recipient list, trimming each entry and dropping empty ones.
pub fn parse_recipients(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(ToString::to_string)
        .collect()
}

impl Config {
    /// Checks that every SMTP setting is present and that there is at least one recipient.
    pub fn email(&self) -> Result<EmailConfig, ConfigError> {
        fn present(value: &Option<String>) -> Option<String> {
            value.as_deref().map(str::trim).filter(|v| !v.is_empty()).map(ToString::to_string)
        }

        let smtp_server = present(&self.smtp_server);
        let smtp_username = present(&self.smtp_username);
        let smtp_password = self.smtp_password.clone().filter(|v| !v.is_empty());

        let missing: Vec<&'static str> = [
            ("SMTP_SERVER", smtp_server.is_none()),
            ("SMTP_PORT", self.smtp_port.is_none()),
            ("SMTP_USERNAME", smtp_username.is_none()),
            ("SMTP_PASSWORD", smtp_password.is_none()),
        ]
        .into_iter()
        .filter_map(|(key, missing)| missing.then_some(key))
        .collect();

        let (Some(smtp_server), Some(smtp_port), Some(smtp_username), Some(smtp_password)) =
            (smtp_server, self.smtp_port, smtp_username, smtp_password)
        else {
            return Err(ConfigError::MissingEmailSettings(missing));
        };

        let recipients = self.email_recipients.as_deref().map(parse_recipients).unwrap_or_default();
        if recipients.is_empty() {
            return Err(ConfigError::NoRecipients);
        }

        Ok(EmailConfig {
            smtp_server,
            smtp_port,
            smtp_username,
            smtp_password,
            use_tls: self.use_tls,
            recipients,
        })
    }
}
