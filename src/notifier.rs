use eyre::Result;
use lettre::{
    message::{
        header::ContentType,
        Mailbox,
    },
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport,
    AsyncTransport,
    Message,
    Tokio1Executor,
};
use std::{
    future::Future,
    pin::Pin,
    time::Duration,
};
use vda_report_config::{
    ConfigError,
    EmailConfig,
};

/// Delivers a finished report.
pub trait Notifier {
    /// Send `html` with the given subject to every recipient, or fail as a whole.
    fn notify<'a>(&'a self, subject: &'a str, html: &'a str) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>>;
}

/// Sends the report as an HTML email through an authenticated SMTP relay.
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    recipients: Vec<Mailbox>,
}

impl SmtpNotifier {
    /// Validates the addresses and prepares the transport. No connection is opened until [`Notifier::notify`].
    pub fn new(email: &EmailConfig, timeout: Duration) -> Result<Self, ConfigError> {
        let from = email
            .smtp_username
            .parse::<Mailbox>()
            .map_err(|e| ConfigError::InvalidValue {
                key: "SMTP_USERNAME",
                reason: format!("{} is not a valid sender address: {e}", email.smtp_username),
            })?;
        let recipients = email
            .recipients
            .iter()
            .map(|r| {
                r.parse::<Mailbox>().map_err(|e| ConfigError::InvalidValue {
                    key: "EMAIL_RECIPIENTS",
                    reason: format!("{r} is not a valid address: {e}"),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let builder = if email.use_tls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&email.smtp_server).map_err(|e| {
                ConfigError::InvalidValue {
                    key: "SMTP_SERVER",
                    reason: e.to_string(),
                }
            })?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&email.smtp_server)
        };
        let transport = builder
            .port(email.smtp_port)
            .credentials(Credentials::new(
                email.smtp_username.clone(),
                email.smtp_password.clone(),
            ))
            .timeout(Some(timeout))
            .build();

        Ok(Self {
            transport,
            from,
            recipients,
        })
    }

    fn message(&self, subject: &str, html: &str) -> Result<Message> {
        let mut builder = Message::builder()
            .from(self.from.clone())
            .subject(subject)
            .header(ContentType::TEXT_HTML);
        for recipient in &self.recipients {
            builder = builder.to(recipient.clone());
        }
        Ok(builder.body(html.to_string())?)
    }
}

impl Notifier for SmtpNotifier {
    fn notify<'a>(&'a self, subject: &'a str, html: &'a str) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(async move {
            let message = self.message(subject, html)?;
            info!(recipients = self.recipients.len(), "sending report email");
            self.transport.send(message).await?;
            info!("email sent successfully");
            Ok(())
        })
    }
}
