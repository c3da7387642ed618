use clap::Parser;
use color_eyre::Result;
use vda_report_config::{
    tenants_from_env,
    Args,
    Config,
};
use vda_status_report::{
    init_errors,
    init_logging,
    CloudClient,
    Runner,
    SmtpNotifier,
};

#[tokio::main]
async fn main() -> Result<()> {
    init_errors()?;
    // A missing .env file is fine, the variables may come from the real environment.
    let dotenv_path = dotenv::dotenv().ok();

    let args = Args::parse();
    init_logging(args.verbose)?;
    if let Some(path) = dotenv_path {
        tracing::debug!(path = %path.display(), "loaded environment file");
    }

    // Everything is validated before the first request goes out.
    let config = Config::new(args)?;
    let tenants = tenants_from_env()?;
    let email = config.email()?;
    tracing::info!(
        tenants = tenants.len(),
        recipients = email.recipients.len(),
        output_file = %config.output_file.display(),
        "configuration loaded"
    );

    let client = CloudClient::new(config.api_base_url.clone(), config.timeout())?;
    let notifier = SmtpNotifier::new(&email, config.timeout())?;

    Runner::new(client, notifier, config.output_file.clone())
        .run(&tenants)
        .await?;

    Ok(())
}
