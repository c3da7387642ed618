use crate::{
    build_report,
    error::error_chain,
    CloudClient,
    DeliveryError,
    Error,
    MachineRecord,
    Notifier,
    Report,
    TenantError,
    TenantStatusResults,
};
use std::{
    collections::HashMap,
    path::PathBuf,
};
use vda_report_config::TenantCredential;

pub const REPORT_SUBJECT: &str = "VDA Status Report";

/// Outcome of a run that produced and delivered a report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub succeeded: Vec<String>,
    pub failed: Vec<String>,
    pub machines: usize,
}

/// Drives one end-to-end run: fetch every tenant in turn, render, persist, deliver.
pub struct Runner<N> {
    client: CloudClient,
    notifier: N,
    output_file: PathBuf,
}

impl<N: Notifier> Runner<N> {
    pub fn new(client: CloudClient, notifier: N, output_file: impl Into<PathBuf>) -> Self {
        Self {
            client,
            notifier,
            output_file: output_file.into(),
        }
    }

    /// Fetches each tenant sequentially. Tenants that fail are logged and left out of the report.
    ///
    /// # Errors
    /// [`Error::NoData`] when no tenant succeeded, in which case nothing is written or sent.
    /// [`Error::Delivery`] when the report cannot be written or mailed.
    pub async fn run(&self, tenants: &[TenantCredential]) -> Result<(Report, RunSummary), Error> {
        info!(tenants = tenants.len(), "starting VDA status run");

        let mut results = TenantStatusResults::new();
        let mut summary = RunSummary::default();

        for tenant in tenants {
            info!(tenant_id = %tenant.tenant_id, customer = %tenant.display_name, "processing tenant");
            match self.fetch_tenant(tenant).await {
                Ok(machines) => {
                    info!(tenant_id = %tenant.tenant_id, machines = machines.len(), "collected VDA status");
                    results.insert(tenant.tenant_id.clone(), machines);
                    summary.succeeded.push(tenant.tenant_id.clone());
                }
                Err(err) => {
                    error!(
                        tenant_id = %tenant.tenant_id,
                        customer = %tenant.display_name,
                        error = %error_chain(&err),
                        "failed to get VDA status"
                    );
                    summary.failed.push(tenant.tenant_id.clone());
                }
            }
        }

        if results.is_empty() {
            error!("no VDA status data collected for any tenant");
            return Err(Error::NoData {
                attempted: tenants.len(),
            });
        }

        let tenant_names: HashMap<String, String> = tenants
            .iter()
            .map(|t| (t.tenant_id.clone(), t.display_name.clone()))
            .collect();
        let report = build_report(&results, &tenant_names)?;
        summary.machines = results.machine_count();

        tokio::fs::write(&self.output_file, report.as_str())
            .await
            .map_err(|source| DeliveryError::Write {
                path: self.output_file.clone(),
                source,
            })?;
        info!(path = %self.output_file.display(), "report saved");

        self.notifier
            .notify(REPORT_SUBJECT, report.as_str())
            .await
            .map_err(DeliveryError::Email)?;

        info!(
            tenants_reported = results.len(),
            succeeded = summary.succeeded.len(),
            failed = summary.failed.len(),
            machines = summary.machines,
            "VDA status run completed"
        );
        Ok((report, summary))
    }

    async fn fetch_tenant(&self, tenant: &TenantCredential) -> Result<Vec<MachineRecord>, TenantError> {
        let token = self
            .client
            .get_token(&tenant.tenant_id, &tenant.client_id, &tenant.client_secret)
            .await?;
        let machines = self
            .client
            .get_status(&token, &tenant.tenant_id, &tenant.site_id)
            .await?;
        Ok(machines)
    }
}
