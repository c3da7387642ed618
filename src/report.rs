//! # HTML report
//!
//! Renders the machines of every tenant that answered into one self-contained HTML document:
//!
//! - one `<h2>` heading per tenant, in the order the tenants were fetched
//! - one `<h3>` heading and `<table>` per machine catalog, in the order the catalogs first appear in the tenant's
//!   inventory (never sorted)
//! - a fixed set of columns per machine; absent values render as empty cells
//!
//! Rendering is pure: the same input always produces the same bytes.

use crate::MachineRecord;
use std::collections::HashMap;
use vda_report_config::ConfigError;

pub const COLUMNS: [&str; 10] = [
    "MachineName",
    "OSType",
    "AllocationType",
    "RegistrationState",
    "SummaryState",
    "SessionCount",
    "Multisession",
    "LastConnectionUser",
    "LastConnectionTime",
    "MaintenanceMode",
];

/// Machine inventories of the tenants that were fetched successfully, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TenantStatusResults {
    entries: Vec<(String, Vec<MachineRecord>)>,
}

impl TenantStatusResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a tenant's machines. Inserting a tenant again replaces its machines but keeps its position.
    pub fn insert(&mut self, tenant_id: impl Into<String>, machines: Vec<MachineRecord>) {
        let tenant_id = tenant_id.into();
        match self.entries.iter_mut().find(|(id, _)| *id == tenant_id) {
            Some((_, existing)) => *existing = machines,
            None => self.entries.push((tenant_id, machines)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn machine_count(&self) -> usize {
        self.entries.iter().map(|(_, machines)| machines.len()).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[MachineRecord])> {
        self.entries
            .iter()
            .map(|(tenant_id, machines)| (tenant_id.as_str(), machines.as_slice()))
    }
}

/// The rendered HTML document.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Deref)]
pub struct Report(String);

impl Report {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Renders `results`, looking up each tenant's heading in `tenant_names`.
///
/// # Errors
/// A tenant in `results` without an entry in `tenant_names` is a configuration error.
pub fn build_report(
    results: &TenantStatusResults,
    tenant_names: &HashMap<String, String>,
) -> Result<Report, ConfigError> {
    let mut html = String::with_capacity(4096 + results.machine_count() * 512);

    for (tenant_id, machines) in results.iter() {
        let client_name = tenant_names
            .get(tenant_id)
            .ok_or_else(|| ConfigError::UnknownTenant(tenant_id.to_string()))?;
        html.push_str(&format!("<h2>Client Name: {}</h2>\n", escape_html(client_name)));

        for (catalog, records) in group_by_catalog(machines) {
            html.push_str(&format!("<h3>MachineCatalog: {}</h3>\n", escape_html(catalog)));
            html.push_str("<table border=\"1\">\n<tr>");
            for column in COLUMNS {
                html.push_str(&format!("<th>{column}</th>"));
            }
            html.push_str("</tr>\n");

            for record in records {
                push_row(&mut html, record);
            }

            html.push_str("</table><br>\n");
        }
    }

    Ok(Report(html))
}

/// Groups machines by catalog, keeping the order in which each catalog is first seen.
fn group_by_catalog(machines: &[MachineRecord]) -> Vec<(&str, Vec<&MachineRecord>)> {
    let mut groups: Vec<(&str, Vec<&MachineRecord>)> = Vec::new();
    for machine in machines {
        match groups
            .iter_mut()
            .find(|(catalog, _)| *catalog == machine.machine_catalog)
        {
            Some((_, members)) => members.push(machine),
            None => groups.push((machine.machine_catalog.as_str(), vec![machine])),
        }
    }
    groups
}

fn push_row(html: &mut String, record: &MachineRecord) {
    let session_count = record.session_count.map(|c| c.to_string()).unwrap_or_default();
    let cells = [
        record.name.as_str(),
        record.os_type.as_str(),
        record.allocation_type.as_str(),
        record.registration_state.as_str(),
        record.summary_state.as_str(),
        session_count.as_str(),
        yes_no(record.is_multisession()),
        record.last_connection_user.as_deref().unwrap_or_default(),
        record.last_connection_time.as_deref().unwrap_or_default(),
        yes_no(record.in_maintenance),
    ];

    html.push_str("<tr>");
    for cell in cells {
        html.push_str(&format!("<td>{}</td>", escape_html(cell)));
    }
    html.push_str("</tr>\n");
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
