//! # VDA Status Report
//!
//! Collects the VDA machine inventory of every configured tenant from the cloud management API, renders it into
//! one HTML report grouped by tenant and machine catalog, writes it to disk and mails it.
//!
//! ## Architecture
//!
//! - **`cloud`**: token exchange and machine inventory calls, one `reqwest` client with a fixed timeout
//! - **`machine`**: the machine record shown in the report and its wire shape
//! - **`report`**: pure HTML rendering with first-seen catalog grouping
//! - **`notifier`**: the `Notifier` seam and its SMTP implementation
//! - **`runner`**: the sequential per-tenant loop, partial failure handling, persistence and delivery
//!
//! Configuration (tenants, SMTP settings, CLI) lives in the `vda-report-config` crate.

#[macro_use]
extern crate tracing;

pub mod cloud;
mod error;
pub mod logging;
pub mod machine;
pub mod notifier;
pub mod report;
pub mod runner;

pub use cloud::{
    BearerToken,
    CloudClient,
};
pub use error::{
    AuthenticationError,
    DeliveryError,
    Error,
    FetchError,
    TenantError,
};
pub use logging::{
    init_errors,
    init_logging,
};
pub use machine::MachineRecord;
pub use notifier::{
    Notifier,
    SmtpNotifier,
};
pub use report::{
    build_report,
    Report,
    TenantStatusResults,
};
pub use runner::{
    RunSummary,
    Runner,
    REPORT_SUBJECT,
};
