use super::{
    BearerToken,
    CloudClient,
};
use crate::{
    FetchError,
    MachineRecord,
};
use reqwest::header;
use serde::Deserialize;

#[derive(Deserialize)]
struct MachinesResponse {
    #[serde(rename = "Items")]
    items: Option<Vec<MachineRecord>>,
}

impl CloudClient {
    /// Lists the machines of a tenant's site. A response without `Items` yields no machines.
    pub async fn get_status(
        &self,
        token: &BearerToken,
        tenant_id: &str,
        site_id: &str,
    ) -> Result<Vec<MachineRecord>, FetchError> {
        let url = self.endpoint(&["cvad", "manage", "Machines"]);
        debug!(%tenant_id, %site_id, %url, "fetching machines");

        let response = self
            .http
            .get(url)
            .header(header::ACCEPT, "application/json")
            .header("Citrix-CustomerId", tenant_id)
            .header("Citrix-InstanceId", site_id)
            .header(header::AUTHORIZATION, token.authorization())
            .send()
            .await
            .map_err(FetchError::Request)?;

        let status = response.status();
        let body = response.text().await.map_err(FetchError::Request)?;

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let payload: MachinesResponse = serde_json::from_str(&body).map_err(FetchError::Malformed)?;
        let machines = payload.items.unwrap_or_default();
        debug!(%tenant_id, count = machines.len(), "fetched machines");
        Ok(machines)
    }
}
