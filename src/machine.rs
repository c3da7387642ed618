use serde::Deserialize;

/// Machine catalog used for records that do not name one.
pub const UNKNOWN_CATALOG: &str = "Unknown";

/// One VDA machine as shown in the report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "ApiMachine")]
pub struct MachineRecord {
    pub name: String,
    pub os_type: String,
    pub allocation_type: String,
    pub registration_state: String,
    pub summary_state: String,
    pub session_count: Option<u32>,
    pub last_connection_user: Option<String>,
    pub last_connection_time: Option<String>,
    pub in_maintenance: bool,
    pub machine_catalog: String,
}

impl MachineRecord {
    pub fn is_multisession(&self) -> bool {
        self.session_count.unwrap_or(0) > 1
    }
}

/// Wire shape of an entry of `Items` returned by `cvad/manage/Machines`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ApiMachine {
    name: Option<String>,
    #[serde(rename = "OSType")]
    os_type: Option<String>,
    allocation_type: Option<String>,
    registration_state: Option<String>,
    summary_state: Option<String>,
    session_count: Option<u32>,
    last_connection_user: Option<ApiUser>,
    formatted_last_connection_time: Option<String>,
    in_maintenance_mode: Option<bool>,
    machine_catalog: Option<ApiCatalogRef>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ApiUser {
    display_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ApiCatalogRef {
    name: Option<String>,
}

impl From<ApiMachine> for MachineRecord {
    fn from(machine: ApiMachine) -> Self {
        Self {
            name: machine.name.unwrap_or_default(),
            os_type: machine.os_type.unwrap_or_default(),
            allocation_type: machine.allocation_type.unwrap_or_default(),
            registration_state: machine.registration_state.unwrap_or_default(),
            summary_state: machine.summary_state.unwrap_or_default(),
            session_count: machine.session_count,
            last_connection_user: machine.last_connection_user.and_then(|u| u.display_name),
            last_connection_time: machine.formatted_last_connection_time,
            in_maintenance: machine.in_maintenance_mode.unwrap_or(false),
            machine_catalog: machine
                .machine_catalog
                .and_then(|c| c.name)
                .unwrap_or_else(|| UNKNOWN_CATALOG.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn deserializes_the_nested_wire_shape() {
        let record: MachineRecord = serde_json::from_value(json!({
            "Id": "b6b8a8a4",
            "Name": "CORP\\VDA-01",
            "OSType": "Windows 2022",
            "AllocationType": "Random",
            "RegistrationState": "Registered",
            "SummaryState": "InUse",
            "SessionCount": 3,
            "LastConnectionUser": { "DisplayName": "Jane Doe", "SamName": "CORP\\jdoe" },
            "FormattedLastConnectionTime": "2024-05-01T09:30:00Z",
            "InMaintenanceMode": true,
            "MachineCatalog": { "Id": "42", "Name": "Pool1" }
        }))
        .unwrap();

        assert_eq!(
            record,
            MachineRecord {
                name: "CORP\\VDA-01".to_string(),
                os_type: "Windows 2022".to_string(),
                allocation_type: "Random".to_string(),
                registration_state: "Registered".to_string(),
                summary_state: "InUse".to_string(),
                session_count: Some(3),
                last_connection_user: Some("Jane Doe".to_string()),
                last_connection_time: Some("2024-05-01T09:30:00Z".to_string()),
                in_maintenance: true,
                machine_catalog: "Pool1".to_string(),
            }
        );
        assert!(record.is_multisession());
    }

    #[test]
    fn absent_fields_take_their_defaults() {
        let record: MachineRecord = serde_json::from_value(json!({
            "Name": "VDA-02",
            "LastConnectionUser": null,
            "MachineCatalog": { "Name": null }
        }))
        .unwrap();

        assert_eq!(record.name, "VDA-02");
        assert_eq!(record.os_type, "");
        assert_eq!(record.session_count, None);
        assert_eq!(record.last_connection_user, None);
        assert!(!record.in_maintenance);
        assert_eq!(record.machine_catalog, UNKNOWN_CATALOG);
        assert!(!record.is_multisession());
    }

    #[test]
    fn multisession_requires_more_than_one_session() {
        let with = |count| MachineRecord {
            session_count: count,
            ..MachineRecord::default()
        };
        assert!(with(Some(2)).is_multisession());
        assert!(!with(Some(1)).is_multisession());
        assert!(!with(Some(0)).is_multisession());
        assert!(!with(None).is_multisession());
    }
}
