use crate::ConfigError;
use std::{
    collections::HashSet,
    fmt,
};

/// Credentials and metadata of one tenant (customer account) of the cloud API.
#[derive(Clone, PartialEq, Eq)]
pub struct TenantCredential {
    pub tenant_id: String,
    pub client_id: String,
    pub client_secret: String,
    pub display_name: String,
    pub site_id: String,
}

impl fmt::Debug for TenantCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TenantCredential")
            .field("tenant_id", &self.tenant_id)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("display_name", &self.display_name)
            .field("site_id", &self.site_id)
            .finish()
    }
}

/// Reads `CUSTOMER_ID_<n>`, `CLIENT_ID_<n>`, `CLIENT_SECRET_<n>`, `CUSTOMER_NAME_<n>` and `SITE_ID_<n>` for
/// n = 1, 2, ... until the first index without a `CUSTOMER_ID_<n>`.
///
/// Blank values count as missing. A tenant without `CUSTOMER_NAME_<n>` is displayed by its id.
pub fn load_tenants<F>(lookup: F) -> Result<Vec<TenantCredential>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let value = |key: String| lookup(&key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

    let mut tenants = Vec::new();
    let mut seen = HashSet::new();

    for index in 1.. {
        let Some(tenant_id) = value(format!("CUSTOMER_ID_{index}")) else {
            break;
        };

        let required = |key: &str| {
            value(format!("{key}_{index}")).ok_or_else(|| ConfigError::IncompleteTenant {
                index,
                tenant_id: tenant_id.clone(),
                key: format!("{key}_{index}"),
            })
        };
        let client_id = required("CLIENT_ID")?;
        let client_secret = required("CLIENT_SECRET")?;
        let site_id = required("SITE_ID")?;
        let display_name = value(format!("CUSTOMER_NAME_{index}")).unwrap_or_else(|| tenant_id.clone());

        if !seen.insert(tenant_id.clone()) {
            return Err(ConfigError::DuplicateTenant(tenant_id));
        }

        debug!(index, %tenant_id, %display_name, "loaded tenant credentials");
        tenants.push(TenantCredential {
            tenant_id,
            client_id,
            client_secret,
            display_name,
            site_id,
        });
    }

    if tenants.is_empty() {
        return Err(ConfigError::NoTenants);
    }

    Ok(tenants)
}

/// [`load_tenants`] over the process environment.
pub fn tenants_from_env() -> Result<Vec<TenantCredential>, ConfigError> {
    load_tenants(|key| std::env::var(key).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    fn tenant_vars(index: usize, id: &str) -> Vec<(String, String)> {
        vec![
            (format!("CUSTOMER_ID_{index}"), id.to_string()),
            (format!("CLIENT_ID_{index}"), format!("client-{id}")),
            (format!("CLIENT_SECRET_{index}"), format!("secret-{id}")),
            (format!("CUSTOMER_NAME_{index}"), format!("Customer {id}")),
            (format!("SITE_ID_{index}"), format!("site-{id}")),
        ]
    }

    #[test]
    fn reads_tenants_in_index_order_until_the_first_gap() {
        let mut vars = HashMap::new();
        vars.extend(tenant_vars(1, "acme"));
        vars.extend(tenant_vars(2, "globex"));
        // index 3 is missing, so index 4 is never reached
        vars.extend(tenant_vars(4, "initech"));

        let tenants = load_tenants(|key| vars.get(key).cloned()).unwrap();

        let ids: Vec<_> = tenants.iter().map(|t| t.tenant_id.as_str()).collect();
        assert_eq!(ids, vec!["acme", "globex"]);
        assert_eq!(
            tenants[1],
            TenantCredential {
                tenant_id: "globex".to_string(),
                client_id: "client-globex".to_string(),
                client_secret: "secret-globex".to_string(),
                display_name: "Customer globex".to_string(),
                site_id: "site-globex".to_string(),
            }
        );
    }

    #[test]
    fn missing_customer_name_falls_back_to_the_tenant_id() {
        let vars = env(&[
            ("CUSTOMER_ID_1", " acme "),
            ("CLIENT_ID_1", "cid"),
            ("CLIENT_SECRET_1", "secret"),
            ("SITE_ID_1", "site"),
        ]);

        let tenants = load_tenants(|key| vars.get(key).cloned()).unwrap();

        assert_eq!(tenants.len(), 1);
        assert_eq!(tenants[0].tenant_id, "acme");
        assert_eq!(tenants[0].display_name, "acme");
    }

    #[test]
    fn incomplete_tenant_is_rejected() {
        let vars = env(&[
            ("CUSTOMER_ID_1", "acme"),
            ("CLIENT_ID_1", "cid"),
            ("CLIENT_SECRET_1", "   "),
            ("SITE_ID_1", "site"),
        ]);

        let err = load_tenants(|key| vars.get(key).cloned()).unwrap_err();

        match err {
            ConfigError::IncompleteTenant { index, tenant_id, key } => {
                assert_eq!(index, 1);
                assert_eq!(tenant_id, "acme");
                assert_eq!(key, "CLIENT_SECRET_1");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn duplicate_tenant_is_rejected() {
        let mut vars = HashMap::new();
        vars.extend(tenant_vars(1, "acme"));
        vars.extend(tenant_vars(2, "acme"));

        let err = load_tenants(|key| vars.get(key).cloned()).unwrap_err();

        assert!(matches!(err, ConfigError::DuplicateTenant(id) if id == "acme"));
    }

    #[test]
    fn no_tenants_is_an_error() {
        let err = load_tenants(|_| None).unwrap_err();
        assert!(matches!(err, ConfigError::NoTenants));
    }

    #[test]
    fn debug_output_hides_the_client_secret() {
        let vars: HashMap<_, _> = tenant_vars(1, "acme").into_iter().collect();
        let tenants = load_tenants(|key| vars.get(key).cloned()).unwrap();

        let debug = format!("{:?}", tenants[0]);
        assert!(!debug.contains("secret-acme"));
        assert!(debug.contains("<redacted>"));
    }
}
