use super::CloudClient;
use crate::AuthenticationError;
use reqwest::header;
use serde::Deserialize;
use std::fmt;

/// Short-lived, tenant scoped access token. Only held for the duration of one tenant's fetch.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value of the `Authorization` header expected by the management API.
    pub(crate) fn authorization(&self) -> String {
        format!("CwsAuth bearer={}", self.0)
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(<redacted>)")
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

impl CloudClient {
    /// Exchanges a tenant's client credentials for a bearer token.
    pub async fn get_token(
        &self,
        tenant_id: &str,
        client_id: &str,
        client_secret: &str,
    ) -> Result<BearerToken, AuthenticationError> {
        let url = self.endpoint(&["cctrustoauth2", tenant_id, "tokens", "clients"]);
        debug!(%tenant_id, %url, "requesting bearer token");

        let response = self
            .http
            .post(url)
            .header(header::ACCEPT, "application/json")
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", client_id),
                ("client_secret", client_secret),
            ])
            .send()
            .await
            .map_err(AuthenticationError::Request)?;

        let status = response.status();
        let body = response.text().await.map_err(AuthenticationError::Request)?;

        if !status.is_success() {
            return Err(AuthenticationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let payload: TokenResponse = serde_json::from_str(&body).map_err(AuthenticationError::InvalidResponse)?;
        payload
            .access_token
            .filter(|token| !token.is_empty())
            .map(BearerToken)
            .ok_or(AuthenticationError::MissingToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::error_chain;
    use std::time::{
        Duration,
        Instant,
    };
    use url::Url;
    use wiremock::{
        matchers::{
            body_string_contains,
            header,
            method,
            path,
        },
        Mock,
        MockServer,
        ResponseTemplate,
    };

    async fn client(server: &MockServer) -> CloudClient {
        CloudClient::new(Url::parse(&server.uri()).unwrap(), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn client_credentials_exchange_returns_the_access_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/cctrustoauth2/acme/tokens/clients"))
            .and(header("accept", "application/json"))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(body_string_contains("grant_type=client_credentials"))
            .and(body_string_contains("client_id=cid"))
            .and(body_string_contains("client_secret=s3cr%2Bt"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "token_type": "bearer",
                "access_token": "abc",
                "expires_in": "3600"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let token = client(&server).await.get_token("acme", "cid", "s3cr+t").await.unwrap();

        assert_eq!(token.as_str(), "abc");
        assert_eq!(token.authorization(), "CwsAuth bearer=abc");
        assert_eq!(format!("{token:?}"), "BearerToken(<redacted>)");
    }

    #[tokio::test]
    async fn non_success_status_is_an_authentication_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid_client"))
            .mount(&server)
            .await;

        let err = client(&server).await.get_token("acme", "cid", "bad").await.unwrap_err();

        match err {
            AuthenticationError::Status { status, body } => {
                assert_eq!(status, 401);
                assert_eq!(body, "invalid_client");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn missing_access_token_is_an_authentication_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "token_type": "bearer" })))
            .mount(&server)
            .await;

        let err = client(&server).await.get_token("acme", "cid", "secret").await.unwrap_err();

        assert!(matches!(err, AuthenticationError::MissingToken));
    }

    #[tokio::test]
    async fn non_json_body_is_an_authentication_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .mount(&server)
            .await;

        let err = client(&server).await.get_token("acme", "cid", "secret").await.unwrap_err();

        assert!(matches!(err, AuthenticationError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn slow_token_endpoint_hits_the_client_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "access_token": "late" }))
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;
        let client = CloudClient::new(Url::parse(&server.uri()).unwrap(), Duration::from_secs(1)).unwrap();

        let started = Instant::now();
        let err = client.get_token("acme", "cid", "secret").await.unwrap_err();

        assert!(started.elapsed() < Duration::from_secs(4), "took {:?}", started.elapsed());
        match &err {
            AuthenticationError::Request(source) => assert!(source.is_timeout()),
            other => panic!("unexpected error: {other}"),
        }
        assert!(error_chain(&err).contains("timed out"), "{}", error_chain(&err));
    }
}
