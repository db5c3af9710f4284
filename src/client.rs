use std::time::Duration;

use http::header::AUTHORIZATION;
use http::Method;
use reqwest::Client as HttpClient;
use url::Url;

use crate::error::{RequestError, Result};
use crate::secrets::Secrets;
use crate::signer::{OAuthParameters, Signer};

/// Origin every request path is resolved against.
pub const API_BASE_URL: &str = "https://api.bricklink.com/api/store/v1";

/// Client identification sent with every request.
const USER_AGENT: &str = concat!("bricklink-api/", env!("CARGO_PKG_VERSION"));

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Handle to the store API.
///
/// Owns the credential quadruple and a connection pool; cheap to share by
/// reference between tasks. Each call signs itself independently, so no
/// coordination is needed between concurrent requests.
#[derive(Debug)]
pub struct Bricklink {
    http: HttpClient,
    base_url: String,
    secrets: Secrets<'static>,
    parameters: OAuthParameters<'static>,
}

impl Bricklink {
    /// Build a client around `secrets`.
    pub fn new(secrets: Secrets<'static>) -> Result<Self> {
        Self::with_parameters(secrets, OAuthParameters::new())
    }

    /// Build a client with explicit protocol parameters.
    ///
    /// Pinning timestamp or nonce here makes every request sign
    /// identically; outside of tests you want [`Bricklink::new`].
    pub fn with_parameters(
        secrets: Secrets<'static>,
        parameters: OAuthParameters<'static>,
    ) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|err| RequestError::Client(err.to_string()))?;

        Ok(Bricklink {
            http,
            base_url: API_BASE_URL.to_owned(),
            secrets,
            parameters,
        })
    }

    /// Build a client with credentials taken from the environment.
    pub fn from_env() -> Result<Self> {
        Self::new(Secrets::from_env()?)
    }

    /// Sign and dispatch `method` on `path_and_query`, returning the raw
    /// response body.
    ///
    /// `path_and_query` is resolved against the fixed API origin and may
    /// carry an already-encoded query string. The HTTP status code is not
    /// inspected: an error response body is returned like any other.
    pub async fn execute(&self, method: Method, path_and_query: &str) -> Result<String> {
        let target = self.target(path_and_query);
        let url = Url::parse(&target).map_err(RequestError::from)?;

        let authorization = Signer::new(&self.secrets, self.parameters.clone())
            .authorization_header(&method, url.as_str());

        tracing::debug!(method = %method, url = %url, "dispatching signed request");

        let response = self
            .http
            .request(method, url)
            .header(AUTHORIZATION, authorization)
            .send()
            .await?;

        let body = response.text().await?;
        Ok(body)
    }

    fn target(&self, path_and_query: &str) -> String {
        format!("{}{}", self.base_url, path_and_query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> Bricklink {
        Bricklink::new(Secrets::new("ck", "cs", "t", "ts")).unwrap()
    }

    #[test]
    fn target_joins_origin_and_path() {
        assert_eq!(
            client().target("/colors"),
            "https://api.bricklink.com/api/store/v1/colors"
        );
    }

    #[test]
    fn target_keeps_query_untouched() {
        assert_eq!(
            client().target("/items/PART/3001/price?guide_type=sold"),
            "https://api.bricklink.com/api/store/v1/items/PART/3001/price?guide_type=sold"
        );
    }
}
