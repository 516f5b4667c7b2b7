use crate::error::{ApiError, Result, TransportError};
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info, warn};

/// HTTP client plus the base every resource path is resolved against.
///
/// Cloning is cheap: the underlying `reqwest::Client` shares its connection
/// pool, so the post and user clients can hold one transport each.
#[derive(Debug, Clone)]
pub struct ApiTransport {
    client: Client,
    base: Url,
}

impl ApiTransport {
    /// Create a transport without a request timeout
    pub fn new(base_url: &str) -> Result<Self> {
        Self::new_with_config(base_url, None)
    }

    /// Create a transport with an optional per-request timeout
    pub fn new_with_config(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let base = normalize_base(base_url)?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            info!("Using request timeout of {}s", timeout.as_secs_f32());
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(ApiError::ClientBuild)?;

        debug!("API transport ready for {}", base);
        Ok(Self { client, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Absolute URL for a resource path such as `posts/5`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base, path.trim_start_matches('/'))
    }

    pub(crate) fn client(&self) -> &Client {
        &self.client
    }

    /// Send a request and reject any non-2xx status.
    pub(crate) async fn execute(
        &self,
        request: RequestBuilder,
        url: &str,
    ) -> std::result::Result<Response, TransportError> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            warn!("{} responded with {}", url, status);
            return Err(TransportError::Status {
                status,
                url: url.to_string(),
            });
        }

        Ok(response)
    }

    /// Read a successful response body as JSON.
    pub(crate) async fn read_json<T: DeserializeOwned>(
        response: Response,
    ) -> std::result::Result<T, TransportError> {
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> std::result::Result<T, TransportError> {
        let url = self.endpoint(path);
        debug!("GET {}", url);

        let response = self.execute(self.client.get(&url), &url).await?;
        Self::read_json(response).await
    }
}

pub(crate) fn normalize_base(base_url: &str) -> Result<Url> {
    let invalid = |reason: String| ApiError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason,
    };

    let mut url = Url::parse(base_url.trim()).map_err(|e| invalid(e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.cannot_be_a_base() {
        return Err(invalid("URL cannot be used as a base".to_string()));
    }

    // Resource paths are joined beneath the base path, never beside it.
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_query(None);
    url.set_fragment(None);

    Ok(url)
}
