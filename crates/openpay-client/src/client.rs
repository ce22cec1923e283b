//! Openpay HTTP transport.

use std::fmt;
use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Method, Request, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::MerchantConfig;
use crate::error::{ApiErrorResponse, ClientError};

/// Authenticated transport for a single merchant.
///
/// Builds requests relative to `{base_url}/{merchant_id}/` and performs them,
/// turning non-2xx responses into [`ClientError::Api`].
pub(crate) struct Client {
    http: reqwest::Client,
    root: Url,
    merchant_id: String,
    private_key: String,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("root", &self.root.as_str())
            .field("merchant_id", &self.merchant_id)
            .finish_non_exhaustive()
    }
}

impl Client {
    pub(crate) fn new(config: MerchantConfig) -> Result<Self, ClientError> {
        if config.merchant_id.is_empty() {
            return Err(ClientError::Configuration("merchant id is empty".into()));
        }
        if config.private_key.is_empty() {
            return Err(ClientError::Configuration("private key is empty".into()));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.options.timeout_seconds))
            .build()?;

        let base_url = config.options.resolved_base_url();
        let mut root = Url::parse(&base_url).map_err(|e| {
            ClientError::Configuration(format!("invalid base URL {base_url:?}: {e}"))
        })?;
        root.path_segments_mut()
            .map_err(|()| cannot_be_a_base(&base_url))?
            .pop_if_empty()
            .push(&config.merchant_id);

        Ok(Self {
            http,
            root,
            merchant_id: config.merchant_id,
            private_key: config.private_key,
        })
    }

    pub(crate) fn merchant_id(&self) -> &str {
        &self.merchant_id
    }

    /// Build a request for the path made of `segments`, relative to the
    /// merchant root.
    ///
    /// Each segment is percent-encoded on its own, so `/`, `?` and `#` inside
    /// a segment cannot change the resource addressed. `body` is encoded as
    /// JSON when present.
    pub(crate) fn new_request<B>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&B>,
    ) -> Result<Request, ClientError>
    where
        B: Serialize + ?Sized,
    {
        let mut url = self.root.clone();
        url.path_segments_mut()
            .map_err(|()| cannot_be_a_base(self.root.as_str()))?
            .extend(segments);

        let mut builder = self
            .http
            .request(method, url)
            .basic_auth(&self.private_key, Option::<&str>::None)
            .header(ACCEPT, "application/json");

        if let Some(body) = body {
            builder = builder
                .header(CONTENT_TYPE, "application/json")
                .body(serde_json::to_vec(body)?);
        }

        Ok(builder.build()?)
    }

    /// Execute `request` and decode the response body into `T`.
    ///
    /// An empty body decodes as JSON `null`, so `T = ()` or
    /// [`serde::de::IgnoredAny`] can be used when no body is expected.
    pub(crate) async fn perform<T: DeserializeOwned>(
        &self,
        request: Request,
    ) -> Result<T, ClientError> {
        let method = request.method().clone();
        let path = request.url().path().to_string();

        let response = self.http.execute(request).await?;
        let status = response.status();
        let body = response.text().await?;

        tracing::debug!(%method, %path, status = status.as_u16(), "Openpay response");

        if !status.is_success() {
            let error = match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(api_error) => ClientError::from(api_error),
                Err(_) => ClientError::Api {
                    category: "unknown".to_string(),
                    error_code: 0,
                    description: format!("HTTP {status}"),
                    http_code: status.as_u16(),
                    request_id: None,
                },
            };
            tracing::warn!(%method, %path, error = %error, "Openpay request failed");
            return Err(error);
        }

        let body = if body.trim().is_empty() { "null" } else { &body };
        Ok(serde_json::from_str(body)?)
    }
}

fn cannot_be_a_base(url: &str) -> ClientError {
    ClientError::Configuration(format!("base URL {url:?} cannot carry a path"))
}
