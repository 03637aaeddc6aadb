//! Gehirn DNS API client: endpoint, credentials and the JSON request/response cycle.

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, Request, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{GehirnError, Result};
use crate::http_client::{HttpUtils, LOG_TARGET};
use crate::record::Envelope;
use crate::types::{ApiKey, ZoneId};
use crate::zone::Zone;

/// Production API base URL.
pub const DEFAULT_ENDPOINT: &str = "https://cp.gehirn.jp/api/dns/";

const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Error body returned with any non-200 status.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: u32,
    message: String,
}

/// Connection and credential holder for the Gehirn DNS API.
///
/// Holds no per-call state, so one client (or clones of it, which share the underlying
/// connection pool) can serve any number of record operations.
///
/// # Construction
///
/// ```rust,no_run
/// use gehirn_dns::{ApiKey, GehirnClient};
///
/// # async fn example() -> gehirn_dns::Result<()> {
/// let client = GehirnClient::new(ApiKey::new("token", "secret"))?;
/// let zone = client.get_zone(12345).await?;
/// println!("{} A records", zone.a().len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct GehirnClient {
    http: Client,
    endpoint: Url,
    api_key: ApiKey,
}

/// Builder for [`GehirnClient`] with a configurable endpoint and transport.
pub struct GehirnClientBuilder {
    api_key: ApiKey,
    endpoint: String,
    http: Option<Client>,
}

impl GehirnClientBuilder {
    fn new(api_key: ApiKey) -> Self {
        Self {
            api_key,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            http: None,
        }
    }

    /// Override the API base URL (default: [`DEFAULT_ENDPOINT`]).
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Use a caller-configured `reqwest` client. Timeouts, proxies and TLS settings
    /// are taken from it as-is.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http = Some(client);
        self
    }

    /// Build the [`GehirnClient`], validating the endpoint.
    pub fn build(self) -> Result<GehirnClient> {
        let endpoint = Url::parse(&self.endpoint).map_err(|e| GehirnError::InvalidEndpoint {
            endpoint: self.endpoint.clone(),
            detail: e.to_string(),
        })?;
        if endpoint.cannot_be_a_base() {
            return Err(GehirnError::InvalidEndpoint {
                endpoint: self.endpoint,
                detail: "URL cannot carry path segments".to_string(),
            });
        }

        let http = match self.http {
            Some(client) => client,
            None => Client::builder()
                .build()
                .map_err(|e| GehirnError::NetworkError {
                    detail: format!("Failed to create HTTP client: {e}"),
                })?,
        };

        Ok(GehirnClient {
            http,
            endpoint,
            api_key: self.api_key,
        })
    }
}

impl GehirnClient {
    /// Creates a client against [`DEFAULT_ENDPOINT`] with a default transport.
    pub fn new(api_key: ApiKey) -> Result<Self> {
        Self::builder(api_key).build()
    }

    /// Returns a builder for customizing the endpoint or transport.
    pub fn builder(api_key: ApiKey) -> GehirnClientBuilder {
        GehirnClientBuilder::new(api_key)
    }

    /// The configured API base URL.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// A handle for a zone with a known id. Nothing is fetched.
    pub fn zone(&self, zone_id: impl Into<ZoneId>) -> Zone {
        Zone::new(self.clone(), zone_id.into())
    }

    /// A handle for a zone, populated with its current records.
    pub async fn get_zone(&self, zone_id: impl Into<ZoneId>) -> Result<Zone> {
        let mut zone = self.zone(zone_id);
        zone.fetch().await?;
        Ok(zone)
    }

    /// Joins `relative_path` onto a copy of the endpoint; the stored endpoint is untouched.
    pub(crate) fn build_url(&self, relative_path: &str) -> Result<Url> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|()| GehirnError::InvalidEndpoint {
                endpoint: self.endpoint.to_string(),
                detail: "URL cannot carry path segments".to_string(),
            })?
            .pop_if_empty()
            .extend(relative_path.split('/').filter(|s| !s.is_empty()));
        Ok(url)
    }

    /// Builds an authenticated JSON request for `path` under the endpoint.
    pub(crate) fn make_request(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<Request> {
        let url = self.build_url(path)?;

        let mut builder = self
            .http
            .request(method, url.clone())
            .basic_auth(&self.api_key.token, Some(&self.api_key.secret))
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE);
        if let Some(body) = body {
            builder = builder.body(body);
        }

        builder.build().map_err(|e| GehirnError::InvalidEndpoint {
            endpoint: url.to_string(),
            detail: e.to_string(),
        })
    }

    /// Sends `request` and returns the body of a 200 response.
    ///
    /// Any other status becomes [`GehirnError::Api`] when the body is an error envelope,
    /// or [`GehirnError::HttpStatus`] carrying the status line when it is not.
    pub(crate) async fn send(&self, request: Request) -> Result<String> {
        let (status, response_text) = HttpUtils::execute_request(&self.http, request).await?;

        if status == StatusCode::OK {
            return Ok(response_text);
        }

        let error = match serde_json::from_str::<ErrorEnvelope>(&response_text) {
            Ok(envelope) => GehirnError::Api {
                code: envelope.error.code,
                message: envelope.error.message,
            },
            Err(_) => GehirnError::HttpStatus {
                status: status.to_string(),
            },
        };
        if error.is_expected() {
            log::warn!("[{LOG_TARGET}] API error: {error}");
        } else {
            log::error!("[{LOG_TARGET}] API error: {error}");
        }
        Err(error)
    }

    /// Sends `request` and decodes a successful JSON response into `T`.
    pub(crate) async fn do_request<T: DeserializeOwned>(&self, request: Request) -> Result<T> {
        let response_text = self.send(request).await?;
        HttpUtils::parse_json(&response_text)
    }

    /// Serializes `payload` as `{"Resource": payload}`.
    pub(crate) fn encode_envelope<T: Serialize>(payload: &T) -> Result<Vec<u8>> {
        let body = serde_json::to_vec(&Envelope { resource: payload }).map_err(|e| {
            GehirnError::SerializationError {
                detail: e.to_string(),
            }
        })?;
        log::debug!(
            "[{LOG_TARGET}] Request Body: {}",
            String::from_utf8_lossy(&body)
        );
        Ok(body)
    }
}
