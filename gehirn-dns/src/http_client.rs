//! HTTP round-trip helpers
//!
//! One function sends a prepared request and reads the body, one parses JSON. Status
//! interpretation belongs to [`GehirnClient`](crate::GehirnClient), which knows the
//! API's error envelope. Nothing here retries.

use reqwest::{Client, Request, StatusCode};
use serde::de::DeserializeOwned;

use crate::error::{GehirnError, Result};
use crate::utils::log_sanitizer::truncate_for_log;

/// Log prefix for every line this crate emits.
pub(crate) const LOG_TARGET: &str = "gehirn";

/// HTTP tool function set
pub(crate) struct HttpUtils;

impl HttpUtils {
    /// Sends a request once and returns its status with the full response text.
    ///
    /// # Arguments
    /// * `client` - transport configured by the caller (timeouts, proxies, TLS)
    /// * `request` - fully built request (URL, auth, headers, body)
    ///
    /// # Returns
    /// * `Ok((status, text))` - whatever the server answered, success or not
    /// * `Err(GehirnError::NetworkError | GehirnError::Timeout)` - no answer was read
    pub async fn execute_request(
        client: &Client,
        request: Request,
    ) -> Result<(StatusCode, String)> {
        log::debug!("[{LOG_TARGET}] {} {}", request.method(), request.url());

        let response = client
            .execute(request)
            .await
            .map_err(|e| GehirnError::network(&e))?;

        let status = response.status();
        log::debug!("[{LOG_TARGET}] Response Status: {status}");

        let response_text = response
            .text()
            .await
            .map_err(|e| GehirnError::NetworkError {
                detail: format!("Failed to read response body: {e}"),
            })?;

        log::debug!(
            "[{LOG_TARGET}] Response Body: {}",
            truncate_for_log(&response_text)
        );

        Ok((status, response_text))
    }

    /// Parse JSON response
    ///
    /// # Returns
    /// * `Ok(T)` - successfully parsed
    /// * `Err(GehirnError::ParseError)` - parsing failed
    pub fn parse_json<T>(response_text: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text).map_err(|e| {
            log::error!("[{LOG_TARGET}] JSON parse failed: {e}");
            log::error!(
                "[{LOG_TARGET}] Raw response: {}",
                truncate_for_log(response_text)
            );
            GehirnError::ParseError {
                detail: e.to_string(),
            }
        })
    }
}
