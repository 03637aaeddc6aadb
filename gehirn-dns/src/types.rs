use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

// ============ Identifiers ============

/// Provider-assigned numeric zone identifier.
///
/// Rendered as its decimal value, which is the path segment of every zone URL
/// (`resource/{zone_id}/...`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneId(pub u64);

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ZoneId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

// ============ Scalar Units ============

/// A duration with one-second resolution, as used by TTL and SOA timers.
///
/// 64 bits wide so that any non-negative integer the API returns decodes.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Seconds(pub u64);

impl Seconds {
    /// Converts to a [`Duration`].
    pub fn duration(self) -> Duration {
        Duration::from_secs(self.0)
    }
}

impl From<u64> for Seconds {
    fn from(secs: u64) -> Self {
        Self(secs)
    }
}

impl fmt::Display for Seconds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

/// MX / SRV priority (lower = preferred).
///
/// The DNS wire format carries 16 bits; a larger value in a response fails to decode with
/// [`GehirnError::ParseError`](crate::GehirnError::ParseError).
pub type Priority = u16;

// ============ Credentials ============

/// API key pair used for HTTP Basic authentication.
///
/// `token` is sent as the username and `secret` as the password.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey {
    /// API token (Basic auth username).
    pub token: String,
    /// API secret (Basic auth password).
    pub secret: String,
}

impl ApiKey {
    pub fn new(token: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            secret: secret.into(),
        }
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKey")
            .field("token", &self.token)
            .field("secret", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zone_id_displays_decimal() {
        assert_eq!(ZoneId(42).to_string(), "42");
        assert_eq!(ZoneId::from(7), ZoneId(7));
    }

    #[test]
    fn seconds_to_duration() {
        assert_eq!(Seconds(3600).duration(), Duration::from_secs(3600));
        assert_eq!(Seconds::default().duration(), Duration::ZERO);
    }

    #[test]
    fn seconds_serde_is_bare_integer() {
        let json = serde_json::to_string(&Seconds(300)).unwrap();
        assert_eq!(json, "300");
        let back: Seconds = serde_json::from_str("86400").unwrap();
        assert_eq!(back, Seconds(86400));
    }

    #[test]
    fn seconds_accepts_values_beyond_u32() {
        let big: Seconds = serde_json::from_str("4294967296").unwrap();
        assert_eq!(big, Seconds(4_294_967_296));
        assert_eq!(Seconds::from(60).to_string(), "60s");
    }

    #[test]
    fn priority_beyond_16_bits_fails_to_decode() {
        assert!(serde_json::from_str::<Priority>("65536").is_err());
    }

    #[test]
    fn api_key_debug_redacts_secret() {
        let key = ApiKey::new("tok", "s3cr3t");
        let dbg = format!("{key:?}");
        assert!(dbg.contains("tok"));
        assert!(!dbg.contains("s3cr3t"));
    }
}
