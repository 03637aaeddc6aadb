//! Shared test utilities and helper functions

#![allow(dead_code)]

use std::env;

use gehirn_dns::{ApiKey, GehirnClient, Zone};
use httpmock::MockServer;

/// `base64("token:secret")`, as sent by [`mock_client`].
pub const BASIC_AUTH: &str = "Basic dG9rZW46c2VjcmV0";

/// Zone id used by mock-server tests.
pub const ZONE_ID: u64 = 12345;

/// Skip the test when any of the listed environment variables is missing
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("Skipping test: missing environment variable {}", $var);
                return;
            }
        )+
    };
}

/// Assert that an `Option` is `Some` and unwrap it (fails the test otherwise).
#[macro_export]
macro_rules! require_some {
    ($expr:expr $(,)?) => {{
        let opt = $expr;
        assert!(opt.is_some(), "expected Some(..), got None");
        let Some(val) = opt else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let opt = $expr;
        assert!(opt.is_some(), "{}", format_args!($($msg)+));
        let Some(val) = opt else {
            return;
        };
        val
    }};
}

/// Assert that a `Result` is `Ok` and unwrap it (fails the test otherwise).
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// Client pointed at a mock server's `/api/dns/` path with `token:secret` credentials.
pub fn mock_client(server: &MockServer) -> GehirnClient {
    GehirnClient::builder(ApiKey::new("token", "secret"))
        .endpoint(server.url("/api/dns/"))
        .build()
        .expect("mock endpoint is a valid URL")
}

/// Unfetched handle for [`ZONE_ID`] on a mock server.
pub fn mock_zone(server: &MockServer) -> Zone {
    mock_client(server).zone(ZONE_ID)
}

/// Mock-server path of the zone's record collection.
pub fn collection_path() -> String {
    format!("/api/dns/resource/{ZONE_ID}")
}

/// Mock-server path of one record in the zone.
pub fn record_path(record_id: &str) -> String {
    format!("/api/dns/resource/{ZONE_ID}/{record_id}")
}

/// Generate a unique test host name
pub fn generate_test_host_name() -> String {
    let uuid = uuid::Uuid::new_v4();
    format!("_test-{}", &uuid.to_string()[..8])
}

/// Live test context: a client and zone built from environment variables
pub struct LiveContext {
    pub client: GehirnClient,
    pub zone_id: u64,
}

impl LiveContext {
    /// Reads `GEHIRN_API_TOKEN`, `GEHIRN_API_SECRET` and `GEHIRN_ZONE_ID`.
    pub fn from_env() -> Option<Self> {
        let token = env::var("GEHIRN_API_TOKEN").ok()?;
        let secret = env::var("GEHIRN_API_SECRET").ok()?;
        let zone_id = env::var("GEHIRN_ZONE_ID").ok()?.parse().ok()?;

        let mut builder = GehirnClient::builder(ApiKey::new(token, secret));
        if let Ok(endpoint) = env::var("GEHIRN_ENDPOINT") {
            builder = builder.endpoint(endpoint);
        }
        let client = builder.build().ok()?;

        Some(Self { client, zone_id })
    }

    pub fn zone(&self) -> Zone {
        self.client.zone(self.zone_id)
    }
}
