//! # gehirn-dns
//!
//! Async client for the [Gehirn DNS](https://www.gehirn.jp/dns/) REST API: typed resource
//! records, zone-scoped create/read/update/delete, and the provider's error envelope.
//!
//! ## Feature Flags
//!
//! - **`native-tls`** *(default)*: Use the platform's native TLS implementation.
//! - **`rustls`**: Use rustls. Recommended for cross-compilation and musl targets.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! gehirn-dns = "0.1"
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use gehirn_dns::{ApiKey, GehirnClient, Resource};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // 1. Create a client from an API key pair
//!     let client = GehirnClient::new(ApiKey::new("token", "secret"))?;
//!
//!     // 2. Fetch a zone with all of its records
//!     let zone = client.get_zone(12345).await?;
//!     for record in zone.a() {
//!         println!("{} A {} (ttl {})", record.host_name(), record.ip_address, record.ttl());
//!     }
//!
//!     // 3. Create a record; the server-assigned id is filled in
//!     let txt = zone.add_txt("_acme-challenge", "token-value", 60).await?;
//!     println!("created {:?}", txt.id());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Updating and Deleting Records
//!
//! ```rust,no_run
//! # use gehirn_dns::*;
//! # async fn example(zone: Zone) -> Result<()> {
//! let mut record = ARecord::new("www", "192.0.2.1", 300).with_id("b7c3d1");
//! record.ip_address = "192.0.2.2".to_string();
//! zone.update_resource(&mut record).await?;
//! zone.delete_resource(&record).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, GehirnError>`](GehirnError):
//!
//! - [`GehirnError::MaybeRegistered`] / [`GehirnError::IdUnset`]: local precondition
//!   failures; no request was sent
//! - [`GehirnError::Api`]: the provider's own error message, unchanged
//! - [`GehirnError::HttpStatus`]: non-200 status without a readable error body
//! - [`GehirnError::NetworkError`] / [`GehirnError::Timeout`]: transport failures
//!
//! Nothing is retried. Timeouts come from the `reqwest::Client` passed to
//! [`GehirnClientBuilder::http_client`].

mod client;
mod error;
mod http_client;
mod record;
mod types;
mod utils;
mod zone;

// Re-export error types
pub use error::{GehirnError, Result};

// Re-export client
pub use client::{DEFAULT_ENDPOINT, GehirnClient, GehirnClientBuilder};

// Re-export record model
pub use record::{
    ARecord, AaaaRecord, CnameRecord, Envelope, MxRecord, NsRecord, RecordBase, RecordType,
    Resource, SoaRecord, SoaTimers, SrvRecord, TxtRecord,
};

// Re-export types
pub use types::{ApiKey, Priority, Seconds, ZoneId};

pub use zone::Zone;
