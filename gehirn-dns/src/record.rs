//! DNS resource record model.
//!
//! Every record kind embeds a [`RecordBase`] (id, display name, hostname, type tag, TTL)
//! and adds its own fields. On the wire the base fields are merged into the same flat
//! JSON object as the kind-specific ones:
//!
//! ```json
//! { "ID": "abc", "HostName": "www", "Type": "A", "TTL": 300, "IPAddress": "192.0.2.1" }
//! ```
//!
//! The set of kinds is closed: [`Resource`] is sealed and implemented by exactly the
//! eight record structs of this module.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{GehirnError, Result};
use crate::types::{Priority, Seconds};

// ============ Record Type ============

/// Record kind tag, serialized as uppercase strings (`"A"`, `"AAAA"`, `"CNAME"`, etc.).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    /// Start of authority.
    Soa,
    /// Name server delegation.
    Ns,
    /// IPv4 address.
    A,
    /// IPv6 address.
    Aaaa,
    /// Canonical name (alias).
    Cname,
    /// Mail exchange.
    Mx,
    /// Free text.
    Txt,
    /// Service locator.
    Srv,
}

impl RecordType {
    /// The wire tag of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Soa => "SOA",
            Self::Ns => "NS",
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Cname => "CNAME",
            Self::Mx => "MX",
            Self::Txt => "TXT",
            Self::Srv => "SRV",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============ Base Envelope ============

/// Fields shared by every record kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordBase {
    /// Server-assigned identifier; empty until the record has been created.
    #[serde(rename = "ID", default, skip_serializing_if = "String::is_empty")]
    id: String,
    /// Display name, only ever present in server responses. Never sent back.
    #[serde(rename = "Name", default, skip_serializing)]
    name: String,
    #[serde(rename = "HostName")]
    host_name: String,
    #[serde(rename = "Type")]
    record_type: RecordType,
    #[serde(rename = "TTL")]
    ttl: Seconds,
}

impl RecordBase {
    fn new(record_type: RecordType, host_name: String, ttl: Seconds) -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            host_name,
            record_type,
            ttl,
        }
    }

    /// Moves the display name into the hostname when the two differ, then clears it.
    pub(crate) fn adopt_display_name(&mut self) {
        let name = std::mem::take(&mut self.name);
        if !name.is_empty() && name != self.host_name {
            self.host_name = name;
        }
    }
}

// ============ Resource Trait ============

mod sealed {
    pub trait Sealed {}
}

/// Capabilities shared by every record kind.
///
/// Implemented by delegation to the embedded [`RecordBase`]. This trait is sealed; the
/// eight kinds in this module are the only implementors.
pub trait Resource:
    sealed::Sealed + Serialize + DeserializeOwned + Clone + fmt::Debug + Send + Sync
{
    /// The kind every value of this type carries.
    const RECORD_TYPE: RecordType;

    #[doc(hidden)]
    fn base(&self) -> &RecordBase;

    #[doc(hidden)]
    fn base_mut(&mut self) -> &mut RecordBase;

    /// Server-assigned id, or `None` if the record has not been created yet.
    fn id(&self) -> Option<&str> {
        let id = &self.base().id;
        (!id.is_empty()).then_some(id.as_str())
    }

    /// Hostname the record applies to.
    fn host_name(&self) -> &str {
        &self.base().host_name
    }

    /// Display name from a server response that has not been normalized yet.
    fn display_name(&self) -> Option<&str> {
        let name = &self.base().name;
        (!name.is_empty()).then_some(name.as_str())
    }

    fn record_type(&self) -> RecordType {
        self.base().record_type
    }

    fn ttl(&self) -> Seconds {
        self.base().ttl
    }

    fn set_host_name(&mut self, host_name: impl Into<String>) {
        self.base_mut().host_name = host_name.into();
    }

    fn set_ttl(&mut self, ttl: Seconds) {
        self.base_mut().ttl = ttl;
    }

    /// Attaches a known server id, e.g. to update or delete a record obtained elsewhere.
    #[must_use]
    fn with_id(mut self, id: impl Into<String>) -> Self
    where
        Self: Sized,
    {
        self.base_mut().id = id.into();
        self
    }

    /// Drops the transient display name.
    fn clear_display_name(&mut self) {
        self.base_mut().name.clear();
    }
}

macro_rules! impl_resource {
    ($ty:ident, $kind:ident) => {
        impl sealed::Sealed for $ty {}

        impl Resource for $ty {
            const RECORD_TYPE: RecordType = RecordType::$kind;

            fn base(&self) -> &RecordBase {
                &self.base
            }

            fn base_mut(&mut self) -> &mut RecordBase {
                &mut self.base
            }
        }
    };
}

// ============ Record Kinds ============

/// SOA timer values, in seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoaTimers {
    #[serde(rename = "Refresh")]
    pub refresh: Seconds,
    #[serde(rename = "Retry")]
    pub retry: Seconds,
    #[serde(rename = "Expire")]
    pub expire: Seconds,
    #[serde(rename = "NegativeCacheTTL")]
    pub negative_cache_ttl: Seconds,
}

/// SOA record. One per zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoaRecord {
    #[serde(flatten)]
    base: RecordBase,
    /// Primary name server.
    #[serde(rename = "MNAME")]
    pub mname: String,
    /// Mail address of the responsible party.
    #[serde(rename = "RNAME")]
    pub rname: String,
    #[serde(rename = "Serial")]
    pub serial: u32,
    #[serde(flatten)]
    pub timers: SoaTimers,
}

impl SoaRecord {
    pub fn new(
        host_name: impl Into<String>,
        mname: impl Into<String>,
        rname: impl Into<String>,
        serial: u32,
        timers: SoaTimers,
        ttl: impl Into<Seconds>,
    ) -> Self {
        Self {
            base: RecordBase::new(RecordType::Soa, host_name.into(), ttl.into()),
            mname: mname.into(),
            rname: rname.into(),
            serial,
            timers,
        }
    }
}

/// NS record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NsRecord {
    #[serde(flatten)]
    base: RecordBase,
    /// Delegated name server hostname.
    #[serde(rename = "NameServer")]
    pub name_server: String,
}

impl NsRecord {
    pub fn new(
        host_name: impl Into<String>,
        name_server: impl Into<String>,
        ttl: impl Into<Seconds>,
    ) -> Self {
        Self {
            base: RecordBase::new(RecordType::Ns, host_name.into(), ttl.into()),
            name_server: name_server.into(),
        }
    }
}

/// A record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ARecord {
    #[serde(flatten)]
    base: RecordBase,
    /// IPv4 address in textual form. Not validated locally.
    #[serde(rename = "IPAddress")]
    pub ip_address: String,
}

impl ARecord {
    pub fn new(
        host_name: impl Into<String>,
        ip_address: impl Into<String>,
        ttl: impl Into<Seconds>,
    ) -> Self {
        Self {
            base: RecordBase::new(RecordType::A, host_name.into(), ttl.into()),
            ip_address: ip_address.into(),
        }
    }
}

/// AAAA record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AaaaRecord {
    #[serde(flatten)]
    base: RecordBase,
    /// IPv6 address in textual form. Not validated locally.
    #[serde(rename = "IPAddress")]
    pub ip_address: String,
}

impl AaaaRecord {
    pub fn new(
        host_name: impl Into<String>,
        ip_address: impl Into<String>,
        ttl: impl Into<Seconds>,
    ) -> Self {
        Self {
            base: RecordBase::new(RecordType::Aaaa, host_name.into(), ttl.into()),
            ip_address: ip_address.into(),
        }
    }
}

/// CNAME record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CnameRecord {
    #[serde(flatten)]
    base: RecordBase,
    #[serde(rename = "AliasTo")]
    pub alias_to: String,
}

impl CnameRecord {
    pub fn new(
        host_name: impl Into<String>,
        alias_to: impl Into<String>,
        ttl: impl Into<Seconds>,
    ) -> Self {
        Self {
            base: RecordBase::new(RecordType::Cname, host_name.into(), ttl.into()),
            alias_to: alias_to.into(),
        }
    }
}

/// MX record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MxRecord {
    #[serde(flatten)]
    base: RecordBase,
    #[serde(rename = "MailServer")]
    pub mail_server: String,
    #[serde(rename = "Priority")]
    pub priority: Priority,
}

impl MxRecord {
    pub fn new(
        host_name: impl Into<String>,
        mail_server: impl Into<String>,
        priority: Priority,
        ttl: impl Into<Seconds>,
    ) -> Self {
        Self {
            base: RecordBase::new(RecordType::Mx, host_name.into(), ttl.into()),
            mail_server: mail_server.into(),
            priority,
        }
    }
}

/// TXT record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxtRecord {
    #[serde(flatten)]
    base: RecordBase,
    #[serde(rename = "Value")]
    pub value: String,
}

impl TxtRecord {
    pub fn new(
        host_name: impl Into<String>,
        value: impl Into<String>,
        ttl: impl Into<Seconds>,
    ) -> Self {
        Self {
            base: RecordBase::new(RecordType::Txt, host_name.into(), ttl.into()),
            value: value.into(),
        }
    }
}

/// SRV record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SrvRecord {
    #[serde(flatten)]
    base: RecordBase,
    #[serde(rename = "Priority")]
    pub priority: Priority,
    #[serde(rename = "Weight")]
    pub weight: u16,
    #[serde(rename = "Port")]
    pub port: u16,
    #[serde(rename = "Target")]
    pub target: String,
}

impl SrvRecord {
    pub fn new(
        host_name: impl Into<String>,
        target: impl Into<String>,
        port: u16,
        weight: u16,
        priority: Priority,
        ttl: impl Into<Seconds>,
    ) -> Self {
        Self {
            base: RecordBase::new(RecordType::Srv, host_name.into(), ttl.into()),
            priority,
            weight,
            port,
            target: target.into(),
        }
    }
}

impl_resource!(SoaRecord, Soa);
impl_resource!(NsRecord, Ns);
impl_resource!(ARecord, A);
impl_resource!(AaaaRecord, Aaaa);
impl_resource!(CnameRecord, Cname);
impl_resource!(MxRecord, Mx);
impl_resource!(TxtRecord, Txt);
impl_resource!(SrvRecord, Srv);

// ============ Wire Envelope ============

/// The `{"Resource": ...}` wrapper used by every write request and most responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(rename = "Resource")]
    pub resource: T,
}

// ============ Decoding ============

/// Fails with [`GehirnError::ParseError`] when a decoded record carries another kind's tag.
pub(crate) fn ensure_record_type<R: Resource>(record: &R) -> Result<()> {
    if record.record_type() == R::RECORD_TYPE {
        Ok(())
    } else {
        Err(GehirnError::ParseError {
            detail: format!(
                "record type mismatch: expected {}, got {}",
                R::RECORD_TYPE,
                record.record_type()
            ),
        })
    }
}

/// Overlays the fields present in a server echo onto `record`.
///
/// Fields the echo omits keep their current value. `record` is left untouched when the
/// echo is not an object, does not decode, or names a different record type.
pub(crate) fn merge_echo<R: Resource>(record: &mut R, echo: Value) -> Result<()> {
    let echo_fields = match echo {
        Value::Object(fields) => fields,
        other => {
            return Err(GehirnError::ParseError {
                detail: format!("expected a {} record object, got {other}", R::RECORD_TYPE),
            });
        }
    };

    let mut merged = serde_json::to_value(&*record).map_err(|e| {
        GehirnError::SerializationError {
            detail: e.to_string(),
        }
    })?;
    if let Value::Object(fields) = &mut merged {
        fields.extend(echo_fields);
    }

    let updated: R = serde_json::from_value(merged).map_err(|e| GehirnError::ParseError {
        detail: e.to_string(),
    })?;
    ensure_record_type(&updated)?;
    *record = updated;
    Ok(())
}
