//! Zone handle: scopes record operations to one zone and holds the last fetched view.

use reqwest::Method;
use serde::Deserialize;

use crate::client::GehirnClient;
use crate::error::{GehirnError, Result};
use crate::http_client::{HttpUtils, LOG_TARGET};
use crate::record::{
    ARecord, AaaaRecord, CnameRecord, Envelope, MxRecord, NsRecord, Resource, SoaRecord,
    SoaTimers, SrvRecord, TxtRecord, ensure_record_type, merge_echo,
};
use crate::types::{Priority, Seconds, ZoneId};

// ============ Fetch Response ============

#[derive(Debug, Default, Deserialize)]
struct ZoneResources {
    #[serde(rename = "SOA", default)]
    soa: Option<SoaRecord>,
    #[serde(rename = "NS", default)]
    ns: Vec<NsRecord>,
    #[serde(rename = "A", default)]
    a: Vec<ARecord>,
    #[serde(rename = "AAAA", default)]
    aaaa: Vec<AaaaRecord>,
    #[serde(rename = "CNAME", default)]
    cname: Vec<CnameRecord>,
    #[serde(rename = "MX", default)]
    mx: Vec<MxRecord>,
    #[serde(rename = "TXT", default)]
    txt: Vec<TxtRecord>,
    #[serde(rename = "SRV", default)]
    srv: Vec<SrvRecord>,
}

impl ZoneResources {
    fn ensure_record_types(&self) -> Result<()> {
        fn each<R: Resource>(records: &[R]) -> Result<()> {
            records.iter().try_for_each(ensure_record_type)
        }

        if let Some(soa) = &self.soa {
            ensure_record_type(soa)?;
        }
        each(&self.ns)?;
        each(&self.a)?;
        each(&self.aaaa)?;
        each(&self.cname)?;
        each(&self.mx)?;
        each(&self.txt)?;
        each(&self.srv)
    }
}

#[derive(Debug, Deserialize)]
struct DomainInfo {
    #[serde(rename = "Name", default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct ZoneResponse {
    #[serde(rename = "Resource", default)]
    resource: ZoneResources,
    #[serde(rename = "Domain")]
    domain: Option<DomainInfo>,
    is_success: Option<bool>,
}

// ============ Zone ============

/// One DNS zone at Gehirn DNS.
///
/// Obtained from [`GehirnClient::zone`] (unfetched) or [`GehirnClient::get_zone`]
/// (fetched). Record collections reflect the last [`fetch`](Self::fetch) only; writes
/// through the zone update the record passed in, never these collections.
#[derive(Debug, Clone)]
pub struct Zone {
    id: ZoneId,
    client: GehirnClient,
    domain_name: Option<String>,
    soa: Option<SoaRecord>,
    ns: Vec<NsRecord>,
    a: Vec<ARecord>,
    aaaa: Vec<AaaaRecord>,
    cname: Vec<CnameRecord>,
    mx: Vec<MxRecord>,
    txt: Vec<TxtRecord>,
    srv: Vec<SrvRecord>,
}

impl Zone {
    pub(crate) fn new(client: GehirnClient, id: ZoneId) -> Self {
        Self {
            id,
            client,
            domain_name: None,
            soa: None,
            ns: Vec::new(),
            a: Vec::new(),
            aaaa: Vec::new(),
            cname: Vec::new(),
            mx: Vec::new(),
            txt: Vec::new(),
            srv: Vec::new(),
        }
    }

    fn collection_path(&self) -> String {
        format!("resource/{}", self.id)
    }

    fn record_path(&self, record_id: &str) -> String {
        format!("resource/{}/{record_id}", self.id)
    }

    // ---- accessors ----

    pub fn id(&self) -> ZoneId {
        self.id
    }

    /// Domain name reported by the last fetch.
    pub fn domain_name(&self) -> Option<&str> {
        self.domain_name.as_deref()
    }

    pub fn soa(&self) -> Option<&SoaRecord> {
        self.soa.as_ref()
    }

    pub fn ns(&self) -> &[NsRecord] {
        &self.ns
    }

    pub fn a(&self) -> &[ARecord] {
        &self.a
    }

    pub fn aaaa(&self) -> &[AaaaRecord] {
        &self.aaaa
    }

    pub fn cname(&self) -> &[CnameRecord] {
        &self.cname
    }

    pub fn mx(&self) -> &[MxRecord] {
        &self.mx
    }

    pub fn txt(&self) -> &[TxtRecord] {
        &self.txt
    }

    pub fn srv(&self) -> &[SrvRecord] {
        &self.srv
    }

    /// Total number of records held, SOA included.
    pub fn record_count(&self) -> usize {
        usize::from(self.soa.is_some())
            + self.ns.len()
            + self.a.len()
            + self.aaaa.len()
            + self.cname.len()
            + self.mx.len()
            + self.txt.len()
            + self.srv.len()
    }

    // ---- fetch ----

    /// Replaces the held collections with the zone's current records.
    ///
    /// Every returned record whose display name differs from its hostname takes the display
    /// name as its hostname; the display name is then cleared on all records. On error the
    /// previously held view is kept, including when any record carries a type tag that does
    /// not match its collection.
    pub async fn fetch(&mut self) -> Result<()> {
        log::debug!("[{LOG_TARGET}] Fetching zone {}", self.id);

        let request = self
            .client
            .make_request(Method::GET, &self.collection_path(), None)?;
        let response: ZoneResponse = self.client.do_request(request).await?;

        if response.is_success == Some(false) {
            log::warn!("[{LOG_TARGET}] Zone {} listing unsuccessful", self.id);
            return Err(GehirnError::Unsuccessful);
        }
        response.resource.ensure_record_types()?;

        let ZoneResources {
            soa,
            ns,
            a,
            aaaa,
            cname,
            mx,
            txt,
            srv,
        } = response.resource;

        self.domain_name = response.domain.map(|d| d.name).filter(|n| !n.is_empty());
        self.soa = soa;
        self.ns = ns;
        self.a = a;
        self.aaaa = aaaa;
        self.cname = cname;
        self.mx = mx;
        self.txt = txt;
        self.srv = srv;
        self.normalize_names();

        log::debug!(
            "[{LOG_TARGET}] Zone {} fetched: {} records",
            self.id,
            self.record_count()
        );
        Ok(())
    }

    fn normalize_names(&mut self) {
        fn adopt<R: Resource>(records: &mut [R]) {
            for record in records {
                record.base_mut().adopt_display_name();
            }
        }

        if let Some(soa) = self.soa.as_mut() {
            soa.base_mut().adopt_display_name();
        }
        adopt(&mut self.ns);
        adopt(&mut self.a);
        adopt(&mut self.aaaa);
        adopt(&mut self.cname);
        adopt(&mut self.mx);
        adopt(&mut self.txt);
        adopt(&mut self.srv);
    }

    // ---- generic write operations ----

    /// Creates `record` in this zone and merges the server's echo into it, so the assigned
    /// id becomes visible through `record`. Fields the echo omits are kept.
    ///
    /// Fails with [`GehirnError::MaybeRegistered`] without sending anything if the record
    /// already has an id.
    pub async fn add_resource<R: Resource>(&self, record: &mut R) -> Result<()> {
        if record.id().is_some() {
            return Err(GehirnError::MaybeRegistered);
        }

        let body = GehirnClient::encode_envelope(&*record)?;
        let request =
            self.client
                .make_request(Method::POST, &self.collection_path(), Some(body))?;
        let response: Envelope<serde_json::Value> = self.client.do_request(request).await?;

        merge_echo(record, response.resource)?;
        log::info!(
            "[{LOG_TARGET}] Created {} record {} in zone {}",
            record.record_type(),
            record.id().unwrap_or_default(),
            self.id
        );
        Ok(())
    }

    /// Replaces the server copy of `record`, then merges the server's echo into `record`.
    ///
    /// The display name is cleared first. Fails with [`GehirnError::IdUnset`] without
    /// sending anything if the record has no id.
    pub async fn update_resource<R: Resource>(&self, record: &mut R) -> Result<()> {
        let Some(record_id) = record.id() else {
            return Err(GehirnError::IdUnset);
        };
        let path = self.record_path(record_id);

        record.clear_display_name();
        let body = GehirnClient::encode_envelope(&*record)?;
        let request = self.client.make_request(Method::PUT, &path, Some(body))?;
        let response: Envelope<serde_json::Value> = self.client.do_request(request).await?;

        merge_echo(record, response.resource)?;
        log::info!(
            "[{LOG_TARGET}] Updated {} record {} in zone {}",
            record.record_type(),
            record.id().unwrap_or_default(),
            self.id
        );
        Ok(())
    }

    /// Deletes the server copy of `record`.
    ///
    /// The response body, if any, must be valid JSON; its content is not interpreted.
    /// Fails with [`GehirnError::IdUnset`] without sending anything if the record has no id.
    pub async fn delete_resource<R: Resource>(&self, record: &R) -> Result<()> {
        let Some(record_id) = record.id() else {
            return Err(GehirnError::IdUnset);
        };

        let request = self
            .client
            .make_request(Method::DELETE, &self.record_path(record_id), None)?;
        let response_text = self.client.send(request).await?;

        if !response_text.trim().is_empty() {
            HttpUtils::parse_json::<serde_json::Value>(&response_text)?;
        }

        log::info!(
            "[{LOG_TARGET}] Deleted {} record {record_id} in zone {}",
            record.record_type(),
            self.id
        );
        Ok(())
    }

    // ---- typed helpers ----

    /// Creates the zone's SOA record.
    pub async fn add_soa(
        &self,
        host_name: impl Into<String>,
        mname: impl Into<String>,
        rname: impl Into<String>,
        serial: u32,
        timers: SoaTimers,
        ttl: impl Into<Seconds>,
    ) -> Result<SoaRecord> {
        let mut record = SoaRecord::new(host_name, mname, rname, serial, timers, ttl);
        self.add_resource(&mut record).await?;
        Ok(record)
    }

    pub async fn add_ns(
        &self,
        host_name: impl Into<String>,
        name_server: impl Into<String>,
        ttl: impl Into<Seconds>,
    ) -> Result<NsRecord> {
        let mut record = NsRecord::new(host_name, name_server, ttl);
        self.add_resource(&mut record).await?;
        Ok(record)
    }

    /// Creates an A record pointing `host_name` at an IPv4 address.
    pub async fn add_a(
        &self,
        host_name: impl Into<String>,
        ip_address: impl Into<String>,
        ttl: impl Into<Seconds>,
    ) -> Result<ARecord> {
        let mut record = ARecord::new(host_name, ip_address, ttl);
        self.add_resource(&mut record).await?;
        Ok(record)
    }

    pub async fn add_aaaa(
        &self,
        host_name: impl Into<String>,
        ip_address: impl Into<String>,
        ttl: impl Into<Seconds>,
    ) -> Result<AaaaRecord> {
        let mut record = AaaaRecord::new(host_name, ip_address, ttl);
        self.add_resource(&mut record).await?;
        Ok(record)
    }

    pub async fn add_cname(
        &self,
        host_name: impl Into<String>,
        alias_to: impl Into<String>,
        ttl: impl Into<Seconds>,
    ) -> Result<CnameRecord> {
        let mut record = CnameRecord::new(host_name, alias_to, ttl);
        self.add_resource(&mut record).await?;
        Ok(record)
    }

    pub async fn add_mx(
        &self,
        host_name: impl Into<String>,
        mail_server: impl Into<String>,
        priority: Priority,
        ttl: impl Into<Seconds>,
    ) -> Result<MxRecord> {
        let mut record = MxRecord::new(host_name, mail_server, priority, ttl);
        self.add_resource(&mut record).await?;
        Ok(record)
    }

    pub async fn add_txt(
        &self,
        host_name: impl Into<String>,
        value: impl Into<String>,
        ttl: impl Into<Seconds>,
    ) -> Result<TxtRecord> {
        let mut record = TxtRecord::new(host_name, value, ttl);
        self.add_resource(&mut record).await?;
        Ok(record)
    }

    /// Creates an SRV record; `host_name` is the `_service._proto` label.
    pub async fn add_srv(
        &self,
        host_name: impl Into<String>,
        target: impl Into<String>,
        port: u16,
        weight: u16,
        priority: Priority,
        ttl: impl Into<Seconds>,
    ) -> Result<SrvRecord> {
        let mut record = SrvRecord::new(host_name, target, port, weight, priority, ttl);
        self.add_resource(&mut record).await?;
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ApiKey;

    fn zone(id: u64) -> Zone {
        GehirnClient::new(ApiKey::new("t", "s")).unwrap().zone(id)
    }

    #[test]
    fn paths_are_zone_scoped() {
        let z = zone(42);
        assert_eq!(z.collection_path(), "resource/42");
        assert_eq!(z.record_path("abc"), "resource/42/abc");
    }

    #[test]
    fn unfetched_zone_is_empty() {
        let z = zone(1);
        assert_eq!(z.id(), ZoneId(1));
        assert_eq!(z.domain_name(), None);
        assert!(z.soa().is_none());
        assert_eq!(z.record_count(), 0);
    }

    #[test]
    fn zone_response_tolerates_missing_collections() {
        let resp: ZoneResponse =
            serde_json::from_str(r#"{"Resource":{"A":[]},"Domain":{"Name":"example.jp"}}"#)
                .unwrap();
        assert!(resp.resource.soa.is_none());
        assert!(resp.resource.txt.is_empty());
        assert_eq!(resp.domain.map(|d| d.name).as_deref(), Some("example.jp"));
        assert_eq!(resp.is_success, None);
    }

    #[test]
    fn normalize_names_covers_soa_and_lists() {
        let mut z = zone(1);
        let soa: SoaRecord = serde_json::from_value(serde_json::json!({
            "ID": "soa", "Name": "example.jp.", "HostName": "@", "Type": "SOA", "TTL": 3600,
            "MNAME": "ns1.gehirndns.com.", "RNAME": "hostmaster.example.jp.", "Serial": 1,
            "Refresh": 3600, "Retry": 900, "Expire": 604_800, "NegativeCacheTTL": 300
        }))
        .unwrap();
        let txt: TxtRecord = serde_json::from_value(serde_json::json!({
            "ID": "t1", "Name": "_acme", "HostName": "_acme", "Type": "TXT", "TTL": 60,
            "Value": "v"
        }))
        .unwrap();
        z.soa = Some(soa);
        z.txt = vec![txt];

        z.normalize_names();

        let soa = z.soa().unwrap();
        assert_eq!(soa.host_name(), "example.jp.");
        assert_eq!(soa.display_name(), None);
        assert_eq!(z.txt()[0].host_name(), "_acme");
        assert_eq!(z.txt()[0].display_name(), None);
        assert_eq!(z.record_count(), 2);
    }
}
