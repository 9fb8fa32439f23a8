//! Version discovery records exchanged before any other OCPI module is used.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::commons::Url;
use crate::shared::collections::distinct;
use crate::shared::semantics::value_semantics;
use crate::shared::validations::{required_list, required_text};
use crate::shared::{OcpiError, OcpiObject, SerializerHooks};

/// OCPI version label such as `2.2.1`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VersionNumber(String);

impl VersionNumber {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for VersionNumber {
    type Error = OcpiError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Ok(Self(required_text("version", value)?))
    }
}

impl From<VersionNumber> for String {
    fn from(value: VersionNumber) -> Self {
        value.0
    }
}

impl FromStr for VersionNumber {
    type Err = OcpiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s.to_string())
    }
}

impl fmt::Display for VersionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// OCPI module identifier.
///
/// Modules outside the standard set are kept as `Custom`, lower-cased.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ModuleId {
    Cdrs,
    ChargingProfiles,
    Commands,
    Credentials,
    HubClientInfo,
    Locations,
    Sessions,
    Tariffs,
    Tokens,
    Custom(String),
}

impl ModuleId {
    /// The modules defined by OCPI 2.2.
    pub const STANDARD: &'static [ModuleId] = &[
        Self::Cdrs,
        Self::ChargingProfiles,
        Self::Commands,
        Self::Credentials,
        Self::HubClientInfo,
        Self::Locations,
        Self::Sessions,
        Self::Tariffs,
        Self::Tokens,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Self::Cdrs => "cdrs",
            Self::ChargingProfiles => "chargingprofiles",
            Self::Commands => "commands",
            Self::Credentials => "credentials",
            Self::HubClientInfo => "hubclientinfo",
            Self::Locations => "locations",
            Self::Sessions => "sessions",
            Self::Tariffs => "tariffs",
            Self::Tokens => "tokens",
            Self::Custom(name) => name,
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }
}

impl TryFrom<String> for ModuleId {
    type Error = OcpiError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let name = required_text("identifier", value)?.to_ascii_lowercase();
        let known = Self::STANDARD
            .iter()
            .find(|module| module.as_str() == name)
            .cloned();
        Ok(known.unwrap_or(Self::Custom(name)))
    }
}

impl From<ModuleId> for String {
    fn from(value: ModuleId) -> Self {
        match value {
            ModuleId::Custom(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for ModuleId {
    type Err = OcpiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s.to_string())
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which side of a module interface a party implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InterfaceRole {
    /// Owner of the data; pushes updates.
    Sender,
    /// Consumer of the data.
    Receiver,
}

impl InterfaceRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sender => "SENDER",
            Self::Receiver => "RECEIVER",
        }
    }
}

impl fmt::Display for InterfaceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A supported OCPI version and the URL of its details.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "VersionWire")]
pub struct Version {
    version: VersionNumber,
    url: Url,
}

#[derive(Deserialize)]
struct VersionWire {
    version: VersionNumber,
    url: Url,
}

impl Version {
    pub fn new(version: VersionNumber, url: Url) -> Self {
        Self { version, url }
    }

    pub fn version(&self) -> &VersionNumber {
        &self.version
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl TryFrom<VersionWire> for Version {
    type Error = OcpiError;

    fn try_from(wire: VersionWire) -> Result<Self, Self::Error> {
        Ok(Self::new(wire.version, wire.url))
    }
}

impl OcpiObject for Version {
    const KIND: &'static str = "version";
}

value_semantics!(Version { version, url });

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.version, self.url)
    }
}

/// Where a module is served for one interface role.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "VersionEndpointWire")]
pub struct VersionEndpoint {
    identifier: ModuleId,
    role: InterfaceRole,
    url: Url,
}

#[derive(Deserialize)]
struct VersionEndpointWire {
    identifier: ModuleId,
    role: InterfaceRole,
    url: Url,
}

impl VersionEndpoint {
    pub fn new(identifier: ModuleId, role: InterfaceRole, url: Url) -> Self {
        Self {
            identifier,
            role,
            url,
        }
    }

    pub fn identifier(&self) -> &ModuleId {
        &self.identifier
    }

    pub fn role(&self) -> InterfaceRole {
        self.role
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl TryFrom<VersionEndpointWire> for VersionEndpoint {
    type Error = OcpiError;

    fn try_from(wire: VersionEndpointWire) -> Result<Self, Self::Error> {
        Ok(Self::new(wire.identifier, wire.role, wire.url))
    }
}

impl OcpiObject for VersionEndpoint {
    const KIND: &'static str = "version endpoint";
}

value_semantics!(VersionEndpoint {
    identifier,
    role,
    url
});

impl fmt::Display for VersionEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.identifier, self.role, self.url)
    }
}

/// Every module endpoint a party offers for one OCPI version.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "VersionDetailWire")]
pub struct VersionDetail {
    version: VersionNumber,
    endpoints: Vec<VersionEndpoint>,
}

#[derive(Deserialize)]
struct VersionDetailWire {
    version: VersionNumber,
    endpoints: Vec<VersionEndpoint>,
}

impl VersionDetail {
    pub fn new(
        version: VersionNumber,
        endpoints: impl IntoIterator<Item = VersionEndpoint>,
    ) -> Result<Self, OcpiError> {
        Ok(Self {
            version,
            endpoints: required_list("endpoints", distinct(endpoints))?,
        })
    }

    pub fn version(&self) -> &VersionNumber {
        &self.version
    }

    pub fn endpoints(&self) -> &[VersionEndpoint] {
        &self.endpoints
    }

    pub fn endpoint(&self, identifier: &ModuleId, role: InterfaceRole) -> Option<&VersionEndpoint> {
        self.endpoints
            .iter()
            .find(|endpoint| endpoint.identifier() == identifier && endpoint.role() == role)
    }
}

impl TryFrom<VersionDetailWire> for VersionDetail {
    type Error = OcpiError;

    fn try_from(wire: VersionDetailWire) -> Result<Self, Self::Error> {
        Self::new(wire.version, wire.endpoints)
    }
}

impl OcpiObject for VersionDetail {
    const KIND: &'static str = "version detail";

    fn rewrite_nested(
        &self,
        json: &mut Map<String, Value>,
        hooks: &SerializerHooks,
    ) -> Result<(), OcpiError> {
        hooks.rewrite_many(json, "endpoints", &self.endpoints)
    }
}

value_semantics!(VersionDetail { version } sets { endpoints });

impl fmt::Display for VersionDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OCPI {} ({} endpoint(s))", self.version, self.endpoints.len())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn detail_payload() -> serde_json::Value {
        json!({
            "version": "2.2.1",
            "endpoints": [
                {"identifier": "credentials", "role": "SENDER", "url": "https://example.com/ocpi/2.2.1/credentials"},
                {"identifier": "locations", "role": "SENDER", "url": "https://example.com/ocpi/cpo/2.2.1/locations"},
                {"identifier": "locations", "role": "RECEIVER", "url": "https://example.com/ocpi/emsp/2.2.1/locations"}
            ]
        })
    }

    #[test]
    fn endpoint_round_trips_with_lower_case_identifier() {
        let payload = json!({"identifier": "credentials", "role": "SENDER", "url": "https://x/y"});
        let endpoint = VersionEndpoint::parse(&payload).unwrap();
        assert_eq!(endpoint.identifier(), &ModuleId::Credentials);
        assert_eq!(endpoint.role(), InterfaceRole::Sender);
        assert_eq!(endpoint.to_json().unwrap(), payload);
    }

    #[test]
    fn every_mandatory_field_is_required() {
        for field in ["identifier", "role", "url"] {
            let mut payload =
                json!({"identifier": "credentials", "role": "SENDER", "url": "https://x/y"});
            payload.as_object_mut().unwrap().remove(field);
            let err = VersionEndpoint::parse(&payload).unwrap_err();
            assert!(err.to_string().contains(field), "{field}: {err}");
        }
        for field in ["version", "url"] {
            let mut payload = json!({"version": "2.2.1", "url": "https://example.com/ocpi/2.2.1"});
            payload.as_object_mut().unwrap().remove(field);
            let err = Version::parse(&payload).unwrap_err();
            assert!(err.to_string().contains(field), "{field}: {err}");
        }
        for field in ["version", "endpoints"] {
            let mut payload = detail_payload();
            payload.as_object_mut().unwrap().remove(field);
            let err = VersionDetail::parse(&payload).unwrap_err();
            assert!(err.to_string().contains(field), "{field}: {err}");
        }
    }

    #[test]
    fn identifier_is_lower_cased() {
        let endpoint = VersionEndpoint::parse(&json!({
            "identifier": "Locations",
            "role": "RECEIVER",
            "url": "https://x/y"
        }))
        .unwrap();
        assert_eq!(endpoint.identifier(), &ModuleId::Locations);
        assert_eq!(endpoint.to_json().unwrap()["identifier"], json!("locations"));
    }

    #[test]
    fn custom_modules_are_kept() {
        let module: ModuleId = "X-Parking".parse().unwrap();
        assert_eq!(module, ModuleId::Custom("x-parking".to_string()));
        assert!(module.is_custom());
        assert_eq!(String::from(module), "x-parking");
    }

    #[test]
    fn role_is_case_sensitive() {
        assert!(VersionEndpoint::parse(&json!({
            "identifier": "tokens",
            "role": "sender",
            "url": "https://x/y"
        }))
        .is_err());
    }

    #[test]
    fn parses_version_detail() {
        let detail = VersionDetail::parse(&detail_payload()).unwrap();
        assert_eq!(detail.version().as_str(), "2.2.1");
        assert_eq!(detail.endpoints().len(), 3);
        let receiver = detail
            .endpoint(&ModuleId::Locations, InterfaceRole::Receiver)
            .unwrap();
        assert_eq!(receiver.url().as_str(), "https://example.com/ocpi/emsp/2.2.1/locations");
        assert!(detail.endpoint(&ModuleId::Tariffs, InterfaceRole::Sender).is_none());
        assert_eq!(detail.to_json().unwrap(), detail_payload());
    }

    #[test]
    fn version_detail_requires_endpoints() {
        let err = VersionDetail::parse(&json!({"version": "2.2.1", "endpoints": []})).unwrap_err();
        assert!(err.to_string().contains("endpoints"));
        let err = VersionDetail::parse(&json!({"version": "2.2.1"})).unwrap_err();
        assert!(err.to_string().contains("endpoints"));
    }

    #[test]
    fn version_detail_requires_version() {
        let err = VersionDetail::parse(&json!({"version": " ", "endpoints": []})).unwrap_err();
        assert!(err.to_string().contains("version"));
    }

    #[test]
    fn duplicate_endpoints_are_removed() {
        let mut payload = detail_payload();
        let first = payload["endpoints"][0].clone();
        payload["endpoints"].as_array_mut().unwrap().push(first);
        let detail = VersionDetail::parse(&payload).unwrap();
        assert_eq!(detail.endpoints().len(), 3);
    }

    #[test]
    fn parses_version() {
        let payload = json!({"version": "2.2", "url": "https://example.com/ocpi/2.2/"});
        let version = Version::parse(&payload).unwrap();
        assert_eq!(version.version().as_str(), "2.2");
        assert_eq!(version.to_json().unwrap(), payload);
        assert_eq!(version.to_string(), "2.2 at https://example.com/ocpi/2.2/");
    }
}
