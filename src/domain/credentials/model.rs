//! Credentials exchanged during the OCPI registration handshake.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use crate::domain::commons::{BusinessDetails, CountryCode, PartyId, Url};
use crate::shared::collections::distinct;
use crate::shared::semantics::value_semantics;
use crate::shared::validations::{check, required_text};
use crate::shared::{OcpiError, OcpiObject, SerializerHooks};

/// Role a party plays in the OCPI network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Charge Point Operator.
    Cpo,
    /// e-Mobility Service Provider.
    Emsp,
    Hub,
    /// National Access Point (national database with all location information).
    Nap,
    /// Navigation Service Provider.
    Nsp,
    Other,
    /// Smart Charging Service Provider.
    Scsp,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cpo => "CPO",
            Self::Emsp => "EMSP",
            Self::Hub => "HUB",
            Self::Nap => "NAP",
            Self::Nsp => "NSP",
            Self::Other => "OTHER",
            Self::Scsp => "SCSP",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One role of a platform, identified by country code and party id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "CredentialsRoleWire")]
pub struct CredentialsRole {
    role: Role,
    business_details: BusinessDetails,
    party_id: PartyId,
    country_code: CountryCode,
    /// Whether the party accepts falling back to an older OCPI version.
    #[serde(skip_serializing_if = "Option::is_none")]
    allow_downgrades: Option<bool>,
}

#[derive(Deserialize)]
struct CredentialsRoleWire {
    role: Role,
    business_details: BusinessDetails,
    party_id: PartyId,
    country_code: CountryCode,
    allow_downgrades: Option<bool>,
}

impl CredentialsRole {
    pub fn new(
        country_code: CountryCode,
        party_id: PartyId,
        role: Role,
        business_details: BusinessDetails,
        allow_downgrades: Option<bool>,
    ) -> Self {
        Self {
            role,
            business_details,
            party_id,
            country_code,
            allow_downgrades,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn business_details(&self) -> &BusinessDetails {
        &self.business_details
    }

    pub fn party_id(&self) -> &PartyId {
        &self.party_id
    }

    pub fn country_code(&self) -> &CountryCode {
        &self.country_code
    }

    pub fn allow_downgrades(&self) -> Option<bool> {
        self.allow_downgrades
    }
}

impl TryFrom<CredentialsRoleWire> for CredentialsRole {
    type Error = OcpiError;

    fn try_from(wire: CredentialsRoleWire) -> Result<Self, Self::Error> {
        Ok(Self::new(
            wire.country_code,
            wire.party_id,
            wire.role,
            wire.business_details,
            wire.allow_downgrades,
        ))
    }
}

impl OcpiObject for CredentialsRole {
    const KIND: &'static str = "credentials role";

    fn rewrite_nested(
        &self,
        json: &mut Map<String, Value>,
        hooks: &SerializerHooks,
    ) -> Result<(), OcpiError> {
        hooks.rewrite_one(json, "business_details", Some(&self.business_details))
    }
}

value_semantics!(CredentialsRole {
    country_code,
    party_id,
    role,
    business_details,
    allow_downgrades
});

impl fmt::Display for CredentialsRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}*{} ({}): {}",
            self.country_code, self.party_id, self.role, self.business_details
        )
    }
}

/// Token, versions URL and roles of a platform.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(try_from = "CredentialsWire")]
pub struct Credentials {
    #[validate(length(max = 64, message = "must be at most 64 characters"))]
    token: String,
    url: Url,
    roles: Vec<CredentialsRole>,
}

#[derive(Deserialize)]
struct CredentialsWire {
    token: String,
    url: Url,
    #[serde(default)]
    roles: Option<Vec<CredentialsRole>>,
}

impl Credentials {
    pub fn new(
        token: impl Into<String>,
        url: Url,
        roles: impl IntoIterator<Item = CredentialsRole>,
    ) -> Result<Self, OcpiError> {
        let credentials = Self {
            token: required_text("token", token)?,
            url,
            roles: distinct(roles),
        };
        check(&credentials)?;
        Ok(credentials)
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// URL of the platform's versions endpoint.
    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn roles(&self) -> &[CredentialsRole] {
        &self.roles
    }

    /// Finds the role registered for a country code / party id pair.
    pub fn role_for(&self, country_code: &CountryCode, party_id: &PartyId) -> Option<&CredentialsRole> {
        self.roles
            .iter()
            .find(|role| role.country_code() == country_code && role.party_id() == party_id)
    }
}

impl TryFrom<CredentialsWire> for Credentials {
    type Error = OcpiError;

    fn try_from(wire: CredentialsWire) -> Result<Self, Self::Error> {
        Self::new(wire.token, wire.url, wire.roles.unwrap_or_default())
    }
}

impl OcpiObject for Credentials {
    const KIND: &'static str = "credentials";

    fn rewrite_nested(
        &self,
        json: &mut Map<String, Value>,
        hooks: &SerializerHooks,
    ) -> Result<(), OcpiError> {
        hooks.rewrite_many(json, "roles", &self.roles)
    }
}

value_semantics!(Credentials { token, url } sets { roles });

impl fmt::Display for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let roles: Vec<String> = self
            .roles
            .iter()
            .map(|role| format!("{}*{}", role.country_code, role.party_id))
            .collect();
        write!(f, "{} [{}]", self.url, roles.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::shared::semantics::hash_of;

    fn role_payload(country: &str, party: &str, role: &str) -> serde_json::Value {
        json!({
            "role": role,
            "business_details": {"name": "Example Operator"},
            "party_id": party,
            "country_code": country
        })
    }

    fn credentials_payload() -> serde_json::Value {
        json!({
            "token": "ebf3b399-779f-4497-9b9d-ac6ad3cc44d2",
            "url": "https://example.com/ocpi/versions/",
            "roles": [
                role_payload("NL", "EXA", "CPO"),
                role_payload("NL", "EXB", "EMSP")
            ]
        })
    }

    #[test]
    fn parses_credentials_with_roles() {
        let credentials = Credentials::parse(&credentials_payload()).unwrap();
        assert_eq!(credentials.token(), "ebf3b399-779f-4497-9b9d-ac6ad3cc44d2");
        assert_eq!(credentials.roles().len(), 2);
        assert_eq!(credentials.roles()[0].role(), Role::Cpo);
        assert_eq!(credentials.to_json().unwrap(), credentials_payload());
    }

    #[test]
    fn duplicate_roles_are_removed() {
        let mut payload = credentials_payload();
        payload["roles"]
            .as_array_mut()
            .unwrap()
            .push(role_payload("nl", "exa", "CPO"));
        let credentials = Credentials::parse(&payload).unwrap();
        assert_eq!(credentials.roles().len(), 2);
    }

    #[test]
    fn roles_may_be_empty() {
        let credentials = Credentials::parse(&json!({
            "token": "abc",
            "url": "https://example.com/ocpi/versions/",
            "roles": []
        }))
        .unwrap();
        assert!(credentials.roles().is_empty());
        assert_eq!(credentials.to_json().unwrap()["roles"], json!([]));
    }

    #[test]
    fn role_order_does_not_affect_equality() {
        let mut reversed = credentials_payload();
        reversed["roles"].as_array_mut().unwrap().reverse();
        assert_eq!(
            Credentials::parse(&credentials_payload()).unwrap(),
            Credentials::parse(&reversed).unwrap()
        );
    }

    #[test]
    fn reordered_roles_hash_equal() {
        let mut reversed = credentials_payload();
        reversed["roles"].as_array_mut().unwrap().reverse();
        let a = Credentials::parse(&credentials_payload()).unwrap();
        let b = Credentials::parse(&reversed).unwrap();
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn null_or_absent_roles_read_as_empty() {
        let mut payload = credentials_payload();
        payload["roles"] = json!(null);
        assert!(Credentials::parse(&payload).unwrap().roles().is_empty());

        payload.as_object_mut().unwrap().remove("roles");
        let credentials = Credentials::parse(&payload).unwrap();
        assert!(credentials.roles().is_empty());
        assert_eq!(credentials.to_json().unwrap()["roles"], json!([]));
    }

    #[test]
    fn every_mandatory_field_is_required() {
        for field in ["token", "url"] {
            let mut payload = credentials_payload();
            payload.as_object_mut().unwrap().remove(field);
            let err = Credentials::parse(&payload).unwrap_err();
            assert!(err.to_string().contains(field), "{field}: {err}");
        }
        for field in ["role", "business_details", "party_id", "country_code"] {
            let mut payload = role_payload("NL", "EXA", "CPO");
            payload.as_object_mut().unwrap().remove(field);
            let err = CredentialsRole::parse(&payload).unwrap_err();
            assert!(err.to_string().contains(field), "{field}: {err}");
        }
    }

    #[test]
    fn finds_role_by_party() {
        let credentials = Credentials::parse(&credentials_payload()).unwrap();
        let role = credentials
            .role_for(&"NL".parse().unwrap(), &"EXB".parse().unwrap())
            .unwrap();
        assert_eq!(role.role(), Role::Emsp);
    }

    #[test]
    fn rejects_missing_token() {
        let mut payload = credentials_payload();
        payload.as_object_mut().unwrap().remove("token");
        let err = Credentials::parse(&payload).unwrap_err();
        assert!(err.to_string().contains("token"));
    }

    #[test]
    fn rejects_long_token() {
        let url: Url = "https://example.com/versions".parse().unwrap();
        let err = Credentials::new("x".repeat(65), url, Vec::new()).unwrap_err();
        assert!(matches!(err, OcpiError::InvalidArgument { field: "token", .. }));
    }

    #[test]
    fn role_requires_business_details() {
        let mut payload = role_payload("NL", "EXA", "CPO");
        payload.as_object_mut().unwrap().remove("business_details");
        let err = CredentialsRole::parse(&payload).unwrap_err();
        assert!(err.to_string().contains("business_details"));
    }

    #[test]
    fn role_allow_downgrades_is_optional() {
        let mut payload = role_payload("DE", "ABC", "HUB");
        let role = CredentialsRole::parse(&payload).unwrap();
        assert_eq!(role.allow_downgrades(), None);

        payload["allow_downgrades"] = json!(true);
        let role = CredentialsRole::parse(&payload).unwrap();
        assert_eq!(role.allow_downgrades(), Some(true));
        assert_eq!(role.to_json().unwrap(), payload);
        assert_eq!(role.to_string(), "DE*ABC (HUB): Example Operator");
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert!(CredentialsRole::parse(&role_payload("NL", "EXA", "cpo")).is_err());
    }
}
