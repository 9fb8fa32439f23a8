//! Identifier types shared by several OCPI modules.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::ValidateUrl;

use crate::shared::OcpiError;

/// ISO 3166-1 alpha-2 country code of a party, stored upper-case.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CountryCode(String);

impl CountryCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CountryCode {
    type Error = OcpiError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let value = value.trim();
        if value.is_empty() {
            return Err(OcpiError::invalid("country_code", "must not be null or empty"));
        }
        if value.len() != 2 || !value.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(OcpiError::invalid(
                "country_code",
                format!("'{value}' is not a two letter country code"),
            ));
        }
        Ok(Self(value.to_ascii_uppercase()))
    }
}

impl From<CountryCode> for String {
    fn from(value: CountryCode) -> Self {
        value.0
    }
}

impl FromStr for CountryCode {
    type Err = OcpiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s.to_string())
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Three character party identifier (ISO 15118), stored upper-case.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PartyId(String);

impl PartyId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PartyId {
    type Error = OcpiError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let value = value.trim();
        if value.is_empty() {
            return Err(OcpiError::invalid("party_id", "must not be null or empty"));
        }
        if value.len() != 3 || !value.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(OcpiError::invalid(
                "party_id",
                format!("'{value}' is not a three character party id"),
            ));
        }
        Ok(Self(value.to_ascii_uppercase()))
    }
}

impl From<PartyId> for String {
    fn from(value: PartyId) -> Self {
        value.0
    }
}

impl FromStr for PartyId {
    type Err = OcpiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s.to_string())
    }
}

impl fmt::Display for PartyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Absolute URL as used for endpoints, websites and images.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Url(String);

impl Url {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Url {
    type Error = OcpiError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let value = value.trim();
        if value.is_empty() {
            return Err(OcpiError::invalid("url", "must not be null or empty"));
        }
        if !value.validate_url() {
            return Err(OcpiError::invalid("url", format!("'{value}' is not a valid URL")));
        }
        Ok(Self(value.to_string()))
    }
}

impl From<Url> for String {
    fn from(value: Url) -> Self {
        value.0
    }
}

impl FromStr for Url {
    type Err = OcpiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s.to_string())
    }
}

impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn country_code_is_upper_cased() {
        let code: CountryCode = "nl".parse().unwrap();
        assert_eq!(code.as_str(), "NL");
        assert_eq!(serde_json::to_value(&code).unwrap(), json!("NL"));
    }

    #[test]
    fn country_code_rejects_wrong_length() {
        assert!("NLD".parse::<CountryCode>().is_err());
        assert!("".parse::<CountryCode>().is_err());
        assert!("1A".parse::<CountryCode>().is_err());
    }

    #[test]
    fn party_id_accepts_alphanumerics() {
        let party: PartyId = serde_json::from_value(json!("ex1")).unwrap();
        assert_eq!(party.to_string(), "EX1");
    }

    #[test]
    fn party_id_rejects_wrong_length() {
        let err = "EXAMPLE".parse::<PartyId>().unwrap_err();
        assert!(matches!(err, OcpiError::InvalidArgument { field: "party_id", .. }));
    }

    #[test]
    fn url_must_be_absolute() {
        assert!("https://example.com/ocpi/versions".parse::<Url>().is_ok());
        assert!("not a url".parse::<Url>().is_err());
        assert!(serde_json::from_value::<Url>(json!("")).is_err());
    }
}
