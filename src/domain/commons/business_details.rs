use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use super::ids::Url;
use super::image::Image;
use crate::shared::semantics::value_semantics;
use crate::shared::validations::{check, required_text};
use crate::shared::{OcpiError, OcpiObject, SerializerHooks};

/// Legal and commercial identity of a party: name, website and logo.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(try_from = "BusinessDetailsWire")]
pub struct BusinessDetails {
    #[validate(length(max = 100, message = "must be at most 100 characters"))]
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    website: Option<Url>,
    #[serde(skip_serializing_if = "Option::is_none")]
    logo: Option<Image>,
}

#[derive(Deserialize)]
struct BusinessDetailsWire {
    name: String,
    website: Option<Url>,
    logo: Option<Image>,
}

impl BusinessDetails {
    pub fn new(
        name: impl Into<String>,
        website: Option<Url>,
        logo: Option<Image>,
    ) -> Result<Self, OcpiError> {
        let details = Self {
            name: required_text("name", name)?,
            website,
            logo,
        };
        check(&details)?;
        Ok(details)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn website(&self) -> Option<&Url> {
        self.website.as_ref()
    }

    pub fn logo(&self) -> Option<&Image> {
        self.logo.as_ref()
    }
}

impl TryFrom<BusinessDetailsWire> for BusinessDetails {
    type Error = OcpiError;

    fn try_from(wire: BusinessDetailsWire) -> Result<Self, Self::Error> {
        Self::new(wire.name, wire.website, wire.logo)
    }
}

impl OcpiObject for BusinessDetails {
    const KIND: &'static str = "business details";

    fn rewrite_nested(
        &self,
        json: &mut Map<String, Value>,
        hooks: &SerializerHooks,
    ) -> Result<(), OcpiError> {
        hooks.rewrite_one(json, "logo", self.logo.as_ref())
    }
}

value_semantics!(BusinessDetails { name, website, logo });

impl fmt::Display for BusinessDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.website {
            Some(website) => write!(f, "{} ({})", self.name, website),
            None => f.write_str(&self.name),
        }
    }
}
