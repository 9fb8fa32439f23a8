//! Signed meter values for calibration-law compliant billing.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use crate::domain::commons::Url;
use crate::shared::collections::distinct;
use crate::shared::semantics::value_semantics;
use crate::shared::validations::{check, optional_text, required_list, required_text};
use crate::shared::{OcpiError, OcpiObject, SerializerHooks};

/// One signed meter reading.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(try_from = "SignedValueWire")]
pub struct SignedValue {
    /// e.g. `Start`, `End`, `Intermediate`.
    #[validate(length(max = 32, message = "must be at most 32 characters"))]
    nature: String,
    #[validate(length(max = 512, message = "must be at most 512 characters"))]
    plain_data: String,
    #[validate(length(max = 5000, message = "must be at most 5000 characters"))]
    signed_data: String,
}

#[derive(Deserialize)]
struct SignedValueWire {
    nature: String,
    plain_data: String,
    signed_data: String,
}

impl SignedValue {
    pub fn new(
        nature: impl Into<String>,
        plain_data: impl Into<String>,
        signed_data: impl Into<String>,
    ) -> Result<Self, OcpiError> {
        let value = Self {
            nature: required_text("nature", nature)?,
            plain_data: required_text("plain_data", plain_data)?,
            signed_data: required_text("signed_data", signed_data)?,
        };
        check(&value)?;
        Ok(value)
    }

    pub fn nature(&self) -> &str {
        &self.nature
    }

    pub fn plain_data(&self) -> &str {
        &self.plain_data
    }

    pub fn signed_data(&self) -> &str {
        &self.signed_data
    }
}

impl TryFrom<SignedValueWire> for SignedValue {
    type Error = OcpiError;

    fn try_from(wire: SignedValueWire) -> Result<Self, Self::Error> {
        Self::new(wire.nature, wire.plain_data, wire.signed_data)
    }
}

impl OcpiObject for SignedValue {
    const KIND: &'static str = "signed value";
}

value_semantics!(SignedValue {
    nature,
    plain_data,
    signed_data
});

impl fmt::Display for SignedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.nature, self.plain_data)
    }
}

/// Signed meter values of a session together with how to verify them.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(try_from = "SignedDataWire")]
pub struct SignedData {
    #[validate(length(max = 36, message = "must be at most 36 characters"))]
    encoding_method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    encoding_method_version: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 512, message = "must be at most 512 characters"))]
    public_key: Option<String>,
    signed_values: Vec<SignedValue>,
    /// Where the signed data can be verified by the driver.
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<Url>,
}

#[derive(Deserialize)]
struct SignedDataWire {
    encoding_method: String,
    encoding_method_version: Option<i32>,
    public_key: Option<String>,
    signed_values: Vec<SignedValue>,
    url: Option<Url>,
}

impl SignedData {
    pub fn new(
        encoding_method: impl Into<String>,
        encoding_method_version: Option<i32>,
        public_key: Option<String>,
        signed_values: impl IntoIterator<Item = SignedValue>,
        url: Option<Url>,
    ) -> Result<Self, OcpiError> {
        let data = Self {
            encoding_method: required_text("encoding_method", encoding_method)?,
            encoding_method_version,
            public_key: optional_text(public_key),
            signed_values: required_list("signed_values", distinct(signed_values))?,
            url,
        };
        check(&data)?;
        Ok(data)
    }

    pub fn encoding_method(&self) -> &str {
        &self.encoding_method
    }

    pub fn encoding_method_version(&self) -> Option<i32> {
        self.encoding_method_version
    }

    pub fn public_key(&self) -> Option<&str> {
        self.public_key.as_deref()
    }

    pub fn signed_values(&self) -> &[SignedValue] {
        &self.signed_values
    }

    pub fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }
}

impl TryFrom<SignedDataWire> for SignedData {
    type Error = OcpiError;

    fn try_from(wire: SignedDataWire) -> Result<Self, Self::Error> {
        Self::new(
            wire.encoding_method,
            wire.encoding_method_version,
            wire.public_key,
            wire.signed_values,
            wire.url,
        )
    }
}

impl OcpiObject for SignedData {
    const KIND: &'static str = "signed data";

    fn rewrite_nested(
        &self,
        json: &mut Map<String, Value>,
        hooks: &SerializerHooks,
    ) -> Result<(), OcpiError> {
        hooks.rewrite_many(json, "signed_values", &self.signed_values)
    }
}

value_semantics!(SignedData {
    encoding_method,
    encoding_method_version,
    public_key,
    url
} sets {
    signed_values
});

impl fmt::Display for SignedData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} signed value(s))",
            self.encoding_method,
            self.signed_values.len()
        )
    }
}
