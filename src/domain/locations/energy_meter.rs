//! Metering hardware and the transparency software that verifies its readings.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use crate::domain::commons::Url;
use crate::shared::collections::distinct;
use crate::shared::semantics::value_semantics;
use crate::shared::validations::{check, optional_text, required_text};
use crate::shared::{OcpiError, OcpiObject, SerializerHooks};

/// Software a driver can use to verify signed meter values.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(try_from = "TransparencySoftwareWire")]
pub struct TransparencySoftware {
    #[validate(length(max = 255, message = "must be at most 255 characters"))]
    name: String,
    #[validate(length(max = 255, message = "must be at most 255 characters"))]
    version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 255, message = "must be at most 255 characters"))]
    open_source_license: Option<String>,
    #[validate(length(max = 255, message = "must be at most 255 characters"))]
    vendor: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    logo: Option<Url>,
    #[serde(skip_serializing_if = "Option::is_none")]
    how_to_use: Option<Url>,
    #[serde(skip_serializing_if = "Option::is_none")]
    more_information: Option<Url>,
    #[serde(skip_serializing_if = "Option::is_none")]
    source_code_repository: Option<Url>,
}

#[derive(Deserialize)]
struct TransparencySoftwareWire {
    name: String,
    version: String,
    open_source_license: Option<String>,
    vendor: String,
    logo: Option<Url>,
    how_to_use: Option<Url>,
    more_information: Option<Url>,
    source_code_repository: Option<Url>,
}

impl TransparencySoftware {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        vendor: impl Into<String>,
    ) -> Result<Self, OcpiError> {
        let software = Self {
            name: required_text("name", name)?,
            version: required_text("version", version)?,
            open_source_license: None,
            vendor: required_text("vendor", vendor)?,
            logo: None,
            how_to_use: None,
            more_information: None,
            source_code_repository: None,
        };
        check(&software)?;
        Ok(software)
    }

    pub fn with_open_source_license(mut self, license: impl Into<String>) -> Result<Self, OcpiError> {
        self.open_source_license = optional_text(Some(license.into()));
        check(&self)?;
        Ok(self)
    }

    pub fn with_logo(mut self, logo: Url) -> Self {
        self.logo = Some(logo);
        self
    }

    pub fn with_how_to_use(mut self, how_to_use: Url) -> Self {
        self.how_to_use = Some(how_to_use);
        self
    }

    pub fn with_more_information(mut self, more_information: Url) -> Self {
        self.more_information = Some(more_information);
        self
    }

    pub fn with_source_code_repository(mut self, repository: Url) -> Self {
        self.source_code_repository = Some(repository);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn open_source_license(&self) -> Option<&str> {
        self.open_source_license.as_deref()
    }

    pub fn vendor(&self) -> &str {
        &self.vendor
    }

    pub fn logo(&self) -> Option<&Url> {
        self.logo.as_ref()
    }

    pub fn how_to_use(&self) -> Option<&Url> {
        self.how_to_use.as_ref()
    }

    pub fn more_information(&self) -> Option<&Url> {
        self.more_information.as_ref()
    }

    pub fn source_code_repository(&self) -> Option<&Url> {
        self.source_code_repository.as_ref()
    }
}

impl TryFrom<TransparencySoftwareWire> for TransparencySoftware {
    type Error = OcpiError;

    fn try_from(wire: TransparencySoftwareWire) -> Result<Self, Self::Error> {
        let mut software = Self::new(wire.name, wire.version, wire.vendor)?;
        if let Some(license) = wire.open_source_license {
            software = software.with_open_source_license(license)?;
        }
        software.logo = wire.logo;
        software.how_to_use = wire.how_to_use;
        software.more_information = wire.more_information;
        software.source_code_repository = wire.source_code_repository;
        Ok(software)
    }
}

impl OcpiObject for TransparencySoftware {
    const KIND: &'static str = "transparency software";
}

value_semantics!(TransparencySoftware {
    name,
    version,
    vendor,
    open_source_license,
    logo,
    how_to_use,
    more_information,
    source_code_repository
});

impl fmt::Display for TransparencySoftware {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} by {}", self.name, self.version, self.vendor)
    }
}

/// Energy meter installed in an EVSE.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(try_from = "EnergyMeterWire")]
pub struct EnergyMeter {
    #[validate(length(max = 255, message = "must be at most 255 characters"))]
    id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 255, message = "must be at most 255 characters"))]
    model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    model_url: Option<Url>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 255, message = "must be at most 255 characters"))]
    hardware_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 255, message = "must be at most 255 characters"))]
    firmware_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 255, message = "must be at most 255 characters"))]
    manufacturer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    manufacturer_url: Option<Url>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    public_keys: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    public_key_certificate_chain: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    transparency_softwares: Vec<TransparencySoftware>,
}

#[derive(Deserialize)]
struct EnergyMeterWire {
    id: String,
    model: Option<String>,
    model_url: Option<Url>,
    hardware_version: Option<String>,
    firmware_version: Option<String>,
    manufacturer: Option<String>,
    manufacturer_url: Option<Url>,
    #[serde(default)]
    public_keys: Option<Vec<String>>,
    public_key_certificate_chain: Option<String>,
    #[serde(default)]
    transparency_softwares: Option<Vec<TransparencySoftware>>,
}

impl EnergyMeter {
    pub fn new(id: impl Into<String>) -> Result<Self, OcpiError> {
        let meter = Self {
            id: required_text("id", id)?,
            model: None,
            model_url: None,
            hardware_version: None,
            firmware_version: None,
            manufacturer: None,
            manufacturer_url: None,
            public_keys: Vec::new(),
            public_key_certificate_chain: None,
            transparency_softwares: Vec::new(),
        };
        check(&meter)?;
        Ok(meter)
    }

    pub fn with_model(mut self, model: impl Into<String>, model_url: Option<Url>) -> Result<Self, OcpiError> {
        self.model = optional_text(Some(model.into()));
        self.model_url = model_url;
        check(&self)?;
        Ok(self)
    }

    pub fn with_versions(
        mut self,
        hardware_version: Option<String>,
        firmware_version: Option<String>,
    ) -> Result<Self, OcpiError> {
        self.hardware_version = optional_text(hardware_version);
        self.firmware_version = optional_text(firmware_version);
        check(&self)?;
        Ok(self)
    }

    pub fn with_manufacturer(
        mut self,
        manufacturer: impl Into<String>,
        manufacturer_url: Option<Url>,
    ) -> Result<Self, OcpiError> {
        self.manufacturer = optional_text(Some(manufacturer.into()));
        self.manufacturer_url = manufacturer_url;
        check(&self)?;
        Ok(self)
    }

    /// Sets the public keys; blank and repeated keys are dropped.
    pub fn with_public_keys(mut self, keys: impl IntoIterator<Item = String>) -> Self {
        self.public_keys = distinct(keys.into_iter().filter_map(|key| optional_text(Some(key))));
        self
    }

    pub fn with_public_key_certificate_chain(mut self, chain: impl Into<String>) -> Self {
        self.public_key_certificate_chain = optional_text(Some(chain.into()));
        self
    }

    pub fn with_transparency_softwares(
        mut self,
        softwares: impl IntoIterator<Item = TransparencySoftware>,
    ) -> Self {
        self.transparency_softwares = distinct(softwares);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    pub fn model_url(&self) -> Option<&Url> {
        self.model_url.as_ref()
    }

    pub fn hardware_version(&self) -> Option<&str> {
        self.hardware_version.as_deref()
    }

    pub fn firmware_version(&self) -> Option<&str> {
        self.firmware_version.as_deref()
    }

    pub fn manufacturer(&self) -> Option<&str> {
        self.manufacturer.as_deref()
    }

    pub fn manufacturer_url(&self) -> Option<&Url> {
        self.manufacturer_url.as_ref()
    }

    pub fn public_keys(&self) -> &[String] {
        &self.public_keys
    }

    pub fn public_key_certificate_chain(&self) -> Option<&str> {
        self.public_key_certificate_chain.as_deref()
    }

    pub fn transparency_softwares(&self) -> &[TransparencySoftware] {
        &self.transparency_softwares
    }
}

impl TryFrom<EnergyMeterWire> for EnergyMeter {
    type Error = OcpiError;

    fn try_from(wire: EnergyMeterWire) -> Result<Self, Self::Error> {
        let mut meter = Self::new(wire.id)?
            .with_versions(wire.hardware_version, wire.firmware_version)?
            .with_public_keys(wire.public_keys.unwrap_or_default())
            .with_transparency_softwares(wire.transparency_softwares.unwrap_or_default());
        if let Some(model) = wire.model {
            meter = meter.with_model(model, None)?;
        }
        if let Some(manufacturer) = wire.manufacturer {
            meter = meter.with_manufacturer(manufacturer, None)?;
        }
        if let Some(chain) = wire.public_key_certificate_chain {
            meter = meter.with_public_key_certificate_chain(chain);
        }
        meter.model_url = wire.model_url;
        meter.manufacturer_url = wire.manufacturer_url;
        Ok(meter)
    }
}

impl OcpiObject for EnergyMeter {
    const KIND: &'static str = "energy meter";

    fn rewrite_nested(
        &self,
        json: &mut Map<String, Value>,
        hooks: &SerializerHooks,
    ) -> Result<(), OcpiError> {
        hooks.rewrite_many(json, "transparency_softwares", &self.transparency_softwares)
    }
}

value_semantics!(EnergyMeter {
    id,
    model,
    model_url,
    hardware_version,
    firmware_version,
    manufacturer,
    manufacturer_url,
    public_key_certificate_chain
} sets {
    public_keys,
    transparency_softwares
});

impl fmt::Display for EnergyMeter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.manufacturer, &self.model) {
            (Some(manufacturer), Some(model)) => write!(f, "{} ({manufacturer} {model})", self.id),
            (None, Some(model)) => write!(f, "{} ({model})", self.id),
            _ => f.write_str(&self.id),
        }
    }
}
