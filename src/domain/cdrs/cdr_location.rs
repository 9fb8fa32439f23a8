//! Location, EVSE and connector data copied into a CDR.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use crate::domain::commons::GeoCoordinate;
use crate::shared::semantics::value_semantics;
use crate::shared::validations::{check, optional_text, required_text};
use crate::shared::{OcpiError, OcpiObject, SerializerHooks};

/// Connector standard (plug or socket type).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ConnectorType {
    #[serde(rename = "CHADEMO")]
    Chademo,
    #[serde(rename = "CHAOJI")]
    Chaoji,
    #[serde(rename = "DOMESTIC_A")]
    DomesticA,
    #[serde(rename = "DOMESTIC_B")]
    DomesticB,
    #[serde(rename = "DOMESTIC_C")]
    DomesticC,
    #[serde(rename = "DOMESTIC_D")]
    DomesticD,
    #[serde(rename = "DOMESTIC_E")]
    DomesticE,
    #[serde(rename = "DOMESTIC_F")]
    DomesticF,
    #[serde(rename = "DOMESTIC_G")]
    DomesticG,
    #[serde(rename = "DOMESTIC_H")]
    DomesticH,
    #[serde(rename = "DOMESTIC_I")]
    DomesticI,
    #[serde(rename = "DOMESTIC_J")]
    DomesticJ,
    #[serde(rename = "DOMESTIC_K")]
    DomesticK,
    #[serde(rename = "DOMESTIC_L")]
    DomesticL,
    #[serde(rename = "DOMESTIC_M")]
    DomesticM,
    #[serde(rename = "DOMESTIC_N")]
    DomesticN,
    #[serde(rename = "DOMESTIC_O")]
    DomesticO,
    #[serde(rename = "GBT_AC")]
    GbtAc,
    #[serde(rename = "GBT_DC")]
    GbtDc,
    #[serde(rename = "IEC_60309_2_single_16")]
    Iec60309_2Single16,
    #[serde(rename = "IEC_60309_2_three_16")]
    Iec60309_2Three16,
    #[serde(rename = "IEC_60309_2_three_32")]
    Iec60309_2Three32,
    #[serde(rename = "IEC_60309_2_three_64")]
    Iec60309_2Three64,
    #[serde(rename = "IEC_62196_T1")]
    Iec62196T1,
    #[serde(rename = "IEC_62196_T1_COMBO")]
    Iec62196T1Combo,
    #[serde(rename = "IEC_62196_T2")]
    Iec62196T2,
    #[serde(rename = "IEC_62196_T2_COMBO")]
    Iec62196T2Combo,
    #[serde(rename = "IEC_62196_T3A")]
    Iec62196T3A,
    #[serde(rename = "IEC_62196_T3C")]
    Iec62196T3C,
    #[serde(rename = "NEMA_5_20")]
    Nema5_20,
    #[serde(rename = "NEMA_6_30")]
    Nema6_30,
    #[serde(rename = "NEMA_6_50")]
    Nema6_50,
    #[serde(rename = "NEMA_10_30")]
    Nema10_30,
    #[serde(rename = "NEMA_10_50")]
    Nema10_50,
    #[serde(rename = "NEMA_14_30")]
    Nema14_30,
    #[serde(rename = "NEMA_14_50")]
    Nema14_50,
    #[serde(rename = "PANTOGRAPH_BOTTOM_UP")]
    PantographBottomUp,
    #[serde(rename = "PANTOGRAPH_TOP_DOWN")]
    PantographTopDown,
    #[serde(rename = "TESLA_R")]
    TeslaR,
    #[serde(rename = "TESLA_S")]
    TeslaS,
}

impl ConnectorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Chademo => "CHADEMO",
            Self::Chaoji => "CHAOJI",
            Self::DomesticA => "DOMESTIC_A",
            Self::DomesticB => "DOMESTIC_B",
            Self::DomesticC => "DOMESTIC_C",
            Self::DomesticD => "DOMESTIC_D",
            Self::DomesticE => "DOMESTIC_E",
            Self::DomesticF => "DOMESTIC_F",
            Self::DomesticG => "DOMESTIC_G",
            Self::DomesticH => "DOMESTIC_H",
            Self::DomesticI => "DOMESTIC_I",
            Self::DomesticJ => "DOMESTIC_J",
            Self::DomesticK => "DOMESTIC_K",
            Self::DomesticL => "DOMESTIC_L",
            Self::DomesticM => "DOMESTIC_M",
            Self::DomesticN => "DOMESTIC_N",
            Self::DomesticO => "DOMESTIC_O",
            Self::GbtAc => "GBT_AC",
            Self::GbtDc => "GBT_DC",
            Self::Iec60309_2Single16 => "IEC_60309_2_single_16",
            Self::Iec60309_2Three16 => "IEC_60309_2_three_16",
            Self::Iec60309_2Three32 => "IEC_60309_2_three_32",
            Self::Iec60309_2Three64 => "IEC_60309_2_three_64",
            Self::Iec62196T1 => "IEC_62196_T1",
            Self::Iec62196T1Combo => "IEC_62196_T1_COMBO",
            Self::Iec62196T2 => "IEC_62196_T2",
            Self::Iec62196T2Combo => "IEC_62196_T2_COMBO",
            Self::Iec62196T3A => "IEC_62196_T3A",
            Self::Iec62196T3C => "IEC_62196_T3C",
            Self::Nema5_20 => "NEMA_5_20",
            Self::Nema6_30 => "NEMA_6_30",
            Self::Nema6_50 => "NEMA_6_50",
            Self::Nema10_30 => "NEMA_10_30",
            Self::Nema10_50 => "NEMA_10_50",
            Self::Nema14_30 => "NEMA_14_30",
            Self::Nema14_50 => "NEMA_14_50",
            Self::PantographBottomUp => "PANTOGRAPH_BOTTOM_UP",
            Self::PantographTopDown => "PANTOGRAPH_TOP_DOWN",
            Self::TeslaR => "TESLA_R",
            Self::TeslaS => "TESLA_S",
        }
    }

    /// Whether the standard carries DC power.
    pub fn is_dc(&self) -> bool {
        matches!(
            self,
            Self::Chademo
                | Self::Chaoji
                | Self::GbtDc
                | Self::Iec62196T1Combo
                | Self::Iec62196T2Combo
                | Self::PantographBottomUp
                | Self::PantographTopDown
        )
    }
}

impl fmt::Display for ConnectorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ConnectorFormat {
    /// The EV driver brings a cable.
    Socket,
    /// The cable is attached to the charger.
    Cable,
}

impl ConnectorFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Socket => "SOCKET",
            Self::Cable => "CABLE",
        }
    }
}

impl fmt::Display for ConnectorFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PowerType {
    #[serde(rename = "AC_1_PHASE")]
    Ac1Phase,
    #[serde(rename = "AC_2_PHASE")]
    Ac2Phase,
    #[serde(rename = "AC_2_PHASE_SPLIT")]
    Ac2PhaseSplit,
    #[serde(rename = "AC_3_PHASE")]
    Ac3Phase,
    #[serde(rename = "DC")]
    Dc,
}

impl PowerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ac1Phase => "AC_1_PHASE",
            Self::Ac2Phase => "AC_2_PHASE",
            Self::Ac2PhaseSplit => "AC_2_PHASE_SPLIT",
            Self::Ac3Phase => "AC_3_PHASE",
            Self::Dc => "DC",
        }
    }
}

impl fmt::Display for PowerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of the location, EVSE and connector a CDR was created for.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(try_from = "CdrLocationWire")]
pub struct CdrLocation {
    #[validate(length(max = 36, message = "must be at most 36 characters"))]
    id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 255, message = "must be at most 255 characters"))]
    name: Option<String>,
    #[validate(length(max = 45, message = "must be at most 45 characters"))]
    address: String,
    #[validate(length(max = 45, message = "must be at most 45 characters"))]
    city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 10, message = "must be at most 10 characters"))]
    postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 20, message = "must be at most 20 characters"))]
    state: Option<String>,
    /// ISO 3166-1 alpha-3 code.
    #[validate(length(equal = 3, message = "must be a three letter country code"))]
    country: String,
    coordinates: GeoCoordinate,
    #[validate(length(max = 36, message = "must be at most 36 characters"))]
    evse_uid: String,
    #[validate(length(max = 48, message = "must be at most 48 characters"))]
    evse_id: String,
    #[validate(length(max = 36, message = "must be at most 36 characters"))]
    connector_id: String,
    connector_standard: ConnectorType,
    connector_format: ConnectorFormat,
    connector_power_type: PowerType,
}

#[derive(Deserialize)]
struct CdrLocationWire {
    id: String,
    name: Option<String>,
    address: String,
    city: String,
    postal_code: Option<String>,
    state: Option<String>,
    country: String,
    coordinates: GeoCoordinate,
    evse_uid: String,
    evse_id: String,
    connector_id: String,
    connector_standard: ConnectorType,
    connector_format: ConnectorFormat,
    connector_power_type: PowerType,
}

impl CdrLocation {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        address: impl Into<String>,
        city: impl Into<String>,
        country: impl Into<String>,
        coordinates: GeoCoordinate,
        evse_uid: impl Into<String>,
        evse_id: impl Into<String>,
        connector_id: impl Into<String>,
        connector_standard: ConnectorType,
        connector_format: ConnectorFormat,
        connector_power_type: PowerType,
    ) -> Result<Self, OcpiError> {
        let location = Self {
            id: required_text("id", id)?,
            name: None,
            address: required_text("address", address)?,
            city: required_text("city", city)?,
            postal_code: None,
            state: None,
            country: required_text("country", country)?.to_ascii_uppercase(),
            coordinates,
            evse_uid: required_text("evse_uid", evse_uid)?,
            evse_id: required_text("evse_id", evse_id)?,
            connector_id: required_text("connector_id", connector_id)?,
            connector_standard,
            connector_format,
            connector_power_type,
        };
        check(&location)?;
        Ok(location)
    }

    pub fn with_name(mut self, name: Option<String>) -> Result<Self, OcpiError> {
        self.name = optional_text(name);
        check(&self)?;
        Ok(self)
    }

    pub fn with_postal_code(mut self, postal_code: Option<String>) -> Result<Self, OcpiError> {
        self.postal_code = optional_text(postal_code);
        check(&self)?;
        Ok(self)
    }

    pub fn with_state(mut self, state: Option<String>) -> Result<Self, OcpiError> {
        self.state = optional_text(state);
        check(&self)?;
        Ok(self)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn postal_code(&self) -> Option<&str> {
        self.postal_code.as_deref()
    }

    pub fn state(&self) -> Option<&str> {
        self.state.as_deref()
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn coordinates(&self) -> &GeoCoordinate {
        &self.coordinates
    }

    pub fn evse_uid(&self) -> &str {
        &self.evse_uid
    }

    pub fn evse_id(&self) -> &str {
        &self.evse_id
    }

    pub fn connector_id(&self) -> &str {
        &self.connector_id
    }

    pub fn connector_standard(&self) -> ConnectorType {
        self.connector_standard
    }

    pub fn connector_format(&self) -> ConnectorFormat {
        self.connector_format
    }

    pub fn connector_power_type(&self) -> PowerType {
        self.connector_power_type
    }
}

impl TryFrom<CdrLocationWire> for CdrLocation {
    type Error = OcpiError;

    fn try_from(wire: CdrLocationWire) -> Result<Self, Self::Error> {
        Self::new(
            wire.id,
            wire.address,
            wire.city,
            wire.country,
            wire.coordinates,
            wire.evse_uid,
            wire.evse_id,
            wire.connector_id,
            wire.connector_standard,
            wire.connector_format,
            wire.connector_power_type,
        )?
        .with_name(wire.name)?
        .with_postal_code(wire.postal_code)?
        .with_state(wire.state)
    }
}

impl OcpiObject for CdrLocation {
    const KIND: &'static str = "CDR location";

    fn rewrite_nested(
        &self,
        json: &mut Map<String, Value>,
        hooks: &SerializerHooks,
    ) -> Result<(), OcpiError> {
        hooks.rewrite_one(json, "coordinates", Some(&self.coordinates))
    }
}

value_semantics!(CdrLocation {
    id,
    evse_uid,
    connector_id,
    name,
    address,
    city,
    postal_code,
    state,
    country,
    coordinates,
    evse_id,
    connector_standard,
    connector_format,
    connector_power_type
});

impl fmt::Display for CdrLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} / {} / {} ({}, {})",
            self.id, self.evse_uid, self.connector_id, self.address, self.city
        )
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn location_payload() -> serde_json::Value {
        json!({
            "id": "LOC1",
            "name": "Gent Zuid",
            "address": "F.Rooseveltlaan 3A",
            "city": "Gent",
            "postal_code": "9000",
            "country": "BEL",
            "coordinates": {"latitude": "3.72994", "longitude": "51.04759"},
            "evse_uid": "3256",
            "evse_id": "BE*BEC*E041503003",
            "connector_id": "1",
            "connector_standard": "IEC_62196_T2",
            "connector_format": "SOCKET",
            "connector_power_type": "AC_3_PHASE"
        })
    }

    #[test]
    fn parses_cdr_location() {
        let location = CdrLocation::parse(&location_payload()).unwrap();
        assert_eq!(location.id(), "LOC1");
        assert_eq!(location.connector_standard(), ConnectorType::Iec62196T2);
        assert_eq!(location.connector_power_type(), PowerType::Ac3Phase);
        assert!(location.state().is_none());
        assert_eq!(location.to_json().unwrap(), location_payload());
    }

    #[test]
    fn every_mandatory_field_is_required() {
        for field in [
            "id",
            "address",
            "city",
            "country",
            "coordinates",
            "evse_uid",
            "evse_id",
            "connector_id",
            "connector_standard",
            "connector_format",
            "connector_power_type",
        ] {
            let mut payload = location_payload();
            payload.as_object_mut().unwrap().remove(field);
            let err = CdrLocation::parse(&payload).unwrap_err();
            assert!(err.to_string().contains(field), "{field}: {err}");
        }
    }

    #[test]
    fn rejects_two_letter_country() {
        let mut payload = location_payload();
        payload["country"] = json!("BE");
        let err = CdrLocation::parse(&payload).unwrap_err();
        assert!(err.to_string().contains("country"));
    }

    #[test]
    fn connector_vocabulary_keeps_mixed_case_names() {
        let mut payload = location_payload();
        payload["connector_standard"] = json!("IEC_60309_2_three_32");
        let location = CdrLocation::parse(&payload).unwrap();
        assert_eq!(location.connector_standard(), ConnectorType::Iec60309_2Three32);
        assert_eq!(
            location.to_json().unwrap()["connector_standard"],
            json!("IEC_60309_2_three_32")
        );
    }

    #[test]
    fn invalid_coordinates_are_rejected() {
        let mut payload = location_payload();
        payload["coordinates"]["latitude"] = json!("91.0");
        assert!(CdrLocation::parse(&payload).is_err());
    }

    #[test]
    fn hooks_reach_coordinates() {
        let location = CdrLocation::parse(&location_payload()).unwrap();
        let hooks = SerializerHooks::new().with::<GeoCoordinate, _>(|coordinate, mut json| {
            json["display"] = json!(coordinate.to_string());
            json
        });
        let json = location.to_json_with(&hooks).unwrap();
        assert_eq!(json["coordinates"]["display"], json!("3.72994, 51.04759"));
    }

    #[test]
    fn dc_connectors() {
        assert!(ConnectorType::Iec62196T2Combo.is_dc());
        assert!(!ConnectorType::DomesticF.is_dc());
    }
}
