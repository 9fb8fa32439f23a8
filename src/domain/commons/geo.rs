//! Geographic coordinates.
//!
//! OCPI transports coordinates as strings (`"51.047599"`), not JSON numbers.
//! Values are kept as decimals rounded to 7 digits and always written with
//! at least 5 decimals and a `.` separator.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::display_text::DisplayText;
use crate::shared::semantics::value_semantics;
use crate::shared::{OcpiError, OcpiObject, SerializerHooks};

const MIN_DECIMALS: u32 = 5;
const MAX_DECIMALS: u32 = 7;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "GeoCoordinateWire", into = "GeoCoordinateWire")]
pub struct GeoCoordinate {
    latitude: Decimal,
    longitude: Decimal,
}

#[derive(Serialize, Deserialize)]
struct GeoCoordinateWire {
    latitude: String,
    longitude: String,
}

impl GeoCoordinate {
    pub fn new(latitude: Decimal, longitude: Decimal) -> Result<Self, OcpiError> {
        if latitude < Decimal::from(-90) || latitude > Decimal::from(90) {
            return Err(OcpiError::invalid(
                "latitude",
                format!("{latitude} is outside -90..90"),
            ));
        }
        if longitude < Decimal::from(-180) || longitude > Decimal::from(180) {
            return Err(OcpiError::invalid(
                "longitude",
                format!("{longitude} is outside -180..180"),
            ));
        }
        Ok(Self {
            latitude: latitude.round_dp(MAX_DECIMALS),
            longitude: longitude.round_dp(MAX_DECIMALS),
        })
    }

    /// Parses the string representation used on the wire.
    pub fn from_strs(latitude: &str, longitude: &str) -> Result<Self, OcpiError> {
        Self::new(
            parse_degrees("latitude", latitude)?,
            parse_degrees("longitude", longitude)?,
        )
    }

    pub fn latitude(&self) -> Decimal {
        self.latitude
    }

    pub fn longitude(&self) -> Decimal {
        self.longitude
    }
}

fn parse_degrees(field: &'static str, raw: &str) -> Result<Decimal, OcpiError> {
    let normalized = raw.trim().replace(',', ".");
    if normalized.is_empty() {
        return Err(OcpiError::invalid(field, "must not be null or empty"));
    }
    Decimal::from_str(&normalized)
        .map_err(|_| OcpiError::invalid(field, format!("'{raw}' is not a decimal number")))
}

/// Formats degrees as `0.00000##`.
pub fn format_degrees(value: Decimal) -> String {
    let mut rounded = value.round_dp(MAX_DECIMALS).normalize();
    if rounded.scale() < MIN_DECIMALS {
        rounded.rescale(MIN_DECIMALS);
    }
    rounded.to_string()
}

impl TryFrom<GeoCoordinateWire> for GeoCoordinate {
    type Error = OcpiError;

    fn try_from(wire: GeoCoordinateWire) -> Result<Self, Self::Error> {
        Self::from_strs(&wire.latitude, &wire.longitude)
    }
}

impl From<GeoCoordinate> for GeoCoordinateWire {
    fn from(value: GeoCoordinate) -> Self {
        Self {
            latitude: format_degrees(value.latitude),
            longitude: format_degrees(value.longitude),
        }
    }
}

impl OcpiObject for GeoCoordinate {
    const KIND: &'static str = "geo coordinate";
}

value_semantics!(GeoCoordinate { latitude, longitude });

impl fmt::Display for GeoCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}",
            format_degrees(self.latitude),
            format_degrees(self.longitude)
        )
    }
}

/// A named point related to a location, e.g. a parking entrance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "AdditionalGeoLocationWire")]
pub struct AdditionalGeoLocation {
    #[serde(flatten)]
    coordinate: GeoCoordinate,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<DisplayText>,
}

#[derive(Deserialize)]
struct AdditionalGeoLocationWire {
    latitude: String,
    longitude: String,
    name: Option<DisplayText>,
}

impl AdditionalGeoLocation {
    pub fn new(coordinate: GeoCoordinate, name: Option<DisplayText>) -> Self {
        Self { coordinate, name }
    }

    pub fn coordinate(&self) -> &GeoCoordinate {
        &self.coordinate
    }

    pub fn name(&self) -> Option<&DisplayText> {
        self.name.as_ref()
    }
}

impl TryFrom<AdditionalGeoLocationWire> for AdditionalGeoLocation {
    type Error = OcpiError;

    fn try_from(wire: AdditionalGeoLocationWire) -> Result<Self, Self::Error> {
        let coordinate = GeoCoordinate::from_strs(&wire.latitude, &wire.longitude)?;
        Ok(Self::new(coordinate, wire.name))
    }
}

impl OcpiObject for AdditionalGeoLocation {
    const KIND: &'static str = "additional geo location";

    fn rewrite_nested(
        &self,
        json: &mut Map<String, Value>,
        hooks: &SerializerHooks,
    ) -> Result<(), OcpiError> {
        hooks.rewrite_one(json, "name", self.name.as_ref())
    }
}

value_semantics!(AdditionalGeoLocation { coordinate, name });

impl fmt::Display for AdditionalGeoLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} [{}]", name.text(), self.coordinate),
            None => write!(f, "[{}]", self.coordinate),
        }
    }
}
