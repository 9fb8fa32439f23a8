//! Billed sub-intervals of a charging session.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use crate::shared::collections::distinct;
use crate::shared::semantics::value_semantics;
use crate::shared::validations::{amount, check, optional_text, required_list};
use crate::shared::{OcpiError, OcpiObject, SerializerHooks, Timestamp};

/// What a [`CdrDimension`] measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CdrDimensionType {
    /// Average charging current (A).
    Current,
    /// Energy charged (kWh).
    Energy,
    EnergyExport,
    EnergyImport,
    MaxCurrent,
    MinCurrent,
    MaxPower,
    MinPower,
    /// Time not charging (hours).
    ParkingTime,
    /// Average charging power (kW).
    Power,
    ReservationTime,
    StateOfCharge,
    /// Time charging (hours).
    Time,
}

impl CdrDimensionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Current => "CURRENT",
            Self::Energy => "ENERGY",
            Self::EnergyExport => "ENERGY_EXPORT",
            Self::EnergyImport => "ENERGY_IMPORT",
            Self::MaxCurrent => "MAX_CURRENT",
            Self::MinCurrent => "MIN_CURRENT",
            Self::MaxPower => "MAX_POWER",
            Self::MinPower => "MIN_POWER",
            Self::ParkingTime => "PARKING_TIME",
            Self::Power => "POWER",
            Self::ReservationTime => "RESERVATION_TIME",
            Self::StateOfCharge => "STATE_OF_CHARGE",
            Self::Time => "TIME",
        }
    }
}

impl fmt::Display for CdrDimensionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "CdrDimensionWire")]
pub struct CdrDimension {
    #[serde(rename = "type")]
    dimension_type: CdrDimensionType,
    volume: Decimal,
}

#[derive(Deserialize)]
struct CdrDimensionWire {
    #[serde(rename = "type")]
    dimension_type: CdrDimensionType,
    volume: Decimal,
}

impl CdrDimension {
    pub fn new(dimension_type: CdrDimensionType, volume: Decimal) -> Result<Self, OcpiError> {
        Ok(Self {
            dimension_type,
            volume: amount("volume", volume)?,
        })
    }

    pub fn dimension_type(&self) -> CdrDimensionType {
        self.dimension_type
    }

    pub fn volume(&self) -> Decimal {
        self.volume
    }
}

impl TryFrom<CdrDimensionWire> for CdrDimension {
    type Error = OcpiError;

    fn try_from(wire: CdrDimensionWire) -> Result<Self, Self::Error> {
        Self::new(wire.dimension_type, wire.volume)
    }
}

impl OcpiObject for CdrDimension {
    const KIND: &'static str = "CDR dimension";
}

value_semantics!(CdrDimension {
    dimension_type,
    volume
});

impl fmt::Display for CdrDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.dimension_type, self.volume)
    }
}

/// A period of a session with a constant tariff.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(try_from = "ChargingPeriodWire")]
pub struct ChargingPeriod {
    start_date_time: Timestamp,
    dimensions: Vec<CdrDimension>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 36, message = "must be at most 36 characters"))]
    tariff_id: Option<String>,
}

#[derive(Deserialize)]
struct ChargingPeriodWire {
    start_date_time: Timestamp,
    dimensions: Vec<CdrDimension>,
    tariff_id: Option<String>,
}

impl ChargingPeriod {
    pub fn new(
        start_date_time: Timestamp,
        dimensions: impl IntoIterator<Item = CdrDimension>,
        tariff_id: Option<String>,
    ) -> Result<Self, OcpiError> {
        let period = Self {
            start_date_time,
            dimensions: required_list("dimensions", distinct(dimensions))?,
            tariff_id: optional_text(tariff_id),
        };
        check(&period)?;
        Ok(period)
    }

    pub fn start_date_time(&self) -> Timestamp {
        self.start_date_time
    }

    pub fn dimensions(&self) -> &[CdrDimension] {
        &self.dimensions
    }

    pub fn tariff_id(&self) -> Option<&str> {
        self.tariff_id.as_deref()
    }

    /// Volume of the first dimension of the given type.
    pub fn volume_of(&self, dimension_type: CdrDimensionType) -> Option<Decimal> {
        self.dimensions
            .iter()
            .find(|dimension| dimension.dimension_type() == dimension_type)
            .map(CdrDimension::volume)
    }
}

impl TryFrom<ChargingPeriodWire> for ChargingPeriod {
    type Error = OcpiError;

    fn try_from(wire: ChargingPeriodWire) -> Result<Self, Self::Error> {
        Self::new(wire.start_date_time, wire.dimensions, wire.tariff_id)
    }
}

impl OcpiObject for ChargingPeriod {
    const KIND: &'static str = "charging period";

    fn rewrite_nested(
        &self,
        json: &mut Map<String, Value>,
        hooks: &SerializerHooks,
    ) -> Result<(), OcpiError> {
        hooks.rewrite_many(json, "dimensions", &self.dimensions)
    }
}

value_semantics!(ChargingPeriod {
    start_date_time,
    tariff_id
} sets {
    dimensions
});

impl fmt::Display for ChargingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dimensions: Vec<String> = self.dimensions.iter().map(ToString::to_string).collect();
        write!(f, "{} [{}]", self.start_date_time, dimensions.join(", "))?;
        if let Some(tariff_id) = &self.tariff_id {
            write!(f, " tariff {tariff_id}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use serde_json::json;

    use super::*;
    use crate::shared::semantics::hash_of;

    fn period_payload() -> serde_json::Value {
        json!({
            "start_date_time": "2015-06-29T21:39:09Z",
            "dimensions": [
                {"type": "ENERGY", "volume": 120.0},
                {"type": "TIME", "volume": 1.973}
            ],
            "tariff_id": "12"
        })
    }

    #[test]
    fn parses_charging_period() {
        let period = ChargingPeriod::parse(&period_payload()).unwrap();
        assert_eq!(period.dimensions().len(), 2);
        assert_eq!(period.tariff_id(), Some("12"));
        assert_eq!(
            period.volume_of(CdrDimensionType::Time),
            Some(Decimal::from_str("1.973").unwrap())
        );
        assert_eq!(period.volume_of(CdrDimensionType::Power), None);
        assert_eq!(period.to_json().unwrap(), period_payload());
    }

    #[test]
    fn every_mandatory_field_is_required() {
        for field in ["start_date_time", "dimensions"] {
            let mut payload = period_payload();
            payload.as_object_mut().unwrap().remove(field);
            let err = ChargingPeriod::parse(&payload).unwrap_err();
            assert!(err.to_string().contains(field), "{field}: {err}");
        }
        for field in ["type", "volume"] {
            let mut payload = json!({"type": "ENERGY", "volume": 1.5});
            payload.as_object_mut().unwrap().remove(field);
            let err = CdrDimension::parse(&payload).unwrap_err();
            assert!(err.to_string().contains(field), "{field}: {err}");
        }
    }

    #[test]
    fn missing_dimensions_is_named_in_the_error() {
        let mut payload = period_payload();
        payload.as_object_mut().unwrap().remove("dimensions");
        let err = ChargingPeriod::parse(&payload).unwrap_err();
        assert!(err.to_string().contains("dimensions"), "{err}");
    }

    #[test]
    fn empty_dimensions_are_rejected() {
        let err = ChargingPeriod::new("2015-06-29T21:39:09Z".parse().unwrap(), Vec::new(), None)
            .unwrap_err();
        assert_eq!(
            err,
            OcpiError::invalid("dimensions", "must contain at least one element")
        );
    }

    #[test]
    fn duplicate_dimensions_are_removed() {
        let energy = CdrDimension::new(CdrDimensionType::Energy, Decimal::from(10)).unwrap();
        let period = ChargingPeriod::new(
            "2015-06-29T21:39:09Z".parse().unwrap(),
            vec![energy.clone(), energy.clone()],
            None,
        )
        .unwrap();
        assert_eq!(period.dimensions(), &[energy]);
    }

    #[test]
    fn unknown_dimension_type_is_rejected() {
        assert!(CdrDimension::parse(&json!({"type": "energy", "volume": 1})).is_err());
    }

    #[test]
    fn dimension_order_does_not_affect_equality() {
        let mut reordered = period_payload();
        reordered["dimensions"].as_array_mut().unwrap().reverse();
        assert_eq!(
            ChargingPeriod::parse(&period_payload()).unwrap(),
            ChargingPeriod::parse(&reordered).unwrap()
        );
    }

    #[test]
    fn reordered_periods_hash_equal() {
        let mut reordered = period_payload();
        reordered["dimensions"].as_array_mut().unwrap().reverse();
        let a = ChargingPeriod::parse(&period_payload()).unwrap();
        let b = ChargingPeriod::parse(&reordered).unwrap();
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn volume_scale_does_not_affect_equality() {
        let plain = CdrDimension::new(CdrDimensionType::Energy, Decimal::from(2)).unwrap();
        let scaled =
            CdrDimension::new(CdrDimensionType::Energy, Decimal::from_str("2.00").unwrap()).unwrap();
        assert_eq!(plain, scaled);
        assert_eq!(hash_of(&plain), hash_of(&scaled));
    }

    #[test]
    fn precise_volume_survives_json() {
        let dimension = CdrDimension::new(
            CdrDimensionType::Energy,
            Decimal::from_str("12.3456789012345678").unwrap(),
        )
        .unwrap();
        assert_eq!(dimension.volume(), Decimal::from_str("12.345679").unwrap());
        assert_eq!(CdrDimension::parse(&dimension.to_json().unwrap()).unwrap(), dimension);

        let largest = CdrDimension::new(
            CdrDimensionType::Energy,
            Decimal::from_str("999999999.999999").unwrap(),
        )
        .unwrap();
        assert_eq!(CdrDimension::parse(&largest.to_json().unwrap()).unwrap(), largest);
    }

    #[test]
    fn rejects_volume_beyond_json_precision() {
        let err = CdrDimension::new(CdrDimensionType::Energy, Decimal::MAX).unwrap_err();
        assert!(matches!(err, OcpiError::InvalidArgument { field: "volume", .. }));
        assert!(CdrDimension::parse(&json!({"type": "ENERGY", "volume": 7.9e28})).is_err());
    }

    #[test]
    fn rejects_long_tariff_id() {
        let mut payload = period_payload();
        payload["tariff_id"] = json!("t".repeat(37));
        assert!(ChargingPeriod::parse(&payload).is_err());
    }
}
