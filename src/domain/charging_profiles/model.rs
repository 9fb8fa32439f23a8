//! Charging profiles sent by a Smart Charging Service Provider.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::shared::collections::distinct;
use crate::shared::semantics::value_semantics;
use crate::shared::validations::amount;
use crate::shared::{OcpiError, OcpiObject, SerializerHooks, Timestamp};

/// Unit of the limits in a charging profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ChargingRateUnit {
    /// Watts (power).
    #[serde(rename = "W")]
    Watts,
    /// Amperes (current).
    #[serde(rename = "A")]
    Amperes,
}

impl ChargingRateUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Watts => "W",
            Self::Amperes => "A",
        }
    }
}

impl fmt::Display for ChargingRateUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A limit that applies from `start_period` seconds after the profile start.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "ChargingProfilePeriodWire")]
pub struct ChargingProfilePeriod {
    start_period: u32,
    limit: Decimal,
}

#[derive(Deserialize)]
struct ChargingProfilePeriodWire {
    start_period: u32,
    limit: Decimal,
}

impl ChargingProfilePeriod {
    pub fn new(start_period: u32, limit: Decimal) -> Result<Self, OcpiError> {
        let limit = amount("limit", limit)?;
        if limit < Decimal::ZERO {
            return Err(OcpiError::invalid("limit", "must not be negative"));
        }
        Ok(Self {
            start_period,
            limit,
        })
    }

    pub fn start_period(&self) -> u32 {
        self.start_period
    }

    pub fn limit(&self) -> Decimal {
        self.limit
    }
}

impl TryFrom<ChargingProfilePeriodWire> for ChargingProfilePeriod {
    type Error = OcpiError;

    fn try_from(wire: ChargingProfilePeriodWire) -> Result<Self, Self::Error> {
        Self::new(wire.start_period, wire.limit)
    }
}

impl OcpiObject for ChargingProfilePeriod {
    const KIND: &'static str = "charging profile period";
}

value_semantics!(ChargingProfilePeriod {
    start_period,
    limit
});

impl fmt::Display for ChargingProfilePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "+{}s: {}", self.start_period, self.limit)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "ChargingProfileWire")]
pub struct ChargingProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    start_date_time: Option<Timestamp>,
    /// Seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    duration: Option<u32>,
    charging_rate_unit: ChargingRateUnit,
    #[serde(skip_serializing_if = "Option::is_none")]
    min_charging_rate: Option<Decimal>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    charging_profile_period: Vec<ChargingProfilePeriod>,
}

#[derive(Deserialize)]
struct ChargingProfileWire {
    start_date_time: Option<Timestamp>,
    duration: Option<u32>,
    charging_rate_unit: ChargingRateUnit,
    min_charging_rate: Option<Decimal>,
    #[serde(default)]
    charging_profile_period: Option<Vec<ChargingProfilePeriod>>,
}

impl ChargingProfile {
    pub fn new(
        charging_rate_unit: ChargingRateUnit,
        start_date_time: Option<Timestamp>,
        duration: Option<u32>,
        min_charging_rate: Option<Decimal>,
        charging_profile_period: impl IntoIterator<Item = ChargingProfilePeriod>,
    ) -> Result<Self, OcpiError> {
        let min_charging_rate = min_charging_rate
            .map(|rate| amount("min_charging_rate", rate))
            .transpose()?;
        if matches!(min_charging_rate, Some(rate) if rate < Decimal::ZERO) {
            return Err(OcpiError::invalid("min_charging_rate", "must not be negative"));
        }
        Ok(Self {
            start_date_time,
            duration,
            charging_rate_unit,
            min_charging_rate,
            charging_profile_period: distinct(charging_profile_period),
        })
    }

    pub fn start_date_time(&self) -> Option<Timestamp> {
        self.start_date_time
    }

    pub fn duration(&self) -> Option<u32> {
        self.duration
    }

    pub fn charging_rate_unit(&self) -> ChargingRateUnit {
        self.charging_rate_unit
    }

    pub fn min_charging_rate(&self) -> Option<Decimal> {
        self.min_charging_rate
    }

    pub fn charging_profile_period(&self) -> &[ChargingProfilePeriod] {
        &self.charging_profile_period
    }

    /// Limit in force `offset` seconds after the start of the profile.
    ///
    /// Returns `None` before the first period and after `duration`.
    pub fn limit_at(&self, offset: u32) -> Option<Decimal> {
        if matches!(self.duration, Some(duration) if offset >= duration) {
            return None;
        }
        self.charging_profile_period
            .iter()
            .filter(|period| period.start_period() <= offset)
            .max_by_key(|period| period.start_period())
            .map(ChargingProfilePeriod::limit)
    }
}

impl TryFrom<ChargingProfileWire> for ChargingProfile {
    type Error = OcpiError;

    fn try_from(wire: ChargingProfileWire) -> Result<Self, Self::Error> {
        Self::new(
            wire.charging_rate_unit,
            wire.start_date_time,
            wire.duration,
            wire.min_charging_rate,
            wire.charging_profile_period.unwrap_or_default(),
        )
    }
}

impl OcpiObject for ChargingProfile {
    const KIND: &'static str = "charging profile";

    fn rewrite_nested(
        &self,
        json: &mut Map<String, Value>,
        hooks: &SerializerHooks,
    ) -> Result<(), OcpiError> {
        hooks.rewrite_many(json, "charging_profile_period", &self.charging_profile_period)
    }
}

value_semantics!(ChargingProfile {
    charging_rate_unit,
    start_date_time,
    duration,
    min_charging_rate
} sets {
    charging_profile_period
});

impl fmt::Display for ChargingProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} period(s) in {}",
            self.charging_profile_period.len(),
            self.charging_rate_unit
        )?;
        if let Some(start) = self.start_date_time {
            write!(f, " from {start}")?;
        }
        if let Some(duration) = self.duration {
            write!(f, " for {duration}s")?;
        }
        Ok(())
    }
}
