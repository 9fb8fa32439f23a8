//! Name-based dispatch over every OCPI object type.
//!
//! Used where the type of a payload is only known at runtime, e.g. from a
//! command line argument.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;
use tracing::debug;

use super::cdrs::{CdrDimension, CdrLocation, CdrToken, ChargingPeriod, SignedData, SignedValue};
use super::charging_profiles::{ChargingProfile, ChargingProfilePeriod};
use super::commons::{AdditionalGeoLocation, BusinessDetails, DisplayText, GeoCoordinate, Image, Price};
use super::credentials::{Credentials, CredentialsRole};
use super::locations::{
    EnergyMeter, EnergyMix, EnergySource, EnvironmentalImpact, ExceptionalPeriod, Hours,
    RegularHours, StatusSchedule, TransparencySoftware,
};
use super::versions::{Version, VersionDetail, VersionEndpoint};
use crate::shared::{OcpiError, OcpiObject, SerializerHooks};

macro_rules! object_kinds {
    ($($variant:ident => $name:literal),* $(,)?) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum ObjectKind {
            $($variant,)*
        }

        impl ObjectKind {
            pub const ALL: &'static [ObjectKind] = &[$(Self::$variant,)*];

            /// Snake case name, e.g. `business_details`.
            pub fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)*
                }
            }

            /// Parses `payload` as this kind and serializes it back.
            pub fn normalize_with(
                &self,
                payload: &Value,
                hooks: &SerializerHooks,
            ) -> Result<Value, OcpiError> {
                match self {
                    $(Self::$variant => $variant::parse(payload)?.to_json_with(hooks),)*
                }
            }
        }
    };
}

object_kinds! {
    AdditionalGeoLocation => "additional_geo_location",
    BusinessDetails => "business_details",
    CdrDimension => "cdr_dimension",
    CdrLocation => "cdr_location",
    CdrToken => "cdr_token",
    ChargingPeriod => "charging_period",
    ChargingProfile => "charging_profile",
    ChargingProfilePeriod => "charging_profile_period",
    Credentials => "credentials",
    CredentialsRole => "credentials_role",
    DisplayText => "display_text",
    EnergyMeter => "energy_meter",
    EnergyMix => "energy_mix",
    EnergySource => "energy_source",
    EnvironmentalImpact => "environmental_impact",
    ExceptionalPeriod => "exceptional_period",
    GeoCoordinate => "geo_coordinate",
    Hours => "hours",
    Image => "image",
    Price => "price",
    RegularHours => "regular_hours",
    SignedData => "signed_data",
    SignedValue => "signed_value",
    StatusSchedule => "status_schedule",
    TransparencySoftware => "transparency_software",
    Version => "version",
    VersionDetail => "version_detail",
    VersionEndpoint => "version_endpoint",
}

impl ObjectKind {
    /// Looks a kind up by name; case and `-`/`_` are not significant.
    pub fn from_name(name: &str) -> Result<Self, OcpiError> {
        let wanted = name.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| OcpiError::UnknownKind(name.to_string()))
    }

    pub fn normalize(&self, payload: &Value) -> Result<Value, OcpiError> {
        debug!(kind = self.name(), "normalizing payload");
        self.normalize_with(payload, &SerializerHooks::new())
    }
}

impl FromStr for ObjectKind {
    type Err = OcpiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn names_are_unique_and_resolve() {
        for kind in ObjectKind::ALL {
            assert_eq!(ObjectKind::from_name(kind.name()).unwrap(), *kind);
        }
        let mut names: Vec<&str> = ObjectKind::ALL.iter().map(ObjectKind::name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), ObjectKind::ALL.len());
    }

    #[test]
    fn lookup_is_lenient_about_case_and_dashes() {
        assert_eq!(
            "Business-Details".parse::<ObjectKind>().unwrap(),
            ObjectKind::BusinessDetails
        );
    }

    #[test]
    fn unknown_kind_is_reported() {
        assert_eq!(
            ObjectKind::from_name("tariff").unwrap_err(),
            OcpiError::UnknownKind("tariff".to_string())
        );
    }

    #[test]
    fn normalizes_payload() {
        let normalized = ObjectKind::Hours
            .normalize(&json!({
                "twentyfourseven": false,
                "regular_hours": [
                    {"weekday": 1, "period_begin": "08:00", "period_end": "18:00"},
                    {"weekday": 1, "period_begin": "08:00", "period_end": "18:00"}
                ],
                "exceptional_openings": null
            }))
            .unwrap();
        assert_eq!(
            normalized,
            json!({
                "twentyfourseven": false,
                "regular_hours": [{"weekday": 1, "period_begin": "08:00", "period_end": "18:00"}]
            })
        );
    }

    #[test]
    fn normalize_reports_parse_errors() {
        let err = ObjectKind::ChargingPeriod
            .normalize(&json!({"start_date_time": "2015-06-29T21:39:09Z"}))
            .unwrap_err();
        assert!(err.to_string().contains("dimensions"));
    }
}
