//! Opening and access hours of a location.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use crate::shared::collections::distinct;
use crate::shared::semantics::value_semantics;
use crate::shared::validations::check;
use crate::shared::{OcpiError, OcpiObject, SerializerHooks, TimeOfDay, Timestamp};

/// Weekly recurring opening period.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(try_from = "RegularHoursWire")]
pub struct RegularHours {
    /// 1 = Monday .. 7 = Sunday.
    #[validate(range(min = 1, max = 7, message = "must be between 1 (Monday) and 7 (Sunday)"))]
    weekday: u8,
    period_begin: TimeOfDay,
    period_end: TimeOfDay,
}

#[derive(Deserialize)]
struct RegularHoursWire {
    weekday: u8,
    period_begin: TimeOfDay,
    period_end: TimeOfDay,
}

impl RegularHours {
    pub fn new(weekday: u8, period_begin: TimeOfDay, period_end: TimeOfDay) -> Result<Self, OcpiError> {
        let hours = Self {
            weekday,
            period_begin,
            period_end,
        };
        check(&hours)?;
        Ok(hours)
    }

    pub fn weekday(&self) -> u8 {
        self.weekday
    }

    pub fn period_begin(&self) -> TimeOfDay {
        self.period_begin
    }

    pub fn period_end(&self) -> TimeOfDay {
        self.period_end
    }
}

impl TryFrom<RegularHoursWire> for RegularHours {
    type Error = OcpiError;

    fn try_from(wire: RegularHoursWire) -> Result<Self, Self::Error> {
        Self::new(wire.weekday, wire.period_begin, wire.period_end)
    }
}

impl OcpiObject for RegularHours {
    const KIND: &'static str = "regular hours";
}

value_semantics!(RegularHours {
    weekday,
    period_begin,
    period_end
});

impl fmt::Display for RegularHours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "day {} {}-{}", self.weekday, self.period_begin, self.period_end)
    }
}

/// A one-off opening or closing period.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "ExceptionalPeriodWire")]
pub struct ExceptionalPeriod {
    period_begin: Timestamp,
    period_end: Timestamp,
}

#[derive(Deserialize)]
struct ExceptionalPeriodWire {
    period_begin: Timestamp,
    period_end: Timestamp,
}

impl ExceptionalPeriod {
    pub fn new(period_begin: Timestamp, period_end: Timestamp) -> Result<Self, OcpiError> {
        if period_end < period_begin {
            return Err(OcpiError::invalid("period_end", "must not be before period_begin"));
        }
        Ok(Self {
            period_begin,
            period_end,
        })
    }

    pub fn period_begin(&self) -> Timestamp {
        self.period_begin
    }

    pub fn period_end(&self) -> Timestamp {
        self.period_end
    }

    pub fn contains(&self, at: Timestamp) -> bool {
        self.period_begin <= at && at < self.period_end
    }
}

impl TryFrom<ExceptionalPeriodWire> for ExceptionalPeriod {
    type Error = OcpiError;

    fn try_from(wire: ExceptionalPeriodWire) -> Result<Self, Self::Error> {
        Self::new(wire.period_begin, wire.period_end)
    }
}

impl OcpiObject for ExceptionalPeriod {
    const KIND: &'static str = "exceptional period";
}

value_semantics!(ExceptionalPeriod {
    period_begin,
    period_end
});

impl fmt::Display for ExceptionalPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.period_begin, self.period_end)
    }
}

/// Opening times of a location.
///
/// A location open 24/7 is expected to carry no regular hours; this is not
/// enforced because partners do send both.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "HoursWire")]
pub struct Hours {
    #[serde(rename = "twentyfourseven")]
    twenty_four_seven: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    regular_hours: Vec<RegularHours>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    exceptional_openings: Vec<ExceptionalPeriod>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    exceptional_closings: Vec<ExceptionalPeriod>,
}

#[derive(Deserialize)]
struct HoursWire {
    #[serde(rename = "twentyfourseven")]
    twenty_four_seven: bool,
    #[serde(default)]
    regular_hours: Option<Vec<RegularHours>>,
    #[serde(default)]
    exceptional_openings: Option<Vec<ExceptionalPeriod>>,
    #[serde(default)]
    exceptional_closings: Option<Vec<ExceptionalPeriod>>,
}

impl Hours {
    pub fn new(
        twenty_four_seven: bool,
        regular_hours: impl IntoIterator<Item = RegularHours>,
        exceptional_openings: impl IntoIterator<Item = ExceptionalPeriod>,
        exceptional_closings: impl IntoIterator<Item = ExceptionalPeriod>,
    ) -> Self {
        Self {
            twenty_four_seven,
            regular_hours: distinct(regular_hours),
            exceptional_openings: distinct(exceptional_openings),
            exceptional_closings: distinct(exceptional_closings),
        }
    }

    pub fn twenty_four_seven() -> Self {
        Self::new(true, Vec::new(), Vec::new(), Vec::new())
    }

    pub fn is_twenty_four_seven(&self) -> bool {
        self.twenty_four_seven
    }

    pub fn regular_hours(&self) -> &[RegularHours] {
        &self.regular_hours
    }

    pub fn exceptional_openings(&self) -> &[ExceptionalPeriod] {
        &self.exceptional_openings
    }

    pub fn exceptional_closings(&self) -> &[ExceptionalPeriod] {
        &self.exceptional_closings
    }
}

impl TryFrom<HoursWire> for Hours {
    type Error = OcpiError;

    fn try_from(wire: HoursWire) -> Result<Self, Self::Error> {
        Ok(Self::new(
            wire.twenty_four_seven,
            wire.regular_hours.unwrap_or_default(),
            wire.exceptional_openings.unwrap_or_default(),
            wire.exceptional_closings.unwrap_or_default(),
        ))
    }
}

impl OcpiObject for Hours {
    const KIND: &'static str = "hours";

    fn rewrite_nested(
        &self,
        json: &mut Map<String, Value>,
        hooks: &SerializerHooks,
    ) -> Result<(), OcpiError> {
        hooks.rewrite_many(json, "regular_hours", &self.regular_hours)?;
        hooks.rewrite_many(json, "exceptional_openings", &self.exceptional_openings)?;
        hooks.rewrite_many(json, "exceptional_closings", &self.exceptional_closings)
    }
}

value_semantics!(Hours { twenty_four_seven } sets {
    regular_hours,
    exceptional_openings,
    exceptional_closings
});

impl fmt::Display for Hours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.twenty_four_seven {
            return f.write_str("24/7");
        }
        write!(
            f,
            "{} regular period(s), {} exceptional opening(s), {} exceptional closing(s)",
            self.regular_hours.len(),
            self.exceptional_openings.len(),
            self.exceptional_closings.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn twenty_four_seven_without_lists() {
        let hours = Hours::parse(&json!({"twentyfourseven": true})).unwrap();
        assert!(hours.is_twenty_four_seven());
        assert!(hours.regular_hours().is_empty());
        assert!(hours.exceptional_openings().is_empty());
        assert!(hours.exceptional_closings().is_empty());
        assert_eq!(hours.to_json().unwrap(), json!({"twentyfourseven": true}));
        assert_eq!(hours, Hours::twenty_four_seven());
    }

    #[test]
    fn every_mandatory_field_is_required() {
        for field in ["weekday", "period_begin", "period_end"] {
            let mut payload = json!({"weekday": 1, "period_begin": "08:00", "period_end": "20:00"});
            payload.as_object_mut().unwrap().remove(field);
            let err = RegularHours::parse(&payload).unwrap_err();
            assert!(err.to_string().contains(field), "{field}: {err}");
        }
        for field in ["period_begin", "period_end"] {
            let mut payload = json!({
                "period_begin": "2014-06-21T09:00:00Z",
                "period_end": "2014-06-21T12:00:00Z"
            });
            payload.as_object_mut().unwrap().remove(field);
            let err = ExceptionalPeriod::parse(&payload).unwrap_err();
            assert!(err.to_string().contains(field), "{field}: {err}");
        }
        let err = Hours::parse(&json!({"regular_hours": []})).unwrap_err();
        assert!(err.to_string().contains("twentyfourseven"), "{err}");
    }

    #[test]
    fn null_lists_are_empty() {
        let hours = Hours::parse(&json!({
            "twentyfourseven": false,
            "regular_hours": null
        }))
        .unwrap();
        assert!(hours.regular_hours().is_empty());
    }

    #[test]
    fn parses_regular_and_exceptional_hours() {
        let payload = json!({
            "twentyfourseven": false,
            "regular_hours": [
                {"weekday": 1, "period_begin": "08:00", "period_end": "20:00"},
                {"weekday": 2, "period_begin": "08:00", "period_end": "20:00"}
            ],
            "exceptional_openings": [
                {"period_begin": "2014-06-21T09:00:00Z", "period_end": "2014-06-21T12:00:00Z"}
            ],
            "exceptional_closings": [
                {"period_begin": "2014-06-24T00:00:00Z", "period_end": "2014-06-25T00:00:00Z"}
            ]
        });
        let hours = Hours::parse(&payload).unwrap();
        assert_eq!(hours.regular_hours().len(), 2);
        assert_eq!(hours.regular_hours()[1].weekday(), 2);
        assert_eq!(hours.to_json().unwrap(), payload);
    }

    #[test]
    fn duplicate_regular_hours_are_removed() {
        let hours = Hours::parse(&json!({
            "twentyfourseven": false,
            "regular_hours": [
                {"weekday": 3, "period_begin": "08:00", "period_end": "20:00"},
                {"weekday": 1, "period_begin": "08:00", "period_end": "20:00"},
                {"weekday": 3, "period_begin": "08:00", "period_end": "20:00"}
            ]
        }))
        .unwrap();
        let days: Vec<u8> = hours.regular_hours().iter().map(|h| h.weekday()).collect();
        assert_eq!(days, vec![3, 1]);
    }

    #[test]
    fn rejects_missing_twentyfourseven() {
        let err = Hours::parse(&json!({"regular_hours": []})).unwrap_err();
        assert!(err.to_string().contains("twentyfourseven"));
    }

    #[test]
    fn rejects_invalid_weekday() {
        let err = Hours::parse(&json!({
            "twentyfourseven": false,
            "regular_hours": [{"weekday": 8, "period_begin": "08:00", "period_end": "20:00"}]
        }))
        .unwrap_err();
        assert!(err.to_string().contains("weekday"));
    }

    #[test]
    fn rejects_invalid_time() {
        assert!(RegularHours::parse(&json!({
            "weekday": 1,
            "period_begin": "8 AM",
            "period_end": "20:00"
        }))
        .is_err());
    }

    #[test]
    fn exceptional_period_must_not_end_before_it_begins() {
        let err = ExceptionalPeriod::parse(&json!({
            "period_begin": "2014-06-25T00:00:00Z",
            "period_end": "2014-06-24T00:00:00Z"
        }))
        .unwrap_err();
        assert!(err.to_string().contains("period_end"));
    }

    #[test]
    fn exceptional_period_contains() {
        let period = ExceptionalPeriod::new(
            "2014-06-24T00:00:00Z".parse().unwrap(),
            "2014-06-25T00:00:00Z".parse().unwrap(),
        )
        .unwrap();
        assert!(period.contains("2014-06-24T12:00:00Z".parse().unwrap()));
        assert!(!period.contains("2014-06-25T00:00:00Z".parse().unwrap()));
    }

    #[test]
    fn custom_serializer_reaches_regular_hours() {
        let hours = Hours::parse(&json!({
            "twentyfourseven": false,
            "regular_hours": [{"weekday": 6, "period_begin": "10:00", "period_end": "14:00"}]
        }))
        .unwrap();
        let hooks = SerializerHooks::new().with::<RegularHours, _>(|hours, mut json| {
            json["weekend"] = json!(hours.weekday() >= 6);
            json
        });
        let json = hours.to_json_with(&hooks).unwrap();
        assert_eq!(json["regular_hours"][0]["weekend"], json!(true));
    }
}
