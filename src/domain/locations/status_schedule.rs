use std::fmt;

use serde::{Deserialize, Serialize};

use crate::shared::semantics::value_semantics;
use crate::shared::{OcpiError, OcpiObject, Timestamp};

/// Availability of an EVSE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Available,
    Blocked,
    Charging,
    Inoperative,
    #[serde(rename = "OUTOFORDER")]
    OutOfOrder,
    Planned,
    Removed,
    Reserved,
    Unknown,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "AVAILABLE",
            Self::Blocked => "BLOCKED",
            Self::Charging => "CHARGING",
            Self::Inoperative => "INOPERATIVE",
            Self::OutOfOrder => "OUTOFORDER",
            Self::Planned => "PLANNED",
            Self::Removed => "REMOVED",
            Self::Reserved => "RESERVED",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Whether a driver could start a session right now.
    pub fn is_usable(&self) -> bool {
        matches!(self, Self::Available)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A planned status change, e.g. maintenance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "StatusScheduleWire")]
pub struct StatusSchedule {
    period_begin: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    period_end: Option<Timestamp>,
    status: Status,
}

#[derive(Deserialize)]
struct StatusScheduleWire {
    period_begin: Timestamp,
    period_end: Option<Timestamp>,
    status: Status,
}

impl StatusSchedule {
    pub fn new(
        period_begin: Timestamp,
        period_end: Option<Timestamp>,
        status: Status,
    ) -> Result<Self, OcpiError> {
        if matches!(period_end, Some(end) if end < period_begin) {
            return Err(OcpiError::invalid("period_end", "must not be before period_begin"));
        }
        Ok(Self {
            period_begin,
            period_end,
            status,
        })
    }

    pub fn period_begin(&self) -> Timestamp {
        self.period_begin
    }

    /// `None` when the end of the period is not known.
    pub fn period_end(&self) -> Option<Timestamp> {
        self.period_end
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_active_at(&self, at: Timestamp) -> bool {
        self.period_begin <= at && self.period_end.map_or(true, |end| at < end)
    }
}

impl TryFrom<StatusScheduleWire> for StatusSchedule {
    type Error = OcpiError;

    fn try_from(wire: StatusScheduleWire) -> Result<Self, Self::Error> {
        Self::new(wire.period_begin, wire.period_end, wire.status)
    }
}

impl OcpiObject for StatusSchedule {
    const KIND: &'static str = "status schedule";
}

value_semantics!(StatusSchedule {
    period_begin,
    period_end,
    status
});

impl fmt::Display for StatusSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.period_end {
            Some(end) => write!(f, "{} from {} until {}", self.status, self.period_begin, end),
            None => write!(f, "{} from {}", self.status, self.period_begin),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn parses_open_ended_schedule() {
        let payload = json!({"period_begin": "2024-03-01T08:00:00Z", "status": "INOPERATIVE"});
        let schedule = StatusSchedule::parse(&payload).unwrap();
        assert_eq!(schedule.status(), Status::Inoperative);
        assert!(schedule.period_end().is_none());
        assert!(schedule.is_active_at("2030-01-01T00:00:00Z".parse().unwrap()));
        assert_eq!(schedule.to_json().unwrap(), payload);
    }

    #[test]
    fn out_of_order_keeps_its_wire_name() {
        let payload = json!({
            "period_begin": "2024-03-01T08:00:00Z",
            "period_end": "2024-03-01T12:00:00Z",
            "status": "OUTOFORDER"
        });
        let schedule = StatusSchedule::parse(&payload).unwrap();
        assert_eq!(schedule.status(), Status::OutOfOrder);
        assert_eq!(schedule.to_json().unwrap()["status"], json!("OUTOFORDER"));
        assert!(!schedule.is_active_at("2024-03-01T12:00:00Z".parse().unwrap()));
    }

    #[test]
    fn every_mandatory_field_is_required() {
        for field in ["period_begin", "status"] {
            let mut payload = json!({"period_begin": "2024-03-01T08:00:00Z", "status": "PLANNED"});
            payload.as_object_mut().unwrap().remove(field);
            let err = StatusSchedule::parse(&payload).unwrap_err();
            assert!(err.to_string().contains(field), "{field}: {err}");
        }
    }

    #[test]
    fn rejects_unknown_status() {
        let err = StatusSchedule::parse(&json!({
            "period_begin": "2024-03-01T08:00:00Z",
            "status": "BROKEN"
        }))
        .unwrap_err();
        assert!(matches!(err, OcpiError::Parse { kind: "status schedule", .. }));
    }

    #[test]
    fn rejects_end_before_begin() {
        assert!(StatusSchedule::new(
            "2024-03-02T00:00:00Z".parse().unwrap(),
            Some("2024-03-01T00:00:00Z".parse().unwrap()),
            Status::Planned,
        )
        .is_err());
    }

    #[test]
    fn only_available_is_usable() {
        assert!(Status::Available.is_usable());
        assert!(!Status::Charging.is_usable());
        assert_eq!(Status::Reserved.to_string(), "RESERVED");
    }
}
