//! Objects embedded in OCPI charge detail records.

pub mod cdr_location;
pub mod cdr_token;
pub mod charging_period;
pub mod signed_data;

pub use cdr_location::{CdrLocation, ConnectorFormat, ConnectorType, PowerType};
pub use cdr_token::{CdrToken, TokenType};
pub use charging_period::{CdrDimension, CdrDimensionType, ChargingPeriod};
pub use signed_data::{SignedData, SignedValue};
