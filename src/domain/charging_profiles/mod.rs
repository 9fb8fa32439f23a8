pub mod model;

pub use model::{ChargingProfile, ChargingProfilePeriod, ChargingRateUnit};
