//! Objects embedded in OCPI `Location`s.

pub mod energy_meter;
pub mod energy_mix;
pub mod hours;
pub mod status_schedule;

pub use energy_meter::{EnergyMeter, TransparencySoftware};
pub use energy_mix::{
    EnergyMix, EnergySource, EnergySourceCategory, EnvironmentalImpact,
    EnvironmentalImpactCategory,
};
pub use hours::{ExceptionalPeriod, Hours, RegularHours};
pub use status_schedule::{Status, StatusSchedule};
