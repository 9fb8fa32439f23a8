//! OCPI 2.2 objects, grouped by the module that defines them.

pub mod cdrs;
pub mod charging_profiles;
pub mod commons;
pub mod credentials;
pub mod kind;
pub mod locations;
pub mod versions;

pub use kind::ObjectKind;
