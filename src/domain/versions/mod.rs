pub mod model;

pub use model::{InterfaceRole, ModuleId, Version, VersionDetail, VersionEndpoint, VersionNumber};
