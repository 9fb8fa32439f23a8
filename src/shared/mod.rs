pub mod collections;
pub mod errors;
pub mod hooks;
pub mod object;
pub mod semantics;
pub mod time;
pub mod validations;

pub use errors::*;
pub use hooks::SerializerHooks;
pub use object::OcpiObject;
pub use time::{TimeOfDay, Timestamp};
