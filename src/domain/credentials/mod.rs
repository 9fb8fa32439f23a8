pub mod model;

pub use model::{Credentials, CredentialsRole, Role};
