//! # Texnouz OCPI
//!
//! Value types for the objects exchanged over OCPI 2.2 between charge point
//! operators and e-mobility service providers.
//!
//! ## Architecture
//!
//! - **domain**: OCPI objects grouped by module (credentials, locations, cdrs, ...)
//! - **shared**: Errors, the parse/serialize contract, custom serializer hooks
//! - **config**: TOML configuration for the command line tools
//! - **telemetry**: Tracing subscriber setup
//!
//! ```
//! use serde_json::json;
//! use texnouz_ocpi::domain::commons::BusinessDetails;
//! use texnouz_ocpi::OcpiObject;
//!
//! let details = BusinessDetails::parse(&json!({"name": "ACME Corp"})).unwrap();
//! assert_eq!(details.name(), "ACME Corp");
//! assert_eq!(details.to_json().unwrap(), json!({"name": "ACME Corp"}));
//! ```

pub mod config;
pub mod domain;
pub mod shared;
pub mod telemetry;

pub use config::{default_config_path, AppConfig, ConfigError};
pub use domain::ObjectKind;
pub use shared::{OcpiError, OcpiObject, OcpiResult, SerializerHooks};
pub use telemetry::init_tracing;
