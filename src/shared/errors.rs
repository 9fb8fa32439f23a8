use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OcpiError {
    /// A constructor argument broke one of the object's invariants.
    #[error("invalid {field}: {message}")]
    InvalidArgument {
        field: &'static str,
        message: String,
    },

    /// The JSON payload could not be turned into the requested object.
    #[error("invalid {kind} JSON: {message}")]
    Parse { kind: &'static str, message: String },

    #[error("{0} payload must be a JSON object")]
    InvalidPayloadType(&'static str),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("unknown OCPI object kind: {0}")]
    UnknownKind(String),
}

impl OcpiError {
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field,
            message: message.into(),
        }
    }

    pub fn parse<E: std::fmt::Display>(kind: &'static str, error: E) -> Self {
        Self::Parse {
            kind,
            message: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for OcpiError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization(error.to_string())
    }
}

pub type OcpiResult<T> = Result<T, OcpiError>;
