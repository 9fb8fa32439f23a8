use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::shared::semantics::value_semantics;
use crate::shared::validations::{check, required_text};
use crate::shared::{OcpiError, OcpiObject};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenType {
    /// One-time token, e.g. a payment terminal transaction.
    AdHocUser,
    /// Token generated by an app.
    AppUser,
    Other,
    Rfid,
}

impl TokenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AdHocUser => "AD_HOC_USER",
            Self::AppUser => "APP_USER",
            Self::Other => "OTHER",
            Self::Rfid => "RFID",
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The token a session was authorized with, as recorded in the CDR.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(try_from = "CdrTokenWire")]
pub struct CdrToken {
    #[validate(length(max = 36, message = "must be at most 36 characters"))]
    uid: String,
    #[serde(rename = "type")]
    token_type: TokenType,
    #[validate(length(max = 36, message = "must be at most 36 characters"))]
    contract_id: String,
}

#[derive(Deserialize)]
struct CdrTokenWire {
    uid: String,
    #[serde(rename = "type")]
    token_type: TokenType,
    contract_id: String,
}

impl CdrToken {
    pub fn new(
        uid: impl Into<String>,
        token_type: TokenType,
        contract_id: impl Into<String>,
    ) -> Result<Self, OcpiError> {
        let token = Self {
            uid: required_text("uid", uid)?,
            token_type,
            contract_id: required_text("contract_id", contract_id)?,
        };
        check(&token)?;
        Ok(token)
    }

    pub fn uid(&self) -> &str {
        &self.uid
    }

    pub fn token_type(&self) -> TokenType {
        self.token_type
    }

    pub fn contract_id(&self) -> &str {
        &self.contract_id
    }
}

impl TryFrom<CdrTokenWire> for CdrToken {
    type Error = OcpiError;

    fn try_from(wire: CdrTokenWire) -> Result<Self, Self::Error> {
        Self::new(wire.uid, wire.token_type, wire.contract_id)
    }
}

impl OcpiObject for CdrToken {
    const KIND: &'static str = "CDR token";
}

value_semantics!(CdrToken {
    uid,
    token_type,
    contract_id
});

impl fmt::Display for CdrToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.token_type, self.uid, self.contract_id)
    }
}
