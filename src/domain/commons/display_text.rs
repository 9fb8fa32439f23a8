use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::shared::semantics::value_semantics;
use crate::shared::validations::{check, required_text};
use crate::shared::{OcpiError, OcpiObject};

/// Text in a specific language.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(try_from = "DisplayTextWire")]
pub struct DisplayText {
    #[validate(length(equal = 2, message = "must be an ISO 639-1 language code"))]
    language: String,
    #[validate(length(max = 512, message = "must be at most 512 characters"))]
    text: String,
}

#[derive(Deserialize)]
struct DisplayTextWire {
    language: String,
    text: String,
}

impl DisplayText {
    pub fn new(language: impl Into<String>, text: impl Into<String>) -> Result<Self, OcpiError> {
        let value = Self {
            language: required_text("language", language)?.to_ascii_lowercase(),
            text: required_text("text", text)?,
        };
        check(&value)?;
        Ok(value)
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl TryFrom<DisplayTextWire> for DisplayText {
    type Error = OcpiError;

    fn try_from(wire: DisplayTextWire) -> Result<Self, Self::Error> {
        Self::new(wire.language, wire.text)
    }
}

impl OcpiObject for DisplayText {
    const KIND: &'static str = "display text";
}

value_semantics!(DisplayText { language, text });

impl fmt::Display for DisplayText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.text, self.language)
    }
}
