//! The parse/serialize contract shared by every OCPI object.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use super::errors::OcpiError;
use super::hooks::SerializerHooks;

/// An OCPI JSON object with a validated Rust representation.
///
/// Implementors derive `Serialize`/`Deserialize` through a wire struct whose
/// conversion runs the type's constructor, so anything produced by
/// [`OcpiObject::parse`] satisfies the same invariants as a value built in code.
pub trait OcpiObject: Serialize + DeserializeOwned + 'static {
    /// Human readable name used in error messages.
    const KIND: &'static str;

    /// Re-serializes nested OCPI objects so their custom serializers run.
    ///
    /// Only called when `hooks` is not empty.
    fn rewrite_nested(
        &self,
        _json: &mut Map<String, Value>,
        _hooks: &SerializerHooks,
    ) -> Result<(), OcpiError> {
        Ok(())
    }

    fn parse(payload: &Value) -> Result<Self, OcpiError> {
        if !payload.is_object() {
            return Err(OcpiError::InvalidPayloadType(Self::KIND));
        }
        Self::deserialize(payload).map_err(|err| OcpiError::parse(Self::KIND, err))
    }

    /// Parses `payload`, then hands the result and the raw payload to `custom`,
    /// which may return a modified or replacement value.
    fn parse_with<F>(payload: &Value, custom: F) -> Result<Self, OcpiError>
    where
        F: FnOnce(&Value, Self) -> Self,
    {
        let parsed = Self::parse(payload)?;
        Ok(custom(payload, parsed))
    }

    fn parse_str(text: &str) -> Result<Self, OcpiError> {
        let payload: Value =
            serde_json::from_str(text).map_err(|err| OcpiError::parse(Self::KIND, err))?;
        Self::parse(&payload)
    }

    fn to_json(&self) -> Result<Value, OcpiError> {
        Ok(serde_json::to_value(self)?)
    }

    fn to_json_with(&self, hooks: &SerializerHooks) -> Result<Value, OcpiError> {
        let mut json = self.to_json()?;
        if hooks.is_empty() {
            return Ok(json);
        }
        if let Value::Object(map) = &mut json {
            self.rewrite_nested(map, hooks)?;
        }
        Ok(hooks.apply(self, json))
    }
}
