//! Custom serializers for OCPI objects.
//!
//! A [`SerializerHooks`] registry maps an OCPI type to a closure that receives
//! the value and the JSON generated for it, and returns the JSON to emit.
//! Hooks apply at every nesting level, e.g. a hook for `Image` also rewrites
//! the `logo` inside `BusinessDetails`.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;

use serde_json::{Map, Value};

use super::errors::OcpiError;
use super::object::OcpiObject;

type Hook = Box<dyn Fn(&dyn Any, Value) -> Value + Send + Sync>;

#[derive(Default)]
pub struct SerializerHooks {
    hooks: HashMap<TypeId, Hook>,
}

impl SerializerHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the custom serializer for `T`, replacing any previous one.
    pub fn with<T, F>(mut self, hook: F) -> Self
    where
        T: OcpiObject,
        F: Fn(&T, Value) -> Value + Send + Sync + 'static,
    {
        let erased: Hook = Box::new(move |value, json| match value.downcast_ref::<T>() {
            Some(typed) => hook(typed, json),
            None => json,
        });
        self.hooks.insert(TypeId::of::<T>(), erased);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// Runs the hook registered for `T`, if any.
    pub fn apply<T: 'static>(&self, value: &T, json: Value) -> Value {
        match self.hooks.get(&TypeId::of::<T>()) {
            Some(hook) => hook(value as &dyn Any, json),
            None => json,
        }
    }

    /// Replaces `json[key]` with the hooked serialization of `value`.
    ///
    /// Keys omitted by the base serialization stay omitted.
    pub fn rewrite_one<T: OcpiObject>(
        &self,
        json: &mut Map<String, Value>,
        key: &str,
        value: Option<&T>,
    ) -> Result<(), OcpiError> {
        if let (Some(value), Some(slot)) = (value, json.get_mut(key)) {
            *slot = value.to_json_with(self)?;
        }
        Ok(())
    }

    /// Replaces `json[key]` with the hooked serialization of every element.
    pub fn rewrite_many<T: OcpiObject>(
        &self,
        json: &mut Map<String, Value>,
        key: &str,
        values: &[T],
    ) -> Result<(), OcpiError> {
        if let Some(slot) = json.get_mut(key) {
            let items = values
                .iter()
                .map(|value| value.to_json_with(self))
                .collect::<Result<Vec<_>, _>>()?;
            *slot = Value::Array(items);
        }
        Ok(())
    }
}

impl fmt::Debug for SerializerHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerializerHooks")
            .field("hooks", &self.hooks.len())
            .finish()
    }
}
