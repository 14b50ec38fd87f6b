//! Model types and their casting blueprints.
//!
//! A [`Model`] is any serde-round-trippable type with an optional pair of
//! per-type hooks: `on_receive` runs once per instance right after the
//! instance is rehydrated from a raw payload, `on_send` runs once per
//! instance right before it leaves through an intercepted parameter. Both
//! default to identity and their return value is what flows onward.
//!
//! A [`Blueprint`] is the type-erased conversion descriptor for one model
//! type: rehydrate a raw value through the typed model, run the matching
//! hook, re-encode. Blueprints are handed around lazily as [`TypeProvider`]
//! closures; the provider is invoked once per cast and never cached, which
//! keeps mutually referential shape maps and late-bound registries working.

use crate::error::CastError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

pub trait Model: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Hook run on every freshly cast instance. The return value replaces
    /// the instance.
    fn on_receive(self) -> Self {
        self
    }

    /// Hook run on every outbound clone of an instance. The return value is
    /// what gets sent.
    fn on_send(self) -> Self {
        self
    }
}

type ConvertFn = Arc<dyn Fn(&Value) -> Result<Value, serde_json::Error> + Send + Sync>;

/// Type-erased casting descriptor for one [`Model`] type.
#[derive(Clone)]
pub struct Blueprint {
    name: &'static str,
    receive: ConvertFn,
    send: ConvertFn,
}

impl Blueprint {
    pub fn of<T: Model>() -> Self {
        Self {
            name: std::any::type_name::<T>(),
            receive: Arc::new(|raw: &Value| {
                let typed: T = serde_json::from_value(raw.clone())?;
                serde_json::to_value(typed.on_receive())
            }),
            send: Arc::new(|raw: &Value| {
                let typed: T = serde_json::from_value(raw.clone())?;
                serde_json::to_value(typed.on_send())
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Rehydrates `slot` through the model type and its `on_receive` hook.
    ///
    /// The typed fields are merged back over the raw object, so payload
    /// fields the model does not declare survive the cast. A value that
    /// does not decode into the model type is left untouched; the engine
    /// coerces structurally, it does not reject.
    pub(crate) fn receive_in_place(&self, slot: &mut Value) {
        match (self.receive)(slot) {
            Ok(cast) => merge_cast(slot, cast),
            Err(err) => tracing::debug!("cast miss: model={}, error={}", self.name, err),
        }
    }

    /// Same as [`Blueprint::receive_in_place`] for the outbound direction.
    pub(crate) fn send_in_place(&self, slot: &mut Value) {
        match (self.send)(slot) {
            Ok(cast) => merge_cast(slot, cast),
            Err(err) => tracing::debug!("send miss: model={}, error={}", self.name, err),
        }
    }
}

/// Writes the typed fields of a cast result back into the raw slot,
/// preserving undeclared fields of an object payload.
fn merge_cast(slot: &mut Value, cast: Value) {
    match (slot, cast) {
        (Value::Object(target), Value::Object(fields)) => {
            for (key, value) in fields {
                target.insert(key, value);
            }
        }
        (slot, cast) => *slot = cast,
    }
}

impl fmt::Debug for Blueprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Blueprint").field("name", &self.name).finish()
    }
}

/// Zero-argument blueprint factory, resolved once per cast.
pub type TypeProvider = Arc<dyn Fn() -> Blueprint + Send + Sync>;

/// Builds a [`TypeProvider`] for a model type.
pub fn provider<T: Model>() -> TypeProvider {
    Arc::new(Blueprint::of::<T>)
}

/// Named blueprint lookup on the component issuing a cast.
///
/// A cast configured with a selector string asks the calling component for
/// the provider of that name; a component that does not expose the name
/// resolves to `None` and the cast silently skips type-tagging.
pub trait BlueprintSource {
    fn blueprint(&self, name: &str) -> Option<TypeProvider> {
        let _ = name;
        None
    }
}

/// Decodes a fully cast payload into its model type.
pub fn decode_model<T: Model>(value: Value) -> Result<T, CastError> {
    Ok(serde_json::from_value(value)?)
}

/// Decodes a fully cast collection payload into its model type, element by
/// element.
pub fn decode_models<T: Model>(value: Value) -> Result<Vec<T>, CastError> {
    Ok(serde_json::from_value(value)?)
}
