//! Per-call casting configuration.

use crate::model::TypeProvider;
use crate::shape::ShapeMap;

/// Registry key consulted when a call site has no entry of its own.
pub const DEFAULT_FALLBACK_KEY: &str = "$default";

/// Envelope property the payload is unwrapped from unless a call says
/// otherwise.
pub const DEFAULT_UNWRAP_KEY: &str = "rs";

/// Options attached to a single wrapped call.
///
/// The default carries `fallback = "$default"` and `unwrap = Some("rs")`; a
/// call that wants a registry-registered unwrap path to win must clear the
/// per-call unwrap with [`CastOptions::no_unwrap`].
#[derive(Clone, Debug)]
pub struct CastOptions {
    pub fallback: String,
    pub unwrap: Option<String>,
    pub shape: Option<ShapeMap>,
}

impl Default for CastOptions {
    fn default() -> Self {
        Self {
            fallback: DEFAULT_FALLBACK_KEY.to_string(),
            unwrap: Some(DEFAULT_UNWRAP_KEY.to_string()),
            shape: None,
        }
    }
}

impl CastOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fallback(mut self, key: impl Into<String>) -> Self {
        self.fallback = key.into();
        self
    }

    /// Overrides the unwrap path for this call. Takes precedence over any
    /// unwrap path registered for the call site.
    pub fn unwrap_path(mut self, path: impl Into<String>) -> Self {
        self.unwrap = Some(path.into());
        self
    }

    /// Clears the per-call unwrap so a registered default (if any) applies.
    pub fn no_unwrap(mut self) -> Self {
        self.unwrap = None;
        self
    }

    pub fn shape(mut self, shape: ShapeMap) -> Self {
        self.shape = Some(shape);
        self
    }
}

/// How a wrapped call names its target type.
#[derive(Clone)]
pub enum ModelSelector {
    /// Explicit provider attached at the wrap site.
    Provider(TypeProvider),
    /// Named lookup on the calling component's [`BlueprintSource`]; a miss
    /// skips type-tagging silently.
    ///
    /// [`BlueprintSource`]: crate::model::BlueprintSource
    Named(String),
    /// Consult the component's [`CastRegistry`] for the active call site.
    ///
    /// [`CastRegistry`]: crate::registry::CastRegistry
    Auto,
}
