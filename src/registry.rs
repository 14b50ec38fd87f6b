//! Per-component casting registry.
//!
//! A component that issues many casts registers a [`CastEntry`] per call
//! site (typically the method name) instead of configuring every call
//! inline. The entry carries the target type provider plus optional unwrap
//! path and shape map defaults. The designated fallback key (`"$default"`
//! unless overridden per call) answers for call sites with no entry of
//! their own.

use crate::model::TypeProvider;
use crate::shape::ShapeMap;
use std::collections::HashMap;

#[derive(Clone)]
pub struct CastEntry {
    pub(crate) provider: TypeProvider,
    pub(crate) unwrap: Option<String>,
    pub(crate) shape: Option<ShapeMap>,
}

impl CastEntry {
    pub fn new(provider: TypeProvider) -> Self {
        Self {
            provider,
            unwrap: None,
            shape: None,
        }
    }

    /// Default unwrap path for casts issued from this call site.
    pub fn unwrap_path(mut self, path: impl Into<String>) -> Self {
        self.unwrap = Some(path.into());
        self
    }

    pub fn shape(mut self, shape: ShapeMap) -> Self {
        self.shape = Some(shape);
        self
    }
}

#[derive(Clone, Default)]
pub struct CastRegistry {
    entries: HashMap<String, CastEntry>,
}

impl CastRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the entry for a call-site key. One entry per key; a repeat
    /// registration replaces the earlier one.
    pub fn register(mut self, call_site: impl Into<String>, entry: CastEntry) -> Self {
        self.entries.insert(call_site.into(), entry);
        self
    }

    pub fn get(&self, call_site: &str) -> Option<&CastEntry> {
        self.entries.get(call_site)
    }

    /// Resolves a call site, falling back to the designated fallback key.
    pub fn resolve(&self, call_site: &str, fallback: &str) -> Option<&CastEntry> {
        self.entries
            .get(call_site)
            .or_else(|| self.entries.get(fallback))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{provider, Model};
    use crate::options::DEFAULT_FALLBACK_KEY;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct A {
        #[serde(default)]
        id: u64,
    }
    impl Model for A {}

    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct B {
        #[serde(default)]
        id: u64,
    }
    impl Model for B {}

    #[test]
    fn test_call_site_entry_wins_over_fallback() {
        let registry = CastRegistry::new()
            .register("load", CastEntry::new(provider::<A>()))
            .register(DEFAULT_FALLBACK_KEY, CastEntry::new(provider::<B>()));

        let entry = registry.resolve("load", DEFAULT_FALLBACK_KEY).unwrap();
        assert_eq!((entry.provider)().name(), std::any::type_name::<A>());
    }

    #[test]
    fn test_fallback_answers_for_unknown_call_sites() {
        let registry =
            CastRegistry::new().register(DEFAULT_FALLBACK_KEY, CastEntry::new(provider::<B>()));

        let entry = registry.resolve("unknown", DEFAULT_FALLBACK_KEY).unwrap();
        assert_eq!((entry.provider)().name(), std::any::type_name::<B>());
    }

    #[test]
    fn test_no_entry_and_no_fallback_resolves_to_none() {
        let registry = CastRegistry::new().register("other", CastEntry::new(provider::<A>()));
        assert!(registry.resolve("load", DEFAULT_FALLBACK_KEY).is_none());
    }
}
