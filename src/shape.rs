//! Path-addressed shape casting.
//!
//! A [`ShapeMap`] marks nested fields of a raw payload for recursive
//! casting: each entry pairs a dotted path with the provider of the type its
//! subtree(s) should be cast to. Entries are evaluated in insertion order
//! and each entry only ever mutates the subtree(s) its path addresses, so
//! unrelated entries never interact. An empty shape map is a no-op.
//!
//! Segment wildcards: `*` addresses every element of a sequence, `{}` every
//! own key of an object.

use crate::model::TypeProvider;
use crate::path::split_shape_path;
use serde_json::Value;

#[derive(Clone, Default)]
pub struct ShapeMap {
    entries: Vec<(String, TypeProvider)>,
}

impl ShapeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a path entry. Insertion order is evaluation order.
    pub fn cast(mut self, path: impl Into<String>, provider: TypeProvider) -> Self {
        self.entries.push((path.into(), provider));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Applies every entry to `model`, in insertion order.
    pub(crate) fn apply(&self, model: &mut Value) {
        for (path, provider) in &self.entries {
            let segments = split_shape_path(path);
            cast_property(model, provider, &segments);
        }
    }
}

impl std::fmt::Debug for ShapeMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|(path, _)| path))
            .finish()
    }
}

/// Whether `node` owns a usable property named `key`. Null-valued properties
/// count as absent, mirroring the truthiness gate of the path language.
fn child_present(node: &Value, key: &str) -> bool {
    node.get(key).map(|child| !child.is_null()).unwrap_or(false)
}

/// Consumes one path segment per call and mutates the addressed subtree(s)
/// in place.
///
/// The four wildcard/property rules below are independent conditions
/// evaluated in sequence, not exclusive branches; precedence follows the
/// evaluation order.
fn cast_property(node: &mut Value, provider: &TypeProvider, segments: &[&str]) {
    let Some((&head, rest)) = segments.split_first() else {
        return;
    };

    // terminal `*`: cast every element of a sequence
    if head == "*" && rest.is_empty() {
        if let Value::Array(items) = node {
            let blueprint = provider();
            for item in items.iter_mut() {
                blueprint.receive_in_place(item);
            }
        }
    }

    // named descent: recurse into an owned property
    if !rest.is_empty() && child_present(node, head) {
        if let Some(child) = node.get_mut(head) {
            cast_property(child, provider, rest);
        }
    }

    // terminal property, or terminal `{}` over every object-valued key
    if rest.is_empty() && (child_present(node, head) || head == "{}") {
        let blueprint = provider();
        if head == "{}" {
            if let Value::Object(map) = node {
                for child in map.values_mut() {
                    if child.is_object() {
                        blueprint.receive_in_place(child);
                    }
                }
            }
        } else if let Some(child) = node.get_mut(head) {
            blueprint.receive_in_place(child);
        }
    }

    // `{}` descent: recurse through every key when the node does not own a
    // property literally named `{}`
    if !rest.is_empty() && head == "{}" && !child_present(node, "{}") {
        match node {
            Value::Object(map) => {
                for child in map.values_mut() {
                    cast_property(child, provider, rest);
                }
            }
            Value::Array(items) => {
                for item in items.iter_mut() {
                    cast_property(item, provider, rest);
                }
            }
            _ => {}
        }
    }

    // `*` descent: recurse into every element of a sequence
    if !rest.is_empty() && head == "*" {
        if let Value::Array(items) = node {
            for item in items.iter_mut() {
                cast_property(item, provider, rest);
            }
        }
    }
}
