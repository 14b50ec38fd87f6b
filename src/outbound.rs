//! Outbound parameter interception.
//!
//! Before a wrapped method hands its arguments to the underlying operation,
//! each intercepted parameter is cloned, run through the applicable send
//! transform, then through the interceptor chain's `send` hooks, and the
//! transformed clone is substituted for the original argument. The caller's
//! original value is never mutated. Non-intercepted parameters pass through
//! untouched.
//!
//! Transform priority per parameter: an explicit transform declared at the
//! wrap site, else a backup registered on the owning component for that
//! method and parameter index, else the parameter type's own `on_send` hook
//! (applied per element when the parameter is a sequence), else identity.

use crate::error::CastError;
use crate::model::{Model, TypeProvider};
use crate::pipeline::CastPipeline;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// A standalone send transform over a cloned argument value.
pub type SendTransform = Arc<dyn Fn(Value) -> Value + Send + Sync>;

/// Per-component backup transforms, keyed by method name and parameter
/// index. The component-level analog of declaring a transform at every wrap
/// site.
#[derive(Clone, Default)]
pub struct SendRegistry {
    backups: HashMap<String, HashMap<usize, SendTransform>>,
}

impl SendRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        mut self,
        method: impl Into<String>,
        index: usize,
        transform: SendTransform,
    ) -> Self {
        self.backups
            .entry(method.into())
            .or_default()
            .insert(index, transform);
        self
    }

    pub fn get(&self, method: &str, index: usize) -> Option<&SendTransform> {
        self.backups.get(method).and_then(|params| params.get(&index))
    }
}

/// Declares one intercepted parameter of a wrapped method.
pub struct ParamSpec {
    index: usize,
    transform: Option<SendTransform>,
    blueprint: Option<TypeProvider>,
}

impl ParamSpec {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            transform: None,
            blueprint: None,
        }
    }

    /// Explicit transform for this parameter; wins over every other source.
    pub fn transform(mut self, transform: SendTransform) -> Self {
        self.transform = Some(transform);
        self
    }

    /// The parameter's declared model type, consulted for its `on_send`
    /// hook when no explicit or backup transform applies.
    pub fn blueprint(mut self, provider: TypeProvider) -> Self {
        self.blueprint = Some(provider);
        self
    }
}

impl CastPipeline {
    /// Clones one typed argument, runs its `on_send` hook and the chain's
    /// `send`, and returns the value to substitute. The original is left
    /// untouched.
    pub fn send_model<T: Model>(&self, model: &T) -> Result<Value, CastError> {
        let outbound = model.clone().on_send();
        let mut value = serde_json::to_value(outbound)?;
        self.interceptors().send(&mut value);
        Ok(value)
    }

    /// Sequence counterpart of [`CastPipeline::send_model`]: every element
    /// is cloned, hooked, and chained independently, order preserved.
    pub fn send_models<T: Model>(&self, models: &[T]) -> Result<Value, CastError> {
        let mut out = Vec::with_capacity(models.len());
        for model in models {
            out.push(self.send_model(model)?);
        }
        Ok(Value::Array(out))
    }

    /// Intercepts a full argument list ahead of method delegation.
    ///
    /// Arguments named by a [`ParamSpec`] are cloned and transformed;
    /// everything else is forwarded as-is.
    pub fn intercept_args(
        &self,
        method: &str,
        specs: &[ParamSpec],
        backups: Option<&SendRegistry>,
        args: &[Value],
    ) -> Vec<Value> {
        let mut out: Vec<Value> = args.to_vec();
        for spec in specs {
            let Some(slot) = out.get_mut(spec.index) else {
                continue;
            };
            let backup = backups.and_then(|registry| registry.get(method, spec.index));
            self.intercept_one(slot, spec, backup);
        }
        out
    }

    fn intercept_one(&self, slot: &mut Value, spec: &ParamSpec, backup: Option<&SendTransform>) {
        match slot {
            Value::Array(items) => {
                for item in items.iter_mut() {
                    apply_transform(item, spec, backup);
                    self.interceptors().send(item);
                }
            }
            single => {
                apply_transform(single, spec, backup);
                self.interceptors().send(single);
            }
        }
    }
}

fn apply_transform(slot: &mut Value, spec: &ParamSpec, backup: Option<&SendTransform>) {
    if let Some(transform) = &spec.transform {
        *slot = transform(slot.take());
    } else if let Some(transform) = backup {
        *slot = transform(slot.take());
    } else if let Some(provider) = &spec.blueprint {
        provider().send_in_place(slot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interceptor::{Interceptor, InterceptorChain};
    use crate::model::provider;
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct Draft {
        title: String,
        #[serde(default)]
        outbound: bool,
    }

    impl Model for Draft {
        fn on_send(mut self) -> Self {
            self.outbound = true;
            self
        }
    }

    struct MarkSent;

    impl Interceptor for MarkSent {
        fn send(&self, model: &mut Value) {
            if let Value::Object(map) = model {
                map.insert("chained".into(), json!(true));
            }
        }
    }

    fn pipeline_with_chain() -> CastPipeline {
        let mut chain = InterceptorChain::new();
        chain.register(vec![Arc::new(MarkSent) as Arc<dyn Interceptor>]);
        CastPipeline::with_interceptors(Arc::new(chain))
    }

    #[test]
    fn test_send_model_does_not_mutate_original() {
        let pipeline = CastPipeline::new();
        let original = Draft {
            title: "keep me".into(),
            outbound: false,
        };

        let sent = pipeline.send_model(&original).unwrap();

        assert_eq!(sent, json!({"title": "keep me", "outbound": true}));
        assert!(!original.outbound);
    }

    #[test]
    fn test_send_models_hooks_each_element() {
        let pipeline = pipeline_with_chain();
        let drafts = vec![
            Draft {
                title: "a".into(),
                outbound: false,
            },
            Draft {
                title: "b".into(),
                outbound: false,
            },
        ];

        let sent = pipeline.send_models(&drafts).unwrap();
        assert_eq!(
            sent,
            json!([
                {"title": "a", "outbound": true, "chained": true},
                {"title": "b", "outbound": true, "chained": true}
            ])
        );
    }

    #[test]
    fn test_explicit_transform_wins_over_backup_and_hook() {
        let pipeline = CastPipeline::new();
        let backups = SendRegistry::new().register(
            "save",
            0,
            Arc::new(|mut value: Value| {
                value["source"] = json!("backup");
                value
            }),
        );
        let specs = [ParamSpec::new(0)
            .transform(Arc::new(|mut value: Value| {
                value["source"] = json!("explicit");
                value
            }))
            .blueprint(provider::<Draft>())];

        let out = pipeline.intercept_args("save", &specs, Some(&backups), &[json!({"title": "x"})]);
        assert_eq!(out[0]["source"], json!("explicit"));
        // the type's own hook did not run
        assert!(out[0].get("outbound").is_none());
    }

    #[test]
    fn test_backup_wins_over_own_hook() {
        let pipeline = CastPipeline::new();
        let backups = SendRegistry::new().register(
            "save",
            0,
            Arc::new(|mut value: Value| {
                value["source"] = json!("backup");
                value
            }),
        );
        let specs = [ParamSpec::new(0).blueprint(provider::<Draft>())];

        let out = pipeline.intercept_args("save", &specs, Some(&backups), &[json!({"title": "x"})]);
        assert_eq!(out[0]["source"], json!("backup"));
        assert!(out[0].get("outbound").is_none());
    }

    #[test]
    fn test_own_hook_applies_per_element_of_sequences() {
        let pipeline = CastPipeline::new();
        let specs = [ParamSpec::new(0).blueprint(provider::<Draft>())];

        let out = pipeline.intercept_args(
            "save",
            &specs,
            None,
            &[json!([{"title": "a"}, {"title": "b"}])],
        );
        assert_eq!(
            out[0],
            json!([
                {"title": "a", "outbound": true},
                {"title": "b", "outbound": true}
            ])
        );
    }

    #[test]
    fn test_unlisted_parameters_pass_through_untouched() {
        let pipeline = pipeline_with_chain();
        let specs = [ParamSpec::new(1).blueprint(provider::<Draft>())];
        let args = [json!({"title": "plain"}), json!({"title": "hooked"})];

        let out = pipeline.intercept_args("save", &specs, None, &args);
        assert_eq!(out[0], json!({"title": "plain"}));
        assert_eq!(
            out[1],
            json!({"title": "hooked", "outbound": true, "chained": true})
        );
    }

    #[test]
    fn test_identity_when_nothing_applies() {
        let pipeline = CastPipeline::new();
        let specs = [ParamSpec::new(0)];
        let out = pipeline.intercept_args("save", &specs, None, &[json!({"title": "x"})]);
        assert_eq!(out[0], json!({"title": "x"}));
    }
}
