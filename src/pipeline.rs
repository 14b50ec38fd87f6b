//! The casting pipeline.
//!
//! [`CastPipeline`] wraps a producer operation and transforms whatever the
//! operation completes with: resolve the target model, unwrap the response
//! envelope, shape-cast nested fields, rehydrate through the model type and
//! its `on_receive` hook, then run the interceptor chain, in that order,
//! once per payload element. The wrapper never changes the timing or
//! cardinality of the underlying operation: an immediate value stays
//! immediate, a deferred value resolves once, a stream yields exactly one
//! output item per emission.
//!
//! Per-call configuration happens on the [`CastBuilder`] returned by
//! [`CastPipeline::cast`]; component-wide defaults live in a
//! [`CastRegistry`] handed to the builder.

use crate::error::CastError;
use crate::interceptor::InterceptorChain;
use crate::model::{BlueprintSource, TypeProvider};
use crate::options::{CastOptions, ModelSelector};
use crate::path::resolve_unwrap;
use crate::registry::CastRegistry;
use crate::shape::ShapeMap;
use crate::stream::{CastStream, CastTryStream};
use futures_util::Stream;
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;

#[derive(Clone, Default)]
pub struct CastPipeline {
    interceptors: Arc<InterceptorChain>,
}

impl CastPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a pipeline around a bootstrap-populated interceptor chain.
    pub fn with_interceptors(chain: Arc<InterceptorChain>) -> Self {
        Self {
            interceptors: chain,
        }
    }

    pub fn interceptors(&self) -> &InterceptorChain {
        &self.interceptors
    }

    pub(crate) fn chain(&self) -> &Arc<InterceptorChain> {
        &self.interceptors
    }

    /// Starts configuring a single wrapped call.
    pub fn cast(&self) -> CastBuilder<'_> {
        CastBuilder {
            pipeline: self,
            selector: ModelSelector::Auto,
            options: CastOptions::default(),
            call_site: None,
            registry: None,
            source: None,
        }
    }
}

/// Per-call wrap-site configuration, mirroring what a decorated operation
/// declares: the model selector, the options, and the component context the
/// call runs in.
pub struct CastBuilder<'a> {
    pipeline: &'a CastPipeline,
    selector: ModelSelector,
    options: CastOptions,
    call_site: Option<String>,
    registry: Option<&'a CastRegistry>,
    source: Option<&'a dyn BlueprintSource>,
}

impl<'a> CastBuilder<'a> {
    /// Explicit target type provider for this call.
    pub fn model(mut self, provider: TypeProvider) -> Self {
        self.selector = ModelSelector::Provider(provider);
        self
    }

    /// Selects the target type by named lookup on the calling component.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.selector = ModelSelector::Named(name.into());
        self
    }

    pub fn options(mut self, options: CastOptions) -> Self {
        self.options = options;
        self
    }

    /// The call-site key this cast runs under, used for registry lookups.
    pub fn call_site(mut self, key: impl Into<String>) -> Self {
        self.call_site = Some(key.into());
        self
    }

    pub fn registry(mut self, registry: &'a CastRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn source(mut self, source: &'a dyn BlueprintSource) -> Self {
        self.source = Some(source);
        self
    }

    /// Resolves the target type, shape map, and unwrap path for this call.
    ///
    /// Unwrap precedence: the per-call option wins over an unwrap path
    /// registered against the exact call-site key (the fallback entry's
    /// unwrap is never consulted). A registry match replaces the options'
    /// shape map outright, even when the entry carries none.
    pub(crate) fn plan(&self) -> CastPlan {
        let call_site = self.call_site.as_deref();
        let registry_entry = match (self.registry, call_site) {
            (Some(registry), Some(key)) => registry.resolve(key, &self.options.fallback),
            _ => None,
        };

        let mut unwrap = self
            .registry
            .zip(call_site)
            .and_then(|(registry, key)| registry.get(key))
            .and_then(|entry| entry.unwrap.clone());
        if let Some(path) = &self.options.unwrap {
            unwrap = Some(path.clone());
        }

        let (provider, shape) = match &self.selector {
            ModelSelector::Provider(provider) => {
                (Some(provider.clone()), self.options.shape.clone())
            }
            ModelSelector::Named(name) => (
                self.source.and_then(|source| source.blueprint(name)),
                self.options.shape.clone(),
            ),
            ModelSelector::Auto => match registry_entry {
                Some(entry) => (Some(entry.provider.clone()), entry.shape.clone()),
                None => (None, self.options.shape.clone()),
            },
        };

        CastPlan {
            chain: self.pipeline.chain().clone(),
            provider,
            shape,
            unwrap,
        }
    }

    /// Wraps an operation that already completed with an immediate value.
    pub fn value(self, raw: Value) -> Result<Value, CastError> {
        self.plan().apply(raw)
    }

    /// Wraps a deferred operation. The producer's own failure propagates
    /// unmodified; casting failures convert into the producer's error type.
    pub async fn deferred<F, E>(self, producer: F) -> Result<Value, E>
    where
        F: Future<Output = Result<Value, E>>,
        E: From<CastError>,
    {
        let plan = self.plan();
        let raw = producer.await?;
        plan.apply(raw).map_err(E::from)
    }

    /// Wraps a multi-emission operation. Each emitted payload is cast
    /// independently; emission order and count are preserved.
    pub fn stream<S>(self, producer: S) -> CastStream<S>
    where
        S: Stream<Item = Value>,
    {
        CastStream::new(producer, self.plan())
    }

    /// Like [`CastBuilder::stream`] for producers whose emissions are
    /// fallible. Producer errors pass through unmodified.
    pub fn try_stream<S, E>(self, producer: S) -> CastTryStream<S>
    where
        S: Stream<Item = Result<Value, E>>,
        E: From<CastError>,
    {
        CastTryStream::new(producer, self.plan())
    }
}

/// Everything a single wrapped call needs to transform a completion,
/// resolved up front so stream adapters can own it.
#[derive(Clone)]
pub(crate) struct CastPlan {
    chain: Arc<InterceptorChain>,
    provider: Option<TypeProvider>,
    shape: Option<ShapeMap>,
    unwrap: Option<String>,
}

impl CastPlan {
    /// Transforms one completion of the wrapped operation.
    pub(crate) fn apply(&self, raw: Value) -> Result<Value, CastError> {
        let payload = match &self.unwrap {
            Some(path) => resolve_unwrap(raw, path)?,
            None => raw,
        };

        match payload {
            Value::Null => Ok(Value::Null),
            Value::Array(items) => {
                tracing::debug!("cast: items={}", items.len());
                Ok(Value::Array(
                    items.into_iter().map(|item| self.cast_model(item)).collect(),
                ))
            }
            single => {
                tracing::debug!("cast: items=1");
                Ok(self.cast_model(single))
            }
        }
    }

    /// Casts one payload element: shape map first, model rehydration and its
    /// `on_receive` hook second, interceptor chain third.
    fn cast_model(&self, mut model: Value) -> Value {
        if let Some(shape) = &self.shape {
            shape.apply(&mut model);
        }
        if let Some(provider) = &self.provider {
            provider().receive_in_place(&mut model);
        }
        self.chain.receive(&mut model);
        model
    }
}
