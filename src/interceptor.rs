//! Process-wide interceptor chain.
//!
//! Interceptors observe every value passing through the casting pipeline,
//! independent of model type: `send` on the outbound path, `receive` right
//! after a value has been cast. Hooks get exclusive mutable access, so any
//! transform they perform is always applied. A hook that panics aborts the
//! remaining chain; interceptors must not fail for non-fatal conditions.
//!
//! The chain is an explicit service rather than a mutable global: build it
//! during bootstrap with [`InterceptorChain::register`], then hand it to the
//! pipeline behind an `Arc`. Registration is append-only; there is no
//! removal, and registration must happen before cast traffic starts.

use serde_json::Value;
use std::sync::Arc;

pub trait Interceptor: Send + Sync {
    fn send(&self, model: &mut Value) {
        let _ = model;
    }

    fn receive(&self, model: &mut Value) {
        let _ = model;
    }
}

#[derive(Default)]
pub struct InterceptorChain {
    interceptors: Vec<Arc<dyn Interceptor>>,
}

impl InterceptorChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a batch of interceptors. Invocation order is registration
    /// order, across batches.
    pub fn register(&mut self, batch: impl IntoIterator<Item = Arc<dyn Interceptor>>) {
        self.interceptors.extend(batch);
    }

    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }

    pub(crate) fn send(&self, model: &mut Value) {
        for interceptor in &self.interceptors {
            interceptor.send(model);
        }
    }

    pub(crate) fn receive(&self, model: &mut Value) {
        for interceptor in &self.interceptors {
            interceptor.receive(model);
        }
    }
}
