//! # modelcast
//!
//! Response-casting pipeline for untyped payloads.
//!
//! This crate rehydrates raw `serde_json::Value` payloads, from a network
//! call or any other producer, into typed model instances: unwrap the
//! response envelope, shape-cast nested fields along dotted paths, run the
//! model's own `on_receive` hook, then the global interceptor chain.
//!
//! ## Example
//!
//! ```rust,ignore
//! use modelcast::prelude::*;
//!
//! let pipeline = CastPipeline::new();
//! let cast = pipeline
//!     .cast()
//!     .model(provider::<Post>())
//!     .value(raw_payload)?;
//! let posts: Vec<Post> = decode_models(cast)?;
//! ```
//!
//! ## Completion Shapes
//!
//! - **value** - an immediate payload
//! - **deferred** - a future resolving to one payload
//! - **stream** - ordered multi-emission, one cast output per emission

mod error;
mod interceptor;
mod model;
mod options;
mod outbound;
mod path;
mod pipeline;
mod registry;
mod shape;
mod stream;
mod transfer;

pub mod prelude;

pub use error::CastError;
pub use interceptor::{Interceptor, InterceptorChain};
pub use model::{decode_model, decode_models, provider, Blueprint, BlueprintSource, Model, TypeProvider};
pub use options::{CastOptions, ModelSelector, DEFAULT_FALLBACK_KEY, DEFAULT_UNWRAP_KEY};
pub use outbound::{ParamSpec, SendRegistry, SendTransform};
pub use pipeline::{CastBuilder, CastPipeline};
pub use registry::{CastEntry, CastRegistry};
pub use shape::ShapeMap;
pub use stream::{CastStream, CastTryStream};
pub use transfer::TransferCache;

pub use serde_json::Value;
