//! Prelude module for convenient imports.
//!
//! # Usage
//!
//! Import everything commonly needed in one line:
//!
//! ```rust,ignore
//! use modelcast::prelude::*;
//!
//! let pipeline = CastPipeline::new();
//! let mut stream = pipeline.cast().model(provider::<Post>()).stream(producer);
//! while let Some(item) = stream.next().await {
//!     // StreamExt methods available without separate import
//! }
//! ```

pub use crate::{
    decode_model, decode_models, provider, Blueprint, BlueprintSource, CastEntry, CastError,
    CastOptions, CastPipeline, CastRegistry, CastStream, CastTryStream, Interceptor,
    InterceptorChain, Model, ParamSpec, SendRegistry, SendTransform, ShapeMap, TransferCache,
    Value,
};

pub use futures_util::StreamExt;
