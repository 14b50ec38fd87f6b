use crate::error::CastError;
use crate::pipeline::CastPlan;
use futures_util::Stream;
use pin_project_lite::pin_project;
use serde_json::Value;
use std::pin::Pin;
use std::task::{Context, Poll};

pin_project! {
    /// Casts every payload emitted by an infallible producer stream.
    pub struct CastStream<S> {
        #[pin]
        inner: S,
        plan: CastPlan,
    }
}

impl<S> CastStream<S> {
    pub(crate) fn new(inner: S, plan: CastPlan) -> Self {
        Self { inner, plan }
    }
}

impl<S> Stream for CastStream<S>
where
    S: Stream<Item = Value>,
{
    type Item = Result<Value, CastError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.project();
        match this.inner.poll_next(cx) {
            Poll::Ready(Some(raw)) => Poll::Ready(Some(this.plan.apply(raw))),
            Poll::Ready(None) => Poll::Ready(None),
            Poll::Pending => Poll::Pending,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

pin_project! {
    /// Casts every successful payload of a fallible producer stream.
    /// Producer errors pass through unmodified.
    pub struct CastTryStream<S> {
        #[pin]
        inner: S,
        plan: CastPlan,
    }
}

impl<S> CastTryStream<S> {
    pub(crate) fn new(inner: S, plan: CastPlan) -> Self {
        Self { inner, plan }
    }
}

impl<S, E> Stream for CastTryStream<S>
where
    S: Stream<Item = Result<Value, E>>,
    E: From<CastError>,
{
    type Item = Result<Value, E>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.project();
        match this.inner.poll_next(cx) {
            Poll::Ready(Some(Ok(raw))) => {
                Poll::Ready(Some(this.plan.apply(raw).map_err(E::from)))
            }
            Poll::Ready(Some(Err(err))) => Poll::Ready(Some(Err(err))),
            Poll::Ready(None) => Poll::Ready(None),
            Poll::Pending => Poll::Pending,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
