//! Handler traits and utilities
//!
//! This module provides the two callable abstractions the router stores:
//! route handlers and parameter resolvers. Both are type-erased into
//! `Arc`-boxed closures that produce a `serde_json::Value` or a [`Rejection`].

use crate::params::{Params, PromisedParams};
use crate::{Context, Rejection};
use serde::Serialize;
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tracing::{trace, warn};

/// Future produced by a boxed handler or parameter resolver.
pub(crate) type BoxedFuture = Pin<Box<dyn Future<Output = Result<Value, Rejection>> + Send>>;

/// Boxed route handler for type erasure
pub(crate) type BoxedHandler<Ctx> = Arc<dyn Fn(Context<Ctx>, Params) -> BoxedFuture + Send + Sync>;

/// Boxed parameter resolver for type erasure
pub(crate) type BoxedParamResolver<Ctx> =
    Arc<dyn Fn(Context<Ctx>, Value, PromisedParams) -> BoxedFuture + Send + Sync>;

/// Trait for route handler functions
///
/// Automatically implemented for async functions with the signature:
/// `async fn(Context<Ctx>, Params) -> Result<Output, Rejection>`
pub trait Handler<Ctx, Output>: Clone + Send + Sync + 'static
where
    Ctx: Clone + Send + Sync + 'static,
    Output: Serialize + Send + 'static,
{
    /// The future type returned by the handler
    type Future: Future<Output = Result<Output, Rejection>> + Send;

    /// Call the handler with context and resolved parameters
    fn call(&self, ctx: Context<Ctx>, params: Params) -> Self::Future;
}

impl<Ctx, Output, F, Fut> Handler<Ctx, Output> for F
where
    Ctx: Clone + Send + Sync + 'static,
    Output: Serialize + Send + 'static,
    F: Fn(Context<Ctx>, Params) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = Result<Output, Rejection>> + Send + 'static,
{
    type Future = Fut;

    fn call(&self, ctx: Context<Ctx>, params: Params) -> Self::Future {
        (self)(ctx, params)
    }
}

/// Trait for parameter resolver functions
///
/// Automatically implemented for async functions with the signature:
/// `async fn(Context<Ctx>, Value, PromisedParams) -> Result<Output, Rejection>`
///
/// The `Value` is the raw capture, or the schema-normalized value when the
/// parameter also has a schema. `PromisedParams` gives access to the sibling
/// parameters being resolved for the same candidate.
pub trait ParamResolver<Ctx, Output>: Clone + Send + Sync + 'static
where
    Ctx: Clone + Send + Sync + 'static,
    Output: Serialize + Send + 'static,
{
    /// The future type returned by the resolver
    type Future: Future<Output = Result<Output, Rejection>> + Send;

    /// Resolve one captured parameter value
    fn call(&self, ctx: Context<Ctx>, value: Value, promised: PromisedParams) -> Self::Future;
}

impl<Ctx, Output, F, Fut> ParamResolver<Ctx, Output> for F
where
    Ctx: Clone + Send + Sync + 'static,
    Output: Serialize + Send + 'static,
    F: Fn(Context<Ctx>, Value, PromisedParams) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = Result<Output, Rejection>> + Send + 'static,
{
    type Future = Fut;

    fn call(&self, ctx: Context<Ctx>, value: Value, promised: PromisedParams) -> Self::Future {
        (self)(ctx, value, promised)
    }
}

fn serialize_output<Output: Serialize>(output: Output, what: &'static str) -> Result<Value, Rejection> {
    serde_json::to_value(output).map_err(|e| {
        warn!(error = %e, kind = what, "Output serialization failed");
        Rejection::from(e)
    })
}

fn trace_rejection(rejection: &Rejection, what: &'static str) {
    match rejection.error() {
        Some(e) => trace!(
            kind = what,
            soft = rejection.is_soft(),
            error_code = %e.code,
            error_message = %e.message,
            "Rejected"
        ),
        None => trace!(kind = what, "Rejected without reason"),
    }
}

/// Convert a handler into a boxed handler for storage
pub(crate) fn into_boxed<Ctx, Output, H>(handler: H) -> BoxedHandler<Ctx>
where
    Ctx: Clone + Send + Sync + 'static,
    Output: Serialize + Send + 'static,
    H: Handler<Ctx, Output>,
{
    Arc::new(move |ctx, params| {
        let handler = handler.clone();
        Box::pin(async move {
            trace!(param_count = params.len(), "Executing handler");
            let output = handler
                .call(ctx, params)
                .await
                .inspect_err(|r| trace_rejection(r, "handler"))?;

            let output_value = serialize_output(output, "handler")?;
            trace!("Handler completed successfully");
            Ok(output_value)
        })
    })
}

/// Convert a parameter resolver into a boxed resolver for storage
pub(crate) fn into_boxed_resolver<Ctx, Output, R>(resolver: R) -> BoxedParamResolver<Ctx>
where
    Ctx: Clone + Send + Sync + 'static,
    Output: Serialize + Send + 'static,
    R: ParamResolver<Ctx, Output>,
{
    Arc::new(move |ctx, value, promised| {
        let resolver = resolver.clone();
        Box::pin(async move {
            let output = resolver
                .call(ctx, value, promised)
                .await
                .inspect_err(|r| trace_rejection(r, "param_resolver"))?;

            serialize_output(output, "param_resolver")
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EmptyContext, RouteError};
    use serde_json::json;

    #[tokio::test]
    async fn test_boxed_handler_serializes_output() {
        let boxed: BoxedHandler<EmptyContext> =
            into_boxed(|_ctx: Context<EmptyContext>, _params: Params| async move {
                Ok::<_, Rejection>(vec![1, 2, 3])
            });

        let value = boxed(Context::default(), Params::default()).await.unwrap();
        assert_eq!(value, json!([1, 2, 3]));
    }

    #[tokio::test]
    async fn test_boxed_handler_passes_rejection_through() {
        let boxed: BoxedHandler<EmptyContext> =
            into_boxed(|_ctx: Context<EmptyContext>, _params: Params| async move {
                Err::<Value, _>(Rejection::ignore(RouteError::not_found("gone")))
            });

        let rejection = boxed(Context::default(), Params::default()).await.unwrap_err();
        assert!(rejection.is_soft());
    }

    #[tokio::test]
    async fn test_boxed_resolver_receives_value() {
        let boxed: BoxedParamResolver<EmptyContext> = into_boxed_resolver(
            |_ctx: Context<EmptyContext>, value: Value, _promised: PromisedParams| async move {
                Ok::<_, Rejection>(format!("user:{}", value.as_str().unwrap_or_default()))
            },
        );

        let value = boxed(Context::default(), json!("7"), PromisedParams::default())
            .await
            .unwrap();
        assert_eq!(value, json!("user:7"));
    }
}
