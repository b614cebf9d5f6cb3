//! Router tests

mod ordering_tests;

use crate::{Context, EmptyContext, Params, Rejection, RouteError};
use serde_json::Value;
use std::sync::{Arc, Mutex};

/// Shared log of handler ids, in call order.
pub(super) type CallLog = Arc<Mutex<Vec<u32>>>;

pub(super) fn call_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}

pub(super) fn calls(log: &CallLog) -> Vec<u32> {
    log.lock().unwrap().clone()
}

/// Handler that records `id` and rejects without a reason.
pub(super) fn skip(
    log: &CallLog,
    id: u32,
) -> impl Fn(Context<EmptyContext>, Params) -> futures::future::Ready<Result<Value, Rejection>>
+ Clone
+ Send
+ Sync
+ 'static {
    let log = log.clone();
    move |_ctx: Context<EmptyContext>, _params: Params| {
        log.lock().unwrap().push(id);
        futures::future::ready(Err(Rejection::Empty))
    }
}

/// Handler that records `id` and fails hard.
pub(super) fn fail(
    log: &CallLog,
    id: u32,
) -> impl Fn(Context<EmptyContext>, Params) -> futures::future::Ready<Result<Value, Rejection>>
+ Clone
+ Send
+ Sync
+ 'static {
    let log = log.clone();
    move |_ctx: Context<EmptyContext>, _params: Params| {
        log.lock().unwrap().push(id);
        futures::future::ready(Err(Rejection::Reason(RouteError::internal(format!(
            "handler {id} failed"
        )))))
    }
}

/// Handler that records `id` and succeeds with it.
pub(super) fn answer(
    log: &CallLog,
    id: u32,
) -> impl Fn(Context<EmptyContext>, Params) -> futures::future::Ready<Result<Value, Rejection>>
+ Clone
+ Send
+ Sync
+ 'static {
    let log = log.clone();
    move |_ctx: Context<EmptyContext>, _params: Params| {
        log.lock().unwrap().push(id);
        futures::future::ready(Ok(Value::from(id)))
    }
}

/// Handler that returns its parameters.
pub(super) async fn echo(_ctx: Context<EmptyContext>, params: Params) -> Result<Params, Rejection> {
    Ok(params)
}
