//! Resolution: candidate enumeration and the attempt loop

use futures::FutureExt;
use futures::future::try_join_all;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, OnceLock};
use std::time::Instant;
use tracing::{Instrument, debug, debug_span};

use super::core::Router;
use super::trie::tokenize;
use super::types::Route;
use crate::logging::{
    CandidateLogEvent, ResolveId, log_candidate_event, log_candidates_enumerated,
    log_resolution_finished,
};
use crate::params::{ParamDef, ParamTable, Params, PromisedParams};
use crate::validation::validate_path_length;
use crate::{Context, Rejection, RouteError, RouteResult};

impl<Ctx: Clone + Send + Sync + 'static> Router<Ctx> {
    /// Resolve `path` with the router's context
    ///
    /// # Errors
    ///
    /// See [`Router::resolve_with_context`].
    pub async fn resolve(&self, path: &str) -> RouteResult<Value> {
        self.resolve_with_context(path, self.context.clone()).await
    }

    /// Resolve `path`, passing `ctx` to every resolver and handler
    ///
    /// Candidates are tried one at a time in match order. For each, all
    /// captured parameters are resolved concurrently and the handler is
    /// called with the results. The first candidate to succeed wins.
    ///
    /// A soft rejection ([`Rejection::Empty`] or [`Rejection::Ignored`]) from
    /// a parameter or handler moves on to the next candidate. A hard one
    /// ([`Rejection::Reason`], including any schema validation failure) ends
    /// the call with that error.
    ///
    /// # Errors
    ///
    /// - `BAD_REQUEST` if the path exceeds `max_path_length`
    /// - `NOT_FOUND` if no candidate matched or every candidate failed soft
    /// - the hard rejection's error, unchanged
    pub async fn resolve_with_context(&self, path: &str, ctx: Ctx) -> RouteResult<Value> {
        let resolve_id = ResolveId::new();
        let span = debug_span!("resolve", resolve_id = %resolve_id.short(), path = %path);
        self.run(path, Context::new(ctx)).instrument(span).await
    }

    async fn run(&self, path: &str, ctx: Context<Ctx>) -> RouteResult<Value> {
        let start = Instant::now();
        validate_path_length(path, &self.config)?;

        let tokens: Vec<&str> = tokenize(path).collect();
        let mut queue: VecDeque<_> = self.trie.enumerate(&tokens).into();
        if self.config.log_candidates {
            let patterns: Vec<&str> = queue
                .iter()
                .map(|c| self.routes[*c.value].pattern.as_str())
                .collect();
            log_candidates_enumerated(path, &patterns);
        }

        let mut attempted = 0;
        let outcome = loop {
            let Some(candidate) = queue.pop_front() else {
                break Err(RouteError::no_match(path));
            };
            let route = &self.routes[*candidate.value];
            let index = attempted;
            attempted += 1;

            log_candidate_event(
                &route.pattern,
                index,
                CandidateLogEvent::Attempt {
                    param_count: candidate.captures.len(),
                },
            );

            match self.attempt(route, candidate.captures, &ctx).await {
                Ok(value) => {
                    log_candidate_event(&route.pattern, index, CandidateLogEvent::Matched);
                    break Ok(value);
                }
                Err(Rejection::Reason(error)) => {
                    log_candidate_event(
                        &route.pattern,
                        index,
                        CandidateLogEvent::HardFailure {
                            code: error.code.to_string(),
                            message: error.message.clone(),
                        },
                    );
                    break Err(error);
                }
                Err(soft) => {
                    log_candidate_event(
                        &route.pattern,
                        index,
                        CandidateLogEvent::SoftFailure {
                            code: soft.error().map(|e| e.code.to_string()),
                        },
                    );
                }
            }
        };

        log_resolution_finished(
            path,
            outcome.as_ref().map(|_| ()),
            attempted,
            start.elapsed(),
            self.config.slow_resolve_threshold_ms,
        );
        outcome
    }

    async fn attempt(
        &self,
        route: &Route<Ctx>,
        captures: Vec<String>,
        ctx: &Context<Ctx>,
    ) -> Result<Value, Rejection> {
        let params = self.resolve_params(route, captures, ctx).await?;
        (route.handler)(ctx.clone(), params).await
    }

    /// Resolve every captured parameter of one candidate concurrently.
    ///
    /// All futures are created before any is polled and published in the
    /// shared table, so a resolver can wait on a sibling through
    /// [`PromisedParams`].
    async fn resolve_params(
        &self,
        route: &Route<Ctx>,
        captures: Vec<String>,
        ctx: &Context<Ctx>,
    ) -> Result<Params, Rejection> {
        let mut params = Params::new();
        if captures.is_empty() {
            return Ok(params);
        }

        let table: ParamTable = Arc::new(OnceLock::new());
        let promised = PromisedParams::new(&table);
        let mut futures = HashMap::with_capacity(captures.len());
        let mut pending = Vec::with_capacity(captures.len());

        for (name, raw) in route.param_names.iter().zip(captures) {
            let future = resolve_param(
                name.clone(),
                self.params.get(name).cloned(),
                raw.clone(),
                promised.clone(),
                ctx.clone(),
            )
            .boxed()
            .shared();
            futures.insert(name.clone(), future.clone());
            pending.push((name, raw, future));
        }
        // The table was created above, so it cannot be set already.
        let _ = table.set(futures);

        let values = try_join_all(pending.iter().map(|(_, _, future)| future.clone())).await?;
        for ((name, raw, _), value) in pending.into_iter().zip(values) {
            params.insert(name.as_str(), raw, value);
        }
        Ok(params)
    }
}

/// Validate then resolve one captured value.
///
/// Without a definition the raw string is the value. A schema failure is
/// always a hard rejection.
async fn resolve_param<Ctx: Clone + Send + Sync + 'static>(
    name: String,
    def: Option<ParamDef<Ctx>>,
    raw: String,
    promised: PromisedParams,
    ctx: Context<Ctx>,
) -> Result<Value, Rejection> {
    let value = Value::String(raw);
    let Some(def) = def else {
        return Ok(value);
    };

    let value = match &def.schema {
        Some(schema) => {
            let output = schema.validate(value);
            if let Some(result) = output.error {
                debug!(
                    param = %name,
                    error_count = result.errors.len(),
                    "Parameter validation failed"
                );
                return Err(Rejection::Reason(
                    RouteError::validation(format!("Invalid value for parameter '{}'", name))
                        .with_details(serde_json::json!({
                            "param": name,
                            "errors": result.errors,
                        })),
                ));
            }
            output.value
        }
        None => value,
    };

    match &def.resolver {
        Some(resolver) => resolver(ctx, value, promised).await,
        None => Ok(value),
    }
}
