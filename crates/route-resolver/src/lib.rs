#![warn(missing_docs)]
//! # Route Resolver
//!
//! Path matching and asynchronous dispatch with fallthrough.
//!
//! ## Overview
//!
//! - **Segment trie** of `/`-delimited patterns with literal and `:name`
//!   dynamic segments
//! - **Ordered candidates**: literal segments win over dynamic ones at every
//!   position; identical patterns keep registration order
//! - **Parameter pipeline**: each captured value can be validated by a
//!   schema and resolved by an async resolver, concurrently per candidate
//! - **Soft and hard failures**: a soft rejection tries the next candidate,
//!   a hard one ends resolution with its error
//! - **Reverse routing** from a route name and parameter values
//!
//! ## Architecture
//!
//! ```text
//!   path ──► tokenize ──► Trie::enumerate ──► candidate queue
//!                                                  │
//!                       ┌──────────────────────────┘
//!                       ▼
//!        ┌──── resolve params (schema → resolver), concurrently
//!        │              │
//!        │              ▼
//!        │         call handler ──► Ok(value) ──► done
//!        │              │
//!        │      Err(Rejection)
//!        │        soft │ hard ──► Err(error) ──► done
//!        └─────────────┘
//!                 (queue empty ──► NOT_FOUND)
//! ```
//!
//! ## Quick Start
//!
//! ### 1. Define Your Context
//!
//! ```rust,ignore
//! #[derive(Clone)]
//! pub struct AppContext {
//!     pub db: Arc<Database>,
//! }
//! ```
//!
//! ### 2. Write Handlers and Resolvers
//!
//! ```rust,ignore
//! use route_resolver::prelude::*;
//!
//! async fn load_user(ctx: Context<AppContext>, id: Value, _: PromisedParams) -> Result<User, Rejection> {
//!     let id = id.as_i64().unwrap_or_default();
//!     // Unknown user: let a later route have a go
//!     ctx.db.user(id).await.ok_or(Rejection::Empty)
//! }
//!
//! async fn show_user(_ctx: Context<AppContext>, params: Params) -> Result<Page, Rejection> {
//!     let user: User = params.get_as("user")?;
//!     Ok(Page::profile(user))
//! }
//! ```
//!
//! ### 3. Build Your Router
//!
//! ```rust,ignore
//! let router = Router::new()
//!     .context(AppContext::new())
//!     .param("user", ParamDef::schema(IntegerSchema::new().min(1)).with_resolver(load_user))
//!     .named_route("/users/:user", "user", show_user)
//!     .route("/:page", show_page);
//!
//! let page = router.resolve("/users/42").await?;
//! let href = router.reverse("user", &json!({ "user": 42 }))?;
//! ```
//!
//! ## Error Handling
//!
//! ```rust,ignore
//! // Hard: stops resolution, returned to the caller as-is
//! return Err(RouteError::forbidden("Not your account").into());
//!
//! // Soft: try the next candidate
//! return Err(Rejection::Empty);
//! return Err(Rejection::ignore(RouteError::not_found("No such page")));
//! ```
//!
//! A schema validation failure is always hard and surfaces as
//! `VALIDATION_ERROR` with the field errors in `details`.

mod config;
mod context;
mod error;
mod handler;
pub mod logging;
mod params;
mod router;
pub mod validation;

#[cfg(test)]
mod tests;

pub use config::{ConfigValidationError, DEFAULT_MAX_PATH_LENGTH, RouterConfig};
pub use context::{Context, EmptyContext};
pub use error::{Rejection, RouteError, RouteErrorCode, RouteResult};
pub use handler::{Handler, ParamResolver};
pub use logging::{CandidateLogEvent, ResolveId};
pub use params::{ParamDef, ParamFuture, Params, PromisedParams};
pub use router::Router;
pub use validation::{
    FieldError, FnSchema, IntegerSchema, Schema, SchemaOutput, StringSchema, ValidationResult,
    ValidationRules,
};

/// Prelude for convenient imports
///
/// Import everything you need with a single use statement:
///
/// ```rust,ignore
/// use route_resolver::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Configuration
        ConfigValidationError,
        // Context
        Context,
        EmptyContext,
        // Validation
        FieldError,
        FnSchema,
        // Handler
        Handler,
        IntegerSchema,
        // Parameters
        ParamDef,
        ParamResolver,
        Params,
        PromisedParams,
        // Error handling
        Rejection,
        ResolveId,
        RouteError,
        RouteErrorCode,
        RouteResult,
        // Router
        Router,
        RouterConfig,
        Schema,
        SchemaOutput,
        StringSchema,
        ValidationResult,
        ValidationRules,
    };
    pub use serde_json::{Value, json};
}
