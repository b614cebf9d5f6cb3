//! Parameter definitions and resolved parameter maps
//!
//! A [`ParamDef`] tells the router what to do with a captured dynamic
//! segment: validate it with a [`Schema`], turn it into something richer
//! with a resolver, or both. Captures without a definition are handed to
//! the handler as the raw string.
//!
//! # Example
//!
//! ```rust,ignore
//! use route_resolver::prelude::*;
//!
//! let router = Router::new()
//!     .param(
//!         "user",
//!         ParamDef::schema(IntegerSchema::new().min(1)).with_resolver(
//!             |ctx: Context<Db>, id: Value, _: PromisedParams| async move {
//!                 ctx.find_user(id.as_i64().unwrap_or_default())
//!                     .await
//!                     .ok_or(Rejection::Empty)
//!             },
//!         ),
//!     )
//!     .route("/users/:user", show_user);
//! ```

use futures::future::{BoxFuture, Shared};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock, Weak};

use crate::handler::{BoxedParamResolver, ParamResolver, into_boxed_resolver};
use crate::validation::Schema;
use crate::{Rejection, RouteError};

/// A parameter resolution in flight, shareable between sibling resolvers.
pub type ParamFuture = Shared<BoxFuture<'static, Result<Value, Rejection>>>;

/// Per-candidate table of the parameter futures currently being resolved.
pub(crate) type ParamTable = Arc<OnceLock<HashMap<String, ParamFuture>>>;

/// Definition attached to a parameter name.
///
/// Built with [`ParamDef::resolver`] or [`ParamDef::schema`] and extended
/// with the matching `with_*` method. A definition carrying neither is empty
/// and registering it does nothing.
pub struct ParamDef<Ctx: Clone + Send + Sync + 'static> {
    pub(crate) schema: Option<Arc<dyn Schema>>,
    pub(crate) resolver: Option<BoxedParamResolver<Ctx>>,
}

impl<Ctx: Clone + Send + Sync + 'static> Default for ParamDef<Ctx> {
    fn default() -> Self {
        Self {
            schema: None,
            resolver: None,
        }
    }
}

impl<Ctx: Clone + Send + Sync + 'static> Clone for ParamDef<Ctx> {
    fn clone(&self) -> Self {
        Self {
            schema: self.schema.clone(),
            resolver: self.resolver.clone(),
        }
    }
}

impl<Ctx: Clone + Send + Sync + 'static> fmt::Debug for ParamDef<Ctx> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParamDef")
            .field("has_schema", &self.has_schema())
            .field("has_resolver", &self.has_resolver())
            .finish()
    }
}

impl<Ctx: Clone + Send + Sync + 'static> ParamDef<Ctx> {
    /// Create an empty definition.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the definition carries neither a schema nor a resolver.
    pub fn is_empty(&self) -> bool {
        self.schema.is_none() && self.resolver.is_none()
    }

    /// Whether a schema is attached.
    pub fn has_schema(&self) -> bool {
        self.schema.is_some()
    }

    /// Whether a resolver is attached.
    pub fn has_resolver(&self) -> bool {
        self.resolver.is_some()
    }

    /// Definition that only validates.
    pub fn schema<S: Schema + 'static>(schema: S) -> Self {
        Self::default().with_schema(schema)
    }

    /// Attach or replace the schema.
    pub fn with_schema<S: Schema + 'static>(mut self, schema: S) -> Self {
        self.schema = Some(Arc::new(schema));
        self
    }

    /// Definition that only resolves.
    pub fn resolver<Output, R>(resolver: R) -> Self
    where
        Output: Serialize + Send + 'static,
        R: ParamResolver<Ctx, Output>,
    {
        Self::default().with_resolver(resolver)
    }

    /// Attach or replace the resolver.
    ///
    /// When a schema is also present, the resolver receives the value the
    /// schema produced.
    pub fn with_resolver<Output, R>(mut self, resolver: R) -> Self
    where
        Output: Serialize + Send + 'static,
        R: ParamResolver<Ctx, Output>,
    {
        self.resolver = Some(into_boxed_resolver(resolver));
        self
    }
}

/// Handle on the sibling parameters of the candidate being attempted.
///
/// Resolvers receive this so one parameter can build on another:
///
/// ```rust,ignore
/// .param_resolver("post", |ctx: Context<Db>, slug: Value, promised: PromisedParams| async move {
///     let author = promised.wait("author").await?.ok_or(Rejection::Empty)?;
///     ctx.find_post(&author, &slug).await.ok_or(Rejection::Empty)
/// })
/// ```
///
/// A resolver that waits on itself, or on a sibling that waits back on it,
/// never completes.
#[derive(Clone, Default)]
pub struct PromisedParams {
    // Weak so pending futures never keep their own table alive.
    table: Weak<OnceLock<HashMap<String, ParamFuture>>>,
}

impl PromisedParams {
    pub(crate) fn new(table: &ParamTable) -> Self {
        Self {
            table: Arc::downgrade(table),
        }
    }

    /// The in-flight future for `name`, if the candidate captures it.
    pub fn get(&self, name: &str) -> Option<ParamFuture> {
        self.table.upgrade()?.get()?.get(name).cloned()
    }

    /// Whether the candidate captures `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Wait for the sibling parameter `name` to settle.
    ///
    /// Returns `Ok(None)` when the candidate has no such parameter. A sibling
    /// failure is returned as-is.
    pub async fn wait(&self, name: &str) -> Result<Option<Value>, Rejection> {
        match self.get(name) {
            Some(future) => future.await.map(Some),
            None => Ok(None),
        }
    }
}

impl fmt::Debug for PromisedParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self
            .table
            .upgrade()
            .and_then(|table| table.get().map(|m| m.keys().cloned().collect()))
            .unwrap_or_default();
        f.debug_struct("PromisedParams").field("names", &names).finish()
    }
}

/// Resolved parameters handed to a route handler.
///
/// `values` holds the final value per parameter name; the raw captured
/// strings are kept alongside for handlers that need the original text.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Params {
    values: HashMap<String, Value>,
    raw: HashMap<String, String>,
}

impl Params {
    /// Create an empty parameter map.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, name: impl Into<String>, raw: impl Into<String>, value: Value) {
        let name = name.into();
        self.raw.insert(name.clone(), raw.into());
        self.values.insert(name, value);
    }

    /// Resolved value for `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Resolved value for `name` if it is a string.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(Value::as_str)
    }

    /// Deserialize the resolved value for `name`.
    ///
    /// # Errors
    ///
    /// Returns a `VALIDATION_ERROR` if the parameter is absent or its value
    /// does not deserialize into `T`.
    pub fn get_as<T: DeserializeOwned>(&self, name: &str) -> Result<T, RouteError> {
        let value = self.values.get(name).ok_or_else(|| {
            RouteError::validation(format!("Missing parameter '{}'", name))
                .with_details(serde_json::json!({ "param": name }))
        })?;
        serde_json::from_value(value.clone()).map_err(|e| {
            RouteError::validation(format!("Parameter '{}' has an unexpected shape", name))
                .with_details(serde_json::json!({ "param": name }))
                .with_cause(e.to_string())
        })
    }

    /// Raw captured text for `name`.
    pub fn raw(&self, name: &str) -> Option<&str> {
        self.raw.get(name).map(String::as_str)
    }

    /// All resolved values by name.
    pub fn values(&self) -> &HashMap<String, Value> {
        &self.values
    }

    /// All raw captures by name.
    pub fn raw_values(&self) -> &HashMap<String, String> {
        &self.raw
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the route captured no parameters.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over `(name, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Consume into the map of resolved values.
    pub fn into_values(self) -> HashMap<String, Value> {
        self.values
    }
}
