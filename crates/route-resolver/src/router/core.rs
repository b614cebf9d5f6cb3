//! Core router implementation

use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use tracing::warn;

use super::trie::{Segment, Trie, tokenize};
use super::types::Route;
use crate::handler::{Handler, ParamResolver, into_boxed};
use crate::logging::{log_param_registered, log_route_name_replaced, log_route_registered};
use crate::params::ParamDef;
use crate::validation::{Schema, validate_path_length};
use crate::{EmptyContext, RouteError, RouteResult, RouterConfig};

/// Path router with parameter resolution and reverse lookup.
///
/// Routes and parameter definitions are registered with chained builder
/// calls; once built, the router is only read, so it can be shared behind an
/// `Arc` and resolved from many tasks at once.
///
/// ```rust,ignore
/// let router = Router::new()
///     .context(AppContext::default())
///     .param_schema("id", IntegerSchema::new().min(1))
///     .named_route("/users/:id", "user", show_user)
///     .route("/users/new", new_user_form);
///
/// let page = router.resolve("/users/42").await?;
/// let href = router.reverse("user", &json!({ "id": 42 }))?;
/// ```
pub struct Router<Ctx: Clone + Send + Sync + 'static = EmptyContext> {
    pub(crate) context: Ctx,
    pub(crate) config: RouterConfig,
    pub(crate) trie: Trie<usize>,
    pub(crate) routes: Vec<Route<Ctx>>,
    pub(crate) names: HashMap<String, usize>,
    pub(crate) params: HashMap<String, ParamDef<Ctx>>,
}

impl Default for Router<EmptyContext> {
    fn default() -> Self {
        Self::new()
    }
}

impl Router<EmptyContext> {
    /// Create a new case-sensitive router with an empty context
    pub fn new() -> Self {
        Self::from_config(EmptyContext, RouterConfig::default())
    }

    /// Create a router that matches literal segments case-insensitively
    pub fn case_insensitive() -> Self {
        Self::from_config(
            EmptyContext,
            RouterConfig::new().with_case_insensitive(true),
        )
    }

    /// Create a router from an explicit configuration
    ///
    /// # Errors
    ///
    /// Returns a `BAD_REQUEST` error if the configuration is invalid.
    pub fn with_config(config: RouterConfig) -> RouteResult<Self> {
        config.validate().map_err(|e| {
            warn!(error = %e, "Invalid router configuration");
            RouteError::bad_request(format!("Invalid router configuration: {}", e))
        })?;
        Ok(Self::from_config(EmptyContext, config))
    }
}

impl<Ctx: Clone + Send + Sync + 'static> Router<Ctx> {
    fn from_config(context: Ctx, config: RouterConfig) -> Self {
        Self {
            context,
            trie: Trie::new(config.case_insensitive),
            config,
            routes: Vec::new(),
            names: HashMap::new(),
            params: HashMap::new(),
        }
    }

    /// Set the context passed to every resolver and handler by [`Router::resolve`]
    ///
    /// Handlers are typed by their context, so this must be called before any
    /// parameter or route is registered; earlier registrations are dropped.
    #[must_use = "This method returns a new Router and does not modify self"]
    pub fn context<NewCtx: Clone + Send + Sync + 'static>(self, ctx: NewCtx) -> Router<NewCtx> {
        if !self.routes.is_empty() || !self.params.is_empty() {
            warn!(
                routes = %self.routes.len(),
                params = %self.params.len(),
                "Context set after registration; existing routes and params are dropped"
            );
        }
        Router::from_config(ctx, self.config)
    }

    /// Register a parameter definition
    ///
    /// An empty definition is ignored. A later definition for the same name
    /// replaces the earlier one.
    #[must_use = "This method returns a new Router and does not modify self"]
    pub fn param(mut self, name: impl Into<String>, def: ParamDef<Ctx>) -> Self {
        if def.is_empty() {
            return self;
        }
        let name = name.into();
        log_param_registered(&name, def.has_schema(), def.has_resolver());
        self.params.insert(name, def);
        self
    }

    /// Register a resolver for a parameter
    #[must_use = "This method returns a new Router and does not modify self"]
    pub fn param_resolver<Output, R>(self, name: impl Into<String>, resolver: R) -> Self
    where
        Output: Serialize + Send + 'static,
        R: ParamResolver<Ctx, Output>,
    {
        self.param(name, ParamDef::resolver(resolver))
    }

    /// Register a validation schema for a parameter
    #[must_use = "This method returns a new Router and does not modify self"]
    pub fn param_schema<S: Schema + 'static>(self, name: impl Into<String>, schema: S) -> Self {
        self.param(name, ParamDef::schema(schema))
    }

    /// Register a handler under a `/`-delimited pattern
    ///
    /// Tokens starting with `:` are dynamic and capture one path segment.
    /// Empty tokens are ignored, so `/a//b/` and `a/b` are the same pattern.
    #[must_use = "This method returns a new Router and does not modify self"]
    pub fn route<Output, H>(self, path: &str, handler: H) -> Self
    where
        Output: Serialize + Send + 'static,
        H: Handler<Ctx, Output>,
    {
        self.add_route(path, None, handler)
    }

    /// Register a handler under a pattern with a name usable by [`Router::reverse`]
    ///
    /// Registering another route with the same name points the name at the
    /// new route; both stay matchable.
    #[must_use = "This method returns a new Router and does not modify self"]
    pub fn named_route<Output, H>(self, path: &str, name: impl Into<String>, handler: H) -> Self
    where
        Output: Serialize + Send + 'static,
        H: Handler<Ctx, Output>,
    {
        self.add_route(path, Some(name.into()), handler)
    }

    fn add_route<Output, H>(mut self, path: &str, name: Option<String>, handler: H) -> Self
    where
        Output: Serialize + Send + 'static,
        H: Handler<Ctx, Output>,
    {
        let route = Route::new(path, name, into_boxed(handler));
        let index = self.routes.len();
        log_route_registered(&route.pattern, route.name.as_deref());

        if let Some(name) = &route.name {
            if let Some(previous) = self.names.insert(name.clone(), index) {
                log_route_name_replaced(name, &self.routes[previous].pattern, &route.pattern);
            }
        }

        self.trie.insert(&route.segments, index);
        self.routes.push(route);
        self
    }

    /// Get the context
    pub fn get_context(&self) -> &Ctx {
        &self.context
    }

    /// Get the router configuration
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Registered patterns in registration order
    pub fn routes(&self) -> Vec<&str> {
        self.routes.iter().map(|r| r.pattern.as_str()).collect()
    }

    /// Whether a route is registered under `name`
    pub fn has_route(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    /// Patterns that match `path`, in the order `resolve` would try them
    ///
    /// No resolver or handler is invoked.
    ///
    /// # Errors
    ///
    /// Returns a `BAD_REQUEST` error if the path exceeds `max_path_length`.
    pub fn candidates(&self, path: &str) -> RouteResult<Vec<&str>> {
        validate_path_length(path, &self.config)?;
        let tokens: Vec<&str> = tokenize(path).collect();
        Ok(self
            .trie
            .enumerate(&tokens)
            .into_iter()
            .map(|c| self.routes[*c.value].pattern.as_str())
            .collect())
    }

    /// Build a concrete path for the route registered as `name`
    ///
    /// `params` should be a JSON object; keys not used by the route are
    /// ignored. `null`, `false`, `0` and `""` count as missing. Strings are
    /// inserted as-is, other values in their JSON text form.
    ///
    /// # Errors
    ///
    /// - `UNKNOWN_ROUTE` if no route has that name
    /// - `MISSING_PARAM` if a dynamic segment has no usable value
    pub fn reverse(&self, name: &str, params: &Value) -> RouteResult<String> {
        let index = self
            .names
            .get(name)
            .ok_or_else(|| RouteError::unknown_route(name))?;
        let route = &self.routes[*index];

        let segments = route
            .segments
            .iter()
            .map(|segment| match segment {
                Segment::Literal(text) => Ok(text.clone()),
                Segment::Dynamic(param) => params
                    .get(param)
                    .and_then(segment_text)
                    .ok_or_else(|| RouteError::missing_param(name, param)),
            })
            .collect::<RouteResult<Vec<_>>>()?;

        Ok(format!("/{}", segments.join("/")))
    }
}

/// Text spliced into a reversed path, or `None` for a falsy value.
fn segment_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

impl<Ctx: Clone + Send + Sync + 'static> std::fmt::Debug for Router<Ctx> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("config", &self.config)
            .field("routes", &self.routes)
            .field("names", &self.names.keys().collect::<Vec<_>>())
            .field("params", &self.params)
            .finish()
    }
}
