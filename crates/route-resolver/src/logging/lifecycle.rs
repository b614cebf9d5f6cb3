//! Router lifecycle logging functions.
//!
//! Registration happens once while the router is built. Route and parameter
//! registration log at Trace level; a reassigned route name logs at Debug.

/// Log route registration.
///
/// # Example
///
/// ```rust,ignore
/// log_route_registered("/users/:id", Some("user"));
/// ```
pub fn log_route_registered(pattern: &str, name: Option<&str>) {
    tracing::trace!(
        pattern = %pattern,
        name = ?name,
        "Route registered"
    );
}

/// Log parameter definition registration.
pub fn log_param_registered(name: &str, has_schema: bool, has_resolver: bool) {
    tracing::trace!(
        param = %name,
        has_schema = %has_schema,
        has_resolver = %has_resolver,
        "Parameter registered"
    );
}

/// Log that a named route replaced an earlier route of the same name for
/// reverse lookups.
pub fn log_route_name_replaced(name: &str, previous: &str, pattern: &str) {
    tracing::debug!(
        name = %name,
        previous = %previous,
        pattern = %pattern,
        "Route name reassigned"
    );
}
