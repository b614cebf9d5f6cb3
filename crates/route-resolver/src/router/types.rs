//! Internal types for the router module
//!
//! This module contains internal type definitions used across the router
//! implementation. These types are not part of the public API.

use super::trie::Segment;
use crate::handler::BoxedHandler;

/// Registered route (internal)
///
/// Immutable once registered. The original segments are kept so `reverse`
/// can rebuild a concrete path.
pub(crate) struct Route<Ctx: Clone + Send + Sync + 'static> {
    /// Name used for reverse lookups
    pub(crate) name: Option<String>,
    /// Segments as registered, casing preserved
    pub(crate) segments: Vec<Segment>,
    /// Dynamic parameter names, left to right
    pub(crate) param_names: Vec<String>,
    /// Normalized pattern text, e.g. `/users/:id`
    pub(crate) pattern: String,
    pub(crate) handler: BoxedHandler<Ctx>,
}

impl<Ctx: Clone + Send + Sync + 'static> Route<Ctx> {
    pub(crate) fn new(path: &str, name: Option<String>, handler: BoxedHandler<Ctx>) -> Self {
        let segments = Segment::parse_path(path);
        let param_names = segments
            .iter()
            .filter_map(|s| s.param_name().map(str::to_string))
            .collect();
        let pattern = format!(
            "/{}",
            segments
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("/")
        );

        Self {
            name,
            segments,
            param_names,
            pattern,
            handler,
        }
    }
}

impl<Ctx: Clone + Send + Sync + 'static> std::fmt::Debug for Route<Ctx> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Route")
            .field("name", &self.name)
            .field("pattern", &self.pattern)
            .field("param_names", &self.param_names)
            .finish()
    }
}
