//! Router implementation with builder pattern
//!
//! This module provides the [`Router`] type: a segment trie of registered
//! routes plus the asynchronous resolver that walks its candidates.
//!
//! ```rust,ignore
//! let router = Router::new()
//!     .param_resolver("user", load_user)
//!     .route("/users/:user", show_user)
//!     .route("/:page", show_page);
//!
//! let output = router.resolve("/users/7").await?;
//! ```
//!
//! # Candidate order
//!
//! For a given path, matching routes are tried depth-first with literal
//! segments preferred over dynamic ones at every position. Routes registered
//! under the same pattern keep their registration order.

// Module declarations
mod core;
mod resolve;
mod trie;
mod types;

// Public re-exports
pub use self::core::Router;

#[cfg(test)]
mod tests;
