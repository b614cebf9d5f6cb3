//! Structured logging for route registration and resolution
//!
//! All logging goes through `tracing`; the crate never installs a subscriber.
//!
//! # Features
//!
//! - **Resolve ID Tracking**: UUID v7 based IDs attached to a `resolve` span
//! - **Candidate Events**: one event per attempted candidate, with the level
//!   reflecting soft or hard failure
//! - **Slow Resolution Detection**: warn when a call exceeds the configured
//!   threshold
//!
//! # Architecture
//!
//! - **types**: Core types (ResolveId)
//! - **constants**: Centralized defaults
//! - **events**: Candidate and outcome logging
//! - **lifecycle**: Route and parameter registration logging

// =============================================================================
// Submodules
// =============================================================================

mod constants;
mod events;
mod lifecycle;
mod types;

// =============================================================================
// Public API Re-exports
// =============================================================================

// Constants
pub use constants::{DEFAULT_SLOW_THRESHOLD_MS, SHORT_ID_LENGTH};

// Core Types
pub use types::ResolveId;

// Event Types and Logging
pub use events::{
    CandidateLogEvent, log_candidate_event, log_candidates_enumerated, log_resolution_finished,
    should_log_slow_resolve,
};

// Lifecycle Logging
pub use lifecycle::{log_param_registered, log_route_name_replaced, log_route_registered};
