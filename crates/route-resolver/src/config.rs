//! Configuration module for the router.
//!
//! This module provides the [`RouterConfig`] struct for customizing how paths
//! are matched and how resolutions are logged.
//!
//! # Example
//! ```rust,ignore
//! use route_resolver::{Router, RouterConfig};
//!
//! let config = RouterConfig::new()
//!     .with_case_insensitive(true)
//!     .with_slow_resolve_threshold(250);
//!
//! let router = Router::with_config(config)?;
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::logging::DEFAULT_SLOW_THRESHOLD_MS;

/// Default upper bound on the byte length of a path passed to `resolve`.
pub const DEFAULT_MAX_PATH_LENGTH: usize = 8 * 1024;

/// Error type for configuration validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigValidationError {
    /// max_path_length must be greater than 0
    InvalidMaxPathLength,
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidMaxPathLength => {
                write!(f, "max_path_length must be greater than 0")
            }
        }
    }
}

impl std::error::Error for ConfigValidationError {}

/// Router configuration.
///
/// All fields have defaults that match a plain `Router::new()`.
///
/// # Fields
///
/// * `case_insensitive` - Lower-case literal segments before matching. Dynamic
///   captures keep the caller's casing. Default: false.
///
/// * `max_path_length` - Paths longer than this many bytes are rejected with a
///   `BadRequest` error before matching. Default: 8KB.
///
/// * `slow_resolve_threshold_ms` - Resolutions slower than this are logged at
///   warn level. 0 disables the check. Default: 1000.
///
/// * `log_candidates` - Trace-log every candidate pattern produced for a path.
///   Default: false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Match literal segments case-insensitively (default: false)
    pub case_insensitive: bool,
    /// Maximum accepted path length in bytes (default: 8KB)
    pub max_path_length: usize,
    /// Slow resolution warning threshold in milliseconds (default: 1000)
    pub slow_resolve_threshold_ms: u64,
    /// Trace-log enumerated candidates (default: false)
    pub log_candidates: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            case_insensitive: false,
            max_path_length: DEFAULT_MAX_PATH_LENGTH,
            slow_resolve_threshold_ms: DEFAULT_SLOW_THRESHOLD_MS,
            log_candidates: false,
        }
    }
}

impl RouterConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration and return an error if invalid.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_path_length` is 0.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.max_path_length == 0 {
            return Err(ConfigValidationError::InvalidMaxPathLength);
        }
        Ok(())
    }

    /// Enable or disable case-insensitive literal matching.
    #[must_use = "This method returns a new RouterConfig and does not modify self"]
    pub fn with_case_insensitive(mut self, enabled: bool) -> Self {
        self.case_insensitive = enabled;
        self
    }

    /// Set the maximum accepted path length in bytes.
    #[must_use = "This method returns a new RouterConfig and does not modify self"]
    pub fn with_max_path_length(mut self, length: usize) -> Self {
        self.max_path_length = length;
        self
    }

    /// Set the slow resolution threshold in milliseconds (0 disables).
    #[must_use = "This method returns a new RouterConfig and does not modify self"]
    pub fn with_slow_resolve_threshold(mut self, ms: u64) -> Self {
        self.slow_resolve_threshold_ms = ms;
        self
    }

    /// Enable or disable trace logging of enumerated candidates.
    #[must_use = "This method returns a new RouterConfig and does not modify self"]
    pub fn with_candidate_logging(mut self, enabled: bool) -> Self {
        self.log_candidates = enabled;
        self
    }
}
