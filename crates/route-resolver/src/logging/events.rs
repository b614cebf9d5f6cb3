//! Event types and specialized logging functions for resolution events.
//!
//! Each `resolve` call walks a queue of candidate routes. These functions log
//! what happened to each candidate and how the call finished.

use std::time::Duration;

use crate::RouteError;

// =============================================================================
// Candidate Events
// =============================================================================

/// What happened to one candidate during a resolution.
#[derive(Debug, Clone)]
pub enum CandidateLogEvent {
    /// The candidate is about to be attempted.
    Attempt {
        /// Number of parameters captured for this candidate.
        param_count: usize,
    },
    /// The candidate failed soft; resolution moves on.
    SoftFailure {
        /// Error code of the ignored reason, if one was given.
        code: Option<String>,
    },
    /// The candidate failed hard; resolution stops.
    HardFailure {
        /// Error code.
        code: String,
        /// Error message.
        message: String,
    },
    /// The candidate produced the result.
    Matched,
}

/// Log a candidate event.
///
/// This function logs candidate events at appropriate levels:
/// - Attempt: Trace level
/// - SoftFailure/Matched: Debug level
/// - HardFailure: Warn level
pub fn log_candidate_event(pattern: &str, index: usize, event: CandidateLogEvent) {
    match event {
        CandidateLogEvent::Attempt { param_count } => {
            tracing::trace!(
                pattern = %pattern,
                candidate = %index,
                param_count = %param_count,
                "Attempting candidate"
            );
        }
        CandidateLogEvent::SoftFailure { code } => {
            tracing::debug!(
                pattern = %pattern,
                candidate = %index,
                error_code = ?code,
                "Candidate rejected, trying next"
            );
        }
        CandidateLogEvent::HardFailure { code, message } => {
            tracing::warn!(
                pattern = %pattern,
                candidate = %index,
                error_code = %code,
                error_message = %message,
                "Candidate failed, aborting resolution"
            );
        }
        CandidateLogEvent::Matched => {
            tracing::debug!(
                pattern = %pattern,
                candidate = %index,
                "Candidate matched"
            );
        }
    }
}

/// Log the candidate list produced for a path.
pub fn log_candidates_enumerated(path: &str, patterns: &[&str]) {
    tracing::trace!(
        path = %path,
        count = %patterns.len(),
        candidates = ?patterns,
        "Candidates enumerated"
    );
}

// =============================================================================
// Resolution Outcome
// =============================================================================

/// Returns true if `duration` exceeds a non-zero `threshold_ms`.
pub fn should_log_slow_resolve(threshold_ms: u64, duration: &Duration) -> bool {
    threshold_ms > 0 && duration.as_millis() as u64 > threshold_ms
}

/// Log the end of a resolution.
///
/// - NotFound: Debug level
/// - Other errors: already logged per candidate, Trace level here
/// - Slow resolutions (any outcome): Warn level
pub fn log_resolution_finished(
    path: &str,
    outcome: Result<(), &RouteError>,
    attempted: usize,
    duration: Duration,
    slow_threshold_ms: u64,
) {
    let duration_ms = duration.as_millis() as u64;

    match outcome {
        Ok(()) => {
            tracing::trace!(
                path = %path,
                attempted = %attempted,
                duration_ms = %duration_ms,
                "Resolution succeeded"
            );
        }
        Err(error) if error.is_not_found() => {
            tracing::debug!(
                path = %path,
                attempted = %attempted,
                duration_ms = %duration_ms,
                "No route matched"
            );
        }
        Err(error) => {
            tracing::trace!(
                path = %path,
                attempted = %attempted,
                error_code = %error.code,
                duration_ms = %duration_ms,
                "Resolution failed"
            );
        }
    }

    if should_log_slow_resolve(slow_threshold_ms, &duration) {
        tracing::warn!(
            path = %path,
            duration_ms = %duration_ms,
            threshold_ms = %slow_threshold_ms,
            "Slow resolution"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slow_threshold_zero_disables() {
        assert!(!should_log_slow_resolve(0, &Duration::from_secs(60)));
    }

    #[test]
    fn test_slow_threshold_is_exclusive() {
        assert!(!should_log_slow_resolve(100, &Duration::from_millis(100)));
        assert!(should_log_slow_resolve(100, &Duration::from_millis(101)));
    }
}
