//! Constants and default values for the logging module.

/// Length of the short resolve ID format (first N characters of UUID).
///
/// Short IDs keep log lines compact while still correlating the events of
/// one resolution.
pub const SHORT_ID_LENGTH: usize = 8;

/// Default threshold for slow resolution logging in milliseconds.
///
/// Resolutions exceeding this duration trigger a warning log.
/// Set to 0 to disable slow resolution logging.
pub const DEFAULT_SLOW_THRESHOLD_MS: u64 = 1000;
