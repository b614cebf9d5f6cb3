//! Test module for route-resolver
//!
//! Crate-level tests for configuration, error mapping and validation. Router
//! behavior is tested under `router::tests`.

#[cfg(test)]
pub mod config_tests;

#[cfg(test)]
pub mod error_tests;


#[cfg(test)]
pub mod validation_tests;
