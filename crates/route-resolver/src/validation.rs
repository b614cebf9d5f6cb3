//! Parameter Validation
//!
//! This module provides the schema capability used by parameter definitions.
//! A [`Schema`] receives the raw captured value and returns a [`SchemaOutput`]:
//! the (possibly normalized) value plus an optional validation error. A
//! failed validation is always a hard rejection of the route.
//!
//! It also carries the field-level error types and the [`ValidationRules`]
//! builder the ready-made schemas are written with.
//!
//! # Example
//!
//! ```rust,ignore
//! use route_resolver::validation::{IntegerSchema, StringSchema};
//!
//! let id = IntegerSchema::new().min(1);
//! let slug = StringSchema::new()
//!     .max_length(64)
//!     .pattern(r"^[a-z0-9-]+$")
//!     .lowercase();
//!
//! let router = Router::new()
//!     .param_schema("id", id)
//!     .param_schema("slug", slug);
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, trace, warn};

use crate::{RouteError, RouterConfig};

/// Field name used by the ready-made schemas, which validate a single value.
pub const VALUE_FIELD: &str = "value";

/// Validation error for a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// The name of the field that failed validation
    pub field: String,
    /// Human-readable error message
    pub message: String,
    /// Error code identifying the type of validation failure
    pub code: String,
}

impl FieldError {
    /// Create a new field error
    pub fn new(
        field: impl Into<String>,
        message: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code: code.into(),
        }
    }

    /// Create a "required" field error
    pub fn required(field: impl Into<String>) -> Self {
        let field = field.into();
        Self::new(&field, format!("{} is required", field), "required")
    }

    /// Create a "min_length" field error
    pub fn min_length(field: impl Into<String>, min: usize) -> Self {
        let field = field.into();
        Self::new(
            &field,
            format!("{} must be at least {} characters", field, min),
            "min_length",
        )
    }

    /// Create a "max_length" field error
    pub fn max_length(field: impl Into<String>, max: usize) -> Self {
        let field = field.into();
        Self::new(
            &field,
            format!("{} must be at most {} characters", field, max),
            "max_length",
        )
    }

    /// Create a "range" field error
    pub fn range(field: impl Into<String>, min: i64, max: i64) -> Self {
        let field = field.into();
        Self::new(
            &field,
            format!("{} must be between {} and {}", field, min, max),
            "range",
        )
    }

    /// Create a "pattern" field error
    pub fn pattern(field: impl Into<String>, pattern: &str) -> Self {
        let field = field.into();
        Self::new(
            &field,
            format!("{} must match pattern: {}", field, pattern),
            "pattern",
        )
    }

    /// Create a "type" field error
    pub fn invalid_type(field: impl Into<String>, expected: &str) -> Self {
        let field = field.into();
        Self::new(&field, format!("{} must be {}", field, expected), "type")
    }

    /// Create a custom field error
    pub fn custom(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(field, message, "custom")
    }
}

/// Result of validating a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Whether the value is valid
    pub valid: bool,
    /// List of field-level errors (empty if valid)
    pub errors: Vec<FieldError>,
}

impl ValidationResult {
    /// Create a successful validation result
    pub fn ok() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
        }
    }

    /// Create a validation result from a list of errors.
    /// If the list is empty, the result is valid.
    pub fn from_errors(errors: Vec<FieldError>) -> Self {
        if !errors.is_empty() {
            let field_names: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
            debug!(
                error_count = errors.len(),
                fields = ?field_names,
                "Validation failed"
            );
        }
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Get the errors
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Convert to a map of field -> errors for easier lookup
    pub fn errors_by_field(&self) -> HashMap<String, Vec<&FieldError>> {
        let mut map: HashMap<String, Vec<&FieldError>> = HashMap::new();
        for error in &self.errors {
            map.entry(error.field.clone()).or_default().push(error);
        }
        map
    }

    /// Merge another validation result into this one
    pub fn merge(mut self, other: ValidationResult) -> Self {
        self.errors.extend(other.errors);
        self.valid = self.errors.is_empty();
        self
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::ok()
    }
}

/// Output of [`Schema::validate`]: the normalized value and an optional error.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaOutput {
    /// The value handed on to the parameter resolver or handler
    pub value: Value,
    /// Set when the value is invalid
    pub error: Option<ValidationResult>,
}

impl SchemaOutput {
    /// A passing validation carrying the (possibly normalized) value.
    pub fn ok(value: Value) -> Self {
        Self { value, error: None }
    }

    /// A failing validation.
    pub fn invalid(value: Value, errors: Vec<FieldError>) -> Self {
        Self {
            value,
            error: Some(ValidationResult::from_errors(errors)),
        }
    }

    /// Build an output from a rules result, keeping `value` either way.
    pub fn from_result(value: Value, result: ValidationResult) -> Self {
        if result.is_valid() {
            Self::ok(value)
        } else {
            Self {
                value,
                error: Some(result),
            }
        }
    }

    /// Returns true if no error is set.
    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }
}

/// Validation capability attached to a parameter definition.
///
/// Implementations may normalize the value (for example parse a numeric
/// string into a JSON number); the returned value replaces the raw capture.
pub trait Schema: Send + Sync {
    /// Validate `value`, returning the normalized value and any error.
    fn validate(&self, value: Value) -> SchemaOutput;
}

/// Schema built from a closure.
pub struct FnSchema<F>(F);

impl<F> FnSchema<F>
where
    F: Fn(Value) -> SchemaOutput + Send + Sync,
{
    /// Wrap `f` as a schema.
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> Schema for FnSchema<F>
where
    F: Fn(Value) -> SchemaOutput + Send + Sync,
{
    fn validate(&self, value: Value) -> SchemaOutput {
        (self.0)(value)
    }
}

#[derive(Debug, Clone)]
enum PatternRule {
    Compiled(Regex),
    Invalid(String),
}

/// Schema for string parameters.
///
/// Accepts JSON strings only. With [`StringSchema::lowercase`] the value is
/// lower-cased before the other rules run and the lower-cased value is passed on.
#[derive(Debug, Clone, Default)]
pub struct StringSchema {
    min_length: Option<usize>,
    max_length: Option<usize>,
    pattern: Option<PatternRule>,
    lowercase: bool,
}

impl StringSchema {
    /// Create a schema accepting any string.
    pub fn new() -> Self {
        Self::default()
    }

    /// Require at least `min` bytes.
    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    /// Allow at most `max` bytes.
    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Require the value to match `pattern`.
    ///
    /// An invalid pattern makes every validation fail with an
    /// `invalid_pattern` error.
    pub fn pattern(mut self, pattern: &str) -> Self {
        self.pattern = Some(match Regex::new(pattern) {
            Ok(re) => PatternRule::Compiled(re),
            Err(e) => {
                warn!(pattern = %pattern, error = %e, "Invalid schema regex pattern");
                PatternRule::Invalid(pattern.to_string())
            }
        });
        self
    }

    /// Lower-case the value before validating and passing it on.
    pub fn lowercase(mut self) -> Self {
        self.lowercase = true;
        self
    }
}

impl Schema for StringSchema {
    fn validate(&self, value: Value) -> SchemaOutput {
        let text = match value {
            Value::String(s) if self.lowercase => s.to_lowercase(),
            Value::String(s) => s,
            other => {
                return SchemaOutput::invalid(
                    other,
                    vec![FieldError::invalid_type(VALUE_FIELD, "a string")],
                );
            }
        };

        let mut rules = ValidationRules::new();
        if let Some(min) = self.min_length {
            rules = rules.min_length(VALUE_FIELD, &text, min);
        }
        if let Some(max) = self.max_length {
            rules = rules.max_length(VALUE_FIELD, &text, max);
        }
        match &self.pattern {
            Some(PatternRule::Compiled(re)) => {
                rules = rules.pattern_regex(VALUE_FIELD, &text, re);
            }
            Some(PatternRule::Invalid(pattern)) => {
                rules = rules.add_error(FieldError::new(
                    VALUE_FIELD,
                    format!("Invalid validation pattern: {}", pattern),
                    "invalid_pattern",
                ));
            }
            None => {}
        }

        SchemaOutput::from_result(Value::String(text), rules.build())
    }
}

/// Schema for integer parameters.
///
/// Accepts a JSON integer or a string holding one; the output is always a
/// JSON integer.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntegerSchema {
    min: Option<i64>,
    max: Option<i64>,
}

impl IntegerSchema {
    /// Create a schema accepting any `i64`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inclusive lower bound.
    pub fn min(mut self, min: i64) -> Self {
        self.min = Some(min);
        self
    }

    /// Inclusive upper bound.
    pub fn max(mut self, max: i64) -> Self {
        self.max = Some(max);
        self
    }
}

impl Schema for IntegerSchema {
    fn validate(&self, value: Value) -> SchemaOutput {
        let parsed = match &value {
            Value::String(s) => s.trim().parse::<i64>().ok(),
            Value::Number(n) => n.as_i64(),
            _ => None,
        };
        let Some(number) = parsed else {
            return SchemaOutput::invalid(
                value,
                vec![FieldError::invalid_type(VALUE_FIELD, "an integer")],
            );
        };

        let result = if self.min.is_some() || self.max.is_some() {
            ValidationRules::new()
                .range(
                    VALUE_FIELD,
                    number,
                    self.min.unwrap_or(i64::MIN),
                    self.max.unwrap_or(i64::MAX),
                )
                .build()
        } else {
            ValidationResult::ok()
        };

        SchemaOutput::from_result(Value::from(number), result)
    }
}

/// Builder for validation rules.
///
/// # Example
///
/// ```rust,ignore
/// let result = ValidationRules::new()
///     .required("slug", &slug)
///     .max_length("slug", &slug, 64)
///     .pattern("slug", &slug, r"^[a-z0-9-]+$")
///     .build();
/// ```
#[derive(Debug, Default)]
pub struct ValidationRules {
    errors: Vec<FieldError>,
}

impl ValidationRules {
    /// Create a new validation rules builder
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Add a custom error
    pub fn add_error(mut self, error: FieldError) -> Self {
        trace!(field = %error.field, code = %error.code, "Adding custom validation error");
        self.errors.push(error);
        self
    }

    /// Validate that a string field is not empty (required)
    pub fn required(mut self, field: &str, value: &str) -> Self {
        if value.trim().is_empty() {
            trace!(field = %field, "Required field is empty");
            self.errors.push(FieldError::required(field));
        }
        self
    }

    /// Validate minimum string length
    pub fn min_length(mut self, field: &str, value: &str, min: usize) -> Self {
        if value.len() < min {
            trace!(field = %field, length = value.len(), min = min, "Field below minimum length");
            self.errors.push(FieldError::min_length(field, min));
        }
        self
    }

    /// Validate maximum string length
    pub fn max_length(mut self, field: &str, value: &str, max: usize) -> Self {
        if value.len() > max {
            trace!(field = %field, length = value.len(), max = max, "Field exceeds maximum length");
            self.errors.push(FieldError::max_length(field, max));
        }
        self
    }

    /// Validate that a number is within a range (inclusive)
    pub fn range(mut self, field: &str, value: i64, min: i64, max: i64) -> Self {
        if value < min || value > max {
            trace!(field = %field, value = value, min = min, max = max, "Field outside valid range");
            self.errors.push(FieldError::range(field, min, max));
        }
        self
    }

    /// Validate that a string matches a regex pattern
    pub fn pattern(self, field: &str, value: &str, pattern: &str) -> Self {
        match Regex::new(pattern) {
            Ok(re) => self.pattern_regex(field, value, &re),
            Err(e) => {
                warn!(field = %field, pattern = %pattern, error = %e, "Invalid validation regex pattern");
                self.add_error(FieldError::new(
                    field,
                    format!("Invalid validation pattern: {}", pattern),
                    "invalid_pattern",
                ))
            }
        }
    }

    /// Validate that a string matches an already compiled regex
    pub fn pattern_regex(mut self, field: &str, value: &str, re: &Regex) -> Self {
        if !re.is_match(value) {
            trace!(field = %field, pattern = %re.as_str(), "Field does not match pattern");
            self.errors.push(FieldError::pattern(field, re.as_str()));
        }
        self
    }

    /// Add a custom validation with a predicate
    pub fn custom<F>(mut self, field: &str, predicate: F, message: &str) -> Self
    where
        F: FnOnce() -> bool,
    {
        if !predicate() {
            trace!(field = %field, message = %message, "Custom validation failed");
            self.errors.push(FieldError::custom(field, message));
        }
        self
    }

    /// Build the validation result
    pub fn build(self) -> ValidationResult {
        ValidationResult::from_errors(self.errors)
    }
}

/// Validate a request path against the configured length limit.
///
/// # Errors
///
/// Returns `RouteError::bad_request` if the path is longer than
/// `config.max_path_length` bytes.
pub fn validate_path_length(path: &str, config: &RouterConfig) -> Result<(), RouteError> {
    if path.len() > config.max_path_length {
        return Err(RouteError::bad_request(format!(
            "Path length {} bytes exceeds maximum {} bytes",
            path.len(),
            config.max_path_length
        )));
    }
    Ok(())
}
