//! The two error strata: [`CompileError`] for problems found while turning
//! a checked tree into a callable (operator-specific constraints the
//! general type checker can't express, e.g. `curve`'s result type), and
//! [`RuntimeError`] for failures while actually running a compiled
//! expression against a feature (spec.md §7's "ExpressionEvaluationError").
//!
//! Plain enums with hand-written constructors, no `Display`/`Error` impl —
//! matching the rest of this codebase, which never reaches for `thiserror`.

#[derive(Debug, Clone, PartialEq)]
pub struct CompileError {
    pub key: String,
    pub error: String,
}

impl CompileError {
    pub fn new(key: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            error: error.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeError {
    pub message: String,
}

impl RuntimeError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn missing_property(key: &str, object_keys: &[String]) -> Self {
        Self::new(format!(
            "Property {key} not found in object with keys: [{}]",
            object_keys.join(", ")
        ))
    }

    pub fn index_out_of_bounds(index: f64, length: usize) -> Self {
        Self::new(format!(
            "Index {index} is out of bounds for an array of length {length}."
        ))
    }

    pub fn coercion_failed(target: &str) -> Self {
        Self::new(format!("Could not coerce value to {target}."))
    }

    pub fn empty_curve_stops() -> Self {
        Self::new("A curve must have at least one stop.")
    }
}
