//! Compile-time diagnostics.
//!
//! Unlike `RuntimeError` (owned by `evaluator`), these never abort anything:
//! the type checker collects every diagnostic it finds and returns them as a
//! list keyed by the node's dotted `key` (§7: "All are collected and
//! returned as the `errors` list; nothing is thrown to the caller").

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub key: String,
    pub error: String,
}

impl Diagnostic {
    pub fn new(key: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            error: error.into(),
        }
    }
}
