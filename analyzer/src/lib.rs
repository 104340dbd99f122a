//! Expression analyzer: parses a JSON-array-shaped expression, checks it
//! against the closed operator registry's type schemes, and returns either
//! a fully resolved, typed [`ast::Expr`] tree or the flat list of
//! diagnostics found anywhere in it.
//!
//! Pipeline: parse (assign keys, verify operator names, instantiate fresh
//! generics per call site) → check (bottom-up argument-slot matching,
//! `NArgs` expansion, generic resolution). Evaluation of a checked tree
//! against real feature/zoom data lives in the sibling `evaluator` crate.

pub mod ast;
pub mod check;
pub mod diagnostics;
pub mod parser;
pub mod registry;
pub mod types;

pub use ast::{Expr, LitValue};
pub use diagnostics::Diagnostic;
pub use types::{Lambda, Subst, Ty, match_type};

/// Parse and check a JSON expression in one call: the public entry point
/// most callers want. `expected` is the type the whole expression's result
/// must be assignable to (pass [`Ty::Value`] to accept anything but an
/// interpolation curve).
pub fn analyze(json: &serde_json::Value, expected: &Ty) -> Result<Expr, Vec<Diagnostic>> {
    let parsed = match parser::parse(json) {
        Ok(parsed) => parsed,
        Err(diagnostics) => {
            tracing::debug!(count = diagnostics.len(), %json, "parse failed");
            return Err(diagnostics);
        }
    };
    match check::check(expected, &parsed) {
        Ok(checked) => Ok(checked),
        Err(diagnostics) => {
            tracing::debug!(count = diagnostics.len(), %json, "type check failed");
            Err(diagnostics)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn analyze_accepts_a_well_typed_expression() {
        let expr = analyze(&json!(["+", 1, 2, 3]), &Ty::Value).unwrap();
        assert_eq!(expr.ty(), Ty::Number);
    }

    #[test]
    fn analyze_reports_unknown_operator() {
        let err = analyze(&json!(["nope", 1]), &Ty::Value).unwrap_err();
        assert_eq!(err.len(), 1);
        assert!(err[0].error.contains("nope"));
    }

    #[test]
    fn analyze_reports_type_mismatch() {
        let err = analyze(&json!(["+", 1, "two"]), &Ty::Value).unwrap_err();
        assert_eq!(err[0].key, "2");
    }

    #[test]
    fn analyze_rejects_wrong_top_level_type() {
        let err = analyze(&json!(["+", 1, 2]), &Ty::String).unwrap_err();
        assert_eq!(err[0].key, "");
    }
}
