//! Evaluates a checked `analyzer::Expr` tree against real feature/zoom
//! data: the behavioral half of the operator registry, the compiler that
//! turns a tree into a callable, and curve/color helpers.
//!
//! [`compile_expression`] is the single entry point most callers want: it
//! parses and type-checks the JSON expression (via `analyzer`), then
//! compiles the resulting typed tree into a [`CompiledExpression`] that can
//! be evaluated against many features without re-parsing or re-checking.

mod color;
mod compile;
mod context;
mod curve;
mod error;
mod registry;
mod value;

pub use compile::CompiledExpression;
pub use context::{EvalContext, Feature, MapProperties};
pub use error::{CompileError, RuntimeError};
pub use value::Value;

/// Everything that can go wrong building a [`CompiledExpression`]: either
/// the expression failed analysis (the flat diagnostics list from
/// `analyzer`) or it passed analysis but violated an operator-specific
/// compile-time constraint `analyzer`'s general type checker can't express
/// (currently only `curve`'s "result must be Number or Color").
#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionError {
    Diagnostics(Vec<analyzer::Diagnostic>),
    Compile(CompileError),
}

/// Parse, check, and compile a JSON expression in one call.
///
/// `expected` constrains the expression's overall result type; pass
/// `&analyzer::Ty::Value` to accept anything evaluable.
pub fn compile_expression(
    json: &serde_json::Value,
    expected: &analyzer::Ty,
) -> Result<CompiledExpression, ExpressionError> {
    let checked = analyzer::analyze(json, expected).map_err(ExpressionError::Diagnostics)?;
    compile::compile(&checked).map_err(ExpressionError::Compile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use analyzer::Ty;
    use serde_json::json;

    #[test]
    fn compiles_and_evaluates_a_well_typed_expression() {
        let compiled = compile_expression(&json!(["+", 1, 2, 3]), &Ty::Value).unwrap();
        let map = MapProperties { zoom: 0.0 };
        let feature = Feature::new(Default::default(), "Point", Value::Null);
        let ctx = EvalContext::new(&map, &feature);
        assert_eq!(compiled.evaluate(&ctx).unwrap(), Value::Number(6.0));
    }

    #[test]
    fn surfaces_analyzer_diagnostics_for_ill_typed_expressions() {
        let err = compile_expression(&json!(["+", 1, "two"]), &Ty::Value).unwrap_err();
        match err {
            ExpressionError::Diagnostics(diags) => {
                assert_eq!(diags[0].key, "2");
            }
            other => panic!("expected diagnostics, got {other:?}"),
        }
    }

    #[test]
    fn surfaces_compile_error_for_curve_with_non_number_or_color_result() {
        let err = compile_expression(
            &json!(["curve", ["linear"], ["zoom"], 0, "a", 10, "b"]),
            &Ty::Value,
        )
        .unwrap_err();
        match err {
            ExpressionError::Compile(e) => assert!(e.error.contains("Number or Color")),
            other => panic!("expected a compile error, got {other:?}"),
        }
    }
}
