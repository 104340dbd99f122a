//! The evaluator/compiler driver: turns a checked `analyzer::Expr` into a
//! callable [`CompiledExpression`] by compiling each node into a boxed
//! closure ("thunk") and composing them bottom-up. Kept as a tree of
//! closures rather than a generated code string, per spec.md's design note
//! favoring a tree-interpreter for laziness (short-circuiting `case`,
//! `&&`/`||`, and `curve` only ever touching the stops it actually needs).

use crate::context::EvalContext;
use crate::error::{CompileError, RuntimeError};
use crate::registry;
use crate::value::Value;
use analyzer::{Expr, LitValue};

/// A compiled node: `(mapProperties, feature) -> Result<Value, RuntimeError>`.
pub type Thunk = Box<dyn Fn(&EvalContext) -> Result<Value, RuntimeError> + Send + Sync>;

/// A fully compiled expression, ready to evaluate against many features.
pub struct CompiledExpression {
    thunk: Thunk,
    /// True iff this expression never consults `properties`/`geometry_type`/
    /// `id`, directly or through any descendant.
    pub is_feature_constant: bool,
    /// True iff this expression never consults `zoom`, directly or through
    /// any descendant.
    pub is_zoom_constant: bool,
}

impl CompiledExpression {
    pub fn evaluate(&self, ctx: &EvalContext) -> Result<Value, RuntimeError> {
        let result = (self.thunk)(ctx);
        if let Err(err) = &result {
            tracing::warn!(message = %err.message, "expression evaluation failed");
        }
        result
    }
}

pub(crate) struct CompiledNode {
    pub thunk: Thunk,
    pub feature_constant: bool,
    pub zoom_constant: bool,
}

/// Compile a checked expression tree (the output of `analyzer::analyze`).
pub fn compile(expr: &Expr) -> Result<CompiledExpression, CompileError> {
    let node = compile_node(expr)?;
    tracing::debug!(
        feature_constant = node.feature_constant,
        zoom_constant = node.zoom_constant,
        "compiled expression"
    );
    Ok(CompiledExpression {
        thunk: node.thunk,
        is_feature_constant: node.feature_constant,
        is_zoom_constant: node.zoom_constant,
    })
}

pub(crate) fn compile_node(expr: &Expr) -> Result<CompiledNode, CompileError> {
    match expr {
        Expr::Literal { value, .. } => {
            let v = literal_value(value);
            Ok(CompiledNode {
                thunk: Box::new(move |_ctx| Ok(v.clone())),
                feature_constant: true,
                zoom_constant: true,
            })
        }
        Expr::Call {
            name,
            ty,
            args,
            key,
        } => {
            let mut feature_constant = true;
            let mut zoom_constant = true;
            let mut compiled = Vec::with_capacity(args.len());
            for arg in args {
                let child = compile_node(arg)?;
                feature_constant &= child.feature_constant;
                zoom_constant &= child.zoom_constant;
                compiled.push(child.thunk);
            }

            let entry = registry::lookup(name).ok_or_else(|| {
                CompileError::new(
                    key.as_str(),
                    format!("No evaluator implementation is registered for \"{name}\"."),
                )
            })?;
            feature_constant &= !entry.feature_dependent;
            zoom_constant &= !entry.zoom_dependent;

            let call_ctx = registry::CallCtx {
                key,
                args,
                compiled,
                result_ty: &ty.result,
            };
            let thunk = (entry.compile)(call_ctx)?;

            Ok(CompiledNode {
                thunk,
                feature_constant,
                zoom_constant,
            })
        }
    }
}

fn literal_value(value: &LitValue) -> Value {
    match value {
        LitValue::Null => Value::Null,
        LitValue::Boolean(b) => Value::Boolean(*b),
        LitValue::Number(n) => Value::Number(*n),
        LitValue::String(s) => Value::String(s.clone()),
    }
}

/// Extract a literal number from an (uncompiled) argument expression.
/// `curve`'s stop keys and `exponential`'s base must be compile-time
/// constants, the same restriction real map styles already satisfy in
/// practice — a curve can't binary-search its stops if they move at
/// evaluation time.
pub(crate) fn literal_number(expr: &Expr) -> Option<f64> {
    match expr {
        Expr::Literal {
            value: LitValue::Number(n),
            ..
        } => Some(*n),
        _ => None,
    }
}
