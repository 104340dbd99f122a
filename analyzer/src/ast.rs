//! Expression tree nodes.
//!
//! An [`Expr`] is either a literal value or a lambda (operator) call. Every
//! node carries a `key`: a dotted path (`""`, `"1"`, `"1.2"`, ...) from the
//! root, used verbatim in every diagnostic.

use crate::types::{Lambda, Ty};
use serde::Serialize;

/// A JSON literal as carried by a [`Expr::Literal`] node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LitValue {
    Null,
    String(String),
    Number(f64),
    Boolean(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal {
        value: LitValue,
        ty: Ty,
        key: String,
    },
    Call {
        name: String,
        ty: Lambda,
        args: Vec<Expr>,
        key: String,
    },
}

impl Expr {
    pub fn key(&self) -> &str {
        match self {
            Expr::Literal { key, .. } => key,
            Expr::Call { key, .. } => key,
        }
    }

    /// The node's own type as a [`Ty`] (a literal's concrete type, or an
    /// operator call's declared/resolved [`Lambda`]).
    pub fn ty(&self) -> Ty {
        match self {
            Expr::Literal { ty, .. } => ty.clone(),
            Expr::Call { ty, .. } => Ty::Lambda(Box::new(ty.clone())),
        }
    }

    /// True if any [`Ty::Typename`] remains anywhere in this node or its
    /// children. A fully checked tree must answer `false` everywhere (§8:
    /// "Generic resolution").
    pub fn contains_typename(&self) -> bool {
        match self {
            Expr::Literal { ty, .. } => ty.is_generic(),
            Expr::Call { ty, args, .. } => {
                ty.result.is_generic()
                    || ty.args.iter().any(Ty::is_generic)
                    || args.iter().any(Expr::contains_typename)
            }
        }
    }

    /// Re-emit this tree as a JSON value: literals become their value,
    /// lambda calls become `[name, ...children]`. Used by the idempotence
    /// property (`compile(serialize(compile(expr))) == compile(expr)`).
    pub fn serialize_to_json(&self) -> serde_json::Value {
        match self {
            Expr::Literal { value, .. } => match value {
                LitValue::Null => serde_json::Value::Null,
                LitValue::String(s) => serde_json::Value::String(s.clone()),
                LitValue::Number(n) => serde_json::Number::from_f64(*n)
                    .map(serde_json::Value::Number)
                    .unwrap_or(serde_json::Value::Null),
                LitValue::Boolean(b) => serde_json::Value::Bool(*b),
            },
            Expr::Call { name, args, .. } => {
                let mut out = Vec::with_capacity(1 + args.len());
                out.push(serde_json::Value::String(name.clone()));
                out.extend(args.iter().map(Expr::serialize_to_json));
                serde_json::Value::Array(out)
            }
        }
    }
}
