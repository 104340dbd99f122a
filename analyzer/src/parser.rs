//! JSON (`serde_json::Value`) → [`Expr`] tree construction.
//!
//! Three responsibilities live here, ahead of the type checker:
//! assigning every node its dotted `key`, checking the called operator name
//! actually exists in [`crate::registry`], and instantiating that
//! operator's declared type scheme with fresh, call-site-unique generic
//! variable names (the hygienic-generics scheme: `"T0"` becomes
//! `"T0@1.2"`) so that two independent generic calls nested in the same
//! expression never alias each other's bindings during checking.

use crate::ast::{Expr, LitValue};
use crate::diagnostics::Diagnostic;
use crate::registry;
use crate::types::{Lambda, Ty};
use serde_json::Value;

/// Parse a JSON expression into an [`Expr`] tree.
///
/// Returns every diagnostic found across the whole tree (unknown operator
/// names, malformed call shapes) rather than stopping at the first one,
/// matching the flat-diagnostics-list contract used everywhere else in this
/// crate.
pub fn parse(json: &Value) -> Result<Expr, Vec<Diagnostic>> {
    parse_node(json, "")
}

fn child_key(parent: &str, position: usize) -> String {
    if parent.is_empty() {
        position.to_string()
    } else {
        format!("{parent}.{position}")
    }
}

fn parse_node(value: &Value, key: &str) -> Result<Expr, Vec<Diagnostic>> {
    match value {
        Value::Null => Ok(Expr::Literal {
            value: LitValue::Null,
            ty: Ty::Null,
            key: key.to_string(),
        }),
        Value::Bool(b) => Ok(Expr::Literal {
            value: LitValue::Boolean(*b),
            ty: Ty::Boolean,
            key: key.to_string(),
        }),
        Value::Number(n) => match n.as_f64() {
            Some(f) => Ok(Expr::Literal {
                value: LitValue::Number(f),
                ty: Ty::Number,
                key: key.to_string(),
            }),
            None => Err(vec![Diagnostic::new(key, "Number literal is out of range.")]),
        },
        Value::String(s) => Ok(Expr::Literal {
            value: LitValue::String(s.clone()),
            ty: Ty::String,
            key: key.to_string(),
        }),
        Value::Array(items) => parse_call(items, key),
        Value::Object(_) => Err(vec![Diagnostic::new(
            key,
            "Bare JSON objects are not valid expressions; use [\"object\", ...] or [\"literal\", ...] instead.",
        )]),
    }
}

fn parse_call(items: &[Value], key: &str) -> Result<Expr, Vec<Diagnostic>> {
    let Some(head) = items.first() else {
        return Err(vec![Diagnostic::new(
            key,
            "Expected a non-empty array: [\"operator\", ...args].",
        )]);
    };
    let Some(name) = head.as_str() else {
        return Err(vec![Diagnostic::new(
            key,
            "The first element of a call array must be an operator name string.",
        )]);
    };
    let Some(scheme) = registry::lookup(name) else {
        return Err(vec![Diagnostic::new(
            key,
            format!("Unknown operator \"{name}\"."),
        )]);
    };

    let mut args = Vec::with_capacity(items.len() - 1);
    let mut errors = Vec::new();
    for (i, arg) in items[1..].iter().enumerate() {
        match parse_node(arg, &child_key(key, i + 1)) {
            Ok(expr) => args.push(expr),
            Err(mut diags) => errors.append(&mut diags),
        }
    }
    if !errors.is_empty() {
        return Err(errors);
    }

    let suffix = if key.is_empty() { "root" } else { key };
    let ty = instantiate(&scheme, suffix);

    Ok(Expr::Call {
        name: name.to_string(),
        ty,
        args,
        key: key.to_string(),
    })
}

/// Instantiate a declared scheme for one call site: every [`Ty::Typename`]
/// is renamed `"<name>@<suffix>"`, so sibling calls to the same operator (or
/// nested calls anywhere else in the tree) never share a substitution slot.
fn instantiate(scheme: &Lambda, suffix: &str) -> Lambda {
    tracing::trace!(suffix, "instantiating generic scheme");
    Lambda {
        result: rename(&scheme.result, suffix),
        args: scheme.args.iter().map(|t| rename(t, suffix)).collect(),
    }
}

fn rename(ty: &Ty, suffix: &str) -> Ty {
    match ty {
        Ty::Typename(n) => Ty::Typename(format!("{n}@{suffix}")),
        Ty::Vector(inner) => Ty::Vector(Box::new(rename(inner, suffix))),
        Ty::Array(inner, n) => Ty::Array(Box::new(rename(inner, suffix)), *n),
        Ty::AnyArray(inner) => Ty::AnyArray(Box::new(rename(inner, suffix))),
        Ty::Variant(members) => Ty::Variant(members.iter().map(|m| rename(m, suffix)).collect()),
        Ty::NArgs(members) => Ty::NArgs(members.iter().map(|m| rename(m, suffix)).collect()),
        Ty::Lambda(l) => Ty::Lambda(Box::new(instantiate(l, suffix))),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn literal_scalars_get_concrete_types() {
        assert_eq!(parse(&json!(null)).unwrap().ty(), Ty::Null);
        assert_eq!(parse(&json!(true)).unwrap().ty(), Ty::Boolean);
        assert_eq!(parse(&json!(1.5)).unwrap().ty(), Ty::Number);
        assert_eq!(parse(&json!("hi")).unwrap().ty(), Ty::String);
    }

    #[test]
    fn root_key_is_empty_and_children_are_one_based() {
        let expr = parse(&json!(["+", 1, 2])).unwrap();
        assert_eq!(expr.key(), "");
        let Expr::Call { args, .. } = &expr else {
            panic!("expected call");
        };
        assert_eq!(args[0].key(), "1");
        assert_eq!(args[1].key(), "2");
    }

    #[test]
    fn nested_keys_are_dotted() {
        let expr = parse(&json!(["+", ["*", 2, 3], 4])).unwrap();
        let Expr::Call { args, .. } = &expr else {
            panic!("expected call");
        };
        assert_eq!(args[0].key(), "1");
        let Expr::Call { args: nested, .. } = &args[0] else {
            panic!("expected nested call");
        };
        assert_eq!(nested[0].key(), "1.1");
        assert_eq!(nested[1].key(), "1.2");
    }

    #[test]
    fn unknown_operator_is_reported_with_its_key() {
        let err = parse(&json!(["bogus", 1])).unwrap_err();
        assert_eq!(err.len(), 1);
        assert_eq!(err[0].key, "");
        assert!(err[0].error.contains("bogus"));
    }

    #[test]
    fn errors_from_multiple_args_are_all_collected() {
        let err = parse(&json!(["+", ["bogus1"], ["bogus2"]])).unwrap_err();
        assert_eq!(err.len(), 2);
        assert_eq!(err[0].key, "1");
        assert_eq!(err[1].key, "2");
    }

    #[test]
    fn generic_instantiation_is_unique_per_call_site() {
        let expr = parse(&json!(["case", true, 1, 2])).unwrap();
        let Expr::Call { ty, .. } = &expr else {
            panic!("expected call");
        };
        let Ty::Typename(name) = &ty.result else {
            panic!("expected generic result");
        };
        assert_eq!(name, "T0@root");
    }

    #[test]
    fn two_generic_calls_do_not_alias() {
        let expr = parse(&json!(["+", ["case", true, 1, 2], ["case", false, 3, 4]])).unwrap();
        let Expr::Call { args, .. } = &expr else {
            panic!("expected call");
        };
        let Expr::Call { ty: ty1, .. } = &args[0] else {
            panic!()
        };
        let Expr::Call { ty: ty2, .. } = &args[1] else {
            panic!()
        };
        assert_ne!(ty1.result, ty2.result);
    }
}
