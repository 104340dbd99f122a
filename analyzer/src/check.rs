//! The type checker: bottom-up resolution of operator calls against their
//! declared (already call-site-instantiated) type scheme.
//!
//! Each [`Expr::Call`] is checked independently of its parent: children are
//! resolved first, then the call's declared argument slots are expanded
//! against the actual argument count (greedy `NArgs` expansion), each
//! resolved child type is matched against its slot (threading a shared
//! [`Subst`] so repeated/generic slots agree with each other), and finally
//! the declared result type is substituted to a concrete type.

use crate::ast::Expr;
use crate::diagnostics::Diagnostic;
use crate::types::{Subst, Ty, match_type};

/// Check `expr` and additionally require its overall result to be
/// assignable to `expected`. Returns the resolved tree (every `Typename`
/// replaced by a concrete type) or the full flat list of diagnostics found
/// anywhere in it.
pub fn check(expected: &Ty, expr: &Expr) -> Result<Expr, Vec<Diagnostic>> {
    let (resolved, mut diagnostics) = resolve(expr);
    if diagnostics.is_empty() {
        if let Err(msg) = match_type(expected, &resolved.ty(), &mut None) {
            diagnostics.push(Diagnostic::new(resolved.key(), msg));
        }
    }
    if diagnostics.is_empty() {
        Ok(resolved)
    } else {
        Err(diagnostics)
    }
}

/// Bottom-up resolution with no externally imposed expectation; used
/// internally for arguments, whose expected type comes from their parent
/// call's own declared scheme rather than from the grandparent.
fn resolve(expr: &Expr) -> (Expr, Vec<Diagnostic>) {
    match expr {
        Expr::Literal { .. } => (expr.clone(), Vec::new()),
        Expr::Call {
            name,
            ty,
            args,
            key,
        } => resolve_call(name, ty, args, key),
    }
}

fn resolve_call(
    name: &str,
    scheme: &crate::types::Lambda,
    args: &[Expr],
    key: &str,
) -> (Expr, Vec<Diagnostic>) {
    let mut diagnostics = Vec::new();
    let mut resolved_args = Vec::with_capacity(args.len());
    for arg in args {
        let (resolved_arg, arg_diags) = resolve(arg);
        diagnostics.extend(arg_diags);
        resolved_args.push(resolved_arg);
    }

    let (head, repeat, tail) = split_shape(&scheme.args);
    let slots = match expand_slots(&head, repeat, &tail, resolved_args.len()) {
        Ok(slots) => slots,
        Err(msg) => {
            diagnostics.push(Diagnostic::new(key, msg));
            let result_ty = Ty::Value;
            return (
                Expr::Call {
                    name: name.to_string(),
                    ty: crate::types::Lambda {
                        result: result_ty,
                        args: scheme.args.clone(),
                    },
                    args: resolved_args,
                    key: key.to_string(),
                },
                diagnostics,
            );
        }
    };

    let mut subst: Option<Subst> = Some(Subst::new());
    for (slot, arg) in slots.iter().zip(resolved_args.iter()) {
        if let Err(msg) = match_type(slot, &arg.ty(), &mut subst) {
            diagnostics.push(Diagnostic::new(arg.key(), msg));
        }
    }

    let subst = subst.unwrap_or_default();
    let resolved_result = substitute(&scheme.result, &subst);
    if diagnostics.is_empty() && resolved_result.is_generic() {
        diagnostics.push(Diagnostic::new(
            key,
            format!(
                "Could not resolve the generic result type of \"{name}\"; add a more specific argument."
            ),
        ));
    }

    let resolved_scheme = crate::types::Lambda {
        result: resolved_result,
        args: scheme.args.iter().map(|t| substitute(t, &subst)).collect(),
    };

    (
        Expr::Call {
            name: name.to_string(),
            ty: resolved_scheme,
            args: resolved_args,
            key: key.to_string(),
        },
        diagnostics,
    )
}

/// Split a declared argument list into `(head, repeat, tail)` around its
/// (at most one) [`Ty::NArgs`] entry. Generalizes the single-repeating-
/// parameter shape into an N-wide repeating tuple.
fn split_shape(declared: &[Ty]) -> (Vec<Ty>, Option<Vec<Ty>>, Vec<Ty>) {
    if let Some(pos) = declared.iter().position(|t| matches!(t, Ty::NArgs(_))) {
        let head = declared[..pos].to_vec();
        let Ty::NArgs(repeat) = &declared[pos] else {
            unreachable!()
        };
        let tail = declared[pos + 1..].to_vec();
        (head, Some(repeat.clone()), tail)
    } else {
        (declared.to_vec(), None, Vec::new())
    }
}

/// Compute the full per-position expected-type list for `actual_len`
/// arguments, expanding the repeating group (if any) an integral number of
/// times. Pure arithmetic: the tail's length is fixed by the declared
/// scheme, so the repeat count is uniquely determined, with no need to
/// search or backtrack.
fn expand_slots(
    head: &[Ty],
    repeat: Option<Vec<Ty>>,
    tail: &[Ty],
    actual_len: usize,
) -> Result<Vec<Ty>, String> {
    let Some(repeat) = repeat else {
        if actual_len == head.len() {
            return Ok(head.to_vec());
        }
        return Err(format!(
            "Expected {} argument(s) but found {actual_len}.",
            head.len()
        ));
    };

    let width = repeat.len().max(1);
    let fixed = head.len() + tail.len();
    if actual_len < fixed || (actual_len - fixed) % width != 0 {
        return Err(format!(
            "Expected {} argument(s) plus a multiple of {width} but found {actual_len}.",
            fixed
        ));
    }
    let repeat_count = (actual_len - fixed) / width;

    let mut slots = Vec::with_capacity(actual_len);
    slots.extend(head.iter().cloned());
    for _ in 0..repeat_count {
        slots.extend(repeat.iter().cloned());
    }
    slots.extend(tail.iter().cloned());
    Ok(slots)
}

/// Deep-substitute every [`Ty::Typename`] found in `ty` using `subst`,
/// leaving unbound ones untouched (their presence afterwards is reported by
/// the caller as an unresolved generic).
fn substitute(ty: &Ty, subst: &Subst) -> Ty {
    match ty {
        Ty::Typename(n) => subst.get(n).cloned().unwrap_or_else(|| ty.clone()),
        Ty::Vector(inner) => Ty::Vector(Box::new(substitute(inner, subst))),
        Ty::Array(inner, n) => Ty::Array(Box::new(substitute(inner, subst)), *n),
        Ty::AnyArray(inner) => Ty::AnyArray(Box::new(substitute(inner, subst))),
        Ty::Variant(members) => {
            Ty::Variant(members.iter().map(|m| substitute(m, subst)).collect())
        }
        Ty::NArgs(members) => Ty::NArgs(members.iter().map(|m| substitute(m, subst)).collect()),
        Ty::Lambda(l) => Ty::Lambda(Box::new(crate::types::Lambda {
            result: substitute(&l.result, subst),
            args: l.args.iter().map(|a| substitute(a, subst)).collect(),
        })),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use serde_json::json;

    #[test]
    fn simple_arithmetic_resolves() {
        let expr = parse(&json!(["+", 1, 2, 3])).unwrap();
        let checked = check(&Ty::Value, &expr).unwrap();
        assert_eq!(checked.ty(), Ty::Number);
    }

    #[test]
    fn arity_mismatch_is_reported_at_call_key() {
        let expr = parse(&json!(["-", 1, 2, 3])).unwrap();
        let err = check(&Ty::Value, &expr).unwrap_err();
        assert_eq!(err.len(), 1);
        assert_eq!(err[0].key, "");
        assert!(err[0].error.contains("Expected 2 argument"));
    }

    #[test]
    fn type_mismatch_is_reported_at_arg_key() {
        let expr = parse(&json!(["+", 1, "two"])).unwrap();
        let err = check(&Ty::Value, &expr).unwrap_err();
        assert_eq!(err.len(), 1);
        assert_eq!(err[0].key, "2");
        assert!(err[0].error.contains("Expected Number but found String"));
    }

    #[test]
    fn case_resolves_generic_result_from_outputs() {
        let expr = parse(&json!(["case", true, "a", "b"])).unwrap();
        let checked = check(&Ty::Value, &expr).unwrap();
        assert_eq!(checked.ty(), Ty::String);
    }

    #[test]
    fn case_repeating_pairs_expand_to_any_count() {
        let expr = parse(&json!(["case", true, 1, false, 2, 3])).unwrap();
        assert!(check(&Ty::Value, &expr).is_ok());
    }

    #[test]
    fn nested_generic_calls_do_not_interfere() {
        let expr = parse(&json!([
            "==",
            ["case", true, 1, 2],
            ["case", false, "a", "b"]
        ]))
        .unwrap();
        // == requires both sides to share one generic, so Number vs String
        // must fail, proving each `case` resolved its own T0 independently.
        let err = check(&Ty::Value, &expr).unwrap_err();
        assert_eq!(err.len(), 1);
    }

    #[test]
    fn at_resolves_element_type_from_its_array_argument() {
        let expr = parse(&json!(["at", ["json_array", 1, 2, 3], 0])).unwrap();
        let checked = check(&Ty::Value, &expr).unwrap();
        assert_eq!(checked.ty(), Ty::Value);
    }
}
