//! Type algebra: the closed set of type constructors, structural equality
//! (via `derive(PartialEq)`), pretty-printing, and the `match_type`
//! acceptance/unification contract used by the type checker.

use std::collections::HashMap;

/// Generic-variable substitution built up while matching a call's arguments
/// against its (possibly generic) operator scheme.
pub type Subst = HashMap<String, Ty>;

/// The engine's closed type sum.
///
/// `Value` is the top type: any primitive except [`Ty::Interpolation`], plus
/// `Vector<Value>` specifically (not `Vector<T>` for other `T`).
#[derive(Debug, Clone, PartialEq)]
pub enum Ty {
    Null,
    Number,
    String,
    Boolean,
    Color,
    Object,
    Value,
    Interpolation,
    Vector(Box<Ty>),
    Array(Box<Ty>, u32),
    AnyArray(Box<Ty>),
    Variant(Vec<Ty>),
    /// A generic placeholder, resolved during type checking. The string is a
    /// unique name: the registry declares schemes with a shared symbolic name
    /// (e.g. `"T0"`); the parser instantiates a fresh, call-site-unique copy
    /// per node (see `parser::instantiate`) so that two independently generic
    /// nested calls never alias each other's bindings.
    Typename(String),
    /// A variadic argument-list pattern: consumes repeating `types.len()`-wide
    /// tuples from the remaining actual arguments. Only valid as an entry in
    /// `Lambda::args`, never as a result type and never as an `expected`/
    /// `actual` argument to [`match_type`] directly.
    NArgs(Vec<Ty>),
    Lambda(Box<Lambda>),
}

/// An operator's type scheme: `result <- args...`.
#[derive(Debug, Clone, PartialEq)]
pub struct Lambda {
    pub result: Ty,
    pub args: Vec<Ty>,
}

impl Ty {
    /// The pretty name used verbatim in diagnostics.
    pub fn name(&self) -> String {
        match self {
            Ty::Null => "Null".to_string(),
            Ty::Number => "Number".to_string(),
            Ty::String => "String".to_string(),
            Ty::Boolean => "Boolean".to_string(),
            Ty::Color => "Color".to_string(),
            Ty::Object => "Object".to_string(),
            Ty::Value => "Value".to_string(),
            Ty::Interpolation => "Interpolation".to_string(),
            Ty::Vector(inner) => format!("Vector<{}>", inner.name()),
            Ty::Array(inner, n) => format!("Array<{},{}>", inner.name(), n),
            Ty::AnyArray(inner) => format!("AnyArray<{}>", inner.name()),
            Ty::Variant(members) => format!(
                "({})",
                members
                    .iter()
                    .map(Ty::name)
                    .collect::<Vec<_>>()
                    .join(" | ")
            ),
            Ty::Typename(n) => typename_display(n).to_string(),
            Ty::NArgs(_) => "NArgs".to_string(),
            Ty::Lambda(l) => l.result.name(),
        }
    }

    /// True iff a [`Ty::Typename`] occurs anywhere within `self`.
    ///
    /// Bounded by a recursion-depth guard rather than a visited-set: the type
    /// grammar is an owned tree (`Box`-nested, no back-references), so cycles
    /// cannot actually occur, but the guard keeps this defensive the way the
    /// rest of this codebase treats arity/shape edge cases.
    pub fn is_generic(&self) -> bool {
        fn walk(ty: &Ty, depth: u32) -> bool {
            if depth > 256 {
                return false;
            }
            match ty {
                Ty::Typename(_) => true,
                Ty::Vector(inner) | Ty::AnyArray(inner) => walk(inner, depth + 1),
                Ty::Array(inner, _) => walk(inner, depth + 1),
                Ty::Variant(members) | Ty::NArgs(members) => {
                    members.iter().any(|m| walk(m, depth + 1))
                }
                Ty::Lambda(l) => {
                    walk(&l.result, depth + 1) || l.args.iter().any(|a| walk(a, depth + 1))
                }
                _ => false,
            }
        }
        walk(self, 0)
    }
}

/// Strip the call-site-unique suffix (`"T0@1.2"` -> `"T0"`) for display.
fn typename_display(n: &str) -> &str {
    n.split('@').next().unwrap_or(n)
}

fn mismatch_message(expected: &Ty, actual: &Ty) -> String {
    format!(
        "Expected {} but found {} instead.",
        expected.name(),
        actual.name()
    )
}

fn nested_mismatch_message(expected: &Ty, actual: &Ty, inner: String) -> String {
    format!("{} ({})", mismatch_message(expected, actual), inner)
}

/// Returns `Ok(())` if `actual` is assignable to `expected`, else `Err(message)`.
///
/// `subst` carries generic-variable bindings across the whole call being
/// checked; pass `&mut None` for non-generic matching (e.g. literals).
///
/// Implements the 7 ordered rules from the type algebra:
/// 1. An `actual` `Lambda` is replaced by its `result`.
/// 2. Typename binding against `subst`, when provided: the first occurrence
///    of a name binds it; every later occurrence must agree with the bound
///    type.
/// 3. `Value` accepts any primitive except `Interpolation`, plus `Vector<Value>`.
/// 4. Remaining primitives match iff identical.
/// 5. `Vector<T>` matches `Vector<T'>` iff `T` matches `T'`.
/// 6. `Array<T,N>` / `AnyArray<T>` match `Array` of matching item type (and,
///    for fixed `N`, matching length).
/// 7. `Variant` matches structurally: an `actual` `Variant` requires every
///    member to match `expected`; an `expected` `Variant` succeeds on the
///    first member that matches under a speculative copy of `subst`, merging
///    that copy back only on success (so a failed candidate never leaks
///    partial bindings into the real substitution).
/// 8. Otherwise: structural equality, else a mismatch message. Mismatches
///    arising from a nested element (`Vector`/`Array`) append `" (<inner>)"`.
pub fn match_type(expected: &Ty, actual: &Ty, subst: &mut Option<Subst>) -> Result<(), String> {
    let resolved_actual;
    let actual = if let Ty::Lambda(l) = actual {
        resolved_actual = l.result.clone();
        &resolved_actual
    } else {
        actual
    };

    if let Some(map) = subst.as_mut() {
        if let Ty::Typename(n) = expected {
            if let Some(bound) = map.get(n).cloned() {
                if bound.is_generic() {
                    // Bound to another still-unresolved placeholder; nothing
                    // concrete to check against yet.
                    return Ok(());
                }
                // Already bound to a concrete type: every further occurrence
                // of the same name must agree with it.
                return match_type(&bound, actual, subst);
            }
            if !actual.is_generic() {
                map.insert(n.clone(), actual.clone());
            }
            return Ok(());
        }
        if let Ty::Typename(n) = actual {
            if let Some(bound) = map.get(n).cloned() {
                return match_type(expected, &bound, subst);
            } else if !expected.is_generic() {
                map.insert(n.clone(), expected.clone());
                return Ok(());
            }
        }
    }

    if let Ty::Variant(members) = actual {
        for m in members {
            match_type(expected, m, subst)?;
        }
        return Ok(());
    }

    if matches!(expected, Ty::Value) {
        let ok = matches!(
            actual,
            Ty::Null | Ty::Number | Ty::String | Ty::Boolean | Ty::Color | Ty::Object | Ty::Value
        ) || matches!(actual, Ty::Vector(inner) if matches!(inner.as_ref(), Ty::Value));
        return if ok {
            Ok(())
        } else {
            Err(mismatch_message(expected, actual))
        };
    }

    match expected {
        Ty::Null | Ty::Number | Ty::String | Ty::Boolean | Ty::Color | Ty::Interpolation
        | Ty::Object => {
            if expected == actual {
                Ok(())
            } else {
                Err(mismatch_message(expected, actual))
            }
        }
        Ty::Vector(exp_inner) => match actual {
            Ty::Vector(act_inner) => match_type(exp_inner, act_inner, subst)
                .map_err(|inner| nested_mismatch_message(expected, actual, inner)),
            _ => Err(mismatch_message(expected, actual)),
        },
        Ty::Array(exp_inner, n) => match actual {
            Ty::Array(act_inner, m) if n == m => match_type(exp_inner, act_inner, subst)
                .map_err(|inner| nested_mismatch_message(expected, actual, inner)),
            _ => Err(mismatch_message(expected, actual)),
        },
        Ty::AnyArray(exp_inner) => match actual {
            Ty::Array(act_inner, _) | Ty::AnyArray(act_inner) => {
                match_type(exp_inner, act_inner, subst)
                    .map_err(|inner| nested_mismatch_message(expected, actual, inner))
            }
            _ => Err(mismatch_message(expected, actual)),
        },
        Ty::Variant(members) => {
            for candidate in members {
                let mut speculative = subst.clone();
                if match_type(candidate, actual, &mut speculative).is_ok() {
                    *subst = speculative;
                    return Ok(());
                }
            }
            Err(mismatch_message(expected, actual))
        }
        _ => {
            if expected == actual {
                Ok(())
            } else {
                Err(mismatch_message(expected, actual))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitive_identity() {
        assert!(match_type(&Ty::Number, &Ty::Number, &mut None).is_ok());
        assert!(match_type(&Ty::Number, &Ty::String, &mut None).is_err());
    }

    #[test]
    fn value_accepts_primitives_but_not_interpolation() {
        assert!(match_type(&Ty::Value, &Ty::Number, &mut None).is_ok());
        assert!(match_type(&Ty::Value, &Ty::Color, &mut None).is_ok());
        assert!(match_type(&Ty::Value, &Ty::Interpolation, &mut None).is_err());
    }

    #[test]
    fn value_accepts_vector_of_value_only() {
        assert!(match_type(&Ty::Value, &Ty::Vector(Box::new(Ty::Value)), &mut None).is_ok());
        assert!(match_type(&Ty::Value, &Ty::Vector(Box::new(Ty::Number)), &mut None).is_err());
    }

    #[test]
    fn vector_matches_covariantly() {
        let expected = Ty::Vector(Box::new(Ty::Number));
        let actual = Ty::Vector(Box::new(Ty::String));
        let err = match_type(&expected, &actual, &mut None).unwrap_err();
        assert!(err.contains("Expected Vector<Number> but found Vector<String> instead."));
        assert!(err.contains("Expected Number but found String instead."));
    }

    #[test]
    fn any_array_matches_any_length() {
        let expected = Ty::AnyArray(Box::new(Ty::Number));
        assert!(match_type(&expected, &Ty::Array(Box::new(Ty::Number), 3), &mut None).is_ok());
        assert!(match_type(&expected, &Ty::Array(Box::new(Ty::Number), 9), &mut None).is_ok());
    }

    #[test]
    fn any_array_matches_any_array() {
        let expected = Ty::AnyArray(Box::new(Ty::Number));
        let actual = Ty::AnyArray(Box::new(Ty::Number));
        assert!(match_type(&expected, &actual, &mut None).is_ok());
    }

    #[test]
    fn fixed_array_requires_exact_length() {
        let expected = Ty::Array(Box::new(Ty::Number), 4);
        assert!(match_type(&expected, &Ty::Array(Box::new(Ty::Number), 4), &mut None).is_ok());
        assert!(match_type(&expected, &Ty::Array(Box::new(Ty::Number), 3), &mut None).is_err());
    }

    #[test]
    fn variant_expected_first_match_wins() {
        let expected = Ty::Variant(vec![Ty::Number, Ty::String]);
        assert!(match_type(&expected, &Ty::String, &mut None).is_ok());
        assert!(match_type(&expected, &Ty::Boolean, &mut None).is_err());
    }

    #[test]
    fn variant_actual_requires_every_member_to_match() {
        let actual = Ty::Variant(vec![Ty::Number, Ty::Number]);
        assert!(match_type(&Ty::Number, &actual, &mut None).is_ok());
        let actual = Ty::Variant(vec![Ty::Number, Ty::String]);
        assert!(match_type(&Ty::Number, &actual, &mut None).is_err());
    }

    #[test]
    fn typename_binds_then_requires_consistency() {
        let mut subst = Some(Subst::new());
        let t0 = Ty::Typename("T0".into());
        assert!(match_type(&t0, &Ty::Number, &mut subst).is_ok());
        assert_eq!(subst.as_ref().unwrap().get("T0"), Some(&Ty::Number));
        // Once bound, a second occurrence of the same name must agree with
        // the first; a different concrete actual is a mismatch.
        assert!(match_type(&t0, &Ty::String, &mut subst).is_err());
        assert_eq!(subst.as_ref().unwrap().get("T0"), Some(&Ty::Number));
    }

    #[test]
    fn variant_speculative_binding_does_not_leak_on_failure() {
        let mut subst = Some(Subst::new());
        let t0 = Ty::Typename("T0".into());
        let expected = Ty::Variant(vec![Ty::Number, t0.clone()]);
        // Number candidate matches Number directly, without touching T0.
        assert!(match_type(&expected, &Ty::Number, &mut subst).is_ok());
        assert!(subst.as_ref().unwrap().get("T0").is_none());
    }

    #[test]
    fn is_generic_detects_nested_typename() {
        assert!(Ty::Vector(Box::new(Ty::Typename("T0".into()))).is_generic());
        assert!(!Ty::Vector(Box::new(Ty::Number)).is_generic());
    }

    #[test]
    fn pretty_names_match_spec_format() {
        assert_eq!(Ty::Vector(Box::new(Ty::Typename("T".into()))).name(), "Vector<T>");
        assert_eq!(Ty::Array(Box::new(Ty::Typename("T".into())), 4).name(), "Array<T,4>");
        assert_eq!(Ty::AnyArray(Box::new(Ty::Typename("T".into()))).name(), "AnyArray<T>");
        assert_eq!(
            Ty::Variant(vec![Ty::String, Ty::Number]).name(),
            "(String | Number)"
        );
    }
}
