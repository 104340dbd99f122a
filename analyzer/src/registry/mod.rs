//! Operator Registry — declarative half.
//!
//! A closed map from operator name to declared type scheme ([`Lambda`]).
//! The parser consults this only for existence and scheme lookup; it never
//! executes anything. The *behavioral* half (compile/eval closures) lives in
//! the `evaluator` crate's own registry, keyed by the same names.
//!
//! Grouped by operator family the way the teacher groups builtins one file
//! per [`super::types`]-adjacent category (`analysis/builtins/{math,
//! general, text, ...}.rs`).

use crate::types::{Lambda, Ty};
use std::collections::HashMap;
use std::sync::LazyLock;

mod arithmetic;
mod boolean;
mod coercions;
mod color;
mod comparison;
mod constants;
mod container;
mod control;
mod curve;
mod feature;
mod literal;
mod math;
mod string_ops;

/// The closed operator table: name -> declared type scheme.
///
/// Declared schemes use symbolic generic names (`"T0"`, `"T1"`, ...) shared
/// across every call to the same operator; [`crate::parser`] instantiates a
/// fresh, call-site-unique copy per node (see `parser::instantiate_scheme`).
pub static REGISTRY: LazyLock<HashMap<&'static str, Lambda>> = LazyLock::new(|| {
    let groups: [Vec<(&'static str, Lambda)>; 13] = [
        literal::schemes(),
        constants::schemes(),
        coercions::schemes(),
        container::schemes(),
        color::schemes(),
        feature::schemes(),
        arithmetic::schemes(),
        math::schemes(),
        comparison::schemes(),
        boolean::schemes(),
        string_ops::schemes(),
        control::schemes(),
        curve::schemes(),
    ];
    let mut out = HashMap::new();
    for group in groups {
        for (name, scheme) in group {
            out.insert(name, scheme);
        }
    }
    out
});

/// Look up an operator's declared (uninstantiated) type scheme by name.
pub fn lookup(name: &str) -> Option<Lambda> {
    REGISTRY.get(name).cloned()
}

/// Convenience builder used by every builtins submodule.
pub(crate) fn lambda(result: Ty, args: Vec<Ty>) -> Lambda {
    Lambda { result, args }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_contains_every_closed_set_member() {
        let names = [
            "literal", "ln2", "pi", "e", "string", "number", "boolean", "json_array", "object",
            "get", "has", "at", "typeof", "length", "zoom", "properties", "geometry_type", "id",
            "case", "curve", "step", "linear", "exponential", "+", "-", "*", "/", "%", "^",
            "log10", "ln", "log2", "sin", "cos", "tan", "asin", "acos", "atan", "==", "!=", ">",
            ">=", "<=", "<", "&&", "||", "!", "concat", "upcase", "downcase", "rgb", "rgba",
            "color", "color_to_array",
        ];
        for name in names {
            assert!(lookup(name).is_some(), "missing registry entry for {name}");
        }
    }

    #[test]
    fn unimplemented_names_are_absent() {
        for name in [
            "match",
            "is_error",
            "ceil",
            "floor",
            "round",
            "abs",
            "min",
            "max",
            "cubic-bezier",
        ] {
            assert!(lookup(name).is_none(), "{name} should not be registered");
        }
    }
}
