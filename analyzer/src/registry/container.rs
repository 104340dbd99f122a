//! Container/reflection operators: `get`, `has`, `at`, `typeof`, `length`.

use super::lambda;
use crate::types::{Lambda, Ty};

pub fn schemes() -> Vec<(&'static str, Lambda)> {
    // get(Object, String) / has(Object, String): object first, mandatory,
    // then the lookup key, matching spec.md §4.4 and §8's worked scenarios
    // (`["get", ["properties"], "x"]`).
    let object_then_key = vec![Ty::Object, Ty::String];
    vec![
        ("get", lambda(Ty::Value, object_then_key.clone())),
        ("has", lambda(Ty::Boolean, object_then_key)),
        (
            "at",
            lambda(
                Ty::Typename("T0".into()),
                vec![
                    Ty::AnyArray(Box::new(Ty::Typename("T0".into()))),
                    Ty::Number,
                ],
            ),
        ),
        ("typeof", lambda(Ty::String, vec![Ty::Value])),
        (
            "length",
            lambda(
                Ty::Number,
                vec![Ty::Variant(vec![
                    Ty::String,
                    Ty::AnyArray(Box::new(Ty::Value)),
                ])],
            ),
        ),
    ]
}
