//! Value-to-type coercions: `string`, `number`, `boolean`, `json_array`,
//! `object`.
//!
//! Each accepts one or more `Value`-typed inputs and tries them in order
//! until one coerces, per spec.md §6.3; the declared scheme only needs to
//! capture the `NArgs` shape, the actual fallback search happens in the
//! evaluator's behavioral registry.

use super::lambda;
use crate::types::{Lambda, Ty};

pub fn schemes() -> Vec<(&'static str, Lambda)> {
    let fallback_args = vec![Ty::NArgs(vec![Ty::Value])];
    vec![
        ("string", lambda(Ty::String, fallback_args.clone())),
        ("number", lambda(Ty::Number, fallback_args.clone())),
        ("boolean", lambda(Ty::Boolean, fallback_args.clone())),
        ("json_array", lambda(Ty::AnyArray(Box::new(Ty::Value)), fallback_args.clone())),
        ("object", lambda(Ty::Object, fallback_args)),
    ]
}
