//! Feature/zoom-data accessors: `zoom`, `properties`, `geometry_type`, `id`.
//!
//! These are exactly the operators consulted by the constancy analysis in
//! `evaluator::compile` (spec.md §5: `properties`/`geometry_type`/`id` are
//! feature-dependent, `zoom` is zoom-dependent).

use super::lambda;
use crate::types::{Lambda, Ty};

pub fn schemes() -> Vec<(&'static str, Lambda)> {
    vec![
        ("zoom", lambda(Ty::Number, vec![])),
        ("properties", lambda(Ty::Object, vec![])),
        ("geometry_type", lambda(Ty::String, vec![])),
        ("id", lambda(Ty::Value, vec![])),
    ]
}
