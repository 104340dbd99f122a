//! String operators: `concat`, `upcase`, `downcase`.
//!
//! `concat` is variadic over `Value` (two or more; each coerced to its
//! default string form at evaluation time, spec.md §4.4); the case
//! operators are unary over `String`.

use super::lambda;
use crate::types::{Lambda, Ty};

pub fn schemes() -> Vec<(&'static str, Lambda)> {
    vec![
        (
            "concat",
            lambda(Ty::String, vec![Ty::Value, Ty::Value, Ty::NArgs(vec![Ty::Value])]),
        ),
        ("upcase", lambda(Ty::String, vec![Ty::String])),
        ("downcase", lambda(Ty::String, vec![Ty::String])),
    ]
}
