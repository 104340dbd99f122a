//! Arithmetic operators: `+`, `-`, `*`, `/`, `%`, `^`.
//!
//! `+`, `-`, `*`, `/`, `%` are all variadic (two or more numbers, folded
//! left to right with the operator); `^` is strictly binary (spec.md §4.4).

use super::lambda;
use crate::types::{Lambda, Ty};

pub fn schemes() -> Vec<(&'static str, Lambda)> {
    let variadic = vec![Ty::Number, Ty::Number, Ty::NArgs(vec![Ty::Number])];
    let binary = vec![Ty::Number, Ty::Number];
    vec![
        ("+", lambda(Ty::Number, variadic.clone())),
        ("*", lambda(Ty::Number, variadic.clone())),
        ("-", lambda(Ty::Number, variadic.clone())),
        ("/", lambda(Ty::Number, variadic.clone())),
        ("%", lambda(Ty::Number, variadic)),
        ("^", lambda(Ty::Number, binary)),
    ]
}
