//! Boolean operators: `&&`, `||`, `!`.
//!
//! `&&`/`||` are variadic (two or more booleans, short-circuiting left to
//! right in the evaluator); `!` is strictly unary.

use super::lambda;
use crate::types::{Lambda, Ty};

pub fn schemes() -> Vec<(&'static str, Lambda)> {
    let variadic = vec![Ty::Boolean, Ty::Boolean, Ty::NArgs(vec![Ty::Boolean])];
    vec![
        ("&&", lambda(Ty::Boolean, variadic.clone())),
        ("||", lambda(Ty::Boolean, variadic)),
        ("!", lambda(Ty::Boolean, vec![Ty::Boolean])),
    ]
}
