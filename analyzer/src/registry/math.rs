//! Unary math functions: `ln`, `log2`, `log10`, `sin`, `cos`, `tan`, `asin`,
//! `acos`, `atan`.

use super::lambda;
use crate::types::{Lambda, Ty};

pub fn schemes() -> Vec<(&'static str, Lambda)> {
    [
        "ln", "log2", "log10", "sin", "cos", "tan", "asin", "acos", "atan",
    ]
    .into_iter()
    .map(|name| (name, lambda(Ty::Number, vec![Ty::Number])))
    .collect()
}
