//! The identity operator named in the closed set: `literal`.
//!
//! `["literal", v]` type-checks and evaluates `v` like any other operator
//! argument and returns it unchanged. Bare JSON scalars never need it (the
//! parser already produces `Expr::Literal` directly for those); it exists so
//! every name in spec.md §6's closed operator-name enumeration resolves to a
//! real registry entry.

use super::lambda;
use crate::types::Ty;
use crate::types::Lambda;

pub fn schemes() -> Vec<(&'static str, Lambda)> {
    vec![("literal", lambda(Ty::Value, vec![Ty::Value]))]
}
