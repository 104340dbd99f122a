//! Comparison operators: `==`, `!=`, `>`, `<`, `>=`, `<=`.
//!
//! All six are generic in `T` over two arguments of that same type (spec.md
//! §4.4): `==`/`!=` are structural equality (including objects and arrays),
//! and the ordering operators compare two values of any one matching type.

use super::lambda;
use crate::types::{Lambda, Ty};

pub fn schemes() -> Vec<(&'static str, Lambda)> {
    let generic_args = || vec![Ty::Typename("T0".into()), Ty::Typename("T0".into())];
    vec![
        ("==", lambda(Ty::Boolean, generic_args())),
        ("!=", lambda(Ty::Boolean, generic_args())),
        (">", lambda(Ty::Boolean, generic_args())),
        ("<", lambda(Ty::Boolean, generic_args())),
        (">=", lambda(Ty::Boolean, generic_args())),
        ("<=", lambda(Ty::Boolean, generic_args())),
    ]
}
