//! Interpolation: `step`, `linear`, `exponential`, `curve`.
//!
//! `step`/`linear`/`exponential` are interpolation-type markers, not
//! callable expressions on their own: `exponential` additionally carries a
//! base factor. `curve` itself takes an interpolation marker, an input
//! number, and one or more `(stop, value)` pairs; its result is left as an
//! unconstrained generic here, since the "must be Number or Color" rule is
//! checked by `evaluator`'s own `curve` compile step rather than the
//! general type checker (spec.md §4.6).

use super::lambda;
use crate::types::{Lambda, Ty};

pub fn schemes() -> Vec<(&'static str, Lambda)> {
    let t0 = Ty::Typename("T0".into());
    vec![
        ("step", lambda(Ty::Interpolation, vec![])),
        ("linear", lambda(Ty::Interpolation, vec![])),
        ("exponential", lambda(Ty::Interpolation, vec![Ty::Number])),
        (
            "curve",
            lambda(
                t0.clone(),
                vec![
                    Ty::Interpolation,
                    Ty::Number,
                    Ty::NArgs(vec![Ty::Number, t0]),
                ],
            ),
        ),
    ]
}
