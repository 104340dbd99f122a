//! Conditional branching: `case`.
//!
//! `case(test1, output1, test2, output2, ..., fallback)`: one or more
//! `(Boolean, T)` pairs followed by a mandatory fallback `T`, all sharing a
//! single generic result type. Modeled as a leading `NArgs` pair-repeat
//! followed by a non-repeating tail slot, exercising the same
//! repeat-then-tail shape as the teacher's `ParamShape{head, repeat, tail}`
//! (here with an empty head).

use super::lambda;
use crate::types::{Lambda, Ty};

pub fn schemes() -> Vec<(&'static str, Lambda)> {
    let t0 = Ty::Typename("T0".into());
    vec![(
        "case",
        lambda(
            t0.clone(),
            vec![Ty::NArgs(vec![Ty::Boolean, t0.clone()]), t0],
        ),
    )]
}
