//! Zero-argument numeric constants: `ln2`, `pi`, `e`.

use super::lambda;
use crate::types::{Lambda, Ty};

pub fn schemes() -> Vec<(&'static str, Lambda)> {
    vec![
        ("ln2", lambda(Ty::Number, vec![])),
        ("pi", lambda(Ty::Number, vec![])),
        ("e", lambda(Ty::Number, vec![])),
    ]
}
