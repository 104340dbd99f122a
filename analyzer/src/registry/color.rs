//! Color constructors: `rgb`, `rgba`, `color`, `color_to_array`.
//!
//! `rgba`'s optional alpha is modeled as a trailing single-width `NArgs`
//! repeat of a lone `Number` (0 or more repeats after the mandatory r, g, b)
//! rather than a dedicated optional-argument constructor, since the type
//! algebra has none; this is slightly more permissive than strict 3-or-4
//! arity and is recorded as a resolved Open Question in DESIGN.md.

use super::lambda;
use crate::types::{Lambda, Ty};

pub fn schemes() -> Vec<(&'static str, Lambda)> {
    vec![
        ("rgb", lambda(Ty::Color, vec![Ty::Number, Ty::Number, Ty::Number])),
        (
            "rgba",
            lambda(
                Ty::Color,
                vec![
                    Ty::Number,
                    Ty::Number,
                    Ty::Number,
                    Ty::NArgs(vec![Ty::Number]),
                ],
            ),
        ),
        ("color", lambda(Ty::Color, vec![Ty::String])),
        ("color_to_array", lambda(Ty::Array(Box::new(Ty::Number), 4), vec![Ty::Color])),
    ]
}
