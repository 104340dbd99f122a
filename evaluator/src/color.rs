//! CSS color string parsing (`color`/`rgb`/`rgba` targets) and the
//! componentwise lerps `curve` needs. Deliberately small: hex notation,
//! `rgb()`/`rgba()` functional notation, and the CSS keyword set feature
//! styling actually uses day to day. Not a general CSS color grammar.

use crate::error::RuntimeError;

const NAMED: &[(&str, [f64; 4])] = &[
    ("black", [0.0, 0.0, 0.0, 1.0]),
    ("white", [1.0, 1.0, 1.0, 1.0]),
    ("red", [1.0, 0.0, 0.0, 1.0]),
    ("green", [0.0, 0.50196, 0.0, 1.0]),
    ("blue", [0.0, 0.0, 1.0, 1.0]),
    ("yellow", [1.0, 1.0, 0.0, 1.0]),
    ("orange", [1.0, 0.64706, 0.0, 1.0]),
    ("purple", [0.50196, 0.0, 0.50196, 1.0]),
    ("gray", [0.50196, 0.50196, 0.50196, 1.0]),
    ("grey", [0.50196, 0.50196, 0.50196, 1.0]),
    ("transparent", [0.0, 0.0, 0.0, 0.0]),
];

/// Parse a CSS color string into `[r, g, b, a]`, each channel in `[0, 1]`.
pub fn parse(input: &str) -> Result<[f64; 4], RuntimeError> {
    let trimmed = input.trim();
    if let Some(hex) = trimmed.strip_prefix('#') {
        return parse_hex(hex);
    }
    if let Some(inner) = trimmed
        .strip_prefix("rgba(")
        .or_else(|| trimmed.strip_prefix("rgb("))
    {
        let inner = inner
            .strip_suffix(')')
            .ok_or_else(|| RuntimeError::new(format!("Malformed color string \"{input}\".")))?;
        return parse_functional(inner);
    }
    for (name, rgba) in NAMED {
        if trimmed.eq_ignore_ascii_case(name) {
            return Ok(*rgba);
        }
    }
    Err(RuntimeError::new(format!("Unrecognized color \"{input}\".")))
}

fn parse_hex(hex: &str) -> Result<[f64; 4], RuntimeError> {
    let channel = |s: &str| -> Result<f64, RuntimeError> {
        u8::from_str_radix(s, 16)
            .map(|v| v as f64 / 255.0)
            .map_err(|_| RuntimeError::new(format!("Malformed hex color \"#{hex}\".")))
    };
    match hex.len() {
        3 => Ok([
            channel(&hex[0..1].repeat(2))?,
            channel(&hex[1..2].repeat(2))?,
            channel(&hex[2..3].repeat(2))?,
            1.0,
        ]),
        6 => Ok([
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
            1.0,
        ]),
        8 => Ok([
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
            channel(&hex[6..8])?,
        ]),
        _ => Err(RuntimeError::new(format!("Malformed hex color \"#{hex}\"."))),
    }
}

fn parse_functional(inner: &str) -> Result<[f64; 4], RuntimeError> {
    let parts: Vec<f64> = inner
        .split(',')
        .map(|p| {
            p.trim()
                .trim_end_matches('%')
                .parse::<f64>()
                .map_err(|_| RuntimeError::new(format!("Malformed color component \"{p}\".")))
        })
        .collect::<Result<_, _>>()?;
    match parts.as_slice() {
        [r, g, b] => Ok([r / 255.0, g / 255.0, b / 255.0, 1.0]),
        [r, g, b, a] => Ok([r / 255.0, g / 255.0, b / 255.0, *a]),
        _ => Err(RuntimeError::new("Expected 3 or 4 color components.")),
    }
}

/// Linear interpolation between two numbers.
pub fn lerp_number(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Componentwise RGBA linear interpolation.
pub fn lerp_color(a: [f64; 4], b: [f64; 4], t: f64) -> [f64; 4] {
    [
        lerp_number(a[0], b[0], t),
        lerp_number(a[1], b[1], t),
        lerp_number(a[2], b[2], t),
        lerp_number(a[3], b[3], t),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_and_long_hex() {
        assert_eq!(parse("#f00").unwrap(), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(parse("#ff0000").unwrap(), [1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn parses_rgb_and_rgba_functional() {
        assert_eq!(parse("rgb(255, 0, 0)").unwrap(), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(parse("rgba(255, 0, 0, 0.5)").unwrap(), [1.0, 0.0, 0.0, 0.5]);
    }

    #[test]
    fn parses_named_colors_case_insensitively() {
        assert_eq!(parse("RED").unwrap(), [1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse("not-a-color").is_err());
    }

    #[test]
    fn lerp_color_interpolates_each_channel() {
        let a = [0.0, 0.0, 0.0, 1.0];
        let b = [1.0, 1.0, 1.0, 1.0];
        assert_eq!(lerp_color(a, b, 0.5), [0.5, 0.5, 0.5, 1.0]);
    }
}
