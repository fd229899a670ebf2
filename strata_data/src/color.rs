// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use peniko::Color;
use peniko::color::{Srgb, parse_color};
use serde::Deserialize;
use serde::de::IgnoredAny;

/// A color as it appears in host data.
///
/// Anything that is not an RGB(A) structure, a 3/4-component array or a CSS
/// color string is kept as [`ColorSpec::Unrecognized`] instead of failing the
/// whole data set.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ColorSpec {
    /// `{r, g, b, a?}` with channels in `0..=255` and alpha in `0..=1`.
    Rgba {
        /// Red channel.
        r: f64,
        /// Green channel.
        g: f64,
        /// Blue channel.
        b: f64,
        /// Alpha, defaults to opaque.
        #[serde(default)]
        a: Option<f64>,
    },
    /// `[r, g, b]` or `[r, g, b, a]`, same ranges as [`ColorSpec::Rgba`].
    Components(Vec<f64>),
    /// Any CSS color string, such as `"#c8a165"` or `"rgb(10 20 30)"`.
    Css(String),
    /// Something else entirely.
    Unrecognized(IgnoredAny),
}

impl ColorSpec {
    /// Converts to a concrete color, or `None` if malformed.
    #[must_use]
    pub fn to_color(&self) -> Option<Color> {
        match self {
            Self::Rgba { r, g, b, a } => rgba(*r, *g, *b, a.unwrap_or(1.0)),
            Self::Components(c) => match c.as_slice() {
                [r, g, b] => rgba(*r, *g, *b, 1.0),
                [r, g, b, a] => rgba(*r, *g, *b, *a),
                _ => None,
            },
            Self::Css(s) => parse_color(s).ok().map(|c| c.to_alpha_color::<Srgb>()),
            Self::Unrecognized(_) => None,
        }
    }
}

impl From<Color> for ColorSpec {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self::Rgba {
            r: f64::from(rgba.r),
            g: f64::from(rgba.g),
            b: f64::from(rgba.b),
            a: Some(f64::from(rgba.a) / 255.0),
        }
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "channels are range-checked to 0..=255 before the cast"
)]
fn rgba(r: f64, g: f64, b: f64, a: f64) -> Option<Color> {
    let channel = |v: f64| (0.0..=255.0).contains(&v).then(|| v.round() as u8);
    let alpha = (0.0..=1.0).contains(&a).then(|| (a * 255.0).round() as u8);
    Some(Color::from_rgba8(channel(r)?, channel(g)?, channel(b)?, alpha?))
}

/// Fill of a resolved interval.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum IntervalColor {
    /// A well-formed color.
    Defined(Color),
    /// The source color was malformed; hosts pick a visible fallback.
    Undefined,
}

impl IntervalColor {
    /// Resolves a host color.
    #[must_use]
    pub fn from_spec(spec: &ColorSpec) -> Self {
        spec.to_color().map_or(Self::Undefined, Self::Defined)
    }

    /// The color, if defined.
    #[must_use]
    pub fn color(self) -> Option<Color> {
        match self {
            Self::Defined(c) => Some(c),
            Self::Undefined => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(json: &str) -> ColorSpec {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn rgba_structures_resolve() {
        assert_eq!(
            spec(r#"{"r": 200, "g": 161, "b": 101}"#).to_color(),
            Some(Color::from_rgba8(200, 161, 101, 255))
        );
        assert_eq!(
            spec("[10, 20, 30, 0.5]").to_color(),
            Some(Color::from_rgba8(10, 20, 30, 128))
        );
    }

    #[test]
    fn css_strings_resolve() {
        let rgba = spec(r##""#0a141e""##).to_color().unwrap().to_rgba8();
        assert_eq!((rgba.r, rgba.g, rgba.b, rgba.a), (10, 20, 30, 255));
    }

    #[test]
    fn malformed_colors_are_undefined() {
        for json in [r#""not a color""#, "[1, 2]", r#"{"r": 300, "g": 0, "b": 0}"#, "true", "null"] {
            assert_eq!(IntervalColor::from_spec(&spec(json)), IntervalColor::Undefined, "{json}");
        }
    }
}
