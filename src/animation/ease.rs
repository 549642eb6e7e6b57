use std::str::FromStr;

use crate::foundation::error::GlyphfieldError;

/// Easing functions used to map normalized tween progress.
///
/// GSAP-style identifiers are accepted by [`FromStr`]: `power1` is quadratic and `power2` is
/// cubic, so `"power2.out"` maps to [`Ease::OutCubic`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Ease {
    /// Linear interpolation.
    Linear,
    /// Quadratic ease-in.
    InQuad,
    /// Quadratic ease-out.
    OutQuad,
    /// Quadratic ease-in/out.
    InOutQuad,
    /// Cubic ease-in.
    InCubic,
    /// Cubic ease-out.
    OutCubic,
    /// Cubic ease-in/out.
    InOutCubic,
    /// Sinusoidal ease-in/out.
    InOutSine,
}

impl Ease {
    /// Apply this easing function to normalized progress `t` in `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::InOutSine => -((std::f64::consts::PI * t).cos() - 1.0) / 2.0,
        }
    }

    /// Canonical GSAP-style identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Linear => "none",
            Self::InQuad => "power1.in",
            Self::OutQuad => "power1.out",
            Self::InOutQuad => "power1.inOut",
            Self::InCubic => "power2.in",
            Self::OutCubic => "power2.out",
            Self::InOutCubic => "power2.inOut",
            Self::InOutSine => "sine.inOut",
        }
    }
}

impl FromStr for Ease {
    type Err = GlyphfieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ease = match s.trim() {
            "none" | "linear" => Self::Linear,
            "power1.in" | "quad.in" => Self::InQuad,
            "power1.out" | "power1" | "quad.out" => Self::OutQuad,
            "power1.inOut" | "quad.inOut" => Self::InOutQuad,
            "power2.in" | "cubic.in" => Self::InCubic,
            "power2.out" | "power2" | "cubic.out" => Self::OutCubic,
            "power2.inOut" | "cubic.inOut" => Self::InOutCubic,
            "sine.inOut" => Self::InOutSine,
            other => {
                return Err(GlyphfieldError::validation(format!(
                    "unknown easing \"{other}\""
                )));
            }
        };
        Ok(ease)
    }
}

impl TryFrom<String> for Ease {
    type Error = GlyphfieldError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Ease> for String {
    fn from(value: Ease) -> Self {
        value.as_str().to_owned()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
