//! Easing curves
//!
//! Every curve maps `alpha` in `[0, 1]` monotonically onto `[a, b]`. Alpha is
//! clamped first, so callers can feed raw `elapsed / duration` ratios.

use crate::consts::FRAC_PI_2;
use crate::consts::PI;
use crate::lerp;

/// Easing function selector
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EasingFunc {
    #[default]
    Linear,
    /// Discrete steps, uses the curve's step count
    Step,
    SinusoidalIn,
    SinusoidalOut,
    SinusoidalInOut,
    /// Uses the curve's blend exponent
    EaseIn,
    /// Uses the curve's blend exponent
    EaseOut,
    /// Uses the curve's blend exponent
    EaseInOut,
    ExpoIn,
    ExpoOut,
    ExpoInOut,
    CircularIn,
    CircularOut,
    CircularInOut,
}

fn ease_in(alpha: f32, exp: f32) -> f32 {
    alpha.powf(exp)
}

fn ease_out(alpha: f32, exp: f32) -> f32 {
    1.0 - (1.0 - alpha).powf(exp)
}

fn expo_in(alpha: f32) -> f32 {
    if alpha == 0.0 { 0.0 } else { 2f32.powf(10.0 * (alpha - 1.0)) }
}

fn expo_out(alpha: f32) -> f32 {
    if alpha == 1.0 { 1.0 } else { 1.0 - 2f32.powf(-10.0 * alpha) }
}

fn circular_in(alpha: f32) -> f32 {
    1.0 - (1.0 - alpha * alpha).max(0.0).sqrt()
}

fn circular_out(alpha: f32) -> f32 {
    let a = alpha - 1.0;
    (1.0 - a * a).max(0.0).sqrt()
}

fn in_out(alpha: f32, f_in: impl Fn(f32) -> f32, f_out: impl Fn(f32) -> f32) -> f32 {
    if alpha < 0.5 {
        f_in(alpha * 2.0) * 0.5
    } else {
        f_out(alpha * 2.0 - 1.0) * 0.5 + 0.5
    }
}

/// Interpolate from `a` to `b` with the chosen curve.
///
/// `blend_exp` is used by the EaseIn/EaseOut/EaseInOut family, `steps` by
/// [`EasingFunc::Step`]. A step count of one or less holds `a` until alpha
/// reaches 1.
pub fn ease(a: f32, b: f32, alpha: f32, func: EasingFunc, blend_exp: f32, steps: u32) -> f32 {
    let alpha = if alpha.is_nan() { 0.0 } else { alpha.clamp(0.0, 1.0) };

    let t = match func {
        EasingFunc::Linear => alpha,
        EasingFunc::Step => {
            if alpha >= 1.0 {
                1.0
            } else if steps <= 1 || alpha <= 0.0 {
                0.0
            } else {
                let steps = steps as f32;
                ((alpha * steps).floor() / (steps - 1.0)).min(1.0)
            }
        }
        EasingFunc::SinusoidalIn => 1.0 - (alpha * FRAC_PI_2).cos(),
        EasingFunc::SinusoidalOut => (alpha * FRAC_PI_2).sin(),
        EasingFunc::SinusoidalInOut => -0.5 * ((PI * alpha).cos() - 1.0),
        EasingFunc::EaseIn => ease_in(alpha, blend_exp),
        EasingFunc::EaseOut => ease_out(alpha, blend_exp),
        EasingFunc::EaseInOut => in_out(alpha, |x| ease_in(x, blend_exp), |x| ease_out(x, blend_exp)),
        EasingFunc::ExpoIn => expo_in(alpha),
        EasingFunc::ExpoOut => expo_out(alpha),
        EasingFunc::ExpoInOut => in_out(alpha, expo_in, expo_out),
        EasingFunc::CircularIn => circular_in(alpha),
        EasingFunc::CircularOut => circular_out(alpha),
        EasingFunc::CircularInOut => in_out(alpha, circular_in, circular_out),
    };

    lerp(a, b, t)
}

/// A configured easing curve
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EasingCurve {
    pub func: EasingFunc,
    /// Exponent for the EaseIn family
    pub blend_exp: f32,
    /// Step count for [`EasingFunc::Step`]
    pub steps: u32,
}

impl EasingCurve {
    pub fn new(func: EasingFunc) -> Self {
        Self { func, ..Default::default() }
    }

    pub fn with_blend_exp(mut self, blend_exp: f32) -> Self {
        self.blend_exp = blend_exp;
        self
    }

    pub fn with_steps(mut self, steps: u32) -> Self {
        self.steps = steps;
        self
    }

    /// Evaluate between `a` and `b`
    #[inline]
    pub fn evaluate(&self, a: f32, b: f32, alpha: f32) -> f32 {
        ease(a, b, alpha, self.func, self.blend_exp, self.steps)
    }
}

impl Default for EasingCurve {
    fn default() -> Self {
        Self {
            func: EasingFunc::Linear,
            blend_exp: 2.0,
            steps: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const ALL: [EasingFunc; 14] = [
        EasingFunc::Linear,
        EasingFunc::Step,
        EasingFunc::SinusoidalIn,
        EasingFunc::SinusoidalOut,
        EasingFunc::SinusoidalInOut,
        EasingFunc::EaseIn,
        EasingFunc::EaseOut,
        EasingFunc::EaseInOut,
        EasingFunc::ExpoIn,
        EasingFunc::ExpoOut,
        EasingFunc::ExpoInOut,
        EasingFunc::CircularIn,
        EasingFunc::CircularOut,
        EasingFunc::CircularInOut,
    ];

    #[test]
    fn test_endpoints() {
        for func in ALL {
            assert_relative_eq!(ease(2.5, 5.0, 0.0, func, 2.0, 2), 2.5, epsilon = 1e-4);
            assert_relative_eq!(ease(2.5, 5.0, 1.0, func, 2.0, 2), 5.0, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_monotonic() {
        for func in ALL {
            let mut prev = ease(0.0, 1.0, 0.0, func, 2.0, 4);
            for i in 1..=100 {
                let v = ease(0.0, 1.0, i as f32 / 100.0, func, 2.0, 4);
                assert!(v + 1e-6 >= prev, "{:?} not monotonic at {}", func, i);
                prev = v;
            }
        }
    }

    #[test]
    fn test_alpha_is_clamped() {
        assert_eq!(ease(2.5, 5.0, 3.0, EasingFunc::Linear, 2.0, 2), 5.0);
        assert_eq!(ease(2.5, 5.0, -1.0, EasingFunc::EaseIn, 2.0, 2), 2.5);
        assert_eq!(ease(2.5, 5.0, f32::NAN, EasingFunc::Linear, 2.0, 2), 2.5);
    }

    #[test]
    fn test_step() {
        assert_eq!(ease(0.0, 1.0, 0.25, EasingFunc::Step, 2.0, 2), 0.0);
        assert_eq!(ease(0.0, 1.0, 0.5, EasingFunc::Step, 2.0, 2), 1.0);
        // Single step holds the start value
        assert_eq!(ease(0.0, 1.0, 0.9, EasingFunc::Step, 2.0, 1), 0.0);
    }

    #[test]
    fn test_ease_in_uses_exponent() {
        assert_relative_eq!(ease(0.0, 1.0, 0.5, EasingFunc::EaseIn, 2.0, 2), 0.25);
        assert_relative_eq!(ease(0.0, 1.0, 0.5, EasingFunc::EaseOut, 2.0, 2), 0.75);
        let curve = EasingCurve::new(EasingFunc::EaseIn).with_blend_exp(3.0);
        assert_relative_eq!(curve.evaluate(0.0, 1.0, 0.5), 0.125);
    }
}
