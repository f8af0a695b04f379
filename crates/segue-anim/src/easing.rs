//! Easing functions for timeline pacing.
//!
//! CSS-compatible timing functions:
//! - Linear (the default for a timeline)
//! - Ease, EaseIn, EaseOut, EaseInOut (standard CSS curves)
//! - CubicBezier (custom bezier curves)
//! - Steps (stepped animations)
//!
//! # Usage
//!
//! ```
//! use segue_anim::easing::EasingFunction;
//!
//! let progress = EasingFunction::EaseOut.evaluate(0.5);
//! assert!(progress > 0.5);
//!
//! let parsed = EasingFunction::from_name("ease-in-out");
//! assert_eq!(parsed, Some(EasingFunction::EaseInOut));
//! ```

use serde::{Deserialize, Serialize};

/// Position for stepped animations.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepPosition {
    /// Jump at the start of each interval (CSS `jump-start`).
    Start,
    /// Jump at the end of each interval (CSS `jump-end`).
    #[default]
    End,
}

/// Easing function mapping normalized time to interpolation progress.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EasingFunction {
    /// Identity mapping.
    #[default]
    Linear,

    /// CSS `ease`, equivalent to `cubic-bezier(0.25, 0.1, 0.25, 1.0)`.
    Ease,

    /// CSS `ease-in`, equivalent to `cubic-bezier(0.42, 0, 1, 1)`.
    EaseIn,

    /// CSS `ease-out`, equivalent to `cubic-bezier(0, 0, 0.58, 1)`.
    EaseOut,

    /// CSS `ease-in-out`, equivalent to `cubic-bezier(0.42, 0, 0.58, 1)`.
    EaseInOut,

    /// Custom cubic bezier curve through control points (x1, y1) and (x2, y2).
    /// x values must be in [0, 1], y values can be any float.
    CubicBezier { x1: f32, y1: f32, x2: f32, y2: f32 },

    /// Stepped progress with `count` discrete jumps (must be >= 1).
    Steps { count: u32, position: StepPosition },
}

impl EasingFunction {
    /// Evaluate the easing function at the given progress.
    ///
    /// `t` is clamped into 0.0..=1.0. The result may leave that range for
    /// bezier curves with overshooting y control points.
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Self::Linear => t,
            Self::Ease => cubic_bezier(0.25, 0.1, 0.25, 1.0, t),
            Self::EaseIn => cubic_bezier(0.42, 0.0, 1.0, 1.0, t),
            Self::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, t),
            Self::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, t),
            Self::CubicBezier { x1, y1, x2, y2 } => cubic_bezier(*x1, *y1, *x2, *y2, t),
            Self::Steps { count, position } => stepped(*count, *position, t),
        }
    }

    /// Create a custom cubic bezier easing function.
    ///
    /// # Panics
    /// Panics if x1 or x2 are outside [0, 1].
    pub fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        assert!(
            (0.0..=1.0).contains(&x1) && (0.0..=1.0).contains(&x2),
            "Bezier x values must be in [0, 1]"
        );
        Self::CubicBezier { x1, y1, x2, y2 }
    }

    /// Create a stepped easing function.
    ///
    /// # Panics
    /// Panics if steps is 0.
    pub fn steps(steps: u32, position: StepPosition) -> Self {
        assert!(steps >= 1, "Steps must be at least 1");
        Self::Steps {
            count: steps,
            position,
        }
    }

    /// Parse one of the named CSS curves.
    ///
    /// Matching ignores case and treats `-` and `_` alike, so `ease-out`,
    /// `EASE_OUT` and `easeout` all resolve to [`EasingFunction::EaseOut`].
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().replace('-', "_").as_str() {
            "linear" => Some(Self::Linear),
            "ease" => Some(Self::Ease),
            "ease_in" | "easein" => Some(Self::EaseIn),
            "ease_out" | "easeout" => Some(Self::EaseOut),
            "ease_in_out" | "easeinout" => Some(Self::EaseInOut),
            _ => None,
        }
    }
}

/// Evaluate a cubic bezier curve at the given progress.
///
/// Newton-Raphson finds the curve parameter whose x matches `progress`,
/// then the y coordinate at that parameter is returned.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, progress: f32) -> f32 {
    if progress <= 0.0 {
        return 0.0;
    }
    if progress >= 1.0 {
        return 1.0;
    }

    let t = solve_bezier_x(x1, x2, progress);
    bezier_component(y1, y2, t)
}

fn solve_bezier_x(x1: f32, x2: f32, target_x: f32) -> f32 {
    let mut t = target_x;

    for _ in 0..8 {
        let x = bezier_component(x1, x2, t) - target_x;
        if x.abs() < 1e-6 {
            break;
        }

        let dx = bezier_derivative(x1, x2, t);
        if dx.abs() < 1e-6 {
            break;
        }

        t -= x / dx;
        t = t.clamp(0.0, 1.0);
    }

    t
}

/// B(t) = 3(1-t)²t·p1 + 3(1-t)t²·p2 + t³
#[inline]
fn bezier_component(p1: f32, p2: f32, t: f32) -> f32 {
    let t2 = t * t;
    let t3 = t2 * t;
    let mt = 1.0 - t;
    let mt2 = mt * mt;

    3.0 * mt2 * t * p1 + 3.0 * mt * t2 * p2 + t3
}

/// B'(t) = 3(1-t)²·p1 + 6(1-t)t·(p2-p1) + 3t²·(1-p2)
#[inline]
fn bezier_derivative(p1: f32, p2: f32, t: f32) -> f32 {
    let mt = 1.0 - t;
    3.0 * mt * mt * p1 + 6.0 * mt * t * (p2 - p1) + 3.0 * t * t * (1.0 - p2)
}

fn stepped(steps: u32, position: StepPosition, t: f32) -> f32 {
    if steps == 0 {
        return t;
    }

    let steps_f = steps as f32;

    match position {
        StepPosition::Start => (t * steps_f).ceil() / steps_f,
        StepPosition::End => (t * steps_f).floor() / steps_f,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_linear() {
        let ease = EasingFunction::Linear;
        assert!(approx_eq(ease.evaluate(0.0), 0.0));
        assert!(approx_eq(ease.evaluate(0.25), 0.25));
        assert!(approx_eq(ease.evaluate(0.75), 0.75));
        assert!(approx_eq(ease.evaluate(1.0), 1.0));
    }

    #[test]
    fn test_default_is_linear() {
        assert_eq!(EasingFunction::default(), EasingFunction::Linear);
        assert_eq!(StepPosition::default(), StepPosition::End);
    }

    #[test]
    fn test_ease_in_is_slow_then_fast() {
        let ease = EasingFunction::EaseIn;
        assert!(approx_eq(ease.evaluate(0.0), 0.0));
        assert!(approx_eq(ease.evaluate(1.0), 1.0));
        assert!(ease.evaluate(0.25) < 0.25);
        assert!(ease.evaluate(0.5) < 0.5);
    }

    #[test]
    fn test_ease_out_is_fast_then_slow() {
        let ease = EasingFunction::EaseOut;
        assert!(ease.evaluate(0.25) > 0.25);
        assert!(ease.evaluate(0.5) > 0.5);
    }

    #[test]
    fn test_ease_in_out_is_symmetric() {
        let ease = EasingFunction::EaseInOut;
        assert!(approx_eq(ease.evaluate(0.5), 0.5));
        assert!(approx_eq(ease.evaluate(0.25) + ease.evaluate(0.75), 1.0));
    }

    #[test]
    fn test_ease_is_monotonic() {
        let ease = EasingFunction::Ease;
        let early = ease.evaluate(0.25);
        let mid = ease.evaluate(0.5);
        let late = ease.evaluate(0.75);
        assert!(early < mid, "early ({}) should be less than mid ({})", early, mid);
        assert!(mid < late, "mid ({}) should be less than late ({})", mid, late);
    }

    #[test]
    fn test_linear_bezier_matches_linear() {
        let ease = EasingFunction::cubic_bezier(0.0, 0.0, 1.0, 1.0);
        assert!(approx_eq(ease.evaluate(0.5), 0.5));
    }

    #[test]
    fn test_steps() {
        let end = EasingFunction::steps(4, StepPosition::End);
        assert!(approx_eq(end.evaluate(0.24), 0.0));
        assert!(approx_eq(end.evaluate(0.5), 0.5));
        assert!(approx_eq(end.evaluate(0.99), 0.75));

        let start = EasingFunction::steps(4, StepPosition::Start);
        assert!(approx_eq(start.evaluate(0.01), 0.25));
        assert!(approx_eq(start.evaluate(0.76), 1.0));
    }

    #[test]
    fn test_clamping() {
        let ease = EasingFunction::Ease;
        assert!(approx_eq(ease.evaluate(-0.5), 0.0));
        assert!(approx_eq(ease.evaluate(1.5), 1.0));
    }

    #[test]
    fn test_from_name() {
        assert_eq!(EasingFunction::from_name("linear"), Some(EasingFunction::Linear));
        assert_eq!(EasingFunction::from_name("Ease-Out"), Some(EasingFunction::EaseOut));
        assert_eq!(EasingFunction::from_name("ease_in_out"), Some(EasingFunction::EaseInOut));
        assert_eq!(EasingFunction::from_name("bounce"), None);
    }

    #[test]
    #[should_panic(expected = "Bezier x values must be in [0, 1]")]
    fn test_invalid_bezier_x() {
        EasingFunction::cubic_bezier(-0.1, 0.0, 0.5, 1.0);
    }

    #[test]
    #[should_panic(expected = "Steps must be at least 1")]
    fn test_invalid_steps() {
        EasingFunction::steps(0, StepPosition::End);
    }
}
