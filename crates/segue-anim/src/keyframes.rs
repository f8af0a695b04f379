//! Keyframed property timelines.
//!
//! This module provides:
//! - `Cue`: A position along a timeline as a fraction of its duration
//! - `Keyframe`: Property targets at one cue
//! - `FillMode`: Which values hold outside the active interval
//! - `Timeline`: Keyframes plus duration, delay, fill mode and easing
//!
//! A timeline is a description only. It is handed to an
//! [`AnimationEngine`](crate::engine::AnimationEngine) to run against a
//! [`Visual`](crate::visual::Visual), and can be run any number of times.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use segue_anim::{AnimatableProperty, Timeline};
//!
//! let fade = Timeline::new("fade-in")
//!     .duration(Duration::from_millis(250))
//!     .keyframe(0.0, |kf| kf.set(AnimatableProperty::Opacity, 0.0))
//!     .keyframe(1.0, |kf| kf.set(AnimatableProperty::Opacity, 1.0));
//!
//! assert_eq!(fade.value_at(AnimatableProperty::Opacity, 0.5), Some(0.5));
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

use super::easing::EasingFunction;
use super::interpolate::Interpolate;
use super::types::AnimatableProperty;

/// Position along a timeline, from 0.0 (start) to 1.0 (end).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Cue(f32);

impl Cue {
    /// Start of the timeline.
    pub const START: Cue = Cue(0.0);
    /// End of the timeline.
    pub const END: Cue = Cue(1.0);

    /// Create a cue, clamping into 0.0..=1.0. NaN maps to the start.
    pub fn new(offset: f32) -> Self {
        if offset.is_nan() {
            return Self::START;
        }
        Self(offset.clamp(0.0, 1.0))
    }

    pub fn value(self) -> f32 {
        self.0
    }
}

/// What values to apply outside the active interval of a timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillMode {
    /// Values only apply while the timeline is active; the base value
    /// is restored when it ends.
    None,
    /// Retain the final keyframe values after the timeline ends.
    Forward,
    /// Apply the first keyframe values during the delay.
    Backward,
    /// Both forward and backward.
    #[default]
    Both,
}

impl FillMode {
    /// Should apply first-keyframe values before the timeline starts?
    pub fn applies_backward(&self) -> bool {
        matches!(self, Self::Backward | Self::Both)
    }

    /// Should retain last-keyframe values after the timeline ends?
    pub fn applies_forward(&self) -> bool {
        matches!(self, Self::Forward | Self::Both)
    }

    /// Parse a fill mode name (`none`, `forward`, `backward`, `both`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "none" => Some(Self::None),
            "forward" | "forwards" => Some(Self::Forward),
            "backward" | "backwards" => Some(Self::Backward),
            "both" => Some(Self::Both),
            _ => None,
        }
    }
}

/// Property targets at a single cue.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Keyframe {
    /// Position in the timeline.
    pub cue: Cue,
    /// Property values at this keyframe.
    pub values: BTreeMap<AnimatableProperty, f64>,
    /// Easing used when interpolating TO this keyframe.
    /// If None, the timeline easing applies.
    pub easing: Option<EasingFunction>,
}

impl Keyframe {
    /// Create a new keyframe at the given offset.
    pub fn new(offset: f32) -> Self {
        Self {
            cue: Cue::new(offset),
            values: BTreeMap::new(),
            easing: None,
        }
    }

    /// Set a property value for this keyframe.
    pub fn set(mut self, property: AnimatableProperty, value: f64) -> Self {
        self.values.insert(property, value);
        self
    }

    /// Set the easing function for interpolating to this keyframe.
    pub fn with_easing(mut self, easing: EasingFunction) -> Self {
        self.easing = Some(easing);
        self
    }

    /// Get a property value from this keyframe.
    pub fn get(&self, property: AnimatableProperty) -> Option<f64> {
        self.values.get(&property).copied()
    }
}

/// A keyframed property animation.
///
/// Timelines are built once and mutated in place through the `set_*`
/// methods; running one never consumes or rebuilds it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timeline {
    /// Name used in log output.
    pub name: String,
    /// Keyframes sorted by cue.
    keyframes: Vec<Keyframe>,
    /// Length of the active interval.
    pub duration: Duration,
    /// Wait before the active interval begins.
    pub delay: Duration,
    /// Which values hold outside the active interval.
    pub fill_mode: FillMode,
    /// Easing for keyframes without their own.
    pub easing: EasingFunction,
}

impl Timeline {
    /// Create an empty timeline with zero duration, no delay,
    /// `FillMode::Both` and linear easing.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            keyframes: Vec::new(),
            duration: Duration::ZERO,
            delay: Duration::ZERO,
            fill_mode: FillMode::default(),
            easing: EasingFunction::default(),
        }
    }

    /// Opacity 1.0 at the start cue to 0.0 at the end cue.
    pub fn fade_out() -> Self {
        Self::new("fade-out")
            .keyframe(0.0, |kf| kf.set(AnimatableProperty::Opacity, 1.0))
            .keyframe(1.0, |kf| kf.set(AnimatableProperty::Opacity, 0.0))
    }

    /// Opacity 0.0 at the start cue to 1.0 at the end cue.
    pub fn fade_in() -> Self {
        Self::new("fade-in")
            .keyframe(0.0, |kf| kf.set(AnimatableProperty::Opacity, 0.0))
            .keyframe(1.0, |kf| kf.set(AnimatableProperty::Opacity, 1.0))
    }

    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn fill_mode(mut self, fill_mode: FillMode) -> Self {
        self.fill_mode = fill_mode;
        self
    }

    pub fn easing(mut self, easing: EasingFunction) -> Self {
        self.easing = easing;
        self
    }

    /// Add a keyframe using a builder function.
    pub fn keyframe<F>(self, offset: f32, builder: F) -> Self
    where
        F: FnOnce(Keyframe) -> Keyframe,
    {
        self.add_keyframe(builder(Keyframe::new(offset)))
    }

    /// Add a pre-built keyframe.
    pub fn add_keyframe(mut self, keyframe: Keyframe) -> Self {
        self.keyframes.push(keyframe);
        // Stable sort keeps insertion order for equal cues.
        self.keyframes.sort_by(|a, b| {
            a.cue
                .partial_cmp(&b.cue)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        self
    }

    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
    }

    pub fn set_fill_mode(&mut self, fill_mode: FillMode) {
        self.fill_mode = fill_mode;
    }

    pub fn set_easing(&mut self, easing: EasingFunction) {
        self.easing = easing;
    }

    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    /// Every property targeted by at least one keyframe, in stable order.
    pub fn animated_properties(&self) -> Vec<AnimatableProperty> {
        let mut props: Vec<AnimatableProperty> = self
            .keyframes
            .iter()
            .flat_map(|kf| kf.values.keys().copied())
            .collect();
        props.sort();
        props.dedup();
        props
    }

    /// Find the keyframes surrounding a given progress.
    ///
    /// Returns (from_keyframe, to_keyframe, local_progress) where local_progress
    /// is 0.0-1.0 between the two keyframes.
    fn find_keyframes(&self, progress: f32) -> Option<(&Keyframe, &Keyframe, f32)> {
        if self.keyframes.is_empty() {
            return None;
        }

        let progress = Cue::new(progress).value();

        let mut from_idx = 0;
        let mut to_idx = 0;

        for (i, kf) in self.keyframes.iter().enumerate() {
            if kf.cue.value() <= progress {
                from_idx = i;
            }
            to_idx = i;
            if kf.cue.value() >= progress {
                break;
            }
        }

        let from_kf = &self.keyframes[from_idx];
        let to_kf = &self.keyframes[to_idx];

        let local_progress = if from_idx == to_idx {
            0.0
        } else {
            let range = to_kf.cue.value() - from_kf.cue.value();
            if range > 0.0 {
                (progress - from_kf.cue.value()) / range
            } else {
                0.0
            }
        };

        Some((from_kf, to_kf, local_progress))
    }

    /// Value of a property at the given progress through the active interval.
    pub fn value_at(&self, property: AnimatableProperty, progress: f32) -> Option<f64> {
        let (from_kf, to_kf, local_progress) = self.find_keyframes(progress)?;

        let from_value = from_kf.get(property)?;
        let to_value = to_kf.get(property).unwrap_or(from_value);

        let easing = to_kf.easing.unwrap_or(self.easing);
        let eased_progress = easing.evaluate(local_progress);

        Some(from_value.interpolate(&to_value, eased_progress))
    }

    /// Values of every animated property at the given progress.
    pub fn values_at(&self, progress: f32) -> Vec<(AnimatableProperty, f64)> {
        self.animated_properties()
            .into_iter()
            .filter_map(|property| {
                self.value_at(property, progress)
                    .map(|value| (property, value))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opacity(timeline: &Timeline, progress: f32) -> f64 {
        timeline
            .value_at(AnimatableProperty::Opacity, progress)
            .unwrap()
    }

    #[test]
    fn test_cue_clamps() {
        assert_eq!(Cue::new(-1.0), Cue::START);
        assert_eq!(Cue::new(2.0), Cue::END);
        assert_eq!(Cue::new(f32::NAN), Cue::START);
        assert_eq!(Cue::new(0.25).value(), 0.25);
    }

    #[test]
    fn test_fill_mode() {
        assert!(!FillMode::None.applies_backward());
        assert!(!FillMode::None.applies_forward());

        assert!(!FillMode::Forward.applies_backward());
        assert!(FillMode::Forward.applies_forward());

        assert!(FillMode::Backward.applies_backward());
        assert!(!FillMode::Backward.applies_forward());

        assert!(FillMode::Both.applies_backward());
        assert!(FillMode::Both.applies_forward());

        assert_eq!(FillMode::default(), FillMode::Both);
    }

    #[test]
    fn test_fill_mode_from_name() {
        assert_eq!(FillMode::from_name("Both"), Some(FillMode::Both));
        assert_eq!(FillMode::from_name("forwards"), Some(FillMode::Forward));
        assert_eq!(FillMode::from_name("none"), Some(FillMode::None));
        assert_eq!(FillMode::from_name("sideways"), None);
    }

    #[test]
    fn test_fade_timelines() {
        let out = Timeline::fade_out();
        assert_eq!(out.keyframes().len(), 2);
        assert_eq!(opacity(&out, 0.0), 1.0);
        assert_eq!(opacity(&out, 1.0), 0.0);

        let fade_in = Timeline::fade_in();
        assert_eq!(opacity(&fade_in, 0.0), 0.0);
        assert!((opacity(&fade_in, 0.5) - 0.5).abs() < 1e-6);
        assert_eq!(opacity(&fade_in, 1.0), 1.0);
    }

    #[test]
    fn test_keyframes_sorted_by_cue() {
        let timeline = Timeline::new("unordered")
            .keyframe(1.0, |kf| kf.set(AnimatableProperty::Opacity, 1.0))
            .keyframe(0.5, |kf| kf.set(AnimatableProperty::Opacity, 0.8))
            .keyframe(0.0, |kf| kf.set(AnimatableProperty::Opacity, 0.0));

        let cues: Vec<f32> = timeline.keyframes().iter().map(|kf| kf.cue.value()).collect();
        assert_eq!(cues, vec![0.0, 0.5, 1.0]);

        // Halfway between the 0.5 and 1.0 keyframes.
        assert!((opacity(&timeline, 0.75) - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_timeline_easing_applies() {
        let timeline = Timeline::fade_in().easing(EasingFunction::EaseIn);
        assert!(opacity(&timeline, 0.5) < 0.5);
    }

    #[test]
    fn test_keyframe_easing_overrides_timeline() {
        let timeline = Timeline::new("override")
            .easing(EasingFunction::EaseIn)
            .keyframe(0.0, |kf| kf.set(AnimatableProperty::Opacity, 0.0))
            .keyframe(1.0, |kf| {
                kf.set(AnimatableProperty::Opacity, 1.0)
                    .with_easing(EasingFunction::Linear)
            });
        assert!((opacity(&timeline, 0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_setters_mutate_in_place() {
        let mut timeline = Timeline::fade_out();
        timeline.set_duration(Duration::from_millis(300));
        timeline.set_fill_mode(FillMode::None);
        timeline.set_easing(EasingFunction::EaseOut);

        assert_eq!(timeline.duration, Duration::from_millis(300));
        assert_eq!(timeline.fill_mode, FillMode::None);
        assert_eq!(timeline.easing, EasingFunction::EaseOut);
        assert_eq!(timeline.keyframes().len(), 2);
    }

    #[test]
    fn test_empty_timeline_has_no_values() {
        let timeline = Timeline::new("empty");
        assert!(timeline.value_at(AnimatableProperty::Opacity, 0.5).is_none());
        assert!(timeline.values_at(0.5).is_empty());
    }

    #[test]
    fn test_values_at() {
        let values = Timeline::fade_out().values_at(0.25);
        assert_eq!(values.len(), 1);
        assert_eq!(values[0].0, AnimatableProperty::Opacity);
        assert!((values[0].1 - 0.75).abs() < 1e-6);
    }
}
