//! Animation primitives for view transitions.
//!
//! This crate provides:
//! - **Easing Functions**: Standard CSS timing functions
//! - **Timelines**: Keyframed property animations with a duration, delay and fill mode
//! - **Visuals**: The element capability an animation writes to
//! - **Cancellation**: A cooperative token observed by running animations
//! - **Engine**: Drives a timeline against a visual on a frame clock
//!
//! # Architecture
//!
//! ```text
//! Timeline (keyframes + timing)
//!   └── AnimationEngine::run(timeline, visual, token)
//!         ├── FrameClock ticks at the configured frame rate
//!         └── applies Timeline::values_at(progress) to the Visual
//! ```

pub mod cancel;
pub mod easing;
pub mod engine;
pub mod error;
pub mod interpolate;
pub mod keyframes;
pub mod types;
pub mod visual;

pub use cancel::CancellationToken;
pub use easing::{EasingFunction, StepPosition};
pub use engine::{AnimationEngine, DEFAULT_FRAME_RATE, FrameClock};
pub use error::{AnimationError, Result};
pub use interpolate::Interpolate;
pub use keyframes::{Cue, FillMode, Keyframe, Timeline};
pub use types::{AnimatableProperty, AnimationId, AnimationState};
pub use visual::{Visual, VisualElement};
