//! Running timelines against visuals.
//!
//! [`AnimationEngine`] is the seam transitions depend on: hand it a timeline,
//! a target and a cancellation token, and it returns a future that settles
//! when the timeline finishes or the token fires. [`FrameClock`] is the
//! tokio-timer implementation. It needs a runtime with the time driver
//! enabled.

use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, trace};

use super::cancel::CancellationToken;
use super::error::{AnimationError, Result};
use super::keyframes::Timeline;
use super::types::{AnimatableProperty, AnimationId, AnimationState};
use super::visual::Visual;

/// Frames per second used by [`FrameClock::new`].
pub const DEFAULT_FRAME_RATE: f64 = 60.0;

/// Shortest frame interval a clock will tick at.
const MIN_FRAME_INTERVAL: Duration = Duration::from_millis(1);

/// Executes keyframed timelines against visual targets.
pub trait AnimationEngine: Send + Sync {
    /// Run `timeline` against `target` until it finishes or `cancel` fires.
    ///
    /// Resolves to [`AnimationState::Finished`] or
    /// [`AnimationState::Cancelled`]. A cancelled run leaves the target at
    /// whatever values it last received.
    fn run<'a>(
        &'a self,
        timeline: &'a Timeline,
        target: &'a dyn Visual,
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, Result<AnimationState>>;
}

impl<E: AnimationEngine + ?Sized> AnimationEngine for Arc<E> {
    fn run<'a>(
        &'a self,
        timeline: &'a Timeline,
        target: &'a dyn Visual,
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, Result<AnimationState>> {
        (**self).run(timeline, target, cancel)
    }
}

/// Engine that samples timelines on a fixed-rate tokio interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameClock {
    frame_interval: Duration,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    /// Clock ticking at [`DEFAULT_FRAME_RATE`].
    pub fn new() -> Self {
        Self {
            frame_interval: Duration::from_secs_f64(1.0 / DEFAULT_FRAME_RATE),
        }
    }

    /// Clock ticking `frame_rate` times per second.
    pub fn with_frame_rate(frame_rate: f64) -> Result<Self> {
        if !frame_rate.is_finite() || frame_rate <= 0.0 {
            return Err(AnimationError::InvalidFrameRate(frame_rate));
        }
        Ok(Self {
            frame_interval: Duration::from_secs_f64(1.0 / frame_rate).max(MIN_FRAME_INTERVAL),
        })
    }

    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    async fn drive(
        &self,
        timeline: &Timeline,
        target: &dyn Visual,
        cancel: &CancellationToken,
    ) -> Result<AnimationState> {
        let found = timeline.keyframes().len();
        if found < 2 {
            return Err(AnimationError::EmptyTimeline {
                name: timeline.name.clone(),
                found,
            });
        }

        let id = AnimationId::new();
        let base: Vec<(AnimatableProperty, f64)> = timeline
            .animated_properties()
            .into_iter()
            .map(|property| (property, target.property(property)))
            .collect();

        debug!(
            %id,
            timeline = %timeline.name,
            target = target.name(),
            duration_ms = timeline.duration.as_millis() as u64,
            delay_ms = timeline.delay.as_millis() as u64,
            "timeline started"
        );

        if !timeline.delay.is_zero() && timeline.fill_mode.applies_backward() {
            apply(target, timeline.values_at(0.0));
        }

        let start = Instant::now();
        let mut ticker = tokio::time::interval(self.frame_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    debug!(%id, timeline = %timeline.name, target = target.name(), "timeline cancelled");
                    return Ok(AnimationState::Cancelled);
                }
                _ = ticker.tick() => {}
            }

            let Some(active) = start.elapsed().checked_sub(timeline.delay) else {
                continue;
            };
            if active >= timeline.duration {
                break;
            }

            let progress = (active.as_secs_f64() / timeline.duration.as_secs_f64()) as f32;
            trace!(%id, progress, "frame");
            apply(target, timeline.values_at(progress));
        }

        if timeline.fill_mode.applies_forward() {
            apply(target, timeline.values_at(1.0));
        } else {
            apply(target, base);
        }

        debug!(%id, timeline = %timeline.name, target = target.name(), "timeline finished");
        Ok(AnimationState::Finished)
    }
}

impl AnimationEngine for FrameClock {
    fn run<'a>(
        &'a self,
        timeline: &'a Timeline,
        target: &'a dyn Visual,
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, Result<AnimationState>> {
        Box::pin(self.drive(timeline, target, cancel))
    }
}

fn apply(target: &dyn Visual, values: Vec<(AnimatableProperty, f64)>) {
    for (property, value) in values {
        target.set_property(property, value);
    }
}
