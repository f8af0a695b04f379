//! Cross-fade: the outgoing view fades out while the incoming view fades in.
//!
//! Both fades share one duration and fill mode; each has its own easing.
//! The two timelines are built once, when the transition is constructed,
//! and every setter writes through to them in place.

use std::time::Duration;

use futures::future::{BoxFuture, join_all};
use segue_anim::{
    AnimationEngine, CancellationToken, EasingFunction, FillMode, FrameClock, Result, Timeline,
    Visual,
};
use segue_config::TransitionConfig;
use tracing::debug;

use crate::PageTransition;

/// Opacity cross-fade between two views.
#[derive(Debug, Clone)]
pub struct CrossFade<E = FrameClock> {
    engine: E,
    fade_out: Timeline,
    fade_in: Timeline,
}

impl CrossFade<FrameClock> {
    /// Cross-fade driven by a default [`FrameClock`].
    pub fn new(duration: Duration) -> Self {
        Self::with_engine(FrameClock::new(), duration)
    }
}

impl Default for CrossFade<FrameClock> {
    fn default() -> Self {
        Self::new(Duration::ZERO)
    }
}

impl<E: AnimationEngine> CrossFade<E> {
    /// Cross-fade driven by `engine`, with `FillMode::Both` and linear easing.
    pub fn with_engine(engine: E, duration: Duration) -> Self {
        let mut fade = Self {
            engine,
            fade_out: Timeline::fade_out(),
            fade_in: Timeline::fade_in(),
        };
        fade.set_fill_mode(FillMode::Both);
        fade.set_duration(duration);
        fade
    }

    /// Cross-fade with duration, fill mode and easings taken from `config`.
    pub fn from_config(engine: E, config: &TransitionConfig) -> Self {
        let mut fade = Self::with_engine(engine, config.duration());
        fade.set_fill_mode(config.fill_mode);
        fade.set_fade_in_easing(config.fade_in_easing);
        fade.set_fade_out_easing(config.fade_out_easing);
        fade
    }

    pub fn duration(&self) -> Duration {
        self.fade_out.duration
    }

    /// Set the duration of both fades.
    pub fn set_duration(&mut self, duration: Duration) {
        self.fade_out.set_duration(duration);
        self.fade_in.set_duration(duration);
    }

    pub fn fill_mode(&self) -> FillMode {
        self.fade_out.fill_mode
    }

    /// Set the fill mode of both fades.
    pub fn set_fill_mode(&mut self, fill_mode: FillMode) {
        self.fade_out.set_fill_mode(fill_mode);
        self.fade_in.set_fill_mode(fill_mode);
    }

    /// Easing of the incoming view.
    pub fn fade_in_easing(&self) -> EasingFunction {
        self.fade_in.easing
    }

    pub fn set_fade_in_easing(&mut self, easing: EasingFunction) {
        self.fade_in.set_easing(easing);
    }

    /// Easing of the outgoing view.
    pub fn fade_out_easing(&self) -> EasingFunction {
        self.fade_out.easing
    }

    pub fn set_fade_out_easing(&mut self, easing: EasingFunction) {
        self.fade_out.set_easing(easing);
    }

    pub fn fade_in_timeline(&self) -> &Timeline {
        &self.fade_in
    }

    pub fn fade_out_timeline(&self) -> &Timeline {
        &self.fade_out
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Fade `from` out and `to` in, concurrently.
    ///
    /// `to` is made visible before its fade starts. Once both fades settle,
    /// `from` is hidden unless `cancel` fired; a cancelled run leaves both
    /// views wherever the fades stopped. Errors from the engine are returned
    /// as-is after every started fade has settled, and `from` is left visible.
    pub async fn run(
        &self,
        from: Option<&dyn Visual>,
        to: Option<&dyn Visual>,
        cancel: &CancellationToken,
    ) -> Result<()> {
        if cancel.is_cancelled() {
            debug!("cross-fade skipped, token already cancelled");
            return Ok(());
        }

        debug!(
            from = ?from.map(|v| v.name()),
            to = ?to.map(|v| v.name()),
            duration_ms = self.duration().as_millis() as u64,
            "cross-fade started"
        );

        let mut pending: Vec<BoxFuture<'_, _>> = Vec::with_capacity(2);
        if let Some(from) = from {
            pending.push(self.engine.run(&self.fade_out, from, cancel));
        }
        if let Some(to) = to {
            to.set_visible(true);
            pending.push(self.engine.run(&self.fade_in, to, cancel));
        }

        for outcome in join_all(pending).await {
            outcome?;
        }

        if cancel.is_cancelled() {
            debug!("cross-fade cancelled");
            return Ok(());
        }
        if let Some(from) = from {
            from.set_visible(false);
        }

        debug!("cross-fade finished");
        Ok(())
    }
}

impl<E: AnimationEngine> PageTransition for CrossFade<E> {
    fn start<'a>(
        &'a self,
        from: Option<&'a dyn Visual>,
        to: Option<&'a dyn Visual>,
        _forward: bool,
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, Result<()>> {
        Box::pin(self.run(from, to, cancel))
    }
}
