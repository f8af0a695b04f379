//! Instant swap with no animation.

use futures::future::BoxFuture;
use segue_anim::{CancellationToken, Result, Visual};
use tracing::debug;

use crate::PageTransition;

/// Shows `to` and hides `from` immediately. Opacity is left alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTransition;

impl NoTransition {
    /// Swap the two views unless `cancel` already fired.
    pub async fn run(
        &self,
        from: Option<&dyn Visual>,
        to: Option<&dyn Visual>,
        cancel: &CancellationToken,
    ) -> Result<()> {
        if cancel.is_cancelled() {
            return Ok(());
        }
        if let Some(to) = to {
            to.set_visible(true);
        }
        if let Some(from) = from {
            from.set_visible(false);
        }
        debug!(
            from = ?from.map(|v| v.name()),
            to = ?to.map(|v| v.name()),
            "swapped without transition"
        );
        Ok(())
    }
}

impl PageTransition for NoTransition {
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
