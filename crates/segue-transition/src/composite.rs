//! Several transitions run together over the same pair of views.

use futures::future::{BoxFuture, join_all};
use segue_anim::{CancellationToken, Result, Visual};
use tracing::debug;

use crate::PageTransition;

/// Starts every child transition concurrently and resolves when all settle.
///
/// Children see the same endpoints, direction and token. If any child fails,
/// the first error in insertion order is returned once all have settled.
#[derive(Default)]
pub struct CompositeTransition {
    children: Vec<Box<dyn PageTransition>>,
}

impl CompositeTransition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a child transition.
    pub fn with(mut self, transition: impl PageTransition + 'static) -> Self {
        self.push(transition);
        self
    }

    pub fn push(&mut self, transition: impl PageTransition + 'static) {
        self.children.push(Box::new(transition));
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    async fn run_all(
        &self,
        from: Option<&dyn Visual>,
        to: Option<&dyn Visual>,
        forward: bool,
        cancel: &CancellationToken,
    ) -> Result<()> {
        if cancel.is_cancelled() {
            return Ok(());
        }
        debug!(children = self.children.len(), forward, "composite transition started");

        let outcomes = join_all(
            self.children
                .iter()
                .map(|child| child.start(from, to, forward, cancel)),
        )
        .await;

        outcomes.into_iter().collect::<Result<Vec<()>>>()?;
        Ok(())
    }
}

impl std::fmt::Debug for CompositeTransition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositeTransition")
            .field("children", &self.children.len())
            .finish()
    }
}

impl PageTransition for CompositeTransition {
    fn start<'a>(
        &'a self,
        from: Option<&'a dyn Visual>,
        to: Option<&'a dyn Visual>,
        forward: bool,
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, Result<()>> {
        Box::pin(self.run_all(from, to, forward, cancel))
    }
}
