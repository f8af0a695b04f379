//! Page transitions between two displayed views.
//!
//! A navigation layer hands a transition the outgoing view, the incoming
//! view and a cancellation token; the transition animates the handoff and
//! resolves once both sides have settled. Either endpoint may be absent.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use segue_anim::{CancellationToken, EasingFunction, VisualElement};
//! use segue_transition::CrossFade;
//!
//! # async fn demo() -> segue_anim::Result<()> {
//! let mut fade = CrossFade::new(Duration::from_millis(250));
//! fade.set_fade_in_easing(EasingFunction::EaseOut);
//!
//! let old_page = VisualElement::new("old");
//! let new_page = VisualElement::new("new").with_visible(false);
//! fade.run(Some(&old_page), Some(&new_page), &CancellationToken::new()).await?;
//! # Ok(())
//! # }
//! ```

pub mod composite;
pub mod crossfade;
pub mod none;

pub use composite::CompositeTransition;
pub use crossfade::CrossFade;
pub use none::NoTransition;

use futures::future::BoxFuture;
use segue_anim::{CancellationToken, Result, Visual};

/// Two-endpoint, direction-aware transition capability.
pub trait PageTransition: Send + Sync {
    /// Transition from `from` to `to`.
    ///
    /// `forward` reports the navigation direction; variants that look the
    /// same both ways ignore it. A token that is already triggered makes
    /// the call a no-op.
    fn start<'a>(
        &'a self,
        from: Option<&'a dyn Visual>,
        to: Option<&'a dyn Visual>,
        forward: bool,
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, Result<()>>;
}
