//! The element capability animations write to.
//!
//! Elements are shared handles: the engine and the transition both hold
//! `&dyn Visual` while timelines run concurrently, so every setter takes
//! `&self` and implementors provide their own interior mutability.

use parking_lot::Mutex;

use super::types::AnimatableProperty;

/// A displayed element with an opacity and a visibility flag.
pub trait Visual: Send + Sync {
    /// Name used in log output.
    fn name(&self) -> &str {
        "visual"
    }

    fn opacity(&self) -> f64;

    fn set_opacity(&self, opacity: f64);

    fn is_visible(&self) -> bool;

    fn set_visible(&self, visible: bool);

    /// Read an animatable property.
    fn property(&self, property: AnimatableProperty) -> f64 {
        match property {
            AnimatableProperty::Opacity => self.opacity(),
        }
    }

    /// Write an animatable property.
    fn set_property(&self, property: AnimatableProperty, value: f64) {
        match property {
            AnimatableProperty::Opacity => self.set_opacity(value),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct VisualState {
    opacity: f64,
    visible: bool,
}

/// In-memory element, fully opaque and visible when created.
#[derive(Debug)]
pub struct VisualElement {
    name: String,
    state: Mutex<VisualState>,
}

impl VisualElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: Mutex::new(VisualState {
                opacity: 1.0,
                visible: true,
            }),
        }
    }

    /// Start with the given opacity.
    pub fn with_opacity(self, opacity: f64) -> Self {
        self.state.lock().opacity = opacity;
        self
    }

    /// Start with the given visibility.
    pub fn with_visible(self, visible: bool) -> Self {
        self.state.lock().visible = visible;
        self
    }
}

impl Visual for VisualElement {
    fn name(&self) -> &str {
        &self.name
    }

    fn opacity(&self) -> f64 {
        self.state.lock().opacity
    }

    fn set_opacity(&self, opacity: f64) {
        self.state.lock().opacity = opacity;
    }

    fn is_visible(&self) -> bool {
        self.state.lock().visible
    }

    fn set_visible(&self, visible: bool) {
        self.state.lock().visible = visible;
    }
}
