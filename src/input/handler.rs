//! Interaction handler capability.
//!
//! Drag and resize behaviour for overlays lives outside this crate. An overlay
//! only needs to switch a handler on and off and to tell it when to wire or
//! unwire its event hooks; everything else is the handler's business.

use crate::core::config::CircleOptions;

/// An interaction handler bound to a single overlay
pub trait CircleHandler: Send + Sync {
    /// Whether the handler is switched on
    fn enabled(&self) -> bool;

    /// Switch the handler on
    fn enable(&mut self);

    /// Switch the handler off
    fn disable(&mut self);

    /// Attach event listeners (overlay was added to a map)
    fn add_hooks(&mut self);

    /// Detach event listeners (overlay is leaving a map)
    fn remove_hooks(&mut self);
}

/// Builds a handler for the overlay with the given id and options
pub type HandlerFactory =
    Box<dyn Fn(&str, &CircleOptions) -> Box<dyn CircleHandler> + Send + Sync>;

/// Optional drag and resize handler factories injected into a circle overlay.
/// A missing factory means the overlay has no such interaction.
#[derive(Default)]
pub struct CircleHandlers {
    pub drag: Option<HandlerFactory>,
    pub resize: Option<HandlerFactory>,
}

impl CircleHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_drag<F>(mut self, factory: F) -> Self
    where
        F: Fn(&str, &CircleOptions) -> Box<dyn CircleHandler> + Send + Sync + 'static,
    {
        self.drag = Some(Box::new(factory));
        self
    }

    pub fn with_resize<F>(mut self, factory: F) -> Self
    where
        F: Fn(&str, &CircleOptions) -> Box<dyn CircleHandler> + Send + Sync + 'static,
    {
        self.resize = Some(Box::new(factory));
        self
    }
}

impl std::fmt::Debug for CircleHandlers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CircleHandlers")
            .field("drag", &self.drag.is_some())
            .field("resize", &self.resize.is_some())
            .finish()
    }
}
