//! The no-op baseline controller.

use crate::control::protocol::{RendererController, Status};

/// Controller whose lifecycle hooks are no-ops and whose progress poll always
/// signals continuation.
///
/// Usable standalone, or embedded as the first delegate of a richer
/// controller so the baseline behavior the renderer expects from a default
/// controller always runs, even when custom overrides are installed.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultRendererController;

impl DefaultRendererController {
    /// Create a default controller.
    pub fn new() -> Self {
        Self
    }
}

impl RendererController for DefaultRendererController {
    fn on_rendering_begin(&self) {}

    fn on_rendering_success(&self) {}

    fn on_rendering_abort(&self) {}

    fn on_frame_begin(&self) {}

    fn on_frame_end(&self) {}

    fn on_progress(&self) -> Status {
        Status::ContinueRendering
    }
}

#[cfg(test)]
#[path = "../../tests/unit/control/default.rs"]
mod tests;
