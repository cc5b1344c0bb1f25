//! The controller protocol: the [`Status`] enum and the [`RendererController`]
//! capability set a render driver calls.

/// Outcome of a progress poll, directing the renderer's next action.
///
/// A `Status` is produced only by [`RendererController::on_progress`]; no
/// other hook returns a value. The integer codes are stable and exposed to
/// the embedding layer (see [`Status::code`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Status {
    /// Keep rendering.
    ContinueRendering,
    /// Stop rendering in an orderly fashion; the job ends successfully.
    TerminateRendering,
    /// Halt rendering; the job ends on the abort path.
    AbortRendering,
    /// Close the current frame and restart the job from the start of its
    /// range.
    RestartRendering,
    /// Rebuild renderer state, then restart the job.
    ReinitializeRendering,
}

impl Status {
    /// Stable integer code for this status, for use across the embedding
    /// boundary.
    pub fn code(self) -> i64 {
        match self {
            Status::ContinueRendering => 0,
            Status::TerminateRendering => 1,
            Status::AbortRendering => 2,
            Status::RestartRendering => 3,
            Status::ReinitializeRendering => 4,
        }
    }

    /// Inverse of [`Status::code`]; `None` for unknown codes.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Status::ContinueRendering),
            1 => Some(Status::TerminateRendering),
            2 => Some(Status::AbortRendering),
            3 => Some(Status::RestartRendering),
            4 => Some(Status::ReinitializeRendering),
            _ => None,
        }
    }
}

/// Capability set a render driver calls to observe and steer a render job.
///
/// Call sequence contract, driven entirely by the renderer:
///
/// ```text
/// on_rendering_begin
///   { on_frame_begin  on_progress*  on_frame_end }*
/// (on_rendering_success | on_rendering_abort)
/// release
/// ```
///
/// The renderer calls [`RendererController::release`] exactly once, after all
/// other hooks, and never invokes any hook afterward. Hooks take `&self`
/// because the renderer may poll progress from worker threads; an
/// implementation that needs mutable state must synchronize internally.
///
/// Hooks must not panic across this boundary. An implementation that bridges
/// to another runtime is responsible for containing any failure internally.
pub trait RendererController: Send + Sync {
    /// Called once before any frame is rendered.
    fn on_rendering_begin(&self);

    /// Called once after the last frame when the job ended normally.
    fn on_rendering_success(&self);

    /// Called once when the job was aborted or failed.
    fn on_rendering_abort(&self);

    /// Called when a frame becomes active.
    fn on_frame_begin(&self);

    /// Called when the active frame is closed.
    fn on_frame_end(&self);

    /// Progress poll; may be invoked any number of times (including zero)
    /// while a frame is active. The returned [`Status`] directs the
    /// renderer's next action.
    fn on_progress(&self) -> Status;

    /// Consume the controller once the render job is done with it.
    ///
    /// Ownership transfers to the renderer at registration time and is
    /// returned here by dropping the box.
    fn release(self: Box<Self>) {}
}

#[cfg(test)]
#[path = "../../tests/unit/control/protocol.rs"]
mod tests;
