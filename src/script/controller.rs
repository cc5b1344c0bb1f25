//! The script-backed [`RendererController`] adapter.

use std::sync::{Arc, Weak};

use crate::control::default::DefaultRendererController;
use crate::control::protocol::{RendererController, Status};
use crate::script::host::{Hook, ScriptHost};

/// A [`RendererController`] whose hooks are forwarded to a controller script.
///
/// Every hook performs, in order:
///
/// 1. the same hook on the embedded [`DefaultRendererController`], so the
///    baseline behavior always runs and overrides act as strict additions;
/// 2. scoped acquisition of the host's global execution lock, required
///    because the renderer invokes hooks from a worker thread;
/// 3. invocation of the script override;
/// 4. on a script failure: report through the host's logging channel and
///    continue — the failure never escapes into the renderer.
///
/// For [`RendererController::on_progress`] the script's status is returned
/// unchanged on success; any failure falls back to
/// [`Status::AbortRendering`] so the renderer halts instead of continuing in
/// an undefined state.
pub struct ScriptController {
    base: DefaultRendererController,
    host: Weak<ScriptHost>,
}

impl ScriptController {
    /// Create an adapter bound to `host`.
    ///
    /// The host is held weakly: its lifetime belongs to the embedding layer,
    /// independent of the render job that owns this controller.
    pub fn new(host: &Arc<ScriptHost>) -> Self {
        Self {
            base: DefaultRendererController::new(),
            host: Arc::downgrade(host),
        }
    }

    fn forward(&self, hook: Hook) {
        let Some(host) = self.host.upgrade() else {
            tracing::error!(
                target: "renderctl::script",
                "script host dropped before {}()",
                hook.fn_name()
            );
            return;
        };
        let mut rt = host.enter();
        if let Err(err) = rt.call_hook(hook) {
            rt.report(&err);
        }
    }
}

impl RendererController for ScriptController {
    fn on_rendering_begin(&self) {
        self.base.on_rendering_begin();
        self.forward(Hook::RenderingBegin);
    }

    fn on_rendering_success(&self) {
        self.base.on_rendering_success();
        self.forward(Hook::RenderingSuccess);
    }

    fn on_rendering_abort(&self) {
        self.base.on_rendering_abort();
        self.forward(Hook::RenderingAbort);
    }

    fn on_frame_begin(&self) {
        self.base.on_frame_begin();
        self.forward(Hook::FrameBegin);
    }

    fn on_frame_end(&self) {
        self.base.on_frame_end();
        self.forward(Hook::FrameEnd);
    }

    fn on_progress(&self) -> Status {
        let _ = self.base.on_progress();

        let Some(host) = self.host.upgrade() else {
            tracing::error!(
                target: "renderctl::script",
                "script host dropped before on_progress()"
            );
            return Status::AbortRendering;
        };
        let mut rt = host.enter();
        match rt.call_progress() {
            Ok(status) => status,
            Err(err) => {
                rt.report(&err);
                Status::AbortRendering
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/script/controller.rs"]
mod tests;
