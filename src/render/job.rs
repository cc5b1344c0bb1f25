//! The status-driven render-job driver.

use crate::control::protocol::{RendererController, Status};
use crate::foundation::core::{FrameIndex, FrameRange};
use crate::foundation::error::{RenderctlError, RenderctlResult};
use crate::render::frame::FrameRenderer;

/// Options controlling a [`RenderJob`].
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderJobOpts {
    /// Frame range to render (start inclusive, end exclusive).
    pub range: FrameRange,
    /// Progress polls issued per frame while the frame is active. Must be at
    /// least 1.
    pub polls_per_frame: u32,
    /// Abort the job after this many restarts, when set. `None` leaves the
    /// controller free to restart indefinitely.
    pub max_restarts: Option<u32>,
}

impl Default for RenderJobOpts {
    fn default() -> Self {
        Self {
            range: FrameRange {
                start: FrameIndex(0),
                end: FrameIndex(1),
            },
            polls_per_frame: 1,
            max_restarts: None,
        }
    }
}

/// How a render job ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JobOutcome {
    /// All frames in the range were rendered.
    Completed,
    /// The controller requested an orderly stop.
    Terminated,
    /// The controller aborted the job, or the restart cap was hit.
    Aborted,
}

/// Aggregated driver counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct JobStats {
    /// Frames actually rendered.
    pub frames_rendered: u64,
    /// Progress polls issued.
    pub progress_polls: u64,
    /// Range restarts performed, including reinitializing restarts.
    pub restarts: u64,
    /// Renderer reinitializations performed.
    pub reinits: u64,
}

/// Final report of a render job.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct JobReport {
    /// How the job ended.
    pub outcome: JobOutcome,
    /// Driver counters.
    pub stats: JobStats,
}

/// End state of one pass over the frame range.
enum PassEnd {
    Completed,
    Terminated,
    Aborted,
    Restart,
    Reinitialize,
}

impl PassEnd {
    /// Map a polled status to the pass end it forces, if any.
    fn from_stop(status: Status) -> Option<Self> {
        match status {
            Status::ContinueRendering => None,
            Status::TerminateRendering => Some(Self::Terminated),
            Status::AbortRendering => Some(Self::Aborted),
            Status::RestartRendering => Some(Self::Restart),
            Status::ReinitializeRendering => Some(Self::Reinitialize),
        }
    }
}

/// Status-driven render loop owning a controller for the duration of a job.
///
/// The driver upholds the controller call sequence
/// `on_rendering_begin → {on_frame_begin → on_progress* → on_frame_end}* →
/// (on_rendering_success | on_rendering_abort) → release()`. Hooks are
/// invoked from a dedicated render worker thread, in order, never batched,
/// and never after `release()` — on every path, including renderer failures.
pub struct RenderJob<R: FrameRenderer> {
    renderer: R,
    controller: Box<dyn RendererController>,
    opts: RenderJobOpts,
}

impl<R: FrameRenderer> RenderJob<R> {
    /// Create a job.
    ///
    /// Ownership of the controller transfers to the job; the job hands it
    /// back to its allocator via `release()` when the run ends.
    pub fn new(
        renderer: R,
        controller: Box<dyn RendererController>,
        opts: RenderJobOpts,
    ) -> RenderctlResult<Self> {
        if opts.range.is_empty() {
            return Err(RenderctlError::validation(
                "render job range must be non-empty",
            ));
        }
        if opts.polls_per_frame == 0 {
            return Err(RenderctlError::validation(
                "render job polls_per_frame must be >= 1",
            ));
        }
        Ok(Self {
            renderer,
            controller,
            opts,
        })
    }

    /// Run the job to completion on a dedicated render worker thread.
    ///
    /// The calling thread blocks until the job ends; the controller only ever
    /// sees worker-thread invocations, matching the deployment where the
    /// embedder's own thread released the script runtime for the duration of
    /// the job.
    #[tracing::instrument(skip(self), fields(frames = self.opts.range.len_frames()))]
    pub fn run(self) -> RenderctlResult<JobReport> {
        std::thread::scope(|scope| {
            scope
                .spawn(move || self.run_loop())
                .join()
                .map_err(|_| RenderctlError::render("render worker thread panicked"))?
        })
    }

    fn run_loop(mut self) -> RenderctlResult<JobReport> {
        let mut stats = JobStats::default();
        self.controller.on_rendering_begin();

        let outcome = loop {
            let pass = match self.render_pass(&mut stats) {
                Ok(pass) => pass,
                Err(e) => return Err(self.fail(e)),
            };
            match pass {
                PassEnd::Completed => break JobOutcome::Completed,
                PassEnd::Terminated => break JobOutcome::Terminated,
                PassEnd::Aborted => break JobOutcome::Aborted,
                PassEnd::Restart | PassEnd::Reinitialize => {
                    if self
                        .opts
                        .max_restarts
                        .is_some_and(|cap| stats.restarts >= u64::from(cap))
                    {
                        tracing::warn!("restart cap reached, aborting render job");
                        break JobOutcome::Aborted;
                    }
                    stats.restarts += 1;
                    if matches!(pass, PassEnd::Reinitialize) {
                        if let Err(e) = self.renderer.reinitialize() {
                            return Err(self.fail(e));
                        }
                        stats.reinits += 1;
                    }
                }
            }
        };

        match outcome {
            JobOutcome::Completed | JobOutcome::Terminated => {
                self.controller.on_rendering_success()
            }
            JobOutcome::Aborted => self.controller.on_rendering_abort(),
        }
        self.controller.release();
        Ok(JobReport { outcome, stats })
    }

    /// One pass over the frame range: frame hooks nest exactly, progress is
    /// polled `polls_per_frame` times per active frame, and the first
    /// non-continue status closes the frame and ends the pass.
    fn render_pass(&mut self, stats: &mut JobStats) -> RenderctlResult<PassEnd> {
        for f in self.opts.range.start.0..self.opts.range.end.0 {
            self.controller.on_frame_begin();

            for _ in 0..self.opts.polls_per_frame {
                stats.progress_polls += 1;
                let status = self.controller.on_progress();
                if let Some(end) = PassEnd::from_stop(status) {
                    self.controller.on_frame_end();
                    return Ok(end);
                }
            }

            if let Err(e) = self.renderer.render_frame(FrameIndex(f)) {
                self.controller.on_frame_end();
                return Err(e);
            }
            stats.frames_rendered += 1;
            self.controller.on_frame_end();
        }
        Ok(PassEnd::Completed)
    }

    /// Close the job on the abort path after a renderer failure, upholding
    /// the terminal-hook and release contract before surfacing the error.
    fn fail(self, err: RenderctlError) -> RenderctlError {
        self.controller.on_rendering_abort();
        self.controller.release();
        err
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/job.rs"]
mod tests;
