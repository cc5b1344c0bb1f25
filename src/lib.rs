//! renderctl exposes a rendering engine's controller callback surface to an
//! embedded scripting layer.
//!
//! The crate is built around three pieces:
//!
//! - A [`RendererController`] protocol: five void lifecycle hooks plus a
//!   status-returning progress poll, with [`DefaultRendererController`] as the
//!   trivial no-op/continue baseline.
//! - A [`ScriptController`] adapter that forwards every hook to user-supplied
//!   overrides living in an embedded [`ScriptHost`], entering the interpreter
//!   only under its global execution lock and containing script failures so
//!   they never reach the renderer.
//! - A [`RenderJob`] driver: the status-driven render loop that invokes the
//!   hook sequence from a worker thread and acts on the returned [`Status`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub mod control;
pub mod render;
pub mod script;

pub use crate::foundation::core::{Canvas, FrameIndex, FrameRange};
pub use crate::foundation::error::{RenderctlError, RenderctlResult};

pub use crate::control::default::DefaultRendererController;
pub use crate::control::protocol::{RendererController, Status};
pub use crate::render::frame::{FrameRGBA, FrameRenderer, PatternRenderer};
pub use crate::render::job::{JobOutcome, JobReport, JobStats, RenderJob, RenderJobOpts};
pub use crate::script::controller::ScriptController;
pub use crate::script::host::{Hook, ScriptHost};
