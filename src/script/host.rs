//! The embedded rhai host: script loading, hook binding, the global
//! execution lock, and the error-reporting channel.

use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use rhai::{AST, CallFnOptions, Dynamic, Engine, Map, Module, Scope};

use crate::control::protocol::Status;
use crate::foundation::error::{RenderctlError, RenderctlResult};

/// Tracing target for everything crossing the script boundary.
const SCRIPT_TARGET: &str = "renderctl::script";

/// The six controller hooks a script must define.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Hook {
    /// `on_rendering_begin()`
    RenderingBegin,
    /// `on_rendering_success()`
    RenderingSuccess,
    /// `on_rendering_abort()`
    RenderingAbort,
    /// `on_frame_begin()`
    FrameBegin,
    /// `on_frame_end()`
    FrameEnd,
    /// `on_progress()`, must return a `status::*` code.
    Progress,
}

impl Hook {
    /// All hooks, in protocol order.
    pub const ALL: [Hook; 6] = [
        Hook::RenderingBegin,
        Hook::RenderingSuccess,
        Hook::RenderingAbort,
        Hook::FrameBegin,
        Hook::FrameEnd,
        Hook::Progress,
    ];

    /// Script function name bound to this hook.
    pub fn fn_name(self) -> &'static str {
        match self {
            Hook::RenderingBegin => "on_rendering_begin",
            Hook::RenderingSuccess => "on_rendering_success",
            Hook::RenderingAbort => "on_rendering_abort",
            Hook::FrameBegin => "on_frame_begin",
            Hook::FrameEnd => "on_frame_end",
            Hook::Progress => "on_progress",
        }
    }
}

/// Embedded script runtime hosting the user-supplied controller overrides.
///
/// All interpreter entry is serialized by one internal lock, the script
/// runtime's global execution lock. Render worker threads block on it when
/// invoking hooks; the guard is released on every exit path, including
/// failures inside the interpreter.
///
/// Script state persists across hook calls: every hook body runs with a
/// host-owned object map bound as `this`, so `this.frames += 1` style
/// bookkeeping survives from one call to the next.
pub struct ScriptHost {
    state: Mutex<HostState>,
}

struct HostState {
    engine: Engine,
    ast: AST,
    scope: Scope<'static>,
    /// Script-visible state, bound as `this` for every hook call.
    this: Dynamic,
    errors_reported: u64,
}

impl ScriptHost {
    /// Compile `script`, run its top-level statements once, and validate that
    /// every controller hook is defined.
    ///
    /// All six hooks are mandatory overrides; a missing or wrong-arity hook
    /// is a binding-time [`RenderctlError::Validation`], never a runtime
    /// condition handled by the adapter.
    #[tracing::instrument(skip(script))]
    pub fn load(script: &str) -> RenderctlResult<Self> {
        let engine = build_engine();
        let ast = engine
            .compile(script)
            .map_err(|e| RenderctlError::script(format!("compile failed: {e}")))?;

        for hook in Hook::ALL {
            let defined = ast
                .iter_functions()
                .any(|f| f.name == hook.fn_name() && f.params.is_empty());
            if !defined {
                return Err(RenderctlError::validation(format!(
                    "controller script must define `{}()`",
                    hook.fn_name()
                )));
            }
        }

        let mut scope = Scope::new();
        engine
            .run_ast_with_scope(&mut scope, &ast)
            .map_err(|e| RenderctlError::script(format!("script init failed: {e}")))?;

        Ok(Self {
            state: Mutex::new(HostState {
                engine,
                ast,
                scope,
                this: Dynamic::from(Map::new()),
                errors_reported: 0,
            }),
        })
    }

    /// Load a controller script from a file.
    pub fn load_file(path: impl AsRef<Path>) -> RenderctlResult<Self> {
        let path = path.as_ref();
        let script = std::fs::read_to_string(path).map_err(|e| {
            RenderctlError::validation(format!("cannot read script {}: {e}", path.display()))
        })?;
        Self::load(&script)
    }

    /// Acquire the global execution lock for the current thread.
    ///
    /// Blocks until the interpreter is available. The lock is held for the
    /// lifetime of the returned guard.
    pub fn enter(&self) -> ScriptRuntime<'_> {
        // A panic while the lock was held poisons the mutex; the interpreter
        // state itself stays structurally valid, so recover the guard.
        let guard = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        ScriptRuntime { guard }
    }

    /// Number of foreign errors reported through the logging channel so far.
    pub fn reported_errors(&self) -> u64 {
        self.enter().guard.errors_reported
    }

    /// Snapshot of the script-visible state map (`this` in hook bodies).
    pub fn state(&self) -> Map {
        self.enter().guard.this.clone().try_cast::<Map>().unwrap_or_default()
    }
}

impl std::fmt::Debug for ScriptHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The interpreter itself has no useful debug form.
        f.debug_struct("ScriptHost").finish_non_exhaustive()
    }
}

/// Scoped access to the interpreter.
///
/// Holding a `ScriptRuntime` is holding the global execution lock; dropping
/// it releases the lock.
pub struct ScriptRuntime<'a> {
    guard: MutexGuard<'a, HostState>,
}

impl ScriptRuntime<'_> {
    /// Invoke the script override for `hook`.
    ///
    /// The persistent state map is bound as `this` and the AST body is not
    /// re-evaluated.
    pub fn call_hook(&mut self, hook: Hook) -> Result<Dynamic, String> {
        let state = &mut *self.guard;
        let options = CallFnOptions::new()
            .eval_ast(false)
            .bind_this_ptr(&mut state.this);
        state
            .engine
            .call_fn_with_options::<Dynamic>(
                options,
                &mut state.scope,
                &state.ast,
                hook.fn_name(),
                (),
            )
            .map_err(|e| format!("{}(): {e}", hook.fn_name()))
    }

    /// Invoke the progress override and convert its return value to a
    /// [`Status`].
    ///
    /// A non-integer or out-of-range return value is a foreign error like any
    /// other.
    pub fn call_progress(&mut self) -> Result<Status, String> {
        let value = self.call_hook(Hook::Progress)?;
        let code = value
            .as_int()
            .map_err(|ty| format!("on_progress(): expected a status code, got {ty}"))?;
        Status::from_code(code)
            .ok_or_else(|| format!("on_progress(): unknown status code {code}"))
    }

    /// Report a foreign error through the embedding's logging channel.
    ///
    /// Errors are contained here; nothing propagates into the renderer.
    pub fn report(&mut self, err: &str) {
        self.guard.errors_reported += 1;
        tracing::error!(target: SCRIPT_TARGET, "controller script error: {err}");
    }
}

fn build_engine() -> Engine {
    let mut engine = Engine::new();

    let mut status = Module::new();
    status.set_var("CONTINUE", Status::ContinueRendering.code());
    status.set_var("TERMINATE", Status::TerminateRendering.code());
    status.set_var("ABORT", Status::AbortRendering.code());
    status.set_var("RESTART", Status::RestartRendering.code());
    status.set_var("REINITIALIZE", Status::ReinitializeRendering.code());
    engine.register_static_module("status", status.into());

    engine.on_print(|text| tracing::info!(target: SCRIPT_TARGET, "{text}"));
    engine.on_debug(|text, source, pos| {
        tracing::debug!(target: SCRIPT_TARGET, ?source, %pos, "{text}");
    });

    engine
}

#[cfg(test)]
#[path = "../../tests/unit/script/host.rs"]
mod tests;
