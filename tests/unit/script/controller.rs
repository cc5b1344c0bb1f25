use super::*;

fn script_with_progress(progress_body: &str) -> String {
    format!(
        r#"
fn on_rendering_begin() {{}}
fn on_rendering_success() {{}}
fn on_rendering_abort() {{}}
fn on_frame_begin() {{}}
fn on_frame_end() {{}}
fn on_progress() {{ {progress_body} }}
"#
    )
}

#[test]
fn progress_round_trips_every_status_unchanged() {
    let cases = [
        ("status::CONTINUE", Status::ContinueRendering),
        ("status::TERMINATE", Status::TerminateRendering),
        ("status::ABORT", Status::AbortRendering),
        ("status::RESTART", Status::RestartRendering),
        ("status::REINITIALIZE", Status::ReinitializeRendering),
    ];

    for (body, expected) in cases {
        let host = Arc::new(ScriptHost::load(&script_with_progress(body)).unwrap());
        let ctrl = ScriptController::new(&host);
        assert_eq!(ctrl.on_progress(), expected, "body: {body}");
        assert_eq!(host.reported_errors(), 0);
    }
}

#[test]
fn progress_failure_falls_back_to_abort_and_is_reported() {
    let host =
        Arc::new(ScriptHost::load(&script_with_progress(r#"throw "progress boom""#)).unwrap());
    let ctrl = ScriptController::new(&host);

    assert_eq!(ctrl.on_progress(), Status::AbortRendering);
    assert_eq!(host.reported_errors(), 1);
}

#[test]
fn lifecycle_hook_failure_is_contained_and_reported() {
    let script = r#"
fn on_rendering_begin() { throw "begin boom"; }
fn on_rendering_success() {}
fn on_rendering_abort() {}
fn on_frame_begin() {}
fn on_frame_end() {}
fn on_progress() { status::CONTINUE }
"#;
    let host = Arc::new(ScriptHost::load(script).unwrap());
    let ctrl = ScriptController::new(&host);

    // Must not panic and must keep the job steerable afterwards.
    ctrl.on_rendering_begin();
    assert_eq!(host.reported_errors(), 1);
    assert_eq!(ctrl.on_progress(), Status::ContinueRendering);
}

#[test]
fn overrides_observe_full_lifecycle_order() {
    let script = r#"
fn on_rendering_begin() { this.log = ["begin"]; }
fn on_rendering_success() { this.log.push("success"); }
fn on_rendering_abort() { this.log.push("abort"); }
fn on_frame_begin() { this.log.push("frame_begin"); }
fn on_frame_end() { this.log.push("frame_end"); }
fn on_progress() { this.log.push("progress"); status::CONTINUE }
"#;
    let host = Arc::new(ScriptHost::load(script).unwrap());
    let ctrl = ScriptController::new(&host);

    ctrl.on_rendering_begin();
    ctrl.on_frame_begin();
    assert_eq!(ctrl.on_progress(), Status::ContinueRendering);
    ctrl.on_frame_end();
    ctrl.on_rendering_success();

    let log: Vec<String> = host
        .state()
        .get("log")
        .cloned()
        .and_then(|v| v.try_cast::<rhai::Array>())
        .unwrap()
        .into_iter()
        .map(|v| v.to_string())
        .collect();
    assert_eq!(
        log,
        ["begin", "frame_begin", "progress", "frame_end", "success"]
    );
}

#[test]
fn dead_host_aborts_progress_and_skips_lifecycle() {
    let host = Arc::new(ScriptHost::load(&script_with_progress("status::CONTINUE")).unwrap());
    let ctrl = ScriptController::new(&host);
    drop(host);

    // Lifecycle hooks complete without the runtime; progress falls back to
    // the safe halt.
    ctrl.on_rendering_begin();
    assert_eq!(ctrl.on_progress(), Status::AbortRendering);
}

#[test]
fn concurrent_progress_polls_serialize_on_the_host_lock() {
    let script = r#"
fn on_rendering_begin() { this.polls = 0; }
fn on_rendering_success() {}
fn on_rendering_abort() {}
fn on_frame_begin() {}
fn on_frame_end() {}
fn on_progress() { this.polls += 1; status::CONTINUE }
"#;
    let host = Arc::new(ScriptHost::load(script).unwrap());
    let ctrl = Arc::new(ScriptController::new(&host));
    ctrl.on_rendering_begin();

    std::thread::scope(|scope| {
        for _ in 0..2 {
            let ctrl = Arc::clone(&ctrl);
            scope.spawn(move || {
                for _ in 0..100 {
                    assert_eq!(ctrl.on_progress(), Status::ContinueRendering);
                }
            });
        }
    });

    let polls = host
        .state()
        .get("polls")
        .and_then(|v| v.as_int().ok())
        .unwrap();
    assert_eq!(polls, 200);
    assert_eq!(host.reported_errors(), 0);
}
