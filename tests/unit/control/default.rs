use super::*;

#[test]
fn all_six_operations_behave_as_default() {
    let ctrl = DefaultRendererController::new();

    ctrl.on_rendering_begin();
    ctrl.on_frame_begin();
    assert_eq!(ctrl.on_progress(), Status::ContinueRendering);
    ctrl.on_frame_end();
    ctrl.on_rendering_success();
    ctrl.on_rendering_abort();

    let boxed: Box<dyn RendererController> = Box::new(ctrl);
    boxed.release();
}

#[test]
fn progress_always_continues() {
    let ctrl = DefaultRendererController::new();
    for _ in 0..16 {
        assert_eq!(ctrl.on_progress(), Status::ContinueRendering);
    }
}
