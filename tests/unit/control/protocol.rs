use super::*;

#[test]
fn status_codes_are_stable_and_distinct() {
    let all = [
        Status::ContinueRendering,
        Status::TerminateRendering,
        Status::AbortRendering,
        Status::RestartRendering,
        Status::ReinitializeRendering,
    ];
    for (i, status) in all.iter().enumerate() {
        assert_eq!(status.code(), i as i64);
        assert_eq!(Status::from_code(i as i64), Some(*status));
    }
}

#[test]
fn unknown_codes_map_to_none() {
    assert_eq!(Status::from_code(-1), None);
    assert_eq!(Status::from_code(5), None);
}

#[test]
fn release_has_a_default_drop_body() {
    struct Probe(std::sync::Arc<std::sync::atomic::AtomicBool>);

    impl Drop for Probe {
        fn drop(&mut self) {
            self.0.store(true, std::sync::atomic::Ordering::SeqCst);
        }
    }

    impl RendererController for Probe {
        fn on_rendering_begin(&self) {}
        fn on_rendering_success(&self) {}
        fn on_rendering_abort(&self) {}
        fn on_frame_begin(&self) {}
        fn on_frame_end(&self) {}
        fn on_progress(&self) -> Status {
            Status::ContinueRendering
        }
    }

    let dropped = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(false));
    let boxed: Box<dyn RendererController> = Box::new(Probe(dropped.clone()));
    boxed.release();
    assert!(dropped.load(std::sync::atomic::Ordering::SeqCst));
}
