use super::*;

#[test]
fn pattern_output_is_deterministic() {
    let canvas = Canvas {
        width: 16,
        height: 8,
    };
    let mut a = PatternRenderer::new(canvas);
    let mut b = PatternRenderer::new(canvas);

    let fa = a.render_frame(FrameIndex(3)).unwrap();
    let fb = b.render_frame(FrameIndex(3)).unwrap();
    assert_eq!(fa, fb);
    assert_eq!(fa.data.len(), 16 * 8 * 4);
}

#[test]
fn pattern_varies_by_frame() {
    let mut r = PatternRenderer::new(Canvas {
        width: 8,
        height: 8,
    });
    let f0 = r.render_frame(FrameIndex(0)).unwrap();
    let f1 = r.render_frame(FrameIndex(1)).unwrap();
    assert_ne!(f0.data, f1.data);
}

#[test]
fn reinitialize_advances_the_generation() {
    let mut r = PatternRenderer::new(Canvas {
        width: 8,
        height: 8,
    });
    let before = r.render_frame(FrameIndex(0)).unwrap();
    r.reinitialize().unwrap();
    assert_eq!(r.generation(), 1);
    let after = r.render_frame(FrameIndex(0)).unwrap();
    assert_ne!(before.data, after.data);
}
