//! Criterion benchmarks for the per-event hot path.
//!
//! Every host input event passes through the capture toggle and, when
//! relayed, through a HID state tracker.  Both must stay far below the
//! millisecond range.
//!
//! Run with:
//! ```bash
//! cargo bench --package otg-core --bench capture_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use otg_core::{
    hid::{KeyboardState, MouseState},
    CaptureToggle, Keycode, MouseButton, MouseMotionEvent,
};

const TYPING: &[Keycode] = &[
    Keycode::A,
    Keycode::S,
    Keycode::D,
    Keycode::F,
    Keycode::SPACE,
    Keycode::LEFT_SHIFT,
    Keycode::Q,
    Keycode::ENTER,
];

fn bench_capture_toggle(c: &mut Criterion) {
    c.bench_function("capture_toggle/typing", |b| {
        let mut toggle = CaptureToggle::default();
        b.iter(|| {
            for &key in TYPING {
                toggle.on_key_down(black_box(key));
                black_box(toggle.on_key_up(black_box(key)));
            }
        })
    });

    c.bench_function("capture_toggle/gesture", |b| {
        let mut toggle = CaptureToggle::default();
        b.iter(|| {
            toggle.on_key_down(black_box(Keycode::LEFT_ALT));
            black_box(toggle.on_key_up(black_box(Keycode::LEFT_ALT)))
        })
    });
}

fn bench_reports(c: &mut Criterion) {
    c.bench_function("keyboard_state/press_release_report", |b| {
        let mut state = KeyboardState::new();
        b.iter(|| {
            for &key in TYPING {
                state.press(black_box(key));
                black_box(state.report());
                state.release(black_box(key));
                black_box(state.report());
            }
        })
    });

    c.bench_function("mouse_state/drag", |b| {
        let mut state = MouseState::new();
        let motion = MouseMotionEvent { dx: 12, dy: -7 };
        b.iter(|| {
            black_box(state.button(MouseButton::Left, true));
            black_box(state.motion(black_box(&motion)));
            black_box(state.button(MouseButton::Left, false));
        })
    });
}

criterion_group!(benches, bench_capture_toggle, bench_reports);
criterion_main!(benches);
