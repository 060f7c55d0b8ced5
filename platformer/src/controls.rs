//! Keyboard bindings and per-tick control snapshots.

use platformer_engine::{InputState, KeyCode};

pub const LEFT_KEYS: [KeyCode; 2] = [KeyCode::ArrowLeft, KeyCode::KeyA];
pub const RIGHT_KEYS: [KeyCode; 2] = [KeyCode::ArrowRight, KeyCode::KeyD];
pub const JUMP_KEYS: [KeyCode; 3] = [KeyCode::ArrowUp, KeyCode::KeyW, KeyCode::Space];
pub const START_KEYS: [KeyCode; 3] = [KeyCode::Enter, KeyCode::NumpadEnter, KeyCode::Space];
pub const ESCAPE_KEY: KeyCode = KeyCode::Escape;
pub const RESTART_KEY: KeyCode = KeyCode::KeyR;

/// What the player asked for during one update.
///
/// `horizontal` is a held level in -1.0..=1.0; the other fields are press edges.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Controls {
    pub horizontal: f32,
    pub jump: bool,
    pub start: bool,
    pub escape: bool,
    pub restart: bool,
}

impl Controls {
    pub fn from_input(input: &InputState) -> Self {
        let mut horizontal = 0.0;
        if input.any_down(&LEFT_KEYS) {
            horizontal -= 1.0;
        }
        if input.any_down(&RIGHT_KEYS) {
            horizontal += 1.0;
        }

        Self {
            horizontal,
            jump: input.any_pressed(&JUMP_KEYS),
            start: input.any_pressed(&START_KEYS),
            escape: input.is_key_pressed(ESCAPE_KEY),
            restart: input.is_key_pressed(RESTART_KEY),
        }
    }

    fn has_edges(&self) -> bool {
        self.jump || self.start || self.escape || self.restart
    }
}

/// Holds press edges from render frames until a fixed tick consumes them.
///
/// Frames can run with zero fixed ticks (high refresh rates) or several (slow frames).
/// Each edge is delivered to exactly one tick.
#[derive(Clone, Copy, Debug, Default)]
pub struct ControlLatch {
    pending: Controls,
}

impl ControlLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one frame of input: the held axis is replaced, edges accumulate.
    pub fn latch(&mut self, frame: Controls) {
        self.pending.horizontal = frame.horizontal;
        self.pending.jump |= frame.jump;
        self.pending.start |= frame.start;
        self.pending.escape |= frame.escape;
        self.pending.restart |= frame.restart;
    }

    /// Controls for the next tick. Edges are cleared, the held axis is kept.
    pub fn take(&mut self) -> Controls {
        let controls = self.pending;
        self.pending = Controls {
            horizontal: controls.horizontal,
            ..Controls::default()
        };
        controls
    }

    pub fn has_pending_edges(&self) -> bool {
        self.pending.has_edges()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_and_wasd_both_steer() {
        let mut input = InputState::new();
        input.press(KeyCode::KeyA);
        assert_eq!(Controls::from_input(&input).horizontal, -1.0);

        input.press(KeyCode::ArrowRight);
        assert_eq!(Controls::from_input(&input).horizontal, 0.0);

        input.release(KeyCode::KeyA);
        assert_eq!(Controls::from_input(&input).horizontal, 1.0);
    }

    #[test]
    fn jump_is_an_edge_not_a_hold() {
        let mut input = InputState::new();
        input.press(KeyCode::KeyW);
        assert!(Controls::from_input(&input).jump);

        input.begin_frame();
        assert!(!Controls::from_input(&input).jump);
    }

    #[test]
    fn escape_and_restart_are_separate() {
        let mut input = InputState::new();
        input.press(KeyCode::Escape);
        let controls = Controls::from_input(&input);
        assert!(controls.escape);
        assert!(!controls.restart);

        input.begin_frame();
        input.press(KeyCode::KeyR);
        let controls = Controls::from_input(&input);
        assert!(controls.restart);
        assert!(!controls.escape);
    }

    #[test]
    fn space_starts_and_jumps() {
        let mut input = InputState::new();
        input.press(KeyCode::Space);
        let controls = Controls::from_input(&input);
        assert!(controls.start && controls.jump);
    }

    #[test]
    fn latch_keeps_edges_until_taken_once() {
        let mut latch = ControlLatch::new();
        latch.latch(Controls {
            jump: true,
            horizontal: 1.0,
            ..Controls::default()
        });
        // A later frame without the press must not erase it.
        latch.latch(Controls {
            horizontal: 1.0,
            ..Controls::default()
        });
        assert!(latch.has_pending_edges());

        let first = latch.take();
        assert!(first.jump);
        assert_eq!(first.horizontal, 1.0);

        let second = latch.take();
        assert!(!second.jump);
        assert_eq!(second.horizontal, 1.0);
        assert!(!latch.has_pending_edges());
    }

    #[test]
    fn latch_tracks_the_latest_axis() {
        let mut latch = ControlLatch::new();
        latch.latch(Controls {
            horizontal: -1.0,
            ..Controls::default()
        });
        latch.latch(Controls::default());
        assert_eq!(latch.take().horizontal, 0.0);
    }
}
