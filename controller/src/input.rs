//! Per-frame input samples and the edge latch between render and physics ticks.
//!
//! Render ticks run at a variable rate and physics ticks at a fixed one, so a press seen by
//! one render tick may be followed by zero, one or several physics ticks. The
//! [`InputLatch`] collects edges from every render tick and hands them to exactly one
//! physics tick via [`InputLatch::drain`]; the next drain sees only newer edges.

use crate::bitmask_flags::BitmaskFlags;
use crate::define_bitmask_flags;

define_bitmask_flags!(Button, u8, {
    Jump,
    Glide,
    SaveCheckpoint,
    RestoreCheckpoint,
    Interact,
});

/// A set of [`Button`]s.
pub type Buttons = BitmaskFlags<u8>;

/// Clamp a raw axis into `[-1, 1]`. Non-finite values read as no input.
#[inline]
pub fn sanitize_axis(value: f32) -> f32 {
    if value.is_finite() {
        value.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

/// One render frame of input.
///
/// Axes may hold any value; consumers clamp them with [`sanitize_axis`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputSample {
    /// +1 forward, -1 backward.
    pub forward: f32,
    /// +1 strafe right, -1 strafe left.
    pub strafe: f32,
    /// Turning input; positive turns the facing angle up.
    pub yaw: f32,
    /// Vertical look input; positive lowers the camera pitch (looks up).
    pub pitch: f32,
    /// Buttons that went down this frame.
    pub pressed: Buttons,
    /// Buttons that went up this frame.
    pub released: Buttons,
    /// Buttons currently down.
    pub held: Buttons,
}

impl InputSample {
    pub fn with_axes(forward: f32, strafe: f32) -> Self {
        Self {
            forward,
            strafe,
            ..Self::default()
        }
    }

    /// Mark `button` as pressed this frame and held.
    pub fn press(mut self, button: Button) -> Self {
        self.pressed.add(button);
        self.held.add(button);
        self
    }

    /// Mark `button` as released this frame.
    pub fn release(mut self, button: Button) -> Self {
        self.released.add(button);
        self.held.remove(button);
        self
    }

    /// Mark `button` as held without an edge.
    pub fn hold(mut self, button: Button) -> Self {
        self.held.add(button);
        self
    }

    /// Press and release within the same frame.
    pub fn tap(self, button: Button) -> Self {
        self.press(button).release(button)
    }

    /// The same frame with its edges removed, as seen on the frames after it.
    pub fn without_edges(self) -> Self {
        Self {
            pressed: Buttons::default(),
            released: Buttons::default(),
            ..self
        }
    }
}

/// What one physics tick sees: the latest axes and held level plus every edge since the
/// previous drain.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DrainedInput {
    pub forward: f32,
    pub strafe: f32,
    pub pressed: Buttons,
    /// Releases that happened after the most recent press of the same button.
    pub released: Buttons,
    /// Releases that came before a later press of the same button.
    pub released_before_press: Buttons,
    pub held: Buttons,
}

impl DrainedInput {
    pub fn pressed(&self, button: Button) -> bool {
        self.pressed.has(button)
    }

    pub fn released(&self, button: Button) -> bool {
        self.released.has(button)
    }

    pub fn released_before_press(&self, button: Button) -> bool {
        self.released_before_press.has(button)
    }

    pub fn held(&self, button: Button) -> bool {
        self.held.has(button)
    }
}

/// Single-reader latch for button edges.
#[derive(Clone, Copy, Debug, Default)]
pub struct InputLatch {
    forward: f32,
    strafe: f32,
    held: Buttons,
    pressed: Buttons,
    released: Buttons,
    released_before_press: Buttons,
}

impl InputLatch {
    /// Record one render frame. Edges accumulate until the next [`drain`](Self::drain).
    ///
    /// A release latched before a later press moves to `released_before_press`, so both
    /// edges reach the drain in order. A release in the same sample as a press is treated as
    /// coming after it (a tap).
    pub fn record(&mut self, sample: &InputSample) {
        self.forward = sanitize_axis(sample.forward);
        self.strafe = sanitize_axis(sample.strafe);
        self.held = sample.held;

        let superseded = self.released.intersection(sample.pressed);
        self.released_before_press = self.released_before_press.union(superseded);
        self.released = self.released.difference(sample.pressed);
        self.pressed = self.pressed.union(sample.pressed);
        self.released = self.released.union(sample.released);
    }

    /// Hand every latched edge to the caller and clear them.
    pub fn drain(&mut self) -> DrainedInput {
        DrainedInput {
            forward: self.forward,
            strafe: self.strafe,
            pressed: self.pressed.take(),
            released: self.released.take(),
            released_before_press: self.released_before_press.take(),
            held: self.held,
        }
    }
}
