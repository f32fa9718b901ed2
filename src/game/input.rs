//! Intent Frames and Replay Recordings
//!
//! Movement arrives as four boolean intents packed into a flags byte; fire
//! events arrive as commands carrying a normalized aim direction. A
//! recording delta-compresses the intent stream and keeps the tick-stamped
//! fire commands, which together with the seed reproduce a whole session.

use serde::{Deserialize, Serialize};

use crate::core::fixed::Fixed;
use crate::core::vec2::FixedVec2;

// =============================================================================
// INTENT FRAME
// =============================================================================

/// Movement intents for a single tick.
///
/// This is the minimal input that affects player movement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentFrame {
    /// Intent flags (packed bits):
    /// - Bit 0: forward (-z)
    /// - Bit 1: back (+z)
    /// - Bit 2: left (-x)
    /// - Bit 3: right (+x)
    /// - Bit 4-7: Reserved
    pub flags: u8,
}

impl IntentFrame {
    /// Forward flag bit (-z)
    pub const FLAG_FORWARD: u8 = 0x01;

    /// Back flag bit (+z)
    pub const FLAG_BACK: u8 = 0x02;

    /// Left flag bit (-x)
    pub const FLAG_LEFT: u8 = 0x04;

    /// Right flag bit (+x)
    pub const FLAG_RIGHT: u8 = 0x08;

    /// Create an empty (idle) frame.
    pub const fn new() -> Self {
        Self { flags: 0 }
    }

    /// Create a frame from the four intents.
    pub const fn from_intents(forward: bool, back: bool, left: bool, right: bool) -> Self {
        let mut flags = 0;
        if forward {
            flags |= Self::FLAG_FORWARD;
        }
        if back {
            flags |= Self::FLAG_BACK;
        }
        if left {
            flags |= Self::FLAG_LEFT;
        }
        if right {
            flags |= Self::FLAG_RIGHT;
        }
        Self { flags }
    }

    /// Is the forward intent held?
    #[inline]
    pub fn forward(&self) -> bool {
        self.flags & Self::FLAG_FORWARD != 0
    }

    /// Is the back intent held?
    #[inline]
    pub fn back(&self) -> bool {
        self.flags & Self::FLAG_BACK != 0
    }

    /// Is the left intent held?
    #[inline]
    pub fn left(&self) -> bool {
        self.flags & Self::FLAG_LEFT != 0
    }

    /// Is the right intent held?
    #[inline]
    pub fn right(&self) -> bool {
        self.flags & Self::FLAG_RIGHT != 0
    }

    /// Check if this is an idle frame (no intent held).
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.flags == 0
    }

    /// Requested displacement for this frame at the given per-axis speed.
    ///
    /// Each held intent contributes ± `speed` to one axis; opposing intents
    /// cancel to zero on that axis. Forward is -z (screen-up on the
    /// floor grid).
    pub fn move_delta(&self, speed: Fixed) -> FixedVec2 {
        let mut delta = FixedVec2::ZERO;
        if self.forward() {
            delta.z = delta.z.wrapping_sub(speed);
        }
        if self.back() {
            delta.z = delta.z.wrapping_add(speed);
        }
        if self.left() {
            delta.x = delta.x.wrapping_sub(speed);
        }
        if self.right() {
            delta.x = delta.x.wrapping_add(speed);
        }
        delta
    }
}

/// A fire request carrying the externally computed aim direction.
///
/// The direction must be a unit vector in the ground plane (the pointer
/// raycast that produces it lives outside the core). Violations are
/// rejected at spawn, not here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FireCommand {
    /// Normalized aim direction
    pub direction: FixedVec2,
}

// =============================================================================
// RECORDING
// =============================================================================

/// One entry of the delta-compressed intent stream.
///
/// Only stored when the frame CHANGES (not every tick).
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct InputDelta {
    /// Tick when this intent state began
    pub tick: u32,
    /// The new intent state
    pub frame: IntentFrame,
}

/// A tick-stamped fire command.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct FireRecord {
    /// Tick during which the command is applied
    pub tick: u32,
    /// The recorded command
    pub command: FireCommand,
}

/// Complete input recording for one session.
///
/// Ticks are the driver's 0-based loop indices: the frame recorded at tick
/// `t` and the fires recorded at tick `t` are the ones the driver feeds
/// into its `t`-th call of [`crate::game::tick::tick`]. Together with the
/// seed this reproduces the session bit for bit.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InputRecording {
    /// RNG seed used for the session
    rng_seed: u64,

    /// Last recorded tick
    end_tick: u32,

    /// Delta-compressed intent stream
    deltas: Vec<InputDelta>,

    /// Fire commands in arrival order
    fires: Vec<FireRecord>,

    /// Last recorded frame (for delta comparison)
    #[serde(skip)]
    last_frame: IntentFrame,
}

impl InputRecording {
    /// Create a new recording for a session seeded with `rng_seed`.
    pub fn new(rng_seed: u64) -> Self {
        Self {
            rng_seed,
            end_tick: 0,
            deltas: Vec::new(),
            fires: Vec::new(),
            last_frame: IntentFrame::new(),
        }
    }

    /// The session seed.
    pub fn rng_seed(&self) -> u64 {
        self.rng_seed
    }

    /// Last recorded tick.
    pub fn end_tick(&self) -> u32 {
        self.end_tick
    }

    /// Record the intent frame for a tick.
    ///
    /// Only stores an entry if the frame changed since the previous tick.
    pub fn record(&mut self, tick: u32, frame: IntentFrame) {
        self.end_tick = self.end_tick.max(tick);

        // `frame_at` falls back to idle before the first delta, so an idle
        // prefix needs no entries.
        if frame != self.last_frame {
            self.deltas.push(InputDelta { tick, frame });
            self.last_frame = frame;
        }
    }

    /// Record a fire command applied during a tick.
    pub fn record_fire(&mut self, tick: u32, command: FireCommand) {
        self.end_tick = self.end_tick.max(tick);
        self.fires.push(FireRecord { tick, command });
    }

    /// Intent frame in effect at a tick.
    ///
    /// Uses binary search over the delta stream.
    pub fn frame_at(&self, tick: u32) -> IntentFrame {
        let idx = self.deltas.partition_point(|d| d.tick <= tick);
        if idx == 0 {
            IntentFrame::new()
        } else {
            self.deltas[idx - 1].frame
        }
    }

    /// Fire commands applied during a tick, in arrival order.
    pub fn fires_at(&self, tick: u32) -> impl Iterator<Item = &FireCommand> {
        self.fires
            .iter()
            .filter(move |record| record.tick == tick)
            .map(|record| &record.command)
    }

    /// Number of delta entries (compression diagnostics).
    pub fn delta_count(&self) -> usize {
        self.deltas.len()
    }

    /// Number of recorded fire commands.
    pub fn fire_count(&self) -> usize {
        self.fires.len()
    }

    /// Serialize to a compact byte buffer.
    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    /// Deserialize from a byte buffer produced by [`Self::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(bytes)
    }
}

// =============================================================================
// TESTS
// =============================================================================
