//! DVI position registers and the save/restore stack.

/// The six DVI registers: current horizontal and vertical position plus
/// the four sticky spacing amounts.
///
/// All values are 32-bit two's-complement DVI units; motion arithmetic
/// wraps rather than panics, matching the format's fixed register width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegisterState {
    /// Horizontal position, increasing rightward.
    pub h: i32,
    /// Vertical position, increasing downward.
    pub v: i32,
    /// Sticky horizontal spacing (w family).
    pub w: i32,
    /// Sticky horizontal spacing (x family).
    pub x: i32,
    /// Sticky vertical spacing (y family).
    pub y: i32,
    /// Sticky vertical spacing (z family).
    pub z: i32,
}

impl RegisterState {
    /// Zero all six registers. Invoked exactly on begin-page.
    pub fn reset_to_origin(&mut self) {
        *self = Self::default();
    }

    /// Add a signed delta to the horizontal position.
    pub fn move_right(&mut self, delta: i32) {
        self.h = self.h.wrapping_add(delta);
    }

    /// Add a signed delta to the vertical position.
    pub fn move_down(&mut self, delta: i32) {
        self.v = self.v.wrapping_add(delta);
    }
}

/// LIFO stack of register snapshots, driven by push/pop opcodes.
///
/// Underflow is reported by `pop` returning `None`; the interpreter turns
/// that into a fatal `StackUnderflow` carrying opcode and offset.
#[derive(Debug, Default)]
pub struct DviStack {
    frames: Vec<RegisterState>,
}

impl DviStack {
    /// Save a snapshot of the current registers.
    pub fn push(&mut self, regs: RegisterState) {
        self.frames.push(regs);
    }

    /// Remove and return the most recent snapshot, or `None` when empty.
    pub fn pop(&mut self) -> Option<RegisterState> {
        self.frames.pop()
    }

    /// Number of saved snapshots.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// True when no snapshot is saved. Expected at every end-page.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Drop all snapshots. Invoked on begin-page.
    pub fn clear(&mut self) {
        self.frames.clear();
    }
}
