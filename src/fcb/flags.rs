//! Enable-flag bitstream.
//!
//! Preset enable flags are packed 7 per byte starting at byte 14. After every
//! 7th flag the cursor jumps 8 bytes ahead, so flag bytes sit at 14, 22, 30, ...
//! and the 7 bytes in between carry preset parameters (see [`super::params`]).
//! Bits are stored inverted for most slots: a cleared bit means "enabled".

use super::preset::Preset;

/// Byte offset of the first flag byte
pub const FLAGS_START: usize = 14;

/// Flags stored per flag byte (bit 7 is never used)
const FLAGS_PER_BYTE: u8 = 7;

/// Distance between consecutive flag bytes
const FLAG_BYTE_STRIDE: usize = 8;

/// Position of the next flag in the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagCursor {
    /// Byte offset in the frame
    pub offset: usize,
    /// Bit position within the byte (0-6)
    pub bit: u8,
}

impl FlagCursor {
    /// Cursor at the first flag of the first preset
    pub const fn start() -> Self {
        Self {
            offset: FLAGS_START,
            bit: 0,
        }
    }

    fn mask(&self) -> u8 {
        1 << self.bit
    }

    fn advance(&mut self) {
        self.bit += 1;
        if self.bit == FLAGS_PER_BYTE {
            self.bit = 0;
            self.offset += FLAG_BYTE_STRIDE;
        }
    }
}

impl Default for FlagCursor {
    fn default() -> Self {
        Self::start()
    }
}

/// One of the 16 flag slots of a preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagSlot {
    /// Program change 1-5 enable (index 0-4)
    ProgramChange(usize),
    /// Continuous controller 1-2 enable (index 0-1)
    ControlChange(usize),
    /// Relay switch 1-2 enable (index 0-1)
    Switch(usize),
    /// Expression pedal A/B enable (index 0-1)
    Expression(usize),
    /// Note trigger enable
    Note,
    /// Slot the device uses for per-channel overrides; always written clear
    Reserved,
}

impl FlagSlot {
    /// Whether the bit is the complement of the logical value.
    pub const fn inverted(self) -> bool {
        !matches!(self, FlagSlot::Switch(_) | FlagSlot::Reserved)
    }
}

/// Flag slots of one preset, in frame order.
pub const PRESET_FLAGS: [FlagSlot; 16] = [
    FlagSlot::ProgramChange(0),
    FlagSlot::ProgramChange(1),
    FlagSlot::ProgramChange(2),
    FlagSlot::ProgramChange(3),
    FlagSlot::ProgramChange(4),
    FlagSlot::ControlChange(0),
    FlagSlot::Switch(0),
    FlagSlot::ControlChange(1),
    FlagSlot::Switch(1),
    FlagSlot::Expression(0),
    FlagSlot::Reserved,
    FlagSlot::Reserved,
    FlagSlot::Expression(1),
    FlagSlot::Reserved,
    FlagSlot::Reserved,
    FlagSlot::Note,
];

impl Preset {
    /// Logical value of a flag slot. Reserved slots read as `false`.
    pub fn flag(&self, slot: FlagSlot) -> bool {
        match slot {
            FlagSlot::ProgramChange(i) => self.program_changes[i].enabled,
            FlagSlot::ControlChange(i) => self.control_changes[i].enabled,
            FlagSlot::Switch(i) => self.switches[i],
            FlagSlot::Expression(i) => self.expression[i].enabled,
            FlagSlot::Note => self.note.enabled,
            FlagSlot::Reserved => false,
        }
    }

    /// Set a flag slot. Writes to reserved slots are dropped.
    pub fn set_flag(&mut self, slot: FlagSlot, value: bool) {
        match slot {
            FlagSlot::ProgramChange(i) => self.program_changes[i].enabled = value,
            FlagSlot::ControlChange(i) => self.control_changes[i].enabled = value,
            FlagSlot::Switch(i) => self.switches[i] = value,
            FlagSlot::Expression(i) => self.expression[i].enabled = value,
            FlagSlot::Note => self.note.enabled = value,
            FlagSlot::Reserved => {}
        }
    }
}

/// Reads flags sequentially across all presets.
pub struct FlagReader<'a> {
    data: &'a [u8],
    cursor: FlagCursor,
}

impl<'a> FlagReader<'a> {
    /// Reader positioned at the first flag
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            cursor: FlagCursor::start(),
        }
    }

    /// Current position
    pub fn cursor(&self) -> FlagCursor {
        self.cursor
    }

    /// Read the next flag, complementing it when `invert` is set.
    pub fn next_flag(&mut self, invert: bool) -> bool {
        let bit = self.data[self.cursor.offset] & self.cursor.mask() != 0;
        self.cursor.advance();
        bit != invert
    }

    /// Read the 16 flag slots of one preset into `preset`.
    pub fn read_preset(&mut self, preset: &mut Preset) {
        for slot in PRESET_FLAGS {
            let value = self.next_flag(slot.inverted());
            preset.set_flag(slot, value);
        }
    }
}

/// Writes flags sequentially across all presets.
///
/// Bits are only ever set, so the frame must start zero-filled in the flag
/// bytes.
pub struct FlagWriter<'a> {
    data: &'a mut [u8],
    cursor: FlagCursor,
}

impl<'a> FlagWriter<'a> {
    /// Writer positioned at the first flag
    pub fn new(data: &'a mut [u8]) -> Self {
        Self {
            data,
            cursor: FlagCursor::start(),
        }
    }

    /// Current position
    pub fn cursor(&self) -> FlagCursor {
        self.cursor
    }

    /// Store `value XOR invert` at the cursor and advance.
    pub fn put_flag(&mut self, value: bool, invert: bool) {
        if value != invert {
            self.data[self.cursor.offset] |= self.cursor.mask();
        }
        self.cursor.advance();
    }

    /// Write the 16 flag slots of `preset`.
    pub fn write_preset(&mut self, preset: &Preset) {
        for slot in PRESET_FLAGS {
            self.put_flag(preset.flag(slot), slot.inverted());
        }
    }
}
