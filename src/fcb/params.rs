//! Preset parameter byte stream.
//!
//! Parameter bytes start at byte 7 and fill 7 of every 8 bytes. The 8th byte of
//! each group is a flag byte owned by [`super::flags`] and is skipped here.

use super::preset::Preset;

/// Byte offset of the first parameter byte
pub const PARAMS_START: usize = 7;

/// Skip the byte at `offset` when `(offset - PAD_BASE) % PAD_STRIDE == 0`
const PAD_BASE: usize = 6;
const PAD_STRIDE: usize = 8;

fn advance(offset: usize) -> usize {
    let next = offset + 1;
    if (next - PAD_BASE) % PAD_STRIDE == 0 {
        next + 1
    } else {
        next
    }
}

/// One of the 16 parameter bytes of a preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamSlot {
    /// Program change 1-5 program number
    Program(usize),
    /// Continuous controller 1-2 controller number
    Controller(usize),
    /// Continuous controller 1-2 value
    ControllerValue(usize),
    /// Expression pedal A/B controller number
    ExpressionController(usize),
    /// Expression pedal A/B heel value
    ExpressionMin(usize),
    /// Expression pedal A/B toe value
    ExpressionMax(usize),
    /// Note number
    Note,
}

/// Parameter slots of one preset, in frame order.
pub const PRESET_PARAMS: [ParamSlot; 16] = [
    ParamSlot::Program(0),
    ParamSlot::Program(1),
    ParamSlot::Program(2),
    ParamSlot::Program(3),
    ParamSlot::Program(4),
    ParamSlot::Controller(0),
    ParamSlot::ControllerValue(0),
    ParamSlot::Controller(1),
    ParamSlot::ControllerValue(1),
    ParamSlot::ExpressionController(0),
    ParamSlot::ExpressionMin(0),
    ParamSlot::ExpressionMax(0),
    ParamSlot::ExpressionController(1),
    ParamSlot::ExpressionMin(1),
    ParamSlot::ExpressionMax(1),
    ParamSlot::Note,
];

impl Preset {
    /// Value of a parameter slot
    pub fn param(&self, slot: ParamSlot) -> u8 {
        match slot {
            ParamSlot::Program(i) => self.program_changes[i].program,
            ParamSlot::Controller(i) => self.control_changes[i].controller,
            ParamSlot::ControllerValue(i) => self.control_changes[i].value,
            ParamSlot::ExpressionController(i) => self.expression[i].controller,
            ParamSlot::ExpressionMin(i) => self.expression[i].min,
            ParamSlot::ExpressionMax(i) => self.expression[i].max,
            ParamSlot::Note => self.note.note,
        }
    }

    /// Mutable access to a parameter slot
    pub fn param_mut(&mut self, slot: ParamSlot) -> &mut u8 {
        match slot {
            ParamSlot::Program(i) => &mut self.program_changes[i].program,
            ParamSlot::Controller(i) => &mut self.control_changes[i].controller,
            ParamSlot::ControllerValue(i) => &mut self.control_changes[i].value,
            ParamSlot::ExpressionController(i) => &mut self.expression[i].controller,
            ParamSlot::ExpressionMin(i) => &mut self.expression[i].min,
            ParamSlot::ExpressionMax(i) => &mut self.expression[i].max,
            ParamSlot::Note => &mut self.note.note,
        }
    }
}

/// Reads parameter bytes sequentially across all presets.
pub struct ParamReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> ParamReader<'a> {
    /// Reader positioned at the first parameter byte
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            offset: PARAMS_START,
        }
    }

    /// Offset of the next byte to read
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Read the next parameter byte
    pub fn next_byte(&mut self) -> u8 {
        let value = self.data[self.offset];
        self.offset = advance(self.offset);
        value
    }

    /// Read the 16 parameter bytes of one preset into `preset`.
    pub fn read_preset(&mut self, preset: &mut Preset) {
        for slot in PRESET_PARAMS {
            *preset.param_mut(slot) = self.next_byte();
        }
    }
}

/// Writes parameter bytes sequentially across all presets.
pub struct ParamWriter<'a> {
    data: &'a mut [u8],
    offset: usize,
}

impl<'a> ParamWriter<'a> {
    /// Writer positioned at the first parameter byte
    pub fn new(data: &'a mut [u8]) -> Self {
        Self {
            data,
            offset: PARAMS_START,
        }
    }

    /// Offset of the next byte to write
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Write one parameter byte
    pub fn put_byte(&mut self, value: u8) {
        self.data[self.offset] = value;
        self.offset = advance(self.offset);
    }

    /// Write the 16 parameter bytes of `preset`.
    pub fn write_preset(&mut self, preset: &Preset) {
        for slot in PRESET_PARAMS {
            self.put_byte(preset.param(slot));
        }
    }
}
