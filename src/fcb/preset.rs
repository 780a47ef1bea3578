//! FCB1010 configuration data structures

use serde::{Deserialize, Serialize};

/// Number of banks on the device
pub const NUM_BANKS: usize = 10;

/// Number of presets (foot switches) per bank
pub const PRESETS_PER_BANK: usize = 10;

/// Total number of presets stored in a dump
pub const NUM_PRESETS: usize = NUM_BANKS * PRESETS_PER_BANK;

/// Program change slots per preset
pub const NUM_PROGRAM_CHANGES: usize = 5;

/// Continuous controller slots per preset
pub const NUM_CONTROL_CHANGES: usize = 2;

/// Expression pedals (A and B)
pub const NUM_EXPRESSION_PEDALS: usize = 2;

/// A program change sent when the preset is selected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramChange {
    /// Whether the program change is sent
    pub enabled: bool,
    /// Program number (0-127)
    pub program: u8,
}

/// A continuous controller message sent when the preset is selected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlChange {
    /// Whether the controller message is sent
    pub enabled: bool,
    /// Controller number (0-127)
    pub controller: u8,
    /// Controller value (0-127)
    pub value: u8,
}

/// Expression pedal assignment for a preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpressionPedal {
    /// Whether the pedal sends controller data in this preset
    pub enabled: bool,
    /// Controller number (0-127)
    pub controller: u8,
    /// Value sent at the heel position
    pub min: u8,
    /// Value sent at the toe position
    pub max: u8,
}

impl ExpressionPedal {
    /// Pedal with the full 0-127 range on `controller`, disabled.
    pub const fn with_controller(controller: u8) -> Self {
        Self {
            enabled: false,
            controller,
            min: 0,
            max: 127,
        }
    }
}

/// Note-on trigger for a preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteTrigger {
    /// Whether the note is sent
    pub enabled: bool,
    /// MIDI note number, 60 is middle C
    pub note: u8,
}

impl Default for NoteTrigger {
    fn default() -> Self {
        Preset::DEFAULT.note
    }
}

/// One of the 100 preset slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    /// Program changes 1-5
    pub program_changes: [ProgramChange; NUM_PROGRAM_CHANGES],
    /// Continuous controllers 1-2
    pub control_changes: [ControlChange; NUM_CONTROL_CHANGES],
    /// Relay switch 1 and 2 enables
    pub switches: [bool; 2],
    /// Expression pedals A and B
    pub expression: [ExpressionPedal; NUM_EXPRESSION_PEDALS],
    /// Note trigger
    pub note: NoteTrigger,
}

impl Preset {
    /// Factory state of an unprogrammed preset
    pub const DEFAULT: Preset = Preset {
        program_changes: [ProgramChange {
            enabled: false,
            program: 0,
        }; NUM_PROGRAM_CHANGES],
        control_changes: [ControlChange {
            enabled: false,
            controller: 0,
            value: 0,
        }; NUM_CONTROL_CHANGES],
        switches: [false; 2],
        expression: [
            ExpressionPedal::with_controller(27),
            ExpressionPedal::with_controller(7),
        ],
        note: NoteTrigger {
            enabled: false,
            note: 60,
        },
    };
}

impl Default for Preset {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// MIDI channel assignment per function. Shared by all presets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MidiChannels {
    /// Program change 1-5 channels
    pub program_changes: [u8; NUM_PROGRAM_CHANGES],
    /// Continuous controller 1-2 channels
    pub control_changes: [u8; NUM_CONTROL_CHANGES],
    /// Expression pedal A and B channels
    pub expression: [u8; NUM_EXPRESSION_PEDALS],
    /// Note channel
    pub note: u8,
}

/// Raw pedal travel as measured by the device.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PedalCalibration {
    /// Heel position reading
    pub min: u8,
    /// Toe position reading
    pub max: u8,
}

/// Device-wide settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalSettings {
    /// Channel per function
    pub channels: MidiChannels,
    /// Direct select mode (pedals pick presets without bank confirm)
    pub direct_select: bool,
    /// MIDI running status
    pub running_status: bool,
    /// MIDI merge of the input into the output
    pub merge: bool,
    /// Switch 1 default state
    pub switch1: bool,
    /// Switch 2 default state
    pub switch2: bool,
    /// Expression pedal A and B calibration. Read-only: encoding always
    /// writes the factory values.
    pub calibration: [PedalCalibration; NUM_EXPRESSION_PEDALS],
}

/// Complete device configuration: 100 presets plus global settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    /// Presets in device order, bank 1 pedal 1 first
    pub presets: Vec<Preset>,
    /// Global settings
    pub global: GlobalSettings,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            presets: vec![Preset::default(); NUM_PRESETS],
            global: GlobalSettings::default(),
        }
    }
}

impl Configuration {
    /// Flat preset index for a 1-based bank and pedal.
    pub fn preset_index(bank: usize, pedal: usize) -> Option<usize> {
        if (1..=NUM_BANKS).contains(&bank) && (1..=PRESETS_PER_BANK).contains(&pedal) {
            Some((bank - 1) * PRESETS_PER_BANK + (pedal - 1))
        } else {
            None
        }
    }

    /// 1-based (bank, pedal) for a flat preset index.
    pub fn bank_and_pedal(index: usize) -> Option<(usize, usize)> {
        if index < NUM_PRESETS {
            Some((index / PRESETS_PER_BANK + 1, index % PRESETS_PER_BANK + 1))
        } else {
            None
        }
    }

    /// Preset at a 1-based bank and pedal
    pub fn preset(&self, bank: usize, pedal: usize) -> Option<&Preset> {
        Self::preset_index(bank, pedal).and_then(|idx| self.presets.get(idx))
    }

    /// Mutable preset at a 1-based bank and pedal
    pub fn preset_mut(&mut self, bank: usize, pedal: usize) -> Option<&mut Preset> {
        Self::preset_index(bank, pedal).and_then(move |idx| self.presets.get_mut(idx))
    }
}
