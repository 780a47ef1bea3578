//! Global settings field map.
//!
//! Global settings live near the tail of the frame. Channels are stored twice
//! (the second copy is never read back), three bytes pack behavior flags next to
//! fixed bits, and a handful of bytes always hold the same values in device
//! dumps. All offsets are absolute frame offsets.

use super::preset::GlobalSettings;

/// Start of the region the device fills with 127 (inclusive)
pub const UNUSED_REGION_START: usize = 1835;

/// End of the region the device fills with 127 (inclusive)
pub const UNUSED_REGION_END: usize = 2310;

/// Fill value of the unused region
pub const UNUSED_FILL: u8 = 127;

/// A per-function MIDI channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// Program change 1-5
    ProgramChange(usize),
    /// Continuous controller 1-2
    ControlChange(usize),
    /// Expression pedal A/B
    Expression(usize),
    /// Note trigger
    Note,
}

/// Channel storage: (channel, primary offset, mirror offset).
pub const CHANNEL_FIELDS: [(Channel, usize, usize); 10] = [
    (Channel::ProgramChange(0), 2311, 2331),
    (Channel::ProgramChange(1), 2312, 2332),
    (Channel::ProgramChange(2), 2313, 2333),
    (Channel::ProgramChange(3), 2314, 2335),
    (Channel::ProgramChange(4), 2315, 2336),
    (Channel::ControlChange(0), 2316, 2337),
    (Channel::ControlChange(1), 2317, 2338),
    (Channel::Expression(0), 2319, 2339),
    (Channel::Expression(1), 2320, 2340),
    (Channel::Note, 2321, 2341),
];

/// A device behavior flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    /// Direct preset selection
    DirectSelect,
    /// MIDI running status
    RunningStatus,
    /// MIDI merge
    Merge,
    /// Switch 1 default
    Switch1,
    /// Switch 2 default
    Switch2,
}

/// A byte that packs behavior flags into a fixed template.
#[derive(Debug, Clone, Copy)]
pub struct SharedByte {
    /// Frame offset
    pub offset: usize,
    /// Value with every named bit cleared
    pub template: u8,
    /// Named bits and their masks
    pub bits: &'static [(Behavior, u8)],
}

impl SharedByte {
    /// Template with the named bits set from `global`
    pub fn encode(&self, global: &GlobalSettings) -> u8 {
        self.bits
            .iter()
            .filter(|(behavior, _)| global.behavior(*behavior))
            .fold(self.template, |byte, (_, mask)| byte | mask)
    }

    /// Copy the named bits of `byte` into `global`
    pub fn decode(&self, byte: u8, global: &mut GlobalSettings) {
        for &(behavior, mask) in self.bits {
            global.set_behavior(behavior, byte & mask != 0);
        }
    }
}

/// Behavior flag bytes.
pub const SHARED_BYTES: [SharedByte; 3] = [
    SharedByte {
        offset: 2329,
        template: 0,
        bits: &[(Behavior::Switch2, 1 << 6)],
    },
    SharedByte {
        offset: 2330,
        template: 0,
        bits: &[
            (Behavior::DirectSelect, 1 << 1),
            (Behavior::RunningStatus, 1 << 2),
            (Behavior::Merge, 1 << 4),
        ],
    },
    SharedByte {
        offset: 2334,
        template: 0b0000_0011,
        bits: &[(Behavior::Switch1, 1 << 2)],
    },
];

/// Calibration storage: (pedal, is max, offset, value written on encode).
///
/// Calibration is decoded for display, but encoding always writes the values
/// found in factory dumps.
pub const CALIBRATION_FIELDS: [(usize, bool, usize, u8); 4] = [
    (0, false, 2343, 15),
    (0, true, 2344, 108),
    (1, false, 2345, 14),
    (1, true, 2346, 102),
];

/// Bytes that hold the same value in every dump and are never decoded.
///
/// 1838 overlaps the last flag byte and is written after the flag pass.
pub const FIXED_BYTES: [(usize, u8); 9] = [
    (1838, 120),
    (2322, 127),
    (2323, 127),
    (2324, 127),
    (2325, 127),
    (2326, 120),
    (2327, 127),
    (2328, 127),
    (2350, 10),
];

impl GlobalSettings {
    /// Channel assigned to a function
    pub fn channel(&self, channel: Channel) -> u8 {
        match channel {
            Channel::ProgramChange(i) => self.channels.program_changes[i],
            Channel::ControlChange(i) => self.channels.control_changes[i],
            Channel::Expression(i) => self.channels.expression[i],
            Channel::Note => self.channels.note,
        }
    }

    /// Mutable channel assigned to a function
    pub fn channel_mut(&mut self, channel: Channel) -> &mut u8 {
        match channel {
            Channel::ProgramChange(i) => &mut self.channels.program_changes[i],
            Channel::ControlChange(i) => &mut self.channels.control_changes[i],
            Channel::Expression(i) => &mut self.channels.expression[i],
            Channel::Note => &mut self.channels.note,
        }
    }

    /// State of a behavior flag
    pub fn behavior(&self, behavior: Behavior) -> bool {
        match behavior {
            Behavior::DirectSelect => self.direct_select,
            Behavior::RunningStatus => self.running_status,
            Behavior::Merge => self.merge,
            Behavior::Switch1 => self.switch1,
            Behavior::Switch2 => self.switch2,
        }
    }

    /// Set a behavior flag
    pub fn set_behavior(&mut self, behavior: Behavior, value: bool) {
        match behavior {
            Behavior::DirectSelect => self.direct_select = value,
            Behavior::RunningStatus => self.running_status = value,
            Behavior::Merge => self.merge = value,
            Behavior::Switch1 => self.switch1 = value,
            Behavior::Switch2 => self.switch2 = value,
        }
    }
}

/// Read global settings from a validated frame.
pub fn read_globals(data: &[u8]) -> GlobalSettings {
    let mut global = GlobalSettings::default();

    for (channel, primary, _) in CHANNEL_FIELDS {
        *global.channel_mut(channel) = data[primary];
    }

    for shared in &SHARED_BYTES {
        shared.decode(data[shared.offset], &mut global);
    }

    for (pedal, is_max, offset, _) in CALIBRATION_FIELDS {
        let calibration = &mut global.calibration[pedal];
        if is_max {
            calibration.max = data[offset];
        } else {
            calibration.min = data[offset];
        }
    }

    global
}

/// Write global settings and fixed bytes. Must run after the preset passes.
pub fn write_globals(data: &mut [u8], global: &GlobalSettings) {
    for (offset, value) in FIXED_BYTES {
        data[offset] = value;
    }

    for (channel, primary, mirror) in CHANNEL_FIELDS {
        let value = global.channel(channel);
        data[primary] = value;
        data[mirror] = value;
    }

    for shared in &SHARED_BYTES {
        data[shared.offset] = shared.encode(global);
    }

    for (_, _, offset, value) in CALIBRATION_FIELDS {
        data[offset] = value;
    }
}
