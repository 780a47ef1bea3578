//! FCB1010 dump layout.
//!
//! A dump is one 2352-byte SysEx frame. Within it, preset enable flags and
//! preset parameters are interleaved in the same byte range: every 8th byte
//! from offset 14 is a flag byte, the 7 bytes between are parameter bytes.
//! Global settings follow near the tail.

pub mod envelope;
pub mod flags;
pub mod globals;
pub mod params;
pub mod preset;

/// Size of a complete dump, including SysEx markers
pub const FRAME_SIZE: usize = 2352;

pub use preset::{
    Configuration, ControlChange, ExpressionPedal, GlobalSettings, MidiChannels, NoteTrigger,
    PedalCalibration, Preset, ProgramChange,
};
