//! Behringer FCB1010 SysEx toolkit.
//!
//! Decodes the pedal's 2352-byte configuration dump into a typed
//! [`Configuration`], encodes it back bit-exactly, and converts it to and from
//! an editable CSV sheet. The MIDI transport for receiving and sending dumps is
//! behind the `midi-io` feature.
//!
//! ```
//! use fcb1010::{decode, encode, Configuration};
//!
//! let mut config = Configuration::default();
//! config.preset_mut(1, 1).unwrap().program_changes[0].enabled = true;
//!
//! let dump = encode(&config);
//! let decoded = decode(&dump).unwrap();
//! assert!(decoded.presets[0].program_changes[0].enabled);
//! ```

#![warn(missing_docs)]

pub mod csv;
pub mod error;
pub mod fcb;
pub mod midi;
pub mod sysex;
pub mod workspace;

pub use error::{Error, Result};
pub use fcb::envelope::EnvelopeFault;
pub use fcb::preset::{
    Configuration, ControlChange, ExpressionPedal, GlobalSettings, MidiChannels, NoteTrigger,
    PedalCalibration, Preset, ProgramChange, NUM_BANKS, NUM_PRESETS, PRESETS_PER_BANK,
};
pub use sysex::{decode, encode, read_sysex_file, write_sysex_file, SYSEX_SIZE};
pub use workspace::Workspace;
