//! Error types for the FCB1010 toolkit.

use thiserror::Error;

use crate::fcb::envelope::EnvelopeFault;

/// Errors returned by the library.
#[derive(Error, Debug)]
pub enum Error {
    /// Buffer is not an FCB1010 dump
    #[error("invalid SysEx envelope: {0}")]
    InvalidEnvelope(#[from] EnvelopeFault),

    /// CSV could not be imported
    #[error("CSV line {line}: {message}")]
    Csv {
        /// 1-based line number
        line: usize,
        /// What was wrong with it
        message: String,
    },

    /// Filesystem failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// MIDI subsystem or device not available
    #[error("MIDI device error: {0}")]
    MidiDevice(String),

    /// MIDI port could not be opened or written
    #[error("MIDI port error: {0}")]
    MidiPort(String),

    /// No complete SysEx frame arrived in time
    #[error("timed out waiting for SysEx dump")]
    Timeout,
}

#[cfg(feature = "midi-io")]
impl From<midir::InitError> for Error {
    fn from(e: midir::InitError) -> Self {
        Error::MidiDevice(e.to_string())
    }
}

#[cfg(feature = "midi-io")]
impl From<midir::ConnectError<midir::MidiOutput>> for Error {
    fn from(e: midir::ConnectError<midir::MidiOutput>) -> Self {
        Error::MidiPort(e.to_string())
    }
}

#[cfg(feature = "midi-io")]
impl From<midir::ConnectError<midir::MidiInput>> for Error {
    fn from(e: midir::ConnectError<midir::MidiInput>) -> Self {
        Error::MidiPort(e.to_string())
    }
}

#[cfg(feature = "midi-io")]
impl From<midir::SendError> for Error {
    fn from(e: midir::SendError) -> Self {
        Error::MidiPort(e.to_string())
    }
}

/// Result alias using the crate [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
