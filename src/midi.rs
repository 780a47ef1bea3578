//! Moving dumps to and from the pedal over MIDI.
//!
//! The pedal sends its dump as one SysEx message when "SysEx send" is
//! triggered from its global menu, and accepts one in "SysEx receive" mode.
//! Port I/O requires the `midi-io` feature.

use std::fmt;
use std::str::FromStr;

use crate::fcb::envelope::{self, SYSEX_END, SYSEX_START};

/// Collects raw MIDI bytes until a complete SysEx message is seen.
///
/// Bytes outside a message are dropped. A start byte inside a message restarts
/// collection, so a truncated message followed by a good one yields the good
/// one.
#[derive(Debug, Default)]
pub struct SysexAssembler {
    buf: Vec<u8>,
    in_sysex: bool,
}

impl SysexAssembler {
    /// Empty assembler
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes collected for the message in progress
    pub fn pending(&self) -> usize {
        self.buf.len()
    }

    /// Feed a chunk. Returns every message completed by it, including the
    /// start and end markers.
    pub fn push(&mut self, bytes: &[u8]) -> Vec<Vec<u8>> {
        let mut messages = Vec::new();

        for &byte in bytes {
            if byte == SYSEX_START {
                self.in_sysex = true;
                self.buf.clear();
            }

            if !self.in_sysex {
                continue;
            }

            self.buf.push(byte);

            if byte == SYSEX_END {
                self.in_sysex = false;
                messages.push(std::mem::take(&mut self.buf));
            }
        }
        messages
    }

    /// Feed a chunk. Returns the first completed message that is an FCB1010
    /// dump; other SysEx messages are logged and dropped.
    pub fn push_dump(&mut self, bytes: &[u8]) -> Option<Vec<u8>> {
        self.push(bytes)
            .into_iter()
            .find(|message| match envelope::validate(message) {
                Ok(()) => true,
                Err(fault) => {
                    log::warn!("Ignoring SysEx message ({} bytes): {}", message.len(), fault);
                    false
                }
            })
    }
}

/// Picks a MIDI port by index or by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortSelector {
    /// Port at this index in the port list
    Index(usize),
    /// First port whose name contains this text, ignoring case
    Name(String),
}

impl PortSelector {
    /// Index of the matching port in `names`
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Option<usize> {
        match self {
            PortSelector::Index(idx) => (*idx < names.len()).then_some(*idx),
            PortSelector::Name(pattern) => {
                let pattern = pattern.to_lowercase();
                names
                    .iter()
                    .position(|name| name.as_ref().to_lowercase().contains(&pattern))
            }
        }
    }
}

impl FromStr for PortSelector {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.parse::<usize>() {
            Ok(idx) => PortSelector::Index(idx),
            Err(_) => PortSelector::Name(s.to_string()),
        })
    }
}

impl fmt::Display for PortSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortSelector::Index(idx) => write!(f, "#{}", idx),
            PortSelector::Name(name) => write!(f, "'{}'", name),
        }
    }
}

/// A MIDI port as listed by the system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MidiPortInfo {
    /// Position in the port list
    pub index: usize,
    /// System name
    pub name: String,
}

#[cfg(feature = "midi-io")]
pub use transport::{list_input_ports, list_output_ports, receive_dump, send_dump};

#[cfg(feature = "midi-io")]
mod transport {
    use std::time::{Duration, Instant};

    use crossbeam_channel::{bounded, RecvTimeoutError};
    use midir::{Ignore, MidiInput, MidiOutput};

    use super::{MidiPortInfo, PortSelector, SysexAssembler};
    use crate::error::{Error, Result};

    const CLIENT_NAME: &str = "fcb1010";

    fn port_infos<P>(ports: &[P], name_of: impl Fn(&P) -> Option<String>) -> Vec<MidiPortInfo> {
        ports
            .iter()
            .enumerate()
            .map(|(index, port)| MidiPortInfo {
                index,
                name: name_of(port).unwrap_or_else(|| format!("Unknown Device {}", index)),
            })
            .collect()
    }

    fn select(kind: &str, selector: &PortSelector, infos: &[MidiPortInfo]) -> Result<usize> {
        let names: Vec<&str> = infos.iter().map(|info| info.name.as_str()).collect();
        selector.select(&names).ok_or_else(|| {
            Error::MidiDevice(format!(
                "no MIDI {} port matching {} ({} available)",
                kind,
                selector,
                infos.len()
            ))
        })
    }

    /// Ports that can receive from the pedal
    pub fn list_input_ports() -> Result<Vec<MidiPortInfo>> {
        let input = MidiInput::new(CLIENT_NAME)?;
        let ports = input.ports();
        Ok(port_infos(&ports, |p| input.port_name(p).ok()))
    }

    /// Ports that can send to the pedal
    pub fn list_output_ports() -> Result<Vec<MidiPortInfo>> {
        let output = MidiOutput::new(CLIENT_NAME)?;
        let ports = output.ports();
        Ok(port_infos(&ports, |p| output.port_name(p).ok()))
    }

    /// Wait for one complete SysEx message on the selected input port.
    pub fn receive_dump(selector: &PortSelector, timeout: Duration) -> Result<Vec<u8>> {
        let mut input = MidiInput::new(CLIENT_NAME)?;
        input.ignore(Ignore::None);

        let ports = input.ports();
        let infos = port_infos(&ports, |p| input.port_name(p).ok());
        let idx = select("input", selector, &infos)?;
        log::info!("Listening for SysEx on {}", infos[idx].name);

        let (sender, receiver) = bounded::<Vec<u8>>(1024);
        let _connection = input.connect(
            &ports[idx],
            "fcb1010-dump-in",
            move |_stamp, message, _| {
                if sender.send(message.to_vec()).is_err() {
                    log::debug!("SysEx receiver dropped, discarding {} bytes", message.len());
                }
            },
            (),
        )?;

        let deadline = Instant::now() + timeout;
        let mut assembler = SysexAssembler::new();

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match receiver.recv_timeout(remaining) {
                Ok(chunk) => {
                    if let Some(frame) = assembler.push_dump(&chunk) {
                        log::info!("Received dump ({} bytes)", frame.len());
                        return Ok(frame);
                    }
                }
                Err(RecvTimeoutError::Timeout) => {
                    log::warn!(
                        "No dump after {:?} ({} bytes pending)",
                        timeout,
                        assembler.pending()
                    );
                    return Err(Error::Timeout);
                }
                Err(RecvTimeoutError::Disconnected) => {
                    return Err(Error::MidiPort("MIDI input closed".to_string()));
                }
            }
        }
    }

    /// Send a dump to the selected output port.
    pub fn send_dump(selector: &PortSelector, data: &[u8]) -> Result<()> {
        let output = MidiOutput::new(CLIENT_NAME)?;

        let ports = output.ports();
        let infos = port_infos(&ports, |p| output.port_name(p).ok());
        let idx = select("output", selector, &infos)?;

        let mut connection = output.connect(&ports[idx], "fcb1010-dump-out")?;
        connection.send(data)?;
        connection.close();

        log::info!("Sent {} bytes to {}", data.len(), infos[idx].name);
        Ok(())
    }
}
