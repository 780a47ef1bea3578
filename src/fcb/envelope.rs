//! SysEx envelope: header, trailer, and frame size.

use thiserror::Error;

use super::FRAME_SIZE;

/// SysEx start marker
pub const SYSEX_START: u8 = 0xF0;

/// SysEx end marker
pub const SYSEX_END: u8 = 0xF7;

/// Bytes 0-6 of every dump: start marker, Behringer ID, device, model, command.
pub const HEADER: [u8; 7] = [SYSEX_START, 0x00, 0x20, 0x32, 0x01, 0x0C, 0x0F];

/// Why a buffer was rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeFault {
    /// Buffer is not exactly one frame long
    #[error("expected {expected} bytes, got {0}", expected = FRAME_SIZE)]
    Length(usize),
    /// First byte is not 0xF0
    #[error("bad start byte 0x{0:02X}")]
    StartMarker(u8),
    /// Last byte is not 0xF7
    #[error("bad end byte 0x{0:02X}")]
    EndMarker(u8),
    /// A signature byte at offsets 1-6 differs
    #[error(
        "signature byte {offset} is 0x{found:02X}, expected 0x{expected:02X}",
        expected = expected_at(.offset)
    )]
    Signature {
        /// Offset of the first mismatching byte
        offset: usize,
        /// Byte found there
        found: u8,
    },
}

fn expected_at(offset: &usize) -> u8 {
    HEADER.get(*offset).copied().unwrap_or_default()
}

/// Check frame size, markers, and signature.
pub fn validate(data: &[u8]) -> Result<(), EnvelopeFault> {
    if data.len() != FRAME_SIZE {
        return Err(EnvelopeFault::Length(data.len()));
    }

    if data[0] != SYSEX_START {
        return Err(EnvelopeFault::StartMarker(data[0]));
    }

    if data[FRAME_SIZE - 1] != SYSEX_END {
        return Err(EnvelopeFault::EndMarker(data[FRAME_SIZE - 1]));
    }

    match (1..HEADER.len()).find(|&i| data[i] != HEADER[i]) {
        Some(offset) => Err(EnvelopeFault::Signature {
            offset,
            found: data[offset],
        }),
        None => Ok(()),
    }
}

/// Write header and trailer into a frame.
pub fn write(data: &mut [u8]) {
    data[..HEADER.len()].copy_from_slice(&HEADER);
    data[FRAME_SIZE - 1] = SYSEX_END;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank_frame() -> Vec<u8> {
        let mut data = vec![0u8; FRAME_SIZE];
        write(&mut data);
        data
    }

    #[test]
    fn test_signature_values() {
        assert_eq!(&HEADER[1..], &[0, 32, 50, 1, 12, 15]);
    }

    #[test]
    fn test_valid_frame() {
        assert_eq!(validate(&blank_frame()), Ok(()));
    }

    #[test]
    fn test_wrong_length() {
        let mut data = blank_frame();
        data.push(0);
        assert_eq!(validate(&data), Err(EnvelopeFault::Length(FRAME_SIZE + 1)));
        assert_eq!(validate(&[]), Err(EnvelopeFault::Length(0)));
    }

    #[test]
    fn test_markers() {
        let mut data = blank_frame();
        data[0] = 0xF1;
        assert_eq!(validate(&data), Err(EnvelopeFault::StartMarker(0xF1)));

        let mut data = blank_frame();
        data[FRAME_SIZE - 1] = 0x00;
        assert_eq!(validate(&data), Err(EnvelopeFault::EndMarker(0x00)));
    }

    #[test]
    fn test_each_signature_byte() {
        for offset in 1..7 {
            let mut data = blank_frame();
            data[offset] ^= 0x01;
            assert_eq!(
                validate(&data),
                Err(EnvelopeFault::Signature {
                    offset,
                    found: HEADER[offset] ^ 0x01
                })
            );
        }
    }

    #[test]
    fn test_fault_message() {
        let fault = EnvelopeFault::Signature { offset: 2, found: 0x21 };
        assert_eq!(fault.to_string(), "signature byte 2 is 0x21, expected 0x20");
        assert_eq!(EnvelopeFault::Length(12).to_string(), "expected 2352 bytes, got 12");
    }
}
