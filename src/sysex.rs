use std::path::Path;

use crate::error::Result;
use crate::fcb::envelope;
use crate::fcb::flags::{FlagReader, FlagWriter};
use crate::fcb::globals::{self, UNUSED_FILL, UNUSED_REGION_END, UNUSED_REGION_START};
use crate::fcb::params::{ParamReader, ParamWriter};
use crate::fcb::preset::{Configuration, Preset, NUM_PRESETS};

/// FCB1010 dump size in bytes
pub use crate::fcb::FRAME_SIZE as SYSEX_SIZE;

/// Decode a complete dump.
///
/// Fails only when the envelope is wrong; every field byte is accepted as-is.
pub fn decode(data: &[u8]) -> Result<Configuration> {
    envelope::validate(data)?;

    let mut presets = vec![Preset::default(); NUM_PRESETS];

    let mut flags = FlagReader::new(data);
    for preset in presets.iter_mut() {
        flags.read_preset(preset);
    }

    let mut params = ParamReader::new(data);
    for preset in presets.iter_mut() {
        params.read_preset(preset);
    }

    log::debug!(
        "SYSEX: decoded flags up to {:?}, params up to {}",
        flags.cursor(),
        params.offset()
    );

    Ok(Configuration {
        presets,
        global: globals::read_globals(data),
    })
}

/// Encode a configuration into a complete dump.
///
/// Calibration is not taken from `config`: the factory values are written.
pub fn encode(config: &Configuration) -> [u8; SYSEX_SIZE] {
    let mut data = [0u8; SYSEX_SIZE];

    envelope::write(&mut data);
    data[UNUSED_REGION_START..=UNUSED_REGION_END].fill(UNUSED_FILL);

    let mut flags = FlagWriter::new(&mut data);
    for preset in device_presets(config) {
        flags.write_preset(preset);
    }
    let flag_end = flags.cursor();

    let mut params = ParamWriter::new(&mut data);
    for preset in device_presets(config) {
        params.write_preset(preset);
    }
    let param_end = params.offset();

    log::debug!(
        "SYSEX: encoded flags up to {:?}, params up to {}",
        flag_end,
        param_end
    );

    globals::write_globals(&mut data, &config.global);

    data
}

/// Exactly `NUM_PRESETS` presets: extras are dropped, missing slots are defaults.
fn device_presets(config: &Configuration) -> impl Iterator<Item = &Preset> {
    const DEFAULT_PRESET: Preset = Preset::DEFAULT;
    config
        .presets
        .iter()
        .chain(std::iter::repeat(&DEFAULT_PRESET))
        .take(NUM_PRESETS)
}

impl Configuration {
    /// Decode a configuration from a dump
    pub fn from_sysex(data: &[u8]) -> Result<Self> {
        decode(data)
    }

    /// Encode into a dump
    pub fn to_sysex(&self) -> [u8; SYSEX_SIZE] {
        encode(self)
    }
}

/// Read and decode a dump file
pub fn read_sysex_file(path: impl AsRef<Path>) -> Result<Configuration> {
    let path = path.as_ref();
    let data = std::fs::read(path)?;
    log::info!("Read {} bytes from {}", data.len(), path.display());
    decode(&data)
}

/// Encode and write a dump file
pub fn write_sysex_file(path: impl AsRef<Path>, config: &Configuration) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, encode(config))?;
    log::info!("Wrote {} bytes to {}", SYSEX_SIZE, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::fcb::envelope::EnvelopeFault;

    #[test]
    fn test_empty_data() {
        let result = decode(&[]);
        assert!(matches!(
            result,
            Err(Error::InvalidEnvelope(EnvelopeFault::Length(0)))
        ));
    }

    #[test]
    fn test_default_layout() {
        let data = encode(&Configuration::default());

        assert_eq!(data.len(), 2352);
        assert_eq!(data[0], 0xF0);
        assert_eq!(&data[1..7], &[0, 32, 50, 1, 12, 15]);
        assert_eq!(data[2351], 0xF7);

        assert_eq!(data[1838], 120);
        for offset in 1835..=2310 {
            if offset != 1838 {
                assert_eq!(data[offset], 127, "byte {}", offset);
            }
        }
    }

    #[test]
    fn test_default_first_preset() {
        let data = encode(&Configuration::default());

        // all inverted enables off -> bits set, switch1 clear
        assert_eq!(data[14], 0b0011_1111);
        // cc2 off (bit 0), expA off (bit 2), expB off (bit 5)
        assert_eq!(data[22], 0b0010_0101);
        // 5 programs, cc1 controller + value
        assert_eq!(&data[7..14], &[0, 0, 0, 0, 0, 0, 0]);
        // cc2 controller + value, expA 27 [0, 127], expB controller 7
        assert_eq!(&data[15..22], &[0, 0, 27, 0, 127, 7, 0]);
        // expB max, note 60
        assert_eq!(&data[23..25], &[127, 60]);
    }

    #[test]
    fn test_tail_constants() {
        let data = encode(&Configuration::default());
        assert_eq!(data[2318], 0);
        assert_eq!(data[2342], 0);
        assert_eq!(&data[2347..2350], &[0, 0, 0]);
        assert_eq!(data[2350], 10);
    }

    #[test]
    fn test_configuration_methods() {
        let mut config = Configuration::default();
        config.global.merge = true;
        config.presets[42].control_changes[0].value = 99;

        let data = config.to_sysex();
        assert_eq!(data, encode(&config));

        let decoded = Configuration::from_sysex(&data).unwrap();
        assert!(decoded.global.merge);
        assert_eq!(decoded.presets[42].control_changes[0].value, 99);
        assert!(Configuration::from_sysex(&data[1..]).is_err());
    }

    #[test]
    fn test_short_preset_list_padded() {
        let mut config = Configuration::default();
        config.presets.truncate(3);
        config.presets[2].note.note = 72;

        let decoded = decode(&encode(&config)).unwrap();
        assert_eq!(decoded.presets.len(), NUM_PRESETS);
        assert_eq!(decoded.presets[2].note.note, 72);
        assert_eq!(decoded.presets[50], Preset::default());
        assert_eq!(encode(&decoded), encode(&config));
    }
}
