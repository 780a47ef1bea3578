mod common;

use common::{as_encoded, init_logger, populated_config, FACTORY_CALIBRATION};
use fcb1010::{decode, encode, Configuration, EnvelopeFault, Error, NUM_PRESETS, SYSEX_SIZE};

#[test]
fn test_round_trip_populated() {
    init_logger();

    let config = populated_config();
    let decoded = decode(&encode(&config)).unwrap();

    assert_eq!(decoded.presets.len(), NUM_PRESETS);
    for (i, (got, want)) in decoded
        .presets
        .iter()
        .zip(&as_encoded(&config).presets)
        .enumerate()
    {
        assert_eq!(got, want, "preset {}", i + 1);
    }
    assert_eq!(decoded, as_encoded(&config));
}

#[test]
fn test_round_trip_default() {
    let config = Configuration::default();
    assert_eq!(decode(&encode(&config)).unwrap(), as_encoded(&config));
}

#[test]
fn test_calibration_not_round_tripped() {
    let config = populated_config();
    assert_ne!(config.global.calibration, FACTORY_CALIBRATION);

    let decoded = decode(&encode(&config)).unwrap();
    assert_eq!(decoded.global.calibration, FACTORY_CALIBRATION);
}

#[test]
fn test_last_preset_overlay() {
    let mut config = populated_config();
    let last = NUM_PRESETS - 1;

    for (exp_b, note) in [(false, false), (false, true), (true, true)] {
        config.presets[last].expression[1].enabled = exp_b;
        config.presets[last].note.enabled = note;

        let decoded = decode(&encode(&config)).unwrap();
        assert!(decoded.presets[last].expression[1].enabled);
        assert!(!decoded.presets[last].note.enabled);
        assert_eq!(
            decoded.presets[last - 1].note.enabled,
            config.presets[last - 1].note.enabled
        );
    }
}

#[test]
fn test_encode_idempotent() {
    for config in [Configuration::default(), populated_config()] {
        let first = encode(&config);
        let second = encode(&decode(&first).unwrap());
        assert_eq!(first, second);
    }
}

#[test]
fn test_wrong_length_rejected() {
    let data = encode(&Configuration::default());

    for len in [0, 7, SYSEX_SIZE - 1] {
        assert!(matches!(
            decode(&data[..len]),
            Err(Error::InvalidEnvelope(EnvelopeFault::Length(l))) if l == len
        ));
    }

    let mut long = data.to_vec();
    long.push(0xF7);
    assert!(matches!(
        decode(&long),
        Err(Error::InvalidEnvelope(EnvelopeFault::Length(2353)))
    ));
}

#[test]
fn test_markers_rejected() {
    let data = encode(&Configuration::default());

    let mut bad = data;
    bad[0] = 0xF1;
    assert!(matches!(
        decode(&bad),
        Err(Error::InvalidEnvelope(EnvelopeFault::StartMarker(0xF1)))
    ));

    let mut bad = data;
    bad[SYSEX_SIZE - 1] = 0x00;
    assert!(matches!(
        decode(&bad),
        Err(Error::InvalidEnvelope(EnvelopeFault::EndMarker(0x00)))
    ));
}

#[test]
fn test_signature_rejected() {
    let data = encode(&Configuration::default());

    for offset in 1..7 {
        let mut bad = data;
        bad[offset] ^= 0x01;
        match decode(&bad) {
            Err(Error::InvalidEnvelope(EnvelopeFault::Signature { offset: o, found })) => {
                assert_eq!(o, offset);
                assert_eq!(found, bad[offset]);
            }
            other => panic!("offset {}: unexpected {:?}", offset, other.map(|_| ())),
        }
    }
}

#[test]
fn test_field_bytes_accepted_as_is() {
    let data = encode(&populated_config());

    for offset in 7..SYSEX_SIZE - 1 {
        let mut mutated = data;
        mutated[offset] ^= 0x55;
        assert!(decode(&mutated).is_ok(), "offset {}", offset);
    }
}

#[test]
fn test_high_byte_values_kept() {
    let mut data = encode(&Configuration::default());
    // preset 1 program change 1, preset 2 note, PC1 channel, note channel
    data[7] = 200;
    data[42] = 128;
    data[2311] = 255;
    data[2321] = 16;

    let config = decode(&data).unwrap();
    assert_eq!(config.presets[0].program_changes[0].program, 200);
    assert_eq!(config.presets[1].note.note, 128);
    assert_eq!(config.global.channels.program_changes[0], 255);
    assert_eq!(config.global.channels.note, 16);

    let again = encode(&config);
    assert_eq!(again[7], 200);
    assert_eq!(again[42], 128);
    assert_eq!((again[2311], again[2331]), (255, 255));
    assert_eq!((again[2321], again[2341]), (16, 16));
}

#[test]
fn test_param_bytes_decoded_in_place() {
    let mut data = encode(&Configuration::default());
    data[7] = 42;
    data[24] = 72;
    data[25] = 99;

    let config = decode(&data).unwrap();
    assert_eq!(config.presets[0].program_changes[0].program, 42);
    assert_eq!(config.presets[0].note.note, 72);
    assert_eq!(config.presets[1].program_changes[0].program, 99);
}

#[test]
fn test_flag_polarity() {
    let mut config = Configuration::default();
    config.presets[0].program_changes[0].enabled = true;
    config.presets[0].switches = [true, true];

    let data = encode(&config);
    // inverted: enabled program change stores 0
    assert_eq!(data[14] & 0b0000_0001, 0);
    // switches store 1
    assert_ne!(data[14] & 0b0100_0000, 0);
    assert_ne!(data[22] & 0b0000_0010, 0);

    let data = encode(&Configuration::default());
    assert_ne!(data[14] & 0b0000_0001, 0);
    assert_eq!(data[14] & 0b0100_0000, 0);
    assert_eq!(data[22] & 0b0000_0010, 0);
}

#[test]
fn test_global_layout() {
    let data = encode(&populated_config());

    assert_eq!(&data[2311..2318], &[1, 2, 3, 4, 5, 6, 7]);
    assert_eq!(&data[2319..2322], &[8, 9, 10]);

    assert_eq!(&data[2331..2334], &[1, 2, 3]);
    assert_eq!(&data[2335..2342], &[4, 5, 6, 7, 8, 9, 10]);

    assert_eq!(data[2329], 1 << 6);
    assert_eq!(data[2330], (1 << 1) | (1 << 4));
    assert_eq!(data[2334], 0b111);
}

#[test]
fn test_golden_constants() {
    for config in [Configuration::default(), populated_config()] {
        let data = encode(&config);

        assert_eq!(data[1838], 120);
        assert_eq!(&data[2322..2329], &[127, 127, 127, 127, 120, 127, 127]);
        assert_eq!(&data[2343..2347], &[15, 108, 14, 102]);
        assert_eq!(data[2350], 10);
        for offset in 1835..=2310 {
            if offset != 1838 {
                assert_eq!(data[offset], 127, "byte {}", offset);
            }
        }
    }
}

#[test]
fn test_behavior_flags_decode() {
    let mut data = encode(&Configuration::default());
    data[2329] |= 1 << 6;
    data[2330] |= 1 << 2;

    let global = decode(&data).unwrap().global;
    assert!(global.switch2);
    assert!(global.running_status);
    assert!(!global.direct_select);
    assert!(!global.merge);
    assert!(!global.switch1);
}

#[test]
fn test_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dump.syx");
    let config = populated_config();

    fcb1010::write_sysex_file(&path, &config).unwrap();
    assert_eq!(std::fs::read(&path).unwrap().len(), SYSEX_SIZE);
    assert_eq!(
        fcb1010::read_sysex_file(&path).unwrap(),
        as_encoded(&config)
    );
}
