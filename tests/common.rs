#![allow(dead_code)]

use fcb1010::{Configuration, PedalCalibration};

/// Calibration written by every encode: EXP A [15, 108], EXP B [14, 102]
pub const FACTORY_CALIBRATION: [PedalCalibration; 2] = [
    PedalCalibration { min: 15, max: 108 },
    PedalCalibration { min: 14, max: 102 },
];

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Configuration with every field moved off its default, varying per preset.
pub fn populated_config() -> Configuration {
    let mut config = Configuration::default();

    for (i, p) in config.presets.iter_mut().enumerate() {
        let value = |k: usize| ((i * 17 + k * 11) % 128) as u8;
        let enabled = |k: usize| (i + k) % 3 != 0;

        for (n, pc) in p.program_changes.iter_mut().enumerate() {
            pc.enabled = enabled(n);
            pc.program = value(n);
        }
        for (n, cc) in p.control_changes.iter_mut().enumerate() {
            cc.enabled = enabled(5 + n);
            cc.controller = value(5 + 2 * n);
            cc.value = value(6 + 2 * n);
        }
        p.switches = [enabled(7), enabled(8)];
        for (n, exp) in p.expression.iter_mut().enumerate() {
            exp.enabled = enabled(9 + n);
            exp.controller = value(9 + 3 * n);
            exp.min = value(10 + 3 * n);
            exp.max = value(11 + 3 * n);
        }
        p.note.enabled = enabled(11);
        p.note.note = value(15);
    }

    let global = &mut config.global;
    global.channels.program_changes = [1, 2, 3, 4, 5];
    global.channels.control_changes = [6, 7];
    global.channels.expression = [8, 9];
    global.channels.note = 10;
    global.direct_select = true;
    global.running_status = false;
    global.merge = true;
    global.switch1 = true;
    global.switch2 = true;
    global.calibration = [
        PedalCalibration { min: 1, max: 2 },
        PedalCalibration { min: 3, max: 4 },
    ];

    config
}

/// What decoding `encode(config)` yields.
///
/// Calibration comes back as the factory values, and the fixed byte at 1838
/// overlays the last four flag slots: preset 100 always reads expression B
/// enabled and note disabled.
pub fn as_encoded(config: &Configuration) -> Configuration {
    let mut expected = config.clone();
    expected.global.calibration = FACTORY_CALIBRATION;

    let last = expected.presets.len() - 1;
    expected.presets[last].expression[1].enabled = true;
    expected.presets[last].note.enabled = false;

    expected
}
