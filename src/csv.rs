//! CSV spreadsheet format for editing presets by hand.
//!
//! The layout mirrors the spreadsheet people already share for this pedal:
//! two header rows framing a MIDI channel row, then one row per preset. A
//! final `Settings` row carries the device behavior flags as label/value
//! pairs.

use crate::error::{Error, Result};
use crate::fcb::globals::{Behavior, Channel, CHANNEL_FIELDS};
use crate::fcb::preset::{Configuration, NUM_PRESETS};

/// First line: function group names
pub const GROUP_HEADER: &str = "Global,,Program Change 1,,Program Change 2,,Program Change 3,,Program Change 4,,Program Change 5,,Continuous Controller 1,,,Continuous Controller 2,,,Switch 1,Switch 2,Expression Pedal A,,,,Expression Pedal B,,,,Note,";

/// Third line: per-column field names
pub const FIELD_HEADER: &str = "Bank,Preset,Enabled,Program,Enabled,Program,Enabled,Program,Enabled,Program,Enabled,Program,Enabled,Controller,Value,Enabled,Controller,Value,Enabled,Enabled,Enabled,Controller,Minimum,Maximum,Enabled,Controller,Minimum,Maximum,Enabled,Value";

/// Columns in every data row
pub const COLUMNS: usize = 30;

/// Label in column 0 of the channel row
const CHANNEL_ROW_LABEL: &str = "MIDI Channel";

/// Label in column 0 of the behavior flag row
const SETTINGS_ROW_LABEL: &str = "Settings";

/// Behavior flags in the order they appear in the settings row
const SETTINGS: [(Behavior, &str); 5] = [
    (Behavior::DirectSelect, "Direct Select"),
    (Behavior::RunningStatus, "Running Status"),
    (Behavior::Merge, "Merge"),
    (Behavior::Switch1, "Switch 1"),
    (Behavior::Switch2, "Switch 2"),
];

/// Lines read on import: three header lines, the presets, the settings row
const MAX_LINES: usize = NUM_PRESETS + 4;

/// Column of each channel in the channel row
fn channel_column(channel: Channel) -> usize {
    match channel {
        Channel::ProgramChange(i) => 2 + 2 * i,
        Channel::ControlChange(0) => 12,
        Channel::ControlChange(_) => 15,
        Channel::Expression(0) => 20,
        Channel::Expression(_) => 24,
        Channel::Note => 28,
    }
}

fn flag(value: bool) -> u8 {
    u8::from(value)
}

/// Render a configuration as CSV. Calibration is not exported.
pub fn format_csv(config: &Configuration) -> String {
    let mut ret = String::new();
    ret.push_str(GROUP_HEADER);
    ret.push('\n');

    let mut channel_row = vec![String::new(); COLUMNS];
    channel_row[0] = CHANNEL_ROW_LABEL.to_string();
    channel_row[18] = "N/A".to_string();
    channel_row[19] = "N/A".to_string();
    for (channel, _, _) in CHANNEL_FIELDS {
        channel_row[channel_column(channel)] = config.global.channel(channel).to_string();
    }
    ret.push_str(&channel_row.join(","));
    ret.push('\n');

    ret.push_str(FIELD_HEADER);
    ret.push('\n');

    for (idx, p) in config.presets.iter().enumerate() {
        let Some((bank, pedal)) = Configuration::bank_and_pedal(idx) else {
            break;
        };
        let pc = &p.program_changes;
        let cc = &p.control_changes;
        let [exp_a, exp_b] = &p.expression;

        ret.push_str(&format!(
            "{bank},{pedal},{},{},{},{},{},{},{},{},{},{},",
            flag(pc[0].enabled),
            pc[0].program,
            flag(pc[1].enabled),
            pc[1].program,
            flag(pc[2].enabled),
            pc[2].program,
            flag(pc[3].enabled),
            pc[3].program,
            flag(pc[4].enabled),
            pc[4].program,
        ));
        ret.push_str(&format!(
            "{},{},{},{},{},{},{},{},",
            flag(cc[0].enabled),
            cc[0].controller,
            cc[0].value,
            flag(cc[1].enabled),
            cc[1].controller,
            cc[1].value,
            flag(p.switches[0]),
            flag(p.switches[1]),
        ));
        ret.push_str(&format!(
            "{},{},{},{},{},{},{},{},{},{}\n",
            flag(exp_a.enabled),
            exp_a.controller,
            exp_a.min,
            exp_a.max,
            flag(exp_b.enabled),
            exp_b.controller,
            exp_b.min,
            exp_b.max,
            flag(p.note.enabled),
            p.note.note,
        ));
    }

    let mut settings_row = vec![String::new(); COLUMNS];
    settings_row[0] = SETTINGS_ROW_LABEL.to_string();
    for (i, (behavior, label)) in SETTINGS.iter().enumerate() {
        settings_row[2 + 2 * i] = label.to_string();
        settings_row[3 + 2 * i] = flag(config.global.behavior(*behavior)).to_string();
    }
    ret.push_str(&settings_row.join(","));
    ret.push('\n');

    ret
}

/// Cells of one CSV line, trimmed.
struct Row<'a> {
    line: usize,
    cells: Vec<&'a str>,
}

impl<'a> Row<'a> {
    fn new(line: usize, text: &'a str) -> Self {
        Self {
            line,
            cells: text.split(',').map(str::trim).collect(),
        }
    }

    fn number(&self, column: usize) -> Result<u8> {
        let cell = self.cells[column];
        cell.parse::<u8>().map_err(|_| Error::Csv {
            line: self.line,
            message: format!("column {}: expected a number 0-255, got '{}'", column + 1, cell),
        })
    }

    fn flag(&self, column: usize) -> bool {
        self.cells[column] == "1"
    }

    fn index(&self, column: usize) -> Option<usize> {
        self.cells[column].parse().ok()
    }

    /// Label/value pairs from column 2 on. Unknown labels are skipped.
    fn apply_settings(&self, config: &mut Configuration) {
        for pair in self.cells[2..].chunks(2) {
            let [label, value] = pair else {
                continue;
            };
            if label.is_empty() {
                continue;
            }
            match SETTINGS.iter().find(|(_, name)| name == label) {
                Some((behavior, _)) => config.global.set_behavior(*behavior, *value == "1"),
                None => log::warn!(
                    "CSV line {}: unknown setting '{}', skipped",
                    self.line,
                    label
                ),
            }
        }
    }
}

/// Parse CSV produced by [`format_csv`] (or edited by hand).
///
/// Starts from the default configuration. Preset rows with the wrong shape or
/// an out-of-range bank/pedal are skipped; malformed numbers are errors.
pub fn parse_csv(text: &str) -> Result<Configuration> {
    parse_csv_onto(text, Configuration::default())
}

/// Parse CSV over an existing configuration.
///
/// Channels always come from the sheet. Presets without a valid row and
/// behavior flags absent from the sheet keep their values from `base`.
/// Calibration is never touched.
pub fn parse_csv_onto(text: &str, base: Configuration) -> Result<Configuration> {
    let lines: Vec<&str> = text
        .lines()
        .take(MAX_LINES)
        .map(|l| l.trim_end_matches('\r'))
        .collect();

    if lines.len() < 3 {
        return Err(Error::Csv {
            line: lines.len() + 1,
            message: "expected at least 3 lines".to_string(),
        });
    }

    if lines[0] != GROUP_HEADER {
        return Err(Error::Csv {
            line: 1,
            message: format!("expected header:\n{}", GROUP_HEADER),
        });
    }

    if lines[2] != FIELD_HEADER {
        return Err(Error::Csv {
            line: 3,
            message: format!("expected header:\n{}", FIELD_HEADER),
        });
    }

    let mut config = base;
    config.presets.resize(NUM_PRESETS, Default::default());

    let channels = Row::new(2, lines[1]);
    if channels.cells.len() != COLUMNS {
        return Err(Error::Csv {
            line: 2,
            message: format!(
                "expected {} MIDI channel columns, got {}",
                COLUMNS,
                channels.cells.len()
            ),
        });
    }
    for (channel, _, _) in CHANNEL_FIELDS {
        *config.global.channel_mut(channel) = channels.number(channel_column(channel))?;
    }

    for (i, text) in lines.iter().enumerate().skip(3) {
        let row = Row::new(i + 1, text);
        if row.cells.len() != COLUMNS {
            log::warn!(
                "CSV line {}: {} columns instead of {}, skipped",
                row.line,
                row.cells.len(),
                COLUMNS
            );
            continue;
        }

        if row.cells[0] == SETTINGS_ROW_LABEL {
            row.apply_settings(&mut config);
            continue;
        }

        let idx = match (row.index(0), row.index(1)) {
            (Some(bank), Some(pedal)) => Configuration::preset_index(bank, pedal),
            _ => None,
        };
        let Some(idx) = idx else {
            log::warn!("CSV line {}: bank/preset out of range, skipped", row.line);
            continue;
        };

        let p = &mut config.presets[idx];
        for n in 0..5 {
            p.program_changes[n].enabled = row.flag(2 + 2 * n);
            p.program_changes[n].program = row.number(3 + 2 * n)?;
        }
        for n in 0..2 {
            p.control_changes[n].enabled = row.flag(12 + 3 * n);
            p.control_changes[n].controller = row.number(13 + 3 * n)?;
            p.control_changes[n].value = row.number(14 + 3 * n)?;
        }
        p.switches = [row.flag(18), row.flag(19)];
        for n in 0..2 {
            let exp = &mut p.expression[n];
            exp.enabled = row.flag(20 + 4 * n);
            exp.controller = row.number(21 + 4 * n)?;
            exp.min = row.number(22 + 4 * n)?;
            exp.max = row.number(23 + 4 * n)?;
        }
        p.note.enabled = row.flag(28);
        p.note.note = row.number(29)?;
    }

    Ok(config)
}
