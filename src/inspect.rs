use std::io::{BufRead, Write};

use fcb1010::{Configuration, NUM_PRESETS};

fn on_off(value: bool) -> &'static str {
    if value {
        "On"
    } else {
        "Off"
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

/// Text block for one preset (0-indexed).
pub fn render_preset(config: &Configuration, index: usize) -> String {
    let mut ret = String::new();
    let Some(p) = config.presets.get(index) else {
        return ret;
    };
    let (bank, pedal) = Configuration::bank_and_pedal(index).unwrap_or((0, 0));
    let pc = &p.program_changes;
    let cc = &p.control_changes;

    ret.push_str(&format!("Preset {} (bank {}, pedal {})\n", index + 1, bank, pedal));
    ret.push_str(&format!(
        "  PC1: {} {}  PC2: {} {}\n",
        on_off(pc[0].enabled),
        pc[0].program,
        on_off(pc[1].enabled),
        pc[1].program
    ));
    ret.push_str(&format!(
        "  PC3: {} {}  PC4: {} {}\n",
        on_off(pc[2].enabled),
        pc[2].program,
        on_off(pc[3].enabled),
        pc[3].program
    ));
    ret.push_str(&format!("  PC5: {} {}\n", on_off(pc[4].enabled), pc[4].program));
    ret.push_str(&format!(
        "  CC1: {} {} {} CC2: {} {} {}\n",
        on_off(cc[0].enabled),
        cc[0].controller,
        cc[0].value,
        on_off(cc[1].enabled),
        cc[1].controller,
        cc[1].value
    ));
    for (name, exp) in ["EXP A", "EXP B"].iter().zip(&p.expression) {
        ret.push_str(&format!(
            "  {}: {} {} [{}, {}]\n",
            name,
            on_off(exp.enabled),
            exp.controller,
            exp.min,
            exp.max
        ));
    }
    ret.push_str(&format!("  NOTE: {} {}\n", on_off(p.note.enabled), p.note.note));
    ret.push_str(&format!(
        "  Switch 1: {}  Switch 2: {}\n",
        on_off(p.switches[0]),
        on_off(p.switches[1])
    ));

    ret
}

/// Text block for the global settings.
pub fn render_globals(config: &Configuration) -> String {
    let g = &config.global;
    let ch = &g.channels;
    let cal = &g.calibration;
    let mut ret = String::new();

    ret.push_str("Global Settings:\n");
    ret.push_str(&format!(
        "  MIDI Channels: PC1: {}  PC2: {}  PC3: {}  PC4: {}  PC5: {}\n",
        ch.program_changes[0],
        ch.program_changes[1],
        ch.program_changes[2],
        ch.program_changes[3],
        ch.program_changes[4]
    ));
    ret.push_str(&format!(
        "                 CC1: {}  CC2: {}  EXP A: {}  EXP B: {}  NOTE: {}\n",
        ch.control_changes[0], ch.control_changes[1], ch.expression[0], ch.expression[1], ch.note
    ));
    ret.push_str(&format!(
        "  Direct Select: {}  Running Status: {}  Merge: {}\n",
        yes_no(g.direct_select),
        yes_no(g.running_status),
        yes_no(g.merge)
    ));
    ret.push_str(&format!(
        "  Switch 1: {}  Switch 2: {}\n",
        yes_no(g.switch1),
        yes_no(g.switch2)
    ));
    ret.push_str(&format!(
        "  EXP A Calibration: [{}, {}]  EXP B Calibration: [{}, {}]\n",
        cal[0].min, cal[0].max, cal[1].min, cal[1].max
    ));

    ret
}

/// Page through presets: `n` next, `p` previous, `q` quit. Wraps around.
pub fn run_pager(
    config: &Configuration,
    input: impl BufRead,
    mut output: impl Write,
) -> std::io::Result<()> {
    let mut preset = 0;
    let mut lines = input.lines();

    loop {
        writeln!(output, "{}", render_preset(config, preset))?;
        write!(output, "{}", render_globals(config))?;
        writeln!(output, "\n[n]ext, [p]revious, [q]uit")?;
        output.flush()?;

        let Some(line) = lines.next().transpose()? else {
            return Ok(());
        };

        match line.trim() {
            "q" => return Ok(()),
            "n" | "" => preset = (preset + 1) % NUM_PRESETS,
            "p" => preset = (preset + NUM_PRESETS - 1) % NUM_PRESETS,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_preset() {
        let mut config = Configuration::default();
        let p = config.preset_mut(2, 3).unwrap();
        p.program_changes[1].enabled = true;
        p.program_changes[1].program = 42;
        p.switches[1] = true;

        let text = render_preset(&config, 12);
        assert!(text.starts_with("Preset 13 (bank 2, pedal 3)\n"));
        assert!(text.contains("  PC1: Off 0  PC2: On 42\n"));
        assert!(text.contains("  EXP A: Off 27 [0, 127]\n"));
        assert!(text.contains("  NOTE: Off 60\n"));
        assert!(text.contains("  Switch 1: Off  Switch 2: On\n"));

        assert_eq!(render_preset(&config, NUM_PRESETS), "");
    }

    #[test]
    fn test_render_globals() {
        let mut config = Configuration::default();
        config.global.merge = true;
        config.global.calibration[1].max = 102;

        let text = render_globals(&config);
        assert!(text.contains("Direct Select: No  Running Status: No  Merge: Yes"));
        assert!(text.contains("EXP B Calibration: [0, 102]"));
    }

    #[test]
    fn test_pager_wraps() {
        let config = Configuration::default();
        let mut out = Vec::new();
        run_pager(&config, "p\nn\nn\nq\n".as_bytes(), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let shown: Vec<&str> = text
            .lines()
            .filter(|l| l.starts_with("Preset "))
            .map(|l| l.split(' ').nth(1).unwrap())
            .collect();
        assert_eq!(shown, vec!["1", "100", "1", "2"]);
    }
}
