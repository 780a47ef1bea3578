use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use fcb1010::midi::PortSelector;
use fcb1010::{Configuration, Workspace, NUM_PRESETS};

mod inspect;

/// Back up, edit and restore Behringer FCB1010 configuration dumps
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Working directory (defaults to ~/.fcb1010)
    #[arg(long, global = true, env = "FCB1010_HOME")]
    home: Option<PathBuf>,

    /// SysEx dump file (defaults to <home>/dump.syx)
    #[arg(long, global = true)]
    dump: Option<PathBuf>,

    /// CSV file (defaults to <home>/fcb1010.csv)
    #[arg(long, global = true)]
    csv: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List MIDI input and output ports
    Ports,
    /// Receive a dump from the pedal
    Receive {
        /// Input port index or name
        #[arg(long, default_value = "0")]
        port: PortSelector,

        /// Seconds to wait for the dump
        #[arg(long, default_value_t = 60)]
        timeout_secs: u64,
    },
    /// Send the dump to the pedal
    Send {
        /// Output port index or name
        #[arg(long, default_value = "0")]
        port: PortSelector,
    },
    /// Show the presets and global settings of the dump
    Inspect {
        /// Only this preset (1-100)
        #[arg(long)]
        preset: Option<usize>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Convert the dump to CSV
    ExportCsv,
    /// Convert the CSV back to a dump
    ImportCsv,
    /// Copy the dump into the backup directory
    Backup,
}

struct Paths {
    workspace: Workspace,
    dump: PathBuf,
    csv: PathBuf,
}

impl Paths {
    fn new(args: &Args) -> Result<Self> {
        let workspace = match &args.home {
            Some(home) => Workspace::new(home),
            None => Workspace::in_home()?,
        };
        let dump = args.dump.clone().unwrap_or_else(|| workspace.dump_path());
        let csv = args.csv.clone().unwrap_or_else(|| workspace.csv_path());

        Ok(Self {
            workspace,
            dump,
            csv,
        })
    }

    /// Back up the dump before it is replaced.
    fn backup_existing_dump(&self) -> Result<()> {
        if self.dump.exists() {
            let target = self
                .workspace
                .backup_file(&self.dump)
                .context("unable to back up the current dump")?;
            log::info!("Previous dump saved as {}", target.display());
        }
        Ok(())
    }
}

fn read_dump(path: &Path) -> Result<Configuration> {
    fcb1010::read_sysex_file(path)
        .with_context(|| format!("unable to load dump '{}'", path.display()))
}

#[cfg(feature = "midi-io")]
fn ports() -> Result<()> {
    println!("Inputs:");
    for port in fcb1010::midi::list_input_ports()? {
        println!("  {}: {}", port.index, port.name);
    }
    println!("Outputs:");
    for port in fcb1010::midi::list_output_ports()? {
        println!("  {}: {}", port.index, port.name);
    }
    Ok(())
}

#[cfg(feature = "midi-io")]
fn receive(paths: &Paths, port: &PortSelector, timeout_secs: u64) -> Result<()> {
    println!("Waiting for dump: on the pedal, select GLOBAL CONFIG > SYSEX SEND");

    let timeout = std::time::Duration::from_secs(timeout_secs);
    let frame = fcb1010::midi::receive_dump(port, timeout).context("no dump received")?;
    fcb1010::decode(&frame).context("received message is not an FCB1010 dump")?;

    paths.workspace.ensure()?;
    paths.backup_existing_dump()?;
    std::fs::write(&paths.dump, &frame)
        .with_context(|| format!("unable to write '{}'", paths.dump.display()))?;

    println!("Saved {} bytes to {}", frame.len(), paths.dump.display());
    Ok(())
}

#[cfg(feature = "midi-io")]
fn send(paths: &Paths, port: &PortSelector) -> Result<()> {
    let frame = std::fs::read(&paths.dump)
        .with_context(|| format!("unable to read '{}'", paths.dump.display()))?;
    fcb1010::decode(&frame)
        .with_context(|| format!("'{}' is not an FCB1010 dump", paths.dump.display()))?;
    println!("Put the pedal in GLOBAL CONFIG > SYSEX RCVE mode");

    fcb1010::midi::send_dump(port, &frame).context("unable to send dump")?;
    println!("Sent {}", paths.dump.display());
    Ok(())
}

#[cfg(not(feature = "midi-io"))]
fn ports() -> Result<()> {
    bail!("built without the midi-io feature")
}

#[cfg(not(feature = "midi-io"))]
fn receive(_paths: &Paths, _port: &PortSelector, _timeout_secs: u64) -> Result<()> {
    bail!("built without the midi-io feature")
}

#[cfg(not(feature = "midi-io"))]
fn send(_paths: &Paths, _port: &PortSelector) -> Result<()> {
    bail!("built without the midi-io feature")
}

fn inspect_dump(paths: &Paths, preset: Option<usize>, json: bool) -> Result<()> {
    let config = read_dump(&paths.dump)?;

    let index = match preset {
        Some(n) if (1..=NUM_PRESETS).contains(&n) => Some(n - 1),
        Some(n) => bail!("preset {} is out of range (1-{})", n, NUM_PRESETS),
        None => None,
    };

    match (index, json) {
        (Some(idx), true) => println!("{}", serde_json::to_string_pretty(&config.presets[idx])?),
        (None, true) => println!("{}", serde_json::to_string_pretty(&config)?),
        (Some(idx), false) => {
            println!("{}", inspect::render_preset(&config, idx));
            print!("{}", inspect::render_globals(&config));
        }
        (None, false) => {
            inspect::run_pager(&config, std::io::stdin().lock(), std::io::stdout().lock())?
        }
    }
    Ok(())
}

fn export_csv(paths: &Paths) -> Result<()> {
    let config = read_dump(&paths.dump)?;
    std::fs::write(&paths.csv, fcb1010::csv::format_csv(&config))
        .with_context(|| format!("unable to write '{}'", paths.csv.display()))?;

    println!("Exported {} to {}", paths.dump.display(), paths.csv.display());
    Ok(())
}

fn import_csv(paths: &Paths) -> Result<()> {
    let text = std::fs::read_to_string(&paths.csv)
        .with_context(|| format!("unable to read '{}'", paths.csv.display()))?;
    let base = if paths.dump.exists() {
        read_dump(&paths.dump)?
    } else {
        Configuration::default()
    };
    let config = fcb1010::csv::parse_csv_onto(&text, base)
        .with_context(|| format!("unable to import '{}'", paths.csv.display()))?;

    paths.workspace.ensure()?;
    paths.backup_existing_dump()?;
    fcb1010::write_sysex_file(&paths.dump, &config)
        .with_context(|| format!("unable to write '{}'", paths.dump.display()))?;

    println!("Imported {} into {}", paths.csv.display(), paths.dump.display());
    Ok(())
}

fn backup(paths: &Paths) -> Result<()> {
    if !paths.dump.exists() {
        bail!("no dump at '{}' to back up", paths.dump.display());
    }
    let target = paths.workspace.backup_file(&paths.dump)?;
    println!("Backed up to {}", target.display());
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let paths = Paths::new(&args)?;
    log::debug!("Workspace: {}", paths.workspace.root().display());

    match &args.command {
        Commands::Ports => ports(),
        Commands::Receive { port, timeout_secs } => receive(&paths, port, *timeout_secs),
        Commands::Send { port } => send(&paths, port),
        Commands::Inspect { preset, json } => inspect_dump(&paths, *preset, *json),
        Commands::ExportCsv => export_csv(&paths),
        Commands::ImportCsv => import_csv(&paths),
        Commands::Backup => backup(&paths),
    }
}
