use std::error::Error;
use std::fs;
use std::io::Cursor;
use std::path::PathBuf;

use bcsave::game::Popups;
use bcsave::GameVersion;
use bcsave_utils::{read_line_up_sections, Section};
use binrw::BinReaderExt;
use clap::Parser;

/// Decode a save-section dump to JSON on stdout.
#[derive(Parser)]
#[command(version)]
struct Args {
    /// Dump file to decode.
    path: PathBuf,

    /// Which entity the dump holds.
    #[arg(long, value_enum)]
    section: Section,

    /// Game version the save was written by, e.g. `12.1.0`.
    /// Required for lineup dumps.
    #[arg(long)]
    game_version: Option<GameVersion>,

    /// The dump predates the slot-name block and does not carry one.
    #[arg(long)]
    no_names: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    bcsave_utils::init_logging();
    let args = Args::parse();

    let mut stream = Cursor::new(fs::read(&args.path)?);

    let json = match args.section {
        Section::Lineups => {
            let version = args
                .game_version
                .ok_or("--game-version is required for lineup dumps")?;
            let line_ups = read_line_up_sections(&mut stream, version, !args.no_names)?;
            serde_json::to_string_pretty(&line_ups)?
        }
        Section::Popups => {
            let popups: Popups = stream.read_le()?;
            serde_json::to_string_pretty(&popups)?
        }
    };

    let trailing = stream.get_ref().len() as u64 - stream.position();
    if trailing > 0 {
        tracing::warn!("{trailing} trailing bytes left undecoded");
    }

    println!("{json}");
    Ok(())
}
