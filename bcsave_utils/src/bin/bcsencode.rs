use std::error::Error;
use std::fs;
use std::io::Cursor;
use std::path::PathBuf;

use bcsave::game::{LineUps, Popups};
use bcsave::GameVersion;
use bcsave_utils::{write_line_up_sections, Section};
use binrw::BinWriterExt;
use clap::Parser;

/// Encode the JSON form of an entity back into a save-section dump.
#[derive(Parser)]
#[command(version)]
struct Args {
    /// JSON file to encode.
    path: PathBuf,

    /// Which entity the JSON describes.
    #[arg(long, value_enum)]
    section: Section,

    /// Game version to encode for, e.g. `12.1.0`.
    /// Required for lineups.
    #[arg(long)]
    game_version: Option<GameVersion>,

    /// Target a save that predates the slot-name block.
    #[arg(long)]
    no_names: bool,

    /// Output dump file.
    #[arg(short, long)]
    output: PathBuf,
}

fn main() -> Result<(), Box<dyn Error>> {
    bcsave_utils::init_logging();
    let args = Args::parse();

    let json = fs::read_to_string(&args.path)?;
    let mut stream = Cursor::new(Vec::new());

    match args.section {
        Section::Lineups => {
            let version = args
                .game_version
                .ok_or("--game-version is required for lineups")?;
            let line_ups: LineUps = serde_json::from_str(&json)?;
            write_line_up_sections(&line_ups, &mut stream, version, !args.no_names)?;
        }
        Section::Popups => {
            let popups: Popups = serde_json::from_str(&json)?;
            stream.write_le(&popups)?;
        }
    }

    fs::write(&args.output, stream.into_inner())?;
    Ok(())
}
