//! Shared plumbing for the `bcsdecode`/`bcsencode` command-line tools.
//!
//! The tools work on *section dumps*: a file holding one entity's
//! sections contiguously, in save-file order. For lineups that is the
//! slot block, the selected/unlocked block, then the slot-name block
//! (absent on saves that predate it); for popups the single table.

use std::io::{Read, Seek, Write};

use bcsave::game::{LineUps, LineUpsError};
use bcsave::GameVersion;
use clap::ValueEnum;
use tracing_subscriber::layer::SubscriberExt;

/// Which entity a section dump holds.
#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum Section {
    Lineups,
    Popups,
}

/// Install the fmt subscriber for the command-line tools.
pub fn init_logging() {
    tracing::subscriber::set_global_default(
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer())
            .with(tracing_subscriber::filter::EnvFilter::from_default_env()),
    )
    .expect("set up the subscriber");
}

/// Reads a lineup dump, invoking the section reads in file order.
pub fn read_line_up_sections<R: Read + Seek>(
    stream: &mut R,
    version: GameVersion,
    with_names: bool,
) -> Result<LineUps, LineUpsError> {
    let mut line_ups = LineUps::read(stream, version)?;
    line_ups.read_selection(stream, version)?;
    if with_names {
        line_ups.read_slot_names(stream, version)?;
    }
    Ok(line_ups)
}

/// Writes a lineup dump, invoking the section writes in file order.
pub fn write_line_up_sections<W: Write + Seek>(
    line_ups: &LineUps,
    stream: &mut W,
    version: GameVersion,
    with_names: bool,
) -> Result<(), LineUpsError> {
    line_ups.write(stream, version)?;
    line_ups.write_selection(stream, version)?;
    if with_names {
        line_ups.write_slot_names(stream, version)?;
    }
    Ok(())
}
