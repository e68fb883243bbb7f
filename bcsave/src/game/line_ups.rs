// SPDX-FileCopyrightText: 2025 bcsave contributors
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Battle lineup presets.
//!
//! One [`LineUps`] value spans three physically disjoint file sections:
//! the slot block (every preset's ten unit ids, back to back), the
//! selected/unlocked block, and the slot-name block. Each section has
//! its own read/write pair and its own version gate; the caller invokes
//! them in that order on both passes, with other entities' sections
//! interleaved in between.

use std::io::{Read, Seek, Write};

use binrw::{binrw, BinRead, BinReaderExt, BinResult, BinWrite, BinWriterExt, Endian};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::common::{read_bool_list, string_parser, string_writer, write_bool_list};
use crate::game_version::GameVersion;

/// Number of unit slots in one preset, in every format revision.
pub const SLOTS_PER_LINE_UP: usize = 10;

/// First version whose slot block carries an explicit lineup count.
pub const SLOT_COUNT_BYTE_VERSION: u32 = 90700;

/// First version whose name block carries an explicit named-slot count.
pub const NAME_COUNT_BYTE_VERSION: u32 = 110600;

/// Lineup count in formats older than [`SLOT_COUNT_BYTE_VERSION`].
const FIXED_LINE_UP_COUNT: usize = 10;

/// Unlock flag list length in formats older than
/// [`SLOT_COUNT_BYTE_VERSION`].
const UNLOCKED_FLAG_COUNT: usize = 10;

/// Named-slot total in formats older than [`NAME_COUNT_BYTE_VERSION`].
const FIXED_SLOT_NAME_COUNT: usize = 15;

#[derive(Error, Debug)]
pub enum LineUpsError {
    #[error(transparent)]
    BinRw(#[from] binrw::Error),
    #[error("{0} lineups do not fit in the count byte")]
    TooManyLineUps(usize),
    #[error("this format stores exactly {expected} lineups, got {actual}")]
    FixedLineUpCount { expected: usize, actual: usize },
    #[error("unlocked count {count} exceeds the {len}-entry flag list")]
    UnlockedOutOfRange { count: usize, len: usize },
    #[error("slot name total {total} exceeds the {slots} lineups present")]
    SlotNamesOutOfRange { total: usize, slots: usize },
}

/// One equipped unit.
#[binrw]
#[brw(little)]
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EquipSlot {
    pub cat_id: u32,
}

/// One lineup preset: ten unit slots plus a display name.
///
/// `read`/`write` only cover the ten-slot block. The name lives in a
/// different file section and is filled in by the owning [`LineUps`]
/// during the name pass, so a preset is not byte-complete until both
/// passes have run.
#[binrw]
#[brw(little)]
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct EquipSlots {
    #[br(count = SLOTS_PER_LINE_UP)]
    #[bw(assert(slots.len() == SLOTS_PER_LINE_UP, "a lineup holds exactly {} slots, got {}", SLOTS_PER_LINE_UP, slots.len()))]
    pub slots: Vec<EquipSlot>,
    #[brw(ignore)]
    pub name: String,
}

impl EquipSlots {
    pub fn read_name<R: Read + Seek>(&mut self, reader: &mut R) -> BinResult<()> {
        self.name = string_parser(reader, Endian::Little, ())?;
        Ok(())
    }

    pub fn write_name<W: Write + Seek>(&self, writer: &mut W) -> BinResult<()> {
        string_writer(&self.name, writer, Endian::Little, ())
    }
}

/// How the number of lineups is stored in the slot block.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum SlotCountLayout {
    /// The format stores exactly this many lineups, with no prefix.
    Fixed(usize),
    /// A single count byte precedes the lineup blocks.
    LeadingByte,
}

/// How the unlocked-lineup count is stored in the selection block.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum UnlockedLayout {
    /// One byte per lineup; only the number of set flags survives
    /// decoding.
    FlagList(usize),
    /// The count itself, in one byte.
    CountByte,
}

/// How the named-lineup total is stored in the name block.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum NameCountLayout {
    Fixed(usize),
    LeadingByte,
}

/// Layout gates per section, newest first; the first entry whose
/// threshold the version reaches wins. Every table ends with a
/// version-0 entry so resolution is total.
const SLOT_COUNT_GATES: &[(u32, SlotCountLayout)] = &[
    (SLOT_COUNT_BYTE_VERSION, SlotCountLayout::LeadingByte),
    (0, SlotCountLayout::Fixed(FIXED_LINE_UP_COUNT)),
];

const UNLOCKED_GATES: &[(u32, UnlockedLayout)] = &[
    (SLOT_COUNT_BYTE_VERSION, UnlockedLayout::CountByte),
    (0, UnlockedLayout::FlagList(UNLOCKED_FLAG_COUNT)),
];

const NAME_COUNT_GATES: &[(u32, NameCountLayout)] = &[
    (NAME_COUNT_BYTE_VERSION, NameCountLayout::LeadingByte),
    (0, NameCountLayout::Fixed(FIXED_SLOT_NAME_COUNT)),
];

fn resolve<T: Copy>(gates: &[(u32, T)], version: GameVersion) -> T {
    gates
        .iter()
        .find(|(threshold, _)| version >= *threshold)
        .map(|(_, layout)| *layout)
        .expect("gate tables end with a version-0 entry")
}

/// All lineup presets of one save, with the selection state and the
/// name bookkeeping that tie the three file sections together.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct LineUps {
    pub slots: Vec<EquipSlots>,
    pub selected_slot: u32,
    pub unlocked_slots: u8,
    /// How many leading presets carry a name on disk. Set by the name
    /// pass and re-emitted by it; not derived from the names
    /// themselves.
    #[serde(default)]
    pub slot_names_length: u8,
}

impl LineUps {
    /// Reads the slot block. Selection state and names stay at their
    /// defaults until the later passes fill them in.
    pub fn read<R: Read + Seek>(
        reader: &mut R,
        version: GameVersion,
    ) -> Result<Self, LineUpsError> {
        let count = match resolve(SLOT_COUNT_GATES, version) {
            SlotCountLayout::LeadingByte => reader.read_le::<u8>()? as usize,
            SlotCountLayout::Fixed(count) => count,
        };
        let mut slots = Vec::with_capacity(count);
        for _ in 0..count {
            slots.push(EquipSlots::read(reader)?);
        }
        Ok(Self {
            slots,
            ..Self::default()
        })
    }

    /// Writes the slot block. The emitted count must describe the
    /// actual slot vector or the stream would desync, so a count the
    /// target format cannot represent is an error.
    pub fn write<W: Write + Seek>(
        &self,
        writer: &mut W,
        version: GameVersion,
    ) -> Result<(), LineUpsError> {
        match resolve(SLOT_COUNT_GATES, version) {
            SlotCountLayout::LeadingByte => {
                let count = u8::try_from(self.slots.len())
                    .map_err(|_| LineUpsError::TooManyLineUps(self.slots.len()))?;
                writer.write_le(&count)?;
            }
            SlotCountLayout::Fixed(expected) => {
                if self.slots.len() != expected {
                    return Err(LineUpsError::FixedLineUpCount {
                        expected,
                        actual: self.slots.len(),
                    });
                }
            }
        }
        for slot in &self.slots {
            slot.write(writer)?;
        }
        Ok(())
    }

    /// Reads the selected/unlocked block.
    ///
    /// Old formats store one unlock flag per lineup; only the number of
    /// set flags is kept, the pattern itself is discarded. That was the
    /// original tool's behavior and round trips depend on it, so it is
    /// deliberate, not an error.
    pub fn read_selection<R: Read + Seek>(
        &mut self,
        reader: &mut R,
        version: GameVersion,
    ) -> Result<(), LineUpsError> {
        self.selected_slot = reader.read_le::<u32>()?;
        self.unlocked_slots = match resolve(UNLOCKED_GATES, version) {
            UnlockedLayout::FlagList(len) => {
                let flags = read_bool_list(reader, len)?;
                flags.iter().filter(|&&flag| flag).count() as u8
            }
            UnlockedLayout::CountByte => reader.read_le::<u8>()?,
        };
        Ok(())
    }

    /// Writes the selected/unlocked block. On old formats the flag list
    /// is reconstructed canonically, first `unlocked_slots` entries
    /// set; a save whose unlocked lineups were non-contiguous will not
    /// reproduce its source bytes here.
    pub fn write_selection<W: Write + Seek>(
        &self,
        writer: &mut W,
        version: GameVersion,
    ) -> Result<(), LineUpsError> {
        writer.write_le(&self.selected_slot)?;
        match resolve(UNLOCKED_GATES, version) {
            UnlockedLayout::FlagList(len) => {
                let unlocked = usize::from(self.unlocked_slots);
                if unlocked > len {
                    return Err(LineUpsError::UnlockedOutOfRange {
                        count: unlocked,
                        len,
                    });
                }
                let flags: Vec<bool> = (0..len).map(|i| i < unlocked).collect();
                write_bool_list(writer, &flags)?;
            }
            UnlockedLayout::CountByte => writer.write_le(&self.unlocked_slots)?,
        }
        Ok(())
    }

    /// Reads the slot-name block into the leading presets and records
    /// the total for the write pass.
    ///
    /// A total larger than the slot vector is refused; nothing in the
    /// format forbids it, and the original tool would have indexed out
    /// of range on such a file.
    pub fn read_slot_names<R: Read + Seek>(
        &mut self,
        reader: &mut R,
        version: GameVersion,
    ) -> Result<(), LineUpsError> {
        let total = match resolve(NAME_COUNT_GATES, version) {
            NameCountLayout::LeadingByte => reader.read_le::<u8>()? as usize,
            NameCountLayout::Fixed(total) => total,
        };
        if total > self.slots.len() {
            return Err(LineUpsError::SlotNamesOutOfRange {
                total,
                slots: self.slots.len(),
            });
        }
        for slot in &mut self.slots[..total] {
            slot.read_name(reader)?;
        }
        self.slot_names_length = total as u8;
        Ok(())
    }

    /// Writes the slot-name block for the first `slot_names_length`
    /// presets.
    pub fn write_slot_names<W: Write + Seek>(
        &self,
        writer: &mut W,
        version: GameVersion,
    ) -> Result<(), LineUpsError> {
        let total = usize::from(self.slot_names_length);
        if total > self.slots.len() {
            return Err(LineUpsError::SlotNamesOutOfRange {
                total,
                slots: self.slots.len(),
            });
        }
        if let NameCountLayout::LeadingByte = resolve(NAME_COUNT_GATES, version) {
            writer.write_le(&self.slot_names_length)?;
        }
        for slot in &self.slots[..total] {
            slot.write_name(writer)?;
        }
        Ok(())
    }
}
