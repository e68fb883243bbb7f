// SPDX-FileCopyrightText: 2025 bcsave contributors
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! One-time popup dialogs, keyed by popup id.
//!
//! On disk this is a count-prefixed list of (id, seen) pairs. The game
//! writes them in whatever order its own table iterates, and an
//! unedited round trip has to reproduce that order byte for byte, so
//! the backing map preserves insertion order instead of hashing it
//! away.

use std::io::{Read, Seek, Write};

use binrw::{binrw, BinRead, BinResult, BinWrite, Endian};
use derive_more::{Deref, DerefMut, From};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::common::{bool_parser, bool_writer};

/// Seen-state of one popup dialog.
#[binrw]
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Popup {
    #[br(parse_with = bool_parser)]
    #[bw(write_with = bool_writer)]
    pub seen: bool,
}

/// All popup flags of one save, in file order.
#[derive(
    Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize, Deref, DerefMut, From,
)]
#[serde(transparent)]
pub struct Popups(pub IndexMap<u32, Popup>);

impl BinRead for Popups {
    type Args<'a> = ();

    fn read_options<R: Read + Seek>(
        reader: &mut R,
        endian: Endian,
        _args: Self::Args<'_>,
    ) -> BinResult<Self> {
        let total = u32::read_options(reader, endian, ())?;
        let mut popups = IndexMap::with_capacity(total as usize);
        for _ in 0..total {
            let key = u32::read_options(reader, endian, ())?;
            let popup = Popup::read_options(reader, endian, ())?;
            if popups.insert(key, popup).is_some() {
                log::warn!("duplicate popup id {key} in save data, keeping the later flag");
            }
        }
        Ok(Self(popups))
    }
}

impl BinWrite for Popups {
    type Args<'a> = ();

    fn write_options<W: Write + Seek>(
        &self,
        writer: &mut W,
        endian: Endian,
        _args: Self::Args<'_>,
    ) -> BinResult<()> {
        (self.0.len() as u32).write_options(writer, endian, ())?;
        for (key, popup) in &self.0 {
            key.write_options(writer, endian, ())?;
            popup.write_options(writer, endian, ())?;
        }
        Ok(())
    }
}
