//! Codec for The Battle Cats save-file entities: battle lineup presets
//! and one-time popup flags.
//!
//! The save's outer container (decryption, checksums, the surrounding
//! entity catalog) is handled by the caller; this crate turns the raw
//! section bytes into editable values and back, byte-identically for
//! unedited round trips.

pub mod common;
pub mod country_code;
pub mod game;
pub mod game_version;

pub use country_code::{Config, ConfigKey, CountryCode, CountryCodeType};
pub use game_version::{GameVersion, ParseGameVersionError};
