use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};
use std::num::ParseIntError;
use std::str::FromStr;

use derive_more::From;
use thiserror::Error;

/// A game release encoded as `major * 10000 + minor * 100 + patch`,
/// so `"9.7.0"` is 90700.
///
/// Binary sections gate their layout on thresholds of this value; the
/// codec only ever compares it, it is not itself persisted here.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash, From)]
pub struct GameVersion(pub u32);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseGameVersionError {
    #[error("expected 1 to 3 dot-separated components, got {0}")]
    ComponentCount(usize),
    #[error("version component {component:?} is not a number: {source}")]
    Component {
        component: String,
        source: ParseIntError,
    },
}

impl FromStr for GameVersion {
    type Err = ParseGameVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('.').collect();
        if parts.len() > 3 {
            return Err(ParseGameVersionError::ComponentCount(parts.len()));
        }
        let mut version = 0;
        for (part, weight) in parts.into_iter().zip([10_000, 100, 1]) {
            let component: u32 =
                part.parse()
                    .map_err(|source| ParseGameVersionError::Component {
                        component: part.to_string(),
                        source,
                    })?;
            version += component * weight;
        }
        Ok(Self(version))
    }
}

impl Display for GameVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}",
            self.0 / 10_000,
            self.0 / 100 % 100,
            self.0 % 100
        )
    }
}

impl PartialEq<u32> for GameVersion {
    fn eq(&self, other: &u32) -> bool {
        self.0 == *other
    }
}

impl PartialOrd<u32> for GameVersion {
    fn partial_cmp(&self, other: &u32) -> Option<Ordering> {
        self.0.partial_cmp(other)
    }
}
