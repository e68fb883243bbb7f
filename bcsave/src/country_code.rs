// SPDX-FileCopyrightText: 2025 bcsave contributors
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Region and locale codes.
//!
//! Codes are not persisted by the binary sections in this crate; they
//! select which server's data and which localized assets other layers
//! fetch. The Japanese region is the historical default and gets
//! special-cased in both mappings below.

use derive_more::Display;
use enum_iterator::{all, Sequence};

/// The four primary game-server regions.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Sequence)]
pub enum CountryCodeType {
    En,
    Jp,
    Kr,
    Tw,
}

impl CountryCodeType {
    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Jp => "jp",
            Self::Kr => "kr",
            Self::Tw => "tw",
        }
    }
}

/// Configuration values consumed by [`CountryCode::cc_lang`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ConfigKey {
    /// Use the configured locale's game data regardless of the save's
    /// region.
    ForceLangGameData,
    /// The locale substituted when [`ConfigKey::ForceLangGameData`] is
    /// set.
    Locale,
}

/// Key-value configuration store, passed explicitly wherever it is
/// consulted so lookups stay visible and testable.
pub trait Config {
    fn get_bool(&self, key: ConfigKey) -> bool;
    fn get_str(&self, key: ConfigKey) -> Option<String>;
}

/// A normalized, lowercase region or locale code.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Display)]
#[display("{code}")]
pub struct CountryCode {
    code: String,
    known: Option<CountryCodeType>,
}

impl CountryCode {
    /// Accepts any free-form code and normalizes it; members of the
    /// known region set are tagged on the way in.
    pub fn from_code(code: impl AsRef<str>) -> Self {
        let code = code.as_ref().to_lowercase();
        let known = all::<CountryCodeType>().find(|cc| cc.code() == code);
        Self { code, known }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// The code as the client-info endpoints expect it; Japan is `ja`
    /// there.
    pub fn client_info_code(&self) -> &str {
        match self.known {
            Some(CountryCodeType::Jp) => "ja",
            _ => &self.code,
        }
    }

    /// The patch-asset bucket code. The bucket for Japan is the
    /// unprefixed one, so `jp` maps to the empty string.
    pub fn patching_code(&self) -> &str {
        match self.known {
            Some(CountryCodeType::Jp) => "",
            _ => &self.code,
        }
    }

    /// Inverse of [`CountryCode::patching_code`]: an empty bucket code
    /// means Japan, anything else is taken verbatim. The two are only
    /// inverses of each other on codes that actually occur as buckets;
    /// `jp` itself never does.
    pub fn from_patching_code(code: impl AsRef<str>) -> Self {
        if code.as_ref().is_empty() {
            Self::from(CountryCodeType::Jp)
        } else {
            Self::from_code(code)
        }
    }

    /// All known regions, for presenting a choice list.
    pub fn all() -> Vec<Self> {
        all::<CountryCodeType>().map(Self::from).collect()
    }

    pub fn all_codes() -> Vec<&'static str> {
        all::<CountryCodeType>().map(CountryCodeType::code).collect()
    }

    /// Locale overlays that ship translated game data without being
    /// server regions of their own.
    pub fn langs() -> [&'static str; 5] {
        ["de", "it", "es", "fr", "th"]
    }

    pub fn is_lang(&self) -> bool {
        Self::langs().contains(&self.code.as_str())
    }

    /// The code game-data lookups should use: the configured locale
    /// when the override flag is set, otherwise `self`.
    pub fn cc_lang(&self, config: &dyn Config) -> CountryCode {
        if config.get_bool(ConfigKey::ForceLangGameData) {
            if let Some(locale) = config.get_str(ConfigKey::Locale) {
                return Self::from_code(locale);
            }
        }
        self.clone()
    }
}

impl From<CountryCodeType> for CountryCode {
    fn from(cc: CountryCodeType) -> Self {
        Self {
            code: cc.code().to_string(),
            known: Some(cc),
        }
    }
}

impl PartialEq<str> for CountryCode {
    fn eq(&self, other: &str) -> bool {
        self.code == other
    }
}

impl PartialEq<&str> for CountryCode {
    fn eq(&self, other: &&str) -> bool {
        self.code == *other
    }
}

impl PartialEq<CountryCodeType> for CountryCode {
    fn eq(&self, other: &CountryCodeType) -> bool {
        self.code == other.code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestConfig {
        force_lang: bool,
        locale: Option<String>,
    }

    impl Config for TestConfig {
        fn get_bool(&self, key: ConfigKey) -> bool {
            matches!(key, ConfigKey::ForceLangGameData) && self.force_lang
        }

        fn get_str(&self, key: ConfigKey) -> Option<String> {
            match key {
                ConfigKey::Locale => self.locale.clone(),
                ConfigKey::ForceLangGameData => None,
            }
        }
    }

    #[test]
    fn normalizes_to_lowercase() {
        assert_eq!(CountryCode::from_code("EN"), "en");
        assert_eq!(CountryCode::from_code("EN"), CountryCodeType::En);
        assert_eq!(CountryCode::from_code("En"), CountryCode::from_code("en"));
    }

    #[test]
    fn client_info_code_remaps_japan() {
        assert_eq!(CountryCode::from_code("jp").client_info_code(), "ja");
        assert_eq!(CountryCode::from_code("en").client_info_code(), "en");
        assert_eq!(CountryCode::from_code("kr").client_info_code(), "kr");
    }

    #[test]
    fn patching_code_strips_japan() {
        assert_eq!(CountryCode::from_code("JP").patching_code(), "");
        assert_eq!(CountryCode::from_code("en").patching_code(), "en");
    }

    #[test]
    fn patching_code_round_trips_through_buckets() {
        assert_eq!(
            CountryCode::from_patching_code(""),
            CountryCode::from_code("jp")
        );
        for code in ["en", "kr", "tw"] {
            assert_eq!(
                CountryCode::from_patching_code(code),
                CountryCode::from_code(code)
            );
        }
    }

    #[test]
    fn langs_are_exactly_the_overlay_set() {
        for lang in ["de", "it", "es", "fr", "th"] {
            assert!(CountryCode::from_code(lang).is_lang());
        }
        for region in CountryCode::all_codes() {
            assert!(!CountryCode::from_code(region).is_lang());
        }
    }

    #[test]
    fn all_codes_lists_the_regions_in_order() {
        assert_eq!(CountryCode::all_codes(), ["en", "jp", "kr", "tw"]);
        assert_eq!(CountryCode::all().len(), 4);
    }

    #[test]
    fn cc_lang_honors_the_forced_locale() {
        let forced = TestConfig {
            force_lang: true,
            locale: Some("fr".to_string()),
        };
        assert_eq!(CountryCode::from_code("en").cc_lang(&forced), "fr");

        let unforced = TestConfig {
            force_lang: false,
            locale: Some("fr".to_string()),
        };
        assert_eq!(CountryCode::from_code("en").cc_lang(&unforced), "en");

        // no locale configured: the flag alone changes nothing
        let empty = TestConfig {
            force_lang: true,
            locale: None,
        };
        assert_eq!(CountryCode::from_code("en").cc_lang(&empty), "en");
    }

    #[test]
    fn displays_the_code() {
        assert_eq!(CountryCode::from_code("TW").to_string(), "tw");
    }
}
