//! Registry of WMO weather interpretation codes.
//!
//! Maps the numeric codes emitted by forecast services (e.g. Open-Meteo's
//! `weather_code`) to a display glyph and an Italian description. Every
//! accessor is total: codes missing from the table resolve to
//! [`FALLBACK_ICON`] and [`FALLBACK_DESCRIPTION`].

use once_cell::sync::Lazy;
use serde::Serialize;
use std::{collections::HashMap, fmt, str::FromStr};
use thiserror::Error;

/// Icon returned for codes that are not in the table.
pub const FALLBACK_ICON: &str = "❓";

/// Description returned for codes that are not in the table.
pub const FALLBACK_DESCRIPTION: &str = "Condizione meteo sconosciuta";

/// A single row of the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeatherCodeEntry {
    pub code: i64,
    pub icon: &'static str,
    pub description: &'static str,
}

impl WeatherCodeEntry {
    const fn new(code: i64, icon: &'static str, description: &'static str) -> Self {
        Self {
            code,
            icon,
            description,
        }
    }
}

/// The literal table, in ascending code order.
pub const WEATHER_CODES: &[WeatherCodeEntry] = &[
    WeatherCodeEntry::new(0, "☀️", "Cielo sereno"),
    WeatherCodeEntry::new(1, "🌤️", "Prevalentemente sereno"),
    WeatherCodeEntry::new(2, "⛅", "Parzialmente nuvoloso"),
    WeatherCodeEntry::new(3, "☁️", "Nuvoloso"),
    WeatherCodeEntry::new(45, "🌫️", "Nebbia"),
    WeatherCodeEntry::new(48, "🌫️", "Nebbia con brina"),
    // drizzle
    WeatherCodeEntry::new(51, "🌧️", "Pioggia leggera"),
    WeatherCodeEntry::new(53, "🌧️", "Pioggia moderata"),
    WeatherCodeEntry::new(55, "🌧️", "Pioggia intensa"),
    // rain
    WeatherCodeEntry::new(61, "🌧️", "Pioggia debole"),
    WeatherCodeEntry::new(63, "🌧️", "Pioggia moderata"),
    WeatherCodeEntry::new(65, "🌧️", "Pioggia forte"),
    WeatherCodeEntry::new(71, "🌨️", "Neve leggera"),
    WeatherCodeEntry::new(73, "🌨️", "Neve moderata"),
    WeatherCodeEntry::new(75, "🌨️", "Neve intensa"),
    WeatherCodeEntry::new(95, "⛈️", "Temporale"),
];

static REGISTRY: Lazy<HashMap<i64, &'static WeatherCodeEntry>> =
    Lazy::new(|| WEATHER_CODES.iter().map(|entry| (entry.code, entry)).collect());

/// All known entries, in ascending code order.
pub fn entries() -> &'static [WeatherCodeEntry] {
    WEATHER_CODES
}

/// Number of known codes.
pub fn len() -> usize {
    REGISTRY.len()
}

pub fn contains(code: i64) -> bool {
    REGISTRY.contains_key(&code)
}

/// Returns the entry for `code`, or `None` if the code is not in the table.
pub fn lookup(code: i64) -> Option<&'static WeatherCodeEntry> {
    let entry = REGISTRY.get(&code).copied();
    if entry.is_none() {
        tracing::debug!(code, "unknown weather code");
    }
    entry
}

/// Icon for `code`, or [`FALLBACK_ICON`].
pub fn icon(code: i64) -> &'static str {
    lookup(code).map_or(FALLBACK_ICON, |entry| entry.icon)
}

/// Description for `code`, or [`FALLBACK_DESCRIPTION`].
pub fn description(code: i64) -> &'static str {
    lookup(code).map_or(FALLBACK_DESCRIPTION, |entry| entry.description)
}

/// Like [`lookup`], but takes untyped text.
///
/// Only plain decimal text matches, so `"01"`, `"+1"` or `" 95 "` are not
/// found, same as anything else that is not a [`WeatherCode`].
pub fn lookup_raw(input: &str) -> Option<&'static WeatherCodeEntry> {
    match input.parse::<WeatherCode>() {
        Ok(code) => lookup(code.value()),
        Err(err) => {
            tracing::debug!(input, %err, "unparseable weather code");
            None
        }
    }
}

pub fn icon_raw(input: &str) -> &'static str {
    lookup_raw(input).map_or(FALLBACK_ICON, |entry| entry.icon)
}

pub fn description_raw(input: &str) -> &'static str {
    lookup_raw(input).map_or(FALLBACK_DESCRIPTION, |entry| entry.description)
}

/// A syntactically valid weather code. It may or may not be in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct WeatherCode(i64);

impl WeatherCode {
    pub const fn new(code: i64) -> Self {
        Self(code)
    }

    pub const fn value(self) -> i64 {
        self.0
    }

    pub fn entry(self) -> Option<&'static WeatherCodeEntry> {
        lookup(self.0)
    }

    pub fn icon(self) -> &'static str {
        icon(self.0)
    }

    pub fn description(self) -> &'static str {
        description(self.0)
    }
}

impl From<i64> for WeatherCode {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for WeatherCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseCodeError {
    #[error("weather code is empty")]
    Empty,
    #[error("'{0}' is not an integer weather code")]
    NotAnInteger(String),
}

/// Plain decimal as a code prints: optional `-`, no `+`, no padding,
/// no leading zeros, and no `-0`.
fn is_canonical_decimal(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);

    !digits.is_empty()
        && digits.bytes().all(|b| b.is_ascii_digit())
        && (digits == "0" || !digits.starts_with('0'))
        && s != "-0"
}

impl FromStr for WeatherCode {
    type Err = ParseCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ParseCodeError::Empty);
        }
        if !is_canonical_decimal(s) {
            return Err(ParseCodeError::NotAnInteger(s.to_string()));
        }

        // Still fails on i64 overflow.
        s.parse::<i64>()
            .map(Self)
            .map_err(|_| ParseCodeError::NotAnInteger(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_entry_resolves_to_its_own_fields() {
        for entry in entries() {
            assert_eq!(icon(entry.code), entry.icon);
            assert_eq!(description(entry.code), entry.description);
            assert_eq!(lookup(entry.code), Some(entry));
        }
    }

    #[test]
    fn known_codes() {
        assert_eq!(icon(0), "☀️");
        assert_eq!(description(0), "Cielo sereno");
        assert_eq!(icon(61), "🌧️");
        assert_eq!(description(61), "Pioggia debole");
        assert_eq!(icon(95), "⛈️");
        assert_eq!(description(95), "Temporale");
    }

    #[test]
    fn unknown_codes_fall_back() {
        for code in [-1, -5, 4, 100, 9999, i64::MIN, i64::MAX] {
            assert!(lookup(code).is_none(), "code {code} should be unknown");
            assert_eq!(icon(code), "❓");
            assert_eq!(description(code), "Condizione meteo sconosciuta");
        }
    }

    #[test]
    fn repeated_calls_are_stable() {
        for code in [0, 48, 100, -5] {
            let first = (icon(code), description(code));
            for _ in 0..3 {
                assert_eq!((icon(code), description(code)), first);
            }
        }
    }

    #[test]
    fn table_integrity() {
        assert_eq!(len(), WEATHER_CODES.len(), "codes must be unique");
        assert!(
            WEATHER_CODES.windows(2).all(|w| w[0].code < w[1].code),
            "table must be sorted by code"
        );
        for entry in entries() {
            assert!(!entry.icon.is_empty(), "empty icon for {}", entry.code);
            assert!(
                !entry.description.is_empty(),
                "empty description for {}",
                entry.code
            );
            assert!(contains(entry.code));
        }
    }

    #[test]
    fn raw_input_is_parsed() {
        assert_eq!(icon_raw("95"), "⛈️");
        assert_eq!(description_raw("3"), "Nuvoloso");
        assert_eq!(icon_raw("0"), "☀️");
        assert_eq!(lookup_raw("45").map(|e| e.code), Some(45));
    }

    #[test]
    fn raw_input_that_is_not_an_integer_falls_back() {
        for input in ["", "   ", "abc", "1.5", "0x10", "-", "99999999999999999999", "1e2"] {
            assert!(lookup_raw(input).is_none(), "{input:?} should be unknown");
            assert_eq!(icon_raw(input), FALLBACK_ICON);
            assert_eq!(description_raw(input), FALLBACK_DESCRIPTION);
        }
    }

    #[test]
    fn non_canonical_spellings_of_table_codes_fall_back() {
        for input in [" 95 ", "95\n", "01", "+1", "007", "-0", "00"] {
            assert!(input.parse::<WeatherCode>().is_err(), "{input:?} should not parse");
            assert_eq!(icon_raw(input), FALLBACK_ICON, "{input:?}");
            assert_eq!(description_raw(input), FALLBACK_DESCRIPTION, "{input:?}");
        }
    }

    #[test]
    fn parse_weather_code() {
        assert_eq!("0".parse::<WeatherCode>(), Ok(WeatherCode::new(0)));
        assert_eq!("-100".parse::<WeatherCode>(), Ok(WeatherCode::new(-100)));
        assert_eq!("61".parse::<WeatherCode>(), Ok(WeatherCode::new(61)));
        assert_eq!("-5".parse::<WeatherCode>(), Ok(WeatherCode::new(-5)));
        assert_eq!("".parse::<WeatherCode>(), Err(ParseCodeError::Empty));

        let err = "rain".parse::<WeatherCode>().unwrap_err();
        assert_eq!(err, ParseCodeError::NotAnInteger("rain".into()));
        assert!(err.to_string().contains("not an integer"));
    }

    #[test]
    fn unlisted_code_parses_but_has_no_entry() {
        let code: WeatherCode = "100".parse().expect("100 is a valid integer");
        assert!(code.entry().is_none());
        assert_eq!(code.icon(), FALLBACK_ICON);
        assert_eq!(code.description(), FALLBACK_DESCRIPTION);
    }
}
