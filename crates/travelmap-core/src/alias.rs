// crates/travelmap-core/src/alias.rs

//! Fixed country lookup tables.
//!
//! These are domain knowledge, not computed properties: the alternate names
//! match the `name` properties used by the bundled countries GeoJSON, and the
//! flag/emoji tables cover the countries the journal has trips in.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Country name as written in the journal -> name used by the GeoJSON.
pub const ALTERNATIVE_NAMES: &[(&str, &str)] = &[
    ("Spain", "España"),
    ("Germany", "Deutschland"),
    ("Italy", "Italia"),
    ("Netherlands", "Nederland"),
    ("Switzerland", "Schweiz"),
    ("Czech Republic", "Czechia"),
    (
        "United Kingdom",
        "United Kingdom of Great Britain and Northern Ireland",
    ),
    ("Vatican City", "Vatican"),
];

/// Countries whose feature set may include overseas territories; for these
/// the mainland-Europe feature wins.
pub const MULTI_TERRITORY_COUNTRIES: &[&str] = &[
    "France",
    "Spain",
    "Portugal",
    "Italy",
    "Germany",
    "Netherlands",
    "Belgium",
    "Switzerland",
    "Austria",
    "Vatican City",
];

/// Fallback flag for countries missing from [`COUNTRY_FLAGS`].
pub const DEFAULT_FLAG: &str = "🌍";
/// Emoji for trips without any recognised country.
pub const DEFAULT_EMOJI: &str = "✈️";

pub const COUNTRY_FLAGS: &[(&str, &str)] = &[
    ("Hungary", "🇭🇺"),
    ("Austria", "🇦🇹"),
    ("France", "🇫🇷"),
    ("United Kingdom", "🇬🇧"),
    ("Italy", "🇮🇹"),
    ("Spain", "🇪🇸"),
    ("Germany", "🇩🇪"),
    ("Netherlands", "🇳🇱"),
    ("Czech Republic", "🇨🇿"),
    ("Czechia", "🇨🇿"),
    ("Portugal", "🇵🇹"),
    ("Switzerland", "🇨🇭"),
    ("Belgium", "🇧🇪"),
    ("Denmark", "🇩🇰"),
    ("Sweden", "🇸🇪"),
    ("Norway", "🇳🇴"),
    ("Finland", "🇫🇮"),
    ("Ireland", "🇮🇪"),
    ("Poland", "🇵🇱"),
    ("Greece", "🇬🇷"),
    ("Croatia", "🇭🇷"),
    ("Slovenia", "🇸🇮"),
    ("Slovakia", "🇸🇰"),
    ("Romania", "🇷🇴"),
    ("Bulgaria", "🇧🇬"),
    ("Serbia", "🇷🇸"),
    ("Bosnia and Herzegovina", "🇧🇦"),
    ("Montenegro", "🇲🇪"),
    ("Albania", "🇦🇱"),
    ("North Macedonia", "🇲🇰"),
    ("Kosovo", "🇽🇰"),
    ("Moldova", "🇲🇩"),
    ("Ukraine", "🇺🇦"),
    ("Belarus", "🇧🇾"),
    ("Lithuania", "🇱🇹"),
    ("Latvia", "🇱🇻"),
    ("Estonia", "🇪🇪"),
    ("Russia", "🇷🇺"),
    ("Turkey", "🇹🇷"),
    ("Cyprus", "🇨🇾"),
    ("Malta", "🇲🇹"),
    ("Iceland", "🇮🇸"),
    ("Luxembourg", "🇱🇺"),
    ("Liechtenstein", "🇱🇮"),
    ("Monaco", "🇲🇨"),
    ("San Marino", "🇸🇲"),
    ("Vatican City", "🇻🇦"),
    ("Città del Vaticano", "🇻🇦"),
    ("Andorra", "🇦🇩"),
];

pub const COUNTRY_EMOJIS: &[(&str, &str)] = &[
    ("Hungary", "🏛️"),
    ("Austria", "🎭"),
    ("France", "🗼"),
    ("United Kingdom", "🇬🇧"),
    ("Italy", "🏛️"),
    ("Spain", "🌞"),
    ("Germany", "🏛️"),
    ("Netherlands", "🌷"),
    ("Czech Republic", "🏰"),
    ("Czechia", "🏰"),
    ("Portugal", "🍷"),
    ("Switzerland", "🏔️"),
    ("Belgium", "🍫"),
    ("Denmark", "🧜‍♀️"),
    ("Sweden", "🏰"),
    ("Norway", "❄️"),
    ("Finland", "🎅"),
    ("Ireland", "🍺"),
    ("Poland", "🏰"),
    ("Greece", "🏛️"),
    ("Croatia", "🏖️"),
    ("Slovenia", "🏔️"),
    ("Slovakia", "🏰"),
    ("Romania", "🏰"),
    ("Bulgaria", "🌹"),
    ("Serbia", "🏰"),
    ("Bosnia and Herzegovina", "🏔️"),
    ("Montenegro", "🏔️"),
    ("Albania", "🏔️"),
    ("North Macedonia", "🏔️"),
    ("Kosovo", "🏔️"),
    ("Moldova", "🍇"),
    ("Ukraine", "🌻"),
    ("Belarus", "🌲"),
    ("Lithuania", "🏰"),
    ("Latvia", "🌲"),
    ("Estonia", "🌲"),
    ("Russia", "🏰"),
    ("Turkey", "🕌"),
    ("Cyprus", "🏖️"),
    ("Malta", "🏰"),
    ("Iceland", "🌋"),
    ("Luxembourg", "🏰"),
    ("Liechtenstein", "🏔️"),
    ("Monaco", "🏎️"),
    ("San Marino", "🏰"),
    ("Vatican City", "⛪"),
    ("Città del Vaticano", "⛪"),
    ("Andorra", "🏔️"),
];

static ALT_INDEX: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| ALTERNATIVE_NAMES.iter().copied().collect());

static FLAG_INDEX: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| COUNTRY_FLAGS.iter().copied().collect());

static EMOJI_INDEX: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| COUNTRY_EMOJIS.iter().copied().collect());

/// Alternate GeoJSON name for a journal country name, if one is known.
pub fn alternative_name(country: &str) -> Option<&'static str> {
    ALT_INDEX.get(country).copied()
}

pub fn is_multi_territory(country: &str) -> bool {
    MULTI_TERRITORY_COUNTRIES.contains(&country)
}

/// `true` if the country has a flag entry, i.e. the journal knows it.
pub fn is_known_country(country: &str) -> bool {
    FLAG_INDEX.contains_key(country)
}

pub fn flag_for(country: &str) -> Option<&'static str> {
    FLAG_INDEX.get(country).copied()
}

pub fn emoji_for(country: &str) -> Option<&'static str> {
    EMOJI_INDEX.get(country).copied()
}
