//! Banner type tokens and their severity classes.

/// Every type token a caller may attach to a banner.
pub const BANNER_TYPES: [&str; 8] = [
    "red", "alert", "warning", "green", "update", "blue", "general", "holiday",
];

const ALERT_TYPES: [&str; 3] = ["red", "alert", "warning"];
const INFORMATIONAL_TYPES: [&str; 2] = ["green", "update"];
const NEUTRAL_TYPES: [&str; 3] = ["blue", "general", "holiday"];

const ALERT_HEX: &str = "#E53E3E";
const INFORMATIONAL_HEX: &str = "#48BB78";
const NEUTRAL_HEX: &str = "#5384D6";

/// Canonical severity class of a banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorClass {
    Alert,
    Informational,
    Neutral,
    Default,
}

impl ColorClass {
    /// Classify a type token or an already-resolved hex color. Never fails.
    pub fn classify(token: &str) -> Self {
        if ALERT_TYPES.contains(&token) || token.eq_ignore_ascii_case(ALERT_HEX) {
            ColorClass::Alert
        } else if INFORMATIONAL_TYPES.contains(&token)
            || token.eq_ignore_ascii_case(INFORMATIONAL_HEX)
        {
            ColorClass::Informational
        } else if NEUTRAL_TYPES.contains(&token) || token.eq_ignore_ascii_case(NEUTRAL_HEX) {
            ColorClass::Neutral
        } else {
            ColorClass::Default
        }
    }

    /// Hex color written into V1 banner styles. Unclassified tokens fall back to blue.
    pub fn hex(&self) -> &'static str {
        match self {
            ColorClass::Alert => ALERT_HEX,
            ColorClass::Informational => INFORMATIONAL_HEX,
            ColorClass::Neutral | ColorClass::Default => NEUTRAL_HEX,
        }
    }
}

/// Whether `token` belongs to the accepted type set.
pub fn is_known_type(token: &str) -> bool {
    BANNER_TYPES.contains(&token)
}
