//! Human readable descriptions for WMO weather codes

/// Code to description table for the codes present in the dataset
pub const WEATHER_CODE_DESCRIPTIONS: &[(&str, &str)] = &[
    ("0", "Clear"),
    ("1", "Mainly clear"),
    ("2", "Partly cloudy"),
    ("3", "Overcast"),
    ("45", "Fog"),
    ("48", "Depositing rime fog"),
    ("51", "Drizzle: light"),
    ("53", "Drizzle: moderate"),
    ("55", "Drizzle: dense"),
    ("61", "Rain: slight"),
    ("63", "Rain: moderate"),
    ("65", "Rain: heavy"),
    ("71", "Snow fall: slight"),
    ("80", "Rain showers: slight"),
    ("81", "Rain showers: moderate"),
    ("95", "Thunderstorm"),
];

/// Look up the description of a code
pub fn lookup(code: &str) -> Option<&'static str> {
    WEATHER_CODE_DESCRIPTIONS
        .iter()
        .find(|(key, _)| *key == code)
        .map(|(_, description)| *description)
}

/// Describe a code, passing unknown codes through unchanged
pub fn describe(code: &str) -> String {
    lookup(code).map_or_else(|| code.to_string(), str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes() {
        assert_eq!(describe("0"), "Clear");
        assert_eq!(describe("1"), "Mainly clear");
        assert_eq!(describe("95"), "Thunderstorm");
    }

    #[test]
    fn test_unknown_code_passes_through() {
        assert_eq!(lookup("999"), None);
        assert_eq!(describe("999"), "999");
        assert_eq!(describe("3.5"), "3.5");
    }
}
