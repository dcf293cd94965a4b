//! Bijections between categorical values and dense integer ids

use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// Maps the distinct values it was fit on to `0..len()` in sorted order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelEncoder<T: Ord> {
    classes: Vec<T>,
    ids: BTreeMap<T, usize>,
}

impl<T: Ord + Clone> LabelEncoder<T> {
    /// Fit the encoder on every value produced by `values`; duplicates are ignored
    pub fn fit<I: IntoIterator<Item = T>>(values: I) -> Self {
        let mut classes: Vec<T> = values.into_iter().collect();
        classes.sort();
        classes.dedup();

        let ids = classes
            .iter()
            .enumerate()
            .map(|(id, value)| (value.clone(), id))
            .collect();

        Self { classes, ids }
    }

    /// Id of a value, or `None` if it was not seen when fitting
    pub fn encode(&self, value: &T) -> Option<usize> {
        self.ids.get(value).copied()
    }

    /// Value behind an id
    pub fn decode(&self, id: usize) -> Option<&T> {
        self.classes.get(id)
    }

    pub fn contains(&self, value: &T) -> bool {
        self.ids.contains_key(value)
    }

    /// Values in id order
    pub fn classes(&self) -> &[T] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

/// Raw weather condition code as found in the dataset (WMO code, e.g. `"63"`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct WeatherCode(String);

impl WeatherCode {
    /// Normalise a raw cell: trims whitespace and drops the fractional part of
    /// integral numbers so that `"3.0"` and `"3"` are the same code
    pub fn new(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.parse::<f64>() {
            Ok(value) if value.is_finite() && value.fract() == 0.0 => {
                WeatherCode(format!("{}", value as i64))
            }
            _ => WeatherCode(trimmed.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn numeric(&self) -> Option<f64> {
        self.0.parse::<f64>().ok()
    }
}

impl fmt::Display for WeatherCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WeatherCode {
    fn from(raw: &str) -> Self {
        WeatherCode::new(raw)
    }
}

impl Ord for WeatherCode {
    // Numeric codes sort by value and come before non-numeric ones
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.numeric(), other.numeric()) {
            (Some(a), Some(b)) => a.total_cmp(&b).then_with(|| self.0.cmp(&other.0)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for WeatherCode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_assigns_sorted_dense_ids() {
        let encoder = LabelEncoder::fit(
            ["Kandy", "Colombo", "Galle", "Colombo"]
                .iter()
                .map(|s| s.to_string()),
        );

        assert_eq!(encoder.len(), 3);
        assert_eq!(encoder.encode(&"Colombo".to_string()), Some(0));
        assert_eq!(encoder.encode(&"Galle".to_string()), Some(1));
        assert_eq!(encoder.encode(&"Kandy".to_string()), Some(2));
        assert_eq!(encoder.encode(&"Jaffna".to_string()), None);
        assert!(!encoder.contains(&"Jaffna".to_string()));
    }

    #[test]
    fn test_decode_inverts_encode() {
        let encoder = LabelEncoder::fit(["b", "a", "c"].iter().map(|s| s.to_string()));
        for (id, class) in encoder.classes().iter().enumerate() {
            assert_eq!(encoder.encode(class), Some(id));
            assert_eq!(encoder.decode(id), Some(class));
        }
        assert_eq!(encoder.decode(3), None);
    }

    #[test]
    fn test_empty_encoder() {
        let encoder: LabelEncoder<String> = LabelEncoder::fit(Vec::new());
        assert!(encoder.is_empty());
        assert_eq!(encoder.decode(0), None);
    }

    #[test]
    fn test_weather_code_normalisation() {
        assert_eq!(WeatherCode::new("3.0").as_str(), "3");
        assert_eq!(WeatherCode::new(" 63 ").as_str(), "63");
        assert_eq!(WeatherCode::new("2.5").as_str(), "2.5");
        assert_eq!(WeatherCode::new("fog").as_str(), "fog");
    }

    #[test]
    fn test_weather_codes_sort_numerically() {
        let encoder = LabelEncoder::fit(
            ["63", "3", "fog", "0", "51"]
                .iter()
                .map(|s| WeatherCode::new(s)),
        );
        let order: Vec<&str> = encoder.classes().iter().map(|c| c.as_str()).collect();
        assert_eq!(order, vec!["0", "3", "51", "63", "fog"]);
    }
}
