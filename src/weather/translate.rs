use std::collections::HashMap;

/// Slovene condition phrases and their canonical condition.
const CONDITIONS: &[(&str, &str)] = &[
    ("pretežno jasno", "sunny"),
    ("jasno", "sunny"),
    ("delno oblačno", "partlycloudy"),
    ("pretežno oblačno", "cloudy"),
    ("zmerno oblačno", "cloudy"),
    ("oblačno", "cloudy"),
    ("megla", "fog"),
    ("megleno", "fog"),
    ("dež", "rainy"),
    ("deževno", "rainy"),
    ("plohe", "pouring"),
    ("nevihte", "lightning-rainy"),
    ("sneženje", "snowy"),
    ("snežna ploha", "snowy-rainy"),
    ("toča", "hail"),
    ("izjemno", "exceptional"),
];

/// Slovene compass abbreviations (S = sever, J = jug, V = vzhod, Z = zahod).
const BEARINGS: &[(&str, &str)] = &[
    ("S", "N"),
    ("J", "S"),
    ("V", "E"),
    ("Z", "W"),
    ("SV", "NE"),
    ("SZ", "NW"),
    ("JV", "SE"),
    ("JZ", "SW"),
];

/// Lookup tables from the feed's vocabulary to canonical terms.
///
/// Unknown input is passed through unchanged so new wording in the feed shows
/// up verbatim instead of failing.
#[derive(Debug, Clone)]
pub struct ConditionTranslator {
    conditions: HashMap<String, &'static str>,
    bearings: HashMap<&'static str, &'static str>,
}

impl Default for ConditionTranslator {
    fn default() -> Self {
        Self::new()
    }
}

impl ConditionTranslator {
    pub fn new() -> Self {
        // Keys are folded once here so lookups only lower-case the input
        let conditions = CONDITIONS
            .iter()
            .map(|(phrase, canonical)| (phrase.to_lowercase(), *canonical))
            .collect();
        let bearings = BEARINGS.iter().copied().collect();

        Self {
            conditions,
            bearings,
        }
    }

    /// Case-insensitive; returns `phrase` as given on a miss.
    pub fn translate_condition(&self, phrase: &str) -> String {
        self.conditions
            .get(&phrase.to_lowercase())
            .map(|canonical| canonical.to_string())
            .unwrap_or_else(|| phrase.to_string())
    }

    /// Exact match only.
    pub fn translate_wind_bearing(&self, code: &str) -> String {
        self.bearings
            .get(code)
            .map(|canonical| canonical.to_string())
            .unwrap_or_else(|| code.to_string())
    }
}
