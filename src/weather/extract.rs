//! Pattern-driven field extraction.
//!
//! A missing field is `None`, not an error. The only failure here is a
//! pattern that does not compile, which surfaces when the rule set is built.

use regex::{Regex, RegexBuilder};

use super::reading::{Field, PressureUnit};

/// Returns capture group 1 of the first match of `pattern` in `text`.
pub fn extract_from_text(
    pattern: &str,
    text: &str,
    case_insensitive: bool,
) -> Result<Option<String>, regex::Error> {
    let regex = compile(pattern, case_insensitive)?;
    Ok(capture(&regex, text, 1))
}

fn compile(pattern: &str, case_insensitive: bool) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern)
        .case_insensitive(case_insensitive)
        .build()
}

fn capture(regex: &Regex, text: &str, group: usize) -> Option<String> {
    regex
        .captures(text)
        .and_then(|caps| caps.get(group))
        .map(|m| m.as_str().trim().to_string())
}

/// A compiled extraction rule bound to the field it fills.
#[derive(Debug, Clone)]
pub struct PatternRule {
    field: Field,
    regex: Regex,
    group: usize,
}

impl PatternRule {
    pub fn new(
        field: Field,
        pattern: &str,
        group: usize,
        case_insensitive: bool,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            field,
            regex: compile(pattern, case_insensitive)?,
            group,
        })
    }

    pub fn field(&self) -> Field {
        self.field
    }

    pub fn extract(&self, text: &str) -> Option<String> {
        capture(&self.regex, text, self.group)
    }
}

/// The fixed rule set run against an entry description.
#[derive(Debug, Clone)]
pub struct FieldRules {
    rules: Vec<PatternRule>,
}

impl FieldRules {
    /// Rules for the ARSO description grammar, e.g.
    /// `Piha severno (S): 3 m/s, Vidnost: 10 km, Zračni tlak: 1015 mbar`.
    pub fn standard(pressure_unit: PressureUnit) -> Result<Self, regex::Error> {
        let pressure = format!(
            r"Zračni tlak:\s*(\d+)\s*{}",
            regex::escape(pressure_unit.symbol())
        );

        let rules = vec![
            PatternRule::new(Field::WindBearing, r"Piha\s[^(]*\((\w+)\):", 1, true)?,
            PatternRule::new(
                Field::WindSpeed,
                r"Piha\s[^(]*\(\w+\):\s*(\d+)\s*m/s",
                1,
                true,
            )?,
            PatternRule::new(Field::Visibility, r"Vidnost:\s*(\d+)\s*km", 1, true)?,
            PatternRule::new(Field::Pressure, &pressure, 1, true)?,
            PatternRule::new(
                Field::DewPoint,
                r"Temperatura rosišča:\s*(-?\d+)\s*°C",
                1,
                true,
            )?,
            PatternRule::new(Field::Humidity, r"Vlažnost zraka:\s*(\d+)\s*%", 1, true)?,
        ];

        Ok(Self { rules })
    }

    /// Runs every rule independently; one miss never affects another field.
    pub fn extract_all<'a>(
        &'a self,
        text: &'a str,
    ) -> impl Iterator<Item = (Field, Option<String>)> + 'a {
        self.rules.iter().map(move |rule| (rule.field(), rule.extract(text)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DESCRIPTION: &str = "Piha severno (S): 3 m/s, Vidnost: 10 km, Zračni tlak: 1015 mbar, \
        Temperatura rosišča: 9°C, Vlažnost zraka: 60%";

    fn extracted(rules: &FieldRules, text: &str, field: Field) -> Option<String> {
        rules
            .extract_all(text)
            .find(|(f, _)| *f == field)
            .and_then(|(_, v)| v)
    }

    #[test]
    fn test_extract_from_text_returns_first_group() {
        let value = extract_from_text(r"Vidnost:\s*(\d+)\s*km", DESCRIPTION, true).unwrap();
        assert_eq!(value.as_deref(), Some("10"));
    }

    #[test]
    fn test_extract_from_text_absent_is_none() {
        let value = extract_from_text(r"Sneg:\s*(\d+)\s*cm", DESCRIPTION, true).unwrap();
        assert_eq!(value, None);
    }

    #[test]
    fn test_extract_from_text_ignores_case_by_default_flag() {
        let text = "VIDNOST: 25 KM";
        assert_eq!(
            extract_from_text(r"Vidnost:\s*(\d+)\s*km", text, true)
                .unwrap()
                .as_deref(),
            Some("25")
        );
        assert_eq!(
            extract_from_text(r"Vidnost:\s*(\d+)\s*km", text, false).unwrap(),
            None
        );
    }

    #[test]
    fn test_extract_from_text_invalid_pattern_is_error() {
        assert!(extract_from_text(r"(unclosed", DESCRIPTION, true).is_err());
    }

    #[test]
    fn test_pattern_rule_uses_configured_group() {
        let rule =
            PatternRule::new(Field::WindSpeed, r"Piha\s[^(]*\((\w+)\):\s*(\d+)", 2, true).unwrap();
        assert_eq!(rule.extract(DESCRIPTION).as_deref(), Some("3"));
    }

    #[test]
    fn test_standard_rules_extract_every_field() {
        let rules = FieldRules::standard(PressureUnit::Mbar).unwrap();
        assert_eq!(
            extracted(&rules, DESCRIPTION, Field::WindBearing).as_deref(),
            Some("S")
        );
        assert_eq!(
            extracted(&rules, DESCRIPTION, Field::WindSpeed).as_deref(),
            Some("3")
        );
        assert_eq!(
            extracted(&rules, DESCRIPTION, Field::Visibility).as_deref(),
            Some("10")
        );
        assert_eq!(
            extracted(&rules, DESCRIPTION, Field::Pressure).as_deref(),
            Some("1015")
        );
        assert_eq!(
            extracted(&rules, DESCRIPTION, Field::DewPoint).as_deref(),
            Some("9")
        );
        assert_eq!(
            extracted(&rules, DESCRIPTION, Field::Humidity).as_deref(),
            Some("60")
        );
    }

    #[test]
    fn test_one_missing_field_does_not_block_others() {
        let rules = FieldRules::standard(PressureUnit::Mbar).unwrap();
        let text = "Brezvetrje. Vidnost: 4 km, Vlažnost zraka: 97%";

        assert_eq!(extracted(&rules, text, Field::WindBearing), None);
        assert_eq!(extracted(&rules, text, Field::WindSpeed), None);
        assert_eq!(extracted(&rules, text, Field::Visibility).as_deref(), Some("4"));
        assert_eq!(extracted(&rules, text, Field::Humidity).as_deref(), Some("97"));
    }

    #[test]
    fn test_pressure_rule_follows_unit() {
        let hpa = FieldRules::standard(PressureUnit::Hpa).unwrap();
        let mbar = FieldRules::standard(PressureUnit::Mbar).unwrap();
        let text = "Zračni tlak: 1008 hPa";

        assert_eq!(extracted(&hpa, text, Field::Pressure).as_deref(), Some("1008"));
        assert_eq!(extracted(&mbar, text, Field::Pressure), None);
    }

    #[test]
    fn test_negative_dew_point() {
        let rules = FieldRules::standard(PressureUnit::Mbar).unwrap();
        let text = "Temperatura rosišča: -4°C";
        assert_eq!(extracted(&rules, text, Field::DewPoint).as_deref(), Some("-4"));
    }

    #[test]
    fn test_wind_rule_does_not_span_later_parentheses() {
        let rules = FieldRules::standard(PressureUnit::Mbar).unwrap();
        let text = "Piha jugozahodno (JZ): 5 m/s, Vidnost (ocena): 20 km";
        assert_eq!(extracted(&rules, text, Field::WindBearing).as_deref(), Some("JZ"));
        assert_eq!(extracted(&rules, text, Field::WindSpeed).as_deref(), Some("5"));
    }
}
