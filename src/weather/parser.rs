use regex::{Regex, RegexBuilder};
use thiserror::Error;

use super::extract::FieldRules;
use super::reading::{Field, PressureUnit, Reading};
use super::translate::ConditionTranslator;
use crate::feed::FeedEntry;

/// `"<STATION>: <condition phrase>, <integer>°C"`, anchored at both ends.
const TITLE_PATTERN: &str = r"^\s*([^:]+?)\s*:\s*(.+?)\s*,\s*(-?\d+)\s*°C\s*$";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EntryError {
    #[error("Feed entry has no title")]
    MissingTitle,
    #[error("Feed entry has no description")]
    MissingDescription,
}

/// Turns one feed entry into a [`Reading`].
///
/// Condition and temperature come from the title only; the description is
/// searched for everything else. A temperature appearing in the description
/// is ignored.
#[derive(Debug, Clone)]
pub struct ReadingParser {
    title: Regex,
    rules: FieldRules,
    translator: ConditionTranslator,
    pressure_unit: PressureUnit,
}

impl ReadingParser {
    pub fn new(pressure_unit: PressureUnit) -> Result<Self, regex::Error> {
        Ok(Self {
            title: RegexBuilder::new(TITLE_PATTERN)
                .case_insensitive(true)
                .build()?,
            rules: FieldRules::standard(pressure_unit)?,
            translator: ConditionTranslator::new(),
            pressure_unit,
        })
    }

    pub fn pressure_unit(&self) -> PressureUnit {
        self.pressure_unit
    }

    pub fn parse(&self, entry: &FeedEntry) -> Result<Reading, EntryError> {
        let title = entry.title.as_deref().ok_or(EntryError::MissingTitle)?;
        let description = entry
            .summary
            .as_deref()
            .ok_or(EntryError::MissingDescription)?;

        let mut reading = Reading {
            observed_at: entry.published,
            ..Default::default()
        };

        match self.title.captures(title) {
            Some(caps) => {
                reading.station = caps.get(1).map(|m| m.as_str().to_string());
                reading.condition = caps
                    .get(2)
                    .map(|m| self.translator.translate_condition(m.as_str()));
                reading.temperature = caps.get(3).map(|m| m.as_str().to_string());
            }
            None => {
                tracing::debug!(title = %title, "Title does not match observation format");
            }
        }

        for (field, value) in self.rules.extract_all(description) {
            let value = match field {
                Field::WindBearing => value.map(|code| self.translator.translate_wind_bearing(&code)),
                _ => value,
            };
            reading.set_field(field, value);
        }

        Ok(reading)
    }
}
