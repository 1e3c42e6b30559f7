//! Observation parsing: from one feed entry to a normalized [`Reading`].
//!
//! - [`extract`] - pattern rules that pull single fields out of free text
//! - [`translate`] - Slovene condition/bearing vocabulary to canonical terms
//! - [`parser`] - title grammar plus rule set, producing a `Reading`
//! - [`reading`] - the `Reading` snapshot and its host-facing attributes

mod extract;
mod parser;
mod reading;
mod translate;

pub use extract::{extract_from_text, FieldRules, PatternRule};
pub use parser::{EntryError, ReadingParser};
pub use reading::{Attributes, Field, PressureUnit, Reading};
pub use translate::ConditionTranslator;
