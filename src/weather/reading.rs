use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unit the feed reports air pressure in.
///
/// ARSO has published both spellings over time; the choice selects the
/// pressure pattern and the unit label in [`Attributes`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PressureUnit {
    #[default]
    #[serde(rename = "mbar")]
    Mbar,
    #[serde(rename = "hPa")]
    Hpa,
}

impl PressureUnit {
    pub fn symbol(self) -> &'static str {
        match self {
            PressureUnit::Mbar => "mbar",
            PressureUnit::Hpa => "hPa",
        }
    }
}

/// Observation fields read from the entry description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    WindBearing,
    WindSpeed,
    Visibility,
    Pressure,
    DewPoint,
    Humidity,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::WindBearing,
        Field::WindSpeed,
        Field::Visibility,
        Field::Pressure,
        Field::DewPoint,
        Field::Humidity,
    ];

    /// Attribute name exposed to the host.
    pub fn label(self) -> &'static str {
        match self {
            Field::WindBearing => "wind_bearing",
            Field::WindSpeed => "wind_speed",
            Field::Visibility => "visibility",
            Field::Pressure => "pressure",
            Field::DewPoint => "dew_point",
            Field::Humidity => "humidity",
        }
    }
}

/// One parsed observation.
///
/// Every measurement is optional: a field the feed did not mention is `None`,
/// never an error. Numeric values are kept exactly as captured.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Reading {
    pub station: Option<String>,
    pub observed_at: Option<DateTime<Utc>>,
    pub condition: Option<String>,
    pub temperature: Option<String>,
    pub wind_bearing: Option<String>,
    pub wind_speed: Option<String>,
    pub visibility: Option<String>,
    pub pressure: Option<String>,
    pub dew_point: Option<String>,
    pub humidity: Option<String>,
}

impl Reading {
    pub fn field(&self, field: Field) -> Option<&str> {
        match field {
            Field::WindBearing => self.wind_bearing.as_deref(),
            Field::WindSpeed => self.wind_speed.as_deref(),
            Field::Visibility => self.visibility.as_deref(),
            Field::Pressure => self.pressure.as_deref(),
            Field::DewPoint => self.dew_point.as_deref(),
            Field::Humidity => self.humidity.as_deref(),
        }
    }

    pub(crate) fn set_field(&mut self, field: Field, value: Option<String>) {
        let slot = match field {
            Field::WindBearing => &mut self.wind_bearing,
            Field::WindSpeed => &mut self.wind_speed,
            Field::Visibility => &mut self.visibility,
            Field::Pressure => &mut self.pressure,
            Field::DewPoint => &mut self.dew_point,
            Field::Humidity => &mut self.humidity,
        };
        *slot = value;
    }

    /// Host-facing attribute view with unit labels attached.
    pub fn attributes(&self, pressure_unit: PressureUnit) -> Attributes<'_> {
        Attributes {
            station: self.station.as_deref(),
            observed_at: self.observed_at,
            temperature: self.temperature.as_deref(),
            temperature_unit: "°C",
            wind_bearing: self.wind_bearing.as_deref(),
            wind_speed: self.wind_speed.as_deref(),
            wind_speed_unit: "m/s",
            visibility: self.visibility.as_deref(),
            visibility_unit: "km",
            pressure: self.pressure.as_deref(),
            pressure_unit: pressure_unit.symbol(),
            dew_point: self.dew_point.as_deref(),
            humidity: self.humidity.as_deref(),
            humidity_unit: "%",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attributes<'a> {
    pub station: Option<&'a str>,
    pub observed_at: Option<DateTime<Utc>>,
    pub temperature: Option<&'a str>,
    pub temperature_unit: &'static str,
    pub wind_bearing: Option<&'a str>,
    pub wind_speed: Option<&'a str>,
    pub wind_speed_unit: &'static str,
    pub visibility: Option<&'a str>,
    pub visibility_unit: &'static str,
    pub pressure: Option<&'a str>,
    pub pressure_unit: &'static str,
    pub dew_point: Option<&'a str>,
    pub humidity: Option<&'a str>,
    pub humidity_unit: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_field_round_trips_through_accessor() {
        let mut reading = Reading::default();
        for field in Field::ALL {
            reading.set_field(field, Some(field.label().to_string()));
        }
        for field in Field::ALL {
            assert_eq!(reading.field(field), Some(field.label()));
        }
    }

    #[test]
    fn test_attributes_carry_units() {
        let reading = Reading {
            temperature: Some("18".into()),
            pressure: Some("1015".into()),
            ..Default::default()
        };

        let attrs = reading.attributes(PressureUnit::Hpa);
        assert_eq!(attrs.temperature, Some("18"));
        assert_eq!(attrs.temperature_unit, "°C");
        assert_eq!(attrs.pressure_unit, "hPa");
        assert_eq!(attrs.humidity, None);
    }

    #[test]
    fn test_pressure_unit_deserializes_from_symbol() {
        #[derive(Deserialize)]
        struct Wrapper {
            unit: PressureUnit,
        }

        let w: Wrapper = toml::from_str("unit = \"hPa\"").unwrap();
        assert_eq!(w.unit, PressureUnit::Hpa);
        let w: Wrapper = toml::from_str("unit = \"mbar\"").unwrap();
        assert_eq!(w.unit, PressureUnit::Mbar);
    }
}
