//! Latest-observation sensor for the ARSO weather feed.
//!
//! A [`ReadingPublisher`] fetches the observation RSS, parses the first entry
//! into a [`Reading`] and keeps it published until the next successful cycle.
//!
//! ```ignore
//! use arso_weather::{ReadingParser, ReadingPublisher, PressureUnit};
//!
//! let parser = ReadingParser::new(PressureUnit::Mbar)?;
//! let publisher = ReadingPublisher::new("ARSO", url, reqwest::Client::new(), parser);
//! publisher.refresh().await;
//! println!("{:?}", publisher.state());
//! ```

pub mod config;
pub mod feed;
pub mod publisher;
pub mod weather;

pub use config::{Config, ConfigError};
pub use publisher::{ReadingPublisher, RefreshError, RefreshOutcome};
pub use weather::{PressureUnit, Reading, ReadingParser};
