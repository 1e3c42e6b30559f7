//! Feed retrieval for the observation RSS.
//!
//! - [`fetcher`] - single-attempt HTTP download with size and completeness checks
//! - [`parser`] - document parsing using the `feed-rs` crate
//!
//! # Example
//!
//! ```ignore
//! use arso_weather::feed::{fetch_feed, parse_document};
//!
//! let bytes = fetch_feed(&client, url).await?;
//! let entries = parse_document(&bytes)?;
//! ```

mod fetcher;
mod parser;

pub use fetcher::{fetch_feed, FetchError};
pub use parser::{parse_document, FeedEntry, FeedError};
