//! gpsread Library
//!
//! Reads NMEA-0183 sentences from a serial GPS receiver and passes through
//! the ones matching an optional sentence-id filter.

pub mod cli;
pub mod core;
pub mod domain;
pub mod infrastructure;

pub use crate::core::{LineOutcome, SentenceSink, SentenceStream, StreamStats};
pub use domain::config::{GpsReadConfig, SerialSettings};
pub use domain::error::{GpsReadError, GpsReadResult};
pub use domain::sentence::{is_nmea_sentence, SentenceFilter, SentenceId, TALKER_ID};
pub use infrastructure::serial::SerialSession;
