use crate::domain::sentence::SentenceId;
use clap::builder::PossibleValue;
use clap::{Parser, ValueEnum};

/// Command line arguments for gpsread
#[derive(Parser, Debug)]
#[command(
    name = "gpsread",
    version = env!("CARGO_PKG_VERSION"),
    about = "Print NMEA sentences from a serial GPS receiver",
    long_about = "Reads NMEA-0183 sentences from a GPS receiver over a serial port and prints them to stdout, optionally only those with a given sentence id."
)]
pub struct Args {
    /// The NMEA sentence id to print. If not specified, defaults to all sentences
    #[arg(long = "sentence-id", alias = "sentence_id", value_enum)]
    pub sentence_id: Option<SentenceId>,

    /// Serial device path (overrides the config file and platform default)
    #[arg(short, long)]
    pub port: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress logging
    #[arg(short, long)]
    pub quiet: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<String>,
}

impl ValueEnum for SentenceId {
    fn value_variants<'a>() -> &'a [Self] {
        &SentenceId::ALL
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(PossibleValue::new(self.as_str()).help(self.description()))
    }
}
