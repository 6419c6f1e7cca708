//! NMEA-0183 sentence vocabulary.
//!
//! Only syntactic recognition lives here: a line is a sentence when it starts
//! with `$`, and a filter compares the first comma-separated field against
//! `$` + talker id + sentence id. Fields are never decoded.

use std::fmt;

/// Talker id of the GPS receiver.
pub const TALKER_ID: &str = "GP";

/// Leading character of every NMEA sentence.
pub const SENTENCE_START: char = '$';

/// Sentence ids accepted as a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SentenceId {
    Bod,
    Bwc,
    Gga,
    Gll,
    Gsa,
    Gsv,
    Hdt,
    R00,
    Rma,
    Rmb,
    Rmc,
    Rte,
    Trf,
    Stn,
    Vbw,
    Vtg,
    Wpl,
    Xte,
    Zda,
}

impl SentenceId {
    pub const ALL: [SentenceId; 19] = [
        SentenceId::Bod,
        SentenceId::Bwc,
        SentenceId::Gga,
        SentenceId::Gll,
        SentenceId::Gsa,
        SentenceId::Gsv,
        SentenceId::Hdt,
        SentenceId::R00,
        SentenceId::Rma,
        SentenceId::Rmb,
        SentenceId::Rmc,
        SentenceId::Rte,
        SentenceId::Trf,
        SentenceId::Stn,
        SentenceId::Vbw,
        SentenceId::Vtg,
        SentenceId::Wpl,
        SentenceId::Xte,
        SentenceId::Zda,
    ];

    /// Three-letter code as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            SentenceId::Bod => "BOD",
            SentenceId::Bwc => "BWC",
            SentenceId::Gga => "GGA",
            SentenceId::Gll => "GLL",
            SentenceId::Gsa => "GSA",
            SentenceId::Gsv => "GSV",
            SentenceId::Hdt => "HDT",
            SentenceId::R00 => "R00",
            SentenceId::Rma => "RMA",
            SentenceId::Rmb => "RMB",
            SentenceId::Rmc => "RMC",
            SentenceId::Rte => "RTE",
            SentenceId::Trf => "TRF",
            SentenceId::Stn => "STN",
            SentenceId::Vbw => "VBW",
            SentenceId::Vtg => "VTG",
            SentenceId::Wpl => "WPL",
            SentenceId::Xte => "XTE",
            SentenceId::Zda => "ZDA",
        }
    }

    /// One-line meaning, shown next to the id in `--help`.
    pub fn description(&self) -> &'static str {
        match self {
            SentenceId::Bod => "Bearing, origin to destination",
            SentenceId::Bwc => "Bearing and distance to waypoint, great circle",
            SentenceId::Gga => "Global Positioning System Fix Data",
            SentenceId::Gll => "Geographic position, latitude / longitude",
            SentenceId::Gsa => "GPS DOP and active satellites",
            SentenceId::Gsv => "GPS Satellites in view",
            SentenceId::Hdt => "Heading, True",
            SentenceId::R00 => "List of waypoints in currently active route",
            SentenceId::Rma => "Recommended minimum specific Loran-C data",
            SentenceId::Rmb => "Recommended minimum navigation info",
            SentenceId::Rmc => "Recommended minimum specific GPS/Transit data",
            SentenceId::Rte => "Routes",
            SentenceId::Trf => "Transit Fix Data",
            SentenceId::Stn => "Multiple Data ID",
            SentenceId::Vbw => "Dual Ground / Water Speed",
            SentenceId::Vtg => "Track made good and ground speed",
            SentenceId::Wpl => "Waypoint location",
            SentenceId::Xte => "Cross-track error, Measured",
            SentenceId::Zda => "Date & Time",
        }
    }
}

impl fmt::Display for SentenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns true when `line` looks like an NMEA sentence.
pub fn is_nmea_sentence(line: &str) -> bool {
    line.starts_with(SENTENCE_START)
}

/// Talker/sentence-id filter applied to recognised sentences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentenceFilter {
    expected_prefix: Option<String>,
}

impl SentenceFilter {
    pub fn new(sentence_id: Option<SentenceId>) -> Self {
        Self {
            expected_prefix: sentence_id
                .map(|id| format!("{}{}{}", SENTENCE_START, TALKER_ID, id.as_str())),
        }
    }

    /// Expected first field, e.g. `$GPGGA`.
    pub fn expected_prefix(&self) -> Option<&str> {
        self.expected_prefix.as_deref()
    }

    /// Compares the first comma-separated field of `sentence` with the
    /// expected prefix. Callers are expected to have classified the line.
    pub fn matches(&self, sentence: &str) -> bool {
        match &self.expected_prefix {
            None => true,
            Some(prefix) => sentence.split(',').next() == Some(prefix.as_str()),
        }
    }
}
