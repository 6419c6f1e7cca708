//! The read, decode, classify, filter and emit loop.
//!
//! One iteration reads a single line from the device, decodes it as UTF-8,
//! drops anything that is not a `$`-prefixed sentence, applies the
//! sentence-id filter and writes matching sentences to the sink. Decode
//! failures produce a diagnostic and the loop carries on; read timeouts are
//! ordinary empty reads. Only hard I/O errors from the device end the loop.

use crate::core::sink::SentenceSink;
use crate::domain::error::GpsReadResult;
use crate::domain::sentence::{is_nmea_sentence, SentenceFilter};
use std::io::{BufRead, ErrorKind, Read};
use std::str::Utf8Error;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, trace};

/// Diagnostic written for every line that is not valid UTF-8.
pub const DECODE_FAILURE_MESSAGE: &str = "Could not read serial port. Retrying...";

/// Longest chunk read in one iteration. NMEA caps sentences at 82
/// characters; anything longer than this is split across iterations.
pub const MAX_LINE_BYTES: u64 = 1024;

/// What happened to the line read in one iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    /// Sentence passed the filter and was written out
    Emitted,
    /// Sentence did not match the sentence-id filter
    Filtered,
    /// Empty read, partial noise or any line not starting with `$`
    NotSentence,
    /// Bytes were not valid UTF-8; a diagnostic was written
    DecodeFailed,
}

/// Counters kept for the lifetime of a stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamStats {
    pub reads: u64,
    pub emitted: u64,
    pub filtered: u64,
    pub not_sentence: u64,
    pub decode_failures: u64,
}

impl StreamStats {
    fn record(&mut self, outcome: LineOutcome) {
        self.reads += 1;
        match outcome {
            LineOutcome::Emitted => self.emitted += 1,
            LineOutcome::Filtered => self.filtered += 1,
            LineOutcome::NotSentence => self.not_sentence += 1,
            LineOutcome::DecodeFailed => self.decode_failures += 1,
        }
    }
}

/// Decode raw bytes and strip one trailing `\n`. A `\r` before it is part
/// of the sentence text and is kept.
pub fn decode_line(raw: &[u8]) -> Result<&str, Utf8Error> {
    let text = std::str::from_utf8(raw)?;
    Ok(text.strip_suffix('\n').unwrap_or(text))
}

/// Sentence stream over any buffered byte source.
pub struct SentenceStream<R, S> {
    reader: R,
    sink: S,
    filter: SentenceFilter,
    buf: Vec<u8>,
    stats: StreamStats,
}

impl<R: BufRead, S: SentenceSink> SentenceStream<R, S> {
    pub fn new(reader: R, sink: S, filter: SentenceFilter) -> Self {
        Self {
            reader,
            sink,
            filter,
            buf: Vec::with_capacity(128),
            stats: StreamStats::default(),
        }
    }

    pub fn stats(&self) -> &StreamStats {
        &self.stats
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_parts(self) -> (R, S) {
        (self.reader, self.sink)
    }

    /// Read up to and including the next `\n`, at most `MAX_LINE_BYTES`. A
    /// timeout or EOF leaves whatever arrived so far, possibly nothing, in
    /// the buffer.
    fn read_raw_line(&mut self) -> GpsReadResult<()> {
        self.buf.clear();
        let mut line = Read::take(&mut self.reader, MAX_LINE_BYTES);
        match line.read_until(b'\n', &mut self.buf) {
            Ok(_) => Ok(()),
            Err(e) if matches!(e.kind(), ErrorKind::TimedOut | ErrorKind::WouldBlock) => {
                trace!("Read timed out with {} bytes pending", self.buf.len());
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Run a single iteration.
    pub fn step(&mut self) -> GpsReadResult<LineOutcome> {
        self.read_raw_line()?;

        let outcome = match decode_line(&self.buf) {
            Err(e) => {
                debug!("Discarding {} undecodable bytes: {}", self.buf.len(), e);
                self.sink.write_diagnostic(DECODE_FAILURE_MESSAGE)?;
                LineOutcome::DecodeFailed
            }
            Ok(line) if !is_nmea_sentence(line) => LineOutcome::NotSentence,
            Ok(line) if self.filter.matches(line) => {
                self.sink.write_sentence(line)?;
                LineOutcome::Emitted
            }
            Ok(_) => LineOutcome::Filtered,
        };

        self.stats.record(outcome);
        Ok(outcome)
    }

    /// Loop until `shutdown` is raised or the reader fails.
    ///
    /// The flag is checked between iterations, so a blocked read delays
    /// shutdown by at most the device read timeout.
    pub fn run(&mut self, shutdown: &AtomicBool) -> GpsReadResult<()> {
        match self.filter.expected_prefix() {
            Some(prefix) => info!("Streaming {} sentences", prefix),
            None => info!("Streaming all sentences"),
        }

        let result = loop {
            if shutdown.load(Ordering::SeqCst) {
                break Ok(());
            }
            if let Err(e) = self.step() {
                break Err(e);
            }
        };

        info!(
            reads = self.stats.reads,
            emitted = self.stats.emitted,
            filtered = self.stats.filtered,
            not_sentence = self.stats.not_sentence,
            decode_failures = self.stats.decode_failures,
            "Sentence stream stopped"
        );

        result
    }
}
