use crate::core::sink::{OutputError, SentenceSink};
use std::io::{self, Write};

/// Console output writer
///
/// Sentences go to stdout verbatim, diagnostics to stderr. Both are flushed
/// per line so a pipe downstream sees each sentence as it arrives.
pub struct ConsoleWriter<O = io::Stdout, E = io::Stderr> {
    out: O,
    err: E,
}

impl ConsoleWriter {
    pub fn new() -> Self {
        Self {
            out: io::stdout(),
            err: io::stderr(),
        }
    }
}

impl Default for ConsoleWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: Write, E: Write> ConsoleWriter<O, E> {
    pub fn with_writers(out: O, err: E) -> Self {
        Self { out, err }
    }

    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }
}

impl<O: Write, E: Write> SentenceSink for ConsoleWriter<O, E> {
    fn write_sentence(&mut self, sentence: &str) -> Result<(), OutputError> {
        writeln!(self.out, "{}", sentence)?;
        self.out.flush()?;
        Ok(())
    }

    fn write_diagnostic(&mut self, message: &str) -> Result<(), OutputError> {
        writeln!(self.err, "{}", message)?;
        self.err.flush()?;
        Ok(())
    }
}
