use std::io;

/// Output formatting errors
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

impl From<OutputError> for crate::domain::error::GpsReadError {
    fn from(err: OutputError) -> Self {
        Self::Output(err.to_string())
    }
}

/// Destination of emitted sentences and loop diagnostics.
///
/// Implementations must make each sentence visible to downstream readers as
/// soon as `write_sentence` returns.
pub trait SentenceSink {
    fn write_sentence(&mut self, sentence: &str) -> Result<(), OutputError>;
    fn write_diagnostic(&mut self, message: &str) -> Result<(), OutputError>;
}

impl<S: SentenceSink + ?Sized> SentenceSink for &mut S {
    fn write_sentence(&mut self, sentence: &str) -> Result<(), OutputError> {
        (**self).write_sentence(sentence)
    }

    fn write_diagnostic(&mut self, message: &str) -> Result<(), OutputError> {
        (**self).write_diagnostic(message)
    }
}

/// Collects everything in memory.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    pub sentences: Vec<String>,
    pub diagnostics: Vec<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SentenceSink for MemorySink {
    fn write_sentence(&mut self, sentence: &str) -> Result<(), OutputError> {
        self.sentences.push(sentence.to_string());
        Ok(())
    }

    fn write_diagnostic(&mut self, message: &str) -> Result<(), OutputError> {
        self.diagnostics.push(message.to_string());
        Ok(())
    }
}
