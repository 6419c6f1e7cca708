// Core module - Sentence stream processing
pub mod sink;
pub mod stream;

pub use sink::{MemorySink, OutputError, SentenceSink};
pub use stream::{decode_line, LineOutcome, SentenceStream, StreamStats, DECODE_FAILURE_MESSAGE};
