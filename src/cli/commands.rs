use crate::cli::args::Args;
use crate::cli::output::ConsoleWriter;
use crate::core::sink::SentenceSink;
use crate::core::stream::SentenceStream;
use crate::domain::config::{GpsReadConfig, SerialSettings};
use crate::domain::error::{GpsReadError, GpsReadResult};
use crate::domain::sentence::SentenceFilter;
use crate::infrastructure::config::ConfigManager;
use crate::infrastructure::logging::init_logging;
use crate::infrastructure::serial::SerialSession;
use std::io::BufRead;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Execute CLI command
pub async fn execute_command(args: Args) -> GpsReadResult<()> {
    let config = load_config(&args)?;

    if !args.quiet {
        init_logging(&config.global.log_level, args.verbose)?;
    }

    let settings = config.serial_settings(args.port.as_deref());
    let filter = SentenceFilter::new(args.sentence_id);

    stream_sentences(settings, filter).await
}

fn load_config(args: &Args) -> GpsReadResult<GpsReadConfig> {
    match &args.config {
        Some(path) => ConfigManager::load_config_from_path(Path::new(path)),
        None => ConfigManager::new().load_config(),
    }
}

/// Open the device and stream sentences to the console until Ctrl+C or a
/// device failure.
pub async fn stream_sentences(settings: SerialSettings, filter: SentenceFilter) -> GpsReadResult<()> {
    let session = SerialSession::open(&settings)?;
    supervise(session, ConsoleWriter::new(), filter, forward_ctrl_c()).await
}

/// Relay every Ctrl+C into a channel. The channel closes if the signal
/// handler cannot be installed.
fn forward_ctrl_c() -> mpsc::UnboundedReceiver<()> {
    let (tx, rx) = mpsc::unbounded_channel();
    tokio::spawn(async move {
        loop {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Failed to listen for Ctrl+C: {}", e);
                break;
            }
            if tx.send(()).is_err() {
                break;
            }
        }
    });
    rx
}

/// Run the blocking sentence loop on a dedicated worker that owns `reader`.
///
/// The first interrupt raises the shutdown flag and waits for the worker,
/// which drops the reader (closing the device) once its current read
/// returns. A second interrupt gives up waiting and returns
/// `GpsReadError::Interrupted`.
pub async fn supervise<R, S>(
    reader: R,
    sink: S,
    filter: SentenceFilter,
    mut interrupts: mpsc::UnboundedReceiver<()>,
) -> GpsReadResult<()>
where
    R: BufRead + Send + 'static,
    S: SentenceSink + Send + 'static,
{
    let shutdown = Arc::new(AtomicBool::new(false));

    let worker_shutdown = Arc::clone(&shutdown);
    let mut worker = tokio::task::spawn_blocking(move || {
        let mut stream = SentenceStream::new(reader, sink, filter);
        stream.run(&worker_shutdown)
    });

    let mut listening = true;
    let joined = loop {
        tokio::select! {
            joined = &mut worker => break joined,
            interrupt = interrupts.recv(), if listening => match interrupt {
                Some(()) if !shutdown.load(Ordering::SeqCst) => {
                    info!("Interrupted, waiting for the serial device to close");
                    shutdown.store(true, Ordering::SeqCst);
                }
                Some(()) => {
                    warn!("Interrupted again, not waiting for the serial device");
                    return Err(GpsReadError::Interrupted);
                }
                None => listening = false,
            },
        }
    };

    joined.map_err(|e| GpsReadError::Runtime(format!("Sentence stream worker failed: {}", e)))?
}
