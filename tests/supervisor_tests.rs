use gpsread::cli::supervise;
use gpsread::core::MemorySink;
use gpsread::{GpsReadError, SentenceFilter, SentenceId};
use std::collections::VecDeque;
use std::io::{self, BufReader, Read};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Serial-port stand-in that records when it is dropped. Once the script
/// runs out it keeps timing out, stalling each read while `hold` is set.
struct TrackedPort {
    chunks: VecDeque<io::Result<Vec<u8>>>,
    dropped: Arc<AtomicBool>,
    hold: Arc<AtomicBool>,
}

impl Read for TrackedPort {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.chunks.pop_front() {
            Some(Ok(bytes)) => {
                buf[..bytes.len()].copy_from_slice(&bytes);
                Ok(bytes.len())
            }
            Some(Err(e)) => Err(e),
            None => {
                std::thread::sleep(Duration::from_millis(1));
                while self.hold.load(Ordering::SeqCst) {
                    std::thread::sleep(Duration::from_millis(5));
                }
                Err(io::Error::new(io::ErrorKind::TimedOut, "Operation timed out"))
            }
        }
    }
}

impl Drop for TrackedPort {
    fn drop(&mut self) {
        self.dropped.store(true, Ordering::SeqCst);
    }
}

struct Fixture {
    dropped: Arc<AtomicBool>,
    hold: Arc<AtomicBool>,
}

impl Fixture {
    fn new(hold: bool) -> Self {
        Self {
            dropped: Arc::new(AtomicBool::new(false)),
            hold: Arc::new(AtomicBool::new(hold)),
        }
    }

    fn port(&self, chunks: Vec<io::Result<Vec<u8>>>) -> BufReader<TrackedPort> {
        BufReader::new(TrackedPort {
            chunks: chunks.into(),
            dropped: Arc::clone(&self.dropped),
            hold: Arc::clone(&self.hold),
        })
    }

    fn is_dropped(&self) -> bool {
        self.dropped.load(Ordering::SeqCst)
    }
}

/// Session release tests
#[cfg(test)]
mod supervisor_tests {
    use super::*;

    #[tokio::test]
    async fn test_device_released_after_read_failure() {
        let fixture = Fixture::new(false);
        let port = fixture.port(vec![
            Ok(b"$GPGGA,1\n".to_vec()),
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "device unplugged")),
        ]);
        let (_tx, rx) = mpsc::unbounded_channel();

        let result = supervise(port, MemorySink::new(), SentenceFilter::new(None), rx).await;

        assert!(matches!(result, Err(GpsReadError::Io(_))));
        assert!(fixture.is_dropped());
    }

    #[tokio::test]
    async fn test_device_released_after_interrupt() {
        let fixture = Fixture::new(false);
        let port = fixture.port(vec![Ok(b"$GPRMC,1\n".to_vec())]);
        let (tx, rx) = mpsc::unbounded_channel();
        tx.send(()).unwrap();

        let result = supervise(
            port,
            MemorySink::new(),
            SentenceFilter::new(Some(SentenceId::Rmc)),
            rx,
        )
        .await;

        assert!(result.is_ok());
        assert!(fixture.is_dropped());
    }

    #[tokio::test]
    async fn test_closed_interrupt_channel_keeps_streaming() {
        let fixture = Fixture::new(false);
        let port = fixture.port(vec![
            Ok(b"$GPGGA,1\n".to_vec()),
            Err(io::Error::new(io::ErrorKind::Other, "device reset")),
        ]);
        let (tx, rx) = mpsc::unbounded_channel::<()>();
        drop(tx);

        let result = supervise(port, MemorySink::new(), SentenceFilter::new(None), rx).await;

        assert!(matches!(result, Err(GpsReadError::Io(_))));
        assert!(fixture.is_dropped());
    }

    #[tokio::test]
    async fn test_second_interrupt_stops_waiting() {
        let fixture = Fixture::new(true);
        let port = fixture.port(Vec::new());
        let (tx, rx) = mpsc::unbounded_channel();
        tx.send(()).unwrap();
        tx.send(()).unwrap();

        let result = supervise(port, MemorySink::new(), SentenceFilter::new(None), rx).await;

        assert!(matches!(result, Err(GpsReadError::Interrupted)));
        assert!(!fixture.is_dropped());

        // unblock the worker; it sees the shutdown flag and drops the port
        fixture.hold.store(false, Ordering::SeqCst);
        for _ in 0..200 {
            if fixture.is_dropped() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert!(fixture.is_dropped());
    }
}
