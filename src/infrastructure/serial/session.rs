use crate::domain::{
    config::SerialSettings,
    error::{GpsReadError, GpsReadResult},
};
use serialport::SerialPort;
use std::io::{self, BufRead, BufReader, Read};
use tracing::{debug, info};

/// Exclusive, scoped ownership of an open serial device.
///
/// The device is closed when the session is dropped, which covers normal
/// completion, early returns and error propagation alike.
pub struct SerialSession {
    port_name: String,
    reader: BufReader<Box<dyn SerialPort>>,
}

impl SerialSession {
    /// Open `settings.port` at the configured baud rate. Reads block for at
    /// most `settings.read_timeout`.
    pub fn open(settings: &SerialSettings) -> GpsReadResult<Self> {
        debug!(
            "Opening serial port {} at {} baud (timeout {:?})",
            settings.port, settings.baud_rate, settings.read_timeout
        );

        let port = serialport::new(&settings.port, settings.baud_rate)
            .timeout(settings.read_timeout)
            .open()
            .map_err(|e| GpsReadError::DeviceUnavailable {
                port: settings.port.clone(),
                source: e,
            })?;

        info!("Serial port {} opened", settings.port);

        Ok(Self {
            port_name: settings.port.clone(),
            reader: BufReader::new(port),
        })
    }
}

impl Read for SerialSession {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader.read(buf)
    }
}

impl BufRead for SerialSession {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.reader.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.reader.consume(amt)
    }
}

impl Drop for SerialSession {
    fn drop(&mut self) {
        info!("Serial port {} closed", self.port_name);
    }
}
