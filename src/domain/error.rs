use thiserror::Error;

/// gpsread unified error type
#[derive(Error, Debug)]
pub enum GpsReadError {
    #[error("Serial device '{port}' unavailable: {source}")]
    DeviceUnavailable {
        port: String,
        #[source]
        source: serialport::Error,
    },

    #[error("Serial read error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Output error: {0}")]
    Output(String),

    #[error("Interrupted again before the serial device was released")]
    Interrupted,

    #[error("Runtime error: {0}")]
    Runtime(String),
}

pub type GpsReadResult<T> = Result<T, GpsReadError>;
