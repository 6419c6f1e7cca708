// Domain module - Errors, configuration model and NMEA vocabulary
pub mod config;
pub mod error;
pub mod sentence;
