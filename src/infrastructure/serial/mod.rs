// Serial module - Scoped access to the receiver's serial device
pub mod session;

pub use session::SerialSession;
