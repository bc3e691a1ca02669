//! Error types for transponder operations

use thiserror::Error;

/// Errors that can occur while driving a PCF7931 transponder
#[derive(Debug, Error)]
pub enum Pcf7931Error {
    /// Command link error (serial port, bridge, etc.)
    #[error("link error: {0}")]
    Link(String),
    /// Rejected before anything was sent to the reader device
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// The reader device did not acknowledge within the deadline
    #[error("command execution time out")]
    TimedOut,
}
