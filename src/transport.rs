/// Trait for reader-device command links.
/// Implement this trait for different transports (serial port, IP bridge, etc.)
///
/// Command identifiers are opaque to the link; framing, checksums and the
/// physical connection are the implementation's concern.
pub trait ReaderLink {
    /// Error type for link operations
    type Error: std::fmt::Debug;

    /// Queue one command for the reader device
    fn send_command(&mut self, command: u16, args: [u32; 3], data: &[u8])
    -> Result<(), Self::Error>;

    /// Block until the device acknowledges the pending command or the
    /// timeout (in milliseconds) elapses. Returns `Ok(false)` on timeout.
    fn wait_ack(&mut self, timeout_ms: u32) -> Result<bool, Self::Error>;

    /// Drop stale queued responses before issuing a new command
    fn clear_pending(&mut self) -> Result<(), Self::Error>;
}
