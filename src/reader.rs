use log::{debug, info, warn};

use crate::config::{ConfigSnapshot, ConfigUpdate, TagConfig};
use crate::transport::ReaderLink;
use crate::types::Pcf7931Error;

/// Driver for a PCF7931 transponder behind a reader device.
///
/// The driver owns one [`TagConfig`] for the lifetime of the session; the
/// configuration is transmitted alongside every write command and is never
/// persisted.
pub struct Pcf7931<L: ReaderLink> {
    link: L,
    config: TagConfig,
}

impl<L: ReaderLink> Pcf7931<L> {
    // Reader-device command identifiers
    const CMD_READ_TAG: u16 = 0x0208;
    const CMD_WRITE_TAG: u16 = 0x0209;

    /// Deadline for a single read acknowledgment
    const READ_TIMEOUT_MS: u32 = 2500;

    /// Create a new driver instance with the given link and default
    /// configuration
    pub fn new(link: L) -> Self {
        Self {
            link,
            config: TagConfig::default(),
        }
    }

    /// Create a driver with a previously captured configuration
    pub fn with_config(link: L, config: TagConfig) -> Self {
        Self { link, config }
    }

    /// Current tag access configuration
    pub fn config(&self) -> &TagConfig {
        &self.config
    }

    /// Snapshot of the current configuration for display
    pub fn describe_config(&self) -> ConfigSnapshot {
        self.config.describe()
    }

    /// Restore the configuration defaults
    pub fn reset_config(&mut self) {
        self.config.reset();
        info!("configuration reset");
    }

    /// Apply the present fields of `update` to the session configuration
    pub fn update_config(&mut self, update: &ConfigUpdate) -> Result<(), Pcf7931Error> {
        self.config.update(update)
    }

    /// Issue one read command and wait for the device acknowledgment.
    pub fn read(&mut self) -> Result<(), Pcf7931Error> {
        self.link
            .clear_pending()
            .map_err(|e| Pcf7931Error::Link(format!("{:?}", e)))?;
        debug!("sending read command");
        self.link
            .send_command(Self::CMD_READ_TAG, [0; 3], &[])
            .map_err(|e| Pcf7931Error::Link(format!("{:?}", e)))?;

        let acked = self
            .link
            .wait_ack(Self::READ_TIMEOUT_MS)
            .map_err(|e| Pcf7931Error::Link(format!("{:?}", e)))?;
        if acked {
            Ok(())
        } else {
            warn!("command execution time out");
            Err(Pcf7931Error::TimedOut)
        }
    }

    /// Repeat read commands until `cancelled` reports true.
    ///
    /// Cancellation is observed once per iteration after a successful
    /// acknowledgment, never during an in-flight wait. The first timeout
    /// aborts the whole loop — a link or antenna problem surfaces
    /// immediately instead of being masked by retries.
    ///
    /// Returns the number of completed reads.
    pub fn read_continuous<F>(&mut self, mut cancelled: F) -> Result<usize, Pcf7931Error>
    where
        F: FnMut() -> bool,
    {
        let mut count = 0;
        loop {
            self.read()?;
            count += 1;
            if cancelled() {
                debug!("reader loop cancelled after {} reads", count);
                return Ok(count);
            }
        }
    }

    /// Write one data byte at `index` of `block`, transmitting the current
    /// configuration alongside the write target.
    ///
    /// The call returns once the command is queued on the link; write
    /// completion is not acknowledged beyond the transport layer.
    pub fn write(&mut self, block: u8, index: u8, data: u8) -> Result<(), Pcf7931Error> {
        if block > 7 {
            return Err(Pcf7931Error::InvalidArgument(
                "block must be between 0-7".into(),
            ));
        }
        if index > 15 {
            return Err(Pcf7931Error::InvalidArgument(
                "index must be between 0-15".into(),
            ));
        }

        info!(
            "writing block {} at idx {} with data 0x{:02X}",
            block, index, data
        );

        let words = self.config.encode_write_params();
        let mut payload = Vec::with_capacity(words.len() * 4);
        for word in words {
            payload.extend_from_slice(&word.to_le_bytes());
        }

        self.link
            .clear_pending()
            .map_err(|e| Pcf7931Error::Link(format!("{:?}", e)))?;
        self.link
            .send_command(
                Self::CMD_WRITE_TAG,
                [block as u32, index as u32, data as u32],
                &payload,
            )
            .map_err(|e| Pcf7931Error::Link(format!("{:?}", e)))
    }
}
