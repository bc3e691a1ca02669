//! Client for PCF7931 LF transponders accessed through a command/response
//! reader device.
//!
//! The reader device executes the low-level RF work on behalf of this
//! client; the crate owns the tag access configuration (password, timing
//! offsets, initialization delay), validates and encodes write parameters
//! into the fixed buffer the device command expects, and drives the
//! command/response exchange with bounded timeouts and a cancellable
//! continuous reader mode.
//!
//! # Features
//!
//! - `serial` - Serial port command link for desktop using serialport crate
//! - `cli` - The `pcf7931` command-line binary (implies `serial`)
//!
//! # Example
//!
//! ```ignore
//! use pcf7931::{Pcf7931, SerialLink};
//!
//! let link = SerialLink::new("/dev/ttyACM0", 115_200)?;
//! let mut tag = Pcf7931::new(link);
//!
//! tag.read()?;
//! tag.write(2, 1, 0xFF)?;
//! ```

mod config;
mod reader;
mod transport;
mod types;

#[cfg(feature = "serial")]
mod serial;

// Re-exports
pub use config::{ConfigSnapshot, ConfigUpdate, DEFAULT_INIT_DELAY, PASSWORD_LEN, TagConfig};
pub use reader::Pcf7931;
pub use transport::ReaderLink;
pub use types::Pcf7931Error;

#[cfg(feature = "serial")]
pub use serial::SerialLink;
