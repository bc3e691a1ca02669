//! Tag access configuration and its wire encoding

use std::fmt;

use crate::types::Pcf7931Error;

/// Length of the tag password in bytes
pub const PASSWORD_LEN: usize = 7;

/// Default tag initialization delay in microseconds
pub const DEFAULT_INIT_DELAY: u16 = 17_500;

/// Parameters used when talking to a PCF7931 transponder.
///
/// The password and timing values are handed to the reader device alongside
/// every write command; the time offsets can correct slew rate generated by
/// the antenna. One instance lives for the duration of a command session and
/// is never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagConfig {
    /// Password bytes, LSB-first as transmitted to the tag
    pub password: [u8; PASSWORD_LEN],
    /// Tag initialization delay in microseconds
    pub init_delay: u16,
    /// Offset of low pulses width in microseconds
    pub offset_width: i16,
    /// Offset of low pulses position in microseconds
    pub offset_position: i16,
}

impl Default for TagConfig {
    fn default() -> Self {
        Self {
            password: [0xFF; PASSWORD_LEN],
            init_delay: DEFAULT_INIT_DELAY,
            offset_width: 0,
            offset_position: 0,
        }
    }
}

/// Fields to change on a [`TagConfig`]; absent fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct ConfigUpdate {
    /// Replacement password; must be exactly 7 bytes
    pub password: Option<Vec<u8>>,
    /// Tag initialization delay in microseconds, truncated to 16 bits
    pub init_delay: Option<u32>,
    /// Offset of low pulses width in microseconds, truncated to 16 bits
    pub offset_width: Option<i32>,
    /// Offset of low pulses position in microseconds, truncated to 16 bits
    pub offset_position: Option<i32>,
}

impl TagConfig {
    /// Restore the documented default values.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Apply the present fields of `update`, leaving the rest unchanged.
    ///
    /// A password of the wrong length rejects the whole update: no field is
    /// applied. Numeric inputs wider than 16 bits are truncated rather than
    /// rejected, matching what the reader-device firmware does with them.
    pub fn update(&mut self, update: &ConfigUpdate) -> Result<(), Pcf7931Error> {
        if let Some(password) = &update.password {
            if password.len() != PASSWORD_LEN {
                return Err(Pcf7931Error::InvalidArgument(
                    "password must be 7 bytes".into(),
                ));
            }
        }

        if let Some(password) = &update.password {
            self.password.copy_from_slice(password);
        }
        if let Some(delay) = update.init_delay {
            self.init_delay = delay as u16;
        }
        if let Some(width) = update.offset_width {
            self.offset_width = width as i16;
        }
        if let Some(position) = update.offset_position {
            self.offset_position = position as i16;
        }
        Ok(())
    }

    /// Read-only snapshot of the current settings for display.
    pub fn describe(&self) -> ConfigSnapshot {
        ConfigSnapshot {
            password: hex::encode_upper(self.password),
            init_delay: self.init_delay,
            offset_width: self.offset_width,
            offset_position: self.offset_position,
        }
    }

    /// Encode the configuration into the fixed buffer the write command
    /// expects.
    ///
    /// Words 0-6 carry the password one byte per word, zero-extended — the
    /// device firmware reads a word array, so the bytes are not packed.
    /// Words 7 and 8 bias the signed offsets by 128 so the firmware can use
    /// unsigned arithmetic; word 9 is the initialization delay. The buffer
    /// depends only on the configuration, never on the write target.
    pub fn encode_write_params(&self) -> [u32; 10] {
        let mut words = [0u32; 10];
        for (word, byte) in words.iter_mut().zip(self.password) {
            *word = byte as u32;
        }
        words[7] = (self.offset_width as i32 + 128) as u32;
        words[8] = (self.offset_position as i32 + 128) as u32;
        words[9] = self.init_delay as u32;
        words
    }
}

/// Display snapshot of a [`TagConfig`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSnapshot {
    /// Password as uppercase hex in stored (LSB-first) order
    pub password: String,
    pub init_delay: u16,
    pub offset_width: i16,
    pub offset_position: i16,
}

impl fmt::Display for ConfigSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Password (LSB first)............ {}", self.password)?;
        writeln!(f, "Tag initialization delay........ {} us", self.init_delay)?;
        writeln!(f, "Offset, low pulses width........ {} us", self.offset_width)?;
        writeln!(f, "Offset, low pulses position..... {} us", self.offset_position)
    }
}
