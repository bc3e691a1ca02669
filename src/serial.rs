//! Serial port command link for desktop using serialport crate

use crate::transport::ReaderLink;
use std::time::{Duration, Instant};

/// Acknowledgment byte emitted by the reader-device firmware
const ACK: u8 = 0x06;

pub struct SerialLink {
    port: Box<dyn serialport::SerialPort>,
}

impl SerialLink {
    pub fn new(port_name: &str, baud_rate: u32) -> Result<Self, serialport::Error> {
        let port = serialport::new(port_name, baud_rate)
            .timeout(Duration::from_secs(1))
            .open()?;
        std::thread::sleep(Duration::from_millis(500));
        port.clear(serialport::ClearBuffer::Input)?;

        Ok(Self { port })
    }
}

impl ReaderLink for SerialLink {
    type Error = std::io::Error;

    fn send_command(
        &mut self,
        command: u16,
        args: [u32; 3],
        data: &[u8],
    ) -> Result<(), Self::Error> {
        let mut frame = Vec::with_capacity(16 + data.len());
        frame.extend_from_slice(&command.to_le_bytes());
        for arg in args {
            frame.extend_from_slice(&arg.to_le_bytes());
        }
        frame.extend_from_slice(&(data.len() as u16).to_le_bytes());
        frame.extend_from_slice(data);

        std::io::Write::write_all(&mut self.port, &frame)?;
        std::io::Write::flush(&mut self.port)
    }

    fn wait_ack(&mut self, timeout_ms: u32) -> Result<bool, Self::Error> {
        self.port
            .set_timeout(Duration::from_millis(timeout_ms as u64))
            .map_err(|e| std::io::Error::other(e))?;

        let deadline = Instant::now() + Duration::from_millis(timeout_ms as u64);
        let mut byte = [0u8; 1];
        loop {
            match std::io::Read::read(&mut self.port, &mut byte) {
                Ok(n) if n > 0 && byte[0] == ACK => return Ok(true),
                Ok(_) => {}
                Err(e) if e.kind() == std::io::ErrorKind::TimedOut => return Ok(false),
                Err(e) => return Err(e),
            }
            if Instant::now() >= deadline {
                return Ok(false);
            }
        }
    }

    fn clear_pending(&mut self) -> Result<(), Self::Error> {
        self.port
            .clear(serialport::ClearBuffer::Input)
            .map_err(|e| std::io::Error::other(e))
    }
}
