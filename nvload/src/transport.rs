// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Serial transport layer for bootloader communication.

use std::io::Read;
use std::io::Write;
use std::time::Duration;

use anyhow::{Context, Result};
use serialport::SerialPort;

use nvload_common::handshake::{LineTransport, SessionConfig};

/// UART transport to the NEORV32 bootloader.
///
/// Received bytes are accumulated into lines. The port is released by
/// drop on every exit path of the run.
pub struct SerialTransport {
    port: Box<dyn SerialPort>,
    rx_buf: Vec<u8>,
}

impl SerialTransport {
    /// Open the serial port named in the session config.
    pub fn open(config: &SessionConfig) -> Result<Self> {
        let port = serialport::new(&config.port, config.baud)
            .timeout(config.timeout)
            .open()
            .with_context(|| format!("Failed to open serial port {}", config.port))?;

        Ok(Self {
            port,
            rx_buf: Vec::with_capacity(256),
        })
    }
}

impl LineTransport for SerialTransport {
    fn write_bytes(&mut self, data: &[u8]) -> std::io::Result<()> {
        self.port.write_all(data)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.port.flush()
    }

    /// Read one line, blocking up to the port timeout per byte.
    ///
    /// `None` means the timeout expired with nothing buffered. A
    /// timeout with bytes already buffered yields them as a partial
    /// line, matching blocking `readline` semantics on a serial port.
    fn read_line(&mut self) -> std::io::Result<Option<String>> {
        self.rx_buf.clear();
        let mut byte = [0u8; 1];

        loop {
            match self.port.read(&mut byte) {
                Ok(1) => {
                    if byte[0] == b'\n' {
                        break;
                    }
                    if byte[0] != b'\r' {
                        self.rx_buf.push(byte[0]);
                    }
                }
                Ok(_) => continue,
                Err(e) if e.kind() == std::io::ErrorKind::TimedOut => {
                    if self.rx_buf.is_empty() {
                        return Ok(None);
                    }
                    break;
                }
                Err(e) => return Err(e),
            }
        }

        Ok(Some(String::from_utf8_lossy(&self.rx_buf).into_owned()))
    }
}
