// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Upload handshake driver - protocol logic without serial dependencies.
//!
//! The driver speaks to the target through the [`LineTransport`] trait
//! so it can be tested against a scripted transport. A session walks
//! through four phases: request upload mode, wait for the readiness
//! prompt, transmit the image, wait for the acknowledgment, plus an
//! optional monitor phase that mirrors device output after a
//! successful upload.

use std::io;
use std::time::Duration;

use log::debug;

use crate::protocol;

/// Default serial baud rate of the NEORV32 bootloader UART.
pub const DEFAULT_BAUD: u32 = 19_200;

/// Default per-line read timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 3;

/// Immutable per-run session configuration.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// Serial port name as understood by the host OS.
    pub port: String,
    /// Serial baud rate.
    pub baud: u32,
    /// Per-line read timeout.
    pub timeout: Duration,
    /// Echo every received line while waiting for prompts.
    pub verbose: bool,
    /// Keep reading and printing device output after a successful upload.
    pub keep_open: bool,
}

impl SessionConfig {
    pub fn new(port: impl Into<String>) -> Self {
        Self {
            port: port.into(),
            baud: DEFAULT_BAUD,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            verbose: false,
            keep_open: false,
        }
    }
}

/// Phase of an upload session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    AwaitingReady,
    Uploading,
    AwaitingAck,
    Monitoring,
    Done,
    Failed,
}

/// Terminal errors of an upload run.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    /// The readiness wait ended without the upload prompt. No payload
    /// bytes were sent.
    #[error("device did not signal upload readiness")]
    DeviceNotReady,
    /// The acknowledgment wait ended without an "OK" line. The payload
    /// was fully transmitted and flushed; only the confirmation is
    /// missing.
    #[error("upload was not acknowledged by the device")]
    UploadNotAcknowledged,
    /// Transport-level read/write failure.
    #[error("transport error: {0}")]
    Io(#[from] io::Error),
}

/// Line-oriented byte channel to the target.
///
/// `read_line` blocks for at most the transport's configured timeout
/// and returns `Ok(None)` when it expires with nothing received. A
/// genuinely empty line is `Ok(Some(""))`, which is not a timeout.
pub trait LineTransport {
    fn write_bytes(&mut self, data: &[u8]) -> io::Result<()>;
    fn flush(&mut self) -> io::Result<()>;
    fn read_line(&mut self) -> io::Result<Option<String>>;
}

/// A single upload session over a line transport.
///
/// Exactly one session exists per run. The final state is observable
/// through [`Session::state`] after [`Session::run`] returns.
pub struct Session<'a, T: LineTransport> {
    transport: &'a mut T,
    config: SessionConfig,
    state: SessionState,
}

impl<'a, T: LineTransport> Session<'a, T> {
    pub fn new(transport: &'a mut T, config: SessionConfig) -> Self {
        Self {
            transport,
            config,
            state: SessionState::Idle,
        }
    }

    /// Current phase of the session.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Drive the full handshake: mode request, readiness wait, payload
    /// transfer, acknowledgment wait, optional monitor.
    ///
    /// Returns the number of payload bytes sent. The payload is
    /// written exactly once, and only after the target confirmed
    /// readiness.
    pub fn run(&mut self, payload: &[u8]) -> Result<usize, UploadError> {
        println!("Entering upload mode (sending \"#\")");
        self.transport
            .write_bytes(&[protocol::ENTER_UPLOAD_MODE])?;

        if !self.await_ready()? {
            self.state = SessionState::Failed;
            return Err(UploadError::DeviceNotReady);
        }

        println!("Starting upload");
        let sent = self.send_payload(payload)?;
        println!("{} bytes sent", sent);

        if !self.await_ack()? {
            self.state = SessionState::Failed;
            return Err(UploadError::UploadNotAcknowledged);
        }
        println!("Upload successful");

        if self.config.keep_open {
            self.monitor()?;
        }

        self.state = SessionState::Done;
        Ok(sent)
    }

    /// Wait for the readiness prompt.
    ///
    /// A menu banner means the target reset before the mode request
    /// registered, so the request byte is re-sent. There is no retry
    /// bound: a target stuck printing its menu keeps this loop alive
    /// until it goes quiet for one timeout period.
    fn await_ready(&mut self) -> Result<bool, UploadError> {
        self.state = SessionState::AwaitingReady;
        debug!("awaiting readiness prompt \"{}\"", protocol::READY_PROMPT);

        while let Some(line) = self.transport.read_line()? {
            if self.config.verbose {
                println!("{}", line);
            }
            if protocol::is_menu_banner(&line) {
                println!("Re-sending upload command");
                self.transport
                    .write_bytes(&[protocol::ENTER_UPLOAD_MODE])?;
            }
            if protocol::is_ready_prompt(&line) {
                return Ok(true);
            }
        }

        debug!("readiness wait timed out");
        Ok(false)
    }

    /// Transmit the image as one contiguous write and flush it, so the
    /// bytes are on the wire before the acknowledgment wait starts.
    fn send_payload(&mut self, payload: &[u8]) -> Result<usize, UploadError> {
        self.state = SessionState::Uploading;
        self.transport.write_bytes(payload)?;
        self.transport.flush()?;
        Ok(payload.len())
    }

    /// Wait for the textual acknowledgment line.
    fn await_ack(&mut self) -> Result<bool, UploadError> {
        self.state = SessionState::AwaitingAck;
        debug!("awaiting acknowledgment \"{}\"", protocol::ACK_TEXT);

        while let Some(line) = self.transport.read_line()? {
            if self.config.verbose {
                println!("{}", line);
            }
            if protocol::is_ack(&line) {
                return Ok(true);
            }
        }

        debug!("acknowledgment wait timed out");
        Ok(false)
    }

    /// Print device output verbatim until the first timeout.
    fn monitor(&mut self) -> Result<(), UploadError> {
        self.state = SessionState::Monitoring;
        println!("Printing RX");

        while let Some(line) = self.transport.read_line()? {
            println!("{}", line);
        }

        println!("Closed");
        Ok(())
    }
}
