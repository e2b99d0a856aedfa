// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Command-line interface definitions.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::debug;

use nvload_common::handshake::{Session, SessionConfig, DEFAULT_BAUD, DEFAULT_TIMEOUT_SECS};

use crate::transport::SerialTransport;

/// Command-line arguments.
#[derive(Parser)]
#[command(name = "nvload")]
#[command(about = "Upload an application image to the NEORV32 bootloader via UART")]
pub struct Cli {
    /// Serial/COM port as named by the host OS (e.g. /dev/ttyUSB0, COM3)
    pub port: String,

    /// Application image in bootloader format (e.g. neorv32_exe.bin)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Serial baud rate
    #[arg(short, default_value_t = DEFAULT_BAUD)]
    pub baud: u32,

    /// Per-line timeout in seconds
    #[arg(short, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Echo every line received from the device
    #[arg(short, long)]
    pub verbose: bool,

    /// Keep the port open after upload and print device output
    #[arg(long)]
    pub keep: bool,
}

/// Initialize the log filter from the verbose flag.
pub fn init_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new().filter_level(level).init();
}

/// Execute an upload run from parsed arguments.
pub fn run(cli: Cli) -> Result<()> {
    let config = SessionConfig {
        port: cli.port,
        baud: cli.baud,
        timeout: Duration::from_secs(cli.timeout),
        verbose: cli.verbose,
        keep_open: cli.keep,
    };

    let payload =
        fs::read(&cli.file).with_context(|| format!("Failed to read {}", cli.file.display()))?;
    debug!("read {} payload bytes from {}", payload.len(), cli.file.display());

    let mut transport = SerialTransport::open(&config)?;
    let mut session = Session::new(&mut transport, config);
    session.run(&payload)?;

    Ok(())
}
