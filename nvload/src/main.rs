// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Firmware upload tool for the NEORV32 bootloader via serial UART.
//!
//! Usage:
//!   nvload /dev/ttyUSB0 neorv32_exe.bin
//!   nvload COM3 neorv32_exe.bin -b 19200 -t 5 -v
//!   nvload /dev/ttyUSB0 neorv32_exe.bin --keep

mod cli;
mod transport;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let args = cli::Cli::parse();
    cli::init_logging(args.verbose);
    cli::run(args)
}
