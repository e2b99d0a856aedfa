// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Protocol logic for the nvload uploader.
//!
//! This crate holds everything that can be exercised without a serial
//! port attached: the text contract with the NEORV32 bootloader and
//! the upload handshake driver. The `nvload` binary supplies the
//! actual serial transport.

pub mod handshake;
pub mod protocol;

// Re-export commonly used types
pub use handshake::{LineTransport, Session, SessionConfig, SessionState, UploadError};
pub use handshake::{DEFAULT_BAUD, DEFAULT_TIMEOUT_SECS};
pub use protocol::{ACK_TEXT, ENTER_UPLOAD_MODE, MENU_BANNER, READY_PROMPT};
