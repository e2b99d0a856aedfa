// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Text contract with the NEORV32 bootloader.
//!
//! The bootloader does not frame its output: it prints free text over
//! UART and the host recognizes a handful of fixed prompt substrings.
//! Compatibility with the target firmware depends on matching these
//! exact strings, so they live here as the single source of truth.

// --- Wire contract constants ---

/// Byte sent to request upload mode. May be sent any number of times.
pub const ENTER_UPLOAD_MODE: u8 = b'#';

/// Substring of the bootloader's menu banner. Seeing it after the mode
/// request means the target reset into its menu before the request
/// registered and the request must be re-sent.
pub const MENU_BANNER: &str = "Bootloader";

/// Substring of the "send me the image" prompt. This is the
/// bootloader's fixed prompt text, not the name of the file actually
/// being uploaded.
pub const READY_PROMPT: &str = "neorv32_exe.bin";

/// Substring of the post-upload acknowledgment line.
pub const ACK_TEXT: &str = "OK";

// --- Line classification helpers ---

/// True if `line` is (part of) the bootloader menu banner.
pub fn is_menu_banner(line: &str) -> bool {
    line.contains(MENU_BANNER)
}

/// True if `line` is the upload-readiness prompt.
pub fn is_ready_prompt(line: &str) -> bool {
    line.contains(READY_PROMPT)
}

/// True if `line` acknowledges a completed upload.
pub fn is_ack(line: &str) -> bool {
    line.contains(ACK_TEXT)
}
