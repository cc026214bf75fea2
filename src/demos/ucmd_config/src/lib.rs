//! Build-time settings for the demo dispatcher.

/// Line buffer storage; lines hold one byte less.
pub const LINE_BUFFER_LEN: usize = 64;

/// Maximum number of registered commands.
pub const MAX_COMMANDS: usize = 8;

/// Receive queue between stdin and the dispatcher.
pub const RX_QUEUE_LEN: usize = 256;

/// Chunk size of a single stdin read.
pub const READ_CHUNK_LEN: usize = 64;

/// Terminal input arrives with bare LF line endings.
pub const TERMINATOR: &[u8] = b"\n";

pub const DELIMITERS: &[u8] = b" \t";
