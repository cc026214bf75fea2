//! Incremental line tokenizer and command dispatcher for byte streams.
//!
//! Bytes are fed one at a time (typically from a serial link). Once the
//! configured terminator has been seen, the accumulated line is split into a
//! command name and delimiter-separated arguments, and the handler registered
//! under that name is called. Unknown names go to an optional default handler.
//!
//! Everything lives in fixed-size storage: the line buffer is a `[u8; N]`
//! owned by the [`Dispatcher`] and the command table is a `heapless::Vec`.
//!
//! ```ignore
//! use ucmd_core::{CommandContext, CommandEntry, Config, Dispatcher};
//! use ucmd_core::transport::MemoryTransport;
//!
//! fn ping(ctx: &mut CommandContext<'_, MemoryTransport<64, 64>>) {
//!     ctx.write_line(b"PONG");
//! }
//!
//! let mut d = Dispatcher::<_, 32, 4>::new(MemoryTransport::new(), Config::default())?;
//! d.add_command(CommandEntry::new("PING", ping))?;
//! d.transport_mut().push_input(b"PING\r\n");
//! d.read_data()?;
//! assert_eq!(d.transport().output(), b"PONG\r\n");
//! ```

#![no_std]

#[cfg(test)]
extern crate std;

#[macro_use]
mod fmt;

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod input;
pub mod registry;
pub mod transport;

pub use config::Config;
pub use dispatcher::{CommandContext, Dispatcher, DispatcherState, Feed, Outcome};
pub use error::{Error, Result};
pub use input::buffer::LineBuffer;
pub use input::matcher::{MatchState, TerminatorMatcher};
pub use input::tokenizer::Tokenizer;
pub use registry::{CommandEntry, CommandFn, CommandRegistry, DefaultFn};
pub use transport::Transport;
