//! Byte-at-a-time line dispatcher.
//!
//! The [`Dispatcher`] owns the line buffer, the terminator matcher, the command
//! registry and the transport. Every byte goes through the same steps:
//!
//! 1. A byte arriving while the buffer is full is refused with
//!    [`Error::BufferFull`]; the partial line is kept until
//!    [`Dispatcher::clear_buffer`] is called.
//! 2. Otherwise the byte is stored and fed to the matcher.
//! 3. When the terminator completes, the terminator bytes are dropped from the
//!    line and the first token is looked up in the registry. At most one
//!    handler runs: the matched command, or the default handler when nothing
//!    matched. Blank lines run nothing.
//! 4. Buffer and matcher are reset, whatever the outcome.

mod context;

pub use context::CommandContext;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::input::buffer::LineBuffer;
use crate::input::matcher::{MatchState, TerminatorMatcher};
use crate::input::tokenizer::Tokenizer;
use crate::registry::{CommandEntry, CommandRegistry, DefaultFn};
use crate::transport::Transport;

/// What happened to a completed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// A registered handler ran.
    Handled,
    /// The command matched an entry without a handler.
    Inert,
    /// Nothing matched and the default handler ran.
    Defaulted,
    /// Nothing matched and there is no default handler.
    Dropped,
    /// The line had no tokens.
    Blank,
}

/// Result of feeding a single byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Feed {
    /// The byte was stored; no line is complete yet.
    Pending,
    /// The byte completed a line, which was dispatched.
    Dispatched(Outcome),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DispatcherState {
    /// No partial line.
    Idle,
    /// Bytes of an unterminated line are buffered.
    Accumulating,
}

/// # Type Parameters
/// - `T`: Transport bytes are read from and replies written to.
/// - `N`: Line buffer storage in bytes; lines may hold `N - 1` bytes,
///   terminator included.
/// - `C`: Maximum number of registered commands.
pub struct Dispatcher<T, const N: usize, const C: usize> {
    transport: T,
    config: Config,
    buffer: LineBuffer<N>,
    matcher: TerminatorMatcher<'static>,
    registry: CommandRegistry<T, C>,
}

impl<T: Transport, const N: usize, const C: usize> Dispatcher<T, N, C> {
    /// Creates a dispatcher with an empty registry.
    ///
    /// Fails with [`Error::EmptyTerminator`] if the configuration cannot end a line.
    pub fn new(transport: T, config: Config) -> Result<Self> {
        Self::with_registry(transport, config, CommandRegistry::new())
    }

    /// Creates a dispatcher around an already populated registry.
    pub fn with_registry(
        transport: T,
        config: Config,
        registry: CommandRegistry<T, C>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            transport,
            config,
            buffer: LineBuffer::new(),
            matcher: TerminatorMatcher::new(config.terminator()),
            registry,
        })
    }

    pub fn add_command(&mut self, entry: CommandEntry<T>) -> Result<()> {
        self.registry.add(entry)
    }

    pub fn set_default_handler(&mut self, handler: DefaultFn<T>) {
        self.registry.set_default_handler(handler);
    }

    /// Reads and processes every byte the transport currently has.
    ///
    /// Stops at the first [`Error::BufferFull`]. Bytes not yet read stay in
    /// the transport for the next call.
    pub fn read_data(&mut self) -> Result<()> {
        while self.transport.bytes_available() > 0 {
            if self.buffer.is_full() {
                warn!("buffer full: len={}", self.buffer.len());
                return Err(Error::BufferFull);
            }
            let byte = self.transport.read_byte();
            trace!(
                "read: len={} term_pos={} ch={}",
                self.buffer.len(),
                self.matcher.position(),
                byte
            );
            self.feed(byte)?;
        }
        Ok(())
    }

    /// Processes one byte.
    pub fn feed(&mut self, byte: u8) -> Result<Feed> {
        if self.buffer.append(byte).is_err() {
            warn!("buffer full: len={}", self.buffer.len());
            return Err(Error::BufferFull);
        }

        match self.matcher.advance(byte) {
            MatchState::Continue => Ok(Feed::Pending),
            MatchState::Matched => {
                self.buffer.complete(self.config.terminator().len());
                let outcome = self.dispatch_line();
                self.clear_buffer();
                Ok(Feed::Dispatched(outcome))
            }
        }
    }

    /// Calls lookup and at most one handler for the completed line in the buffer.
    fn dispatch_line(&mut self) -> Outcome {
        let line = self.buffer.as_slice();
        debug!("received: {:?}", line);

        let mut tokens = Tokenizer::new(line, self.config.delimiters());
        let Some(command) = tokens.next_token() else {
            return Outcome::Blank;
        };

        let mut ctx = CommandContext::new(command, tokens, &mut self.transport, &self.config);
        match self.registry.lookup(command) {
            Some(entry) => {
                debug!("matched [{}]", entry.name);
                match entry.handler {
                    Some(handler) => {
                        handler(&mut ctx);
                        Outcome::Handled
                    }
                    None => Outcome::Inert,
                }
            }
            None => match self.registry.default_handler() {
                Some(handler) => {
                    debug!("unmatched {:?}, using default handler", command);
                    handler(&mut ctx, command);
                    Outcome::Defaulted
                }
                None => {
                    debug!("unmatched {:?}, dropped", command);
                    Outcome::Dropped
                }
            },
        }
    }

    /// Throws away any partial line and terminator progress.
    ///
    /// This is the only way out of [`Error::BufferFull`].
    pub fn clear_buffer(&mut self) {
        self.buffer.reset();
        self.matcher.reset();
    }

    pub fn state(&self) -> DispatcherState {
        if self.buffer.is_empty() && self.matcher.position() == 0 {
            DispatcherState::Idle
        } else {
            DispatcherState::Accumulating
        }
    }

    /// Bytes of the line received so far.
    pub fn pending_line(&self) -> &[u8] {
        self.buffer.as_slice()
    }

    pub fn write(&mut self, bytes: &[u8]) {
        self.transport.write_all(bytes);
    }

    pub fn write_byte(&mut self, byte: u8) {
        self.transport.write_byte(byte);
    }

    /// Framed write: `name`, delimiter, `payload`, terminator.
    pub fn send(&mut self, name: &str, payload: &[u8]) {
        send_framed(&mut self.transport, &self.config, name, payload);
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn registry(&self) -> &CommandRegistry<T, C> {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut CommandRegistry<T, C> {
        &mut self.registry
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn into_transport(self) -> T {
        self.transport
    }
}

fn send_framed<T: Transport>(transport: &mut T, config: &Config, name: &str, payload: &[u8]) {
    transport.write_all(name.as_bytes());
    transport.write_byte(config.primary_delimiter());
    transport.write_all(payload);
    transport.write_all(config.terminator());
}
