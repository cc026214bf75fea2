use crate::config::Config;
use crate::input::tokenizer::Tokenizer;
use crate::transport::Transport;

/// Handle given to a command handler for the one line being dispatched.
///
/// It gives access to the remaining arguments of the line and to the
/// transport for replies. The handle cannot outlive the line: the next byte
/// fed to the dispatcher may overwrite the storage the tokens point into.
pub struct CommandContext<'a, T> {
    command: &'a [u8],
    tokens: Tokenizer<'a>,
    transport: &'a mut T,
    config: &'a Config,
}

impl<'a, T> CommandContext<'a, T> {
    pub(crate) fn new(
        command: &'a [u8],
        tokens: Tokenizer<'a>,
        transport: &'a mut T,
        config: &'a Config,
    ) -> Self {
        Self {
            command,
            tokens,
            transport,
            config,
        }
    }

    /// The command name that selected this handler.
    pub fn command(&self) -> &'a [u8] {
        self.command
    }

    /// Next argument of the line, `None` once all have been consumed.
    pub fn next_token(&mut self) -> Option<&'a [u8]> {
        self.tokens.next_token()
    }

    /// The not yet consumed part of the line as one slice, with leading
    /// delimiters skipped.
    pub fn remainder(&mut self) -> Option<&'a [u8]> {
        self.tokens.remainder()
    }

    pub fn config(&self) -> &Config {
        self.config
    }

    /// Direct access to the transport, e.g. for application state kept in it.
    pub fn transport_mut(&mut self) -> &mut T {
        self.transport
    }
}

impl<T: Transport> CommandContext<'_, T> {
    pub fn write(&mut self, bytes: &[u8]) {
        self.transport.write_all(bytes);
    }

    pub fn write_byte(&mut self, byte: u8) {
        self.transport.write_byte(byte);
    }

    /// Writes `bytes` followed by the terminator.
    pub fn write_line(&mut self, bytes: &[u8]) {
        self.transport.write_all(bytes);
        self.transport.write_all(self.config.terminator());
    }

    /// Framed write: `name`, delimiter, `payload`, terminator.
    pub fn send(&mut self, name: &str, payload: &[u8]) {
        super::send_framed(&mut *self.transport, self.config, name, payload);
    }
}
