//! Error types for the dispatcher.

/// Errors reported by the dispatcher and its setup calls.
///
/// An unknown command is not an error: it is either handed to the default
/// handler or silently dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The line buffer filled up before a terminator was seen.
    ///
    /// The partial line stays in the buffer until
    /// [`Dispatcher::clear_buffer`](crate::Dispatcher::clear_buffer) is called.
    #[error("line buffer full before terminator")]
    BufferFull,

    /// The configured terminator has no bytes.
    #[error("terminator must not be empty")]
    EmptyTerminator,

    /// No room left in the command registry.
    #[error("command registry full")]
    RegistryFull,
}

/// Convenience alias.
pub type Result<T> = core::result::Result<T, Error>;
