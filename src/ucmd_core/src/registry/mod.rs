//! Command table.
//!
//! Entries are matched in insertion order by exact, case-sensitive comparison
//! of the whole command name. Names are not deduplicated: when two entries
//! share a name the one registered first always wins.

use core::fmt;

use heapless::Vec;

use crate::dispatcher::CommandContext;
use crate::error::{Error, Result};

/// Handler for a registered command.
pub type CommandFn<T> = fn(&mut CommandContext<'_, T>);

/// Handler for lines whose command name matched no entry. Receives the raw name.
pub type DefaultFn<T> = fn(&mut CommandContext<'_, T>, &[u8]);

/// One registered command.
///
/// An entry without a handler is recognized but inert: a matching line is
/// consumed without calling anything, and the default handler is not used.
pub struct CommandEntry<T> {
    pub name: &'static str,
    pub handler: Option<CommandFn<T>>,
}

impl<T> CommandEntry<T> {
    pub const fn new(name: &'static str, handler: CommandFn<T>) -> Self {
        Self {
            name,
            handler: Some(handler),
        }
    }

    /// An entry that is matched but does nothing.
    pub const fn inert(name: &'static str) -> Self {
        Self {
            name,
            handler: None,
        }
    }

    pub fn matches(&self, name: &[u8]) -> bool {
        self.name.as_bytes() == name
    }
}

impl<T> Clone for CommandEntry<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for CommandEntry<T> {}

impl<T> fmt::Debug for CommandEntry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandEntry")
            .field("name", &self.name)
            .field("inert", &self.handler.is_none())
            .finish()
    }
}

/// Ordered, fixed-capacity command table plus an optional default handler.
///
/// # Type Parameters
/// - `T`: Transport type the handlers write to.
/// - `C`: Maximum number of entries.
pub struct CommandRegistry<T, const C: usize> {
    entries: Vec<CommandEntry<T>, C>,
    default_handler: Option<DefaultFn<T>>,
}

impl<T, const C: usize> CommandRegistry<T, C> {
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            default_handler: None,
        }
    }

    /// Appends an entry. Fails with [`Error::RegistryFull`] once `C` entries exist.
    pub fn add(&mut self, entry: CommandEntry<T>) -> Result<()> {
        debug!("adding #{} cmd=[{}]", self.entries.len(), entry.name);
        self.entries.push(entry).map_err(|_| Error::RegistryFull)
    }

    /// Returns the first entry whose name equals `name`.
    pub fn lookup(&self, name: &[u8]) -> Option<&CommandEntry<T>> {
        self.entries.iter().find(|entry| entry.matches(name))
    }

    pub fn set_default_handler(&mut self, handler: DefaultFn<T>) {
        self.default_handler = Some(handler);
    }

    pub fn clear_default_handler(&mut self) {
        self.default_handler = None;
    }

    pub fn default_handler(&self) -> Option<DefaultFn<T>> {
        self.default_handler
    }

    /// Registered entries in match-priority order.
    pub fn iter(&self) -> impl Iterator<Item = &CommandEntry<T>> {
        self.entries.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|entry| entry.name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        C
    }
}

impl<T, const C: usize> Default for CommandRegistry<T, C> {
    fn default() -> Self {
        Self::new()
    }
}
