//! Byte transport seen by the dispatcher.
//!
//! The dispatcher only needs to know whether a byte is waiting, to read it,
//! and to write bytes back. Anything from a UART register block to a socket
//! can sit behind [`Transport`]. A read-only link implements
//! [`Transport::write_byte`] as a no-op.

use heapless::{Deque, Vec};

pub trait Transport {
    /// Number of bytes that can be read without blocking.
    fn bytes_available(&mut self) -> usize;

    /// Reads one byte. Only called while [`bytes_available`](Self::bytes_available) is non-zero.
    fn read_byte(&mut self) -> u8;

    fn write_byte(&mut self, byte: u8);

    fn write_all(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.write_byte(b);
        }
    }
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn bytes_available(&mut self) -> usize {
        (**self).bytes_available()
    }

    fn read_byte(&mut self) -> u8 {
        (**self).read_byte()
    }

    fn write_byte(&mut self, byte: u8) {
        (**self).write_byte(byte)
    }
}

/// In-memory transport: a receive queue filled by the caller and a transmit
/// buffer collecting everything written.
///
/// # Type Parameters
/// - `IN`: Receive queue capacity.
/// - `OUT`: Transmit buffer capacity. Bytes written past it are counted in
///   [`dropped`](Self::dropped) and discarded.
pub struct MemoryTransport<const IN: usize, const OUT: usize> {
    rx: Deque<u8, IN>,
    tx: Vec<u8, OUT>,
    dropped: usize,
}

impl<const IN: usize, const OUT: usize> MemoryTransport<IN, OUT> {
    pub const fn new() -> Self {
        Self {
            rx: Deque::new(),
            tx: Vec::new(),
            dropped: 0,
        }
    }

    /// Queues bytes for reading. Returns how many fit.
    pub fn push_input(&mut self, bytes: &[u8]) -> usize {
        let mut queued = 0;
        for &b in bytes {
            if self.rx.push_back(b).is_err() {
                break;
            }
            queued += 1;
        }
        queued
    }

    /// Bytes still waiting to be read.
    pub fn pending_input(&self) -> usize {
        self.rx.len()
    }

    /// Everything written so far.
    pub fn output(&self) -> &[u8] {
        &self.tx
    }

    /// Empties the transmit buffer and resets the dropped counter.
    pub fn clear_output(&mut self) {
        self.tx.clear();
        self.dropped = 0;
    }

    /// Number of written bytes lost because the transmit buffer was full.
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}

impl<const IN: usize, const OUT: usize> Default for MemoryTransport<IN, OUT> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const IN: usize, const OUT: usize> Transport for MemoryTransport<IN, OUT> {
    fn bytes_available(&mut self) -> usize {
        self.rx.len()
    }

    fn read_byte(&mut self) -> u8 {
        self.rx.pop_front().unwrap_or(0)
    }

    fn write_byte(&mut self, byte: u8) {
        if self.tx.push(byte).is_err() {
            self.dropped += 1;
        }
    }
}
