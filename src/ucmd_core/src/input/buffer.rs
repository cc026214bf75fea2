/// Marker written at the end of a completed line.
pub const LINE_END_MARKER: u8 = 0;

/// Returned by [`LineBuffer::append`] when no room is left. The byte was not stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Full;

/// A fixed-size byte buffer accumulating one incoming line.
///
/// `LineBuffer` never allocates. One byte of the storage is reserved for the
/// line-end marker, so the usable capacity is `N - 1`.
///
/// # Type Parameters
/// - `N`: Size of the backing storage in bytes.
pub struct LineBuffer<const N: usize> {
    buffer: [u8; N],
    length: usize,
    terminated: bool,
}

impl<const N: usize> LineBuffer<N> {
    /// Number of bytes a line may hold, terminator included.
    pub const CAPACITY: usize = N.saturating_sub(1);

    /// Creates a new, empty `LineBuffer`.
    ///
    /// # Example
    /// ```ignore
    /// let buf: LineBuffer<8> = LineBuffer::new();
    /// assert_eq!(buf.capacity(), 7);
    /// ```
    pub const fn new() -> Self {
        Self {
            buffer: [0; N],
            length: 0,
            terminated: false,
        }
    }

    /// Appends a byte at the end of the line.
    ///
    /// Returns `Err(Full)` without storing the byte if the buffer is at capacity.
    ///
    /// # Example
    /// ```ignore
    /// let mut buf: LineBuffer<2> = LineBuffer::new();
    /// assert!(buf.append(b'a').is_ok());
    /// assert!(buf.append(b'b').is_err());
    /// ```
    pub fn append(&mut self, byte: u8) -> Result<(), Full> {
        if self.length >= Self::CAPACITY {
            return Err(Full);
        }
        self.buffer[self.length] = byte;
        self.length += 1;
        self.terminated = false;
        Ok(())
    }

    /// Declares the line complete.
    ///
    /// Drops the last `strip` bytes (the terminator) from the logical content
    /// and writes [`LINE_END_MARKER`] where the first of them was stored.
    pub fn complete(&mut self, strip: usize) {
        self.length = self.length.saturating_sub(strip);
        if self.length < N {
            self.buffer[self.length] = LINE_END_MARKER;
            self.terminated = true;
        }
    }

    /// Resets the logical length to zero. Storage contents are left as they are.
    pub fn reset(&mut self) {
        self.length = 0;
        self.terminated = false;
    }

    /// Returns the current content.
    pub fn as_slice(&self) -> &[u8] {
        &self.buffer[..self.length]
    }

    /// Returns the completed line including its line-end marker.
    ///
    /// `None` until [`complete`](Self::complete) has been called for the current line.
    pub fn as_bytes_with_nul(&self) -> Option<&[u8]> {
        if self.terminated {
            Some(&self.buffer[..=self.length])
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns `true` when the next [`append`](Self::append) would fail.
    pub fn is_full(&self) -> bool {
        self.length >= Self::CAPACITY
    }

    pub fn capacity(&self) -> usize {
        Self::CAPACITY
    }
}

impl<const N: usize> Default for LineBuffer<N> {
    /// Returns a new, empty `LineBuffer`.
    fn default() -> Self {
        Self::new()
    }
}
