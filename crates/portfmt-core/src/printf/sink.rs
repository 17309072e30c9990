//! Bounded output.
//!
//! Renderers write through [`FieldSink`]. [`OutputSink`] is the bounded
//! implementation used by the entry points: it copies what fits into the
//! caller's buffer, keeps one byte for the terminator, and counts every byte
//! offered to it so the caller learns the untruncated length.

/// Destination for rendered bytes.
pub trait FieldSink {
    /// Append `bytes`.
    fn put(&mut self, bytes: &[u8]);

    /// Append `count` copies of `byte`.
    fn fill(&mut self, byte: u8, count: usize);

    /// Append one byte.
    fn put_byte(&mut self, byte: u8) {
        self.put(&[byte]);
    }
}

impl FieldSink for Vec<u8> {
    fn put(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes);
    }

    fn fill(&mut self, byte: u8, count: usize) {
        self.resize(self.len() + count, byte);
    }

    fn put_byte(&mut self, byte: u8) {
        self.push(byte);
    }
}

/// Capacity-limited sink over a caller-supplied buffer.
#[derive(Debug)]
pub struct OutputSink<'b> {
    buf: &'b mut [u8],
    written: usize,
    total: usize,
    terminated: bool,
}

impl<'b> OutputSink<'b> {
    /// Wrap `buf`; its length is the capacity, terminator included.
    #[must_use]
    pub fn new(buf: &'b mut [u8]) -> Self {
        Self {
            buf,
            written: 0,
            total: 0,
            terminated: false,
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Bytes actually stored (excluding the terminator).
    #[must_use]
    pub const fn written(&self) -> usize {
        self.written
    }

    /// Bytes the untruncated output would occupy (excluding the terminator).
    #[must_use]
    pub const fn total_logical_length(&self) -> usize {
        self.total
    }

    #[must_use]
    pub const fn is_terminated(&self) -> bool {
        self.terminated
    }

    #[must_use]
    pub const fn is_truncated(&self) -> bool {
        self.total > self.written
    }

    /// Room left for content, keeping one byte for the terminator.
    #[must_use]
    pub fn remaining(&self) -> usize {
        if self.terminated {
            return 0;
        }
        self.capacity()
            .saturating_sub(1)
            .saturating_sub(self.written)
    }

    /// Place the terminator and return the logical length.
    ///
    /// The terminator is written once, at `written`, and only when the
    /// buffer is non-empty. Later calls return the same length.
    pub fn finish(&mut self) -> usize {
        if !self.terminated {
            if let Some(slot) = self.buf.get_mut(self.written) {
                *slot = 0;
            }
            self.terminated = true;
        }
        self.total
    }
}

impl FieldSink for OutputSink<'_> {
    fn put(&mut self, bytes: &[u8]) {
        let n = bytes.len().min(self.remaining());
        self.buf[self.written..self.written + n].copy_from_slice(&bytes[..n]);
        self.written += n;
        self.total = self.total.saturating_add(bytes.len());
    }

    fn fill(&mut self, byte: u8, count: usize) {
        let n = count.min(self.remaining());
        self.buf[self.written..self.written + n].fill(byte);
        self.written += n;
        self.total = self.total.saturating_add(count);
    }
}
