//! A single line of buffer text
//!
//! Owns the line's bytes with no trailing newline. Content is valid UTF-8
//! between operations; the edit engine is responsible for keeping every
//! insert and delete aligned to character boundaries. Offsets passed in are
//! contracts, not input validation: callers clamp first, and violations are
//! caught with debug assertions.

/// One line of text: owned bytes, newline-free, amortized growth via `Vec`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    content: Vec<u8>,
}

impl Line {
    /// Create an empty line.
    pub fn new() -> Self {
        Self {
            content: Vec::new(),
        }
    }

    /// Take ownership of raw bytes (the streaming loader's path).
    pub fn from_bytes(content: Vec<u8>) -> Self {
        debug_assert!(!content.contains(&b'\n'));
        Self { content }
    }

    /// Byte count, excluding any terminator.
    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.content
    }

    /// Insert `bytes` at `offset`, shifting the tail right.
    pub fn insert_bytes(&mut self, offset: usize, bytes: &[u8]) {
        debug_assert!(offset <= self.content.len());
        self.content
            .splice(offset..offset, bytes.iter().copied());
    }

    /// Delete `count` bytes starting at `offset`, shifting the tail left.
    /// The caller guarantees the range covers whole characters.
    pub fn delete_range(&mut self, offset: usize, count: usize) {
        debug_assert!(offset + count <= self.content.len());
        self.content.drain(offset..offset + count);
    }

    /// Truncate to `offset` bytes and return the tail as a new line.
    pub fn split_at(&mut self, offset: usize) -> Line {
        debug_assert!(offset <= self.content.len());
        Line {
            content: self.content.split_off(offset),
        }
    }

    /// Append another line's content onto this one (the join half of a
    /// line merge; the buffer removes `other` from its sequence).
    pub fn append(&mut self, other: Line) {
        self.content.extend(other.content);
    }
}
