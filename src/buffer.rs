//! Line buffer: the in-memory representation of the edited file
//!
//! An ordered, growable collection of [`Line`]s plus the streaming loader
//! and the save path. The buffer never holds an embedded `\n`; joining the
//! lines with single newlines reconstructs the file content (minus a
//! trailing newline, which the loader records but save does not re-emit).
//! A buffer always holds at least one line: an empty file is one empty line.

use crate::line::Line;
use crate::unicode;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Read-chunk size used by the streaming loader.
pub const DEFAULT_CHUNK_SIZE: usize = 64_000;

/// Safety bound on a single line's byte length. Exceeding it forces a line
/// break; this protects against pathological input (a multi-gigabyte file
/// with no newlines), not any normal code path.
pub const DEFAULT_MAX_LINE_BYTES: u64 = 1 << 32;

/// Character-entry mode, consulted only by [`LineBuffer::insert_char_at`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryMode {
    /// Shift the tail right and insert.
    Insert,
    /// Overwrite the character at the offset; append when at/past the end.
    Replace,
}

/// Tuning knobs for the streaming loader.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub chunk_size: usize,
    pub max_line_bytes: u64,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_line_bytes: DEFAULT_MAX_LINE_BYTES,
        }
    }
}

/// The ordered line collection, with file bookkeeping.
pub struct LineBuffer {
    lines: Vec<Line>,

    /// Optional file path for persistence
    file_path: Option<PathBuf>,

    /// Has the buffer been modified since last save?
    modified: bool,

    /// Whether the loaded file ended with a newline. Save does not consult
    /// this (it never emits a trailing newline); it is recorded so the
    /// fidelity decision can change without re-plumbing the loader.
    had_trailing_newline: bool,
}

impl LineBuffer {
    /// A buffer holding exactly one empty line (the empty-file shape).
    pub fn new() -> Self {
        Self {
            lines: vec![Line::new()],
            file_path: None,
            modified: false,
            had_trailing_newline: false,
        }
    }

    /// Build a buffer from an in-memory string (tests and scratch buffers).
    pub fn from_str(s: &str) -> Self {
        Self::from_reader(s.as_bytes(), &LoadOptions::default())
            .expect("reading from an in-memory slice cannot fail")
    }

    /// Stream `source` in fixed-size chunks, materializing one [`Line`] per
    /// `\n`-delimited segment. A line whose bytes straddle two chunks is
    /// carried over and reassembled; a final segment with no trailing
    /// newline still becomes a line; an empty source yields one empty line.
    pub fn from_reader<R: Read>(mut source: R, opts: &LoadOptions) -> io::Result<Self> {
        let mut lines = Vec::new();
        let mut pending: Vec<u8> = Vec::new();
        let mut chunk = vec![0u8; opts.chunk_size.max(1)];
        let mut had_trailing_newline = false;

        loop {
            let n = source.read(&mut chunk)?;
            if n == 0 {
                break;
            }
            for &byte in &chunk[..n] {
                if byte == b'\n' {
                    lines.push(Line::from_bytes(std::mem::take(&mut pending)));
                    had_trailing_newline = true;
                } else {
                    pending.push(byte);
                    had_trailing_newline = false;
                    if pending.len() as u64 >= opts.max_line_bytes {
                        // Forced break: pathological-input protection.
                        lines.push(Line::from_bytes(std::mem::take(&mut pending)));
                    }
                }
            }
        }
        if !pending.is_empty() {
            lines.push(Line::from_bytes(pending));
        }
        if lines.is_empty() {
            lines.push(Line::new());
        }

        Ok(Self {
            lines,
            file_path: None,
            modified: false,
            had_trailing_newline,
        })
    }

    /// Load a buffer from a file via the streaming loader.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        Self::load_from_file_with(path, &LoadOptions::default())
    }

    /// Load a buffer from a file with explicit loader options.
    pub fn load_from_file_with<P: AsRef<Path>>(path: P, opts: &LoadOptions) -> io::Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let file_size = file.metadata()?.len();

        let mut buffer = Self::from_reader(file, opts)?;
        buffer.file_path = Some(path.to_path_buf());
        debug!(
            path = %path.display(),
            bytes = file_size,
            lines = buffer.count(),
            trailing_newline = buffer.had_trailing_newline,
            "loaded file"
        );
        Ok(buffer)
    }

    /// Load `path`, or start an empty buffer bound to it when the file does
    /// not exist yet (it will be created on first save). Any other open
    /// error is the caller's startup failure.
    pub fn load_or_new<P: AsRef<Path>>(path: P, opts: &LoadOptions) -> io::Result<Self> {
        let path = path.as_ref();
        match Self::load_from_file_with(path, opts) {
            Ok(buffer) => Ok(buffer),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                let mut buffer = Self::new();
                buffer.file_path = Some(path.to_path_buf());
                Ok(buffer)
            }
            Err(err) => Err(err),
        }
    }

    /// Number of live lines; at least 1.
    pub fn count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, index: usize) -> &Line {
        &self.lines[index]
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn had_trailing_newline(&self) -> bool {
        self.had_trailing_newline
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    pub fn set_file_path(&mut self, path: PathBuf) {
        self.file_path = Some(path);
    }

    /// Split the line at `line_index` in two at `byte_offset` and insert the
    /// tail right after it. The only way lines are created after load.
    pub fn insert_newline(&mut self, line_index: usize, byte_offset: usize) {
        debug_assert!(line_index < self.lines.len());
        let tail = self.lines[line_index].split_at(byte_offset);
        self.lines.insert(line_index + 1, tail);
        self.modified = true;
    }

    /// Append line `line_index + 1` onto line `line_index` and remove it.
    /// Requires a next line to exist; calling on the last line is a caller
    /// bug (checked in debug builds, no-op in release).
    pub fn join_with_next(&mut self, line_index: usize) {
        debug_assert!(line_index + 1 < self.lines.len());
        if line_index + 1 >= self.lines.len() {
            return;
        }
        let next = self.lines.remove(line_index + 1);
        self.lines[line_index].append(next);
        self.modified = true;
    }

    /// Insert one character at a byte offset, honoring the entry mode.
    /// Replace mode overwrites the whole character at the offset (appending
    /// when at/past the end). Returns the byte offset just after the
    /// inserted character.
    pub fn insert_char_at(
        &mut self,
        line_index: usize,
        byte_offset: usize,
        ch: char,
        mode: EntryMode,
    ) -> usize {
        debug_assert!(ch != '\n', "newline insertion goes through insert_newline");
        let mut encoded = [0u8; 4];
        let encoded = ch.encode_utf8(&mut encoded).as_bytes();
        let line = &mut self.lines[line_index];
        if mode == EntryMode::Replace && byte_offset < line.len() {
            let old_len = unicode::char_len_at(line.as_bytes(), byte_offset);
            line.delete_range(byte_offset, old_len);
        }
        line.insert_bytes(byte_offset, encoded);
        self.modified = true;
        byte_offset + encoded.len()
    }

    /// Delete the whole (possibly malformed, then 1-byte) character at a
    /// byte offset. In-line only; the caller decides when to join lines.
    pub fn delete_char_at(&mut self, line_index: usize, byte_offset: usize) {
        let line = &mut self.lines[line_index];
        debug_assert!(byte_offset < line.len());
        if byte_offset >= line.len() {
            return;
        }
        let char_len = unicode::char_len_at(line.as_bytes(), byte_offset);
        line.delete_range(byte_offset, char_len.min(line.len() - byte_offset));
        self.modified = true;
    }

    /// Write every line joined by a single `\n`, no trailing newline.
    /// Returns the byte count written (the length the backing file is
    /// truncated to).
    pub fn write_to<W: Write>(&self, sink: &mut W) -> io::Result<u64> {
        let mut written = 0u64;
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                sink.write_all(b"\n")?;
                written += 1;
            }
            sink.write_all(line.as_bytes())?;
            written += line.len() as u64;
        }
        Ok(written)
    }

    /// Save the buffer to its file path.
    pub fn save(&mut self) -> io::Result<()> {
        if let Some(path) = self.file_path.clone() {
            self.save_to_file(path)
        } else {
            Err(io::Error::other("no file path set for buffer"))
        }
    }

    /// Save the buffer to a specific file, truncating it to the written
    /// length.
    pub fn save_to_file<P: AsRef<Path>>(&mut self, path: P) -> io::Result<()> {
        let mut file = File::create(path.as_ref())?;
        let written = self.write_to(&mut file)?;
        file.set_len(written)?;
        file.flush()?;

        self.file_path = Some(path.as_ref().to_path_buf());
        self.modified = false;
        debug!(path = %path.as_ref().display(), bytes = written, "saved file");
        Ok(())
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}
