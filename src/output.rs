//! Line-prefixing writer.
//!
//! Forwards bytes unchanged and writes `\t<label>` right after every newline, so
//! the second and following lines of a context's output carry that context's name.
//!
//! [`LineAssembler`] is the variant for output shared live with other contexts:
//! it only hands out whole lines.

use std::io::{self, Write};

/// `Write` adapter that labels every line after the first.
///
/// Each call scans the buffer for newlines and forwards whole segments, so the
/// inner sink never sees single-byte writes. One writer belongs to one child process.
#[derive(Debug)]
pub struct LinePrefixWriter<W: Write> {
    inner: W,
    marker: Vec<u8>,
}

impl<W: Write> LinePrefixWriter<W> {
    pub fn new(label: &str, inner: W) -> Self {
        let mut marker = Vec::with_capacity(label.len() + 1);
        marker.push(b'\t');
        marker.extend_from_slice(label.as_bytes());
        Self { inner, marker }
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for LinePrefixWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut rest = buf;
        while let Some(pos) = rest.iter().position(|b| *b == b'\n') {
            let (line, tail) = rest.split_at(pos + 1);
            self.inner.write_all(line)?;
            self.inner.write_all(&self.marker)?;
            rest = tail;
        }
        if !rest.is_empty() {
            self.inner.write_all(rest)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Groups one context's output into whole lines for a terminal shared with
/// other contexts.
///
/// Bytes are held until a newline completes the line. Every line after the
/// first starts with `\t<label>`, so a returned unit never ends in a dangling
/// label that another context's text could follow. A label owed after the
/// final newline is only written if more output arrives.
#[derive(Debug)]
pub struct LineAssembler {
    marker: Vec<u8>,
    pending: Vec<u8>,
    started: bool,
}

impl LineAssembler {
    pub fn new(label: &str) -> Self {
        let mut marker = Vec::with_capacity(label.len() + 1);
        marker.push(b'\t');
        marker.extend_from_slice(label.as_bytes());
        Self {
            marker,
            pending: Vec::new(),
            started: false,
        }
    }

    /// Lines pass through untouched.
    pub fn unlabelled() -> Self {
        Self {
            marker: Vec::new(),
            pending: Vec::new(),
            started: false,
        }
    }

    /// Append bytes and return the lines they complete. Empty if none.
    pub fn push(&mut self, bytes: &[u8]) -> Vec<u8> {
        self.pending.extend_from_slice(bytes);
        let Some(last) = self.pending.iter().rposition(|b| *b == b'\n') else {
            return Vec::new();
        };
        let rest = self.pending.split_off(last + 1);
        let complete = std::mem::replace(&mut self.pending, rest);

        let lines = complete.iter().filter(|b| **b == b'\n').count();
        let mut unit = Vec::with_capacity(complete.len() + lines * self.marker.len());
        for line in complete.split_inclusive(|b| *b == b'\n') {
            self.label_next(&mut unit);
            unit.extend_from_slice(line);
        }
        unit
    }

    /// The unterminated last line, if any.
    pub fn finish(mut self) -> Vec<u8> {
        if self.pending.is_empty() {
            return Vec::new();
        }
        let mut unit = Vec::with_capacity(self.marker.len() + self.pending.len());
        self.label_next(&mut unit);
        unit.append(&mut self.pending);
        unit
    }

    fn label_next(&mut self, unit: &mut Vec<u8>) {
        if self.started {
            unit.extend_from_slice(&self.marker);
        }
        self.started = true;
    }
}
