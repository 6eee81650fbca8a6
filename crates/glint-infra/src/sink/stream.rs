// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use glint_core::DiagnosticSink;
use std::fs::File;
use std::io::{self, BufWriter, Stderr, Stdout, Write};
use std::path::Path;
use std::sync::{Mutex, PoisonError};

/// Appends lines to any [`Write`] stream.
///
/// Each line is written and flushed under a lock, so one `StreamSink` behind
/// an `Arc` can be shared by several policies and threads.
#[derive(Debug)]
pub struct StreamSink<W> {
    out: Mutex<W>,
}

impl<W: Write> StreamSink<W> {
    /// Wraps `out`.
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Unwraps the underlying stream.
    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl StreamSink<Stdout> {
    /// Writes to standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl StreamSink<Stderr> {
    /// Writes to standard error.
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl StreamSink<BufWriter<File>> {
    /// Creates (or truncates) the file at `path` and writes to it.
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> DiagnosticSink for StreamSink<W> {
    fn write_line(&self, line: &str) -> io::Result<()> {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(out, "{line}")?;
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn writes_one_line_per_call() {
        let sink = StreamSink::new(Vec::new());
        sink.write_line("glClear(16384)").unwrap();
        sink.write_line("glFlush()").unwrap();
        let text = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(text, "glClear(16384)\nglFlush()\n");
    }

    #[test]
    fn can_be_shared() {
        let sink = Arc::new(StreamSink::new(Vec::new()));
        let other = Arc::clone(&sink);
        sink.write_line("first").unwrap();
        other.write_line("second").unwrap();
        drop(other);
        let sink = Arc::try_unwrap(sink).unwrap();
        assert_eq!(sink.into_inner(), b"first\nsecond\n");
    }

    #[test]
    fn file_sink_flushes_every_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gl.log");
        let sink = StreamSink::create(&path).unwrap();
        sink.write_line("glFinish()").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "glFinish()\n");
    }
}
