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
use std::io;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Keeps every line in memory. Useful for tests and in-app consoles.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    fn guard(&self) -> MutexGuard<'_, Vec<String>> {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// A copy of the lines written so far.
    pub fn lines(&self) -> Vec<String> {
        self.guard().clone()
    }

    /// Number of lines written so far.
    pub fn len(&self) -> usize {
        self.guard().len()
    }

    /// Whether nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.guard().is_empty()
    }

    /// Removes and returns every line.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.guard())
    }
}

impl DiagnosticSink for MemorySink {
    fn write_line(&self, line: &str) -> io::Result<()> {
        self.guard().push(line.to_owned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_lines_in_order() {
        let sink = MemorySink::new();
        sink.write_line("a").unwrap();
        sink.write_line("b").unwrap();
        assert_eq!(sink.lines(), vec!["a", "b"]);
        assert_eq!(sink.take(), vec!["a", "b"]);
        assert!(sink.is_empty());
    }
}
