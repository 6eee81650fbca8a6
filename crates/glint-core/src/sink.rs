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

//! Destination for diagnostic output.

use std::io;
use std::sync::Arc;

/// Accepts diagnostic output one line at a time.
///
/// Sinks take `&self` so a single sink can be shared by several policies
/// (e.g. one stream for several GL contexts). Implementations that need
/// mutation synchronize internally.
pub trait DiagnosticSink {
    /// Appends one line of text. `line` carries no trailing newline.
    fn write_line(&self, line: &str) -> io::Result<()>;
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &S {
    fn write_line(&self, line: &str) -> io::Result<()> {
        (**self).write_line(line)
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for Arc<S> {
    fn write_line(&self, line: &str) -> io::Result<()> {
        (**self).write_line(line)
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for Box<S> {
    fn write_line(&self, line: &str) -> io::Result<()> {
        (**self).write_line(line)
    }
}
