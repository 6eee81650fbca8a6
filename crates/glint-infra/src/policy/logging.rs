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

//! Logging policy: one line per intercepted call.

use crate::sink::LogChannelSink;
use glint_core::{CallHooks, DiagnosticSink, Gl20, GlResult, Operation};
use std::time::Instant;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// Tag used by the default log-channel sink.
pub const DEFAULT_LOG_TAG: &str = "GL";

/// Writes `[<elapsed-ns>] glName(arg0, arg1, ...)` for every call.
///
/// Elapsed time is measured from the moment the policy was constructed, at
/// which point a session marker carrying the wall-clock time is written.
/// Logging is best effort: a failing sink is reported through `log::warn!`
/// and never changes the outcome of the call.
#[derive(Debug)]
pub struct LoggingPolicy<S = LogChannelSink> {
    sink: S,
    baseline: Instant,
}

impl LoggingPolicy<LogChannelSink> {
    /// Logs to the `log` facade under the [`DEFAULT_LOG_TAG`] target.
    pub fn new() -> Self {
        Self::with_sink(LogChannelSink::new(DEFAULT_LOG_TAG))
    }
}

impl Default for LoggingPolicy<LogChannelSink> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: DiagnosticSink> LoggingPolicy<S> {
    /// Logs to `sink`. Pass an `Arc` or a reference to share one sink
    /// between several policies.
    pub fn with_sink(sink: S) -> Self {
        let policy = Self {
            sink,
            baseline: Instant::now(),
        };
        policy.emit(&session_marker(OffsetDateTime::now_utc()));
        policy
    }

    /// The instant elapsed times are measured from.
    pub fn baseline(&self) -> Instant {
        self.baseline
    }

    /// The sink lines are written to.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Formats the log line for `op` at the current elapsed time.
    pub fn format_call(&self, op: &Operation<'_>) -> String {
        format!("[{}] {op}", self.baseline.elapsed().as_nanos())
    }

    fn emit(&self, line: &str) {
        if let Err(e) = self.sink.write_line(line) {
            log::warn!("[LoggingPolicy] Failed to write diagnostic line: {e}");
        }
    }
}

impl<G, S> CallHooks<G> for LoggingPolicy<S>
where
    G: Gl20 + ?Sized,
    S: DiagnosticSink,
{
    fn call(&mut self, op: &Operation<'_>) -> GlResult<()> {
        let line = self.format_call(op);
        self.emit(&line);
        Ok(())
    }
}

fn session_marker(now: OffsetDateTime) -> String {
    let stamp = now
        .format(&Rfc3339)
        .unwrap_or_else(|_| now.unix_timestamp().to_string());
    format!("--- GL session started at {stamp} ---")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessGl;
    use crate::interceptor::Interceptor;
    use crate::sink::MemorySink;
    use std::io;
    use std::sync::Arc;

    fn elapsed_of(line: &str) -> u128 {
        let end = line.find(']').expect("line has an elapsed stamp");
        line[1..end].parse().expect("elapsed stamp is numeric")
    }

    #[test]
    fn construction_writes_a_session_marker() {
        let sink = Arc::new(MemorySink::new());
        let _policy = LoggingPolicy::with_sink(sink.clone());

        let lines = sink.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("--- GL session started at "));
    }

    #[test]
    fn session_marker_uses_rfc3339() {
        let epoch = OffsetDateTime::UNIX_EPOCH;
        assert_eq!(
            session_marker(epoch),
            "--- GL session started at 1970-01-01T00:00:00Z ---"
        );
    }

    #[test]
    fn no_argument_call_renders_empty_parens() {
        let sink = Arc::new(MemorySink::new());
        let mut gl = Interceptor::new(HeadlessGl::new(), LoggingPolicy::with_sink(sink.clone()));
        gl.flush().unwrap();

        let lines = sink.lines();
        let line = &lines[1];
        assert!(line.starts_with('['));
        assert!(line.ends_with("] glFlush()"), "unexpected line {line}");
        elapsed_of(line);
    }

    #[test]
    fn lines_follow_call_order_with_non_decreasing_time() {
        let sink = Arc::new(MemorySink::new());
        let mut gl = Interceptor::new(HeadlessGl::new(), LoggingPolicy::with_sink(sink.clone()));
        gl.clear_color(0.0, 0.5, 1.0, 1.0).unwrap();
        gl.bind_attrib_location(1, 0, "a_position").unwrap();
        gl.finish().unwrap();

        let lines = sink.lines();
        assert_eq!(lines.len(), 4);
        assert!(lines[1].ends_with("glClearColor(0.0, 0.5, 1.0, 1.0)"));
        assert!(lines[2].ends_with("glBindAttribLocation(1, 0, \"a_position\")"));
        assert!(lines[3].ends_with("glFinish()"));

        let stamps: Vec<u128> = lines[1..].iter().map(|l| elapsed_of(l)).collect();
        assert!(stamps.windows(2).all(|w| w[0] <= w[1]));
    }

    struct BrokenSink;

    impl DiagnosticSink for BrokenSink {
        fn write_line(&self, _line: &str) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn sink_failures_do_not_affect_the_call() {
        let mut gl = Interceptor::new(HeadlessGl::new(), LoggingPolicy::with_sink(BrokenSink));
        let texture = gl.gen_texture().unwrap();
        assert!(!gl.is_texture(texture).unwrap());
        assert_eq!(gl.backend().journal(), ["glGenTextures", "glIsTexture"]);
    }
}
