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

use crate::config::{InstrumentationConfig, LogTarget};
use anyhow::{Context, Result};
use glint_core::{DiagnosticSink, Gl20};
use glint_infra::{
    DrainMode, ErrorSignalingPolicy, Interceptor, LogChannelSink, LoggingPolicy, ProfilingPolicy,
    StatsHandle, StreamSink,
};
use std::ops::{Deref, DerefMut};

/// Assembles the instrumentation stack around a backend.
///
/// Enabled layers are nested as `Profiling(ErrorSignaling(Logging(backend)))`.
/// The profiler counts only the application's calls. The log also shows the
/// error checker's `glGetError` polls, since they reach the backend.
pub struct InstrumentationBuilder {
    config: InstrumentationConfig,
    sink: Option<Box<dyn DiagnosticSink>>,
}

impl Default for InstrumentationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl InstrumentationBuilder {
    /// Starts from [`InstrumentationConfig::default`].
    pub fn new() -> Self {
        Self::from_config(InstrumentationConfig::default())
    }

    /// Starts from an explicit configuration, e.g. one loaded from RON.
    pub fn from_config(config: InstrumentationConfig) -> Self {
        Self { config, sink: None }
    }

    /// Enables or disables the logging layer.
    pub fn logging(mut self, enabled: bool) -> Self {
        self.config.logging = enabled;
        self
    }

    /// Enables or disables the error-signaling layer.
    pub fn error_checking(mut self, enabled: bool) -> Self {
        self.config.error_checking = enabled;
        self
    }

    /// Drains the whole error queue on failure instead of stopping at the first code.
    pub fn drain_errors(mut self, enabled: bool) -> Self {
        self.config.drain_errors = enabled;
        self
    }

    /// Enables or disables call counting.
    pub fn profiling(mut self, enabled: bool) -> Self {
        self.config.profiling = enabled;
        self
    }

    /// Chooses where log lines go.
    pub fn log_target(mut self, target: LogTarget) -> Self {
        self.config.log_target = target;
        self
    }

    /// Sends log lines to `sink`, overriding the configured [`LogTarget`].
    pub fn sink(mut self, sink: impl DiagnosticSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// The configuration the stack will be built from.
    pub fn config(&self) -> &InstrumentationConfig {
        &self.config
    }

    /// Wraps `backend` in the enabled layers.
    ///
    /// Fails only when the log target cannot be opened.
    pub fn build<G: Gl20 + 'static>(self, backend: G) -> Result<Instrumented> {
        let config = self.config;
        let mut gl: Box<dyn Gl20> = Box::new(backend);
        let mut stats = None;

        if config.logging {
            let sink = match self.sink {
                Some(sink) => sink,
                None => open_sink(&config.log_target)?,
            };
            gl = Box::new(Interceptor::new(gl, LoggingPolicy::with_sink(sink)));
        }

        if config.error_checking {
            let mode = if config.drain_errors {
                DrainMode::Drain
            } else {
                DrainMode::FirstOnly
            };
            gl = Box::new(Interceptor::new(gl, ErrorSignalingPolicy::with_mode(mode)));
        }

        if config.profiling {
            let policy = ProfilingPolicy::new();
            stats = Some(policy.stats());
            gl = Box::new(Interceptor::new(gl, policy));
        }

        log::info!(
            "[InstrumentationBuilder] GL instrumentation ready (logging: {}, profiling: {}, error checking: {})",
            config.logging,
            config.profiling,
            config.error_checking
        );

        Ok(Instrumented { gl, stats })
    }
}

fn open_sink(target: &LogTarget) -> Result<Box<dyn DiagnosticSink>> {
    let sink: Box<dyn DiagnosticSink> = match target {
        LogTarget::Channel { tag } => Box::new(LogChannelSink::new(tag.as_str())),
        LogTarget::Stdout => Box::new(StreamSink::stdout()),
        LogTarget::Stderr => Box::new(StreamSink::stderr()),
        LogTarget::File { path } => Box::new(
            StreamSink::create(path)
                .with_context(|| format!("Failed to open GL log file {}", path.display()))?,
        ),
    };
    Ok(sink)
}

/// A backend wrapped in its instrumentation layers.
///
/// Dereferences to the composed [`Gl20`] so calls read the same as against
/// the bare backend.
pub struct Instrumented {
    gl: Box<dyn Gl20>,
    stats: Option<StatsHandle>,
}

impl Instrumented {
    /// Call statistics, present when profiling is enabled.
    pub fn stats(&self) -> Option<&StatsHandle> {
        self.stats.as_ref()
    }

    /// Drops the stats handle and returns the composed backend.
    pub fn into_gl(self) -> Box<dyn Gl20> {
        self.gl
    }
}

impl Deref for Instrumented {
    type Target = dyn Gl20;

    fn deref(&self) -> &Self::Target {
        &*self.gl
    }
}

impl DerefMut for Instrumented {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.gl
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_core::consts::*;
    use glint_core::GlError;
    use glint_infra::{HeadlessGl, MemorySink};
    use std::sync::Arc;

    #[test]
    fn disabled_config_adds_no_layers() {
        let mut gl = InstrumentationBuilder::from_config(InstrumentationConfig::disabled())
            .build(HeadlessGl::new())
            .unwrap();

        assert!(gl.stats().is_none());
        // Without error checking the bad call succeeds and the code stays queued.
        gl.enable(0xBEEF).unwrap();
        assert_eq!(gl.get_error().unwrap(), GL_INVALID_ENUM);
    }

    #[test]
    fn default_config_logs_and_checks() {
        let sink = Arc::new(MemorySink::new());
        let mut gl = InstrumentationBuilder::new()
            .sink(sink.clone())
            .build(HeadlessGl::new())
            .unwrap();

        assert_eq!(gl.enable(0xBEEF), Err(GlError::InvalidEnum));
        assert!(gl.enable(GL_BLEND).is_ok());

        let lines = sink.lines();
        assert_eq!(lines.len(), 5);
        assert!(lines[1].ends_with("glEnable(48879)"));
        assert!(lines[2].ends_with("glGetError()"));
    }

    #[test]
    fn profiling_exposes_stats() {
        let mut gl = InstrumentationBuilder::from_config(InstrumentationConfig::disabled())
            .profiling(true)
            .build(HeadlessGl::new())
            .unwrap();

        gl.draw_arrays(GL_TRIANGLES, 0, 3).unwrap();
        gl.draw_arrays(GL_TRIANGLES, 3, 3).unwrap();

        let stats = gl.stats().expect("profiling enabled").snapshot();
        assert_eq!(stats.draw_calls, 2);
        assert_eq!(stats.vertices, 6);
    }

    #[test]
    fn profiler_ignores_error_polls() {
        let sink = Arc::new(MemorySink::new());
        let mut gl = InstrumentationBuilder::new()
            .profiling(true)
            .sink(sink.clone())
            .build(HeadlessGl::new())
            .unwrap();

        gl.clear(GL_COLOR_BUFFER_BIT).unwrap();
        gl.draw_arrays(GL_TRIANGLES, 0, 3).unwrap();
        assert_eq!(gl.enable(0xBEEF), Err(GlError::InvalidEnum));

        let stats = gl.stats().expect("profiling enabled").snapshot();
        assert_eq!(stats.calls, 3);
        assert_eq!(stats.count_for("glGetError"), 0);
        assert_ne!(stats.busiest()[0].0, "glGetError");
        // The checker's polls are still logged.
        assert_eq!(sink.lines().iter().filter(|l| l.ends_with("glGetError()")).count(), 3);
    }

    #[test]
    fn unopenable_log_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("no-such-dir").join("gl.log");
        let result = InstrumentationBuilder::new()
            .log_target(LogTarget::File { path: missing })
            .build(HeadlessGl::new());

        let err = result.err().expect("missing directory cannot be opened");
        assert!(err.to_string().starts_with("Failed to open GL log file"));
    }
}
