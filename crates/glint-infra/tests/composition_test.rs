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

use glint_core::consts::*;
use glint_core::{CallHooks, Gl20, GlError, GlResult, Operation, OPERATIONS};
use glint_infra::{
    DrainMode, ErrorSignalingPolicy, HeadlessGl, Interceptor, LoggingPolicy, MemorySink,
    ProfilingPolicy,
};
use std::sync::Arc;

/// Shows policy diagnostics (drained errors, sink failures) with `--nocapture`.
fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Records the GL name of every call it sees.
#[derive(Default)]
struct Recorder {
    names: Vec<&'static str>,
}

impl<G: Gl20 + ?Sized> CallHooks<G> for Recorder {
    fn call(&mut self, op: &Operation<'_>) -> GlResult<()> {
        self.names.push(op.name());
        Ok(())
    }
}

#[test]
fn test_logged_and_checked_call_reaches_backend_once() {
    init_logging();
    // --- 1. ARRANGE ---
    let sink = Arc::new(MemorySink::new());
    let logged = Interceptor::new(HeadlessGl::new(), LoggingPolicy::with_sink(sink.clone()));
    let mut gl = Interceptor::new(logged, ErrorSignalingPolicy::new());

    // --- 2. ACT ---
    let result = gl.enable(0x1234);

    // --- 3. ASSERT ---
    assert_eq!(result, Err(GlError::InvalidEnum));

    let lines = sink.lines();
    // Session marker, the call, then the error poll issued by the outer layer.
    assert_eq!(lines.len(), 3);
    assert!(lines[1].ends_with("] glEnable(4660)"), "got {}", lines[1]);
    assert!(lines[2].ends_with("] glGetError()"), "got {}", lines[2]);

    let backend = gl.backend().backend();
    assert_eq!(backend.journal(), ["glEnable", "glGetError"]);
    assert_eq!(backend.pending_errors(), 0);
}

#[test]
fn test_inner_error_checking_is_not_logged_twice() {
    init_logging();
    // Error checking nested inside logging polls the backend directly, so the
    // log only shows the application's calls.
    let sink = Arc::new(MemorySink::new());
    let checked = Interceptor::new(HeadlessGl::new(), ErrorSignalingPolicy::new());
    let mut gl = Interceptor::new(checked, LoggingPolicy::with_sink(sink.clone()));

    assert_eq!(gl.viewport(0, 0, -1, -1), Err(GlError::InvalidValue));
    gl.viewport(0, 0, 800, 600).expect("valid viewport");

    let lines = sink.lines();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].ends_with("glViewport(0, 0, -1, -1)"));
    assert!(lines[2].ends_with("glViewport(0, 0, 800, 600)"));
    assert_eq!(gl.backend().backend().viewport_rect(), [0, 0, 800, 600]);
}

#[test]
fn test_every_operation_is_intercepted_under_its_gl_name() {
    init_logging();
    let mut gl = Interceptor::new(HeadlessGl::new(), Recorder::default());

    macro_rules! call_every_operation {
        ($(
            $(#[$attr:meta])*
            fn $method:ident => $gl_name:literal ($($arg:ident : $ty:ty),* $(,)?) $(-> $ret:ty)?;
        )*) => {
            $(
                gl.$method($(<$ty as Default>::default()),*)
                    .unwrap_or_else(|e| panic!("{} failed: {e}", $gl_name));
            )*
        };
    }
    glint_core::for_each_gl_operation!(call_every_operation);

    let expected: Vec<&str> = OPERATIONS.iter().map(|info| info.gl_name).collect();
    assert_eq!(gl.hooks().names, expected);
    assert_eq!(gl.backend().journal(), expected.as_slice());
}

#[test]
fn test_backend_failure_skips_after_hook() {
    init_logging();
    let mut gl = Interceptor::new(HeadlessGl::new(), ErrorSignalingPolicy::new());
    gl.backend_mut().fail_next("context lost");

    let result = gl.draw_arrays(GL_TRIANGLES, 0, 3);

    assert!(matches!(result, Err(GlError::Backend { operation: "glDrawArrays", .. })));
    // The error state was never polled.
    assert!(gl.backend().journal().is_empty());
}

#[test]
fn test_full_stack_frame() {
    init_logging();
    let sink = Arc::new(MemorySink::new());
    let profiling = ProfilingPolicy::new();
    let stats = profiling.stats();

    let logged = Interceptor::new(HeadlessGl::new(), LoggingPolicy::with_sink(sink.clone()));
    let checked = Interceptor::new(logged, ErrorSignalingPolicy::draining());
    let mut gl = Interceptor::new(checked, profiling);

    let vs = gl.create_shader(GL_VERTEX_SHADER).unwrap();
    gl.shader_source(vs, "void main() {}").unwrap();
    gl.compile_shader(vs).unwrap();
    let fs = gl.create_shader(GL_FRAGMENT_SHADER).unwrap();
    gl.shader_source(fs, "void main() {}").unwrap();
    gl.compile_shader(fs).unwrap();
    let program = gl.create_program().unwrap();
    gl.attach_shader(program, vs).unwrap();
    gl.attach_shader(program, fs).unwrap();
    gl.link_program(program).unwrap();
    gl.use_program(program).unwrap();

    let mut textures = [0u32; 2];
    gl.gen_textures(&mut textures).unwrap();
    gl.bind_texture(GL_TEXTURE_2D, textures[0]).unwrap();
    gl.uniform_matrix_4fv(0, 1, false, &[0.0; 16]).unwrap();
    gl.clear(GL_COLOR_BUFFER_BIT | GL_DEPTH_BUFFER_BIT).unwrap();
    gl.draw_arrays(GL_TRIANGLES, 0, 36).unwrap();

    assert_eq!(gl.backend().hooks().mode(), DrainMode::Drain);

    // Error polls happen below the profiler and are not counted.
    let snapshot = stats.snapshot();
    assert_eq!(snapshot.count_for("glGetError"), 0);
    assert_eq!(snapshot.calls, 16);
    assert_eq!(snapshot.draw_calls, 1);
    assert_eq!(snapshot.vertices, 36);
    assert_eq!(snapshot.shader_switches, 1);
    assert_eq!(snapshot.texture_bindings, 1);

    let lines = sink.lines();
    assert!(lines
        .iter()
        .any(|l| l.ends_with("glUniformMatrix4fv(0, 1, false, &[f32; 16])")));
    assert!(lines.iter().any(|l| l.ends_with("glGenTextures(&mut [u32; 2])")));
    // They still reach the backend, so the log shows them.
    assert_eq!(lines.iter().filter(|l| l.ends_with("glGetError()")).count(), 16);
}

#[test]
fn test_profiler_counts_failed_calls_once() {
    init_logging();
    let profiling = ProfilingPolicy::new();
    let stats = profiling.stats();
    let checked = Interceptor::new(HeadlessGl::new(), ErrorSignalingPolicy::new());
    let mut gl = Interceptor::new(checked, profiling);

    assert_eq!(gl.draw_arrays(GL_TRIANGLES, 0, -1), Err(GlError::InvalidValue));
    gl.flush().expect("error state was cleared by the failed call");

    let snapshot = stats.snapshot();
    assert_eq!(snapshot.calls, 2);
    assert_eq!(snapshot.busiest()[0].1, 1);
    assert_eq!(snapshot.count_for("glGetError"), 0);
}
