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

//! Profiling policy: call counters for frame statistics.

use ahash::AHashMap;
use glint_core::{CallHooks, Gl20, GlArg, GlResult, Operation};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Call counters accumulated by a [`ProfilingPolicy`].
#[derive(Debug, Clone, Default)]
pub struct GlCallStats {
    /// Every intercepted call.
    pub calls: u64,
    /// `glDrawArrays` and `glDrawElements` calls.
    pub draw_calls: u64,
    /// `glUseProgram` calls.
    pub shader_switches: u64,
    /// `glBindTexture` calls.
    pub texture_bindings: u64,
    /// Sum of the `count` argument of all draw calls.
    pub vertices: u64,
    per_operation: AHashMap<&'static str, u64>,
}

impl GlCallStats {
    /// Accounts for one intercepted call.
    pub fn record(&mut self, op: &Operation<'_>) {
        self.calls += 1;
        *self.per_operation.entry(op.name()).or_insert(0) += 1;

        match op.name() {
            "glDrawArrays" => self.record_draw(op.arg(2)),
            "glDrawElements" => self.record_draw(op.arg(1)),
            "glUseProgram" => self.shader_switches += 1,
            "glBindTexture" => self.texture_bindings += 1,
            _ => {}
        }
    }

    fn record_draw(&mut self, count: Option<GlArg<'_>>) {
        self.draw_calls += 1;
        if let Some(GlArg::Int(count)) = count {
            self.vertices += u64::try_from(count).unwrap_or(0);
        }
    }

    /// Number of calls made to the GL entry point `gl_name`.
    pub fn count_for(&self, gl_name: &str) -> u64 {
        self.per_operation.get(gl_name).copied().unwrap_or(0)
    }

    /// Per-entry-point call counts, most called first.
    pub fn busiest(&self) -> Vec<(&'static str, u64)> {
        let mut counts: Vec<_> = self
            .per_operation
            .iter()
            .map(|(name, count)| (*name, *count))
            .collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        counts
    }

    /// Zeroes every counter.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Shared handle to the counters of a [`ProfilingPolicy`].
///
/// Cloning the handle shares the counters; read them with
/// [`snapshot`](Self::snapshot) and zero them once per frame with
/// [`reset`](Self::reset).
#[derive(Debug, Clone, Default)]
pub struct StatsHandle {
    inner: Arc<Mutex<GlCallStats>>,
}

impl StatsHandle {
    fn lock(&self) -> MutexGuard<'_, GlCallStats> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// A copy of the current counters.
    pub fn snapshot(&self) -> GlCallStats {
        self.lock().clone()
    }

    /// Zeroes the counters.
    pub fn reset(&self) {
        self.lock().reset();
    }

    fn record(&self, op: &Operation<'_>) {
        self.lock().record(op);
    }
}

/// Counts calls, draw calls, shader switches, texture bindings and vertices.
#[derive(Debug, Clone, Default)]
pub struct ProfilingPolicy {
    stats: StatsHandle,
}

impl ProfilingPolicy {
    /// Creates a policy with fresh counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a policy that accumulates into existing counters.
    pub fn with_handle(stats: StatsHandle) -> Self {
        Self { stats }
    }

    /// Handle to this policy's counters.
    pub fn stats(&self) -> StatsHandle {
        self.stats.clone()
    }
}

impl<G: Gl20 + ?Sized> CallHooks<G> for ProfilingPolicy {
    fn call(&mut self, op: &Operation<'_>) -> GlResult<()> {
        self.stats.record(op);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessGl;
    use crate::interceptor::Interceptor;
    use glint_core::consts::*;

    #[test]
    fn counts_a_frame() {
        let policy = ProfilingPolicy::new();
        let stats = policy.stats();
        let mut gl = Interceptor::new(HeadlessGl::new(), policy);

        let texture = gl.gen_texture().unwrap();
        gl.bind_texture(GL_TEXTURE_2D, texture).unwrap();
        gl.use_program(0).unwrap();
        gl.draw_arrays(GL_TRIANGLES, 0, 6).unwrap();
        gl.draw_elements(GL_TRIANGLES, 3, GL_UNSIGNED_BYTE, &[0, 1, 2])
            .unwrap();
        gl.draw_elements_offset(GL_TRIANGLE_STRIP, 4, GL_UNSIGNED_SHORT, 0)
            .unwrap();

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.calls, 6);
        assert_eq!(snapshot.draw_calls, 3);
        assert_eq!(snapshot.vertices, 13);
        assert_eq!(snapshot.shader_switches, 1);
        assert_eq!(snapshot.texture_bindings, 1);
        assert_eq!(snapshot.count_for("glDrawElements"), 2);
        assert_eq!(snapshot.busiest()[0], ("glDrawElements", 2));
    }

    #[test]
    fn reset_zeroes_shared_counters() {
        let policy = ProfilingPolicy::new();
        let stats = policy.stats();
        let mut gl = Interceptor::new(HeadlessGl::new(), policy);
        gl.flush().unwrap();
        assert_eq!(stats.snapshot().calls, 1);

        stats.reset();
        let snapshot = stats.snapshot();
        assert_eq!(snapshot.calls, 0);
        assert_eq!(snapshot.count_for("glFlush"), 0);
    }

    #[test]
    fn negative_counts_add_no_vertices() {
        let mut stats = GlCallStats::default();
        let args = [GlArg::Uint(GL_TRIANGLES), GlArg::Int(0), GlArg::Int(-3)];
        stats.record(&Operation::new("glDrawArrays", &args));
        assert_eq!(stats.draw_calls, 1);
        assert_eq!(stats.vertices, 0);
    }
}
