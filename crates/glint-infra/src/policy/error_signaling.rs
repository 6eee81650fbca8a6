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

//! Error-signaling policy: turns the GL error state into typed failures.

use glint_core::{CallHooks, ErrorCode, Gl20, GlResult};

/// Upper bound on extra `glGetError` polls in [`DrainMode::Drain`].
///
/// A lost context may report an error on every poll, so draining never loops
/// unbounded.
pub const MAX_DRAIN_POLLS: usize = 32;

/// What to do with error codes still pending after the first one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrainMode {
    /// Raise the first pending error and leave the rest for the next call.
    #[default]
    FirstOnly,
    /// Raise the first pending error after polling the rest away, logging
    /// each discarded code.
    Drain,
}

/// Queries the backend's error state after every call.
///
/// If `glGetError` reports anything but `GL_NO_ERROR`, the matching
/// [`GlError`](glint_core::GlError) is returned from the after hook, which
/// aborts the call. Codes outside the known set are raised as
/// [`GlError::Unrecognized`](glint_core::GlError::Unrecognized).
///
/// The policy never clears the error state beforehand, so an error left
/// behind by an earlier unchecked call surfaces on the next checked one.
#[derive(Debug, Clone, Default)]
pub struct ErrorSignalingPolicy {
    mode: DrainMode,
}

impl ErrorSignalingPolicy {
    /// Raises the first pending error per call.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raises the first pending error and discards the others.
    pub fn draining() -> Self {
        Self {
            mode: DrainMode::Drain,
        }
    }

    /// Builds a policy with an explicit drain mode.
    pub fn with_mode(mode: DrainMode) -> Self {
        Self { mode }
    }

    /// The configured drain mode.
    pub fn mode(&self) -> DrainMode {
        self.mode
    }

    /// Polls `backend` once and raises its pending error, if any.
    pub fn check<G: Gl20 + ?Sized>(&self, backend: &mut G) -> GlResult<()> {
        let raw = backend.get_error()?;
        let Some(error) = ErrorCode::error_for_raw(raw) else {
            return Ok(());
        };
        if self.mode == DrainMode::Drain {
            drain_remaining(backend)?;
        }
        log::debug!("GL error state reported 0x{raw:04X}: {error}");
        Err(error)
    }
}

fn drain_remaining<G: Gl20 + ?Sized>(backend: &mut G) -> GlResult<()> {
    for _ in 0..MAX_DRAIN_POLLS {
        let raw = backend.get_error()?;
        if raw == ErrorCode::NoError.raw() {
            return Ok(());
        }
        log::warn!("Discarding additional pending GL error 0x{raw:04X}");
    }
    log::warn!("GL error state still not clear after {MAX_DRAIN_POLLS} extra polls");
    Ok(())
}

impl<G: Gl20 + ?Sized> CallHooks<G> for ErrorSignalingPolicy {
    fn after(&mut self, backend: &mut G) -> GlResult<()> {
        self.check(backend)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessGl;
    use crate::interceptor::Interceptor;
    use glint_core::consts::*;
    use glint_core::GlError;

    #[test]
    fn clear_error_state_passes() {
        let mut backend = HeadlessGl::new();
        assert_eq!(ErrorSignalingPolicy::new().check(&mut backend), Ok(()));
        assert_eq!(backend.journal(), ["glGetError"]);
    }

    #[test]
    fn first_pending_error_is_raised_after_a_single_poll() {
        let mut backend = HeadlessGl::new();
        backend.push_error(GL_INVALID_VALUE);

        let policy = ErrorSignalingPolicy::new();
        assert_eq!(policy.check(&mut backend), Err(GlError::InvalidValue));
        assert_eq!(backend.journal(), ["glGetError"]);
    }

    #[test]
    fn remaining_errors_surface_on_the_next_call() {
        let mut backend = HeadlessGl::new();
        backend.push_error(GL_INVALID_ENUM);
        backend.push_error(GL_OUT_OF_MEMORY);
        let mut gl = Interceptor::new(backend, ErrorSignalingPolicy::new());

        assert_eq!(gl.flush(), Err(GlError::InvalidEnum));
        assert_eq!(gl.flush(), Err(GlError::OutOfMemory));
        assert_eq!(gl.flush(), Ok(()));
    }

    #[test]
    fn draining_discards_the_remaining_errors() {
        let mut backend = HeadlessGl::new();
        backend.push_error(GL_INVALID_OPERATION);
        backend.push_error(GL_INVALID_VALUE);
        let mut gl = Interceptor::new(backend, ErrorSignalingPolicy::draining());

        assert_eq!(gl.flush(), Err(GlError::InvalidOperation));
        assert_eq!(gl.backend().pending_errors(), 0);
        assert_eq!(gl.flush(), Ok(()));
    }

    #[test]
    fn draining_is_bounded() {
        let mut backend = HeadlessGl::new();
        for _ in 0..(MAX_DRAIN_POLLS + 10) {
            backend.push_error(GL_OUT_OF_MEMORY);
        }
        let policy = ErrorSignalingPolicy::draining();

        assert_eq!(policy.check(&mut backend), Err(GlError::OutOfMemory));
        assert_eq!(backend.journal().len(), MAX_DRAIN_POLLS + 1);
        assert_eq!(backend.pending_errors(), 9);
    }

    #[test]
    fn unknown_codes_are_raised() {
        let mut backend = HeadlessGl::new();
        backend.push_error(0x0507);
        let policy = ErrorSignalingPolicy::new();
        assert_eq!(policy.check(&mut backend), Err(GlError::Unrecognized(0x0507)));
    }

    #[test]
    fn misuse_reported_by_the_backend_aborts_the_call() {
        let mut gl = Interceptor::new(HeadlessGl::new(), ErrorSignalingPolicy::new());
        assert_eq!(gl.draw_arrays(GL_TRIANGLES, 0, -1), Err(GlError::InvalidValue));
        assert_eq!(gl.backend().journal(), ["glDrawArrays", "glGetError"]);
    }
}
