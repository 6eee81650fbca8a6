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

//! The generic interception decorator.

use glint_core::{AsGlArg, CallHooks, Gl20, GlResult, Operation};

/// Wraps a [`Gl20`] backend and runs a [`CallHooks`] policy around each call.
///
/// For every operation `op(args) -> R` the interceptor:
/// 1. passes the GL name and the captured arguments to [`CallHooks::call`],
/// 2. runs [`CallHooks::before`],
/// 3. delegates `op(args)` to the backend,
/// 4. runs [`CallHooks::after`],
/// 5. returns the backend's value unchanged.
///
/// Nothing is caught: the first `Err` from a hook or the backend is returned
/// as-is and the remaining steps do not run.
///
/// Since `Interceptor` is itself a [`Gl20`], interceptors nest; the outermost
/// one owns the whole chain.
#[derive(Debug, Clone, Default)]
pub struct Interceptor<G, H> {
    backend: G,
    hooks: H,
}

impl<G, H> Interceptor<G, H> {
    /// Wraps `backend` with the `hooks` policy.
    pub fn new(backend: G, hooks: H) -> Self {
        Self { backend, hooks }
    }

    /// The wrapped backend.
    pub fn backend(&self) -> &G {
        &self.backend
    }

    /// Mutable access to the wrapped backend. Calls made through it bypass the hooks.
    pub fn backend_mut(&mut self) -> &mut G {
        &mut self.backend
    }

    /// The hook policy.
    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    /// Mutable access to the hook policy.
    pub fn hooks_mut(&mut self) -> &mut H {
        &mut self.hooks
    }

    /// Unwraps the interceptor into its backend and policy.
    pub fn into_inner(self) -> (G, H) {
        (self.backend, self.hooks)
    }
}

impl<G: Gl20, H: CallHooks<G>> Interceptor<G, H> {
    #[inline]
    fn enter(&mut self, op: Operation<'_>) -> GlResult<()> {
        self.hooks.call(&op)?;
        self.hooks.before(&mut self.backend)
    }

    #[inline]
    fn leave(&mut self) -> GlResult<()> {
        self.hooks.after(&mut self.backend)
    }
}

macro_rules! intercept_operations {
    ($(
        $(#[$attr:meta])*
        fn $method:ident => $gl_name:literal ($($arg:ident : $ty:ty),* $(,)?) $(-> $ret:ty)?;
    )*) => {
        impl<G: Gl20, H: CallHooks<G>> Gl20 for Interceptor<G, H> {
            $(
                fn $method(&mut self, $($arg: $ty),*) -> GlResult<glint_core::gl_return_type!($($ret)?)> {
                    // The captured arguments only borrow for this statement, so
                    // out-parameters are free to be passed on mutably below.
                    self.enter(Operation::new($gl_name, &[$(AsGlArg::as_gl_arg(&$arg)),*]))?;
                    let value = Gl20::$method(&mut self.backend, $($arg),*)?;
                    self.leave()?;
                    Ok(value)
                }
            )*
        }
    };
}

glint_core::for_each_gl_operation!(intercept_operations);
