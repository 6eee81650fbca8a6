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

//! The hook protocol run around every intercepted call.

use crate::arg::Operation;
use crate::contract::Gl20;
use crate::error::GlResult;

/// Extension points invoked by an interceptor around each delegated call.
///
/// For every operation the interceptor runs, in order: [`call`](Self::call)
/// with the captured operation, [`before`](Self::before), the backend
/// operation itself, then [`after`](Self::after). An `Err` from any step is
/// returned to the caller and the remaining steps are skipped.
///
/// All hooks default to no-ops, so a policy only overrides what it needs.
pub trait CallHooks<G: Gl20 + ?Sized> {
    /// Observes the operation about to be delegated. Must not alter the call.
    fn call(&mut self, op: &Operation<'_>) -> GlResult<()> {
        let _ = op;
        Ok(())
    }

    /// Runs right before the backend operation.
    fn before(&mut self, backend: &mut G) -> GlResult<()> {
        let _ = backend;
        Ok(())
    }

    /// Runs right after the backend operation returned successfully.
    fn after(&mut self, backend: &mut G) -> GlResult<()> {
        let _ = backend;
        Ok(())
    }
}

impl<G: Gl20 + ?Sized> CallHooks<G> for () {}

impl<G, H> CallHooks<G> for Box<H>
where
    G: Gl20 + ?Sized,
    H: CallHooks<G> + ?Sized,
{
    fn call(&mut self, op: &Operation<'_>) -> GlResult<()> {
        (**self).call(op)
    }

    fn before(&mut self, backend: &mut G) -> GlResult<()> {
        (**self).before(backend)
    }

    fn after(&mut self, backend: &mut G) -> GlResult<()> {
        (**self).after(backend)
    }
}
