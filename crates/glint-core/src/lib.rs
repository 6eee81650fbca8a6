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

//! # Glint Core
//!
//! Foundational crate containing the GL API contract, the captured-argument
//! model, the GL error taxonomy, and the hook and sink contracts that the
//! interception layer is built on.
//!
//! Concrete interceptors, policies, and backends live in `glint-infra`.

#![warn(missing_docs)]

pub mod arg;
pub mod consts;
pub mod contract;
pub mod error;
pub mod hook;
pub mod sink;

pub use arg::{AsGlArg, BufferElement, BufferRef, ElementKind, GlArg, Operation};
pub use contract::{Gl20, OperationInfo, OPERATIONS};
pub use error::{ErrorCode, GlError, GlResult};
pub use hook::CallHooks;
pub use sink::DiagnosticSink;
