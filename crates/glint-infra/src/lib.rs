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

//! # Glint Infra
//!
//! Concrete implementations on top of the `glint-core` contracts:
//!
//! - [`Interceptor`], the decorator that runs a [`CallHooks`] policy around
//!   every operation of a wrapped [`Gl20`] backend;
//! - the instrumentation policies ([`LoggingPolicy`], [`ErrorSignalingPolicy`],
//!   [`ProfilingPolicy`]);
//! - diagnostic sinks ([`LogChannelSink`], [`StreamSink`], [`MemorySink`]);
//! - [`HeadlessGl`], a GPU-less backend for tests and tooling.
//!
//! Policies compose by nesting interceptors:
//!
//! ```
//! use glint_core::Gl20;
//! use glint_infra::{ErrorSignalingPolicy, HeadlessGl, Interceptor, LoggingPolicy, MemorySink};
//! use std::sync::Arc;
//!
//! let sink = Arc::new(MemorySink::new());
//! let logged = Interceptor::new(HeadlessGl::new(), LoggingPolicy::with_sink(sink.clone()));
//! let mut gl = Interceptor::new(logged, ErrorSignalingPolicy::new());
//!
//! gl.clear(glint_core::consts::GL_COLOR_BUFFER_BIT).unwrap();
//! assert!(gl.enable(0xFFFF).is_err());
//! ```
//!
//! [`CallHooks`]: glint_core::CallHooks
//! [`Gl20`]: glint_core::Gl20

#![warn(missing_docs)]

pub mod headless;
pub mod interceptor;
pub mod policy;
pub mod sink;

pub use headless::HeadlessGl;
pub use interceptor::Interceptor;
pub use policy::error_signaling::{DrainMode, ErrorSignalingPolicy, MAX_DRAIN_POLLS};
pub use policy::logging::{LoggingPolicy, DEFAULT_LOG_TAG};
pub use policy::profiling::{GlCallStats, ProfilingPolicy, StatsHandle};
pub use sink::{LogChannelSink, MemorySink, StreamSink};

/// A backend that logs every call.
pub type LoggingGl<G, S = LogChannelSink> = Interceptor<G, LoggingPolicy<S>>;

/// A backend that raises the first pending GL error after every call.
pub type ErrorCheckedGl<G> = Interceptor<G, ErrorSignalingPolicy>;

/// A backend that counts calls into a shared [`StatsHandle`].
pub type ProfiledGl<G> = Interceptor<G, ProfilingPolicy>;
