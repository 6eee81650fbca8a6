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

//! The public-facing entry point for Glint.
//!
//! Applications describe which instrumentation they want in an
//! [`InstrumentationConfig`] (usually a small RON file), hand a backend to an
//! [`InstrumentationBuilder`], and render through the resulting
//! [`Instrumented`] value exactly as they would through the bare backend.

mod builder;
mod config;

pub use builder::{InstrumentationBuilder, Instrumented};
pub use config::{InstrumentationConfig, LogTarget};

pub mod prelude {
    pub use crate::{InstrumentationBuilder, InstrumentationConfig, Instrumented, LogTarget};
    pub use glint_core::consts;
    pub use glint_core::{Gl20, GlError, GlResult};
    pub use glint_infra::{GlCallStats, HeadlessGl, StatsHandle};
}
