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

use anyhow::{Context, Result};
use glint_infra::DEFAULT_LOG_TAG;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Where the logging layer writes its lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogTarget {
    /// The `log` facade, under the given target tag.
    Channel { tag: String },
    /// Standard output, one flushed line per call.
    Stdout,
    /// Standard error, one flushed line per call.
    Stderr,
    /// A file, truncated when the layer is built.
    File { path: PathBuf },
}

impl Default for LogTarget {
    fn default() -> Self {
        LogTarget::Channel {
            tag: DEFAULT_LOG_TAG.to_owned(),
        }
    }
}

/// Selects the instrumentation layers wrapped around a backend.
///
/// Missing fields take their default, so an empty `()` document is a valid
/// configuration:
///
/// ```
/// use glint_sdk::{InstrumentationConfig, LogTarget};
///
/// let config = InstrumentationConfig::from_ron_str("(profiling: true, log_target: Stderr)").unwrap();
/// assert!(config.logging && config.profiling);
/// assert_eq!(config.log_target, LogTarget::Stderr);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstrumentationConfig {
    /// Log every call. Defaults to `true`.
    pub logging: bool,
    /// Raise pending GL errors after every call. Defaults to `true`.
    pub error_checking: bool,
    /// Drain the whole error queue instead of stopping at the first code.
    pub drain_errors: bool,
    /// Count calls into a [`StatsHandle`](glint_infra::StatsHandle).
    pub profiling: bool,
    /// Destination of the logging layer. Defaults to the `log` facade under `"GL"`.
    pub log_target: LogTarget,
}

impl Default for InstrumentationConfig {
    fn default() -> Self {
        Self {
            logging: true,
            error_checking: true,
            drain_errors: false,
            profiling: false,
            log_target: LogTarget::default(),
        }
    }
}

impl InstrumentationConfig {
    /// A configuration with every layer turned off.
    pub fn disabled() -> Self {
        Self {
            logging: false,
            error_checking: false,
            drain_errors: false,
            profiling: false,
            log_target: LogTarget::default(),
        }
    }

    /// Parses a configuration from RON text.
    pub fn from_ron_str(text: &str) -> Result<Self> {
        ron::from_str(text).context("Failed to parse instrumentation config")
    }

    /// Reads and parses a RON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read instrumentation config {}", path.display()))?;
        Self::from_ron_str(&text).with_context(|| format!("Invalid config in {}", path.display()))
    }

    /// Renders the configuration as pretty-printed RON.
    pub fn to_ron_string(&self) -> Result<String> {
        let pretty = ron::ser::PrettyConfig::default().indentor("  ".to_string());
        ron::ser::to_string_pretty(self, pretty).context("Failed to serialize instrumentation config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_the_default() {
        let config = InstrumentationConfig::from_ron_str("()").unwrap();
        assert_eq!(config, InstrumentationConfig::default());
        assert_eq!(
            config.log_target,
            LogTarget::Channel {
                tag: "GL".to_owned()
            }
        );
    }

    #[test]
    fn parses_every_field() {
        let config = InstrumentationConfig::from_ron_str(
            r#"(
                logging: false,
                error_checking: true,
                drain_errors: true,
                profiling: true,
                log_target: File(path: "frame.log"),
            )"#,
        )
        .unwrap();
        assert!(!config.logging);
        assert!(config.drain_errors);
        assert!(config.profiling);
        assert_eq!(
            config.log_target,
            LogTarget::File {
                path: PathBuf::from("frame.log")
            }
        );
    }

    #[test]
    fn rejects_unknown_targets() {
        let err = InstrumentationConfig::from_ron_str("(log_target: Syslog)").unwrap_err();
        assert!(err.to_string().contains("instrumentation config"));
    }

    #[test]
    fn survives_a_ron_round_trip() {
        let config = InstrumentationConfig {
            profiling: true,
            log_target: LogTarget::Stdout,
            ..InstrumentationConfig::default()
        };
        let text = config.to_ron_string().unwrap();
        assert_eq!(InstrumentationConfig::from_ron_str(&text).unwrap(), config);
    }
}
