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

use glint_core::DiagnosticSink;
use std::io;

/// Forwards lines to the `log` facade under a fixed target tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogChannelSink {
    tag: String,
    level: log::Level,
}

impl LogChannelSink {
    /// Logs at `Info` level under `tag`.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            level: log::Level::Info,
        }
    }

    /// Overrides the level lines are logged at.
    pub fn with_level(mut self, level: log::Level) -> Self {
        self.level = level;
        self
    }

    /// The log target.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// The level lines are logged at.
    pub fn level(&self) -> log::Level {
        self.level
    }
}

impl DiagnosticSink for LogChannelSink {
    fn write_line(&self, line: &str) -> io::Result<()> {
        log::log!(target: self.tag.as_str(), self.level, "{line}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_info() {
        let sink = LogChannelSink::new("GL");
        assert_eq!(sink.tag(), "GL");
        assert_eq!(sink.level(), log::Level::Info);
        assert!(sink.write_line("glFlush()").is_ok());
    }

    #[test]
    fn level_can_be_lowered() {
        let sink = LogChannelSink::new("GL").with_level(log::Level::Trace);
        assert_eq!(sink.level(), log::Level::Trace);
    }
}
