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
use glint_core::GlError;
use glint_infra::HeadlessGl;
use glint_sdk::{InstrumentationBuilder, InstrumentationConfig, LogTarget};
use std::fs;

#[test]
fn test_config_file_drives_a_file_logged_stack() {
    // --- 1. ARRANGE ---
    let dir = tempfile::tempdir().expect("temp dir");
    let log_path = dir.path().join("gl.log");
    let config_path = dir.path().join("glint.ron");
    let config = InstrumentationConfig {
        profiling: true,
        drain_errors: true,
        log_target: LogTarget::File {
            path: log_path.clone(),
        },
        ..InstrumentationConfig::default()
    };
    fs::write(&config_path, config.to_ron_string().unwrap()).unwrap();

    // --- 2. ACT ---
    let loaded = InstrumentationConfig::load(&config_path).expect("config loads");
    let mut gl = InstrumentationBuilder::from_config(loaded)
        .build(HeadlessGl::new())
        .expect("stack builds");

    gl.clear_color(0.1, 0.2, 0.3, 1.0).unwrap();
    gl.clear(GL_COLOR_BUFFER_BIT).unwrap();
    let failed = gl.draw_arrays(GL_TRIANGLES, 0, -3);
    let stats = gl.stats().expect("profiling enabled").snapshot();
    drop(gl);

    // --- 3. ASSERT ---
    assert_eq!(failed, Err(GlError::InvalidValue));
    assert_eq!(stats.draw_calls, 1);
    assert_eq!(stats.vertices, 0);

    let log = fs::read_to_string(&log_path).expect("log file written");
    let lines: Vec<&str> = log.lines().collect();
    assert!(lines[0].starts_with("--- GL session started at "));
    assert!(lines[1].ends_with("] glClearColor(0.1, 0.2, 0.3, 1.0)"));
    assert!(lines.iter().any(|l| l.ends_with("] glDrawArrays(4, 0, -3)")));
}

#[test]
fn test_missing_config_file_names_the_path() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("absent.ron");

    let err = InstrumentationConfig::load(&path).unwrap_err();

    assert!(err.to_string().contains("absent.ron"));
}
