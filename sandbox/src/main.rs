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

// Glint Sandbox
// Renders a few frames through an instrumented headless context.
//
// Usage: sandbox [config.ron]

use anyhow::{Context, Result};
use glint_sdk::prelude::consts::*;
use glint_sdk::prelude::*;

const VERTEX_SHADER: &str = "attribute vec3 a_position;
uniform mat4 u_mvp;
void main() { gl_Position = u_mvp * vec4(a_position, 1.0); }";

const FRAGMENT_SHADER: &str = "precision mediump float;
uniform vec4 u_color;
void main() { gl_FragColor = u_color; }";

const IDENTITY: [f32; 16] = [
    1.0, 0.0, 0.0, 0.0, //
    0.0, 1.0, 0.0, 0.0, //
    0.0, 0.0, 1.0, 0.0, //
    0.0, 0.0, 0.0, 1.0,
];

struct Scene {
    program: u32,
    texture: u32,
    mvp: i32,
    color: i32,
}

fn compile(gl: &mut dyn Gl20, kind: u32, source: &str) -> Result<u32> {
    let shader = gl.create_shader(kind)?;
    gl.shader_source(shader, source)?;
    gl.compile_shader(shader)?;

    let mut status = [0];
    gl.get_shaderiv(shader, GL_COMPILE_STATUS, &mut status)?;
    if status[0] == 0 {
        anyhow::bail!("shader compilation failed: {}", gl.get_shader_info_log(shader)?);
    }
    Ok(shader)
}

fn setup(gl: &mut dyn Gl20) -> Result<Scene> {
    log::info!("Renderer: {}", gl.get_string(GL_RENDERER)?);

    let vs = compile(gl, GL_VERTEX_SHADER, VERTEX_SHADER).context("vertex stage")?;
    let fs = compile(gl, GL_FRAGMENT_SHADER, FRAGMENT_SHADER).context("fragment stage")?;
    let program = gl.create_program()?;
    gl.attach_shader(program, vs)?;
    gl.attach_shader(program, fs)?;
    gl.bind_attrib_location(program, 0, "a_position")?;
    gl.link_program(program)?;
    gl.delete_shader(vs)?;
    gl.delete_shader(fs)?;

    let texture = gl.gen_texture()?;
    gl.bind_texture(GL_TEXTURE_2D, texture)?;
    gl.tex_image_2d(GL_TEXTURE_2D, 0, GL_RGBA as i32, 64, 64, 0, GL_RGBA, GL_UNSIGNED_BYTE, None)?;

    let mvp = gl.get_uniform_location(program, "u_mvp")?;
    let color = gl.get_uniform_location(program, "u_color")?;

    gl.viewport(0, 0, 1280, 720)?;
    gl.enable(GL_DEPTH_TEST)?;

    Ok(Scene {
        program,
        texture,
        mvp,
        color,
    })
}

fn render(gl: &mut dyn Gl20, scene: &Scene, frame: u32) -> Result<()> {
    let pulse = (frame as f32 * 0.25).sin().abs();
    gl.clear_color(0.05, 0.05, 0.08, 1.0)?;
    gl.clear(GL_COLOR_BUFFER_BIT | GL_DEPTH_BUFFER_BIT)?;
    gl.use_program(scene.program)?;
    gl.active_texture(GL_TEXTURE0)?;
    gl.bind_texture(GL_TEXTURE_2D, scene.texture)?;
    gl.uniform_matrix_4fv(scene.mvp, 1, false, &IDENTITY)?;
    gl.uniform_4f(scene.color, pulse, 0.4, 0.9, 1.0)?;
    gl.enable_vertex_attrib_array(0)?;
    gl.vertex_attrib_pointer_offset(0, 3, GL_FLOAT, false, 0, 0)?;
    gl.draw_arrays(GL_TRIANGLES, 0, 36)?;
    gl.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => InstrumentationConfig::load(&path)?,
        None => InstrumentationConfig {
            profiling: true,
            ..InstrumentationConfig::default()
        },
    };
    log::info!("Instrumentation config: {config:?}");

    let mut gl = InstrumentationBuilder::from_config(config).build(HeadlessGl::new())?;

    let scene = setup(&mut *gl)?;
    for frame in 0..3 {
        render(&mut *gl, &scene, frame)?;
    }

    // A deliberate misuse to show how errors surface through the stack.
    match gl.enable(0x0BAD) {
        Ok(()) => log::warn!("glEnable(0x0BAD) was accepted"),
        Err(e) => log::info!("glEnable(0x0BAD) failed as expected: {e}"),
    }

    if let Some(stats) = gl.stats() {
        let snapshot = stats.snapshot();
        log::info!("--- GL Call Summary ---");
        log::info!(
            "  {} calls, {} draw calls, {} vertices",
            snapshot.calls,
            snapshot.draw_calls,
            snapshot.vertices
        );
        log::info!(
            "  {} shader switches, {} texture bindings",
            snapshot.shader_switches,
            snapshot.texture_bindings
        );
        for (name, count) in snapshot.busiest().into_iter().take(5) {
            log::info!("  {name}: {count}");
        }
        log::info!("-----------------------");
    }

    Ok(())
}
