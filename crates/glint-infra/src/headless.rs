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

//! A GL backend that needs no GPU.
//!
//! [`HeadlessGl`] implements the whole [`Gl20`] contract in memory. It hands
//! out object names, tracks the objects and the bits of state the rest of the
//! workspace cares about, and reports misuse through the GL error state the
//! way a driver would, which makes it a realistic target for the
//! instrumentation policies in tests and tools.

use ahash::{AHashMap, AHashSet};
use glint_core::consts::*;
use glint_core::{ErrorCode, Gl20, GlError, GlResult};
use std::collections::VecDeque;

const TEXTURE_UNITS: u32 = 8;

const CAPABILITIES: [u32; 9] = [
    GL_BLEND,
    GL_CULL_FACE,
    GL_DEPTH_TEST,
    GL_DITHER,
    GL_POLYGON_OFFSET_FILL,
    GL_SAMPLE_ALPHA_TO_COVERAGE,
    GL_SAMPLE_COVERAGE,
    GL_SCISSOR_TEST,
    GL_STENCIL_TEST,
];

#[derive(Debug, Clone)]
struct Shader {
    kind: u32,
    source: String,
    compiled: bool,
}

#[derive(Debug, Clone, Default)]
struct Program {
    shaders: Vec<u32>,
    linked: bool,
    attributes: AHashMap<String, i32>,
    uniforms: AHashMap<String, i32>,
}

/// An in-memory GL implementation.
///
/// Misuse detected (unknown capabilities, negative sizes, unknown programs,
/// bad draw modes, ...) is recorded in the error state and returned by
/// [`Gl20::get_error`], oldest first. Like a real context, each error kind is
/// flagged at most once until it is read.
///
/// For scripted scenarios, [`push_error`](Self::push_error) queues raw codes
/// and [`fail_next`](Self::fail_next) makes the next call fail outright. Every
/// call that reaches the backend is appended to the [`journal`](Self::journal).
#[derive(Debug)]
pub struct HeadlessGl {
    next_name: u32,
    buffers: AHashSet<u32>,
    framebuffers: AHashSet<u32>,
    renderbuffers: AHashSet<u32>,
    textures: AHashSet<u32>,
    shaders: AHashMap<u32, Shader>,
    programs: AHashMap<u32, Program>,
    enabled: AHashSet<u32>,
    current_program: u32,
    active_texture: u32,
    viewport: [i32; 4],
    pending_errors: VecDeque<u32>,
    fail_next: Option<String>,
    journal: Vec<&'static str>,
}

impl Default for HeadlessGl {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessGl {
    /// Creates a context in the GL initial state.
    pub fn new() -> Self {
        let mut enabled = AHashSet::new();
        enabled.insert(GL_DITHER);
        Self {
            next_name: 1,
            buffers: AHashSet::new(),
            framebuffers: AHashSet::new(),
            renderbuffers: AHashSet::new(),
            textures: AHashSet::new(),
            shaders: AHashMap::new(),
            programs: AHashMap::new(),
            enabled,
            current_program: 0,
            active_texture: GL_TEXTURE0,
            viewport: [0; 4],
            pending_errors: VecDeque::new(),
            fail_next: None,
            journal: Vec::new(),
        }
    }

    /// Queues a raw error code, returned by a later `glGetError`.
    pub fn push_error(&mut self, code: u32) {
        self.pending_errors.push_back(code);
    }

    /// Number of error codes waiting to be read.
    pub fn pending_errors(&self) -> usize {
        self.pending_errors.len()
    }

    /// Makes the next call fail with [`GlError::Backend`] carrying `message`.
    pub fn fail_next(&mut self, message: impl Into<String>) {
        self.fail_next = Some(message.into());
    }

    /// GL names of every call that reached this backend, in order.
    pub fn journal(&self) -> &[&'static str] {
        &self.journal
    }

    /// Empties the journal.
    pub fn clear_journal(&mut self) {
        self.journal.clear();
    }

    /// The program installed by the last successful `glUseProgram`.
    pub fn current_program(&self) -> u32 {
        self.current_program
    }

    /// The current viewport rectangle.
    pub fn viewport_rect(&self) -> [i32; 4] {
        self.viewport
    }

    fn enter(&mut self, operation: &'static str) -> GlResult<()> {
        if let Some(message) = self.fail_next.take() {
            return Err(GlError::Backend { operation, message });
        }
        self.journal.push(operation);
        Ok(())
    }

    fn raise(&mut self, code: ErrorCode) {
        let raw = code.raw();
        if !self.pending_errors.contains(&raw) {
            log::trace!("headless GL flagged error 0x{raw:04X}");
            self.pending_errors.push_back(raw);
        }
    }

    /// Flags `GL_INVALID_VALUE` if any of `values` is negative.
    fn require_non_negative(&mut self, values: &[i32]) -> bool {
        if values.iter().any(|&v| v < 0) {
            self.raise(ErrorCode::InvalidValue);
            false
        } else {
            true
        }
    }

    fn require_capability(&mut self, cap: u32) -> bool {
        if CAPABILITIES.contains(&cap) {
            true
        } else {
            self.raise(ErrorCode::InvalidEnum);
            false
        }
    }

    fn require_draw_mode(&mut self, mode: u32) -> bool {
        if mode <= GL_TRIANGLE_FAN {
            true
        } else {
            self.raise(ErrorCode::InvalidEnum);
            false
        }
    }

    fn gen_name(&mut self) -> u32 {
        let name = self.next_name;
        self.next_name += 1;
        name
    }

    fn gen_names(&mut self, names: &mut [u32]) {
        for name in names {
            *name = self.gen_name();
        }
    }

    fn bind(objects: &mut AHashSet<u32>, name: u32) {
        if name != 0 {
            objects.insert(name);
        }
    }

    fn program_mut(&mut self, program: u32) -> Option<&mut Program> {
        if !self.programs.contains_key(&program) {
            self.raise(ErrorCode::InvalidValue);
        }
        self.programs.get_mut(&program)
    }

    fn shader_mut(&mut self, shader: u32) -> Option<&mut Shader> {
        if !self.shaders.contains_key(&shader) {
            self.raise(ErrorCode::InvalidValue);
        }
        self.shaders.get_mut(&shader)
    }

    fn uniform_call(&mut self, location: i32, count: i32) {
        if count < 0 {
            self.raise(ErrorCode::InvalidValue);
        } else if self.current_program == 0 && location != -1 {
            self.raise(ErrorCode::InvalidOperation);
        }
    }

    fn attrib_index(&mut self, index: u32) {
        if index >= 16 {
            self.raise(ErrorCode::InvalidValue);
        }
    }
}

fn fill<T: Copy>(out: &mut [T], values: &[T]) {
    for (slot, value) in out.iter_mut().zip(values) {
        *slot = *value;
    }
}

impl Gl20 for HeadlessGl {
    fn active_texture(&mut self, texture: u32) -> GlResult<()> {
        self.enter("glActiveTexture")?;
        if (GL_TEXTURE0..GL_TEXTURE0 + TEXTURE_UNITS).contains(&texture) {
            self.active_texture = texture;
        } else {
            self.raise(ErrorCode::InvalidEnum);
        }
        Ok(())
    }

    fn attach_shader(&mut self, program: u32, shader: u32) -> GlResult<()> {
        self.enter("glAttachShader")?;
        if !self.shaders.contains_key(&shader) {
            self.raise(ErrorCode::InvalidValue);
            return Ok(());
        }
        if let Some(program) = self.program_mut(program) {
            if program.shaders.contains(&shader) {
                self.raise(ErrorCode::InvalidOperation);
            } else {
                program.shaders.push(shader);
            }
        }
        Ok(())
    }

    fn bind_attrib_location(&mut self, program: u32, index: u32, name: &str) -> GlResult<()> {
        self.enter("glBindAttribLocation")?;
        self.attrib_index(index);
        if let Some(program) = self.program_mut(program) {
            program.attributes.insert(name.to_owned(), index as i32);
        }
        Ok(())
    }

    fn bind_buffer(&mut self, target: u32, buffer: u32) -> GlResult<()> {
        self.enter("glBindBuffer")?;
        if target != GL_ARRAY_BUFFER && target != GL_ELEMENT_ARRAY_BUFFER {
            self.raise(ErrorCode::InvalidEnum);
        } else {
            Self::bind(&mut self.buffers, buffer);
        }
        Ok(())
    }

    fn bind_framebuffer(&mut self, target: u32, framebuffer: u32) -> GlResult<()> {
        self.enter("glBindFramebuffer")?;
        if target != GL_FRAMEBUFFER {
            self.raise(ErrorCode::InvalidEnum);
        } else {
            Self::bind(&mut self.framebuffers, framebuffer);
        }
        Ok(())
    }

    fn bind_renderbuffer(&mut self, target: u32, renderbuffer: u32) -> GlResult<()> {
        self.enter("glBindRenderbuffer")?;
        if target != GL_RENDERBUFFER {
            self.raise(ErrorCode::InvalidEnum);
        } else {
            Self::bind(&mut self.renderbuffers, renderbuffer);
        }
        Ok(())
    }

    fn bind_texture(&mut self, target: u32, texture: u32) -> GlResult<()> {
        self.enter("glBindTexture")?;
        if target != GL_TEXTURE_2D && target != GL_TEXTURE_CUBE_MAP {
            self.raise(ErrorCode::InvalidEnum);
        } else {
            Self::bind(&mut self.textures, texture);
        }
        Ok(())
    }

    fn blend_color(&mut self, _red: f32, _green: f32, _blue: f32, _alpha: f32) -> GlResult<()> {
        self.enter("glBlendColor")
    }

    fn blend_equation(&mut self, _mode: u32) -> GlResult<()> {
        self.enter("glBlendEquation")
    }

    fn blend_equation_separate(&mut self, _mode_rgb: u32, _mode_alpha: u32) -> GlResult<()> {
        self.enter("glBlendEquationSeparate")
    }

    fn blend_func(&mut self, _sfactor: u32, _dfactor: u32) -> GlResult<()> {
        self.enter("glBlendFunc")
    }

    fn blend_func_separate(
        &mut self,
        _src_rgb: u32,
        _dst_rgb: u32,
        _src_alpha: u32,
        _dst_alpha: u32,
    ) -> GlResult<()> {
        self.enter("glBlendFuncSeparate")
    }

    fn buffer_data(
        &mut self,
        _target: u32,
        size: i32,
        _data: Option<&[u8]>,
        _usage: u32,
    ) -> GlResult<()> {
        self.enter("glBufferData")?;
        self.require_non_negative(&[size]);
        Ok(())
    }

    fn buffer_sub_data(&mut self, _target: u32, offset: i32, size: i32, _data: &[u8]) -> GlResult<()> {
        self.enter("glBufferSubData")?;
        self.require_non_negative(&[offset, size]);
        Ok(())
    }

    fn check_framebuffer_status(&mut self, target: u32) -> GlResult<u32> {
        self.enter("glCheckFramebufferStatus")?;
        if target != GL_FRAMEBUFFER {
            self.raise(ErrorCode::InvalidEnum);
            return Ok(0);
        }
        Ok(GL_FRAMEBUFFER_COMPLETE)
    }

    fn clear(&mut self, mask: u32) -> GlResult<()> {
        self.enter("glClear")?;
        let known = GL_COLOR_BUFFER_BIT | GL_DEPTH_BUFFER_BIT | GL_STENCIL_BUFFER_BIT;
        if mask & !known != 0 {
            self.raise(ErrorCode::InvalidValue);
        }
        Ok(())
    }

    fn clear_color(&mut self, _red: f32, _green: f32, _blue: f32, _alpha: f32) -> GlResult<()> {
        self.enter("glClearColor")
    }

    fn clear_depthf(&mut self, _depth: f32) -> GlResult<()> {
        self.enter("glClearDepthf")
    }

    fn clear_stencil(&mut self, _s: i32) -> GlResult<()> {
        self.enter("glClearStencil")
    }

    fn color_mask(&mut self, _red: bool, _green: bool, _blue: bool, _alpha: bool) -> GlResult<()> {
        self.enter("glColorMask")
    }

    fn compile_shader(&mut self, shader: u32) -> GlResult<()> {
        self.enter("glCompileShader")?;
        if let Some(shader) = self.shader_mut(shader) {
            shader.compiled = !shader.source.trim().is_empty();
        }
        Ok(())
    }

    fn compressed_tex_image_2d(
        &mut self,
        _target: u32,
        level: i32,
        _internal_format: u32,
        width: i32,
        height: i32,
        _border: i32,
        image_size: i32,
        _data: &[u8],
    ) -> GlResult<()> {
        self.enter("glCompressedTexImage2D")?;
        self.require_non_negative(&[level, width, height, image_size]);
        Ok(())
    }

    fn compressed_tex_sub_image_2d(
        &mut self,
        _target: u32,
        level: i32,
        _x_offset: i32,
        _y_offset: i32,
        width: i32,
        height: i32,
        _format: u32,
        image_size: i32,
        _data: &[u8],
    ) -> GlResult<()> {
        self.enter("glCompressedTexSubImage2D")?;
        self.require_non_negative(&[level, width, height, image_size]);
        Ok(())
    }

    fn copy_tex_image_2d(
        &mut self,
        _target: u32,
        level: i32,
        _internal_format: u32,
        _x: i32,
        _y: i32,
        width: i32,
        height: i32,
        border: i32,
    ) -> GlResult<()> {
        self.enter("glCopyTexImage2D")?;
        if self.require_non_negative(&[level, width, height]) && border != 0 {
            self.raise(ErrorCode::InvalidValue);
        }
        Ok(())
    }

    fn copy_tex_sub_image_2d(
        &mut self,
        _target: u32,
        level: i32,
        _x_offset: i32,
        _y_offset: i32,
        _x: i32,
        _y: i32,
        width: i32,
        height: i32,
    ) -> GlResult<()> {
        self.enter("glCopyTexSubImage2D")?;
        self.require_non_negative(&[level, width, height]);
        Ok(())
    }

    fn create_program(&mut self) -> GlResult<u32> {
        self.enter("glCreateProgram")?;
        let name = self.gen_name();
        self.programs.insert(name, Program::default());
        Ok(name)
    }

    fn create_shader(&mut self, kind: u32) -> GlResult<u32> {
        self.enter("glCreateShader")?;
        if kind != GL_VERTEX_SHADER && kind != GL_FRAGMENT_SHADER {
            self.raise(ErrorCode::InvalidEnum);
            return Ok(0);
        }
        let name = self.gen_name();
        self.shaders.insert(
            name,
            Shader {
                kind,
                source: String::new(),
                compiled: false,
            },
        );
        Ok(name)
    }

    fn cull_face(&mut self, _mode: u32) -> GlResult<()> {
        self.enter("glCullFace")
    }

    fn delete_buffer(&mut self, buffer: u32) -> GlResult<()> {
        self.enter("glDeleteBuffers")?;
        self.buffers.remove(&buffer);
        Ok(())
    }

    fn delete_buffers(&mut self, buffers: &[u32]) -> GlResult<()> {
        self.enter("glDeleteBuffers")?;
        for buffer in buffers {
            self.buffers.remove(buffer);
        }
        Ok(())
    }

    fn delete_framebuffer(&mut self, framebuffer: u32) -> GlResult<()> {
        self.enter("glDeleteFramebuffers")?;
        self.framebuffers.remove(&framebuffer);
        Ok(())
    }

    fn delete_framebuffers(&mut self, framebuffers: &[u32]) -> GlResult<()> {
        self.enter("glDeleteFramebuffers")?;
        for framebuffer in framebuffers {
            self.framebuffers.remove(framebuffer);
        }
        Ok(())
    }

    fn delete_program(&mut self, program: u32) -> GlResult<()> {
        self.enter("glDeleteProgram")?;
        if program != 0 && self.programs.remove(&program).is_none() {
            self.raise(ErrorCode::InvalidValue);
        }
        if program != 0 && self.current_program == program {
            self.current_program = 0;
        }
        Ok(())
    }

    fn delete_renderbuffer(&mut self, renderbuffer: u32) -> GlResult<()> {
        self.enter("glDeleteRenderbuffers")?;
        self.renderbuffers.remove(&renderbuffer);
        Ok(())
    }

    fn delete_renderbuffers(&mut self, renderbuffers: &[u32]) -> GlResult<()> {
        self.enter("glDeleteRenderbuffers")?;
        for renderbuffer in renderbuffers {
            self.renderbuffers.remove(renderbuffer);
        }
        Ok(())
    }

    fn delete_shader(&mut self, shader: u32) -> GlResult<()> {
        self.enter("glDeleteShader")?;
        if shader != 0 && self.shaders.remove(&shader).is_none() {
            self.raise(ErrorCode::InvalidValue);
        }
        Ok(())
    }

    fn delete_texture(&mut self, texture: u32) -> GlResult<()> {
        self.enter("glDeleteTextures")?;
        self.textures.remove(&texture);
        Ok(())
    }

    fn delete_textures(&mut self, textures: &[u32]) -> GlResult<()> {
        self.enter("glDeleteTextures")?;
        for texture in textures {
            self.textures.remove(texture);
        }
        Ok(())
    }

    fn depth_func(&mut self, _func: u32) -> GlResult<()> {
        self.enter("glDepthFunc")
    }

    fn depth_mask(&mut self, _flag: bool) -> GlResult<()> {
        self.enter("glDepthMask")
    }

    fn depth_rangef(&mut self, _z_near: f32, _z_far: f32) -> GlResult<()> {
        self.enter("glDepthRangef")
    }

    fn detach_shader(&mut self, program: u32, shader: u32) -> GlResult<()> {
        self.enter("glDetachShader")?;
        if let Some(program) = self.program_mut(program) {
            let before = program.shaders.len();
            program.shaders.retain(|&s| s != shader);
            if program.shaders.len() == before {
                self.raise(ErrorCode::InvalidOperation);
            }
        }
        Ok(())
    }

    fn disable(&mut self, cap: u32) -> GlResult<()> {
        self.enter("glDisable")?;
        if self.require_capability(cap) {
            self.enabled.remove(&cap);
        }
        Ok(())
    }

    fn disable_vertex_attrib_array(&mut self, index: u32) -> GlResult<()> {
        self.enter("glDisableVertexAttribArray")?;
        self.attrib_index(index);
        Ok(())
    }

    fn draw_arrays(&mut self, mode: u32, first: i32, count: i32) -> GlResult<()> {
        self.enter("glDrawArrays")?;
        if self.require_draw_mode(mode) {
            self.require_non_negative(&[first, count]);
        }
        Ok(())
    }

    fn draw_elements(&mut self, mode: u32, count: i32, kind: u32, _indices: &[u8]) -> GlResult<()> {
        self.enter("glDrawElements")?;
        self.check_draw_elements(mode, count, kind);
        Ok(())
    }

    fn draw_elements_offset(
        &mut self,
        mode: u32,
        count: i32,
        kind: u32,
        indices_offset: i32,
    ) -> GlResult<()> {
        self.enter("glDrawElements")?;
        if self.check_draw_elements(mode, count, kind) {
            self.require_non_negative(&[indices_offset]);
        }
        Ok(())
    }

    fn enable(&mut self, cap: u32) -> GlResult<()> {
        self.enter("glEnable")?;
        if self.require_capability(cap) {
            self.enabled.insert(cap);
        }
        Ok(())
    }

    fn enable_vertex_attrib_array(&mut self, index: u32) -> GlResult<()> {
        self.enter("glEnableVertexAttribArray")?;
        self.attrib_index(index);
        Ok(())
    }

    fn finish(&mut self) -> GlResult<()> {
        self.enter("glFinish")
    }

    fn flush(&mut self) -> GlResult<()> {
        self.enter("glFlush")
    }

    fn framebuffer_renderbuffer(
        &mut self,
        target: u32,
        _attachment: u32,
        _renderbuffer_target: u32,
        _renderbuffer: u32,
    ) -> GlResult<()> {
        self.enter("glFramebufferRenderbuffer")?;
        if target != GL_FRAMEBUFFER {
            self.raise(ErrorCode::InvalidEnum);
        }
        Ok(())
    }

    fn framebuffer_texture_2d(
        &mut self,
        target: u32,
        _attachment: u32,
        _tex_target: u32,
        _texture: u32,
        level: i32,
    ) -> GlResult<()> {
        self.enter("glFramebufferTexture2D")?;
        if target != GL_FRAMEBUFFER {
            self.raise(ErrorCode::InvalidEnum);
        } else if level != 0 {
            self.raise(ErrorCode::InvalidValue);
        }
        Ok(())
    }

    fn front_face(&mut self, _mode: u32) -> GlResult<()> {
        self.enter("glFrontFace")
    }

    fn gen_buffer(&mut self) -> GlResult<u32> {
        self.enter("glGenBuffers")?;
        Ok(self.gen_name())
    }

    fn gen_buffers(&mut self, buffers: &mut [u32]) -> GlResult<()> {
        self.enter("glGenBuffers")?;
        self.gen_names(buffers);
        Ok(())
    }

    fn generate_mipmap(&mut self, target: u32) -> GlResult<()> {
        self.enter("glGenerateMipmap")?;
        if target != GL_TEXTURE_2D && target != GL_TEXTURE_CUBE_MAP {
            self.raise(ErrorCode::InvalidEnum);
        }
        Ok(())
    }

    fn gen_framebuffer(&mut self) -> GlResult<u32> {
        self.enter("glGenFramebuffers")?;
        Ok(self.gen_name())
    }

    fn gen_framebuffers(&mut self, framebuffers: &mut [u32]) -> GlResult<()> {
        self.enter("glGenFramebuffers")?;
        self.gen_names(framebuffers);
        Ok(())
    }

    fn gen_renderbuffer(&mut self) -> GlResult<u32> {
        self.enter("glGenRenderbuffers")?;
        Ok(self.gen_name())
    }

    fn gen_renderbuffers(&mut self, renderbuffers: &mut [u32]) -> GlResult<()> {
        self.enter("glGenRenderbuffers")?;
        self.gen_names(renderbuffers);
        Ok(())
    }

    fn gen_texture(&mut self) -> GlResult<u32> {
        self.enter("glGenTextures")?;
        Ok(self.gen_name())
    }

    fn gen_textures(&mut self, textures: &mut [u32]) -> GlResult<()> {
        self.enter("glGenTextures")?;
        self.gen_names(textures);
        Ok(())
    }

    fn get_active_attrib(
        &mut self,
        program: u32,
        index: u32,
        size: &mut [i32],
        kind: &mut [u32],
    ) -> GlResult<String> {
        self.enter("glGetActiveAttrib")?;
        let name = self
            .program_mut(program)
            .and_then(|p| active_name(&p.attributes, index));
        Ok(self.describe_active(name, size, kind))
    }

    fn get_active_uniform(
        &mut self,
        program: u32,
        index: u32,
        size: &mut [i32],
        kind: &mut [u32],
    ) -> GlResult<String> {
        self.enter("glGetActiveUniform")?;
        let name = self
            .program_mut(program)
            .and_then(|p| active_name(&p.uniforms, index));
        Ok(self.describe_active(name, size, kind))
    }

    fn get_attached_shaders(
        &mut self,
        program: u32,
        count: &mut [i32],
        shaders: &mut [u32],
    ) -> GlResult<()> {
        self.enter("glGetAttachedShaders")?;
        if let Some(program) = self.program_mut(program) {
            let attached = program.shaders.clone();
            fill(shaders, &attached);
            let written = attached.len().min(shaders.len()) as i32;
            fill(count, &[written]);
        }
        Ok(())
    }

    fn get_attrib_location(&mut self, program: u32, name: &str) -> GlResult<i32> {
        self.enter("glGetAttribLocation")?;
        let Some(program) = self.program_mut(program) else {
            return Ok(-1);
        };
        if !program.linked {
            self.raise(ErrorCode::InvalidOperation);
            return Ok(-1);
        }
        Ok(program.attributes.get(name).copied().unwrap_or(-1))
    }

    fn get_booleanv(&mut self, pname: u32, params: &mut [bool]) -> GlResult<()> {
        self.enter("glGetBooleanv")?;
        if CAPABILITIES.contains(&pname) {
            let enabled = self.enabled.contains(&pname);
            fill(params, &[enabled]);
        } else {
            self.raise(ErrorCode::InvalidEnum);
        }
        Ok(())
    }

    fn get_buffer_parameteriv(&mut self, _target: u32, _pname: u32, params: &mut [i32]) -> GlResult<()> {
        self.enter("glGetBufferParameteriv")?;
        fill(params, &[0]);
        Ok(())
    }

    fn get_error(&mut self) -> GlResult<u32> {
        self.enter("glGetError")?;
        Ok(self.pending_errors.pop_front().unwrap_or(GL_NO_ERROR))
    }

    fn get_floatv(&mut self, _pname: u32, params: &mut [f32]) -> GlResult<()> {
        self.enter("glGetFloatv")?;
        fill(params, &[0.0]);
        Ok(())
    }

    fn get_framebuffer_attachment_parameteriv(
        &mut self,
        target: u32,
        _attachment: u32,
        _pname: u32,
        params: &mut [i32],
    ) -> GlResult<()> {
        self.enter("glGetFramebufferAttachmentParameteriv")?;
        if target != GL_FRAMEBUFFER {
            self.raise(ErrorCode::InvalidEnum);
        } else {
            fill(params, &[0]);
        }
        Ok(())
    }

    fn get_integerv(&mut self, pname: u32, params: &mut [i32]) -> GlResult<()> {
        self.enter("glGetIntegerv")?;
        match pname {
            GL_CURRENT_PROGRAM => fill(params, &[self.current_program as i32]),
            GL_ACTIVE_TEXTURE => fill(params, &[self.active_texture as i32]),
            GL_VIEWPORT => fill(params, &self.viewport),
            GL_MAX_COMBINED_TEXTURE_IMAGE_UNITS => fill(params, &[TEXTURE_UNITS as i32]),
            _ => self.raise(ErrorCode::InvalidEnum),
        }
        Ok(())
    }

    fn get_programiv(&mut self, program: u32, pname: u32, params: &mut [i32]) -> GlResult<()> {
        self.enter("glGetProgramiv")?;
        let Some(program) = self.program_mut(program) else {
            return Ok(());
        };
        let linked = program.linked;
        match pname {
            GL_LINK_STATUS => fill(params, &[linked as i32]),
            _ => self.raise(ErrorCode::InvalidEnum),
        }
        Ok(())
    }

    fn get_program_info_log(&mut self, program: u32) -> GlResult<String> {
        self.enter("glGetProgramInfoLog")?;
        let log = match self.program_mut(program) {
            Some(p) if !p.linked => "program is not linked".to_owned(),
            _ => String::new(),
        };
        Ok(log)
    }

    fn get_renderbuffer_parameteriv(&mut self, target: u32, _pname: u32, params: &mut [i32]) -> GlResult<()> {
        self.enter("glGetRenderbufferParameteriv")?;
        if target != GL_RENDERBUFFER {
            self.raise(ErrorCode::InvalidEnum);
        } else {
            fill(params, &[0]);
        }
        Ok(())
    }

    fn get_shaderiv(&mut self, shader: u32, pname: u32, params: &mut [i32]) -> GlResult<()> {
        self.enter("glGetShaderiv")?;
        let Some(shader) = self.shader_mut(shader) else {
            return Ok(());
        };
        let (compiled, kind) = (shader.compiled, shader.kind);
        match pname {
            GL_COMPILE_STATUS => fill(params, &[compiled as i32]),
            GL_SHADER_TYPE => fill(params, &[kind as i32]),
            _ => self.raise(ErrorCode::InvalidEnum),
        }
        Ok(())
    }

    fn get_shader_info_log(&mut self, shader: u32) -> GlResult<String> {
        self.enter("glGetShaderInfoLog")?;
        let log = match self.shader_mut(shader) {
            Some(s) if !s.compiled && s.source.trim().is_empty() => "empty shader source".to_owned(),
            _ => String::new(),
        };
        Ok(log)
    }

    fn get_shader_precision_format(
        &mut self,
        _shader_kind: u32,
        _precision_kind: u32,
        range: &mut [i32],
        precision: &mut [i32],
    ) -> GlResult<()> {
        self.enter("glGetShaderPrecisionFormat")?;
        fill(range, &[127, 127]);
        fill(precision, &[23]);
        Ok(())
    }

    fn get_string(&mut self, name: u32) -> GlResult<String> {
        self.enter("glGetString")?;
        let value = match name {
            GL_VENDOR => "glint",
            GL_RENDERER => "glint headless",
            GL_VERSION => "OpenGL ES 2.0 glint-headless",
            GL_SHADING_LANGUAGE_VERSION => "OpenGL ES GLSL ES 1.00",
            GL_EXTENSIONS => "",
            _ => {
                self.raise(ErrorCode::InvalidEnum);
                ""
            }
        };
        Ok(value.to_owned())
    }

    fn get_tex_parameterfv(&mut self, _target: u32, _pname: u32, params: &mut [f32]) -> GlResult<()> {
        self.enter("glGetTexParameterfv")?;
        fill(params, &[0.0]);
        Ok(())
    }

    fn get_tex_parameteriv(&mut self, _target: u32, _pname: u32, params: &mut [i32]) -> GlResult<()> {
        self.enter("glGetTexParameteriv")?;
        fill(params, &[0]);
        Ok(())
    }

    fn get_uniformfv(&mut self, program: u32, _location: i32, params: &mut [f32]) -> GlResult<()> {
        self.enter("glGetUniformfv")?;
        if self.program_mut(program).is_some() {
            fill(params, &[0.0]);
        }
        Ok(())
    }

    fn get_uniformiv(&mut self, program: u32, _location: i32, params: &mut [i32]) -> GlResult<()> {
        self.enter("glGetUniformiv")?;
        if self.program_mut(program).is_some() {
            fill(params, &[0]);
        }
        Ok(())
    }

    fn get_uniform_location(&mut self, program: u32, name: &str) -> GlResult<i32> {
        self.enter("glGetUniformLocation")?;
        let Some(program) = self.program_mut(program) else {
            return Ok(-1);
        };
        if !program.linked {
            self.raise(ErrorCode::InvalidOperation);
            return Ok(-1);
        }
        let next = program.uniforms.len() as i32;
        Ok(*program.uniforms.entry(name.to_owned()).or_insert(next))
    }

    fn get_vertex_attribfv(&mut self, index: u32, _pname: u32, params: &mut [f32]) -> GlResult<()> {
        self.enter("glGetVertexAttribfv")?;
        self.attrib_index(index);
        fill(params, &[0.0]);
        Ok(())
    }

    fn get_vertex_attribiv(&mut self, index: u32, _pname: u32, params: &mut [i32]) -> GlResult<()> {
        self.enter("glGetVertexAttribiv")?;
        self.attrib_index(index);
        fill(params, &[0]);
        Ok(())
    }

    fn get_vertex_attrib_pointerv(&mut self, index: u32, _pname: u32, pointer: &mut [u8]) -> GlResult<()> {
        self.enter("glGetVertexAttribPointerv")?;
        self.attrib_index(index);
        pointer.fill(0);
        Ok(())
    }

    fn hint(&mut self, _target: u32, _mode: u32) -> GlResult<()> {
        self.enter("glHint")
    }

    fn is_buffer(&mut self, buffer: u32) -> GlResult<bool> {
        self.enter("glIsBuffer")?;
        Ok(self.buffers.contains(&buffer))
    }

    fn is_enabled(&mut self, cap: u32) -> GlResult<bool> {
        self.enter("glIsEnabled")?;
        if !self.require_capability(cap) {
            return Ok(false);
        }
        Ok(self.enabled.contains(&cap))
    }

    fn is_framebuffer(&mut self, framebuffer: u32) -> GlResult<bool> {
        self.enter("glIsFramebuffer")?;
        Ok(self.framebuffers.contains(&framebuffer))
    }

    fn is_program(&mut self, program: u32) -> GlResult<bool> {
        self.enter("glIsProgram")?;
        Ok(self.programs.contains_key(&program))
    }

    fn is_renderbuffer(&mut self, renderbuffer: u32) -> GlResult<bool> {
        self.enter("glIsRenderbuffer")?;
        Ok(self.renderbuffers.contains(&renderbuffer))
    }

    fn is_shader(&mut self, shader: u32) -> GlResult<bool> {
        self.enter("glIsShader")?;
        Ok(self.shaders.contains_key(&shader))
    }

    fn is_texture(&mut self, texture: u32) -> GlResult<bool> {
        self.enter("glIsTexture")?;
        Ok(self.textures.contains(&texture))
    }

    fn line_width(&mut self, width: f32) -> GlResult<()> {
        self.enter("glLineWidth")?;
        if width <= 0.0 {
            self.raise(ErrorCode::InvalidValue);
        }
        Ok(())
    }

    fn link_program(&mut self, program: u32) -> GlResult<()> {
        self.enter("glLinkProgram")?;
        let Some(attached) = self.program_mut(program).map(|p| p.shaders.clone()) else {
            return Ok(());
        };
        let compiled_kinds: Vec<u32> = attached
            .iter()
            .filter_map(|name| self.shaders.get(name))
            .filter(|shader| shader.compiled)
            .map(|shader| shader.kind)
            .collect();
        let linked = compiled_kinds.contains(&GL_VERTEX_SHADER)
            && compiled_kinds.contains(&GL_FRAGMENT_SHADER);
        if let Some(program) = self.programs.get_mut(&program) {
            program.linked = linked;
            program.uniforms.clear();
        }
        Ok(())
    }

    fn pixel_storei(&mut self, _pname: u32, param: i32) -> GlResult<()> {
        self.enter("glPixelStorei")?;
        if ![1, 2, 4, 8].contains(&param) {
            self.raise(ErrorCode::InvalidValue);
        }
        Ok(())
    }

    fn polygon_offset(&mut self, _factor: f32, _units: f32) -> GlResult<()> {
        self.enter("glPolygonOffset")
    }

    fn read_pixels(
        &mut self,
        _x: i32,
        _y: i32,
        width: i32,
        height: i32,
        _format: u32,
        _kind: u32,
        pixels: &mut [u8],
    ) -> GlResult<()> {
        self.enter("glReadPixels")?;
        if self.require_non_negative(&[width, height]) {
            pixels.fill(0);
        }
        Ok(())
    }

    fn release_shader_compiler(&mut self) -> GlResult<()> {
        self.enter("glReleaseShaderCompiler")
    }

    fn renderbuffer_storage(
        &mut self,
        target: u32,
        _internal_format: u32,
        width: i32,
        height: i32,
    ) -> GlResult<()> {
        self.enter("glRenderbufferStorage")?;
        if target != GL_RENDERBUFFER {
            self.raise(ErrorCode::InvalidEnum);
        } else {
            self.require_non_negative(&[width, height]);
        }
        Ok(())
    }

    fn sample_coverage(&mut self, _value: f32, _invert: bool) -> GlResult<()> {
        self.enter("glSampleCoverage")
    }

    fn scissor(&mut self, _x: i32, _y: i32, width: i32, height: i32) -> GlResult<()> {
        self.enter("glScissor")?;
        self.require_non_negative(&[width, height]);
        Ok(())
    }

    fn shader_binary(&mut self, _shaders: &[u32], _binary_format: u32, _binary: &[u8]) -> GlResult<()> {
        self.enter("glShaderBinary")?;
        // No binary formats are supported.
        self.raise(ErrorCode::InvalidEnum);
        Ok(())
    }

    fn shader_source(&mut self, shader: u32, source: &str) -> GlResult<()> {
        self.enter("glShaderSource")?;
        if let Some(shader) = self.shader_mut(shader) {
            shader.source = source.to_owned();
        }
        Ok(())
    }

    fn stencil_func(&mut self, _func: u32, _reference: i32, _mask: u32) -> GlResult<()> {
        self.enter("glStencilFunc")
    }

    fn stencil_func_separate(&mut self, _face: u32, _func: u32, _reference: i32, _mask: u32) -> GlResult<()> {
        self.enter("glStencilFuncSeparate")
    }

    fn stencil_mask(&mut self, _mask: u32) -> GlResult<()> {
        self.enter("glStencilMask")
    }

    fn stencil_mask_separate(&mut self, _face: u32, _mask: u32) -> GlResult<()> {
        self.enter("glStencilMaskSeparate")
    }

    fn stencil_op(&mut self, _fail: u32, _z_fail: u32, _z_pass: u32) -> GlResult<()> {
        self.enter("glStencilOp")
    }

    fn stencil_op_separate(&mut self, _face: u32, _fail: u32, _z_fail: u32, _z_pass: u32) -> GlResult<()> {
        self.enter("glStencilOpSeparate")
    }

    fn tex_image_2d(
        &mut self,
        _target: u32,
        level: i32,
        _internal_format: i32,
        width: i32,
        height: i32,
        border: i32,
        _format: u32,
        _kind: u32,
        _pixels: Option<&[u8]>,
    ) -> GlResult<()> {
        self.enter("glTexImage2D")?;
        if self.require_non_negative(&[level, width, height]) && border != 0 {
            self.raise(ErrorCode::InvalidValue);
        }
        Ok(())
    }

    fn tex_parameterf(&mut self, _target: u32, _pname: u32, _param: f32) -> GlResult<()> {
        self.enter("glTexParameterf")
    }

    fn tex_parameterfv(&mut self, _target: u32, _pname: u32, _params: &[f32]) -> GlResult<()> {
        self.enter("glTexParameterfv")
    }

    fn tex_parameteri(&mut self, _target: u32, _pname: u32, _param: i32) -> GlResult<()> {
        self.enter("glTexParameteri")
    }

    fn tex_parameteriv(&mut self, _target: u32, _pname: u32, _params: &[i32]) -> GlResult<()> {
        self.enter("glTexParameteriv")
    }

    fn tex_sub_image_2d(
        &mut self,
        _target: u32,
        level: i32,
        _x_offset: i32,
        _y_offset: i32,
        width: i32,
        height: i32,
        _format: u32,
        _kind: u32,
        _pixels: &[u8],
    ) -> GlResult<()> {
        self.enter("glTexSubImage2D")?;
        self.require_non_negative(&[level, width, height]);
        Ok(())
    }

    fn uniform_1f(&mut self, location: i32, _x: f32) -> GlResult<()> {
        self.enter("glUniform1f")?;
        self.uniform_call(location, 1);
        Ok(())
    }

    fn uniform_1fv(&mut self, location: i32, count: i32, _v: &[f32]) -> GlResult<()> {
        self.enter("glUniform1fv")?;
        self.uniform_call(location, count);
        Ok(())
    }

    fn uniform_1i(&mut self, location: i32, _x: i32) -> GlResult<()> {
        self.enter("glUniform1i")?;
        self.uniform_call(location, 1);
        Ok(())
    }

    fn uniform_1iv(&mut self, location: i32, count: i32, _v: &[i32]) -> GlResult<()> {
        self.enter("glUniform1iv")?;
        self.uniform_call(location, count);
        Ok(())
    }

    fn uniform_2f(&mut self, location: i32, _x: f32, _y: f32) -> GlResult<()> {
        self.enter("glUniform2f")?;
        self.uniform_call(location, 1);
        Ok(())
    }

    fn uniform_2fv(&mut self, location: i32, count: i32, _v: &[f32]) -> GlResult<()> {
        self.enter("glUniform2fv")?;
        self.uniform_call(location, count);
        Ok(())
    }

    fn uniform_2i(&mut self, location: i32, _x: i32, _y: i32) -> GlResult<()> {
        self.enter("glUniform2i")?;
        self.uniform_call(location, 1);
        Ok(())
    }

    fn uniform_2iv(&mut self, location: i32, count: i32, _v: &[i32]) -> GlResult<()> {
        self.enter("glUniform2iv")?;
        self.uniform_call(location, count);
        Ok(())
    }

    fn uniform_3f(&mut self, location: i32, _x: f32, _y: f32, _z: f32) -> GlResult<()> {
        self.enter("glUniform3f")?;
        self.uniform_call(location, 1);
        Ok(())
    }

    fn uniform_3fv(&mut self, location: i32, count: i32, _v: &[f32]) -> GlResult<()> {
        self.enter("glUniform3fv")?;
        self.uniform_call(location, count);
        Ok(())
    }

    fn uniform_3i(&mut self, location: i32, _x: i32, _y: i32, _z: i32) -> GlResult<()> {
        self.enter("glUniform3i")?;
        self.uniform_call(location, 1);
        Ok(())
    }

    fn uniform_3iv(&mut self, location: i32, count: i32, _v: &[i32]) -> GlResult<()> {
        self.enter("glUniform3iv")?;
        self.uniform_call(location, count);
        Ok(())
    }

    fn uniform_4f(&mut self, location: i32, _x: f32, _y: f32, _z: f32, _w: f32) -> GlResult<()> {
        self.enter("glUniform4f")?;
        self.uniform_call(location, 1);
        Ok(())
    }

    fn uniform_4fv(&mut self, location: i32, count: i32, _v: &[f32]) -> GlResult<()> {
        self.enter("glUniform4fv")?;
        self.uniform_call(location, count);
        Ok(())
    }

    fn uniform_4i(&mut self, location: i32, _x: i32, _y: i32, _z: i32, _w: i32) -> GlResult<()> {
        self.enter("glUniform4i")?;
        self.uniform_call(location, 1);
        Ok(())
    }

    fn uniform_4iv(&mut self, location: i32, count: i32, _v: &[i32]) -> GlResult<()> {
        self.enter("glUniform4iv")?;
        self.uniform_call(location, count);
        Ok(())
    }

    fn uniform_matrix_2fv(&mut self, location: i32, count: i32, transpose: bool, _value: &[f32]) -> GlResult<()> {
        self.enter("glUniformMatrix2fv")?;
        self.uniform_matrix_call(location, count, transpose);
        Ok(())
    }

    fn uniform_matrix_3fv(&mut self, location: i32, count: i32, transpose: bool, _value: &[f32]) -> GlResult<()> {
        self.enter("glUniformMatrix3fv")?;
        self.uniform_matrix_call(location, count, transpose);
        Ok(())
    }

    fn uniform_matrix_4fv(&mut self, location: i32, count: i32, transpose: bool, _value: &[f32]) -> GlResult<()> {
        self.enter("glUniformMatrix4fv")?;
        self.uniform_matrix_call(location, count, transpose);
        Ok(())
    }

    fn use_program(&mut self, program: u32) -> GlResult<()> {
        self.enter("glUseProgram")?;
        if program == 0 {
            self.current_program = 0;
            return Ok(());
        }
        match self.programs.get(&program).map(|p| p.linked) {
            None => self.raise(ErrorCode::InvalidValue),
            Some(false) => self.raise(ErrorCode::InvalidOperation),
            Some(true) => self.current_program = program,
        }
        Ok(())
    }

    fn validate_program(&mut self, program: u32) -> GlResult<()> {
        self.enter("glValidateProgram")?;
        self.program_mut(program);
        Ok(())
    }

    fn vertex_attrib_1f(&mut self, index: u32, _x: f32) -> GlResult<()> {
        self.enter("glVertexAttrib1f")?;
        self.attrib_index(index);
        Ok(())
    }

    fn vertex_attrib_1fv(&mut self, index: u32, _values: &[f32]) -> GlResult<()> {
        self.enter("glVertexAttrib1fv")?;
        self.attrib_index(index);
        Ok(())
    }

    fn vertex_attrib_2f(&mut self, index: u32, _x: f32, _y: f32) -> GlResult<()> {
        self.enter("glVertexAttrib2f")?;
        self.attrib_index(index);
        Ok(())
    }

    fn vertex_attrib_2fv(&mut self, index: u32, _values: &[f32]) -> GlResult<()> {
        self.enter("glVertexAttrib2fv")?;
        self.attrib_index(index);
        Ok(())
    }

    fn vertex_attrib_3f(&mut self, index: u32, _x: f32, _y: f32, _z: f32) -> GlResult<()> {
        self.enter("glVertexAttrib3f")?;
        self.attrib_index(index);
        Ok(())
    }

    fn vertex_attrib_3fv(&mut self, index: u32, _values: &[f32]) -> GlResult<()> {
        self.enter("glVertexAttrib3fv")?;
        self.attrib_index(index);
        Ok(())
    }

    fn vertex_attrib_4f(&mut self, index: u32, _x: f32, _y: f32, _z: f32, _w: f32) -> GlResult<()> {
        self.enter("glVertexAttrib4f")?;
        self.attrib_index(index);
        Ok(())
    }

    fn vertex_attrib_4fv(&mut self, index: u32, _values: &[f32]) -> GlResult<()> {
        self.enter("glVertexAttrib4fv")?;
        self.attrib_index(index);
        Ok(())
    }

    fn vertex_attrib_pointer(
        &mut self,
        index: u32,
        size: i32,
        _kind: u32,
        _normalized: bool,
        stride: i32,
        _data: &[u8],
    ) -> GlResult<()> {
        self.enter("glVertexAttribPointer")?;
        self.check_attrib_pointer(index, size, stride);
        Ok(())
    }

    fn vertex_attrib_pointer_offset(
        &mut self,
        index: u32,
        size: i32,
        _kind: u32,
        _normalized: bool,
        stride: i32,
        offset: i32,
    ) -> GlResult<()> {
        self.enter("glVertexAttribPointer")?;
        if self.check_attrib_pointer(index, size, stride) {
            self.require_non_negative(&[offset]);
        }
        Ok(())
    }

    fn viewport(&mut self, x: i32, y: i32, width: i32, height: i32) -> GlResult<()> {
        self.enter("glViewport")?;
        if self.require_non_negative(&[width, height]) {
            self.viewport = [x, y, width, height];
        }
        Ok(())
    }
}

impl HeadlessGl {
    fn check_draw_elements(&mut self, mode: u32, count: i32, kind: u32) -> bool {
        if !self.require_draw_mode(mode) {
            return false;
        }
        if kind != GL_UNSIGNED_BYTE && kind != GL_UNSIGNED_SHORT {
            self.raise(ErrorCode::InvalidEnum);
            return false;
        }
        self.require_non_negative(&[count])
    }

    fn check_attrib_pointer(&mut self, index: u32, size: i32, stride: i32) -> bool {
        if index >= 16 || !(1..=4).contains(&size) || stride < 0 {
            self.raise(ErrorCode::InvalidValue);
            return false;
        }
        true
    }

    fn uniform_matrix_call(&mut self, location: i32, count: i32, transpose: bool) {
        if transpose {
            // GLES 2.0 requires GL_FALSE here.
            self.raise(ErrorCode::InvalidValue);
        } else {
            self.uniform_call(location, count);
        }
    }

    fn describe_active(&mut self, name: Option<String>, size: &mut [i32], kind: &mut [u32]) -> String {
        match name {
            Some(name) => {
                fill(size, &[1]);
                fill(kind, &[GL_FLOAT]);
                name
            }
            None => {
                self.raise(ErrorCode::InvalidValue);
                String::new()
            }
        }
    }
}

fn active_name(names: &AHashMap<String, i32>, index: u32) -> Option<String> {
    names
        .iter()
        .find(|(_, &location)| location == index as i32)
        .map(|(name, _)| name.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linked_program(gl: &mut HeadlessGl) -> u32 {
        let vs = gl.create_shader(GL_VERTEX_SHADER).unwrap();
        gl.shader_source(vs, "void main() { gl_Position = vec4(0.0); }")
            .unwrap();
        gl.compile_shader(vs).unwrap();
        let fs = gl.create_shader(GL_FRAGMENT_SHADER).unwrap();
        gl.shader_source(fs, "void main() { gl_FragColor = vec4(1.0); }")
            .unwrap();
        gl.compile_shader(fs).unwrap();

        let program = gl.create_program().unwrap();
        gl.attach_shader(program, vs).unwrap();
        gl.attach_shader(program, fs).unwrap();
        gl.bind_attrib_location(program, 0, "a_position").unwrap();
        gl.link_program(program).unwrap();
        program
    }

    #[test]
    fn starts_with_a_clear_error_state() {
        let mut gl = HeadlessGl::new();
        assert_eq!(gl.get_error().unwrap(), GL_NO_ERROR);
        assert!(gl.is_enabled(GL_DITHER).unwrap());
        assert!(!gl.is_enabled(GL_BLEND).unwrap());
    }

    #[test]
    fn unknown_capability_flags_invalid_enum_once() {
        let mut gl = HeadlessGl::new();
        gl.enable(0x1234).unwrap();
        gl.disable(0x1234).unwrap();
        assert_eq!(gl.pending_errors(), 1);
        assert_eq!(gl.get_error().unwrap(), GL_INVALID_ENUM);
        assert_eq!(gl.get_error().unwrap(), GL_NO_ERROR);
    }

    #[test]
    fn errors_are_returned_oldest_first() {
        let mut gl = HeadlessGl::new();
        gl.viewport(0, 0, -1, 10).unwrap();
        gl.active_texture(GL_TEXTURE0 + 99).unwrap();
        assert_eq!(gl.get_error().unwrap(), GL_INVALID_VALUE);
        assert_eq!(gl.get_error().unwrap(), GL_INVALID_ENUM);
        assert_eq!(gl.viewport_rect(), [0; 4]);
    }

    #[test]
    fn linking_requires_both_stages() {
        let mut gl = HeadlessGl::new();
        let program = linked_program(&mut gl);
        let mut status = [0];
        gl.get_programiv(program, GL_LINK_STATUS, &mut status).unwrap();
        assert_eq!(status, [GL_TRUE as i32]);

        gl.use_program(program).unwrap();
        assert_eq!(gl.current_program(), program);
        assert_eq!(gl.get_attrib_location(program, "a_position").unwrap(), 0);
        assert_eq!(gl.get_uniform_location(program, "u_mvp").unwrap(), 0);
        assert_eq!(gl.get_uniform_location(program, "u_color").unwrap(), 1);
        assert_eq!(gl.get_uniform_location(program, "u_mvp").unwrap(), 0);

        let lonely = gl.create_program().unwrap();
        gl.link_program(lonely).unwrap();
        gl.use_program(lonely).unwrap();
        assert_eq!(gl.get_error().unwrap(), GL_INVALID_OPERATION);
        assert_eq!(gl.current_program(), program);
    }

    #[test]
    fn unknown_program_is_invalid_value() {
        let mut gl = HeadlessGl::new();
        gl.use_program(42).unwrap();
        assert_eq!(gl.get_error().unwrap(), GL_INVALID_VALUE);
    }

    #[test]
    fn names_become_objects_when_bound() {
        let mut gl = HeadlessGl::new();
        let mut names = [0u32; 2];
        gl.gen_buffers(&mut names).unwrap();
        assert_ne!(names[0], names[1]);
        assert!(!gl.is_buffer(names[0]).unwrap());

        gl.bind_buffer(GL_ARRAY_BUFFER, names[0]).unwrap();
        assert!(gl.is_buffer(names[0]).unwrap());
        gl.delete_buffers(&names).unwrap();
        assert!(!gl.is_buffer(names[0]).unwrap());
    }

    #[test]
    fn queries_fill_out_parameters() {
        let mut gl = HeadlessGl::new();
        gl.viewport(1, 2, 640, 480).unwrap();
        let mut rect = [0i32; 4];
        gl.get_integerv(GL_VIEWPORT, &mut rect).unwrap();
        assert_eq!(rect, [1, 2, 640, 480]);

        let mut enabled = [true];
        gl.get_booleanv(GL_BLEND, &mut enabled).unwrap();
        assert_eq!(enabled, [false]);
    }

    #[test]
    fn fail_next_fails_exactly_one_call() {
        let mut gl = HeadlessGl::new();
        gl.fail_next("device removed");
        assert!(matches!(gl.flush(), Err(GlError::Backend { operation: "glFlush", .. })));
        assert!(gl.flush().is_ok());
        assert_eq!(gl.journal(), ["glFlush"]);
    }

    #[test]
    fn draw_validation() {
        let mut gl = HeadlessGl::new();
        gl.draw_elements(GL_TRIANGLES, 3, GL_FLOAT, &[0, 1, 2]).unwrap();
        assert_eq!(gl.get_error().unwrap(), GL_INVALID_ENUM);
        gl.draw_arrays(0x99, 0, 3).unwrap();
        assert_eq!(gl.get_error().unwrap(), GL_INVALID_ENUM);
        gl.draw_elements_offset(GL_LINES, 2, GL_UNSIGNED_SHORT, 0)
            .unwrap();
        assert_eq!(gl.get_error().unwrap(), GL_NO_ERROR);
    }
}
