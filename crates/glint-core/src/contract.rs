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

//! The GL API contract.
//!
//! The whole GLES 2.0 surface is listed exactly once, in
//! [`for_each_gl_operation!`]. That table is expanded here into the [`Gl20`]
//! trait and its forwarding impls, and by `glint-infra` into the
//! interceptor, so an entry point added to the table is intercepted
//! everywhere without further work.
//!
//! Each entry reads `fn method => "glEntryPoint" (params) -> Ret;`. Overloads
//! of one GL entry point (client-side buffer vs. offset into a bound buffer)
//! are separate entries with distinct method names and the same GL name.

use crate::error::GlResult;

/// Invokes `$callback!` with the full operation table.
///
/// The callback receives a sequence of
/// `$(#[$attr])* fn $method => $gl_name ($($arg: $ty),*) $(-> $ret)?;`
/// items, one per entry point.
#[macro_export]
macro_rules! for_each_gl_operation {
    ($callback:ident) => {
        $callback! {
            /// Selects the active texture unit.
            fn active_texture => "glActiveTexture" (texture: u32);
            /// Attaches a shader object to a program object.
            fn attach_shader => "glAttachShader" (program: u32, shader: u32);
            /// Binds a generic vertex attribute index to a named attribute variable.
            fn bind_attrib_location => "glBindAttribLocation" (program: u32, index: u32, name: &str);
            /// Binds a named buffer object.
            fn bind_buffer => "glBindBuffer" (target: u32, buffer: u32);
            /// Binds a named framebuffer object.
            fn bind_framebuffer => "glBindFramebuffer" (target: u32, framebuffer: u32);
            /// Binds a named renderbuffer object.
            fn bind_renderbuffer => "glBindRenderbuffer" (target: u32, renderbuffer: u32);
            /// Binds a named texture to a texturing target.
            fn bind_texture => "glBindTexture" (target: u32, texture: u32);
            /// Sets the blend color.
            fn blend_color => "glBlendColor" (red: f32, green: f32, blue: f32, alpha: f32);
            /// Sets the RGB and alpha blend equation.
            fn blend_equation => "glBlendEquation" (mode: u32);
            /// Sets the RGB and alpha blend equations separately.
            fn blend_equation_separate => "glBlendEquationSeparate" (mode_rgb: u32, mode_alpha: u32);
            /// Specifies pixel arithmetic.
            fn blend_func => "glBlendFunc" (sfactor: u32, dfactor: u32);
            /// Specifies pixel arithmetic for RGB and alpha separately.
            fn blend_func_separate => "glBlendFuncSeparate" (src_rgb: u32, dst_rgb: u32, src_alpha: u32, dst_alpha: u32);
            /// Creates and initializes a buffer object's data store.
            fn buffer_data => "glBufferData" (target: u32, size: i32, data: Option<&[u8]>, usage: u32);
            /// Updates a subset of a buffer object's data store.
            fn buffer_sub_data => "glBufferSubData" (target: u32, offset: i32, size: i32, data: &[u8]);
            /// Returns the completeness status of the bound framebuffer.
            fn check_framebuffer_status => "glCheckFramebufferStatus" (target: u32) -> u32;
            /// Clears buffers to preset values.
            fn clear => "glClear" (mask: u32);
            /// Sets the color clear value.
            fn clear_color => "glClearColor" (red: f32, green: f32, blue: f32, alpha: f32);
            /// Sets the depth clear value.
            fn clear_depthf => "glClearDepthf" (depth: f32);
            /// Sets the stencil clear value.
            fn clear_stencil => "glClearStencil" (s: i32);
            /// Enables and disables writing of color components.
            fn color_mask => "glColorMask" (red: bool, green: bool, blue: bool, alpha: bool);
            /// Compiles a shader object.
            fn compile_shader => "glCompileShader" (shader: u32);
            /// Specifies a compressed two-dimensional texture image.
            fn compressed_tex_image_2d => "glCompressedTexImage2D" (target: u32, level: i32, internal_format: u32, width: i32, height: i32, border: i32, image_size: i32, data: &[u8]);
            /// Specifies a compressed two-dimensional texture subimage.
            fn compressed_tex_sub_image_2d => "glCompressedTexSubImage2D" (target: u32, level: i32, x_offset: i32, y_offset: i32, width: i32, height: i32, format: u32, image_size: i32, data: &[u8]);
            /// Copies pixels into a two-dimensional texture image.
            fn copy_tex_image_2d => "glCopyTexImage2D" (target: u32, level: i32, internal_format: u32, x: i32, y: i32, width: i32, height: i32, border: i32);
            /// Copies pixels into a two-dimensional texture subimage.
            fn copy_tex_sub_image_2d => "glCopyTexSubImage2D" (target: u32, level: i32, x_offset: i32, y_offset: i32, x: i32, y: i32, width: i32, height: i32);
            /// Creates a program object.
            fn create_program => "glCreateProgram" () -> u32;
            /// Creates a shader object.
            fn create_shader => "glCreateShader" (kind: u32) -> u32;
            /// Specifies whether front- or back-facing facets are culled.
            fn cull_face => "glCullFace" (mode: u32);
            /// Deletes one buffer object.
            fn delete_buffer => "glDeleteBuffers" (buffer: u32);
            /// Deletes named buffer objects.
            fn delete_buffers => "glDeleteBuffers" (buffers: &[u32]);
            /// Deletes one framebuffer object.
            fn delete_framebuffer => "glDeleteFramebuffers" (framebuffer: u32);
            /// Deletes named framebuffer objects.
            fn delete_framebuffers => "glDeleteFramebuffers" (framebuffers: &[u32]);
            /// Deletes a program object.
            fn delete_program => "glDeleteProgram" (program: u32);
            /// Deletes one renderbuffer object.
            fn delete_renderbuffer => "glDeleteRenderbuffers" (renderbuffer: u32);
            /// Deletes named renderbuffer objects.
            fn delete_renderbuffers => "glDeleteRenderbuffers" (renderbuffers: &[u32]);
            /// Deletes a shader object.
            fn delete_shader => "glDeleteShader" (shader: u32);
            /// Deletes one texture.
            fn delete_texture => "glDeleteTextures" (texture: u32);
            /// Deletes named textures.
            fn delete_textures => "glDeleteTextures" (textures: &[u32]);
            /// Specifies the depth comparison function.
            fn depth_func => "glDepthFunc" (func: u32);
            /// Enables or disables writing into the depth buffer.
            fn depth_mask => "glDepthMask" (flag: bool);
            /// Specifies the mapping of depth values to window coordinates.
            fn depth_rangef => "glDepthRangef" (z_near: f32, z_far: f32);
            /// Detaches a shader object from a program object.
            fn detach_shader => "glDetachShader" (program: u32, shader: u32);
            /// Disables a server-side capability.
            fn disable => "glDisable" (cap: u32);
            /// Disables a generic vertex attribute array.
            fn disable_vertex_attrib_array => "glDisableVertexAttribArray" (index: u32);
            /// Renders primitives from array data.
            fn draw_arrays => "glDrawArrays" (mode: u32, first: i32, count: i32);
            /// Renders indexed primitives from a client-side index buffer.
            fn draw_elements => "glDrawElements" (mode: u32, count: i32, kind: u32, indices: &[u8]);
            /// Renders indexed primitives from the bound element array buffer.
            fn draw_elements_offset => "glDrawElements" (mode: u32, count: i32, kind: u32, indices_offset: i32);
            /// Enables a server-side capability.
            fn enable => "glEnable" (cap: u32);
            /// Enables a generic vertex attribute array.
            fn enable_vertex_attrib_array => "glEnableVertexAttribArray" (index: u32);
            /// Blocks until all GL execution is complete.
            fn finish => "glFinish" ();
            /// Forces execution of GL commands in finite time.
            fn flush => "glFlush" ();
            /// Attaches a renderbuffer to a framebuffer.
            fn framebuffer_renderbuffer => "glFramebufferRenderbuffer" (target: u32, attachment: u32, renderbuffer_target: u32, renderbuffer: u32);
            /// Attaches a texture image to a framebuffer.
            fn framebuffer_texture_2d => "glFramebufferTexture2D" (target: u32, attachment: u32, tex_target: u32, texture: u32, level: i32);
            /// Defines front- and back-facing polygons.
            fn front_face => "glFrontFace" (mode: u32);
            /// Generates one buffer object name.
            fn gen_buffer => "glGenBuffers" () -> u32;
            /// Generates buffer object names into `buffers`.
            fn gen_buffers => "glGenBuffers" (buffers: &mut [u32]);
            /// Generates a complete set of mipmaps for a texture.
            fn generate_mipmap => "glGenerateMipmap" (target: u32);
            /// Generates one framebuffer object name.
            fn gen_framebuffer => "glGenFramebuffers" () -> u32;
            /// Generates framebuffer object names into `framebuffers`.
            fn gen_framebuffers => "glGenFramebuffers" (framebuffers: &mut [u32]);
            /// Generates one renderbuffer object name.
            fn gen_renderbuffer => "glGenRenderbuffers" () -> u32;
            /// Generates renderbuffer object names into `renderbuffers`.
            fn gen_renderbuffers => "glGenRenderbuffers" (renderbuffers: &mut [u32]);
            /// Generates one texture name.
            fn gen_texture => "glGenTextures" () -> u32;
            /// Generates texture names into `textures`.
            fn gen_textures => "glGenTextures" (textures: &mut [u32]);
            /// Returns information about an active attribute variable.
            fn get_active_attrib => "glGetActiveAttrib" (program: u32, index: u32, size: &mut [i32], kind: &mut [u32]) -> String;
            /// Returns information about an active uniform variable.
            fn get_active_uniform => "glGetActiveUniform" (program: u32, index: u32, size: &mut [i32], kind: &mut [u32]) -> String;
            /// Returns the shader objects attached to a program object.
            fn get_attached_shaders => "glGetAttachedShaders" (program: u32, count: &mut [i32], shaders: &mut [u32]);
            /// Returns the location of an attribute variable.
            fn get_attrib_location => "glGetAttribLocation" (program: u32, name: &str) -> i32;
            /// Returns boolean state.
            fn get_booleanv => "glGetBooleanv" (pname: u32, params: &mut [bool]);
            /// Returns parameters of a buffer object.
            fn get_buffer_parameteriv => "glGetBufferParameteriv" (target: u32, pname: u32, params: &mut [i32]);
            /// Returns and clears one pending error code, or `GL_NO_ERROR`.
            fn get_error => "glGetError" () -> u32;
            /// Returns floating-point state.
            fn get_floatv => "glGetFloatv" (pname: u32, params: &mut [f32]);
            /// Returns attachment parameters of a framebuffer object.
            fn get_framebuffer_attachment_parameteriv => "glGetFramebufferAttachmentParameteriv" (target: u32, attachment: u32, pname: u32, params: &mut [i32]);
            /// Returns integer state.
            fn get_integerv => "glGetIntegerv" (pname: u32, params: &mut [i32]);
            /// Returns a parameter of a program object.
            fn get_programiv => "glGetProgramiv" (program: u32, pname: u32, params: &mut [i32]);
            /// Returns the information log of a program object.
            fn get_program_info_log => "glGetProgramInfoLog" (program: u32) -> String;
            /// Returns parameters of a renderbuffer object.
            fn get_renderbuffer_parameteriv => "glGetRenderbufferParameteriv" (target: u32, pname: u32, params: &mut [i32]);
            /// Returns a parameter of a shader object.
            fn get_shaderiv => "glGetShaderiv" (shader: u32, pname: u32, params: &mut [i32]);
            /// Returns the information log of a shader object.
            fn get_shader_info_log => "glGetShaderInfoLog" (shader: u32) -> String;
            /// Returns range and precision for a shader numeric format.
            fn get_shader_precision_format => "glGetShaderPrecisionFormat" (shader_kind: u32, precision_kind: u32, range: &mut [i32], precision: &mut [i32]);
            /// Returns a string describing the current GL connection.
            fn get_string => "glGetString" (name: u32) -> String;
            /// Returns floating-point texture parameters.
            fn get_tex_parameterfv => "glGetTexParameterfv" (target: u32, pname: u32, params: &mut [f32]);
            /// Returns integer texture parameters.
            fn get_tex_parameteriv => "glGetTexParameteriv" (target: u32, pname: u32, params: &mut [i32]);
            /// Returns the floating-point value of a uniform variable.
            fn get_uniformfv => "glGetUniformfv" (program: u32, location: i32, params: &mut [f32]);
            /// Returns the integer value of a uniform variable.
            fn get_uniformiv => "glGetUniformiv" (program: u32, location: i32, params: &mut [i32]);
            /// Returns the location of a uniform variable.
            fn get_uniform_location => "glGetUniformLocation" (program: u32, name: &str) -> i32;
            /// Returns floating-point vertex attribute parameters.
            fn get_vertex_attribfv => "glGetVertexAttribfv" (index: u32, pname: u32, params: &mut [f32]);
            /// Returns integer vertex attribute parameters.
            fn get_vertex_attribiv => "glGetVertexAttribiv" (index: u32, pname: u32, params: &mut [i32]);
            /// Returns the address of a vertex attribute pointer.
            fn get_vertex_attrib_pointerv => "glGetVertexAttribPointerv" (index: u32, pname: u32, pointer: &mut [u8]);
            /// Specifies implementation-specific hints.
            fn hint => "glHint" (target: u32, mode: u32);
            /// Determines if a name corresponds to a buffer object.
            fn is_buffer => "glIsBuffer" (buffer: u32) -> bool;
            /// Tests whether a capability is enabled.
            fn is_enabled => "glIsEnabled" (cap: u32) -> bool;
            /// Determines if a name corresponds to a framebuffer object.
            fn is_framebuffer => "glIsFramebuffer" (framebuffer: u32) -> bool;
            /// Determines if a name corresponds to a program object.
            fn is_program => "glIsProgram" (program: u32) -> bool;
            /// Determines if a name corresponds to a renderbuffer object.
            fn is_renderbuffer => "glIsRenderbuffer" (renderbuffer: u32) -> bool;
            /// Determines if a name corresponds to a shader object.
            fn is_shader => "glIsShader" (shader: u32) -> bool;
            /// Determines if a name corresponds to a texture.
            fn is_texture => "glIsTexture" (texture: u32) -> bool;
            /// Specifies the width of rasterized lines.
            fn line_width => "glLineWidth" (width: f32);
            /// Links a program object.
            fn link_program => "glLinkProgram" (program: u32);
            /// Sets pixel storage modes.
            fn pixel_storei => "glPixelStorei" (pname: u32, param: i32);
            /// Sets the scale and units used to calculate depth values.
            fn polygon_offset => "glPolygonOffset" (factor: f32, units: f32);
            /// Reads a block of pixels from the framebuffer.
            fn read_pixels => "glReadPixels" (x: i32, y: i32, width: i32, height: i32, format: u32, kind: u32, pixels: &mut [u8]);
            /// Releases resources allocated by the shader compiler.
            fn release_shader_compiler => "glReleaseShaderCompiler" ();
            /// Creates and initializes a renderbuffer object's data store.
            fn renderbuffer_storage => "glRenderbufferStorage" (target: u32, internal_format: u32, width: i32, height: i32);
            /// Specifies multisample coverage parameters.
            fn sample_coverage => "glSampleCoverage" (value: f32, invert: bool);
            /// Defines the scissor box.
            fn scissor => "glScissor" (x: i32, y: i32, width: i32, height: i32);
            /// Loads pre-compiled shader binaries.
            fn shader_binary => "glShaderBinary" (shaders: &[u32], binary_format: u32, binary: &[u8]);
            /// Replaces the source code of a shader object.
            fn shader_source => "glShaderSource" (shader: u32, source: &str);
            /// Sets the stencil test function and reference value.
            fn stencil_func => "glStencilFunc" (func: u32, reference: i32, mask: u32);
            /// Sets the stencil test function for front and/or back faces.
            fn stencil_func_separate => "glStencilFuncSeparate" (face: u32, func: u32, reference: i32, mask: u32);
            /// Controls writing of individual bits in the stencil planes.
            fn stencil_mask => "glStencilMask" (mask: u32);
            /// Controls stencil writes for front and/or back faces.
            fn stencil_mask_separate => "glStencilMaskSeparate" (face: u32, mask: u32);
            /// Sets stencil test actions.
            fn stencil_op => "glStencilOp" (fail: u32, z_fail: u32, z_pass: u32);
            /// Sets stencil test actions for front and/or back faces.
            fn stencil_op_separate => "glStencilOpSeparate" (face: u32, fail: u32, z_fail: u32, z_pass: u32);
            /// Specifies a two-dimensional texture image.
            fn tex_image_2d => "glTexImage2D" (target: u32, level: i32, internal_format: i32, width: i32, height: i32, border: i32, format: u32, kind: u32, pixels: Option<&[u8]>);
            /// Sets a floating-point texture parameter.
            fn tex_parameterf => "glTexParameterf" (target: u32, pname: u32, param: f32);
            /// Sets floating-point texture parameters from a buffer.
            fn tex_parameterfv => "glTexParameterfv" (target: u32, pname: u32, params: &[f32]);
            /// Sets an integer texture parameter.
            fn tex_parameteri => "glTexParameteri" (target: u32, pname: u32, param: i32);
            /// Sets integer texture parameters from a buffer.
            fn tex_parameteriv => "glTexParameteriv" (target: u32, pname: u32, params: &[i32]);
            /// Specifies a two-dimensional texture subimage.
            fn tex_sub_image_2d => "glTexSubImage2D" (target: u32, level: i32, x_offset: i32, y_offset: i32, width: i32, height: i32, format: u32, kind: u32, pixels: &[u8]);
            /// Sets a `float` uniform.
            fn uniform_1f => "glUniform1f" (location: i32, x: f32);
            /// Sets a `float` uniform array.
            fn uniform_1fv => "glUniform1fv" (location: i32, count: i32, v: &[f32]);
            /// Sets an `int` or sampler uniform.
            fn uniform_1i => "glUniform1i" (location: i32, x: i32);
            /// Sets an `int` uniform array.
            fn uniform_1iv => "glUniform1iv" (location: i32, count: i32, v: &[i32]);
            /// Sets a `vec2` uniform.
            fn uniform_2f => "glUniform2f" (location: i32, x: f32, y: f32);
            /// Sets a `vec2` uniform array.
            fn uniform_2fv => "glUniform2fv" (location: i32, count: i32, v: &[f32]);
            /// Sets an `ivec2` uniform.
            fn uniform_2i => "glUniform2i" (location: i32, x: i32, y: i32);
            /// Sets an `ivec2` uniform array.
            fn uniform_2iv => "glUniform2iv" (location: i32, count: i32, v: &[i32]);
            /// Sets a `vec3` uniform.
            fn uniform_3f => "glUniform3f" (location: i32, x: f32, y: f32, z: f32);
            /// Sets a `vec3` uniform array.
            fn uniform_3fv => "glUniform3fv" (location: i32, count: i32, v: &[f32]);
            /// Sets an `ivec3` uniform.
            fn uniform_3i => "glUniform3i" (location: i32, x: i32, y: i32, z: i32);
            /// Sets an `ivec3` uniform array.
            fn uniform_3iv => "glUniform3iv" (location: i32, count: i32, v: &[i32]);
            /// Sets a `vec4` uniform.
            fn uniform_4f => "glUniform4f" (location: i32, x: f32, y: f32, z: f32, w: f32);
            /// Sets a `vec4` uniform array.
            fn uniform_4fv => "glUniform4fv" (location: i32, count: i32, v: &[f32]);
            /// Sets an `ivec4` uniform.
            fn uniform_4i => "glUniform4i" (location: i32, x: i32, y: i32, z: i32, w: i32);
            /// Sets an `ivec4` uniform array.
            fn uniform_4iv => "glUniform4iv" (location: i32, count: i32, v: &[i32]);
            /// Sets a `mat2` uniform array.
            fn uniform_matrix_2fv => "glUniformMatrix2fv" (location: i32, count: i32, transpose: bool, value: &[f32]);
            /// Sets a `mat3` uniform array.
            fn uniform_matrix_3fv => "glUniformMatrix3fv" (location: i32, count: i32, transpose: bool, value: &[f32]);
            /// Sets a `mat4` uniform array.
            fn uniform_matrix_4fv => "glUniformMatrix4fv" (location: i32, count: i32, transpose: bool, value: &[f32]);
            /// Installs a program object as part of the current rendering state.
            fn use_program => "glUseProgram" (program: u32);
            /// Validates a program object.
            fn validate_program => "glValidateProgram" (program: u32);
            /// Sets a one-component generic vertex attribute.
            fn vertex_attrib_1f => "glVertexAttrib1f" (index: u32, x: f32);
            /// Sets a one-component generic vertex attribute from a buffer.
            fn vertex_attrib_1fv => "glVertexAttrib1fv" (index: u32, values: &[f32]);
            /// Sets a two-component generic vertex attribute.
            fn vertex_attrib_2f => "glVertexAttrib2f" (index: u32, x: f32, y: f32);
            /// Sets a two-component generic vertex attribute from a buffer.
            fn vertex_attrib_2fv => "glVertexAttrib2fv" (index: u32, values: &[f32]);
            /// Sets a three-component generic vertex attribute.
            fn vertex_attrib_3f => "glVertexAttrib3f" (index: u32, x: f32, y: f32, z: f32);
            /// Sets a three-component generic vertex attribute from a buffer.
            fn vertex_attrib_3fv => "glVertexAttrib3fv" (index: u32, values: &[f32]);
            /// Sets a four-component generic vertex attribute.
            fn vertex_attrib_4f => "glVertexAttrib4f" (index: u32, x: f32, y: f32, z: f32, w: f32);
            /// Sets a four-component generic vertex attribute from a buffer.
            fn vertex_attrib_4fv => "glVertexAttrib4fv" (index: u32, values: &[f32]);
            /// Defines an array of generic vertex attribute data in client memory.
            fn vertex_attrib_pointer => "glVertexAttribPointer" (index: u32, size: i32, kind: u32, normalized: bool, stride: i32, data: &[u8]);
            /// Defines an array of generic vertex attribute data in the bound array buffer.
            fn vertex_attrib_pointer_offset => "glVertexAttribPointer" (index: u32, size: i32, kind: u32, normalized: bool, stride: i32, offset: i32);
            /// Sets the viewport.
            fn viewport => "glViewport" (x: i32, y: i32, width: i32, height: i32);
        }
    };
}

/// Resolves an optional return type from the operation table to a concrete type.
#[doc(hidden)]
#[macro_export]
macro_rules! gl_return_type {
    () => {
        ()
    };
    ($ret:ty) => {
        $ret
    };
}

/// Static description of one contract operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationInfo {
    /// Rust method name on [`Gl20`].
    pub method: &'static str,
    /// GL entry-point name reported to hooks.
    pub gl_name: &'static str,
}

macro_rules! declare_contract {
    ($(
        $(#[$attr:meta])*
        fn $method:ident => $gl_name:literal ($($arg:ident : $ty:ty),* $(,)?) $(-> $ret:ty)?;
    )*) => {
        /// The OpenGL ES 2.0 API contract.
        ///
        /// Every method returns [`GlResult`] so that a backend or an
        /// interception hook can stop the call with a typed failure. A
        /// backend that cannot fail simply always returns `Ok`.
        ///
        /// Receivers are `&mut self`: a GL context is bound to one thread and
        /// calls against it are never interleaved.
        pub trait Gl20 {
            $(
                $(#[$attr])*
                fn $method(&mut self, $($arg: $ty),*) -> GlResult<$crate::gl_return_type!($($ret)?)>;
            )*
        }

        impl<G: Gl20 + ?Sized> Gl20 for Box<G> {
            $(
                fn $method(&mut self, $($arg: $ty),*) -> GlResult<$crate::gl_return_type!($($ret)?)> {
                    (**self).$method($($arg),*)
                }
            )*
        }

        impl<G: Gl20 + ?Sized> Gl20 for &mut G {
            $(
                fn $method(&mut self, $($arg: $ty),*) -> GlResult<$crate::gl_return_type!($($ret)?)> {
                    (**self).$method($($arg),*)
                }
            )*
        }

        /// Every operation of the contract, in table order.
        pub const OPERATIONS: &[OperationInfo] = &[
            $(
                OperationInfo {
                    method: stringify!($method),
                    gl_name: $gl_name,
                },
            )*
        ];
    };
}

for_each_gl_operation!(declare_contract);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn method_names_are_unique() {
        let mut seen = HashSet::new();
        for op in OPERATIONS {
            assert!(seen.insert(op.method), "duplicate method {}", op.method);
        }
    }

    #[test]
    fn every_operation_names_a_gl_entry_point() {
        for op in OPERATIONS {
            assert!(op.gl_name.starts_with("gl"), "{} -> {}", op.method, op.gl_name);
        }
    }

    #[test]
    fn overloads_share_their_gl_name() {
        let gl_name = |method: &str| {
            OPERATIONS
                .iter()
                .find(|op| op.method == method)
                .map(|op| op.gl_name)
        };
        assert_eq!(gl_name("draw_elements"), Some("glDrawElements"));
        assert_eq!(gl_name("draw_elements_offset"), Some("glDrawElements"));
        assert_eq!(
            gl_name("vertex_attrib_pointer_offset"),
            Some("glVertexAttribPointer")
        );
    }

    #[test]
    fn contract_covers_the_full_surface() {
        assert!(OPERATIONS.len() >= 140);
    }
}
