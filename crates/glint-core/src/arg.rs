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

//! Captured call arguments and the operation descriptor handed to the call hook.
//!
//! Every parameter type that appears in the [`Gl20`](crate::Gl20) contract
//! implements [`AsGlArg`], which lets the interceptor box any argument list
//! into a uniform `&[GlArg]` without per-operation special casing.

use std::fmt;

/// The element type of a buffer argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// Raw bytes (pixel data, vertex data, shader binaries).
    U8,
    /// Signed 32-bit integers.
    I32,
    /// Unsigned 32-bit integers (object names).
    U32,
    /// 32-bit floats.
    F32,
    /// Booleans.
    Bool,
}

impl ElementKind {
    /// Rust-style name of the element type.
    pub fn name(self) -> &'static str {
        match self {
            ElementKind::U8 => "u8",
            ElementKind::I32 => "i32",
            ElementKind::U32 => "u32",
            ElementKind::F32 => "f32",
            ElementKind::Bool => "bool",
        }
    }
}

/// Types that may appear as the element of a buffer argument.
pub trait BufferElement {
    /// The element kind reported in captured arguments.
    const KIND: ElementKind;
}

impl BufferElement for u8 {
    const KIND: ElementKind = ElementKind::U8;
}

impl BufferElement for i32 {
    const KIND: ElementKind = ElementKind::I32;
}

impl BufferElement for u32 {
    const KIND: ElementKind = ElementKind::U32;
}

impl BufferElement for f32 {
    const KIND: ElementKind = ElementKind::F32;
}

impl BufferElement for bool {
    const KIND: ElementKind = ElementKind::Bool;
}

/// A reference to a caller-provided buffer, captured without its contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferRef {
    /// Element type of the buffer.
    pub kind: ElementKind,
    /// Number of elements.
    pub len: usize,
    /// `true` for out-parameters the backend writes into.
    pub writable: bool,
}

impl BufferRef {
    /// Describes a read-only buffer of `len` elements of `T`.
    pub fn input<T: BufferElement>(len: usize) -> Self {
        Self {
            kind: T::KIND,
            len,
            writable: false,
        }
    }

    /// Describes an out-parameter buffer of `len` elements of `T`.
    pub fn output<T: BufferElement>(len: usize) -> Self {
        Self {
            kind: T::KIND,
            len,
            writable: true,
        }
    }
}

impl fmt::Display for BufferRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let access = if self.writable { "&mut " } else { "&" };
        write!(f, "{access}[{}; {}]", self.kind.name(), self.len)
    }
}

/// One captured argument of an intercepted call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GlArg<'a> {
    /// `GLint` / `GLsizei` / offsets.
    Int(i32),
    /// `GLenum`, `GLbitfield`, and opaque object handles (`GLuint`).
    Uint(u32),
    /// `GLfloat` / `GLclampf`.
    Float(f32),
    /// `GLboolean`.
    Bool(bool),
    /// Strings (shader sources, attribute and uniform names).
    Str(&'a str),
    /// A caller-provided buffer or out-parameter.
    Buffer(BufferRef),
    /// An absent optional buffer.
    Null,
}

impl fmt::Display for GlArg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GlArg::Int(v) => write!(f, "{v}"),
            GlArg::Uint(v) => write!(f, "{v}"),
            // Debug keeps the decimal point on whole numbers.
            GlArg::Float(v) => write!(f, "{v:?}"),
            GlArg::Bool(v) => write!(f, "{v}"),
            // Quoted and escaped so multi-line shader sources stay on one line.
            GlArg::Str(s) => write!(f, "{s:?}"),
            GlArg::Buffer(buffer) => write!(f, "{buffer}"),
            GlArg::Null => f.write_str("null"),
        }
    }
}

/// Conversion of a contract parameter into its captured form.
pub trait AsGlArg {
    /// Borrows `self` as a [`GlArg`].
    fn as_gl_arg(&self) -> GlArg<'_>;
}

impl AsGlArg for i32 {
    fn as_gl_arg(&self) -> GlArg<'_> {
        GlArg::Int(*self)
    }
}

impl AsGlArg for u32 {
    fn as_gl_arg(&self) -> GlArg<'_> {
        GlArg::Uint(*self)
    }
}

impl AsGlArg for f32 {
    fn as_gl_arg(&self) -> GlArg<'_> {
        GlArg::Float(*self)
    }
}

impl AsGlArg for bool {
    fn as_gl_arg(&self) -> GlArg<'_> {
        GlArg::Bool(*self)
    }
}

impl AsGlArg for &str {
    fn as_gl_arg(&self) -> GlArg<'_> {
        GlArg::Str(self)
    }
}

impl<T: BufferElement> AsGlArg for &[T] {
    fn as_gl_arg(&self) -> GlArg<'_> {
        GlArg::Buffer(BufferRef::input::<T>(self.len()))
    }
}

impl<T: BufferElement> AsGlArg for &mut [T] {
    fn as_gl_arg(&self) -> GlArg<'_> {
        GlArg::Buffer(BufferRef::output::<T>(self.len()))
    }
}

impl<T: BufferElement> AsGlArg for Option<&[T]> {
    fn as_gl_arg(&self) -> GlArg<'_> {
        match self {
            Some(buffer) => GlArg::Buffer(BufferRef::input::<T>(buffer.len())),
            None => GlArg::Null,
        }
    }
}

/// The name and captured arguments of one intercepted call.
///
/// Created on the stack for each call and dropped as soon as the call hook
/// returns.
#[derive(Debug, Clone, Copy)]
pub struct Operation<'a> {
    name: &'static str,
    args: &'a [GlArg<'a>],
}

impl<'a> Operation<'a> {
    /// Creates a descriptor for the GL entry point `name`.
    pub fn new(name: &'static str, args: &'a [GlArg<'a>]) -> Self {
        Self { name, args }
    }

    /// GL entry-point name, e.g. `glDrawArrays`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Arguments in declared order.
    pub fn args(&self) -> &'a [GlArg<'a>] {
        self.args
    }

    /// Returns the argument at `index`, if any.
    pub fn arg(&self, index: usize) -> Option<GlArg<'a>> {
        self.args.get(index).copied()
    }
}

impl fmt::Display for Operation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{arg}")?;
        }
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalars_render_with_their_default_form() {
        assert_eq!(GlArg::Int(-3).to_string(), "-3");
        assert_eq!(GlArg::Uint(0x4000).to_string(), "16384");
        assert_eq!(GlArg::Float(1.0).to_string(), "1.0");
        assert_eq!(GlArg::Float(0.25).to_string(), "0.25");
        assert_eq!(GlArg::Bool(false).to_string(), "false");
        assert_eq!(GlArg::Null.to_string(), "null");
    }

    #[test]
    fn strings_stay_on_one_line() {
        let source = "void main() {\n  gl_FragColor = vec4(1.0);\n}";
        let rendered = GlArg::Str(source).to_string();
        assert!(!rendered.contains('\n'));
        assert!(rendered.starts_with('"') && rendered.ends_with('"'));
    }

    #[test]
    fn buffers_render_kind_length_and_access() {
        let data = [0.0f32; 16];
        let slice: &[f32] = &data;
        assert_eq!(slice.as_gl_arg().to_string(), "&[f32; 16]");

        let mut params = [0i32; 1];
        let out: &mut [i32] = &mut params;
        assert_eq!(out.as_gl_arg().to_string(), "&mut [i32; 1]");

        let missing: Option<&[u8]> = None;
        assert_eq!(missing.as_gl_arg(), GlArg::Null);
    }

    #[test]
    fn operation_renders_as_call_expression() {
        let args = [GlArg::Uint(4), GlArg::Int(0), GlArg::Int(6)];
        let op = Operation::new("glDrawArrays", &args);
        assert_eq!(op.to_string(), "glDrawArrays(4, 0, 6)");
        assert_eq!(op.arg(2), Some(GlArg::Int(6)));
        assert_eq!(op.arg(3), None);

        let empty = Operation::new("glFlush", &[]);
        assert_eq!(empty.to_string(), "glFlush()");
    }
}
