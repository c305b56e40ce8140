//! Output sinks shared by the shader generators.
//!
//! A generator is written once against [`ShaderOutput`] and driven either by a [`ShaderCode`]
//! (source text into a fixed-size buffer) or by a uid type that only records the variant-selecting
//! state. Keeping a single code path for both is what guarantees that a uid never describes a
//! different shader than the one the text generator produces.

use std::fmt;

use crate::geometry::GeometryShaderUid;

/// Capacity of the buffer geometry shaders are generated into.
///
/// The largest variant (points, stereo through the non-instanced loop, wireframe, eight texgens,
/// per-pixel lighting, GLSL) is well under a quarter of this.
pub const GEOMETRY_SHADER_BUFFER_SIZE: usize = 32768;

/// Byte stored in the last slot of the buffer before generation. If it is gone afterwards the
/// text ran into the end of the buffer.
pub(crate) const CANARY: u8 = 0x7C;

/// Shading language dialect to generate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ApiType {
    /// GLSL with `layout` qualifiers and interface blocks.
    OpenGl,
    /// HLSL with `cbuffer`s and stream output parameters.
    D3D,
}

impl ApiType {
    pub const ALL: [ApiType; 2] = [ApiType::OpenGl, ApiType::D3D];
}

/// Sink a shader generator writes into.
pub trait ShaderOutput {
    /// Reset the sink before a generation pass.
    fn clear(&mut self);

    /// Append formatted source text. Sinks that only collect uids discard it.
    ///
    /// Named so that `write!(out, ...)` works on any sink.
    fn write_fmt(&mut self, args: fmt::Arguments<'_>);

    /// Record the uid of the variant being generated.
    fn record_uid(&mut self, uid: &GeometryShaderUid);
}

/// Caller-owned storage for generated source text.
///
/// The storage is reused across generation calls; each [`ShaderCode`] built on top of it starts
/// from an empty string, so the text of a previous call is invalidated by the next one.
pub struct ShaderBuffer {
    bytes: Box<[u8]>,
}

impl ShaderBuffer {
    pub fn new() -> Self {
        Self::with_capacity(GEOMETRY_SHADER_BUFFER_SIZE)
    }

    /// Buffer with a custom capacity. One byte is reserved for the canary and one for the NUL
    /// terminator, so the longest text that fits is `capacity - 2` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        debug_assert!(capacity >= 2, "shader buffer needs room for NUL and canary");
        Self {
            bytes: vec![0u8; capacity.max(2)].into_boxed_slice(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.bytes.len()
    }
}

impl Default for ShaderBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ShaderBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShaderBuffer")
            .field("capacity", &self.capacity())
            .finish_non_exhaustive()
    }
}

/// Text sink writing NUL-terminated source into a [`ShaderBuffer`].
///
/// Writes behave like `vsprintf` into a fixed array: bytes land at the current end of the text
/// followed by a terminator, and anything past the end of the buffer is dropped. Running into the
/// last byte overwrites the canary, which [`ShaderCode::canary_intact`] reports.
pub struct ShaderCode<'a> {
    bytes: &'a mut [u8],
    /// Length of the text the generator asked for, which may exceed the buffer.
    len: usize,
    uid: Option<GeometryShaderUid>,
}

impl<'a> ShaderCode<'a> {
    pub fn new(buffer: &'a mut ShaderBuffer) -> Self {
        let mut code = Self {
            bytes: &mut buffer.bytes[..],
            len: 0,
            uid: None,
        };
        code.clear();
        code
    }

    pub fn capacity(&self) -> usize {
        self.bytes.len()
    }

    /// Length of the generated text, including anything that did not fit.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Generated text, up to (not including) the NUL terminator.
    pub fn as_str(&self) -> &str {
        let end = self.len.min(self.bytes.len() - 1);
        let bytes = &self.bytes[..end];
        match std::str::from_utf8(bytes) {
            Ok(text) => text,
            // Truncation at capacity may split a multi-byte character; anything else is corruption.
            Err(err) => {
                debug_assert!(
                    err.error_len().is_none(),
                    "shader buffer holds invalid UTF-8 at byte {}",
                    err.valid_up_to()
                );
                std::str::from_utf8(&bytes[..err.valid_up_to()]).unwrap_or_default()
            }
        }
    }

    /// Uid recorded by the last generation pass.
    pub fn uid(&self) -> Option<&GeometryShaderUid> {
        self.uid.as_ref()
    }

    pub fn canary_intact(&self) -> bool {
        self.bytes[self.bytes.len() - 1] == CANARY
    }
}

impl ShaderOutput for ShaderCode<'_> {
    fn clear(&mut self) {
        let last = self.bytes.len() - 1;
        self.bytes[0] = 0;
        self.bytes[last] = CANARY;
        self.len = 0;
        self.uid = None;
    }

    fn write_fmt(&mut self, args: fmt::Arguments<'_>) {
        let mut cursor = Cursor {
            bytes: &mut *self.bytes,
            len: &mut self.len,
        };
        // `Cursor::write_str` never fails.
        let _ = fmt::write(&mut cursor, args);
        if self.len < self.bytes.len() {
            self.bytes[self.len] = 0;
        }
    }

    fn record_uid(&mut self, uid: &GeometryShaderUid) {
        self.uid = Some(*uid);
    }
}

impl fmt::Debug for ShaderCode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShaderCode")
            .field("capacity", &self.capacity())
            .field("len", &self.len)
            .field("uid", &self.uid)
            .finish()
    }
}

struct Cursor<'b> {
    bytes: &'b mut [u8],
    len: &'b mut usize,
}

impl fmt::Write for Cursor<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let start = *self.len;
        let cap = self.bytes.len();
        if start < cap {
            let n = s.len().min(cap - start);
            self.bytes[start..start + n].copy_from_slice(&s.as_bytes()[..n]);
        }
        *self.len += s.len();
        Ok(())
    }
}
