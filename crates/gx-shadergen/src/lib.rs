//! Shader generation for the fixed-function GX geometry stage.
//!
//! The console rasterizer draws wide lines and sized point sprites that host APIs do not support
//! natively. This crate generates GLSL and HLSL geometry shaders that expand those primitives,
//! plus stereoscopic layer routing and wireframe outlines, together with a compact uid per shader
//! variant for use as a shader cache key.
//!
//! ```
//! use gx_shadergen::{
//!     generate_geometry_shader_code, get_geometry_shader_uid, ApiType, PrimitiveType,
//!     ShaderBuffer, ShaderCode, VideoConfig, XfState,
//! };
//!
//! let config = VideoConfig::default();
//! let xf = XfState::new(2, 1);
//! let uid = get_geometry_shader_uid(PrimitiveType::Lines, ApiType::OpenGl, &xf, &config);
//!
//! let mut buffer = ShaderBuffer::new();
//! let mut code = ShaderCode::new(&mut buffer);
//! generate_geometry_shader_code(&mut code, PrimitiveType::Lines, ApiType::OpenGl, &xf, &config)
//!     .unwrap();
//! assert_eq!(code.uid(), Some(&uid));
//! assert!(code.as_str().contains("EmitVertex();"));
//! ```

pub mod geometry;
pub mod shader_code;
pub mod state;
pub mod vertex_output;

pub use geometry::{
    generate_geometry_shader_code, get_geometry_shader_uid, GeometryShaderCache,
    GeometryShaderConstants, GeometryShaderError, GeometryShaderManager, GeometryShaderUid,
};
pub use shader_code::{
    ApiType, ShaderBuffer, ShaderCode, ShaderOutput, GEOMETRY_SHADER_BUFFER_SIZE,
};
pub use state::{BackendInfo, PrimitiveType, StereoMode, VideoConfig, XfState, MAX_TEX_GENS};
