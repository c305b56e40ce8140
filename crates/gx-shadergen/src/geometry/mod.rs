//! Geometry shader generation.
//!
//! [`get_geometry_shader_uid`] and [`generate_geometry_shader_code`] run the same generator; the
//! first against a uid sink that drops all text, the second against a [`ShaderCode`] buffer. A
//! shader cache computes the uid on every draw and only asks for text on a miss.

pub mod cache;
pub mod constants;
mod dialect;
mod generator;
pub mod reference;
mod uid;

use thiserror::Error;
use tracing::{debug, error};

use crate::shader_code::{ApiType, ShaderCode};
use crate::state::{PrimitiveType, VideoConfig, XfState};

use dialect::{Glsl, Hlsl};
use generator::generate_geometry_shader;

pub use cache::{GeometryShaderCache, GeometryShaderLookup, ShaderCacheLookupSource};
pub use constants::{GeometryShaderConstants, GeometryShaderManager, LINE_PT_TEX_OFFSETS};
pub use uid::GeometryShaderUid;

#[derive(Debug, Error)]
pub enum GeometryShaderError {
    /// The generated text did not fit the shader buffer. This is a sizing bug in the buffer
    /// constant, not a bad input; regenerating produces the same overflow.
    #[error("geometry shader generator - buffer too small, canary has been eaten ({required} bytes needed, capacity {capacity})")]
    BufferOverflow { capacity: usize, required: usize },
    /// The same uid produced two different shader texts.
    #[error("geometry shader uid {uid} generated different source for the same variant")]
    UidMismatch { uid: GeometryShaderUid },
}

/// Compute the uid of the geometry shader variant for the given state without generating text.
pub fn get_geometry_shader_uid(
    primitive: PrimitiveType,
    api: ApiType,
    xf: &XfState,
    config: &VideoConfig,
) -> GeometryShaderUid {
    let mut uid = GeometryShaderUid::default();
    match api {
        ApiType::OpenGl => generate_geometry_shader::<_, Glsl>(&mut uid, primitive, xf, config),
        ApiType::D3D => generate_geometry_shader::<_, Hlsl>(&mut uid, primitive, xf, config),
    }
    uid
}

/// Generate geometry shader source into `out`, replacing whatever it held.
///
/// On success `out.as_str()` holds the complete shader and `out.uid()` the uid
/// [`get_geometry_shader_uid`] returns for the same inputs.
pub fn generate_geometry_shader_code(
    out: &mut ShaderCode<'_>,
    primitive: PrimitiveType,
    api: ApiType,
    xf: &XfState,
    config: &VideoConfig,
) -> Result<(), GeometryShaderError> {
    match api {
        ApiType::OpenGl => generate_geometry_shader::<_, Glsl>(out, primitive, xf, config),
        ApiType::D3D => generate_geometry_shader::<_, Hlsl>(out, primitive, xf, config),
    }

    if !out.canary_intact() {
        let err = GeometryShaderError::BufferOverflow {
            capacity: out.capacity(),
            required: out.len() + 2,
        };
        error!(%err, ?primitive, ?api, "geometry shader generation failed");
        return Err(err);
    }

    debug!(
        ?primitive,
        ?api,
        len = out.len(),
        "generated geometry shader"
    );
    Ok(())
}
