use std::fmt;

use crate::shader_code::ShaderOutput;
use crate::state::{PrimitiveType, VideoConfig, XfState};

/// Identifies a geometry shader variant.
///
/// Holds exactly the state the generator branches on. Two equal uids produce byte-identical
/// source for the same [`ApiType`](crate::ApiType) and [`BackendInfo`](crate::BackendInfo), so
/// the uid can key a shader cache scoped to one backend.
///
/// The uid is itself a [`ShaderOutput`]: running the generator against it records the uid and
/// discards all text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GeometryShaderUid {
    pub primitive_type: PrimitiveType,
    pub wireframe: bool,
    pub stereo: bool,
    pub pixel_lighting: bool,
    pub num_tex_gens: u32,
}

impl GeometryShaderUid {
    pub fn new(primitive_type: PrimitiveType, xf: &XfState, config: &VideoConfig) -> Self {
        Self {
            primitive_type,
            wireframe: config.wireframe,
            stereo: config.stereo_enabled(),
            pixel_lighting: xf.num_color_chans > 0
                && config.enable_pixel_lighting
                && config.backend_info.supports_pixel_lighting,
            num_tex_gens: xf.num_tex_gens,
        }
    }
}

impl ShaderOutput for GeometryShaderUid {
    fn clear(&mut self) {
        *self = Self::default();
    }

    fn write_fmt(&mut self, _args: fmt::Arguments<'_>) {}

    fn record_uid(&mut self, uid: &GeometryShaderUid) {
        *self = *uid;
    }
}

impl fmt::Display for GeometryShaderUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "gs[{} texgens={}",
            self.primitive_type, self.num_tex_gens
        )?;
        if self.wireframe {
            f.write_str(" wireframe")?;
        }
        if self.stereo {
            f.write_str(" stereo")?;
        }
        if self.pixel_lighting {
            f.write_str(" pixel_lighting")?;
        }
        f.write_str("]")
    }
}
