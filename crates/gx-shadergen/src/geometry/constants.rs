//! Contents of the `GSBlock` uniform block.
//!
//! The generated shaders read the stereo, line/point and texture-offset parameters from here at
//! run time, so none of these values are part of the shader uid.

use bytemuck::{Pod, Zeroable};

use crate::state::VideoConfig;

/// Per-eye horizontal offsets in `.x`/`.y`, convergence distance in `.z`.
pub const I_STEREOPARAMS: &str = "cstereo";
/// `(2 * viewport_width, -2 * viewport_height, line_width / 6, point_size / 6)`.
pub const I_LINEPTPARAMS: &str = "clinept";
/// `(line_bias_mask, point_bias_mask, line_tex_divisor, point_tex_divisor)`.
pub const I_TEXOFFSET: &str = "ctexoffset";

/// Texture coordinate divisor selected by the 3-bit line/point texture offset fields.
pub const LINE_PT_TEX_OFFSETS: [i32; 8] = [0, 16, 8, 4, 2, 1, 1, 1];

/// `std140` layout of `GSBlock`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct GeometryShaderConstants {
    pub stereoparams: [f32; 4],
    pub lineptparams: [f32; 4],
    pub texoffset: [i32; 4],
}

impl GeometryShaderConstants {
    /// Raw bytes for a uniform buffer upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

/// Keeps [`GeometryShaderConstants`] in sync with rasterizer state.
///
/// Setters mark the block dirty; the backend uploads it and calls
/// [`GeometryShaderManager::clear_dirty`] before the next draw.
#[derive(Debug)]
pub struct GeometryShaderManager {
    constants: GeometryShaderConstants,
    dirty: bool,
    perspective: bool,
}

impl GeometryShaderManager {
    pub fn new() -> Self {
        Self {
            constants: GeometryShaderConstants::default(),
            dirty: true,
            perspective: true,
        }
    }

    pub fn constants(&self) -> &GeometryShaderConstants {
        &self.constants
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Viewport half extents as stored in the transform unit (`wd`, `ht`).
    pub fn set_viewport(&mut self, half_width: f32, half_height: f32) {
        self.constants.lineptparams[0] = 2.0 * half_width;
        self.constants.lineptparams[1] = -2.0 * half_height;
        self.dirty = true;
    }

    /// Line width and point size are in 1/6 pixel units. `line_offset`/`point_offset` are the
    /// 3-bit texture offset selectors.
    pub fn set_line_point_width(
        &mut self,
        line_size: u32,
        point_size: u32,
        line_offset: u8,
        point_offset: u8,
    ) {
        self.constants.lineptparams[2] = line_size as f32 / 6.0;
        self.constants.lineptparams[3] = point_size as f32 / 6.0;
        self.constants.texoffset[2] = LINE_PT_TEX_OFFSETS[usize::from(line_offset & 7)];
        self.constants.texoffset[3] = LINE_PT_TEX_OFFSETS[usize::from(point_offset & 7)];
        self.dirty = true;
    }

    /// Enable or disable the line/point texture coordinate bias for one texture coordinate set.
    pub fn set_tex_coord_offsets(&mut self, texmap: u8, line_offset: bool, point_offset: bool) {
        debug_assert!(texmap < 8, "texmap {texmap} out of range");
        let bit = 1i32 << (texmap & 7);
        let shift = texmap & 7;

        self.constants.texoffset[0] &= !bit;
        self.constants.texoffset[0] |= i32::from(line_offset) << shift;
        self.constants.texoffset[1] &= !bit;
        self.constants.texoffset[1] |= i32::from(point_offset) << shift;
        self.dirty = true;
    }

    /// Projection type changed; stereo offsets only apply to perspective projections.
    pub fn set_projection(&mut self, perspective: bool) {
        self.perspective = perspective;
    }

    pub fn update_stereo(&mut self, config: &VideoConfig) {
        if !config.stereo_enabled() {
            return;
        }

        if self.perspective {
            let offset = (config.stereo_depth as f32 / 1000.0)
                * (config.stereo_depth_percentage as f32 / 100.0);
            let (left, right) = if config.stereo_swap_eyes {
                (offset, -offset)
            } else {
                (-offset, offset)
            };
            self.constants.stereoparams[0] = left;
            self.constants.stereoparams[1] = right;
        } else {
            self.constants.stereoparams[0] = 0.0;
            self.constants.stereoparams[1] = 0.0;
        }

        self.constants.stereoparams[2] = config.stereo_convergence as f32
            * (config.stereo_convergence_percentage as f32 / 100.0);
        self.dirty = true;
    }
}

impl Default for GeometryShaderManager {
    fn default() -> Self {
        Self::new()
    }
}
