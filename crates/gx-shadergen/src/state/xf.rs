/// Number of texture coordinate generators the transform unit provides.
pub const MAX_TEX_GENS: u32 = 8;

/// Read-only snapshot of the transform unit registers the geometry stage depends on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct XfState {
    /// Active texture coordinate generators, `0..=MAX_TEX_GENS`.
    pub num_tex_gens: u32,
    /// Active color channels; per-pixel lighting needs at least one.
    pub num_color_chans: u32,
}

impl XfState {
    pub fn new(num_tex_gens: u32, num_color_chans: u32) -> Self {
        debug_assert!(
            num_tex_gens <= MAX_TEX_GENS,
            "num_tex_gens {num_tex_gens} exceeds {MAX_TEX_GENS}"
        );
        Self {
            num_tex_gens,
            num_color_chans,
        }
    }
}
