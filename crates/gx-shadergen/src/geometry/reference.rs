//! CPU model of the generated geometry shaders.
//!
//! [`expand_primitive`] evaluates the program the generator emits for a uid: the same line and
//! point offsets, stereo shift, texture coordinate bias and wireframe closure, in the same output
//! order. It is used to check expansion semantics without a GPU.

use crate::state::{BackendInfo, PrimitiveType, MAX_TEX_GENS};

use super::constants::GeometryShaderConstants;
use super::dialect::GsContext;
use super::uid::GeometryShaderUid;

/// The subset of `VS_OUTPUT` the geometry stage modifies.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ReferenceVertex {
    /// Clip-space position.
    pub pos: [f32; 4],
    pub tex: [[f32; 3]; MAX_TEX_GENS as usize],
}

impl ReferenceVertex {
    pub fn at(pos: [f32; 4]) -> Self {
        Self {
            pos,
            ..Self::default()
        }
    }
}

/// An event in the geometry shader output stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StreamEvent {
    /// `EmitVertex()` / `output.Append()`. `layer` is the eye index when stereo is active.
    Vertex {
        vertex: ReferenceVertex,
        layer: Option<u32>,
    },
    /// `EndPrimitive()` / `output.RestartStrip()`.
    RestartStrip,
}

impl StreamEvent {
    pub fn vertex(&self) -> Option<&ReferenceVertex> {
        match self {
            StreamEvent::Vertex { vertex, .. } => Some(vertex),
            StreamEvent::RestartStrip => None,
        }
    }
}

/// Expand one input primitive the way the shader generated for `uid` does.
///
/// `input` must hold `uid.primitive_type.vertex_in()` vertices; extra vertices are ignored.
/// Returns the concatenation of [`expand_invocations`] in invocation order.
pub fn expand_primitive(
    uid: &GeometryShaderUid,
    instancing: bool,
    constants: &GeometryShaderConstants,
    input: &[ReferenceVertex],
) -> Vec<StreamEvent> {
    expand_invocations(uid, instancing, constants, input)
        .into_iter()
        .flatten()
        .collect()
}

/// Output stream of every geometry shader invocation for one input primitive.
///
/// Stereo with `instancing` runs one invocation per eye. Otherwise a single invocation loops
/// over the eyes.
pub fn expand_invocations(
    uid: &GeometryShaderUid,
    instancing: bool,
    constants: &GeometryShaderConstants,
    input: &[ReferenceVertex],
) -> Vec<Vec<StreamEvent>> {
    let backend = BackendInfo {
        supports_gs_instancing: instancing,
        ..BackendInfo::default()
    };
    let ctx = GsContext::new(uid, &backend);
    debug_assert_eq!(input.len(), ctx.vertex_in as usize);

    let offset = primitive_offset(&ctx, constants, input);

    if !ctx.stereo {
        let mut events = Vec::new();
        run_eye(&ctx, constants, input, offset, None, &mut events);
        return vec![events];
    }

    if ctx.instancing {
        (0..ctx.invocations())
            .map(|eye| {
                let mut events = Vec::new();
                run_eye(&ctx, constants, input, offset, Some(eye), &mut events);
                events
            })
            .collect()
    } else {
        let mut events = Vec::new();
        for eye in 0..2 {
            run_eye(&ctx, constants, input, offset, Some(eye), &mut events);
        }
        vec![events]
    }
}

fn primitive_offset(
    ctx: &GsContext,
    constants: &GeometryShaderConstants,
    input: &[ReferenceVertex],
) -> [f32; 2] {
    let lp = constants.lineptparams;
    match ctx.primitive {
        PrimitiveType::Lines => {
            let (Some(start), Some(end)) = (input.first(), input.get(1)) else {
                return [0.0, 0.0];
            };
            let to = [
                (end.pos[0] / end.pos[3] - start.pos[0] / start.pos[3]).abs(),
                (end.pos[1] / end.pos[3] - start.pos[1] / start.pos[3]).abs(),
            ];
            if lp[1] * to[1] > lp[0] * to[0] {
                [lp[2] / lp[0], 0.0]
            } else {
                [0.0, -lp[2] / lp[1]]
            }
        }
        PrimitiveType::Points => {
            let w = input.first().map_or(1.0, |center| center.pos[3]);
            [lp[3] / lp[0] * w, -lp[3] / lp[1] * w]
        }
        PrimitiveType::Triangles => [0.0, 0.0],
    }
}

fn run_eye(
    ctx: &GsContext,
    constants: &GeometryShaderConstants,
    input: &[ReferenceVertex],
    offset: [f32; 2],
    eye: Option<u32>,
    events: &mut Vec<StreamEvent>,
) {
    let stereo = constants.stereoparams;
    let texoffset = constants.texoffset;
    let mut first = ReferenceVertex::default();

    let mut emit =
        |events: &mut Vec<StreamEvent>, vertex: ReferenceVertex, is_first: bool, i: usize| {
            if ctx.wireframe && is_first && i == 0 {
                first = vertex;
            }
            events.push(StreamEvent::Vertex { vertex, layer: eye });
        };

    for (i, input_vertex) in input.iter().take(ctx.vertex_in as usize).enumerate() {
        let mut f = *input_vertex;

        if let Some(eye) = eye {
            f.pos[0] += stereo[eye as usize] * (f.pos[3] - stereo[2]);
        }

        match ctx.primitive {
            PrimitiveType::Lines => {
                let mut l = f;
                let mut r = f;
                for c in 0..2 {
                    l.pos[c] -= offset[c] * l.pos[3];
                    r.pos[c] += offset[c] * r.pos[3];
                }

                if texoffset[2] != 0 {
                    let tex_offset = 1.0 / texoffset[2] as f32;
                    for ch in 0..ctx.num_tex_gens as usize {
                        if (texoffset[0] >> ch) & 0x1 != 0 {
                            r.tex[ch][0] += tex_offset;
                        }
                    }
                }

                emit(events, l, true, i);
                emit(events, r, false, i);
            }
            PrimitiveType::Points => {
                let corner = |sx: f32, sy: f32| {
                    let mut v = f;
                    v.pos[0] += sx * offset[0];
                    v.pos[1] += sy * offset[1];
                    v
                };
                let mut ll = corner(-1.0, -1.0);
                let mut lr = corner(1.0, -1.0);
                let ul = corner(-1.0, 1.0);
                let mut ur = corner(1.0, 1.0);

                if texoffset[3] != 0 {
                    let t = 1.0 / texoffset[3] as f32;
                    for ch in 0..ctx.num_tex_gens as usize {
                        if (texoffset[1] >> ch) & 0x1 != 0 {
                            ll.tex[ch][1] += t;
                            lr.tex[ch][0] += t;
                            lr.tex[ch][1] += t;
                            ur.tex[ch][0] += t;
                        }
                    }
                }

                emit(events, ll, true, i);
                emit(events, lr, false, i);
                emit(events, ul, false, i);
                emit(events, ur, false, i);
            }
            PrimitiveType::Triangles => emit(events, f, true, i),
        }
    }

    if ctx.wireframe {
        events.push(StreamEvent::Vertex {
            vertex: first,
            layer: eye,
        });
    }
    events.push(StreamEvent::RestartStrip);
}
