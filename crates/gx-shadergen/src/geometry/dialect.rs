//! Syntax of the two shading languages the geometry stage is generated in.
//!
//! Only declarations, the uniform block header, input fetches and vertex emission differ between
//! GLSL and HLSL. Everything that computes positions or texture coordinates lives in the shared
//! generator and is written once.

use crate::shader_code::{ApiType, ShaderOutput};
use crate::state::{BackendInfo, PrimitiveType};
use crate::vertex_output::{assign_vs_output_members, write_vs_output_members};

use super::uid::GeometryShaderUid;

/// Generation parameters derived from a uid and the backend capabilities.
///
/// Every branch of the generator reads from here, never from the raw config, so a branch cannot
/// depend on state that is missing from the uid.
#[derive(Clone, Copy, Debug)]
pub(crate) struct GsContext {
    pub primitive: PrimitiveType,
    pub vertex_in: u32,
    pub vertex_out: u32,
    pub wireframe: bool,
    pub stereo: bool,
    pub lighting: bool,
    pub num_tex_gens: u32,
    pub instancing: bool,
    pub binding_layout: bool,
}

impl GsContext {
    pub fn new(uid: &GeometryShaderUid, backend: &BackendInfo) -> Self {
        let primitive = uid.primitive_type;
        let mut vertex_out = primitive.base_vertex_out();
        if uid.wireframe {
            vertex_out += 1;
        }
        Self {
            primitive,
            vertex_in: primitive.vertex_in(),
            vertex_out,
            wireframe: uid.wireframe,
            stereo: uid.stereo,
            lighting: uid.pixel_lighting,
            num_tex_gens: uid.num_tex_gens,
            instancing: backend.supports_gs_instancing,
            binding_layout: backend.supports_binding_layout,
        }
    }

    pub fn invocations(&self) -> u32 {
        if self.stereo {
            2
        } else {
            1
        }
    }

    /// Vertex limit declared on the shader. Without instancing both eyes come out of a single
    /// invocation.
    pub fn max_vertices(&self) -> u32 {
        if self.stereo && !self.instancing {
            self.vertex_out * 2
        } else {
            self.vertex_out
        }
    }

    pub fn strip_kind(&self) -> &'static str {
        if self.wireframe {
            "line"
        } else {
            "triangle"
        }
    }
}

pub(crate) trait ShaderDialect {
    const API: ApiType;

    /// Type aliases and input/output topology declarations ahead of the uniform block.
    fn write_layout<T: ShaderOutput>(out: &mut T, ctx: &GsContext);

    /// Opening line of the `GSBlock` uniform block.
    fn write_uniform_block_open<T: ShaderOutput>(out: &mut T, ctx: &GsContext);

    /// Input/output vertex streams and the entry point signature, up to and including the `{`
    /// opening `main`.
    fn write_stream_declarations<T: ShaderOutput>(out: &mut T, ctx: &GsContext);

    /// Declare `dst` as a `VS_OUTPUT` holding input vertex `index`.
    fn write_load_vertex<T: ShaderOutput>(out: &mut T, dst: &str, index: &str, ctx: &GsContext);

    /// Route the output vertex to the render target layer of the current eye.
    fn write_select_layer<T: ShaderOutput>(out: &mut T);

    /// Copy `vertex` into the output record and append it to the current strip.
    fn write_emit_vertex<T: ShaderOutput>(out: &mut T, vertex: &str, ctx: &GsContext);

    fn write_restart_strip<T: ShaderOutput>(out: &mut T);
}

pub(crate) struct Glsl;

impl ShaderDialect for Glsl {
    const API: ApiType = ApiType::OpenGl;

    fn write_layout<T: ShaderOutput>(out: &mut T, ctx: &GsContext) {
        // The shared code uses HLSL vector type names.
        write!(
            out,
            "#define float2 vec2\n#define float3 vec3\n#define float4 vec4\n#define int4 ivec4\n"
        );

        let prim = ctx.primitive.glsl_name();
        if ctx.instancing {
            writeln!(out, "layout({prim}, invocations = {}) in;", ctx.invocations());
        } else {
            writeln!(out, "layout({prim}) in;");
        }
        writeln!(
            out,
            "layout({}_strip, max_vertices = {}) out;",
            ctx.strip_kind(),
            ctx.max_vertices()
        );
    }

    fn write_uniform_block_open<T: ShaderOutput>(out: &mut T, ctx: &GsContext) {
        let binding = if ctx.binding_layout {
            ", binding = 3"
        } else {
            ""
        };
        writeln!(out, "layout(std140{binding}) uniform GSBlock {{");
    }

    fn write_stream_declarations<T: ShaderOutput>(out: &mut T, ctx: &GsContext) {
        // Without explicit binding layouts the block members need the full storage qualifier.
        let (in_qualifier, out_qualifier) = if ctx.binding_layout {
            ("centroid", "centroid")
        } else {
            ("centroid in", "centroid out")
        };

        if ctx.instancing {
            writeln!(out, "#define InstanceID gl_InvocationID");
        }

        writeln!(out, "in VertexData {{");
        write_vs_output_members(
            out,
            Self::API,
            Some(in_qualifier),
            ctx.lighting,
            ctx.num_tex_gens,
        );
        writeln!(out, "}} vs[{}];", ctx.vertex_in);

        writeln!(out, "out VertexData {{");
        write_vs_output_members(
            out,
            Self::API,
            Some(out_qualifier),
            ctx.lighting,
            ctx.num_tex_gens,
        );
        if ctx.stereo {
            writeln!(out, "\tflat int layer;");
        }
        writeln!(out, "}} ps;");

        writeln!(out, "void main()\n{{");
    }

    fn write_load_vertex<T: ShaderOutput>(out: &mut T, dst: &str, index: &str, ctx: &GsContext) {
        writeln!(out, "\tVS_OUTPUT {dst};");
        assign_vs_output_members(
            out,
            dst,
            format_args!("vs[{index}]"),
            ctx.lighting,
            ctx.num_tex_gens,
        );
    }

    fn write_select_layer<T: ShaderOutput>(out: &mut T) {
        writeln!(out, "\tps.layer = eye;");
        writeln!(out, "\tgl_Layer = eye;");
    }

    fn write_emit_vertex<T: ShaderOutput>(out: &mut T, vertex: &str, ctx: &GsContext) {
        writeln!(out, "\tgl_Position = {vertex}.pos;");
        assign_vs_output_members(out, "ps", vertex, ctx.lighting, ctx.num_tex_gens);
        writeln!(out, "\tEmitVertex();");
    }

    fn write_restart_strip<T: ShaderOutput>(out: &mut T) {
        writeln!(out, "\tEndPrimitive();");
    }
}

pub(crate) struct Hlsl;

impl ShaderDialect for Hlsl {
    const API: ApiType = ApiType::D3D;

    fn write_layout<T: ShaderOutput>(_out: &mut T, _ctx: &GsContext) {
        // HLSL carries topology on the entry point attributes and parameters.
    }

    fn write_uniform_block_open<T: ShaderOutput>(out: &mut T, _ctx: &GsContext) {
        writeln!(out, "cbuffer GSBlock {{");
    }

    fn write_stream_declarations<T: ShaderOutput>(out: &mut T, ctx: &GsContext) {
        writeln!(out, "struct VertexData {{");
        writeln!(out, "\tVS_OUTPUT o;");
        if ctx.stereo {
            writeln!(out, "\tuint layer : SV_RenderTargetArrayIndex;");
        }
        writeln!(out, "}};");

        let prim = ctx.primitive.hlsl_name();
        let stream = if ctx.wireframe { "Line" } else { "Triangle" };
        if ctx.instancing {
            writeln!(
                out,
                "[maxvertexcount({})]\n[instance({})]",
                ctx.max_vertices(),
                ctx.invocations()
            );
            writeln!(
                out,
                "void main({prim} VS_OUTPUT o[{}], inout {stream}Stream<VertexData> output, in uint InstanceID : SV_GSInstanceID)\n{{",
                ctx.vertex_in
            );
        } else {
            writeln!(out, "[maxvertexcount({})]", ctx.max_vertices());
            writeln!(
                out,
                "void main({prim} VS_OUTPUT o[{}], inout {stream}Stream<VertexData> output)\n{{",
                ctx.vertex_in
            );
        }

        writeln!(out, "\tVertexData ps;");
    }

    fn write_load_vertex<T: ShaderOutput>(out: &mut T, dst: &str, index: &str, _ctx: &GsContext) {
        writeln!(out, "\tVS_OUTPUT {dst} = o[{index}];");
    }

    fn write_select_layer<T: ShaderOutput>(out: &mut T) {
        writeln!(out, "\tps.layer = eye;");
    }

    fn write_emit_vertex<T: ShaderOutput>(out: &mut T, vertex: &str, _ctx: &GsContext) {
        writeln!(out, "\tps.o = {vertex};");
        writeln!(out, "\toutput.Append(ps);");
    }

    fn write_restart_strip<T: ShaderOutput>(out: &mut T) {
        writeln!(out, "\toutput.RestartStrip();");
    }
}
