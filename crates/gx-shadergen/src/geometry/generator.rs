//! Geometry stage emulation.
//!
//! Host APIs only rasterize points and lines one pixel wide, so wide lines and point sprites are
//! expanded into quads here. The expansion follows the console rasterizer rather than an ideal
//! geometric one: line caps are axis aligned, and texture coordinates receive the hardware's
//! per-set line/point offsets. Stereo output and the wireframe debug mode are layered on top.

use crate::shader_code::ShaderOutput;
use crate::state::{PrimitiveType, VideoConfig, XfState};

use super::constants::{I_LINEPTPARAMS, I_STEREOPARAMS, I_TEXOFFSET};
use super::dialect::{GsContext, ShaderDialect};
use super::uid::GeometryShaderUid;

/// Run one generation pass for `primitive` into `out`.
///
/// The same calls are made whether `out` collects text or only the uid.
pub(crate) fn generate_geometry_shader<T: ShaderOutput, D: ShaderDialect>(
    out: &mut T,
    primitive: PrimitiveType,
    xf: &XfState,
    config: &VideoConfig,
) {
    out.clear();

    let uid = GeometryShaderUid::new(primitive, xf, config);
    out.record_uid(&uid);
    let ctx = GsContext::new(&uid, &config.backend_info);

    D::write_layout(out, &ctx);

    D::write_uniform_block_open(out, &ctx);
    writeln!(out, "\tfloat4 {I_STEREOPARAMS};");
    writeln!(out, "\tfloat4 {I_LINEPTPARAMS};");
    writeln!(out, "\tint4 {I_TEXOFFSET};");
    writeln!(out, "}};");

    writeln!(out, "struct VS_OUTPUT {{");
    crate::vertex_output::write_vs_output_members(
        out,
        D::API,
        None,
        ctx.lighting,
        ctx.num_tex_gens,
    );
    writeln!(out, "}};");

    D::write_stream_declarations(out, &ctx);

    match ctx.primitive {
        PrimitiveType::Lines => {
            D::write_load_vertex(out, "start", "0", &ctx);
            D::write_load_vertex(out, "end", "1", &ctx);

            // The console does not draw real line caps. Depending on the slope the line is
            // widened either horizontally or vertically.
            writeln!(out, "\tfloat2 offset;");
            writeln!(
                out,
                "\tfloat2 to = abs(end.pos.xy / end.pos.w - start.pos.xy / start.pos.w);"
            );
            // Steeper than wide: extend left and right, LineWidth/2 mapped from
            // [0..VpWidth] to [-1..1].
            writeln!(
                out,
                "\tif ({I_LINEPTPARAMS}.y * to.y > {I_LINEPTPARAMS}.x * to.x) {{"
            );
            writeln!(
                out,
                "\t\toffset = float2({I_LINEPTPARAMS}.z / {I_LINEPTPARAMS}.x, 0);"
            );
            // Otherwise extend up and down, mapped from [0..VpHeight] to [1..-1].
            writeln!(out, "\t}} else {{");
            writeln!(
                out,
                "\t\toffset = float2(0, -{I_LINEPTPARAMS}.z / {I_LINEPTPARAMS}.y);"
            );
            writeln!(out, "\t}}");
        }
        PrimitiveType::Points => {
            D::write_load_vertex(out, "center", "0", &ctx);

            // Offset from the center to the upper right corner: PointSize/2 mapped from
            // [0,0..VpWidth,VpHeight] to [-1,1..1,-1].
            writeln!(
                out,
                "\tfloat2 offset = float2({I_LINEPTPARAMS}.w / {I_LINEPTPARAMS}.x, -{I_LINEPTPARAMS}.w / {I_LINEPTPARAMS}.y) * center.pos.w;"
            );
        }
        PrimitiveType::Triangles => {}
    }

    if ctx.stereo {
        if ctx.instancing {
            writeln!(out, "\tint eye = InstanceID;");
        } else {
            writeln!(out, "\tfor (int eye = 0; eye < 2; ++eye) {{");
        }
    }

    if ctx.wireframe {
        writeln!(out, "\tVS_OUTPUT first;");
    }

    writeln!(out, "\tfor (int i = 0; i < {}; ++i) {{", ctx.vertex_in);
    D::write_load_vertex(out, "f", "i", &ctx);

    if ctx.stereo {
        D::write_select_layer(out);

        // Shift NDC x proportional to depth. w holds the negated view-space z; subtracting the
        // convergence distance puts anything closer than it in front of the screen. This is the
        // parallax approximation from the 3D Vision automatic mode, not a per-eye projection.
        writeln!(
            out,
            "\tf.pos.x += {I_STEREOPARAMS}[eye] * (f.pos.w - {I_STEREOPARAMS}[2]);"
        );
    }

    match ctx.primitive {
        PrimitiveType::Lines => {
            writeln!(out, "\tVS_OUTPUT l = f;");
            writeln!(out, "\tVS_OUTPUT r = f;");
            writeln!(out, "\tl.pos.xy -= offset * l.pos.w;");
            writeln!(out, "\tr.pos.xy += offset * r.pos.w;");

            writeln!(out, "\tif ({I_TEXOFFSET}[2] != 0) {{");
            writeln!(out, "\tfloat texOffset = 1.0 / float({I_TEXOFFSET}[2]);");
            for i in 0..ctx.num_tex_gens {
                writeln!(out, "\tif ((({I_TEXOFFSET}[0] >> {i}) & 0x1) != 0)");
                writeln!(out, "\t\tr.tex{i}.x += texOffset;");
            }
            writeln!(out, "\t}}");

            emit_vertex::<T, D>(out, "l", true, &ctx);
            emit_vertex::<T, D>(out, "r", false, &ctx);
        }
        PrimitiveType::Points => {
            writeln!(out, "\tVS_OUTPUT ll = f;");
            writeln!(out, "\tVS_OUTPUT lr = f;");
            writeln!(out, "\tVS_OUTPUT ul = f;");
            writeln!(out, "\tVS_OUTPUT ur = f;");
            writeln!(out, "\tll.pos.xy += float2(-1,-1) * offset;");
            writeln!(out, "\tlr.pos.xy += float2(1,-1) * offset;");
            writeln!(out, "\tul.pos.xy += float2(-1,1) * offset;");
            writeln!(out, "\tur.pos.xy += offset;");

            writeln!(out, "\tif ({I_TEXOFFSET}[3] != 0) {{");
            writeln!(
                out,
                "\tfloat2 texOffset = float2(1.0 / float({I_TEXOFFSET}[3]), 1.0 / float({I_TEXOFFSET}[3]));"
            );
            for i in 0..ctx.num_tex_gens {
                writeln!(out, "\tif ((({I_TEXOFFSET}[1] >> {i}) & 0x1) != 0) {{");
                writeln!(out, "\t\tll.tex{i}.xy += float2(0,1) * texOffset;");
                writeln!(out, "\t\tlr.tex{i}.xy += texOffset;");
                writeln!(out, "\t\tur.tex{i}.xy += float2(1,0) * texOffset;");
                writeln!(out, "\t}}");
            }
            writeln!(out, "\t}}");

            emit_vertex::<T, D>(out, "ll", true, &ctx);
            emit_vertex::<T, D>(out, "lr", false, &ctx);
            emit_vertex::<T, D>(out, "ul", false, &ctx);
            emit_vertex::<T, D>(out, "ur", false, &ctx);
        }
        PrimitiveType::Triangles => {
            emit_vertex::<T, D>(out, "f", true, &ctx);
        }
    }

    writeln!(out, "\t}}");

    end_primitive::<T, D>(out, &ctx);

    if ctx.stereo && !ctx.instancing {
        writeln!(out, "\t}}");
    }

    writeln!(out, "}}");
}

/// Append `vertex` to the output strip. In wireframe mode the first vertex of the primitive is
/// remembered so [`end_primitive`] can close the outline.
fn emit_vertex<T: ShaderOutput, D: ShaderDialect>(
    out: &mut T,
    vertex: &str,
    first_vertex: bool,
    ctx: &GsContext,
) {
    if ctx.wireframe && first_vertex {
        writeln!(out, "\tif (i == 0) first = {vertex};");
    }

    D::write_emit_vertex(out, vertex, ctx);
}

fn end_primitive<T: ShaderOutput, D: ShaderDialect>(out: &mut T, ctx: &GsContext) {
    if ctx.wireframe {
        emit_vertex::<T, D>(out, "first", false, ctx);
    }

    D::write_restart_strip(out);
}
