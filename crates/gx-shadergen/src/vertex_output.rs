//! Shape of the vertex record passed from the vertex stage to later stages.
//!
//! The vertex, geometry and pixel generators all describe `VS_OUTPUT` through these helpers so
//! the interface stays identical between stages.

use std::fmt;

use crate::shader_code::{ApiType, ShaderOutput};

#[allow(clippy::too_many_arguments)]
fn define_output_member<T: ShaderOutput>(
    out: &mut T,
    api: ApiType,
    qualifier: Option<&str>,
    ty: &str,
    name: &str,
    var_index: Option<u32>,
    semantic: &str,
    semantic_index: Option<u32>,
) {
    match qualifier {
        Some(qualifier) => write!(out, "\t{qualifier} {ty} {name}"),
        None => write!(out, "\t{ty} {name}"),
    }

    if let Some(index) = var_index {
        write!(out, "{index}");
    }

    if api == ApiType::D3D && !semantic.is_empty() {
        match semantic_index {
            Some(index) => write!(out, " : {semantic}{index}"),
            None => write!(out, " : {semantic}"),
        }
    }

    writeln!(out, ";");
}

/// Write the members of `VS_OUTPUT`, one per line.
///
/// `qualifier` prefixes every member (GLSL interface blocks use `centroid`/`centroid in`).
pub fn write_vs_output_members<T: ShaderOutput>(
    out: &mut T,
    api: ApiType,
    qualifier: Option<&str>,
    lighting_enabled: bool,
    num_tex_gens: u32,
) {
    define_output_member(out, api, qualifier, "float4", "pos", None, "POSITION", None);
    define_output_member(out, api, qualifier, "float4", "colors_", Some(0), "COLOR", Some(0));
    define_output_member(out, api, qualifier, "float4", "colors_", Some(1), "COLOR", Some(1));

    for i in 0..num_tex_gens {
        define_output_member(out, api, qualifier, "float3", "tex", Some(i), "TEXCOORD", Some(i));
    }

    define_output_member(
        out,
        api,
        qualifier,
        "float4",
        "clipPos",
        None,
        "TEXCOORD",
        Some(num_tex_gens),
    );

    if lighting_enabled {
        define_output_member(
            out,
            api,
            qualifier,
            "float4",
            "Normal",
            None,
            "TEXCOORD",
            Some(num_tex_gens + 1),
        );
        define_output_member(
            out,
            api,
            qualifier,
            "float4",
            "WorldPos",
            None,
            "TEXCOORD",
            Some(num_tex_gens + 2),
        );
    }
}

/// Copy every `VS_OUTPUT` member from `src` into `dst`.
///
/// GLSL cannot assign an interface block element to a struct in one statement. `src` is only
/// formatted when `out` keeps text, so indexed sources can be passed as `format_args!`.
pub fn assign_vs_output_members<T: ShaderOutput, S: fmt::Display>(
    out: &mut T,
    dst: &str,
    src: S,
    lighting_enabled: bool,
    num_tex_gens: u32,
) {
    writeln!(out, "\t{dst}.pos = {src}.pos;");
    writeln!(out, "\t{dst}.colors_0 = {src}.colors_0;");
    writeln!(out, "\t{dst}.colors_1 = {src}.colors_1;");

    for i in 0..num_tex_gens {
        writeln!(out, "\t{dst}.tex{i} = {src}.tex{i};");
    }

    writeln!(out, "\t{dst}.clipPos = {src}.clipPos;");

    if lighting_enabled {
        writeln!(out, "\t{dst}.Normal = {src}.Normal;");
        writeln!(out, "\t{dst}.WorldPos = {src}.WorldPos;");
    }
}
