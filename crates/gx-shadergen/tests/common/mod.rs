#![allow(dead_code)]

use gx_shadergen::{
    generate_geometry_shader_code, ApiType, BackendInfo, PrimitiveType, ShaderBuffer, ShaderCode,
    StereoMode, VideoConfig, XfState,
};

pub fn generate(
    primitive: PrimitiveType,
    api: ApiType,
    xf: &XfState,
    config: &VideoConfig,
) -> String {
    let mut buffer = ShaderBuffer::new();
    let mut code = ShaderCode::new(&mut buffer);
    generate_geometry_shader_code(&mut code, primitive, api, xf, config)
        .unwrap_or_else(|e| panic!("generation failed for {primitive:?}/{api:?}: {e}"));
    code.as_str().to_owned()
}

/// Vertex emission statement for `api`.
pub fn emit_marker(api: ApiType) -> &'static str {
    match api {
        ApiType::OpenGl => "EmitVertex();",
        ApiType::D3D => "output.Append(ps);",
    }
}

pub fn restart_marker(api: ApiType) -> &'static str {
    match api {
        ApiType::OpenGl => "EndPrimitive();",
        ApiType::D3D => "output.RestartStrip();",
    }
}

pub fn all_backends() -> Vec<BackendInfo> {
    let mut out = Vec::new();
    for supports_gs_instancing in [false, true] {
        for supports_binding_layout in [false, true] {
            for supports_pixel_lighting in [false, true] {
                out.push(BackendInfo {
                    supports_gs_instancing,
                    supports_binding_layout,
                    supports_pixel_lighting,
                });
            }
        }
    }
    out
}

/// Every combination of the render flags the generator can observe, for one backend.
pub fn all_configs(backend_info: BackendInfo) -> Vec<VideoConfig> {
    let mut out = Vec::new();
    for wireframe in [false, true] {
        for stereo_mode in [
            StereoMode::Off,
            StereoMode::SideBySide,
            StereoMode::TopAndBottom,
            StereoMode::Anaglyph,
        ] {
            for enable_pixel_lighting in [false, true] {
                out.push(VideoConfig {
                    wireframe,
                    stereo_mode,
                    enable_pixel_lighting,
                    backend_info,
                    ..VideoConfig::default()
                });
            }
        }
    }
    out
}

pub fn all_xf_states() -> Vec<XfState> {
    let mut out = Vec::new();
    for num_tex_gens in 0..=gx_shadergen::MAX_TEX_GENS {
        for num_color_chans in 0..=2 {
            out.push(XfState::new(num_tex_gens, num_color_chans));
        }
    }
    out
}

pub fn stereo_config(instancing: bool) -> VideoConfig {
    VideoConfig {
        stereo_mode: StereoMode::SideBySide,
        backend_info: BackendInfo {
            supports_gs_instancing: instancing,
            ..BackendInfo::default()
        },
        ..VideoConfig::default()
    }
}
