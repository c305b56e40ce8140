mod common;

use std::sync::Arc;

use gx_shadergen::geometry::ShaderCacheLookupSource;
use gx_shadergen::{ApiType, BackendInfo, GeometryShaderCache, PrimitiveType, VideoConfig, XfState};
use pretty_assertions::assert_eq;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

#[test]
fn second_lookup_is_served_from_memory() {
    init_tracing();
    let mut cache = GeometryShaderCache::new(ApiType::OpenGl);
    let xf = XfState::new(2, 1);
    let config = VideoConfig::default();

    let first = cache.get_or_generate(PrimitiveType::Lines, &xf, &config).unwrap();
    assert_eq!(first.source, ShaderCacheLookupSource::Generated);
    assert_eq!(
        &*first.code,
        common::generate(PrimitiveType::Lines, ApiType::OpenGl, &xf, &config)
    );

    let second = cache.get_or_generate(PrimitiveType::Lines, &xf, &config).unwrap();
    assert_eq!(second.source, ShaderCacheLookupSource::Memory);
    assert_eq!(second.uid, first.uid);
    assert!(Arc::ptr_eq(&first.code, &second.code));

    assert_eq!(cache.len(), 1);
    assert_eq!((cache.hits(), cache.misses()), (1, 1));
}

#[test]
fn uniform_only_changes_hit_the_same_entry() {
    let mut cache = GeometryShaderCache::new(ApiType::D3D);
    let xf = XfState::new(0, 0);

    let config = VideoConfig {
        stereo_mode: gx_shadergen::StereoMode::TopAndBottom,
        ..VideoConfig::default()
    };
    cache.get_or_generate(PrimitiveType::Points, &xf, &config).unwrap();

    let tuned = VideoConfig {
        stereo_depth: 90,
        stereo_convergence: 5,
        stereo_swap_eyes: true,
        ..config.clone()
    };
    let lookup = cache.get_or_generate(PrimitiveType::Points, &xf, &tuned).unwrap();
    assert_eq!(lookup.source, ShaderCacheLookupSource::Memory);
    assert_eq!(cache.len(), 1);
}

#[test]
fn distinct_variants_get_distinct_entries() {
    let mut cache = GeometryShaderCache::new(ApiType::OpenGl);
    let config = VideoConfig::default();

    for primitive in PrimitiveType::ALL {
        for num_tex_gens in 0..=2 {
            let lookup = cache
                .get_or_generate(primitive, &XfState::new(num_tex_gens, 0), &config)
                .unwrap();
            assert_eq!(lookup.source, ShaderCacheLookupSource::Generated);
        }
    }
    assert_eq!(cache.len(), 9);
    assert_eq!(cache.misses(), 9);
    assert_eq!(cache.hits(), 0);
}

#[test]
fn backend_change_drops_cached_shaders() {
    init_tracing();
    let mut cache = GeometryShaderCache::new(ApiType::OpenGl);
    let xf = XfState::new(1, 0);
    let config = VideoConfig::default();

    let instanced = cache.get_or_generate(PrimitiveType::Triangles, &xf, &config).unwrap();
    cache.get_or_generate(PrimitiveType::Lines, &xf, &config).unwrap();
    assert_eq!(cache.len(), 2);

    let legacy = VideoConfig {
        backend_info: BackendInfo {
            supports_gs_instancing: false,
            supports_binding_layout: false,
            ..BackendInfo::default()
        },
        ..VideoConfig::default()
    };
    let lookup = cache.get_or_generate(PrimitiveType::Triangles, &xf, &legacy).unwrap();

    assert_eq!(lookup.source, ShaderCacheLookupSource::Generated);
    assert_eq!(lookup.uid, instanced.uid);
    assert_ne!(lookup.code, instanced.code);
    assert!(lookup.code.contains("layout(std140) uniform GSBlock {"));
    assert_eq!(cache.len(), 1);
}

#[test]
fn uid_checks_pass_for_a_consistent_generator() {
    let mut cache = GeometryShaderCache::new(ApiType::D3D);
    cache.set_uid_checks(true);
    let config = VideoConfig {
        wireframe: true,
        enable_pixel_lighting: true,
        ..VideoConfig::default()
    };

    for xf in common::all_xf_states() {
        for primitive in PrimitiveType::ALL {
            cache.get_or_generate(primitive, &xf, &config).unwrap();
            let lookup = cache.get_or_generate(primitive, &xf, &config).unwrap();
            assert_eq!(lookup.source, ShaderCacheLookupSource::Memory);
        }
    }
    // Color channel counts above zero share a uid once lighting is on.
    assert_eq!(cache.misses(), 54);
    assert_eq!(cache.hits(), 108);
}

#[test]
fn clear_forces_regeneration() {
    let mut cache = GeometryShaderCache::new(ApiType::OpenGl);
    let xf = XfState::new(0, 0);
    let config = VideoConfig::default();

    cache.get_or_generate(PrimitiveType::Points, &xf, &config).unwrap();
    cache.clear();
    assert!(cache.is_empty());

    let lookup = cache.get_or_generate(PrimitiveType::Points, &xf, &config).unwrap();
    assert_eq!(lookup.source, ShaderCacheLookupSource::Generated);
    assert_eq!(cache.api(), ApiType::OpenGl);
}
