mod common;

use gx_shadergen::geometry::reference::{
    expand_invocations, expand_primitive, ReferenceVertex, StreamEvent,
};
use gx_shadergen::{
    ApiType, GeometryShaderConstants, GeometryShaderUid, PrimitiveType, XfState,
};
use pretty_assertions::assert_eq;

fn vertices(events: &[StreamEvent]) -> Vec<ReferenceVertex> {
    events.iter().filter_map(StreamEvent::vertex).copied().collect()
}

#[test]
fn line_bias_lands_on_the_right_vertex_only() {
    let uid = GeometryShaderUid {
        primitive_type: PrimitiveType::Lines,
        num_tex_gens: 2,
        ..GeometryShaderUid::default()
    };
    let constants = GeometryShaderConstants {
        lineptparams: [64.0, 64.0, 8.0, 0.0],
        texoffset: [0b01, 0, 4, 0],
        ..GeometryShaderConstants::default()
    };
    let input = [
        ReferenceVertex::at([0.0, 0.0, 0.0, 1.0]),
        ReferenceVertex::at([0.5, 0.0, 0.0, 1.0]),
    ];

    let events = expand_primitive(&uid, true, &constants, &input);
    let out = vertices(&events);
    assert_eq!(out.len(), 4);

    // Wider than tall, so the line is widened vertically.
    assert_eq!([out[0].pos[0], out[0].pos[1]], [0.0, 0.125]);
    assert_eq!([out[1].pos[0], out[1].pos[1]], [0.0, -0.125]);

    for (l, r) in [(out[0], out[1]), (out[2], out[3])] {
        assert_eq!(l.tex, ReferenceVertex::default().tex);
        assert_eq!(r.tex[0], [0.25, 0.0, 0.0]);
        assert_eq!(r.tex[1], [0.0; 3]);
    }
}

#[test]
fn steep_lines_are_widened_horizontally() {
    let uid = GeometryShaderUid {
        primitive_type: PrimitiveType::Lines,
        ..GeometryShaderUid::default()
    };
    let constants = GeometryShaderConstants {
        lineptparams: [64.0, 64.0, 8.0, 0.0],
        ..GeometryShaderConstants::default()
    };
    let input = [
        ReferenceVertex::at([0.0, 0.0, 0.0, 1.0]),
        ReferenceVertex::at([0.0, 0.5, 0.0, 1.0]),
    ];

    let out = vertices(&expand_primitive(&uid, true, &constants, &input));
    assert_eq!([out[0].pos[0], out[0].pos[1]], [-0.125, 0.0]);
    assert_eq!([out[1].pos[0], out[1].pos[1]], [0.125, 0.0]);
}

#[test]
fn point_bias_skips_the_upper_left_corner() {
    let uid = GeometryShaderUid {
        primitive_type: PrimitiveType::Points,
        num_tex_gens: 2,
        ..GeometryShaderUid::default()
    };
    let constants = GeometryShaderConstants {
        lineptparams: [64.0, 64.0, 0.0, 8.0],
        texoffset: [0, 0b10, 0, 2],
        ..GeometryShaderConstants::default()
    };

    let out = vertices(&expand_primitive(
        &uid,
        true,
        &constants,
        &[ReferenceVertex::at([0.0, 0.0, 0.0, 1.0])],
    ));
    let [ll, lr, ul, ur] = [out[0], out[1], out[2], out[3]];

    assert_eq!(ll.tex[1], [0.0, 0.5, 0.0]);
    assert_eq!(lr.tex[1], [0.5, 0.5, 0.0]);
    assert_eq!(ul.tex[1], [0.0; 3]);
    assert_eq!(ur.tex[1], [0.5, 0.0, 0.0]);
    for v in [ll, lr, ul, ur] {
        assert_eq!(v.tex[0], [0.0; 3]);
    }
}

#[test]
fn zero_divisor_disables_bias() {
    let uid = GeometryShaderUid {
        primitive_type: PrimitiveType::Points,
        num_tex_gens: 1,
        ..GeometryShaderUid::default()
    };
    let constants = GeometryShaderConstants {
        lineptparams: [64.0, 64.0, 0.0, 8.0],
        texoffset: [0xff, 0xff, 0, 0],
        ..GeometryShaderConstants::default()
    };

    let out = vertices(&expand_primitive(
        &uid,
        true,
        &constants,
        &[ReferenceVertex::at([0.0, 0.0, 0.0, 1.0])],
    ));
    assert!(out.iter().all(|v| v.tex == ReferenceVertex::default().tex));
}

#[test]
fn both_stereo_paths_route_each_eye_to_its_layer() {
    let uid = GeometryShaderUid {
        primitive_type: PrimitiveType::Triangles,
        stereo: true,
        ..GeometryShaderUid::default()
    };
    let constants = GeometryShaderConstants {
        stereoparams: [-0.5, 0.5, 1.0, 0.0],
        ..GeometryShaderConstants::default()
    };
    let input = [
        ReferenceVertex::at([0.0, 0.0, 0.0, 3.0]),
        ReferenceVertex::at([1.0, 0.0, 0.0, 3.0]),
        ReferenceVertex::at([0.0, 1.0, 0.0, 3.0]),
    ];

    let invocations = expand_invocations(&uid, true, &constants, &input);
    let single = expand_invocations(&uid, false, &constants, &input);
    assert_eq!(invocations.len(), 2);
    assert_eq!(single.len(), 1);
    for (eye, events) in invocations.iter().enumerate() {
        assert!(events.iter().all(|e| match e {
            StreamEvent::Vertex { layer, .. } => *layer == Some(eye as u32),
            StreamEvent::RestartStrip => true,
        }));
    }

    // Concatenating the per-eye invocations reproduces the eye loop.
    let instanced = invocations.concat();
    assert_eq!(instanced, single[0]);
    assert_eq!(instanced, expand_primitive(&uid, true, &constants, &input));

    assert_eq!(vertices(&instanced).len(), 6);
    assert_eq!(
        instanced
            .iter()
            .filter(|e| **e == StreamEvent::RestartStrip)
            .count(),
        2
    );

    let layers: Vec<Option<u32>> = instanced
        .iter()
        .filter_map(|e| match e {
            StreamEvent::Vertex { layer, .. } => Some(*layer),
            StreamEvent::RestartStrip => None,
        })
        .collect();
    assert_eq!(
        layers,
        vec![Some(0), Some(0), Some(0), Some(1), Some(1), Some(1)]
    );

    // x is shifted by cstereo[eye] * (w - convergence) = -+0.5 * 2
    let xs: Vec<f32> = vertices(&instanced).iter().map(|v| v.pos[0]).collect();
    assert_eq!(xs, vec![-1.0, 0.0, -1.0, 1.0, 2.0, 1.0]);
}

#[test]
fn reference_emission_counts_match_generated_text() {
    let xf = XfState::new(1, 0);
    for wireframe in [false, true] {
        for primitive in PrimitiveType::ALL {
            let config = gx_shadergen::VideoConfig {
                wireframe,
                ..gx_shadergen::VideoConfig::default()
            };
            let uid = gx_shadergen::get_geometry_shader_uid(primitive, ApiType::D3D, &xf, &config);
            let input = vec![ReferenceVertex::at([0.0, 0.0, 0.0, 1.0]); primitive.vertex_in() as usize];
            let events = expand_primitive(&uid, true, &GeometryShaderConstants::default(), &input);

            let text = common::generate(primitive, ApiType::D3D, &xf, &config);
            let per_iteration = text.matches(common::emit_marker(ApiType::D3D)).count();
            let closing = usize::from(wireframe);
            let expected = (per_iteration - closing) * input.len() + closing;

            assert_eq!(vertices(&events).len(), expected, "{primitive:?} wireframe={wireframe}");
            assert!(expected as u32 <= primitive.base_vertex_out() + u32::from(wireframe));
        }
    }
}
