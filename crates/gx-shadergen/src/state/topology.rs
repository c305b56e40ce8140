use std::fmt;

/// Primitive classes the geometry stage receives after the fixed-function vertex stage.
///
/// Quads, strips and fans are already decomposed by the vertex loader, so the geometry stage only
/// ever sees lists of these three kinds. The discriminants match the hardware encoding and are
/// part of the shader uid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum PrimitiveType {
    Points = 0,
    Lines = 1,
    #[default]
    Triangles = 2,
}

impl PrimitiveType {
    pub const ALL: [PrimitiveType; 3] = [
        PrimitiveType::Points,
        PrimitiveType::Lines,
        PrimitiveType::Triangles,
    ];

    pub fn index(self) -> u32 {
        self as u32
    }

    /// Number of vertices a single input primitive carries.
    pub fn vertex_in(self) -> u32 {
        self.index() + 1
    }

    /// Vertices emitted per primitive before wireframe closure.
    ///
    /// Points and lines are expanded into a quad strip; triangles pass through.
    pub fn base_vertex_out(self) -> u32 {
        match self {
            PrimitiveType::Triangles => 3,
            PrimitiveType::Points | PrimitiveType::Lines => 4,
        }
    }

    /// GLSL input layout qualifier (`layout(points) in;`).
    pub fn glsl_name(self) -> &'static str {
        match self {
            PrimitiveType::Points => "points",
            PrimitiveType::Lines => "lines",
            PrimitiveType::Triangles => "triangles",
        }
    }

    /// HLSL geometry shader input primitive modifier.
    pub fn hlsl_name(self) -> &'static str {
        match self {
            PrimitiveType::Points => "point",
            PrimitiveType::Lines => "line",
            PrimitiveType::Triangles => "triangle",
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.glsl_name())
    }
}

impl TryFrom<u32> for PrimitiveType {
    type Error = u32;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(PrimitiveType::Points),
            1 => Ok(PrimitiveType::Lines),
            2 => Ok(PrimitiveType::Triangles),
            other => Err(other),
        }
    }
}
