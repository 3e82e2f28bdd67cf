use crate::catalog::CurveFamily;
use crate::error::GenerateError;

/// Vector component names, in order.
pub const COMPONENTS: [&str; 3] = ["x", "y", "z"];

/// The name of a polynomial degree.
///
/// Short names are used in type names (`BezierQuad2D`), long names in
/// documentation and constructors.
pub fn degree_name(degree: usize, short: bool) -> Result<&'static str, GenerateError> {
    Ok(match degree {
        1 => "Linear",
        2 if short => "Quad",
        2 => "Quadratic",
        3 => "Cubic",
        4 => "Quartic",
        5 => "Quintic",
        _ => return Err(GenerateError::UnsupportedDegree(degree)),
    })
}

/// The function used to linearly blend two points of the given dimension.
pub fn lerp_name(dim: usize) -> Result<&'static str, GenerateError> {
    Ok(dimension_types(dim)?.lerp)
}

/// The generated type name, e.g. `BezierCubic2D`.
pub fn type_name(family: &CurveFamily, dim: usize) -> Result<String, GenerateError> {
    Ok(format!(
        "{}{}{}D",
        family.family_id(),
        degree_name(family.degree(), true)?,
        dim
    ))
}

/// Converts a type name to the snake case name of its module, e.g. `UBSCubic2D` to `ubs_cubic_2d`.
pub fn module_name(type_name: &str) -> String {
    let chars = type_name.chars().collect::<Vec<_>>();
    let mut out = String::with_capacity(type_name.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if i > 0 {
            let prev = chars[i - 1];
            let next_lower = chars.get(i + 1).map_or(false, |n| n.is_lowercase());
            let boundary = (c.is_uppercase() && (prev.is_lowercase() || (prev.is_uppercase() && next_lower)))
                || (c.is_ascii_digit() && prev.is_alphabetic());
            if boundary {
                out.push('_');
            }
        }
        out.extend(c.to_lowercase());
    }
    out
}

/// The output-language types used for segments of one dimension.
#[derive(Clone, Copy, Debug)]
pub struct DimensionTypes {
    /// The point type, e.g. `Vector2<f32>`.
    pub point: &'static str,
    /// The `cgmath` vector type to import, if any.
    pub vector: Option<&'static str>,
    pub polynomial: &'static str,
    pub segment_trait: &'static str,
    pub lerp: &'static str,
}

pub fn dimension_types(dim: usize) -> Result<DimensionTypes, GenerateError> {
    match dim {
        1 => Ok(DimensionTypes {
            point: "f32",
            vector: None,
            polynomial: "Polynomial",
            segment_trait: "ParamCubicSplineSegment1D",
            lerp: "lerp",
        }),
        2 => Ok(DimensionTypes {
            point: "Vector2<f32>",
            vector: Some("Vector2"),
            polynomial: "Polynomial2D",
            segment_trait: "ParamCubicSplineSegment2D",
            lerp: "Vector2::lerp",
        }),
        3 => Ok(DimensionTypes {
            point: "Vector3<f32>",
            vector: Some("Vector3"),
            polynomial: "Polynomial3D",
            segment_trait: "ParamCubicSplineSegment3D",
            lerp: "Vector3::lerp",
        }),
        _ => Err(GenerateError::UnsupportedDimension(dim)),
    }
}
