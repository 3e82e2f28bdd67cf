//! The curve families that segment types are generated for.

use crate::error::GenerateError;
use crate::generate::degree_name;
use crate::math::{basis, RationalMatrix};
use itertools::Itertools;

/// Describes one spline basis: its degree, control points and characteristic matrix.
#[derive(Clone, Debug)]
pub struct CurveFamily {
    degree: usize,
    family_id: &'static str,
    display_name: &'static str,
    basis_id: &'static str,
    matrix: RationalMatrix,
    point_names: &'static [&'static str],
    point_descriptions: &'static [&'static str],
    splittable: bool,
}

impl CurveFamily {
    /// Creates a curve family.
    ///
    /// # Parameters
    /// * `degree` - The polynomial degree of a segment
    /// * `family_id` - The identifier used as the prefix of generated type names
    /// * `display_name` - The human readable name used in documentation
    /// * `basis_id` - The name of the characteristic matrix
    /// * `matrix` - The characteristic matrix, of size `degree + 1`
    /// * `point_names` - The control point names, in index order
    /// * `point_descriptions` - A description of each control point
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        degree: usize,
        family_id: &'static str,
        display_name: &'static str,
        basis_id: &'static str,
        matrix: RationalMatrix,
        point_names: &'static [&'static str],
        point_descriptions: &'static [&'static str],
        splittable: bool,
    ) -> Self {
        Self {
            degree,
            family_id,
            display_name,
            basis_id,
            matrix,
            point_names,
            point_descriptions,
            splittable,
        }
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn family_id(&self) -> &'static str {
        self.family_id
    }

    pub fn display_name(&self) -> &'static str {
        self.display_name
    }

    pub fn basis_id(&self) -> &'static str {
        self.basis_id
    }

    pub fn matrix(&self) -> &RationalMatrix {
        &self.matrix
    }

    pub fn point_names(&self) -> &'static [&'static str] {
        self.point_names
    }

    pub fn point_descriptions(&self) -> &'static [&'static str] {
        self.point_descriptions
    }

    pub fn point_count(&self) -> usize {
        self.degree + 1
    }

    /// Whether generated types get a de Casteljau `split` method.
    pub fn splittable(&self) -> bool {
        self.splittable
    }

    /// The type name without its dimension suffix, e.g. `BezierCubic`.
    pub fn type_stem(&self) -> String {
        let degree = degree_name(self.degree, true).unwrap_or("Unnamed");
        format!("{}{}", self.family_id, degree)
    }

    /// Checks that the matrix, names and descriptions all agree with the degree.
    pub(crate) fn validate(&self) -> Result<(), GenerateError> {
        let malformed = |reason: String| GenerateError::MalformedDescriptor {
            family: self.type_stem(),
            reason,
        };
        let n = self.point_count();
        if self.degree == 0 {
            return Err(malformed("degree must be positive".into()));
        }
        if self.matrix.size() != n {
            return Err(malformed(format!(
                "characteristic matrix is {0}x{0} but there are {1} control points",
                self.matrix.size(),
                n
            )));
        }
        if self.point_names.len() != n {
            return Err(malformed(format!(
                "expected {} control point names, found {}",
                n,
                self.point_names.len()
            )));
        }
        if self.point_descriptions.len() != n {
            return Err(malformed(format!(
                "expected {} control point descriptions, found {}",
                n,
                self.point_descriptions.len()
            )));
        }
        if let Some(name) = self.point_names.iter().duplicates().next() {
            return Err(malformed(format!("duplicate control point name `{}`", name)));
        }
        Ok(())
    }
}

/// The set of curve families to generate, in generation order.
#[derive(Clone, Debug)]
pub struct Catalog {
    families: Vec<CurveFamily>,
}

impl Catalog {
    /// Creates a catalog, rejecting any malformed family.
    pub fn new(families: Vec<CurveFamily>) -> Result<Self, GenerateError> {
        for family in &families {
            family.validate()?;
        }
        Ok(Self { families })
    }

    /// The built-in Bézier, Hermite, Catmull-Rom and uniform B-spline families.
    pub fn standard() -> Result<Self, GenerateError> {
        Self::new(vec![
            CurveFamily::new(
                3,
                "Bezier",
                "Bézier",
                "cubicBezier",
                basis::CUBIC_BEZIER.clone(),
                &["p0", "p1", "p2", "p3"],
                &[
                    "The starting point of the curve",
                    "The second control point of the curve, sometimes called the start tangent point",
                    "The third control point of the curve, sometimes called the end tangent point",
                    "The end point of the curve",
                ],
                true,
            ),
            CurveFamily::new(
                2,
                "Bezier",
                "Bézier",
                "quadraticBezier",
                basis::QUADRATIC_BEZIER.clone(),
                &["p0", "p1", "p2"],
                &[
                    "The starting point of the curve",
                    "The middle control point of the curve, sometimes called a tangent point",
                    "The end point of the curve",
                ],
                true,
            ),
            CurveFamily::new(
                3,
                "Hermite",
                "Hermite",
                "cubicHermite",
                basis::CUBIC_HERMITE.clone(),
                &["p0", "v0", "p1", "v1"],
                &[
                    "The starting point of the curve",
                    "The rate of change (velocity) at the start of the curve",
                    "The end point of the curve",
                    "The rate of change (velocity) at the end of the curve",
                ],
                false,
            ),
            CurveFamily::new(
                3,
                "CatRom",
                "Catmull-Rom",
                "cubicCatmullRom",
                basis::CUBIC_CATMULL_ROM.clone(),
                &["p0", "p1", "p2", "p3"],
                &[
                    "The first control point of the catmull-rom curve. Note that this point is not included in the curve itself, and only helps to shape it",
                    "The second control point, and the start of the catmull-rom curve",
                    "The third control point, and the end of the catmull-rom curve",
                    "The last control point of the catmull-rom curve. Note that this point is not included in the curve itself, and only helps to shape it",
                ],
                false,
            ),
            CurveFamily::new(
                3,
                "UBS",
                "B-Spline",
                "cubicUniformBspline",
                basis::CUBIC_UNIFORM_BSPLINE.clone(),
                &["p0", "p1", "p2", "p3"],
                &[
                    "The first point of the B-spline hull",
                    "The second point of the B-spline hull",
                    "The third point of the B-spline hull",
                    "The fourth point of the B-spline hull",
                ],
                false,
            ),
        ])
    }

    pub fn families(&self) -> &[CurveFamily] {
        &self.families
    }

    /// Finds a family by identifier and degree.
    pub fn family(&self, family_id: &str, degree: usize) -> Option<&CurveFamily> {
        self.families
            .iter()
            .find(|f| f.family_id == family_id && f.degree == degree)
    }

    /// The cubic families, which can all be converted into one another.
    pub fn cubic_families(&self) -> impl Iterator<Item = &CurveFamily> + '_ {
        self.families.iter().filter(|f| f.degree == 3)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::math::Rational;

    fn family(matrix: RationalMatrix, names: &'static [&'static str]) -> CurveFamily {
        CurveFamily::new(1, "Line", "line", "linear", matrix, names, &["a", "b"], false)
    }

    #[test]
    fn standard_catalog_is_well_formed() {
        let catalog = Catalog::standard().unwrap();
        assert_eq!(catalog.families().len(), 5);
        assert_eq!(catalog.cubic_families().count(), 4);
        let quad = catalog.family("Bezier", 2).unwrap();
        assert_eq!(quad.type_stem(), "BezierQuad");
        assert_eq!(quad.basis_id(), "quadraticBezier");
        assert!(quad.splittable());
        assert!(catalog.family("Hermite", 2).is_none());
    }

    #[test]
    fn matrix_size_must_match_points() {
        let bad = family(RationalMatrix::identity(3), &["a", "b"]);
        assert!(matches!(
            Catalog::new(vec![bad]),
            Err(GenerateError::MalformedDescriptor { .. })
        ));
    }

    #[test]
    fn names_must_match_degree() {
        let bad = family(RationalMatrix::identity(2), &["a", "b", "c"]);
        assert!(Catalog::new(vec![bad]).is_err());
    }

    #[test]
    fn names_must_be_unique() {
        let bad = family(RationalMatrix::identity(2), &["a", "a"]);
        let err = Catalog::new(vec![bad]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "malformed descriptor for LineLinear: duplicate control point name `a`"
        );
    }

    #[test]
    fn well_formed_custom_family() {
        let matrix = RationalMatrix::from_rows([[1, 0], [-1, 1]]);
        let catalog = Catalog::new(vec![family(matrix, &["a", "b"])]).unwrap();
        let line = catalog.family("Line", 1).unwrap();
        assert_eq!(line.matrix()[(1, 0)], Rational::int(-1));
        assert_eq!(line.point_count(), 2);
    }
}
