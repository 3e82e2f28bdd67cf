use super::conversion_matrix;
use crate::catalog::CurveFamily;
use crate::error::GenerateError;
use arrayvec::ArrayVec;
use cgmath::VectorSpace;

/// The maximum number of control points of a segment.
pub const MAX_POINTS: usize = 4;

/// A spline segment evaluated numerically through its family's characteristic matrix.
///
/// This mirrors the behaviour of the generated segment types, and is used to
/// check their formulas against actual curve geometry.
#[derive(Clone, Debug)]
pub struct Segment<'a, V> {
    family: &'a CurveFamily,
    points: ArrayVec<V, MAX_POINTS>,
}

impl<'a, V> Segment<'a, V>
where
    V: VectorSpace<Scalar = f64>,
{
    /// Creates a segment, or returns `None` if the number of points does not match the family.
    pub fn new(family: &'a CurveFamily, points: &[V]) -> Option<Self> {
        if points.len() != family.point_count() || points.len() > MAX_POINTS {
            return None;
        }
        let points = points.iter().copied().collect::<ArrayVec<_, MAX_POINTS>>();
        Some(Self { family, points })
    }

    pub fn family(&self) -> &'a CurveFamily {
        self.family
    }

    pub fn points(&self) -> &[V] {
        &self.points
    }

    /// The power-series coefficients, lowest order first.
    pub fn coefficients(&self) -> ArrayVec<V, MAX_POINTS> {
        self.family
            .matrix()
            .rows()
            .map(|row| {
                row.iter()
                    .zip(&self.points)
                    .fold(V::zero(), |acc, (w, p)| acc + *p * w.to_f64())
            })
            .collect()
    }

    /// Samples the segment at `t`.
    pub fn sample(&self, t: f64) -> V {
        self.coefficients()
            .iter()
            .rev()
            .fold(V::zero(), |acc, c| acc * t + *c)
    }

    /// Re-expresses the segment in another basis of the same degree.
    pub fn convert_to<'b>(&self, target: &'b CurveFamily) -> Result<Segment<'b, V>, GenerateError> {
        let c = conversion_matrix(self.family.matrix(), target.matrix())?;
        let points = c
            .rows()
            .map(|row| {
                row.iter()
                    .zip(&self.points)
                    .fold(V::zero(), |acc, (w, p)| acc + *p * w.to_f64())
            })
            .collect();
        Ok(Segment { family: target, points })
    }

    /// Splits the segment at `t` using de Casteljau's algorithm.
    ///
    /// Returns `None` for families that are not splittable.
    pub fn split(&self, t: f64) -> Option<(Self, Self)> {
        if !self.family.splittable() {
            return None;
        }
        let mut level = self.points.clone();
        let mut pre = ArrayVec::<V, MAX_POINTS>::new();
        let mut post = ArrayVec::<V, MAX_POINTS>::new();
        pre.push(level[0]);
        post.push(level[level.len() - 1]);
        while level.len() > 1 {
            level = level.windows(2).map(|w| w[0].lerp(w[1], t)).collect();
            pre.push(level[0]);
            post.push(level[level.len() - 1]);
        }
        post.reverse();
        Some((
            Self { family: self.family, points: pre },
            Self { family: self.family, points: post },
        ))
    }

    /// Blends the control points of two segments of the same family.
    ///
    /// Returns `None` if the segments belong to different families.
    pub fn lerp(a: &Self, b: &Self, t: f64) -> Option<Self> {
        if a.family.type_stem() != b.family.type_stem() {
            return None;
        }
        let points = a
            .points
            .iter()
            .zip(&b.points)
            .map(|(p, q)| p.lerp(*q, t))
            .collect();
        Some(Self { family: a.family, points })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::catalog::Catalog;
    use assert_approx_eq::assert_approx_eq;
    use cgmath::{InnerSpace, Vector2};
    use rand::{Rng, SeedableRng};

    fn random_points(rng: &mut impl Rng, n: usize) -> Vec<Vector2<f64>> {
        (0..n)
            .map(|_| Vector2::new(rng.gen_range(-100.0..100.0), rng.gen_range(-100.0..100.0)))
            .collect()
    }

    #[test]
    fn wrong_point_count_is_rejected() {
        let catalog = Catalog::standard().unwrap();
        let bezier = catalog.family("Bezier", 3).unwrap();
        assert!(Segment::new(bezier, &[Vector2::new(0.0, 0.0); 3]).is_none());
    }

    #[test]
    fn bezier_samples_match_bernstein_form() {
        let catalog = Catalog::standard().unwrap();
        let bezier = catalog.family("Bezier", 3).unwrap();
        let mut rng = rand::rngs::StdRng::from_seed(*b"Vegemite sandwhich is not fun...");
        let ps = random_points(&mut rng, 4);
        let seg = Segment::new(bezier, &ps).unwrap();
        for i in 0..=10 {
            let t = i as f64 / 10.0;
            let t1 = 1.0 - t;
            let expected = ps[0] * (t1 * t1 * t1)
                + ps[1] * (3.0 * t1 * t1 * t)
                + ps[2] * (3.0 * t1 * t * t)
                + ps[3] * (t * t * t);
            assert_approx_eq!((seg.sample(t) - expected).magnitude(), 0.0, 1e-9);
        }
    }

    #[test]
    fn conversions_preserve_shape() {
        let catalog = Catalog::standard().unwrap();
        let mut rng = rand::rngs::StdRng::from_seed(*b"Vegemite sandwhich is not fun...");
        for from in catalog.cubic_families() {
            for to in catalog.cubic_families() {
                let seg = Segment::new(from, &random_points(&mut rng, 4)).unwrap();
                let converted = seg.convert_to(to).unwrap();
                for i in 0..=8 {
                    let t = i as f64 / 8.0;
                    let d = (seg.sample(t) - converted.sample(t)).magnitude();
                    assert_approx_eq!(d, 0.0, 1e-6);
                }
            }
        }
    }

    #[test]
    fn split_halves_cover_the_curve() {
        let catalog = Catalog::standard().unwrap();
        let mut rng = rand::rngs::StdRng::from_seed(*b"Vegemite sandwhich is not fun...");
        for degree in [2, 3] {
            let family = catalog.family("Bezier", degree).unwrap();
            let seg = Segment::new(family, &random_points(&mut rng, degree + 1)).unwrap();
            let t = 0.3;
            let (pre, post) = seg.split(t).unwrap();
            for i in 0..=10 {
                let u = i as f64 / 10.0;
                let d_pre = (pre.sample(u) - seg.sample(u * t)).magnitude();
                let d_post = (post.sample(u) - seg.sample(t + u * (1.0 - t))).magnitude();
                assert_approx_eq!(d_pre, 0.0, 1e-9);
                assert_approx_eq!(d_post, 0.0, 1e-9);
            }
        }
    }

    #[test]
    fn only_splittable_families_split() {
        let catalog = Catalog::standard().unwrap();
        let hermite = catalog.family("Hermite", 3).unwrap();
        let seg = Segment::new(hermite, &[Vector2::new(1.0, 2.0); 4]).unwrap();
        assert!(seg.split(0.5).is_none());
    }

    #[test]
    fn lerp_blends_points() {
        let catalog = Catalog::standard().unwrap();
        let bezier = catalog.family("Bezier", 2).unwrap();
        let hermite = catalog.family("Hermite", 3).unwrap();
        let a = Segment::new(bezier, &[Vector2::new(0.0, 0.0); 3]).unwrap();
        let b = Segment::new(bezier, &[Vector2::new(2.0, 4.0); 3]).unwrap();
        let mid = Segment::lerp(&a, &b, 0.5).unwrap();
        assert_eq!(mid.points(), &[Vector2::new(1.0, 2.0); 3]);
        let h = Segment::new(hermite, &[Vector2::new(0.0, 0.0); 4]).unwrap();
        let c = Segment::new(catalog.family("Bezier", 3).unwrap(), &[Vector2::new(0.0, 0.0); 4]).unwrap();
        assert!(Segment::lerp(&h, &c, 0.5).is_none());
    }
}
