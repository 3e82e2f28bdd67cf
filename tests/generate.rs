//! Tests that generate the full set of segment types.

use spline_codegen::math::{conversion_matrix, Rational, RationalMatrix};
use spline_codegen::{
    generate_type, polynomial_rows, regenerate, Catalog, CurveFamily, DirectorySink,
    GenerateError, ManifestEntry, MemorySink, NumberStyle,
};

fn weights(values: &[(i64, i64)]) -> Vec<Rational> {
    values.iter().map(|&(n, d)| Rational::new(n, d)).collect()
}

/// The weight of each control point in the curve's position at `t`.
fn position_weights(family: &CurveFamily, t: Rational) -> Vec<Rational> {
    let m = family.matrix();
    let mut out = vec![Rational::ZERO; m.size()];
    let mut power = Rational::ONE;
    for row in m.rows() {
        for (w, &c) in out.iter_mut().zip(row) {
            *w = *w + c * power;
        }
        power = power * t;
    }
    out
}

/// Example from the cubic Bézier basis in 1D.
#[test]
fn cubic_bezier_coefficients() {
    let catalog = Catalog::standard().unwrap();
    let bezier = catalog.family("Bezier", 3).unwrap();
    assert_eq!(
        polynomial_rows(bezier, NumberStyle::Integer),
        ["p0", "3*(-p0+p1)", "3*p0-6*p1+3*p2", "-p0+3*p1-3*p2+p3"]
    );
}

/// Test that every family passes through its defined end points.
#[test]
fn endpoints() {
    let catalog = Catalog::standard().unwrap();
    let cases = [
        ("Bezier", 3, weights(&[(1, 1), (0, 1), (0, 1), (0, 1)]), weights(&[(0, 1), (0, 1), (0, 1), (1, 1)])),
        ("Bezier", 2, weights(&[(1, 1), (0, 1), (0, 1)]), weights(&[(0, 1), (0, 1), (1, 1)])),
        ("Hermite", 3, weights(&[(1, 1), (0, 1), (0, 1), (0, 1)]), weights(&[(0, 1), (0, 1), (1, 1), (0, 1)])),
        ("CatRom", 3, weights(&[(0, 1), (1, 1), (0, 1), (0, 1)]), weights(&[(0, 1), (0, 1), (1, 1), (0, 1)])),
        ("UBS", 3, weights(&[(1, 6), (2, 3), (1, 6), (0, 1)]), weights(&[(0, 1), (1, 6), (2, 3), (1, 6)])),
    ];
    for (id, degree, start, end) in cases {
        let family = catalog.family(id, degree).unwrap();
        assert_eq!(position_weights(family, Rational::ZERO), start, "{} start", id);
        assert_eq!(position_weights(family, Rational::ONE), end, "{} end", id);
    }
}

/// Test that converting between any two cubic bases and back is the identity.
#[test]
fn conversions_round_trip() {
    let catalog = Catalog::standard().unwrap();
    for a in catalog.cubic_families() {
        for b in catalog.cubic_families() {
            let ab = conversion_matrix(a.matrix(), b.matrix()).unwrap();
            let ba = conversion_matrix(b.matrix(), a.matrix()).unwrap();
            assert_eq!(&ba * &ab, RationalMatrix::identity(4));
        }
    }
}

/// Test that the generated indexers cover exactly the control points in order.
#[test]
fn indexer_bounds() {
    let catalog = Catalog::standard().unwrap();
    for family in catalog.cubic_families() {
        let doc = generate_type(&catalog, family, 2).unwrap();
        let lines = doc.lines.iter().map(|l| l.trim()).collect::<Vec<_>>();
        for (i, p) in family.point_names().iter().enumerate() {
            assert!(lines.contains(&format!("{} => Ok(self.{}),", i, p).as_str()));
            assert!(lines.contains(&format!("{} => &self.{},", i, p).as_str()));
        }
        assert!(lines.contains(&"_ => Err(IndexOutOfRange { index: i, max: 3 }),"));
        assert!(lines.contains(&"_ => return Err(IndexOutOfRange { index: i, max: 3 }),"));
        assert!(!lines.iter().any(|l| l.starts_with("4 =>")));
    }
}

#[test]
fn regenerate_into_memory() {
    let catalog = Catalog::standard().unwrap();
    let mut sink = MemorySink::new();
    let written = regenerate(&catalog, &mut sink, true).unwrap();
    assert_eq!(written, 16);
    assert!(sink.finished);

    let index = sink.get("mod").unwrap();
    assert_eq!(index.lines.iter().filter(|l| l.starts_with("mod ")).count(), 15);
    let hermite = sink.get("HermiteCubic3D").unwrap();
    assert_eq!(hermite.file_name(), "hermite_cubic_3d.rs");
    assert!(hermite.lines.iter().any(|l| l.trim() == "pub fn set_v0(&mut self, value: Vector3<f32>) {"));
}

#[test]
fn regenerate_into_directory() {
    let dir = std::env::temp_dir().join(format!("spline-codegen-{}", std::process::id()));
    let catalog = Catalog::standard().unwrap();
    let mut sink = DirectorySink::new(&dir).unwrap();
    regenerate(&catalog, &mut sink, false).unwrap();

    let text = std::fs::read_to_string(dir.join("bezier_quad_2d.rs")).unwrap();
    assert!(text.contains("pub struct BezierQuad2D {"));
    assert!(!dir.join("mod.rs").exists());

    let manifest = std::fs::read_to_string(dir.join(DirectorySink::MANIFEST)).unwrap();
    let manifest: Vec<ManifestEntry> = serde_json::from_str(&manifest).unwrap();
    assert_eq!(manifest.len(), 15);
    assert_eq!(manifest[0].name, "BezierCubic1D");
    assert_eq!(manifest[0].file, "bezier_cubic_1d.rs");

    std::fs::remove_dir_all(&dir).unwrap();
}

/// Test that a manifest which cannot be fully written is reported.
#[cfg(target_os = "linux")]
#[test]
fn manifest_write_errors_are_reported() {
    let dir = std::env::temp_dir().join(format!("spline-codegen-full-{}", std::process::id()));
    let mut sink = DirectorySink::new(&dir).unwrap();
    std::os::unix::fs::symlink("/dev/full", dir.join(DirectorySink::MANIFEST)).unwrap();

    let catalog = Catalog::standard().unwrap();
    let result = regenerate(&catalog, &mut sink, false);
    std::fs::remove_dir_all(&dir).unwrap();
    assert!(matches!(
        result,
        Err(GenerateError::Io(_) | GenerateError::Manifest(_))
    ));
}

/// Test that one failing family does not prevent the others from being written.
#[test]
fn failures_are_isolated() {
    let catalog = Catalog::new(vec![
        CurveFamily::new(
            6,
            "Sextic",
            "sextic",
            "sextic",
            RationalMatrix::identity(7),
            &["a", "b", "c", "d", "e", "f", "g"],
            &["", "", "", "", "", "", ""],
            false,
        ),
        Catalog::standard().unwrap().family("Bezier", 2).unwrap().clone(),
    ])
    .unwrap();

    let mut sink = MemorySink::new();
    let result = regenerate(&catalog, &mut sink, false);
    assert!(matches!(result, Err(GenerateError::BatchFailed { failed: 3 })));
    assert_eq!(sink.documents.len(), 3);
    assert!(sink.get("BezierQuad3D").is_some());
}
