//! Generation of segment type source files from curve families.

use crate::catalog::{Catalog, CurveFamily};
use crate::code::CodeWriter;
use crate::error::{GenerateError, TaskError};
use crate::math::{conversion_matrix, RationalMatrix};
use crate::sink::DocumentSink;
use crate::sum::{LinearSum, NumberStyle};
use itertools::{iproduct, Itertools};
use std::fmt;

pub use names::{degree_name, dimension_types, lerp_name, module_name, type_name, DimensionTypes};

mod names;
mod split;

/// The dimensions segment types are generated for.
pub const DIMENSIONS: [usize; 3] = [1, 2, 3];

const HEADER: &str = concat!(
    "Do not manually edit - this file is generated by ",
    env!("CARGO_PKG_NAME")
);

/// One segment type to generate: a curve family in a given dimension.
#[derive(Clone, Copy, Debug)]
pub struct GenerationTask<'a> {
    pub family: &'a CurveFamily,
    pub dim: usize,
}

impl fmt::Display for GenerationTask<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match type_name(self.family, self.dim) {
            Ok(name) => f.write_str(&name),
            Err(_) => write!(
                f,
                "{} (degree {}, {}D)",
                self.family.family_id(),
                self.family.degree(),
                self.dim
            ),
        }
    }
}

/// A generated source file.
#[derive(Clone, Debug)]
pub struct EmittedDocument {
    /// The generated type name, or `mod` for the module index.
    pub name: String,
    pub module_name: String,
    pub lines: Vec<String>,
}

impl EmittedDocument {
    pub fn file_name(&self) -> String {
        format!("{}.rs", self.module_name)
    }

    /// The full file contents, with a trailing newline.
    pub fn text(&self) -> String {
        let mut text = self.lines.join("\n");
        text.push('\n');
        text
    }
}

/// Renders the polynomial coefficient of each power of `t`, lowest first.
pub fn polynomial_rows(family: &CurveFamily, style: NumberStyle) -> Vec<String> {
    matrix_rows(family.matrix(), family.point_names(), style)
}

/// Renders the control points of `to` in terms of the control points of `from`.
pub fn conversion_rows(
    from: &CurveFamily,
    to: &CurveFamily,
    style: NumberStyle,
) -> Result<Vec<String>, GenerateError> {
    let c = conversion_matrix(from.matrix(), to.matrix())?;
    Ok(matrix_rows(&c, from.point_names(), style))
}

fn matrix_rows(matrix: &RationalMatrix, vars: &[&str], style: NumberStyle) -> Vec<String> {
    matrix
        .rows()
        .map(|row| LinearSum::from_pairs(row, vars, style).render())
        .collect()
}

/// A destructuring pattern binding the variables used by any row of `matrix`.
fn used_points(matrix: &RationalMatrix, vars: &[&str]) -> String {
    let names = vars
        .iter()
        .enumerate()
        .map(|(col, var)| {
            let used = matrix.rows().any(|row| !row[col].is_zero());
            if used { *var } else { "_" }
        })
        .join(", ");
    format!("[{}]", names)
}

/// Generates every family in every dimension.
///
/// A failing type does not stop the others; its error is returned in its place.
pub fn generate_all(catalog: &Catalog) -> Vec<Result<EmittedDocument, TaskError>> {
    iproduct!(DIMENSIONS, catalog.families())
        .map(|(dim, family)| {
            let task = GenerationTask { family, dim };
            generate_type(catalog, family, dim).map_err(|source| TaskError {
                task: task.to_string(),
                source,
            })
        })
        .collect()
}

/// Generates the source of one segment type.
///
/// The family is validated first, so descriptors built outside a [Catalog]
/// fail with [GenerateError::MalformedDescriptor].
pub fn generate_type(
    catalog: &Catalog,
    family: &CurveFamily,
    dim: usize,
) -> Result<EmittedDocument, GenerateError> {
    family.validate()?;
    let types = dimension_types(dim)?;
    let name = type_name(family, dim)?;
    let gen = TypeGenerator {
        catalog,
        family,
        dim,
        types,
        name: &name,
        degree_lower: degree_name(family.degree(), false)?.to_lowercase(),
        pretty_lower: family.display_name().to_lowercase(),
    };

    let mut code = CodeWriter::new();
    gen.write(&mut code)?;

    let lines = code.into_lines();
    log::info!("generated {} ({} lines)", name, lines.len());
    Ok(EmittedDocument {
        module_name: module_name(&name),
        name,
        lines,
    })
}

/// Generates a `mod.rs` declaring and re-exporting the given documents.
pub fn module_index(documents: &[EmittedDocument]) -> EmittedDocument {
    let mut code = CodeWriter::new();
    code.comment(HEADER);
    code.blank();
    for doc in documents {
        code.line(format!("mod {};", doc.module_name));
    }
    code.blank();
    for doc in documents {
        code.line(format!("pub use {}::{};", doc.module_name, doc.name));
    }
    EmittedDocument {
        name: "mod".into(),
        module_name: "mod".into(),
        lines: code.into_lines(),
    }
}

/// Regenerates every segment type and writes it to `sink`.
///
/// Every type that generates successfully is written, even if others fail.
/// Returns the number of documents written.
pub fn regenerate(
    catalog: &Catalog,
    sink: &mut dyn DocumentSink,
    with_index: bool,
) -> Result<usize, GenerateError> {
    let mut documents = Vec::new();
    let mut failed = 0;
    for result in generate_all(catalog) {
        match result {
            Ok(doc) => documents.push(doc),
            Err(err) => {
                log::error!("{}", err);
                failed += 1;
            }
        }
    }

    if with_index {
        let index = module_index(&documents);
        documents.push(index);
    }

    let written = documents.len();
    for doc in documents {
        sink.write(doc)?;
    }
    sink.finish()?;

    if failed > 0 {
        return Err(GenerateError::BatchFailed { failed });
    }
    Ok(written)
}

/// Writes the source of one segment type.
struct TypeGenerator<'a> {
    catalog: &'a Catalog,
    family: &'a CurveFamily,
    dim: usize,
    types: DimensionTypes,
    name: &'a str,
    degree_lower: String,
    pretty_lower: String,
}

impl TypeGenerator<'_> {
    fn points(&self) -> &'static [&'static str] {
        self.family.point_names()
    }

    fn max_index(&self) -> usize {
        self.family.degree()
    }

    fn has_slerp(&self) -> bool {
        self.dim > 1
            && matches!(self.family.degree(), 2 | 3)
            && self.family.family_id() == "Bezier"
    }

    fn has_dimension_cast(&self) -> bool {
        matches!(self.dim, 2 | 3) && self.family.degree() == 3
    }

    /// The same family in the other of 2D and 3D.
    fn cast_target(&self) -> Result<Option<String>, GenerateError> {
        if !self.has_dimension_cast() {
            return Ok(None);
        }
        let other = if self.dim == 2 { 3 } else { 2 };
        type_name(self.family, other).map(Some)
    }

    /// The other cubic families this type converts into.
    fn conversion_targets(&self) -> impl Iterator<Item = &CurveFamily> + '_ {
        self.catalog
            .cubic_families()
            .filter(move |f| self.family.degree() == 3 && f.family_id() != self.family.family_id())
    }

    fn write(&self, code: &mut CodeWriter) -> Result<(), GenerateError> {
        self.write_imports(code)?;
        self.write_struct(code);
        self.write_inherent_impl(code);
        self.write_trait_impls(code);
        self.write_dimension_cast(code)?;
        self.write_conversions(code)?;
        Ok(())
    }

    fn write_imports(&self, code: &mut CodeWriter) -> Result<(), GenerateError> {
        code.comment(HEADER);
        code.blank();
        code.line("use std::cell::Cell;");
        code.line("use std::fmt;");
        code.line("use std::hash::{Hash, Hasher};");
        code.line("use std::ops::Index;");
        code.blank();
        if let Some(vector) = self.types.vector {
            code.line("use cgmath::prelude::*;");
            code.line(format!("use cgmath::{};", vector));
        }
        code.line("use serde::{Deserialize, Serialize};");
        code.blank();

        let mut related = self
            .conversion_targets()
            .map(|f| type_name(f, self.dim))
            .collect::<Result<Vec<_>, _>>()?;
        related.extend(self.cast_target()?);
        related.sort();
        match related.len() {
            0 => {}
            1 => code.line(format!("use super::{};", related[0])),
            _ => code.line(format!("use super::{{{}}};", related.join(", "))),
        }
        if self.dim == 1 {
            code.line("use crate::math::lerp;");
        }
        if self.has_slerp() {
            code.line("use crate::math::slerp;");
        }
        code.line(format!(
            "use crate::{{IndexOutOfRange, {}, {}}};",
            self.types.segment_trait, self.types.polynomial
        ));
        code.blank();
        Ok(())
    }

    fn write_struct(&self, code: &mut CodeWriter) {
        code.doc(format!(
            "An optimized uniform {}D {} {} segment, with {} control points",
            self.dim,
            self.degree_lower,
            self.pretty_lower,
            self.family.point_count()
        ));
        code.attribute("derive(Clone, Debug, Serialize, Deserialize)");
        let mut body = code.block(format!("pub struct {}", self.name));
        for p in self.points() {
            body.line(format!("{}: {},", p, self.types.point));
        }
        body.attribute("serde(skip)");
        body.line(format!("curve: Cell<Option<{}>>,", self.types.polynomial));
        drop(body);
        code.blank();
    }

    fn write_inherent_impl(&self, code: &mut CodeWriter) {
        let mut imp = code.block(format!("impl {}", self.name));
        self.write_constructor(&mut imp);
        imp.blank();
        self.write_curve(&mut imp);
        imp.blank();
        self.write_control_points(&mut imp);
        imp.blank();
        self.write_lerp(&mut imp);
        if self.has_slerp() {
            imp.blank();
            self.write_slerp(&mut imp);
        }
        if self.family.splittable() {
            imp.blank();
            self.write_split(&mut imp);
        }
        drop(imp);
        code.blank();
    }

    fn write_constructor(&self, code: &mut CodeWriter) {
        code.doc(format!(
            "Creates a uniform {}D {} {} segment, from {} control points",
            self.dim,
            self.degree_lower,
            self.pretty_lower,
            self.family.point_count()
        ));
        code.line("///");
        code.doc("# Parameters");
        for (p, desc) in self.points().iter().zip(self.family.point_descriptions()) {
            code.doc(format!("* `{}` - {}", p, desc));
        }
        let params = self
            .points()
            .iter()
            .map(|p| format!("{}: {}", p, self.types.point))
            .join(", ");
        let mut ctor = code.block(format!("pub const fn new({}) -> Self", params));
        let mut init = ctor.block("Self");
        for p in self.points() {
            init.line(format!("{},", p));
        }
        init.line("curve: Cell::new(None),");
    }

    fn write_curve(&self, code: &mut CodeWriter) {
        let polynomial = self.types.polynomial;
        code.doc("The polynomial coefficients of this segment, recomputed after any control point changes");
        let mut body = code.block(format!("pub fn curve(&self) -> {}", polynomial));
        {
            let mut cached = body.block("if let Some(curve) = self.curve.get()");
            cached.line("return curve;");
        }
        body.line(format!(
            "let {} = self.points();",
            used_points(self.family.matrix(), self.points())
        ));
        {
            let mut ctor = body.scope(format!("let curve = {}::{}(", polynomial, self.degree_lower));
            let rows = polynomial_rows(self.family, NumberStyle::Float);
            let last = rows.len() - 1;
            for (i, row) in rows.into_iter().enumerate() {
                ctor.line(if i < last { format!("{},", row) } else { row });
            }
        }
        body.line(");");
        body.line("self.curve.set(Some(curve));");
        body.line("curve");
        drop(body);

        code.blank();
        code.doc("All control points, in index order");
        let mut points = code.block(format!(
            "pub fn points(&self) -> [{}; {}]",
            self.types.point,
            self.family.point_count()
        ));
        points.line(format!(
            "[{}]",
            self.points().iter().map(|p| format!("self.{}", p)).join(", ")
        ));
    }

    fn write_control_points(&self, code: &mut CodeWriter) {
        let point = self.types.point;
        let mut region = code.region("Control points");

        for (p, desc) in self.points().iter().zip(self.family.point_descriptions()) {
            region.doc(desc);
            let mut get = region.block(format!("pub fn {}(&self) -> {}", p, point));
            get.line(format!("self.{}", p));
            drop(get);
            region.blank();

            region.doc(format!("Sets {}, invalidating the cached coefficients", p));
            let mut set = region.block(format!("pub fn set_{}(&mut self, value: {})", p, point));
            set.line(format!("self.{} = value;", p));
            set.line("self.curve.set(None);");
            drop(set);
            region.blank();
        }

        let out_of_range = format!(
            "IndexOutOfRange {{ index: i, max: {} }}",
            self.max_index()
        );

        region.doc(format!(
            "Gets a control point by index. Valid indices from 0 to {}",
            self.max_index()
        ));
        {
            let mut get = region.block(format!(
                "pub fn point(&self, i: usize) -> Result<{}, IndexOutOfRange>",
                point
            ));
            let mut arms = get.block("match i");
            for (i, p) in self.points().iter().enumerate() {
                arms.line(format!("{} => Ok(self.{}),", i, p));
            }
            arms.line(format!("_ => Err({}),", out_of_range));
        }
        region.blank();

        region.doc(format!(
            "Sets a control point by index. Valid indices from 0 to {}",
            self.max_index()
        ));
        {
            let mut set = region.block(format!(
                "pub fn set_point(&mut self, i: usize, value: {}) -> Result<(), IndexOutOfRange>",
                point
            ));
            {
                let mut arms = set.block("match i");
                for (i, p) in self.points().iter().enumerate() {
                    arms.line(format!("{} => self.set_{}(value),", i, p));
                }
                arms.line(format!("_ => return Err({}),", out_of_range));
            }
            set.line("Ok(())");
        }
    }

    fn write_blend_docs(&self, code: &mut CodeWriter, summary: &str) {
        code.doc(summary);
        code.line("///");
        code.doc("# Parameters");
        code.doc("* `a` - The first spline segment");
        code.doc("* `b` - The second spline segment");
        code.doc("* `t` - A value from 0 to 1 to blend between `a` and `b`");
    }

    fn write_lerp(&self, code: &mut CodeWriter) {
        self.write_blend_docs(
            code,
            &format!("Returns a linear blend between two {} curves", self.pretty_lower),
        );
        let mut body = code.block("pub fn lerp(a: &Self, b: &Self, t: f32) -> Self");
        {
            let mut ctor = body.scope("Self::new(");
            for p in self.points() {
                ctor.line(format!("{}(a.{p}, b.{p}, t),", self.types.lerp, p = p));
            }
        }
        body.line(")");
    }

    fn write_slerp(&self, code: &mut CodeWriter) {
        self.write_blend_docs(
            code,
            &format!(
                "Returns a linear blend between two {} curves, where the tangent directions are spherically interpolated",
                self.pretty_lower
            ),
        );
        let points = self.points();
        let (first, last) = (points[0], points[points.len() - 1]);
        let degree = self.family.degree();

        let mut body = code.block("pub fn slerp(a: &Self, b: &Self, t: f32) -> Self");
        for p in [first, last] {
            body.line(format!(
                "let {p}: {} = {}(a.{p}, b.{p}, t);",
                self.types.point,
                self.types.lerp,
                p = p
            ));
        }
        {
            let mut ctor = body.scope("Self::new(");
            ctor.line(format!("{},", first));
            for (i, p) in points.iter().enumerate().take(degree).skip(1) {
                let anchor = if 2 * i <= degree { first } else { last };
                let (da, db) = (format!("a.{} - a.{}", p, anchor), format!("b.{} - b.{}", p, anchor));
                let blend = if self.dim == 2 {
                    format!("slerp(({}).extend(0.0), ({}).extend(0.0), t).truncate()", da, db)
                } else {
                    format!("slerp({}, {}, t)", da, db)
                };
                ctor.line(format!("{} + {},", anchor, blend));
            }
            ctor.line(last);
        }
        body.line(")");
    }

    fn write_split(&self, code: &mut CodeWriter) {
        code.doc("Splits this curve at the given t-value, into two curves that together form the exact same shape");
        code.line("///");
        code.doc("# Parameters");
        code.doc("* `t` - The t-value to split at");
        let mut body = code.block("pub fn split(&self, t: f32) -> (Self, Self)");
        split::write_split_body(&mut body, self.points(), self.types.point, self.types.vector, self.dim);
    }

    fn write_trait_impls(&self, code: &mut CodeWriter) {
        let (name, point) = (self.name, self.types.point);
        let polynomial = self.types.polynomial;

        {
            let mut imp = code.block(format!("impl {} for {}", self.types.segment_trait, name));
            let mut body = imp.block(format!("fn curve(&self) -> {}", polynomial));
            body.line(format!("{}::curve(self)", name));
        }
        code.blank();

        {
            let mut imp = code.block(format!("impl Index<usize> for {}", name));
            imp.line(format!("type Output = {};", point));
            imp.blank();
            let mut body = imp.block(format!("fn index(&self, i: usize) -> &{}", point));
            let mut arms = body.block("match i");
            for (i, p) in self.points().iter().enumerate() {
                arms.line(format!("{} => &self.{},", i, p));
            }
            arms.line(format!(
                "_ => panic!(\"Index has to be in the 0 to {} range, and {{}} is outside that range\", i),",
                self.max_index()
            ));
        }
        code.blank();

        {
            let mut imp = code.block(format!("impl PartialEq for {}", name));
            let mut body = imp.block("fn eq(&self, other: &Self) -> bool");
            body.line(
                self.points()
                    .iter()
                    .map(|p| format!("self.{p} == other.{p}", p = p))
                    .join(" && "),
            );
        }
        code.blank();

        {
            let mut imp = code.block(format!("impl Hash for {}", name));
            let mut body = imp.block("fn hash<H: Hasher>(&self, state: &mut H)");
            let mut each = body.block("for p in self.points()");
            if self.dim == 1 {
                each.line("p.to_bits().hash(state);");
            } else {
                for c in &names::COMPONENTS[..self.dim] {
                    each.line(format!("p.{}.to_bits().hash(state);", c));
                }
            }
        }
        code.blank();

        {
            let mut imp = code.block(format!("impl fmt::Display for {}", name));
            let mut body = imp.block("fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result");
            let placeholders = self.points().iter().map(|_| "{:?}").join(", ");
            let args = self.points().iter().map(|p| format!("self.{}", p)).join(", ");
            body.line(format!("write!(f, \"({})\", {})", placeholders, args));
        }
    }

    fn write_dimension_cast(&self, code: &mut CodeWriter) -> Result<(), GenerateError> {
        let Some(target) = self.cast_target()? else {
            return Ok(());
        };
        let points = self.points();
        let (doc, var, method) = if self.dim == 2 {
            ("Returns this spline segment in 3D, where z = 0", "curve_2d", "extend(0.0)")
        } else {
            ("Returns this curve flattened to 2D. Effectively setting z = 0", "curve_3d", "truncate()")
        };

        code.blank();
        code.doc(doc);
        let mut imp = code.block(format!("impl From<{}> for {}", self.name, target));
        let mut body = imp.block(format!("fn from({}: {}) -> Self", var, self.name));
        body.line(format!("let [{}] = {}.points();", points.join(", "), var));
        body.line(format!(
            "Self::new({})",
            points.iter().map(|p| format!("{}.{}", p, method)).join(", ")
        ));
        Ok(())
    }

    fn write_conversions(&self, code: &mut CodeWriter) -> Result<(), GenerateError> {
        for target in self.conversion_targets() {
            let target_name = type_name(target, self.dim)?;
            let c = conversion_matrix(self.family.matrix(), target.matrix())?;
            log::debug!("derived conversion {} -> {}", self.name, target_name);

            code.blank();
            let mut imp = code.block(format!("impl From<{}> for {}", self.name, target_name));
            let mut body = imp.block(format!("fn from(s: {}) -> Self", self.name));
            body.line(format!("let {} = s.points();", used_points(&c, self.points())));
            {
                let mut ctor = body.scope("Self::new(");
                let rows = matrix_rows(&c, self.points(), NumberStyle::Float);
                let last = rows.len() - 1;
                for (i, row) in rows.into_iter().enumerate() {
                    ctor.line(if i < last { format!("{},", row) } else { row });
                }
            }
            body.line(")");
        }
        Ok(())
    }
}
