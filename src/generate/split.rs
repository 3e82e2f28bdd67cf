use super::names::COMPONENTS;
use crate::code::CodeWriter;
use itertools::Itertools;

/// Names given to the intermediate points of de Casteljau's algorithm.
/// `p` is reserved for the split point and `t` for the parameter.
fn intermediate_names() -> impl Iterator<Item = String> {
    ('a'..='z')
        .filter(|c| !matches!(c, 'p' | 't'))
        .map(String::from)
}

/// Writes `let {name} = lerp({a}, {b}, t);` unrolled per component.
fn write_lerp(code: &mut CodeWriter, point_type: &str, vector: Option<&str>, dim: usize, name: &str, a: &str, b: &str) {
    match vector {
        Some(vector) => {
            let mut ctor = code.scope(format!("let {}: {} = {}::new(", name, point_type, vector));
            for c in &COMPONENTS[..dim] {
                ctor.line(format!("{a}.{c} + ({b}.{c} - {a}.{c}) * t,"));
            }
            drop(ctor);
            code.line(");");
        }
        None => code.line(format!("let {name}: {point_type} = {a} + ({b} - {a}) * t;")),
    }
}

/// Writes the body of a de Casteljau `split` method for the given control points.
///
/// The body returns `(Self, Self)` covering `[0, t]` and `[t, 1]`.
pub fn write_split_body(code: &mut CodeWriter, points: &[&str], point_type: &str, vector: Option<&str>, dim: usize) {
    code.line(format!("let [{}] = self.points();", points.join(", ")));

    let mut names = intermediate_names();
    let mut level = points.iter().map(|p| p.to_string()).collect::<Vec<_>>();
    let mut pre = vec![level[0].clone()];
    let mut post = vec![level[level.len() - 1].clone()];
    while level.len() > 1 {
        let last_level = level.len() == 2;
        let next = level
            .iter()
            .tuple_windows()
            .map(|(a, b)| {
                let name = if last_level {
                    "p".to_string()
                } else {
                    names.next().unwrap_or_else(|| "q".to_string())
                };
                write_lerp(code, point_type, vector, dim, &name, a, b);
                name
            })
            .collect::<Vec<_>>();
        pre.push(next[0].clone());
        post.push(next[next.len() - 1].clone());
        level = next;
    }
    post.reverse();

    code.line(format!(
        "(Self::new({}), Self::new({}))",
        pre.join(", "),
        post.join(", ")
    ));
}
