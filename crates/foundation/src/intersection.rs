//! Overlap estimation between convex polygons.
//!
//! Viewports are rotated rectangles, so overlap is measured on their corner
//! polygons rather than on axis-aligned boxes.

use crate::math::Vec2;

const AREA_EPS: f64 = 1e-12;

/// Shoelace area; positive for counter-clockwise winding.
pub fn polygon_signed_area(points: &[Vec2]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut twice = 0.0;
    for (i, p) in points.iter().enumerate() {
        let q = points[(i + 1) % points.len()];
        twice += p.cross(q);
    }
    twice * 0.5
}

pub fn polygon_area(points: &[Vec2]) -> f64 {
    polygon_signed_area(points).abs()
}

fn counter_clockwise(points: &[Vec2]) -> Vec<Vec2> {
    let mut out = points.to_vec();
    if polygon_signed_area(&out) < 0.0 {
        out.reverse();
    }
    out
}

/// Clips `subject` against the convex, counter-clockwise polygon `clip`
/// (Sutherland–Hodgman). Returns an empty vector when nothing remains.
pub fn clip_convex(subject: &[Vec2], clip: &[Vec2]) -> Vec<Vec2> {
    let mut output = subject.to_vec();
    for (i, &a) in clip.iter().enumerate() {
        if output.is_empty() {
            break;
        }
        let b = clip[(i + 1) % clip.len()];
        let edge = b - a;
        let inside = |p: Vec2| edge.cross(p - a) >= 0.0;

        let input = std::mem::take(&mut output);
        for (j, &p) in input.iter().enumerate() {
            let q = input[(j + 1) % input.len()];
            match (inside(p), inside(q)) {
                (true, true) => output.push(q),
                (true, false) => output.push(segment_line_hit(p, q, a, edge)),
                (false, true) => {
                    output.push(segment_line_hit(p, q, a, edge));
                    output.push(q);
                }
                (false, false) => {}
            }
        }
    }
    output
}

fn segment_line_hit(p: Vec2, q: Vec2, a: Vec2, edge: Vec2) -> Vec2 {
    let denom = edge.cross(q - p);
    if denom.abs() < AREA_EPS {
        return p;
    }
    let t = edge.cross(a - p) / denom;
    p + (q - p) * t
}

/// Intersection-over-union of two convex polygons, in `[0, 1]`.
///
/// Degenerate (zero-area) inputs score 0.
pub fn intersection_score(lhs: &[Vec2], rhs: &[Vec2]) -> f64 {
    let lhs = counter_clockwise(lhs);
    let rhs = counter_clockwise(rhs);

    let lhs_area = polygon_area(&lhs);
    let rhs_area = polygon_area(&rhs);
    if lhs_area <= AREA_EPS || rhs_area <= AREA_EPS {
        return 0.0;
    }

    let common = polygon_area(&clip_convex(&lhs, &rhs));
    let union = lhs_area + rhs_area - common;
    if union <= AREA_EPS {
        return 0.0;
    }
    (common / union).clamp(0.0, 1.0)
}
