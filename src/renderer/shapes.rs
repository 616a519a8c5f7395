//! Shape tessellation for 2D primitives
//!
//! Everything renders as flat-colored triangles; gradients come from
//! per-vertex colors interpolated by the pipeline.

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::Vertex;

/// Append a single triangle
pub fn triangle(out: &mut Vec<Vertex>, a: Vec2, b: Vec2, c: Vec2, color: [f32; 4]) {
    out.push(Vertex::new(a.x, a.y, color));
    out.push(Vertex::new(b.x, b.y, color));
    out.push(Vertex::new(c.x, c.y, color));
}

/// Append a quad given its four corners in winding order
pub fn quad(out: &mut Vec<Vertex>, a: Vec2, b: Vec2, c: Vec2, d: Vec2, color: [f32; 4]) {
    triangle(out, a, b, c, color);
    triangle(out, a, c, d, color);
}

/// Append a quad with one color per corner; the pipeline interpolates,
/// which is how the background water gradient is produced
pub fn gradient_quad(
    out: &mut Vec<Vertex>,
    corners: [Vec2; 4],
    corner_colors: [[f32; 4]; 4],
) {
    let [a, b, c, d] = corners;
    let [ca, cb, cc, cd] = corner_colors;
    out.push(Vertex::new(a.x, a.y, ca));
    out.push(Vertex::new(b.x, b.y, cb));
    out.push(Vertex::new(c.x, c.y, cc));
    out.push(Vertex::new(a.x, a.y, ca));
    out.push(Vertex::new(c.x, c.y, cc));
    out.push(Vertex::new(d.x, d.y, cd));
}

/// Append an axis-aligned or rotated rectangle around `center`
pub fn rect(out: &mut Vec<Vertex>, center: Vec2, half: Vec2, rotation: f32, color: [f32; 4]) {
    let (sin, cos) = rotation.sin_cos();
    let rot = |p: Vec2| center + Vec2::new(p.x * cos - p.y * sin, p.x * sin + p.y * cos);
    quad(
        out,
        rot(Vec2::new(-half.x, -half.y)),
        rot(Vec2::new(half.x, -half.y)),
        rot(Vec2::new(half.x, half.y)),
        rot(Vec2::new(-half.x, half.y)),
        color,
    );
}

/// Append a filled circle as a triangle fan
pub fn circle(out: &mut Vec<Vertex>, center: Vec2, radius: f32, color: [f32; 4], segments: u32) {
    ellipse(out, center, radius, radius, 0.0, color, segments);
}

/// Append a filled ellipse, optionally rotated
pub fn ellipse(
    out: &mut Vec<Vertex>,
    center: Vec2,
    rx: f32,
    ry: f32,
    rotation: f32,
    color: [f32; 4],
    segments: u32,
) {
    let (sin, cos) = rotation.sin_cos();
    let point = |theta: f32| {
        let p = Vec2::new(rx * theta.cos(), ry * theta.sin());
        center + Vec2::new(p.x * cos - p.y * sin, p.x * sin + p.y * cos)
    };

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * TAU;
        let theta2 = ((i + 1) as f32 / segments as f32) * TAU;
        out.push(Vertex::new(center.x, center.y, color));
        let p1 = point(theta1);
        let p2 = point(theta2);
        out.push(Vertex::new(p1.x, p1.y, color));
        out.push(Vertex::new(p2.x, p2.y, color));
    }
}

/// Append a radial gradient disc: `inner` color at the center blending to
/// `outer` at the rim. With a transparent rim this is a soft glow halo.
pub fn radial_gradient(
    out: &mut Vec<Vertex>,
    center: Vec2,
    radius: f32,
    inner: [f32; 4],
    outer: [f32; 4],
    segments: u32,
) {
    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * TAU;
        let theta2 = ((i + 1) as f32 / segments as f32) * TAU;
        out.push(Vertex::new(center.x, center.y, inner));
        out.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            outer,
        ));
        out.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            outer,
        ));
    }
}

/// Append a ring band with distinct inner/outer edge colors. Used for the
/// vignette (transparent inside, dark outside) and layered glows.
pub fn ring_gradient(
    out: &mut Vec<Vertex>,
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    inner_color: [f32; 4],
    outer_color: [f32; 4],
    segments: u32,
) {
    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * TAU;
        let theta2 = ((i + 1) as f32 / segments as f32) * TAU;

        let inner1 = center + inner_radius * Vec2::new(theta1.cos(), theta1.sin());
        let outer1 = center + outer_radius * Vec2::new(theta1.cos(), theta1.sin());
        let inner2 = center + inner_radius * Vec2::new(theta2.cos(), theta2.sin());
        let outer2 = center + outer_radius * Vec2::new(theta2.cos(), theta2.sin());

        out.push(Vertex::new(inner1.x, inner1.y, inner_color));
        out.push(Vertex::new(outer1.x, outer1.y, outer_color));
        out.push(Vertex::new(inner2.x, inner2.y, inner_color));

        out.push(Vertex::new(inner2.x, inner2.y, inner_color));
        out.push(Vertex::new(outer1.x, outer1.y, outer_color));
        out.push(Vertex::new(outer2.x, outer2.y, outer_color));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_counts_are_triangles() {
        let mut out = Vec::new();
        circle(&mut out, Vec2::ZERO, 10.0, [1.0; 4], 16);
        quad(
            &mut out,
            Vec2::ZERO,
            Vec2::X,
            Vec2::ONE,
            Vec2::Y,
            [1.0; 4],
        );
        ring_gradient(&mut out, Vec2::ZERO, 5.0, 10.0, [0.0; 4], [1.0; 4], 8);
        assert_eq!(out.len() % 3, 0);
    }

    #[test]
    fn test_rect_rotation_preserves_center() {
        let mut out = Vec::new();
        rect(&mut out, Vec2::new(5.0, 5.0), Vec2::new(2.0, 1.0), 1.3, [1.0; 4]);
        let centroid = out
            .iter()
            .fold(Vec2::ZERO, |acc, v| acc + Vec2::new(v.position[0], v.position[1]))
            / out.len() as f32;
        assert!((centroid - Vec2::new(5.0, 5.0)).length() < 0.5);
    }
}
