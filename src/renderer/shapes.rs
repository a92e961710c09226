//! Shape generation for 2D primitives
//!
//! Everything is emitted as triangle lists in world coordinates.

use glam::{Affine2, Vec2};
use std::f32::consts::PI;

use super::vertex::{TexVertex, Vertex};

/// Generate vertices for a thick line segment
///
/// `thickness` is the half-width on each side of the centre line. Degenerate
/// segments produce nothing.
pub fn line(a: Vec2, b: Vec2, color: [f32; 4], thickness: f32) -> Vec<Vertex> {
    let dir = b - a;
    let len = dir.length();
    if len < 1e-4 {
        return Vec::new();
    }
    let normal = Vec2::new(-dir.y, dir.x) / len * thickness;

    let a1 = a + normal;
    let a2 = a - normal;
    let b1 = b + normal;
    let b2 = b - normal;

    vec![
        Vertex::new(a1.x, a1.y, color),
        Vertex::new(a2.x, a2.y, color),
        Vertex::new(b2.x, b2.y, color),
        Vertex::new(a1.x, a1.y, color),
        Vertex::new(b2.x, b2.y, color),
        Vertex::new(b1.x, b1.y, color),
    ]
}

/// Generate vertices for an axis-aligned rectangle from its lower-left corner
pub fn rect(min: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let max = min + size;
    vec![
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, max.y, color),
        Vertex::new(min.x, max.y, color),
    ]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let segments = segments.max(3);
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a textured quad
///
/// The quad is `size` wide and tall, centred on `center` in the local frame
/// of `transform`. Texture v runs top to bottom.
pub fn textured_quad(transform: &Affine2, center: Vec2, size: Vec2, alpha: f32) -> Vec<TexVertex> {
    let half = size * 0.5;
    let corner = |dx: f32, dy: f32| transform.transform_point2(center + Vec2::new(dx, dy));

    let bl = corner(-half.x, -half.y);
    let br = corner(half.x, -half.y);
    let tr = corner(half.x, half.y);
    let tl = corner(-half.x, half.y);

    vec![
        TexVertex::new(bl.x, bl.y, 0.0, 1.0, alpha),
        TexVertex::new(br.x, br.y, 1.0, 1.0, alpha),
        TexVertex::new(tr.x, tr.y, 1.0, 0.0, alpha),
        TexVertex::new(bl.x, bl.y, 0.0, 1.0, alpha),
        TexVertex::new(tr.x, tr.y, 1.0, 0.0, alpha),
        TexVertex::new(tl.x, tl.y, 0.0, 0.0, alpha),
    ]
}
