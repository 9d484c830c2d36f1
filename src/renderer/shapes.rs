//! Shape generation for 2D primitives
//!
//! Everything is emitted as triangle lists so a backend can draw the whole
//! frame with one pipeline.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Filled triangle
pub fn triangle(a: Vec2, b: Vec2, c: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    vec![
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
    ]
}

/// Thick line from `a` to `b`
pub fn segment(a: Vec2, b: Vec2, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let dir = (b - a).normalize_or_zero();
    // Perpendicular for width
    let perp = Vec2::new(-dir.y, dir.x) * (width / 2.0);

    let a1 = a + perp;
    let a2 = a - perp;
    let b1 = b + perp;
    let b2 = b - perp;

    let mut vertices = triangle(a1, a2, b1, color);
    vertices.extend(triangle(b1, a2, b2, color));
    vertices
}

/// Open polyline through `points`
pub fn polyline(points: &[Vec2], width: f32, color: [f32; 4]) -> Vec<Vertex> {
    points
        .windows(2)
        .flat_map(|w| segment(w[0], w[1], width, color))
        .collect()
}

/// Closed outline through `points`
pub fn outline(points: &[Vec2], width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = polyline(points, width, color);
    if let (Some(&first), Some(&last)) = (points.first(), points.last()) {
        if points.len() > 2 {
            vertices.extend(segment(last, first, width, color));
        }
    }
    vertices
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
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

/// Generate vertices for a ring (hollow circle)
pub fn ring(center: Vec2, inner_radius: f32, outer_radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 6) as usize);
    let at = |r: f32, theta: f32| center + Vec2::new(r * theta.cos(), r * theta.sin());

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        let inner1 = at(inner_radius, theta1);
        let outer1 = at(outer_radius, theta1);
        let inner2 = at(inner_radius, theta2);
        let outer2 = at(outer_radius, theta2);

        // Two triangles per segment
        vertices.extend(triangle(inner1, outer1, inner2, color));
        vertices.extend(triangle(inner2, outer1, outer2, color));
    }

    vertices
}

/// Flattened ellipse outline, used for the saucer hull
pub fn ellipse_outline(center: Vec2, rx: f32, ry: f32, width: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let points: Vec<Vec2> = (0..segments)
        .map(|i| {
            let theta = i as f32 / segments as f32 * 2.0 * PI;
            center + Vec2::new(rx * theta.cos(), ry * theta.sin())
        })
        .collect();
    outline(&points, width, color)
}
