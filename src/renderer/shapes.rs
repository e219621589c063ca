//! Shape generation for 2D primitives
//!
//! All shapes are emitted as triangle lists in playfield coordinates.

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::Vertex;

/// Append an axis-aligned rectangle (two triangles)
pub fn rect(out: &mut Vec<Vertex>, min: Vec2, size: Vec2, color: [f32; 4]) {
    let max = min + size;
    out.extend_from_slice(&[
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]);
}

/// Point `k` of `segments` evenly spaced around a circle
fn rim(center: Vec2, radius: f32, k: u32, segments: u32) -> Vec2 {
    let theta = k as f32 / segments as f32 * TAU;
    center + Vec2::new(theta.cos(), theta.sin()) * radius
}

/// Append a filled circle as a fan of `segments` triangles
pub fn circle(out: &mut Vec<Vertex>, center: Vec2, radius: f32, color: [f32; 4], segments: u32) {
    out.reserve(segments as usize * 3);
    for k in 0..segments {
        let a = rim(center, radius, k, segments);
        let b = rim(center, radius, k + 1, segments);
        out.extend_from_slice(&[
            Vertex::new(center.x, center.y, color),
            Vertex::new(a.x, a.y, color),
            Vertex::new(b.x, b.y, color),
        ]);
    }
}

/// Append an annulus between `inner` and `outer`, one quad per segment
pub fn ring(
    out: &mut Vec<Vertex>,
    center: Vec2,
    inner: f32,
    outer: f32,
    color: [f32; 4],
    segments: u32,
) {
    out.reserve(segments as usize * 6);
    for k in 0..segments {
        let (i0, o0) = (rim(center, inner, k, segments), rim(center, outer, k, segments));
        let (i1, o1) = (
            rim(center, inner, k + 1, segments),
            rim(center, outer, k + 1, segments),
        );
        out.extend_from_slice(&[
            Vertex::new(i0.x, i0.y, color),
            Vertex::new(o0.x, o0.y, color),
            Vertex::new(i1.x, i1.y, color),
            Vertex::new(i1.x, i1.y, color),
            Vertex::new(o0.x, o0.y, color),
            Vertex::new(o1.x, o1.y, color),
        ]);
    }
}
